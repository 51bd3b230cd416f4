use colored::Colorize;
use commands::command_argument_builder;
use sitediff::handlers::{handle_classify, handle_default_config, handle_inventory, handle_match};
use sitediff_core::print_banner;

mod commands;

fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");

    // default-config output is meant to be redirected into a file
    let prints_data = matches!(chosen_command.subcommand(), Some(("default-config", _)));
    if !quiet && !prints_data {
        print_banner();
    }

    let result = match chosen_command.subcommand() {
        None => return,
        Some(("inventory", primary_command)) => handle_inventory(primary_command, quiet),
        Some(("classify", primary_command)) => handle_classify(primary_command),
        Some(("match", primary_command)) => handle_match(primary_command),
        Some(("default-config", _)) => handle_default_config(),
        _ => unreachable!("clap should ensure we don't get here"),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

use crate::CLAP_STYLING;
use clap::{arg, command};
use std::path::PathBuf;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("sitediff")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("sitediff")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("inventory")
                .about(
                    "Reconcile old-site and new-site URL inventories and write both CSV \
                reports.",
                )
                .arg(
                    arg!(-r --"root" <DIR>)
                        .required(false)
                        .help("Project root holding the 'old site' and 'new site' directories")
                        .default_value("."),
                )
                .arg(
                    arg!(--"old-dir" <DIR>)
                        .required(false)
                        .help("Old-site export directory (default: <root>/old site)"),
                )
                .arg(
                    arg!(--"new-dir" <DIR>)
                        .required(false)
                        .help("New-site sitemap directory (default: <root>/new site)"),
                )
                .arg(
                    arg!(--"gsc-dir" <DIR>)
                        .required(false)
                        .help("Crawl-status export directory (default: <root>/old site/GSC)"),
                )
                .arg(
                    arg!(-o --"output-dir" <DIR>)
                        .required(false)
                        .help("Where to write the inventory CSVs (default: <root>)"),
                )
                .arg(
                    arg!(-c --"config" <PATH>)
                        .required(false)
                        .help("TOML file overriding the built-in lookup tables"),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Summary format: text, json")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                ),
        )
        .subcommand(
            command!("classify")
                .about("Show the page type, group and matching rule for old-site paths or URLs")
                .arg(
                    arg!(<PATH> ...)
                        .required(true)
                        .help("Paths or URLs to classify"),
                )
                .arg(
                    arg!(--"new-sitemap" <FILE>)
                        .required(false)
                        .help("Classify as new-site pages listed in this sitemap file name"),
                )
                .arg(
                    arg!(-c --"config" <PATH>)
                        .required(false)
                        .help("TOML file overriding the built-in lookup tables"),
                ),
        )
        .subcommand(
            command!("match")
                .about("List old-site equivalence candidates for a new-site path")
                .arg(arg!(<PATH>).required(true).help("New-site path or URL"))
                .arg(
                    arg!(--"old-sitemap" <FILE> ...)
                        .required(true)
                        .help("Old-site sitemap files to match against")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(-c --"config" <PATH>)
                        .required(false)
                        .help("TOML file overriding the built-in lookup tables"),
                ),
        )
        .subcommand(
            command!("default-config").about("Print the built-in configuration as TOML"),
        )
}

// Sitemap <loc> extraction

use crate::error::{IngestError, Result};
use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;
use std::fmt::Display;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Which `<loc>` elements to collect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitemapMode {
    /// Only `<url><loc>` entries.
    UrlsOnly,
    /// `<url><loc>` entries followed by `<sitemap><loc>` entries of a sitemap index.
    WithIndex,
}

/// Read a sitemap file and return its `<loc>` values in document order.
pub fn read_sitemap(path: &Path, mode: SitemapMode) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    let locs = parse_sitemap(&content, mode).map_err(|message| IngestError::XmlError {
        path: path.display().to_string(),
        message,
    })?;
    debug!("{}: {} <loc> entries", path.display(), locs.len());
    Ok(locs)
}

/// Parse sitemap XML. Any well-formedness problem fails the whole document.
///
/// Elements are matched by local name so both namespaced and bare sitemaps work.
/// Page entries come first, then index entries, the way a `url/loc` query followed
/// by a `sitemap/loc` query would return them.
pub fn parse_sitemap(xml: &str, mode: SitemapMode) -> std::result::Result<Vec<String>, String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut url_locs = Vec::new();
    let mut index_locs = Vec::new();
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut saw_root = false;
    // (index entry?, text so far) while inside a <loc>
    let mut loc: Option<(bool, String)> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|err| at_byte(reader.buffer_position(), err))?;
        match event {
            Event::Start(e) => {
                saw_root = true;
                let local = e.local_name().as_ref().to_vec();
                let parent = stack.last().map(|p| p.as_slice());
                if loc.is_none()
                    && local == b"loc"
                    && matches!(parent, Some(b"url") | Some(b"sitemap"))
                {
                    loc = Some((parent == Some(b"sitemap".as_slice()), String::new()));
                }
                stack.push(local);
            }
            Event::Empty(_) => saw_root = true,
            Event::End(e) => {
                stack.pop();
                if e.local_name().as_ref() == b"loc"
                    && let Some((in_index, text)) = loc.take()
                {
                    let text = text.trim();
                    if text.is_empty() {
                        continue;
                    }
                    if in_index {
                        index_locs.push(text.to_string());
                    } else {
                        url_locs.push(text.to_string());
                    }
                }
            }
            Event::Text(e) => {
                if let Some((_, text)) = loc.as_mut() {
                    let decoded = e.decode().map_err(|err| at_byte(reader.buffer_position(), err))?;
                    text.push_str(&decoded);
                }
            }
            Event::CData(e) => {
                if let Some((_, text)) = loc.as_mut() {
                    let decoded = e.decode().map_err(|err| at_byte(reader.buffer_position(), err))?;
                    text.push_str(&decoded);
                }
            }
            Event::GeneralRef(e) => {
                if let Some((_, text)) = loc.as_mut() {
                    let position = reader.buffer_position();
                    if let Some(ch) = e.resolve_char_ref().map_err(|err| at_byte(position, err))? {
                        text.push(ch);
                    } else {
                        let name = e.decode().map_err(|err| at_byte(position, err))?;
                        match resolve_predefined_entity(&name) {
                            Some(value) => text.push_str(value),
                            None => {
                                // unknown entities are kept verbatim
                                text.push('&');
                                text.push_str(&name);
                                text.push(';');
                            }
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        return Err("no root element".to_string());
    }
    if let Some(open) = stack.last() {
        return Err(format!(
            "unexpected end of document inside <{}>",
            String::from_utf8_lossy(open)
        ));
    }

    if mode == SitemapMode::WithIndex {
        url_locs.extend(index_locs);
    }
    Ok(url_locs)
}

fn at_byte(position: impl Display, err: impl Display) -> String {
    format!("at byte {}: {}", position, err)
}

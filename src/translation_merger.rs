use anyhow::Result;
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::file_utils::FileManager;

// @module: Merging page-by-page translation fragments

// @const: Page marker embedded in translation files
static PAGE_MARKER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<!--\s*PAGE\s+(\d+)\s*-->").unwrap()
});

/// Mapping from 1-indexed source page number to translated markdown.
///
/// Keys are whatever the fragment files declare; the composer tolerates
/// pages without an entry.
pub type TranslationMap = BTreeMap<u32, String>;

/// Read the given fragment files, in order, and build the page map.
///
/// Callers pass paths sorted by filename (see `Workspace::fragment_files`);
/// contents are concatenated with a newline separator before tokenizing so
/// fragments may span file boundaries the same way they would in one file.
/// An empty file list yields an empty map.
pub fn merge_fragment_files(files: &[PathBuf]) -> Result<TranslationMap> {
    if files.is_empty() {
        return Ok(TranslationMap::new());
    }

    let mut all_text = String::new();
    for file in files {
        all_text.push_str(&FileManager::read_to_string(file)?);
        all_text.push('\n');
    }

    Ok(parse_fragments(&all_text))
}

/// Tokenize `<!-- PAGE N -->` markers and pair each with the content that
/// follows it, up to the next marker or the end of the text.
///
/// - Content is trimmed of surrounding whitespace.
/// - Text before the first marker is discarded.
/// - A repeated page number overwrites the earlier fragment: last writer
///   wins, in marker order.
pub fn parse_fragments(text: &str) -> TranslationMap {
    let mut pages = TranslationMap::new();

    let markers: Vec<(u32, usize, usize)> = PAGE_MARKER_REGEX
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let number = match caps[1].parse::<u32>() {
                Ok(n) => n,
                Err(_) => {
                    warn!("Skipping unparseable page marker: {}", whole.as_str());
                    return None;
                }
            };
            Some((number, whole.start(), whole.end()))
        })
        .collect();

    for (idx, &(page_num, _, content_start)) in markers.iter().enumerate() {
        let content_end = markers
            .get(idx + 1)
            .map(|&(_, next_start, _)| next_start)
            .unwrap_or(text.len());

        let content = text[content_start..content_end].trim();
        pages.insert(page_num, content.to_string());
    }

    pages
}

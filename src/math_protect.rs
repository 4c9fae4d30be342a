use once_cell::sync::Lazy;
use regex::Regex;

// @module: LaTeX math protection for the markdown pipeline

// @const: Block math `$$...$$`, content may span lines
static BLOCK_MATH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\$\$.+?\$\$").unwrap()
});

// @const: Inline math `$...$`, content stays on one line
static INLINE_MATH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$[^$\n]+?\$").unwrap()
});

/// Mapping from placeholder token back to the original math span
/// (delimiters included).
#[derive(Debug, Default, Clone)]
pub struct MathRestoreTable {
    entries: Vec<(String, String)>,
}

impl MathRestoreTable {
    /// Number of protected spans
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no math was found
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, token: String, original: String) {
        self.entries.push((token, original));
    }
}

/// Replace `$...$` and `$$...$$` spans with placeholder tokens so markdown
/// conversion cannot mangle the LaTeX inside them.
///
/// Block spans are scanned first, inline spans second. An inline delimiter
/// that touches another dollar sign is not a delimiter; the text is left
/// as-is. Unbalanced dollars stay literal.
pub fn protect_math(text: &str) -> (String, MathRestoreTable) {
    let mut table = MathRestoreTable::default();
    let mut counter = 0usize;

    let blocked = replace_blocks(text, &mut table, &mut counter);
    let protected = replace_inline(&blocked, &mut table, &mut counter);

    (protected, table)
}

/// Substitute every placeholder token back to its original math span.
/// Run after HTML generation so the markdown converter never saw raw LaTeX.
pub fn restore_math(html: &str, table: &MathRestoreTable) -> String {
    let mut out = html.to_string();
    for (token, original) in &table.entries {
        out = out.replace(token, original);
    }
    out
}

fn replace_blocks(text: &str, table: &mut MathRestoreTable, counter: &mut usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for m in BLOCK_MATH_REGEX.find_iter(text) {
        out.push_str(&text[last..m.start()]);
        let token = format!("MATHBLOCK{:04}", *counter);
        *counter += 1;
        table.push(token.clone(), m.as_str().to_string());
        out.push_str(&token);
        last = m.end();
    }

    out.push_str(&text[last..]);
    out
}

fn replace_inline(text: &str, table: &mut MathRestoreTable, counter: &mut usize) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut pos = 0;

    while let Some(m) = INLINE_MATH_REGEX.find_at(text, pos) {
        // The regex crate has no lookaround, so the "not adjacent to another
        // dollar" rule is checked by peeking at the neighboring bytes.
        let dollar_before = m.start() > 0 && bytes[m.start() - 1] == b'$';
        let dollar_after = bytes.get(m.end()) == Some(&b'$');
        if dollar_before || dollar_after {
            pos = m.start() + 1;
            continue;
        }

        out.push_str(&text[last..m.start()]);
        let token = format!("MATHINLINE{:04}", *counter);
        *counter += 1;
        table.push(token.clone(), m.as_str().to_string());
        out.push_str(&token);
        last = m.end();
        pos = m.end();
    }

    out.push_str(&text[last..]);
    out
}

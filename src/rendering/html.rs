use comrak::{ComrakOptions, markdown_to_html as comrak_markdown_to_html};

use crate::math_protect::{protect_math, restore_math};

// @module: Markdown to page-styled HTML

/// Fixed A4 page template the rendered markdown body is dropped into.
///
/// KaTeX is loaded from a CDN and typesets `$`/`$$` spans client-side after
/// the page loads; the renderer waits a settle delay for it (see
/// `RenderSession`). The `@page` rule matches the spread half size so the
/// browser paginates overflowing content into additional A4 pages.
const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<link rel="stylesheet"
  href="https://cdn.jsdelivr.net/npm/katex@0.16.22/dist/katex.min.css">
<script defer
  src="https://cdn.jsdelivr.net/npm/katex@0.16.22/dist/katex.min.js">
</script>
<script defer
  src="https://cdn.jsdelivr.net/npm/katex@0.16.22/dist/contrib/auto-render.min.js"
  onload="renderMathInElement(document.body, {
    delimiters: [
      {left: '$$', right: '$$', display: true},
      {left: '$', right: '$', display: false}
    ],
    throwOnError: false
  });">
</script>
<style>
@page {
  size: 595.28pt 841.89pt;
  margin: 30pt 28pt 30pt 28pt;
}
body {
  font-family: "PingFang SC", "Noto Sans CJK SC", "Microsoft YaHei",
               "Hiragino Sans GB", sans-serif;
  font-size: 9pt;
  line-height: 1.7;
  color: #1a1a1a;
  word-wrap: break-word;
  overflow-wrap: break-word;
}
h1 { font-size: 14pt; margin: 12pt 0 6pt; color: #111; }
h2 { font-size: 12pt; margin: 10pt 0 5pt; color: #222; }
h3 { font-size: 10.5pt; margin: 8pt 0 4pt; color: #333; }
h4 { font-size: 9.5pt; margin: 6pt 0 3pt; color: #333; }
p { margin: 4pt 0; }
blockquote {
  margin: 6pt 0; padding: 6pt 10pt;
  border-left: 3pt solid #3366cc; background: #edf0fa;
  color: #1a3366; font-size: 8.5pt; line-height: 1.6;
}
blockquote p { margin: 2pt 0; }
table {
  border-collapse: collapse; width: 100%;
  font-size: 7pt; margin: 6pt 0;
}
th, td { border: 0.5pt solid #ccc; padding: 3pt 4pt; text-align: left; }
th { background: #e0e4ee; font-weight: bold; }
tr:nth-child(even) { background: #f6f6f6; }
pre {
  background: #f4f4f4; padding: 6pt 8pt;
  font-size: 7.5pt; line-height: 1.4;
  overflow-x: hidden; white-space: pre-wrap; word-break: break-all;
}
code {
  font-family: "SF Mono", "Menlo", "Courier New", monospace;
  font-size: 8pt; background: #f0f0f0; padding: 1pt 3pt; border-radius: 2pt;
}
pre code { background: none; padding: 0; }
hr { border: none; border-top: 0.5pt solid #ccc; margin: 8pt 0; }
.katex-display {
  margin: 6pt 0; padding: 4pt 8pt;
  background: #f9f9f2; border-left: 2pt solid #5a9a5a;
  overflow-x: auto;
}
</style>
</head>
<body>
%%CONTENT%%
</body>
</html>"#;

/// Convert markdown to an HTML body, shielding math spans from the
/// converter.
///
/// Tables are enabled on top of CommonMark (fenced code is core), and raw
/// HTML passes through untouched. Math is swapped for placeholder tokens
/// before conversion and restored afterwards, so the converter never sees a
/// dollar sign it could misread as emphasis or text.
pub fn markdown_to_html(md_text: &str) -> String {
    let (protected, table) = protect_math(md_text);

    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.render.unsafe_ = true;

    let html = comrak_markdown_to_html(&protected, &options);
    restore_math(&html, &table)
}

/// Wrap an HTML body in the fixed page template.
pub fn wrap_in_page_template(html_body: &str) -> String {
    PAGE_TEMPLATE.replace("%%CONTENT%%", html_body)
}

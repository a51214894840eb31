//! Standalone HTML page around a rendered preview.

use crate::config::MathMode;
use crate::error::Result;
use crate::escape::escape_html;
use crate::highlight;
use crate::render::Rendered;
use crate::session::FontSize;
use crate::typeset::TypesetConfig;

const KATEX_VERSION: &str = "0.16.9";

const BASE_CSS: &str = r#"
:root { --preview-font-size: 14px; }
body { margin: 0; font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif; color: #24292e; background: #ffffff; }
#preview { max-width: 900px; margin: 0 auto; padding: 24px; font-size: var(--preview-font-size); line-height: 1.6; }
#preview h1, #preview h2 { border-bottom: 1px solid #eaecef; padding-bottom: .3em; }
#preview blockquote { margin: 0; padding: 0 1em; color: #6a737d; border-left: .25em solid #dfe2e5; }
#preview table { border-collapse: collapse; }
#preview th, #preview td { border: 1px solid #dfe2e5; padding: 6px 13px; }
#preview mark { background: #fff3a3; }
#preview code { font-family: SFMono-Regular, Consolas, "Liberation Mono", Menlo, monospace; }
.toc { background: #f6f8fa; border: 1px solid #e1e4e8; border-radius: 6px; padding: 12px 16px; margin-bottom: 16px; }
.toc-title { font-weight: 600; margin-bottom: 8px; }
.toc ul { list-style: none; padding-left: 1.2em; margin: 0; }
.toc a { color: #0366d6; text-decoration: none; }
.code-block-wrapper { display: flex; background: #f6f8fa; border-radius: 6px; overflow: auto; margin: 16px 0; }
.line-numbers { white-space: pre; text-align: right; padding: 16px 8px; color: #959da5; border-right: 1px solid #e1e4e8; user-select: none; font-family: SFMono-Regular, Consolas, "Liberation Mono", Menlo, monospace; }
.code-content { margin: 0; padding: 16px; flex: 1; }
.task-list-item { list-style: none; }
.task-list-item input { margin: 0 .3em 0 -1.4em; }
.math-display { text-align: center; margin: 1em 0; overflow-x: auto; }
.math-error { font-family: monospace; }
"#;

const SCROLL_SCRIPT: &str = r"function scrollToSection(id) {
  const element = document.getElementById(id);
  if (element) {
    element.scrollIntoView({ behavior: 'smooth', block: 'start' });
  }
}";

/// Settings for [`standalone_page`].
#[derive(Debug, Clone, PartialEq)]
pub struct PageOptions {
    /// Page title. Defaults to the first heading.
    pub title: Option<String>,
    /// Must match the mode the preview was rendered with.
    pub math: MathMode,
    pub font_size: FontSize,
    pub typeset: TypesetConfig,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            title: None,
            math: MathMode::Client,
            font_size: FontSize::default(),
            typeset: TypesetConfig::default(),
        }
    }
}

/// Wrap `rendered` in a complete HTML document.
///
/// Client-side math pulls KaTeX from a CDN and typesets the preview with
/// the serialized [`TypesetConfig`].
///
/// # Errors
/// Returns an error if the highlight stylesheet cannot be generated.
pub fn standalone_page(rendered: &Rendered, options: &PageOptions) -> Result<String> {
    let title = options
        .title
        .as_deref()
        .or_else(|| rendered.toc.first().map(|entry| entry.text.as_str()))
        .unwrap_or("Document");
    let highlight_css = highlight::stylesheet()?;

    let mut page = String::with_capacity(rendered.html.len() + BASE_CSS.len() + highlight_css.len() + 1024);
    page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    page.push_str("  <meta charset=\"utf-8\">\n");
    page.push_str(
        "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
    );
    page.push_str(&format!("  <title>{}</title>\n", escape_html(title)));
    page.push_str("  <style>");
    page.push_str(BASE_CSS);
    page.push_str(&format!(":root {{ {} }}\n", options.font_size.css_variables()));
    page.push_str("  </style>\n  <style>\n");
    page.push_str(&highlight_css);
    page.push_str("  </style>\n");
    if options.math == MathMode::Client {
        push_katex(&mut page, &options.typeset);
    }
    page.push_str(&format!("  <script>\n{SCROLL_SCRIPT}\n  </script>\n"));
    page.push_str("</head>\n<body>\n<main id=\"preview\">\n");
    page.push_str(&rendered.html);
    page.push_str("</main>\n</body>\n</html>\n");
    Ok(page)
}

fn push_katex(page: &mut String, typeset: &TypesetConfig) {
    let base = format!("https://cdn.jsdelivr.net/npm/katex@{KATEX_VERSION}/dist");
    page.push_str(&format!(
        "  <link rel=\"stylesheet\" href=\"{base}/katex.min.css\">\n"
    ));
    page.push_str(&format!(
        "  <script defer src=\"{base}/katex.min.js\"></script>\n"
    ));
    page.push_str(&format!(
        "  <script defer src=\"{base}/contrib/auto-render.min.js\"></script>\n"
    ));
    // `</` would end the script element early.
    let config = typeset.to_json().replace("</", "<\\/");
    page.push_str(&format!(
        "  <script>\ndocument.addEventListener('DOMContentLoaded', function () {{\n  try {{\n    renderMathInElement(document.getElementById('preview'), {config});\n  }} catch (e) {{\n    console.warn('KaTeX rendering error:', e);\n  }}\n}});\n  </script>\n"
    ));
}

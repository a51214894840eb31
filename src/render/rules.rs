//! Rendering rules for the node kinds the preview customizes.
//!
//! Each rule is a plain function stored in [`RenderRules`]. The writer
//! renders a node's children first and then hands the rule a small view of
//! the node, so replacing a rule never requires touching the AST walk.

use std::sync::LazyLock;

use regex::Regex;

use super::RenderContext;
use crate::escape::escape_html;
use crate::highlight::highlight_html;
use crate::math::reinstate_source;
use crate::toc::TocEntry;

static HIGHLIGHT_MARK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"==(.*?)==").expect("valid highlight pattern"));
static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));
static NON_ANCHOR_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^A-Za-z0-9_\x{4e00}-\x{9fa5}]+").expect("valid anchor pattern")
});

/// A heading after its inline content has been rendered.
#[derive(Debug, Clone, Copy)]
pub struct HeadingView<'a> {
    pub level: u8,
    /// Rendered inline HTML.
    pub inner_html: &'a str,
    /// Text content with markup removed, math source reinstated.
    pub plain_text: &'a str,
}

/// A fenced or indented code block.
#[derive(Debug, Clone, Copy)]
pub struct CodeView<'a> {
    /// First word of the info string, if any.
    pub language: Option<&'a str>,
    /// Block content, normally ending in a newline.
    pub literal: &'a str,
}

/// A list after its items have been rendered.
#[derive(Debug, Clone, Copy)]
pub struct ListView<'a> {
    pub ordered: bool,
    pub start: usize,
    pub body: &'a str,
}

/// A list item after its content has been rendered.
#[derive(Debug, Clone, Copy)]
pub struct ListItemView<'a> {
    /// `Some(checked)` for task list items.
    pub task: Option<bool>,
    pub body: &'a str,
}

pub type HeadingRule = fn(&mut RenderContext<'_>, &HeadingView<'_>) -> String;
pub type CodeRule = fn(&mut RenderContext<'_>, &CodeView<'_>) -> String;
pub type ListRule = fn(&mut RenderContext<'_>, &ListView<'_>) -> String;
pub type ListItemRule = fn(&mut RenderContext<'_>, &ListItemView<'_>) -> String;
/// Receives text that has already been HTML-escaped.
pub type TextRule = fn(&mut RenderContext<'_>, &str) -> String;

/// Rule table keyed by node kind.
#[derive(Debug, Clone, Copy)]
pub struct RenderRules {
    pub heading: HeadingRule,
    pub code: CodeRule,
    pub list: ListRule,
    pub list_item: ListItemRule,
    pub text: TextRule,
}

impl Default for RenderRules {
    fn default() -> Self {
        Self {
            heading: heading_with_anchor,
            code: code_with_line_numbers,
            list: list_with_start,
            list_item: list_item_with_checkbox,
            text: text_with_highlight_marks,
        }
    }
}

/// Heading text as it appears in the table of contents.
pub fn clean_heading_text(plain: &str) -> String {
    let unmarked = HIGHLIGHT_MARK.replace_all(plain, "$1");
    HTML_TAG.replace_all(&unmarked, "").into_owned()
}

/// Anchor id for a cleaned heading.
///
/// Lower-cased, every run of characters other than ASCII word characters
/// and CJK ideographs collapsed to `-`, and outer hyphens trimmed.
pub fn anchor_id(clean_text: &str) -> String {
    let lowered = clean_text.to_lowercase();
    NON_ANCHOR_RUN
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Records the heading for the TOC and writes it with an anchor id.
pub fn heading_with_anchor(ctx: &mut RenderContext<'_>, heading: &HeadingView<'_>) -> String {
    let text = clean_heading_text(heading.plain_text);
    let id = anchor_id(&text);
    let level = heading.level;
    let html = format!(
        "<h{level} id=\"{}\">{}</h{level}>\n",
        escape_html(&id),
        heading.inner_html
    );
    ctx.toc.push(TocEntry { level, text, id });
    html
}

/// Line-numbered, highlighted code. `math` blocks pass through as a paragraph
/// so their placeholders are restored like any other math.
pub fn code_with_line_numbers(ctx: &mut RenderContext<'_>, code: &CodeView<'_>) -> String {
    if code.language == Some("math") {
        return format!("<p>{}</p>\n", code.literal);
    }

    let source = reinstate_source(code.literal, ctx.math);
    let source = source.strip_suffix('\n').unwrap_or(&source);
    let highlighted = highlight_html(source, code.language);

    let class = code.language.map_or_else(
        || "hl".to_string(),
        |lang| format!("hl language-{}", escape_html(lang)),
    );
    let mut html = String::from(r#"<div class="code-block-wrapper">"#);
    if ctx.options.line_numbers {
        let count = source.split('\n').count();
        let numbers = (1..=count)
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        html.push_str(&format!(r#"<div class="line-numbers">{numbers}</div>"#));
    }
    html.push_str(&format!(
        r#"<pre class="code-content"><code class="{class}">{}</code></pre></div>"#,
        highlighted.html
    ));
    html.push('\n');
    html
}

/// Ordered lists keep their starting number.
pub fn list_with_start(_ctx: &mut RenderContext<'_>, list: &ListView<'_>) -> String {
    let tag = if list.ordered { "ol" } else { "ul" };
    let start = if list.ordered && list.start != 1 {
        format!(" start=\"{}\"", list.start)
    } else {
        String::new()
    };
    format!("<{tag}{start}>\n{}</{tag}>\n", list.body)
}

/// Task items get a disabled checkbox in front of their text.
pub fn list_item_with_checkbox(_ctx: &mut RenderContext<'_>, item: &ListItemView<'_>) -> String {
    match item.task {
        Some(checked) => {
            let checkbox = if checked {
                r#"<input type="checkbox" checked disabled>"#
            } else {
                r#"<input type="checkbox" disabled>"#
            };
            format!(
                "<li class=\"task-list-item\">{checkbox} {}</li>\n",
                item.body
            )
        }
        None => format!("<li>{}</li>\n", item.body),
    }
}

/// `==text==` becomes `<mark>text</mark>`.
pub fn text_with_highlight_marks(_ctx: &mut RenderContext<'_>, escaped: &str) -> String {
    HIGHLIGHT_MARK
        .replace_all(escaped, "<mark>$1</mark>")
        .into_owned()
}

//! AST walk that writes HTML from a comrak document.

use comrak::nodes::{AstNode, ListType, NodeValue, TableAlignment};
use comrak::{Arena, Options, parse_document};

use super::RenderContext;
use super::rules::{CodeView, HeadingView, ListItemView, ListView, RenderRules};
use crate::escape::{escape_html, push_escaped};
use crate::math::reinstate_source;

/// Parse `source` and write it as HTML, applying `rules`.
pub(super) fn write_html(source: &str, ctx: &mut RenderContext<'_>, rules: &RenderRules) -> String {
    let arena = Arena::new();
    let mut options = Options::default();

    // GFM extensions
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.footnotes = true;
    options.extension.superscript = true;

    let root = parse_document(&arena, source, &options);
    let mut out = String::with_capacity(source.len() * 2);
    let mut writer = Writer { ctx, rules };
    writer.node(root, &mut out);
    out
}

struct Writer<'r, 'c> {
    ctx: &'r mut RenderContext<'c>,
    rules: &'r RenderRules,
}

impl Writer<'_, '_> {
    fn children<'a>(&mut self, node: &'a AstNode<'a>, out: &mut String) {
        for child in node.children() {
            self.node(child, out);
        }
    }

    fn children_to_string<'a>(&mut self, node: &'a AstNode<'a>) -> String {
        let mut inner = String::new();
        self.children(node, &mut inner);
        inner
    }

    fn node<'a>(&mut self, node: &'a AstNode<'a>, out: &mut String) {
        match &node.data.borrow().value {
            NodeValue::Document => self.children(node, out),

            NodeValue::Heading(heading) => {
                let inner_html = self.children_to_string(node);
                let plain = plain_text(node);
                let plain = reinstate_source(&plain, self.ctx.math);
                let view = HeadingView {
                    level: heading.level,
                    inner_html: &inner_html,
                    plain_text: &plain,
                };
                out.push_str(&(self.rules.heading)(self.ctx, &view));
            }

            NodeValue::Paragraph => {
                if in_tight_list(node) {
                    self.children(node, out);
                } else {
                    out.push_str("<p>");
                    self.children(node, out);
                    out.push_str("</p>\n");
                }
            }

            NodeValue::CodeBlock(code_block) => {
                let language = code_block
                    .info
                    .split_whitespace()
                    .next()
                    .filter(|s| !s.is_empty());
                let view = CodeView {
                    language,
                    literal: &code_block.literal,
                };
                out.push_str(&(self.rules.code)(self.ctx, &view));
            }

            NodeValue::List(list) => {
                let body = self.children_to_string(node);
                let view = ListView {
                    ordered: list.list_type == ListType::Ordered,
                    start: list.start,
                    body: &body,
                };
                out.push_str(&(self.rules.list)(self.ctx, &view));
            }

            NodeValue::Item(_) => {
                let body = self.children_to_string(node);
                let view = ListItemView {
                    task: None,
                    body: &body,
                };
                out.push_str(&(self.rules.list_item)(self.ctx, &view));
            }

            NodeValue::TaskItem(symbol) => {
                let body = self.children_to_string(node);
                let view = ListItemView {
                    task: Some(symbol.is_some()),
                    body: &body,
                };
                out.push_str(&(self.rules.list_item)(self.ctx, &view));
            }

            NodeValue::Text(text) => {
                let escaped = escape_html(text);
                out.push_str(&(self.rules.text)(self.ctx, &escaped));
            }

            NodeValue::Code(code) => {
                out.push_str("<code>");
                push_escaped(out, &reinstate_source(&code.literal, self.ctx.math));
                out.push_str("</code>");
            }

            NodeValue::HtmlBlock(block) => out.push_str(&block.literal),
            NodeValue::HtmlInline(html) => out.push_str(html),

            NodeValue::SoftBreak => {
                if self.ctx.options.breaks {
                    out.push_str("<br />\n");
                } else {
                    out.push('\n');
                }
            }
            NodeValue::LineBreak => out.push_str("<br />\n"),

            NodeValue::Emph => self.wrap(node, "em", out),
            NodeValue::Strong => self.wrap(node, "strong", out),
            NodeValue::Strikethrough => self.wrap(node, "del", out),
            NodeValue::Superscript => self.wrap(node, "sup", out),

            NodeValue::Link(link) => {
                out.push_str("<a href=\"");
                push_escaped(out, &link.url);
                out.push('"');
                if !link.title.is_empty() {
                    out.push_str(" title=\"");
                    push_escaped(out, &link.title);
                    out.push('"');
                }
                out.push('>');
                self.children(node, out);
                out.push_str("</a>");
            }

            NodeValue::Image(image) => {
                out.push_str("<img src=\"");
                push_escaped(out, &image.url);
                out.push_str("\" alt=\"");
                push_escaped(out, &plain_text(node));
                out.push('"');
                if !image.title.is_empty() {
                    out.push_str(" title=\"");
                    push_escaped(out, &image.title);
                    out.push('"');
                }
                out.push_str(" />");
            }

            NodeValue::BlockQuote => {
                out.push_str("<blockquote>\n");
                self.children(node, out);
                out.push_str("</blockquote>\n");
            }

            NodeValue::ThematicBreak => out.push_str("<hr />\n"),

            NodeValue::Table(table) => {
                let alignments = table.alignments.clone();
                self.table(node, &alignments, out);
            }

            NodeValue::FootnoteDefinition(def) => {
                out.push_str("<div class=\"footnote\" id=\"fn-");
                push_escaped(out, &def.name);
                out.push_str("\">\n");
                self.children(node, out);
                out.push_str("</div>\n");
            }

            NodeValue::FootnoteReference(reference) => {
                out.push_str("<sup class=\"footnote-ref\"><a href=\"#fn-");
                push_escaped(out, &reference.name);
                out.push_str("\">");
                push_escaped(out, &reference.name);
                out.push_str("</a></sup>");
            }

            _ => self.children(node, out),
        }
    }

    fn wrap<'a>(&mut self, node: &'a AstNode<'a>, tag: &str, out: &mut String) {
        out.push('<');
        out.push_str(tag);
        out.push('>');
        self.children(node, out);
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }

    fn table<'a>(&mut self, node: &'a AstNode<'a>, alignments: &[TableAlignment], out: &mut String) {
        out.push_str("<table>\n");
        let mut in_body = false;
        for row in node.children() {
            let is_header = matches!(row.data.borrow().value, NodeValue::TableRow(true));
            if is_header {
                out.push_str("<thead>\n");
            } else if !in_body {
                out.push_str("<tbody>\n");
                in_body = true;
            }

            out.push_str("<tr>\n");
            let cell_tag = if is_header { "th" } else { "td" };
            for (index, cell) in row.children().enumerate() {
                out.push('<');
                out.push_str(cell_tag);
                match alignments.get(index).copied().unwrap_or(TableAlignment::None) {
                    TableAlignment::Left => out.push_str(" style=\"text-align: left\""),
                    TableAlignment::Center => out.push_str(" style=\"text-align: center\""),
                    TableAlignment::Right => out.push_str(" style=\"text-align: right\""),
                    TableAlignment::None => {}
                }
                out.push('>');
                self.children(cell, out);
                out.push_str("</");
                out.push_str(cell_tag);
                out.push_str(">\n");
            }
            out.push_str("</tr>\n");

            if is_header {
                out.push_str("</thead>\n");
            }
        }
        if in_body {
            out.push_str("</tbody>\n");
        }
        out.push_str("</table>\n");
    }
}

/// Paragraphs directly inside an item of a tight list render without `<p>`.
fn in_tight_list<'a>(paragraph: &'a AstNode<'a>) -> bool {
    paragraph
        .parent()
        .and_then(|item| item.parent())
        .is_some_and(|list| matches!(&list.data.borrow().value, NodeValue::List(l) if l.tight))
}

/// Text content of a node with inline markup removed.
fn plain_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    plain_text_recursive(node, &mut text);
    text
}

fn plain_text_recursive<'a>(node: &'a AstNode<'a>, text: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(t) => text.push_str(t),
        NodeValue::Code(c) => text.push_str(&c.literal),
        NodeValue::HtmlInline(html) => text.push_str(html),
        NodeValue::SoftBreak | NodeValue::LineBreak => text.push(' '),
        _ => {
            for child in node.children() {
                plain_text_recursive(child, text);
            }
        }
    }
}

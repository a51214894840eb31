//! Table of contents.
//!
//! Headings are collected while the document renders; afterwards the
//! `[TOC]` marker in the HTML is replaced with a nested list of anchors.

use std::sync::LazyLock;

use regex::Regex;

use crate::escape::{escape_html, escape_js_in_attr};

static TOC_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<p>\[TOC\]</p>|\[TOC\]").expect("valid toc marker pattern"));

/// Literal token that requests a table of contents.
pub const TOC_MARKER_TEXT: &str = "[TOC]";

/// Title shown above the generated list.
pub const TOC_TITLE: &str = "📑 Contents";

/// A heading recorded during rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    /// Heading level, 1-6.
    pub level: u8,
    /// Heading text with inline markup removed.
    pub text: String,
    /// Anchor id written on the heading element.
    pub id: String,
}

/// A heading with the headings nested beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocNode {
    pub entry: TocEntry,
    pub children: Vec<TocNode>,
}

/// Build the TOC fragment. Returns an empty string when there are no entries.
///
/// List depth follows heading depth: a deeper heading opens one `<ul>` per
/// level skipped, a shallower one closes them again.
pub fn toc_html(entries: &[TocEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let mut html = format!(r#"<div class="toc"><div class="toc-title">{TOC_TITLE}</div><ul>"#);
    let mut current_level = 1usize;
    for entry in entries {
        let level = usize::from(entry.level);
        if level > current_level {
            html.push_str(&"<ul>".repeat(level - current_level));
        } else if level < current_level {
            html.push_str(&"</ul>".repeat(current_level - level));
        }
        html.push_str(&format!(
            r##"<li><a href="#{}" onclick="scrollToSection('{}'); return false;">{}</a></li>"##,
            escape_html(&entry.id),
            escape_js_in_attr(&entry.id),
            escape_html(&entry.text),
        ));
        current_level = level;
    }
    html.push_str(&"</ul>".repeat(current_level));
    html.push_str("</div>");
    html
}

/// Replace every `[TOC]` marker in rendered HTML.
///
/// A marker alone in a paragraph is replaced together with its `<p>`. With no
/// headings the markers are removed.
pub fn substitute_toc(html: &str, entries: &[TocEntry]) -> String {
    if !html.contains(TOC_MARKER_TEXT) {
        return html.to_string();
    }
    let fragment = toc_html(entries);
    TOC_MARKER
        .replace_all(html, regex::NoExpand(&fragment))
        .into_owned()
}

/// Arrange entries as a tree. A heading becomes a child of the closest
/// preceding heading with a smaller level.
pub fn toc_tree(entries: &[TocEntry]) -> Vec<TocNode> {
    // Open ancestors, innermost last.
    let mut stack: Vec<TocNode> = Vec::new();
    let mut roots = Vec::new();

    for entry in entries {
        while stack.last().is_some_and(|open| open.entry.level >= entry.level) {
            close_top(&mut stack, &mut roots);
        }
        stack.push(TocNode {
            entry: entry.clone(),
            children: Vec::new(),
        });
    }
    while !stack.is_empty() {
        close_top(&mut stack, &mut roots);
    }
    roots
}

fn close_top(stack: &mut Vec<TocNode>, roots: &mut Vec<TocNode>) {
    if let Some(node) = stack.pop() {
        match stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => roots.push(node),
        }
    }
}

/// Render the tree as an indented plain-text outline.
pub fn outline(nodes: &[TocNode]) -> String {
    fn walk(nodes: &[TocNode], depth: usize, out: &mut String) {
        for node in nodes {
            out.push_str(&"  ".repeat(depth));
            out.push_str("- ");
            out.push_str(&node.entry.text);
            out.push_str(" (#");
            out.push_str(&node.entry.id);
            out.push_str(")\n");
            walk(&node.children, depth + 1, out);
        }
    }
    let mut out = String::new();
    walk(nodes, 0, &mut out);
    out
}

//! Markdown to HTML rendering.
//!
//! The pipeline for one render pass:
//! 1. [`crate::math::isolate`] swaps math for placeholders
//! 2. comrak parses the rest with GFM extensions
//! 3. the writer walks the AST, delegating headings, code, lists, list
//!    items and text to the [`RenderRules`] table
//! 4. placeholders are restored through the configured typesetter
//! 5. `[TOC]` markers are replaced with the collected headings

mod rules;
mod writer;

pub use rules::{
    CodeRule, CodeView, HeadingRule, HeadingView, ListItemRule, ListItemView, ListRule, ListView,
    RenderRules, TextRule, anchor_id, clean_heading_text, code_with_line_numbers,
    heading_with_anchor, list_item_with_checkbox, list_with_start, text_with_highlight_marks,
};

use crate::config::MathMode;
use crate::math::{self, MathExpr};
use crate::toc::{self, TocEntry};
use crate::typeset::{self, MathTypesetter, TypesetConfig};

/// Options for a [`Renderer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Render single newlines as `<br />`.
    pub breaks: bool,
    /// Emit a line-number gutter beside code blocks.
    pub line_numbers: bool,
    /// Where math gets typeset.
    pub math: MathMode,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            breaks: true,
            line_numbers: true,
            math: MathMode::Client,
        }
    }
}

/// State shared by the rules during one render pass.
#[derive(Debug)]
pub struct RenderContext<'a> {
    /// Headings collected so far, in document order.
    pub toc: Vec<TocEntry>,
    /// Math extracted from this pass's source.
    pub math: &'a [MathExpr],
    pub options: &'a RenderOptions,
}

impl<'a> RenderContext<'a> {
    pub const fn new(math: &'a [MathExpr], options: &'a RenderOptions) -> Self {
        Self {
            toc: Vec::new(),
            math,
            options,
        }
    }
}

/// Output of one render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    pub html: String,
    pub toc: Vec<TocEntry>,
    pub math: Vec<MathExpr>,
}

/// The configured rendering pipeline.
pub struct Renderer {
    options: RenderOptions,
    rules: RenderRules,
    typesetter: Box<dyn MathTypesetter>,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        let typesetter = typeset::for_mode(options.math, TypesetConfig::default());
        Self {
            options,
            rules: RenderRules::default(),
            typesetter,
        }
    }

    /// Replace the rule table.
    pub fn with_rules(mut self, rules: RenderRules) -> Self {
        self.rules = rules;
        self
    }

    /// Replace the math typesetter.
    pub fn with_typesetter(mut self, typesetter: Box<dyn MathTypesetter>) -> Self {
        self.typesetter = typesetter;
        self
    }

    pub const fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub const fn rules(&self) -> &RenderRules {
        &self.rules
    }

    /// Render markdown source to preview HTML.
    pub fn render(&self, source: &str) -> Rendered {
        let _span = tracing::debug_span!("render", bytes = source.len()).entered();

        let isolated = math::isolate(source);
        let mut ctx = RenderContext::new(&isolated.expressions, &self.options);
        let body = writer::write_html(&isolated.text, &mut ctx, &self.rules);
        let toc = ctx.toc;

        let restored = math::restore(&body, &isolated.expressions, |expr| {
            self.typesetter.typeset(expr)
        });
        let html = toc::substitute_toc(&restored, &toc);

        tracing::debug!(
            headings = toc.len(),
            math = isolated.expressions.len(),
            html_bytes = html.len(),
            "render complete"
        );
        Rendered {
            html,
            toc,
            math: isolated.expressions,
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("options", &self.options)
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}

/// Render with default options.
pub fn render(source: &str) -> Rendered {
    Renderer::default().render(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typeset::MathmlTypesetter;

    #[test]
    fn test_inline_math_is_restored_with_delimiters() {
        let out = render("Hello $E=mc^2$ world");
        assert_eq!(out.html, "<p>Hello $E=mc^2$ world</p>\n");
        assert_eq!(out.math.len(), 1);
    }

    #[test]
    fn test_inline_math_is_typeset_outside_text() {
        let renderer = Renderer::default().with_typesetter(Box::new(MathmlTypesetter::default()));
        let out = renderer.render("Hello $E=mc^2$ world");
        assert!(out.html.starts_with(r#"<p>Hello <span class="math math-inline"><math"#));
        assert!(out.html.ends_with("</span> world</p>\n"));
    }

    #[test]
    fn test_multiline_double_dollar_renders_as_block() {
        let out = render("$$\na+b\n$$");
        assert_eq!(out.html.trim_end(), "$$\na+b\n$$");
        assert!(!out.html.contains("<p>"));
    }

    #[test]
    fn test_single_line_double_dollar_renders_inline() {
        let out = render("$$a+b$$");
        assert!(out.html.contains("$a+b$"));
        assert!(!out.html.contains("$$"));
    }

    #[test]
    fn test_display_math_is_not_wrapped_in_paragraph() {
        let renderer = Renderer::default().with_typesetter(Box::new(MathmlTypesetter::default()));
        let out = renderer.render("Intro\n\n$$\n\\frac{1}{2}\n$$\n\nOutro");
        assert!(out.html.contains(r#"<div class="math math-display">"#));
        assert!(!out.html.contains(r#"<p><div class="math"#));
    }

    #[test]
    fn test_toc_marker_is_replaced() {
        let out = render("[TOC]\n\n# A\n\n## B\n\n# C");
        assert!(out.html.starts_with(r#"<div class="toc">"#));
        assert_eq!(out.toc.len(), 3);
        assert!(out.html.contains(r#"<h2 id="b">B</h2>"#));
    }

    #[test]
    fn test_custom_rule_replaces_default() {
        fn shout(_ctx: &mut RenderContext<'_>, text: &str) -> String {
            text.to_uppercase()
        }
        let rules = RenderRules {
            text: shout,
            ..RenderRules::default()
        };
        let out = Renderer::default().with_rules(rules).render("quiet");
        assert_eq!(out.html, "<p>QUIET</p>\n");
    }

    #[test]
    fn test_each_render_starts_a_fresh_toc() {
        let renderer = Renderer::default();
        assert_eq!(renderer.render("# One").toc.len(), 1);
        assert_eq!(renderer.render("no headings").toc.len(), 0);
    }

    fn mathml_renderer() -> Renderer {
        Renderer::new(RenderOptions {
            math: MathMode::Mathml,
            ..RenderOptions::default()
        })
    }

    #[test]
    fn test_empty_double_dollar_in_both_modes() {
        assert_eq!(render("a $$$$ b").html, "<p>a $$ b</p>\n");

        let out = mathml_renderer().render("a $$$$ b");
        assert!(out.html.starts_with("<p>a <span"));
        assert!(out.html.contains("math-inline"));
        assert!(!out.html.contains("MATH_BLOCK"));
    }

    #[test]
    fn test_triple_dollar_in_both_modes() {
        assert_eq!(render("$$$x$$").html, "<p>$$x$</p>\n");

        let out = mathml_renderer().render("$$$x$$");
        assert!(out.html.contains('x'));
        assert!(!out.html.contains("math-display"));
        assert!(!out.html.contains("MATH_BLOCK"));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn dollar_heavy_input_renders_as_mathml(source in "[a-z$\n ]{0,60}") {
                let out = mathml_renderer().render(&source);
                prop_assert!(!out.html.contains("MATH_BLOCK"));
            }
        }
    }
}

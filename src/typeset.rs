//! Math typesetting.
//!
//! Restored math can be finished in two places:
//! - in the browser, by KaTeX's auto-render extension, which scans the
//!   preview for `$$`/`$` delimiters using [`TypesetConfig`]
//! - in process, by [`MathmlTypesetter`], which turns LaTeX into MathML
//!   with pulldown-latex

use std::collections::BTreeMap;
use std::sync::LazyLock;

use pulldown_latex::{
    Parser, Storage, config::DisplayMode, config::RenderConfig, mathml::push_mathml,
};
use regex::{Captures, Regex};
use serde::Serialize;

use crate::config::MathMode;
use crate::escape::{escape_html, push_escaped};
use crate::math::MathExpr;

static COMMAND_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\[A-Za-z]+").expect("valid command pattern"));

/// A delimiter pair recognized by the typesetter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Delimiter {
    pub left: String,
    pub right: String,
    pub display: bool,
}

/// Typesetter options. Serializes to the option object KaTeX's
/// `renderMathInElement` expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypesetConfig {
    pub delimiters: Vec<Delimiter>,
    pub throw_on_error: bool,
    pub error_color: String,
    pub strict: bool,
    pub trust: bool,
    pub macros: BTreeMap<String, String>,
}

impl Default for TypesetConfig {
    fn default() -> Self {
        let macros = [
            ("\\RR", "\\mathbb{R}"),
            ("\\NN", "\\mathbb{N}"),
            ("\\ZZ", "\\mathbb{Z}"),
            ("\\QQ", "\\mathbb{Q}"),
            ("\\CC", "\\mathbb{C}"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            delimiters: vec![
                Delimiter {
                    left: "$$".to_string(),
                    right: "$$".to_string(),
                    display: true,
                },
                Delimiter {
                    left: "$".to_string(),
                    right: "$".to_string(),
                    display: false,
                },
            ],
            throw_on_error: false,
            error_color: "#cc0000".to_string(),
            strict: false,
            trust: false,
            macros,
        }
    }
}

impl TypesetConfig {
    /// The config as a JSON object literal for the page bootstrap script.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Expand macro shorthands such as `\RR` in a LaTeX body.
    ///
    /// Only whole command names are replaced, so `\RRx` is left alone.
    pub fn expand_macros<'a>(&self, latex: &'a str) -> std::borrow::Cow<'a, str> {
        if self.macros.is_empty() {
            return std::borrow::Cow::Borrowed(latex);
        }
        COMMAND_PATTERN.replace_all(latex, |caps: &Captures<'_>| {
            self.macros
                .get(&caps[0])
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
    }
}

/// Produces the HTML that replaces one math placeholder.
pub trait MathTypesetter {
    fn typeset(&self, expr: &MathExpr) -> String;
}

/// Leaves delimiters in place for the browser-side typesetter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientTypesetter;

impl MathTypesetter for ClientTypesetter {
    fn typeset(&self, expr: &MathExpr) -> String {
        // The browser decodes entities back into the text node KaTeX reads.
        escape_html(&expr.normalized)
    }
}

/// Renders LaTeX to MathML in process.
#[derive(Debug, Clone, Default)]
pub struct MathmlTypesetter {
    config: TypesetConfig,
}

impl MathmlTypesetter {
    pub const fn new(config: TypesetConfig) -> Self {
        Self { config }
    }

    fn render(&self, latex: &str, display: bool) -> Result<String, String> {
        let expanded = self.config.expand_macros(latex);
        let storage = Storage::new();
        let parser = Parser::new(&expanded, &storage);
        let config = RenderConfig {
            display_mode: if display {
                DisplayMode::Block
            } else {
                DisplayMode::Inline
            },
            ..Default::default()
        };

        let events: Vec<_> = parser.collect();
        let errors: Vec<String> = events
            .iter()
            .filter_map(|e| e.as_ref().err().map(ToString::to_string))
            .collect();
        if !errors.is_empty() {
            return Err(errors.join("; "));
        }

        let mut mathml = String::new();
        push_mathml(&mut mathml, events.into_iter(), config).map_err(|e| e.to_string())?;
        Ok(mathml)
    }

    fn error_html(&self, expr: &MathExpr, message: &str) -> String {
        let class = if expr.is_display() {
            "math-display"
        } else {
            "math-inline"
        };
        let mut out = format!(
            r#"<span class="math math-error {class}" style="color: {}" title=""#,
            escape_html(&self.config.error_color)
        );
        push_escaped(&mut out, message);
        out.push_str(r#""><code>"#);
        push_escaped(&mut out, &expr.normalized);
        out.push_str("</code></span>");
        out
    }
}

impl MathTypesetter for MathmlTypesetter {
    fn typeset(&self, expr: &MathExpr) -> String {
        let display = expr.is_display();
        match self.render(expr.body(), display) {
            Ok(mathml) if display => format!(r#"<div class="math math-display">{mathml}</div>"#),
            Ok(mathml) => format!(r#"<span class="math math-inline">{mathml}</span>"#),
            Err(message) => {
                tracing::warn!(source = %expr.normalized, %message, "math rendering error");
                self.error_html(expr, &message)
            }
        }
    }
}

/// The typesetter for a configured math mode.
pub fn for_mode(mode: MathMode, config: TypesetConfig) -> Box<dyn MathTypesetter> {
    match mode {
        MathMode::Client => Box::new(ClientTypesetter),
        MathMode::Mathml => Box::new(MathmlTypesetter::new(config)),
    }
}

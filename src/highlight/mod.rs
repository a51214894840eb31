//! Syntax highlighting for code blocks.
//!
//! Uses syntect with Sublime Text syntax definitions and emits class-based
//! HTML spans. Colors come from a stylesheet generated for the active theme,
//! see [`stylesheet`].

use std::sync::{Mutex, OnceLock};

use syntect::html::{ClassStyle, ClassedHTMLGenerator, css_for_theme_with_class_style};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::error::{MarkpadError, Result};
use crate::escape::escape_html;

/// Prefix for every class syntect emits, keeping them clear of page styles.
pub const CLASS_PREFIX: &str = "hl-";

const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed {
    prefix: CLASS_PREFIX,
};

/// Result of highlighting one code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlighted {
    /// Highlighted markup, one source line per output line.
    pub html: String,
    /// Name of the syntax used, `None` when the code was left plain.
    pub syntax: Option<String>,
}

/// Highlight `code`, using `language` when syntect knows it and guessing
/// otherwise. Unrecognized code is escaped and returned plain.
pub fn highlight_html(code: &str, language: Option<&str>) -> Highlighted {
    let syntax_set = syntax_set();
    let syntax = language
        .and_then(|lang| find_declared(syntax_set, lang))
        .or_else(|| detect_syntax(syntax_set, code));

    let Some(syntax) = syntax else {
        return Highlighted {
            html: escape_html(code),
            syntax: None,
        };
    };

    let mut generator =
        ClassedHTMLGenerator::new_with_class_style(syntax, syntax_set, CLASS_STYLE);
    for line in LinesWithEndings::from(code) {
        if let Err(err) = generator.parse_html_for_line_which_includes_newline(line) {
            tracing::warn!(syntax = %syntax.name, %err, "highlighting failed, emitting plain code");
            return Highlighted {
                html: escape_html(code),
                syntax: None,
            };
        }
    }

    Highlighted {
        html: generator.finalize(),
        syntax: Some(syntax.name.clone()),
    }
}

/// Whether syntect has a grammar for `language`.
pub fn is_supported(language: &str) -> bool {
    find_declared(syntax_set(), language).is_some()
}

fn find_declared<'a>(syntax_set: &'a SyntaxSet, language: &str) -> Option<&'a SyntaxReference> {
    syntax_set
        .find_syntax_by_token(language)
        .or_else(|| syntax_set.find_syntax_by_name(language))
}

/// Guess a syntax for undeclared code.
///
/// Shebangs and modelines are handled by syntect's first-line matching.
/// After that a short list of telltale tokens picks a common language.
fn detect_syntax<'a>(syntax_set: &'a SyntaxSet, code: &str) -> Option<&'a SyntaxReference> {
    if let Some(first_line) = code.lines().next() {
        if let Some(syntax) = syntax_set.find_syntax_by_first_line(first_line) {
            return Some(syntax);
        }
    }

    const SIGNATURES: &[(&str, &[&str])] = &[
        ("rs", &["fn ", "let mut ", "impl ", "pub struct ", "use std::"]),
        ("py", &["def ", "import ", "elif ", "self.", "print("]),
        ("js", &["function ", "const ", "=> ", "console.log", "let "]),
        ("cpp", &["#include", "std::", "int main"]),
        ("go", &["func ", "package ", ":= "]),
        ("java", &["public class ", "System.out", "public static void"]),
        ("html", &["<html", "<div", "<body", "<!DOCTYPE"]),
        ("sql", &["SELECT ", "INSERT INTO", "CREATE TABLE"]),
        ("sh", &["echo ", "fi\n", "#!/bin/"]),
        ("json", &["\": ", "\":{"]),
    ];

    let mut best: Option<(&str, usize)> = None;
    for (token, needles) in SIGNATURES {
        let hits = needles.iter().filter(|n| code.contains(*n)).count();
        if hits > 0 && best.is_none_or(|(_, top)| hits > top) {
            best = Some((token, hits));
        }
    }
    best.and_then(|(token, _)| syntax_set.find_syntax_by_token(token))
}

/// CSS for the highlight classes under the active background mode.
///
/// # Errors
/// Returns an error if syntect cannot produce CSS for the theme.
pub fn stylesheet() -> Result<String> {
    css_for_theme_with_class_style(theme(), CLASS_STYLE)
        .map_err(|err| MarkpadError::Stylesheet(err.to_string()))
}

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(|| {
        let _span = tracing::debug_span!("highlight.syntax_set.load_defaults").entered();
        SyntaxSet::load_defaults_newlines()
    })
}

fn theme() -> &'static Theme {
    static THEME: OnceLock<Theme> = OnceLock::new();
    THEME.get_or_init(|| {
        let _span = tracing::debug_span!("highlight.theme.load_defaults").entered();
        let theme_set = ThemeSet::load_defaults();
        let preferred = match background_mode() {
            BackgroundMode::Dark => [
                "Monokai Extended",
                "Monokai Extended Bright",
                "Dracula",
                "Solarized (dark)",
                "base16-ocean.dark",
            ]
            .as_slice(),
            BackgroundMode::Light => [
                "InspiredGitHub",
                "Solarized (light)",
                "base16-ocean.light",
            ]
            .as_slice(),
        };

        for name in preferred {
            if let Some(theme) = theme_set.themes.get(*name) {
                return theme.clone();
            }
        }

        theme_set
            .themes
            .values()
            .next()
            .cloned()
            .unwrap_or_default()
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BackgroundMode {
    Dark,
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightBackground {
    Light,
    Dark,
}

static BACKGROUND_OVERRIDE: OnceLock<Mutex<Option<HighlightBackground>>> = OnceLock::new();

/// Force the preview background used to pick the highlight theme.
///
/// Must be called before the first stylesheet is generated; the theme is
/// loaded once per process.
pub fn set_background_mode(mode: Option<HighlightBackground>) {
    let lock = BACKGROUND_OVERRIDE.get_or_init(|| Mutex::new(None));
    if let Ok(mut guard) = lock.lock() {
        *guard = mode;
    }
}

fn background_mode() -> BackgroundMode {
    let lock = BACKGROUND_OVERRIDE.get_or_init(|| Mutex::new(None));
    if let Ok(guard) = lock.lock() {
        if let Some(mode) = *guard {
            return match mode {
                HighlightBackground::Light => BackgroundMode::Light,
                HighlightBackground::Dark => BackgroundMode::Dark,
            };
        }
    }
    // Preview pages default to a white background.
    BackgroundMode::Light
}

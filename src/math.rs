//! Math isolation.
//!
//! Math expressions are lifted out of the markdown source before it reaches
//! comrak, so the parser never sees `_`, `*` or `\\` inside a formula. Each
//! expression is swapped for an HTML comment placeholder, which comrak passes
//! through untouched, and put back once the HTML has been produced.
//!
//! Two forms are recognized:
//! - `$$...$$`, which may span lines (display math)
//! - `$...$`, which may not contain a line break (inline math)
//!
//! A `$` preceded by an odd number of backslashes is a literal dollar sign:
//! it never opens an expression and never closes an inline one.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Matches both math forms. The display form is tried first at each offset.
static MATH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\$[\s\S]*?\$\$|\$(?:[^\n\r$\\]|\\[^\n\r])+?\$").expect("valid math pattern")
});

/// Matches a placeholder, optionally wrapped in the paragraph comrak adds
/// around inline HTML that sits alone on a line.
static RESTORE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<p>\s*<!--MATH_BLOCK_(\d+)-->\s*</p>|<!--MATH_BLOCK_(\d+)-->")
        .expect("valid restore pattern")
});

static PLACEHOLDER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!--MATH_BLOCK_(\d+)-->").expect("valid placeholder pattern"));

/// One extracted math expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathExpr {
    /// Source exactly as written, delimiters included.
    pub original: String,
    /// Source handed to the typesetter. Single-line `$$x$$` becomes `$x$`.
    pub normalized: String,
    /// Whether the expression renders as a centered block. Only `$$` that
    /// spans lines is display math.
    pub display: bool,
}

impl MathExpr {
    fn from_match(source: &str) -> Self {
        let double = source.starts_with("$$");
        let display = double && source.contains('\n');
        let normalized = if double && !display {
            format!("${}$", &source[2..source.len() - 2])
        } else {
            source.to_string()
        };
        Self {
            original: source.to_string(),
            normalized,
            display,
        }
    }

    /// Whether the expression renders as a centered block.
    pub const fn is_display(&self) -> bool {
        self.display
    }

    /// The LaTeX body without delimiters.
    pub fn body(&self) -> &str {
        // Matches always carry complete delimiters on both ends.
        let width = if self.original.starts_with("$$") { 2 } else { 1 };
        &self.original[width..self.original.len() - width]
    }
}

/// Markdown source with math replaced by placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IsolatedText {
    /// Text safe to hand to the markdown parser.
    pub text: String,
    /// Extracted expressions, indexed by placeholder number.
    pub expressions: Vec<MathExpr>,
}

/// The placeholder for the `index`th expression.
pub fn placeholder(index: usize) -> String {
    format!("<!--MATH_BLOCK_{index}-->")
}

/// Replace every math expression in `source` with a placeholder.
pub fn isolate(source: &str) -> IsolatedText {
    let mut text = String::with_capacity(source.len());
    let mut expressions = Vec::new();
    let mut copied_to = 0;
    let mut search_from = 0;

    while let Some(found) = MATH_PATTERN.find_at(source, search_from) {
        if is_escaped(source, found.start()) {
            // Let the next search start right after the literal `$`.
            search_from = found.start() + 1;
            continue;
        }
        text.push_str(&source[copied_to..found.start()]);
        text.push_str(&placeholder(expressions.len()));
        expressions.push(MathExpr::from_match(found.as_str()));
        copied_to = found.end();
        search_from = found.end();
    }
    text.push_str(&source[copied_to..]);

    tracing::debug!(count = expressions.len(), "isolated math expressions");
    IsolatedText { text, expressions }
}

/// Put expressions back into rendered HTML.
///
/// `render` produces the replacement for each expression. A placeholder that
/// was the sole content of a paragraph loses the `<p>` wrapper so display
/// math is not trapped inside it. Placeholders with no matching expression
/// are left as they are.
pub fn restore<F>(html: &str, expressions: &[MathExpr], mut render: F) -> String
where
    F: FnMut(&MathExpr) -> String,
{
    if expressions.is_empty() {
        return html.to_string();
    }
    RESTORE_PATTERN
        .replace_all(html, |caps: &Captures<'_>| {
            let index = caps
                .get(1)
                .or_else(|| caps.get(2))
                .and_then(|m| m.as_str().parse::<usize>().ok());
            match index.and_then(|i| expressions.get(i)) {
                Some(expr) => render(expr),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Swap placeholders back to the source text the user typed.
///
/// Used for code spans and fenced blocks, where dollar signs are literal.
pub fn reinstate_source<'a>(text: &'a str, expressions: &[MathExpr]) -> Cow<'a, str> {
    if expressions.is_empty() || !text.contains("<!--MATH_BLOCK_") {
        return Cow::Borrowed(text);
    }
    PLACEHOLDER_PATTERN.replace_all(text, |caps: &Captures<'_>| {
        caps[1]
            .parse::<usize>()
            .ok()
            .and_then(|i| expressions.get(i))
            .map_or_else(|| caps[0].to_string(), |expr| expr.original.clone())
    })
}

fn is_escaped(source: &str, index: usize) -> bool {
    let backslashes = source.as_bytes()[..index]
        .iter()
        .rev()
        .take_while(|&&b| b == b'\\')
        .count();
    backslashes % 2 == 1
}

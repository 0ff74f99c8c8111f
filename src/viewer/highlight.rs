use std::path::Path;

use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::{as_24_bit_terminal_escaped, LinesWithEndings};

use crate::config::DEFAULT_SYNTAX_THEME;
use crate::error::HighlightError;

/// Turns plain text into ANSI-colored text with the same line structure.
///
/// Implementations are best effort: the viewer treats any error as "no
/// highlighting" and shows the plain text.
pub trait Highlighter: Send + Sync {
    fn highlight(&self, text: &str, file_name: &str) -> Result<String, HighlightError>;
}

/// [`Highlighter`] backed by syntect's bundled syntaxes and themes.
pub struct SyntectHighlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl SyntectHighlighter {
    pub fn new(theme_name: &str) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme: load_theme(theme_name),
        }
    }

    /// Pick a syntax by extension first, then by the first line (shebangs, modelines).
    fn find_syntax(&self, text: &str, file_name: &str) -> Option<&SyntaxReference> {
        let ss = &self.syntax_set;
        detect_syntax_name(Path::new(file_name))
            .and_then(|name| ss.find_syntax_by_name(name))
            .or_else(|| {
                let ext = Path::new(file_name).extension()?.to_str()?;
                ss.find_syntax_by_extension(ext)
            })
            .or_else(|| {
                let first_line = text.lines().next().unwrap_or_default();
                ss.find_syntax_by_first_line(first_line)
            })
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, text: &str, file_name: &str) -> Result<String, HighlightError> {
        let syntax = self
            .find_syntax(text, file_name)
            .ok_or_else(|| HighlightError::NoSyntax(file_name.to_string()))?;
        if syntax.name == "Plain Text" {
            return Err(HighlightError::NoSyntax(file_name.to_string()));
        }

        let mut highlighter = HighlightLines::new(syntax, &self.theme);
        let mut out = String::with_capacity(text.len() * 2);
        for line in LinesWithEndings::from(text) {
            let ranges = highlighter.highlight_line(line, &self.syntax_set)?;
            out.push_str(&as_24_bit_terminal_escaped(&ranges, false));
        }
        Ok(out)
    }
}

/// Load a theme from the built-in theme set by name, with fallback.
pub fn load_theme(theme_name: &str) -> Theme {
    let mut ts = ThemeSet::load_defaults();
    match ts.themes.remove(theme_name) {
        Some(theme) => theme,
        None => {
            tracing::warn!(theme = theme_name, "unknown syntax theme, using default");
            ts.themes.remove(DEFAULT_SYNTAX_THEME).unwrap_or_default()
        }
    }
}

/// Map common extensions to syntect syntax names.
fn detect_syntax_name(path: &Path) -> Option<&'static str> {
    let name = match path.extension().and_then(|e| e.to_str())? {
        "py" | "ipynb" => "Python",
        "rs" => "Rust",
        "yaml" | "yml" => "YAML",
        "json" => "JSON",
        "sh" | "bash" | "zsh" => "Bourne Again Shell (bash)",
        "sql" => "SQL",
        "md" | "markdown" => "Markdown",
        "html" | "htm" => "HTML",
        "css" => "CSS",
        "js" | "jsx" => "JavaScript",
        "c" | "h" => "C",
        "cpp" | "hpp" | "cc" => "C++",
        "java" => "Java",
        "go" => "Go",
        "rb" => "Ruby",
        _ => return None,
    };
    Some(name)
}

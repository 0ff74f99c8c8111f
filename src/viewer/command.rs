//! The viewer's command-line mini-language.

/// Summary shown by `help`.
pub const HELP_SUMMARY: &str = "Commands: /text | search <text> | n, next | N, prev | clear | \
     wrap | syntax | set wrap|nowrap|syntax|nosyntax | help";

/// A parsed command-line submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Noop,
    /// Search for the text; empty text clears the search.
    Search(String),
    SetWrap(bool),
    SetHighlight(bool),
    ToggleWrap,
    ToggleHighlight,
    NextMatch,
    PrevMatch,
    ClearSearch,
    Help,
    /// `set` with a missing or unrecognized option.
    InvalidSet(String),
    /// Unrecognized first token.
    Unknown(String),
}

/// Parse a command buffer. Parsing never fails; bad input becomes
/// [`Command::Unknown`] or [`Command::InvalidSet`].
pub fn parse(input: &str) -> Command {
    let trimmed = input.trim();
    let trimmed = trimmed.strip_prefix(':').unwrap_or(trimmed).trim_start();
    if trimmed.is_empty() {
        return Command::Noop;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    let Some((&first, rest)) = tokens.split_first() else {
        return Command::Noop;
    };

    match first {
        "/" | "search" => Command::Search(rest.join(" ")),
        _ if first.starts_with('/') => Command::Search(trimmed[1..].to_string()),
        "set" => match rest.first().copied() {
            Some("wrap") => Command::SetWrap(true),
            Some("nowrap") => Command::SetWrap(false),
            Some("syntax") => Command::SetHighlight(true),
            Some("nosyntax") => Command::SetHighlight(false),
            Some(other) => Command::InvalidSet(other.to_string()),
            None => Command::InvalidSet(String::new()),
        },
        "wrap" => Command::ToggleWrap,
        "syntax" => Command::ToggleHighlight,
        "n" | "next" => Command::NextMatch,
        "N" | "prev" | "previous" => Command::PrevMatch,
        "clear" | "clearsearch" => Command::ClearSearch,
        "help" | "h" => Command::Help,
        other => Command::Unknown(other.to_string()),
    }
}

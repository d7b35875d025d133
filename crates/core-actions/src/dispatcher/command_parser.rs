//! Command-line classification.
//!
//! Converts the raw command buffer (always beginning with ':') into a
//! [`CommandIntent`]. Pure classification, no side effects; unknown input is
//! an intent too, so the controller can echo the offending text instead of
//! silently dropping it. Literal matches only: no abbreviations, ranges, or
//! arguments.

/// Structured intent parsed from the command buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandIntent {
    Write,
    Quit,
    WriteQuit,
    ForceQuit,
    /// Carries the full trimmed input, leading ':' included, for error echo.
    Unknown(String),
}

pub fn parse_command(raw: &str) -> CommandIntent {
    let s = raw.trim();
    match s {
        ":w" => CommandIntent::Write,
        ":q" => CommandIntent::Quit,
        ":wq" | ":x" => CommandIntent::WriteQuit,
        ":q!" => CommandIntent::ForceQuit,
        _ => CommandIntent::Unknown(s.to_string()),
    }
}

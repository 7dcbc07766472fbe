use anyhow::{Context, Result, anyhow};
use bitrix_tools_core::Position;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Split `file[:line[:column]]` into the path and a zero-based position.
///
/// Line and column are 1-based on the command line; a missing column means the
/// start of the line.
pub fn parse_location(arg: &str) -> (String, Option<Position>) {
    let Some((head, last)) = split_number(arg) else {
        return (arg.to_string(), None);
    };

    if let Some((path, line)) = split_number(head) {
        (
            path.to_string(),
            Some(Position::new(line.saturating_sub(1), last.saturating_sub(1))),
        )
    } else {
        (head.to_string(), Some(Position::new(last.saturating_sub(1), 0)))
    }
}

fn split_number(s: &str) -> Option<(&str, usize)> {
    let (head, tail) = s.rsplit_once(':')?;
    let number = tail.parse::<usize>().ok()?;
    if head.is_empty() {
        return None;
    }
    Some((head, number))
}

/// Absolute path of `filepath` and the buffer text, from stdin or the file itself
pub fn read_buffer(filepath: &str, stdin: bool) -> Result<(PathBuf, String)> {
    let path = std::path::absolute(Path::new(filepath))
        .with_context(|| format!("Failed to resolve path {filepath}"))?;

    let text = if stdin {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read buffer from stdin")?;
        text
    } else {
        let bytes =
            std::fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
        String::from_utf8(bytes).map_err(|e| {
            anyhow!(
                "{} is not valid UTF-8 (invalid byte at offset {}); \
                 pass the decoded buffer with --stdin",
                path.display(),
                e.utf8_error().valid_up_to()
            )
        })?
    };

    Ok((path, text))
}

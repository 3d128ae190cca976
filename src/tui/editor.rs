use std::io::Write as _;
use std::process::Command;

use anyhow::{bail, Context, Result};
use ratatui::prelude::*;

use super::{bracket, enter_page_mode, leave_page_mode};
use crate::validate::MAX_DESCRIPTION_CHARS;

/// Hands the page over to `$EDITOR` with `current` as a draft and returns
/// the edited description, ready to store.
pub fn edit_description<B: Backend>(terminal: &mut Terminal<B>, current: &str) -> Result<String> {
    let editor = std::env::var("EDITOR").context("$EDITOR is not set")?;

    let mut draft = tempfile::Builder::new()
        .prefix("taskday-desc-")
        .suffix(".txt")
        .tempfile()
        .context("failed to create description draft")?;
    writeln!(draft, "{current}").context("failed to write description draft")?;
    draft.flush()?;

    // Inverted bracket: leave the page for the editor, then come back
    let status = bracket(leave_page_mode, enter_page_mode, || {
        Command::new(&editor)
            .arg(draft.path())
            .status()
            .with_context(|| format!("failed to run editor '{editor}'"))
    });
    terminal.clear()?;

    let status = status?;
    if !status.success() {
        bail!("editor exited with {status}");
    }

    let text = std::fs::read_to_string(draft.path())
        .context("failed to read description draft")?;
    Ok(clean_description(&text))
}

/// One line per description: non-blank lines are trimmed and joined with a
/// space, and anything past the limit is cut.
fn clean_description(text: &str) -> String {
    let joined = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    joined.chars().take(MAX_DESCRIPTION_CHARS).collect()
}

use summarize_core::{ArtifactKind, Msg, SortField};

pub const HELP_TEXT: &str = "\
Commands:
  add <url>                       submit a video URL
  sort name|status|date           sort by column (repeat to flip direction)
  search [term]                   filter by name or status; no term clears
  click <n> / shift <n>           select row n; shift extends from the anchor
  check <n>                       toggle the checkbox of row n
  copy                            copy the selected summaries
  copy summary|transcript|url <n> copy one item of row n
  clear                           clear the selection
  dismiss                         hide the status message
  show                            redraw
  help                            this text
  quit                            exit";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Vec<Msg>),
    Help,
    Quit,
}

/// Parse a command line. Blank input yields `Ok(None)`; row numbers are 1-based.
pub fn parse(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "" => return Ok(None),
        "add" => {
            if rest.is_empty() {
                return Err("usage: add <url>".to_string());
            }
            Command::Dispatch(vec![Msg::InputChanged(rest.to_string()), Msg::UrlSubmitted])
        }
        "sort" => Command::Dispatch(vec![Msg::SortClicked(parse_field(rest)?)]),
        "search" => Command::Dispatch(vec![Msg::SearchChanged(rest.to_string())]),
        "click" => Command::Dispatch(vec![Msg::RowClicked {
            index: parse_row(rest)?,
            shift: false,
        }]),
        "shift" => Command::Dispatch(vec![Msg::RowClicked {
            index: parse_row(rest)?,
            shift: true,
        }]),
        "check" => Command::Dispatch(vec![Msg::CheckboxToggled {
            index: parse_row(rest)?,
        }]),
        "copy" => Command::Dispatch(vec![parse_copy(rest)?]),
        "clear" => Command::Dispatch(vec![Msg::ClearSelectionClicked]),
        "dismiss" => Command::Dispatch(vec![Msg::StatusDismissed]),
        "show" => Command::Dispatch(vec![Msg::RedrawRequested]),
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command '{other}', try 'help'")),
    };
    Ok(Some(command))
}

fn parse_field(raw: &str) -> Result<SortField, String> {
    match raw.to_ascii_lowercase().as_str() {
        "name" => Ok(SortField::Name),
        "status" => Ok(SortField::Status),
        "date" | "added" => Ok(SortField::InsertionDate),
        _ => Err("usage: sort name|status|date".to_string()),
    }
}

fn parse_row(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(row) if row > 0 => Ok(row - 1),
        _ => Err(format!("expected a row number, got '{raw}'")),
    }
}

fn parse_copy(rest: &str) -> Result<Msg, String> {
    if rest.is_empty() {
        return Ok(Msg::CopySelectedClicked);
    }
    let usage = || "usage: copy [summary|transcript|url <n>]".to_string();
    let (kind, row) = rest.split_once(char::is_whitespace).ok_or_else(usage)?;
    let kind = match kind.to_ascii_lowercase().as_str() {
        "summary" => ArtifactKind::Summary,
        "transcript" | "transcription" => ArtifactKind::Transcription,
        "url" => ArtifactKind::Url,
        _ => return Err(usage()),
    };
    Ok(Msg::CopyArtifactClicked {
        index: parse_row(row.trim())?,
        kind,
    })
}

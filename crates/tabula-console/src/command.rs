use serde_json::Value;
use tabula_query::Period;

/// One line of console input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Sort(String),
    /// 1-based, as shown on the page buttons.
    Page(usize),
    Next,
    Previous,
    Size(usize),
    Search(String),
    Enter,
    Filter(String, Value),
    Unfilter(String),
    Period(Option<Period>),
    /// Simulated backend row count, for dry runs.
    Count(u64),
    Refresh,
    View,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word {
            "sort" if !rest.is_empty() => Ok(Command::Sort(rest.to_string())),
            "sort" => Err(CommandError::Usage("sort <column>")),
            "page" => match rest.parse::<usize>() {
                Ok(n) if n >= 1 => Ok(Command::Page(n)),
                _ => Err(CommandError::Usage("page <n>, n >= 1")),
            },
            "next" | "n" => Ok(Command::Next),
            "prev" | "p" => Ok(Command::Previous),
            "size" => rest
                .parse()
                .map(Command::Size)
                .map_err(|_| CommandError::Usage("size <10|20|30|40|50>")),
            "search" | "/" => Ok(Command::Search(rest.to_string())),
            "enter" => Ok(Command::Enter),
            "filter" => parse_filter(rest),
            "unfilter" if !rest.is_empty() => Ok(Command::Unfilter(rest.to_string())),
            "unfilter" => Err(CommandError::Usage("unfilter <key>")),
            "period" => parse_period(rest),
            "count" => rest
                .parse()
                .map(Command::Count)
                .map_err(|_| CommandError::Usage("count <rows>")),
            "refresh" | "r" => Ok(Command::Refresh),
            "view" | "v" => Ok(Command::View),
            "help" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// `filter <key>=<value>`; the value is JSON, falling back to a plain string.
fn parse_filter(rest: &str) -> Result<Command, CommandError> {
    let (key, raw) = rest
        .split_once('=')
        .ok_or(CommandError::Usage("filter <key>=<json value>"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(CommandError::Usage("filter <key>=<json value>"));
    }
    let raw = raw.trim();
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok(Command::Filter(key.to_string(), value))
}

/// `period <from> <to>` sets the range, bare `period` clears it.
fn parse_period(rest: &str) -> Result<Command, CommandError> {
    let mut parts = rest.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (None, _, _) => Ok(Command::Period(None)),
        (Some(from), Some(to), None) => Ok(Command::Period(Some(Period {
            from: from.to_string(),
            to: to.to_string(),
        }))),
        _ => Err(CommandError::Usage("period [<from> <to>]")),
    }
}

pub const HELP: &str = "\
commands:
  sort <column>         sort by column, again to flip direction
  page <n> | next | prev
  size <n>              page size (10, 20, 30, 40, 50)
  search <text>         debounced free-text search, `enter` commits now
  filter <key>=<value>  set a structured filter, `unfilter <key>` removes it
  period [<from> <to>]  set or clear the date range
  count <rows>          pretend the backend reported <rows> rows
  refresh | view | help | quit";

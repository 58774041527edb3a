use scout_core::{AppViewModel, Msg, ResultRowView};
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  url <source>    set the page to scrape
  scrape          fetch posts and collect phone numbers
  list            show collected results
  save            store the session locally
  copy <n>        copy the phone number of row n
  block <n>       blacklist the phone number of row n
  edit <n>        rename the contact of row n
  details <n>     show the post behind row n
  link <n>        print the quick-contact link of row n
  help            show this text
  quit            exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Url(String),
    Scrape,
    List,
    Save,
    Copy(usize),
    Block(usize),
    Edit(usize),
    Details(usize),
    Link(usize),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command {0:?}, try `help`")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("{0:?} is not a row number")]
    BadRow(String),
    #[error("no row {0}")]
    NoSuchRow(usize),
    #[error("`{0}` is handled by the dashboard, not the session")]
    NotAMessage(&'static str),
}

pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "url" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("url"));
            }
            Command::Url(rest.to_string())
        }
        "scrape" | "process" => Command::Scrape,
        "list" | "ls" => Command::List,
        "save" => Command::Save,
        "copy" => Command::Copy(row_arg("copy", rest)?),
        "block" => Command::Block(row_arg("block", rest)?),
        "edit" => Command::Edit(row_arg("edit", rest)?),
        "details" => Command::Details(row_arg("details", rest)?),
        "link" => Command::Link(row_arg("link", rest)?),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn row_arg(name: &'static str, raw: &str) -> Result<usize, CommandError> {
    if raw.is_empty() {
        return Err(CommandError::MissingArgument(name));
    }
    raw.parse::<usize>()
        .map_err(|_| CommandError::BadRow(raw.to_string()))
}

/// Resolves a 1-based row number against the current view.
pub fn resolve_row(view: &AppViewModel, index: usize) -> Result<&ResultRowView, CommandError> {
    view.row(index).ok_or(CommandError::NoSuchRow(index))
}

impl Command {
    /// Maps a session command to the message it dispatches.
    pub fn to_msg(&self, view: &AppViewModel) -> Result<Msg, CommandError> {
        let msg = match self {
            Command::Url(url) => Msg::SourceUrlChanged(url.clone()),
            Command::Scrape => Msg::ScrapeClicked,
            Command::Save => Msg::SaveClicked,
            Command::Copy(idx) => Msg::CopyClicked {
                phone_number: resolve_row(view, *idx)?.phone_number.clone(),
            },
            Command::Block(idx) => Msg::BlockClicked {
                phone_number: resolve_row(view, *idx)?.phone_number.clone(),
            },
            Command::Edit(idx) => Msg::EditClicked {
                phone_number: resolve_row(view, *idx)?.phone_number.clone(),
            },
            Command::Details(idx) => Msg::DetailsClicked {
                post_uri: resolve_row(view, *idx)?.uri.clone(),
            },
            Command::List => return Err(CommandError::NotAMessage("list")),
            Command::Link(_) => return Err(CommandError::NotAMessage("link")),
            Command::Help => return Err(CommandError::NotAMessage("help")),
            Command::Quit => return Err(CommandError::NotAMessage("quit")),
        };
        Ok(msg)
    }
}

//! Line-oriented front end over [`SessionController`].
//!
//! The console plays the role of the rendering layer: it lists options with
//! their disabled state, refuses picks of disabled options, and prints the
//! results or notices the session produces.

use std::{fmt::Write, str::FromStr};

use crate::{
    models::ItemId,
    services::selection::SlotIndex,
    session::{SessionController, SessionState},
};

pub const HELP: &str = "\
Commands:
  list                 show the catalog
  slots                show the current picks
  options <slot>       show the choices for slot 1-3
  pick <slot> <id>     put movie <id> in slot 1-3
  clear <slot>         empty slot 1-3
  submit               ask for recommendations
  back                 leave the results and start over
  dismiss              hide the last error notice
  help                 show this text
  quit                 exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    List,
    Slots,
    Options { slot: SlotIndex },
    Pick { slot: SlotIndex, item: ItemId },
    Clear { slot: SlotIndex },
    Submit,
    Back,
    Dismiss,
    Help,
    Quit,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Enter a command (try `help`)")]
    Empty,

    #[error("Unknown command: {0} (try `help`)")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Invalid slot {0}; expected 1, 2 or 3")]
    InvalidSlot(String),

    #[error("Invalid movie id: {0}")]
    InvalidId(String),
}

fn parse_slot(raw: &str) -> Result<SlotIndex, ParseError> {
    raw.parse::<usize>()
        .ok()
        .and_then(SlotIndex::from_number)
        .ok_or_else(|| ParseError::InvalidSlot(raw.to_string()))
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((name, args)) = words.split_first() else {
            return Err(ParseError::Empty);
        };

        match (name.to_ascii_lowercase().as_str(), args) {
            ("list", []) => Ok(Command::List),
            ("slots", []) => Ok(Command::Slots),
            ("options", [slot]) => Ok(Command::Options {
                slot: parse_slot(slot)?,
            }),
            ("options", _) => Err(ParseError::Usage("options <slot>")),
            ("pick", [slot, id]) => Ok(Command::Pick {
                slot: parse_slot(slot)?,
                item: id
                    .parse()
                    .map_err(|_| ParseError::InvalidId(id.to_string()))?,
            }),
            ("pick", _) => Err(ParseError::Usage("pick <slot> <id>")),
            ("clear", [slot]) => Ok(Command::Clear {
                slot: parse_slot(slot)?,
            }),
            ("clear", _) => Err(ParseError::Usage("clear <slot>")),
            ("submit", []) => Ok(Command::Submit),
            ("back", []) => Ok(Command::Back),
            ("dismiss", []) => Ok(Command::Dismiss),
            ("help", _) => Ok(Command::Help),
            ("quit" | "exit", _) => Ok(Command::Quit),
            (other, _) => Err(ParseError::Unknown(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Summary of the current picks and the submit control
pub fn render_slots(controller: &SessionController) -> String {
    let mut out = String::new();
    let Some(coordinator) = controller.session().coordinator() else {
        return "Catalog not loaded".to_string();
    };

    for slot in SlotIndex::ALL {
        let label = match coordinator.selection().get(slot) {
            Some(id) => coordinator
                .catalog()
                .get(id)
                .map(|item| format!("{} ({})", item.title, id))
                .unwrap_or_else(|| format!("unknown movie ({})", id)),
            None => "(empty)".to_string(),
        };
        let _ = writeln!(out, "Slot {}: {}", slot.number(), label);
    }

    let gate = controller.submit_gate();
    let _ = write!(
        out,
        "[{}]{}",
        gate.label(),
        if gate.is_enabled() { "" } else { " (disabled)" }
    );
    out
}

/// The choices for one slot, marking disabled and selected entries
pub fn render_options(controller: &SessionController, slot: SlotIndex) -> String {
    let options = match controller.available_options_for(slot) {
        Ok(options) => options,
        Err(err) => return err.to_string(),
    };

    let mut out = format!("Choices for slot {}:", slot.number());
    for option in options {
        let marker = if option.selected {
            '*'
        } else if option.disabled {
            'x'
        } else {
            ' '
        };
        let id = option
            .value()
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = write!(out, "\n {} {:>5}  {}", marker, id, option.label());
    }
    out
}

/// What to show for the current state
pub fn render_state(controller: &SessionController) -> String {
    let session = controller.session();
    let mut out = match session.state() {
        SessionState::Loading => "Loading...".to_string(),
        SessionState::Error(err) => format!("Could not start the session: {}", err),
        SessionState::Ready | SessionState::Submitting => render_slots(controller),
        SessionState::Results(_) => session
            .display()
            .map(|display| format!("{}\n(type `back` to pick again)", display))
            .unwrap_or_default(),
    };

    if let Some(notice) = session.notice() {
        let _ = write!(out, "\n! {} (type `dismiss` to hide)", notice);
    }
    out
}

/// Runs one command against the session and returns the text to print
pub async fn execute(controller: &mut SessionController, command: Command) -> (Flow, String) {
    tracing::debug!(command = ?command, "Console command");

    let output = match command {
        Command::List => match controller.session().catalog() {
            Some(catalog) => {
                let mut out = format!("{} movies:", catalog.len());
                for item in catalog.items() {
                    let _ = write!(out, "\n {:>5}  {}", item.id, item.title);
                }
                out
            }
            None => "Catalog not loaded".to_string(),
        },
        Command::Slots => render_slots(controller),
        Command::Options { slot } => render_options(controller, slot),
        Command::Pick { slot, item } => pick(controller, slot, item),
        Command::Clear { slot } => match controller.set_slot(slot, None) {
            Ok(()) => render_slots(controller),
            Err(err) => err.to_string(),
        },
        Command::Submit => {
            tracing::info!(label = controller.submit_gate().label(), "Submitting");
            match controller.submit().await.map(|_| ()) {
                Ok(()) => render_state(controller),
                Err(err) => err.to_string(),
            }
        }
        Command::Back => match controller.back() {
            Ok(()) => render_state(controller),
            Err(err) => err.to_string(),
        },
        Command::Dismiss => {
            controller.dismiss_notice();
            render_state(controller)
        }
        Command::Help => HELP.to_string(),
        Command::Quit => return (Flow::Quit, "Bye".to_string()),
    };

    (Flow::Continue, output)
}

fn pick(controller: &mut SessionController, slot: SlotIndex, item: ItemId) -> String {
    let choice = match controller.available_options_for(slot) {
        Ok(options) => options
            .into_iter()
            .find(|option| option.value() == Some(item))
            .map(|option| option.disabled),
        Err(err) => return err.to_string(),
    };

    match choice {
        None => format!("No movie with id {} in the catalog", item),
        Some(true) => format!("Movie {} is already picked in another slot", item),
        Some(false) => match controller.set_slot(slot, Some(item)) {
            Ok(()) => render_slots(controller),
            Err(err) => err.to_string(),
        },
    }
}

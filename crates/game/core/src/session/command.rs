//! Parsing of raw player input in the `playing` phase.

use crate::direction::{CardinalDirection, normalize_direction};

use super::error::CommandError;

/// A recognised player command.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    Move(CardinalDirection),
    Get(String),
    /// Destination already title-cased.
    Path(String),
    Help,
    Quit,
}

impl Command {
    /// Splits on whitespace; the verb is case-insensitive.
    ///
    /// `move` and `go` read only the first argument. `get` and `path` join
    /// every remaining word with single spaces.
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let mut words = input.split_whitespace();
        let verb = words.next().unwrap_or_default().to_lowercase();
        let rest: Vec<&str> = words.collect();

        match verb.as_str() {
            "move" | "go" => {
                let token = rest.first().ok_or(CommandError::MissingDirection)?;
                normalize_direction(token)
                    .map(Command::Move)
                    .map_err(|_| CommandError::UnrecognizedDirection(token.to_lowercase()))
            }
            "get" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingItem);
                }
                Ok(Command::Get(rest.join(" ")))
            }
            "path" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingDestination);
                }
                Ok(Command::Path(title_case(&rest.join(" "))))
            }
            "help" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            _ => Err(CommandError::UnknownCommand(verb)),
        }
    }
}

/// Upper-cases the first letter of every word and lower-cases the rest.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

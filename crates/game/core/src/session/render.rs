//! Plain-text screens and status blocks.

use std::fmt;

use crate::direction::CardinalDirection;
use crate::level::Level;
use crate::path::Route;

use super::machine::Phase;

const RULE_WIDTH: usize = 27;

/// Text produced for one processed input.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderedStatus {
    pub phase: Phase,
    pub body: String,
}

impl fmt::Display for RenderedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.body)
    }
}

/// The lines of a status block, before formatting.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusReport {
    pub room: String,
    pub description: Option<String>,
    pub inventory: String,
    pub ground: String,
    pub exits: String,
    pub message: Option<String>,
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(RULE_WIDTH);
        writeln!(f, "{rule}")?;
        writeln!(f, "{}", self.room)?;
        if let Some(description) = &self.description {
            writeln!(f, "{description}")?;
        }
        writeln!(f, "{}", self.inventory)?;
        writeln!(f, "{}", self.ground)?;
        writeln!(f, "{rule}")?;
        write!(f, "{}", self.exits)?;
        if let Some(message) = &self.message {
            write!(f, "\n{message}")?;
        }
        Ok(())
    }
}

/// Joins exits as "north", "north or east" or "north, east, or west".
pub fn join_exits(directions: &[CardinalDirection]) -> String {
    match directions {
        [] => String::new(),
        [only] => only.to_string(),
        [first, second] => format!("{first} or {second}"),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(|d| d.as_str()).collect();
            format!("{}, or {last}", head.join(", "))
        }
    }
}

pub fn exits_line(directions: &[CardinalDirection]) -> String {
    if directions.is_empty() {
        "There are no exits here.".to_string()
    } else {
        format!("You can move {}.", join_exits(directions))
    }
}

pub fn welcome_message(level: &Level) -> String {
    match level.boss() {
        Some(boss) => format!(
            "Welcome to the {}! Find your loot and beat {boss}!",
            level.title()
        ),
        None => format!("Welcome to the {}! Find your loot!", level.title()),
    }
}

pub fn intro_screen(level: &Level) -> String {
    let rule = "-".repeat(RULE_WIDTH);
    let story = level.intro().unwrap_or_else(|| level.title());
    format!("STORYLINE\n{rule}\n{story}\n\nPress enter to continue to instructions.")
}

/// The instructions screen. `returning` is set when opened from the game.
pub fn instructions_screen(returning: bool) -> String {
    let rule = "-".repeat(RULE_WIDTH);
    let prompt = if returning {
        "Press enter to return to the game!"
    } else {
        "Press enter to start the game!"
    };
    format!(
        "INSTRUCTIONS\n{rule}\n\
         To move around type:\n\
         \tmove ____ or go ____ (replace ____ with a direction such as north or left).\n\n\
         To pick up items type:\n\
         \tget ____ (replace ____ with the full item name including spaces).\n\n\
         To find your way to a room type:\n\
         \tpath ____ (replace ____ with the room name).\n\n\
         To show the rules type:\n\
         \thelp\n\n\
         To quit type:\n\
         \tquit or exit\n\n\
         The commands aren't case sensitive so don't worry about that!\n\n\
         {prompt}"
    )
}

pub fn victory_message(level: &Level) -> String {
    match (level.victory(), level.boss()) {
        (Some(text), _) => text.to_string(),
        (None, Some(boss)) => format!("You beat {boss} and cleared the {}!", level.title()),
        (None, None) => format!("You cleared the {}!", level.title()),
    }
}

pub fn defeat_message(level: &Level) -> String {
    match (level.defeat(), level.boss()) {
        (Some(text), _) => text.to_string(),
        (None, Some(boss)) => {
            format!("You have been defeated by {boss}! You didn't have everything you needed!")
        }
        (None, None) => "You have been defeated!".to_string(),
    }
}

pub const FAREWELL: &str = "Thanks for playing! Hope you enjoyed it!";
pub const CLOSING: &str = "Thank you for playing! Hope you enjoyed it!";
pub const NEXT_LEVEL_PROMPT: &str = "Press enter to continue to the next level!";
pub const CAMPAIGN_COMPLETE: &str = "You cleared every level!";

/// Describes a route as the moves to make from the current room.
pub fn route_message(route: &Route) -> String {
    let Some(destination) = route.destination() else {
        return String::new();
    };
    if route.hops() == 0 {
        return format!("You are already in the {destination}!");
    }
    let steps: Vec<&str> = route.directions().map(CardinalDirection::as_str).collect();
    format!(
        "To reach the {destination}, move {} (cost {}).",
        steps.join(", then "),
        route.cost
    )
}

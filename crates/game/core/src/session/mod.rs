//! Per-player session state machine.
//!
//! A [`Session`] owns a private copy of its level and turns raw text lines
//! into phase transitions, inventory changes and win/lose decisions. Every
//! accepted line yields exactly one [`RenderedStatus`]. Player mistakes are
//! reported inside that status; only [`SessionError`]s escape, and the fatal
//! ones end the session.
mod command;
mod error;
mod inventory;
mod machine;
mod render;

pub use command::{Command, title_case};
pub use error::{CommandError, SessionError};
pub use inventory::Inventory;
pub use machine::{Phase, Trigger, transition};
pub use render::{RenderedStatus, StatusReport, join_exits};

use crate::config::{GameConfig, GridConflictPolicy};
use crate::direction::CardinalDirection;
use crate::error::{ErrorSeverity, GameError};
use crate::level::{CoordinateReport, Level, LevelError, Room, infer_coordinates};
use crate::path::{PathError, find_path};

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Outcome {
    Won,
    Lost,
    Quit,
}

/// What a boss victory leads to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Progression {
    /// The game ends with the first boss.
    #[default]
    SingleLevel,
    /// Levels are chained; `ordinal` is the zero-based index of the current one.
    Campaign { ordinal: u32 },
}

/// Asks the caller to supply the next level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LevelRequest {
    Next { completed: u32 },
}

/// Result of one accepted input line.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    pub status: RenderedStatus,
    pub request: Option<LevelRequest>,
}

#[derive(Clone, Debug)]
struct StagedLevel {
    level: Level,
    survey: CoordinateReport,
}

#[derive(Clone, Debug)]
pub struct Session {
    config: GameConfig,
    progression: Progression,
    level: Level,
    survey: CoordinateReport,
    current_room: String,
    inventory: Inventory,
    phase: Phase,
    update_message: Option<String>,
    acquired: bool,
    outcome: Option<Outcome>,
    staged: Option<StagedLevel>,
    terminated: bool,
}

impl Session {
    /// Starts a session on a private copy of `template`.
    ///
    /// Coordinates are inferred on the copy. With
    /// [`GridConflictPolicy::Reject`] a non-planar level is refused.
    pub fn new(template: &Level, config: GameConfig) -> Result<Self, LevelError> {
        let StagedLevel { level, survey } = prepare(template, &config)?;
        Ok(Self {
            current_room: level.start().to_string(),
            config,
            progression: Progression::default(),
            level,
            survey,
            inventory: Inventory::new(),
            phase: Phase::default(),
            update_message: None,
            acquired: false,
            outcome: None,
            staged: None,
            terminated: false,
        })
    }

    pub fn with_progression(mut self, progression: Progression) -> Self {
        self.progression = progression;
        self
    }

    /// Processes one raw input line.
    ///
    /// Fatal errors mark the session terminated; every later call returns
    /// [`SessionError::Terminated`].
    pub fn apply_command(&mut self, raw: &str) -> Result<Step, SessionError> {
        if self.terminated || self.phase.is_terminal() {
            return Err(SessionError::Terminated);
        }

        let input: String = raw.chars().take(self.config.max_input_len).collect();
        let result = self.dispatch(input.trim());
        if let Err(error) = &result {
            if error.severity() == ErrorSeverity::Fatal {
                self.terminated = true;
            }
        }
        result
    }

    fn dispatch(&mut self, input: &str) -> Result<Step, SessionError> {
        if !self.phase.is_screen() {
            return match self.phase {
                Phase::Playing => self.play(input),
                _ => Err(SessionError::Terminated),
            };
        }

        // Screens move on with an empty line and redraw on anything else.
        if input.is_empty() {
            match self.phase {
                Phase::LevelComplete => self.enter_staged_level()?,
                from => {
                    self.advance(Trigger::Continue)?;
                    if from == Phase::Instructions {
                        self.update_message = Some(render::welcome_message(&self.level));
                    }
                }
            }
        }
        self.step(None)
    }

    fn play(&mut self, input: &str) -> Result<Step, SessionError> {
        let command = match Command::parse(input) {
            Ok(command) => command,
            Err(error) => {
                self.reject(error);
                return self.step(None);
            }
        };

        let request = match command {
            Command::Move(direction) => {
                self.move_towards(direction)?;
                self.evaluate()?
            }
            Command::Get(item) => {
                self.pick_up(&item)?;
                self.evaluate()?
            }
            Command::Path(destination) => {
                self.describe_route(&destination)?;
                None
            }
            Command::Help => {
                self.advance(Trigger::OpenHelp)?;
                None
            }
            Command::Quit => {
                self.current_room = self.level.exit_room().to_string();
                self.evaluate()?
            }
        };
        self.step(request)
    }

    fn move_towards(&mut self, direction: CardinalDirection) -> Result<(), SessionError> {
        let room = self.room()?;
        let Some(target) = room.exits().target(direction).map(str::to_string) else {
            self.reject(CommandError::ExitNotFound(direction));
            return Ok(());
        };
        if !self.level.contains(&target) {
            return Err(SessionError::GraphConsistency {
                room: self.current_room.clone(),
                target,
            });
        }
        self.current_room = target;
        Ok(())
    }

    fn pick_up(&mut self, requested: &str) -> Result<(), SessionError> {
        let wanted = requested.to_lowercase();
        let found = self
            .room()?
            .item()
            .filter(|item| item.to_lowercase() == wanted)
            .map(str::to_string);

        match found {
            None => self.reject(CommandError::ItemNotPresent {
                item: title_case(requested),
                room: self.current_room.clone(),
            }),
            Some(item) if self.inventory.find(&item).is_some() => {
                self.reject(CommandError::ItemAlreadyHeld(item));
            }
            Some(item) => {
                if let Some(room) = self.level.room_mut(&self.current_room) {
                    room.take_item();
                }
                self.update_message = Some(format!("You have obtained {item}!"));
                self.inventory.add(item);
                self.acquired = true;
            }
        }
        Ok(())
    }

    fn describe_route(&mut self, destination: &str) -> Result<(), SessionError> {
        let Some(target) = self.level.resolve_name(destination).map(str::to_string) else {
            self.update_message = Some(format!("{destination} isn't a room here!"));
            return Ok(());
        };

        match find_path(&self.level, &self.current_room, &target) {
            Ok(route) => self.update_message = Some(render::route_message(&route)),
            Err(PathError::PathNotFound { .. }) => {
                self.update_message = Some(format!("There is no way to the {target} from here!"));
            }
            Err(PathError::NodeNotFound(room)) => {
                return Err(SessionError::CurrentRoomMissing(room));
            }
            Err(PathError::GraphConsistency { room, target }) => {
                return Err(SessionError::GraphConsistency { room, target });
            }
        }
        Ok(())
    }

    /// Decides whether the room the player stands in ends the level.
    fn evaluate(&mut self) -> Result<Option<LevelRequest>, SessionError> {
        let room = self.room()?;
        let boss = room.boss().map(str::to_string);
        let at_exit = room.name() == self.level.exit_room();

        if boss.is_some() {
            if !self.inventory.contains_all(self.level.required_items()) {
                let message = format!("{}\n{}", render::defeat_message(&self.level), render::CLOSING);
                self.finish(Outcome::Lost, message)?;
                return Ok(None);
            }
            let victory = render::victory_message(&self.level);
            return match self.progression {
                Progression::SingleLevel => {
                    self.finish(Outcome::Won, format!("{victory}\n{}", render::CLOSING))?;
                    Ok(None)
                }
                Progression::Campaign { ordinal } => {
                    self.update_message = Some(victory);
                    self.advance(Trigger::LevelCleared)?;
                    Ok(Some(LevelRequest::Next { completed: ordinal }))
                }
            };
        }

        if at_exit {
            self.finish(Outcome::Quit, render::FAREWELL.to_string())?;
        }
        Ok(None)
    }

    fn finish(&mut self, outcome: Outcome, message: String) -> Result<(), SessionError> {
        self.advance(Trigger::GameEnded)?;
        self.outcome = Some(outcome);
        self.update_message = Some(message);
        Ok(())
    }

    /// Prepares the level entered on the next empty input.
    pub fn stage_next_level(&mut self, template: &Level) -> Result<(), SessionError> {
        self.expect_phase(Phase::LevelComplete, "stage a level")?;
        self.staged = Some(prepare(template, &self.config)?);
        Ok(())
    }

    /// Ends a campaign that has no further level.
    pub fn conclude_campaign(&mut self) -> Result<RenderedStatus, SessionError> {
        self.expect_phase(Phase::LevelComplete, "conclude the campaign")?;
        let message = format!(
            "{}\n{}\n{}",
            render::victory_message(&self.level),
            render::CAMPAIGN_COMPLETE,
            render::CLOSING
        );
        self.finish(Outcome::Won, message)?;
        self.render()
    }

    fn enter_staged_level(&mut self) -> Result<(), SessionError> {
        let StagedLevel { level, survey } = self.staged.take().ok_or(SessionError::NoStagedLevel)?;
        self.advance(Trigger::Continue)?;
        self.current_room = level.start().to_string();
        self.update_message = Some(render::welcome_message(&level));
        self.level = level;
        self.survey = survey;
        self.inventory.clear();
        if let Progression::Campaign { ordinal } = &mut self.progression {
            *ordinal += 1;
        }
        Ok(())
    }

    /// Text for the current phase. Clears the pending update message.
    pub fn render(&mut self) -> Result<RenderedStatus, SessionError> {
        let body = match self.phase {
            Phase::Intro => render::intro_screen(&self.level),
            Phase::Instructions => render::instructions_screen(false),
            Phase::ViewingHelp => render::instructions_screen(true),
            Phase::Playing | Phase::GameOver => self.status_report()?.to_string(),
            Phase::LevelComplete => {
                format!("{}\n\n{}", self.status_report()?, render::NEXT_LEVEL_PROMPT)
            }
        };
        self.update_message = None;
        self.acquired = false;
        Ok(RenderedStatus {
            phase: self.phase,
            body,
        })
    }

    /// Builds the status block for the current room without clearing anything.
    pub fn status_report(&self) -> Result<StatusReport, SessionError> {
        let room = self.room()?;
        let title = self.level.title();
        let mut message = self.update_message.clone();

        if room.name() == self.level.exit_room() {
            let ground = match self.level.boss() {
                Some(boss) => format!("{boss} laughs at you and taunts you to try again!"),
                None => "Nothing is on the ground!".to_string(),
            };
            return Ok(StatusReport {
                room: format!("You are exiting the {title}."),
                description: None,
                inventory: "You dropped all the items in your inventory and give up!".to_string(),
                ground,
                exits: String::new(),
                message,
            });
        }

        let ground = match (room.item(), room.boss()) {
            (Some(item), Some(boss)) => {
                format!("{item} is on the ground! To get it back, beat {boss}!")
            }
            (Some(item), None) => format!(
                "{item} is on the ground! To pick it up, type 'get {}'!",
                item.to_lowercase()
            ),
            (None, _) if self.acquired => message.take().unwrap_or_default(),
            (None, _) => "Nothing is on the ground!".to_string(),
        };

        let (room_line, exits) = match room.boss() {
            Some(boss) => (
                format!("You are in the {}. {boss} is here!", room.name()),
                "You can't move. It's time to duel!".to_string(),
            ),
            None => (
                format!("You are in the {}.", room.name()),
                render::exits_line(&room.exits().directions()),
            ),
        };

        Ok(StatusReport {
            room: room_line,
            description: room.description().map(str::to_string),
            inventory: format!("Inventory: {}", self.inventory),
            ground,
            exits,
            message,
        })
    }

    fn step(&mut self, request: Option<LevelRequest>) -> Result<Step, SessionError> {
        Ok(Step {
            status: self.render()?,
            request,
        })
    }

    fn reject(&mut self, error: CommandError) {
        self.update_message = Some(error.to_string());
    }

    fn advance(&mut self, trigger: Trigger) -> Result<(), SessionError> {
        self.phase = transition(self.phase, trigger).ok_or_else(|| SessionError::UnexpectedPhase {
            phase: self.phase,
            operation: format!("{trigger:?}"),
        })?;
        Ok(())
    }

    fn expect_phase(&self, phase: Phase, operation: &str) -> Result<(), SessionError> {
        if self.terminated {
            return Err(SessionError::Terminated);
        }
        if self.phase != phase {
            return Err(SessionError::UnexpectedPhase {
                phase: self.phase,
                operation: operation.to_string(),
            });
        }
        Ok(())
    }

    fn room(&self) -> Result<&Room, SessionError> {
        self.level
            .room(&self.current_room)
            .ok_or_else(|| SessionError::CurrentRoomMissing(self.current_room.clone()))
    }

    // ===== accessors =====

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn progression(&self) -> Progression {
        self.progression
    }

    /// The session's own level copy, including picked-up items and coordinates.
    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Coordinate inference result for the current level.
    pub fn survey(&self) -> &CoordinateReport {
        &self.survey
    }

    pub fn current_room(&self) -> &str {
        &self.current_room
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn update_message(&self) -> Option<&str> {
        self.update_message.as_deref()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn has_staged_level(&self) -> bool {
        self.staged.is_some()
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }
}

fn prepare(template: &Level, config: &GameConfig) -> Result<StagedLevel, LevelError> {
    let mut level = template.clone();
    let start = level.start().to_string();
    let survey = infer_coordinates(&mut level, &start)?;
    if config.grid_conflicts == GridConflictPolicy::Reject {
        if let Some(error) = survey.clone().into_conflict_error() {
            return Err(error);
        }
    }
    Ok(StagedLevel { level, survey })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{LevelSpec, RoomSpec};
    use CardinalDirection::*;

    /// Hall (start) -east-> Vault (item Gem), Hall -north-> Lair (boss Drake).
    fn small_level() -> Level {
        let spec = LevelSpec::new("Tower", "Hall")
            .room(
                RoomSpec::new("Hall")
                    .exit(East, "Vault")
                    .exit(North, "Lair")
                    .description("Banners hang from the walls."),
            )
            .room(RoomSpec::new("Vault").exit(West, "Hall").item("Gem"))
            .room(RoomSpec::new("Lair").exit(South, "Hall").boss("Drake").item("Egg"));
        Level::from_spec(spec, &GameConfig::default()).unwrap()
    }

    fn playing(level: &Level) -> Session {
        let mut session = Session::new(level, GameConfig::default()).unwrap();
        session.apply_command("").unwrap();
        session.apply_command("").unwrap();
        assert_eq!(session.phase(), Phase::Playing);
        session
    }

    #[test]
    fn screens_advance_on_empty_input_only() {
        let mut session = Session::new(&small_level(), GameConfig::default()).unwrap();
        assert_eq!(session.phase(), Phase::Intro);

        let step = session.apply_command("hello").unwrap();
        assert_eq!(step.status.phase, Phase::Intro);

        session.apply_command("   ").unwrap();
        assert_eq!(session.phase(), Phase::Instructions);

        let step = session.apply_command("").unwrap();
        assert_eq!(step.status.phase, Phase::Playing);
        assert!(step.status.body.contains("Welcome to the Tower! Find your loot and beat Drake!"));
        assert!(step.status.body.contains("Banners hang from the walls."));
        assert_eq!(session.update_message(), None);
    }

    #[test]
    fn unknown_command_leaves_state_untouched() {
        let level = small_level();
        let mut session = playing(&level);
        let step = session.apply_command("dance wildly").unwrap();
        assert!(step.status.body.contains("Error: Invalid command."));
        assert_eq!(session.current_room(), "Hall");
        assert!(session.inventory().is_empty());
    }

    #[test]
    fn move_with_synonym_and_missing_exit() {
        let level = small_level();
        let mut session = playing(&level);

        session.apply_command("go right").unwrap();
        assert_eq!(session.current_room(), "Vault");

        let step = session.apply_command("move north").unwrap();
        assert!(step.status.body.contains("You can't move north"));
        assert_eq!(session.current_room(), "Vault");

        let step = session.apply_command("go").unwrap();
        assert!(step.status.body.contains("You need a direction!"));
    }

    #[test]
    fn pickup_message_replaces_ground_line_once() {
        let level = small_level();
        let mut session = playing(&level);
        session.apply_command("go east").unwrap();

        let step = session.apply_command("get GEM").unwrap();
        assert!(session.inventory().contains("Gem"));
        let lines: Vec<&str> = step.status.body.lines().collect();
        assert_eq!(lines[3], "You have obtained Gem!");

        let step = session.apply_command("get gem").unwrap();
        assert!(step.status.body.contains("Gem isn't in Vault!"));
        assert!(step.status.body.contains("Nothing is on the ground!"));
        assert_eq!(session.inventory().count("Gem"), 1);
        // The template is untouched.
        assert_eq!(level.room("Vault").unwrap().item(), Some("Gem"));
    }

    #[test]
    fn held_item_stays_on_the_ground() {
        let spec = LevelSpec::new("Mine", "Shaft")
            .room(
                RoomSpec::new("Shaft")
                    .exit(East, "Seam")
                    .exit(North, "Pit")
                    .item("Gem"),
            )
            .room(RoomSpec::new("Seam").exit(West, "Shaft").item("gem"))
            .room(RoomSpec::new("Pit").exit(South, "Shaft").boss("Mole"));
        let level = Level::from_spec(spec, &GameConfig::default()).unwrap();
        let mut session = playing(&level);

        session.apply_command("get gem").unwrap();
        session.apply_command("go east").unwrap();
        let step = session.apply_command("get gem").unwrap();

        assert!(step.status.body.contains("You already have this."));
        assert_eq!(session.inventory().len(), 1);
        assert_eq!(session.inventory().count("Gem"), 1);
        assert_eq!(session.level().room("Seam").unwrap().item(), Some("gem"));
    }

    #[test]
    fn boss_without_relics_is_a_loss() {
        let level = small_level();
        let mut session = playing(&level);
        let step = session.apply_command("go north").unwrap();
        assert_eq!(session.outcome(), Some(Outcome::Lost));
        assert_eq!(step.status.phase, Phase::GameOver);
        assert!(step.status.body.contains("It's time to duel!"));
        assert!(step.status.body.contains("defeated by Drake"));
        assert_eq!(session.apply_command(""), Err(SessionError::Terminated));
    }

    #[test]
    fn boss_with_relics_is_a_win() {
        let level = small_level();
        let mut session = playing(&level);
        session.apply_command("go east").unwrap();
        session.apply_command("get gem").unwrap();
        session.apply_command("go west").unwrap();
        let step = session.apply_command("go north").unwrap();
        assert_eq!(session.outcome(), Some(Outcome::Won));
        assert!(step.request.is_none());
        assert!(session.is_game_over());
    }

    #[test]
    fn quit_moves_to_exit_room() {
        let level = small_level();
        let mut session = playing(&level);
        let step = session.apply_command("EXIT").unwrap();
        assert_eq!(session.current_room(), "Exit");
        assert_eq!(session.outcome(), Some(Outcome::Quit));
        assert!(step.status.body.contains("You are exiting the Tower."));
        assert!(step.status.body.contains("Drake laughs at you"));
        assert!(step.status.body.ends_with("Thanks for playing! Hope you enjoyed it!"));
    }

    #[test]
    fn help_round_trip() {
        let level = small_level();
        let mut session = playing(&level);
        let step = session.apply_command("help").unwrap();
        assert_eq!(step.status.phase, Phase::ViewingHelp);
        assert!(step.status.body.ends_with("Press enter to return to the game!"));
        session.apply_command("").unwrap();
        assert_eq!(session.phase(), Phase::Playing);
    }

    #[test]
    fn path_reports_route_or_error() {
        let level = small_level();
        let mut session = playing(&level);
        session.apply_command("go east").unwrap();

        let step = session.apply_command("path LAIR").unwrap();
        assert!(step.status.body.contains("To reach the Lair, move west, then north (cost 2)."));

        let step = session.apply_command("path moon").unwrap();
        assert!(step.status.body.contains("Moon isn't a room here!"));

        let step = session.apply_command("path exit").unwrap();
        assert!(step.status.body.contains("There is no way to the Exit from here!"));
        assert_eq!(session.current_room(), "Vault");
    }

    #[test]
    fn campaign_boss_requests_next_level() {
        let level = small_level();
        let mut session = Session::new(&level, GameConfig::default())
            .unwrap()
            .with_progression(Progression::Campaign { ordinal: 0 });
        session.apply_command("").unwrap();
        session.apply_command("").unwrap();
        session.apply_command("go east").unwrap();
        session.apply_command("get gem").unwrap();
        session.apply_command("go west").unwrap();

        let step = session.apply_command("go north").unwrap();
        assert_eq!(step.request, Some(LevelRequest::Next { completed: 0 }));
        assert_eq!(session.phase(), Phase::LevelComplete);
        assert_eq!(session.apply_command(""), Err(SessionError::NoStagedLevel));
        assert!(!session.is_terminated());

        session.stage_next_level(&level).unwrap();
        let step = session.apply_command("").unwrap();
        assert_eq!(step.status.phase, Phase::Playing);
        assert_eq!(session.current_room(), "Hall");
        assert!(session.inventory().is_empty());
        assert_eq!(session.progression(), Progression::Campaign { ordinal: 1 });
        assert_eq!(session.level().room("Vault").unwrap().item(), Some("Gem"));
    }

    #[test]
    fn conclude_campaign_ends_with_a_win() {
        let level = small_level();
        let mut session = Session::new(&level, GameConfig::default())
            .unwrap()
            .with_progression(Progression::Campaign { ordinal: 3 });
        assert!(matches!(
            session.conclude_campaign(),
            Err(SessionError::UnexpectedPhase { phase: Phase::Intro, .. })
        ));

        session.apply_command("").unwrap();
        session.apply_command("").unwrap();
        session.apply_command("go e").unwrap();
        session.apply_command("get gem").unwrap();
        session.apply_command("go w").unwrap();
        session.apply_command("go n").unwrap();

        let status = session.conclude_campaign().unwrap();
        assert_eq!(status.phase, Phase::GameOver);
        assert!(status.body.contains("You cleared every level!"));
        assert_eq!(session.outcome(), Some(Outcome::Won));
    }

    #[test]
    fn missing_current_room_terminates() {
        let level = small_level();
        let mut session = playing(&level);
        session.level.remove_room("Hall");
        let err = session.apply_command("go east").unwrap_err();
        assert_eq!(err, SessionError::CurrentRoomMissing("Hall".into()));
        assert!(session.is_terminated());
        assert_eq!(session.apply_command("help"), Err(SessionError::Terminated));
    }

    #[test]
    fn reject_policy_refuses_non_planar_levels() {
        let spec = LevelSpec::new("Warp", "A")
            .room(RoomSpec::new("A").exit(East, "B").exit(North, "C"))
            .room(RoomSpec::new("B"))
            .room(RoomSpec::new("C").exit(East, "B"));
        let config = GameConfig::default().with_grid_conflicts(GridConflictPolicy::Reject);
        let level = Level::from_spec(spec, &config).unwrap();

        assert!(matches!(
            Session::new(&level, config),
            Err(LevelError::GridConflict { .. })
        ));
        let tolerant = Session::new(&level, GameConfig::default()).unwrap();
        assert_eq!(tolerant.survey().conflicts.len(), 1);
    }

    #[test]
    fn long_input_is_truncated() {
        let level = small_level();
        let mut config = GameConfig::default();
        config.max_input_len = 7;
        let mut session = Session::new(&level, config).unwrap();
        session.apply_command("").unwrap();
        session.apply_command("").unwrap();
        session.apply_command("go eastxxxxxxxx").unwrap();
        assert_eq!(session.current_room(), "Vault");
    }
}

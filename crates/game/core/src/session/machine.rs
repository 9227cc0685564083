//! Session phases and the table of allowed transitions between them.

/// Phase of a session. Every session starts in [`Phase::Intro`].
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Phase {
    #[default]
    Intro,
    Instructions,
    Playing,
    ViewingHelp,
    /// A boss was beaten in campaign mode; waiting for the next level.
    LevelComplete,
    GameOver,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Phases that only show text and wait for an empty line.
    pub fn is_screen(self) -> bool {
        matches!(
            self,
            Phase::Intro | Phase::Instructions | Phase::ViewingHelp | Phase::LevelComplete
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::GameOver)
    }
}

/// What happened, as far as the phase machine is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// Empty input on a text screen.
    Continue,
    OpenHelp,
    /// A boss was beaten and another level may follow.
    LevelCleared,
    GameEnded,
}

/// Looks up the next phase. `None` means the trigger is not valid here.
pub fn transition(phase: Phase, trigger: Trigger) -> Option<Phase> {
    use Phase::*;
    use Trigger::*;

    match (phase, trigger) {
        (Intro, Continue) => Some(Instructions),
        (Instructions, Continue) | (ViewingHelp, Continue) | (LevelComplete, Continue) => {
            Some(Playing)
        }
        (Playing, OpenHelp) => Some(ViewingHelp),
        (Playing, LevelCleared) => Some(LevelComplete),
        (Playing, GameEnded) | (LevelComplete, GameEnded) => Some(GameOver),
        _ => None,
    }
}

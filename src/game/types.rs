//! Phases of a play session.

use std::fmt;

/// Top-level game phase. The only cycle is
/// `Starting -> Running -> Ending -> Ended -> Starting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    /// Waiting for the first click.
    Starting,
    Running,
    /// Bird hit something and is falling off screen.
    Ending,
    /// Game over banner shown; a click restarts.
    Ended,
}

impl GamePhase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Starting => "Starting",
            Self::Running => "Running",
            Self::Ending => "Ending",
            Self::Ended => "Ended",
        }
    }

    /// Prompt for the status bar.
    pub fn hint(&self) -> &'static str {
        match self {
            Self::Starting => "Click to start!",
            Self::Running => "Click to flap",
            Self::Ending => "Ouch!",
            Self::Ended => "Game over - click to play again",
        }
    }

    /// True when `self -> next` is one of the documented transitions.
    pub fn can_transition_to(&self, next: GamePhase) -> bool {
        matches!(
            (self, next),
            (Self::Starting, Self::Running)
                | (Self::Running, Self::Ending)
                | (Self::Ending, Self::Ended)
                | (Self::Ended, Self::Starting)
        )
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [GamePhase; 4] = [
        GamePhase::Starting,
        GamePhase::Running,
        GamePhase::Ending,
        GamePhase::Ended,
    ];

    #[test]
    fn test_only_the_cycle_is_legal() {
        let legal: Vec<_> = ALL
            .iter()
            .flat_map(|from| ALL.iter().map(move |to| (*from, *to)))
            .filter(|(from, to)| from.can_transition_to(*to))
            .collect();
        assert_eq!(
            legal,
            vec![
                (GamePhase::Starting, GamePhase::Running),
                (GamePhase::Running, GamePhase::Ending),
                (GamePhase::Ending, GamePhase::Ended),
                (GamePhase::Ended, GamePhase::Starting),
            ]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(GamePhase::Ending.to_string(), "Ending");
        assert!(!GamePhase::Ended.hint().is_empty());
    }
}

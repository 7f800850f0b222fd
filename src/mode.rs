//! Difficulty modes: fall speed and rotation rules.

use core::str::FromStr;

use embassy_time::Duration;

use crate::Error;

/// How the button may change the falling piece's orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RotationPolicy {
    /// Any number of clockwise quarter turns.
    Free,
    /// Only the spawn orientation and its single quarter turn.
    Toggle,
    /// No rotation at all.
    Locked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Menu order.
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Short name shown in the HUD and the menu.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Med",
            Self::Hard => "Hard",
        }
    }

    /// Initial time between automatic one-row falls.
    pub const fn fall_interval(self) -> Duration {
        match self {
            Self::Easy => Duration::from_millis(800),
            Self::Medium => Duration::from_millis(400),
            Self::Hard => Duration::from_millis(200),
        }
    }

    pub const fn rotation(self) -> RotationPolicy {
        match self {
            Self::Easy => RotationPolicy::Free,
            Self::Medium => RotationPolicy::Toggle,
            Self::Hard => RotationPolicy::Locked,
        }
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.name() == s)
            .ok_or(Error::UnknownDifficulty)
    }
}

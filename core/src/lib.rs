//! Board engine for DragonSweeper, a Minesweeper-style puzzle where the
//! hidden mines are dragons.
//!
//! The [`Board`] owns the grid and is driven one [`Click`] per host tick via
//! [`Board::update`]. Dragons are placed lazily on the first reveal, so the
//! first revealed cell is always safe. Hosts read the grid back through
//! [`Board::display_at`] and the aggregate counters.

pub use board::*;
pub use cell::*;
pub use config::*;
pub use error::*;
pub use input::*;
pub use layout::*;
pub use placer::*;
pub use types::*;

mod board;
mod cell;
mod config;
mod error;
mod input;
mod layout;
mod placer;
mod types;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
    /// The flags now sit on exactly the dragon cells.
    Won,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
            Self::Won => true,
        }
    }
}

/// Ordered by precedence, so merging keeps the most significant outcome.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    Won,
    HitDragon,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    /// Combines the outcomes of several reveals made by one move.
    pub fn merge(self, other: Self) -> Self {
        self.max(other)
    }
}

/// Result of feeding one [`Click`] to [`Board::update`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum UpdateOutcome {
    NoChange,
    Mark(MarkOutcome),
    Reveal(RevealOutcome),
}

impl UpdateOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Mark(outcome) => outcome.has_update(),
            Self::Reveal(outcome) => outcome.has_update(),
        }
    }
}

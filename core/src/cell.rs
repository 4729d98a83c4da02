use serde::{Deserialize, Serialize};

/// Player-visible status of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellStatus {
    #[default]
    Covered,
    Revealed,
    Flagged,
}

impl CellStatus {
    pub const fn is_covered(self) -> bool {
        matches!(self, Self::Covered)
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }
}

/// What the renderer should draw for a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayCell {
    Covered,
    Flagged,
    Dragon,
    /// Revealed safe cell with this many neighbouring dragons, `0..=8`.
    Count(u8),
}

impl DisplayCell {
    pub const fn from_parts(status: CellStatus, is_dragon: bool, adjacent_dragons: u8) -> Self {
        match status {
            CellStatus::Flagged => Self::Flagged,
            CellStatus::Covered => Self::Covered,
            CellStatus::Revealed if is_dragon => Self::Dragon,
            CellStatus::Revealed => Self::Count(adjacent_dragons),
        }
    }

    /// Single character form, used by text hosts and test fixtures.
    pub const fn as_char(self) -> char {
        match self {
            Self::Covered => '#',
            Self::Flagged => 'F',
            Self::Dragon => '*',
            Self::Count(0) => '.',
            Self::Count(count) if count <= 8 => (b'0' + count) as char,
            Self::Count(_) => '?',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_and_cover_hide_contents() {
        assert_eq!(
            DisplayCell::from_parts(CellStatus::Flagged, true, 0),
            DisplayCell::Flagged
        );
        assert_eq!(
            DisplayCell::from_parts(CellStatus::Covered, false, 3),
            DisplayCell::Covered
        );
    }

    #[test]
    fn revealed_shows_dragon_or_count() {
        assert_eq!(
            DisplayCell::from_parts(CellStatus::Revealed, true, 2),
            DisplayCell::Dragon
        );
        assert_eq!(
            DisplayCell::from_parts(CellStatus::Revealed, false, 2),
            DisplayCell::Count(2)
        );
        assert_eq!(DisplayCell::Count(0).as_char(), '.');
        assert_eq!(DisplayCell::Count(8).as_char(), '8');
    }
}

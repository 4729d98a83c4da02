use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::*;

bitflags! {
    /// Buttons held during a click.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct MouseButtons: u8 {
        const LEFT  = 1;
        const RIGHT = 1 << 1;
    }
}

/// One tick of player input, already mapped onto the grid.
///
/// `target` is `None` when the pointer is off the board.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Click {
    pub buttons: MouseButtons,
    pub target: Option<Coord2>,
}

impl Click {
    pub const fn left(coords: Coord2) -> Self {
        Self {
            buttons: MouseButtons::LEFT,
            target: Some(coords),
        }
    }

    pub const fn right(coords: Coord2) -> Self {
        Self {
            buttons: MouseButtons::RIGHT,
            target: Some(coords),
        }
    }

    pub const fn both(coords: Coord2) -> Self {
        Self {
            buttons: MouseButtons::all(),
            target: Some(coords),
        }
    }

    /// A tick without any click.
    pub const fn idle() -> Self {
        Self {
            buttons: MouseButtons::empty(),
            target: None,
        }
    }
}

/// Raw pointer state as delivered by the host.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerInput {
    pub buttons: MouseButtons,
    pub x: f32,
    pub y: f32,
}

/// Where the board sits in host pointer space.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardGeometry {
    pub origin_x: f32,
    pub origin_y: f32,
    pub cell_size: f32,
}

impl BoardGeometry {
    /// Two cells in from the left edge, vertically centred in a viewport of
    /// `viewport_height`.
    pub fn centered(config: &BoardConfig, viewport_height: f32) -> Self {
        let cell_size = config.cell_size();
        let board_height = f32::from(config.height()) * cell_size;
        Self {
            origin_x: 2.0 * cell_size,
            origin_y: viewport_height / 2.0 - board_height / 2.0,
            cell_size,
        }
    }

    /// Cell under the pointer, or `None` when it is off a board of `size`.
    pub fn locate(&self, (x, y): (f32, f32), size: Coord2) -> Option<Coord2> {
        let col = ((x - self.origin_x) / self.cell_size).floor();
        let row = ((y - self.origin_y) / self.cell_size).floor();
        let (height, width) = size;
        if !(0.0..f32::from(height)).contains(&row) || !(0.0..f32::from(width)).contains(&col) {
            return None;
        }
        Some((row as Coord, col as Coord))
    }

    pub fn click(&self, pointer: PointerInput, size: Coord2) -> Click {
        Click {
            buttons: pointer.buttons,
            target: self.locate((pointer.x, pointer.y), size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GEOMETRY: BoardGeometry = BoardGeometry {
        origin_x: 60.0,
        origin_y: 100.0,
        cell_size: 30.0,
    };

    #[test]
    fn locate_floors_into_cells() {
        assert_eq!(GEOMETRY.locate((60.0, 100.0), (20, 20)), Some((0, 0)));
        assert_eq!(GEOMETRY.locate((89.9, 129.9), (20, 20)), Some((0, 0)));
        assert_eq!(GEOMETRY.locate((90.0, 160.0), (20, 20)), Some((2, 1)));
        assert_eq!(GEOMETRY.locate((659.0, 699.0), (20, 20)), Some((19, 19)));
    }

    #[test]
    fn locate_rejects_off_board() {
        assert_eq!(GEOMETRY.locate((59.0, 120.0), (20, 20)), None);
        assert_eq!(GEOMETRY.locate((80.0, 99.5), (20, 20)), None);
        assert_eq!(GEOMETRY.locate((660.0, 120.0), (20, 20)), None);
        assert_eq!(GEOMETRY.locate((80.0, 700.0), (20, 20)), None);
    }

    #[test]
    fn centered_matches_small_preset_layout() {
        let geometry = BoardGeometry::centered(&BoardConfig::default(), 720.0);

        assert_eq!(geometry.origin_x, 60.0);
        assert_eq!(geometry.origin_y, 60.0);
        assert_eq!(geometry.cell_size, 30.0);
    }

    #[test]
    fn click_keeps_buttons() {
        let pointer = PointerInput {
            buttons: MouseButtons::LEFT | MouseButtons::RIGHT,
            x: 75.0,
            y: 115.0,
        };

        assert_eq!(GEOMETRY.click(pointer, (20, 20)), Click::both((0, 0)));
    }
}

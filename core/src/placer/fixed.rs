use super::*;

/// Places dragons at predetermined positions, for replays and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedPlacer {
    dragons: Vec<Coord2>,
}

impl FixedPlacer {
    pub fn new(dragons: impl Into<Vec<Coord2>>) -> Self {
        Self {
            dragons: dragons.into(),
        }
    }
}

impl DragonPlacer for FixedPlacer {
    fn place(&mut self, config: &BoardConfig, safe: Coord2) -> Result<DragonLayout> {
        let layout = DragonLayout::from_dragon_coords(config.size(), &self.dragons)?;
        layout.validate_coords(safe)?;

        if layout.dragon_count() != config.dragons() {
            log::warn!(
                "Fixed layout has {} dragons, board expects {}",
                layout.dragon_count(),
                config.dragons()
            );
            return Err(GameError::InvalidLayout);
        }
        if layout.is_dragon(safe) {
            log::warn!("Fixed layout puts a dragon on the first clicked cell {:?}", safe);
            return Err(GameError::InvalidLayout);
        }

        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_listed_dragons() {
        let config = BoardConfig::new((3, 3), 2).unwrap();
        let layout = FixedPlacer::new([(0, 0), (2, 2)])
            .place(&config, (1, 1))
            .unwrap();

        assert!(layout.is_dragon((0, 0)));
        assert!(layout.is_dragon((2, 2)));
        assert_eq!(layout.adjacent_dragons((1, 1)), 2);
    }

    #[test]
    fn rejects_dragon_on_safe_cell() {
        let config = BoardConfig::new((3, 3), 1).unwrap();

        assert_eq!(
            FixedPlacer::new([(1, 1)]).place(&config, (1, 1)),
            Err(GameError::InvalidLayout)
        );
    }

    #[test]
    fn rejects_count_mismatch() {
        let config = BoardConfig::new((3, 3), 2).unwrap();

        assert_eq!(
            FixedPlacer::new([(0, 0)]).place(&config, (1, 1)),
            Err(GameError::InvalidLayout)
        );
    }
}

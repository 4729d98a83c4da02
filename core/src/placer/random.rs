use rand::rngs::SmallRng;

use super::*;

/// Rejection sampling over uniformly random cells, keeping the first clicked
/// cell free.
#[derive(Clone, Debug)]
pub struct RandomPlacer {
    rng: SmallRng,
}

impl RandomPlacer {
    pub fn new(seed: u64) -> Self {
        use rand::prelude::*;

        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl DragonPlacer for RandomPlacer {
    fn place(&mut self, config: &BoardConfig, safe: Coord2) -> Result<DragonLayout> {
        use rand::prelude::*;

        let (height, width) = config.size();
        let mut layout = DragonLayout::empty(config.size());
        layout.validate_coords(safe)?;

        // terminates since a valid config leaves at least one cell besides `safe`

        let mut attempts: u32 = 0;
        while layout.dragon_count() < config.dragons() {
            let coords = (
                self.rng.random_range(0..height),
                self.rng.random_range(0..width),
            );
            attempts += 1;
            if coords == safe {
                continue;
            }
            layout.add_dragon(coords);
        }
        log::debug!(
            "Placed {} dragons in {} draws, safe cell {:?}",
            config.dragons(),
            attempts,
            safe
        );

        Ok(layout)
    }
}

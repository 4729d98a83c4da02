use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Source of dragon layouts, called once per game on the first reveal.
///
/// Implementations must return a layout of `config.size()` with exactly
/// `config.dragons()` dragons, none of them on `safe`.
pub trait DragonPlacer {
    fn place(&mut self, config: &BoardConfig, safe: Coord2) -> Result<DragonLayout>;
}

impl<P: DragonPlacer + ?Sized> DragonPlacer for &mut P {
    fn place(&mut self, config: &BoardConfig, safe: Coord2) -> Result<DragonLayout> {
        (**self).place(config, safe)
    }
}

impl<P: DragonPlacer + ?Sized> DragonPlacer for Box<P> {
    fn place(&mut self, config: &BoardConfig, safe: Coord2) -> Result<DragonLayout> {
        (**self).place(config, safe)
    }
}

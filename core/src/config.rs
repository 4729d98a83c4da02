use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize};

use crate::*;

/// Named board presets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    /// 20x20, 50 dragons per level.
    Small,
}

impl SizeClass {
    pub const ALL: [SizeClass; 1] = [SizeClass::Small];

    /// Board dimensions as `(height, width)`.
    pub const fn size(self) -> Coord2 {
        match self {
            Self::Small => (20, 20),
        }
    }

    /// Dragons on a level 1 board.
    pub const fn base_dragons(self) -> CellCount {
        match self {
            Self::Small => 50,
        }
    }

    /// Edge length of one cell in host pointer units.
    pub const fn cell_size(self) -> f32 {
        match self {
            Self::Small => 30.0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Small => "small",
        }
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SizeClass {
    type Err = GameError;

    fn from_str(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|size_class| size_class.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| GameError::UnknownSizeClass(name.into()))
    }
}

/// Validated board dimensions and dragon count.
///
/// Only built through [`BoardConfig::new`], [`BoardConfig::preset`] or
/// deserialization, all of which enforce `dragons < width * height - 1`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct BoardConfig {
    /// `(height, width)`
    size: Coord2,
    dragons: CellCount,
    /// Preset this config came from, if any.
    size_class: Option<SizeClass>,
}

impl BoardConfig {
    pub fn new((height, width): Coord2, dragons: CellCount) -> Result<Self> {
        if height == 0 || width == 0 {
            return Err(GameError::EmptyBoard);
        }
        let config = Self {
            size: (height, width),
            dragons,
            size_class: None,
        };
        config.check_capacity()?;
        Ok(config)
    }

    /// Preset dimensions with `base_dragons * level` dragons.
    pub fn preset(size_class: SizeClass, level: u16) -> Result<Self> {
        let dragons = size_class.base_dragons().saturating_mul(level);
        let mut config = Self::new(size_class.size(), dragons)?;
        config.size_class = Some(size_class);
        Ok(config)
    }

    /// `(height, width)`
    pub const fn size(&self) -> Coord2 {
        self.size
    }

    pub const fn dragons(&self) -> CellCount {
        self.dragons
    }

    pub const fn size_class(&self) -> Option<SizeClass> {
        self.size_class
    }

    pub const fn height(&self) -> Coord {
        self.size.0
    }

    pub const fn width(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        cell_count(self.size)
    }

    /// Largest dragon count that still leaves the first clicked cell and at
    /// least one other cell free.
    pub const fn capacity(&self) -> CellCount {
        self.total_cells().saturating_sub(2)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.dragons)
    }

    /// Cell size for pointer mapping, falls back to the smallest preset's.
    pub fn cell_size(&self) -> f32 {
        self.size_class.unwrap_or(SizeClass::Small).cell_size()
    }

    fn check_capacity(&self) -> Result<()> {
        // dragons < width * height - 1, which rules out single-cell boards
        if self.total_cells() < 2 {
            return Err(GameError::TooFewCells);
        }
        if self.dragons > self.capacity() {
            return Err(GameError::TooManyDragons {
                requested: self.dragons,
                capacity: self.capacity(),
            });
        }
        Ok(())
    }
}

impl<'de> Deserialize<'de> for BoardConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Fields {
            size: Coord2,
            dragons: CellCount,
            #[serde(default)]
            size_class: Option<SizeClass>,
        }

        let fields = Fields::deserialize(deserializer)?;
        let mut config =
            Self::new(fields.size, fields.dragons).map_err(serde::de::Error::custom)?;
        config.size_class = fields.size_class;
        Ok(config)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            size: SizeClass::Small.size(),
            dragons: SizeClass::Small.base_dragons(),
            size_class: Some(SizeClass::Small),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_preset_scales_with_level() {
        let config = BoardConfig::preset(SizeClass::Small, 3).unwrap();

        assert_eq!(config.size(), (20, 20));
        assert_eq!(config.dragons(), 150);
        assert_eq!(config.size_class(), Some(SizeClass::Small));
        assert_eq!(config.safe_cells(), 250);
    }

    #[test]
    fn level_beyond_capacity_is_rejected() {
        assert_eq!(
            BoardConfig::preset(SizeClass::Small, 8),
            Err(GameError::TooManyDragons {
                requested: 400,
                capacity: 398,
            })
        );
        assert!(BoardConfig::preset(SizeClass::Small, 7).is_ok());
    }

    #[test]
    fn size_class_parses_known_names_only() {
        assert_eq!("small".parse::<SizeClass>(), Ok(SizeClass::Small));
        assert_eq!("Small".parse::<SizeClass>(), Ok(SizeClass::Small));
        assert_eq!(
            "huge".parse::<SizeClass>(),
            Err(GameError::UnknownSizeClass("huge".into()))
        );
    }

    #[test]
    fn custom_config_checks_bounds() {
        assert_eq!(BoardConfig::new((0, 5), 0), Err(GameError::EmptyBoard));
        assert!(BoardConfig::new((3, 3), 0).is_ok());
        assert!(BoardConfig::new((3, 3), 7).is_ok());
        assert!(BoardConfig::new((3, 3), 8).is_err());
        assert!(BoardConfig::new((1, 2), 0).is_ok());
        assert!(BoardConfig::new((1, 2), 1).is_err());
    }

    #[test]
    fn single_cell_board_is_rejected() {
        assert_eq!(BoardConfig::new((1, 1), 0), Err(GameError::TooFewCells));
        assert_eq!(BoardConfig::new((1, 1), 1), Err(GameError::TooFewCells));
    }

    #[test]
    fn deserialized_config_is_validated() {
        let config: BoardConfig =
            serde_json::from_str(r#"{"size":[2,3],"dragons":4,"size_class":null}"#).unwrap();
        assert_eq!(config, BoardConfig::new((2, 3), 4).unwrap());

        let overfull = serde_json::from_str::<BoardConfig>(r#"{"size":[2,2],"dragons":3}"#);
        assert!(overfull.unwrap_err().to_string().contains("Too many dragons"));
        assert!(serde_json::from_str::<BoardConfig>(r#"{"size":[1,1],"dragons":0}"#).is_err());
        assert!(serde_json::from_str::<BoardConfig>(r#"{"size":[0,4],"dragons":0}"#).is_err());
    }

    #[test]
    fn serialized_config_reads_back() {
        let config = BoardConfig::preset(SizeClass::Small, 2).unwrap();
        let json = serde_json::to_string(&config).unwrap();

        assert_eq!(serde_json::from_str::<BoardConfig>(&json).unwrap(), config);
    }

    #[test]
    fn default_is_small_level_one() {
        assert_eq!(
            BoardConfig::default(),
            BoardConfig::preset(SizeClass::Small, 1).unwrap()
        );
    }
}

//! World generation configuration with documented constants
//!
//! All magic numbers for the generators are collected here. Every struct is
//! deserializable from TOML with `#[serde(default)]`, so a config file only
//! needs to mention the values it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SludgeError};

/// Top-level configuration for building a world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed for the root terrain; every other area's seed derives from it
    pub seed: u64,
    /// Root terrain width in cells
    pub width: usize,
    /// Root terrain height in cells
    pub height: usize,
    pub terrain: TerrainConfig,
    pub caves: CaveConfig,
    pub settlements: SettlementConfig,
    pub buildings: BuildingConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 123,
            width: 64,
            height: 32,
            terrain: TerrainConfig::default(),
            caves: CaveConfig::default(),
            settlements: SettlementConfig::default(),
            buildings: BuildingConfig::default(),
        }
    }
}

/// Noise terrain and root populate parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    // === NOISE ===
    /// Spatial scale applied to cell coordinates before sampling noise
    ///
    /// Perlin noise is zero at integer lattice points, so raw cell
    /// coordinates would produce a flat map. Smaller = more zoomed in.
    pub noise_scale: f64,

    /// Number of fractal octaves layered together
    pub octaves: usize,

    /// Radial penalty per unit of (distance from centre / width)
    ///
    /// At 2.0 a cell half a map-width away from the centre loses a full
    /// 1.0 of normalised height, which pushes the coast inwards.
    pub falloff: f64,

    /// Multiplier applied after the falloff, before thresholding
    pub rescale: f64,

    /// Height above which a cell becomes Rock
    pub rock_threshold: f64,

    /// Height above which a cell becomes Grass (below is Water)
    pub grass_threshold: f64,

    // === POPULATE ===
    /// Caves placed per thousand cells of root area
    pub caves_per_thousand: f64,

    /// Settlements placed per thousand cells of root area
    pub settlements_per_thousand: f64,

    /// Settlements may not be placed closer than this to the centre (cells)
    pub settlement_min_center_distance: f64,

    /// Random placement attempts allowed per requested sub-area
    ///
    /// Bounds the placement loop so that a mostly-water map still terminates.
    pub placement_attempts: usize,

    /// Chance that a Grass cell starts with a wandering enemy
    pub wild_enemy_chance: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            noise_scale: 0.2,
            octaves: 8,
            falloff: 2.0,
            rescale: 5.0,
            rock_threshold: 2.0,
            grass_threshold: 0.5,
            caves_per_thousand: 20.0,
            settlements_per_thousand: 3.0,
            settlement_min_center_distance: 6.0,
            placement_attempts: 64,
            wild_enemy_chance: 0.01,
        }
    }
}

/// Random-walk cave parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaveConfig {
    pub width: usize,
    pub height: usize,
    /// Steps taken by each random walk before it restarts from the centre
    pub walk_steps: usize,
    /// Walks repeat until at least this many cells are carved
    pub min_cells: usize,
    /// Per-cell chance of a weapon stack
    pub item_chance: f64,
    /// Per-cell chance of a cave enemy
    pub enemy_chance: f64,
    /// Forage items every carved cell starts with
    pub forage_per_cell: u32,
}

impl Default for CaveConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            walk_steps: 5,
            min_cells: 5,
            item_chance: 0.30,
            enemy_chance: 0.10,
            forage_per_cell: 2,
        }
    }
}

/// Settlement layout parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlementConfig {
    pub min_width: usize,
    pub max_width: usize,
    pub min_height: usize,
    pub max_height: usize,
    /// Building slots rolled per unit of settlement width
    pub slots_per_width: usize,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            min_width: 3,
            max_width: 5,
            min_height: 4,
            max_height: 7,
            slots_per_width: 2,
        }
    }
}

/// Building and merchant parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildingConfig {
    /// Chance a building is "grand" rather than "humble"
    pub grand_chance: f64,
    /// Chance a weapons merchant stocks something from each weapon tier
    pub weapon_tier_chance: f64,
    /// Chance an armour merchant stocks something from each armour tier
    pub armour_tier_chance: f64,
}

impl Default for BuildingConfig {
    fn default() -> Self {
        Self {
            grand_chance: 0.25,
            weapon_tier_chance: 0.40,
            armour_tier_chance: 0.60,
        }
    }
}

impl WorldConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: WorldConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SludgeError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        let caves = &self.caves;
        if caves.width == 0 || caves.height == 0 {
            return Err(SludgeError::InvalidDimensions {
                width: caves.width,
                height: caves.height,
            });
        }
        if caves.min_cells == 0 || caves.min_cells > caves.width * caves.height {
            return Err(SludgeError::InvalidConfig(format!(
                "caves.min_cells ({}) must be between 1 and {}",
                caves.min_cells,
                caves.width * caves.height
            )));
        }
        if caves.walk_steps == 0 {
            return Err(SludgeError::InvalidConfig(
                "caves.walk_steps must be positive".into(),
            ));
        }

        let s = &self.settlements;
        if s.min_width == 0 || s.min_height < 2 {
            return Err(SludgeError::InvalidConfig(
                "settlements need width >= 1 and height >= 2".into(),
            ));
        }
        if s.min_width > s.max_width || s.min_height > s.max_height {
            return Err(SludgeError::InvalidConfig(format!(
                "settlement ranges inverted: width {}..={}, height {}..={}",
                s.min_width, s.max_width, s.min_height, s.max_height
            )));
        }

        if self.terrain.grass_threshold >= self.terrain.rock_threshold {
            return Err(SludgeError::InvalidConfig(format!(
                "terrain.grass_threshold ({}) should be < terrain.rock_threshold ({})",
                self.terrain.grass_threshold, self.terrain.rock_threshold
            )));
        }
        if self.terrain.octaves == 0 {
            return Err(SludgeError::InvalidConfig(
                "terrain.octaves must be positive".into(),
            ));
        }
        if self.terrain.caves_per_thousand < 0.0 || self.terrain.settlements_per_thousand < 0.0 {
            return Err(SludgeError::InvalidConfig(
                "placement rates must not be negative".into(),
            ));
        }

        let chances = [
            ("terrain.wild_enemy_chance", self.terrain.wild_enemy_chance),
            ("caves.item_chance", caves.item_chance),
            ("caves.enemy_chance", caves.enemy_chance),
            ("buildings.grand_chance", self.buildings.grand_chance),
            ("buildings.weapon_tier_chance", self.buildings.weapon_tier_chance),
            ("buildings.armour_tier_chance", self.buildings.armour_tier_chance),
        ];
        for (name, value) in chances {
            if !(0.0..=1.0).contains(&value) {
                return Err(SludgeError::InvalidConfig(format!(
                    "{} ({}) must be within [0, 1]",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(WorldConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let config = WorldConfig {
            width: 0,
            ..WorldConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SludgeError::InvalidDimensions { width: 0, .. })
        ));
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let mut config = WorldConfig::default();
        config.terrain.grass_threshold = 3.0;
        assert!(matches!(
            config.validate(),
            Err(SludgeError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_probability_out_of_range_rejected() {
        let mut config = WorldConfig::default();
        config.caves.item_chance = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_overrides_defaults() {
        let config = WorldConfig::from_toml_str(
            r#"
            seed = 7
            width = 32

            [caves]
            min_cells = 8
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, 7);
        assert_eq!(config.width, 32);
        assert_eq!(config.height, 32);
        assert_eq!(config.caves.min_cells, 8);
        assert_eq!(config.caves.walk_steps, 5);
        assert_eq!(config.terrain, TerrainConfig::default());
    }

    #[test]
    fn test_load_sample_config_from_file() {
        let path = Path::new("data/world.toml");
        let config = WorldConfig::load(path).expect("Should load data/world.toml");

        // The sample file spells out the built-in defaults
        assert_eq!(config, WorldConfig::default());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = WorldConfig::load(Path::new("data/no_such_world.toml"));
        assert!(matches!(result, Err(SludgeError::IoError(_))));
    }

    #[test]
    fn test_invalid_toml_reports_parse_error() {
        let result = WorldConfig::from_toml_str("width = \"wide\"");
        assert!(matches!(result, Err(SludgeError::TomlError(_))));
    }
}

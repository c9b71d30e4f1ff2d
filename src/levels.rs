//! Data-driven level configuration
//!
//! Levels can come from the built-in table or be loaded from JSON, so
//! tuning passes do not require a rebuild.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{PLAYER_FORWARD_SPEED, SPAWN_ROW_SPACING};
use crate::sim::enemy::EnemyKind;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse level config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("level set contains no levels")]
    Empty,
}

/// How the playfield advances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollMode {
    /// The player drifts forward at a constant rate
    AutoForward,
    /// Vertical movement is under player control
    Free,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelConfig {
    pub name: String,
    pub duration_secs: f64,
    /// Cosmetic palette index for the renderer layer
    pub theme: u8,
    /// Max live count per enemy kind, indexed in [`EnemyKind::ALL`] order
    pub caps: [usize; 3],
    /// Relative spawn weights per enemy kind, same order as `caps`
    pub weights: [f32; 3],
    /// Chance that a spawn row allows heavy enemies
    pub heavy_row_chance: f32,
    pub row_spacing: f32,
    pub obstacle_row_chance: f32,
    pub scroll_mode: ScrollMode,
}

impl LevelConfig {
    /// World distance the player covers over the level's duration
    pub fn total_distance(&self) -> f32 {
        self.duration_secs as f32 * PLAYER_FORWARD_SPEED
    }

    pub fn weight_for(&self, kind: EnemyKind) -> f32 {
        self.weights[kind_index(kind)]
    }

    pub fn cap_for(&self, kind: EnemyKind) -> usize {
        self.caps[kind_index(kind)]
    }
}

pub(crate) fn kind_index(kind: EnemyKind) -> usize {
    EnemyKind::ALL
        .iter()
        .position(|k| *k == kind)
        .unwrap_or(0)
}

/// A non-empty, ordered campaign of levels. Construction goes through
/// [`LevelSet::new`] or [`LevelSet::from_json_str`], both of which
/// reject an empty set, so `get` always has a fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelSet {
    levels: Vec<LevelConfig>,
}

impl LevelSet {
    pub fn new(levels: Vec<LevelConfig>) -> Result<Self, ConfigError> {
        if levels.is_empty() {
            return Err(ConfigError::Empty);
        }
        Ok(Self { levels })
    }

    /// The shipping three-level campaign
    pub fn builtin() -> Self {
        Self {
            levels: vec![
                LevelConfig {
                    name: "Outer Heaps".into(),
                    duration_secs: 60.0,
                    theme: 0,
                    caps: [20, 8, 4],
                    weights: [0.6, 0.25, 0.15],
                    heavy_row_chance: 0.3,
                    row_spacing: SPAWN_ROW_SPACING,
                    obstacle_row_chance: 0.25,
                    scroll_mode: ScrollMode::AutoForward,
                },
                LevelConfig {
                    name: "Compactor Row".into(),
                    duration_secs: 75.0,
                    theme: 1,
                    caps: [24, 12, 6],
                    weights: [0.5, 0.3, 0.2],
                    heavy_row_chance: 0.35,
                    row_spacing: SPAWN_ROW_SPACING,
                    obstacle_row_chance: 0.3,
                    scroll_mode: ScrollMode::AutoForward,
                },
                LevelConfig {
                    name: "The Smelter".into(),
                    duration_secs: 90.0,
                    theme: 2,
                    caps: [28, 14, 8],
                    weights: [0.4, 0.3, 0.3],
                    heavy_row_chance: 0.4,
                    row_spacing: SPAWN_ROW_SPACING,
                    obstacle_row_chance: 0.35,
                    scroll_mode: ScrollMode::AutoForward,
                },
            ],
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let set: LevelSet = serde_json::from_str(json)?;
        if set.levels.is_empty() {
            return Err(ConfigError::Empty);
        }
        Ok(set)
    }

    pub fn all(&self) -> &[LevelConfig] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Out-of-range indexes fall back to the first level rather than
    /// panicking mid-session
    pub fn get(&self, index: usize) -> &LevelConfig {
        self.levels.get(index).unwrap_or_else(|| {
            log::warn!("level index {index} out of range, using level 0");
            &self.levels[0]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_set_is_well_formed() {
        let set = LevelSet::builtin();
        assert_eq!(set.len(), 3);
        for level in set.all() {
            assert!(level.duration_secs > 0.0);
            let weight_sum: f32 = level.weights.iter().sum();
            assert!((weight_sum - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn total_distance_from_duration() {
        let set = LevelSet::builtin();
        let first = set.get(0);
        assert_eq!(first.total_distance(), 60.0 * PLAYER_FORWARD_SPEED);
    }

    #[test]
    fn out_of_range_index_falls_back_to_first() {
        let set = LevelSet::builtin();
        assert_eq!(set.get(99).name, set.get(0).name);
    }

    #[test]
    fn json_round_trip() {
        let set = LevelSet::builtin();
        let json = serde_json::to_string(&set).expect("serializes");
        let parsed = LevelSet::from_json_str(&json).expect("parses back");
        assert_eq!(parsed.len(), set.len());
        assert_eq!(parsed.get(1).name, set.get(1).name);
    }

    #[test]
    fn empty_set_is_rejected() {
        let err = LevelSet::from_json_str(r#"{"levels":[]}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Empty));
        let err = LevelSet::new(Vec::new()).unwrap_err();
        assert!(matches!(err, ConfigError::Empty));
    }

    #[test]
    fn kind_lookup_matches_arrays() {
        let set = LevelSet::builtin();
        let level = set.get(0);
        assert_eq!(level.weight_for(EnemyKind::Raider), level.weights[0]);
        assert_eq!(level.cap_for(EnemyKind::Brute), level.caps[2]);
    }
}

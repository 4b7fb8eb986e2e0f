use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::{Algorithm, DEFAULT_LIVE_PROBABILITY, GridDimensions, LifeLikeRule, MAX_CELLS, MAX_HALF_EXTENT};
use crate::error::{ConfigError, ConfigResult};

/// Settings for a simulation run, loadable from JSON.
///
/// Every field has a default, so a file only needs the keys it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Half-extents (X, Y, Z) of the grid
    pub half_extents: [u32; 3],
    /// Chance of each cell starting live
    pub live_probability: f64,
    /// Rule in `survive/born/states` notation
    pub rule: String,
    /// Palette size; must match the rule's when given
    pub states: Option<u8>,
    /// Seconds between generations
    pub generation_interval: f32,
    /// Seconds a transition takes to settle
    pub animation_duration: f32,
    /// Generations applied silently before the first frame
    pub warmup_generations: usize,
    pub algorithm: Algorithm,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            half_extents: [16, 16, 16],
            live_probability: DEFAULT_LIVE_PROBABILITY,
            rule: "4/4/5".to_owned(),
            states: None,
            generation_interval: 0.5,
            animation_duration: 0.4,
            warmup_generations: 0,
            algorithm: Algorithm::default(),
        }
    }
}

impl SimConfig {
    /// Read and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        info!(path = %path.display(), rule = %config.rule, "loaded config");
        Ok(config)
    }

    pub fn from_json(text: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.half_extents.contains(&0) {
            return Err(ConfigError::Invalid(format!(
                "half extents must be at least 1, got {:?}",
                self.half_extents
            )));
        }
        let [x, y, z] = self.half_extents;
        if GridDimensions::try_new(x, y, z).is_none() {
            return Err(ConfigError::Invalid(format!(
                "half extents {:?} exceed {} per axis or {} cells",
                self.half_extents, MAX_HALF_EXTENT, MAX_CELLS
            )));
        }
        if !(0.0..=1.0).contains(&self.live_probability) {
            return Err(ConfigError::Invalid(format!(
                "live probability {} is outside [0, 1]",
                self.live_probability
            )));
        }
        if !(self.generation_interval > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "generation interval must be positive, got {}",
                self.generation_interval
            )));
        }
        if self.animation_duration < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "animation duration must not be negative, got {}",
                self.animation_duration
            )));
        }

        let rule = LifeLikeRule::parse(&self.rule)
            .inspect_err(|err| warn!(rule = %self.rule, %err, "rejected rule string"))?;
        match self.states {
            Some(states) if states != rule.states() => Err(ConfigError::Invalid(format!(
                "states {} do not match rule {} with {} states",
                states,
                self.rule,
                rule.states()
            ))),
            _ => Ok(()),
        }
    }

    pub fn dimensions(&self) -> GridDimensions {
        let [x, y, z] = self.half_extents;
        GridDimensions::new(x, y, z)
    }

    pub fn parsed_rule(&self) -> ConfigResult<LifeLikeRule> {
        Ok(LifeLikeRule::parse(&self.rule)?)
    }
}

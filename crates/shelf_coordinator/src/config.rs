//! Coordinator configuration (shelf.toml)
//!
//! Every field is optional in the file; missing values fall back to the
//! platform-typical defaults.
//!
//! ```toml
//! touch_slop = 12
//! max_fling_velocity = 6000.0
//! ```

use serde::{Deserialize, Serialize};
use shelf_animation::FlingConfig;
use std::fs;
use std::path::Path;

use crate::error::{Result, ShelfError};

/// Tunables for gesture handling and offset animation
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct CoordinatorConfig {
    /// Pixels of movement before a tracked touch becomes a drag
    #[serde(default = "default_touch_slop")]
    pub touch_slop: i32,
    /// Clamp for released drag velocity (px/s)
    #[serde(default = "default_max_fling_velocity")]
    pub max_fling_velocity: f32,
    /// Releases slower than this (px/s) don't fling
    #[serde(default = "default_min_fling_velocity")]
    pub min_fling_velocity: f32,
    /// Friction of the spline fling model
    #[serde(default = "default_scroll_friction")]
    pub scroll_friction: f32,
    /// Display density
    #[serde(default = "default_density")]
    pub density: f32,
    /// Upper bound for eased offset animations
    #[serde(default = "default_max_offset_animation_ms")]
    pub max_offset_animation_ms: u32,
}

fn default_touch_slop() -> i32 {
    8
}

fn default_max_fling_velocity() -> f32 {
    8000.0
}

fn default_min_fling_velocity() -> f32 {
    50.0
}

fn default_scroll_friction() -> f32 {
    0.015
}

fn default_density() -> f32 {
    1.0
}

fn default_max_offset_animation_ms() -> u32 {
    600
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            touch_slop: default_touch_slop(),
            max_fling_velocity: default_max_fling_velocity(),
            min_fling_velocity: default_min_fling_velocity(),
            scroll_friction: default_scroll_friction(),
            density: default_density(),
            max_offset_animation_ms: default_max_offset_animation_ms(),
        }
    }
}

impl CoordinatorConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CoordinatorConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("loaded coordinator config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.touch_slop < 0 {
            return Err(ShelfError::InvalidConfig(format!(
                "touch_slop must not be negative (got {})",
                self.touch_slop
            )));
        }
        if !self.density.is_finite() || self.density <= 0.0 {
            return Err(ShelfError::InvalidConfig(format!(
                "density must be positive (got {})",
                self.density
            )));
        }
        if !self.scroll_friction.is_finite() || self.scroll_friction <= 0.0 {
            return Err(ShelfError::InvalidConfig(format!(
                "scroll_friction must be positive (got {})",
                self.scroll_friction
            )));
        }
        if !self.max_fling_velocity.is_finite() || self.max_fling_velocity < 0.0 {
            return Err(ShelfError::InvalidConfig(format!(
                "max_fling_velocity must be finite and not negative (got {})",
                self.max_fling_velocity
            )));
        }
        if !self.min_fling_velocity.is_finite()
            || self.min_fling_velocity < 0.0
            || self.min_fling_velocity > self.max_fling_velocity
        {
            return Err(ShelfError::InvalidConfig(format!(
                "fling velocities out of order (min {}, max {})",
                self.min_fling_velocity, self.max_fling_velocity
            )));
        }
        Ok(())
    }

    pub fn fling_config(&self) -> FlingConfig {
        FlingConfig::new(self.scroll_friction, self.density)
    }
}

//! Engine configuration: frame padding, handle geometry, and resize limits.
//!
//! Every field has a default from [`crate::consts`]. Hosts that want to tune
//! the engine without recompiling can call [`EngineConfig::from_env`], which
//! reads `DRAGBOARD_*` variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::consts::{
    COPY_OFFSET, EXTEND_STEP, FRAME_PADDING, HANDLE_HIT_RADIUS, HANDLE_SIZE, MIN_HEIGHT, MIN_WIDTH,
    ROTATE_HANDLE_OFFSET,
};

pub const ENV_PADDING: &str = "DRAGBOARD_PADDING";
pub const ENV_HANDLE_SIZE: &str = "DRAGBOARD_HANDLE_SIZE";
pub const ENV_ROTATE_OFFSET: &str = "DRAGBOARD_ROTATE_OFFSET";
pub const ENV_HANDLE_HIT_RADIUS: &str = "DRAGBOARD_HANDLE_HIT_RADIUS";
pub const ENV_COPY_OFFSET: &str = "DRAGBOARD_COPY_OFFSET";
pub const ENV_MIN_WIDTH: &str = "DRAGBOARD_MIN_WIDTH";
pub const ENV_MIN_HEIGHT: &str = "DRAGBOARD_MIN_HEIGHT";
pub const ENV_EXTEND_STEP: &str = "DRAGBOARD_EXTEND_STEP";
pub const ENV_RESIZE_X: &str = "DRAGBOARD_RESIZE_X";
pub const ENV_RESIZE_Y: &str = "DRAGBOARD_RESIZE_Y";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid number for {var}: {value:?}")]
    InvalidNumber { var: String, value: String },

    #[error("invalid flag for {var}: {value:?} (expected true/false)")]
    InvalidFlag { var: String, value: String },

    #[error("{var} must be finite and non-negative, got {value}")]
    OutOfRange { var: String, value: f64 },
}

/// Tunable geometry for handles, the selection frame, and resize limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Gap between the aggregate selection frame and the objects inside it.
    pub padding: f64,
    /// Edge length of a resize handle.
    pub handle_size: f64,
    /// Distance from the top edge to the rotate handle.
    pub rotate_offset: f64,
    /// Hit slop around each handle.
    pub handle_hit_radius: f64,
    /// Offset applied to each clone on copy.
    pub copy_offset: f64,
    pub min_width: f64,
    pub min_height: f64,
    /// Height added by one surface extend step.
    pub extend_step: f64,
    /// Show the left/right-center handles.
    pub resize_x: bool,
    /// Show the bottom-center handle.
    pub resize_y: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            padding: FRAME_PADDING,
            handle_size: HANDLE_SIZE,
            rotate_offset: ROTATE_HANDLE_OFFSET,
            handle_hit_radius: HANDLE_HIT_RADIUS,
            copy_offset: COPY_OFFSET,
            min_width: MIN_WIDTH,
            min_height: MIN_HEIGHT,
            extend_step: EXTEND_STEP,
            resize_x: true,
            resize_y: true,
        }
    }
}

impl EngineConfig {
    /// Build config from environment variables.
    ///
    /// Optional (defaults from [`crate::consts`]):
    /// - `DRAGBOARD_PADDING`, `DRAGBOARD_HANDLE_SIZE`, `DRAGBOARD_ROTATE_OFFSET`
    /// - `DRAGBOARD_HANDLE_HIT_RADIUS`, `DRAGBOARD_COPY_OFFSET`
    /// - `DRAGBOARD_MIN_WIDTH`, `DRAGBOARD_MIN_HEIGHT`, `DRAGBOARD_EXTEND_STEP`
    /// - `DRAGBOARD_RESIZE_X`, `DRAGBOARD_RESIZE_Y`: `true` (default) or `false`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is present but unparseable or
    /// out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(value) => Some(value),
            Err(_) => None,
        })
    }

    /// Build config from an arbitrary key lookup (env, a settings map, etc.).
    ///
    /// # Errors
    ///
    /// Same as [`EngineConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            padding: parse_f64(&lookup, ENV_PADDING, defaults.padding)?,
            handle_size: parse_f64(&lookup, ENV_HANDLE_SIZE, defaults.handle_size)?,
            rotate_offset: parse_f64(&lookup, ENV_ROTATE_OFFSET, defaults.rotate_offset)?,
            handle_hit_radius: parse_f64(&lookup, ENV_HANDLE_HIT_RADIUS, defaults.handle_hit_radius)?,
            copy_offset: parse_f64(&lookup, ENV_COPY_OFFSET, defaults.copy_offset)?,
            min_width: parse_f64(&lookup, ENV_MIN_WIDTH, defaults.min_width)?,
            min_height: parse_f64(&lookup, ENV_MIN_HEIGHT, defaults.min_height)?,
            extend_step: parse_f64(&lookup, ENV_EXTEND_STEP, defaults.extend_step)?,
            resize_x: parse_flag(&lookup, ENV_RESIZE_X, defaults.resize_x)?,
            resize_y: parse_flag(&lookup, ENV_RESIZE_Y, defaults.resize_y)?,
        };
        config.validate()?;
        tracing::debug!(?config, "engine config loaded");
        Ok(config)
    }

    /// Reject sizes that would make the geometry meaningless.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OutOfRange`] for the first negative or
    /// non-finite field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            (ENV_PADDING, self.padding),
            (ENV_HANDLE_SIZE, self.handle_size),
            (ENV_ROTATE_OFFSET, self.rotate_offset),
            (ENV_HANDLE_HIT_RADIUS, self.handle_hit_radius),
            (ENV_COPY_OFFSET, self.copy_offset),
            (ENV_MIN_WIDTH, self.min_width),
            (ENV_MIN_HEIGHT, self.min_height),
            (ENV_EXTEND_STEP, self.extend_step),
        ];
        for (var, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::OutOfRange { var: var.into(), value });
            }
        }
        Ok(())
    }
}

fn parse_f64<F>(lookup: &F, var: &str, default: f64) -> Result<f64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(default);
    };
    raw.trim()
        .parse::<f64>()
        .map_err(|_| ConfigError::InvalidNumber { var: var.into(), value: raw.clone() })
}

fn parse_flag<F>(lookup: &F, var: &str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag { var: var.into(), value: raw }),
    }
}

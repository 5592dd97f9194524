//! TOML settings for the graph: grid resolution, phase durations, transition
//! mode, starting surface, and camera tuning. Durations accept plain seconds
//! or humantime strings (`"1500ms"`, `"2s"`).

use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::de::{self, Deserializer};
use serde::Deserialize;
use surfaces::FunctionId;

/// Smallest grid edge worth drawing.
pub const MIN_RESOLUTION: u32 = 10;
/// Largest grid edge the renderer pre-sizes its position buffer for.
pub const MAX_RESOLUTION: u32 = 1000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read settings at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// How the next surface is picked when a steady phase ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionMode {
    Cycle,
    Random,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GraphSettings {
    /// Grid edge length; the graph evaluates `resolution^2` points.
    pub resolution: u32,
    /// How long each surface is displayed before a transition starts.
    #[serde(deserialize_with = "deserialize_duration")]
    pub function_duration: Duration,
    /// How long the morph between two surfaces lasts.
    #[serde(deserialize_with = "deserialize_duration")]
    pub transition_duration: Duration,
    pub mode: TransitionMode,
    /// Surface shown at startup; defaults to the first catalog entry.
    #[serde(deserialize_with = "deserialize_function_opt")]
    pub start_function: Option<FunctionId>,
    /// Seed for the random selector; unset means seeded from entropy.
    pub seed: Option<u64>,
    /// Optional FPS cap; unset renders every callback.
    pub fps: Option<f32>,
    pub camera: CameraSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Translation speed in world units per second at full axis deflection.
    pub move_speed: f32,
    /// Initial distance from the look-at target.
    pub distance: f32,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            resolution: 200,
            function_duration: Duration::from_secs(4),
            transition_duration: Duration::from_secs(1),
            mode: TransitionMode::Cycle,
            start_function: None,
            seed: None,
            fps: None,
            camera: CameraSettings::default(),
        }
    }
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            move_speed: 10.0,
            distance: 4.0,
        }
    }
}

impl GraphSettings {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// FPS cap with `0` normalized to uncapped.
    pub fn fps_cap(&self) -> Option<f32> {
        self.fps.filter(|fps| *fps > 0.0)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_RESOLUTION..=MAX_RESOLUTION).contains(&self.resolution) {
            return Err(ConfigError::Invalid(format!(
                "resolution {} outside supported range {}..={}",
                self.resolution, MIN_RESOLUTION, MAX_RESOLUTION
            )));
        }
        if let Some(fps) = self.fps {
            if !fps.is_finite() || fps < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "fps cap must be non-negative, got {fps}"
                )));
            }
        }
        if !self.camera.move_speed.is_finite() || self.camera.move_speed <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "camera move_speed must be positive, got {}",
                self.camera.move_speed
            )));
        }
        if !self.camera.distance.is_finite() || self.camera.distance <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "camera distance must be positive, got {}",
                self.camera.distance
            )));
        }
        Ok(())
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    struct Visitor;
    impl<'de> de::Visitor<'de> for Visitor {
        type Value = Duration;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a duration as number of seconds or human-readable string")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            humantime::parse_duration(v)
                .map_err(|err| E::custom(format!("invalid duration '{v}': {err}")))
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Duration::from_secs(v))
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v < 0 {
                return Err(E::custom("duration must be non-negative"));
            }
            Ok(Duration::from_secs(v as u64))
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v.is_nan() || v.is_sign_negative() {
                return Err(E::custom("duration must be non-negative"));
            }
            Ok(Duration::from_secs_f64(v))
        }
    }

    deserializer.deserialize_any(Visitor)
}

fn deserialize_function_opt<'de, D>(deserializer: D) -> Result<Option<FunctionId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|name| name.parse().map_err(de::Error::custom))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_settings() {
        let settings = GraphSettings::from_toml_str(
            r#"
resolution = 400
function_duration = 2.5
transition_duration = "1500ms"
mode = "random"
start_function = "torus-knot"
seed = 7

[camera]
move_speed = 5.0
distance = 6.0
"#,
        )
        .unwrap();
        assert_eq!(settings.resolution, 400);
        assert_eq!(settings.function_duration, Duration::from_secs_f64(2.5));
        assert_eq!(settings.transition_duration, Duration::from_millis(1500));
        assert_eq!(settings.mode, TransitionMode::Random);
        assert_eq!(settings.start_function, Some(FunctionId::TorusKnot));
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.camera.move_speed, 5.0);
    }

    #[test]
    fn empty_settings_fall_back_to_defaults() {
        let settings = GraphSettings::from_toml_str("").unwrap();
        assert_eq!(settings.resolution, 200);
        assert_eq!(settings.mode, TransitionMode::Cycle);
        assert_eq!(settings.start_function, None);
        assert_eq!(settings.function_duration, Duration::from_secs(4));
    }

    #[test]
    fn zero_durations_are_accepted() {
        let settings =
            GraphSettings::from_toml_str("function_duration = 0\ntransition_duration = 0")
                .unwrap();
        assert_eq!(settings.function_duration, Duration::ZERO);
        assert_eq!(settings.transition_duration, Duration::ZERO);
    }

    #[test]
    fn rejects_out_of_range_resolution() {
        assert!(matches!(
            GraphSettings::from_toml_str("resolution = 4"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GraphSettings::from_toml_str("resolution = 2000"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn rejects_unknown_function_name() {
        assert!(GraphSettings::from_toml_str(r#"start_function = "cube""#).is_err());
    }

    #[test]
    fn zero_fps_is_treated_as_uncapped() {
        let settings = GraphSettings::from_toml_str("fps = 0").unwrap();
        assert_eq!(settings.fps_cap(), None, "fps=0 should map to uncapped");
        let settings = GraphSettings::from_toml_str("fps = 30").unwrap();
        assert_eq!(settings.fps_cap(), Some(30.0));
    }

    #[test]
    fn rejects_negative_fps() {
        assert!(matches!(
            GraphSettings::from_toml_str("fps = -10"),
            Err(ConfigError::Invalid(_))
        ));
    }
}

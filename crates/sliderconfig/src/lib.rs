use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
    #[error("unknown configuration key '{0}'")]
    UnknownKey(String),
    #[error("invalid value '{value}' for '{key}'")]
    BadValue { key: String, value: String },
}

/// Motion and effect tunables. Every field may change between frames.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SliderConfig {
    /// Drag sensitivity multiplier.
    pub speed: f64,
    /// Per-frame easing factor in `(0, 1]`.
    pub ease: f64,
    /// Visibility margin in pixels on both sides of the viewport.
    pub threshold: f64,
    pub rgb_shift: f64,
    pub scale_min: f64,
    pub scale_max: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            speed: 2.0,
            ease: 0.075,
            threshold: 50.0,
            rgb_shift: 0.15,
            scale_min: 0.65,
            scale_max: 1.0,
        }
    }
}

impl SliderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("speed", self.speed),
            ("ease", self.ease),
            ("threshold", self.threshold),
            ("rgb_shift", self.rgb_shift),
            ("scale_min", self.scale_min),
            ("scale_max", self.scale_max),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!("slider.{name} must be finite")));
            }
        }

        if self.ease <= 0.0 || self.ease > 1.0 {
            return Err(ConfigError::Invalid(format!(
                "slider.ease must be within (0, 1]; got {}",
                self.ease
            )));
        }

        if self.speed < 0.0 {
            return Err(ConfigError::Invalid("slider.speed must be >= 0".into()));
        }

        if self.threshold < 0.0 {
            return Err(ConfigError::Invalid("slider.threshold must be >= 0".into()));
        }

        Ok(())
    }

    /// Applies a single `key=value` style assignment, leaving `self` untouched
    /// when the key is unknown or the result would not validate.
    pub fn set(&mut self, key: &str, raw: &str) -> Result<(), ConfigError> {
        let value: f64 = raw.trim().parse().map_err(|_| ConfigError::BadValue {
            key: key.to_string(),
            value: raw.to_string(),
        })?;

        let mut next = *self;
        match normalize_key(key).as_str() {
            "speed" => next.speed = value,
            "ease" => next.ease = value,
            "threshold" => next.threshold = value,
            "rgb_shift" => next.rgb_shift = value,
            "scale_min" => next.scale_min = value,
            "scale_max" => next.scale_max = value,
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }

        next.validate().map_err(|_| ConfigError::BadValue {
            key: key.to_string(),
            value: raw.to_string(),
        })?;
        *self = next;
        Ok(())
    }

    /// Applies `key=value` overrides in order. Malformed entries are logged
    /// and skipped; the remaining ones still apply.
    pub fn apply_overrides<S: AsRef<str>>(&mut self, overrides: &[S]) -> usize {
        let mut applied = 0;
        for entry in overrides {
            let entry = entry.as_ref();
            let Some((key, value)) = entry.split_once('=') else {
                tracing::warn!(entry, "ignoring override without '='");
                continue;
            };
            match self.set(key.trim(), value) {
                Ok(()) => {
                    tracing::debug!(key = key.trim(), value = value.trim(), "applied override");
                    applied += 1;
                }
                Err(err) => tracing::warn!(error = %err, "skipping override"),
            }
        }
        applied
    }
}

fn normalize_key(key: &str) -> String {
    let lowered = key.trim().to_ascii_lowercase().replace('-', "_");
    match lowered.strip_prefix("slider.") {
        Some(rest) => rest.to_string(),
        None => lowered,
    }
}

/// Proportions used by the host to lay out slides relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Slide width as a fraction of the viewport width.
    pub slide_width: f64,
    /// Slide height as a fraction of the viewport height.
    pub slide_height: f64,
    /// Track left offset as a fraction of the viewport width.
    pub track_left: f64,
    /// Distance between slide origins in slide widths.
    pub spacing: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            slide_width: 0.25,
            slide_height: 0.6,
            track_left: 0.1,
            spacing: 1.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct RuntimeConfig {
    #[serde(
        default = "default_frame_interval",
        deserialize_with = "deserialize_duration",
        serialize_with = "serialize_duration"
    )]
    pub frame_interval: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            frame_interval: default_frame_interval(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SlideEntry {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<PathBuf>,
}

impl SlideEntry {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            image: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DeckConfig {
    pub version: u32,
    /// How many times the slide list is laid out back to back.
    #[serde(default = "default_repeat")]
    pub repeat: u32,
    #[serde(default)]
    pub slider: SliderConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
    #[serde(default)]
    pub slides: Vec<SlideEntry>,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            version: 1,
            repeat: default_repeat(),
            slider: SliderConfig::default(),
            layout: LayoutConfig::default(),
            runtime: RuntimeConfig::default(),
            slides: ["Mountains", "Ocean", "Forest", "Desert", "Arctic", "Night Sky"]
                .into_iter()
                .map(SlideEntry::titled)
                .collect(),
        }
    }
}

fn default_repeat() -> u32 {
    3
}

fn default_frame_interval() -> Duration {
    Duration::from_millis(16)
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    struct Visitor;
    impl<'de> de::Visitor<'de> for Visitor {
        type Value = Duration;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a duration as number of milliseconds or human-readable string")
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
            Ok(Duration::from_millis(v))
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v < 0 {
                return Err(E::custom("duration must be non-negative"));
            }
            Ok(Duration::from_millis(v as u64))
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v.is_nan() || v.is_sign_negative() {
                return Err(E::custom("duration must be non-negative"));
            }
            Ok(Duration::from_secs_f64(v / 1000.0))
        }
    }

    deserializer.deserialize_any(Visitor)
}

fn serialize_duration<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&humantime::format_duration(*value).to_string())
}

impl DeckConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let raw: DeckConfig = toml::from_str(input)?;
        raw.validate()?;
        Ok(raw)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|err| ConfigError::Invalid(format!("failed to serialize config: {err}")))
    }

    /// Slides in layout order: the configured list repeated `repeat` times.
    pub fn expanded_slides(&self) -> Vec<SlideEntry> {
        let mut slides = Vec::with_capacity(self.slides.len() * self.repeat as usize);
        for _ in 0..self.repeat {
            slides.extend(self.slides.iter().cloned());
        }
        slides
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != 1 {
            return Err(ConfigError::Invalid(format!(
                "unsupported config version {}; expected 1",
                self.version
            )));
        }

        self.slider.validate()?;

        if self.slides.is_empty() {
            return Err(ConfigError::Invalid(
                "config must define at least one slide".into(),
            ));
        }

        for (index, slide) in self.slides.iter().enumerate() {
            if slide.title.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "slide {index} has an empty title"
                )));
            }
        }

        if self.repeat == 0 {
            return Err(ConfigError::Invalid("repeat must be at least 1".into()));
        }

        let fractions = [
            ("layout.slide_width", self.layout.slide_width),
            ("layout.slide_height", self.layout.slide_height),
        ];
        for (name, value) in fractions {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be within (0, 1]; got {value}"
                )));
            }
        }

        if !(self.layout.track_left.is_finite() && self.layout.track_left >= 0.0) {
            return Err(ConfigError::Invalid(
                "layout.track_left must be a non-negative fraction".into(),
            ));
        }

        if !(self.layout.spacing.is_finite() && self.layout.spacing >= 1.0) {
            return Err(ConfigError::Invalid(
                "layout.spacing must be >= 1 so slides do not overlap".into(),
            ));
        }

        if self.runtime.frame_interval.is_zero() {
            return Err(ConfigError::Invalid(
                "runtime.frame_interval must be greater than zero".into(),
            ));
        }

        Ok(())
    }
}

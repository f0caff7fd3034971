//! Configuration types and defaults

use crate::error::{BindError, BindResult};
use serde::{Deserialize, Serialize};

/// Query used to find the display element when none is configured
pub const DEFAULT_SELECTOR: &str = "video";

/// Which way the camera should face, where the host can choose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacingMode {
    /// Front camera, facing the user
    User,
    /// Rear camera, facing away from the user
    Environment,
}

impl FacingMode {
    /// Value understood by `MediaTrackConstraints.facingMode`
    pub fn as_constraint(&self) -> &'static str {
        match self {
            FacingMode::User => "user",
            FacingMode::Environment => "environment",
        }
    }
}

/// Constraints forwarded with the capture request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConstraints {
    /// Request a video track
    pub video: bool,
    /// Request an audio track
    pub audio: bool,
    /// Ideal frame width in pixels
    pub ideal_width: Option<u32>,
    /// Ideal frame height in pixels
    pub ideal_height: Option<u32>,
    /// Preferred camera orientation
    pub facing_mode: Option<FacingMode>,
}

impl Default for StreamConstraints {
    fn default() -> Self {
        Self::video_only()
    }
}

impl StreamConstraints {
    /// Plain `{ video: true }` request
    pub fn video_only() -> Self {
        Self {
            video: true,
            audio: false,
            ideal_width: None,
            ideal_height: None,
            facing_mode: None,
        }
    }

    /// Whether the video request carries anything beyond `true`
    pub fn has_video_refinements(&self) -> bool {
        self.ideal_width.is_some() || self.ideal_height.is_some() || self.facing_mode.is_some()
    }
}

/// What to do when the element rejects the play command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackPolicy {
    /// Issue play and do not look at the outcome
    Ignore,
    /// Write a diagnostic when play is rejected
    #[default]
    Log,
}

/// Binder configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinderConfig {
    /// Query used to locate the display element
    pub selector: String,
    /// Capture request constraints
    pub constraints: StreamConstraints,
    /// Handling of play rejections
    pub playback_policy: PlaybackPolicy,
    /// Enable debug logging
    pub debug_logging: bool,
}

impl Default for BinderConfig {
    fn default() -> Self {
        Self {
            selector: DEFAULT_SELECTOR.to_string(),
            constraints: StreamConstraints::default(),
            playback_policy: PlaybackPolicy::default(),
            debug_logging: false,
        }
    }
}

impl BinderConfig {
    /// Parse and validate a JSON configuration; missing fields take defaults
    pub fn from_json(json: &str) -> BindResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> BindResult<()> {
        if self.selector.trim().is_empty() {
            return Err(BindError::InvalidConfiguration {
                message: "Display selector must not be empty".to_string(),
            });
        }

        if !self.constraints.video {
            return Err(BindError::InvalidConfiguration {
                message: "Video must be requested".to_string(),
            });
        }

        if self.constraints.ideal_width == Some(0) || self.constraints.ideal_height == Some(0) {
            return Err(BindError::InvalidConfiguration {
                message: "Ideal resolution must be > 0".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_request_video_only() {
        let config = BinderConfig::default();
        assert_eq!(config.selector, "video");
        assert!(config.constraints.video);
        assert!(!config.constraints.audio);
        assert!(!config.constraints.has_video_refinements());
        assert_eq!(config.playback_policy, PlaybackPolicy::Log);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = BinderConfig::from_json(
            r##"{"selector":"#preview","constraints":{"facing_mode":"environment","ideal_width":1280}}"##,
        )
        .unwrap();

        assert_eq!(config.selector, "#preview");
        assert!(config.constraints.video);
        assert_eq!(config.constraints.facing_mode, Some(FacingMode::Environment));
        assert_eq!(config.constraints.ideal_width, Some(1280));
        assert_eq!(config.constraints.ideal_height, None);
        assert_eq!(config.playback_policy, PlaybackPolicy::Log);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let audio_only = BinderConfig {
            constraints: StreamConstraints {
                video: false,
                audio: true,
                ..StreamConstraints::default()
            },
            ..BinderConfig::default()
        };
        assert!(matches!(
            audio_only.validate(),
            Err(BindError::InvalidConfiguration { .. })
        ));

        let blank = BinderConfig {
            selector: "  ".to_string(),
            ..BinderConfig::default()
        };
        assert!(blank.validate().is_err());

        assert!(matches!(
            BinderConfig::from_json(r#"{"constraints":{"ideal_height":0}}"#),
            Err(BindError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            BinderConfig::from_json(r#"{"playback_policy":"shout"}"#),
            Err(BindError::Config { .. })
        ));
    }
}

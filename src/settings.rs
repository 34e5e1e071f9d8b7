use crate::camera::PoseLimits;
use crate::error::ViewerError;
use crate::selection::{Finger, FocusTable};
use crate::CONFY_APP_NAME;
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Tunable constants of the view controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerSettings {
    /// Degrees of yaw/pitch per pixel of drag.
    pub mouse_sensitivity: f32,
    /// Orbit radius change per scroll unit.
    pub zoom_sensitivity: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_pitch: f32,
    pub max_pitch: f32,
    /// Fraction of the remaining gap closed per tick.
    pub smoothing_factor: f32,
    pub snap_epsilon: f32,
    /// Growth per reference frame.
    pub growth_per_frame: f32,
    /// Seconds; growth and spin are scaled by `delta_time / reference_frame_time`.
    pub reference_frame_time: f32,
    pub initial_progress: f32,
    pub nudge_step: f32,
    /// Degrees per reference frame.
    pub celebration_spin_per_frame: f32,
    pub focus: FocusTable,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 0.5,
            zoom_sensitivity: 0.5,
            min_distance: 1.0,
            max_distance: 30.0,
            min_pitch: -89.0,
            max_pitch: 89.0,
            smoothing_factor: 0.05,
            snap_epsilon: 1e-4,
            growth_per_frame: 0.005,
            reference_frame_time: 1.0 / 60.0,
            initial_progress: 0.01,
            nudge_step: 0.2,
            celebration_spin_per_frame: 0.6,
            focus: FocusTable::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsIssue {
    #[error("{field} range is inverted: {min} > {max}")]
    InvertedRange {
        field: &'static str,
        min: f32,
        max: f32,
    },
    #[error("{field} must be positive and finite, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("smoothing factor must be in (0, 1], got {0}")]
    Smoothing(f32),
    #[error("initial progress must be in (0, 1), got {0}")]
    InitialProgress(f32),
    #[error("{field} must be finite")]
    NotFinite { field: String },
    #[error("{pose} pose lies outside the distance/pitch limits")]
    PoseOutOfLimits { pose: String },
}

impl ControllerSettings {
    /// Loads from the per-user config location, falling back to defaults.
    pub fn load() -> Self {
        match confy::load::<Self>(CONFY_APP_NAME, "controller") {
            Ok(settings) => settings.or_default(),
            Err(e) => {
                warn!("failed to load controller settings, using defaults: {e}");
                Self::default()
            }
        }
    }

    pub fn load_path(path: impl AsRef<Path>) -> Result<Self, ViewerError> {
        let settings: Self = confy::load_path(path.as_ref()).map_err(|e| {
            ViewerError::from(e).with_arg("path", path.as_ref().display())
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn store_path(&self, path: impl AsRef<Path>) -> Result<(), ViewerError> {
        confy::store_path(path.as_ref(), self)
            .map_err(|e| ViewerError::from(e).with_arg("path", path.as_ref().display()))
    }

    pub fn limits(&self) -> PoseLimits {
        PoseLimits {
            min_distance: self.min_distance,
            max_distance: self.max_distance,
            min_pitch: self.min_pitch,
            max_pitch: self.max_pitch,
        }
    }

    pub fn validate(&self) -> Result<(), ViewerError> {
        self.check().map_err(|issue| {
            ViewerError::new("settings-invalid")
                .with_arg("reason", &issue)
                .push_std(issue)
        })
    }

    fn or_default(self) -> Self {
        match self.check() {
            Ok(()) => self,
            Err(issue) => {
                warn!("controller settings rejected ({issue}), using defaults");
                Self::default()
            }
        }
    }

    fn check(&self) -> Result<(), SettingsIssue> {
        let positive = [
            ("mouse_sensitivity", self.mouse_sensitivity),
            ("zoom_sensitivity", self.zoom_sensitivity),
            ("min_distance", self.min_distance),
            ("snap_epsilon", self.snap_epsilon),
            ("growth_per_frame", self.growth_per_frame),
            ("reference_frame_time", self.reference_frame_time),
            ("nudge_step", self.nudge_step),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsIssue::NotPositive { field, value });
            }
        }
        if !self.celebration_spin_per_frame.is_finite() {
            return Err(SettingsIssue::NotPositive {
                field: "celebration_spin_per_frame",
                value: self.celebration_spin_per_frame,
            });
        }
        if !self.max_distance.is_finite() {
            return Err(SettingsIssue::NotPositive {
                field: "max_distance",
                value: self.max_distance,
            });
        }
        for (field, value) in [("min_pitch", self.min_pitch), ("max_pitch", self.max_pitch)] {
            if !value.is_finite() {
                return Err(SettingsIssue::NotFinite {
                    field: field.to_string(),
                });
            }
        }
        if !(self.min_distance <= self.max_distance) {
            return Err(SettingsIssue::InvertedRange {
                field: "distance",
                min: self.min_distance,
                max: self.max_distance,
            });
        }
        if !(self.min_pitch <= self.max_pitch) {
            return Err(SettingsIssue::InvertedRange {
                field: "pitch",
                min: self.min_pitch,
                max: self.max_pitch,
            });
        }
        if !(self.smoothing_factor > 0.0 && self.smoothing_factor <= 1.0) {
            return Err(SettingsIssue::Smoothing(self.smoothing_factor));
        }
        if !(self.initial_progress > 0.0 && self.initial_progress < 1.0) {
            return Err(SettingsIssue::InitialProgress(self.initial_progress));
        }

        let overview = &self.focus.overview;
        if !(overview.target.iter().all(|v| v.is_finite()) && overview.yaw.is_finite()) {
            return Err(SettingsIssue::NotFinite {
                field: "overview pose".to_string(),
            });
        }
        for finger in Finger::ALL {
            if !self.focus.focus(finger).target.iter().all(|v| v.is_finite()) {
                return Err(SettingsIssue::NotFinite {
                    field: format!("{finger} target"),
                });
            }
        }

        let limits = self.limits();
        if !limits.contains(&self.focus.overview.to_pose()) {
            return Err(SettingsIssue::PoseOutOfLimits {
                pose: "overview".to_string(),
            });
        }
        for finger in Finger::ALL {
            let distance = self.focus.focus(finger).distance;
            if !(self.min_distance..=self.max_distance).contains(&distance) {
                return Err(SettingsIssue::PoseOutOfLimits {
                    pose: finger.to_string(),
                });
            }
        }
        Ok(())
    }
}

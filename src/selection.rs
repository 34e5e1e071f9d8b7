use crate::camera::CameraPose;
use nalgebra_glm as glm;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The selectable sub-parts of the hand model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const COUNT: usize = 5;

    pub const ALL: [Finger; Finger::COUNT] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    /// Zero-based position in [`Finger::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Index used by the shader, where 0 means the whole hand.
    pub fn shader_index(self) -> i32 {
        self.index() as i32 + 1
    }

    pub fn name(self) -> &'static str {
        match self {
            Finger::Thumb => "thumb",
            Finger::Index => "index",
            Finger::Middle => "middle",
            Finger::Ring => "ring",
            Finger::Pinky => "pinky",
        }
    }
}

impl fmt::Display for Finger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewPose {
    pub target: [f32; 3],
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
}

impl OverviewPose {
    pub fn to_pose(&self) -> CameraPose {
        CameraPose::new(self.target, self.distance, self.yaw, self.pitch)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FingerFocus {
    pub target: [f32; 3],
    pub distance: f32,
}

/// Where the camera looks for each selection.
///
/// The overview carries a full pose; a finger focus only moves the look-at
/// point and orbit radius and keeps the user's current orientation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusTable {
    pub overview: OverviewPose,
    pub fingers: [FingerFocus; Finger::COUNT],
}

impl FocusTable {
    pub fn focus(&self, finger: Finger) -> &FingerFocus {
        &self.fingers[finger.index()]
    }

    /// Applies the focus for `selection` onto `pose`.
    pub fn retarget(&self, selection: Option<Finger>, pose: &mut CameraPose) {
        match selection {
            Some(finger) => {
                let focus = self.focus(finger);
                let [x, y, z] = focus.target;
                pose.target = glm::vec3(x, y, z);
                pose.distance = focus.distance;
            }
            None => *pose = self.overview.to_pose(),
        }
    }
}

impl Default for FocusTable {
    fn default() -> Self {
        let at = |x: f32, y: f32| FingerFocus {
            target: [x, y, 0.0],
            distance: 1.5,
        };
        Self {
            overview: OverviewPose {
                target: [0.0, 0.0, 0.0],
                distance: 13.0,
                yaw: 0.0,
                pitch: 45.0,
            },
            fingers: [
                at(-1.0, -1.5),
                at(-3.0, 3.0),
                at(-4.5, 3.0),
                at(-6.0, 3.0),
                at(-7.2, 1.2),
            ],
        }
    }
}

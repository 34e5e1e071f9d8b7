use nalgebra_glm as glm;

/// Orbit camera pose: a look-at point plus a spherical offset around it.
///
/// Angles are kept in degrees. `yaw` is never wrapped; `pitch` and
/// `distance` are kept inside [`PoseLimits`] by the owner.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraPose {
    pub target: glm::Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
}

impl CameraPose {
    pub fn new(target: [f32; 3], distance: f32, yaw: f32, pitch: f32) -> Self {
        Self {
            target: glm::vec3(target[0], target[1], target[2]),
            distance,
            yaw,
            pitch,
        }
    }

    /// Eye position on the sphere of radius `distance` around `target`.
    pub fn eye(&self) -> glm::Vec3 {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        let offset = glm::vec3(
            pitch.cos() * yaw.sin(),
            pitch.sin(),
            pitch.cos() * yaw.cos(),
        );
        self.target + offset * self.distance
    }

    /// Moves every field a fixed fraction of the way toward `goal`.
    ///
    /// A field snaps onto its goal once it is within `epsilon` or once the
    /// step no longer changes it in f32 precision.
    pub fn approach(&mut self, goal: &CameraPose, factor: f32, epsilon: f32) {
        for i in 0..3 {
            self.target[i] = approach_scalar(self.target[i], goal.target[i], factor, epsilon);
        }
        self.distance = approach_scalar(self.distance, goal.distance, factor, epsilon);
        self.yaw = approach_scalar(self.yaw, goal.yaw, factor, epsilon);
        self.pitch = approach_scalar(self.pitch, goal.pitch, factor, epsilon);
    }

    /// Euclidean distance over all six fields, treating the pose as a point.
    pub fn separation(&self, other: &CameraPose) -> f32 {
        let dt = self.target - other.target;
        let dd = self.distance - other.distance;
        let dy = self.yaw - other.yaw;
        let dp = self.pitch - other.pitch;
        (glm::dot(&dt, &dt) + dd * dd + dy * dy + dp * dp).sqrt()
    }
}

fn approach_scalar(current: f32, goal: f32, factor: f32, epsilon: f32) -> f32 {
    let next = current + (goal - current) * factor;
    if (goal - next).abs() <= epsilon || next == current {
        goal
    } else {
        next
    }
}

/// Clamp ranges for the orbit radius and the pitch angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseLimits {
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_pitch: f32,
    pub max_pitch: f32,
}

impl PoseLimits {
    pub fn clamp(&self, pose: &mut CameraPose) {
        pose.distance = pose.distance.clamp(self.min_distance, self.max_distance);
        pose.pitch = pose.pitch.clamp(self.min_pitch, self.max_pitch);
    }

    pub fn contains(&self, pose: &CameraPose) -> bool {
        (self.min_distance..=self.max_distance).contains(&pose.distance)
            && (self.min_pitch..=self.max_pitch).contains(&pose.pitch)
    }
}

use crate::camera::{CameraPose, DragGesture, PoseLimits};
use crate::decoration::{DecorationProgress, Decorations};
use crate::error::ViewerError;
use crate::frame::FrameSnapshot;
use crate::selection::Finger;
use crate::settings::ControllerSettings;
use log::{debug, info};
use nalgebra_glm as glm;
use std::collections::BTreeSet;

/// Orbit camera, finger selection and decoration growth for one viewer.
///
/// Input handlers mutate the *target* pose; [`ViewController::tick`] eases
/// the displayed pose toward it once per frame and produces the snapshot
/// the renderer consumes.
pub struct ViewController {
    settings: ControllerSettings,
    limits: PoseLimits,
    current: CameraPose,
    target: CameraPose,
    selection: Option<Finger>,
    decorations: Decorations,
    gesture: DragGesture,
}

impl ViewController {
    pub fn new(settings: ControllerSettings) -> Result<Self, ViewerError> {
        settings.validate()?;
        Ok(Self::from_valid(settings))
    }

    fn from_valid(settings: ControllerSettings) -> Self {
        let limits = settings.limits();
        let mut pose = settings.focus.overview.to_pose();
        limits.clamp(&mut pose);
        Self {
            settings,
            limits,
            current: pose.clone(),
            target: pose,
            selection: None,
            decorations: Decorations::new(),
            gesture: DragGesture::new(),
        }
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    pub fn selection(&self) -> Option<Finger> {
        self.selection
    }

    pub fn current_pose(&self) -> &CameraPose {
        &self.current
    }

    pub fn target_pose(&self) -> &CameraPose {
        &self.target
    }

    pub fn decoration(&self) -> DecorationProgress {
        self.decorations.active()
    }

    pub fn completed(&self) -> &BTreeSet<Finger> {
        self.decorations.completed()
    }

    pub fn is_celebrating(&self) -> bool {
        self.decorations.is_celebrating()
    }

    /// True while the next tick would still change the snapshot.
    pub fn is_animating(&self) -> bool {
        self.decorations.active().running
            || self.decorations.is_celebrating()
            || self.current != self.target
    }

    pub fn is_rotating(&self) -> bool {
        self.gesture.is_rotating()
    }

    /// Switches focus to `selection`. Any growth in progress is dropped.
    pub fn select_item(&mut self, selection: Option<Finger>) {
        if selection == self.selection {
            return;
        }
        self.selection = selection;
        self.decorations.reset_active();
        self.retarget();
        match selection {
            Some(finger) => info!("selected {finger}"),
            None => info!("selected whole hand"),
        }
    }

    /// Returns to the overview, restoring its pose even when already there.
    pub fn reset_view(&mut self) {
        if self.selection.is_some() {
            self.select_item(None);
        } else {
            self.retarget();
            info!("view reset to overview");
        }
    }

    /// Starts growth on the selected finger. No-op in overview, while
    /// growing, or on a finger that is already finished.
    pub fn begin_decoration(&mut self) -> bool {
        match self.selection {
            Some(finger) => self
                .decorations
                .begin(finger, self.settings.initial_progress),
            None => false,
        }
    }

    pub fn on_primary_button(&mut self, pressed: bool, cursor: Option<(f64, f64)>) {
        self.gesture.on_button(pressed, cursor);
    }

    /// Feeds a cursor position; rotates only while the gesture is active.
    pub fn on_cursor_moved(&mut self, position: (f64, f64)) -> bool {
        match self.gesture.on_cursor_moved(position) {
            Some((dx, dy)) => {
                self.on_drag_delta(dx, dy);
                true
            }
            None => false,
        }
    }

    /// Orbits the target pose. Ignored unless the rotate gesture is active.
    pub fn on_drag_delta(&mut self, dx: f32, dy: f32) {
        if !self.gesture.is_rotating() || !dx.is_finite() || !dy.is_finite() {
            return;
        }
        let sensitivity = self.settings.mouse_sensitivity;
        self.target.yaw += dx * sensitivity;
        self.target.pitch += dy * sensitivity;
        self.limits.clamp(&mut self.target);
        debug!("orbit target yaw={} pitch={}", self.target.yaw, self.target.pitch);
    }

    pub fn on_scroll(&mut self, amount: f32) {
        if !amount.is_finite() {
            return;
        }
        self.target.distance -= amount * self.settings.zoom_sensitivity;
        self.limits.clamp(&mut self.target);
        debug!("orbit target distance={}", self.target.distance);
    }

    /// Moves the look-at point of the target pose by whole steps.
    pub fn nudge_target(&mut self, steps_x: f32, steps_y: f32) {
        let step = self.settings.nudge_step;
        self.target.target += glm::vec3(steps_x * step, steps_y * step, 0.0);
    }

    /// Advances animation and smoothing by one frame.
    pub fn tick(&mut self, delta_time: f32) -> FrameSnapshot {
        let delta_time = if delta_time.is_finite() {
            delta_time.max(0.0)
        } else {
            0.0
        };
        let frames = delta_time / self.settings.reference_frame_time;

        if let Some(finger) = self.selection {
            self.decorations
                .grow(finger, self.settings.growth_per_frame * frames);
        }
        self.decorations
            .spin(self.settings.celebration_spin_per_frame * frames);

        self.current.approach(
            &self.target,
            self.settings.smoothing_factor,
            self.settings.snap_epsilon,
        );

        self.snapshot()
    }

    /// Render-ready view of the current state without advancing it.
    pub fn snapshot(&self) -> FrameSnapshot {
        let decoration = self.decorations.active();
        FrameSnapshot {
            eye: self.current.eye(),
            look_at: self.current.target,
            up: glm::vec3(0.0, 1.0, 0.0),
            active_item: self.selection,
            progress: decoration.progress,
            growing: decoration.running,
            completed: self.decorations.completed().clone(),
            celebration_angle: self.decorations.spin_angle(),
        }
    }

    fn retarget(&mut self) {
        self.settings
            .focus
            .retarget(self.selection, &mut self.target);
        self.limits.clamp(&mut self.target);
    }
}

impl Default for ViewController {
    fn default() -> Self {
        Self::from_valid(ControllerSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const FRAME: f32 = 1.0 / 60.0;

    #[test]
    fn starts_at_overview() {
        let controller = ViewController::default();
        assert_eq!(controller.selection(), None);
        assert_eq!(controller.current_pose(), controller.target_pose());
        assert_eq!(controller.target_pose().distance, 13.0);
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let settings = ControllerSettings {
            min_pitch: 10.0,
            max_pitch: -10.0,
            ..ControllerSettings::default()
        };
        assert!(ViewController::new(settings).is_err());
    }

    #[test]
    fn selecting_same_item_keeps_growth() {
        let mut controller = ViewController::default();
        controller.select_item(Some(Finger::Middle));
        controller.begin_decoration();
        controller.tick(FRAME);
        let before = controller.decoration();
        controller.select_item(Some(Finger::Middle));
        assert_eq!(controller.decoration(), before);
    }

    #[test]
    fn begin_in_overview_is_ignored() {
        let mut controller = ViewController::default();
        assert!(!controller.begin_decoration());
        assert_eq!(controller.decoration(), DecorationProgress::default());
    }

    #[test]
    fn drag_without_gesture_is_ignored() {
        let mut controller = ViewController::default();
        let before = controller.target_pose().clone();
        controller.on_drag_delta(10.0, 4.0);
        assert!(!controller.is_rotating());
        assert_eq!(*controller.target_pose(), before);
    }

    #[test]
    fn drag_moves_target_not_current() {
        let mut controller = ViewController::default();
        controller.on_primary_button(true, None);
        controller.on_drag_delta(10.0, 0.0);
        assert_abs_diff_eq!(controller.target_pose().yaw, 5.0, epsilon = 1e-6);
        assert_eq!(controller.current_pose().yaw, 0.0);
    }

    #[test]
    fn drag_needs_active_gesture() {
        let mut controller = ViewController::default();
        assert!(!controller.on_cursor_moved((10.0, 10.0)));
        controller.on_primary_button(true, Some((0.0, 0.0)));
        assert!(controller.on_cursor_moved((4.0, -2.0)));
        assert_abs_diff_eq!(controller.target_pose().yaw, 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(controller.target_pose().pitch, 44.0, epsilon = 1e-6);
        controller.on_primary_button(false, None);
        assert!(!controller.on_cursor_moved((40.0, 40.0)));
    }

    #[test]
    fn scroll_zooms_in() {
        let mut controller = ViewController::default();
        controller.on_scroll(2.0);
        assert_abs_diff_eq!(controller.target_pose().distance, 12.0, epsilon = 1e-6);
    }

    #[test]
    fn nudge_moves_look_at_point() {
        let mut controller = ViewController::default();
        controller.nudge_target(-1.0, 1.0);
        let target = controller.target_pose().target;
        assert_abs_diff_eq!(target.x, -0.2, epsilon = 1e-6);
        assert_abs_diff_eq!(target.y, 0.2, epsilon = 1e-6);
    }

    #[test]
    fn reset_view_restores_overview_orientation() {
        let mut controller = ViewController::default();
        controller.on_primary_button(true, None);
        controller.on_drag_delta(40.0, -20.0);
        controller.reset_view();
        assert_eq!(
            *controller.target_pose(),
            controller.settings().focus.overview.to_pose()
        );
    }

    #[test]
    fn reset_view_from_finger_cancels_growth() {
        let mut controller = ViewController::default();
        controller.select_item(Some(Finger::Thumb));
        controller.begin_decoration();
        controller.reset_view();
        assert_eq!(controller.selection(), None);
        assert!(!controller.decoration().running);
    }

    #[test]
    fn snapshot_carries_look_at_and_up() {
        let mut controller = ViewController::default();
        let frame = controller.tick(FRAME);
        assert_eq!(frame.up, glm::vec3(0.0, 1.0, 0.0));
        assert_eq!(frame.look_at, controller.current_pose().target);
        assert_eq!(frame.celebration_angle, None);
    }

    #[test]
    fn negative_delta_time_does_not_regress_growth() {
        let mut controller = ViewController::default();
        controller.select_item(Some(Finger::Index));
        controller.begin_decoration();
        controller.tick(-1.0);
        assert_eq!(controller.decoration().progress, 0.01);
    }

    #[test]
    fn settles_once_pose_reaches_target() {
        let mut controller = ViewController::default();
        assert!(!controller.is_animating());
        controller.on_scroll(4.0);
        assert!(controller.is_animating());
        for _ in 0..2_000 {
            controller.tick(FRAME);
        }
        assert!(!controller.is_animating());
    }

    #[test]
    fn infinite_delta_time_counts_as_zero() {
        let mut controller = ViewController::default();
        for finger in Finger::ALL {
            controller.select_item(Some(finger));
            controller.begin_decoration();
            for _ in 0..400 {
                controller.tick(FRAME);
            }
        }
        let before = controller.snapshot().celebration_angle;
        let frame = controller.tick(f32::INFINITY);
        assert_eq!(frame.celebration_angle, before);
        let frame = controller.tick(f32::NAN);
        assert_eq!(frame.celebration_angle, before);
        assert!(controller.tick(FRAME).celebration_angle.is_some_and(f32::is_finite));
    }
}

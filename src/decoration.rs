use crate::selection::Finger;
use log::info;
use std::collections::BTreeSet;

/// Growth state of the decoration on the currently selected finger.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DecorationProgress {
    pub running: bool,
    pub progress: f32,
}

/// Per-finger decoration state machine: `Idle -> Growing -> Completed`.
///
/// Only one finger grows at a time. Completed fingers never grow again and
/// there is no cancel other than [`Decorations::reset_active`].
#[derive(Debug, Clone, Default)]
pub struct Decorations {
    active: DecorationProgress,
    completed: BTreeSet<Finger>,
    spin_angle: f32,
}

impl Decorations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> DecorationProgress {
        self.active
    }

    pub fn completed(&self) -> &BTreeSet<Finger> {
        &self.completed
    }

    pub fn is_completed(&self, finger: Finger) -> bool {
        self.completed.contains(&finger)
    }

    /// True once every finger has finished.
    pub fn is_celebrating(&self) -> bool {
        self.completed.len() == Finger::COUNT
    }

    /// Spin angle in degrees while celebrating.
    pub fn spin_angle(&self) -> Option<f32> {
        self.is_celebrating().then_some(self.spin_angle)
    }

    pub fn reset_active(&mut self) {
        self.active = DecorationProgress::default();
    }

    /// Starts growth on `finger` at `initial_progress`.
    ///
    /// Ignored while already growing or when the finger is finished.
    pub fn begin(&mut self, finger: Finger, initial_progress: f32) -> bool {
        if self.active.running || self.is_completed(finger) {
            return false;
        }
        self.active = DecorationProgress {
            running: true,
            progress: initial_progress,
        };
        info!("growing decoration on {finger}");
        true
    }

    /// Advances growth by `amount`. Returns the finger when it completes.
    pub fn grow(&mut self, finger: Finger, amount: f32) -> Option<Finger> {
        if !self.active.running {
            return None;
        }

        self.active.progress += amount;
        if self.active.progress <= 1.0 {
            return None;
        }

        self.active = DecorationProgress::default();
        self.completed.insert(finger);
        info!("decoration finished on {finger}");
        if self.is_celebrating() {
            self.spin_angle = 0.0;
            info!("all fingers finished, celebrating");
        }
        Some(finger)
    }

    /// Advances the celebration spin by `degrees`, wrapping into `[0, 360)`.
    pub fn spin(&mut self, degrees: f32) {
        if self.is_celebrating() {
            self.spin_angle = (self.spin_angle + degrees).rem_euclid(360.0);
        }
    }
}

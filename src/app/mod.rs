use crate::controller::ViewController;
use crate::error::ViewerError;
use crate::frame::FrameSnapshot;
use crate::input::{EventResponse, InputRouter};
use crate::settings::ControllerSettings;
use log::trace;
use std::time::Instant;
use winit::event::WindowEvent;

/// One running viewer: the controller plus the bits of host state it
/// needs between events.
pub struct App {
    controller: ViewController,
    input: InputRouter,
    last_frame: Option<Instant>,
}

impl App {
    pub fn new(settings: ControllerSettings) -> Result<Self, ViewerError> {
        Ok(Self {
            controller: ViewController::new(settings)?,
            input: InputRouter::new(),
            last_frame: None,
        })
    }

    pub fn controller(&self) -> &ViewController {
        &self.controller
    }

    pub fn handle_event(&mut self, event: &WindowEvent) -> EventResponse {
        self.input.handle_event(&mut self.controller, event)
    }

    pub fn is_animating(&self) -> bool {
        self.controller.is_animating()
    }

    /// Ticks the controller with the wall-clock time since the last frame.
    ///
    /// The clock restarts after an idle frame, so the first frame after a
    /// pause advances by zero instead of by the whole pause.
    pub fn frame(&mut self) -> FrameSnapshot {
        let now = Instant::now();
        let delta = self
            .last_frame
            .map_or(0.0, |last| now.duration_since(last).as_secs_f32());

        let snapshot = self.controller.tick(delta);
        self.last_frame = self.controller.is_animating().then_some(now);
        trace!(
            "frame dt={delta:.4} eye={:?} uniforms={:?}",
            snapshot.eye,
            snapshot.uniforms()
        );
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_has_zero_delta() {
        let mut app = App::new(ControllerSettings::default()).unwrap();
        let before = app.controller().current_pose().clone();
        let frame = app.frame();
        assert_eq!(frame.look_at, before.target);
        assert_eq!(frame.progress, 0.0);
    }

    #[test]
    fn idle_pause_does_not_count_toward_growth() {
        let mut app = App::new(ControllerSettings::default()).unwrap();
        app.frame();
        assert!(!app.is_animating());

        std::thread::sleep(std::time::Duration::from_millis(50));
        app.controller.select_item(Some(crate::selection::Finger::Thumb));
        app.controller.begin_decoration();
        let frame = app.frame();
        assert_eq!(frame.progress, app.controller().settings().initial_progress);
        assert!(app.is_animating());
    }
}

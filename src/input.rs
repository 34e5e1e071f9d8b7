use crate::controller::ViewController;
use crate::selection::Finger;
use log::debug;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{Key, NamedKey};

/// Pixel deltas from trackpads are scaled to roughly match wheel lines.
const PIXEL_SCROLL_SCALE: f32 = 0.05;

/// Logical key actions understood by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Select(Finger),
    BeginDecoration,
    ResetView,
    Nudge { x: i8, y: i8 },
    Exit,
}

impl Action {
    pub fn from_key(key: &Key) -> Option<Action> {
        match key {
            Key::Character(c) => match c.to_ascii_lowercase().as_str() {
                "a" => Some(Action::Select(Finger::Thumb)),
                "b" => Some(Action::Select(Finger::Index)),
                "c" => Some(Action::Select(Finger::Middle)),
                "d" => Some(Action::Select(Finger::Ring)),
                "e" => Some(Action::Select(Finger::Pinky)),
                "s" => Some(Action::BeginDecoration),
                _ => None,
            },
            Key::Named(NamedKey::Space) => Some(Action::ResetView),
            Key::Named(NamedKey::Escape) => Some(Action::Exit),
            Key::Named(NamedKey::ArrowRight) => Some(Action::Nudge { x: -1, y: 0 }),
            Key::Named(NamedKey::ArrowLeft) => Some(Action::Nudge { x: 1, y: 0 }),
            Key::Named(NamedKey::ArrowUp) => Some(Action::Nudge { x: 0, y: 1 }),
            Key::Named(NamedKey::ArrowDown) => Some(Action::Nudge { x: 0, y: -1 }),
            _ => None,
        }
    }

    /// Nudges follow key repeat; everything else fires once per press.
    pub fn repeats(self) -> bool {
        matches!(self, Action::Nudge { .. })
    }
}

pub struct EventResponse {
    pub repaint: bool,
    pub exit: bool,
}

impl EventResponse {
    fn idle() -> Self {
        Self {
            repaint: false,
            exit: false,
        }
    }

    fn repaint() -> Self {
        Self {
            repaint: true,
            exit: false,
        }
    }
}

/// Translates window events into [`ViewController`] calls.
#[derive(Debug, Default)]
pub struct InputRouter {
    cursor: Option<(f64, f64)>,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_event(
        &mut self,
        controller: &mut ViewController,
        event: &WindowEvent,
    ) -> EventResponse {
        match event {
            WindowEvent::CloseRequested => EventResponse {
                repaint: false,
                exit: true,
            },
            WindowEvent::KeyboardInput { event, .. } => self.on_key(
                controller,
                &event.logical_key,
                event.state == ElementState::Pressed,
                event.repeat,
            ),
            WindowEvent::MouseInput { state, button, .. } => {
                self.on_mouse_button(controller, *button, *state == ElementState::Pressed)
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.on_cursor_moved(controller, (position.x, position.y))
            }
            WindowEvent::MouseWheel { delta, .. } => self.on_wheel(controller, *delta),
            _ => EventResponse::idle(),
        }
    }

    pub fn on_key(
        &mut self,
        controller: &mut ViewController,
        key: &Key,
        pressed: bool,
        repeat: bool,
    ) -> EventResponse {
        let Some(action) = Action::from_key(key) else {
            return EventResponse::idle();
        };
        if !pressed || (repeat && !action.repeats()) {
            return EventResponse::idle();
        }

        debug!("action {action:?}");
        match action {
            Action::Select(finger) => controller.select_item(Some(finger)),
            Action::BeginDecoration => {
                controller.begin_decoration();
            }
            Action::ResetView => controller.reset_view(),
            Action::Nudge { x, y } => controller.nudge_target(x as f32, y as f32),
            Action::Exit => {
                return EventResponse {
                    repaint: false,
                    exit: true,
                };
            }
        }
        EventResponse::repaint()
    }

    pub fn on_mouse_button(
        &mut self,
        controller: &mut ViewController,
        button: MouseButton,
        pressed: bool,
    ) -> EventResponse {
        if button != MouseButton::Left {
            return EventResponse::idle();
        }
        controller.on_primary_button(pressed, self.cursor);
        EventResponse::idle()
    }

    pub fn on_cursor_moved(
        &mut self,
        controller: &mut ViewController,
        position: (f64, f64),
    ) -> EventResponse {
        self.cursor = Some(position);
        if controller.on_cursor_moved(position) {
            EventResponse::repaint()
        } else {
            EventResponse::idle()
        }
    }

    pub fn on_wheel(
        &mut self,
        controller: &mut ViewController,
        delta: MouseScrollDelta,
    ) -> EventResponse {
        let amount = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * PIXEL_SCROLL_SCALE,
        };
        controller.on_scroll(amount);
        EventResponse::repaint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    fn key(c: &str) -> Key {
        Key::Character(c.into())
    }

    #[test]
    fn letters_map_to_fingers_case_insensitively() {
        assert_eq!(Action::from_key(&key("a")), Some(Action::Select(Finger::Thumb)));
        assert_eq!(Action::from_key(&key("E")), Some(Action::Select(Finger::Pinky)));
        assert_eq!(Action::from_key(&key("s")), Some(Action::BeginDecoration));
        assert_eq!(Action::from_key(&key("z")), None);
    }

    #[test]
    fn escape_requests_exit() {
        let mut controller = ViewController::default();
        let mut router = InputRouter::new();
        let response =
            router.on_key(&mut controller, &Key::Named(NamedKey::Escape), true, false);
        assert!(response.exit);
    }

    #[test]
    fn key_release_and_repeat_are_ignored_for_selection() {
        let mut controller = ViewController::default();
        let mut router = InputRouter::new();
        router.on_key(&mut controller, &key("b"), false, false);
        assert_eq!(controller.selection(), None);
        router.on_key(&mut controller, &key("b"), true, true);
        assert_eq!(controller.selection(), None);
        router.on_key(&mut controller, &key("b"), true, false);
        assert_eq!(controller.selection(), Some(Finger::Index));
    }

    #[test]
    fn arrow_repeat_keeps_nudging() {
        let mut controller = ViewController::default();
        let mut router = InputRouter::new();
        let up = Key::Named(NamedKey::ArrowUp);
        router.on_key(&mut controller, &up, true, false);
        router.on_key(&mut controller, &up, true, true);
        assert!((controller.target_pose().target.y - 0.4).abs() < 1e-6);
    }

    #[test]
    fn left_drag_rotates_from_press_position() {
        let mut controller = ViewController::default();
        let mut router = InputRouter::new();
        router.on_cursor_moved(&mut controller, (100.0, 100.0));
        router.on_mouse_button(&mut controller, MouseButton::Left, true);
        let response = router.on_cursor_moved(&mut controller, (110.0, 100.0));
        assert!(response.repaint);
        assert!((controller.target_pose().yaw - 5.0).abs() < 1e-6);
    }

    #[test]
    fn right_button_does_not_rotate() {
        let mut controller = ViewController::default();
        let mut router = InputRouter::new();
        router.on_cursor_moved(&mut controller, (0.0, 0.0));
        router.on_mouse_button(&mut controller, MouseButton::Right, true);
        router.on_cursor_moved(&mut controller, (50.0, 0.0));
        assert_eq!(controller.target_pose().yaw, 0.0);
    }

    #[test]
    fn pixel_scroll_is_scaled_down() {
        let mut controller = ViewController::default();
        let mut router = InputRouter::new();
        router.on_wheel(
            &mut controller,
            MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 40.0)),
        );
        assert!((controller.target_pose().distance - 12.0).abs() < 1e-6);

        router.on_wheel(&mut controller, MouseScrollDelta::LineDelta(0.0, -2.0));
        assert!((controller.target_pose().distance - 13.0).abs() < 1e-6);
    }
}

use log::debug;

/// Tracks the primary-button rotate gesture.
///
/// Cursor motion only produces deltas while the button is held; the first
/// motion after a press is measured from the press position.
#[derive(Debug, Default, Clone)]
pub struct DragGesture {
    rotating: bool,
    last_cursor: Option<(f64, f64)>,
}

impl DragGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_rotating(&self) -> bool {
        self.rotating
    }

    /// Primary button press/release. `cursor` is the pointer position at
    /// the time of the press, if the host knows it.
    pub fn on_button(&mut self, pressed: bool, cursor: Option<(f64, f64)>) {
        self.rotating = pressed;
        self.last_cursor = if pressed { cursor } else { None };
        debug!("rotate gesture {}", if pressed { "started" } else { "ended" });
    }

    /// Returns the drag delta since the previous cursor position, or `None`
    /// when no gesture is active or there is no previous position yet.
    pub fn on_cursor_moved(&mut self, position: (f64, f64)) -> Option<(f32, f32)> {
        if !self.rotating {
            return None;
        }

        let delta = self.last_cursor.map(|last| {
            (
                (position.0 - last.0) as f32,
                (position.1 - last.1) as f32,
            )
        });
        self.last_cursor = Some(position);
        delta
    }
}

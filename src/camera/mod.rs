mod gesture;
mod state;

pub use gesture::DragGesture;
pub use state::{CameraPose, PoseLimits};

pub mod app;
pub mod camera;
pub mod controller;
pub mod decoration;
pub mod error;
pub mod frame;
pub mod input;
pub mod selection;
pub mod settings;

pub use controller::ViewController;
pub use error::ViewerError;
pub use frame::{FrameSnapshot, ShaderUniforms};
pub use selection::Finger;
pub use settings::ControllerSettings;

pub const CONFY_APP_NAME: &str = "nailviz";

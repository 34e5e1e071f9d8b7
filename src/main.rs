use log::{error, info};
use nailviz::app::App;
use nailviz::settings::ControllerSettings;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

struct AppHandler {
    app: Option<App>,
    window: Option<Arc<Window>>,
    settings: ControllerSettings,
}

impl ApplicationHandler for AppHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("Nailviz - Hand Decoration")
            .with_inner_size(winit::dpi::LogicalSize::new(800.0, 600.0));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        match App::new(self.settings.clone()) {
            Ok(app) => self.app = Some(app),
            Err(e) => {
                error!("failed to start viewer: {e}");
                event_loop.exit();
                return;
            }
        }

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let (Some(app), Some(window)) = (&mut self.app, &self.window) else {
            return;
        };

        if let WindowEvent::RedrawRequested = event {
            app.frame();
            if app.is_animating() {
                window.request_redraw();
            }
            return;
        }

        let response = app.handle_event(&event);
        if response.repaint {
            window.request_redraw();
        }
        if response.exit {
            event_loop.exit();
        }
    }

}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let settings = match std::env::args().nth(1) {
        Some(path) => ControllerSettings::load_path(&path)?,
        None => ControllerSettings::load(),
    };

    info!("A/B/C/D/E: select thumb/index/middle/ring/pinky");
    info!("S: start decoration on the selected finger");
    info!("Space: back to whole hand, arrows: move camera target");
    info!("Left drag: orbit, wheel: zoom, Esc: exit");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut handler = AppHandler {
        app: None,
        window: None,
        settings,
    };

    event_loop.run_app(&mut handler)?;

    Ok(())
}

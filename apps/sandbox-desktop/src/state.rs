use std::time::Instant;

use sandbox_camera::{Camera, CameraFrame};
use sandbox_common::{FrameClock, FrameTime, SandboxConfig};
use sandbox_input::{Action, CursorMode, InputCollector, WindowSignal};
use sandbox_render::{RenderSettings, RenderView, Scene};
use sandbox_tools::FrameStats;

/// What the window layer has to do after a frame update.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameUpdate {
    /// New cursor mode to apply to the OS cursor.
    pub cursor: Option<CursorMode>,
    pub resized: Option<(u32, u32)>,
    pub quit: bool,
}

/// Everything the frame loop owns except GPU and window handles.
pub struct AppState {
    pub camera: Camera,
    pub input: InputCollector,
    pub scene: Scene,
    pub settings: RenderSettings,
    pub stats: FrameStats,
    clock: FrameClock,
    time: FrameTime,
}

impl AppState {
    pub fn new(config: &SandboxConfig, now: Instant) -> Self {
        Self {
            camera: Camera::from_settings(&config.camera),
            input: InputCollector::new(),
            scene: Scene::new(config.render.primitive),
            settings: RenderSettings::from_config(
                &config.render,
                config.window.width,
                config.window.height,
            ),
            stats: FrameStats::default(),
            clock: FrameClock::new(now),
            time: FrameTime::default(),
        }
    }

    /// Advance one frame: tick the clock, handle toggles and window signals,
    /// then feed this frame's input to the camera.
    pub fn update(&mut self, now: Instant) -> FrameUpdate {
        let time = self.clock.tick(now);
        self.time = time;
        self.stats.record(time);

        let mut update = FrameUpdate::default();

        let actions: Vec<Action> = self.input.actions().to_vec();
        for action in actions {
            match action {
                Action::ToggleWireframe => {
                    let on = self.settings.toggle_wireframe();
                    tracing::info!("wireframe {}", if on { "on" } else { "off" });
                }
                Action::ToggleCursorMode => {
                    update.cursor = Some(self.input.toggle_cursor_mode());
                }
                Action::Quit => update.quit = true,
            }
        }

        for signal in self.input.signals() {
            match *signal {
                WindowSignal::Resized { width, height } => {
                    self.settings.fit_window(width, height);
                    update.resized = Some((width, height));
                }
                WindowSignal::Quit => update.quit = true,
            }
        }

        let frame = CameraFrame {
            pointer: self.input.pointer_events(),
            movement: self.input.movement(),
            time,
        };
        self.camera.apply_frame(&frame);

        update
    }

    pub fn time(&self) -> FrameTime {
        self.time
    }

    pub fn render_view(&self) -> RenderView {
        RenderView::from_camera(&self.camera, self.settings.aspect_ratio)
    }

    /// Close the frame once it has been presented.
    pub fn finish_frame(&mut self) {
        self.input.finish_frame();
    }
}

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use egui::Context as EguiContext;
use sandbox_assets::AssetFs;
use sandbox_common::SandboxConfig;
use sandbox_input::{CursorMode, InputEvent, Key};
use sandbox_render_wgpu::{RenderError, WgpuRenderer, optional_features, shaders};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, MouseScrollDelta, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

use crate::state::AppState;
use crate::ui;

/// Pixels per wheel "line" on touchpads that report pixel deltas.
const PIXELS_PER_LINE: f64 = 100.0;

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::KeyW => Some(Key::W),
        KeyCode::KeyA => Some(Key::A),
        KeyCode::KeyS => Some(Key::S),
        KeyCode::KeyD => Some(Key::D),
        KeyCode::KeyU => Some(Key::U),
        KeyCode::KeyI => Some(Key::I),
        KeyCode::Escape => Some(Key::Escape),
        _ => None,
    }
}

/// Collector event for a key. Releases pass even when the overlay consumed
/// the event, so no key stays held after the cursor leaves the UI.
fn key_input(code: KeyCode, state: ElementState, consumed_by_ui: bool) -> Option<InputEvent> {
    let key = map_key(code)?;
    let pressed = state == ElementState::Pressed;
    if consumed_by_ui && pressed {
        return None;
    }
    Some(InputEvent::Key { key, pressed })
}

fn wheel_lines(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(p) => (p.y / PIXELS_PER_LINE) as f32,
    }
}

fn apply_cursor_mode(window: &Window, mode: CursorMode) {
    match mode {
        CursorMode::Look => {
            let grabbed = window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
            if let Err(e) = grabbed {
                tracing::warn!("cursor grab unavailable: {e}");
            }
            window.set_cursor_visible(false);
        }
        CursorMode::Ui => {
            if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
                tracing::warn!("cursor release failed: {e}");
            }
            window.set_cursor_visible(true);
        }
    }
}

/// Log the outcome of a shader reload. Returns whether it succeeded.
fn report_reload(result: Result<(), RenderError>) -> bool {
    match result {
        Ok(()) => {
            tracing::info!("all shaders reloaded");
            true
        }
        Err(e) => {
            tracing::error!("error reloading shaders: {e}");
            false
        }
    }
}

/// Window, device and everything created against them.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Gpu {
    fn new(
        event_loop: &ActiveEventLoop,
        config: &SandboxConfig,
        assets: &AssetFs,
        egui_ctx: &EguiContext,
    ) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(config.window.title.clone())
            .with_inner_size(PhysicalSize::new(config.window.width, config.window.height))
            .with_resizable(config.window.resizable);
        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window.clone())
            .context("create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no suitable GPU adapter")?;

        let info = adapter.get_info();
        tracing::info!(
            "adapter: {} ({:?}, {} backend, driver {} {})",
            info.name,
            info.device_type,
            info.backend.to_str(),
            info.driver,
            info.driver_info
        );
        tracing::info!(
            "maximum vertex attributes supported: {}",
            adapter.limits().max_vertex_attributes
        );

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("sandbox_device"),
                required_features: optional_features(adapter.features()),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("create device")?;

        let size = window.inner_size();
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first())
            .copied()
            .context("surface reports no formats")?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: if config.render.vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);
        tracing::info!("surface format: {format:?}, present mode: {:?}", surface_config.present_mode);

        let renderer = WgpuRenderer::new(
            &device,
            &queue,
            format,
            surface_config.width,
            surface_config.height,
            assets,
            config.render.primitive,
        )?;

        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, format, None, 1, false);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config: surface_config,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.renderer.resize(&self.device, width, height);
    }

    fn paint_overlay(
        &mut self,
        ctx: &EguiContext,
        target: &wgpu::TextureView,
        output: egui::FullOutput,
    ) {
        self.egui_winit
            .handle_platform_output(&self.window, output.platform_output);
        let paint_jobs = ctx.tessellate(output.shapes, output.pixels_per_point);
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: output.pixels_per_point,
        };

        for (id, delta) in &output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, delta);
        }
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: target,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.egui_renderer.render(&mut pass, &paint_jobs, &screen);
        }
        self.queue.submit(std::iter::once(encoder.finish()));
        for id in &output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}

/// winit application: owns the frame state and, once resumed, the GPU.
pub struct SandboxApp {
    config: SandboxConfig,
    assets: AssetFs,
    state: AppState,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
    error: Option<anyhow::Error>,
}

impl SandboxApp {
    pub fn new(config: SandboxConfig, assets: AssetFs) -> Self {
        let state = AppState::new(&config, Instant::now());
        Self {
            config,
            assets,
            state,
            gpu: None,
            egui_ctx: EguiContext::default(),
            error: None,
        }
    }

    /// Initialization error raised inside the event loop, if any.
    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        self.error.take()
    }

    fn reload_shaders(&mut self) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        tracing::info!("compiling shaders, please wait...");
        let result = shaders::load_scene_shader(&self.assets)
            .and_then(|source| gpu.renderer.reload_shaders(&gpu.device, &source));
        report_reload(result);
        self.state
            .settings
            .fit_window(gpu.config.width, gpu.config.height);
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let update = self.state.update(Instant::now());
        if update.quit {
            event_loop.exit();
            return;
        }

        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        if let Some((width, height)) = update.resized {
            gpu.resize(width, height);
        }
        if let Some(mode) = update.cursor {
            apply_cursor_mode(&gpu.window, mode);
        }

        let frame = match gpu.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                self.state.finish_frame();
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                self.state.finish_frame();
                return;
            }
        };
        let target = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let view = self.state.render_view();
        gpu.renderer.render(
            &gpu.device,
            &gpu.queue,
            &target,
            &view,
            &self.state.scene,
            self.state.time().elapsed,
            &self.state.settings,
        );

        let mut reload = false;
        if self.state.input.cursor_mode() == CursorMode::Ui {
            let raw_input = gpu.egui_winit.take_egui_input(&gpu.window);
            let supports_wireframe = gpu.renderer.supports_wireframe();
            let state = &mut self.state;
            let output = self.egui_ctx.run(raw_input, |ctx| {
                reload = ui::draw_overlay(ctx, state, supports_wireframe).reload_shaders;
            });
            gpu.paint_overlay(&self.egui_ctx, &target, output);
        }

        frame.present();
        gpu.window.request_redraw();
        self.state.finish_frame();

        if reload {
            self.reload_shaders();
        }
    }
}

impl ApplicationHandler for SandboxApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        match Gpu::new(event_loop, &self.config, &self.assets, &self.egui_ctx) {
            Ok(gpu) => {
                apply_cursor_mode(&gpu.window, self.state.input.cursor_mode());
                self.gpu = Some(gpu);
            }
            Err(e) => {
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(gpu) = self.gpu.as_mut() {
            if self.state.input.cursor_mode() == CursorMode::Ui {
                let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
                if response.consumed {
                    if let WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                physical_key: PhysicalKey::Code(code),
                                state,
                                ..
                            },
                        ..
                    } = &event
                    {
                        if let Some(input) = key_input(*code, *state, true) {
                            self.state.input.push(input);
                        }
                    }
                    return;
                }
            }
        }

        match event {
            WindowEvent::CloseRequested => self.state.input.push(InputEvent::CloseRequested),
            WindowEvent::Resized(size) => self.state.input.push(InputEvent::Resized {
                width: size.width,
                height: size.height,
            }),
            WindowEvent::Focused(false) => self.state.input.push(InputEvent::FocusLost),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => {
                if let Some(input) = key_input(code, state, false) {
                    self.state.input.push(input);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.state.input.push(InputEvent::MouseWheel {
                    delta: wheel_lines(delta),
                });
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.state.input.push(InputEvent::MouseMotion {
                dx: delta.0 as f32,
                dy: delta.1 as f32,
            });
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

//! wgpu glue for the graph: window and event loop, GPU grid evaluation, and
//! instanced point drawing. The core timeline stays outside this crate; the
//! host hands in a callback that produces each frame's [`EvaluationParams`].

mod camera;
mod gpu;

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use transition::EvaluationParams;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowBuilder;

use crate::camera::{AxisInput, FlyCamera};
use crate::gpu::GpuState;

/// Largest grid edge the position buffer is pre-sized for. Hosts must keep
/// requested resolutions at or below this.
pub const MAX_GRID_RESOLUTION: u32 = 1000;

/// Immutable configuration passed to the renderer at start-up.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Window size in physical pixels.
    pub surface_size: (u32, u32),
    /// Optional FPS cap; `None` renders every callback.
    pub target_fps: Option<f32>,
    /// Camera translation speed in world units per second.
    pub camera_move_speed: f32,
    /// Initial camera distance from the graph's center.
    pub camera_distance: f32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            surface_size: (1280, 720),
            target_fps: None,
            camera_move_speed: 10.0,
            camera_distance: 4.0,
        }
    }
}

/// Windowed renderer driving one frame callback per redraw.
pub struct Renderer {
    config: RendererConfig,
}

impl Renderer {
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    /// Runs the event loop until the window closes. `next_frame` is invoked
    /// once per redraw with `(dt, time)` in seconds and must return the
    /// evaluation parameters for that frame.
    pub fn run<F>(self, mut next_frame: F) -> Result<()>
    where
        F: FnMut(f32, f32) -> EvaluationParams + 'static,
    {
        let (width, height) = self.config.surface_size;
        let event_loop = EventLoop::new().context("failed to create event loop")?;
        let window = Arc::new(
            WindowBuilder::new()
                .with_title("gpugraph")
                .with_inner_size(PhysicalSize::new(width.max(1), height.max(1)))
                .build(&event_loop)
                .context("failed to create window")?,
        );

        let mut gpu = GpuState::new(window.clone(), window.inner_size())?;
        let mut camera = FlyCamera::new(self.config.camera_distance, self.config.camera_move_speed);
        let mut input = AxisInput::default();

        let frame_interval = self
            .config
            .target_fps
            .map(|fps| Duration::from_secs_f32(1.0 / fps));
        let started = Instant::now();
        let mut last_frame = started;
        let mut next_due = started;

        tracing::info!(width, height, fps_cap = ?self.config.target_fps, "starting render loop");

        event_loop
            .run(move |event, elwt| match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => elwt.exit(),
                    WindowEvent::Resized(new_size) => gpu.resize(new_size),
                    WindowEvent::KeyboardInput { event, .. } => {
                        handle_key(&event, &mut input, elwt);
                    }
                    WindowEvent::RedrawRequested => {
                        let now = Instant::now();
                        let dt = now.duration_since(last_frame).as_secs_f32();
                        last_frame = now;
                        if let Some(interval) = frame_interval {
                            next_due = now + interval;
                        }

                        let time = now.duration_since(started).as_secs_f32();
                        let params = next_frame(dt, time);
                        debug_assert!(params.resolution <= MAX_GRID_RESOLUTION);

                        camera.update(input.axes(), dt);
                        let view_proj = camera.view_proj(gpu.aspect());

                        match gpu.render(&params, view_proj) {
                            Ok(()) => {}
                            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                                let size = gpu.size();
                                tracing::debug!(?size, "surface lost; reconfiguring");
                                gpu.resize(size);
                            }
                            Err(wgpu::SurfaceError::OutOfMemory) => {
                                tracing::error!("GPU reported out of memory; shutting down");
                                elwt.exit();
                            }
                            Err(err) => {
                                tracing::warn!(%err, "dropped frame");
                            }
                        }
                    }
                    _ => {}
                },
                Event::AboutToWait => match frame_interval {
                    Some(_) if Instant::now() < next_due => {
                        elwt.set_control_flow(ControlFlow::WaitUntil(next_due));
                    }
                    _ => {
                        elwt.set_control_flow(ControlFlow::Poll);
                        window.request_redraw();
                    }
                },
                _ => {}
            })
            .context("event loop terminated abnormally")?;
        Ok(())
    }
}

fn handle_key(event: &KeyEvent, input: &mut AxisInput, elwt: &EventLoopWindowTarget<()>) {
    let held = event.state == ElementState::Pressed;
    match event.physical_key {
        PhysicalKey::Code(KeyCode::KeyW | KeyCode::ArrowUp) => input.set_forward(held),
        PhysicalKey::Code(KeyCode::KeyS | KeyCode::ArrowDown) => input.set_back(held),
        PhysicalKey::Code(KeyCode::KeyA | KeyCode::ArrowLeft) => input.set_left(held),
        PhysicalKey::Code(KeyCode::KeyD | KeyCode::ArrowRight) => input.set_right(held),
        PhysicalKey::Code(KeyCode::Escape) if held => elwt.exit(),
        _ => {}
    }
}

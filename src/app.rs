//! Window creation and the event loop.
//!
//! [`run`] opens a 1000×800 window, prepares the scene, and renders it every
//! frame until the window closes or Escape is pressed.

use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::KeyCode;
use winit::window::{Window, WindowId};

use crate::freelook::FreelookCamera;
use crate::gpu::GpuContext;
use crate::input::Input;
use crate::scene::SceneManager;
use crate::scene_pass::ScenePass;
use glam::Vec3;

/// Window configuration.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Desk Scene".to_string(),
            width: 1000,
            height: 800,
        }
    }
}

/// Everything that exists once the window is up.
struct Running {
    window: Arc<Window>,
    gpu: GpuContext,
    pass: ScenePass,
    scene: SceneManager,
    camera: FreelookCamera,
    input: Input,
    last_frame: Instant,
}

struct App {
    config: AppConfig,
    running: Option<Running>,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .expect("Failed to create window"),
        );

        let gpu = GpuContext::new(window.clone());
        let pass = ScenePass::new(&gpu);
        let scene = SceneManager::prepare(&gpu);
        pass.upload_lights(&gpu, scene.lights());

        let camera = FreelookCamera::new()
            .position(Vec3::new(0.0, 5.0, 12.0))
            .looking_toward(Vec3::new(0.0, -0.5, -2.0))
            .fov(80.0)
            .clip_planes(0.1, 100.0);

        log::info!("scene ready");

        self.running = Some(Running {
            window,
            gpu,
            pass,
            scene,
            camera,
            input: Input::new(),
            last_frame: Instant::now(),
        });
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(state) = self.running.as_mut() else {
            return;
        };

        state.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                state.gpu.resize(size.width, size.height);
                state.pass.ensure_depth_size(&state.gpu);
            }
            WindowEvent::RedrawRequested => {
                if state.input.key_pressed(KeyCode::Escape) {
                    event_loop.exit();
                    return;
                }

                let now = Instant::now();
                let dt = now.duration_since(state.last_frame).as_secs_f32();
                state.last_frame = now;

                state.camera.update(&state.input, dt);

                let output = match state.gpu.surface.get_current_texture() {
                    Ok(output) => output,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = state.window.inner_size();
                        state.gpu.resize(size.width, size.height);
                        state.pass.ensure_depth_size(&state.gpu);
                        return;
                    }
                    Err(wgpu::SurfaceError::Timeout) => return,
                    Err(err) => {
                        log::error!("failed to acquire frame: {err}");
                        event_loop.exit();
                        return;
                    }
                };

                let view = output
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());

                let mut encoder = state
                    .gpu
                    .device
                    .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });

                {
                    let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                        label: Some("Scene Pass"),
                        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        })],
                        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                            view: &state.pass.depth_view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        }),
                        timestamp_writes: None,
                        occlusion_query_set: None,
                    });

                    let draw_calls = state.scene.draw_calls();
                    state.pass.render(
                        &state.gpu,
                        &mut render_pass,
                        &state.camera.camera(),
                        &draw_calls,
                    );
                }

                state.gpu.queue.submit(std::iter::once(encoder.finish()));
                output.present();

                state.input.begin_frame();
                state.window.request_redraw();
            }
            _ => (),
        }
    }
}

/// Open the window and run the scene until it exits.
pub fn run(config: AppConfig) -> anyhow::Result<()> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App {
        config,
        running: None,
    };
    event_loop.run_app(&mut app)?;
    Ok(())
}

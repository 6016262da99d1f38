use std::sync::Arc;

use glam::Vec3;
use tracing::{info, warn};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

mod geometry;
mod renderer;
mod ui;

use geometry::sphere::MAX_DEPTH;
use geometry::{knot, sphere, torus};
use renderer::{GpuState, MeshBuffers, OrbitCamera};
use ui::state::{RebuildErrors, SceneMode};
use ui::{UiActions, UiState, apply_theme, draw_help_overlay, draw_side_panel};

const CURVES_LIGHT_POS: Vec3 = Vec3::new(100.0, 300.0, 200.0);
const SPHERE_LIGHT_POS: Vec3 = Vec3::new(10.0, 10.0, 10.0);

struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    egui_state: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
    egui_ctx: egui::Context,

    curves_camera: OrbitCamera,
    sphere_camera: OrbitCamera,
    ui_state: UiState,
    errors: RebuildErrors,

    shift_held: bool,
    last_vsync_state: bool,
}

impl App {
    fn new() -> Self {
        Self {
            window: None,
            gpu: None,
            egui_state: None,
            egui_renderer: None,
            egui_ctx: egui::Context::default(),

            curves_camera: OrbitCamera::for_curves(),
            sphere_camera: OrbitCamera::for_sphere(),
            ui_state: UiState::default(),
            errors: RebuildErrors::default(),

            shift_held: false,
            last_vsync_state: true,
        }
    }

    fn init_gpu(&mut self, window: Arc<Window>) {
        // Startup parameters come from the defaults, which always pass
        // validation.
        let torus = torus::generate(&self.ui_state.torus).expect("default torus parameters");
        let knot = knot::generate(&self.ui_state.knot).expect("default knot parameters");
        let sphere = sphere::generate(self.ui_state.sphere_depth).expect("default sphere depth");

        let gpu = pollster::block_on(GpuState::new(window.clone(), &torus, &knot, &sphere));

        let egui_state = egui_winit::State::new(
            self.egui_ctx.clone(),
            self.egui_ctx.viewport_id(),
            &window,
            Some(window.scale_factor() as f32),
            None,
            Some(2048),
        );

        let egui_renderer =
            egui_wgpu::Renderer::new(&gpu.device, gpu.config.format, None, 1, false);

        apply_theme(&self.egui_ctx);

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.egui_state = Some(egui_state);
        self.egui_renderer = Some(egui_renderer);
    }

    fn rebuild_torus(&mut self) {
        match torus::generate(&self.ui_state.torus) {
            Ok(mesh) => {
                if let Some(gpu) = &mut self.gpu {
                    info!(vertices = mesh.vertex_count(), "regenerated torus");
                    gpu.torus = MeshBuffers::upload(&gpu.device, &mesh, "Torus");
                }
                self.errors.torus = None;
            }
            Err(e) => {
                warn!(error = %e, "torus parameters rejected");
                self.errors.torus = Some(e.to_string());
            }
        }
    }

    fn rebuild_knot(&mut self) {
        match knot::generate(&self.ui_state.knot) {
            Ok(mesh) => {
                if let Some(gpu) = &mut self.gpu {
                    info!(vertices = mesh.vertex_count(), "regenerated torus knot");
                    gpu.knot = MeshBuffers::upload(&gpu.device, &mesh, "Knot");
                }
                self.errors.knot = None;
            }
            Err(e) => {
                warn!(error = %e, "knot parameters rejected");
                self.errors.knot = Some(e.to_string());
            }
        }
    }

    fn rebuild_sphere(&mut self) {
        match sphere::generate(self.ui_state.sphere_depth) {
            Ok(mesh) => {
                if let Some(gpu) = &mut self.gpu {
                    info!(
                        depth = self.ui_state.sphere_depth,
                        vertices = mesh.vertex_count(),
                        "regenerated sphere"
                    );
                    gpu.sphere = MeshBuffers::upload(&gpu.device, &mesh, "Sphere");
                }
                self.errors.sphere = None;
            }
            Err(e) => {
                warn!(error = %e, "sphere depth rejected");
                self.errors.sphere = Some(e.to_string());
            }
        }
    }

    fn handle_ui_actions(&mut self, actions: UiActions) {
        if actions.rebuild_torus {
            self.rebuild_torus();
        }
        if actions.rebuild_knot {
            self.rebuild_knot();
        }
        if actions.rebuild_sphere {
            self.rebuild_sphere();
        }
    }

    fn render(&mut self) {
        let (Some(window), Some(egui_state)) = (&self.window, &mut self.egui_state) else {
            return;
        };

        let raw_input = egui_state.take_egui_input(window);

        let scene_mode = self.ui_state.scene_mode;
        let last_error = self.errors.for_scene(scene_mode).map(str::to_string);
        let show_help = self.ui_state.show_help;

        let mut ui_actions = UiActions::default();

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            ui_actions = draw_side_panel(
                ctx,
                &mut self.ui_state,
                &mut self.curves_camera,
                &mut self.sphere_camera,
                &last_error,
            );

            if show_help {
                draw_help_overlay(ctx, scene_mode);
            }
        });

        self.handle_ui_actions(ui_actions);

        let Some(gpu) = &mut self.gpu else { return };
        let Some(window) = &self.window else { return };
        let Some(egui_state) = &mut self.egui_state else {
            return;
        };
        let Some(egui_renderer) = &mut self.egui_renderer else {
            return;
        };

        egui_state.handle_platform_output(window, full_output.platform_output);

        if self.ui_state.vsync_enabled != self.last_vsync_state {
            gpu.set_vsync(self.ui_state.vsync_enabled);
            self.last_vsync_state = self.ui_state.vsync_enabled;
        }

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.resize(gpu.size);
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                panic!("Out of GPU memory");
            }
            Err(wgpu::SurfaceError::Timeout) => {
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        match self.ui_state.scene_mode {
            SceneMode::Curves => gpu.update_scene(&self.curves_camera, CURVES_LIGHT_POS),
            SceneMode::Sphere => gpu.update_scene(&self.sphere_camera, SPHERE_LIGHT_POS),
        }

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, delta) in full_output.textures_delta.set {
            egui_renderer.update_texture(&gpu.device, &gpu.queue, id, &delta);
        }

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Main Encoder"),
            });

        egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        match self.ui_state.scene_mode {
            SceneMode::Curves => gpu.render_curves(
                &view,
                &mut encoder,
                self.ui_state.torus_wireframe,
                self.ui_state.knot_wireframe,
            ),
            SceneMode::Sphere => {
                gpu.render_sphere(&view, &mut encoder, self.ui_state.sphere_wireframe)
            }
        }

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let mut render_pass = render_pass.forget_lifetime();
            egui_renderer.render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        for id in full_output.textures_delta.free {
            egui_renderer.free_texture(&id);
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        window.request_redraw();
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if !pressed {
            return;
        }

        match self.ui_state.scene_mode {
            SceneMode::Curves => match key {
                KeyCode::ArrowLeft => self.curves_camera.rotate(0.05),
                KeyCode::ArrowRight => self.curves_camera.rotate(-0.05),
                KeyCode::KeyN => {
                    let delta = if self.shift_held { -5.0 } else { 5.0 };
                    self.curves_camera.zoom(delta);
                }
                KeyCode::KeyT => self.ui_state.torus_wireframe = !self.ui_state.torus_wireframe,
                KeyCode::KeyK => self.ui_state.knot_wireframe = !self.ui_state.knot_wireframe,
                _ => {}
            },
            SceneMode::Sphere => match key {
                KeyCode::KeyA => self.sphere_camera.rotate(-0.05),
                KeyCode::KeyD => self.sphere_camera.rotate(0.05),
                KeyCode::KeyW => self.sphere_camera.zoom(0.1),
                KeyCode::KeyS => self.sphere_camera.zoom(-0.1),
                KeyCode::Equal | KeyCode::NumpadAdd => {
                    if self.ui_state.sphere_depth < MAX_DEPTH {
                        self.ui_state.sphere_depth += 1;
                        self.rebuild_sphere();
                    }
                }
                KeyCode::Minus | KeyCode::NumpadSubtract => {
                    if self.ui_state.sphere_depth > 0 {
                        self.ui_state.sphere_depth -= 1;
                        self.rebuild_sphere();
                    }
                }
                KeyCode::KeyG => self.ui_state.sphere_wireframe = !self.ui_state.sphere_wireframe,
                _ => {}
            },
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let window_attrs = Window::default_attributes()
            .with_title("Shapelab")
            .with_inner_size(PhysicalSize::new(1440, 900));

        let window = Arc::new(event_loop.create_window(window_attrs).unwrap());
        self.init_gpu(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(egui_state) = &mut self.egui_state {
            if let Some(window) = &self.window {
                let response = egui_state.on_window_event(window, &event);
                if response.consumed {
                    return;
                }
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size);
                }
                let (w, h) = (size.width as f32, size.height as f32);
                self.curves_camera.set_aspect(w, h);
                self.sphere_camera.set_aspect(w, h);
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                self.shift_held = modifiers.state().shift_key();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    self.handle_key(key, event.state == ElementState::Pressed);
                }
            }

            WindowEvent::RedrawRequested => {
                self.render();
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("shapelab=info,wgpu=warn")),
        )
        .init();

    let event_loop = EventLoop::new().unwrap();
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app).unwrap();
}

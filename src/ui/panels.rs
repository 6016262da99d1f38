use egui::{Context, RichText, ScrollArea, Ui};

use crate::geometry::sphere::MAX_DEPTH;
use crate::renderer::OrbitCamera;
use crate::ui::state::{SceneMode, UiState};
use crate::ui::theme::*;

#[derive(Default)]
pub struct UiActions {
    pub rebuild_torus: bool,
    pub rebuild_knot: bool,
    pub rebuild_sphere: bool,
}

pub fn draw_side_panel(
    ctx: &Context,
    state: &mut UiState,
    curves_camera: &mut OrbitCamera,
    sphere_camera: &mut OrbitCamera,
    last_error: &Option<String>,
) -> UiActions {
    let mut actions = UiActions::default();

    egui::SidePanel::right("control_panel")
        .min_width(300.0)
        .max_width(380.0)
        .default_width(320.0)
        .frame(egui::Frame::default().fill(BG_PANEL).inner_margin(16.0))
        .show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                ui.heading(RichText::new("Shapelab").strong());
                ui.add_space(4.0);
                ui.label(
                    RichText::new("Parametric mesh viewer")
                        .color(TEXT_MUTED)
                        .size(11.0),
                );
                ui.add_space(16.0);

                section_header(ui, "SCENE");
                ui.horizontal(|ui| {
                    scene_button(ui, state, SceneMode::Curves, "Torus + Knot");
                    scene_button(ui, state, SceneMode::Sphere, "Sphere");
                });
                ui.add_space(16.0);
                ui.separator();
                ui.add_space(12.0);

                match state.scene_mode {
                    SceneMode::Curves => {
                        section_header(ui, "CAMERA");
                        camera_controls(ui, curves_camera, 5.0);
                        ui.add_space(16.0);

                        section_header(ui, "TORUS");
                        let mut changed = false;
                        changed |= segment_slider(
                            ui,
                            "Major segments",
                            &mut state.torus.major_segments,
                            3..=256,
                        );
                        changed |= segment_slider(
                            ui,
                            "Minor segments",
                            &mut state.torus.minor_segments,
                            3..=64,
                        );
                        changed |= radius_drag(ui, "Major radius", &mut state.torus.major_radius);
                        changed |= radius_drag(ui, "Minor radius", &mut state.torus.minor_radius);
                        actions.rebuild_torus = changed;
                        ui.checkbox(&mut state.torus_wireframe, "Wireframe only");
                        ui.add_space(16.0);

                        section_header(ui, "TORUS KNOT");
                        let mut changed = false;
                        changed |= segment_slider(ui, "p", &mut state.knot.p, 1..=15);
                        changed |= segment_slider(ui, "q", &mut state.knot.q, 1..=15);
                        changed |= segment_slider(
                            ui,
                            "Knot segments",
                            &mut state.knot.knot_segments,
                            16..=1024,
                        );
                        changed |= segment_slider(
                            ui,
                            "Tube segments",
                            &mut state.knot.tube_segments,
                            3..=32,
                        );
                        changed |= radius_drag(ui, "Ring radius", &mut state.knot.ring_radius);
                        changed |= radius_drag(ui, "Wave radius", &mut state.knot.wave_radius);
                        changed |= radius_drag(ui, "Tube radius", &mut state.knot.tube_radius);
                        actions.rebuild_knot = changed;
                        ui.checkbox(&mut state.knot_wireframe, "Wireframe only");
                    }
                    SceneMode::Sphere => {
                        section_header(ui, "CAMERA");
                        camera_controls(ui, sphere_camera, 0.1);
                        ui.add_space(16.0);

                        section_header(ui, "SUBDIVISION");
                        ui.horizontal(|ui| {
                            ui.label("Depth:");
                            if ui
                                .add(egui::Slider::new(&mut state.sphere_depth, 0..=MAX_DEPTH))
                                .changed()
                            {
                                actions.rebuild_sphere = true;
                            }
                        });
                        ui.label(
                            RichText::new(format!(
                                "{} vertices",
                                crate::geometry::sphere::vertex_count_for_depth(state.sphere_depth)
                            ))
                            .color(TEXT_MUTED)
                            .size(11.0),
                        );
                        ui.add_space(8.0);
                        ui.checkbox(&mut state.sphere_wireframe, "Wireframe");
                    }
                }

                ui.add_space(16.0);
                ui.separator();
                ui.add_space(12.0);

                section_header(ui, "DISPLAY");
                ui.horizontal(|ui| {
                    ui.checkbox(&mut state.vsync_enabled, "VSync");
                    ui.checkbox(&mut state.show_help, "Key help");
                });

                if let Some(err) = last_error {
                    ui.add_space(12.0);
                    egui::Frame::default()
                        .fill(egui::Color32::from_rgb(40, 18, 18))
                        .stroke(egui::Stroke::new(1.0, ACCENT_RED))
                        .rounding(4.0)
                        .inner_margin(8.0)
                        .show(ui, |ui| {
                            ui.label(RichText::new(err).color(ACCENT_RED).size(11.0));
                        });
                }
            });
        });

    actions
}

fn scene_button(ui: &mut Ui, state: &mut UiState, mode: SceneMode, label: &str) {
    let selected = state.scene_mode == mode;
    let button = egui::Button::new(RichText::new(label).color(if selected {
        egui::Color32::BLACK
    } else {
        TEXT_PRIMARY
    }))
    .fill(if selected { ACCENT_TEAL } else { BG_WIDGET })
    .min_size(egui::vec2(110.0, 32.0));

    if ui.add(button).clicked() {
        state.scene_mode = mode;
    }
}

fn section_header(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).color(TEXT_MUTED).size(11.0).strong());
    ui.add_space(4.0);
}

fn camera_controls(ui: &mut Ui, camera: &mut OrbitCamera, radius_speed: f32) {
    ui.horizontal(|ui| {
        ui.label("Angle:");
        let mut degrees = camera.angle.to_degrees();
        if ui
            .add(egui::Slider::new(&mut degrees, 0.0..=360.0).suffix("\u{b0}"))
            .changed()
        {
            camera.angle = degrees.to_radians();
        }
    });
    ui.horizontal(|ui| {
        ui.label("Radius:");
        ui.add(
            egui::Slider::new(&mut camera.radius, camera.min_radius..=camera.max_radius)
                .drag_value_speed(radius_speed as f64),
        );
    });
}

fn segment_slider(
    ui: &mut Ui,
    label: &str,
    value: &mut u32,
    range: std::ops::RangeInclusive<u32>,
) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        ui.label(format!("{label}:"));
        changed = ui.add(egui::Slider::new(value, range)).changed();
    });
    changed
}

fn radius_drag(ui: &mut Ui, label: &str, value: &mut f32) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        ui.label(format!("{label}:"));
        changed = ui
            .add(egui::DragValue::new(value).speed(1.0).range(0.5..=500.0))
            .changed();
    });
    changed
}

pub fn draw_help_overlay(ctx: &Context, scene_mode: SceneMode) {
    let lines: &[&str] = match scene_mode {
        SceneMode::Curves => &[
            "\u{2190}/\u{2192} - Orbit | n/N - Radius",
            "t - Torus wireframe | k - Knot wireframe",
        ],
        SceneMode::Sphere => &[
            "a/d - Orbit | w/s - Radius",
            "+/- - Subdivision depth | g - Wireframe",
        ],
    };

    egui::Area::new(egui::Id::new("help_overlay"))
        .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(12.0, -12.0))
        .show(ctx, |ui| {
            egui::Frame::default()
                .fill(egui::Color32::from_black_alpha(180))
                .rounding(6.0)
                .inner_margin(10.0)
                .show(ui, |ui| {
                    ui.style_mut().override_font_id =
                        Some(egui::FontId::new(11.0, egui::FontFamily::Monospace));
                    for line in lines {
                        ui.label(RichText::new(*line).color(TEXT_MUTED));
                    }
                });
        });
}

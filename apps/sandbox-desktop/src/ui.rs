use egui::Context as EguiContext;
use sandbox_common::PrimitiveKind;
use sandbox_render::{ASPECT_MAX, ASPECT_MIN};
use sandbox_tools::{
    CameraInspector, CameraTuning, SENSITIVITY_RANGE, SHORTCUTS, SPEED_RANGE, ZOOM_RANGE,
};

use crate::state::AppState;

/// Requests the overlay makes of the GPU layer.
#[derive(Debug, Default)]
pub struct OverlayResponse {
    pub reload_shaders: bool,
}

/// Developer overlay, drawn only while the UI owns the cursor.
pub fn draw_overlay(
    ctx: &EguiContext,
    state: &mut AppState,
    wireframe_supported: bool,
) -> OverlayResponse {
    let mut response = OverlayResponse::default();

    egui::Window::new("Sandbox")
        .default_width(320.0)
        .default_pos([10.0, 10.0])
        .show(ctx, |ui| {
            ui.label(state.stats.to_string());
            ui.separator();

            egui::CollapsingHeader::new("Global Shortcuts")
                .default_open(true)
                .show(ui, |ui| {
                    egui::Grid::new("shortcuts")
                        .striped(true)
                        .num_columns(2)
                        .show(ui, |ui| {
                            ui.strong("Shortcut");
                            ui.strong("Description");
                            ui.end_row();
                            for shortcut in SHORTCUTS {
                                ui.colored_label(egui::Color32::YELLOW, shortcut.keys);
                                ui.label(shortcut.description);
                                ui.end_row();
                            }
                        });
                });

            egui::CollapsingHeader::new("Rendering")
                .default_open(true)
                .show(ui, |ui| {
                    ui.add(
                        egui::Slider::new(
                            &mut state.settings.aspect_ratio,
                            ASPECT_MIN..=ASPECT_MAX,
                        )
                        .text("Aspect Ratio"),
                    );
                    ui.add_enabled(
                        wireframe_supported,
                        egui::Checkbox::new(&mut state.settings.wireframe, "Wireframe (U)"),
                    );
                    egui::ComboBox::from_label("Primitive")
                        .selected_text(state.scene.primitive.label())
                        .show_ui(ui, |ui| {
                            for kind in PrimitiveKind::ALL {
                                ui.selectable_value(&mut state.scene.primitive, kind, kind.label());
                            }
                        });
                    if ui.button("Reload shaders").clicked() {
                        response.reload_shaders = true;
                    }
                });

            egui::CollapsingHeader::new("Camera")
                .default_open(true)
                .show(ui, |ui| {
                    let mut tuning = CameraTuning::capture(&state.camera);
                    ui.add(
                        egui::Slider::new(&mut tuning.zoom, ZOOM_RANGE.0..=ZOOM_RANGE.1)
                            .clamping(egui::SliderClamping::Edits)
                            .text("FOV"),
                    );
                    ui.add(
                        egui::Slider::new(&mut tuning.movement_speed, SPEED_RANGE.0..=SPEED_RANGE.1)
                            .clamping(egui::SliderClamping::Edits)
                            .text("Camera Speed"),
                    );
                    ui.add(
                        egui::Slider::new(
                            &mut tuning.mouse_sensitivity,
                            SENSITIVITY_RANGE.0..=SENSITIVITY_RANGE.1,
                        )
                        .logarithmic(true)
                        .clamping(egui::SliderClamping::Edits)
                        .text("Sensitivity"),
                    );
                    ui.horizontal(|ui| {
                        ui.label("Position");
                        for (axis, value) in ["X: ", "Y: ", "Z: "].iter().zip(&mut tuning.position) {
                            ui.add(egui::DragValue::new(value).prefix(*axis).speed(0.1));
                        }
                    });
                    ui.checkbox(&mut tuning.fps_mode, "FPS mode");
                    ui.checkbox(&mut tuning.explicit_look_at, "Explicit look-at");
                    tuning.apply(&mut state.camera);

                    ui.separator();
                    let summary = CameraInspector::summary(&state.camera);
                    ui.small(format!(
                        "yaw {:.1}  pitch {:.1}  front ({:.2}, {:.2}, {:.2})",
                        summary.yaw, summary.pitch, summary.front[0], summary.front[1], summary.front[2]
                    ));
                });
        });

    response
}

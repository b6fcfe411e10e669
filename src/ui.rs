use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy_egui::{
    egui::{self, Align2, Color32, FontId, RichText},
    EguiContexts, EguiPlugin,
};

use crate::settings::VoyageSettings;
use crate::sim::{ElapsedReadout, Fleet, ResetEvent, RunState, Ship, ToggleRunEvent};

pub struct UiPlugin;
impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .add_systems(Update, (clock_panels, control_panel, caption, help_and_diagnostics));
    }
}

/// `MM:SS.cc`; minutes keep counting past 99.
pub fn format_clock(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let mins = (seconds / 60.0).floor() as u32;
    let secs = (seconds % 60.0).floor() as u32;
    let hundredths = ((seconds % 1.0) * 100.0).floor() as u32;
    format!("{:02}:{:02}.{:02}", mins, secs, hundredths)
}

pub fn format_difference(seconds: f64) -> String {
    format!("+{:.2}s", seconds)
}

fn to_color32(color: Color) -> Color32 {
    let c = color.to_srgba();
    Color32::from_rgb(
        (c.red * 255.0).round() as u8,
        (c.green * 255.0).round() as u8,
        (c.blue * 255.0).round() as u8,
    )
}

fn panel_frame(accent: Color32) -> egui::Frame {
    egui::Frame::none()
        .fill(Color32::from_black_alpha(204))
        .stroke(egui::Stroke::new(1.0, accent.gamma_multiply(0.3)))
        .rounding(8.0)
        .inner_margin(16.0)
}

fn clock_card(ui: &mut egui::Ui, ship: &Ship, seconds: f64) {
    let accent = to_color32(ship.color);
    panel_frame(accent).show(ui, |ui| {
        ui.set_min_width(280.0);
        ui.label(RichText::new(ship.name).color(accent));
        ui.label(
            RichText::new(format_clock(seconds))
                .font(FontId::monospace(36.0))
                .color(accent)
                .strong(),
        );
    });
}

fn clock_panels(
    mut contexts: EguiContexts,
    readout: Res<ElapsedReadout>,
    fleet: Option<Res<Fleet>>,
) {
    let Some(fleet) = fleet else {
        return;
    };
    egui::Area::new("clock_panels".into())
        .anchor(Align2::LEFT_TOP, egui::vec2(32.0, 32.0))
        .show(contexts.ctx_mut(), |ui| {
            ui.spacing_mut().item_spacing.y = 16.0;
            clock_card(ui, &fleet.ship_a, readout.ship_a);
            clock_card(ui, &fleet.ship_b, readout.ship_b);

            let accent = Color32::from_rgb(0xea, 0xb3, 0x08);
            panel_frame(accent).show(ui, |ui| {
                ui.set_min_width(280.0);
                ui.label(RichText::new("Time difference").color(accent));
                ui.label(
                    RichText::new(format_difference(readout.difference()))
                        .font(FontId::monospace(28.0))
                        .color(accent)
                        .strong(),
                );
            });
        });
}

fn control_panel(
    mut contexts: EguiContexts,
    state: Res<State<RunState>>,
    mut ev_toggle: EventWriter<ToggleRunEvent>,
    mut ev_reset: EventWriter<ResetEvent>,
) {
    let start_label = match state.get() {
        RunState::Running => "Pause",
        RunState::Idle => "Start",
    };
    egui::Area::new("control_panel".into())
        .anchor(Align2::RIGHT_TOP, egui::vec2(-32.0, 32.0))
        .show(contexts.ctx_mut(), |ui| {
            let size = egui::vec2(160.0, 40.0);
            if ui.add_sized(size, egui::Button::new(start_label)).clicked() {
                ev_toggle.send(ToggleRunEvent);
            }
            if ui.add_sized(size, egui::Button::new("Reset")).clicked() {
                ev_reset.send(ResetEvent);
            }
        });
}

fn caption(mut contexts: EguiContexts) {
    egui::Area::new("caption".into())
        .anchor(Align2::CENTER_BOTTOM, egui::vec2(0.0, -32.0))
        .show(contexts.ctx_mut(), |ui| {
            panel_frame(Color32::LIGHT_BLUE).show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new("Gravitational time dilation")
                            .color(Color32::LIGHT_BLUE),
                    );
                    ui.label(
                        RichText::new("Ship A runs slow while it crosses the curved region")
                            .small()
                            .color(Color32::GRAY),
                    );
                });
            });
        });
}

fn help_and_diagnostics(
    mut contexts: EguiContexts,
    settings: Res<VoyageSettings>,
    diagnostics: Res<DiagnosticsStore>,
) {
    if settings.show_help {
        egui::Window::new("Help")
            .anchor(Align2::RIGHT_BOTTOM, egui::vec2(-32.0, -32.0))
            .resizable(false)
            .show(contexts.ctx_mut(), |ui| {
                ui.label("Space: Start / Pause");
                ui.label("R: Reset");
                ui.label("H: Toggle Help");
                ui.label("F3: Toggle Diagnostics");
            });
    }

    if settings.show_diagnostics {
        egui::Window::new("Diagnostics").show(contexts.ctx_mut(), |ui| {
            if let Some(fps) = diagnostics.get(&FrameTimeDiagnosticsPlugin::FPS) {
                if let Some(value) = fps.smoothed() {
                    ui.label(format!("FPS: {:.1}", value));
                }
            }
            if let Some(frame_time) = diagnostics.get(&FrameTimeDiagnosticsPlugin::FRAME_TIME) {
                if let Some(value) = frame_time.smoothed() {
                    ui.label(format!("Frame time: {:.2} ms", value));
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_format() {
        assert_eq!(format_clock(0.0), "00:00.00");
        assert_eq!(format_clock(65.5), "01:05.50");
        assert_eq!(format_clock(125.25), "02:05.25");
        assert_eq!(format_clock(3599.75), "59:59.75");
        assert_eq!(format_clock(6000.0), "100:00.00");
    }

    #[test]
    fn clock_truncates_instead_of_rounding() {
        assert_eq!(format_clock(59.999), "00:59.99");
    }

    #[test]
    fn difference_format() {
        assert_eq!(format_difference(0.0), "+0.00s");
        assert_eq!(format_difference(1.25), "+1.25s");
        let readout = ElapsedReadout {
            ship_a: 3.5,
            ship_b: 4.75,
        };
        assert_eq!(format_difference(readout.difference()), "+1.25s");
    }

    #[test]
    fn ship_colors_survive_conversion() {
        let fleet = Fleet::launch();
        assert_eq!(to_color32(fleet.ship_a.color), Color32::from_rgb(0xff, 0x44, 0x66));
        assert_eq!(to_color32(fleet.ship_b.color), Color32::from_rgb(0x44, 0xff, 0x88));
    }
}

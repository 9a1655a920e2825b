//! HUD Plugin
//!
//! The architect console: a status panel on the left (mode, feed health,
//! gesture, frame stats) and a control panel on the right (live tuning
//! sliders, tracking toggles, the manual form button). Spin, scale, and
//! distortion apply immediately; density and field radius shape the layout
//! generated at startup, so the panel flags them as next-run values.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPlugin, EguiPrimaryContextPass};

use tinsel_common::gesture::GestureState;
use tinsel_common::layout::{TreeLayout, SPARKLE_COUNT};
use tinsel_common::mode::{ToggleMode, TreeMode};
use tinsel_common::settings::TreeSettings;
use tinsel_common::stats::FrameStats;

use super::tracking::TrackingState;

const TERMINAL_GREEN: egui::Color32 = egui::Color32::from_rgb(0, 255, 0);
const GOLD: egui::Color32 = egui::Color32::from_rgb(255, 215, 0);
const ALERT_RED: egui::Color32 = egui::Color32::from_rgb(255, 64, 64);
const WARN_YELLOW: egui::Color32 = egui::Color32::from_rgb(255, 200, 0);

// ============================================================================
// Plugin
// ============================================================================

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        // Only add EguiPlugin if not already added
        if !app.is_plugin_added::<EguiPlugin>() {
            app.add_plugins(EguiPlugin::default());
        }

        app.init_resource::<FrameStats>()
            .add_systems(Update, sample_frame_time)
            .add_systems(EguiPrimaryContextPass, draw_hud);
    }
}

// ============================================================================
// Systems
// ============================================================================

fn sample_frame_time(time: Res<Time>, mut stats: ResMut<FrameStats>) {
    stats.push(time.delta_secs());
}

fn draw_hud(
    mut contexts: EguiContexts,
    mode: Res<TreeMode>,
    gesture: Res<GestureState>,
    tracking: Res<TrackingState>,
    layout: Res<TreeLayout>,
    stats: Res<FrameStats>,
    mut settings: ResMut<TreeSettings>,
    mut toggles: MessageWriter<ToggleMode>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };

    draw_status_panel(ctx, &mode, &gesture, &tracking, &layout, &stats);

    // Slider widgets borrow the settings mutably every frame; route the
    // edits through the bypass so auto-save only fires on real changes.
    let edited = draw_control_panel(ctx, settings.bypass_change_detection(), &mut toggles);
    if edited {
        settings.set_changed();
    }
}

fn draw_status_panel(
    ctx: &egui::Context,
    mode: &TreeMode,
    gesture: &GestureState,
    tracking: &TrackingState,
    layout: &TreeLayout,
    stats: &FrameStats,
) {
    egui::SidePanel::left("status_panel")
        .resizable(false)
        .default_width(230.0)
        .show(ctx, |ui| {
            ui.add_space(8.0);
            ui.heading(egui::RichText::new("XMAS ARCHITECT").color(GOLD).monospace());
            ui.separator();

            egui::Grid::new("status_grid")
                .num_columns(2)
                .spacing([40.0, 8.0])
                .show(ui, |ui| {
                    ui.label("MODE");
                    let (text, color) = match mode {
                        TreeMode::Formed => ("FORMED", TERMINAL_GREEN),
                        TreeMode::Chaos => ("CHAOS", ALERT_RED),
                    };
                    ui.label(egui::RichText::new(text).color(color).monospace().strong());
                    ui.end_row();

                    ui.label("FEED");
                    let (feed, color) = match tracking {
                        TrackingState::Running => ("LIVE", TERMINAL_GREEN),
                        TrackingState::Disabled => ("OFF", WARN_YELLOW),
                        TrackingState::Failed { .. } => ("FAULT", ALERT_RED),
                    };
                    ui.label(egui::RichText::new(feed).color(color).monospace());
                    ui.end_row();

                    ui.label("HAND TRACK");
                    let (lock, color) = if gesture.hand_detected() {
                        ("LOCKED", TERMINAL_GREEN)
                    } else {
                        ("SEARCHING", WARN_YELLOW)
                    };
                    ui.label(egui::RichText::new(lock).color(color).monospace());
                    ui.end_row();

                    ui.label("GESTURE");
                    let symbol = format!("{:?}", gesture.kind).to_uppercase();
                    ui.label(egui::RichText::new(symbol).color(GOLD).monospace());
                    ui.end_row();
                });

            if let TrackingState::Failed { message } = tracking {
                ui.add_space(4.0);
                ui.label(egui::RichText::new(message).color(ALERT_RED).small());
            }

            ui.add_space(10.0);
            ui.separator();

            let particles = layout.foliage.len()
                + layout.gold_balls.len()
                + layout.red_balls.len()
                + layout.gifts.len()
                + layout.lights.len()
                + layout.cascade.len()
                + layout.gems.len()
                + layout.bells.len()
                + SPARKLE_COUNT;
            let fps = stats.fps();
            let fps_color = if fps >= 55.0 {
                TERMINAL_GREEN
            } else if fps >= 30.0 {
                WARN_YELLOW
            } else {
                ALERT_RED
            };

            egui::Grid::new("stats_grid")
                .num_columns(2)
                .spacing([40.0, 4.0])
                .show(ui, |ui| {
                    ui.label(egui::RichText::new("PARTICLES").small());
                    ui.label(egui::RichText::new(format!("{particles}")).monospace().small());
                    ui.end_row();

                    ui.label(egui::RichText::new("FPS").small());
                    ui.label(
                        egui::RichText::new(format!("{fps:.0}"))
                            .color(fps_color)
                            .monospace()
                            .small(),
                    );
                    ui.end_row();

                    ui.label(egui::RichText::new("FRAME").small());
                    ui.label(
                        egui::RichText::new(format!("{:.2} ms", stats.avg_frame_ms()))
                            .monospace()
                            .small(),
                    );
                    ui.end_row();
                });
        });
}

/// Draw the right-hand control panel. Returns true when any widget edited
/// the settings.
fn draw_control_panel(
    ctx: &egui::Context,
    settings: &mut TreeSettings,
    toggles: &mut MessageWriter<ToggleMode>,
) -> bool {
    let mut edited = false;

    egui::SidePanel::right("control_panel")
        .resizable(false)
        .default_width(230.0)
        .show(ctx, |ui| {
            ui.add_space(8.0);
            ui.label(egui::RichText::new("CONTROLS").monospace().strong());
            ui.separator();

            egui::Grid::new("controls_grid")
                .num_columns(2)
                .spacing([20.0, 8.0])
                .show(ui, |ui| {
                    ui.label("SPIN");
                    edited |= ui
                        .add(
                            egui::Slider::new(&mut settings.spin, 0.0..=1.0)
                                .show_value(true)
                                .custom_formatter(|v, _| format!("{v:.3}")),
                        )
                        .changed();
                    ui.end_row();

                    ui.label("SCALE");
                    edited |= ui
                        .add(
                            egui::Slider::new(&mut settings.scale, 0.5..=2.0)
                                .show_value(true)
                                .custom_formatter(|v, _| format!("{v:.3}")),
                        )
                        .changed();
                    ui.end_row();

                    ui.label("DISTORTION");
                    edited |= ui
                        .add(
                            egui::Slider::new(&mut settings.distortion, 0.0..=0.02)
                                .show_value(true)
                                .custom_formatter(|v, _| format!("{v:.3}")),
                        )
                        .changed();
                    ui.end_row();

                    ui.label("DENSITY");
                    edited |= ui
                        .add(
                            egui::Slider::new(&mut settings.density, 0.1..=2.0)
                                .show_value(true)
                                .custom_formatter(|v, _| format!("{v:.3}")),
                        )
                        .changed();
                    ui.end_row();

                    ui.label("FIELD RADIUS");
                    edited |= ui
                        .add(
                            egui::Slider::new(&mut settings.field_radius, 10.0..=40.0)
                                .show_value(true)
                                .custom_formatter(|v, _| format!("{v:.1}")),
                        )
                        .changed();
                    ui.end_row();
                });

            ui.label(
                egui::RichText::new("Density and field radius apply on the next run")
                    .small()
                    .weak(),
            );

            ui.add_space(10.0);
            ui.separator();

            edited |= ui
                .checkbox(&mut settings.hand_tracking_enabled, "Hand Tracking")
                .changed();
            edited |= ui
                .checkbox(&mut settings.show_skeleton, "HUD Skeleton")
                .changed();

            ui.add_space(14.0);
            let button = egui::Button::new(
                egui::RichText::new(">> NEXT FORM ⚡").color(TERMINAL_GREEN).monospace(),
            );
            if ui
                .add_sized(egui::vec2(ui.available_width(), 32.0), button)
                .clicked()
            {
                toggles.write(ToggleMode);
            }
        });

    edited
}


//! Skeleton Overlay Plugin
//!
//! Draws the detected hand as a 2D skeleton across the whole window: green
//! bone segments along the landmark connections, red dots on the joints.
//! Landmarks arrive in image-normalized coordinates with the camera's
//! mirroring still applied, so the X axis is flipped here to make the
//! on-screen hand move like a mirror. Immediate-mode drawing means the
//! skeleton vanishes on the first frame without a hand.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPlugin, EguiPrimaryContextPass};

use tinsel_common::gesture::GestureState;
use tinsel_common::hand::{HandLandmarks, HAND_CONNECTIONS, LANDMARK_COUNT};
use tinsel_common::settings::TreeSettings;

const BONE_GREEN: egui::Color32 = egui::Color32::from_rgb(0, 255, 0);
const JOINT_RED: egui::Color32 = egui::Color32::from_rgb(255, 0, 0);
const BONE_WIDTH: f32 = 2.0;
const JOINT_RADIUS: f32 = 3.0;

pub struct OverlayPlugin;

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        // Only add EguiPlugin if not already added
        if !app.is_plugin_added::<EguiPlugin>() {
            app.add_plugins(EguiPlugin::default());
        }

        app.add_systems(EguiPrimaryContextPass, draw_skeleton);
    }
}

fn draw_skeleton(
    mut contexts: EguiContexts,
    settings: Res<TreeSettings>,
    gesture: Res<GestureState>,
) {
    if !settings.show_skeleton {
        return;
    }
    let Some(hand) = &gesture.hand else {
        return;
    };
    let Ok(ctx) = contexts.ctx_mut() else { return };

    let rect = ctx.screen_rect();
    egui::Area::new(egui::Id::new("skeleton_overlay"))
        .fixed_pos(rect.min)
        .order(egui::Order::Background)
        .interactable(false)
        .show(ctx, |ui| {
            ui.allocate_space(rect.size());
            let painter = ui.painter();
            for (a, b) in HAND_CONNECTIONS {
                painter.line_segment(
                    [to_screen(hand, a, rect), to_screen(hand, b, rect)],
                    egui::Stroke::new(BONE_WIDTH, BONE_GREEN),
                );
            }
            for i in 0..LANDMARK_COUNT {
                painter.circle_filled(to_screen(hand, i, rect), JOINT_RADIUS, JOINT_RED);
            }
        });
}

/// Map one landmark from image space to window space, undoing the camera
/// mirror on X.
fn to_screen(hand: &HandLandmarks, index: usize, rect: egui::Rect) -> egui::Pos2 {
    let p = hand.point(index);
    egui::pos2(
        rect.min.x + (1.0 - p.x) * rect.width(),
        rect.min.y + p.y * rect.height(),
    )
}

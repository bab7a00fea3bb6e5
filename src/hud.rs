//! Read-only egui overlay with frame rate, camera and light readouts.

use crate::camera::Camera;
use crate::scene::Scene;

/// Snapshot of the values the overlay displays.
#[derive(Debug, Clone, PartialEq)]
pub struct HudStats {
    pub fps: Option<u32>,
    pub position: [f32; 3],
    pub theta: f32,
    pub phi: f32,
    pub light_color: [f32; 3],
    pub cube_angle: f32,
}

impl HudStats {
    pub fn collect(fps: Option<u32>, camera: &Camera, scene: &Scene) -> Self {
        let position = camera.position();
        let color = scene.light().state().color;
        Self {
            fps,
            position: [position.x, position.y, position.z],
            theta: camera.theta(),
            phi: camera.phi(),
            light_color: [color.x, color.y, color.z],
            cube_angle: scene.cube().angle(),
        }
    }

    /// The overlay's text, one readout per line.
    pub fn lines(&self) -> Vec<String> {
        let fps = self
            .fps
            .map_or_else(|| "measuring...".to_string(), |fps| format!("{fps} fps"));
        let [x, y, z] = self.position;
        let [r, g, b] = self.light_color;
        vec![
            fps,
            format!("position: ({x:.2}, {y:.2}, {z:.2})"),
            format!("yaw: {:.1}°  pitch: {:.1}°", self.theta, self.phi),
            format!("cube angle: {:.1}°", self.cube_angle),
            format!("light color: ({r:.2}, {g:.2}, {b:.2})"),
        ]
    }

    pub fn show(&self, ctx: &egui::Context) {
        egui::Window::new("Stats")
            .resizable(false)
            .collapsible(false)
            .interactable(false)
            .anchor(egui::Align2::LEFT_TOP, egui::vec2(8.0, 8.0))
            .show(ctx, |ui| {
                for line in self.lines() {
                    ui.label(line);
                }
            });
    }
}

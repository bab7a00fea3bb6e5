//! # Configuration
//!
//! Command-line options for the demo. Every option has a default matching the classic
//! 640×480 setup, so running the binary with no arguments gives the standard scene.

use std::path::PathBuf;

use clap::Parser;

use crate::input::DEFAULT_MOUSE_SENSITIVITY;

#[derive(Debug, Clone, PartialEq, Parser)]
#[command(
    name = "lit-cube",
    version,
    about = "A rotating textured cube lit by an orbiting point light"
)]
pub struct Config {
    /// Window width in physical pixels.
    #[arg(long, default_value_t = 640, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Window height in physical pixels.
    #[arg(long, default_value_t = 480, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Directory holding the `lit_*` and `flat_*` WGSL stage files.
    #[arg(long, default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/shaders"))]
    pub shader_dir: PathBuf,

    /// Image applied to the cube.
    #[arg(long, default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/wood.png"))]
    pub texture: PathBuf,

    /// Degrees of rotation per pixel of mouse motion per millisecond of frame time.
    #[arg(long, default_value_t = DEFAULT_MOUSE_SENSITIVITY)]
    pub sensitivity: f32,

    /// Walking speed in world units per millisecond.
    #[arg(long, default_value_t = 0.01)]
    pub move_speed: f32,

    /// Show the statistics overlay at startup (toggle with F1).
    #[arg(long)]
    pub hud: bool,
}

impl Config {
    /// Aspect ratio of the projection, fixed for the whole session.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::parse_from(["lit-cube"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_setup() {
        let config = Config::default();
        assert_eq!((config.width, config.height), (640, 480));
        assert_eq!(config.sensitivity, 0.05);
        assert_eq!(config.move_speed, 0.01);
        assert!(!config.hud);
        assert!(config.shader_dir.ends_with("shaders"));
        assert!(config.texture.ends_with("assets/wood.png"));
    }

    #[test]
    fn parses_overrides() {
        let config = Config::parse_from([
            "lit-cube",
            "--width",
            "800",
            "--height",
            "600",
            "--shader-dir",
            "/tmp/shaders",
            "--sensitivity",
            "0.1",
            "--hud",
        ]);
        assert_eq!(config.width, 800);
        assert_eq!(config.shader_dir, PathBuf::from("/tmp/shaders"));
        assert_eq!(config.sensitivity, 0.1);
        assert!(config.hud);
    }

    #[test]
    fn rejects_zero_window_size() {
        assert!(Config::try_parse_from(["lit-cube", "--width", "0"]).is_err());
        assert!(Config::try_parse_from(["lit-cube", "--height", "0"]).is_err());
        assert!(Config::try_parse_from(["lit-cube", "--width", "1", "--height", "1"]).is_ok());
    }

    #[test]
    fn aspect_ratio_uses_window_size() {
        let config = Config::default();
        assert!((config.aspect_ratio() - 4.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn default_assets_exist() {
        let config = Config::default();
        assert!(config.shader_dir.is_dir());
        assert!(config.texture.is_file());
    }
}

//! Viewer configuration loaded from `data/config/viewer.toml`, with env overrides.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::camera::{CameraConfig, UpAxis};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub camera: CameraConfig,
    pub up_axis: UpAxis,
    /// Background, linear RGBA.
    pub clear_color: [f64; 4],
    /// Directory of matcap images; builtins are used when unset or empty.
    pub matcap_dir: Option<PathBuf>,
    pub builtin_matcap_size: u32,
    /// WGSL file to compile instead of the embedded shader; re-read on rebuild.
    pub shader_path: Option<PathBuf>,
    /// Compile all four pipeline variants at startup.
    pub precompile_pipelines: bool,
    pub vsync: bool,
    /// `vulkan`, `gl`, `metal`, `dx12` or `primary`.
    pub backend: Option<String>,
    /// Points per scroll-wheel line for line-based wheel deltas.
    pub scroll_line_points: f32,
    pub start_wireframe: bool,
    pub start_flat: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            up_axis: UpAxis::Y,
            clear_color: [1.0, 1.0, 1.0, 1.0],
            matcap_dir: None,
            builtin_matcap_size: 256,
            shader_path: None,
            precompile_pipelines: false,
            vsync: true,
            backend: None,
            scroll_line_points: 10.0,
            start_wireframe: false,
            start_flat: false,
        }
    }
}

fn data_root() -> PathBuf {
    let here = Path::new(env!("CARGO_MANIFEST_DIR"));
    let ws = here.join("../../data");
    if ws.is_dir() { ws } else { here.join("data") }
}

pub fn default_path() -> PathBuf {
    data_root().join("config/viewer.toml")
}

/// Load the default config file (if present) and apply env overrides.
pub fn load_default() -> Result<ViewerConfig> {
    load_from(&default_path())
}

/// Load `path` if it exists, otherwise start from defaults; env overrides win.
pub fn load_from(path: &Path) -> Result<ViewerConfig> {
    let mut cfg = if path.is_file() {
        let txt =
            std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        parse(&txt).with_context(|| format!("parse {}", path.display()))?
    } else {
        log::debug!("no config at {}, using defaults", path.display());
        ViewerConfig::default()
    };
    apply_env(&mut cfg);
    Ok(cfg)
}

pub fn parse(txt: &str) -> Result<ViewerConfig> {
    toml::from_str::<ViewerConfig>(txt).context("parse viewer TOML")
}

fn apply_env(cfg: &mut ViewerConfig) {
    if let Some(v) = env_parse::<f32>("MV_FOV_DEG") {
        cfg.camera.fov_y_deg = v;
    }
    if let Some(v) = env_parse::<f32>("MV_ZOOM_BASE")
        && v > 0.0
        && v < 1.0
    {
        cfg.camera.zoom_base = v;
    }
    if let Some(v) = env_parse::<f32>("MV_SCREEN_SCALE") {
        cfg.camera.screen_scale = v;
    }
    if let Ok(v) = std::env::var("MV_MATCAP_DIR") {
        cfg.matcap_dir = Some(PathBuf::from(v));
    }
    if let Ok(v) = std::env::var("MV_SHADER_PATH") {
        cfg.shader_path = Some(PathBuf::from(v));
    }
    if let Ok(v) = std::env::var("MV_BACKEND") {
        cfg.backend = Some(v);
    }
    if std::env::var("MV_NO_VSYNC").map(|v| v != "0").unwrap_or(false) {
        cfg.vsync = false;
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = parse("up_axis = \"z\"\n[camera]\nfov_y_deg = 50.0\n").expect("parse");
        assert_eq!(cfg.up_axis, UpAxis::Z);
        assert_eq!(cfg.camera.fov_y_deg, 50.0);
        assert_eq!(cfg.camera.zoom_base, 0.99);
        assert_eq!(cfg.clear_color, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn bad_toml_is_an_error() {
        assert!(parse("camera = 3").is_err());
    }
}

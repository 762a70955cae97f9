//! Command-line flags; anything set here overrides the config file.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use platform_winit::RunOptions;
use viewer_core::{UpAxis, ViewerConfig, config};

#[derive(Parser, Debug, Clone)]
#[command(name = "matcap-viewer", version)]
#[command(about = "Interactive matcap mesh viewer (OBJ/GLTF/GLB)")]
pub struct Cli {
    /// Mesh to open at startup (.obj, .gltf or .glb); files can also be dropped on the window
    pub path: Option<PathBuf>,

    /// Config file (default: data/config/viewer.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Start in wireframe if supported
    #[arg(long)]
    pub wireframe: bool,

    /// Start with flat (per-face) normals
    #[arg(long)]
    pub flat: bool,

    /// Model axis that points up on screen
    #[arg(long, value_enum)]
    pub up: Option<UpArg>,

    /// Directory of matcap images (png/jpeg)
    #[arg(long, value_name = "DIR")]
    pub matcaps: Option<PathBuf>,

    /// WGSL file to use instead of the built-in shader; re-read on mode toggles
    #[arg(long, value_name = "FILE")]
    pub shader: Option<PathBuf>,

    /// Build all pipeline variants before the first frame
    #[arg(long)]
    pub precompile: bool,

    /// Present without waiting for vblank
    #[arg(long)]
    pub no_vsync: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UpArg {
    X,
    Y,
    Z,
}

impl From<UpArg> for UpAxis {
    fn from(a: UpArg) -> Self {
        match a {
            UpArg::X => UpAxis::X,
            UpArg::Y => UpAxis::Y,
            UpArg::Z => UpAxis::Z,
        }
    }
}

impl Cli {
    /// Flags only ever switch things on; an absent flag keeps the file's value.
    pub fn apply_to(&self, cfg: &mut ViewerConfig) {
        cfg.start_wireframe |= self.wireframe;
        cfg.start_flat |= self.flat;
        cfg.precompile_pipelines |= self.precompile;
        if self.no_vsync {
            cfg.vsync = false;
        }
        if let Some(up) = self.up {
            cfg.up_axis = up.into();
        }
        if let Some(dir) = &self.matcaps {
            cfg.matcap_dir = Some(dir.clone());
        }
        if let Some(shader) = &self.shader {
            cfg.shader_path = Some(shader.clone());
        }
    }

    pub fn load_config(&self) -> anyhow::Result<ViewerConfig> {
        let mut cfg = match &self.config {
            Some(p) => config::load_from(p)?,
            None => config::load_default()?,
        };
        self.apply_to(&mut cfg);
        Ok(cfg)
    }

    pub fn into_run_options(self) -> anyhow::Result<RunOptions> {
        let config = self.load_config()?;
        Ok(RunOptions {
            config,
            mesh: self.path,
        })
    }
}

use clap::Parser;
use matcap_viewer::cli::Cli;
use viewer_core::{UpAxis, ViewerConfig};

#[test]
fn bare_invocation_keeps_config_values() {
    let cli = Cli::try_parse_from(["matcap-viewer"]).expect("parse");
    assert!(cli.path.is_none());
    let mut cfg = ViewerConfig {
        start_flat: true,
        ..ViewerConfig::default()
    };
    cli.apply_to(&mut cfg);
    assert!(cfg.start_flat);
    assert!(!cfg.start_wireframe);
    assert!(cfg.vsync);
}

#[test]
fn flags_override_config() {
    let cli = Cli::try_parse_from([
        "matcap-viewer",
        "bunny.obj",
        "--wireframe",
        "--flat",
        "--up",
        "z",
        "--matcaps",
        "caps",
        "--shader",
        "s.wgsl",
        "--precompile",
        "--no-vsync",
    ])
    .expect("parse");
    assert_eq!(cli.path.as_deref(), Some(std::path::Path::new("bunny.obj")));
    let mut cfg = ViewerConfig::default();
    cli.apply_to(&mut cfg);
    assert!(cfg.start_wireframe && cfg.start_flat && cfg.precompile_pipelines);
    assert!(!cfg.vsync);
    assert_eq!(cfg.up_axis, UpAxis::Z);
    assert_eq!(cfg.matcap_dir.as_deref(), Some(std::path::Path::new("caps")));
    assert_eq!(cfg.shader_path.as_deref(), Some(std::path::Path::new("s.wgsl")));
}

#[test]
fn unknown_up_axis_is_rejected() {
    assert!(Cli::try_parse_from(["matcap-viewer", "--up", "w"]).is_err());
}

#[test]
fn config_file_is_read_then_flags_applied() {
    let dir = tempfile::tempdir().expect("tmp");
    let path = dir.path().join("viewer.toml");
    std::fs::write(&path, "builtin_matcap_size = 64\nstart_flat = true\n").expect("write");
    let cli = Cli::try_parse_from([
        "matcap-viewer",
        "--config",
        path.to_str().expect("utf8"),
        "--wireframe",
    ])
    .expect("parse");
    let opts = cli.into_run_options().expect("options");
    assert_eq!(opts.config.builtin_matcap_size, 64);
    assert!(opts.config.start_flat && opts.config.start_wireframe);
    assert!(opts.mesh.is_none());
}

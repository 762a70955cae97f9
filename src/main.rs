use clap::Parser;
use matcap_viewer::cli::Cli;
use matcap_viewer::platform_winit;

fn main() {
    // Suppress noisy GPU backend logs by default; honor RUST_LOG if set.
    let default = "info,matcap_viewer=info,wgpu_hal=off,wgpu_core=off,wgpu=off,naga=off";
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp_secs()
        .try_init();
    let cli = Cli::parse();
    let opts = match cli.into_run_options() {
        Ok(o) => o,
        Err(e) => {
            log::error!("config: {e:#}");
            std::process::exit(2);
        }
    };
    if let Err(e) = platform_winit::run(opts) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

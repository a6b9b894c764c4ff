use galaxy::GalaxyViewer;

fn main() {
    // RUST_LOG=debug for per-regeneration and fps output
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = GalaxyViewer::new().run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

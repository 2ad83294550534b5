use anyhow::Result;
use renderer::{DemoConfig, Renderer, ShaderSource};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

pub fn run(_args: Cli) -> Result<()> {
    initialise_tracing();

    let config = DemoConfig::default();
    tracing::debug!(
        vertex = %describe(&config.shaders.vertex),
        fragment = %describe(&config.shaders.fragment),
        gui = config.gui_enabled,
        "starting demo"
    );

    let mut renderer = Renderer::new(config);
    renderer.run()
}

fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn describe(source: &ShaderSource) -> String {
    match source {
        ShaderSource::Builtin => "builtin".to_owned(),
        ShaderSource::File(path) => path.display().to_string(),
    }
}

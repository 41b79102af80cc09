//! Config command handlers.

use anyhow::{Context, Result};
use chainfind_core::config;

pub fn path() {
    println!("{}", config::paths::config_path().display());
}

pub fn init() -> Result<()> {
    let config_path = config::paths::config_path();
    config::Config::init(&config_path)
        .with_context(|| format!("init config at {}", config_path.display()))?;
    println!("Created config at {}", config_path.display());
    Ok(())
}

pub fn show(config: &config::Config) -> Result<()> {
    let toml = toml::to_string_pretty(config).context("serialize config")?;
    print!("{toml}");
    Ok(())
}

pub fn set_model(model: &str) -> Result<()> {
    let config_path = config::paths::config_path();
    config::Config::save_model_to(&config_path, model)
        .with_context(|| format!("save model to {}", config_path.display()))?;
    println!("Model set to {model}");
    Ok(())
}

pub fn set_posts_backend(backend: config::PostsBackend) -> Result<()> {
    let config_path = config::paths::config_path();
    config::Config::save_posts_backend_to(&config_path, backend)
        .with_context(|| format!("save posts backend to {}", config_path.display()))?;
    println!("Posts backend set to {}", backend.display_name());
    Ok(())
}

//! config command - Get, set, or list configuration values

use crate::core::config::{self, Config};
use crate::engine::Context;
use anyhow::{Context as _, Result};

/// Get a configuration value.
pub fn get(ctx: &Context, key: &str) -> Result<()> {
    let value = ctx.config.get(key)?;
    println!("{}", value);
    Ok(())
}

/// Set a configuration value in the user config file.
///
/// Writes to the file the user config was loaded from, or to the canonical
/// location if there was none.
pub fn set(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let mut user = ctx.config.user.clone();
    config::set_key(&mut user, key, value)?;

    let path = match ctx.config.user_config_loaded_from() {
        Some(path) => path.to_path_buf(),
        None => Config::user_config_path()?,
    };
    Config::write_config_atomic(&path, &user)
        .with_context(|| format!("Failed to write config '{}'", path.display()))?;

    if !ctx.quiet {
        println!("Set {} = {} in {}", key, value, path.display());
    }

    Ok(())
}

/// List all configuration values.
pub fn list(ctx: &Context) -> Result<()> {
    println!("# Configuration");

    match ctx.config.user_config_loaded_from() {
        Some(path) => println!("# user: {}", path.display()),
        None => println!("# user: (none, defaults apply)"),
    }
    if let Some(path) = ctx.config.local_config_loaded_from() {
        println!("# local: {}", path.display());
    }

    for (key, value) in ctx.config.entries() {
        println!("{} = {}", key, value);
    }

    Ok(())
}

use std::path::Path;

use anyhow::Result;

use crate::config;

pub fn run(config_path: Option<&Path>) -> Result<()> {
    let cfg = config::load_config(config_path)?;

    let names = cfg.profile_names();
    if names.is_empty() {
        println!("No profiles configured.");
        return Ok(());
    }

    for name in names {
        match cfg.profile(name) {
            Ok(profile) => println!("{} ({} calendars)", name, profile.calendars.len()),
            Err(e) => println!("{} (invalid: {:#})", name, e),
        }
    }

    Ok(())
}

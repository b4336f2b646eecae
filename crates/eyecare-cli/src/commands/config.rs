use anyhow::{Context, Result};
use eyecare_infrastructure::ConfigService;

use super::Settings;

pub fn init(settings: &Settings) -> Result<()> {
    let service = ConfigService::new(settings.paths());
    let path = service.config_path()?;
    if service
        .ensure_config_file()
        .context("Failed to write configuration")?
    {
        println!("Wrote {}", path.display());
    } else {
        println!("{} already exists", path.display());
    }
    Ok(())
}

pub fn show(settings: &Settings) -> Result<()> {
    let config = settings.effective_config()?;
    println!("api_base_url   = {}", config.api_base_url);
    println!("media_base_url = {}", config.media_base_url);
    match config.timeout_secs {
        Some(secs) => println!("timeout_secs   = {secs}"),
        None => println!("timeout_secs   = (client default)"),
    }
    println!("[routes]");
    let routes = &config.routes;
    for (name, path) in [
        ("login", &routes.login),
        ("register", &routes.register),
        ("specialists", &routes.specialists),
        ("scans", &routes.scans),
        ("scan_review", &routes.scan_review),
        ("consultations", &routes.consultations),
        ("consultation_action", &routes.consultation_action),
        ("articles", &routes.articles),
        ("contact", &routes.contact),
    ] {
        println!("{name:<20} = {path}");
    }
    Ok(())
}

use anyhow::Result;
use mycal_core::config::MycalConfig;
use owo_colors::OwoColorize;

pub fn run() -> Result<()> {
    let config_path = MycalConfig::config_path()?;
    let config = MycalConfig::load_from(&config_path)?;

    println!("{}", "Paths".bold());
    println!("  Config:   {}", config_path.display());
    println!("  Session:  {}", config.session_path()?.display());

    Ok(())
}

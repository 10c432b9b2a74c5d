use anyhow::{Context, Result};
use mycal_core::identity::{IdentityGateway, IdentityProvider};
use owo_colors::OwoColorize;

use crate::utils::tui::with_spinner;

pub async fn run<P: IdentityProvider>(gateway: &IdentityGateway<P>) -> Result<()> {
    let session = with_spinner("Checking session...", gateway.restore()).await;

    let Some(identity) = session.user else {
        println!("{}", "Not signed in.".dimmed());
        return Ok(());
    };

    gateway
        .sign_out()
        .await
        .with_context(|| format!("Failed to sign out {}", identity.label()))?;

    println!("Signed out {}.", identity.label());
    Ok(())
}

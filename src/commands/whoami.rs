use anyhow::Result;
use mycal_core::identity::{IdentityGateway, IdentityProvider};
use owo_colors::OwoColorize;

use crate::render::Render;
use crate::utils::tui::with_spinner;

pub async fn run<P: IdentityProvider>(gateway: &IdentityGateway<P>) -> Result<()> {
    let session = with_spinner("Checking session...", gateway.restore()).await;

    match session.user {
        Some(identity) => println!("{}", identity.render()),
        None => println!("{}", "Not signed in.".dimmed()),
    }

    Ok(())
}

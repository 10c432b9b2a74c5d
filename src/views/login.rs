use anyhow::Result;
use dialoguer::Select;
use mycal_core::guard::Route;
use mycal_core::identity::{IdentityGateway, IdentityProvider};
use mycal_core::validation::LoginForm;
use owo_colors::OwoColorize;

use crate::app::Navigation;
use crate::prompts::{alert, prompt_password, prompt_text, show_field_errors, success};
use crate::render::Render;
use crate::utils::tui::with_spinner;

const CHOICES: &[&str] = &[
    "Sign In",
    "Sign in with Google",
    "Don't have an account? Sign Up",
    "Quit",
];

pub async fn run<P: IdentityProvider>(gateway: &IdentityGateway<P>) -> Result<Navigation> {
    println!("\n{}\n", "Login".bold());

    loop {
        let choice = Select::new().items(CHOICES).default(0).interact_opt()?;

        match choice {
            Some(0) => {
                if sign_in_with_password(gateway).await? {
                    return Ok(Navigation::Go(Route::Root));
                }
            }
            Some(1) => {
                println!("  {}", "Continue in your browser...".dimmed());
                match gateway.sign_in_federated().await {
                    Ok(identity) => {
                        success(&identity.render());
                        return Ok(Navigation::Go(Route::Root));
                    }
                    // Federated failures show the provider's own description.
                    Err(err) => alert(&err.detail),
                }
            }
            Some(2) => return Ok(Navigation::Go(Route::Signup)),
            _ => return Ok(Navigation::Quit),
        }
    }
}

/// Ask until the form validates, then try once. Returns whether a
/// session was established.
async fn sign_in_with_password<P: IdentityProvider>(gateway: &IdentityGateway<P>) -> Result<bool> {
    let form = ask_login_form()?;

    let result = with_spinner(
        "Signing in...",
        gateway.sign_in(form.email.trim(), &form.password),
    )
    .await;

    match result {
        Ok(identity) => {
            success(&identity.render());
            Ok(true)
        }
        Err(err) => {
            alert(&err.to_string());
            Ok(false)
        }
    }
}

fn ask_login_form() -> Result<LoginForm> {
    let mut form = LoginForm::default();

    loop {
        form.email = prompt_text("Username/Email", &form.email)?;
        form.password = prompt_password("Password")?;

        match form.validate() {
            Ok(()) => return Ok(form),
            Err(errors) => show_field_errors(&errors),
        }
    }
}

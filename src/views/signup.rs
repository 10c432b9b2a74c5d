use anyhow::Result;
use dialoguer::Select;
use mycal_core::guard::Route;
use mycal_core::identity::{IdentityGateway, IdentityProvider};
use mycal_core::validation::SignupForm;
use owo_colors::OwoColorize;

use crate::app::Navigation;
use crate::prompts::{alert, prompt_password, prompt_text, show_field_errors, success};
use crate::render::Render;
use crate::utils::tui::with_spinner;

const CHOICES: &[&str] = &["Sign Up", "Already have an account? Login", "Quit"];

pub async fn run<P: IdentityProvider>(gateway: &IdentityGateway<P>) -> Result<Navigation> {
    println!("\n{}\n", "Sign Up".bold());

    loop {
        let choice = Select::new().items(CHOICES).default(0).interact_opt()?;

        match choice {
            Some(0) => {
                let form = ask_signup_form()?;
                let display_name = form.display_name();

                let result = with_spinner(
                    "Creating account...",
                    gateway.sign_up(form.email.trim(), &form.password, display_name.as_deref()),
                )
                .await;

                match result {
                    Ok(identity) => {
                        success(&identity.render());
                        return Ok(Navigation::Go(Route::Root));
                    }
                    Err(err) => alert(&err.to_string()),
                }
            }
            Some(1) => return Ok(Navigation::Go(Route::Login)),
            _ => return Ok(Navigation::Quit),
        }
    }
}

/// Re-ask the whole form, keeping the text fields, until it validates.
fn ask_signup_form() -> Result<SignupForm> {
    let mut form = SignupForm::default();

    loop {
        form.first_name = prompt_text("First Name", &form.first_name)?;
        form.last_name = prompt_text("Last Name", &form.last_name)?;
        form.email = prompt_text("Username/Email", &form.email)?;
        form.password = prompt_password("Password")?;
        form.confirm_password = prompt_password("Confirm Password")?;

        match form.validate() {
            Ok(()) => return Ok(form),
            Err(errors) => show_field_errors(&errors),
        }
    }
}

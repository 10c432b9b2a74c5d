//! Required-field and confirmation checks for the login and signup forms.

use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Password,
    ConfirmPassword,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::FirstName => "First Name",
            Field::LastName => "Last Name",
            Field::Email => "Username/Email",
            Field::Password => "Password",
            Field::ConfirmPassword => "Confirm Password",
        }
    }

    fn required_message(&self) -> &'static str {
        match self {
            Field::FirstName => "First name is required",
            Field::LastName => "Last name is required",
            Field::Email => "Username/Email is required",
            Field::Password => "Password is required",
            Field::ConfirmPassword => "Confirm Password is required",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub const PASSWORD_MISMATCH: &str = "Passwords do not match";

/// A form field that failed validation. Shown next to that field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: Field,
    pub message: &'static str,
}

/// Fails when `value` is empty. Whitespace counts as a value, as in the
/// browser form.
pub fn required(field: Field, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        Err(ValidationError {
            field,
            message: field.required_message(),
        })
    } else {
        Ok(())
    }
}

pub fn matching_passwords(password: &str, confirm: &str) -> Result<(), ValidationError> {
    required(Field::ConfirmPassword, confirm)?;
    if password == confirm {
        Ok(())
    } else {
        Err(ValidationError {
            field: Field::ConfirmPassword,
            message: PASSWORD_MISMATCH,
        })
    }
}

/// Loose shape check: something, an `@`, then a dotted domain.
pub fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.split('.').count() >= 2
        && domain.split('.').all(|part| !part.is_empty())
        && !value.chars().any(char::is_whitespace)
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        collect([
            required(Field::Email, &self.email),
            required(Field::Password, &self.password),
        ])
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        collect([
            required(Field::FirstName, &self.first_name),
            required(Field::LastName, &self.last_name),
            required(Field::Email, &self.email),
            required(Field::Password, &self.password),
            matching_passwords(&self.password, &self.confirm_password),
        ])
    }

    /// "First Last", or `None` when both names are blank.
    pub fn display_name(&self) -> Option<String> {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let name = name.trim();
        (!name.is_empty()).then(|| name.to_string())
    }
}

fn collect<const N: usize>(
    checks: [Result<(), ValidationError>; N],
) -> Result<(), Vec<ValidationError>> {
    let errors: Vec<ValidationError> = checks.into_iter().filter_map(Result::err).collect();
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

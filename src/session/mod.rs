//! Demo session handling: pluggable string storage, mock authentication and
//! client-side form validation.

pub mod auth;
mod store;
pub mod validation;

pub use auth::{AuthConfig, AuthOutcome, MockAuth, SESSION_KEY, USERS_KEY, User};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
pub use validation::{
    AccountForm, FieldErrors, PasswordScore, PasswordStrength, SiteForm, password_strength,
    simulate_save, validate_account_form, validate_signup_passwords, validate_site_form,
};

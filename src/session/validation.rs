//! Form checks for the portfolio and signup screens.
//!
//! Validators return field errors in form order; an empty map means the form
//! may be submitted.

use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Field name to message, in form order.
pub type FieldErrors = IndexMap<&'static str, &'static str>;

pub const PASSWORD_MISMATCH: &str = "Passwords do not match";
pub const SAVE_CONFIRMATION: &str = "Settings saved successfully!";
/// How long the save confirmation stays visible.
pub const SAVE_MESSAGE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteForm {
    pub site_name: String,
    pub sector: String,
    pub tier: String,
    pub contract_value: String,
    pub site_manager: String,
    pub address: String,
    pub guards_required: String,
    pub primary_contact_name: String,
    pub primary_contact_phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountForm {
    pub company_name: String,
    pub industry: String,
    pub tier: String,
    pub arr: String,
    pub csm_owner: String,
    pub website: String,
    pub primary_contact_name: String,
    pub primary_contact_email: String,
}

#[must_use]
pub fn validate_site_form(form: &SiteForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if form.site_name.trim().is_empty() {
        errors.insert("siteName", "Site name is required");
    }
    if form.sector.is_empty() {
        errors.insert("sector", "Sector is required");
    }
    if form.tier.is_empty() {
        errors.insert("tier", "Client tier is required");
    }
    if form.contract_value.trim().is_empty() {
        errors.insert("contractValue", "Contract value is required");
    }
    if form.address.trim().is_empty() {
        errors.insert("address", "Address is required");
    }
    if !form.primary_contact_phone.is_empty() && !is_phone_like(&form.primary_contact_phone) {
        errors.insert("primaryContactPhone", "Invalid phone format");
    }
    errors
}

#[must_use]
pub fn validate_account_form(form: &AccountForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if form.company_name.trim().is_empty() {
        errors.insert("companyName", "Company name is required");
    }
    if form.industry.is_empty() {
        errors.insert("industry", "Industry is required");
    }
    if form.tier.is_empty() {
        errors.insert("tier", "Tier is required");
    }
    if form.arr.trim().is_empty() {
        errors.insert("arr", "ARR is required");
    }
    if !form.primary_contact_email.is_empty() && !is_email_like(&form.primary_contact_email) {
        errors.insert("primaryContactEmail", "Invalid email format");
    }
    errors
}

/// Client-side checks run before a signup request is sent.
#[must_use]
pub fn validate_signup_passwords(password: &str, confirmation: &str) -> Option<&'static str> {
    if password != confirmation {
        return Some(PASSWORD_MISMATCH);
    }
    if password.chars().count() < 6 {
        return Some(super::auth::PASSWORD_TOO_SHORT);
    }
    None
}

/// Digits, whitespace and `+-()` only.
#[must_use]
pub fn is_phone_like(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_whitespace() || matches!(c, '+' | '-' | '(' | ')'))
}

/// `local@domain.tld` with no whitespace and exactly one `@`.
#[must_use]
pub fn is_email_like(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // At least one dot with text on both sides.
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PasswordStrength {
    Weak,
    Fair,
    Good,
    Strong,
}

impl PasswordStrength {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            PasswordStrength::Weak => "Weak",
            PasswordStrength::Fair => "Fair",
            PasswordStrength::Good => "Good",
            PasswordStrength::Strong => "Strong",
        }
    }

    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        match score {
            0 | 1 => PasswordStrength::Weak,
            2 | 3 => PasswordStrength::Fair,
            4 => PasswordStrength::Good,
            _ => PasswordStrength::Strong,
        }
    }
}

/// Password score out of five, `None` for an empty password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordScore {
    pub score: u8,
    pub strength: PasswordStrength,
}

/// One point each for length >= 6, length >= 10, mixed case, a digit and a
/// symbol.
#[must_use]
pub fn password_strength(password: &str) -> Option<PasswordScore> {
    if password.is_empty() {
        return None;
    }
    let length = password.chars().count();
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let checks = [
        length >= 6,
        length >= 10,
        has_lower && has_upper,
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    let score = checks.iter().filter(|passed| **passed).count() as u8;
    Some(PasswordScore {
        score,
        strength: PasswordStrength::from_score(score),
    })
}

/// Waits out a simulated save round trip and returns the confirmation text.
pub async fn simulate_save(latency: Duration) -> &'static str {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
    SAVE_CONFIRMATION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_site_form_reports_required_fields_in_order() {
        let errors = validate_site_form(&SiteForm::default());
        let fields: Vec<&str> = errors.keys().copied().collect();
        assert_eq!(
            fields,
            vec!["siteName", "sector", "tier", "contractValue", "address"]
        );
    }

    #[test]
    fn phone_and_email_shapes() {
        assert!(is_phone_like("+1 (555) 010-2030"));
        assert!(!is_phone_like("555-CALL"));
        assert!(is_email_like("ops@suburban.com"));
        assert!(!is_email_like("ops@suburban"));
        assert!(!is_email_like("ops @suburban.com"));
        assert!(!is_email_like("@suburban.com"));
    }

    #[test]
    fn strength_scoring() {
        assert_eq!(password_strength(""), None);
        let weak = password_strength("abc").expect("score");
        assert_eq!((weak.score, weak.strength), (0, PasswordStrength::Weak));
        let fair = password_strength("abcdef1").expect("score");
        assert_eq!((fair.score, fair.strength), (2, PasswordStrength::Fair));
        let strong = password_strength("Secur3-Passphrase").expect("score");
        assert_eq!((strong.score, strong.strength), (5, PasswordStrength::Strong));
    }

    #[test]
    fn signup_passwords_must_match_first() {
        assert_eq!(validate_signup_passwords("abc", "abd"), Some(PASSWORD_MISMATCH));
        assert_eq!(
            validate_signup_passwords("abc", "abc"),
            Some(crate::session::auth::PASSWORD_TOO_SHORT)
        );
        assert_eq!(validate_signup_passwords("abcdef", "abcdef"), None);
    }
}

use std::time::Duration;

use suburban_viz::session::validation::{SAVE_CONFIRMATION, SAVE_MESSAGE_TTL};
use suburban_viz::session::{
    AccountForm, PasswordStrength, SiteForm, password_strength, simulate_save,
    validate_account_form, validate_site_form,
};

#[test]
fn complete_site_form_passes() {
    let form: SiteForm = serde_json::from_str(
        r#"{
            "siteName": "Riverside Plaza",
            "sector": "Commercial",
            "tier": "Gold",
            "contractValue": "250000",
            "address": "12 River Rd",
            "primaryContactPhone": "(555) 010-2030"
        }"#,
    )
    .expect("form");
    assert!(validate_site_form(&form).is_empty());
}

#[test]
fn site_form_flags_bad_phone_and_blank_name() {
    let form = SiteForm {
        site_name: "   ".to_owned(),
        sector: "Retail".to_owned(),
        tier: "Silver".to_owned(),
        contract_value: "1000".to_owned(),
        address: "1 Main St".to_owned(),
        primary_contact_phone: "call me".to_owned(),
        ..SiteForm::default()
    };
    let errors = validate_site_form(&form);
    assert_eq!(errors.len(), 2);
    assert_eq!(errors.get("siteName"), Some(&"Site name is required"));
    assert_eq!(errors.get("primaryContactPhone"), Some(&"Invalid phone format"));
}

#[test]
fn account_form_checks_required_fields_and_email() {
    let form = AccountForm {
        company_name: "Acme Logistics".to_owned(),
        industry: "Logistics".to_owned(),
        tier: String::new(),
        arr: "1.2M".to_owned(),
        primary_contact_email: "ops-at-acme.com".to_owned(),
        ..AccountForm::default()
    };
    let errors = validate_account_form(&form);
    let fields: Vec<&str> = errors.keys().copied().collect();
    assert_eq!(fields, vec!["tier", "primaryContactEmail"]);
}

#[test]
fn strength_labels_cover_the_scale() {
    let labels: Vec<&str> = ["abc", "abcdef", "abcdefghij1", "Abcdefghij1", "Abcdefghij1!"]
        .iter()
        .filter_map(|pw| password_strength(pw))
        .map(|score| score.strength.label())
        .collect();
    assert_eq!(labels, vec!["Weak", "Weak", "Fair", "Good", "Strong"]);
    assert!(PasswordStrength::Strong > PasswordStrength::Weak);
}

#[tokio::test(start_paused = true)]
async fn simulated_save_confirms_after_latency() {
    let started = tokio::time::Instant::now();
    let message = simulate_save(Duration::from_millis(800)).await;
    assert_eq!(message, SAVE_CONFIRMATION);
    assert!(started.elapsed() >= Duration::from_millis(800));
    assert_eq!(SAVE_MESSAGE_TTL, Duration::from_secs(3));
}

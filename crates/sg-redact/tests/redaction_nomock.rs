//! Integration tests for sg-redact.
//!
//! These tests verify:
//! - Canary secrets never survive any entry point under any preset
//! - Home directories disappear from staging and production stacks
//! - Context redaction and forwarding emit clean JSON
//! - The auditor agrees with the redactors about what is left

use serde_json::json;
use sg_config::{create_environment_config, Environment, ErrorContextConfig, RedactionLevel};
use sg_redact::{
    analyze_stack_trace_security, create_safe_error_for_forwarding, sanitize_error_context,
    sanitize_error_for_production, sanitize_error_message, sanitize_stack_trace, ContextObject,
    ContextValue, ErrorInfo, FindingCategory,
};

const CANARY_PASSWORD: &str = "Tr0ub4dor-canary";
const CANARY_TOKEN_BODY: &str = "CANARYabcdefghijklmnopqrstuv12345";
const CANARY_DB_PASSWORD: &str = "Canary-DB-pw";
const CANARY_USER: &str = "canaryuser";

fn canary_token() -> String {
    format!("ghp_{}", CANARY_TOKEN_BODY)
}

fn canary_db_url() -> String {
    format!("postgres://svc:{}@db.internal:5432/app", CANARY_DB_PASSWORD)
}

fn secret_canaries() -> Vec<&'static str> {
    vec![CANARY_PASSWORD, CANARY_TOKEN_BODY, CANARY_DB_PASSWORD]
}

fn assert_no_canary(text: &str, canaries: &[&str]) {
    for canary in canaries {
        assert!(!text.contains(canary), "canary {:?} leaked in {}", canary, text);
    }
}

fn leaky_message() -> String {
    format!(
        "connect {} failed: password={} auth {}",
        canary_db_url(),
        CANARY_PASSWORD,
        canary_token()
    )
}

fn leaky_stack() -> String {
    format!(
        "Error: {}\n    at connect (/Users/{user}/app/src/db.js:10:5)\n    at main (/Users/{user}/app/src/index.js:3:1)",
        leaky_message(),
        user = CANARY_USER
    )
}

fn context_object(value: serde_json::Value) -> ContextObject {
    match ContextValue::from(value) {
        ContextValue::Object(o) => o,
        _ => ContextObject::new(),
    }
}

#[test]
fn test_messages_never_leak_secrets_under_any_preset() {
    for env in Environment::ALL {
        let config = create_environment_config(*env, None);
        let out = sanitize_error_message(&leaky_message(), &config);
        assert_no_canary(&out, &secret_canaries());
        assert!(out.chars().count() <= config.max_message_length);
    }
}

#[test]
fn test_stacks_hide_home_outside_development() {
    for env in [Environment::Staging, Environment::Production] {
        let config = create_environment_config(env, None);
        let out = sanitize_stack_trace(&leaky_stack(), &config);
        let mut canaries = secret_canaries();
        canaries.push(CANARY_USER);
        assert_no_canary(&out, &canaries);
    }
}

#[test]
fn test_development_stack_keeps_paths_but_hides_dotfiles() {
    let config = create_environment_config(Environment::Development, None);
    let stack = format!(
        "Error: x\n    at load (/Users/{}/.ssh/id_rsa:1:1)\n    at run (/Users/{}/app/run.js:2:2)",
        CANARY_USER, CANARY_USER
    );
    let out = sanitize_stack_trace(&stack, &config);
    assert!(out.contains("app/run.js:2:2"), "{}", out);
    assert!(!out.contains("id_rsa"), "{}", out);
}

#[test]
fn test_context_json_is_clean() {
    let error = ErrorInfo::new("DbError", leaky_message())
        .with_property("password", CANARY_PASSWORD)
        .with_property(
            "config",
            ContextValue::from(json!({"apiKey": canary_token(), "host": "db"})),
        )
        .with_code("ECONNREFUSED");
    let extra = context_object(json!({
        "requestId": "r-1",
        "headers": [{"authorization": format!("Bearer {}", canary_token())}],
        "note": format!("password={}", CANARY_PASSWORD),
    }));

    for level in [RedactionLevel::Partial, RedactionLevel::Full] {
        let config = ErrorContextConfig {
            redaction_level: level,
            ..ErrorContextConfig::default()
        };
        let out = sanitize_error_context(&error, Some(&extra), &config);
        let text = serde_json::to_string(&out).unwrap();
        assert_no_canary(&text, &secret_canaries());
        assert_eq!(out.code.as_deref(), Some("ECONNREFUSED"));
    }

    let out = sanitize_error_context(&error, Some(&extra), &ErrorContextConfig::default());
    assert!(out.had_sensitive_data);
    assert_eq!(out.context["config"]["host"], "db");
    assert_eq!(out.context["requestId"], "r-1");
    assert!(out.redaction_hints.contains_key("config.apiKey"));
    assert!(out.redaction_hints.contains_key("headers[0].authorization"));
}

#[test]
fn test_forwarded_payload_is_clean_and_bounded() {
    let error = ErrorInfo::new("Error", leaky_message());
    let extra = context_object(json!({
        "password": CANARY_PASSWORD,
        "blob": "z".repeat(20_000),
        "operation": "migrate",
    }));
    let out = create_safe_error_for_forwarding(&error, Some(&extra), &ErrorContextConfig::default());
    let text = serde_json::to_string(&out).unwrap();
    assert_no_canary(&text, &secret_canaries());
    assert!(text.len() <= sg_redact::context::forward::FORWARDING_SIZE_CAP);
    assert_eq!(out.context["operation"], "migrate");
}

#[test]
fn test_production_sanitization_of_std_error() {
    let io = std::io::Error::new(
        std::io::ErrorKind::NotFound,
        format!("open /Users/{}/app/.env failed", CANARY_USER),
    );
    let info = ErrorInfo::from_error(&io).with_stack(leaky_stack());
    let config = create_environment_config(Environment::Production, None);
    let out = sanitize_error_for_production(&info, &config);

    let text = serde_json::to_string(&out).unwrap();
    let mut canaries = secret_canaries();
    canaries.push(CANARY_USER);
    assert_no_canary(&text, &canaries);
    assert_eq!(out.name, "Error");
    assert_eq!(out.stack.map(|s| s.lines().count()), Some(2));
}

#[test]
fn test_auditor_agrees_with_redactor() {
    let raw = analyze_stack_trace_security(&leaky_stack());
    assert!(raw.has(FindingCategory::Secret));
    assert!(raw.has(FindingCategory::HomeDirectory));

    let config = create_environment_config(Environment::Staging, None);
    let cleaned = sanitize_stack_trace(&leaky_stack(), &config);
    let report = analyze_stack_trace_security(&cleaned);
    assert!(!report.has(FindingCategory::Secret), "{:?}\n{}", report.findings, cleaned);
    assert!(!report.has(FindingCategory::HomeDirectory), "{:?}\n{}", report.findings, cleaned);
}

#[test]
fn test_self_referential_context_is_safe() {
    let error = ErrorInfo::new("Error", "cycle");
    error.properties.insert("me", error.properties.clone());
    let extra = ContextObject::new();
    extra.insert("parent", error.properties.clone());

    let out = sanitize_error_context(&error, Some(&extra), &ErrorContextConfig::default());
    assert!(serde_json::to_string(&out).is_ok());
    assert!(out.security_warnings.len() >= 2);

    error.properties.insert("me", ContextValue::Null);
}

#[test]
fn test_oversized_inputs_are_bounded() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    let config = create_environment_config(Environment::Staging, None);
    let message = format!("{} password={}", "x".repeat(1_000_000), CANARY_PASSWORD);
    let out = sanitize_error_message(&message, &config);
    assert_eq!(out.chars().count(), config.max_message_length);
    assert!(out.ends_with(sg_redact::TRUNCATION_SUFFIX));

    let frame = format!("    at f (/Users/{}/app/index.js:1:1)\n", CANARY_USER);
    let stack = format!("Error: big\n{}", frame.repeat(5_000));
    let out = sanitize_stack_trace(&stack, &config);
    assert!(!out.contains(CANARY_USER));
    assert!(out.ends_with(sg_redact::stack::STACK_TRUNCATED_NOTICE), "{}", &out[out.len() - 80..]);
}

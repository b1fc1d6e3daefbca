//! Tests for session module

use super::*;
use crate::config::RoutesConfig;
use crate::error::Error;
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::tempdir;
use test_case::test_case;

fn record(user: &str) -> SessionRecord {
    SessionRecord {
        user: Some(user.to_string()),
        signed_in_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
    }
}

fn storefront_guard() -> RouteGuard {
    RouteGuard::new("/login", "/")
        .protect("/orders")
        .unwrap()
        .protect("/orders/:id")
        .unwrap()
        .protect("/security")
        .unwrap()
        .protect("/admin/*")
        .unwrap()
        .guest_only("/login")
        .unwrap()
}

// ============================================================================
// SessionContext Tests
// ============================================================================

#[test]
fn test_anonymous_context() {
    let ctx = SessionContext::anonymous();
    assert!(!ctx.is_authenticated());
    assert!(ctx.user().is_none());
    assert!(ctx.signed_in_at().is_none());
}

#[test]
fn test_signed_in_context() {
    let rec = record("alice");
    let ctx = SessionContext::signed_in(&rec);
    assert!(ctx.is_authenticated());
    assert_eq!(ctx.user(), Some("alice"));
    assert_eq!(ctx.signed_in_at(), Some(rec.signed_in_at));
}

#[test]
fn test_context_from_record() {
    assert!(!SessionContext::from_record(None).is_authenticated());
    assert!(SessionContext::from_record(Some(&record("bob"))).is_authenticated());
}

#[test]
fn test_record_without_user_still_authenticates() {
    let ctx = SessionContext::signed_in(&SessionRecord::anonymous_user());
    assert!(ctx.is_authenticated());
    assert!(ctx.user().is_none());
}

// ============================================================================
// MemorySessionStore Tests
// ============================================================================

#[test]
fn test_memory_store_lifecycle() {
    let store = MemorySessionStore::new();
    assert!(store.load().unwrap().is_none());
    assert!(!SessionContext::from_store(&store).unwrap().is_authenticated());

    let ctx = sign_in(&store, "alice").unwrap();
    assert!(ctx.is_authenticated());
    assert_eq!(store.load().unwrap().unwrap().user.as_deref(), Some("alice"));
    assert!(SessionContext::from_store(&store).unwrap().is_authenticated());

    sign_out(&store).unwrap();
    assert!(store.load().unwrap().is_none());

    // Clearing twice is fine
    sign_out(&store).unwrap();
}

#[test]
fn test_memory_store_with_record() {
    let store = MemorySessionStore::with_record(record("carol"));
    let ctx = SessionContext::from_store(&store).unwrap();
    assert_eq!(ctx.user(), Some("carol"));
}

// ============================================================================
// FileSessionStore Tests
// ============================================================================

#[test]
fn test_file_store_missing_file_is_signed_out() {
    let dir = tempdir().unwrap();
    let store = FileSessionStore::new(dir.path().join("session.json"));
    assert!(store.load().unwrap().is_none());
}

#[test]
fn test_file_store_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("session.json");
    let store = FileSessionStore::new(&path);

    store.save(&record("dave")).unwrap();
    assert!(path.exists());
    assert!(!path.with_extension("tmp").exists());

    let loaded = store.load().unwrap();
    assert_eq!(loaded, Some(record("dave")));

    let on_disk: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
        on_disk,
        json!({"user": "dave", "signed_in_at": "2024-03-01T12:00:00Z"})
    );
}

#[test]
fn test_file_store_clear_is_idempotent() {
    let dir = tempdir().unwrap();
    let store = FileSessionStore::new(dir.path().join("session.json"));

    store.save(&record("erin")).unwrap();
    store.clear().unwrap();
    assert!(!store.path().exists());
    store.clear().unwrap();
}

#[test]
fn test_file_store_corrupt_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "not json").unwrap();

    let err = FileSessionStore::new(&path).load().unwrap_err();
    assert!(matches!(err, Error::Session { .. }));
}

#[test]
fn test_file_store_accepts_missing_user() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, r#"{"signed_in_at": "2024-03-01T12:00:00Z"}"#).unwrap();

    let ctx = SessionContext::from_store(&FileSessionStore::new(&path)).unwrap();
    assert!(ctx.is_authenticated());
    assert!(ctx.user().is_none());
}

// ============================================================================
// RoutePattern Tests
// ============================================================================

#[test_case("/orders", "/orders", true ; "exact")]
#[test_case("/orders", "/orders/", true ; "trailing slash")]
#[test_case("/orders", "/orders?status=open", true ; "query ignored")]
#[test_case("/orders", "/orders#top", true ; "fragment ignored")]
#[test_case("/orders", "/orders/42", false ; "exact does not match child")]
#[test_case("/orders", "/ordersx", false ; "no prefix match")]
#[test_case("/orders/:id", "/orders/42", true ; "param")]
#[test_case("/orders/:id", "/orders", false ; "param requires segment")]
#[test_case("/orders/:id", "/orders/42/items", false ; "param is one segment")]
#[test_case("/admin/*", "/admin", true ; "wildcard prefix itself")]
#[test_case("/admin/*", "/admin/users/7", true ; "wildcard descendant")]
#[test_case("/admin/*", "/administrator", false ; "wildcard segment boundary")]
#[test_case("/", "/", true ; "root")]
#[test_case("/", "", true ; "empty is root")]
#[test_case("/", "/orders", false ; "root is exact")]
#[test_case("/*", "/anything/at/all", true ; "bare wildcard")]
#[test_case("/a.b", "/aXb", false ; "literal dot")]
#[test_case("/orders", "//orders", true ; "repeated leading slash")]
#[test_case("/orders/:id", "/orders//42", true ; "repeated inner slash")]
#[test_case("/orders", "orders", true ; "missing leading slash")]
#[test_case("/orders", "/./orders", true ; "dot segment")]
#[test_case("/orders", "/help/../orders", true ; "parent segment")]
#[test_case("/admin/*", "/orders/../admin/users", true ; "parent segment into wildcard")]
#[test_case("/orders", "/orders/../help", false ; "parent segment leaves route")]
fn test_route_pattern_matches(pattern: &str, path: &str, expected: bool) {
    let pattern = RoutePattern::parse(pattern).unwrap();
    assert_eq!(pattern.matches(path), expected);
}

#[test_case("orders" ; "missing leading slash")]
#[test_case("/orders/:" ; "empty param name")]
#[test_case("/orders/:1st" ; "param starts with digit")]
fn test_route_pattern_rejects(pattern: &str) {
    let err = RoutePattern::parse(pattern).unwrap_err();
    assert!(matches!(err, Error::InvalidConfiguration { .. }));
}

#[test]
fn test_route_pattern_as_str() {
    assert_eq!(RoutePattern::parse("/orders/:id").unwrap().as_str(), "/orders/:id");
}

// ============================================================================
// RouteGuard Tests
// ============================================================================

#[test]
fn test_protected_redirects_anonymous_to_login() {
    let guard = storefront_guard();
    let decision = guard.check(&SessionContext::anonymous(), "/orders/42");
    assert_eq!(
        decision,
        GuardDecision::Redirect {
            to: "/login".to_string(),
            from: Some("/orders/42".to_string()),
        }
    );
    assert!(!decision.is_allowed());
    assert_eq!(decision.redirect_target(), Some("/login"));
}

#[test_case("//orders" ; "repeated leading slash")]
#[test_case("/orders//42" ; "repeated inner slash")]
#[test_case("orders" ; "missing leading slash")]
#[test_case("/./orders" ; "dot segment")]
#[test_case("//admin//users" ; "repeated slashes under wildcard")]
#[test_case("/help/../security" ; "parent segment")]
fn test_protected_alternate_spellings_redirect_anonymous(path: &str) {
    let guard = storefront_guard();
    let decision = guard.check(&SessionContext::anonymous(), path);
    assert_eq!(
        decision,
        GuardDecision::Redirect {
            to: "/login".to_string(),
            from: Some(path.to_string()),
        }
    );
}

#[test]
fn test_protected_allows_signed_in() {
    let guard = storefront_guard();
    let ctx = SessionContext::signed_in(&record("alice"));
    assert!(guard.check(&ctx, "/orders").is_allowed());
    assert!(guard.check(&ctx, "/admin/users").is_allowed());
    assert!(guard.check(&ctx, "/security").is_allowed());
}

#[test]
fn test_guest_only_redirects_signed_in_home() {
    let guard = storefront_guard();
    let ctx = SessionContext::signed_in(&record("alice"));
    assert_eq!(
        guard.check(&ctx, "/login"),
        GuardDecision::Redirect {
            to: "/".to_string(),
            from: None,
        }
    );
    assert!(guard
        .check(&SessionContext::anonymous(), "/login")
        .is_allowed());
}

#[test]
fn test_unmatched_paths_are_public() {
    let guard = storefront_guard();
    assert_eq!(guard.access_for("/language"), Access::Public);
    assert!(guard
        .check(&SessionContext::anonymous(), "/language")
        .is_allowed());
}

#[test]
fn test_first_matching_rule_wins() {
    let guard = RouteGuard::new("/login", "/")
        .rule("/help", Access::Public)
        .unwrap()
        .protect("/*")
        .unwrap();
    assert_eq!(guard.access_for("/help"), Access::Public);
    assert_eq!(guard.access_for("/orders"), Access::Protected);
    assert_eq!(guard.rules().len(), 2);
}

#[test]
fn test_guard_decision_display_and_json() {
    let redirect = GuardDecision::Redirect {
        to: "/login".to_string(),
        from: Some("/orders".to_string()),
    };
    assert_eq!(redirect.to_string(), "redirect to /login (from /orders)");
    assert_eq!(
        serde_json::to_value(&redirect).unwrap(),
        json!({"decision": "redirect", "to": "/login", "from": "/orders"})
    );

    let home = GuardDecision::Redirect {
        to: "/".to_string(),
        from: None,
    };
    assert_eq!(home.to_string(), "redirect to /");
    assert_eq!(
        serde_json::to_value(&home).unwrap(),
        json!({"decision": "redirect", "to": "/"})
    );

    assert_eq!(GuardDecision::Allow.to_string(), "allow");
    assert_eq!(
        serde_json::to_value(GuardDecision::Allow).unwrap(),
        json!({"decision": "allow"})
    );
}

#[test]
fn test_guard_from_config() {
    let config = RoutesConfig::default();
    let guard = RouteGuard::from_config(&config).unwrap();
    assert_eq!(guard.login_path(), "/login");
    assert_eq!(guard.home_path(), "/");
    assert_eq!(guard.access_for("/orders/7"), Access::Protected);
    assert_eq!(guard.access_for("/login"), Access::GuestOnly);
}

#[test]
fn test_guard_from_config_login_under_protected_prefix() {
    let config = RoutesConfig {
        login_path: "/admin/login".to_string(),
        home_path: "/admin".to_string(),
        protected: vec!["/admin/*".to_string()],
        guest_only: vec!["/admin/login".to_string()],
    };
    let guard = RouteGuard::from_config(&config).unwrap();
    assert_eq!(guard.access_for("/admin/login"), Access::GuestOnly);
    assert_eq!(guard.access_for("/admin/orders"), Access::Protected);
}

#[test]
fn test_guard_from_config_rejects_protected_login() {
    let config = RoutesConfig {
        protected: vec!["/*".to_string()],
        guest_only: Vec::new(),
        ..RoutesConfig::default()
    };
    let err = RouteGuard::from_config(&config).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidConfiguration { ref field, .. } if field == "routes.login_path"
    ));
}

#[test]
fn test_guard_from_config_rejects_guest_only_home() {
    let config = RoutesConfig {
        home_path: "/".to_string(),
        guest_only: vec!["/".to_string(), "/login".to_string()],
        ..RoutesConfig::default()
    };
    let err = RouteGuard::from_config(&config).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidConfiguration { ref field, .. } if field == "routes.home_path"
    ));
}

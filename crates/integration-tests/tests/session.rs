//! Session behaviour through `AppState`.

#![allow(clippy::unwrap_used)]

use ewaste_core::Role;
use ewaste_integration_tests::TestContext;

#[test]
fn test_register_then_login_with_unused_email() {
    let mut ctx = TestContext::new();
    let session = ctx.state.session_mut();

    assert!(session.register("Bob", "bob@x.com", "pw", Role::User));
    session.logout();
    assert!(session.login("bob@x.com", "pw"));
    assert_eq!(session.current().unwrap().name, "Bob");
}

#[test]
fn test_duplicate_email_leaves_roster_unchanged() {
    let mut ctx = TestContext::new();
    let session = ctx.state.session_mut();
    let before = session.roster_len();

    assert!(session.register("Alice", "alice@x.com", "pw", Role::User));
    assert!(!session.register("Alice", "alice@x.com", "pw2", Role::User));
    assert_eq!(session.roster_len(), before + 1);

    session.logout();
    assert!(!session.login("alice@x.com", "pw2"));
    assert!(session.login("alice@x.com", "pw"));
}

#[test]
fn test_wrong_password_keeps_current_identity() {
    let mut ctx = TestContext::new();
    let session = ctx.state.session_mut();
    assert!(session.login("admin@example.com", "password"));
    let before = session.current().cloned();

    assert!(!session.login("admin@example.com", "nope"));
    assert_eq!(session.current().cloned(), before);
}

#[test]
fn test_repeated_login_yields_same_id() {
    let mut ctx = TestContext::new();
    let session = ctx.state.session_mut();
    assert!(session.register("Carol", "carol@x.com", "pw", Role::User));
    let registered = session.current().unwrap().id.clone();

    session.logout();
    assert!(session.login("carol@x.com", "pw"));
    let first = session.current().unwrap().id.clone();
    session.logout();
    assert!(session.login("carol@x.com", "pw"));

    assert_eq!(first, registered);
    assert_eq!(session.current().unwrap().id, registered);
}

#[test]
fn test_admin_has_fixed_id() {
    let mut ctx = TestContext::new();
    assert!(ctx.state.session_mut().login("admin@example.com", "password"));
    let identity = ctx.state.require_identity().unwrap();
    assert_eq!(identity.id.as_str(), "1");
    assert!(identity.is_admin());
}

#[test]
fn test_session_survives_restart_until_logout() {
    let mut ctx = TestContext::new();
    assert!(ctx.state.session_mut().register("Dan", "dan@x.com", "pw", Role::User));
    let id = ctx.state.require_identity().unwrap().id.clone();

    let mut ctx = ctx.restart();
    assert_eq!(ctx.state.require_identity().unwrap().id, id);

    ctx.state.session_mut().logout();
    let ctx = ctx.restart();
    assert!(!ctx.state.session().is_authenticated());
    assert_eq!(ctx.state.session().roster_len(), 2);
}

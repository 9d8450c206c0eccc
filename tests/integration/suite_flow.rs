//! End-to-end runs of the suite against the in-process stub service
//!
//! Each test starts its own stub on an ephemeral port, so tests never share
//! state.

use reqres_suite::responses::user::User;
use reqres_suite::testing::setup;
use reqres_suite::testing::{StubServer, StubState};
use reqres_suite::{Fixtures, Outcome, Suite};

fn failure_checks(outcome: &Outcome) -> Vec<String> {
    match outcome {
        Outcome::Failed { failures } => failures.iter().map(|f| f.check.clone()).collect(),
        other => panic!("expected failed outcome, got {other:?}"),
    }
}

// =============================================================================
// SUCCESS PATH
// =============================================================================

/// login → list users → show user 2 → missing 100 → missing 99
#[actix_web::test]
async fn test_full_run_passes_against_seeded_service() {
    let server = StubServer::start(StubState::seeded()).unwrap();
    let suite = Suite::new(setup::config(server.url()), setup::fixtures()).unwrap();

    let report = suite.run().await;

    let names: Vec<_> = report.steps.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "login",
            "list users",
            "show user 2",
            "missing user 100",
            "missing user 99"
        ]
    );
    assert!(report.is_success(), "{report}");
    assert!(report.steps.iter().all(|s| s.attempts == 1));
    assert_eq!(report.base_url, server.url());

    server.stop().await;
}

#[actix_web::test]
async fn test_show_user_is_cross_checked_with_listing() {
    let server = StubServer::start(StubState::seeded()).unwrap();
    let mut config = setup::config(server.url());
    // Page 1 contains user 2, so the listing comparison runs as well
    config.checks.listing_page = 1;

    let report = Suite::new(config, setup::fixtures()).unwrap().run().await;

    assert!(report.is_success(), "{report}");

    server.stop().await;
}

#[actix_web::test]
async fn test_suite_from_config_reads_fixture_file() {
    let server = StubServer::start(StubState::seeded()).unwrap();
    let suite = Suite::from_config(setup::config(server.url())).unwrap();

    assert!(suite.run().await.is_success());

    server.stop().await;
}

// =============================================================================
// ASSERTION FAILURES
// =============================================================================

#[actix_web::test]
async fn test_foreign_email_fails_listing_only() {
    let mut state = StubState::seeded();
    state.users[7].email = "lindsay@example.com".to_string();
    let server = StubServer::start(state).unwrap();

    let report = Suite::new(setup::config(server.url()), setup::fixtures())
        .unwrap()
        .run()
        .await;

    let listing = report.step("list users").unwrap();
    assert_eq!(failure_checks(&listing.outcome), vec!["email domain"]);

    // Later checks are still evaluated
    assert!(report.step("show user 2").unwrap().outcome.is_passed());
    assert!(report.step("missing user 100").unwrap().outcome.is_passed());
    assert!(report.step("missing user 99").unwrap().outcome.is_passed());
    assert_eq!(report.passed(), 4);
    assert!(!report.is_success());

    server.stop().await;
}

#[actix_web::test]
async fn test_unordered_duplicate_listing_is_reported() {
    let mut users = StubState::seeded().users;
    // Page 2 becomes [7, 8, 8, 9, 10, 11]
    let duplicate: User = users[7].clone();
    users.insert(8, duplicate);
    let server = StubServer::start(StubState::seeded().with_users(users)).unwrap();

    let report = Suite::new(setup::config(server.url()), setup::fixtures())
        .unwrap()
        .run()
        .await;

    let checks = failure_checks(&report.step("list users").unwrap().outcome);
    assert_eq!(checks, vec!["unique ids", "ascending ids"]);

    server.stop().await;
}

#[actix_web::test]
async fn test_fixture_mismatch_names_the_field() {
    let server = StubServer::start(StubState::seeded()).unwrap();
    let mut janet = setup::seeded_user(2);
    janet.last_name = "Weavers".to_string();
    let fixtures = Fixtures::from_users([janet]).unwrap();

    let report = Suite::new(setup::config(server.url()), fixtures)
        .unwrap()
        .run()
        .await;

    let outcome = &report.step("show user 2").unwrap().outcome;
    assert_eq!(failure_checks(outcome), vec!["fixture last_name"]);

    server.stop().await;
}

#[actix_web::test]
async fn test_missing_fixture_fails_show_user() {
    let server = StubServer::start(StubState::seeded()).unwrap();

    let report = Suite::new(setup::config(server.url()), Fixtures::default())
        .unwrap()
        .run()
        .await;

    let outcome = &report.step("show user 2").unwrap().outcome;
    assert_eq!(failure_checks(outcome), vec!["fixture"]);

    server.stop().await;
}

#[actix_web::test]
async fn test_existing_user_fails_not_found_check() {
    let server = StubServer::start(StubState::seeded()).unwrap();
    let mut config = setup::config(server.url());
    config.checks.missing_user_ids = vec![100, 12];

    let report = Suite::new(config, setup::fixtures()).unwrap().run().await;

    assert!(report.step("missing user 100").unwrap().outcome.is_passed());
    let checks = failure_checks(&report.step("missing user 12").unwrap().outcome);
    assert_eq!(checks, vec!["status", "empty body"]);

    server.stop().await;
}

// =============================================================================
// SETUP FAILURES
// =============================================================================

#[actix_web::test]
async fn test_wrong_api_key_aborts_dependent_steps() {
    let server = StubServer::start(StubState::seeded()).unwrap();
    let mut config = setup::config(server.url());
    config
        .headers
        .insert("x-api-key".to_string(), "wrong".to_string());

    let report = Suite::new(config, setup::fixtures()).unwrap().run().await;

    match &report.step("login").unwrap().outcome {
        Outcome::SetupFailed { message } => assert!(message.contains("401"), "{message}"),
        other => panic!("expected setup failure, got {other:?}"),
    }
    assert_eq!(report.skipped(), 4);
    assert!(
        report
            .steps
            .iter()
            .skip(1)
            .all(|s| s.attempts == 0 && s.outcome.is_skipped())
    );

    server.stop().await;
}

#[actix_web::test]
async fn test_unknown_login_user_is_a_setup_failure() {
    let server = StubServer::start(StubState::seeded()).unwrap();
    let mut config = setup::config(server.url());
    config.credentials.email = "nobody@reqres.in".to_string();

    let report = Suite::new(config, setup::fixtures()).unwrap().run().await;

    match &report.step("login").unwrap().outcome {
        Outcome::SetupFailed { message } => assert!(message.contains("user not found")),
        other => panic!("expected setup failure, got {other:?}"),
    }

    server.stop().await;
}

#[actix_web::test]
async fn test_unreachable_service_is_a_setup_failure() {
    let server = StubServer::start(StubState::seeded()).unwrap();
    let url = server.url().to_string();
    server.stop().await;

    let mut config = setup::config(&url);
    config.run.retries = 1;

    let report = Suite::new(config, setup::fixtures()).unwrap().run().await;
    let login = report.step("login").unwrap();

    assert!(matches!(login.outcome, Outcome::SetupFailed { .. }));
    assert_eq!(login.attempts, 2);
    assert_eq!(report.skipped(), 4);
}

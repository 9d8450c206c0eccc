//! Login step against scripted responses

use mockito::Matcher;
use reqres_suite::steps::login;
use reqres_suite::testing::setup;
use reqres_suite::{ApiClient, RunContext, SuiteError};
use serde_json::json;

fn client(url: &str) -> ApiClient {
    let config = setup::config(url);

    ApiClient::new(&config.profile().unwrap(), config.run.timeout()).unwrap()
}

#[actix_web::test]
async fn test_login_sends_credentials_and_profile_headers() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/login")
        .match_header("x-api-key", "reqres-free-v1")
        .match_header("accept", "application/json")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "email": "eve.holt@reqres.in",
            "password": "cityslicka"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"token":"QpwL5tke4Pnpja7X4"}"#)
        .create_async()
        .await;

    let config = setup::config(&server.url());
    let mut context = RunContext::new();

    login(&client(&server.url()), &mut context, &config.credentials)
        .await
        .unwrap();

    assert_eq!(context.token.as_deref(), Some("QpwL5tke4Pnpja7X4"));
    assert!(context.is_authenticated());
    mock.assert_async().await;
}

#[actix_web::test]
async fn test_login_error_body_is_reported() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/login")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":"Missing password"}"#)
        .create_async()
        .await;

    let config = setup::config(&server.url());
    let mut context = RunContext::new();

    let err = login(&client(&server.url()), &mut context, &config.credentials)
        .await
        .unwrap_err();

    match err {
        SuiteError::Setup(message) => assert_eq!(message, "login answered 400: Missing password"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!context.is_authenticated());
}

#[actix_web::test]
async fn test_login_without_token_is_a_setup_failure() {
    for body in [r#"{}"#, r#"{"token":""}"#, r#"{"token":null}"#, "not json"] {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/login")
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let config = setup::config(&server.url());
        let mut context = RunContext::new();

        let result = login(&client(&server.url()), &mut context, &config.credentials).await;

        assert!(matches!(result, Err(SuiteError::Setup(_))), "body {body}");
        assert!(context.token.is_none(), "body {body}");
    }
}

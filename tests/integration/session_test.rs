//! Integration tests for login, forms, quota and account state.

mod helpers;

use axum::http::{Method, StatusCode};
use serde_json::json;

use fileman_core::ErrorKind;
use fileman_core::config::AfterLogin;
use fileman_core::types::LoginRedirect;
use fileman_core::types::form::DEFAULT_REJECTION_MESSAGE;
use fileman_service::{AccountService, FormService, SessionService};

use helpers::{CollectingView, Reply, TestServer};

#[tokio::test]
async fn test_login_sets_user_from_cookie() {
    let server = TestServer::start().await;
    server.on_body(Method::POST, "/.dologin", "miltonLogout", Reply::status(StatusCode::OK));
    server.on(
        Method::POST,
        "/.dologin",
        Reply::json(json!({ "status": true, "nextHref": "/users/alice/" }))
            .with_header("set-cookie", "miltonUserUrl=/users/alice/; Path=/"),
    );
    let config = server.config();
    let dav = server.client(&config);
    let session = SessionService::new(dav.clone(), config.session.clone());
    let mut ctx = server.context(&config);

    let redirect = session
        .login(&mut ctx, "alice", "secret")
        .await
        .expect("login");

    assert_eq!(redirect, LoginRedirect::Navigate("/users/alice/".into()));
    let user = ctx.user().expect("user");
    assert_eq!(user.name, "alice");
    assert_eq!(user.url, "/users/alice/");
    let login = &server.requests()[0];
    assert!(login.body.contains("_loginUserName=alice"));
    assert!(login.body.contains("_loginPassword=secret"));

    session.logout(&mut ctx).await.expect("logout");
    assert!(ctx.user().is_none());
    assert_eq!(server.requests()[1].body, "miltonLogout=true");
}

#[tokio::test]
async fn test_login_rejected() {
    let server = TestServer::start().await;
    server.on(Method::POST, "/.dologin", Reply::json(json!({ "status": false })));
    let config = server.config();
    let session = SessionService::new(server.client(&config), config.session.clone());
    let mut ctx = server.context(&config);

    let err = session
        .login(&mut ctx, "alice", "wrong")
        .await
        .expect_err("rejected");
    assert_eq!(err.kind, ErrorKind::Authentication);
    assert!(ctx.user().is_none());
}

#[tokio::test]
async fn test_after_login_policy_relative_to_user() {
    let server = TestServer::start().await;
    server.on(
        Method::POST,
        "/.dologin",
        Reply::json(json!({ "status": true }))
            .with_header("set-cookie", "miltonUserUrl=/users/bob/; Path=/"),
    );
    let mut config = server.config();
    config.session.after_login = AfterLogin::RelativeToUser("dashboard".into());
    let session = SessionService::new(server.client(&config), config.session.clone());
    let mut ctx = server.context(&config);

    let redirect = session.login(&mut ctx, "bob", "pw").await.expect("login");
    assert_eq!(redirect, LoginRedirect::Navigate("/users/bob/dashboard".into()));
}

#[tokio::test]
async fn test_quota_of_account_root() {
    let server = TestServer::start().await;
    server.on(
        Method::GET,
        "/files/_DAV/PROPFIND",
        Reply::json(json!([{ "available": 750, "used": 250 }])),
    );
    let config = server.config();
    let account = AccountService::new(server.client(&config));
    let ctx = server.context(&config);

    let summary = account.quota(&ctx).await.expect("quota");
    assert_eq!(summary.percent_used, Some(25));
    assert!(server.requests()[0].query.contains("depth=0"));
}

#[tokio::test]
async fn test_form_rejection_reports_messages() {
    let server = TestServer::start().await;
    server.on(
        Method::POST,
        "/forms/signup",
        Reply::json(json!({
            "status": false,
            "fieldMessages": [{ "field": "email", "message": "required" }]
        })),
    );
    let config = server.config();
    let forms = FormService::new(server.client(&config));
    let mut view = CollectingView::default();

    let err = forms
        .submit(&mut view, "/forms/signup", &[("email".into(), String::new())])
        .await
        .expect_err("rejected");
    assert_eq!(err.kind, ErrorKind::Rejected);
    assert!(err.message.starts_with(DEFAULT_REJECTION_MESSAGE));
    assert!(err.message.contains("email: required"));
    assert_eq!(view.notices.len(), 2);
}

#[tokio::test]
async fn test_disable_account() {
    let server = TestServer::start().await;
    server.on(Method::POST, "/users/bob/_DAV/PROPPATCH", Reply::json(json!([])));
    let config = server.config();
    let account = AccountService::new(server.client(&config));

    account
        .set_account_disabled("/users/bob/", true)
        .await
        .expect("disable");
    assert_eq!(server.requests()[0].body, "clyde%3AaccountDisabled=true");
}

#[tokio::test]
async fn test_disable_account_failure() {
    let server = TestServer::start().await;
    server.on(
        Method::POST,
        "/users/bob/_DAV/PROPPATCH",
        Reply::json(json!([{ "name": "clyde:accountDisabled", "description": "forbidden" }])),
    );
    let config = server.config();
    let account = AccountService::new(server.client(&config));

    let err = account
        .set_account_disabled("/users/bob/", true)
        .await
        .expect_err("rejected");
    assert_eq!(err.kind, ErrorKind::Rejected);
    assert!(err.message.ends_with("forbidden"));
}

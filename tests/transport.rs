#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use smeta_admin::{
    app_lib::{AppError, api::ApiClient, config::AppConfig, storage::MemoryStorage},
    features::{
        auth::{
            client,
            role::Role,
            session::SessionStore,
            types::{LoginRequest, Session, UserProfile},
        },
        projects::{client as projects, types::CreateProjectRequest},
    },
};
use std::{
    sync::{Arc, Once},
    time::Duration,
};
use tokio::task::JoinHandle;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt};

const GOOD_TOKEN: &str = "tok-direktor";

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == format!("Bearer {GOOD_TOKEN}"))
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"message": "token expired"})),
    )
        .into_response()
}

async fn list_projects(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!([
        {"id": 1, "name": "Chilonzor residential block", "budget": 1250000000.0},
        {"id": 2, "name": "Yunusobod school", "address": "Yunusobod 4"}
    ]))
    .into_response()
}

async fn create_project(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if body.get("name").and_then(Value::as_str) == Some("Duplicate") {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"message": "Project with this name already exists"})),
        )
            .into_response();
    }
    (StatusCode::CREATED, Json(json!({"id": 3, "name": body["name"].clone()}))).into_response()
}

/// Rejects every credential, but only after the caller had time to sign in again.
async fn slow_rejection() -> Response {
    tokio::time::sleep(Duration::from_millis(300)).await;
    unauthorized()
}

async fn login(Json(body): Json<Value>) -> Response {
    if body.get("password").and_then(Value::as_str) != Some("secret") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Invalid phone or password"})),
        )
            .into_response();
    }
    Json(json!({
        "access_token": GOOD_TOKEN,
        "user": {"id": 11, "name": "Aziz", "phone": body["phone"].clone(), "role": "DIREKTOR"}
    }))
    .into_response()
}

static TRACING: Once = Once::new();

/// `RUST_LOG=smeta_admin=debug` shows transport logs while debugging a test.
fn init_tracing() {
    TRACING.call_once(|| {
        let env_filter = EnvFilter::builder()
            .with_default_directive(tracing::Level::WARN.into())
            .from_env_lossy();
        let subscriber = Registry::default()
            .with(fmt::layer().with_test_writer().with_target(false))
            .with(env_filter);
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

async fn spawn_api() -> anyhow::Result<(String, JoinHandle<()>)> {
    init_tracing();
    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(|| async { StatusCode::NO_CONTENT }))
        .route("/api/projects", get(list_projects).post(create_project))
        .route("/api/broken", get(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }))
        .route("/api/slow", get(slow_rejection));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), handle))
}

fn client_for(base_url: &str) -> anyhow::Result<ApiClient> {
    let store = SessionStore::new(Arc::new(MemoryStorage::new()), "test");
    let config = AppConfig {
        api_base_url: base_url.to_string(),
        ..AppConfig::default()
    };
    Ok(ApiClient::new(&config, store)?)
}

fn director() -> Session {
    Session::new(
        UserProfile {
            id: 11,
            name: "Aziz".to_string(),
            phone: "+998901112233".to_string(),
            role: Role::Direktor,
        },
        GOOD_TOKEN,
    )
}

#[tokio::test]
async fn bearer_is_attached_from_the_session() -> anyhow::Result<()> {
    let (base_url, server) = spawn_api().await?;
    let api = client_for(&base_url)?;
    api.session().login(director())?;

    let items = projects::list_projects(&api, 1).await?;
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].address.as_deref(), Some("Yunusobod 4"));

    server.abort();
    Ok(())
}

#[tokio::test]
async fn unauthorized_ends_the_session() -> anyhow::Result<()> {
    let (base_url, server) = spawn_api().await?;
    let api = client_for(&base_url)?;
    api.session().login(Session::new(director().user, "tok-revoked"))?;

    let err = projects::list_projects(&api, 1).await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err, AppError::Unauthorized("token expired".to_string()));
    assert!(!api.session().is_authenticated());

    server.abort();
    Ok(())
}

#[tokio::test]
async fn late_unauthorized_keeps_a_newer_session() -> anyhow::Result<()> {
    let (base_url, server) = spawn_api().await?;
    let api = client_for(&base_url)?;
    api.session()
        .login(Session::new(director().user, "tok-old"))?;

    let relogin = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        api.session().logout();
        api.session().login(director())
    };
    let (stale, relogin) = tokio::join!(api.get::<Value>("/api/slow"), relogin);
    relogin?;

    assert!(stale.unwrap_err().is_unauthorized());
    assert!(api.session().is_authenticated());
    assert_eq!(api.session().bearer().as_deref(), Some(GOOD_TOKEN));

    // The same rejection for the current credential still ends the session.
    let current = api.get::<Value>("/api/slow").await.unwrap_err();
    assert!(current.is_unauthorized());
    assert!(!api.session().is_authenticated());

    server.abort();
    Ok(())
}

#[tokio::test]
async fn business_rejection_is_a_validation_error() -> anyhow::Result<()> {
    let (base_url, server) = spawn_api().await?;
    let api = client_for(&base_url)?;
    api.session().login(director())?;

    let request = CreateProjectRequest {
        name: "Duplicate".to_string(),
        address: None,
        budget: None,
    };
    let err = projects::create_project(&api, &request).await.unwrap_err();
    assert_eq!(
        err,
        AppError::Validation("Project with this name already exists".to_string())
    );
    assert_eq!(err.to_string(), "Project with this name already exists");
    assert!(api.session().is_authenticated());

    server.abort();
    Ok(())
}

#[tokio::test]
async fn other_failures_keep_status_and_session() -> anyhow::Result<()> {
    let (base_url, server) = spawn_api().await?;
    let api = client_for(&base_url)?;
    api.session().login(director())?;

    let err = api.get::<Value>("/api/broken").await.unwrap_err();
    assert_eq!(
        err,
        AppError::Http {
            status: 502,
            message: "upstream down".to_string()
        }
    );
    assert!(api.session().is_authenticated());

    server.abort();
    Ok(())
}

#[tokio::test]
async fn login_then_logout_round_trip() -> anyhow::Result<()> {
    let (base_url, server) = spawn_api().await?;
    let api = client_for(&base_url)?;

    let rejected = client::login(
        &api,
        &LoginRequest {
            phone: "+998901112233".to_string(),
            password: "wrong".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(rejected.is_validation());

    let session = client::login(
        &api,
        &LoginRequest {
            phone: "+998901112233".to_string(),
            password: "secret".to_string(),
        },
    )
    .await?;
    assert_eq!(session.role(), Role::Direktor);
    api.session().login(session)?;
    assert_eq!(api.session().bearer().as_deref(), Some(GOOD_TOKEN));

    // 204 decodes as unit.
    client::logout(&api).await;
    assert!(!api.session().is_authenticated());

    server.abort();
    Ok(())
}

#[tokio::test]
async fn unreachable_api_is_a_network_error() -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let api = client_for(&format!("http://{addr}"))?;
    let err = api.get::<Value>("/api/projects").await.unwrap_err();
    assert!(matches!(err, AppError::Network(_)), "{err:?}");
    Ok(())
}

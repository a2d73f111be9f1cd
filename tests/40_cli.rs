mod common;

use std::path::Path;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use clap::Parser;
use serde_json::json;

use campaign_manager::cli::config::{SessionInfo, SessionStore};
use campaign_manager::cli::{self, Cli};
use campaign_manager::config::AppConfig;
use campaign_manager::import::ImportFailure;

fn config_for(backend: &common::StubBackend, dir: &Path) -> AppConfig {
    let mut config = AppConfig::development();
    config.api.base_url = backend.base_url.clone();
    config.session.config_dir = Some(dir.to_path_buf());
    config
}

fn log_in(dir: &Path) -> Result<()> {
    SessionStore::new(dir).save(&SessionInfo::new("tok".into(), None))
}

async fn run(args: &[&str], config: &AppConfig) -> Result<()> {
    let cli = Cli::try_parse_from(args)?;
    cli::run(cli, config).await
}

#[tokio::test]
async fn import_command_sends_each_tag_once() -> Result<()> {
    let backend = common::StubBackend::start(vec![(
        Method::POST,
        "/contacts/import",
        StatusCode::OK,
        json!({ "imported": 1, "skipped": 0, "list_id": 7 }),
    )])
    .await?;
    let dir = tempfile::tempdir()?;
    log_in(dir.path())?;
    let config = config_for(&backend, dir.path());

    run(
        &[
            "campaign", "--json", "contacts", "import", "--payload", "Alice,123", "--tag", "t1",
            "--tag", "t1", "--tag", "2", "--list", "7",
        ],
        &config,
    )
    .await?;

    let sent = backend.requests_to(Method::POST, "/contacts/import");
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0].body,
        Some(json!({
            "contacts": [{ "name": "Alice", "number": "123" }],
            "tag_ids": ["t1", 2],
            "list_id": 7
        }))
    );
    assert_eq!(sent[0].authorization.as_deref(), Some("Bearer tok"));
    assert!(SessionStore::new(dir.path()).load()?.is_some());
    Ok(())
}

#[tokio::test]
async fn preview_runs_without_a_session() -> Result<()> {
    let backend = common::StubBackend::start(vec![]).await?;
    let dir = tempfile::tempdir()?;
    let config = config_for(&backend, dir.path());

    run(
        &["campaign", "contacts", "import", "--payload", "name,number\nAlice,123", "--preview"],
        &config,
    )
    .await?;

    assert!(backend.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn import_without_session_is_unauthenticated() -> Result<()> {
    let backend = common::StubBackend::start(vec![]).await?;
    let dir = tempfile::tempdir()?;
    let config = config_for(&backend, dir.path());

    let err = run(&["campaign", "contacts", "import", "--payload", "Alice,123"], &config)
        .await
        .unwrap_err();

    assert_eq!(cli::error_code(&err), Some("UNAUTHENTICATED"));
    assert!(backend.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn empty_import_fails_with_its_code() -> Result<()> {
    let backend = common::StubBackend::start(vec![]).await?;
    let dir = tempfile::tempdir()?;
    log_in(dir.path())?;
    let config = config_for(&backend, dir.path());

    let err = run(
        &["campaign", "--json", "contacts", "import", "--payload", "name,number\nAlice,"],
        &config,
    )
    .await
    .unwrap_err();

    assert_eq!(err.downcast_ref::<ImportFailure>(), Some(&ImportFailure::EmptyPayload));
    assert_eq!(cli::error_code(&err), Some("EMPTY_PAYLOAD"));
    assert!(backend.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn rejected_session_is_forgotten() -> Result<()> {
    let backend = common::StubBackend::start(vec![(
        Method::POST,
        "/contacts/import",
        StatusCode::UNAUTHORIZED,
        json!({ "detail": "Not authenticated" }),
    )])
    .await?;
    let dir = tempfile::tempdir()?;
    log_in(dir.path())?;
    let config = config_for(&backend, dir.path());

    let err = run(&["campaign", "contacts", "import", "--payload", "Alice,123"], &config)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), ImportFailure::Unauthenticated.message());
    assert_eq!(cli::error_code(&err), Some("UNAUTHENTICATED"));
    assert!(SessionStore::new(dir.path()).load()?.is_none());
    Ok(())
}

#[tokio::test]
async fn corrupt_session_does_not_block_login() -> Result<()> {
    let backend = common::StubBackend::start(vec![(
        Method::POST,
        "/auth/login",
        StatusCode::OK,
        json!({ "access_token": "fresh", "token_type": "bearer" }),
    )])
    .await?;
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("session.json"), "{not json")?;
    let config = config_for(&backend, dir.path());

    run(
        &["campaign", "auth", "login", "ana@example.com", "--password", "pw"],
        &config,
    )
    .await?;

    let session = SessionStore::new(dir.path()).load()?.expect("session saved");
    assert_eq!(session.access_token, "fresh");
    Ok(())
}

mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;

use campaign_manager::import::{ImportFailure, ImportForm, ImportPhase};
use campaign_manager::types::Id;

#[tokio::test]
async fn import_posts_batch_once_and_clears_form() -> Result<()> {
    let backend = common::StubBackend::start(vec![(
        Method::POST,
        "/contacts/import",
        StatusCode::OK,
        json!({ "imported": 2, "skipped": 0, "list_id": null }),
    )])
    .await?;
    let api = backend.client(Some("tok"));

    let mut form = ImportForm::new();
    form.set_text("name,number\nAlice,123\nBob,456");
    form.toggle_tag(Id::from("t1"));

    let phase = form.submit(&api).await.expect("not already submitting");
    let result = phase.result().expect("import should succeed").clone();
    assert_eq!(result.imported, 2);
    assert_eq!(result.skipped, 0);
    assert_eq!(result.list_id, None);
    assert_eq!(result.to_string(), "2 imported, 0 skipped, no list");

    let sent = backend.requests_to(Method::POST, "/contacts/import");
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0].body,
        Some(json!({
            "contacts": [
                { "name": "Alice", "number": "123" },
                { "name": "Bob", "number": "456" }
            ],
            "tag_ids": ["t1"],
            "list_id": null
        }))
    );
    assert_eq!(sent[0].authorization.as_deref(), Some("Bearer tok"));

    assert!(form.text().is_empty());
    assert!(form.tag_ids().is_empty());
    assert!(form.list_id().is_none());

    form.acknowledge();
    assert_eq!(form.phase(), &ImportPhase::Idle);
    Ok(())
}

#[tokio::test]
async fn empty_text_never_calls_backend() -> Result<()> {
    let backend = common::StubBackend::start(vec![]).await?;
    let api = backend.client(Some("tok"));

    let mut form = ImportForm::new();
    form.set_text("");
    let phase = form.submit(&api).await.expect("not already submitting");

    assert_eq!(phase.error(), Some(&ImportFailure::EmptyPayload));
    assert!(backend.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn rows_without_numbers_count_as_empty() -> Result<()> {
    let backend = common::StubBackend::start(vec![]).await?;
    let api = backend.client(Some("tok"));

    let mut form = ImportForm::new();
    form.set_text("name,number\nAlice,\n,123");
    let phase = form.submit(&api).await.expect("not already submitting");

    assert_eq!(phase.error(), Some(&ImportFailure::EmptyPayload));
    assert!(backend.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn server_error_is_a_single_failed_attempt() -> Result<()> {
    let backend = common::StubBackend::start(vec![(
        Method::POST,
        "/contacts/import",
        StatusCode::UNPROCESSABLE_ENTITY,
        json!({ "detail": [{ "msg": "field required" }] }),
    )])
    .await?;
    let api = backend.client(Some("tok"));

    let mut form = ImportForm::new();
    form.set_text(r#"{"contacts":[{"name":"Alice","number":"123"}]}"#);
    form.select_list(Some(Id::Num(4)));

    let phase = form.submit(&api).await.expect("not already submitting");
    assert_eq!(phase.error(), Some(&ImportFailure::ImportFailed));

    let sent = backend.requests_to(Method::POST, "/contacts/import");
    assert_eq!(sent.len(), 1, "no automatic retry");
    assert_eq!(sent[0].body.as_ref().unwrap()["list_id"], 4);

    // Inputs survive so the operator can resubmit
    assert!(!form.text().is_empty());
    assert_eq!(form.list_id(), Some(&Id::Num(4)));
    Ok(())
}

#[tokio::test]
async fn expired_session_during_import() -> Result<()> {
    let backend = common::StubBackend::start(vec![(
        Method::POST,
        "/contacts/import",
        StatusCode::UNAUTHORIZED,
        json!({ "detail": "Not authenticated" }),
    )])
    .await?;
    let api = backend.client(Some("expired"));

    let mut form = ImportForm::new();
    form.set_text("Alice,123");
    let phase = form.submit(&api).await.expect("not already submitting");

    assert_eq!(phase.error(), Some(&ImportFailure::Unauthenticated));
    assert!(api.tokens().get().is_none());
    Ok(())
}

#[tokio::test]
async fn file_contents_use_the_text_path() -> Result<()> {
    let backend = common::StubBackend::start(vec![(
        Method::POST,
        "/contacts/import",
        StatusCode::OK,
        json!({ "imported": 1, "skipped": 1, "list_id": 9 }),
    )])
    .await?;
    let api = backend.client(Some("tok"));

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("contacts.json");
    std::fs::write(
        &path,
        r#"[{"name":"Alice","number":"123"},{"name":"Alice","number":"123"}]"#,
    )?;

    let mut form = ImportForm::new();
    form.load_file(&path)?;
    form.select_list(Some(Id::Num(9)));
    let phase = form.submit(&api).await.expect("not already submitting");

    assert_eq!(phase.result().unwrap().to_string(), "1 imported, 1 skipped, list 9");
    let sent = backend.requests_to(Method::POST, "/contacts/import");
    assert_eq!(sent[0].body.as_ref().unwrap()["contacts"].as_array().unwrap().len(), 2);
    Ok(())
}

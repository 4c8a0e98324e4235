//! Advanced lab workflows against a scripted generator

use async_trait::async_trait;
use promptcraft_common::{
    CredentialStore, Generator, PromptcraftError, RefinementLab, Reply, Result, StepStatus,
};
use promptcraftctl::commands::advanced::{refine_loop, run_chain};
use promptcraftctl::commands::Session;
use std::io::Cursor;
use std::sync::Mutex;

/// Replays canned replies and records every prompt it was sent.
struct Scripted {
    replies: Mutex<Vec<Result<Reply>>>,
    prompts: Mutex<Vec<String>>,
}

impl Scripted {
    fn new(replies: Vec<Result<Reply>>) -> Self {
        let mut replies = replies;
        replies.reverse();
        Self {
            replies: Mutex::new(replies),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Generator for Scripted {
    async fn generate(&self, prompt: &str) -> Result<Reply> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Ok(Reply::Content("default".into())))
    }
}

fn content(text: &str) -> Result<Reply> {
    Ok(Reply::Content(text.to_string()))
}

#[tokio::test]
async fn chain_feeds_each_answer_into_next_step() {
    let gen = Scripted::new(vec![content("Bienen bestäuben."), content("Zusammenfassung")]);
    let steps = vec!["Recherchiere Bienen".to_string(), "Fasse zusammen".to_string()];

    let (chain, result) = run_chain(&gen, &steps).await;

    assert!(result.is_ok());
    assert_eq!(
        gen.prompts(),
        vec![
            "Recherchiere Bienen".to_string(),
            "Kontext: Bienen bestäuben.\n\nAufgabe: Fasse zusammen".to_string(),
        ]
    );
    assert!(chain.steps().iter().all(|s| s.is_complete()));
    assert_eq!(chain.steps()[1].response, "Zusammenfassung");
}

#[tokio::test]
async fn chain_stops_at_failed_step() {
    let gen = Scripted::new(vec![
        content("ok"),
        Ok(Reply::Failed {
            status: 402,
            message: "Insufficient credits".into(),
        }),
        content("never"),
    ]);
    let steps = vec!["a".to_string(), "b".to_string(), "c".to_string()];

    let (chain, result) = run_chain(&gen, &steps).await;

    let err = result.unwrap_err();
    assert!(err.to_string().contains("Insufficient credits"));
    assert!(matches!(
        err.downcast_ref::<PromptcraftError>(),
        Some(PromptcraftError::Upstream { status: 402, .. })
    ));
    assert_eq!(promptcraftctl::errors::exit_code(&err), 1);
    assert_eq!(chain.len(), 2);
    assert_eq!(chain.steps()[1].status(), StepStatus::Editable);
    assert_eq!(gen.prompts().len(), 2);
}

#[tokio::test]
async fn chain_rejects_unexpected_reply_shape() {
    let gen = Scripted::new(vec![Ok(Reply::Unexpected(serde_json::json!({"choices": []})))]);
    let steps = vec!["a".to_string(), "b".to_string()];

    let (chain, result) = run_chain(&gen, &steps).await;

    let err = result.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PromptcraftError>(),
        Some(PromptcraftError::UnexpectedReply(_))
    ));
    assert!(!chain.steps()[0].is_complete());
}

#[tokio::test]
async fn refine_session_records_versions_and_loads() {
    let gen = Scripted::new(vec![content("A1"), content("A2"), content("A3")]);
    let input = Cursor::new("Erste Idee\nZweite Idee\n:load 1\n:test\n:history\n:quit\nignored\n");
    let mut out = Vec::new();
    let mut lab = RefinementLab::new();

    refine_loop(&gen, input, &mut out, &mut lab).await.unwrap();

    assert_eq!(lab.history().len(), 3);
    assert_eq!(lab.history().get(3).unwrap().prompt, "Erste Idee");
    assert_eq!(lab.history().get(3).unwrap().response, "A3");
    assert_eq!(gen.prompts(), vec!["Erste Idee", "Zweite Idee", "Erste Idee"]);

    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("Loaded v1: Erste Idee"));
    assert!(out.contains("v2 Zweite Idee"));
}

#[tokio::test]
async fn refine_failed_test_adds_no_version() {
    let gen = Scripted::new(vec![Ok(Reply::Failed {
        status: 500,
        message: "Upstream error (500): boom".into(),
    })]);
    let mut out = Vec::new();
    let mut lab = RefinementLab::new();

    refine_loop(&gen, Cursor::new("Idee\n"), &mut out, &mut lab)
        .await
        .unwrap();

    assert!(lab.history().is_empty());
    assert!(String::from_utf8(out).unwrap().contains("Fehler: Upstream error (500)"));
}

#[tokio::test]
async fn refine_aborts_when_backend_is_down() {
    let gen = Scripted::new(vec![Err(PromptcraftError::BackendUnreachable(
        "connection refused".into(),
    ))]);
    let mut out = Vec::new();
    let mut lab = RefinementLab::new();

    let err = refine_loop(&gen, Cursor::new("Idee\nNoch eine\n"), &mut out, &mut lab)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Backend not reachable"));
    assert_eq!(gen.prompts().len(), 1);
}

#[test]
fn missing_key_fails_before_network() {
    let dir = tempfile::tempdir().unwrap();
    let session = Session::new(
        Some("http://127.0.0.1:9"),
        CredentialStore::at(dir.path().join("storage.json")),
    );

    let err = session.client().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PromptcraftError>(),
        Some(PromptcraftError::MissingCredential)
    ));
}

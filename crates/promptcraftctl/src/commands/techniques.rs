//! Techniques lab: zero-shot, few-shot and chain-of-thought

use super::Session;
use crate::output;
use anyhow::{anyhow, Result};
use promptcraft_common::{score, Generator, Reply, Technique, TECHNIQUES};

/// Shown when a request yields no content
pub const NO_ANSWER: &str = "Keine Antwort";

pub fn list() {
    output::display_techniques(&TECHNIQUES);
}

fn answer_text(reply: &Reply) -> &str {
    reply.content().unwrap_or(NO_ANSWER)
}

pub async fn compare(id: &str, session: &Session) -> Result<()> {
    let technique = Technique::find(id).ok_or_else(|| {
        let known: Vec<&str> = TECHNIQUES.iter().map(|t| t.id).collect();
        anyhow!("Unknown technique '{}' (known: {})", id, known.join(", "))
    })?;
    let client = session.client()?;

    output::header(&format!("Basis-Prompt ({})", technique.name));
    println!("{}", technique.example);
    let basic = client.generate(technique.example).await?;
    output::header("Antwort");
    println!("{}", answer_text(&basic));

    output::header(&format!("Verbesserter Prompt (mit {})", technique.name));
    println!("{}", technique.enhanced);
    let enhanced = client.generate(technique.enhanced).await?;
    output::header("Antwort");
    println!("{}", answer_text(&enhanced));

    println!();
    println!("Tipp: {}", technique.tip);
    Ok(())
}

pub async fn analyze(prompt: &str, send: bool, session: &Session) -> Result<()> {
    if prompt.trim().is_empty() {
        anyhow::bail!("Prompt is empty");
    }

    let report = score(prompt);
    output::display_report(&report);

    if send {
        let client = session.client()?;
        let reply = client.generate(prompt).await?;
        output::header("Antwort der KI auf deinen Prompt");
        println!("{}", answer_text(&reply));
    }
    Ok(())
}

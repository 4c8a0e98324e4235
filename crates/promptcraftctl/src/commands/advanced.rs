//! Advanced lab: chaining, refinement and self-consistency

use super::Session;
use crate::output;
use anyhow::Result;
use promptcraft_common::{
    Chain, ConsistencyLab, Generator, PartialFailurePolicy, RefinementLab, Reply, WORKFLOWS,
};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

fn print_workflow(id: &str) {
    if let Some(w) = WORKFLOWS.iter().find(|w| w.id == id) {
        output::header(&format!("{} - {}", w.name, w.title));
        println!("{}", w.description);
        println!("Tipp: {}", w.tip);
    }
}

/// Run the given step prompts in order. Stops at the first failed step with
/// its error; the chain is returned either way so completed steps can be shown.
pub async fn run_chain<G>(generator: &G, steps: &[String]) -> (Chain, Result<()>)
where
    G: Generator + ?Sized,
{
    let mut chain = Chain::new();

    for (i, text) in steps.iter().enumerate() {
        let index = if i == 0 { 0 } else { chain.add_step() };
        if let Err(e) = chain.set_prompt(index, text.as_str()) {
            return (chain, Err(e.into()));
        }
        let ticket = match chain.begin(index) {
            Ok(ticket) => ticket,
            Err(e) => return (chain, Err(e.into())),
        };
        debug!("Chain step {} prompt: {} chars", index + 1, ticket.prompt.len());

        let reply = generator
            .generate(&ticket.prompt)
            .await
            .and_then(Reply::into_content);
        match reply {
            Ok(text) => {
                chain.complete(&ticket, text);
            }
            Err(e) => {
                warn!("Chain step {} failed: {}", index + 1, e);
                chain.fail(&ticket);
                return (chain, Err(e.into()));
            }
        }
    }

    (chain, Ok(()))
}

pub async fn chain(steps: &[String], session: &Session) -> Result<()> {
    print_workflow("chaining");
    let client = session.client()?;
    let (chain, result) = run_chain(&client, steps).await;
    output::display_chain(&chain);
    result
}

/// Drive a refinement session from line input.
///
/// Each plain line becomes the draft and is tested as the next version.
/// `:load N` copies version N back into the draft, `:test` tests the current
/// draft again, `:history` lists versions and `:quit` ends the session.
pub async fn refine_loop<G, R, W>(
    generator: &G,
    input: R,
    out: &mut W,
    lab: &mut RefinementLab,
) -> Result<()>
where
    G: Generator + ?Sized,
    R: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line == ":quit" {
            break;
        }
        if line == ":test" {
            if lab.draft.trim().is_empty() {
                writeln!(out, "Nothing to test yet")?;
            } else {
                test_draft(generator, out, lab).await?;
            }
            continue;
        }
        if line == ":history" {
            for entry in lab.history().entries() {
                writeln!(out, "v{} {}", entry.version, entry.prompt)?;
            }
            continue;
        }
        if let Some(arg) = line.strip_prefix(":load") {
            let version: usize = match arg.trim().parse() {
                Ok(v) => v,
                Err(_) => {
                    writeln!(out, "Usage: :load <version>")?;
                    continue;
                }
            };
            match lab.load(version) {
                Ok(prompt) => writeln!(out, "Loaded v{}: {}", version, prompt)?,
                Err(e) => writeln!(out, "{}", e)?,
            }
            continue;
        }

        lab.draft = line.to_string();
        test_draft(generator, out, lab).await?;
    }
    Ok(())
}

async fn test_draft<G, W>(generator: &G, out: &mut W, lab: &mut RefinementLab) -> Result<()>
where
    G: Generator + ?Sized,
    W: Write,
{
    let prompt = lab.prepare()?;
    match generator.generate(&prompt).await {
        Ok(Reply::Content(text)) => {
            let version = lab.record(prompt, text.as_str());
            writeln!(out, "v{}:\n{}", version, text)?;
        }
        Ok(other) => writeln!(out, "{}", other.display_text())?,
        Err(e) if e.is_transport() => return Err(e.into()),
        Err(e) => writeln!(out, "Fehler: {}", e)?,
    }
    Ok(())
}

pub async fn refine(session: &Session) -> Result<()> {
    print_workflow("refinement");
    let client = session.client()?;
    println!("Enter a prompt per line (:load N, :test, :history, :quit)");

    let mut lab = RefinementLab::new();
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    refine_loop(&client, stdin.lock(), &mut stdout, &mut lab).await?;

    output::display_history(lab.history());
    Ok(())
}

pub async fn consistency(prompt: &str, per_run: bool, session: &Session) -> Result<()> {
    print_workflow("consistency");
    let client = session.client()?;

    let policy = if per_run {
        PartialFailurePolicy::PerRun
    } else {
        PartialFailurePolicy::AllOrNothing
    };
    let mut lab = ConsistencyLab::new(policy);
    let run = lab.execute(&client, prompt).await?;
    output::display_consistency(&run);
    Ok(())
}

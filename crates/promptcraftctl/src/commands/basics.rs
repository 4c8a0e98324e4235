//! Basics lab: the six elements of a prompt

use super::Session;
use crate::cli::ComposeArgs;
use crate::output;
use anyhow::Result;
use promptcraft_common::{Generator, PromptDraft, PromptField};

pub fn draft_from_args(args: &ComposeArgs) -> PromptDraft {
    let mut draft = PromptDraft::new();
    draft.set(PromptField::Task, args.task.clone());
    let optional = [
        (PromptField::Context, &args.context),
        (PromptField::Format, &args.format),
        (PromptField::Example, &args.example),
        (PromptField::Persona, &args.persona),
        (PromptField::Tone, &args.tone),
    ];
    for (field, value) in optional {
        if let Some(value) = value {
            draft.set(field, value.clone());
        }
    }
    draft
}

pub async fn compose(args: ComposeArgs, session: &Session) -> Result<()> {
    let draft = draft_from_args(&args);
    output::display_draft(&draft);

    if args.dry_run {
        return Ok(());
    }

    let client = session.client()?;
    if !draft.is_filled(PromptField::Task) {
        anyhow::bail!("The task field is required");
    }

    let reply = client.generate(&draft.build_prompt()).await?;
    output::header("KI Antwort");
    output::display_reply(&reply);

    if reply.is_success() {
        output::display_reflection();
    }
    Ok(())
}

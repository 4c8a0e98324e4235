//! Prompt chaining state machine tests.

use promptcraft_common::chain::{Chain, StepStatus};
use promptcraft_common::error::PromptcraftError;

fn completed_first_step(response: &str) -> Chain {
    let mut chain = Chain::new();
    chain.set_prompt(0, "Recherchiere Fakten zu Bienen").unwrap();
    let ticket = chain.begin(0).unwrap();
    assert!(chain.complete(&ticket, response));
    chain
}

#[test]
fn chain_starts_with_one_empty_step() {
    let chain = Chain::new();
    assert_eq!(chain.len(), 1);
    assert_eq!(chain.steps()[0].status(), StepStatus::Empty);
    assert!(chain.is_unlocked(0));
}

#[test]
fn later_step_is_locked_until_previous_completes() {
    let mut chain = Chain::new();
    chain.set_prompt(0, "Recherchiere").unwrap();
    let second = chain.add_step();

    assert!(!chain.is_unlocked(second));
    assert!(matches!(
        chain.set_prompt(second, "Analysiere"),
        Err(PromptcraftError::StepLocked(1))
    ));
    assert!(matches!(chain.begin(second), Err(PromptcraftError::StepLocked(1))));

    // Running is not completed
    let ticket = chain.begin(0).unwrap();
    assert!(matches!(chain.begin(second), Err(PromptcraftError::StepLocked(1))));

    chain.complete(&ticket, "Fakten");
    assert!(chain.is_unlocked(second));
    chain.set_prompt(second, "Analysiere").unwrap();
    assert!(chain.begin(second).is_ok());
}

#[test]
fn empty_prompt_cannot_run() {
    let mut chain = Chain::new();
    assert!(matches!(chain.begin(0), Err(PromptcraftError::EmptyPrompt)));
    chain.set_prompt(0, "   ").unwrap();
    assert!(matches!(chain.begin(0), Err(PromptcraftError::EmptyPrompt)));
}

#[test]
fn step_cannot_run_twice_concurrently() {
    let mut chain = Chain::new();
    chain.set_prompt(0, "Recherchiere").unwrap();
    let _ticket = chain.begin(0).unwrap();
    assert!(matches!(chain.begin(0), Err(PromptcraftError::StepBusy(0))));
}

#[test]
fn busy_step_does_not_block_other_steps() {
    let mut chain = completed_first_step("Fakten");
    let second = chain.add_step();
    chain.set_prompt(second, "Analysiere").unwrap();

    // Re-run step 0 while step 1 runs too
    let first_ticket = chain.begin(0).unwrap();
    let second_ticket = chain.begin(second).unwrap();
    assert!(chain.complete(&second_ticket, "Analyse"));
    assert!(chain.complete(&first_ticket, "Neue Fakten"));
}

#[test]
fn first_step_prompt_is_sent_verbatim() {
    let mut chain = Chain::new();
    chain.set_prompt(0, "Recherchiere Fakten zu Bienen").unwrap();
    let ticket = chain.begin(0).unwrap();
    assert_eq!(ticket.prompt, "Recherchiere Fakten zu Bienen");
}

#[test]
fn effective_prompt_carries_previous_response() {
    let mut chain = completed_first_step("Bienen bestäuben Pflanzen.");
    let second = chain.add_step();
    chain.set_prompt(second, "Fasse in einem Satz zusammen").unwrap();

    let ticket = chain.begin(second).unwrap();
    assert_eq!(
        ticket.prompt,
        "Kontext: Bienen bestäuben Pflanzen.\n\nAufgabe: Fasse in einem Satz zusammen"
    );
}

#[test]
fn stale_response_after_edit_is_discarded() {
    let mut chain = Chain::new();
    chain.set_prompt(0, "Erste Fassung").unwrap();
    let ticket = chain.begin(0).unwrap();

    chain.set_prompt(0, "Zweite Fassung").unwrap();
    assert_eq!(chain.steps()[0].status(), StepStatus::Editable);

    assert!(!chain.complete(&ticket, "Antwort auf erste Fassung"));
    assert!(chain.steps()[0].response.is_empty());
    assert!(!chain.steps()[0].is_complete());
}

#[test]
fn rerun_keeps_previous_response_until_new_one_arrives() {
    let mut chain = completed_first_step("alt");
    let ticket = chain.begin(0).unwrap();
    assert_eq!(chain.steps()[0].response, "alt");

    assert!(chain.fail(&ticket));
    assert_eq!(chain.steps()[0].response, "alt");
    assert_eq!(chain.steps()[0].status(), StepStatus::Completed);
}

#[test]
fn unknown_step_is_reported() {
    let mut chain = Chain::new();
    assert!(matches!(chain.begin(5), Err(PromptcraftError::UnknownStep(5))));
}

#[test]
fn rerunning_a_step_resets_later_steps() {
    let mut chain = completed_first_step("Fakten");
    let second = chain.add_step();
    chain.set_prompt(second, "Analysiere").unwrap();
    let ticket = chain.begin(second).unwrap();
    assert!(chain.complete(&ticket, "Analyse"));
    let third = chain.add_step();
    assert!(chain.is_unlocked(third));

    let rerun = chain.begin(0).unwrap();
    assert!(chain.complete(&rerun, "Neue Fakten"));

    assert_eq!(chain.steps()[second].status(), StepStatus::Editable);
    assert_eq!(chain.steps()[second].response, "Analyse");
    assert!(!chain.is_unlocked(third));

    let ticket = chain.begin(second).unwrap();
    assert_eq!(ticket.prompt, "Kontext: Neue Fakten\n\nAufgabe: Analysiere");
}

#[test]
fn rerunning_a_step_drops_later_request_in_flight() {
    let mut chain = completed_first_step("Fakten");
    let second = chain.add_step();
    chain.set_prompt(second, "Analysiere").unwrap();

    let first_ticket = chain.begin(0).unwrap();
    let second_ticket = chain.begin(second).unwrap();
    assert!(chain.complete(&first_ticket, "Neue Fakten"));

    assert!(!chain.complete(&second_ticket, "Analyse alter Fakten"));
    assert!(chain.steps()[second].response.is_empty());
    assert_eq!(chain.steps()[second].status(), StepStatus::Editable);
}

//! Self-consistency: the same prompt three times, answers side by side.
//!
//! The three requests are issued together and joined; results are indexed
//! by submission order (1..=3), never by completion order.

use crate::client::Generator;
use crate::error::{PromptcraftError, Result};
use crate::rpc::Reply;
use crate::token::{Generation, RequestToken};
use std::collections::HashMap;
use tracing::warn;

pub const RUNS_PER_BATCH: usize = 3;

/// What to do when some of the three runs fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PartialFailurePolicy {
    /// One failed run fails the whole batch
    #[default]
    AllOrNothing,
    /// Keep successful runs, mark failed ones
    PerRun,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Answer(String),
    Failed(String),
}

impl RunOutcome {
    pub fn answer(&self) -> Option<&str> {
        match self {
            RunOutcome::Answer(text) => Some(text),
            RunOutcome::Failed(_) => None,
        }
    }

    pub fn display_text(&self) -> String {
        match self {
            RunOutcome::Answer(text) => text.clone(),
            RunOutcome::Failed(msg) => format!("Fehler: {}", msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    /// 1-based submission index
    pub run_index: usize,
    pub outcome: RunOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsistencyRun {
    pub prompt: String,
    pub results: Vec<RunResult>,
}

impl ConsistencyRun {
    pub fn failed_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.outcome.answer().is_none())
            .count()
    }

    /// Size of the largest group of matching answers (trimmed, case-folded).
    pub fn agreement(&self) -> usize {
        let mut groups: HashMap<String, usize> = HashMap::new();
        for answer in self.results.iter().filter_map(|r| r.outcome.answer()) {
            *groups.entry(answer.trim().to_lowercase()).or_default() += 1;
        }
        groups.values().copied().max().unwrap_or(0)
    }
}

fn outcome_of(result: Result<Reply>) -> RunOutcome {
    match result {
        Ok(Reply::Content(text)) => RunOutcome::Answer(text),
        Ok(Reply::Failed { message, .. }) => RunOutcome::Failed(message),
        Ok(other @ Reply::Unexpected(_)) => RunOutcome::Failed(other.display_text()),
        Err(e) => RunOutcome::Failed(e.to_string()),
    }
}

/// Fire three identical requests and wait for all of them.
pub async fn run_consistency<G>(
    generator: &G,
    prompt: &str,
    policy: PartialFailurePolicy,
) -> Result<ConsistencyRun>
where
    G: Generator + ?Sized,
{
    if prompt.trim().is_empty() {
        return Err(PromptcraftError::EmptyPrompt);
    }

    let (first, second, third) = tokio::join!(
        generator.generate(prompt),
        generator.generate(prompt),
        generator.generate(prompt),
    );

    let results: Vec<RunResult> = [first, second, third]
        .into_iter()
        .enumerate()
        .map(|(i, result)| RunResult {
            run_index: i + 1,
            outcome: outcome_of(result),
        })
        .collect();

    let run = ConsistencyRun {
        prompt: prompt.to_string(),
        results,
    };

    let failed = run.failed_count();
    if failed > 0 {
        warn!("Consistency batch: {} of {} runs failed", failed, RUNS_PER_BATCH);
        if policy == PartialFailurePolicy::AllOrNothing {
            return Err(PromptcraftError::BatchFailed {
                failed,
                total: RUNS_PER_BATCH,
            });
        }
    }

    Ok(run)
}

/// Holds the batch currently on screen and drops superseded batches.
#[derive(Debug, Clone, Default)]
pub struct ConsistencyLab {
    pub policy: PartialFailurePolicy,
    generation: Generation,
    current: Option<ConsistencyRun>,
}

impl ConsistencyLab {
    pub fn new(policy: PartialFailurePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Start a batch; any batch still in flight becomes stale.
    pub fn start(&mut self) -> RequestToken {
        self.generation.issue()
    }

    /// Apply a finished batch. Returns false when the token is stale.
    pub fn finish(&mut self, token: RequestToken, run: ConsistencyRun) -> bool {
        if !self.generation.is_current(token) {
            return false;
        }
        self.current = Some(run);
        true
    }

    pub fn current(&self) -> Option<&ConsistencyRun> {
        self.current.as_ref()
    }

    /// Start, run and apply one batch.
    ///
    /// Sequential: `&mut self` is held across the await, so nothing can
    /// supersede the batch. Drivers that overlap batches use `start` and
    /// `finish` and drop results for which `finish` returns false.
    pub async fn execute<G>(&mut self, generator: &G, prompt: &str) -> Result<ConsistencyRun>
    where
        G: Generator + ?Sized,
    {
        let token = self.start();
        let run = run_consistency(generator, prompt, self.policy).await?;
        let applied = self.finish(token, run.clone());
        debug_assert!(applied, "sequential batch cannot go stale");
        Ok(run)
    }
}

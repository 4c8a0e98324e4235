//! Shared types and logic for PromptCraft components.
//!
//! The gateway (`promptcraftd`) and the lab client (`promptcraftctl`) both
//! build on this crate: wire types, the prompt quality heuristic and the
//! three orchestration workflows live here.

pub mod chain;
pub mod client;
pub mod consistency;
pub mod credentials;
pub mod draft;
pub mod error;
pub mod quality;
pub mod refinement;
pub mod rpc;
pub mod techniques;
pub mod token;

pub use chain::{Chain, ChainStep, StepStatus, StepTicket};
pub use client::{GatewayClient, Generator, DEFAULT_GATEWAY_URL};
pub use consistency::{
    run_consistency, ConsistencyLab, ConsistencyRun, PartialFailurePolicy, RunOutcome,
    RunResult, RUNS_PER_BATCH,
};
pub use credentials::{mask_key, CredentialStore, API_KEY_STORAGE_KEY};
pub use draft::{FieldCategory, PromptDraft, PromptField};
pub use error::{PromptcraftError, Result};
pub use quality::{score, Issue, IssueKind, QualityReport, RuleSet, ScoreBand, Severity};
pub use refinement::{RefinementEntry, RefinementLab, RefinementLog};
pub use rpc::{ErrorBody, GenerateRequest, HealthResponse, Reply};
pub use techniques::{Technique, Workflow, TECHNIQUES, WORKFLOWS};
pub use token::{Generation, RequestToken};

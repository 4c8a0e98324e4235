//! Static prompt quality heuristic.
//!
//! Scores a prompt against a fixed rule set without calling the model.
//! Penalties are subtracted from a base of 100 and the result is floored at 0.
//! Issues come back in rule order; only triggered rules are reported.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Base score before penalties
pub const BASE_SCORE: i32 = 100;

/// Prompts shorter than this (in characters) are flagged
pub const MIN_PROMPT_CHARS: usize = 20;

/// Prompts with more words than this should carry a context marker
pub const CONTEXT_WORD_THRESHOLD: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    /// ASCII tag for terminal output
    pub fn tag(&self) -> &'static str {
        match self {
            Severity::Error => "[ERROR]",
            Severity::Warning => "[WARN]",
            Severity::Info => "[TIP]",
        }
    }
}

/// The rules of the heuristic, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    TooShort,
    VagueWording,
    MissingFormat,
    NegativePhrasing,
    MissingContext,
}

impl IssueKind {
    pub fn severity(&self) -> Severity {
        match self {
            IssueKind::TooShort => Severity::Warning,
            IssueKind::VagueWording => Severity::Error,
            IssueKind::MissingFormat => Severity::Info,
            IssueKind::NegativePhrasing => Severity::Warning,
            IssueKind::MissingContext => Severity::Info,
        }
    }

    pub fn penalty(&self) -> i32 {
        match self {
            IssueKind::TooShort => 20,
            IssueKind::VagueWording => 15,
            IssueKind::MissingFormat => 10,
            IssueKind::NegativePhrasing => 10,
            IssueKind::MissingContext => 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityReport {
    /// 0..=100
    pub score: u8,
    pub issues: Vec<Issue>,
}

impl QualityReport {
    pub fn has(&self, kind: IssueKind) -> bool {
        self.issues.iter().any(|i| i.kind == kind)
    }

    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.score)
    }
}

/// Display bucket for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            ScoreBand::Good
        } else if score >= 60 {
            ScoreBand::Fair
        } else {
            ScoreBand::Poor
        }
    }
}

/// Word lists, patterns and messages for one language.
#[derive(Debug, Clone)]
pub struct RuleSet {
    vague_words: Vec<&'static str>,
    format_pattern: Regex,
    negation_pattern: Regex,
    context_markers: Vec<&'static str>,
    messages: Messages,
}

#[derive(Debug, Clone)]
struct Messages {
    too_short: &'static str,
    vague: &'static str,
    format: &'static str,
    negation: &'static str,
    context: &'static str,
}

impl RuleSet {
    /// Rules used by the labs.
    pub fn german() -> Self {
        Self {
            vague_words: vec!["gut", "schön", "nice", "irgendwie", "vielleicht"],
            format_pattern: case_insensitive("format|struktur|länge|wörter|sätze|liste|tabelle"),
            negation_pattern: case_insensitive("nicht|kein|ohne|vermeide"),
            context_markers: vec!["Kontext:", "Hintergrund:"],
            messages: Messages {
                too_short: "Prompt ist sehr kurz - sei spezifischer!",
                vague: "Vermeide vage Begriffe wie \"gut\" oder \"schön\" - sei konkret!",
                format: "Tipp: Gib ein gewünschtes Format an (z.B. \"in 3 Sätzen\", \"als Liste\")",
                negation: "Sag lieber WAS du willst, statt was du NICHT willst",
                context: "Bei komplexen Aufgaben: Gib Kontext oder Hintergrund an",
            },
        }
    }

    pub fn english() -> Self {
        Self {
            vague_words: vec!["good", "nice", "somehow", "maybe", "stuff"],
            format_pattern: case_insensitive("format|structure|length|words|sentences|list|table"),
            negation_pattern: case_insensitive(r"\bnot\b|\bno\b|without|avoid"),
            context_markers: vec!["Context:", "Background:"],
            messages: Messages {
                too_short: "Prompt is very short - be more specific!",
                vague: "Avoid vague words like \"good\" or \"nice\" - be concrete!",
                format: "Tip: name the output format (e.g. \"in 3 sentences\", \"as a list\")",
                negation: "Say WHAT you want instead of what you do NOT want",
                context: "For complex tasks: add context or background",
            },
        }
    }

    /// Score a prompt. Pure: equal input gives an equal report.
    pub fn score(&self, prompt: &str) -> QualityReport {
        let mut issues = Vec::new();

        if prompt.chars().count() < MIN_PROMPT_CHARS {
            issues.push(self.issue(IssueKind::TooShort));
        }

        let lower = prompt.to_lowercase();
        if self.vague_words.iter().any(|w| lower.contains(w)) {
            issues.push(self.issue(IssueKind::VagueWording));
        }

        if !self.format_pattern.is_match(prompt) {
            issues.push(self.issue(IssueKind::MissingFormat));
        }

        if self.negation_pattern.is_match(prompt) {
            issues.push(self.issue(IssueKind::NegativePhrasing));
        }

        // Word count splits on single spaces, so runs of spaces count as words.
        let words = prompt.split(' ').count();
        if words > CONTEXT_WORD_THRESHOLD && !self.context_markers.iter().any(|m| prompt.contains(m))
        {
            issues.push(self.issue(IssueKind::MissingContext));
        }

        let penalty: i32 = issues.iter().map(|i| i.kind.penalty()).sum();
        let score = (BASE_SCORE - penalty).clamp(0, BASE_SCORE) as u8;

        QualityReport { score, issues }
    }

    fn issue(&self, kind: IssueKind) -> Issue {
        let message = match kind {
            IssueKind::TooShort => self.messages.too_short,
            IssueKind::VagueWording => self.messages.vague,
            IssueKind::MissingFormat => self.messages.format,
            IssueKind::NegativePhrasing => self.messages.negation,
            IssueKind::MissingContext => self.messages.context,
        };
        Issue {
            kind,
            severity: kind.severity(),
            message: message.to_string(),
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::german()
    }
}

fn case_insensitive(pattern: &str) -> Regex {
    Regex::new(&format!("(?i){}", pattern)).unwrap()
}

/// Score with the default (German) rule set.
pub fn score(prompt: &str) -> QualityReport {
    static RULES: OnceLock<RuleSet> = OnceLock::new();
    RULES.get_or_init(RuleSet::german).score(prompt)
}

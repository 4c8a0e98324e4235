//! Output formatting - ASCII-only terminal output

use owo_colors::OwoColorize;
use promptcraft_common::{
    Chain, ConsistencyRun, FieldCategory, PromptDraft, PromptField, QualityReport,
    RefinementLog, Reply, ScoreBand, Severity, StepStatus, Technique,
};

pub const SEPARATOR: &str = "------------------------------------------------------------";

pub fn header(title: &str) {
    println!();
    println!("{}", title.bold());
    println!("{}", SEPARATOR.dimmed());
}

/// Display an error
pub fn display_error(message: &str) {
    eprintln!();
    eprintln!("[ERROR] {}", message.red());
    eprintln!();
}

pub fn display_reply(reply: &Reply) {
    match reply {
        Reply::Content(text) => println!("{}", text),
        other => println!("{}", other.display_text().bright_red()),
    }
}

pub fn display_draft(draft: &PromptDraft) {
    header("Prompt-Elemente");
    for (i, field) in PromptField::ALL.iter().enumerate() {
        let mark = if draft.is_filled(*field) {
            "[x]".bright_green().to_string()
        } else {
            "[ ]".dimmed().to_string()
        };
        let category = match field.category() {
            FieldCategory::Essential => field.category().label().bright_green().to_string(),
            FieldCategory::Important => field.category().label().cyan().to_string(),
            FieldCategory::NiceToHave => field.category().label().magenta().to_string(),
        };
        println!("{} {}. {:<9} ({})", mark, i + 1, field.title(), category);
        if !draft.is_filled(*field) {
            println!("       {}", field.tip().dimmed());
        }
    }
    println!();
    println!("{}% vollständig", draft.completion_percent());

    header("Dein zusammengesetzter Prompt");
    let prompt = draft.build_prompt();
    if prompt.is_empty() {
        println!("{}", "Fülle die Felder aus, um deinen Prompt zu sehen...".dimmed());
    } else {
        println!("{}", prompt);
    }
}

pub fn display_reflection() {
    header("Reflexionsfragen");
    println!("  * Hat die Antwort deine Erwartungen erfüllt?");
    println!("  * Welche Prompt-Elemente haben den größten Einfluss gehabt?");
    println!("  * Was würdest du beim nächsten Mal anders machen?");
}

pub fn display_techniques(techniques: &[Technique]) {
    header("Techniken");
    for t in techniques {
        println!("{:<18} {}", t.id.cyan(), t.name.bold());
        println!("{:<18} {}", "", t.description);
    }
}

pub fn display_report(report: &QualityReport) {
    let score = format!("{}/100", report.score);
    let score = match report.band() {
        ScoreBand::Good => score.bright_green().to_string(),
        ScoreBand::Fair => score.yellow().to_string(),
        ScoreBand::Poor => score.bright_red().to_string(),
    };

    header("Prompt-Qualität");
    println!("Score: {}", score);
    for issue in &report.issues {
        let tag = match issue.severity {
            Severity::Error => issue.severity.tag().bright_red().to_string(),
            Severity::Warning => issue.severity.tag().yellow().to_string(),
            Severity::Info => issue.severity.tag().cyan().to_string(),
        };
        println!("  {} {}", tag, issue.message);
    }
}

pub fn display_chain(chain: &Chain) {
    header("Prompt Chaining");
    for step in chain.steps() {
        let status = match step.status() {
            StepStatus::Completed => "[DONE]".bright_green().to_string(),
            StepStatus::Running => "[RUNNING]".yellow().to_string(),
            StepStatus::Editable => "[READY]".cyan().to_string(),
            StepStatus::Empty => "[EMPTY]".dimmed().to_string(),
        };
        println!("{} Schritt {}: {}", status, step.index + 1, step.prompt);
        if !step.response.is_empty() {
            for line in step.response.lines() {
                println!("    {}", line);
            }
        }
    }
}

pub fn display_history(log: &RefinementLog) {
    header("Versionen");
    if log.is_empty() {
        println!("{}", "Noch keine Versionen getestet.".dimmed());
        return;
    }
    for entry in log.entries() {
        println!(
            "{} {} {}",
            format!("v{}", entry.version).cyan(),
            entry.timestamp.format("%H:%M:%S").to_string().dimmed(),
            entry.prompt
        );
    }
}

pub fn display_consistency(run: &ConsistencyRun) {
    header("Self-Consistency");
    for result in &run.results {
        println!("{}", format!("Durchlauf {}", result.run_index).bold());
        match result.outcome.answer() {
            Some(answer) => println!("{}", answer),
            None => println!("{}", result.outcome.display_text().bright_red()),
        }
        println!("{}", SEPARATOR.dimmed());
    }
    let agreement = run.agreement();
    let summary = format!("Übereinstimmung: {} von {}", agreement, run.results.len());
    if agreement >= 2 {
        println!("{}", summary.bright_green());
    } else {
        println!("{}", summary.yellow());
    }
}

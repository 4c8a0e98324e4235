//! The six-field prompt draft of the basics lab.

use serde::{Deserialize, Serialize};

/// How much a field matters for a good prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldCategory {
    Essential,
    Important,
    NiceToHave,
}

impl FieldCategory {
    pub fn label(&self) -> &'static str {
        match self {
            FieldCategory::Essential => "Essenziell",
            FieldCategory::Important => "Wichtig",
            FieldCategory::NiceToHave => "Nice to have",
        }
    }
}

/// Draft fields, in the order they are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptField {
    Task,
    Context,
    Format,
    Example,
    Persona,
    Tone,
}

impl PromptField {
    pub const ALL: [PromptField; 6] = [
        PromptField::Task,
        PromptField::Context,
        PromptField::Format,
        PromptField::Example,
        PromptField::Persona,
        PromptField::Tone,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            PromptField::Task => "Aufgabe",
            PromptField::Context => "Kontext",
            PromptField::Format => "Format",
            PromptField::Example => "Beispiel",
            PromptField::Persona => "Persona",
            PromptField::Tone => "Tonfall",
        }
    }

    pub fn question(&self) -> &'static str {
        match self {
            PromptField::Task => "Was genau will ich erreichen?",
            PromptField::Context => "Um was geht's?",
            PromptField::Format => "Wie will ich meine Ausgabe haben?",
            PromptField::Example => "Ctrl+C -> Ctrl+V",
            PromptField::Persona => "Wer soll antworten?",
            PromptField::Tone => "Welche Emotionen will ich?",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            PromptField::Task => {
                "z.B. \"Schreibe eine E-Mail an mein Team über die neue Projektstruktur\""
            }
            PromptField::Context => {
                "z.B. \"Wir haben unser Projekt in 3 Arbeitspakete aufgeteilt: UX, Backend, Frontend\""
            }
            PromptField::Format => "z.B. \"Formelle E-Mail, ca. 200 Wörter, mit Bullet Points\"",
            PromptField::Example => "z.B. \"Ähnlich wie: 'Liebes Team, ich möchte euch über...'\"",
            PromptField::Persona => {
                "z.B. \"Du bist ein erfahrener Projektmanager mit 10 Jahren Erfahrung\""
            }
            PromptField::Tone => "z.B. \"Professionell aber freundlich, motivierend\"",
        }
    }

    pub fn category(&self) -> FieldCategory {
        match self {
            PromptField::Task => FieldCategory::Essential,
            PromptField::Context | PromptField::Format => FieldCategory::Important,
            PromptField::Example | PromptField::Persona | PromptField::Tone => {
                FieldCategory::NiceToHave
            }
        }
    }

    pub fn tip(&self) -> &'static str {
        match self {
            PromptField::Task => {
                "Sei spezifisch! Eine klare Aufgabe ist die Grundlage für gute Ergebnisse."
            }
            PromptField::Context => {
                "Kontext hilft der KI, die Situation zu verstehen und relevanter zu antworten."
            }
            PromptField::Format => "Gib das gewünschte Format vor - Länge, Struktur, Stil.",
            PromptField::Example => "Beispiele zeigen der KI genau, was du möchtest.",
            PromptField::Persona => "Eine Persona gibt der KI eine Perspektive und Expertise.",
            PromptField::Tone => {
                "Der Tonfall bestimmt, wie die Nachricht beim Empfänger ankommt."
            }
        }
    }
}

/// Free-text values for each field. Only the task is needed to submit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptDraft {
    pub task: String,
    pub context: String,
    pub format: String,
    pub example: String,
    pub persona: String,
    pub tone: String,
}

impl PromptDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: PromptField) -> &str {
        match field {
            PromptField::Task => &self.task,
            PromptField::Context => &self.context,
            PromptField::Format => &self.format,
            PromptField::Example => &self.example,
            PromptField::Persona => &self.persona,
            PromptField::Tone => &self.tone,
        }
    }

    pub fn set(&mut self, field: PromptField, value: impl Into<String>) {
        let slot = match field {
            PromptField::Task => &mut self.task,
            PromptField::Context => &mut self.context,
            PromptField::Format => &mut self.format,
            PromptField::Example => &mut self.example,
            PromptField::Persona => &mut self.persona,
            PromptField::Tone => &mut self.tone,
        };
        *slot = value.into();
    }

    pub fn is_filled(&self, field: PromptField) -> bool {
        !self.get(field).trim().is_empty()
    }

    /// Assemble the final prompt. Empty fields are skipped.
    ///
    /// Order: persona, context, task, format, tone, example.
    pub fn build_prompt(&self) -> String {
        let mut prompt = String::new();
        if !self.persona.is_empty() {
            prompt.push_str(&format!("{}\n\n", self.persona));
        }
        if !self.context.is_empty() {
            prompt.push_str(&format!("Kontext: {}\n\n", self.context));
        }
        if !self.task.is_empty() {
            prompt.push_str(&format!("Aufgabe: {}\n", self.task));
        }
        if !self.format.is_empty() {
            prompt.push_str(&format!("Format: {}\n", self.format));
        }
        if !self.tone.is_empty() {
            prompt.push_str(&format!("Tonfall: {}\n", self.tone));
        }
        if !self.example.is_empty() {
            prompt.push_str(&format!("\nBeispiel: {}", self.example));
        }
        prompt
    }

    /// Share of non-blank fields, 0..=100
    pub fn completion_percent(&self) -> u8 {
        let filled = PromptField::ALL
            .iter()
            .filter(|f| self.is_filled(**f))
            .count();
        ((filled as f64 / PromptField::ALL.len() as f64) * 100.0).round() as u8
    }

    pub fn can_submit(&self, has_key: bool) -> bool {
        has_key && self.is_filled(PromptField::Task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(PromptField::Task.category(), FieldCategory::Essential);
        assert_eq!(PromptField::Format.category(), FieldCategory::Important);
        assert_eq!(PromptField::Tone.category().label(), "Nice to have");
    }

    #[test]
    fn test_set_and_get_roundtrip_every_field() {
        let mut draft = PromptDraft::new();
        for field in PromptField::ALL {
            draft.set(field, field.title());
        }
        for field in PromptField::ALL {
            assert_eq!(draft.get(field), field.title());
        }
    }
}

//! Lesson content for the techniques and advanced labs.

/// A prompting technique shown as a base/enhanced pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Technique {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub example: &'static str,
    pub enhanced: &'static str,
    pub tip: &'static str,
}

pub const TECHNIQUES: [Technique; 3] = [
    Technique {
        id: "zero-shot",
        name: "Zero-Shot Prompting",
        description: "Direkte Anweisung ohne Beispiele - am einfachsten, aber oft weniger präzise",
        example: "Erkläre, was Fotosynthese ist.",
        enhanced: "Erkläre in 3 prägnanten Sätzen, was Fotosynthese ist und warum sie für das Leben auf der Erde wichtig ist.",
        tip: "Sei spezifisch! Je klarer deine Anweisung, desto besser das Ergebnis.",
    },
    Technique {
        id: "few-shot",
        name: "Few-Shot Prompting",
        description: "Zeige 2-5 Beispiele, damit die KI das Muster versteht",
        example: "Klassifiziere die Stimmung:\nText: \"Ich liebe diesen Film!\"\nStimmung: Positiv\n\nText: \"Das war schrecklich.\"\nStimmung:",
        enhanced: "Klassifiziere die Stimmung:\nText: \"Ich liebe diesen Film!\"\nStimmung: Positiv\n\nText: \"Das war schrecklich.\"\nStimmung: Negativ\n\nText: \"Ganz okay, nichts Besonderes.\"\nStimmung: Neutral\n\nText: \"Absolut fantastisch!\"\nStimmung:",
        tip: "Wähle repräsentative Beispiele, die das gewünschte Muster klar zeigen.",
    },
    Technique {
        id: "chain-of-thought",
        name: "Chain-of-Thought (CoT)",
        description: "Bitte die KI, Schritt für Schritt zu denken - ideal für komplexe Aufgaben",
        example: "Wenn ein Zug 120 km in 2 Stunden fährt, wie schnell ist er?",
        enhanced: "Wenn ein Zug 120 km in 2 Stunden fährt, wie schnell ist er?\n\nDenke Schritt für Schritt:\n1. Welche Formel brauchen wir?\n2. Setze die Werte ein\n3. Berechne das Ergebnis\n4. Gib die Antwort mit Einheit",
        tip: "Füge \"Lass uns Schritt für Schritt denken\" oder \"Erkläre dein Vorgehen\" hinzu.",
    },
];

impl Technique {
    pub fn find(id: &str) -> Option<&'static Technique> {
        TECHNIQUES.iter().find(|t| t.id == id)
    }
}

/// An orchestration workflow of the advanced lab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Workflow {
    pub id: &'static str,
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub tip: &'static str,
}

pub const WORKFLOWS: [Workflow; 3] = [
    Workflow {
        id: "chaining",
        name: "Prompt Chaining",
        title: "Workflow Orchestrierung",
        description: "Große Sprachmodelle verlieren bei extrem langen Aufgaben oft den Fokus. Durch Chaining zerlegst du eine komplexe Mission in logische Teilschritte. Der Output von Schritt A wird zum Input für Schritt B.",
        tip: "Perfekt für Workflows wie: Recherche -> Analyse -> Schreibauftrag.",
    },
    Workflow {
        id: "refinement",
        name: "Iterative Refinement",
        title: "Evolutives Prompting",
        description: "Der perfekte Prompt entsteht selten beim ersten Mal. Du speicherst jede Version und vergleichst die Ergebnisse.",
        tip: "Ändere pro Iteration nur eine Variable, um den Effekt zu isolieren.",
    },
    Workflow {
        id: "consistency",
        name: "Self-Consistency",
        title: "Validierung durch Mehrheit",
        description: "Mit Self-Consistency lässt du die KI die Aufgabe dreimal unabhängig lösen. Wenn zwei oder drei Ergebnisse übereinstimmen, ist ein korrektes Resultat deutlich wahrscheinlicher.",
        tip: "Nutze dies vor allem für Mathe, Logik oder Code-Reviews.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::{score, IssueKind};

    #[test]
    fn test_find_technique() {
        assert_eq!(Technique::find("few-shot").map(|t| t.name), Some("Few-Shot Prompting"));
        assert!(Technique::find("tree-of-thought").is_none());
    }

    #[test]
    fn test_enhanced_zero_shot_names_a_format() {
        let zero = Technique::find("zero-shot").unwrap();
        assert!(score(zero.example).has(IssueKind::MissingFormat));
        assert!(!score(zero.enhanced).has(IssueKind::MissingFormat));
    }
}

//! Fill session: the "use this prompt" workflow.
//!
//! A session is opened on one template, collects values incrementally,
//! renders previews, and is consumed to produce the final text. Values live
//! only as long as the session.

use serde::Serialize;

use super::values::{FillMode, VariableValues, render};
use super::variables::{VariableSet, extract_variables};

/// Editing state for filling one template.
#[derive(Debug, Clone)]
pub struct FillSession {
    template: String,
    variables: VariableSet,
    values: VariableValues,
}

/// Snapshot of a session, suitable for returning to clients.
#[derive(Debug, Clone, Serialize)]
pub struct FillOutcome {
    pub mode: FillMode,
    pub variables: VariableSet,
    pub blank: Vec<String>,
    pub text: String,
}

impl FillSession {
    /// Open a session with every variable initialized to an empty string.
    pub fn open(template: impl Into<String>) -> Self {
        let template = template.into();
        let variables = extract_variables(template.as_str());
        let values = VariableValues::blank_for(&variables);
        Self {
            template,
            variables,
            values,
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn variables(&self) -> &VariableSet {
        &self.variables
    }

    pub fn values(&self) -> &VariableValues {
        &self.values
    }

    /// Set one value. Names outside the variable set are kept but have no
    /// effect on rendering.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.set(name, value);
    }

    /// Apply several values at once.
    pub fn set_many<I, K, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in values {
            self.values.set(name, value);
        }
    }

    /// Variables whose value is still blank after trimming, in template order.
    pub fn blank_variables(&self) -> Vec<String> {
        self.variables
            .iter()
            .filter(|name| !self.values.is_filled(name))
            .map(str::to_string)
            .collect()
    }

    /// Live preview: only non-blank values are substituted.
    pub fn preview(&self) -> String {
        render(self.template.as_str(), &self.values, FillMode::Preview)
    }

    /// Render in the requested mode without ending the session.
    pub fn outcome(&self, mode: FillMode) -> FillOutcome {
        FillOutcome {
            mode,
            variables: self.variables.clone(),
            blank: self.blank_variables(),
            text: render(self.template.as_str(), &self.values, mode),
        }
    }

    /// Confirm the session: every variable is substituted, blanks become
    /// empty text.
    pub fn finish(self) -> String {
        render(self.template.as_str(), &self.values, FillMode::Final)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_initializes_blank_values() {
        let session = FillSession::open("Summarize {{doc}} in {{words}} words");
        assert_eq!(session.variables().as_slice(), ["doc", "words"]);
        assert_eq!(session.values().get("doc"), Some(""));
        assert_eq!(session.blank_variables(), vec!["doc", "words"]);
        assert_eq!(session.preview(), "Summarize {{doc}} in {{words}} words");
    }

    #[test]
    fn test_incremental_preview() {
        let mut session = FillSession::open("Summarize {{doc}} in {{words}} words");
        session.set("doc", "the report");
        assert_eq!(session.preview(), "Summarize the report in {{words}} words");
        assert_eq!(session.blank_variables(), vec!["words"]);

        session.set("words", "   ");
        assert_eq!(session.preview(), "Summarize the report in {{words}} words");

        session.set("words", "50");
        assert_eq!(session.preview(), "Summarize the report in 50 words");
        assert!(session.blank_variables().is_empty());
    }

    #[test]
    fn test_finish_replaces_blanks_with_empty() {
        let mut session = FillSession::open("To: {{to}}\nCc: {{cc}}");
        session.set("to", "team@example.com");
        assert_eq!(session.finish(), "To: team@example.com\nCc: ");
    }

    #[test]
    fn test_outcome_reports_mode() {
        let mut session = FillSession::open("{{a}}-{{b}}");
        session.set_many([("a", "1")]);

        let preview = session.outcome(FillMode::Preview);
        assert_eq!(preview.text, "1-{{b}}");
        assert_eq!(preview.blank, vec!["b"]);

        let final_text = session.outcome(FillMode::Final);
        assert_eq!(final_text.text, "1-");
    }

    #[test]
    fn test_template_without_variables() {
        let session = FillSession::open("Just copy me.");
        assert!(session.variables().is_empty());
        assert_eq!(session.preview(), "Just copy me.");
        assert_eq!(session.finish(), "Just copy me.");
    }
}

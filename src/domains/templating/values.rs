//! Variable values and the two fill modes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::variables::{VariableSet, substitute_variables};

/// How unfinished values are treated when rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillMode {
    /// Only values that are non-blank after trimming are substituted.
    /// Everything else stays visible as `{{name}}`.
    #[default]
    Preview,

    /// Every supplied value is substituted, blanks included, so unfilled
    /// variables collapse to empty text.
    Final,
}

/// User-supplied values for one fill session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableValues(HashMap<String, String>);

impl VariableValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty string for every variable in the set.
    pub fn blank_for(variables: &VariableSet) -> Self {
        Self(
            variables
                .iter()
                .map(|name| (name.to_string(), String::new()))
                .collect(),
        )
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `name` has a value that is non-blank after trimming.
    pub fn is_filled(&self, name: &str) -> bool {
        self.get(name).is_some_and(|v| !v.trim().is_empty())
    }

    /// The subset of entries whose value is non-blank after trimming.
    ///
    /// Values are kept untrimmed.
    pub fn filled(&self) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(_, v)| !v.trim().is_empty())
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    pub fn as_map(&self) -> &HashMap<String, String> {
        &self.0
    }

    pub fn into_map(self) -> HashMap<String, String> {
        self.0
    }
}

impl From<HashMap<String, String>> for VariableValues {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

impl<K, V> FromIterator<(K, V)> for VariableValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Render a template with the given values in the requested mode.
pub fn render<'a>(
    template: impl Into<Option<&'a str>>,
    values: &VariableValues,
    mode: FillMode,
) -> String {
    match mode {
        FillMode::Preview => substitute_variables(template, values.filled().as_map()),
        FillMode::Final => substitute_variables(template, values.as_map()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::templating::extract_variables;

    #[test]
    fn test_blank_for_variable_set() {
        let vars = extract_variables("{{a}} {{b}} {{a}}");
        let values = VariableValues::blank_for(&vars);
        assert_eq!(values.len(), 2);
        assert_eq!(values.get("a"), Some(""));
        assert_eq!(values.get("b"), Some(""));
    }

    #[test]
    fn test_filled_drops_blank_values() {
        let values: VariableValues = [("a", "x"), ("b", "   "), ("c", ""), ("d", " y ")]
            .into_iter()
            .collect();
        let filled = values.filled();
        assert_eq!(filled.len(), 2);
        assert_eq!(filled.get("a"), Some("x"));
        assert_eq!(filled.get("d"), Some(" y "));
        assert!(values.is_filled("d"));
        assert!(!values.is_filled("b"));
        assert!(!values.is_filled("missing"));
    }

    #[test]
    fn test_preview_keeps_blank_placeholders() {
        let values: VariableValues = [("who", "Ada"), ("what", "  ")].into_iter().collect();
        let out = render("{{who}} likes {{what}}", &values, FillMode::Preview);
        assert_eq!(out, "Ada likes {{what}}");
    }

    #[test]
    fn test_final_substitutes_blanks() {
        let values: VariableValues = [("who", "Ada"), ("what", "  ")].into_iter().collect();
        let out = render("{{who}} likes {{what}}", &values, FillMode::Final);
        assert_eq!(out, "Ada likes   ");

        let values: VariableValues = [("who", "Ada"), ("what", "")].into_iter().collect();
        let out = render("{{who}} likes {{what}}", &values, FillMode::Final);
        assert_eq!(out, "Ada likes ");
    }

    #[test]
    fn test_final_leaves_unknown_placeholders() {
        let values: VariableValues = [("who", "Ada")].into_iter().collect();
        let out = render("{{who}} {{later}}", &values, FillMode::Final);
        assert_eq!(out, "Ada {{later}}");
    }

    #[test]
    fn test_fill_mode_serde() {
        let mode: FillMode = serde_json::from_str("\"final\"").unwrap();
        assert_eq!(mode, FillMode::Final);
        assert_eq!(serde_json::to_string(&FillMode::Preview).unwrap(), "\"preview\"");
    }
}

//! Placeholder scanning and substitution.
//!
//! Placeholders use a flat `{{name}}` syntax. Both operations share a single
//! scan rule: a placeholder is the shortest run between `{{` and `}}` on one
//! line, and matches never overlap. There are no conditionals, loops or
//! escapes.

use regex::{Captures, Regex};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Shortest `{{...}}` run that does not cross a line terminator.
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{([^\n\r\x{2028}\x{2029}]*?)\}\}").expect("placeholder pattern is valid")
});

/// Ordered, duplicate-free variable names of one template.
///
/// Names keep first-occurrence order. A set is derived from a template and
/// never edited afterwards; a changed template yields a new set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VariableSet(Vec<String>);

impl VariableSet {
    /// Number of distinct variables.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl<'a> IntoIterator for &'a VariableSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Extract the variable names used by a template.
///
/// Each placeholder contributes its inner text trimmed of surrounding
/// whitespace. Repeats are dropped, keeping the position of the first
/// occurrence. `{{}}` contributes the empty name. An absent or empty
/// template yields an empty set.
pub fn extract_variables<'a>(template: impl Into<Option<&'a str>>) -> VariableSet {
    let Some(template) = template.into() else {
        return VariableSet::default();
    };

    let mut names: Vec<String> = Vec::new();
    for caps in PLACEHOLDER_RE.captures_iter(template) {
        let name = caps[1].trim();
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }

    VariableSet(names)
}

/// Substitute values into a template in a single pass.
///
/// Every placeholder whose name is a key of `values` is replaced by that
/// value. Placeholders without an entry stay literal, and keys that never
/// appear are ignored. Replacement text is not rescanned, so a value that
/// looks like `{{other}}` is emitted as-is.
///
/// A placeholder matches a key on its exact inner text, or on that text
/// trimmed, so `{{ name }}` is filled by the key `name` just like `{{name}}`.
pub fn substitute_variables<'a>(
    template: impl Into<Option<&'a str>>,
    values: &HashMap<String, String>,
) -> String {
    let Some(template) = template.into() else {
        return String::new();
    };
    if template.is_empty() || values.is_empty() {
        return template.to_string();
    }

    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures<'_>| {
            let inner = &caps[1];
            values
                .get(inner)
                .or_else(|| values.get(inner.trim()))
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

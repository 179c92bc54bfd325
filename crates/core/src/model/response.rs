use serde::{Deserialize, Serialize};

/// The respondent's current selection for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseValue {
    Single(String),
    Multiple(Vec<String>),
}

impl ResponseValue {
    /// Empty strings and empty selections count as unanswered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            ResponseValue::Single(value) => value.is_empty(),
            ResponseValue::Multiple(values) => values.is_empty(),
        }
    }

    /// Coerce to a single string: one selected item yields that item, several
    /// are joined with commas.
    #[must_use]
    pub fn as_single(&self) -> String {
        match self {
            ResponseValue::Single(value) => value.clone(),
            ResponseValue::Multiple(values) => values.join(","),
        }
    }

    /// Selected items; a lone value becomes a one-element list.
    #[must_use]
    pub fn items(&self) -> Vec<&str> {
        match self {
            ResponseValue::Single(value) => vec![value.as_str()],
            ResponseValue::Multiple(values) => values.iter().map(String::as_str).collect(),
        }
    }

    #[must_use]
    pub fn contains(&self, choice: &str) -> bool {
        match self {
            ResponseValue::Single(value) => value == choice,
            ResponseValue::Multiple(values) => values.iter().any(|value| value == choice),
        }
    }

    /// Toggle `choice` in a multi-select response, keeping selection order.
    #[must_use]
    pub fn toggled(self, choice: &str) -> Self {
        let mut values = match self {
            ResponseValue::Single(value) if value.is_empty() => Vec::new(),
            ResponseValue::Single(value) => vec![value],
            ResponseValue::Multiple(values) => values,
        };
        if let Some(pos) = values.iter().position(|value| value == choice) {
            values.remove(pos);
        } else {
            values.push(choice.to_string());
        }
        ResponseValue::Multiple(values)
    }
}

impl From<&str> for ResponseValue {
    fn from(value: &str) -> Self {
        ResponseValue::Single(value.to_string())
    }
}

impl From<Vec<&str>> for ResponseValue {
    fn from(values: Vec<&str>) -> Self {
        ResponseValue::Multiple(values.into_iter().map(str::to_string).collect())
    }
}

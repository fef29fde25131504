use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Url of a flow as the scheduler names it, e.g. `/FLOW-1`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct FlowId(pub String);

impl FlowId {
    pub fn all() -> Self {
        FlowId(crate::ALL.to_string())
    }

    pub fn is_all(&self) -> bool {
        self.0 == crate::ALL
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FlowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row of the flow list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FlowSummary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_modified_time: String,
    #[serde(rename = "size", default, deserialize_with = "string_or_number")]
    pub size_bytes: String,
}

/// One task of a flow, as reported by the detail query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskDetail {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub task_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(default)]
    pub script: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub depends: Vec<String>,
}

impl TaskDetail {
    /// Prerequisites joined for display, `None` when the task has none.
    pub fn joined_depends(&self) -> Option<String> {
        let deps: Vec<&str> = self
            .depends
            .iter()
            .map(|d| d.as_str())
            .filter(|d| !d.is_empty())
            .collect();
        if deps.is_empty() {
            None
        } else {
            Some(deps.join(", "))
        }
    }

    pub fn script(&self) -> Option<&str> {
        self.script.as_deref().filter(|s| !s.is_empty())
    }
}

/// `null` decodes like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The server has sent both `"128"` and `128` for numeric fields over time.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(de::Error::custom(format!(
            "expected a string or a number, found {}",
            other
        ))),
    }
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::flow::{null_as_default, string_or_number, FlowId, FlowSummary, TaskDetail};

/// Request envelope posted to the API endpoint.
///
/// `param` is always serialized as an object, `{}` when no parameter applies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiRequest {
    #[serde(rename = "api")]
    pub id: String,
    #[serde(rename = "param", default)]
    pub parameters: BTreeMap<String, String>,
}

impl ApiRequest {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            parameters: BTreeMap::new(),
        }
    }

    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        self.parameters.insert(key.to_string(), value.to_string());
        self
    }

    /// `api.info.flow_list`, or `api.info.flow_detail` naming `flow`.
    pub fn flow_query(flow: &FlowId) -> Self {
        if flow.is_all() {
            Self::new(crate::API_FLOW_LIST)
        } else {
            Self::new(crate::API_FLOW_DETAIL).with_param("flow", flow.as_str())
        }
    }

    /// `api.schd.action` with the given action verb.
    pub fn schedule_action(action: &str, flow: &FlowId) -> Self {
        Self::new(crate::API_SCHD_ACTION)
            .with_param("action", action)
            .with_param("flow", flow.as_str())
    }
}

/// Response envelope. `data` is absent or `{}` on most failure replies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    #[serde(deserialize_with = "string_or_number")]
    pub code: String,
    #[serde(default, alias = "message", deserialize_with = "null_as_default")]
    pub msg: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub const SUCCESS: &'static str = "0";

    pub fn is_success(&self) -> bool {
        self.code == Self::SUCCESS
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlowListData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub flows: Vec<FlowSummary>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlowDetailData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub flow: FlowDetail,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlowDetail {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: Vec<TaskDetail>,
}

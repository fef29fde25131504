use serde::de::DeserializeOwned;

use common::{ApiRequest, ApiResponse, FlowDetailData, FlowId, FlowListData};

use crate::error::CliError;
use crate::render;
use crate::transport::Transport;

/// Client-side handler for one command verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Show,
    Start,
    Abort,
}

impl Action {
    /// Registry lookup over the fixed verb set. `run` is the older name of `start`.
    pub fn resolve(name: &str) -> Option<Self> {
        match name {
            "show" => Some(Action::Show),
            "start" | "run" => Some(Action::Start),
            "abort" => Some(Action::Abort),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Action::Show => "show",
            Action::Start => "start",
            Action::Abort => "abort",
        }
    }

    /// Start and abort change remote state and need a concrete flow.
    pub fn requires_target(self) -> bool {
        !matches!(self, Action::Show)
    }

    pub fn build_request(self, target: &FlowId) -> Result<ApiRequest, CliError> {
        if self.requires_target() && target.is_empty() {
            return Err(CliError::MissingTarget(self.name().to_string()));
        }
        let request = match self {
            Action::Show if target.is_empty() => ApiRequest::flow_query(&FlowId::all()),
            Action::Show => ApiRequest::flow_query(target),
            Action::Start | Action::Abort => ApiRequest::schedule_action(self.name(), target),
        };
        Ok(request)
    }

    /// Runs the whole request/response cycle and returns the text to print.
    pub async fn execute<T: Transport>(
        self,
        target: &FlowId,
        transport: &T,
    ) -> Result<String, CliError> {
        log::info!("{} action on '{}'", self.name(), target);
        let request = self.build_request(target)?;
        let body = serde_json::to_string(&request)?;
        let reply = transport.post(body).await?;

        match self {
            Action::Show if target.is_empty() || target.is_all() => {
                let data: FlowListData = decode(&reply)?;
                Ok(render::flow_list_table(&data.flows).to_string())
            }
            Action::Show => {
                let data: FlowDetailData = decode(&reply)?;
                let table = render::flow_detail_table(&data.flow.content);
                if data.flow.url.is_empty() {
                    Ok(table.to_string())
                } else {
                    Ok(format!("Flow: {}\n{}", data.flow.url, table))
                }
            }
            Action::Start | Action::Abort => {
                let _: serde_json::Value = decode(&reply)?;
                Ok(format!("Request Succeeded... [{} '{}']", self.name(), target))
            }
        }
    }
}

/// Decodes a response envelope, turning a non-zero `code` into a server error.
fn decode<T: DeserializeOwned + Default>(reply: &str) -> Result<T, CliError> {
    let response: ApiResponse<T> = serde_json::from_str(reply)?;
    if !response.is_success() {
        return Err(CliError::server(&response.code, &response.msg));
    }
    Ok(response.data.unwrap_or_default())
}

// Wire types shared with the EBR scheduler API.

pub mod api;
pub mod flow;
pub mod result;

pub use api::{ApiRequest, ApiResponse, FlowDetail, FlowDetailData, FlowListData};
pub use flow::{FlowId, FlowSummary, TaskDetail};

/// Sentinel target meaning "every known flow".
pub const ALL: &str = "all";

/// Path of the single API endpoint, relative to `http://<host>:<port>`.
pub const API_PATH: &str = "/ebr/api";
pub const CONTENT_TYPE: &str = "application/json;charset=UTF-8";

// Operation ids
pub const API_FLOW_LIST: &str = "api.info.flow_list";
pub const API_FLOW_DETAIL: &str = "api.info.flow_detail";
pub const API_SCHD_ACTION: &str = "api.schd.action";

// Layout
pub const CONF_DIR: &str = "conf";
pub const CONFIG_FILE: &str = "config.json";
pub const LOOPBACK: &str = "127.0.0.1";

use std::path::PathBuf;

/// Process exit codes. Scripts branch on these, keep them stable.
pub mod exit {
    pub const NORMAL: u8 = 0;
    pub const UNKNOWN_COMMAND: u8 = 1;
    pub const UNIMPLEMENTED_ACTION: u8 = 2;
    pub const COMMAND_ERROR: u8 = 3;
    pub const FILE_ERROR: u8 = 4;
    pub const JSON_ERROR: u8 = 5;
    pub const SERVER_ERROR: u8 = 6;
    pub const TRANSPORT_ERROR: u8 = 7;
    pub const PROTOCOL_ERROR: u8 = 8;
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("unknown subcommand '{0}', see help for more details.")]
    UnknownCommand(String),

    #[error("unimplemented action for subcommand '{0}'.")]
    UnimplementedAction(String),

    #[error("-f is required for '{0}' command")]
    MissingTarget(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("load config error. '{}': {reason}", .path.display())]
    ConfigRead { path: PathBuf, reason: String },

    #[error("unmarshal config file error. '{}': {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Request Failed... [code:'{code}', msg:'{message}']")]
    Server { code: String, message: String },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("invalid response: {0}")]
    Protocol(#[from] serde_json::Error),
}

impl CliError {
    /// Server failure, falling back to the known description when `msg` is blank.
    pub fn server(code: &str, msg: &str) -> Self {
        let message = if msg.trim().is_empty() {
            common::result::describe(code).unwrap_or_default().to_string()
        } else {
            msg.to_string()
        };
        CliError::Server {
            code: code.to_string(),
            message,
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::UnknownCommand(_) => exit::UNKNOWN_COMMAND,
            CliError::UnimplementedAction(_) => exit::UNIMPLEMENTED_ACTION,
            CliError::MissingTarget(_) | CliError::InvalidArgument(_) => exit::COMMAND_ERROR,
            CliError::ConfigRead { .. } => exit::FILE_ERROR,
            CliError::ConfigParse { .. } => exit::JSON_ERROR,
            CliError::Server { .. } => exit::SERVER_ERROR,
            CliError::Transport(_) | CliError::Timeout(_) => exit::TRANSPORT_ERROR,
            CliError::Protocol(_) => exit::PROTOCOL_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_per_class() {
        let decode = serde_json::from_str::<serde_json::Value>("").unwrap_err();
        let codes = [
            CliError::UnknownCommand("x".into()).exit_code(),
            CliError::UnimplementedAction("x".into()).exit_code(),
            CliError::MissingTarget("start".into()).exit_code(),
            CliError::ConfigRead {
                path: "c.json".into(),
                reason: "missing".into(),
            }
            .exit_code(),
            CliError::server("3", "flow not found").exit_code(),
            CliError::Transport("refused".into()).exit_code(),
            CliError::Protocol(decode).exit_code(),
        ];
        let mut sorted = codes.to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), codes.len());
        assert_eq!(CliError::Timeout(5).exit_code(), exit::TRANSPORT_ERROR);
    }

    #[test]
    fn test_server_message_fallback() {
        let err = CliError::server("11003", "");
        assert_eq!(
            err.to_string(),
            "Request Failed... [code:'11003', msg:'specified flow is not exist']"
        );
        let err = CliError::server("3", "flow not found");
        assert!(err.to_string().contains("code:'3'"));
        assert!(err.to_string().contains("flow not found"));
    }
}

use std::path::PathBuf;
use std::time::Duration;

use common::FlowId;

use crate::action::Action;
use crate::config::{self, Config};
use crate::error::CliError;
use crate::transport::HttpTransport;

/// One parsed command line: a verb and its options.
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    pub verb: String,
    pub flow: Option<String>,
    pub config: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

/// Resolves the action and its target. No I/O happens here.
pub fn prepare(verb: &str, flow: Option<&str>) -> Result<(Action, FlowId), CliError> {
    let action =
        Action::resolve(verb).ok_or_else(|| CliError::UnimplementedAction(verb.to_string()))?;

    let flow = flow.map(str::trim).filter(|f| !f.is_empty());
    let target = match (action, flow) {
        (Action::Show, None) => FlowId::all(),
        (_, Some(f)) => FlowId(f.to_string()),
        (_, None) => return Err(CliError::MissingTarget(verb.to_string())),
    };
    Ok((action, target))
}

pub fn load_config(path: Option<PathBuf>) -> Result<Config, CliError> {
    let path = match path {
        Some(p) => p,
        None => config::default_config_path().map_err(|e| CliError::ConfigRead {
            path: PathBuf::from(common::CONFIG_FILE),
            reason: format!("{:#}", e),
        })?,
    };
    Config::from_file(&path)
}

/// Validate, load config, then run exactly one request.
pub async fn dispatch(invocation: Invocation) -> Result<String, CliError> {
    let (action, target) = prepare(&invocation.verb, invocation.flow.as_deref())?;
    if invocation.timeout_secs == Some(0) {
        return Err(CliError::InvalidArgument(
            "--timeout must be at least 1 second".to_string(),
        ));
    }

    let config = load_config(invocation.config)?;
    let timeout = invocation
        .timeout_secs
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.timeout());
    let url = config.base_url();
    log::info!("Http base url: '{}'.", url);

    let transport = HttpTransport::new(&url, timeout)?;
    action.execute(&target, &transport).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::exit;

    #[test]
    fn test_show_defaults_to_all() {
        let (action, target) = prepare("show", None).unwrap();
        assert_eq!(action, Action::Show);
        assert!(target.is_all());

        let (_, target) = prepare("show", Some("  ")).unwrap();
        assert!(target.is_all());

        let (_, target) = prepare("show", Some("/F1")).unwrap();
        assert_eq!(target.as_str(), "/F1");
    }

    #[test]
    fn test_mutating_verbs_need_flow() {
        for verb in ["start", "abort", "run"] {
            let err = prepare(verb, None).unwrap_err();
            assert_eq!(err.exit_code(), exit::COMMAND_ERROR);
            assert!(err.to_string().contains(verb));
            assert!(prepare(verb, Some("")).is_err());
            assert!(prepare(verb, Some("/F1")).is_ok());
        }
    }

    #[test]
    fn test_unregistered_verb() {
        let err = prepare("pause", Some("/F1")).unwrap_err();
        assert_eq!(err.exit_code(), exit::UNIMPLEMENTED_ACTION);
    }

    #[tokio::test]
    async fn test_argument_errors_precede_config() {
        let invocation = Invocation {
            verb: "start".to_string(),
            config: Some(PathBuf::from("/nonexistent/config.json")),
            ..Default::default()
        };
        let err = dispatch(invocation).await.unwrap_err();
        assert_eq!(err.exit_code(), exit::COMMAND_ERROR);

        let invocation = Invocation {
            verb: "show".to_string(),
            config: Some(PathBuf::from("/nonexistent/config.json")),
            timeout_secs: Some(0),
            ..Default::default()
        };
        let err = dispatch(invocation).await.unwrap_err();
        assert_eq!(err.exit_code(), exit::COMMAND_ERROR);
    }

    #[tokio::test]
    async fn test_missing_config_stops_before_request() {
        let invocation = Invocation {
            verb: "abort".to_string(),
            flow: Some("/F1".to_string()),
            config: Some(PathBuf::from("/nonexistent/config.json")),
            timeout_secs: None,
        };
        let err = dispatch(invocation).await.unwrap_err();
        assert_eq!(err.exit_code(), exit::FILE_ERROR);
    }
}

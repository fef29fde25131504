use std::time::Duration;

use reqwest::header::CONTENT_TYPE;

use crate::error::CliError;

/// Sends one serialized request envelope and returns the raw response body.
pub trait Transport {
    async fn post(&self, body: String) -> Result<String, CliError>;
}

pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, CliError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CliError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            url: url.to_string(),
            timeout,
        })
    }

    fn map_error(&self, err: reqwest::Error) -> CliError {
        if err.is_timeout() {
            CliError::Timeout(self.timeout.as_secs())
        } else {
            CliError::Transport(err.to_string())
        }
    }
}

impl Transport for HttpTransport {
    async fn post(&self, body: String) -> Result<String, CliError> {
        log::debug!("POST {} {}", self.url, body);
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, common::CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CliError::Transport(format!("server answered {}", status)));
        }

        let text = response.text().await.map_err(|e| self.map_error(e))?;
        log::debug!("response body: {}", text);
        Ok(text)
    }
}

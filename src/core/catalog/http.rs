//! Outbound GET plumbing shared by both catalog clients.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::core::app;

use super::error::FetchError;

/// Longest upstream error body kept in a [`FetchError::Status`].
const ERROR_BODY_LIMIT: usize = 200;

/// HTTP client with the outbound timeout applied to every request.
pub fn client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .user_agent(format!("{}/{}", app::NAME, app::VERSION))
        .build()
}

/// Send the request and decode a 200 response body as JSON. Any other status
/// is an error, 2xx included.
pub async fn get_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, FetchError> {
    let response = request.send().await?;
    let status = response.status();
    log::debug!("Response status: {}", status);

    let body = response.text().await?;
    if status != StatusCode::OK {
        return Err(FetchError::Status {
            status: status.as_u16(),
            body: truncate(&body, ERROR_BODY_LIMIT),
        });
    }
    Ok(serde_json::from_str(&body)?)
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let head: String = s.chars().take(max_chars).collect();
    format!("{}...", head)
}

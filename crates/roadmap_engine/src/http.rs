use crate::{EngineError, RequestSettings};

pub(crate) fn build_client(settings: &RequestSettings) -> Result<reqwest::Client, EngineError> {
    let client = reqwest::Client::builder()
        .connect_timeout(settings.connect_timeout)
        .timeout(settings.request_timeout)
        .build()?;
    Ok(client)
}

/// Reads the body even on non-success statuses so error payloads can be inspected.
pub(crate) async fn read_body(response: reqwest::Response) -> Result<Vec<u8>, reqwest::Error> {
    Ok(response.bytes().await?.to_vec())
}

pub(crate) fn describe_reqwest_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("timeout: {err}")
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        err.to_string()
    }
}

//! HTTP client for the recognition backend.

use gloo_net::Error;
use gloo_net::http::Request;
use std::collections::HashMap;

use crate::model::{BackendResponse, CalculateRequest};

/// POSTs the canvas snapshot (base64 PNG data URL) plus the accumulated
/// variable dictionary and decodes the JSON reply. Transport and decoding
/// failures surface as `gloo_net::Error`; a logical failure comes back as a
/// decoded reply with `status == "error"`.
pub async fn calculate(
    url: &str,
    image: &str,
    dict_of_vars: &HashMap<String, String>,
) -> Result<BackendResponse, Error> {
    let body = CalculateRequest { image, dict_of_vars };
    Request::post(url)
        .json(&body)?
        .send()
        .await?
        .json::<BackendResponse>()
        .await
}

use crate::dto::{CreateIncident, Incident, IncidentPage, UpdateIncident};
use crate::state::ListQuery;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortSignal, Request, RequestInit, Response};

#[derive(Clone, Debug, Error)]
pub enum ApiError {
    /// The request never completed: no connectivity, DNS failure, or an
    /// explicit abort (see [`ApiError::Cancelled`]).
    #[error("network error: {0}")]
    Network(String),
    /// The server answered with a non-2xx status.
    #[error("HTTP {status}")]
    RequestFailed { status: u16, body: Option<String> },
    /// The response body was not the JSON shape we expected.
    #[error("invalid response: {0}")]
    Decode(String),
    /// The caller aborted the request. Never shown to the user.
    #[error("request cancelled")]
    Cancelled,
}

impl ApiError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }
}

/// Thin wrapper over the browser fetch API against one configured base URL.
/// The base URL is injected at construction so tests and deployments can vary
/// it without process-wide state.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        ApiClient { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list_incidents(
        &self,
        query: &ListQuery,
        signal: Option<&AbortSignal>,
    ) -> Result<IncidentPage, ApiError> {
        let path = format!("/incidents?{}", query.to_query_string());
        self.request("GET", &path, None, signal).await
    }

    pub async fn get_incident(&self, id: &str) -> Result<Incident, ApiError> {
        self.request("GET", &format!("/incidents/{id}"), None, None)
            .await
    }

    pub async fn create_incident(&self, body: &CreateIncident) -> Result<Incident, ApiError> {
        self.request("POST", "/incidents", Some(encode(body)?), None)
            .await
    }

    pub async fn update_incident(
        &self,
        id: &str,
        body: &UpdateIncident,
    ) -> Result<Incident, ApiError> {
        self.request(
            "PATCH",
            &format!("/incidents/update/{id}"),
            Some(encode(body)?),
            None,
        )
        .await
    }

    async fn request<T>(
        &self,
        method: &str,
        path: &str,
        body: Option<String>,
        signal: Option<&AbortSignal>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let init = RequestInit::new();
        init.set_method(method);
        init.set_signal(signal);
        let has_body = body.is_some();
        if let Some(json) = body {
            init.set_body(&JsValue::from_str(&json));
        }

        let url = format!("{}{}", self.base_url, path);
        let request = Request::new_with_str_and_init(&url, &init)
            .map_err(|e| ApiError::Network(describe(&e)))?;
        if has_body {
            request
                .headers()
                .set("Content-Type", "application/json")
                .map_err(|e| ApiError::Network(describe(&e)))?;
        }

        let window =
            web_sys::window().ok_or_else(|| ApiError::Network("window not available".into()))?;
        let response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(reject_to_error)?;
        let response: Response = response
            .dyn_into()
            .map_err(|_| ApiError::Decode("fetch did not yield a Response".into()))?;

        if !response.ok() {
            return Err(ApiError::RequestFailed {
                status: response.status(),
                body: body_text(&response).await,
            });
        }

        let json = response
            .json()
            .map_err(|_| ApiError::Decode("response body is not JSON".into()))?;
        let value = JsFuture::from(json)
            .await
            .map_err(|_| ApiError::Decode("response body is not JSON".into()))?;
        serde_wasm_bindgen::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

fn encode<B: Serialize>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Maps a fetch rejection. An abort surfaces as a DOMException named
/// "AbortError"; everything else is a transport failure.
fn reject_to_error(err: JsValue) -> ApiError {
    let name = js_sys::Reflect::get(&err, &JsValue::from_str("name"))
        .ok()
        .and_then(|v| v.as_string());
    if name.as_deref() == Some("AbortError") {
        return ApiError::Cancelled;
    }
    ApiError::Network(describe(&err))
}

fn describe(err: &JsValue) -> String {
    js_sys::Reflect::get(err, &JsValue::from_str("message"))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_else(|| format!("{err:?}"))
}

/// Best-effort read of an error response body for diagnostics.
async fn body_text(response: &Response) -> Option<String> {
    let promise = response.text().ok()?;
    JsFuture::from(promise).await.ok()?.as_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_stripped_from_base_url() {
        let client = ApiClient::new("http://localhost:5000/api/");
        assert_eq!(client.base_url(), "http://localhost:5000/api");
    }

    #[test]
    fn cancelled_is_distinguished_from_other_errors() {
        assert!(ApiError::Cancelled.is_cancelled());
        assert!(!ApiError::Network("offline".into()).is_cancelled());
        let failed = ApiError::RequestFailed {
            status: 500,
            body: None,
        };
        assert!(!failed.is_cancelled());
        assert_eq!(failed.to_string(), "HTTP 500");
    }
}

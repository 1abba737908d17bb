use hns_core::{debug, trace};
use hns_rpc_core::{api::ops::RpcApiOps, RpcError, RpcResult};
use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};

/// Basic auth user name expected by the node and wallet servers.
pub const API_USER: &str = "x";

#[derive(Serialize)]
struct JsonRpcRequest<'a> {
    method: &'a str,
    params: Value,
    id: u64,
}

#[derive(Deserialize)]
struct JsonRpcErrorObject {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<JsonRpcErrorObject>,
}

/// Shared HTTP transport: one base URL, optional API key, JSON bodies.
#[derive(Debug)]
pub struct HttpClient {
    url: String,
    api_key: Option<String>,
    inner: reqwest::Client,
    next_id: AtomicU64,
}

impl HttpClient {
    pub fn new(url: &str, api_key: Option<String>) -> RpcResult<Self> {
        reqwest::Url::parse(url).map_err(|err| RpcError::InvalidUrl { url: url.to_string(), reason: err.to_string() })?;
        let inner = reqwest::Client::builder().build().map_err(|err| RpcError::Transport(err.to_string()))?;
        Ok(Self::with_client(inner, url, api_key))
    }

    pub fn with_client(inner: reqwest::Client, url: &str, api_key: Option<String>) -> Self {
        Self { url: url.trim_end_matches('/').to_string(), api_key, inner, next_id: AtomicU64::new(1) }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => builder.basic_auth(API_USER, Some(key)),
            None => builder,
        }
    }

    /// Issues a REST `GET` relative to the base URL. A 404 yields `None`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> RpcResult<Option<T>> {
        let url = format!("{}{}", self.url, path);
        trace!("[http] GET {}", url);
        let response = self.authorize(self.inner.get(&url)).send().await.map_err(|err| RpcError::Transport(err.to_string()))?;
        let status = response.status();
        let body = response.text().await.map_err(|err| RpcError::Transport(err.to_string()))?;
        parse_rest_response(status, &body)
    }

    /// Issues a JSON-RPC call and decodes its `result`.
    pub async fn call<T: DeserializeOwned>(&self, op: RpcApiOps, params: Value) -> RpcResult<T> {
        let method = op.method().ok_or(RpcError::NotImplemented)?;
        let request = JsonRpcRequest { method, params, id: self.next_id.fetch_add(1, Ordering::Relaxed) };
        debug!("[json-rpc] {} request id {}", method, request.id);
        let response = self
            .authorize(self.inner.post(&self.url))
            .json(&request)
            .send()
            .await
            .map_err(|err| RpcError::Transport(err.to_string()))?;
        let status = response.status();
        let body = response.text().await.map_err(|err| RpcError::Transport(err.to_string()))?;
        let result = parse_json_rpc_response(status, &body)?;
        trace!("[json-rpc] {} response: {}", method, result);
        Ok(serde_json::from_value(result)?)
    }
}

pub(crate) fn parse_rest_response<T: DeserializeOwned>(status: StatusCode, body: &str) -> RpcResult<Option<T>> {
    if status == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    if !status.is_success() {
        return Err(RpcError::Http { status: status.as_u16(), body: body.to_string() });
    }
    // the node answers unknown resources with `null` on some endpoints
    let value: Value = serde_json::from_str(body)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_value(value)?))
}

/// Servers report call failures through the `error` object, sometimes along
/// with a non-2xx status, so the body is inspected before the status.
pub(crate) fn parse_json_rpc_response(status: StatusCode, body: &str) -> RpcResult<Value> {
    match serde_json::from_str::<JsonRpcResponse>(body) {
        Ok(JsonRpcResponse { error: Some(error), .. }) => Err(RpcError::Remote { code: error.code, message: error.message }),
        Ok(JsonRpcResponse { result, .. }) if status.is_success() => Ok(result),
        _ => Err(RpcError::Http { status: status.as_u16(), body: body.to_string() }),
    }
}

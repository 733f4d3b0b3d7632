//! Request descriptors for the dispatcher.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Method;
use serde::Serialize;

use crate::error::Result;

/// Query parameters and headers shared by every API call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommonRequestParams {
    pub query_parameters: HashMap<String, String>,
    pub headers: HashMap<String, String>,
}

impl CommonRequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_parameters.insert(key.into(), value.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// A single call against the authenticated session.
///
/// `path` is appended verbatim to the base URL. Headers set here override
/// the session's defaults; query parameters are added to the URL once each.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    pub path: String,
    pub body: Option<Vec<u8>>,
    pub headers: HashMap<String, String>,
    pub query: HashMap<String, String>,
    /// Overrides the transport timeout for this call only.
    pub timeout: Option<Duration>,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            headers: HashMap::new(),
            query: HashMap::new(),
            timeout: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Attach a raw body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Attach `body` serialized as JSON.
    pub fn with_json<T: Serialize + ?Sized>(self, body: &T) -> Result<Self> {
        let bytes = serde_json::to_vec(body)?;
        Ok(self.with_body(bytes))
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Merge the shared query parameters and headers.
    pub fn with_params(mut self, params: &CommonRequestParams) -> Self {
        self.query.extend(
            params
                .query_parameters
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        self.headers
            .extend(params.headers.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let request = RequestDescriptor::post("/markets/Market/actions")
            .with_body(b"{}".to_vec())
            .with_header("Accept", "application/json")
            .with_query("limit", "10")
            .with_timeout(Duration::from_secs(3));

        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "/markets/Market/actions");
        assert_eq!(request.body.as_deref(), Some(&b"{}"[..]));
        assert_eq!(request.headers.get("Accept").map(String::as_str), Some("application/json"));
        assert_eq!(request.query.get("limit").map(String::as_str), Some("10"));
        assert_eq!(request.timeout, Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_with_json() {
        let request = RequestDescriptor::post("/search")
            .with_json(&serde_json::json!({"className": "VirtualMachine"}))
            .unwrap();
        assert_eq!(
            request.body.as_deref(),
            Some(&br#"{"className":"VirtualMachine"}"#[..])
        );
    }

    #[test]
    fn test_with_params_merges_and_overrides() {
        let params = CommonRequestParams::new()
            .with_query("a", "1")
            .with_header("X-Trace", "abc");
        let request = RequestDescriptor::get("/entities/1")
            .with_query("a", "0")
            .with_query("b", "2")
            .with_params(&params);

        assert_eq!(request.query.len(), 2);
        assert_eq!(request.query["a"], "1");
        assert_eq!(request.query["b"], "2");
        assert_eq!(request.headers["X-Trace"], "abc");
    }
}

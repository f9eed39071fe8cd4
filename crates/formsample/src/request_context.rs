// File: src/request_context.rs
// Purpose: Request context with query params, headers, and form data

use axum::http::HeaderMap;
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// Request context passed to page and form handlers
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Query parameters from URL (?key=value)
    pub query: QueryParams,

    /// Form data from POST requests
    pub form: FormData,

    /// Request headers
    pub headers: HeaderMap,
}

impl RequestContext {
    pub fn new(query: QueryParams, form: FormData, headers: HeaderMap) -> Self {
        Self {
            query,
            form,
            headers,
        }
    }

    /// Get a header value
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Check if request accepts JSON
    pub fn accepts_json(&self) -> bool {
        self.get_header("accept")
            .map(|accept| accept.contains("application/json"))
            .unwrap_or(false)
    }

    /// Check if this is an HTMX request
    pub fn is_htmx(&self) -> bool {
        self.get_header("hx-request").is_some()
    }

    /// Check if request wants a fragment instead of the whole page.
    /// True for HTMX requests, `?partial=true`, or an `X-Partial` header.
    pub fn wants_partial(&self) -> bool {
        self.is_htmx()
            || self.query.get("partial").map(String::as_str) == Some("true")
            || self.get_header("x-partial").is_some()
    }

    /// Name of the input that triggered the request: the `HX-Trigger-Name`
    /// header, or a `_field` form value for non-HTMX clients
    pub fn trigger_name(&self) -> Option<&str> {
        self.get_header("hx-trigger-name")
            .or_else(|| self.form.get("_field").map(String::as_str))
    }
}

/// Query parameters from URL
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    params: HashMap<String, String>,
}

impl QueryParams {
    pub fn new(params: HashMap<String, String>) -> Self {
        Self { params }
    }

    /// Get a query parameter value
    pub fn get(&self, key: &str) -> Option<&String> {
        self.params.get(key)
    }
}

/// Form data from POST requests.
///
/// Values are kept exactly as submitted; a JSON body is also kept whole so
/// typed fields can be read from it without going through strings.
#[derive(Debug, Clone, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    raw_json: Option<JsonValue>,
}

impl FormData {
    /// Create empty form data
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields(fields: HashMap<String, String>) -> Self {
        Self {
            fields,
            raw_json: None,
        }
    }

    /// Parse an `application/x-www-form-urlencoded` body.
    /// A key without `=` gets an empty value; a repeated key keeps the last value.
    pub fn from_urlencoded(body: &str) -> Self {
        let fields = body
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
                (decode_component(k), decode_component(v))
            })
            .collect();
        Self::from_fields(fields)
    }

    /// Create from a JSON body. String and scalar members are exposed as
    /// fields for lookups such as `_submitted`; null means "not provided".
    pub fn from_json(json: JsonValue) -> Self {
        let mut fields = HashMap::new();

        if let JsonValue::Object(map) = &json {
            for (key, value) in map {
                match value {
                    JsonValue::String(s) => {
                        fields.insert(key.clone(), s.clone());
                    }
                    JsonValue::Bool(_) | JsonValue::Number(_) => {
                        fields.insert(key.clone(), value.to_string());
                    }
                    _ => {}
                }
            }
        }

        Self {
            fields,
            raw_json: Some(json),
        }
    }

    /// Parse a request body according to its content type.
    /// Unknown content types give empty form data; malformed JSON is an error.
    pub fn from_body(content_type: Option<&str>, body: &[u8]) -> Result<Self, serde_json::Error> {
        match content_type {
            Some(ct) if ct.contains("application/json") => {
                serde_json::from_slice::<JsonValue>(body).map(Self::from_json)
            }
            Some(ct) if ct.contains("application/x-www-form-urlencoded") => {
                Ok(Self::from_urlencoded(&String::from_utf8_lossy(body)))
            }
            _ => Ok(Self::new()),
        }
    }

    /// Get a form field value
    pub fn get(&self, key: &str) -> Option<&String> {
        self.fields.get(key)
    }

    /// The JSON body, when the request sent one
    pub fn json(&self) -> Option<&JsonValue> {
        self.raw_json.as_ref()
    }

    /// Check if form is empty
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.raw_json.is_none()
    }
}

fn decode_component(s: &str) -> String {
    let spaced = s.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced.clone(),
    }
}

//! Error type shared by the site runtime.
//!
//! Nothing here reaches the visitor: callers log the error and switch the
//! dependent feature off.

#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("no global window")]
    NoWindow,
    #[error("no document on window")]
    NoDocument,
    #[error("WebGL2 not supported")]
    WebGlUnavailable,
    #[error("shader compile failed: {0}")]
    Shader(String),
    #[error("program link failed: {0}")]
    Link(String),
    #[error("GPU resource allocation failed: {0}")]
    Resource(&'static str),
    #[error("invalid site config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("request failed: {0}")]
    Http(#[from] gloo_net::Error),
    #[error("GET {url} returned {status}")]
    HttpStatus { url: String, status: u16 },
    #[error("page has no transition container")]
    MissingContainer,
    #[error("js error: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for SiteError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<SiteError> for wasm_bindgen::JsValue {
    fn from(err: SiteError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_convert() {
        let bad = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = SiteError::from(bad);
        assert!(matches!(err, SiteError::Config(_)));
        assert!(err.to_string().starts_with("invalid site config"));
    }

    #[test]
    fn http_status_names_the_url() {
        let err = SiteError::HttpStatus { url: "/about.html".into(), status: 404 };
        assert_eq!(err.to_string(), "GET /about.html returned 404");
    }
}

//! Swagger UI configuration
//!
//! Two kinds of configuration live here:
//!
//! - [`Parameters`], the option object handed to `SwaggerUIBundle(...)` in the
//!   browser. A built-in default set is combined per request with the caller's
//!   overlay through [`merge_config`].
//! - [`DocsOptions`], which decides where the docs page and its assets are
//!   mounted and how the page is rendered.

use serde_json::{json, Map, Value};
use std::sync::OnceLock;

/// Swagger UI option object, keyed by option name.
///
/// Key order is preserved so the rendered page is stable.
pub type Parameters = Map<String, Value>;

/// Default paths for the three bundled assets, relative to the app root.
pub const DEFAULT_JS_URL: &str = "/swagger/swagger-ui-bundle.js";
pub const DEFAULT_CSS_URL: &str = "/swagger/swagger-ui.css";
pub const DEFAULT_FAVICON_URL: &str = "/swagger/favicon-32x32.png";

/// Default path of the docs page.
pub const DEFAULT_DOCS_URL: &str = "/docs";

/// Client name used by the request-snippet generator when none is set.
pub const DEFAULT_API_CLIENT: &str = "api";

/// Built-in Swagger UI parameters.
///
/// The returned map is shared and immutable; use [`merge_config`] to derive
/// a customised copy.
pub fn default_parameters() -> &'static Parameters {
    static DEFAULTS: OnceLock<Parameters> = OnceLock::new();
    DEFAULTS.get_or_init(|| {
        let value = json!({
            "dom_id": "#swagger-ui",
            "layout": "BaseLayout",
            "deepLinking": true,
            "showExtensions": true,
            "showCommonExtensions": true,
            "tryItOutEnabled": true,
            "persistAuthorization": true,
            "filter": true,
            "displayRequestDuration": true,
            "requestSnippetsEnabled": true,
            "requestSnippets": {
                "generators": {
                    "tanstack": {
                        "title": "TanStack",
                        "syntax": "javascript"
                    }
                },
                "languages": ["curl_bash", "tanstack"]
            }
        });
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    })
}

/// Combine `defaults` with an optional `overlay`.
///
/// The result is a shallow copy of `defaults` where every key of `overlay`
/// is inserted or overwritten with the overlay's value verbatim. Nested
/// objects are replaced as a whole, never merged. Neither input is modified
/// and no option names or value types are checked.
pub fn merge_config(defaults: &Parameters, overlay: Option<&Parameters>) -> Parameters {
    let mut merged = defaults.clone();
    if let Some(overlay) = overlay {
        for (key, value) in overlay {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

/// Where and how the docs are served.
#[derive(Debug, Clone)]
pub struct DocsOptions {
    /// Path of the HTML page
    pub docs_url: String,
    /// Redirect `/` to the docs page
    pub redirect_from_root: bool,
    /// Page `<title>`; `None` derives it from the host's title
    pub title: Option<String>,
    /// Path serving `swagger-ui-bundle.js`
    pub js_url: String,
    /// Path serving `swagger-ui.css`
    pub css_url: String,
    /// Path serving `favicon-32x32.png`
    pub favicon_url: String,
    /// Prefix the app is mounted under behind a proxy (e.g. `/api`)
    pub root_path: String,
    /// OAuth2 redirect path handed to Swagger UI
    pub oauth2_redirect_url: Option<String>,
    /// Argument of `ui.initOAuth(...)`
    pub init_oauth: Option<Value>,
    /// Client name used in generated TanStack snippets
    pub tanstack_api_client: Option<String>,
    /// Overlay applied on top of [`default_parameters`]
    pub parameters: Option<Parameters>,
    /// Cache-Control max-age for assets in seconds (0 = no header)
    pub asset_max_age: u64,
}

impl Default for DocsOptions {
    fn default() -> Self {
        Self {
            docs_url: DEFAULT_DOCS_URL.to_string(),
            redirect_from_root: true,
            title: None,
            js_url: DEFAULT_JS_URL.to_string(),
            css_url: DEFAULT_CSS_URL.to_string(),
            favicon_url: DEFAULT_FAVICON_URL.to_string(),
            root_path: String::new(),
            oauth2_redirect_url: None,
            init_oauth: None,
            tanstack_api_client: None,
            parameters: None,
            asset_max_age: 0,
        }
    }
}

impl DocsOptions {
    /// Create options with every default
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the docs page path
    pub fn docs_url(mut self, path: impl Into<String>) -> Self {
        self.docs_url = path.into();
        self
    }

    /// Enable or disable the `/` redirect
    pub fn redirect_from_root(mut self, enabled: bool) -> Self {
        self.redirect_from_root = enabled;
        self
    }

    /// Set the page title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the JS bundle path
    pub fn js_url(mut self, path: impl Into<String>) -> Self {
        self.js_url = path.into();
        self
    }

    /// Set the stylesheet path
    pub fn css_url(mut self, path: impl Into<String>) -> Self {
        self.css_url = path.into();
        self
    }

    /// Set the favicon path
    pub fn favicon_url(mut self, path: impl Into<String>) -> Self {
        self.favicon_url = path.into();
        self
    }

    /// Set the proxy mount prefix. Trailing slashes are dropped.
    pub fn root_path(mut self, prefix: impl Into<String>) -> Self {
        self.root_path = prefix.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the OAuth2 redirect path
    pub fn oauth2_redirect_url(mut self, path: impl Into<String>) -> Self {
        self.oauth2_redirect_url = Some(path.into());
        self
    }

    /// Set the `initOAuth` configuration
    pub fn init_oauth(mut self, config: Value) -> Self {
        self.init_oauth = Some(config);
        self
    }

    /// Set the TanStack client name
    pub fn tanstack_api_client(mut self, name: impl Into<String>) -> Self {
        self.tanstack_api_client = Some(name.into());
        self
    }

    /// Set the parameter overlay
    pub fn parameters(mut self, overlay: Parameters) -> Self {
        self.parameters = Some(overlay);
        self
    }

    /// Set the asset Cache-Control max-age
    pub fn asset_max_age(mut self, seconds: u64) -> Self {
        self.asset_max_age = seconds;
        self
    }

    /// Parameters for one page render
    pub fn effective_parameters(&self) -> Parameters {
        merge_config(default_parameters(), self.parameters.as_ref())
    }

    /// Prefix `path` with the configured root path
    pub(crate) fn prefixed(&self, path: &str) -> String {
        format!("{}{}", self.root_path, path)
    }
}

//! The application the docs are attached to

use std::fmt;

/// What the docs patch reads from the host application.
pub trait HostApp {
    /// Application title, used to derive the page title
    fn title(&self) -> &str;

    /// Path the host serves its OpenAPI document at
    fn openapi_url(&self) -> &str;

    /// Docs route the host serves on its own, if any
    fn builtin_docs_url(&self) -> Option<&str> {
        None
    }

    /// OAuth2 redirect route the host serves on its own, if any
    fn builtin_oauth2_redirect_url(&self) -> Option<&str> {
        None
    }
}

/// Plain description of a host application
#[derive(Debug, Clone)]
pub struct AppInfo {
    pub title: String,
    pub openapi_url: String,
    pub docs_url: Option<String>,
    pub oauth2_redirect_url: Option<String>,
}

impl AppInfo {
    /// Host with the given title, its OpenAPI document at `/openapi.json`,
    /// and no docs routes of its own
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            openapi_url: "/openapi.json".to_string(),
            docs_url: None,
            oauth2_redirect_url: None,
        }
    }

    /// Set the OpenAPI document path
    pub fn openapi_url(mut self, path: impl Into<String>) -> Self {
        self.openapi_url = path.into();
        self
    }

    /// Record a docs route the host still serves itself
    pub fn docs_url(mut self, path: impl Into<String>) -> Self {
        self.docs_url = Some(path.into());
        self
    }

    /// Record an OAuth2 redirect route the host still serves itself
    pub fn oauth2_redirect_url(mut self, path: impl Into<String>) -> Self {
        self.oauth2_redirect_url = Some(path.into());
        self
    }
}

impl HostApp for AppInfo {
    fn title(&self) -> &str {
        &self.title
    }

    fn openapi_url(&self) -> &str {
        &self.openapi_url
    }

    fn builtin_docs_url(&self) -> Option<&str> {
        self.docs_url.as_deref()
    }

    fn builtin_oauth2_redirect_url(&self) -> Option<&str> {
        self.oauth2_redirect_url.as_deref()
    }
}

/// A host setting that competes with the routes taken over by the patch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteConflict {
    /// The host still serves its own docs page
    DocsUrl(String),
    /// The host still serves its own OAuth2 redirect page
    OAuth2RedirectUrl(String),
}

impl fmt::Display for RouteConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteConflict::DocsUrl(path) => write!(
                f,
                "host application serves its own docs at `{}`; disable it so the self-hosted docs take over",
                path
            ),
            RouteConflict::OAuth2RedirectUrl(path) => write!(
                f,
                "host application serves its own OAuth2 redirect at `{}`; disable it",
                path
            ),
        }
    }
}

/// Host settings that conflict with the patch
pub fn conflicts<H: HostApp + ?Sized>(host: &H) -> Vec<RouteConflict> {
    let mut found = Vec::new();
    if let Some(path) = host.builtin_docs_url() {
        found.push(RouteConflict::DocsUrl(path.to_string()));
    }
    if let Some(path) = host.builtin_oauth2_redirect_url() {
        found.push(RouteConflict::OAuth2RedirectUrl(path.to_string()));
    }
    found
}

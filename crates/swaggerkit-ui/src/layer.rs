//! Tower layer serving the docs routes
//!
//! [`SwaggerUiLayer`] wraps the host service. `GET` and `HEAD` requests for
//! the root redirect, the docs page and the three assets are answered here;
//! every other request is passed to the host unchanged.
//!
//! # Example
//!
//! ```rust,ignore
//! use swaggerkit_ui::{patch, AppInfo, AssetDir, DocsOptions};
//! use tower::ServiceBuilder;
//!
//! let host = AppInfo::new("Pets");
//! let assets = AssetDir::open("resources")?;
//! let service = ServiceBuilder::new()
//!     .layer(patch(&host, DocsOptions::new(), assets))
//!     .service(app);
//! ```

use crate::assets::{Asset, AssetSource};
use crate::config::DocsOptions;
use crate::host::{conflicts, HostApp};
use crate::swagger::{render_page, PageContext};
use bytes::Bytes;
use http::{header, HeaderValue, Method, Request, Response, StatusCode};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// Attach self-hosted docs to `host`.
///
/// Each host setting that competes with the docs routes is logged as a
/// warning; startup carries on regardless.
pub fn patch<H, A>(host: &H, options: DocsOptions, assets: A) -> SwaggerUiLayer
where
    H: HostApp + ?Sized,
    A: AssetSource,
{
    for conflict in conflicts(host) {
        tracing::warn!(%conflict, "Docs route conflict");
    }
    SwaggerUiLayer::new(host, options, assets)
}

/// Route answered by the docs service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocsRoute {
    Root,
    Page,
    Asset(Asset),
}

/// Immutable data shared by every clone of the service
struct DocsState {
    options: DocsOptions,
    title: String,
    openapi_url: String,
    redirect_location: Option<HeaderValue>,
    assets: Arc<dyn AssetSource>,
}

impl DocsState {
    fn route(&self, method: &Method, path: &str) -> Option<DocsRoute> {
        if *method != Method::GET && *method != Method::HEAD {
            return None;
        }
        let options = &self.options;
        if path == options.docs_url {
            Some(DocsRoute::Page)
        } else if path == "/" && self.redirect_location.is_some() {
            Some(DocsRoute::Root)
        } else if path == options.js_url {
            Some(DocsRoute::Asset(Asset::Bundle))
        } else if path == options.css_url {
            Some(DocsRoute::Asset(Asset::Css))
        } else if path == options.favicon_url {
            Some(DocsRoute::Asset(Asset::Favicon))
        } else {
            None
        }
    }

    async fn respond(&self, route: DocsRoute) -> Response<Bytes> {
        match route {
            DocsRoute::Root => self.redirect(),
            DocsRoute::Page => self.page(),
            DocsRoute::Asset(asset) => self.asset(asset).await,
        }
    }

    fn redirect(&self) -> Response<Bytes> {
        let mut response = Response::new(Bytes::new());
        *response.status_mut() = StatusCode::FOUND;
        if let Some(location) = &self.redirect_location {
            response
                .headers_mut()
                .insert(header::LOCATION, location.clone());
        }
        response
    }

    fn page(&self) -> Response<Bytes> {
        let options = &self.options;
        let ctx = PageContext {
            title: self.title.clone(),
            openapi_url: self.openapi_url.clone(),
            js_url: options.prefixed(&options.js_url),
            css_url: options.prefixed(&options.css_url),
            favicon_url: options.prefixed(&options.favicon_url),
            oauth2_redirect_url: options.oauth2_redirect_url.clone(),
            init_oauth: options.init_oauth.clone(),
            tanstack_api_client: options.tanstack_api_client.clone(),
            parameters: options.effective_parameters(),
        };
        let html = render_page(&ctx);

        let mut response = Response::new(Bytes::from(html));
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/html; charset=utf-8"),
        );
        response
    }

    async fn asset(&self, asset: Asset) -> Response<Bytes> {
        match self.assets.load(asset).await {
            Ok(content) => {
                let len = content.len();
                let mut response = Response::new(content);
                let headers = response.headers_mut();
                headers.insert(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static(asset.content_type()),
                );
                headers.insert(header::CONTENT_LENGTH, HeaderValue::from(len));
                if self.options.asset_max_age > 0 {
                    let value = format!("public, max-age={}", self.options.asset_max_age);
                    if let Ok(value) = HeaderValue::from_str(&value) {
                        headers.insert(header::CACHE_CONTROL, value);
                    }
                }
                response
            }
            Err(err) => {
                if err.status().is_server_error() {
                    tracing::error!(asset = asset.file_name(), error = %err, "Failed to load asset");
                } else {
                    tracing::warn!(asset = asset.file_name(), error = %err, "Asset missing");
                }
                err.into_response()
            }
        }
    }
}

/// Tower layer adding the docs routes to a service
#[derive(Clone)]
pub struct SwaggerUiLayer {
    state: Arc<DocsState>,
}

impl SwaggerUiLayer {
    /// Build the layer without checking the host for route conflicts
    pub fn new<H, A>(host: &H, options: DocsOptions, assets: A) -> Self
    where
        H: HostApp + ?Sized,
        A: AssetSource,
    {
        let title = options
            .title
            .clone()
            .unwrap_or_else(|| format!("{} - Swagger UI", host.title()));
        let openapi_url = options.prefixed(host.openapi_url());
        let redirect_location = if options.redirect_from_root && options.docs_url != "/" {
            let location = options.prefixed(&options.docs_url);
            match HeaderValue::from_str(&location) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::error!(location = %location, "Invalid docs path, root redirect disabled");
                    None
                }
            }
        } else {
            None
        };

        tracing::debug!(
            docs_url = %options.docs_url,
            openapi_url = %openapi_url,
            "Swagger UI routes registered"
        );

        Self {
            state: Arc::new(DocsState {
                options,
                title,
                openapi_url,
                redirect_location,
                assets: Arc::new(assets),
            }),
        }
    }

    /// Options the layer was built with
    pub fn options(&self) -> &DocsOptions {
        &self.state.options
    }
}

impl<S> Layer<S> for SwaggerUiLayer {
    type Service = SwaggerUi<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SwaggerUi {
            inner,
            state: self.state.clone(),
        }
    }
}

/// Service produced by [`SwaggerUiLayer`]
#[derive(Clone)]
pub struct SwaggerUi<S> {
    inner: S,
    state: Arc<DocsState>,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for SwaggerUi<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    S::Future: Send + 'static,
    ResBody: From<Bytes> + Send + 'static,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        match self.state.route(req.method(), req.uri().path()) {
            Some(route) => {
                let state = self.state.clone();
                tracing::debug!(path = %req.uri().path(), ?route, "Serving docs route");
                Box::pin(async move {
                    let response = state.respond(route).await;
                    Ok(response.map(ResBody::from))
                })
            }
            None => Box::pin(self.inner.call(req)),
        }
    }
}

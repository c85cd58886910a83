use bytes::Bytes;
use http::{header, Method, Request, Response, StatusCode};
use http_body_util::{BodyExt, Full};
use serde_json::json;
use std::convert::Infallible;
use swaggerkit_ui::{conflicts, patch, AppInfo, AssetDir, DocsOptions, Parameters, MARKER_FILE};
use tower::{Layer, Service, ServiceExt};

type Body = Full<Bytes>;

async fn host_app(req: Request<Body>) -> Result<Response<Body>, Infallible> {
    let body = match req.uri().path() {
        "/openapi.json" => r#"{"openapi":"3.1.0"}"#.to_string(),
        path => format!("host {}", path),
    };
    Ok(Response::new(Full::new(Bytes::from(body))))
}

fn synced_assets() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("swagger-ui-bundle.js"), "var SwaggerUIBundle;").unwrap();
    std::fs::write(dir.path().join("swagger-ui.css"), "body{}").unwrap();
    std::fs::write(dir.path().join("favicon-32x32.png"), b"\x89PNG").unwrap();
    std::fs::write(dir.path().join(MARKER_FILE), "").unwrap();
    dir
}

fn app(
    assets: &tempfile::TempDir,
    options: DocsOptions,
) -> impl Service<Request<Body>, Response = Response<Body>, Error = Infallible> + Clone {
    let host = AppInfo::new("Test App");
    let layer = patch(&host, options, AssetDir::open(assets.path()).unwrap());
    layer.layer(tower::service_fn(host_app))
}

async fn get<S>(service: S, path: &str) -> (StatusCode, http::HeaderMap, Bytes)
where
    S: Service<Request<Body>, Response = Response<Body>, Error = Infallible>,
{
    let request = Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Full::new(Bytes::new()))
        .unwrap();
    let response = service.oneshot(request).await.unwrap();
    let (parts, body) = response.into_parts();
    let body = body.collect().await.unwrap().to_bytes();
    (parts.status, parts.headers, body)
}

#[tokio::test]
async fn test_docs_page() {
    let assets = synced_assets();
    let (status, headers, body) = get(app(&assets, DocsOptions::new()), "/docs").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/html; charset=utf-8");
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("<title>Test App - Swagger UI</title>"));
    assert!(html.contains(r#"url: "/openapi.json","#));
    assert!(html.contains(r#"<script src="/swagger/swagger-ui-bundle.js"></script>"#));
    assert!(html.contains(r#""filter": true,"#));
}

#[tokio::test]
async fn test_root_redirects_to_docs() {
    let assets = synced_assets();
    let (status, headers, _) = get(app(&assets, DocsOptions::new()), "/").await;

    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(headers[header::LOCATION], "/docs");
}

#[tokio::test]
async fn test_root_redirect_honours_root_path() {
    let assets = synced_assets();
    let options = DocsOptions::new().root_path("/api").docs_url("/reference");
    let (status, headers, _) = get(app(&assets, options.clone()), "/").await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(headers[header::LOCATION], "/api/reference");

    let (_, _, body) = get(app(&assets, options), "/reference").await;
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains(r#"url: "/api/openapi.json","#));
    assert!(html.contains(r#"href="/api/swagger/swagger-ui.css""#));
}

#[tokio::test]
async fn test_assets_are_served_with_content_types() {
    let assets = synced_assets();
    let cases = [
        ("/swagger/swagger-ui-bundle.js", "application/javascript", &b"var SwaggerUIBundle;"[..]),
        ("/swagger/swagger-ui.css", "text/css", &b"body{}"[..]),
        ("/swagger/favicon-32x32.png", "image/png", &b"\x89PNG"[..]),
    ];

    for (path, content_type, expected) in cases {
        let (status, headers, body) = get(app(&assets, DocsOptions::new()), path).await;
        assert_eq!(status, StatusCode::OK, "{}", path);
        assert_eq!(headers[header::CONTENT_TYPE], content_type);
        assert_eq!(&body[..], expected);
    }
}

#[tokio::test]
async fn test_assets_are_read_per_request() {
    let assets = synced_assets();
    let service = app(&assets, DocsOptions::new());

    let (_, _, before) = get(service.clone(), "/swagger/swagger-ui.css").await;
    std::fs::write(assets.path().join("swagger-ui.css"), "body{color:red}").unwrap();
    let (_, _, after) = get(service, "/swagger/swagger-ui.css").await;

    assert_eq!(&before[..], b"body{}");
    assert_eq!(&after[..], b"body{color:red}");
}

#[tokio::test]
async fn test_missing_asset_is_not_found() {
    let assets = synced_assets();
    std::fs::remove_file(assets.path().join("favicon-32x32.png")).unwrap();

    let (status, headers, body) =
        get(app(&assets, DocsOptions::new()), "/swagger/favicon-32x32.png").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"]["type"], "not_found");
}

#[tokio::test]
async fn test_host_routes_are_untouched() {
    let assets = synced_assets();
    let (status, _, body) = get(app(&assets, DocsOptions::new()), "/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], br#"{"openapi":"3.1.0"}"#);

    let (_, _, body) = get(app(&assets, DocsOptions::new()), "/docs/extra").await;
    assert_eq!(&body[..], b"host /docs/extra");
}

#[tokio::test]
async fn test_custom_asset_paths() {
    let assets = synced_assets();
    let options = DocsOptions::new()
        .js_url("/static/ui.js")
        .css_url("/static/ui.css")
        .favicon_url("/static/icon.png");

    let (status, headers, _) = get(app(&assets, options.clone()), "/static/ui.js").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/javascript");

    let (_, _, body) = get(app(&assets, options), "/swagger/swagger-ui-bundle.js").await;
    assert_eq!(&body[..], b"host /swagger/swagger-ui-bundle.js");
}

#[tokio::test]
async fn test_parameter_overlay_is_rendered() {
    let assets = synced_assets();
    let overlay: Parameters = match json!({"filter": false, "docExpansion": "none"}) {
        serde_json::Value::Object(map) => map,
        _ => unreachable!(),
    };
    let options = DocsOptions::new().parameters(overlay);

    let (_, _, body) = get(app(&assets, options), "/docs").await;
    let html = String::from_utf8(body.to_vec()).unwrap();

    assert!(html.contains(r#""filter": false,"#));
    assert!(html.contains(r#""docExpansion": "none","#));
    assert!(html.contains(r#""deepLinking": true,"#));
}

#[test]
fn test_conflicting_host_still_gets_docs() {
    let host = AppInfo::new("Legacy").docs_url("/docs");
    assert_eq!(conflicts(&host).len(), 1);

    let assets = synced_assets();
    let layer = patch(&host, DocsOptions::new(), AssetDir::open(assets.path()).unwrap());
    assert_eq!(layer.options().docs_url, "/docs");
}

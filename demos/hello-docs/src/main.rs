//! Hello, docs!
//!
//! A tiny JSON service with Swagger UI attached. Run `swaggerkit-sync` first
//! so `crates/swaggerkit-ui/resources` holds the assets, then:
//!
//! ```text
//! cargo run -p hello-docs
//! ```
//!
//! and open <http://127.0.0.1:8080/docs>.

use anyhow::Context;
use bytes::Bytes;
use http::{header, Method, Request, Response, StatusCode};
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper_util::rt::TokioIo;
use hyper_util::service::TowerToHyperService;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::convert::Infallible;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use swaggerkit_ui::{patch, AppInfo, AssetDir, DocsOptions};

const TITLE: &str = "Hello, world!";

#[derive(Debug, Default, Serialize, Deserialize)]
struct SomeData {
    data: Option<String>,
    a: Option<i64>,
    b: Option<i64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,swaggerkit_ui=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let assets_dir = std::env::var("SWAGGERKIT_ASSETS")
        .unwrap_or_else(|_| "crates/swaggerkit-ui/resources".to_string());
    let assets = AssetDir::open(&assets_dir)
        .with_context(|| format!("{assets_dir} is not a synced asset directory; run swaggerkit-sync"))?;

    let host = AppInfo::new(TITLE);
    let service = ServiceBuilder::new()
        .layer(patch(&host, DocsOptions::new(), assets))
        .service(tower::service_fn(handle));

    let addr: SocketAddr = std::env::var("HELLO_DOCS_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
        .parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("Docs at http://{}/docs", addr);

    loop {
        let (stream, _) = listener.accept().await?;
        let service = TowerToHyperService::new(service.clone());
        tokio::spawn(async move {
            if let Err(err) = http1::Builder::new()
                .serve_connection(TokioIo::new(stream), service)
                .await
            {
                error!("Connection error: {}", err);
            }
        });
    }
}

async fn handle(req: Request<Incoming>) -> Result<Response<Full<Bytes>>, Infallible> {
    let response = match (req.method(), req.uri().path()) {
        (&Method::GET, "/some-data") => match read_query::<SomeData>(req.uri().query()) {
            Ok(query) => json_response(StatusCode::OK, &some_data(query)),
            Err(message) => json_response(StatusCode::UNPROCESSABLE_ENTITY, &json!({ "detail": message })),
        },
        (&Method::POST, "/some-data") => match read_json::<SomeData>(req).await {
            Ok(body) => json_response(StatusCode::OK, &some_data(body)),
            Err(message) => json_response(StatusCode::UNPROCESSABLE_ENTITY, &json!({ "detail": message })),
        },
        (&Method::GET, "/openapi.json") => json_response(StatusCode::OK, &openapi()),
        _ => json_response(StatusCode::NOT_FOUND, &json!({ "detail": "Not Found" })),
    };
    Ok(response)
}

fn some_data(input: SomeData) -> serde_json::Value {
    json!({ "message": "Some data!", "data": input.data, "a": input.a, "b": input.b })
}

fn read_query<T: DeserializeOwned>(query: Option<&str>) -> Result<T, String> {
    serde_urlencoded::from_str(query.unwrap_or("")).map_err(|e| format!("Invalid query string: {e}"))
}

async fn read_json<T: DeserializeOwned>(req: Request<Incoming>) -> Result<T, String> {
    let body = req
        .into_body()
        .collect()
        .await
        .map_err(|e| e.to_string())?
        .to_bytes();
    serde_json::from_slice(&body).map_err(|e| e.to_string())
}

fn json_response(status: StatusCode, body: &serde_json::Value) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from(body.to_string())));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, header::HeaderValue::from_static("application/json"));
    response
}

fn openapi() -> serde_json::Value {
    let params = json!([
        { "name": "data", "in": "query", "schema": { "type": "string" } },
        { "name": "a", "in": "query", "schema": { "type": "integer" } },
        { "name": "b", "in": "query", "schema": { "type": "integer" } }
    ]);
    json!({
        "openapi": "3.1.0",
        "info": { "title": TITLE, "version": "0.1.0" },
        "paths": {
            "/some-data": {
                "get": {
                    "summary": "Some Data",
                    "parameters": params,
                    "responses": { "200": { "description": "Successful Response" } }
                },
                "post": {
                    "summary": "Some Data Post",
                    "parameters": [
                        { "name": "in_path_data", "in": "query", "schema": { "type": "string" } }
                    ],
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": { "schema": { "$ref": "#/components/schemas/SomeData" } }
                        }
                    },
                    "responses": { "200": { "description": "Successful Response" } }
                }
            }
        },
        "components": {
            "schemas": {
                "SomeData": {
                    "type": "object",
                    "properties": {
                        "data": { "type": "string" },
                        "a": { "type": "integer" },
                        "b": { "type": "integer" }
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_is_decoded() {
        let data: SomeData = read_query(Some("data=hello%20world+again&a=1&other=3")).unwrap();
        assert_eq!(data.data.as_deref(), Some("hello world again"));
        assert_eq!(data.a, Some(1));
        assert_eq!(data.b, None);
    }

    #[test]
    fn test_missing_query_is_empty() {
        let data: SomeData = read_query(None).unwrap();
        assert!(data.data.is_none() && data.a.is_none());
    }

    #[test]
    fn test_bad_integer_is_rejected() {
        let err = read_query::<SomeData>(Some("a=abc")).unwrap_err();
        assert!(err.starts_with("Invalid query string"));
    }

    #[test]
    fn test_openapi_document() {
        let doc = openapi();
        assert_eq!(doc["info"]["title"], TITLE);
        assert!(doc["paths"]["/some-data"]["post"].is_object());
    }
}

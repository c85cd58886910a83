//! Swagger UI HTML generation

use crate::config::{Parameters, DEFAULT_API_CLIENT};
use serde_json::Value;

const SNIPPET_PLUGIN: &str = include_str!("snippet_plugin.js");
const API_CLIENT_PLACEHOLDER: &str = "__API_CLIENT__";

/// Everything the docs page refers to
#[derive(Debug, Clone)]
pub struct PageContext {
    pub title: String,
    pub openapi_url: String,
    pub js_url: String,
    pub css_url: String,
    pub favicon_url: String,
    pub oauth2_redirect_url: Option<String>,
    pub init_oauth: Option<Value>,
    pub tanstack_api_client: Option<String>,
    pub parameters: Parameters,
}

/// Generate the Swagger UI HTML page
pub fn render_page(ctx: &PageContext) -> String {
    let mut html = String::with_capacity(8 * 1024);
    html.push_str(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <link type="text/css" rel="stylesheet" href=""#,
    );
    html.push_str(&escape_html(&ctx.css_url));
    html.push_str(
        r#"">
    <link rel="shortcut icon" href=""#,
    );
    html.push_str(&escape_html(&ctx.favicon_url));
    html.push_str(
        r#"">
    <title>"#,
    );
    html.push_str(&escape_html(&ctx.title));
    html.push_str(
        r#"</title>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src=""#,
    );
    html.push_str(&escape_html(&ctx.js_url));
    html.push_str(
        r#""></script>
    <script>
"#,
    );
    html.push_str(&snippet_plugin(ctx.tanstack_api_client.as_deref()));
    html.push_str(
        r#"
    const ui = SwaggerUIBundle({
        url: "#,
    );
    html.push_str(&js_literal(&Value::from(ctx.openapi_url.as_str())));
    html.push_str(
        r#",
        plugins: [
            SwaggerUIBundle.plugins.DownloadUrl,
            TanStackSnippetPlugin
        ],
"#,
    );

    for (key, value) in &ctx.parameters {
        html.push_str("        ");
        html.push_str(&js_literal(&Value::from(key.as_str())));
        html.push_str(": ");
        html.push_str(&js_literal(value));
        html.push_str(",\n");
    }

    if let Some(redirect) = &ctx.oauth2_redirect_url {
        html.push_str("        oauth2RedirectUrl: window.location.origin + ");
        html.push_str(&js_literal(&Value::from(redirect.as_str())));
        html.push_str(",\n");
    }

    html.push_str(
        r#"        presets: [
            SwaggerUIBundle.presets.apis,
            SwaggerUIBundle.SwaggerUIStandalonePreset
        ],
    });
"#,
    );

    if let Some(init_oauth) = &ctx.init_oauth {
        html.push_str("    ui.initOAuth(");
        html.push_str(&js_literal(init_oauth));
        html.push_str(");\n");
    }

    html.push_str(
        r#"    </script>
</body>
</html>
"#,
    );
    html
}

/// The request-snippet plugin with the client name filled in
fn snippet_plugin(client: Option<&str>) -> String {
    // The name ends up inside a JS string and identifiers; keep it to identifier characters.
    let client: String = client
        .unwrap_or(DEFAULT_API_CLIENT)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '$')
        .collect();
    let client = if client.is_empty() {
        DEFAULT_API_CLIENT
    } else {
        client.as_str()
    };
    SNIPPET_PLUGIN.replace(API_CLIENT_PLACEHOLDER, client)
}

/// JSON-encode a value for embedding inside a `<script>` block
fn js_literal(value: &Value) -> String {
    // serde_json never fails on a Value; `</` is escaped so a string cannot close the script tag
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/")
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

//! HTTP transport implementation.
//!
//! JSON-RPC 2.0 over `POST {rpc_path}`, plus `GET /health` and `GET /`.
//! Each request is answered on its own; no session state is kept between
//! requests beyond the server's shared library and view.

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;
use crate::core::server::INSTRUCTIONS;

const PROTOCOL_VERSION: &str = "2024-11-05";

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// JSON-RPC request structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// JSON-RPC response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn invalid_request() -> Self {
        Self::new(-32600, "Invalid Request")
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(-32601, format!("Method not found: {}", method))
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(-32602, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(-32603, message)
    }

    /// MCP "resource not found".
    pub fn resource_not_found(message: impl Into<String>) -> Self {
        Self::new(-32002, message)
    }
}

impl JsonRpcResponse {
    pub fn from_outcome(id: Option<Value>, outcome: Result<Value, JsonRpcError>) -> Self {
        let (result, error) = match outcome {
            Ok(result) => (Some(result), None),
            Err(error) => (None, Some(error)),
        };
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result,
            error,
        }
    }
}

type RpcOutcome = Result<Value, JsonRpcError>;

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Build the axum router for a server.
    pub fn router(&self, server: McpServer) -> Router {
        let mut app = Router::new()
            .route(&self.config.rpc_path, post(handle_rpc))
            .route("/health", get(health_check))
            .route("/", get(root_handler))
            .with_state(server)
            .layer(TraceLayer::new_for_http());

        if self.config.enable_cors {
            app = app.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }
        app
    }

    /// Run the HTTP transport.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let app = self.router(server);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!(
            "Ready - listening on {} (JSON-RPC at POST {}, CORS {})",
            addr,
            self.config.rpc_path,
            if self.config.enable_cors { "on" } else { "off" }
        );

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))
    }
}

async fn root_handler(State(server): State<McpServer>) -> impl IntoResponse {
    Json(json!({
        "name": server.name(),
        "version": server.version(),
        "transport": "HTTP",
        "protocol": "JSON-RPC 2.0",
    }))
}

async fn health_check(State(server): State<McpServer>) -> impl IntoResponse {
    let prompts = server.library().snapshot().await.prompts.len();
    Json(json!({
        "status": "healthy",
        "prompts": prompts,
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[instrument(skip_all, fields(method))]
async fn handle_rpc(
    State(server): State<McpServer>,
    Json(request): Json<JsonRpcRequest>,
) -> impl IntoResponse {
    tracing::Span::current().record("method", request.method.as_str());
    info!("Received JSON-RPC request");
    let outcome = if request.jsonrpc != "2.0" {
        Err(JsonRpcError::invalid_request())
    } else {
        dispatch(&server, &request.method, request.params.unwrap_or(Value::Null)).await
    };
    Json(JsonRpcResponse::from_outcome(request.id, outcome))
}

/// Route one JSON-RPC method to the server.
pub async fn dispatch(server: &McpServer, method: &str, params: Value) -> RpcOutcome {
    match method {
        "initialize" => Ok(json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": {}, "resources": {}, "prompts": {} },
            "serverInfo": { "name": server.name(), "version": server.version() },
            "instructions": INSTRUCTIONS,
        })),
        "ping" => Ok(json!({})),
        "tools/list" => to_value(json!({ "tools": server.list_tools() })),
        "tools/call" => {
            let name = required_str(&params, "name")?;
            let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);
            server
                .call_tool(name, arguments)
                .await
                .map_err(|e| JsonRpcError::invalid_params(e.to_string()))
        }
        "resources/list" => to_value(json!({ "resources": server.list_resources().await })),
        "resources/templates/list" => to_value(json!({
            "resourceTemplates": server.list_resource_templates().await
        })),
        "resources/read" => {
            let uri = required_str(&params, "uri")?;
            match server.read_resource(uri).await {
                Ok(result) => to_value(result),
                Err(e) => Err(JsonRpcError::resource_not_found(e.to_string())),
            }
        }
        "prompts/list" => to_value(json!({ "prompts": server.list_prompts().await })),
        "prompts/get" => {
            let name = required_str(&params, "name")?;
            let arguments = params.get("arguments").and_then(Value::as_object);
            match server.get_prompt(name, arguments).await {
                Ok(result) => to_value(result),
                Err(e) => Err(JsonRpcError::invalid_params(e.to_string())),
            }
        }
        method if method.starts_with("notifications/") => {
            info!("Received notification: {}", method);
            Ok(Value::Null)
        }
        _ => {
            warn!("Unknown method: {}", method);
            Err(JsonRpcError::method_not_found(method))
        }
    }
}

fn required_str<'a>(params: &'a Value, key: &str) -> Result<&'a str, JsonRpcError> {
    params
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| JsonRpcError::invalid_params(format!("Missing '{}'", key)))
}

fn to_value<T: Serialize>(value: T) -> RpcOutcome {
    serde_json::to_value(value).map_err(|e| JsonRpcError::internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::domains::library::PromptLibrary;
    use std::sync::Arc;

    fn server() -> McpServer {
        McpServer::new(Config::default(), Arc::new(PromptLibrary::in_memory()))
    }

    #[tokio::test]
    async fn test_initialize() {
        let result = dispatch(&server(), "initialize", Value::Null).await.unwrap();
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert!(result["capabilities"]["prompts"].is_object());
    }

    #[tokio::test]
    async fn test_tool_call_round_trip() {
        let server = server();
        let created = dispatch(
            &server,
            "tools/call",
            json!({ "name": "prompt_create", "arguments": { "title": "Hi", "content": "Hi {{who}}" } }),
        )
        .await
        .unwrap();
        let id = created["structuredContent"]["id"].as_str().unwrap().to_string();

        let prompt = dispatch(
            &server,
            "prompts/get",
            json!({ "name": id, "arguments": { "who": "Ada" } }),
        )
        .await
        .unwrap();
        assert_eq!(prompt["messages"][0]["content"]["text"], "Hi Ada");
    }

    #[tokio::test]
    async fn test_resource_read_missing() {
        let err = dispatch(
            &server(),
            "resources/read",
            json!({ "uri": "library://prompts/none" }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, -32002);
    }

    #[tokio::test]
    async fn test_missing_params_and_unknown_method() {
        let server = server();
        let err = dispatch(&server, "tools/call", Value::Null).await.unwrap_err();
        assert_eq!(err.code, -32602);

        let err = dispatch(&server, "nope", Value::Null).await.unwrap_err();
        assert_eq!(err.code, -32601);
    }

    #[test]
    fn test_response_shape() {
        let response = JsonRpcResponse::from_outcome(Some(json!(1)), Ok(json!({})));
        let encoded = serde_json::to_value(&response).unwrap();
        assert_eq!(encoded["jsonrpc"], "2.0");
        assert!(encoded.get("error").is_none());
    }
}

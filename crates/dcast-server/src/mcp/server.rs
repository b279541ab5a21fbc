//! MCP Server implementation.
//!
//! Thin typed layer over the core dispatcher: each tool resolves its
//! session from the registry, rebuilds the parameter bag, and delegates
//! to `dcast_core::dispatch`.

use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::ToolCallContext, wrapper::Parameters},
    model::{
        CallToolRequestParam, CallToolResult, ListToolsResult, PaginatedRequestParam,
        ServerCapabilities, ServerInfo,
    },
    schemars::{self, JsonSchema},
    tool, tool_router, ErrorData, RoleServer, ServerHandler, ServiceExt,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use dcast_core::dispatch;
use dcast_core::types::{StartStreamingParams, ToolCall, WifiCredentials};

use crate::state::AppState;

/// Device Cast MCP Server
///
/// Provides MCP tools for AI assistant integration.
#[derive(Clone)]
pub struct McpServer {
    state: Arc<AppState>,
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            tool_router: Self::tool_router(),
        }
    }

    /// Serve the MCP protocol over stdin/stdout until the client hangs up.
    pub async fn serve_stdio(self) -> anyhow::Result<()> {
        let service = self.serve((tokio::io::stdin(), tokio::io::stdout())).await?;
        service.waiting().await?;
        Ok(())
    }
}

/// Parameters for the start_streaming tool
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct StartStreamingToolParams {
    /// Session ID of the device to stream from
    #[serde(rename = "sessionId")]
    session_id: String,
    /// Managed platform (youtube, twitch, instagram)
    #[serde(skip_serializing_if = "Option::is_none")]
    platform: Option<String>,
    /// Stream key for the managed platform
    #[serde(rename = "streamKey", skip_serializing_if = "Option::is_none")]
    stream_key: Option<String>,
    /// Explicit RTMP URL; overrides the platform when both are given
    #[serde(rename = "rtmpUrl", skip_serializing_if = "Option::is_none")]
    rtmp_url: Option<String>,
    /// WiFi network to join before starting
    #[serde(rename = "wifiSsid", skip_serializing_if = "Option::is_none")]
    wifi_ssid: Option<String>,
    /// Passphrase for the WiFi network
    #[serde(rename = "wifiPassphrase", skip_serializing_if = "Option::is_none")]
    wifi_passphrase: Option<String>,
}

/// Parameters for the stop_streaming tool
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct StopStreamingToolParams {
    /// Session ID of the device to stop
    #[serde(rename = "sessionId")]
    session_id: String,
}

#[tool_router]
impl McpServer {
    /// Start streaming from a device session
    #[tool(
        description = "Start streaming from a device session. Target a managed platform (youtube, twitch, instagram) with a stream key, or an explicit RTMP URL. Omitted values fall back to the session's stored defaults. Optionally joins a WiFi network first."
    )]
    async fn start_streaming(
        &self,
        Parameters(params): Parameters<StartStreamingToolParams>,
    ) -> String {
        let session = match self.state.sessions.get(&params.session_id).await {
            Some(s) => s,
            None => {
                return serde_json::json!({
                    "success": false,
                    "error": format!("Session not found: {}", params.session_id)
                })
                .to_string()
            }
        };

        let wifi = params.wifi_ssid.map(|ssid| WifiCredentials {
            ssid,
            passphrase: params.wifi_passphrase,
        });
        let start_params = StartStreamingParams {
            platform: params.platform,
            stream_key: params.stream_key,
            rtmp_url: params.rtmp_url,
            wifi,
        };
        let args = match serde_json::to_value(&start_params) {
            Ok(v) => v,
            Err(e) => {
                return serde_json::json!({"success": false, "error": e.to_string()}).to_string()
            }
        };

        let call = ToolCall::new(dispatch::START_STREAMING, args);
        match dispatch::dispatch(&session, &self.state.status, call).await {
            Ok(result) => result.to_string(),
            Err(e) => serde_json::json!({"success": false, "error": e.to_string()}).to_string(),
        }
    }

    /// Stop the active stream for a device session
    #[tool(description = "Stop the active stream for a device session.")]
    async fn stop_streaming(
        &self,
        Parameters(params): Parameters<StopStreamingToolParams>,
    ) -> String {
        let session = match self.state.sessions.get(&params.session_id).await {
            Some(s) => s,
            None => {
                return serde_json::json!({
                    "success": false,
                    "error": format!("Session not found: {}", params.session_id)
                })
                .to_string()
            }
        };

        let call = ToolCall::new(dispatch::STOP_STREAMING, serde_json::json!({}));
        match dispatch::dispatch(&session, &self.state.status, call).await {
            Ok(result) => result.to_string(),
            Err(e) => serde_json::json!({"success": false, "error": e.to_string()}).to_string(),
        }
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Device Cast MCP Server - Start and stop live streams from device sessions."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: rmcp::service::RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, ErrorData>> + Send + '_ {
        async move {
            let tools = self.tool_router.list_all();
            debug!("list_tools: returning {} tools", tools.len());
            Ok(ListToolsResult {
                tools,
                next_cursor: None,
            })
        }
    }

    fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: rmcp::service::RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, ErrorData>> + Send + '_ {
        debug!("Calling tool: {}", request.name);
        async move {
            let tool_context = ToolCallContext::new(self, request, context);
            self.tool_router.call(tool_context).await
        }
    }
}

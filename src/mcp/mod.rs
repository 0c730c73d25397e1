//! MCP server implementation for mdvault.
//!
//! Exposes the vault's read, list and search operations as MCP tools for AI
//! editors. Results are returned as JSON text content.

use std::borrow::Cow;

use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Content, ErrorCode, ErrorData as McpError, ServerCapabilities, ServerInfo,
    },
    schemars, tool, tool_handler, tool_router,
    transport::stdio,
};
use serde::{Deserialize, Serialize};

use crate::commands::Vault;
use crate::search::{CancelToken, SearchOptions};
use crate::storage::VaultError;

/// Parameters for `read_note` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ReadNoteParams {
    #[schemars(description = "Vault-relative file path (e.g., 'notes/weekly.md')")]
    pub path: String,
}

/// Parameters for `list_directory` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListParams {
    #[schemars(description = "Vault-relative directory path (default: vault root)")]
    pub path: Option<String>,
}

/// Parameters for `search_vault` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchParams {
    #[schemars(description = "Case-insensitive text to look for")]
    pub query: String,
    #[schemars(description = "File extensions to search (default: ['.md'])")]
    pub extensions: Option<Vec<String>>,
    #[schemars(description = "Stop after this many matching files")]
    pub limit: Option<usize>,
}

/// MCP server exposing vault tools.
#[derive(Clone)]
pub struct VaultServer {
    vault: Vault,
    tool_router: ToolRouter<Self>,
}

fn mcp_error(code: ErrorCode, message: String) -> McpError {
    McpError {
        code,
        message: Cow::from(message),
        data: None,
    }
}

impl From<VaultError> for McpError {
    fn from(e: VaultError) -> Self {
        let code = match e {
            VaultError::EmptyQuery | VaultError::NotFound { .. } | VaultError::PathEscape(_) => {
                ErrorCode::INVALID_PARAMS
            }
            _ => ErrorCode::INTERNAL_ERROR,
        };
        mcp_error(code, e.to_string())
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| mcp_error(ErrorCode::INTERNAL_ERROR, format!("Serialize failed: {e}")))?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

#[tool_router]
impl VaultServer {
    #[must_use]
    pub fn new(vault: Vault) -> Self {
        Self {
            vault,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "Read a note from the vault, with its front matter parsed into key/value pairs")]
    async fn read_note(
        &self,
        Parameters(params): Parameters<ReadNoteParams>,
    ) -> Result<CallToolResult, McpError> {
        let note = self.vault.get(&params.path)?;
        json_result(&note)
    }

    #[tool(description = "List the files and directories directly inside a vault directory")]
    async fn list_directory(
        &self,
        Parameters(params): Parameters<ListParams>,
    ) -> Result<CallToolResult, McpError> {
        let path = params.path.unwrap_or_default();
        let items = self.vault.list(&path)?;
        json_result(&serde_json::json!({ "path": path, "items": items }))
    }

    #[tool(description = "Search note contents for a case-insensitive substring")]
    async fn search_vault(
        &self,
        Parameters(params): Parameters<SearchParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut options = match &params.extensions {
            Some(extensions) => SearchOptions::with_extensions(extensions),
            None => self.vault.search_options(),
        };
        options.limit = params.limit;

        // The walk stops if this request is dropped before it finishes.
        let token = CancelToken::new();
        let _guard = token.drop_guard();

        let vault = self.vault.clone();
        let query = params.query.clone();
        let results = tokio::task::spawn_blocking(move || {
            vault.search_with_cancel(&query, &options, &token)
        })
        .await
        .map_err(|e| mcp_error(ErrorCode::INTERNAL_ERROR, format!("Search failed: {e}")))??;

        json_result(&serde_json::json!({ "query": params.query, "results": results }))
    }
}

#[tool_handler]
impl ServerHandler for VaultServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "mdvault provides read-only access to a Markdown vault. \
                Use list_directory to browse, read_note to read a note with its front matter, \
                and search_vault to find notes containing some text."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Start the MCP server with stdio transport.
///
/// # Errors
///
/// Returns an error if the server fails to start or encounters a fatal error.
pub async fn serve(vault: Vault) -> anyhow::Result<()> {
    tracing::info!(root = %vault.root().display(), "starting MCP server");
    let server = VaultServer::new(vault);
    let service = server.serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}

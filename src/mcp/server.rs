//! Tailorbill MCP Server Implementation
//!
//! Implements the MCP server with all tailorbill tools.

use std::collections::BTreeMap;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::config::Settings;
use crate::measurement::MeasurementParser;
use crate::tools::measurements;
use crate::tools::orders;
use crate::tools::status::StatusTracker;

/// Tailorbill MCP Service
#[derive(Clone)]
pub struct TailorService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    parser: MeasurementParser,
    tool_router: ToolRouter<TailorService>,
}

impl TailorService {
    pub fn new(settings: Settings) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(settings))),
            parser: MeasurementParser::from_settings(&settings),
            tool_router: Self::tool_router(),
        }
    }
}

fn default_true() -> bool { true }

fn to_result<T: Serialize>(result: Result<T, String>) -> Result<CallToolResult, McpError> {
    let value = result.map_err(|e| McpError::invalid_params(e, None))?;
    let json = serde_json::to_string_pretty(&value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Order Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct OrdersParams {
    /// Order rows (objects with id, billnumberinput2, garment_type, total_amt, ...)
    pub orders: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ReconcileOrdersParams {
    pub orders: Vec<serde_json::Value>,
    /// Split multi-garment orders before totalling (default true)
    #[serde(default = "default_true")]
    pub split: bool,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CheckItemizedBillParams {
    /// Stored itemized bill (suit_qty, suit_amount, ... sadri_amount, total_qty, total_amt)
    pub itemized_bill: serde_json::Value,
    pub orders: Vec<serde_json::Value>,
    #[serde(default = "default_true")]
    pub split: bool,
    /// Advance paid, to compute the balance due
    pub advance: Option<f64>,
}

// ============================================================================
// Measurement Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ParseMeasurementParams {
    pub input: String,
    /// "numeric" (default) or "text"
    #[serde(default = "default_mode")]
    pub mode: String,
}

fn default_mode() -> String { "numeric".to_string() }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FormatMeasurementParams {
    pub value: f64,
    /// Show 0 as an empty field
    #[serde(default)]
    pub stored: bool,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NormalizeMeasurementsParams {
    /// Field name -> entered text
    pub fields: BTreeMap<String, String>,
    /// Names of the fields that hold numeric measurements
    #[serde(default)]
    pub numeric_fields: Vec<String>,
}

// ============================================================================
// Tool Router
// ============================================================================

#[tool_router]
impl TailorService {
    // --- Status ---

    #[tool(description = "Get the current status of the tailorbill service including build info, active settings, and process information")]
    async fn tailorbill_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status();
        let json = serde_json::to_string_pretty(&status)
            .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get instructions for the order and measurement tools. Call this when unsure how to split orders, reconcile itemized bills, or parse measurements.")]
    fn pipeline_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::PIPELINE_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(PIPELINE_INSTRUCTIONS)]))
    }

    // --- Orders ---

    #[tool(description = "Split multi-garment orders (comma-joined garment_type) into one line item per garment with the amount divided equally, sorted in bill order")]
    fn split_orders(&self, Parameters(p): Parameters<OrdersParams>) -> Result<CallToolResult, McpError> {
        to_result(orders::split_orders(p.orders))
    }

    #[tool(description = "Total orders into the six itemized bill rows (Suit, Safari/Jacket, Pant, Shirt, N.Shirt, Sadri); unmatched orders are listed as unclassified")]
    fn reconcile_orders(&self, Parameters(p): Parameters<ReconcileOrdersParams>) -> Result<CallToolResult, McpError> {
        to_result(orders::reconcile_orders(p.orders, p.split))
    }

    #[tool(description = "Check a stored itemized bill against the bill's orders and report every row that disagrees")]
    fn check_itemized_bill(&self, Parameters(p): Parameters<CheckItemizedBillParams>) -> Result<CallToolResult, McpError> {
        to_result(orders::check_itemized_bill(p.itemized_bill, p.orders, p.split, p.advance))
    }

    #[tool(description = "Number garments of the same type on a bill (Pant 1, Pant 2) and give the worker limit for each")]
    fn number_garments(&self, Parameters(p): Parameters<ReconcileOrdersParams>) -> Result<CallToolResult, McpError> {
        to_result(orders::number_garments(p.orders, p.split))
    }

    // --- Measurements ---

    #[tool(description = "Parse an entered measurement. Numeric mode accepts 35.5, 36, 3/4, 35 1/2 and shop notation 22/7/2; text mode rewrites fractions inside descriptive text")]
    fn parse_measurement(&self, Parameters(p): Parameters<ParseMeasurementParams>) -> Result<CallToolResult, McpError> {
        to_result(measurements::parse_measurement(&self.parser, &p.input, &p.mode))
    }

    #[tool(description = "Format a stored decimal measurement for display, snapping to the nearest eighth (35.5 -> 35 1/2)")]
    fn format_measurement(&self, Parameters(p): Parameters<FormatMeasurementParams>) -> Result<CallToolResult, McpError> {
        to_result(measurements::format_measurement(&self.parser, p.value, p.stored))
    }

    #[tool(description = "Normalize a whole measurement sheet; fields listed in numeric_fields are parsed as numbers, the rest as text")]
    fn normalize_measurements(&self, Parameters(p): Parameters<NormalizeMeasurementsParams>) -> Result<CallToolResult, McpError> {
        let sheet = measurements::normalize_measurements(&self.parser, p.fields, p.numeric_fields);
        to_result(Ok(sheet))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for TailorService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "tailorbill".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Tailorbill".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Tailorbill - order and measurement normalization for a tailoring shop. \
                 Call pipeline_instructions first if unsure. \
                 Orders: split_orders, reconcile_orders, check_itemized_bill, number_garments. \
                 Measurements: parse_measurement, format_measurement, normalize_measurements. \
                 All tools are pure: nothing is stored."
                    .into(),
            ),
        }
    }
}

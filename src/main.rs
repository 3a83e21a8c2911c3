//! Tailorbill
//!
//! An MCP server for tailoring-shop order and measurement normalization.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use tailorbill::build_info;
use tailorbill::config::Settings;
use tailorbill::mcp::TailorService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("tailorbill=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    // Print startup banner to stderr
    build_info::print_startup_banner();

    let settings = Settings::from_env()?;
    eprintln!(
        "Measurement digits: {}, fraction tolerance: {}",
        settings.measurement_digits, settings.fraction_tolerance
    );
    eprintln!("Starting MCP server on stdio...");

    // Create the tailorbill service
    let service = TailorService::new(settings);

    // Create stdio transport
    let transport = (stdin(), stdout());

    // Start the MCP server
    let server = service.serve(transport).await?;

    // Wait for the server to complete
    server.waiting().await?;

    Ok(())
}

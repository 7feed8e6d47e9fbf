//! Sales reporting tools built on ShopifyQL.

use std::sync::Arc;

use serde_json::{Value, json};

use crate::registry::{ToolDefinition, ToolRegistry, ToolResponse};
use crate::shopify::Client;

use super::{missing, mount, respond};

const RUN_SHOPIFYQL: &str = r"
query RunShopifyql($query: String!) {
  shopifyqlQuery(query: $query) {
    __typename
    ... on TableResponse {
      tableData {
        columns { name dataType }
        rowData
      }
    }
    parseErrors { code message range { start { line character } } }
  }
}";

/// Mount the reporting tools.
pub fn register(registry: &mut ToolRegistry, client: &Arc<Client>) {
    mount(
        registry,
        client,
        ToolDefinition::new(
            "get_sales_summary",
            "Get total sales and order counts over a period (default: last 30 days).",
            "read_reports",
            "analytics",
            json!({
                "type": "object",
                "properties": {
                    "since_days": {
                        "type": "integer",
                        "description": "Number of trailing days to cover (1-365, default 30)",
                        "minimum": 1,
                        "maximum": 365
                    }
                }
            }),
        ),
        get_sales_summary,
    );

    mount(
        registry,
        client,
        ToolDefinition::new(
            "run_report",
            "Run a raw ShopifyQL query (e.g., 'FROM sales SHOW total_sales BY month').",
            "read_reports",
            "analytics",
            json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string", "description": "ShopifyQL query text" }
                },
                "required": ["query"]
            }),
        ),
        run_report,
    );
}

async fn get_sales_summary(client: Arc<Client>, input: Value) -> ToolResponse {
    let days = input["since_days"].as_i64().unwrap_or(30).clamp(1, 365);
    let query = format!(
        "FROM sales SHOW total_sales, orders SINCE -{days}d UNTIL today"
    );

    respond(
        client
            .execute(RUN_SHOPIFYQL, Some(json!({"query": query})))
            .await,
    )
}

async fn run_report(client: Arc<Client>, input: Value) -> ToolResponse {
    let Some(query) = input["query"].as_str() else {
        return missing("query");
    };
    respond(
        client
            .execute(RUN_SHOPIFYQL, Some(json!({"query": query})))
            .await,
    )
}

//! Cross-resource search tools.

use std::sync::Arc;

use serde_json::{Value, json};

use crate::registry::{ToolDefinition, ToolRegistry, ToolResponse};
use crate::shopify::Client;

use super::{missing, mount, respond};

const SEARCH_PRODUCTS: &str = r"
query SearchProducts($query: String!, $first: Int!) {
  products(first: $first, query: $query) {
    edges {
      node {
        id
        title
        handle
        status
        totalInventory
      }
    }
    pageInfo { hasNextPage endCursor }
  }
}";

const SEARCH_CUSTOMERS: &str = r"
query SearchCustomers($query: String!, $first: Int!) {
  customers(first: $first, query: $query) {
    edges {
      node {
        id
        displayName
        email
        numberOfOrders
      }
    }
    pageInfo { hasNextPage endCursor }
  }
}";

const SEARCH_ORDERS: &str = r"
query SearchOrders($query: String!, $first: Int!) {
  orders(first: $first, query: $query) {
    edges {
      node {
        id
        name
        createdAt
        displayFinancialStatus
        displayFulfillmentStatus
        totalPriceSet { shopMoney { amount currencyCode } }
      }
    }
    pageInfo { hasNextPage endCursor }
  }
}";

/// Mount the search tools.
pub fn register(registry: &mut ToolRegistry, client: &Arc<Client>) {
    mount(
        registry,
        client,
        search_definition(
            "search_products",
            "Search products with the storefront query syntax (e.g., 'title:Moisturizer', 'status:active').",
            "read_products",
        ),
        search_products,
    );
    mount(
        registry,
        client,
        search_definition(
            "search_customers",
            "Search customers with the storefront query syntax (e.g., 'email:jane@example.com').",
            "read_customers",
        ),
        search_customers,
    );
    mount(
        registry,
        client,
        search_definition(
            "search_orders",
            "Search orders with the storefront query syntax (e.g., 'fulfillment_status:unfulfilled').",
            "read_orders",
        ),
        search_orders,
    );
}

fn search_definition(name: &str, description: &str, scope: &str) -> ToolDefinition {
    ToolDefinition::new(
        name,
        description,
        scope,
        "essential",
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query in the storefront query syntax"
                },
                "limit": {
                    "type": "integer",
                    "description": "Number of results to fetch (1-50, default 10)",
                    "minimum": 1,
                    "maximum": 50
                }
            },
            "required": ["query"]
        }),
    )
}

async fn search_products(client: Arc<Client>, input: Value) -> ToolResponse {
    run_search(&client, SEARCH_PRODUCTS, &input).await
}

async fn search_customers(client: Arc<Client>, input: Value) -> ToolResponse {
    run_search(&client, SEARCH_CUSTOMERS, &input).await
}

async fn search_orders(client: Arc<Client>, input: Value) -> ToolResponse {
    run_search(&client, SEARCH_ORDERS, &input).await
}

async fn run_search(client: &Client, operation: &str, input: &Value) -> ToolResponse {
    let Some(query) = input["query"].as_str() else {
        return missing("query");
    };
    let first = input["limit"].as_i64().unwrap_or(10).clamp(1, 50);

    respond(
        client
            .execute(operation, Some(json!({"query": query, "first": first})))
            .await,
    )
}

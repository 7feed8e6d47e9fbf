//! Draft order tools.

use std::sync::Arc;

use serde_json::{Value, json};

use crate::registry::{ToolDefinition, ToolRegistry, ToolResponse};
use crate::shopify::Client;

use super::{missing, mount, respond};

const DRAFT_ORDER_CREATE: &str = r"
mutation DraftOrderCreate($input: DraftOrderInput!) {
  draftOrderCreate(input: $input) {
    draftOrder {
      id
      name
      invoiceUrl
      totalPriceSet { shopMoney { amount currencyCode } }
    }
    userErrors { field message }
  }
}";

const DRAFT_ORDER_COMPLETE: &str = r"
mutation DraftOrderComplete($id: ID!, $paymentPending: Boolean) {
  draftOrderComplete(id: $id, paymentPending: $paymentPending) {
    draftOrder {
      id
      order { id name }
    }
    userErrors { field message }
  }
}";

const GET_DRAFT_ORDERS: &str = r"
query GetDraftOrders($first: Int!, $query: String) {
  draftOrders(first: $first, query: $query) {
    edges {
      node {
        id
        name
        status
        createdAt
        totalPriceSet { shopMoney { amount currencyCode } }
      }
    }
    pageInfo { hasNextPage endCursor }
  }
}";

const DRAFT_ORDER_DELETE: &str = r"
mutation DraftOrderDelete($input: DraftOrderDeleteInput!) {
  draftOrderDelete(input: $input) {
    deletedId
    userErrors { field message }
  }
}";

/// Mount the draft order tools.
pub fn register(registry: &mut ToolRegistry, client: &Arc<Client>) {
    mount(
        registry,
        client,
        ToolDefinition::new(
            "create_draft_order",
            "Create a draft order from variant line items; returns the invoice URL.",
            "write_draft_orders",
            "commerce",
            json!({
                "type": "object",
                "properties": {
                    "line_items": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "variant_id": { "type": "string" },
                                "quantity": { "type": "integer", "minimum": 1 }
                            },
                            "required": ["variant_id"]
                        }
                    },
                    "email": { "type": "string", "description": "Customer email for the invoice" },
                    "note": { "type": "string" }
                },
                "required": ["line_items"]
            }),
        ),
        create_draft_order,
    );

    mount(
        registry,
        client,
        ToolDefinition::new(
            "complete_draft_order",
            "Complete a draft order, converting it into a real order.",
            "write_draft_orders",
            "commerce",
            json!({
                "type": "object",
                "properties": {
                    "id": { "type": "string", "description": "The draft order ID" },
                    "payment_pending": {
                        "type": "boolean",
                        "description": "Mark payment as pending instead of paid (default false)"
                    }
                },
                "required": ["id"]
            }),
        ),
        complete_draft_order,
    );

    mount(
        registry,
        client,
        ToolDefinition::new(
            "get_draft_orders",
            "List draft orders, optionally filtered (e.g., 'status:open').",
            "read_draft_orders",
            "commerce",
            json!({
                "type": "object",
                "properties": {
                    "limit": {
                        "type": "integer",
                        "description": "Number of draft orders to fetch (1-50, default 10)",
                        "minimum": 1,
                        "maximum": 50
                    },
                    "query": { "type": "string" }
                }
            }),
        ),
        get_draft_orders,
    );

    mount(
        registry,
        client,
        ToolDefinition::new(
            "delete_draft_order",
            "Delete a draft order.",
            "write_draft_orders",
            "commerce",
            json!({
                "type": "object",
                "properties": {
                    "id": { "type": "string", "description": "The draft order ID" }
                },
                "required": ["id"]
            }),
        ),
        delete_draft_order,
    );
}

async fn create_draft_order(client: Arc<Client>, input: Value) -> ToolResponse {
    let Some(items) = input["line_items"].as_array() else {
        return missing("line_items");
    };
    let line_items: Vec<Value> = items
        .iter()
        .filter_map(|item| {
            let variant_id = item["variant_id"].as_str()?;
            Some(json!({
                "variantId": variant_id,
                "quantity": item["quantity"].as_i64().unwrap_or(1),
            }))
        })
        .collect();
    if line_items.is_empty() {
        return missing("line_items");
    }

    // Optional fields are added only when present in the tool input.
    let mut draft = serde_json::Map::new();
    draft.insert("lineItems".to_string(), json!(line_items));
    if let Some(email) = input["email"].as_str() {
        draft.insert("email".to_string(), json!(email));
    }
    if let Some(note) = input["note"].as_str() {
        draft.insert("note".to_string(), json!(note));
    }

    respond(
        client
            .execute(DRAFT_ORDER_CREATE, Some(json!({"input": draft})))
            .await,
    )
}

async fn complete_draft_order(client: Arc<Client>, input: Value) -> ToolResponse {
    let Some(id) = input["id"].as_str() else {
        return missing("id");
    };
    let payment_pending = input["payment_pending"].as_bool().unwrap_or(false);

    respond(
        client
            .execute(
                DRAFT_ORDER_COMPLETE,
                Some(json!({"id": id, "paymentPending": payment_pending})),
            )
            .await,
    )
}

async fn get_draft_orders(client: Arc<Client>, input: Value) -> ToolResponse {
    let first = input["limit"].as_i64().unwrap_or(10).clamp(1, 50);
    let query = input["query"].as_str();

    respond(
        client
            .execute(GET_DRAFT_ORDERS, Some(json!({"first": first, "query": query})))
            .await,
    )
}

async fn delete_draft_order(client: Arc<Client>, input: Value) -> ToolResponse {
    let Some(id) = input["id"].as_str() else {
        return missing("id");
    };
    respond(
        client
            .execute(DRAFT_ORDER_DELETE, Some(json!({"input": {"id": id}})))
            .await,
    )
}

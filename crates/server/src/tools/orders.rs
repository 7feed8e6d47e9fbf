//! Order tools.

use std::sync::Arc;

use serde_json::{Value, json};

use crate::registry::{ToolDefinition, ToolRegistry, ToolResponse};
use crate::shopify::Client;

use super::{missing, mount, respond};

const GET_ORDER: &str = r"
query GetOrder($id: ID!) {
  order(id: $id) {
    id
    name
    email
    createdAt
    note
    tags
    displayFinancialStatus
    displayFulfillmentStatus
    totalPriceSet { shopMoney { amount currencyCode } }
    lineItems(first: 50) {
      edges { node { id title quantity sku } }
    }
  }
}";

const GET_ORDERS: &str = r"
query GetOrders($first: Int!, $after: String, $query: String) {
  orders(first: $first, after: $after, query: $query, sortKey: CREATED_AT, reverse: true) {
    edges {
      node {
        id
        name
        email
        createdAt
        displayFinancialStatus
        displayFulfillmentStatus
        totalPriceSet { shopMoney { amount currencyCode } }
      }
    }
    pageInfo { hasNextPage endCursor }
  }
}";

const ORDER_UPDATE_NOTE: &str = r"
mutation OrderUpdateNote($input: OrderInput!) {
  orderUpdate(input: $input) {
    order { id note }
    userErrors { field message }
  }
}";

const ORDER_ADD_TAGS: &str = r"
mutation OrderAddTags($id: ID!, $tags: [String!]!) {
  tagsAdd(id: $id, tags: $tags) {
    node { id }
    userErrors { field message }
  }
}";

const ORDER_CANCEL: &str = r"
mutation OrderCancel($orderId: ID!, $reason: OrderCancelReason!, $refund: Boolean!, $restock: Boolean!, $notifyCustomer: Boolean) {
  orderCancel(orderId: $orderId, reason: $reason, refund: $refund, restock: $restock, notifyCustomer: $notifyCustomer) {
    job { id }
    orderCancelUserErrors { field message }
  }
}";

/// Mount the order tools.
pub fn register(registry: &mut ToolRegistry, client: &Arc<Client>) {
    mount(
        registry,
        client,
        ToolDefinition::new(
            "get_order",
            "Get a single order by ID, including line items, totals, and status.",
            "read_orders",
            "commerce",
            json!({
                "type": "object",
                "properties": {
                    "id": { "type": "string", "description": "The order ID" }
                },
                "required": ["id"]
            }),
        ),
        get_order,
    );

    mount(
        registry,
        client,
        ToolDefinition::new(
            "get_orders",
            "Get recent orders, newest first. Use query to filter (e.g., 'fulfillment_status:unfulfilled').",
            "read_orders",
            "commerce",
            json!({
                "type": "object",
                "properties": {
                    "limit": {
                        "type": "integer",
                        "description": "Number of orders to fetch (1-50, default 10)",
                        "minimum": 1,
                        "maximum": 50
                    },
                    "after": { "type": "string", "description": "Pagination cursor" },
                    "query": { "type": "string", "description": "Search query to filter orders" }
                }
            }),
        ),
        get_orders,
    );

    mount(
        registry,
        client,
        ToolDefinition::new(
            "update_order_note",
            "Replace the staff note on an order.",
            "write_orders",
            "commerce",
            json!({
                "type": "object",
                "properties": {
                    "id": { "type": "string", "description": "The order ID" },
                    "note": { "type": "string", "description": "New note content" }
                },
                "required": ["id", "note"]
            }),
        ),
        update_order_note,
    );

    mount(
        registry,
        client,
        ToolDefinition::new(
            "add_order_tags",
            "Add tags to an order without removing existing tags.",
            "write_orders",
            "commerce",
            json!({
                "type": "object",
                "properties": {
                    "id": { "type": "string", "description": "The order ID" },
                    "tags": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Tags to add"
                    }
                },
                "required": ["id", "tags"]
            }),
        ),
        add_order_tags,
    );

    mount(
        registry,
        client,
        ToolDefinition::new(
            "cancel_order",
            "Cancel an order, optionally refunding payment and restocking inventory.",
            "write_orders",
            "commerce",
            json!({
                "type": "object",
                "properties": {
                    "id": { "type": "string", "description": "The order ID" },
                    "reason": {
                        "type": "string",
                        "enum": ["CUSTOMER", "DECLINED", "FRAUD", "INVENTORY", "STAFF", "OTHER"],
                        "description": "Cancellation reason (default OTHER)"
                    },
                    "refund": { "type": "boolean", "description": "Refund payment (default false)" },
                    "restock": { "type": "boolean", "description": "Restock inventory (default false)" },
                    "notify_customer": { "type": "boolean", "description": "Send a notification email" }
                },
                "required": ["id"]
            }),
        ),
        cancel_order,
    );
}

async fn get_order(client: Arc<Client>, input: Value) -> ToolResponse {
    let Some(id) = input["id"].as_str() else {
        return missing("id");
    };
    respond(client.execute(GET_ORDER, Some(json!({"id": id}))).await)
}

async fn get_orders(client: Arc<Client>, input: Value) -> ToolResponse {
    let first = input["limit"].as_i64().unwrap_or(10).clamp(1, 50);
    let after = input["after"].as_str();
    let query = input["query"].as_str();

    respond(
        client
            .execute(
                GET_ORDERS,
                Some(json!({"first": first, "after": after, "query": query})),
            )
            .await,
    )
}

async fn update_order_note(client: Arc<Client>, input: Value) -> ToolResponse {
    let Some(id) = input["id"].as_str() else {
        return missing("id");
    };
    let Some(note) = input["note"].as_str() else {
        return missing("note");
    };

    respond(
        client
            .execute(
                ORDER_UPDATE_NOTE,
                Some(json!({"input": {"id": id, "note": note}})),
            )
            .await,
    )
}

async fn add_order_tags(client: Arc<Client>, input: Value) -> ToolResponse {
    let Some(id) = input["id"].as_str() else {
        return missing("id");
    };
    let Some(tags) = input["tags"].as_array() else {
        return missing("tags");
    };

    respond(
        client
            .execute(ORDER_ADD_TAGS, Some(json!({"id": id, "tags": tags})))
            .await,
    )
}

async fn cancel_order(client: Arc<Client>, input: Value) -> ToolResponse {
    let Some(id) = input["id"].as_str() else {
        return missing("id");
    };
    let reason = input["reason"].as_str().unwrap_or("OTHER");
    let refund = input["refund"].as_bool().unwrap_or(false);
    let restock = input["restock"].as_bool().unwrap_or(false);
    let notify = input["notify_customer"].as_bool().unwrap_or(false);

    respond(
        client
            .execute(
                ORDER_CANCEL,
                Some(json!({
                    "orderId": id,
                    "reason": reason,
                    "refund": refund,
                    "restock": restock,
                    "notifyCustomer": notify,
                })),
            )
            .await,
    )
}

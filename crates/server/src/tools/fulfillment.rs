//! Fulfillment tools.

use std::sync::Arc;

use serde_json::{Value, json};

use crate::registry::{ToolDefinition, ToolRegistry, ToolResponse};
use crate::shopify::Client;

use super::{missing, mount, respond};

const GET_FULFILLMENT_ORDERS: &str = r"
query GetFulfillmentOrders($orderId: ID!) {
  order(id: $orderId) {
    fulfillmentOrders(first: 10) {
      edges {
        node {
          id
          status
          assignedLocation { name }
          lineItems(first: 50) {
            edges { node { id totalQuantity remainingQuantity } }
          }
        }
      }
    }
  }
}";

const FULFILLMENT_CREATE: &str = r"
mutation FulfillmentCreate($fulfillment: FulfillmentInput!) {
  fulfillmentCreate(fulfillment: $fulfillment) {
    fulfillment { id status }
    userErrors { field message }
  }
}";

const FULFILLMENT_TRACKING_UPDATE: &str = r"
mutation FulfillmentTrackingUpdate($fulfillmentId: ID!, $trackingInfoInput: FulfillmentTrackingInput!, $notifyCustomer: Boolean) {
  fulfillmentTrackingInfoUpdate(fulfillmentId: $fulfillmentId, trackingInfoInput: $trackingInfoInput, notifyCustomer: $notifyCustomer) {
    fulfillment {
      id
      trackingInfo { company number url }
    }
    userErrors { field message }
  }
}";

/// Mount the fulfillment tools.
pub fn register(registry: &mut ToolRegistry, client: &Arc<Client>) {
    mount(
        registry,
        client,
        ToolDefinition::new(
            "get_fulfillment_orders",
            "Get the fulfillment orders for an order, with remaining quantities per line item.",
            "read_fulfillments",
            "commerce",
            json!({
                "type": "object",
                "properties": {
                    "order_id": { "type": "string", "description": "The order ID" }
                },
                "required": ["order_id"]
            }),
        ),
        get_fulfillment_orders,
    );

    mount(
        registry,
        client,
        ToolDefinition::new(
            "create_fulfillment",
            "Fulfill a fulfillment order in full at its assigned location.",
            "write_fulfillments",
            "commerce",
            json!({
                "type": "object",
                "properties": {
                    "fulfillment_order_id": { "type": "string" },
                    "notify_customer": { "type": "boolean", "description": "Send a shipping notification" }
                },
                "required": ["fulfillment_order_id"]
            }),
        ),
        create_fulfillment,
    );

    mount(
        registry,
        client,
        ToolDefinition::new(
            "update_fulfillment_tracking",
            "Set or replace tracking details on an existing fulfillment.",
            "write_fulfillments",
            "commerce",
            json!({
                "type": "object",
                "properties": {
                    "fulfillment_id": { "type": "string" },
                    "company": { "type": "string", "description": "Carrier name" },
                    "number": { "type": "string", "description": "Tracking number" },
                    "url": { "type": "string", "description": "Tracking URL" },
                    "notify_customer": { "type": "boolean" }
                },
                "required": ["fulfillment_id", "number"]
            }),
        ),
        update_fulfillment_tracking,
    );
}

async fn get_fulfillment_orders(client: Arc<Client>, input: Value) -> ToolResponse {
    let Some(order_id) = input["order_id"].as_str() else {
        return missing("order_id");
    };
    respond(
        client
            .execute(GET_FULFILLMENT_ORDERS, Some(json!({"orderId": order_id})))
            .await,
    )
}

async fn create_fulfillment(client: Arc<Client>, input: Value) -> ToolResponse {
    let Some(fulfillment_order_id) = input["fulfillment_order_id"].as_str() else {
        return missing("fulfillment_order_id");
    };
    let notify = input["notify_customer"].as_bool().unwrap_or(false);

    respond(
        client
            .execute(
                FULFILLMENT_CREATE,
                Some(json!({
                    "fulfillment": {
                        "lineItemsByFulfillmentOrder": [
                            {"fulfillmentOrderId": fulfillment_order_id}
                        ],
                        "notifyCustomer": notify,
                    }
                })),
            )
            .await,
    )
}

async fn update_fulfillment_tracking(client: Arc<Client>, input: Value) -> ToolResponse {
    let Some(fulfillment_id) = input["fulfillment_id"].as_str() else {
        return missing("fulfillment_id");
    };
    let Some(number) = input["number"].as_str() else {
        return missing("number");
    };

    let mut tracking = serde_json::Map::new();
    tracking.insert("number".to_string(), json!(number));
    if let Some(company) = input["company"].as_str() {
        tracking.insert("company".to_string(), json!(company));
    }
    if let Some(url) = input["url"].as_str() {
        tracking.insert("url".to_string(), json!(url));
    }

    respond(
        client
            .execute(
                FULFILLMENT_TRACKING_UPDATE,
                Some(json!({
                    "fulfillmentId": fulfillment_id,
                    "trackingInfoInput": tracking,
                    "notifyCustomer": input["notify_customer"].as_bool().unwrap_or(false),
                })),
            )
            .await,
    )
}

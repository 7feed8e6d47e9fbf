//! Inventory tools.

use std::sync::Arc;

use serde_json::{Value, json};

use crate::registry::{ToolDefinition, ToolRegistry, ToolResponse};
use crate::shopify::Client;

use super::{missing, mount, respond};

const GET_INVENTORY_LEVELS: &str = r#"
query GetInventoryLevels($locationId: ID!, $first: Int!) {
  location(id: $locationId) {
    name
    inventoryLevels(first: $first) {
      edges {
        node {
          id
          item { id sku }
          quantities(names: ["available", "on_hand", "incoming"]) {
            name
            quantity
          }
        }
      }
      pageInfo { hasNextPage endCursor }
    }
  }
}"#;

const GET_INVENTORY_ITEM: &str = r"
query GetInventoryItem($id: ID!) {
  inventoryItem(id: $id) {
    id
    sku
    tracked
    unitCost { amount currencyCode }
    variant { id title product { id title } }
  }
}";

const INVENTORY_ADJUST: &str = r"
mutation InventoryAdjust($input: InventoryAdjustQuantitiesInput!) {
  inventoryAdjustQuantities(input: $input) {
    inventoryAdjustmentGroup { reason changes { name delta } }
    userErrors { field message }
  }
}";

const INVENTORY_SET: &str = r"
mutation InventorySet($input: InventorySetQuantitiesInput!) {
  inventorySetQuantities(input: $input) {
    inventoryAdjustmentGroup { reason changes { name delta } }
    userErrors { field message }
  }
}";

/// Mount the inventory tools.
pub fn register(registry: &mut ToolRegistry, client: &Arc<Client>) {
    mount(
        registry,
        client,
        ToolDefinition::new(
            "get_inventory_levels",
            "Get available, on-hand, and incoming quantities at a location.",
            "read_inventory",
            "inventory",
            json!({
                "type": "object",
                "properties": {
                    "location_id": { "type": "string", "description": "The location ID" },
                    "limit": {
                        "type": "integer",
                        "description": "Number of items to fetch (1-50, default 20)",
                        "minimum": 1,
                        "maximum": 50
                    }
                },
                "required": ["location_id"]
            }),
        ),
        get_inventory_levels,
    );

    mount(
        registry,
        client,
        ToolDefinition::new(
            "get_inventory_item",
            "Get a single inventory item with its SKU, cost, and owning variant.",
            "read_inventory",
            "inventory",
            json!({
                "type": "object",
                "properties": {
                    "id": { "type": "string", "description": "The inventory item ID" }
                },
                "required": ["id"]
            }),
        ),
        get_inventory_item,
    );

    mount(
        registry,
        client,
        ToolDefinition::new(
            "adjust_inventory",
            "Adjust the available quantity of an item at a location by a delta.",
            "write_inventory",
            "inventory",
            json!({
                "type": "object",
                "properties": {
                    "inventory_item_id": { "type": "string" },
                    "location_id": { "type": "string" },
                    "delta": { "type": "integer", "description": "Positive to add, negative to remove" },
                    "reason": { "type": "string", "description": "Adjustment reason (default 'correction')" }
                },
                "required": ["inventory_item_id", "location_id", "delta"]
            }),
        ),
        adjust_inventory,
    );

    mount(
        registry,
        client,
        ToolDefinition::new(
            "set_inventory",
            "Set the on-hand quantity of an item at a location to an absolute value.",
            "write_inventory",
            "inventory",
            json!({
                "type": "object",
                "properties": {
                    "inventory_item_id": { "type": "string" },
                    "location_id": { "type": "string" },
                    "quantity": { "type": "integer", "minimum": 0 },
                    "reason": { "type": "string", "description": "Adjustment reason (default 'correction')" }
                },
                "required": ["inventory_item_id", "location_id", "quantity"]
            }),
        ),
        set_inventory,
    );
}

async fn get_inventory_levels(client: Arc<Client>, input: Value) -> ToolResponse {
    let Some(location_id) = input["location_id"].as_str() else {
        return missing("location_id");
    };
    let first = input["limit"].as_i64().unwrap_or(20).clamp(1, 50);

    respond(
        client
            .execute(
                GET_INVENTORY_LEVELS,
                Some(json!({"locationId": location_id, "first": first})),
            )
            .await,
    )
}

async fn get_inventory_item(client: Arc<Client>, input: Value) -> ToolResponse {
    let Some(id) = input["id"].as_str() else {
        return missing("id");
    };
    respond(
        client
            .execute(GET_INVENTORY_ITEM, Some(json!({"id": id})))
            .await,
    )
}

async fn adjust_inventory(client: Arc<Client>, input: Value) -> ToolResponse {
    let Some(item_id) = input["inventory_item_id"].as_str() else {
        return missing("inventory_item_id");
    };
    let Some(location_id) = input["location_id"].as_str() else {
        return missing("location_id");
    };
    let Some(delta) = input["delta"].as_i64() else {
        return missing("delta");
    };
    let reason = input["reason"].as_str().unwrap_or("correction");

    respond(
        client
            .execute(
                INVENTORY_ADJUST,
                Some(json!({
                    "input": {
                        "reason": reason,
                        "name": "available",
                        "changes": [{
                            "inventoryItemId": item_id,
                            "locationId": location_id,
                            "delta": delta,
                        }],
                    }
                })),
            )
            .await,
    )
}

async fn set_inventory(client: Arc<Client>, input: Value) -> ToolResponse {
    let Some(item_id) = input["inventory_item_id"].as_str() else {
        return missing("inventory_item_id");
    };
    let Some(location_id) = input["location_id"].as_str() else {
        return missing("location_id");
    };
    let Some(quantity) = input["quantity"].as_i64() else {
        return missing("quantity");
    };
    let reason = input["reason"].as_str().unwrap_or("correction");

    respond(
        client
            .execute(
                INVENTORY_SET,
                Some(json!({
                    "input": {
                        "reason": reason,
                        "name": "on_hand",
                        "ignoreCompareQuantity": true,
                        "quantities": [{
                            "inventoryItemId": item_id,
                            "locationId": location_id,
                            "quantity": quantity,
                        }],
                    }
                })),
            )
            .await,
    )
}

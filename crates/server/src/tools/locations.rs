//! Location tools.

use std::sync::Arc;

use serde_json::{Value, json};

use crate::registry::{ToolDefinition, ToolRegistry, ToolResponse};
use crate::shopify::Client;

use super::{missing, mount, respond};

const GET_LOCATIONS: &str = r"
query GetLocations($first: Int!) {
  locations(first: $first) {
    edges {
      node {
        id
        name
        isActive
        fulfillsOnlineOrders
        address { city country }
      }
    }
  }
}";

const GET_LOCATION: &str = r"
query GetLocation($id: ID!) {
  location(id: $id) {
    id
    name
    isActive
    fulfillsOnlineOrders
    address { address1 city province country zip }
  }
}";

/// Mount the location tools.
pub fn register(registry: &mut ToolRegistry, client: &Arc<Client>) {
    mount(
        registry,
        client,
        ToolDefinition::new(
            "get_locations",
            "List the store's locations.",
            "read_locations",
            "inventory",
            json!({
                "type": "object",
                "properties": {
                    "limit": {
                        "type": "integer",
                        "description": "Number of locations to fetch (1-50, default 10)",
                        "minimum": 1,
                        "maximum": 50
                    }
                }
            }),
        ),
        get_locations,
    );

    mount(
        registry,
        client,
        ToolDefinition::new(
            "get_location",
            "Get a single location with its full address.",
            "read_locations",
            "inventory",
            json!({
                "type": "object",
                "properties": {
                    "id": { "type": "string", "description": "The location ID" }
                },
                "required": ["id"]
            }),
        ),
        get_location,
    );
}

async fn get_locations(client: Arc<Client>, input: Value) -> ToolResponse {
    let first = input["limit"].as_i64().unwrap_or(10).clamp(1, 50);
    respond(
        client
            .execute(GET_LOCATIONS, Some(json!({"first": first})))
            .await,
    )
}

async fn get_location(client: Arc<Client>, input: Value) -> ToolResponse {
    let Some(id) = input["id"].as_str() else {
        return missing("id");
    };
    respond(client.execute(GET_LOCATION, Some(json!({"id": id}))).await)
}

//! Metafield tools.

use std::sync::Arc;

use serde_json::{Value, json};

use crate::registry::{ToolDefinition, ToolRegistry, ToolResponse};
use crate::shopify::Client;

use super::{missing, mount, respond};

const GET_METAFIELDS: &str = r"
query GetMetafields($ownerId: ID!) {
  node(id: $ownerId) {
    ... on HasMetafields {
      metafields(first: 50) {
        edges {
          node {
            id
            namespace
            key
            type
            value
          }
        }
      }
    }
  }
}";

const METAFIELDS_SET: &str = r"
mutation MetafieldsSet($metafields: [MetafieldsSetInput!]!) {
  metafieldsSet(metafields: $metafields) {
    metafields { id namespace key value }
    userErrors { field message code }
  }
}";

/// Mount the metafield tools.
pub fn register(registry: &mut ToolRegistry, client: &Arc<Client>) {
    mount(
        registry,
        client,
        ToolDefinition::new(
            "get_metafields",
            "Get the metafields attached to a resource (product, collection, customer, order).",
            "read_metafields",
            "products",
            json!({
                "type": "object",
                "properties": {
                    "owner_id": { "type": "string", "description": "ID of the owning resource" }
                },
                "required": ["owner_id"]
            }),
        ),
        get_metafields,
    );

    mount(
        registry,
        client,
        ToolDefinition::new(
            "set_metafield",
            "Create or update one metafield on a resource.",
            "write_metafields",
            "products",
            json!({
                "type": "object",
                "properties": {
                    "owner_id": { "type": "string", "description": "ID of the owning resource" },
                    "namespace": { "type": "string" },
                    "key": { "type": "string" },
                    "type": {
                        "type": "string",
                        "description": "Metafield type (e.g., 'single_line_text_field', 'number_integer')"
                    },
                    "value": { "type": "string", "description": "Serialized metafield value" }
                },
                "required": ["owner_id", "namespace", "key", "type", "value"]
            }),
        ),
        set_metafield,
    );
}

async fn get_metafields(client: Arc<Client>, input: Value) -> ToolResponse {
    let Some(owner_id) = input["owner_id"].as_str() else {
        return missing("owner_id");
    };
    respond(
        client
            .execute(GET_METAFIELDS, Some(json!({"ownerId": owner_id})))
            .await,
    )
}

async fn set_metafield(client: Arc<Client>, input: Value) -> ToolResponse {
    let Some(owner_id) = input["owner_id"].as_str() else {
        return missing("owner_id");
    };
    let Some(namespace) = input["namespace"].as_str() else {
        return missing("namespace");
    };
    let Some(key) = input["key"].as_str() else {
        return missing("key");
    };
    let Some(field_type) = input["type"].as_str() else {
        return missing("type");
    };
    let Some(value) = input["value"].as_str() else {
        return missing("value");
    };

    respond(
        client
            .execute(
                METAFIELDS_SET,
                Some(json!({
                    "metafields": [{
                        "ownerId": owner_id,
                        "namespace": namespace,
                        "key": key,
                        "type": field_type,
                        "value": value,
                    }]
                })),
            )
            .await,
    )
}

//! Customer segment tools.

use std::sync::Arc;

use serde_json::{Value, json};

use crate::registry::{ToolDefinition, ToolRegistry, ToolResponse};
use crate::shopify::Client;

use super::{missing, mount, respond};

const GET_SEGMENTS: &str = r"
query GetSegments($first: Int!) {
  segments(first: $first) {
    edges {
      node {
        id
        name
        query
        creationDate
      }
    }
    pageInfo { hasNextPage endCursor }
  }
}";

const GET_SEGMENT_MEMBERS: &str = r"
query GetSegmentMembers($segmentId: ID!, $first: Int!) {
  customerSegmentMembers(segmentId: $segmentId, first: $first) {
    edges {
      node {
        id
        displayName
        defaultEmailAddress { emailAddress }
        numberOfOrders
      }
    }
    totalCount
  }
}";

/// Mount the customer segment tools.
pub fn register(registry: &mut ToolRegistry, client: &Arc<Client>) {
    mount(
        registry,
        client,
        ToolDefinition::new(
            "get_segments",
            "List customer segments (saved customer searches) with their queries.",
            "read_customers",
            "customers",
            json!({
                "type": "object",
                "properties": {
                    "limit": {
                        "type": "integer",
                        "description": "Number of segments to fetch (1-50, default 10)",
                        "minimum": 1,
                        "maximum": 50
                    }
                }
            }),
        ),
        get_segments,
    );

    mount(
        registry,
        client,
        ToolDefinition::new(
            "get_segment_members",
            "List the customers belonging to a segment.",
            "read_customers",
            "customers",
            json!({
                "type": "object",
                "properties": {
                    "segment_id": { "type": "string", "description": "The segment ID" },
                    "limit": {
                        "type": "integer",
                        "description": "Number of members to fetch (1-50, default 20)",
                        "minimum": 1,
                        "maximum": 50
                    }
                },
                "required": ["segment_id"]
            }),
        ),
        get_segment_members,
    );
}

async fn get_segments(client: Arc<Client>, input: Value) -> ToolResponse {
    let first = input["limit"].as_i64().unwrap_or(10).clamp(1, 50);
    respond(
        client
            .execute(GET_SEGMENTS, Some(json!({"first": first})))
            .await,
    )
}

async fn get_segment_members(client: Arc<Client>, input: Value) -> ToolResponse {
    let Some(segment_id) = input["segment_id"].as_str() else {
        return missing("segment_id");
    };
    let first = input["limit"].as_i64().unwrap_or(20).clamp(1, 50);

    respond(
        client
            .execute(
                GET_SEGMENT_MEMBERS,
                Some(json!({"segmentId": segment_id, "first": first})),
            )
            .await,
    )
}

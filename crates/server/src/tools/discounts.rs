//! Discount code tools.

use std::sync::Arc;

use serde_json::{Value, json};

use crate::registry::{ToolDefinition, ToolRegistry, ToolResponse};
use crate::shopify::Client;

use super::{missing, mount, respond};

const GET_DISCOUNTS: &str = r"
query GetDiscounts($first: Int!, $query: String) {
  codeDiscountNodes(first: $first, query: $query) {
    edges {
      node {
        id
        codeDiscount {
          ... on DiscountCodeBasic {
            title
            status
            startsAt
            endsAt
            usageLimit
            asyncUsageCount
          }
        }
      }
    }
    pageInfo { hasNextPage endCursor }
  }
}";

const DISCOUNT_CREATE: &str = r"
mutation DiscountCreate($basicCodeDiscount: DiscountCodeBasicInput!) {
  discountCodeBasicCreate(basicCodeDiscount: $basicCodeDiscount) {
    codeDiscountNode { id }
    userErrors { field message code }
  }
}";

const DISCOUNT_UPDATE: &str = r"
mutation DiscountUpdate($id: ID!, $basicCodeDiscount: DiscountCodeBasicInput!) {
  discountCodeBasicUpdate(id: $id, basicCodeDiscount: $basicCodeDiscount) {
    codeDiscountNode { id }
    userErrors { field message code }
  }
}";

const DISCOUNT_DEACTIVATE: &str = r"
mutation DiscountDeactivate($id: ID!) {
  discountCodeDeactivate(id: $id) {
    codeDiscountNode { id }
    userErrors { field message code }
  }
}";

const DISCOUNT_DELETE: &str = r"
mutation DiscountDelete($id: ID!) {
  discountCodeDelete(id: $id) {
    deletedCodeDiscountId
    userErrors { field message code }
  }
}";

/// Mount the discount tools.
pub fn register(registry: &mut ToolRegistry, client: &Arc<Client>) {
    mount(
        registry,
        client,
        ToolDefinition::new(
            "get_discounts",
            "List code discounts with status and usage counts.",
            "read_discounts",
            "marketing",
            json!({
                "type": "object",
                "properties": {
                    "limit": {
                        "type": "integer",
                        "description": "Number of discounts to fetch (1-50, default 10)",
                        "minimum": 1,
                        "maximum": 50
                    },
                    "query": { "type": "string", "description": "Filter (e.g., 'status:active')" }
                }
            }),
        ),
        get_discounts,
    );

    mount(
        registry,
        client,
        ToolDefinition::new(
            "create_discount",
            "Create a basic percentage-off discount code.",
            "write_discounts",
            "marketing",
            json!({
                "type": "object",
                "properties": {
                    "title": { "type": "string", "description": "Internal title" },
                    "code": { "type": "string", "description": "Customer-facing code" },
                    "percentage": {
                        "type": "number",
                        "description": "Discount fraction between 0 and 1 (0.15 = 15% off)",
                        "exclusiveMinimum": 0,
                        "maximum": 1
                    },
                    "starts_at": { "type": "string", "description": "ISO 8601 start datetime" },
                    "ends_at": { "type": "string", "description": "ISO 8601 end datetime" },
                    "usage_limit": { "type": "integer", "minimum": 1 }
                },
                "required": ["title", "code", "percentage", "starts_at"]
            }),
        ),
        create_discount,
    );

    mount(
        registry,
        client,
        ToolDefinition::new(
            "update_discount",
            "Update a discount's title or schedule. Only the provided fields are changed.",
            "write_discounts",
            "marketing",
            json!({
                "type": "object",
                "properties": {
                    "id": { "type": "string", "description": "The discount node ID" },
                    "title": { "type": "string" },
                    "starts_at": { "type": "string" },
                    "ends_at": { "type": "string" }
                },
                "required": ["id"]
            }),
        ),
        update_discount,
    );

    mount(
        registry,
        client,
        ToolDefinition::new(
            "deactivate_discount",
            "Deactivate a discount code so it can no longer be redeemed.",
            "write_discounts",
            "marketing",
            json!({
                "type": "object",
                "properties": {
                    "id": { "type": "string", "description": "The discount node ID" }
                },
                "required": ["id"]
            }),
        ),
        deactivate_discount,
    );

    mount(
        registry,
        client,
        ToolDefinition::new(
            "delete_discount",
            "Delete a discount code permanently.",
            "write_discounts",
            "marketing",
            json!({
                "type": "object",
                "properties": {
                    "id": { "type": "string", "description": "The discount node ID" }
                },
                "required": ["id"]
            }),
        ),
        delete_discount,
    );
}

async fn get_discounts(client: Arc<Client>, input: Value) -> ToolResponse {
    let first = input["limit"].as_i64().unwrap_or(10).clamp(1, 50);
    let query = input["query"].as_str();

    respond(
        client
            .execute(GET_DISCOUNTS, Some(json!({"first": first, "query": query})))
            .await,
    )
}

async fn create_discount(client: Arc<Client>, input: Value) -> ToolResponse {
    let Some(title) = input["title"].as_str() else {
        return missing("title");
    };
    let Some(code) = input["code"].as_str() else {
        return missing("code");
    };
    let Some(percentage) = input["percentage"].as_f64() else {
        return missing("percentage");
    };
    let Some(starts_at) = input["starts_at"].as_str() else {
        return missing("starts_at");
    };

    let mut discount = serde_json::Map::new();
    discount.insert("title".to_string(), json!(title));
    discount.insert("code".to_string(), json!(code));
    discount.insert("startsAt".to_string(), json!(starts_at));
    discount.insert(
        "customerGets".to_string(),
        json!({
            "value": {"percentage": percentage},
            "items": {"all": true},
        }),
    );
    discount.insert("customerSelection".to_string(), json!({"all": true}));
    if let Some(ends_at) = input["ends_at"].as_str() {
        discount.insert("endsAt".to_string(), json!(ends_at));
    }
    if let Some(limit) = input["usage_limit"].as_i64() {
        discount.insert("usageLimit".to_string(), json!(limit));
    }

    respond(
        client
            .execute(DISCOUNT_CREATE, Some(json!({"basicCodeDiscount": discount})))
            .await,
    )
}

async fn update_discount(client: Arc<Client>, input: Value) -> ToolResponse {
    let Some(id) = input["id"].as_str() else {
        return missing("id");
    };

    let mut discount = serde_json::Map::new();
    if let Some(title) = input["title"].as_str() {
        discount.insert("title".to_string(), json!(title));
    }
    if let Some(starts_at) = input["starts_at"].as_str() {
        discount.insert("startsAt".to_string(), json!(starts_at));
    }
    if let Some(ends_at) = input["ends_at"].as_str() {
        discount.insert("endsAt".to_string(), json!(ends_at));
    }

    respond(
        client
            .execute(
                DISCOUNT_UPDATE,
                Some(json!({"id": id, "basicCodeDiscount": discount})),
            )
            .await,
    )
}

async fn deactivate_discount(client: Arc<Client>, input: Value) -> ToolResponse {
    let Some(id) = input["id"].as_str() else {
        return missing("id");
    };
    respond(
        client
            .execute(DISCOUNT_DEACTIVATE, Some(json!({"id": id})))
            .await,
    )
}

async fn delete_discount(client: Arc<Client>, input: Value) -> ToolResponse {
    let Some(id) = input["id"].as_str() else {
        return missing("id");
    };
    respond(client.execute(DISCOUNT_DELETE, Some(json!({"id": id}))).await)
}

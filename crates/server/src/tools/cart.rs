//! Cart tools for building a checkout on behalf of a customer.

use std::sync::Arc;

use serde_json::{Value, json};

use crate::registry::{ToolDefinition, ToolRegistry, ToolResponse};
use crate::shopify::Client;

use super::{missing, mount, respond};

const CART_CREATE: &str = r"
mutation CartCreate($input: CartInput!) {
  cartCreate(input: $input) {
    cart {
      id
      checkoutUrl
      totalQuantity
      cost { totalAmount { amount currencyCode } }
    }
    userErrors { field message }
  }
}";

const CART_LINES_ADD: &str = r"
mutation CartLinesAdd($cartId: ID!, $lines: [CartLineInput!]!) {
  cartLinesAdd(cartId: $cartId, lines: $lines) {
    cart {
      id
      totalQuantity
      cost { totalAmount { amount currencyCode } }
    }
    userErrors { field message }
  }
}";

const GET_CART: &str = r"
query GetCart($id: ID!) {
  cart(id: $id) {
    id
    checkoutUrl
    totalQuantity
    lines(first: 50) {
      edges {
        node {
          id
          quantity
          merchandise { ... on ProductVariant { id title } }
        }
      }
    }
    cost { totalAmount { amount currencyCode } }
  }
}";

/// Mount the cart tools.
pub fn register(registry: &mut ToolRegistry, client: &Arc<Client>) {
    mount(
        registry,
        client,
        ToolDefinition::new(
            "create_cart",
            "Create a new cart, optionally seeded with variant line items.",
            "unauthenticated_write_checkouts",
            "essential",
            json!({
                "type": "object",
                "properties": {
                    "lines": {
                        "type": "array",
                        "description": "Initial line items",
                        "items": {
                            "type": "object",
                            "properties": {
                                "merchandise_id": { "type": "string" },
                                "quantity": { "type": "integer", "minimum": 1 }
                            },
                            "required": ["merchandise_id"]
                        }
                    }
                }
            }),
        ),
        create_cart,
    );

    mount(
        registry,
        client,
        ToolDefinition::new(
            "add_cart_lines",
            "Add variant line items to an existing cart.",
            "unauthenticated_write_checkouts",
            "essential",
            json!({
                "type": "object",
                "properties": {
                    "cart_id": { "type": "string", "description": "The cart ID" },
                    "lines": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "merchandise_id": { "type": "string" },
                                "quantity": { "type": "integer", "minimum": 1 }
                            },
                            "required": ["merchandise_id"]
                        }
                    }
                },
                "required": ["cart_id", "lines"]
            }),
        ),
        add_cart_lines,
    );

    mount(
        registry,
        client,
        ToolDefinition::new(
            "get_cart",
            "Get a cart by ID, including its line items, totals, and checkout URL.",
            "unauthenticated_read_checkouts",
            "essential",
            json!({
                "type": "object",
                "properties": {
                    "id": { "type": "string", "description": "The cart ID" }
                },
                "required": ["id"]
            }),
        ),
        get_cart,
    );
}

/// Convert tool-input line items to the wire shape.
fn convert_lines(lines: &Value) -> Vec<Value> {
    lines
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|line| {
                    let merchandise_id = line["merchandise_id"].as_str()?;
                    Some(json!({
                        "merchandiseId": merchandise_id,
                        "quantity": line["quantity"].as_i64().unwrap_or(1),
                    }))
                })
                .collect()
        })
        .unwrap_or_default()
}

async fn create_cart(client: Arc<Client>, input: Value) -> ToolResponse {
    let lines = convert_lines(&input["lines"]);
    respond(
        client
            .execute(CART_CREATE, Some(json!({"input": {"lines": lines}})))
            .await,
    )
}

async fn add_cart_lines(client: Arc<Client>, input: Value) -> ToolResponse {
    let Some(cart_id) = input["cart_id"].as_str() else {
        return missing("cart_id");
    };
    let lines = convert_lines(&input["lines"]);
    if lines.is_empty() {
        return missing("lines");
    }

    respond(
        client
            .execute(
                CART_LINES_ADD,
                Some(json!({"cartId": cart_id, "lines": lines})),
            )
            .await,
    )
}

async fn get_cart(client: Arc<Client>, input: Value) -> ToolResponse {
    let Some(id) = input["id"].as_str() else {
        return missing("id");
    };
    respond(client.execute(GET_CART, Some(json!({"id": id}))).await)
}

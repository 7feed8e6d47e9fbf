//! Gift card tools.

use std::sync::Arc;

use serde_json::{Value, json};

use crate::registry::{ToolDefinition, ToolRegistry, ToolResponse};
use crate::shopify::Client;

use super::{missing, mount, respond};

const GET_GIFT_CARDS: &str = r"
query GetGiftCards($first: Int!, $query: String) {
  giftCards(first: $first, query: $query) {
    edges {
      node {
        id
        maskedCode
        enabled
        balance { amount currencyCode }
        initialValue { amount currencyCode }
        expiresOn
      }
    }
    pageInfo { hasNextPage endCursor }
  }
}";

const GIFT_CARD_CREATE: &str = r"
mutation GiftCardCreate($input: GiftCardCreateInput!) {
  giftCardCreate(input: $input) {
    giftCard { id maskedCode balance { amount currencyCode } }
    giftCardCode
    userErrors { field message }
  }
}";

const GIFT_CARD_DEACTIVATE: &str = r"
mutation GiftCardDeactivate($id: ID!) {
  giftCardDeactivate(id: $id) {
    giftCard { id enabled }
    userErrors { field message }
  }
}";

/// Mount the gift card tools.
pub fn register(registry: &mut ToolRegistry, client: &Arc<Client>) {
    mount(
        registry,
        client,
        ToolDefinition::new(
            "get_gift_cards",
            "List gift cards with balances. Use query to filter (e.g., 'enabled:true').",
            "read_gift_cards",
            "marketing",
            json!({
                "type": "object",
                "properties": {
                    "limit": {
                        "type": "integer",
                        "description": "Number of gift cards to fetch (1-50, default 10)",
                        "minimum": 1,
                        "maximum": 50
                    },
                    "query": { "type": "string" }
                }
            }),
        ),
        get_gift_cards,
    );

    mount(
        registry,
        client,
        ToolDefinition::new(
            "create_gift_card",
            "Issue a gift card with an initial value, optionally assigned to a customer.",
            "write_gift_cards",
            "marketing",
            json!({
                "type": "object",
                "properties": {
                    "initial_value": { "type": "string", "description": "Decimal amount (e.g., '50.00')" },
                    "customer_id": { "type": "string", "description": "Customer to assign the card to" },
                    "expires_on": { "type": "string", "description": "Expiry date (YYYY-MM-DD)" },
                    "note": { "type": "string" }
                },
                "required": ["initial_value"]
            }),
        ),
        create_gift_card,
    );

    mount(
        registry,
        client,
        ToolDefinition::new(
            "deactivate_gift_card",
            "Deactivate a gift card so it can no longer be redeemed.",
            "write_gift_cards",
            "marketing",
            json!({
                "type": "object",
                "properties": {
                    "id": { "type": "string", "description": "The gift card ID" }
                },
                "required": ["id"]
            }),
        ),
        deactivate_gift_card,
    );
}

async fn get_gift_cards(client: Arc<Client>, input: Value) -> ToolResponse {
    let first = input["limit"].as_i64().unwrap_or(10).clamp(1, 50);
    let query = input["query"].as_str();

    respond(
        client
            .execute(GET_GIFT_CARDS, Some(json!({"first": first, "query": query})))
            .await,
    )
}

async fn create_gift_card(client: Arc<Client>, input: Value) -> ToolResponse {
    let Some(initial_value) = input["initial_value"].as_str() else {
        return missing("initial_value");
    };

    let mut card = serde_json::Map::new();
    card.insert("initialValue".to_string(), json!(initial_value));
    if let Some(customer_id) = input["customer_id"].as_str() {
        card.insert("customerId".to_string(), json!(customer_id));
    }
    if let Some(expires_on) = input["expires_on"].as_str() {
        card.insert("expiresOn".to_string(), json!(expires_on));
    }
    if let Some(note) = input["note"].as_str() {
        card.insert("note".to_string(), json!(note));
    }

    respond(
        client
            .execute(GIFT_CARD_CREATE, Some(json!({"input": card})))
            .await,
    )
}

async fn deactivate_gift_card(client: Arc<Client>, input: Value) -> ToolResponse {
    let Some(id) = input["id"].as_str() else {
        return missing("id");
    };
    respond(
        client
            .execute(GIFT_CARD_DEACTIVATE, Some(json!({"id": id})))
            .await,
    )
}

//! Payout tools.

use std::sync::Arc;

use serde_json::{Value, json};

use crate::registry::{ToolDefinition, ToolRegistry, ToolResponse};
use crate::shopify::Client;

use super::{missing, mount, respond};

const GET_PAYOUTS: &str = r"
query GetPayouts($first: Int!) {
  shopifyPaymentsAccount {
    payouts(first: $first) {
      edges {
        node {
          id
          issuedAt
          status
          net { amount currencyCode }
        }
      }
      pageInfo { hasNextPage endCursor }
    }
  }
}";

const GET_PAYOUT: &str = r"
query GetPayout($id: ID!) {
  node(id: $id) {
    ... on ShopifyPaymentsPayout {
      id
      issuedAt
      status
      net { amount currencyCode }
      summary {
        chargesGross { amount }
        chargesFee { amount }
        refundsFeeGross { amount }
        adjustmentsGross { amount }
      }
    }
  }
}";

const GET_PAYOUT_SCHEDULE: &str = r"
query GetPayoutSchedule {
  shopifyPaymentsAccount {
    payoutSchedule {
      interval
      monthlyAnchor
      weeklyAnchor
    }
    balance { amount currencyCode }
  }
}";

/// Mount the payout tools.
pub fn register(registry: &mut ToolRegistry, client: &Arc<Client>) {
    mount(
        registry,
        client,
        ToolDefinition::new(
            "get_payouts",
            "List recent payouts with status and net amounts.",
            "read_shopify_payments_payouts",
            "analytics",
            json!({
                "type": "object",
                "properties": {
                    "limit": {
                        "type": "integer",
                        "description": "Number of payouts to fetch (1-50, default 10)",
                        "minimum": 1,
                        "maximum": 50
                    }
                }
            }),
        ),
        get_payouts,
    );

    mount(
        registry,
        client,
        ToolDefinition::new(
            "get_payout",
            "Get a single payout with its fee and adjustment summary.",
            "read_shopify_payments_payouts",
            "analytics",
            json!({
                "type": "object",
                "properties": {
                    "id": { "type": "string", "description": "The payout ID" }
                },
                "required": ["id"]
            }),
        ),
        get_payout,
    );

    mount(
        registry,
        client,
        ToolDefinition::new(
            "get_payout_schedule",
            "Get the payout schedule and current account balance.",
            "read_shopify_payments_payouts",
            "analytics",
            json!({
                "type": "object",
                "properties": {}
            }),
        ),
        get_payout_schedule,
    );
}

async fn get_payouts(client: Arc<Client>, input: Value) -> ToolResponse {
    let first = input["limit"].as_i64().unwrap_or(10).clamp(1, 50);
    respond(
        client
            .execute(GET_PAYOUTS, Some(json!({"first": first})))
            .await,
    )
}

async fn get_payout(client: Arc<Client>, input: Value) -> ToolResponse {
    let Some(id) = input["id"].as_str() else {
        return missing("id");
    };
    respond(client.execute(GET_PAYOUT, Some(json!({"id": id}))).await)
}

async fn get_payout_schedule(client: Arc<Client>, _input: Value) -> ToolResponse {
    respond(client.execute(GET_PAYOUT_SCHEDULE, None).await)
}

//! Shop details tools.

use std::sync::Arc;

use serde_json::{Value, json};

use crate::registry::{ToolDefinition, ToolRegistry, ToolResponse};
use crate::shopify::Client;

use super::{mount, respond};

const GET_SHOP: &str = r"
query GetShop {
  shop {
    name
    email
    url
    myshopifyDomain
    currencyCode
    plan { displayName }
    primaryDomain { host url }
  }
}";

const GET_SHOP_POLICIES: &str = r"
query GetShopPolicies {
  shop {
    shopPolicies {
      type
      title
      url
    }
  }
}";

/// Mount the shop tools.
pub fn register(registry: &mut ToolRegistry, client: &Arc<Client>) {
    mount(
        registry,
        client,
        ToolDefinition::new(
            "get_shop",
            "Get basic shop details: name, contact email, domains, currency, and plan.",
            "read_shop",
            "essential",
            json!({
                "type": "object",
                "properties": {}
            }),
        ),
        get_shop,
    );

    mount(
        registry,
        client,
        ToolDefinition::new(
            "get_shop_policies",
            "Get the shop's legal policies (refund, privacy, terms of service) with their URLs.",
            "read_shop",
            "essential",
            json!({
                "type": "object",
                "properties": {}
            }),
        ),
        get_shop_policies,
    );
}

async fn get_shop(client: Arc<Client>, _input: Value) -> ToolResponse {
    respond(client.execute(GET_SHOP, None).await)
}

async fn get_shop_policies(client: Arc<Client>, _input: Value) -> ToolResponse {
    respond(client.execute(GET_SHOP_POLICIES, None).await)
}

//! Customer tools.

use std::sync::Arc;

use serde_json::{Value, json};

use crate::registry::{ToolDefinition, ToolRegistry, ToolResponse};
use crate::shopify::Client;

use super::{missing, mount, respond};

const GET_CUSTOMER: &str = r"
query GetCustomer($id: ID!) {
  customer(id: $id) {
    id
    displayName
    email
    phone
    numberOfOrders
    amountSpent { amount currencyCode }
    tags
    defaultAddress { city country }
  }
}";

const GET_CUSTOMERS: &str = r"
query GetCustomers($first: Int!, $after: String, $query: String) {
  customers(first: $first, after: $after, query: $query) {
    edges {
      node {
        id
        displayName
        email
        numberOfOrders
        amountSpent { amount currencyCode }
      }
    }
    pageInfo { hasNextPage endCursor }
  }
}";

const CUSTOMER_CREATE: &str = r"
mutation CustomerCreate($input: CustomerInput!) {
  customerCreate(input: $input) {
    customer { id displayName email }
    userErrors { field message }
  }
}";

const CUSTOMER_UPDATE: &str = r"
mutation CustomerUpdate($input: CustomerInput!) {
  customerUpdate(input: $input) {
    customer { id displayName email }
    userErrors { field message }
  }
}";

const CUSTOMER_ADD_TAGS: &str = r"
mutation CustomerAddTags($id: ID!, $tags: [String!]!) {
  tagsAdd(id: $id, tags: $tags) {
    node { id }
    userErrors { field message }
  }
}";

/// Optional customer fields, as (tool input key, wire key).
const CUSTOMER_FIELDS: [(&str, &str); 4] = [
    ("email", "email"),
    ("first_name", "firstName"),
    ("last_name", "lastName"),
    ("phone", "phone"),
];

/// Mount the customer tools.
pub fn register(registry: &mut ToolRegistry, client: &Arc<Client>) {
    mount(
        registry,
        client,
        ToolDefinition::new(
            "get_customer",
            "Get a single customer by ID, including order count and total spent.",
            "read_customers",
            "customers",
            json!({
                "type": "object",
                "properties": {
                    "id": { "type": "string", "description": "The customer ID" }
                },
                "required": ["id"]
            }),
        ),
        get_customer,
    );

    mount(
        registry,
        client,
        ToolDefinition::new(
            "get_customers",
            "Get customers. Use query to filter (e.g., 'email:jane@example.com', 'orders_count:>5').",
            "read_customers",
            "customers",
            json!({
                "type": "object",
                "properties": {
                    "limit": {
                        "type": "integer",
                        "description": "Number of customers to fetch (1-50, default 10)",
                        "minimum": 1,
                        "maximum": 50
                    },
                    "after": { "type": "string", "description": "Pagination cursor" },
                    "query": { "type": "string" }
                }
            }),
        ),
        get_customers,
    );

    mount(
        registry,
        client,
        ToolDefinition::new(
            "create_customer",
            "Create a customer account.",
            "write_customers",
            "customers",
            json!({
                "type": "object",
                "properties": {
                    "email": { "type": "string" },
                    "first_name": { "type": "string" },
                    "last_name": { "type": "string" },
                    "phone": { "type": "string" },
                    "tags": { "type": "array", "items": { "type": "string" } }
                },
                "required": ["email"]
            }),
        ),
        create_customer,
    );

    mount(
        registry,
        client,
        ToolDefinition::new(
            "update_customer",
            "Update a customer. Only the provided fields are changed.",
            "write_customers",
            "customers",
            json!({
                "type": "object",
                "properties": {
                    "id": { "type": "string", "description": "The customer ID" },
                    "email": { "type": "string" },
                    "first_name": { "type": "string" },
                    "last_name": { "type": "string" },
                    "phone": { "type": "string" }
                },
                "required": ["id"]
            }),
        ),
        update_customer,
    );

    mount(
        registry,
        client,
        ToolDefinition::new(
            "add_customer_tags",
            "Add tags to a customer without removing existing tags.",
            "write_customers",
            "customers",
            json!({
                "type": "object",
                "properties": {
                    "id": { "type": "string", "description": "The customer ID" },
                    "tags": { "type": "array", "items": { "type": "string" } }
                },
                "required": ["id", "tags"]
            }),
        ),
        add_customer_tags,
    );
}

async fn get_customer(client: Arc<Client>, input: Value) -> ToolResponse {
    let Some(id) = input["id"].as_str() else {
        return missing("id");
    };
    respond(client.execute(GET_CUSTOMER, Some(json!({"id": id}))).await)
}

async fn get_customers(client: Arc<Client>, input: Value) -> ToolResponse {
    let first = input["limit"].as_i64().unwrap_or(10).clamp(1, 50);
    let after = input["after"].as_str();
    let query = input["query"].as_str();

    respond(
        client
            .execute(
                GET_CUSTOMERS,
                Some(json!({"first": first, "after": after, "query": query})),
            )
            .await,
    )
}

async fn create_customer(client: Arc<Client>, input: Value) -> ToolResponse {
    if input["email"].as_str().is_none() {
        return missing("email");
    }

    let mut customer = serde_json::Map::new();
    for (input_key, wire_key) in CUSTOMER_FIELDS {
        if let Some(value) = input[input_key].as_str() {
            customer.insert(wire_key.to_string(), json!(value));
        }
    }
    if let Some(tags) = input["tags"].as_array() {
        customer.insert("tags".to_string(), json!(tags));
    }

    respond(
        client
            .execute(CUSTOMER_CREATE, Some(json!({"input": customer})))
            .await,
    )
}

async fn update_customer(client: Arc<Client>, input: Value) -> ToolResponse {
    let Some(id) = input["id"].as_str() else {
        return missing("id");
    };

    let mut customer = serde_json::Map::new();
    customer.insert("id".to_string(), json!(id));
    for (input_key, wire_key) in CUSTOMER_FIELDS {
        if let Some(value) = input[input_key].as_str() {
            customer.insert(wire_key.to_string(), json!(value));
        }
    }

    respond(
        client
            .execute(CUSTOMER_UPDATE, Some(json!({"input": customer})))
            .await,
    )
}

async fn add_customer_tags(client: Arc<Client>, input: Value) -> ToolResponse {
    let Some(id) = input["id"].as_str() else {
        return missing("id");
    };
    let Some(tags) = input["tags"].as_array() else {
        return missing("tags");
    };

    respond(
        client
            .execute(CUSTOMER_ADD_TAGS, Some(json!({"id": id, "tags": tags})))
            .await,
    )
}

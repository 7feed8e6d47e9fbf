//! Collection tools.

use std::sync::Arc;

use serde_json::{Value, json};

use crate::registry::{ToolDefinition, ToolRegistry, ToolResponse};
use crate::shopify::Client;

use super::{missing, mount, respond};

const GET_COLLECTIONS: &str = r"
query GetCollections($first: Int!, $query: String) {
  collections(first: $first, query: $query) {
    edges {
      node {
        id
        title
        handle
        updatedAt
        productsCount { count }
      }
    }
    pageInfo { hasNextPage endCursor }
  }
}";

const COLLECTION_ADD_PRODUCTS: &str = r"
mutation CollectionAddProducts($id: ID!, $productIds: [ID!]!) {
  collectionAddProductsV2(id: $id, productIds: $productIds) {
    job { id }
    userErrors { field message }
  }
}";

const COLLECTION_REMOVE_PRODUCTS: &str = r"
mutation CollectionRemoveProducts($id: ID!, $productIds: [ID!]!) {
  collectionRemoveProducts(id: $id, productIds: $productIds) {
    job { id }
    userErrors { field message }
  }
}";

/// Mount the collection tools.
pub fn register(registry: &mut ToolRegistry, client: &Arc<Client>) {
    mount(
        registry,
        client,
        ToolDefinition::new(
            "get_collections",
            "List collections with product counts. Use query to filter by title.",
            "read_products",
            "products",
            json!({
                "type": "object",
                "properties": {
                    "limit": {
                        "type": "integer",
                        "description": "Number of collections to fetch (1-50, default 10)",
                        "minimum": 1,
                        "maximum": 50
                    },
                    "query": { "type": "string" }
                }
            }),
        ),
        get_collections,
    );

    mount(
        registry,
        client,
        ToolDefinition::new(
            "add_products_to_collection",
            "Add products to a manual collection.",
            "write_products",
            "products",
            json!({
                "type": "object",
                "properties": {
                    "collection_id": { "type": "string" },
                    "product_ids": {
                        "type": "array",
                        "items": { "type": "string" },
                        "minItems": 1
                    }
                },
                "required": ["collection_id", "product_ids"]
            }),
        ),
        add_products,
    );

    mount(
        registry,
        client,
        ToolDefinition::new(
            "remove_products_from_collection",
            "Remove products from a manual collection.",
            "write_products",
            "products",
            json!({
                "type": "object",
                "properties": {
                    "collection_id": { "type": "string" },
                    "product_ids": {
                        "type": "array",
                        "items": { "type": "string" },
                        "minItems": 1
                    }
                },
                "required": ["collection_id", "product_ids"]
            }),
        ),
        remove_products,
    );
}

async fn get_collections(client: Arc<Client>, input: Value) -> ToolResponse {
    let first = input["limit"].as_i64().unwrap_or(10).clamp(1, 50);
    let query = input["query"].as_str();

    respond(
        client
            .execute(GET_COLLECTIONS, Some(json!({"first": first, "query": query})))
            .await,
    )
}

async fn add_products(client: Arc<Client>, input: Value) -> ToolResponse {
    membership_change(&client, COLLECTION_ADD_PRODUCTS, &input).await
}

async fn remove_products(client: Arc<Client>, input: Value) -> ToolResponse {
    membership_change(&client, COLLECTION_REMOVE_PRODUCTS, &input).await
}

async fn membership_change(client: &Client, operation: &str, input: &Value) -> ToolResponse {
    let Some(collection_id) = input["collection_id"].as_str() else {
        return missing("collection_id");
    };
    let Some(product_ids) = input["product_ids"].as_array() else {
        return missing("product_ids");
    };

    respond(
        client
            .execute(
                operation,
                Some(json!({"id": collection_id, "productIds": product_ids})),
            )
            .await,
    )
}

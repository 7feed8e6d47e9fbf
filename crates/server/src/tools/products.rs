//! Product tools.

use std::sync::Arc;

use serde_json::{Value, json};

use crate::registry::{ToolDefinition, ToolRegistry, ToolResponse};
use crate::shopify::Client;

use super::{missing, mount, respond};

const GET_PRODUCT: &str = r"
query GetProduct($id: ID!) {
  product(id: $id) {
    id
    title
    handle
    status
    vendor
    productType
    tags
    totalInventory
    variants(first: 50) {
      edges {
        node {
          id
          title
          sku
          price
          inventoryQuantity
        }
      }
    }
  }
}";

const GET_PRODUCTS: &str = r"
query GetProducts($first: Int!, $after: String, $query: String) {
  products(first: $first, after: $after, query: $query) {
    edges {
      node {
        id
        title
        handle
        status
        vendor
        totalInventory
      }
    }
    pageInfo { hasNextPage endCursor }
  }
}";

const PRODUCT_CREATE: &str = r"
mutation ProductCreate($input: ProductInput!) {
  productCreate(input: $input) {
    product { id title handle status }
    userErrors { field message }
  }
}";

const PRODUCT_UPDATE: &str = r"
mutation ProductUpdate($input: ProductInput!) {
  productUpdate(input: $input) {
    product { id title status }
    userErrors { field message }
  }
}";

const PRODUCT_DELETE: &str = r"
mutation ProductDelete($input: ProductDeleteInput!) {
  productDelete(input: $input) {
    deletedProductId
    userErrors { field message }
  }
}";

/// Update fields accepted by `update_product`, as (tool input key, wire key).
const UPDATE_FIELDS: [(&str, &str); 5] = [
    ("title", "title"),
    ("description_html", "descriptionHtml"),
    ("vendor", "vendor"),
    ("product_type", "productType"),
    ("status", "status"),
];

/// Mount the product tools.
pub fn register(registry: &mut ToolRegistry, client: &Arc<Client>) {
    mount(
        registry,
        client,
        ToolDefinition::new(
            "get_product",
            "Get a single product by ID, including its variants and inventory.",
            "read_products",
            "products",
            json!({
                "type": "object",
                "properties": {
                    "id": { "type": "string", "description": "The product ID" }
                },
                "required": ["id"]
            }),
        ),
        get_product,
    );

    mount(
        registry,
        client,
        ToolDefinition::new(
            "get_products",
            "Get products. Use query to filter (e.g., 'status:active', 'vendor:Acme').",
            "read_products",
            "products",
            json!({
                "type": "object",
                "properties": {
                    "limit": {
                        "type": "integer",
                        "description": "Number of products to fetch (1-50, default 10)",
                        "minimum": 1,
                        "maximum": 50
                    },
                    "after": { "type": "string", "description": "Pagination cursor" },
                    "query": { "type": "string", "description": "Search query to filter products" }
                }
            }),
        ),
        get_products,
    );

    mount(
        registry,
        client,
        ToolDefinition::new(
            "create_product",
            "Create a product. New products start in DRAFT status unless specified.",
            "write_products",
            "products",
            json!({
                "type": "object",
                "properties": {
                    "title": { "type": "string" },
                    "description_html": { "type": "string" },
                    "vendor": { "type": "string" },
                    "product_type": { "type": "string" },
                    "tags": { "type": "array", "items": { "type": "string" } },
                    "status": { "type": "string", "enum": ["ACTIVE", "DRAFT", "ARCHIVED"] }
                },
                "required": ["title"]
            }),
        ),
        create_product,
    );

    mount(
        registry,
        client,
        ToolDefinition::new(
            "update_product",
            "Update a product. Only the provided fields are changed.",
            "write_products",
            "products",
            json!({
                "type": "object",
                "properties": {
                    "id": { "type": "string", "description": "The product ID" },
                    "title": { "type": "string" },
                    "description_html": { "type": "string" },
                    "vendor": { "type": "string" },
                    "product_type": { "type": "string" },
                    "status": { "type": "string", "enum": ["ACTIVE", "DRAFT", "ARCHIVED"] }
                },
                "required": ["id"]
            }),
        ),
        update_product,
    );

    mount(
        registry,
        client,
        ToolDefinition::new(
            "delete_product",
            "Delete a product and all its variants.",
            "write_products",
            "products",
            json!({
                "type": "object",
                "properties": {
                    "id": { "type": "string", "description": "The product ID" }
                },
                "required": ["id"]
            }),
        ),
        delete_product,
    );
}

async fn get_product(client: Arc<Client>, input: Value) -> ToolResponse {
    let Some(id) = input["id"].as_str() else {
        return missing("id");
    };
    respond(client.execute(GET_PRODUCT, Some(json!({"id": id}))).await)
}

async fn get_products(client: Arc<Client>, input: Value) -> ToolResponse {
    let first = input["limit"].as_i64().unwrap_or(10).clamp(1, 50);
    let after = input["after"].as_str();
    let query = input["query"].as_str();

    respond(
        client
            .execute(
                GET_PRODUCTS,
                Some(json!({"first": first, "after": after, "query": query})),
            )
            .await,
    )
}

async fn create_product(client: Arc<Client>, input: Value) -> ToolResponse {
    let Some(title) = input["title"].as_str() else {
        return missing("title");
    };

    let mut product = serde_json::Map::new();
    product.insert("title".to_string(), json!(title));
    for (input_key, wire_key) in UPDATE_FIELDS.iter().skip(1) {
        if let Some(value) = input[*input_key].as_str() {
            product.insert((*wire_key).to_string(), json!(value));
        }
    }
    if let Some(tags) = input["tags"].as_array() {
        product.insert("tags".to_string(), json!(tags));
    }

    respond(
        client
            .execute(PRODUCT_CREATE, Some(json!({"input": product})))
            .await,
    )
}

async fn update_product(client: Arc<Client>, input: Value) -> ToolResponse {
    let Some(id) = input["id"].as_str() else {
        return missing("id");
    };

    // Partial update: only fields present in the tool input are sent, so
    // absent fields are left untouched on the remote side.
    let mut product = serde_json::Map::new();
    product.insert("id".to_string(), json!(id));
    for (input_key, wire_key) in UPDATE_FIELDS {
        if let Some(value) = input[input_key].as_str() {
            product.insert(wire_key.to_string(), json!(value));
        }
    }

    respond(
        client
            .execute(PRODUCT_UPDATE, Some(json!({"input": product})))
            .await,
    )
}

async fn delete_product(client: Arc<Client>, input: Value) -> ToolResponse {
    let Some(id) = input["id"].as_str() else {
        return missing("id");
    };
    respond(
        client
            .execute(PRODUCT_DELETE, Some(json!({"input": {"id": id}})))
            .await,
    )
}

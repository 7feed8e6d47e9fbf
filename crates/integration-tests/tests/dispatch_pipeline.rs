//! Integration tests for the resolve → dispatch → registry pipeline.

use std::sync::Arc;

use shoptools_server::config::{Environment, StorefrontConfig};
use shoptools_server::registry::ToolRegistry;
use shoptools_server::shopify::Client;
use shoptools_server::{catalog, dispatch, resolver};

fn client() -> Arc<Client> {
    let config = StorefrontConfig::from_environment(&Environment::from_pairs([
        ("SHOPIFY_ACCESS_TOKEN", "shpat_integration"),
        ("SHOPIFY_STORE_URL", "https://test-store.myshopify.com"),
        ("SHOPIFY_API_URL", "https://test-store.myshopify.com/api/graphql"),
    ]))
    .expect("client config");
    Arc::new(Client::new(config))
}

fn mount(enabled: &[String]) -> (ToolRegistry, usize) {
    let client = client();
    let mut registry = ToolRegistry::new();
    let invocations = dispatch::mount_enabled(&mut registry, &client, enabled);
    (registry, invocations)
}

#[test]
fn test_resolved_environment_drives_mounted_tools() {
    let env = Environment::from_pairs([(resolver::LEGACY_VAR, "essential,inventory")]);
    let enabled = resolver::resolve(&env);
    let (registry, _) = mount(&enabled);

    let categories: Vec<&str> = registry
        .definitions()
        .iter()
        .map(|d| d.category.as_str())
        .collect();
    assert!(categories.contains(&"essential"));
    assert!(categories.contains(&"inventory"));
    assert!(!categories.contains(&"commerce"));

    let essential = catalog::lookup("essential").expect("essential");
    let inventory = catalog::lookup("inventory").expect("inventory");
    assert_eq!(
        registry.len(),
        essential.declared_tool_count + inventory.declared_tool_count
    );
}

#[test]
fn test_every_category_mounts_its_declared_count() {
    for category in &catalog::CATALOG {
        let (registry, invocations) = mount(&[category.name.to_string()]);
        assert_eq!(
            registry.len(),
            category.declared_tool_count,
            "category {}",
            category.name
        );
        assert_eq!(invocations, category.modules.len(), "category {}", category.name);
    }
}

#[test]
fn test_tool_names_are_globally_unique_across_catalog() {
    let enabled: Vec<String> = catalog::category_names().map(String::from).collect();
    let (registry, _) = mount(&enabled);

    let declared: usize = catalog::CATALOG.iter().map(|c| c.declared_tool_count).sum();
    // If two modules registered the same tool name, the registry would hold
    // fewer entries than the catalog declares.
    assert_eq!(registry.len(), declared);
}

#[test]
fn test_duplicated_enabled_name_runs_registrars_per_occurrence() {
    // Known duplication hazard, preserved on purpose: the enabled list is
    // not deduplicated, so each occurrence invokes the category's
    // registrars again.
    let enabled = vec!["marketing".to_string(), "marketing".to_string()];
    let (registry, invocations) = mount(&enabled);

    let marketing = catalog::lookup("marketing").expect("marketing");
    assert_eq!(invocations, 2 * marketing.modules.len());
    assert_eq!(registry.len(), marketing.declared_tool_count);
}

#[test]
fn test_definitions_follow_enabled_order() {
    let (registry, _) = mount(&["analytics".to_string(), "commerce".to_string()]);
    let categories: Vec<&str> = registry
        .definitions()
        .iter()
        .map(|d| d.category.as_str())
        .collect();

    let first_commerce = categories
        .iter()
        .position(|c| *c == "commerce")
        .expect("commerce mounted");
    let last_analytics = categories
        .iter()
        .rposition(|c| *c == "analytics")
        .expect("analytics mounted");
    assert!(last_analytics < first_commerce, "analytics must precede commerce");
}

#[tokio::test]
async fn test_unmounted_tool_is_error_response() {
    let (registry, _) = mount(&["essential".to_string()]);
    let response = registry
        .call("get_payouts", serde_json::json!({}))
        .await;
    assert!(response.is_error());
    assert!(response.content().contains("get_payouts"));
}

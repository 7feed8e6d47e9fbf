//! Integration tests for category resolution and catalog queries.
//!
//! Every scenario runs against an injected environment map; the process
//! environment is never touched.

use shoptools_server::config::Environment;
use shoptools_server::{catalog, resolver};

fn all_category_names() -> Vec<String> {
    catalog::category_names().map(String::from).collect()
}

// =============================================================================
// Boolean-flag mode
// =============================================================================

#[test]
fn test_each_single_flag_enables_exactly_that_category() {
    for name in catalog::category_names() {
        let env = Environment::from_pairs([(resolver::flag_var(name), "true".to_string())]);
        assert_eq!(
            resolver::resolve(&env),
            vec![name.to_string()],
            "flag for {name} should enable exactly {{{name}}}"
        );
    }
}

#[test]
fn test_false_plus_true_flags_enable_only_the_true_one() {
    let env = Environment::from_pairs([
        (resolver::flag_var("essential"), "false".to_string()),
        (resolver::flag_var("marketing"), "true".to_string()),
    ]);
    assert_eq!(resolver::resolve(&env), vec!["marketing".to_string()]);
}

#[test]
fn test_single_false_flag_shadows_legacy_variable() {
    // Boolean mode is active because a flag is present, so the legacy
    // variable is ignored even though the enabled set comes out empty.
    let env = Environment::from_pairs([
        (resolver::flag_var("analytics"), "false".to_string()),
        (resolver::LEGACY_VAR.to_string(), "all".to_string()),
    ]);
    let enabled = resolver::resolve(&env);
    assert!(enabled.is_empty());
    assert_eq!(
        catalog::total_declared_tool_count(enabled.iter().map(String::as_str)),
        0
    );
}

// =============================================================================
// Legacy mode
// =============================================================================

#[test]
fn test_no_configuration_enables_all_in_catalog_order() {
    let enabled = resolver::resolve(&Environment::default());
    assert_eq!(enabled, all_category_names());
}

#[test]
fn test_legacy_none_yields_empty_set_and_zero_tool_count() {
    let env = Environment::from_pairs([(resolver::LEGACY_VAR, "none")]);
    let enabled = resolver::resolve(&env);
    assert!(enabled.is_empty());
    assert_eq!(
        catalog::total_declared_tool_count(enabled.iter().map(String::as_str)),
        0
    );
}

#[test]
fn test_legacy_list_with_unknown_token_warns_and_drops() {
    let env = Environment::from_pairs([(resolver::LEGACY_VAR, "essential,bogus,commerce")]);
    assert_eq!(
        resolver::resolve(&env),
        vec!["essential".to_string(), "commerce".to_string()]
    );
}

#[test]
fn test_legacy_duplicates_double_the_declared_count() {
    let env = Environment::from_pairs([(resolver::LEGACY_VAR, "essential,essential")]);
    let enabled = resolver::resolve(&env);
    assert_eq!(
        enabled,
        vec!["essential".to_string(), "essential".to_string()]
    );

    let essential = catalog::lookup("essential").expect("essential exists");
    assert_eq!(
        catalog::total_declared_tool_count(enabled.iter().map(String::as_str)),
        2 * essential.declared_tool_count
    );
}

// =============================================================================
// Catalog queries
// =============================================================================

#[test]
fn test_lookup_unknown_name_is_absent_not_panic() {
    assert!(catalog::lookup("nonexistent").is_none());
}

#[test]
fn test_total_declared_count_over_full_catalog() {
    let names = all_category_names();
    let total = catalog::total_declared_tool_count(names.iter().map(String::as_str));
    let expected: usize = names
        .iter()
        .filter_map(|n| catalog::lookup(n))
        .map(|c| c.declared_tool_count)
        .sum();
    assert_eq!(total, expected);
}

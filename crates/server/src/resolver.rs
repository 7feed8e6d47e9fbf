//! Category resolution from process configuration.
//!
//! Two mutually exclusive parsing strategies, selected by a single probe:
//!
//! - **Boolean-flag mode**: one `SHOPIFY_TOOLS_<CATEGORY>` variable per
//!   category. The presence of *any* such flag, whatever its value,
//!   activates this mode for the whole resolution and the legacy variable
//!   is ignored entirely, even when the resulting list is empty.
//! - **Legacy mode**: the single `SHOPIFY_TOOL_CATEGORIES` variable holding
//!   `all`, `none`, or a comma-separated category list.
//!
//! The result is computed exactly once at startup and held for the process
//! lifetime; there is no reload path.

use crate::catalog;
use crate::config::Environment;

/// Legacy combined variable, consulted only when no boolean flag is set.
pub const LEGACY_VAR: &str = "SHOPIFY_TOOL_CATEGORIES";

/// Prefix for the per-category boolean flags.
pub const FLAG_PREFIX: &str = "SHOPIFY_TOOLS_";

/// Boolean flag variable name for a category.
#[must_use]
pub fn flag_var(category: &str) -> String {
    format!("{FLAG_PREFIX}{}", category.to_uppercase())
}

/// Compute the ordered list of enabled category names.
///
/// Boolean-flag mode yields categories in catalog order. Legacy-list mode
/// preserves the order tokens were given, **without deduplication**:
/// repeated tokens appear repeated in the output. Unknown legacy tokens are
/// logged as warnings and dropped; they never abort resolution.
#[must_use]
pub fn resolve(env: &Environment) -> Vec<String> {
    if boolean_mode_active(env) {
        return resolve_flags(env);
    }
    resolve_legacy(env)
}

/// Whether any per-category boolean flag is explicitly present.
///
/// An explicit `false` still counts as presence: it selects boolean mode
/// (and disables its category) rather than falling through to the legacy
/// variable.
fn boolean_mode_active(env: &Environment) -> bool {
    catalog::category_names().any(|name| env.contains(&flag_var(name)))
}

fn resolve_flags(env: &Environment) -> Vec<String> {
    catalog::category_names()
        .filter(|name| {
            env.get(&flag_var(name))
                .is_some_and(|value| value.eq_ignore_ascii_case("true"))
        })
        .map(String::from)
        .collect()
}

fn resolve_legacy(env: &Environment) -> Vec<String> {
    let raw = env.get(LEGACY_VAR).unwrap_or("").trim().to_string();

    if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
        return catalog::category_names().map(String::from).collect();
    }
    if raw.eq_ignore_ascii_case("none") {
        return Vec::new();
    }

    raw.split(',')
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .filter(|token| {
            let known = catalog::lookup(token).is_some();
            if !known {
                tracing::warn!(token = %token, "ignoring unknown category in {LEGACY_VAR}");
            }
            known
        })
        .collect()
}

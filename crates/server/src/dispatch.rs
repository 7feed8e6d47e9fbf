//! Mounts the enabled categories onto a tool registry.
//!
//! For each category name in the resolver's output, in the order produced,
//! every module registrar the catalog declares for it runs exactly once per
//! occurrence. There is no deduplication safeguard: a category (or module)
//! reachable twice registers twice. The registry resolves the collision by
//! name (last registration wins), so the net effect is a re-registration
//! rather than an error. Observed behavior, kept as-is.

use std::sync::Arc;

use crate::catalog;
use crate::registry::ToolRegistry;
use crate::shopify::Client;
use crate::tools;

/// The uniform module registrar contract: accept the server handle and the
/// shared execution client; mount zero or more named tools as a side effect.
type Registrar = fn(&mut ToolRegistry, &Arc<Client>);

/// Map a catalog module identifier to its registrar.
fn registrar(module: &str) -> Option<Registrar> {
    Some(match module {
        "shop" => tools::shop::register,
        "search" => tools::search::register,
        "cart" => tools::cart::register,
        "orders" => tools::orders::register,
        "draft_orders" => tools::draft_orders::register,
        "fulfillment" => tools::fulfillment::register,
        "products" => tools::products::register,
        "collections" => tools::collections::register,
        "metafields" => tools::metafields::register,
        "customers" => tools::customers::register,
        "segments" => tools::segments::register,
        "inventory" => tools::inventory::register,
        "locations" => tools::locations::register,
        "discounts" => tools::discounts::register,
        "gift_cards" => tools::gift_cards::register,
        "payouts" => tools::payouts::register,
        "reports" => tools::reports::register,
        _ => return None,
    })
}

/// Mount every enabled category's modules onto the registry.
///
/// Unknown category names and unknown module identifiers are logged and
/// skipped, matching the resolver's leniency. Returns the number of
/// registrar invocations performed (duplicated categories invoke their
/// registrars once per occurrence, so this can exceed the number of
/// distinct modules).
pub fn mount_enabled(
    registry: &mut ToolRegistry,
    client: &Arc<Client>,
    enabled: &[String],
) -> usize {
    let mut invocations = 0;

    for name in enabled {
        let Some(category) = catalog::lookup(name) else {
            tracing::warn!(category = %name, "enabled category not in catalog, skipping");
            continue;
        };
        for module in category.modules {
            match registrar(module) {
                Some(register) => {
                    register(registry, client);
                    invocations += 1;
                    tracing::debug!(category = %name, module = %module, "registered module");
                }
                None => {
                    tracing::warn!(category = %name, module = %module, "no registrar for module");
                }
            }
        }
    }

    invocations
}

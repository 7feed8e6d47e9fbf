//! Static catalog of tool categories.
//!
//! Each category groups related storefront operations that are enabled or
//! disabled as a unit. The catalog is closed: exactly seven categories,
//! defined once, immutable for the process lifetime. The declared tool
//! counts are descriptive metadata; nothing at runtime verifies that a
//! module registrar mounts exactly that many tools.

/// A named, fixed group of related remote operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryConfig {
    /// Category name; pairwise distinct across the catalog.
    pub name: &'static str,
    /// Human description shown in startup logs and documentation.
    pub description: &'static str,
    /// Number of tools the category's modules are expected to mount.
    pub declared_tool_count: usize,
    /// Module identifiers owned by this category, in registration order.
    pub modules: &'static [&'static str],
}

/// The closed set of categories, in catalog order.
pub static CATALOG: [CategoryConfig; 7] = [
    CategoryConfig {
        name: "essential",
        description: "Core storefront lookups: shop details, search, carts",
        declared_tool_count: 8,
        modules: &["shop", "search", "cart"],
    },
    CategoryConfig {
        name: "commerce",
        description: "Order lifecycle: orders, draft orders, fulfillment",
        declared_tool_count: 12,
        modules: &["orders", "draft_orders", "fulfillment"],
    },
    CategoryConfig {
        name: "products",
        description: "Catalog management: products, collections, metafields",
        declared_tool_count: 10,
        modules: &["products", "collections", "metafields"],
    },
    CategoryConfig {
        name: "customers",
        description: "Customer accounts and segments",
        declared_tool_count: 7,
        modules: &["customers", "segments"],
    },
    CategoryConfig {
        name: "inventory",
        description: "Inventory levels and locations",
        declared_tool_count: 6,
        modules: &["inventory", "locations"],
    },
    CategoryConfig {
        name: "marketing",
        description: "Discount codes and gift cards",
        declared_tool_count: 8,
        modules: &["discounts", "gift_cards"],
    },
    CategoryConfig {
        name: "analytics",
        description: "Payouts and sales reporting",
        declared_tool_count: 5,
        modules: &["payouts", "reports"],
    },
];

/// Category names in catalog order.
#[must_use]
pub fn category_names() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|c| c.name)
}

/// Look up a category by exact name.
///
/// Unknown names return `None` so callers can treat them leniently.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static CategoryConfig> {
    CATALOG.iter().find(|c| c.name == name)
}

/// Sum the declared tool counts for an enabled-category list.
///
/// Names that do not resolve contribute zero. The input is not
/// deduplicated: a category appearing twice is counted twice, matching the
/// resolver's duplicate-preserving output.
#[must_use]
pub fn total_declared_tool_count<'a, I>(enabled: I) -> usize
where
    I: IntoIterator<Item = &'a str>,
{
    enabled
        .into_iter()
        .filter_map(lookup)
        .map(|c| c.declared_tool_count)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_seven_distinct_names() {
        let names: Vec<&str> = category_names().collect();
        assert_eq!(names.len(), 7);
        for (i, a) in names.iter().enumerate() {
            for b in names.iter().skip(i + 1) {
                assert_ne!(a, b, "category names must be pairwise distinct");
            }
        }
    }

    #[test]
    fn test_every_category_has_modules() {
        for category in &CATALOG {
            assert!(
                !category.modules.is_empty(),
                "{} must own at least one module",
                category.name
            );
        }
    }

    #[test]
    fn test_lookup_known() {
        let essential = lookup("essential").expect("essential exists");
        assert_eq!(essential.modules, &["shop", "search", "cart"]);
    }

    #[test]
    fn test_lookup_unknown_is_none() {
        assert!(lookup("nonexistent").is_none());
    }

    #[test]
    fn test_total_count_empty_is_zero() {
        assert_eq!(total_declared_tool_count([]), 0);
    }

    #[test]
    fn test_total_count_skips_unresolvable() {
        let essential = lookup("essential").expect("essential exists");
        assert_eq!(
            total_declared_tool_count(["essential", "bogus"]),
            essential.declared_tool_count
        );
    }

    #[test]
    fn test_total_count_counts_duplicates_per_occurrence() {
        // Pass-through of duplicate enabled names is intentional: the
        // resolver does not deduplicate, so neither does the sum.
        let essential = lookup("essential").expect("essential exists");
        assert_eq!(
            total_declared_tool_count(["essential", "essential"]),
            2 * essential.declared_tool_count
        );
    }

    #[test]
    fn test_total_count_all_categories() {
        let names: Vec<&str> = category_names().collect();
        let total: usize = CATALOG.iter().map(|c| c.declared_tool_count).sum();
        assert_eq!(total_declared_tool_count(names.iter().copied()), total);
        assert_eq!(total, 56);
    }
}

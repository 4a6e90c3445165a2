use diesel::prelude::*;

use crate::catalog::kind::{ProductKind, ProductVariant};
use crate::db::models::{Notebook, Smartphone};
use crate::db::schema::{notebooks, smartphones};

/// How many rows each subtype contributes to the main page.
pub const MAIN_PAGE_LIMIT: i64 = 5;

/// Collects the most recent products across the requested subtypes.
///
/// Each known subtype name contributes its latest [`MAIN_PAGE_LIMIT`] rows
/// by descending id (creation order proxy), appended in argument order.
/// Unknown names contribute nothing. If `with_respect_to` names a subtype
/// that is both in the registry and among the requested names, the whole
/// list is stably reordered so that subtype's items come first; in every
/// other case the concatenation is returned as-is. This path has no error
/// kind of its own, only database failures.
pub fn get_products_for_main_page(
    conn: &mut PgConnection,
    subtypes: &[&str],
    with_respect_to: Option<&str>,
) -> QueryResult<Vec<ProductVariant>> {
    let mut products = Vec::new();
    for name in subtypes {
        match ProductKind::parse(name) {
            Some(ProductKind::Notebook) => {
                let rows = notebooks::table
                    .order(notebooks::id.desc())
                    .limit(MAIN_PAGE_LIMIT)
                    .load::<Notebook>(conn)?;
                products.extend(rows.into_iter().map(ProductVariant::Notebook));
            }
            Some(ProductKind::Smartphones) => {
                let rows = smartphones::table
                    .order(smartphones::id.desc())
                    .limit(MAIN_PAGE_LIMIT)
                    .load::<Smartphone>(conn)?;
                products.extend(rows.into_iter().map(ProductVariant::Smartphone));
            }
            None => {}
        }
    }

    if let Some(kind) = should_prioritize(subtypes, with_respect_to) {
        prioritize_subtype(&mut products, kind);
    }
    Ok(products)
}

/// Decides whether the reorder step applies: the prioritized name must be
/// in the registry and must have been requested verbatim.
pub fn should_prioritize(subtypes: &[&str], with_respect_to: Option<&str>) -> Option<ProductKind> {
    let name = with_respect_to?;
    let kind = ProductKind::parse(name)?;
    if subtypes.contains(&name) {
        Some(kind)
    } else {
        None
    }
}

/// Moves all items of `kind` to the front, keeping the relative order
/// inside each group. `sort_by_key` is stable, so this is exactly a
/// partition that preserves both groups' internal order.
pub fn prioritize_subtype(products: &mut [ProductVariant], kind: ProductKind) {
    products.sort_by_key(|p| p.kind() != kind);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_data;

    fn mixed_list() -> Vec<ProductVariant> {
        vec![
            ProductVariant::Notebook(mock_data::sample_notebook(5, 1, "nb-5")),
            ProductVariant::Notebook(mock_data::sample_notebook(4, 1, "nb-4")),
            ProductVariant::Smartphone(mock_data::sample_smartphone(9, 2, "sp-9")),
            ProductVariant::Smartphone(mock_data::sample_smartphone(8, 2, "sp-8")),
        ]
    }

    fn slugs(products: &[ProductVariant]) -> Vec<&str> {
        products.iter().map(|p| p.slug()).collect()
    }

    #[test]
    fn prioritized_subtype_moves_to_the_front_stably() {
        let mut products = mixed_list();
        prioritize_subtype(&mut products, ProductKind::Smartphones);
        assert_eq!(slugs(&products), ["sp-9", "sp-8", "nb-5", "nb-4"]);
    }

    #[test]
    fn prioritizing_the_leading_subtype_changes_nothing() {
        let mut products = mixed_list();
        prioritize_subtype(&mut products, ProductKind::Notebook);
        assert_eq!(slugs(&products), ["nb-5", "nb-4", "sp-9", "sp-8"]);
    }

    #[test]
    fn reorder_applies_only_to_known_and_requested_names() {
        let requested = ["notebook", "smartphones"];
        assert_eq!(
            should_prioritize(&requested, Some("smartphones")),
            Some(ProductKind::Smartphones)
        );
        assert_eq!(should_prioritize(&requested, None), None);
        // In the registry but not requested: skipped.
        assert_eq!(should_prioritize(&["notebook"], Some("smartphones")), None);
        // Not in the registry at all: skipped.
        assert_eq!(should_prioritize(&requested, Some("tablets")), None);
    }
}

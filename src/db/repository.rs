use std::collections::HashMap;

use bigdecimal::BigDecimal;
use chrono::Utc;
use diesel::dsl::count_star;
use diesel::prelude::*;
use serde::Serialize;

use crate::catalog::image::validate_image;
use crate::catalog::kind::{ProductKind, ProductVariant};
use crate::db::models::*;
use crate::db::schema::*;
use crate::error::CatalogError;

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// Which subtype table each category display name counts. Table-driven on
/// purpose: a new subtype means a new entry here, and a category name
/// missing from this list is a hard error, not a zero count.
pub const CATEGORY_SUBTYPES: [(&str, ProductKind); 2] = [
    ("Notebooks", ProductKind::Notebook),
    ("Smartphones", ProductKind::Smartphones),
];

pub fn subtype_for_category(name: &str) -> Result<ProductKind, CatalogError> {
    CATEGORY_SUBTYPES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, kind)| *kind)
        .ok_or_else(|| CatalogError::UnmappedCategory(name.to_string()))
}

/// One sidebar entry: a category with the product count of its subtype.
#[derive(Debug, Clone, Serialize)]
pub struct SidebarCategory {
    pub name: String,
    pub slug: String,
    pub count: i64,
}

/// Every category annotated with how many rows of its mapped subtype
/// reference it. Counts are gathered with one grouped query per subtype
/// table and merged in memory; the category list is small.
pub fn get_categories_for_left_sidebar(
    conn: &mut PgConnection,
) -> Result<Vec<SidebarCategory>, CatalogError> {
    let cats = categories::table
        .order(categories::id.asc())
        .load::<Category>(conn)?;

    let notebook_counts: HashMap<i32, i64> = notebooks::table
        .group_by(notebooks::category_id)
        .select((notebooks::category_id, count_star()))
        .load::<(i32, i64)>(conn)?
        .into_iter()
        .collect();
    let smartphone_counts: HashMap<i32, i64> = smartphones::table
        .group_by(smartphones::category_id)
        .select((smartphones::category_id, count_star()))
        .load::<(i32, i64)>(conn)?
        .into_iter()
        .collect();

    cats.into_iter()
        .map(|c| sidebar_entry(c, &notebook_counts, &smartphone_counts))
        .collect()
}

/// Picks the right per-subtype count for one category, per the fixed
/// mapping. Categories with products land on their map entry; categories
/// without any land on zero; unmapped names are an error.
fn sidebar_entry(
    category: Category,
    notebook_counts: &HashMap<i32, i64>,
    smartphone_counts: &HashMap<i32, i64>,
) -> Result<SidebarCategory, CatalogError> {
    let counts = match subtype_for_category(&category.name)? {
        ProductKind::Notebook => notebook_counts,
        ProductKind::Smartphones => smartphone_counts,
    };
    Ok(SidebarCategory {
        count: counts.get(&category.id).copied().unwrap_or(0),
        name: category.name,
        slug: category.slug,
    })
}

pub fn create_category(conn: &mut PgConnection, new_category: NewCategory) -> QueryResult<Category> {
    diesel::insert_into(categories::table)
        .values(&new_category)
        .get_result(conn)
}

pub fn get_category(conn: &mut PgConnection, id: i32) -> QueryResult<Category> {
    categories::table.find(id).first(conn)
}

pub fn get_all_categories(conn: &mut PgConnection) -> QueryResult<Vec<Category>> {
    categories::table.order(categories::name.asc()).load(conn)
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

/// Validates the image payload and inserts the notebook with the decoded
/// metadata. On a failing bound nothing is written.
pub fn create_notebook(
    conn: &mut PgConnection,
    mut new_notebook: NewNotebook,
    image_data: &[u8],
) -> Result<Notebook, CatalogError> {
    let meta = validate_image(image_data)?;
    new_notebook.image_width = meta.width as i32;
    new_notebook.image_height = meta.height as i32;
    new_notebook.image_size = meta.size as i32;
    let row = diesel::insert_into(notebooks::table)
        .values(&new_notebook)
        .get_result(conn)?;
    Ok(row)
}

pub fn create_smartphone(
    conn: &mut PgConnection,
    mut new_smartphone: NewSmartphone,
    image_data: &[u8],
) -> Result<Smartphone, CatalogError> {
    let meta = validate_image(image_data)?;
    new_smartphone.image_width = meta.width as i32;
    new_smartphone.image_height = meta.height as i32;
    new_smartphone.image_size = meta.size as i32;
    let row = diesel::insert_into(smartphones::table)
        .values(&new_smartphone)
        .get_result(conn)?;
    Ok(row)
}

/// Applies an edit; a replaced image goes back through validation before
/// anything is written.
pub fn update_notebook(
    conn: &mut PgConnection,
    id: i32,
    mut changes: UpdateNotebook,
    image_data: Option<&[u8]>,
) -> Result<Notebook, CatalogError> {
    if let Some(data) = image_data {
        let meta = validate_image(data)?;
        changes.image_width = Some(meta.width as i32);
        changes.image_height = Some(meta.height as i32);
        changes.image_size = Some(meta.size as i32);
    }
    let row = diesel::update(notebooks::table.find(id))
        .set((changes, notebooks::updated_at.eq(Utc::now().naive_utc())))
        .get_result(conn)?;
    Ok(row)
}

pub fn update_smartphone(
    conn: &mut PgConnection,
    id: i32,
    mut changes: UpdateSmartphone,
    image_data: Option<&[u8]>,
) -> Result<Smartphone, CatalogError> {
    if let Some(data) = image_data {
        let meta = validate_image(data)?;
        changes.image_width = Some(meta.width as i32);
        changes.image_height = Some(meta.height as i32);
        changes.image_size = Some(meta.size as i32);
    }
    let row = diesel::update(smartphones::table.find(id))
        .set((changes, smartphones::updated_at.eq(Utc::now().naive_utc())))
        .get_result(conn)?;
    Ok(row)
}

/// Resolves a polymorphic `(subtype tag, row id)` reference to its
/// concrete row. A missing row surfaces as `Error::NotFound`, which for
/// cart lines means a dangling reference.
pub fn resolve_product(
    conn: &mut PgConnection,
    kind: ProductKind,
    id: i32,
) -> QueryResult<ProductVariant> {
    match kind {
        ProductKind::Notebook => notebooks::table
            .find(id)
            .first::<Notebook>(conn)
            .map(ProductVariant::Notebook),
        ProductKind::Smartphones => smartphones::table
            .find(id)
            .first::<Smartphone>(conn)
            .map(ProductVariant::Smartphone),
    }
}

pub fn get_product_by_slug(
    conn: &mut PgConnection,
    kind: ProductKind,
    slug: &str,
) -> QueryResult<ProductVariant> {
    match kind {
        ProductKind::Notebook => notebooks::table
            .filter(notebooks::slug.eq(slug))
            .first::<Notebook>(conn)
            .map(ProductVariant::Notebook),
        ProductKind::Smartphones => smartphones::table
            .filter(smartphones::slug.eq(slug))
            .first::<Smartphone>(conn)
            .map(ProductVariant::Smartphone),
    }
}

// ---------------------------------------------------------------------------
// Customers
// ---------------------------------------------------------------------------

pub fn create_customer(conn: &mut PgConnection, new_customer: NewCustomer) -> QueryResult<Customer> {
    diesel::insert_into(customers::table)
        .values(&new_customer)
        .get_result(conn)
}

pub fn get_customer(conn: &mut PgConnection, id: i32) -> QueryResult<Customer> {
    customers::table.find(id).first(conn)
}

// ---------------------------------------------------------------------------
// Cart
// ---------------------------------------------------------------------------

/// The customer's current open cart, created on demand. Carts whose
/// `in_order` flag is set are finished history and never reused.
pub fn get_or_create_cart(conn: &mut PgConnection, customer_id: i32) -> QueryResult<Cart> {
    let existing = carts::table
        .filter(carts::owner_id.eq(customer_id))
        .filter(carts::in_order.eq(false))
        .order(carts::id.desc())
        .first::<Cart>(conn)
        .optional()?;
    match existing {
        Some(cart) => Ok(cart),
        None => diesel::insert_into(carts::table)
            .values(&NewCart {
                owner_id: customer_id,
                for_anonymous_user: false,
            })
            .get_result(conn),
    }
}

pub fn get_cart(conn: &mut PgConnection, id: i32) -> QueryResult<Cart> {
    carts::table.find(id).first(conn)
}

/// A cart whose `in_order` flag is set is immutable history.
fn ensure_open(cart: &Cart) -> Result<(), CatalogError> {
    if cart.in_order {
        return Err(CatalogError::CartClosed(cart.id));
    }
    Ok(())
}

fn validate_qty(qty: i32) -> Result<(), CatalogError> {
    if qty < 1 {
        return Err(CatalogError::InvalidQuantity(qty));
    }
    Ok(())
}

fn open_cart(conn: &mut PgConnection, cart_id: i32) -> Result<Cart, CatalogError> {
    let cart = get_cart(conn, cart_id)?;
    ensure_open(&cart)?;
    Ok(cart)
}

/// The line total captured at add time.
pub fn line_total(unit_price: &BigDecimal, qty: i32) -> BigDecimal {
    unit_price * BigDecimal::from(qty)
}

/// Scales a stored line total to a new quantity. The unit price is derived
/// from the line itself so the price captured at add time survives
/// quantity edits even if the product has been repriced since.
pub fn reprice_line(final_price: &BigDecimal, old_qty: i32, new_qty: i32) -> BigDecimal {
    (final_price / BigDecimal::from(old_qty)) * BigDecimal::from(new_qty)
}

/// Resolves the referenced product, captures its current price into the
/// line, and refreshes the cart's denormalized totals.
pub fn add_to_cart(
    conn: &mut PgConnection,
    customer_id: i32,
    cart_id: i32,
    kind: ProductKind,
    product_id: i32,
    qty: i32,
) -> Result<CartProduct, CatalogError> {
    validate_qty(qty)?;
    open_cart(conn, cart_id)?;
    let product = resolve_product(conn, kind, product_id)?;
    let new_line = NewCartProduct {
        customer_id,
        cart_id,
        product_kind: kind.as_str().to_string(),
        product_id,
        qty,
        final_price: line_total(product.price(), qty),
    };
    let line = diesel::insert_into(cart_products::table)
        .values(&new_line)
        .get_result::<CartProduct>(conn)?;
    recompute_cart(conn, cart_id)?;
    Ok(line)
}

pub fn change_qty(
    conn: &mut PgConnection,
    cart_product_id: i32,
    qty: i32,
) -> Result<CartProduct, CatalogError> {
    validate_qty(qty)?;
    let line = cart_products::table
        .find(cart_product_id)
        .first::<CartProduct>(conn)?;
    open_cart(conn, line.cart_id)?;
    let updated = diesel::update(cart_products::table.find(cart_product_id))
        .set((
            cart_products::qty.eq(qty),
            cart_products::final_price.eq(reprice_line(&line.final_price, line.qty, qty)),
            cart_products::updated_at.eq(Utc::now().naive_utc()),
        ))
        .get_result::<CartProduct>(conn)?;
    recompute_cart(conn, line.cart_id)?;
    Ok(updated)
}

pub fn remove_from_cart(conn: &mut PgConnection, cart_product_id: i32) -> Result<(), CatalogError> {
    let line = cart_products::table
        .find(cart_product_id)
        .first::<CartProduct>(conn)?;
    open_cart(conn, line.cart_id)?;
    diesel::delete(cart_products::table.find(cart_product_id)).execute(conn)?;
    recompute_cart(conn, line.cart_id)?;
    Ok(())
}

/// Rebuilds `total_products` and `final_price` from the cart's lines.
/// Every mutating cart operation ends here; reads never recompute.
pub fn recompute_cart(conn: &mut PgConnection, cart_id: i32) -> QueryResult<Cart> {
    let lines = cart_products::table
        .filter(cart_products::cart_id.eq(cart_id))
        .load::<CartProduct>(conn)?;
    let total: i32 = lines.iter().map(|l| l.qty).sum();
    let price = lines
        .iter()
        .fold(BigDecimal::from(0), |acc, l| acc + &l.final_price);
    diesel::update(carts::table.find(cart_id))
        .set((
            carts::total_products.eq(total),
            carts::final_price.eq(price),
            carts::updated_at.eq(Utc::now().naive_utc()),
        ))
        .get_result(conn)
}

/// Parses a line's stored subtype tag and resolves its product. A tag that
/// no longer parses, like a row that no longer exists, is a data-integrity
/// error surfaced to the caller.
pub fn resolve_cart_line(
    conn: &mut PgConnection,
    line: &CartProduct,
) -> Result<ProductVariant, CatalogError> {
    let kind = ProductKind::parse(&line.product_kind)
        .ok_or_else(|| CatalogError::UnknownSubtype(line.product_kind.clone()))?;
    Ok(resolve_product(conn, kind, line.product_id)?)
}

/// The cart's lines joined with their resolved products, in insertion
/// order. External checkout flows render and price from this.
pub fn get_cart_contents(
    conn: &mut PgConnection,
    cart_id: i32,
) -> Result<Vec<(CartProduct, ProductVariant)>, CatalogError> {
    let lines = cart_products::table
        .filter(cart_products::cart_id.eq(cart_id))
        .order(cart_products::id.asc())
        .load::<CartProduct>(conn)?;
    lines
        .into_iter()
        .map(|line| {
            let product = resolve_cart_line(conn, &line)?;
            Ok((line, product))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_data;
    use std::str::FromStr;

    #[test]
    fn sidebar_entry_counts_only_the_mapped_subtype() {
        let notebooks_cat = mock_data::sample_category(1, "Notebooks", "notebooks");
        let mut notebook_counts = HashMap::new();
        notebook_counts.insert(1, 3);
        // Smartphone rows in the same category id must not leak into the
        // notebook count.
        let mut smartphone_counts = HashMap::new();
        smartphone_counts.insert(1, 7);

        let entry = sidebar_entry(notebooks_cat, &notebook_counts, &smartphone_counts).unwrap();
        assert_eq!(entry.count, 3);
        assert_eq!(entry.slug, "notebooks");

        let empty_cat = mock_data::sample_category(2, "Smartphones", "smartphones");
        let entry = sidebar_entry(empty_cat, &notebook_counts, &smartphone_counts).unwrap();
        assert_eq!(entry.count, 0);

        let unmapped = mock_data::sample_category(3, "Tablets", "tablets");
        assert!(matches!(
            sidebar_entry(unmapped, &notebook_counts, &smartphone_counts),
            Err(CatalogError::UnmappedCategory(_))
        ));
    }

    #[test]
    fn closed_carts_reject_mutations() {
        let open = mock_data::sample_cart(1, 1);
        assert!(ensure_open(&open).is_ok());

        let mut ordered = mock_data::sample_cart(2, 1);
        ordered.in_order = true;
        let err = ensure_open(&ordered).unwrap_err();
        assert!(matches!(err, CatalogError::CartClosed(2)), "{err}");
    }

    #[test]
    fn quantities_must_be_positive() {
        assert!(validate_qty(1).is_ok());
        assert!(validate_qty(10).is_ok());
        for qty in [0, -1, -10] {
            let err = validate_qty(qty).unwrap_err();
            assert!(
                matches!(err, CatalogError::InvalidQuantity(q) if q == qty),
                "{err}"
            );
        }
    }

    #[test]
    fn category_mapping_is_fail_fast() {
        assert_eq!(
            subtype_for_category("Notebooks").unwrap(),
            ProductKind::Notebook
        );
        assert_eq!(
            subtype_for_category("Smartphones").unwrap(),
            ProductKind::Smartphones
        );
        let err = subtype_for_category("Tablets").unwrap_err();
        assert!(matches!(err, CatalogError::UnmappedCategory(name) if name == "Tablets"));
    }

    #[test]
    fn line_total_scales_the_unit_price() {
        let price = BigDecimal::from_str("33.33").unwrap();
        assert_eq!(line_total(&price, 3), BigDecimal::from_str("99.99").unwrap());
    }

    #[test]
    fn repricing_preserves_the_unit_price() {
        let three_at_33_33 = BigDecimal::from_str("99.99").unwrap();
        assert_eq!(
            reprice_line(&three_at_33_33, 3, 1),
            BigDecimal::from_str("33.33").unwrap()
        );
        assert_eq!(
            reprice_line(&three_at_33_33, 3, 5),
            BigDecimal::from_str("166.65").unwrap()
        );
    }
}

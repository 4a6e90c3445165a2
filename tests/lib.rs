use std::io::Cursor;
use std::str::FromStr;

use bigdecimal::BigDecimal;

use shop_backend::catalog::image::{validate_image, MAX_RESOLUTION, MIN_RESOLUTION};
use shop_backend::catalog::kind::{get_product_url, ProductKind, ProductVariant};
use shop_backend::catalog::latest::{prioritize_subtype, should_prioritize, MAIN_PAGE_LIMIT};
use shop_backend::db::repository::{line_total, subtype_for_category};
use shop_backend::error::CatalogError;
use shop_backend::mock_data;
use shop_backend::models::AddToCartRequest;

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::DynamicImage::ImageRgb8(image::RgbImage::new(width, height));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}

#[test]
fn image_bounds_are_inclusive_on_both_axes() {
    let (min_w, min_h) = MIN_RESOLUTION;
    let (max_w, max_h) = MAX_RESOLUTION;

    assert!(validate_image(&png_bytes(min_w, min_h)).is_ok());
    assert!(validate_image(&png_bytes(max_w, max_h)).is_ok());
    assert!(matches!(
        validate_image(&png_bytes(min_w - 1, min_h)),
        Err(CatalogError::MinResolution { .. })
    ));
    assert!(matches!(
        validate_image(&png_bytes(max_w, max_h + 1)),
        Err(CatalogError::MaxResolution { .. })
    ));
}

#[test]
fn validation_records_decoded_metadata() {
    let data = png_bytes(640, 480);
    let meta = validate_image(&data).unwrap();
    assert_eq!((meta.width, meta.height), (640, 480));
    assert_eq!(meta.size, data.len());
}

/// Simulates the main-page merge over fixture rows: latest 5 notebooks,
/// then latest 5 smartphones, in request order.
fn main_page_fixture() -> Vec<ProductVariant> {
    let notebooks =
        (1..=7).map(|id| ProductVariant::Notebook(mock_data::sample_notebook(id, 1, "nb")));
    let smartphones =
        (1..=7).map(|id| ProductVariant::Smartphone(mock_data::sample_smartphone(id, 2, "sp")));

    let mut products = Vec::new();
    products.extend(notebooks.rev().take(MAIN_PAGE_LIMIT as usize));
    products.extend(smartphones.rev().take(MAIN_PAGE_LIMIT as usize));
    products
}

#[test]
fn without_priority_the_result_is_plain_concatenation() {
    let products = main_page_fixture();
    let requested = ["notebook", "smartphones"];
    assert_eq!(should_prioritize(&requested, None), None);

    let kinds: Vec<ProductKind> = products.iter().map(ProductVariant::kind).collect();
    let expected: Vec<ProductKind> = std::iter::repeat(ProductKind::Notebook)
        .take(5)
        .chain(std::iter::repeat(ProductKind::Smartphones).take(5))
        .collect();
    assert_eq!(kinds, expected);
    // Within each group: newest (highest id) first.
    assert_eq!(products[0].id(), 7);
    assert_eq!(products[5].id(), 7);
}

#[test]
fn prioritized_subtype_leads_with_group_order_preserved() {
    let mut products = main_page_fixture();
    let requested = ["notebook", "smartphones"];
    let kind = should_prioritize(&requested, Some("smartphones")).unwrap();
    prioritize_subtype(&mut products, kind);

    let kinds: Vec<ProductKind> = products.iter().map(ProductVariant::kind).collect();
    let expected: Vec<ProductKind> = std::iter::repeat(ProductKind::Smartphones)
        .take(5)
        .chain(std::iter::repeat(ProductKind::Notebook).take(5))
        .collect();
    assert_eq!(kinds, expected);
    let smartphone_ids: Vec<i32> = products[..5].iter().map(ProductVariant::id).collect();
    assert_eq!(smartphone_ids, [7, 6, 5, 4, 3]);
}

#[test]
fn unrequested_or_unknown_priority_is_skipped() {
    let requested = ["notebook", "smartphones"];
    // Known to the registry but not requested.
    assert_eq!(should_prioritize(&["notebook"], Some("smartphones")), None);
    // Unknown to the registry entirely.
    assert_eq!(should_prioritize(&requested, Some("tablets")), None);
}

#[test]
fn sidebar_mapping_fails_fast_on_unmapped_names() {
    assert_eq!(
        subtype_for_category("Notebooks").unwrap(),
        ProductKind::Notebook
    );
    assert!(matches!(
        subtype_for_category("Tablets"),
        Err(CatalogError::UnmappedCategory(_))
    ));
}

#[test]
fn cart_line_tag_resolves_back_to_the_original_product() {
    let phone = mock_data::sample_smartphone(42, 2, "galaxy-s25");
    let line = mock_data::sample_cart_product(
        1,
        1,
        ProductKind::Smartphones.as_str(),
        phone.id,
        2,
        line_total(&phone.price, 2),
    );

    // The stored tag must parse against the registry...
    let kind = ProductKind::parse(&line.product_kind).unwrap();
    assert_eq!(kind, ProductKind::Smartphones);
    // ...and the resolved variant carries the original row's fields.
    let resolved = ProductVariant::Smartphone(phone.clone());
    assert_eq!(resolved.id(), line.product_id);
    assert_eq!(resolved.title(), phone.title);
    assert_eq!(line.final_price, BigDecimal::from(2 * 29999));
}

#[test]
fn product_url_yields_route_parameters_only() {
    let notebook = mock_data::sample_notebook(3, 1, "macbook-air");
    let url = get_product_url(&notebook, "product_detail");
    assert_eq!(
        (url.view_name, url.ct_model, url.slug.as_str()),
        ("product_detail", "notebook", "macbook-air")
    );
}

#[test]
fn product_kind_serializes_as_its_tag() {
    assert_eq!(
        serde_json::to_string(&ProductKind::Smartphones).unwrap(),
        "\"smartphones\""
    );
    let parsed: ProductKind = serde_json::from_str("\"notebook\"").unwrap();
    assert_eq!(parsed, ProductKind::Notebook);
}

#[test]
fn product_variant_is_tagged_with_its_kind() {
    let variant = ProductVariant::Notebook(mock_data::sample_notebook(1, 1, "nb-1"));
    let value = serde_json::to_value(&variant).unwrap();
    assert_eq!(value["kind"], "notebook");
    assert_eq!(value["slug"], "nb-1");
}

#[test]
fn add_to_cart_quantity_defaults_to_one() {
    let req: AddToCartRequest = serde_json::from_str(
        r#"{"customer_id": 1, "product_kind": "notebook", "product_id": 5}"#,
    )
    .unwrap();
    assert_eq!(req.qty, 1);
}

#[test]
fn line_totals_use_fixed_point_arithmetic() {
    let price = BigDecimal::from_str("19999.99").unwrap();
    assert_eq!(
        line_total(&price, 3),
        BigDecimal::from_str("59999.97").unwrap()
    );
}

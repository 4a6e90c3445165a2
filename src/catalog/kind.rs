use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::db::models::{Notebook, Smartphone};

/// The closed registry of product subtypes. Adding a subtype means adding
/// a variant here, a table for it, and an arm in every exhaustive match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    Notebook,
    Smartphones,
}

impl ProductKind {
    pub const ALL: [ProductKind; 2] = [ProductKind::Notebook, ProductKind::Smartphones];

    /// The type tag stored in cart lines and carried in URLs.
    pub fn as_str(self) -> &'static str {
        match self {
            ProductKind::Notebook => "notebook",
            ProductKind::Smartphones => "smartphones",
        }
    }

    /// Registry lookup. Unknown names are `None`, never an error; callers
    /// decide whether that is a silent skip or a hard failure.
    pub fn parse(name: &str) -> Option<ProductKind> {
        ProductKind::ALL.iter().copied().find(|k| k.as_str() == name)
    }
}

/// The abstract product shape shared by every subtype table.
pub trait StoreProduct {
    const KIND: ProductKind;

    fn id(&self) -> i32;
    fn category_id(&self) -> i32;
    fn title(&self) -> &str;
    fn slug(&self) -> &str;
    fn price(&self) -> &BigDecimal;
}

impl StoreProduct for Notebook {
    const KIND: ProductKind = ProductKind::Notebook;

    fn id(&self) -> i32 {
        self.id
    }

    fn category_id(&self) -> i32 {
        self.category_id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn price(&self) -> &BigDecimal {
        &self.price
    }
}

impl StoreProduct for Smartphone {
    const KIND: ProductKind = ProductKind::Smartphones;

    fn id(&self) -> i32 {
        self.id
    }

    fn category_id(&self) -> i32 {
        self.category_id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn price(&self) -> &BigDecimal {
        &self.price
    }
}

/// A resolved polymorphic reference: one concrete row out of the closed
/// set of subtype tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ProductVariant {
    #[serde(rename = "notebook")]
    Notebook(Notebook),
    #[serde(rename = "smartphones")]
    Smartphone(Smartphone),
}

impl ProductVariant {
    pub fn kind(&self) -> ProductKind {
        match self {
            ProductVariant::Notebook(_) => ProductKind::Notebook,
            ProductVariant::Smartphone(_) => ProductKind::Smartphones,
        }
    }

    pub fn id(&self) -> i32 {
        match self {
            ProductVariant::Notebook(p) => p.id,
            ProductVariant::Smartphone(p) => p.id,
        }
    }

    pub fn category_id(&self) -> i32 {
        match self {
            ProductVariant::Notebook(p) => p.category_id,
            ProductVariant::Smartphone(p) => p.category_id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ProductVariant::Notebook(p) => &p.title,
            ProductVariant::Smartphone(p) => &p.title,
        }
    }

    pub fn slug(&self) -> &str {
        match self {
            ProductVariant::Notebook(p) => &p.slug,
            ProductVariant::Smartphone(p) => &p.slug,
        }
    }

    pub fn price(&self) -> &BigDecimal {
        match self {
            ProductVariant::Notebook(p) => &p.price,
            ProductVariant::Smartphone(p) => &p.price,
        }
    }

    pub fn product_url(&self, view_name: &'static str) -> ProductUrl {
        ProductUrl {
            view_name,
            ct_model: self.kind().as_str(),
            slug: self.slug().to_string(),
        }
    }
}

/// The two parameters an external router needs to build a detail-page URL.
/// This module's responsibility ends at producing them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductUrl {
    pub view_name: &'static str,
    pub ct_model: &'static str,
    pub slug: String,
}

pub fn get_product_url<P: StoreProduct>(product: &P, view_name: &'static str) -> ProductUrl {
    ProductUrl {
        view_name,
        ct_model: P::KIND.as_str(),
        slug: product.slug().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_data;

    #[test]
    fn kind_round_trips_through_its_tag() {
        for kind in ProductKind::ALL {
            assert_eq!(ProductKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(ProductKind::parse("tablets"), None);
    }

    #[test]
    fn product_url_carries_tag_and_slug() {
        let notebook = mock_data::sample_notebook(1, 1, "thinkpad-x1");
        let url = get_product_url(&notebook, "product_detail");
        assert_eq!(url.view_name, "product_detail");
        assert_eq!(url.ct_model, "notebook");
        assert_eq!(url.slug, "thinkpad-x1");

        let phone = mock_data::sample_smartphone(2, 1, "pixel-9");
        assert_eq!(
            ProductVariant::Smartphone(phone).product_url("product_detail"),
            ProductUrl {
                view_name: "product_detail",
                ct_model: "smartphones",
                slug: "pixel-9".to_string(),
            }
        );
    }
}

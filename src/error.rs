use thiserror::Error;

/// Errors raised by the catalog and cart repositories.
///
/// The write path has two named resolution kinds; both abort the save with
/// no row written. The latest-products aggregator never produces an error:
/// unknown subtype names degrade silently. Category sidebar lookups with an
/// unmapped category name fail fast instead.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("resolution of image is lower than needed: {width}x{height}, minimum is {min_width}x{min_height}")]
    MinResolution {
        width: u32,
        height: u32,
        min_width: u32,
        min_height: u32,
    },

    #[error("resolution of image is higher than needed: {width}x{height}, maximum is {max_width}x{max_height}")]
    MaxResolution {
        width: u32,
        height: u32,
        max_width: u32,
        max_height: u32,
    },

    #[error("image could not be decoded: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("category '{0}' has no product count mapping")]
    UnmappedCategory(String),

    #[error("'{0}' is not a known product subtype")]
    UnknownSubtype(String),

    #[error("quantity must be positive, got {0}")]
    InvalidQuantity(i32),

    #[error("cart {0} is already in an order and can no longer change")]
    CartClosed(i32),

    #[error(transparent)]
    Db(#[from] diesel::result::Error),
}

impl CatalogError {
    /// True when the underlying cause is a missing row, e.g. a cart line
    /// whose polymorphic reference no longer resolves.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::Db(diesel::result::Error::NotFound))
    }
}

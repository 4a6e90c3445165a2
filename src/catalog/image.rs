use image::GenericImageView;

use crate::error::CatalogError;

/// Minimum accepted image resolution, (width, height).
pub const MIN_RESOLUTION: (u32, u32) = (400, 400);
/// Maximum accepted image resolution, (width, height).
pub const MAX_RESOLUTION: (u32, u32) = (800, 800);

/// Dimensions and byte size recorded alongside the image reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageMeta {
    pub width: u32,
    pub height: u32,
    pub size: usize,
}

/// Decodes the payload and checks it against the resolution bounds.
///
/// The low bound is checked before the high bound; the first failing check
/// wins. This runs synchronously on the save path and decodes the full
/// image into memory, so upload size limits are the caller's job.
pub fn validate_image(data: &[u8]) -> Result<ImageMeta, CatalogError> {
    let img = image::load_from_memory(data)?;
    let (width, height) = img.dimensions();

    let (min_width, min_height) = MIN_RESOLUTION;
    let (max_width, max_height) = MAX_RESOLUTION;

    if height < min_height || width < min_width {
        return Err(CatalogError::MinResolution {
            width,
            height,
            min_width,
            min_height,
        });
    }
    if height > max_height || width > max_width {
        return Err(CatalogError::MaxResolution {
            width,
            height,
            max_width,
            max_height,
        });
    }

    Ok(ImageMeta {
        width,
        height,
        size: data.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// A valid PNG payload with the given dimensions.
    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::DynamicImage::ImageRgb8(image::RgbImage::new(width, height));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png)
            .expect("encoding a fresh RGB image cannot fail");
        buf.into_inner()
    }

    #[test]
    fn rejects_images_below_the_minimum() {
        for (w, h) in [(399, 500), (500, 399), (1, 1)] {
            let err = validate_image(&png_bytes(w, h)).unwrap_err();
            assert!(
                matches!(err, CatalogError::MinResolution { width, height, .. } if width == w && height == h),
                "{w}x{h}: {err}"
            );
        }
    }

    #[test]
    fn rejects_images_above_the_maximum() {
        for (w, h) in [(801, 500), (500, 801), (900, 900)] {
            let err = validate_image(&png_bytes(w, h)).unwrap_err();
            assert!(
                matches!(err, CatalogError::MaxResolution { width, height, .. } if width == w && height == h),
                "{w}x{h}: {err}"
            );
        }
    }

    #[test]
    fn low_bound_wins_for_pathological_dimensions() {
        // 399x801 violates both bounds; the low check runs first.
        let err = validate_image(&png_bytes(399, 801)).unwrap_err();
        assert!(matches!(err, CatalogError::MinResolution { .. }), "{err}");
    }

    #[test]
    fn accepts_both_bounds_inclusive() {
        let data = png_bytes(400, 800);
        let meta = validate_image(&data).unwrap();
        assert_eq!(meta.width, 400);
        assert_eq!(meta.height, 800);
        assert_eq!(meta.size, data.len());
        assert!(validate_image(&png_bytes(800, 400)).is_ok());
        assert!(validate_image(&png_bytes(600, 600)).is_ok());
    }

    #[test]
    fn undecodable_payload_is_a_decode_error() {
        let err = validate_image(b"not an image").unwrap_err();
        assert!(matches!(err, CatalogError::ImageDecode(_)), "{err}");
    }
}

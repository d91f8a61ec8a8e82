//! Bounded, aspect-preserving thumbnails of uploaded images.

use std::io::Cursor;

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use thiserror::Error;

/// Longest side, in pixels, of a generated thumbnail.
pub const THUMBNAIL_MAX_SIDE: u32 = 150;

#[derive(Debug, Error)]
pub enum ThumbnailError {
    /// The source bytes are not an image this service can decode.
    #[error("invalid image: {0}")]
    InvalidImage(String),
    /// The resized image could not be encoded back.
    #[error("failed to encode thumbnail: {0}")]
    Encode(String),
}

/// Dimensions of the thumbnail for a `width`×`height` source.
///
/// The result fits in [`THUMBNAIL_MAX_SIDE`] on both axes, keeps the source
/// aspect ratio and never exceeds the source size.
pub fn thumbnail_dimensions(width: u32, height: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= THUMBNAIL_MAX_SIDE {
        return (width, height);
    }

    let scale = f64::from(THUMBNAIL_MAX_SIDE) / f64::from(longest);
    let fit = |side: u32| {
        let scaled = (f64::from(side) * scale).round() as u32;
        scaled.clamp(1, THUMBNAIL_MAX_SIDE)
    };
    (fit(width), fit(height))
}

/// Decodes `source`, shrinks it to thumbnail size and re-encodes it in the
/// source's own format.
pub fn make_thumbnail(source: &[u8]) -> Result<Vec<u8>, ThumbnailError> {
    let format =
        image::guess_format(source).map_err(|e| ThumbnailError::InvalidImage(e.to_string()))?;
    let decoded = image::load_from_memory_with_format(source, format)
        .map_err(|e| ThumbnailError::InvalidImage(e.to_string()))?;

    let (width, height) = thumbnail_dimensions(decoded.width(), decoded.height());
    let resized = if (width, height) == (decoded.width(), decoded.height()) {
        decoded
    } else {
        decoded.resize_exact(width, height, FilterType::Lanczos3)
    };

    // JPEG has no alpha channel and the GIF encoder only takes RGBA.
    let resized = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(resized.to_rgb8()),
        ImageFormat::Gif => DynamicImage::ImageRgba8(resized.to_rgba8()),
        _ => resized,
    };

    let mut encoded = Cursor::new(Vec::new());
    resized
        .write_to(&mut encoded, format)
        .map_err(|e| ThumbnailError::Encode(e.to_string()))?;
    Ok(encoded.into_inner())
}

#[cfg(test)]
pub(crate) mod tests {
    use image::{GenericImageView, Rgb, RgbImage, Rgba, RgbaImage};

    use super::*;

    /// Encodes a solid-colour RGB image of the given size.
    pub(crate) fn encoded_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let image = match format {
            ImageFormat::Png | ImageFormat::Gif => DynamicImage::ImageRgba8(
                RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 255])),
            ),
            _ => DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([200, 40, 40]))),
        };
        let mut out = Cursor::new(Vec::new());
        image.write_to(&mut out, format).unwrap();
        out.into_inner()
    }

    #[test]
    fn landscape_is_capped_on_width() {
        assert_eq!(thumbnail_dimensions(800, 400), (150, 75));
    }

    #[test]
    fn portrait_is_capped_on_height() {
        assert_eq!(thumbnail_dimensions(300, 900), (50, 150));
    }

    #[test]
    fn small_images_are_not_upscaled() {
        assert_eq!(thumbnail_dimensions(100, 40), (100, 40));
        assert_eq!(thumbnail_dimensions(150, 150), (150, 150));
    }

    #[test]
    fn extreme_ratios_keep_one_pixel() {
        assert_eq!(thumbnail_dimensions(3000, 1), (150, 1));
    }

    #[test]
    fn dimensions_preserve_aspect_ratio() {
        for (w, h) in [(800, 400), (1024, 768), (333, 1000), (151, 150), (640, 480)] {
            let (tw, th) = thumbnail_dimensions(w, h);
            assert!(tw <= THUMBNAIL_MAX_SIDE && th <= THUMBNAIL_MAX_SIDE);
            let source = f64::from(w) / f64::from(h);
            // Rounding one side to whole pixels bounds the ratio error.
            let low = (f64::from(tw) - 0.5) / (f64::from(th) + 0.5);
            let high = (f64::from(tw) + 0.5) / (f64::from(th) - 0.5).max(0.5);
            assert!(low <= source && source <= high, "{w}x{h} -> {tw}x{th}");
        }
    }

    #[test]
    fn jpeg_thumbnail_is_resized_jpeg() {
        let source = encoded_image(800, 400, ImageFormat::Jpeg);
        let thumbnail = make_thumbnail(&source).unwrap();

        assert_eq!(image::guess_format(&thumbnail).unwrap(), ImageFormat::Jpeg);
        let decoded = image::load_from_memory(&thumbnail).unwrap();
        assert_eq!(decoded.dimensions(), (150, 75));
    }

    #[test]
    fn png_and_gif_keep_their_format() {
        for format in [ImageFormat::Png, ImageFormat::Gif] {
            let source = encoded_image(200, 300, format);
            let thumbnail = make_thumbnail(&source).unwrap();

            assert_eq!(image::guess_format(&thumbnail).unwrap(), format);
            let decoded = image::load_from_memory(&thumbnail).unwrap();
            assert_eq!(decoded.dimensions(), (100, 150));
        }
    }

    #[test]
    fn rejects_bytes_that_are_not_an_image() {
        let err = make_thumbnail(b"definitely not an image").unwrap_err();
        assert!(matches!(err, ThumbnailError::InvalidImage(_)));
    }

    #[test]
    fn rejects_truncated_images() {
        let source = encoded_image(400, 400, ImageFormat::Png);
        let err = make_thumbnail(&source[..source.len() / 2]).unwrap_err();
        assert!(matches!(err, ThumbnailError::InvalidImage(_)));
    }

    #[test]
    fn rejects_svg_markup() {
        let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"/>"#;
        assert!(matches!(
            make_thumbnail(svg).unwrap_err(),
            ThumbnailError::InvalidImage(_)
        ));
    }
}

//! Raster normalization and PNG re-encoding.

use crate::config::AssetCategory;
use image::{
    DynamicImage, ExtendedColorType, ImageEncoder, ImageResult, RgbaImage,
    codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder},
    imageops::{self, FilterType},
};

/// Output dimensions for an image of `width`×`height`.
///
/// Downscaling categories larger than `max` on either side shrink so the
/// longer side equals `max`; the shorter side is rounded and never below 1.
pub fn target_size(width: u32, height: u32, category: AssetCategory, max: u32) -> (u32, u32) {
    let long = width.max(height);
    if !category.downscales() || long <= max {
        return (width, height);
    }

    let scale = |side: u32| -> u32 {
        let scaled = (u64::from(side) * u64::from(max) + u64::from(long) / 2) / u64::from(long);
        u32::try_from(scaled).unwrap_or(max).max(1)
    };

    if width >= height {
        (max, scale(height))
    } else {
        (scale(width), max)
    }
}

/// Convert to RGBA8 and downscale per category (Lanczos3).
pub fn normalize(img: DynamicImage, category: AssetCategory, max: u32) -> RgbaImage {
    let rgba = img.into_rgba8();
    let (width, height) = rgba.dimensions();
    let (w, h) = target_size(width, height, category, max);

    if (w, h) == (width, height) {
        rgba
    } else {
        imageops::resize(&rgba, w, h, FilterType::Lanczos3)
    }
}

/// Encode as PNG with maximum lossless compression.
pub fn encode_png(img: &RgbaImage) -> ImageResult<Vec<u8>> {
    let mut buf = Vec::new();
    PngEncoder::new_with_quality(&mut buf, CompressionType::Best, PngFilter::Adaptive).write_image(
        img.as_raw(),
        img.width(),
        img.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgba};

    #[test]
    fn test_target_size_landscape_icon() {
        assert_eq!(target_size(1024, 768, AssetCategory::Icon, 512), (512, 384));
    }

    #[test]
    fn test_target_size_portrait_icon() {
        assert_eq!(target_size(600, 1200, AssetCategory::Icon, 512), (256, 512));
    }

    #[test]
    fn test_target_size_small_icon_unchanged() {
        assert_eq!(target_size(300, 200, AssetCategory::Icon, 512), (300, 200));
        assert_eq!(target_size(512, 512, AssetCategory::Icon, 512), (512, 512));
    }

    #[test]
    fn test_target_size_splash_never_scaled() {
        assert_eq!(target_size(2048, 1536, AssetCategory::Splash, 512), (2048, 1536));
    }

    #[test]
    fn test_target_size_thin_strip_keeps_one_pixel() {
        assert_eq!(target_size(4000, 1, AssetCategory::Icon, 512), (512, 1));
    }

    #[test]
    fn test_normalize_converts_to_rgba() {
        let gray = GrayImage::from_pixel(4, 3, Luma([200]));
        let out = normalize(DynamicImage::ImageLuma8(gray), AssetCategory::Splash, 512);
        assert_eq!(out.dimensions(), (4, 3));
        assert_eq!(*out.get_pixel(0, 0), Rgba([200, 200, 200, 255]));
    }

    #[test]
    fn test_normalize_downscales_icon() {
        let img = RgbaImage::from_pixel(1024, 768, Rgba([10, 20, 30, 128]));
        let out = normalize(DynamicImage::ImageRgba8(img), AssetCategory::Icon, 512);
        assert_eq!(out.dimensions(), (512, 384));
    }

    #[test]
    fn test_encode_png_decodes_back() {
        let img = RgbaImage::from_pixel(7, 5, Rgba([1, 2, 3, 4]));
        let bytes = encode_png(&img).unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));

        let decoded = image::load_from_memory(&bytes).unwrap().into_rgba8();
        assert_eq!(decoded.dimensions(), (7, 5));
        assert_eq!(*decoded.get_pixel(6, 4), Rgba([1, 2, 3, 4]));
    }
}

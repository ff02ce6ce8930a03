//! Upload image preparation.
//!
//! The catalog service stores whatever bytes it receives, so every
//! upload is re-encoded as JPEG at a fixed low quality to bound the
//! payload size before it leaves the device.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;

use crate::{Error, Result};

/// JPEG quality applied to uploads by default.
pub const UPLOAD_JPEG_QUALITY: u8 = 30;

/// Configuration for upload image encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadImageOptions {
    /// JPEG quality (1-100)
    pub quality: u8,
}

impl Default for UploadImageOptions {
    fn default() -> Self {
        Self {
            quality: UPLOAD_JPEG_QUALITY,
        }
    }
}

/// Re-encoded JPEG payload ready for multipart upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadImage {
    /// JPEG-encoded bytes
    pub bytes: Vec<u8>,
    /// Source image width in pixels
    pub width: u32,
    /// Source image height in pixels
    pub height: u32,
}

/// Re-encode source bytes as an upload-ready JPEG.
///
/// Accepts any format the `image` crate can decode. Dimensions are left
/// untouched; only the encoding (and any alpha channel) changes.
pub fn prepare_upload_image(
    source_bytes: &[u8],
    options: UploadImageOptions,
) -> Result<UploadImage> {
    if source_bytes.is_empty() {
        return Err(Error::InvalidInput(
            "Upload image bytes cannot be empty".to_string(),
        ));
    }
    if options.quality == 0 || options.quality > 100 {
        return Err(Error::InvalidInput(
            "JPEG quality must be between 1 and 100".to_string(),
        ));
    }

    let source = image::load_from_memory(source_bytes).map_err(|error| {
        Error::InvalidInput(format!("Failed to decode source image for upload: {error}"))
    })?;

    // JPEG has no alpha channel; flatten before encoding.
    let rgb = source.to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut cursor = Cursor::new(Vec::new());
    let mut encoder = JpegEncoder::new_with_quality(&mut cursor, options.quality);
    encoder
        .encode_image(&rgb)
        .map_err(|error| Error::InvalidInput(format!("Failed to encode upload JPEG: {error}")))?;

    Ok(UploadImage {
        bytes: cursor.into_inner(),
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use image::{GenericImageView, ImageBuffer, ImageFormat, Rgba};

    use super::*;

    fn source_png(width: u32, height: u32) -> Vec<u8> {
        let image = ImageBuffer::<Rgba<u8>, Vec<u8>>::from_fn(width, height, |_x, _y| {
            Rgba([120, 90, 240, 255])
        });

        let mut cursor = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(image)
            .write_to(&mut cursor, ImageFormat::Png)
            .unwrap();
        cursor.into_inner()
    }

    #[test]
    fn prepare_upload_image_produces_jpeg() {
        let source = source_png(64, 48);
        let result = prepare_upload_image(&source, UploadImageOptions::default()).unwrap();

        assert_eq!(result.width, 64);
        assert_eq!(result.height, 48);
        assert_eq!(
            image::guess_format(&result.bytes).unwrap(),
            ImageFormat::Jpeg
        );
    }

    #[test]
    fn prepare_upload_image_keeps_dimensions() {
        let source = source_png(320, 200);
        let result = prepare_upload_image(&source, UploadImageOptions::default()).unwrap();

        let decoded = image::load_from_memory(&result.bytes).unwrap();
        assert_eq!(decoded.width(), 320);
        assert_eq!(decoded.height(), 200);
    }

    #[test]
    fn prepare_upload_image_rejects_invalid_source() {
        let err = prepare_upload_image(b"not-an-image", UploadImageOptions::default()).unwrap_err();
        match err {
            Error::InvalidInput(message) => assert!(message.contains("decode")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn prepare_upload_image_rejects_empty_source() {
        assert!(prepare_upload_image(&[], UploadImageOptions::default()).is_err());
    }

    #[test]
    fn prepare_upload_image_rejects_out_of_range_quality() {
        let source = source_png(8, 8);
        assert!(prepare_upload_image(&source, UploadImageOptions { quality: 0 }).is_err());
        assert!(prepare_upload_image(&source, UploadImageOptions { quality: 101 }).is_err());
    }
}

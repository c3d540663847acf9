use std::io::Cursor;
use std::path::Path;

use color_placement::Mosaic;

use crate::error::OutputError;

/// Color written for cells that are still empty.
pub const BACKGROUND: [u8; 3] = [0, 0, 0];

/// Encode a mosaic as an 8-bit RGB PNG.
///
/// Empty cells are written as [`BACKGROUND`].
pub fn encode_png(mosaic: &Mosaic) -> Result<Vec<u8>, OutputError> {
    let (width, height) = match (u32::try_from(mosaic.width()), u32::try_from(mosaic.height())) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(OutputError::UnsupportedDimensions {
                width: mosaic.width(),
                height: mosaic.height(),
            })
        }
    };

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| OutputError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(&mosaic.to_rgb(BACKGROUND))
            .map_err(|e| OutputError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Re-compress with oxipng (zopfli + adaptive filter selection).
///
/// Falls back to the input if optimization fails.
pub fn optimize_png(png_bytes: Vec<u8>) -> Vec<u8> {
    match oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    ) {
        Ok(optimized) => optimized,
        Err(e) => {
            tracing::warn!(%e, "PNG optimization failed, keeping unoptimized image");
            png_bytes
        }
    }
}

/// Encode `mosaic` and write it to `path`. Returns the number of bytes
/// written.
pub fn write_png(path: &Path, mosaic: &Mosaic, optimize: bool) -> Result<usize, OutputError> {
    let mut png_bytes = encode_png(mosaic)?;
    if optimize {
        png_bytes = optimize_png(png_bytes);
    }
    std::fs::write(path, &png_bytes)?;
    Ok(png_bytes.len())
}

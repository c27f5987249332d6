//! Image decoding, square cropping, resizing and PNG export

use crate::buffer::{ChannelMode, PixelBuffer};
use crate::io::error::{MosaicError, Result, invalid_parameter};
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, GrayImage, RgbImage};
use std::path::Path;

/// Decode an image file
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded
pub fn open_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|e| MosaicError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Crop the centred square whose side is the shorter image side
///
/// Odd sides larger than one pixel are rounded down to an even number so the
/// crop stays centred on whole pixels.
pub fn center_crop_square(image: &DynamicImage) -> DynamicImage {
    let (width, height) = image.dimensions();
    let mut side = width.min(height);
    if side % 2 != 0 && side > 1 {
        side -= 1;
    }

    let left = (width - side) / 2;
    let top = (height - side) / 2;
    image.crop_imm(left, top, side, side)
}

/// Crop a target to a square whose side is a multiple of `block_size`
///
/// # Errors
///
/// Returns an error if `block_size` is zero or larger than the cropped side
pub fn prepare_target(
    image: &DynamicImage,
    block_size: usize,
    mode: ChannelMode,
) -> Result<PixelBuffer> {
    if block_size == 0 {
        return Err(invalid_parameter(
            "block_size",
            &block_size,
            &"blocks must be at least one pixel wide",
        ));
    }

    let square = center_crop_square(image);
    let side = square.width() as usize;
    let rounded = side - side % block_size;
    if rounded == 0 {
        return Err(MosaicError::Dimension {
            height: side,
            width: side,
            block_count: 0,
            reason: "target is smaller than one block",
        });
    }

    let resized = if rounded == side {
        square
    } else {
        let rounded = to_u32("block_size", rounded)?;
        square.resize_exact(rounded, rounded, FilterType::Lanczos3)
    };
    to_pixel_buffer(&resized, mode)
}

/// Crop a library image to a square and scale it to `thumb_size`
///
/// # Errors
///
/// Returns an error if `thumb_size` is zero or too large for an image
pub fn prepare_thumbnail(
    image: &DynamicImage,
    thumb_size: usize,
    mode: ChannelMode,
) -> Result<PixelBuffer> {
    if thumb_size == 0 {
        return Err(invalid_parameter(
            "thumb_size",
            &thumb_size,
            &"thumbnails must be at least one pixel wide",
        ));
    }

    let side = to_u32("thumb_size", thumb_size)?;
    let square = center_crop_square(image);
    let resized = if square.width() == side {
        square
    } else {
        square.resize_exact(side, side, FilterType::Lanczos3)
    };
    to_pixel_buffer(&resized, mode)
}

/// Decode and prepare a target image file
///
/// # Errors
///
/// Returns an error if the file cannot be decoded or prepared
pub fn load_target(path: &Path, block_size: usize, mode: ChannelMode) -> Result<PixelBuffer> {
    prepare_target(&open_image(path)?, block_size, mode)
}

/// Convert a decoded image into a pixel buffer of the requested mode
///
/// Colour conversion goes through RGB so grey output uses the same luma
/// transform as [`PixelBuffer::to_mode`].
///
/// # Errors
///
/// Returns an error if the decoded sample count does not match its dimensions
pub fn to_pixel_buffer(image: &DynamicImage, mode: ChannelMode) -> Result<PixelBuffer> {
    let rgb = image.to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);
    let buffer = PixelBuffer::from_samples(height, width, ChannelMode::Rgb, rgb.into_raw())?;
    Ok(buffer.to_mode(mode))
}

/// Convert a pixel buffer into an image ready for encoding
///
/// # Errors
///
/// Returns an error if the buffer dimensions exceed image limits
pub fn to_dynamic_image(buffer: &PixelBuffer) -> Result<DynamicImage> {
    let width = to_u32("width", buffer.width())?;
    let height = to_u32("height", buffer.height())?;
    let raw = buffer.to_raw();
    let mismatch = || MosaicError::ShapeMismatch {
        expected: buffer.shape(),
        found: (buffer.height(), buffer.width(), 0),
    };

    match buffer.mode() {
        ChannelMode::Grey => GrayImage::from_raw(width, height, raw)
            .map(DynamicImage::ImageLuma8)
            .ok_or_else(mismatch),
        ChannelMode::Rgb => RgbImage::from_raw(width, height, raw)
            .map(DynamicImage::ImageRgb8)
            .ok_or_else(mismatch),
    }
}

/// Save a pixel buffer, encoding by file extension
///
/// # Errors
///
/// Returns an error if:
/// - The buffer is empty
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn save_buffer(buffer: &PixelBuffer, output_path: &Path) -> Result<()> {
    if buffer.is_empty() {
        return Err(MosaicError::EmptyInput {
            operation: "image export",
        });
    }

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| MosaicError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    to_dynamic_image(buffer)?
        .save(output_path)
        .map_err(|e| MosaicError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}

fn to_u32(parameter: &'static str, value: usize) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_overflow| invalid_parameter(parameter, &value, &"exceeds image size limits"))
}

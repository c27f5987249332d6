//! Thumbnail library construction from directories of images or pixel grids

use crate::buffer::{ChannelMode, PixelBuffer};
use crate::io::configuration::GRID_EXTENSION;
use crate::io::error::{MosaicError, Result, shape_mismatch};
use crate::io::grid::{read_grid, write_grid};
use crate::io::image::{open_image, prepare_thumbnail, save_buffer};
use crate::matching::ThumbnailLibrary;
use image::ImageError;
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// On-disk format for pre-generated thumbnails
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ThumbnailFormat {
    /// Encoded PNG image
    #[default]
    Png,
    /// Greyscale CSV pixel grid
    Csv,
}

impl ThumbnailFormat {
    /// File extension written for this format
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Csv => GRID_EXTENSION,
        }
    }
}

/// Regular files in a directory, sorted by path for a stable library order
///
/// # Errors
///
/// Returns an error if the directory cannot be listed
pub fn library_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let read_error = |e| MosaicError::FileSystem {
        path: dir.to_path_buf(),
        operation: "read directory",
        source: e,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn is_grid(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(GRID_EXTENSION))
}

/// Load one library entry as a thumbnail
///
/// CSV grids are used as stored and must already measure `thumb_size` on each
/// side. Other files are decoded, cropped and scaled. Files that are not
/// decodable images yield `None`.
///
/// # Errors
///
/// Returns an error if a grid has the wrong size or cannot be parsed, or the
/// file cannot be read
pub fn load_thumbnail(
    path: &Path,
    thumb_size: usize,
    mode: ChannelMode,
) -> Result<Option<PixelBuffer>> {
    if is_grid(path) {
        let grid = read_grid(path)?;
        if grid.height() != thumb_size || grid.width() != thumb_size {
            return Err(shape_mismatch((thumb_size, thumb_size, 1), grid.shape()));
        }
        return Ok(Some(grid.to_mode(mode)));
    }

    match open_image(path) {
        Ok(image) => prepare_thumbnail(&image, thumb_size, mode).map(Some),
        Err(MosaicError::ImageLoad {
            source: source @ (ImageError::Unsupported(_) | ImageError::Decoding(_)),
            ..
        }) => {
            warn!("Skipping {}: {source}", path.display());
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Build a thumbnail library from every usable file in a directory
///
/// # Errors
///
/// Returns an error if the directory cannot be read, an entry is malformed, or
/// no thumbnails could be loaded
pub fn load_library(dir: &Path, thumb_size: usize, mode: ChannelMode) -> Result<ThumbnailLibrary> {
    let mut thumbnails = Vec::new();
    for path in library_entries(dir)? {
        if let Some(thumbnail) = load_thumbnail(&path, thumb_size, mode)? {
            thumbnails.push(thumbnail);
        }
    }
    debug!(
        "Loaded {} thumbnails from {}",
        thumbnails.len(),
        dir.display()
    );
    ThumbnailLibrary::new(thumbnails)
}

/// Prepare an image and store it as a reusable thumbnail
///
/// Returns the written path, or `None` when the source is not a decodable image.
///
/// # Errors
///
/// Returns an error if preparation or writing fails, or a CSV is requested for
/// colour output
pub fn export_thumbnail(
    source: &Path,
    output_dir: &Path,
    thumb_size: usize,
    mode: ChannelMode,
    format: ThumbnailFormat,
) -> Result<Option<PathBuf>> {
    let Some(thumbnail) = load_thumbnail(source, thumb_size, mode)? else {
        return Ok(None);
    };

    let stem = source.file_stem().unwrap_or_default().to_string_lossy();
    let output_path = output_dir.join(format!("{stem}.{}", format.extension()));
    match format {
        ThumbnailFormat::Png => save_buffer(&thumbnail, &output_path)?,
        ThumbnailFormat::Csv => write_grid(&output_path, &thumbnail)?,
    }
    Ok(Some(output_path))
}

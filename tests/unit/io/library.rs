//! Tests for thumbnail library loading and export

#[cfg(test)]
mod tests {
    use image::{DynamicImage, Rgb, RgbImage};
    use photomosaic::buffer::{ChannelMode, PixelBuffer};
    use photomosaic::io::grid::{read_grid, write_grid};
    use photomosaic::io::library::{
        ThumbnailFormat, export_thumbnail, library_entries, load_library, load_thumbnail,
    };
    use photomosaic::{MosaicError, Result};
    use std::path::Path;
    use tempfile::TempDir;

    fn write_png(path: &Path, side: u32, colour: [u8; 3]) -> Result<()> {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(side, side, Rgb(colour)))
            .save(path)
            .map_err(MosaicError::from)
    }

    // Tests entries are sorted and directories are skipped
    // Verified by returning entries in directory order
    #[test]
    fn test_library_entries_sorted() -> Result<()> {
        let dir = TempDir::new()?;
        std::fs::write(dir.path().join("b.txt"), "b")?;
        std::fs::write(dir.path().join("a.txt"), "a")?;
        std::fs::create_dir(dir.path().join("c"))?;

        let entries = library_entries(dir.path())?;
        let names: Vec<_> = entries
            .iter()
            .filter_map(|p| p.file_name()?.to_str().map(String::from))
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
        Ok(())
    }

    // Tests images and grids load together while other files are skipped
    // Verified by failing on the first undecodable file
    #[test]
    fn test_load_library_mixed_entries() -> Result<()> {
        let dir = TempDir::new()?;
        write_png(&dir.path().join("1_red.png"), 4, [255, 0, 0])?;
        write_grid(
            &dir.path().join("2_grey.csv"),
            &PixelBuffer::filled(4, 4, &[128])?,
        )?;
        std::fs::write(dir.path().join("3_notes.txt"), "not an image")?;

        let library = load_library(dir.path(), 4, ChannelMode::Rgb)?;
        assert_eq!(library.len(), 2);
        assert_eq!(library.mode(), ChannelMode::Rgb);
        assert_eq!(library.get(0), Some(&PixelBuffer::filled(4, 4, &[255, 0, 0])?));
        assert_eq!(library.get(1), Some(&PixelBuffer::filled(4, 4, &[128, 128, 128])?));
        Ok(())
    }

    // Tests grids of the wrong size are rejected instead of skipped
    // Verified by resizing grids to the thumbnail size
    #[test]
    fn test_grid_wrong_size() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("small.csv");
        write_grid(&path, &PixelBuffer::filled(3, 3, &[0])?)?;

        assert!(matches!(
            load_thumbnail(&path, 4, ChannelMode::Grey),
            Err(MosaicError::ShapeMismatch { .. })
        ));
        assert!(load_library(dir.path(), 4, ChannelMode::Grey).is_err());
        Ok(())
    }

    // Tests a directory without usable files is an empty library
    // Verified by returning a library with no thumbnails
    #[test]
    fn test_load_library_empty() -> Result<()> {
        let dir = TempDir::new()?;
        std::fs::write(dir.path().join("readme.txt"), "nothing here")?;
        assert!(matches!(
            load_library(dir.path(), 4, ChannelMode::Rgb),
            Err(MosaicError::EmptyLibrary)
        ));
        Ok(())
    }

    // Tests exported thumbnails keep the source stem and reload unchanged
    // Verified by writing every thumbnail as PNG
    #[test]
    fn test_export_thumbnail_formats() -> Result<()> {
        let source_dir = TempDir::new()?;
        let output_dir = TempDir::new()?;
        let source = source_dir.path().join("photo.png");
        write_png(&source, 6, [30, 60, 90])?;

        let png = export_thumbnail(&source, output_dir.path(), 6, ChannelMode::Rgb, ThumbnailFormat::Png)?;
        assert_eq!(png, Some(output_dir.path().join("photo.png")));

        let csv = export_thumbnail(&source, output_dir.path(), 6, ChannelMode::Grey, ThumbnailFormat::Csv)?;
        let csv = csv.ok_or(MosaicError::EmptyLibrary)?;
        assert_eq!(csv, output_dir.path().join("photo.csv"));
        assert_eq!(read_grid(&csv)?.shape(), (6, 6, 1));

        let library = load_library(output_dir.path(), 6, ChannelMode::Rgb)?;
        assert_eq!(library.len(), 2);
        Ok(())
    }

    // Tests undecodable sources produce no thumbnail
    // Verified by propagating decode errors from export
    #[test]
    fn test_export_skips_non_images() -> Result<()> {
        let dir = TempDir::new()?;
        let source = dir.path().join("notes.txt");
        std::fs::write(&source, "text")?;
        let result = export_thumbnail(&source, dir.path(), 4, ChannelMode::Rgb, ThumbnailFormat::Png)?;
        assert_eq!(result, None);
        assert_eq!(ThumbnailFormat::Csv.extension(), "csv");
        assert_eq!(ThumbnailFormat::default().extension(), "png");
        Ok(())
    }
}

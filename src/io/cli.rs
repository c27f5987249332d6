//! Command-line interface for composing mosaics and pre-generating thumbnails

use crate::buffer::ChannelMode;
use crate::io::configuration::{DEFAULT_OUTPUT, DEFAULT_THUMB_SIZE};
use crate::io::error::{MosaicError, Result};
use crate::io::grid::write_grid;
use crate::io::image::{load_target, save_buffer};
use crate::io::library::{ThumbnailFormat, export_thumbnail, library_entries, load_library};
use crate::io::progress::ProgressManager;
use crate::matching::{HistogramScorer, PixelErrorScorer, Scorer, Strategy};
use crate::pipeline::{Composer, Mosaic, MosaicConfig};
use crate::spatial::partition::block_count_for;
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "photomosaic")]
#[command(
    author,
    version,
    about = "Rebuild an image as a grid of best-matching thumbnails"
)]
/// Command-line arguments for the mosaic tool
pub struct Cli {
    /// Operation to run
    #[command(subcommand)]
    pub command: Command,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Available operations
#[derive(Subcommand, Clone, Debug)]
pub enum Command {
    /// Compose a mosaic of TARGET from the images in LIBRARY
    Compose(ComposeArgs),
    /// Crop and scale every image in SOURCE into OUTPUT as thumbnails
    Thumbnails(ThumbnailArgs),
}

/// Scoring strategy as spelled on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Mean squared error between raw pixels
    PixelError,
    /// Chi-square distance between colour histograms
    Histogram,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::PixelError => Self::PixelError,
            StrategyArg::Histogram => Self::Histogram,
        }
    }
}

/// Arguments of the `compose` operation
#[derive(Args, Clone, Debug)]
pub struct ComposeArgs {
    /// Image to reconstruct
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Directory of thumbnail images or CSV pixel grids
    #[arg(value_name = "LIBRARY")]
    pub library: PathBuf,

    /// Output image path
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Side length of every thumbnail in pixels
    #[arg(short = 's', long, default_value_t = DEFAULT_THUMB_SIZE)]
    pub thumb_size: usize,

    /// Side length of target blocks in pixels (defaults to the thumbnail size)
    #[arg(short, long)]
    pub block_size: Option<usize>,

    /// Similarity metric used to pick thumbnails
    #[arg(long, value_enum, default_value_t = StrategyArg::Histogram)]
    pub strategy: StrategyArg,

    /// Work and write in greyscale
    #[arg(short, long)]
    pub greyscale: bool,

    /// Also write the mosaic as a CSV pixel grid (greyscale only)
    #[arg(long, value_name = "CSV")]
    pub grid_output: Option<PathBuf>,
}

impl ComposeArgs {
    /// Channel mode selected by `--greyscale`
    pub const fn channel_mode(&self) -> ChannelMode {
        if self.greyscale {
            ChannelMode::Grey
        } else {
            ChannelMode::Rgb
        }
    }

    /// Block size, falling back to the thumbnail size
    pub fn effective_block_size(&self) -> usize {
        self.block_size.unwrap_or(self.thumb_size)
    }
}

/// Arguments of the `thumbnails` operation
#[derive(Args, Clone, Debug)]
pub struct ThumbnailArgs {
    /// Directory of source images
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Directory receiving the thumbnails
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Side length of every thumbnail in pixels
    #[arg(short = 's', long, default_value_t = DEFAULT_THUMB_SIZE)]
    pub thumb_size: usize,

    /// Store greyscale thumbnails
    #[arg(short, long)]
    pub greyscale: bool,

    /// File format of the stored thumbnails
    #[arg(long, value_enum, default_value_t = ThumbnailFormat::Png)]
    pub format: ThumbnailFormat,
}

impl ThumbnailArgs {
    /// Channel mode for stored thumbnails; CSV grids are always greyscale
    pub const fn channel_mode(&self) -> ChannelMode {
        if self.greyscale || matches!(self.format, ThumbnailFormat::Csv) {
            ChannelMode::Grey
        } else {
            ChannelMode::Rgb
        }
    }
}

/// Orchestrates loading, composition and saving with progress tracking
pub struct MosaicRunner {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl MosaicRunner {
    /// Create a runner for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Run the selected operation
    ///
    /// # Errors
    ///
    /// Returns an error if loading, composing or writing fails
    pub fn run(&mut self) -> Result<()> {
        match self.cli.command.clone() {
            Command::Compose(args) => self.compose(&args),
            Command::Thumbnails(args) => self.generate_thumbnails(&args),
        }
    }

    fn compose(&mut self, args: &ComposeArgs) -> Result<()> {
        let start_time = Instant::now();
        let mode = args.channel_mode();
        let block_size = args.effective_block_size();

        let target = load_target(&args.target, block_size, mode)?;
        let library = load_library(&args.library, args.thumb_size, mode)?;
        let config = MosaicConfig {
            block_count: block_count_for(target.width(), block_size)?,
            thumb_size: args.thumb_size,
            strategy: args.strategy.into(),
            channel_mode: mode,
        };
        info!(
            "Matching {0}x{0} blocks against {1} thumbnails",
            config.block_count,
            library.len()
        );

        let mosaic = match config.strategy {
            Strategy::PixelError => {
                self.drive(Composer::new(PixelErrorScorer, &target, library, config)?)?
            }
            Strategy::Histogram => self.drive(Composer::new(
                HistogramScorer::default(),
                &target,
                library,
                config,
            )?)?,
        };

        save_buffer(&mosaic.image, &args.output)?;
        if let Some(grid_path) = &args.grid_output {
            write_grid(grid_path, &mosaic.image)?;
        }

        info!(
            "Wrote {} in {:.2?} (mean distance {:.4})",
            args.output.display(),
            start_time.elapsed(),
            mosaic.total_distance() / mosaic.selections.len().max(1) as f64
        );
        Ok(())
    }

    fn drive<S: Scorer>(&mut self, mut composer: Composer<S>) -> Result<Mosaic> {
        if let Some(ref mut pm) = self.progress_manager {
            pm.start("Matching blocks", composer.progress().1);
        }

        while composer.execute_step()? {
            if let Some(ref pm) = self.progress_manager {
                pm.advance();
            }
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }
        composer.finish()
    }

    fn generate_thumbnails(&mut self, args: &ThumbnailArgs) -> Result<()> {
        let entries = library_entries(&args.source)?;
        let mode = args.channel_mode();

        if let Some(ref mut pm) = self.progress_manager {
            pm.start("Generating thumbnails", entries.len());
        }

        let mut written = 0usize;
        for path in &entries {
            if export_thumbnail(path, &args.output, args.thumb_size, mode, args.format)?.is_some() {
                written += 1;
            }
            if let Some(ref pm) = self.progress_manager {
                pm.advance();
            }
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        if written == 0 {
            return Err(MosaicError::EmptyLibrary);
        }
        info!(
            "Wrote {written} thumbnails to {}",
            args.output.display()
        );
        Ok(())
    }
}

use crate::{
    buffer::{ChannelMode, PixelBuffer},
    io::error::{Result, invalid_parameter, shape_mismatch},
    matching::{
        HistogramScorer, PixelErrorScorer, Scorer, Strategy, ThumbnailLibrary, nearest_match,
    },
    spatial::{BlockGrid, MosaicGrid, partition},
};
use log::{debug, info};

/// Parameters of one composition run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MosaicConfig {
    /// Number of blocks along each side of the target
    pub block_count: usize,
    /// Side length of every library thumbnail
    pub thumb_size: usize,
    /// Scoring strategy used by [`compose`]
    pub strategy: Strategy,
    /// Channel mode of the output (target and library are converted to it)
    pub channel_mode: ChannelMode,
}

/// Thumbnail chosen for one block
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Selection {
    /// Row-major block index
    pub block: usize,
    /// Library index of the selected thumbnail
    pub thumbnail: usize,
    /// Distance between block and thumbnail
    pub distance: f64,
}

/// Result of a completed composition
#[derive(Clone, Debug)]
pub struct Mosaic {
    /// Output buffer of side `block_count * thumb_size`
    pub image: PixelBuffer,
    /// One selection per block in row-major order
    pub selections: Vec<Selection>,
    /// Number of blocks along each side
    pub block_count: usize,
}

impl Mosaic {
    /// Library index chosen for every block, row-major
    pub fn thumbnail_indices(&self) -> Vec<usize> {
        self.selections.iter().map(|s| s.thumbnail).collect()
    }

    /// Selection for grid cell `(row, col)`
    pub fn selection_at(&self, row: usize, col: usize) -> Option<&Selection> {
        if row >= self.block_count || col >= self.block_count {
            return None;
        }
        self.selections.get(row * self.block_count + col)
    }

    /// Sum of all block distances
    pub fn total_distance(&self) -> f64 {
        self.selections.iter().map(|s| s.distance).sum()
    }
}

/// Step-wise mosaic composition
///
/// Construction partitions the target and describes every thumbnail once.
/// Each [`Composer::execute_step`] matches one block in row-major order, and
/// [`Composer::finish`] assembles the mosaic. Any error ends the run.
pub struct Composer<S: Scorer> {
    scorer: S,
    library: ThumbnailLibrary,
    library_descriptors: Vec<S::Descriptor>,
    blocks: Vec<PixelBuffer>,
    selections: Vec<Selection>,
    config: MosaicConfig,
}

impl<S: Scorer> Composer<S> {
    /// Prepare a composition run
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `thumb_size` is zero or differs from the library's thumbnail size
    /// - The target cannot be partitioned into `block_count` blocks per side
    /// - A thumbnail descriptor cannot be derived
    pub fn new(
        scorer: S,
        target: &PixelBuffer,
        library: ThumbnailLibrary,
        config: MosaicConfig,
    ) -> Result<Self> {
        if config.thumb_size == 0 {
            return Err(invalid_parameter(
                "thumb_size",
                &config.thumb_size,
                &"thumbnails must be at least one pixel wide",
            ));
        }
        if library.thumb_size() != config.thumb_size {
            return Err(shape_mismatch(
                (config.thumb_size, config.thumb_size, config.channel_mode.channels()),
                (library.thumb_size(), library.thumb_size(), library.mode().channels()),
            ));
        }

        let target = target.to_mode(config.channel_mode);
        let grid = BlockGrid::for_buffer(&target, config.block_count)?;
        let blocks = partition(&target, config.block_count)?;
        debug!(
            "Partitioned {}x{} target into {} blocks of {}px",
            target.height(),
            target.width(),
            blocks.len(),
            grid.block_side
        );

        let library = library.to_mode(config.channel_mode);
        let library_descriptors = library
            .thumbnails()
            .iter()
            .map(|thumb| scorer.descriptor(thumb))
            .collect::<Result<Vec<_>>>()?;
        debug!("Described {} library thumbnails", library_descriptors.len());

        Ok(Self {
            scorer,
            library,
            library_descriptors,
            selections: Vec::with_capacity(blocks.len()),
            blocks,
            config,
        })
    }

    /// Match the next unmatched block
    ///
    /// Returns `false` once every block has a selection.
    ///
    /// # Errors
    ///
    /// Returns an error if the block cannot be described or compared
    pub fn execute_step(&mut self) -> Result<bool> {
        let block_index = self.selections.len();
        let Some(block) = self.blocks.get(block_index) else {
            return Ok(false);
        };

        let descriptor = self.scorer.descriptor(block)?;
        let best = nearest_match(&self.scorer, &descriptor, &self.library_descriptors)?;
        self.selections.push(Selection {
            block: block_index,
            thumbnail: best.index,
            distance: best.distance,
        });
        Ok(true)
    }

    /// `(matched blocks, total blocks)`
    pub fn progress(&self) -> (usize, usize) {
        (self.selections.len(), self.blocks.len())
    }

    /// Selections made so far
    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    /// Configuration of this run
    pub const fn config(&self) -> &MosaicConfig {
        &self.config
    }

    /// Match any remaining blocks and assemble the mosaic
    ///
    /// # Errors
    ///
    /// Returns an error if a remaining block fails to match or assembly fails
    pub fn finish(mut self) -> Result<Mosaic> {
        while self.execute_step()? {}

        let mut grid = MosaicGrid::new(
            self.config.block_count,
            self.config.thumb_size,
            self.config.channel_mode,
        )?;
        for selection in &self.selections {
            let thumbnail = self.library.get(selection.thumbnail).ok_or_else(|| {
                invalid_parameter(
                    "thumbnail",
                    &selection.thumbnail,
                    &"selection refers past the end of the library",
                )
            })?;
            grid.push(thumbnail)?;
        }
        let image = grid.assemble()?;
        info!(
            "Assembled {}x{} mosaic from {} blocks",
            image.height(),
            image.width(),
            self.selections.len()
        );

        Ok(Mosaic {
            image,
            selections: self.selections,
            block_count: self.config.block_count,
        })
    }
}

/// Compose a mosaic in one call using the configured strategy
///
/// # Errors
///
/// Returns any error raised while preparing, matching or assembling
pub fn compose(
    target: &PixelBuffer,
    library: &ThumbnailLibrary,
    config: &MosaicConfig,
) -> Result<Mosaic> {
    match config.strategy {
        Strategy::PixelError => {
            Composer::new(PixelErrorScorer, target, library.clone(), *config)?.finish()
        }
        Strategy::Histogram => {
            Composer::new(HistogramScorer::default(), target, library.clone(), *config)?.finish()
        }
    }
}

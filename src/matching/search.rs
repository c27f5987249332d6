//! Nearest-match search over a thumbnail library
//!
//! The scan is linear in library order and keeps a running minimum that is
//! only replaced on a strictly smaller distance. Ties therefore resolve to the
//! earliest thumbnail, which keeps mosaics reproducible for a given library
//! order.

use crate::buffer::PixelBuffer;
use crate::io::error::{MosaicError, Result};
use crate::matching::library::ThumbnailLibrary;
use crate::matching::scorer::Scorer;
use std::cmp::Ordering;

/// Best candidate for one block
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Match {
    /// Library index of the selected thumbnail
    pub index: usize,
    /// Distance between the block and the thumbnail
    pub distance: f64,
}

/// Find the candidate descriptor closest to `block`
///
/// # Errors
///
/// Returns an error if `candidates` is empty or the scorer rejects a comparison
pub fn nearest_match<S: Scorer>(
    scorer: &S,
    block: &S::Descriptor,
    candidates: &[S::Descriptor],
) -> Result<Match> {
    candidates
        .iter()
        .enumerate()
        .try_fold(None, |best, (index, candidate)| -> Result<Option<Match>> {
            let distance = scorer.distance(block, candidate)?;
            Ok(Some(closer(best, Match { index, distance })))
        })?
        .ok_or(MosaicError::EmptyLibrary)
}

/// Find the thumbnail closest to a block, deriving every descriptor on the fly
///
/// Equivalent to describing the library once and calling [`nearest_match`].
///
/// # Errors
///
/// Returns an error if a descriptor cannot be derived or compared
pub fn nearest_thumbnail<S: Scorer>(
    scorer: &S,
    block: &PixelBuffer,
    library: &ThumbnailLibrary,
) -> Result<Match> {
    let block_descriptor = scorer.descriptor(block)?;

    library
        .thumbnails()
        .iter()
        .enumerate()
        .try_fold(None, |best, (index, thumbnail)| -> Result<Option<Match>> {
            let distance = scorer.distance(&block_descriptor, &scorer.descriptor(thumbnail)?)?;
            Ok(Some(closer(best, Match { index, distance })))
        })?
        .ok_or(MosaicError::EmptyLibrary)
}

// Strict comparison: an equal distance never displaces the earlier candidate
fn closer(best: Option<Match>, candidate: Match) -> Match {
    match best {
        Some(current) if candidate.distance.partial_cmp(&current.distance) != Some(Ordering::Less) => {
            current
        }
        _ => candidate,
    }
}

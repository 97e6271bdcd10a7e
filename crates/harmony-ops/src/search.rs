//! Brute-force template search.
//!
//! Every (shape, alpha) pair on the grid is scored independently against the
//! histogram, then reduced to the minimum. With the `parallel` feature both
//! the map and the reduction run on rayon.
//!
//! # Tie-break
//!
//! Candidates are numbered in grid order: shapes in the order given (catalog
//! order for [`search`]), and alpha ascending within a shape. The reduction
//! keeps the lower score and, on equal scores, the lower grid number. This
//! is associative and commutative, so the parallel reduction picks exactly
//! the candidate a sequential strict-`<` running minimum would pick.
//!
//! # Example
//!
//! ```rust
//! use harmony_core::{HueHistogram, TemplateShape};
//! use harmony_ops::search::search;
//!
//! let mut hist = HueHistogram::new();
//! hist.add(0, 1.0).unwrap();
//!
//! let outcome = search(&hist).unwrap();
//! assert_eq!(outcome.score, 0.0);
//! assert_eq!(outcome.template.shape(), Some(TemplateShape::LowerI));
//! assert_eq!(outcome.template.alpha().value(), 0);
//! ```

use crate::{OpsError, OpsResult};
use harmony_core::{HarmonicTemplate, Hue, HueHistogram, TemplateShape, HUE_LEVELS};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, trace};

/// Lowest score found for one shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeScore {
    /// Template shape.
    pub shape: TemplateShape,
    /// Best rotation for this shape.
    pub alpha: Hue,
    /// Score at that rotation.
    pub score: f64,
}

/// Result of a template search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Winning template.
    pub template: HarmonicTemplate,
    /// Winning score.
    pub score: f64,
    /// Best rotation and score of every searched shape, in search order.
    pub per_shape: Vec<ShapeScore>,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    order: usize,
    shape: TemplateShape,
    alpha: Hue,
    score: f64,
}

/// Keeps the lower score; on a tie, the earlier grid position.
#[inline]
fn pick(a: Candidate, b: Candidate) -> Candidate {
    if b.score < a.score || (b.score == a.score && b.order < a.order) {
        b
    } else {
        a
    }
}

/// Searches all seven catalog shapes at all 256 rotations.
///
/// # Errors
///
/// [`harmony_core::Error::DegenerateHistogram`] (wrapped in
/// [`OpsError::Core`]) if the histogram is all zero.
pub fn search(histogram: &HueHistogram) -> OpsResult<SearchOutcome> {
    search_shapes(histogram, &TemplateShape::ALL)
}

/// Searches the given shapes at all 256 rotations.
///
/// Ties resolve to the earlier shape in `shapes`, then to the smaller alpha.
///
/// # Errors
///
/// - [`OpsError::InvalidParameter`] if `shapes` is empty
/// - [`OpsError::Core`] if the histogram is degenerate
pub fn search_shapes(
    histogram: &HueHistogram,
    shapes: &[TemplateShape],
) -> OpsResult<SearchOutcome> {
    if shapes.is_empty() {
        return Err(OpsError::InvalidParameter(
            "at least one template shape is required".into(),
        ));
    }
    histogram.validate()?;

    let grid: Vec<(TemplateShape, Hue)> = shapes
        .iter()
        .flat_map(|&shape| Hue::all().map(move |alpha| (shape, alpha)))
        .collect();

    let candidates = score_grid(&grid, histogram)?;
    let per_shape = reduce_per_shape(&candidates);

    let best = per_shape
        .iter()
        .copied()
        .reduce(pick)
        .ok_or_else(|| OpsError::InvalidParameter("empty search grid".into()))?;

    for c in &per_shape {
        trace!(shape = %c.shape, alpha = c.alpha.value(), score = c.score, "shape minimum");
    }
    debug!(
        shape = %best.shape,
        alpha = best.alpha.value(),
        score = best.score,
        evaluated = candidates.len(),
        "template search finished"
    );

    Ok(SearchOutcome {
        template: HarmonicTemplate::new(best.shape, best.alpha)?,
        score: best.score,
        per_shape: per_shape
            .into_iter()
            .map(|c| ShapeScore {
                shape: c.shape,
                alpha: c.alpha,
                score: c.score,
            })
            .collect(),
    })
}

/// Map step: one template and one score per grid cell, in grid order.
fn score_grid(
    grid: &[(TemplateShape, Hue)],
    histogram: &HueHistogram,
) -> OpsResult<Vec<Candidate>> {
    let evaluate = |(order, &(shape, alpha)): (usize, &(TemplateShape, Hue))| {
        let template = HarmonicTemplate::new(shape, alpha)?;
        Ok::<_, OpsError>(Candidate {
            order,
            shape,
            alpha,
            score: template.score(histogram),
        })
    };

    #[cfg(feature = "parallel")]
    let scored = grid.par_iter().enumerate().map(evaluate).collect();
    #[cfg(not(feature = "parallel"))]
    let scored = grid.iter().enumerate().map(evaluate).collect();

    scored
}

/// Reduce step: minimum of each shape's block of 256 rotations.
fn reduce_per_shape(candidates: &[Candidate]) -> Vec<Candidate> {
    let block = HUE_LEVELS as usize;

    #[cfg(feature = "parallel")]
    let reduced = candidates
        .par_chunks(block)
        .filter_map(|chunk| chunk.iter().copied().reduce(pick))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let reduced = candidates
        .chunks(block)
        .filter_map(|chunk| chunk.iter().copied().reduce(pick))
        .collect();

    reduced
}

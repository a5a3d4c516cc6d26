/// Stack-wide scoring
///
/// Scores the region of interest in every frame and returns the profile.
/// Picking the winner is left to the caller, see [`argmax`].
use super::{DegeneratePolicy, OptimizerOptions, WindowMode};
use crate::cost::CostFunction;
use crate::errors::{FocusError, Result};
use crate::region::{PixelRect, Region};
use crate::types::ImageStack;
use crate::window::cos_window;
use ndarray::Array2;
use rayon::prelude::*;

/// Score every frame of `stack` inside `region` with the default options
pub fn optimize<C>(stack: &ImageStack, region: &Region, cost: &C) -> Result<Vec<f64>>
where
    C: CostFunction + ?Sized,
{
    optimize_with(stack, region, cost, &OptimizerOptions::default())
}

/// Score every frame of `stack` inside `region`.
///
/// Each crop is multiplied by a cosine window of the region's size before
/// scoring (see [`WindowMode`]). Scores are index-aligned with the frames and
/// identical whether or not `options.parallel` is set.
pub fn optimize_with<C>(
    stack: &ImageStack,
    region: &Region,
    cost: &C,
    options: &OptimizerOptions,
) -> Result<Vec<f64>>
where
    C: CostFunction + ?Sized,
{
    let bounds = region.pixel_bounds()?;
    bounds.check_within(stack.rows(), stack.cols())?;

    let apply_window = match options.window_mode {
        WindowMode::Always => true,
        WindowMode::SkipSelfWindowed => !cost.windows_internally(),
    };
    let window = if apply_window {
        Some(cos_window(bounds.rows(), bounds.cols())?)
    } else {
        None
    };

    log::info!(
        "Scoring {} frames in region {} with {} (window: {}, parallel: {})",
        stack.frame_count(),
        region,
        cost.name(),
        apply_window,
        options.parallel
    );

    let score = |index: usize| score_frame(stack, &bounds, window.as_ref(), cost, options, index);

    let scores = if options.parallel {
        (0..stack.frame_count())
            .into_par_iter()
            .map(score)
            .collect::<Result<Vec<f64>>>()?
    } else {
        (0..stack.frame_count())
            .map(score)
            .collect::<Result<Vec<f64>>>()?
    };

    Ok(scores)
}

fn score_frame<C>(
    stack: &ImageStack,
    bounds: &PixelRect,
    window: Option<&Array2<f64>>,
    cost: &C,
    options: &OptimizerOptions,
    index: usize,
) -> Result<f64>
where
    C: CostFunction + ?Sized,
{
    let crop = stack.crop(bounds, index)?;
    let patch = match window {
        Some(window) => window * &crop,
        None => crop.to_owned(),
    };

    match cost.score(patch.view()) {
        Ok(score) => {
            log::debug!("Frame {} scored {:.6}", index, score);
            Ok(score)
        }
        Err(FocusError::DegenerateInput(reason))
            if options.degenerate_policy == DegeneratePolicy::Sentinel =>
        {
            log::warn!(
                "Frame {} is degenerate for {} ({}), scoring {}",
                index,
                cost.name(),
                reason,
                options.degenerate_score
            );
            Ok(options.degenerate_score)
        }
        Err(e) => Err(e),
    }
}

/// Index of the first maximum score, `None` for an empty profile
pub fn argmax(scores: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &score) in scores.iter().enumerate() {
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((index, score)),
        }
    }
    best.map(|(index, _)| index)
}

/// Optimize and return the arg-max frame
pub fn select_sharpest<C>(
    stack: &ImageStack,
    region: &Region,
    cost: &C,
    options: &OptimizerOptions,
) -> Result<usize>
where
    C: CostFunction + ?Sized,
{
    let scores = optimize_with(stack, region, cost, options)?;
    // a valid stack always has at least one frame
    argmax(&scores).ok_or(FocusError::EmptyStack)
}

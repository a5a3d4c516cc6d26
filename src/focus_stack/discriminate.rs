/// Pairwise sharpness comparison
use crate::cost::CostFunction;
use crate::errors::Result;
use crate::region::Region;
use crate::types::ImageStack;

/// Return whichever of frames `i` and `j` is sharper inside `region`.
///
/// `i` wins only with a strictly greater score, so ties go to `j`. The crops
/// are scored as-is, without the optimizer's window. Frame indices and the
/// region are validated up front; nothing is clamped.
pub fn discriminate<C>(
    cost: &C,
    stack: &ImageStack,
    region: &Region,
    i: usize,
    j: usize,
) -> Result<usize>
where
    C: CostFunction + ?Sized,
{
    stack.check_frame(i)?;
    stack.check_frame(j)?;
    let bounds = region.pixel_bounds()?;

    let score_i = cost.score(stack.crop(&bounds, i)?)?;
    let score_j = cost.score(stack.crop(&bounds, j)?)?;

    log::debug!(
        "{} in {}: frame {} = {:.6}, frame {} = {:.6}",
        cost.name(),
        region,
        i,
        score_i,
        j,
        score_j
    );

    Ok(if score_i > score_j { i } else { j })
}

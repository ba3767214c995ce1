//! Progress derivation over the five plant milestones.
//!
//! Completion is never stored: the active/completed split is recomputed
//! from raw milestone data wherever it is needed, using [`is_complete`] as
//! the single criterion.

use crate::plant::{Milestones, Plant};
use crate::status::Milestone;

/// Number of tracked milestones per plant.
pub const MILESTONE_COUNT: usize = Milestone::ALL.len();

/// Count milestones marked `concluido`.
pub fn completed_count(milestones: &Milestones) -> usize {
    milestones.iter().filter(|(_, status)| status.is_done()).count()
}

/// Completion percentage, rounded to the nearest integer.
///
/// Always one of `0, 20, 40, 60, 80, 100`.
pub fn compute_progress(milestones: &Milestones) -> u8 {
    let done = completed_count(milestones) as f64;
    ((done / MILESTONE_COUNT as f64) * 100.0).round() as u8
}

/// True iff every milestone is `concluido`.
pub fn is_complete(milestones: &Milestones) -> bool {
    milestones.iter().all(|(_, status)| status.is_done())
}

/// Plants split into the in-progress and completed views.
#[derive(Debug, Default)]
pub struct Partition<'a> {
    pub active: Vec<&'a Plant>,
    pub completed: Vec<&'a Plant>,
}

/// Split plants by [`is_complete`], preserving input order in both halves.
pub fn partition<'a, I>(plants: I) -> Partition<'a>
where
    I: IntoIterator<Item = &'a Plant>,
{
    let (completed, active) = plants
        .into_iter()
        .partition(|plant| is_complete(&plant.milestones));
    Partition { active, completed }
}

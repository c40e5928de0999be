use thiserror::Error;

use crate::data::filter::Selection;

/// An aggregate was requested over a group with no usable records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no records to aggregate")]
pub struct EmptyGroup;

fn mean(values: impl Iterator<Item = f64>) -> Result<f64, EmptyGroup> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if count == 0 {
        Err(EmptyGroup)
    } else {
        Ok(sum / count as f64)
    }
}

/// Fraction of the selection that survived, in `[0, 1]`.
pub fn survival_rate(sel: &Selection<'_>) -> Result<f64, EmptyGroup> {
    mean(sel.iter().map(|p| if p.survived { 1.0 } else { 0.0 }))
}

/// Mean age over passengers with a recorded age; passengers without one are
/// left out of both the sum and the count.
pub fn average_age(sel: &Selection<'_>) -> Result<f64, EmptyGroup> {
    mean(sel.iter().filter_map(|p| p.age))
}

pub fn average_fare(sel: &Selection<'_>) -> Result<f64, EmptyGroup> {
    mean(sel.iter().map(|p| p.fare))
}

/// Highest recorded age.
pub fn oldest(sel: &Selection<'_>) -> Result<f64, EmptyGroup> {
    sel.iter()
        .filter_map(|p| p.age)
        .max_by(f64::total_cmp)
        .ok_or(EmptyGroup)
}

/// Lowest recorded age.
pub fn youngest(sel: &Selection<'_>) -> Result<f64, EmptyGroup> {
    sel.iter()
        .filter_map(|p| p.age)
        .min_by(f64::total_cmp)
        .ok_or(EmptyGroup)
}

/// Smallest and largest family size in the selection.
pub fn family_size_range(sel: &Selection<'_>) -> Result<(u32, u32), EmptyGroup> {
    let min = sel.iter().map(|p| p.family_size()).min().ok_or(EmptyGroup)?;
    let max = sel.iter().map(|p| p.family_size()).max().ok_or(EmptyGroup)?;
    Ok((min, max))
}

/// Label with the highest score. Ties go to the label seen first; NaN
/// scores never win.
pub fn argmax<L>(pairs: impl IntoIterator<Item = (L, f64)>) -> Option<L> {
    let mut best: Option<(L, f64)> = None;
    for (label, score) in pairs {
        if score.is_nan() {
            continue;
        }
        match &best {
            Some((_, top)) if score <= *top => {}
            _ => best = Some((label, score)),
        }
    }
    best.map(|(label, _)| label)
}

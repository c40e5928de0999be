use serde::Serialize;

use crate::data::filter::Selection;
use crate::data::model::{AgeBand, PassengerClass, Sex};

use super::stats::{self, argmax, EmptyGroup};

// ---------------------------------------------------------------------------
// GroupSummary
// ---------------------------------------------------------------------------

/// Headcounts and survival rate of one group of passengers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GroupSummary {
    pub population: usize,
    pub survivors: usize,
    pub deceased: usize,
    /// `None` when the group is empty.
    survival_rate: Option<f64>,
}

impl GroupSummary {
    pub fn of(sel: &Selection<'_>) -> Self {
        GroupSummary {
            population: sel.len(),
            survivors: sel.iter().filter(|p| p.survived).count(),
            deceased: sel.iter().filter(|p| !p.survived).count(),
            survival_rate: stats::survival_rate(sel).ok(),
        }
    }

    pub fn survival_rate(&self) -> Result<f64, EmptyGroup> {
        self.survival_rate.ok_or(EmptyGroup)
    }

    pub fn is_empty(&self) -> bool {
        self.population == 0
    }
}

// ---------------------------------------------------------------------------
// Group dimensions
// ---------------------------------------------------------------------------

/// A categorical dimension the manifest can be broken down by.
pub trait GroupKey: Copy + 'static {
    /// Every key, in the order groups are listed and ties are broken.
    const CANONICAL: &'static [Self];

    /// Short name used when the group is picked as the best one.
    fn label(self) -> &'static str;

    /// Section heading in the report.
    fn heading(self) -> &'static str {
        self.label()
    }

    /// The passengers of `sel` belonging to this group.
    fn select<'a>(self, sel: &Selection<'a>) -> Selection<'a>;
}

impl GroupKey for Sex {
    const CANONICAL: &'static [Self] = &Sex::ALL;

    fn label(self) -> &'static str {
        Sex::label(self)
    }

    fn select<'a>(self, sel: &Selection<'a>) -> Selection<'a> {
        sel.by_gender(self)
    }
}

impl GroupKey for PassengerClass {
    const CANONICAL: &'static [Self] = &PassengerClass::ALL;

    fn label(self) -> &'static str {
        PassengerClass::label(self)
    }

    fn heading(self) -> &'static str {
        match self {
            PassengerClass::First => "First Class",
            PassengerClass::Second => "Second Class",
            PassengerClass::Third => "Third Class",
        }
    }

    fn select<'a>(self, sel: &Selection<'a>) -> Selection<'a> {
        sel.by_class(self)
    }
}

impl GroupKey for AgeBand {
    const CANONICAL: &'static [Self] = &AgeBand::ALL;

    fn label(self) -> &'static str {
        AgeBand::label(self)
    }

    fn heading(self) -> &'static str {
        AgeBand::heading(self)
    }

    fn select<'a>(self, sel: &Selection<'a>) -> Selection<'a> {
        sel.by_age_band(self)
    }
}

/// One group of a breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GroupRow<K> {
    pub key: K,
    #[serde(flatten)]
    pub summary: GroupSummary,
}

/// Summaries for every key of `K`, in canonical order.
pub fn analyze_dimension<K: GroupKey>(sel: &Selection<'_>) -> Vec<GroupRow<K>> {
    K::CANONICAL
        .iter()
        .map(|&key| GroupRow {
            key,
            summary: GroupSummary::of(&key.select(sel)),
        })
        .collect()
}

/// Summaries for every family size from the smallest to the largest
/// observed, including sizes nobody has.
pub fn analyze_family_sizes(sel: &Selection<'_>) -> Vec<GroupRow<u32>> {
    let Ok((min, max)) = stats::family_size_range(sel) else {
        return Vec::new();
    };
    (min..=max)
        .map(|size| GroupRow {
            key: size,
            summary: GroupSummary::of(&sel.by_family_size(size)),
        })
        .collect()
}

/// Key of the non-empty group with the highest survival rate; ties go to
/// the row listed first.
pub fn best_group<K: Copy>(rows: &[GroupRow<K>]) -> Option<K> {
    argmax(
        rows.iter()
            .filter_map(|row| row.summary.survival_rate().ok().map(|rate| (row.key, rate))),
    )
}

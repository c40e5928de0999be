use crate::analysis::stats;
use crate::data::filter::Selection;
use crate::data::model::{PassengerClass, Sex};

// ---------------------------------------------------------------------------
// Chart series, independent of rendering
// ---------------------------------------------------------------------------

/// One bar of a survival-rate chart.
#[derive(Debug, Clone, PartialEq)]
pub struct RateBar {
    pub label: &'static str,
    /// Survival rate in percent, `0..=100`.
    pub percent: f64,
}

/// One-year histogram bin: passengers aged `[age, age + 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeBin {
    pub age: u32,
    pub count: usize,
}

/// Series for the three charts of the viewer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartData {
    pub genders: Vec<RateBar>,
    pub age_histogram: Vec<AgeBin>,
    pub classes: Vec<RateBar>,
}

impl ChartData {
    pub fn from_selection(sel: &Selection<'_>) -> Self {
        // Groups without passengers get no bar.
        let genders = Sex::ALL
            .iter()
            .filter_map(|&sex| {
                stats::survival_rate(&sel.by_gender(sex))
                    .ok()
                    .map(|rate| RateBar {
                        label: sex.label(),
                        percent: rate * 100.0,
                    })
            })
            .collect();

        let classes = PassengerClass::ALL
            .iter()
            .filter_map(|&class| {
                stats::survival_rate(&sel.by_class(class))
                    .ok()
                    .map(|rate| RateBar {
                        label: class_label(class),
                        percent: rate * 100.0,
                    })
            })
            .collect();

        ChartData {
            genders,
            age_histogram: age_histogram(sel),
            classes,
        }
    }
}

fn class_label(class: PassengerClass) -> &'static str {
    match class {
        PassengerClass::First => "First Class",
        PassengerClass::Second => "Second Class",
        PassengerClass::Third => "Third Class",
    }
}

/// Count recorded ages into contiguous one-year bins from the youngest to
/// the oldest whole year.
pub fn age_histogram(sel: &Selection<'_>) -> Vec<AgeBin> {
    // Ages are validated non-negative at load time.
    let years: Vec<u32> = sel
        .iter()
        .filter_map(|p| p.age)
        .map(|age| age.floor() as u32)
        .collect();

    let (Some(&min), Some(&max)) = (years.iter().min(), years.iter().max()) else {
        return Vec::new();
    };

    let mut bins: Vec<AgeBin> = (min..=max).map(|age| AgeBin { age, count: 0 }).collect();
    for year in years {
        bins[(year - min) as usize].count += 1;
    }
    bins
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::tests::manifest_from_rows;

    #[test]
    fn histogram_uses_one_year_bins() {
        let manifest = manifest_from_rows(&[
            r#"1,1,3,"A",female,0.83,0,2,T,29,,S"#,
            r#"2,0,3,"B",male,2,1,1,T,21,,S"#,
            r#"3,0,3,"C",male,2.5,0,0,T,8,,S"#,
            r#"4,1,1,"D",female,,0,0,T,80,,C"#,
            r#"5,0,2,"E",male,4,0,0,T,13,,S"#,
        ]);
        let bins = age_histogram(&manifest.select_all());

        let counts: Vec<(u32, usize)> = bins.iter().map(|b| (b.age, b.count)).collect();
        assert_eq!(counts, vec![(0, 1), (1, 0), (2, 2), (3, 0), (4, 1)]);
        let total: usize = bins.iter().map(|b| b.count).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn histogram_of_no_ages_is_empty() {
        let manifest = manifest_from_rows(&[r#"1,1,3,"A",female,,0,0,T,8,,S"#]);
        assert!(age_histogram(&manifest.select_all()).is_empty());
    }

    #[test]
    fn rate_bars_in_percent() {
        let manifest = manifest_from_rows(&[
            r#"1,1,1,"A",female,30,0,0,T,80,,S"#,
            r#"2,0,1,"B",male,30,0,0,T,80,,S"#,
            r#"3,1,3,"C",male,30,0,0,T,8,,S"#,
            r#"4,0,3,"D",male,30,0,0,T,8,,S"#,
        ]);
        let data = ChartData::from_selection(&manifest.select_all());

        assert_eq!(data.genders.len(), 2);
        assert_eq!(data.genders[0].label, "Male");
        assert!((data.genders[0].percent - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(data.genders[1].label, "Female");
        assert_eq!(data.genders[1].percent, 100.0);
        // No second-class passengers, so no bar for them.
        let labels: Vec<&str> = data.classes.iter().map(|b| b.label).collect();
        assert_eq!(labels, vec!["First Class", "Third Class"]);
        assert_eq!(data.classes[0].percent, 50.0);
    }
}

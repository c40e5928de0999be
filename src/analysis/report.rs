use std::fmt;

use serde::Serialize;

use crate::data::model::{AgeBand, Manifest, PassengerClass, Sex};

use super::group::{
    analyze_dimension, analyze_family_sizes, best_group, GroupKey, GroupRow, GroupSummary,
};

pub const NOT_APPLICABLE: &str = "not applicable";

// ---------------------------------------------------------------------------
// Report model
// ---------------------------------------------------------------------------

/// The full survival breakdown of a manifest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub overall: GroupSummary,
    pub genders: Vec<GroupRow<Sex>>,
    pub classes: Vec<GroupRow<PassengerClass>>,
    pub age_bands: Vec<GroupRow<AgeBand>>,
    pub family_sizes: Vec<GroupRow<u32>>,
    pub best: BestGroups,
}

/// Highest-survival group per dimension; `None` when every group of the
/// dimension is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BestGroups {
    pub gender: Option<Sex>,
    pub class: Option<PassengerClass>,
    pub age_band: Option<AgeBand>,
    pub family_size: Option<u32>,
}

impl Report {
    pub fn build(manifest: &Manifest) -> Self {
        let all = manifest.select_all();

        let genders = analyze_dimension::<Sex>(&all);
        let classes = analyze_dimension::<PassengerClass>(&all);
        let age_bands = analyze_dimension::<AgeBand>(&all);
        let family_sizes = analyze_family_sizes(&all);

        let best = BestGroups {
            gender: best_group(&genders),
            class: best_group(&classes),
            age_band: best_group(&age_bands),
            family_size: best_group(&family_sizes),
        };
        log::debug!("best groups: {best:?}");
        log::debug!(
            "{} of {} family sizes have no passengers",
            family_sizes.iter().filter(|row| row.summary.is_empty()).count(),
            family_sizes.len()
        );
        if best.class.is_none() {
            log::warn!("manifest is empty; every best group is not applicable");
        }
        if best.age_band.is_none() {
            log::warn!("no passenger has a recorded age; best age group is not applicable");
        }

        Report {
            overall: GroupSummary::of(&all),
            genders,
            classes,
            age_bands,
            family_sizes,
            best,
        }
    }

    /// The text report, as written to the analysis file.
    pub fn render(&self) -> String {
        self.to_string()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

// ---------------------------------------------------------------------------
// Text rendering
// ---------------------------------------------------------------------------

fn percent(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

fn rate_text(summary: &GroupSummary) -> String {
    summary
        .survival_rate()
        .map_or_else(|_| NOT_APPLICABLE.to_string(), percent)
}

fn write_summary(f: &mut impl fmt::Write, summary: &GroupSummary, depth: usize) -> fmt::Result {
    let tabs = "\t".repeat(depth);
    writeln!(f, "{tabs}Population: {}", summary.population)?;
    writeln!(f, "{tabs}\tSurvivors: {}", summary.survivors)?;
    writeln!(f, "{tabs}\tDeceased: {}", summary.deceased)?;
    writeln!(f, "{tabs}Survival Rate: {}", rate_text(summary))
}

fn write_dimension<K: GroupKey>(
    f: &mut impl fmt::Write,
    title: &str,
    rows: &[GroupRow<K>],
) -> fmt::Result {
    writeln!(f, "{title}:")?;
    for row in rows {
        writeln!(f, "\t{}:", row.key.heading())?;
        write_summary(f, &row.summary, 2)?;
    }
    writeln!(f)
}

fn label_or_na<T>(value: Option<T>, label: impl Fn(T) -> String) -> String {
    value.map_or_else(|| NOT_APPLICABLE.to_string(), label)
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Titanic Data Analysis")?;
        writeln!(f)?;

        writeln!(f, "All Passengers:")?;
        write_summary(f, &self.overall, 1)?;
        writeln!(f)?;

        write_dimension(f, "Genders", &self.genders)?;
        write_dimension(f, "Classes", &self.classes)?;
        write_dimension(f, "Age Groups", &self.age_bands)?;

        writeln!(f, "Family Sizes:")?;
        for row in &self.family_sizes {
            writeln!(f, "\t{}. {}", row.key, rate_text(&row.summary))?;
        }
        writeln!(f)?;

        let best = &self.best;
        writeln!(f, "Highest Survival Rate Group:")?;
        writeln!(f, "\tGender: {}", label_or_na(best.gender, |k| k.label().to_string()))?;
        writeln!(f, "\tClass: {}", label_or_na(best.class, |k| k.label().to_string()))?;
        writeln!(f, "\tAge Group: {}", label_or_na(best.age_band, |k| k.label().to_string()))?;
        writeln!(f, "\tFamily Size: {}", label_or_na(best.family_size, |n| n.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::tests::manifest_from_rows;

    const ROWS: &[&str] = &[
        r#"1,0,3,"Braund, Mr. Owen Harris",male,22,1,0,A/5 21171,7.25,,S"#,
        r#"2,1,1,"Cumings, Mrs. John Bradley",female,38,1,0,PC 17599,71.2833,C85,C"#,
        r#"3,1,3,"Heikkinen, Miss. Laina",female,26,0,0,STON/O2. 3101282,7.925,,S"#,
        r#"4,1,1,"Futrelle, Mrs. Jacques Heath",female,35,1,0,113803,53.1,C123,S"#,
        r#"5,0,3,"Allen, Mr. William Henry",male,35,0,0,373450,8.05,,S"#,
        r#"6,0,3,"Moran, Mr. James",male,,0,0,330877,8.4583,,Q"#,
        r#"7,0,1,"McCarthy, Mr. Timothy J",male,54,0,0,17463,51.8625,E46,S"#,
        r#"8,0,3,"Palsson, Master. Gosta Leonard",male,2,3,1,349909,21.075,,S"#,
        r#"9,1,3,"Johnson, Mrs. Oscar W",female,27,0,2,347742,11.1333,,S"#,
        r#"10,1,2,"Nasser, Mrs. Nicholas",female,14,1,0,237736,30.0708,,C"#,
        r#"12,1,1,"Bonnell, Miss. Elizabeth",female,58,0,0,113783,26.55,C103,S"#,
        r#"34,0,2,"Wheadon, Mr. Edward H",male,66,0,0,C.A. 24579,10.5,,S"#,
    ];

    const EXPECTED: &str = "\
Titanic Data Analysis

All Passengers:
\tPopulation: 12
\t\tSurvivors: 6
\t\tDeceased: 6
\tSurvival Rate: 50.0%

Genders:
\tMale:
\t\tPopulation: 6
\t\t\tSurvivors: 0
\t\t\tDeceased: 6
\t\tSurvival Rate: 0.0%
\tFemale:
\t\tPopulation: 6
\t\t\tSurvivors: 6
\t\t\tDeceased: 0
\t\tSurvival Rate: 100.0%

Classes:
\tFirst Class:
\t\tPopulation: 4
\t\t\tSurvivors: 3
\t\t\tDeceased: 1
\t\tSurvival Rate: 75.0%
\tSecond Class:
\t\tPopulation: 2
\t\t\tSurvivors: 1
\t\t\tDeceased: 1
\t\tSurvival Rate: 50.0%
\tThird Class:
\t\tPopulation: 6
\t\t\tSurvivors: 2
\t\t\tDeceased: 4
\t\tSurvival Rate: 33.3%

Age Groups:
\tChild (<18):
\t\tPopulation: 2
\t\t\tSurvivors: 1
\t\t\tDeceased: 1
\t\tSurvival Rate: 50.0%
\tAdult (18-60):
\t\tPopulation: 8
\t\t\tSurvivors: 5
\t\t\tDeceased: 3
\t\tSurvival Rate: 62.5%
\tSenior (60+):
\t\tPopulation: 1
\t\t\tSurvivors: 0
\t\t\tDeceased: 1
\t\tSurvival Rate: 0.0%

Family Sizes:
\t1. 33.3%
\t2. 75.0%
\t3. 100.0%
\t4. not applicable
\t5. 0.0%

Highest Survival Rate Group:
\tGender: Female
\tClass: First
\tAge Group: Adult
\tFamily Size: 3
";

    #[test]
    fn renders_all_sections() {
        let report = Report::build(&manifest_from_rows(ROWS));
        assert_eq!(report.render(), EXPECTED);
    }

    #[test]
    fn rendering_is_deterministic() {
        let manifest = manifest_from_rows(ROWS);
        let first = Report::build(&manifest).render();
        let second = Report::build(&manifest).render();
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn empty_groups_render_not_applicable() {
        // Only third-class men without recorded ages.
        let report = Report::build(&manifest_from_rows(&[
            r#"1,0,3,"A",male,,0,0,T,8,,S"#,
            r#"2,1,3,"B",male,,0,0,T,8,,S"#,
        ]));
        let text = report.render();

        assert!(text.contains("\tFemale:\n\t\tPopulation: 0\n\t\t\tSurvivors: 0\n\t\t\tDeceased: 0\n\t\tSurvival Rate: not applicable\n"));
        assert!(text.contains("\tAge Group: not applicable\n"));
        assert!(text.contains("\tGender: Male\n"));
        assert!(text.contains("\tClass: Third\n"));
        assert!(!text.contains("NaN"));
        assert!(!text.contains("inf"));
        assert_eq!(report.best.age_band, None);
    }

    #[test]
    fn empty_manifest_reports_without_numbers() {
        let report = Report::build(&Manifest::default());
        let text = report.render();
        assert!(text.contains("All Passengers:\n\tPopulation: 0\n"));
        assert!(text.contains("Family Sizes:\n\nHighest Survival Rate Group:"));
        assert!(text.contains("\tFamily Size: not applicable\n"));
        assert!(!text.contains("NaN"));
    }

    #[test]
    fn json_marks_empty_rates_as_null() {
        let report = Report::build(&manifest_from_rows(&[r#"1,0,3,"A",male,,0,0,T,8,,S"#]));
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(value["overall"]["population"], 1);
        assert_eq!(value["overall"]["survival_rate"], 0.0);
        assert_eq!(value["genders"][1]["key"], "female");
        assert!(value["genders"][1]["survival_rate"].is_null());
        assert_eq!(value["best"]["class"], "third");
        assert!(value["best"]["age_band"].is_null());
    }
}

use std::fmt;

use crate::data::model::{Field, Manifest, PassengerClass, Sex};

use super::group::{analyze_family_sizes, best_group, GroupRow};
use super::report::NOT_APPLICABLE;
use super::stats::{self, EmptyGroup};

// ---------------------------------------------------------------------------
// Console summary
// ---------------------------------------------------------------------------

/// Survival rate and mean fare of one ticket class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassLine {
    pub class: PassengerClass,
    pub survival_rate: Result<f64, EmptyGroup>,
    pub average_fare: Result<f64, EmptyGroup>,
}

/// Whether passengers travelling alone fared better than any family size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelVerdict {
    Alone,
    WithFamily,
}

/// The headline figures printed to the console after loading.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub passengers: usize,
    pub survival_rate: Result<f64, EmptyGroup>,
    pub male_rate: Result<f64, EmptyGroup>,
    pub female_rate: Result<f64, EmptyGroup>,
    pub average_age: Result<f64, EmptyGroup>,
    pub survivor_average_age: Result<f64, EmptyGroup>,
    pub non_survivor_average_age: Result<f64, EmptyGroup>,
    pub oldest: Result<f64, EmptyGroup>,
    pub youngest: Result<f64, EmptyGroup>,
    pub classes: Vec<ClassLine>,
    pub best_class: Option<PassengerClass>,
    pub family_sizes: Vec<GroupRow<u32>>,
    pub travel_verdict: Option<TravelVerdict>,
}

impl Summary {
    pub fn build(manifest: &Manifest) -> Self {
        let all = manifest.select_all();

        let classes: Vec<ClassLine> = PassengerClass::ALL
            .iter()
            .map(|&class| {
                let members = all.by_class(class);
                ClassLine {
                    class,
                    survival_rate: stats::survival_rate(&members),
                    average_fare: stats::average_fare(&members),
                }
            })
            .collect();
        let best_class = stats::argmax(
            classes
                .iter()
                .filter_map(|line| line.survival_rate.ok().map(|rate| (line.class, rate))),
        );

        let family_sizes = analyze_family_sizes(&all);
        let travel_verdict = travel_verdict(&family_sizes);

        Summary {
            passengers: manifest.len(),
            survival_rate: stats::survival_rate(&all),
            male_rate: stats::survival_rate(&all.by_gender(Sex::Male)),
            female_rate: stats::survival_rate(&all.by_gender(Sex::Female)),
            average_age: stats::average_age(&all),
            survivor_average_age: stats::average_age(&all.by_outcome(true)),
            non_survivor_average_age: stats::average_age(&all.by_outcome(false)),
            oldest: stats::oldest(&all),
            youngest: stats::youngest(&all),
            classes,
            best_class,
            family_sizes,
            travel_verdict,
        }
    }
}

/// Compare travelling alone against the best family size above one.
fn travel_verdict(rows: &[GroupRow<u32>]) -> Option<TravelVerdict> {
    let alone = rows
        .iter()
        .find(|row| row.key == 1)?
        .summary
        .survival_rate()
        .ok()?;
    let families: Vec<GroupRow<u32>> = rows.iter().filter(|row| row.key > 1).copied().collect();
    let best_family = best_group(&families)?;
    let family_rate = families
        .iter()
        .find(|row| row.key == best_family)?
        .summary
        .survival_rate()
        .ok()?;

    Some(if alone > family_rate {
        TravelVerdict::Alone
    } else {
        TravelVerdict::WithFamily
    })
}

fn percent(value: Result<f64, EmptyGroup>) -> String {
    value.map_or_else(|_| NOT_APPLICABLE.to_string(), |r| format!("{:.1}%", r * 100.0))
}

fn years(value: Result<f64, EmptyGroup>) -> String {
    value.map_or_else(|_| NOT_APPLICABLE.to_string(), |a| format!("{a:.1}"))
}

fn dollars(value: Result<f64, EmptyGroup>) -> String {
    value.map_or_else(|_| NOT_APPLICABLE.to_string(), |f| format!("${f:.2}"))
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Passengers: {}", self.passengers)?;
        writeln!(f, "Survival Rate: {}", percent(self.survival_rate))?;
        writeln!(f, "Male Survival Rate: {}", percent(self.male_rate))?;
        writeln!(f, "Female Survival Rate: {}", percent(self.female_rate))?;
        writeln!(f, "Average Age: {}", years(self.average_age))?;
        writeln!(
            f,
            "Average Age Amongst Survivors: {}",
            years(self.survivor_average_age)
        )?;
        writeln!(
            f,
            "Average Age Amongst Non-Survivors: {}",
            years(self.non_survivor_average_age)
        )?;
        writeln!(f, "Oldest Passenger: {}", years(self.oldest))?;
        writeln!(f, "Youngest Passenger: {}", years(self.youngest))?;

        for line in &self.classes {
            writeln!(
                f,
                "{} Class Survival Rate: {}",
                line.class.label(),
                percent(line.survival_rate)
            )?;
        }
        writeln!(
            f,
            "Highest Survival Rate Class: {}",
            self.best_class.map_or(NOT_APPLICABLE, PassengerClass::label)
        )?;
        for line in &self.classes {
            writeln!(
                f,
                "{} Class Average Fare: {}",
                line.class.label(),
                dollars(line.average_fare)
            )?;
        }

        writeln!(f, "Survival Rate Based on Family Size:")?;
        let width = self
            .family_sizes
            .last()
            .map_or(1, |row| row.key.to_string().len());
        for row in &self.family_sizes {
            writeln!(
                f,
                "\t{:>width$}. {}",
                row.key,
                percent(row.summary.survival_rate())
            )?;
        }

        let verdict = match self.travel_verdict {
            Some(TravelVerdict::Alone) => "It is better to travel alone",
            Some(TravelVerdict::WithFamily) => "It is better to travel with family",
            None => "Travelling alone vs with family: not applicable",
        };
        writeln!(f, "{verdict}")
    }
}

// ---------------------------------------------------------------------------
// Table preview
// ---------------------------------------------------------------------------

/// The first rows of the manifest laid out as a centred text table.
#[derive(Debug, Clone)]
pub struct Preview {
    cells: Vec<Vec<String>>,
    total: usize,
}

impl Preview {
    pub fn new(manifest: &Manifest, rows: usize) -> Self {
        let cells = manifest
            .passengers()
            .iter()
            .take(rows)
            .map(|p| Field::ALL.iter().map(|field| field.display_value(p)).collect())
            .collect();
        Preview {
            cells,
            total: manifest.len(),
        }
    }

    fn widths(&self) -> Vec<usize> {
        Field::ALL
            .iter()
            .enumerate()
            .map(|(i, field)| {
                self.cells
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(field.header().len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }
}

impl fmt::Display for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        // Each cell is followed by a one-character separator.
        let line_width: usize = widths.iter().map(|w| w + 1).sum();

        writeln!(f, "{:^line_width$}", "Titanic Data")?;
        for (field, width) in Field::ALL.iter().zip(&widths) {
            write!(f, "{:^width$}|", field.header())?;
        }
        writeln!(f)?;
        for row in &self.cells {
            for (cell, width) in row.iter().zip(&widths) {
                write!(f, "{cell:^width$}|")?;
            }
            writeln!(f)?;
        }

        let columns: Vec<&str> = Field::ALL.iter().map(|field| field.header()).collect();
        writeln!(f, "Columns: {}", columns.join(", "))?;
        writeln!(f, "Total Passengers: {}", self.total)
    }
}

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use csv::StringRecord;
use thiserror::Error;

use super::model::{Field, Manifest, Passenger, PassengerClass, Port, Sex};

/// Oldest age accepted in the `Age` column.
pub const MAX_AGE: f64 = 150.0;
/// Largest `SibSp` / `Parch` count accepted.
pub const MAX_RELATIVES: u32 = 255;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Fatal problems with the input manifest. Any of these aborts the run
/// before analysis starts.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV")]
    Csv(#[from] csv::Error),
    #[error("unexpected header: expected {expected}, found {found}")]
    Header { expected: String, found: String },
    #[error("row {row}: expected {expected} columns, found {found}")]
    ColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("row {row}: invalid {column} value '{value}'")]
    InvalidField {
        row: usize,
        column: Field,
        value: String,
    },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the passenger manifest from a CSV file with the standard
/// 12-column header.
pub fn load_file(path: &Path) -> Result<Manifest, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_reader(file)
}

/// Load the manifest from any CSV source.
///
/// Expected layout:
///
/// ```text
/// PassengerId,Survived,Pclass,Name,Sex,Age,SibSp,Parch,Ticket,Fare,Cabin,Embarked
/// 1,0,3,"Braund, Mr. Owen Harris",male,22,1,0,A/5 21171,7.25,,S
/// ```
///
/// `Age`, `Cabin` and `Embarked` may be empty; every other cell is required.
/// Rows keep their source order.
pub fn load_reader<R: Read>(reader: R) -> Result<Manifest, LoadError> {
    // Column counts are checked per row below to report the row number.
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    check_header(reader.headers()?)?;

    let mut passengers = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result?;
        passengers.push(parse_row(&record, i + 1)?);
    }

    Ok(Manifest::from_passengers(passengers))
}

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

fn check_header(headers: &StringRecord) -> Result<(), LoadError> {
    let matches = headers.len() == Field::SOURCE_COLUMNS.len()
        && headers
            .iter()
            .zip(Field::SOURCE_COLUMNS)
            .all(|(found, field)| found.trim() == field.header());

    if matches {
        Ok(())
    } else {
        let expected = Field::SOURCE_COLUMNS.map(Field::header).join(",");
        let found = headers.iter().collect::<Vec<_>>().join(",");
        Err(LoadError::Header { expected, found })
    }
}

fn parse_row(record: &StringRecord, row: usize) -> Result<Passenger, LoadError> {
    if record.len() != Field::SOURCE_COLUMNS.len() {
        return Err(LoadError::ColumnCount {
            row,
            expected: Field::SOURCE_COLUMNS.len(),
            found: record.len(),
        });
    }

    let cells = Cells { record, row };

    let survived = match cells.required(Field::Survived)? {
        "0" => false,
        "1" => true,
        other => return Err(cells.invalid(Field::Survived, other)),
    };
    let sib_sp = cells.relatives(Field::SibSp)?;
    let parch = cells.relatives(Field::Parch)?;
    let family_size = sib_sp
        .checked_add(parch)
        .and_then(|n| n.checked_add(1))
        .ok_or_else(|| cells.invalid(Field::Parch, cells.raw(Field::Parch)))?;

    Ok(Passenger {
        passenger_id: cells.number(Field::PassengerId)?,
        survived,
        class: cells.code(Field::Pclass, PassengerClass::from_code)?,
        name: cells.required(Field::Name)?.to_string(),
        sex: cells.code(Field::Sex, Sex::from_code)?,
        age: cells.age()?,
        sib_sp,
        parch,
        ticket: cells.required(Field::Ticket)?.to_string(),
        fare: cells.measure(Field::Fare)?,
        cabin: cells.optional(Field::Cabin).map(str::to_string),
        embarked: cells
            .optional(Field::Embarked)
            .map(|code| Port::from_code(code).ok_or_else(|| cells.invalid(Field::Embarked, code)))
            .transpose()?,
        family_size,
    })
}

/// Typed access to the cells of one data row.
struct Cells<'r> {
    record: &'r StringRecord,
    row: usize,
}

impl<'r> Cells<'r> {
    fn raw(&self, field: Field) -> &'r str {
        self.record.get(field as usize).unwrap_or("").trim()
    }

    fn invalid(&self, field: Field, value: &str) -> LoadError {
        LoadError::InvalidField {
            row: self.row,
            column: field,
            value: value.to_string(),
        }
    }

    fn optional(&self, field: Field) -> Option<&'r str> {
        Some(self.raw(field)).filter(|s| !s.is_empty())
    }

    fn required(&self, field: Field) -> Result<&'r str, LoadError> {
        self.optional(field).ok_or_else(|| self.invalid(field, ""))
    }

    fn number<T: FromStr>(&self, field: Field) -> Result<T, LoadError> {
        let raw = self.required(field)?;
        raw.parse().map_err(|_| self.invalid(field, raw))
    }

    fn code<T>(&self, field: Field, decode: impl Fn(&str) -> Option<T>) -> Result<T, LoadError> {
        let raw = self.required(field)?;
        decode(raw).ok_or_else(|| self.invalid(field, raw))
    }

    /// A finite, non-negative quantity (fare, age).
    fn measure(&self, field: Field) -> Result<f64, LoadError> {
        let value: f64 = self.number(field)?;
        if value.is_finite() && value >= 0.0 {
            Ok(value)
        } else {
            Err(self.invalid(field, self.raw(field)))
        }
    }

    /// Optional age, at most [`MAX_AGE`].
    fn age(&self) -> Result<Option<f64>, LoadError> {
        if self.optional(Field::Age).is_none() {
            return Ok(None);
        }
        let age = self.measure(Field::Age)?;
        if age > MAX_AGE {
            return Err(self.invalid(Field::Age, self.raw(Field::Age)));
        }
        Ok(Some(age))
    }

    /// Relative count, at most [`MAX_RELATIVES`].
    fn relatives(&self, field: Field) -> Result<u32, LoadError> {
        let count: u32 = self.number(field)?;
        if count > MAX_RELATIVES {
            return Err(self.invalid(field, self.raw(field)));
        }
        Ok(count)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const HEADER: &str =
        "PassengerId,Survived,Pclass,Name,Sex,Age,SibSp,Parch,Ticket,Fare,Cabin,Embarked";

    /// Build a manifest from data rows under the standard header.
    pub(crate) fn manifest_from_rows(rows: &[&str]) -> Manifest {
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        load_reader(text.as_bytes()).expect("fixture rows must load")
    }

    fn load_text(text: &str) -> Result<Manifest, LoadError> {
        load_reader(text.as_bytes())
    }

    #[test]
    fn loads_rows_in_order_with_optional_fields() {
        let manifest = manifest_from_rows(&[
            r#"1,0,3,"Braund, Mr. Owen Harris",male,22,1,0,A/5 21171,7.25,,S"#,
            r#"2,1,1,"Cumings, Mrs. John Bradley",female,38,1,0,PC 17599,71.2833,C85,C"#,
            r#"6,0,3,"Moran, Mr. James",male,,0,0,330877,8.4583,,Q"#,
            r#"62,1,1,"Icard, Miss. Amelie",female,38,0,0,113572,80,B28,"#,
        ]);

        assert_eq!(manifest.len(), 4);
        let ps = manifest.passengers();
        assert_eq!(
            ps.iter().map(|p| p.passenger_id).collect::<Vec<_>>(),
            vec![1, 2, 6, 62]
        );

        assert_eq!(ps[0].name, "Braund, Mr. Owen Harris");
        assert_eq!(ps[0].sex, Sex::Male);
        assert_eq!(ps[0].class, PassengerClass::Third);
        assert_eq!(ps[0].age, Some(22.0));
        assert_eq!(ps[0].cabin, None);
        assert_eq!(ps[0].embarked, Some(Port::Southampton));
        assert!(!ps[0].survived);

        assert_eq!(ps[1].cabin.as_deref(), Some("C85"));
        assert!(ps[1].survived);
        assert_eq!(ps[2].age, None);
        assert_eq!(ps[3].embarked, None);
    }

    #[test]
    fn family_size_is_derived_for_every_row() {
        let manifest = manifest_from_rows(&[
            r#"1,0,3,"A",male,22,1,0,T1,7.25,,S"#,
            r#"2,1,3,"B",female,4,1,1,T2,16.7,G6,S"#,
            r#"3,0,3,"C",male,2,4,1,T3,29.125,,Q"#,
            r#"4,1,2,"D",female,,0,0,T4,13,,S"#,
        ]);

        for p in manifest.passengers() {
            assert_eq!(p.family_size(), p.sib_sp + p.parch + 1);
            assert!(p.family_size() >= 1);
        }
        let sizes: Vec<u32> = manifest.passengers().iter().map(Passenger::family_size).collect();
        assert_eq!(sizes, vec![2, 3, 6, 1]);
    }

    #[test]
    fn header_only_yields_empty_manifest() {
        let manifest = load_text(HEADER).unwrap();
        assert!(manifest.is_empty());
    }

    #[test]
    fn rejects_wrong_header() {
        let err = load_text("Id,Survived\n1,0").unwrap_err();
        assert!(matches!(err, LoadError::Header { .. }), "{err}");
    }

    #[test]
    fn rejects_wrong_column_count() {
        let text = format!("{HEADER}\n1,0,3,\"A\",male,22,1,0,T1,7.25,,S\n2,1,1,\"B\",female,38");
        match load_text(&text).unwrap_err() {
            LoadError::ColumnCount {
                row,
                expected,
                found,
            } => {
                assert_eq!(row, 2);
                assert_eq!(expected, 12);
                assert_eq!(found, 6);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_non_numeric_required_field() {
        let text = format!("{HEADER}\n1,0,3,\"A\",male,22,one,0,T1,7.25,,S");
        match load_text(&text).unwrap_err() {
            LoadError::InvalidField { row, column, value } => {
                assert_eq!(row, 1);
                assert_eq!(column, Field::SibSp);
                assert_eq!(value, "one");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_missing_required_field() {
        let text = format!("{HEADER}\n1,0,3,\"A\",male,22,1,0,T1,,,S");
        let err = load_text(&text).unwrap_err();
        assert!(
            matches!(err, LoadError::InvalidField { column: Field::Fare, .. }),
            "{err}"
        );
    }

    #[test]
    fn rejects_out_of_range_codes() {
        for (row, column) in [
            (r#"1,2,3,"A",male,22,1,0,T1,7.25,,S"#, Field::Survived),
            (r#"1,0,4,"A",male,22,1,0,T1,7.25,,S"#, Field::Pclass),
            (r#"1,0,3,"A",unknown,22,1,0,T1,7.25,,S"#, Field::Sex),
            (r#"1,0,3,"A",male,-1,1,0,T1,7.25,,S"#, Field::Age),
            (r#"1,0,3,"A",male,22,1,0,T1,7.25,,X"#, Field::Embarked),
        ] {
            let err = load_text(&format!("{HEADER}\n{row}")).unwrap_err();
            match err {
                LoadError::InvalidField { column: c, .. } => assert_eq!(c, column),
                other => panic!("{row}: unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn rejects_relative_counts_that_would_overflow_family_size() {
        let text = format!("{HEADER}\n1,0,3,\"A\",male,22,4294967295,0,T1,7.25,,S");
        match load_text(&text).unwrap_err() {
            LoadError::InvalidField { row, column, value } => {
                assert_eq!(row, 1);
                assert_eq!(column, Field::SibSp);
                assert_eq!(value, "4294967295");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_implausible_ages_and_counts() {
        for (row, column) in [
            (r#"1,0,3,"A",male,300000000,0,0,T1,7.25,,S"#, Field::Age),
            (r#"1,0,3,"A",male,151,0,0,T1,7.25,,S"#, Field::Age),
            (r#"1,0,3,"A",male,22,256,0,T1,7.25,,S"#, Field::SibSp),
            (r#"1,0,3,"A",male,22,0,1000000,T1,7.25,,S"#, Field::Parch),
        ] {
            let err = load_text(&format!("{HEADER}\n{row}")).unwrap_err();
            match err {
                LoadError::InvalidField { column: c, .. } => assert_eq!(c, column),
                other => panic!("{row}: unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn accepts_values_at_the_caps() {
        let manifest = manifest_from_rows(&[r#"1,0,3,"A",male,150,255,255,T1,7.25,,S"#]);
        let p = &manifest.passengers()[0];
        assert_eq!(p.age, Some(MAX_AGE));
        assert_eq!(p.family_size(), 2 * MAX_RELATIVES + 1);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_file(Path::new("definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("here.csv"));
    }
}

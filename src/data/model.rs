use std::fmt;

use serde::Serialize;

use super::filter::Selection;

// ---------------------------------------------------------------------------
// Categorical columns
// ---------------------------------------------------------------------------

/// Passenger sex as recorded in the manifest (`male` / `female`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Canonical order used everywhere a per-gender breakdown is listed.
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "male" => Some(Sex::Male),
            "female" => Some(Sex::Female),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }
}

/// Ticket class (`Pclass` column, 1 to 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PassengerClass {
    First,
    Second,
    Third,
}

impl PassengerClass {
    pub const ALL: [PassengerClass; 3] = [
        PassengerClass::First,
        PassengerClass::Second,
        PassengerClass::Third,
    ];

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(PassengerClass::First),
            "2" => Some(PassengerClass::Second),
            "3" => Some(PassengerClass::Third),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            PassengerClass::First => 1,
            PassengerClass::Second => 2,
            PassengerClass::Third => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PassengerClass::First => "First",
            PassengerClass::Second => "Second",
            PassengerClass::Third => "Third",
        }
    }
}

/// Port of embarkation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Port {
    Cherbourg,
    Queenstown,
    Southampton,
}

impl Port {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "C" => Some(Port::Cherbourg),
            "Q" => Some(Port::Queenstown),
            "S" => Some(Port::Southampton),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Port::Cherbourg => "C",
            Port::Queenstown => "Q",
            Port::Southampton => "S",
        }
    }
}

// ---------------------------------------------------------------------------
// Age bands
// ---------------------------------------------------------------------------

/// Lower bound (inclusive) of the adult band.
pub const ADULT_AGE: f64 = 18.0;
/// Lower bound (inclusive) of the senior band.
pub const SENIOR_AGE: f64 = 60.0;

/// Disjoint age bands: child `< 18`, adult `[18, 60)`, senior `>= 60`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeBand {
    Child,
    Adult,
    Senior,
}

impl AgeBand {
    pub const ALL: [AgeBand; 3] = [AgeBand::Child, AgeBand::Adult, AgeBand::Senior];

    /// The single band an age falls into.
    pub fn of(age: f64) -> Self {
        if age < ADULT_AGE {
            AgeBand::Child
        } else if age < SENIOR_AGE {
            AgeBand::Adult
        } else {
            AgeBand::Senior
        }
    }

    pub fn contains(self, age: f64) -> bool {
        AgeBand::of(age) == self
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeBand::Child => "Child",
            AgeBand::Adult => "Adult",
            AgeBand::Senior => "Senior",
        }
    }

    /// Label including the band bounds, used as a report heading.
    pub fn heading(self) -> &'static str {
        match self {
            AgeBand::Child => "Child (<18)",
            AgeBand::Adult => "Adult (18-60)",
            AgeBand::Senior => "Senior (60+)",
        }
    }
}

// ---------------------------------------------------------------------------
// Passenger – one row of the manifest
// ---------------------------------------------------------------------------

/// One passenger's manifest entry.
///
/// Optional columns (`age`, `cabin`, `embarked`) are `None` when the source
/// cell is empty, so they can be left out of the computations that need them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Passenger {
    pub passenger_id: u32,
    pub survived: bool,
    pub class: PassengerClass,
    pub name: String,
    pub sex: Sex,
    pub age: Option<f64>,
    pub sib_sp: u32,
    pub parch: u32,
    pub ticket: String,
    pub fare: f64,
    pub cabin: Option<String>,
    pub embarked: Option<Port>,
    /// `sib_sp + parch + 1`, fixed at load time.
    pub(super) family_size: u32,
}

impl Passenger {
    pub fn family_size(&self) -> u32 {
        self.family_size
    }
}

// ---------------------------------------------------------------------------
// Field – enum-keyed column access
// ---------------------------------------------------------------------------

/// Tag for every manifest column plus the derived `FamilySize`.
///
/// The first twelve variants are in source column order, so `field as usize`
/// is the CSV column index for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    PassengerId,
    Survived,
    Pclass,
    Name,
    Sex,
    Age,
    SibSp,
    Parch,
    Ticket,
    Fare,
    Cabin,
    Embarked,
    FamilySize,
}

impl Field {
    /// The twelve source columns in header order.
    pub const SOURCE_COLUMNS: [Field; 12] = [
        Field::PassengerId,
        Field::Survived,
        Field::Pclass,
        Field::Name,
        Field::Sex,
        Field::Age,
        Field::SibSp,
        Field::Parch,
        Field::Ticket,
        Field::Fare,
        Field::Cabin,
        Field::Embarked,
    ];

    /// Source columns followed by the derived column.
    pub const ALL: [Field; 13] = [
        Field::PassengerId,
        Field::Survived,
        Field::Pclass,
        Field::Name,
        Field::Sex,
        Field::Age,
        Field::SibSp,
        Field::Parch,
        Field::Ticket,
        Field::Fare,
        Field::Cabin,
        Field::Embarked,
        Field::FamilySize,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Field::PassengerId => "PassengerId",
            Field::Survived => "Survived",
            Field::Pclass => "Pclass",
            Field::Name => "Name",
            Field::Sex => "Sex",
            Field::Age => "Age",
            Field::SibSp => "SibSp",
            Field::Parch => "Parch",
            Field::Ticket => "Ticket",
            Field::Fare => "Fare",
            Field::Cabin => "Cabin",
            Field::Embarked => "Embarked",
            Field::FamilySize => "FamilySize",
        }
    }

    /// Whether the passenger has a value for this column.
    pub fn is_present(self, passenger: &Passenger) -> bool {
        match self {
            Field::Age => passenger.age.is_some(),
            Field::Cabin => passenger.cabin.is_some(),
            Field::Embarked => passenger.embarked.is_some(),
            _ => true,
        }
    }

    /// Cell text for tabular display; empty for missing values.
    pub fn display_value(self, passenger: &Passenger) -> String {
        match self {
            Field::PassengerId => passenger.passenger_id.to_string(),
            Field::Survived => u8::from(passenger.survived).to_string(),
            Field::Pclass => passenger.class.number().to_string(),
            Field::Name => passenger.name.clone(),
            Field::Sex => passenger.sex.code().to_string(),
            Field::Age => passenger.age.map(|a| a.to_string()).unwrap_or_default(),
            Field::SibSp => passenger.sib_sp.to_string(),
            Field::Parch => passenger.parch.to_string(),
            Field::Ticket => passenger.ticket.clone(),
            Field::Fare => passenger.fare.to_string(),
            Field::Cabin => passenger.cabin.clone().unwrap_or_default(),
            Field::Embarked => passenger
                .embarked
                .map(|p| p.code().to_string())
                .unwrap_or_default(),
            Field::FamilySize => passenger.family_size.to_string(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

// ---------------------------------------------------------------------------
// Manifest – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed manifest, in source order.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    passengers: Vec<Passenger>,
}

impl Manifest {
    pub fn from_passengers(passengers: Vec<Passenger>) -> Self {
        Manifest { passengers }
    }

    pub fn passengers(&self) -> &[Passenger] {
        &self.passengers
    }

    /// A selection covering every passenger.
    pub fn select_all(&self) -> Selection<'_> {
        self.passengers.iter().collect()
    }

    /// Number of passengers.
    pub fn len(&self) -> usize {
        self.passengers.len()
    }

    /// Whether the manifest is empty.
    pub fn is_empty(&self) -> bool {
        self.passengers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_bands_partition_ages() {
        for tenth in 0..1000 {
            let age = f64::from(tenth) / 10.0;
            let hits = AgeBand::ALL
                .iter()
                .filter(|band| band.contains(age))
                .count();
            assert_eq!(hits, 1, "age {age} fell into {hits} bands");
        }
    }

    #[test]
    fn age_band_boundaries() {
        assert_eq!(AgeBand::of(17.99), AgeBand::Child);
        assert_eq!(AgeBand::of(18.0), AgeBand::Adult);
        assert_eq!(AgeBand::of(59.5), AgeBand::Adult);
        assert_eq!(AgeBand::of(60.0), AgeBand::Senior);
        assert_eq!(AgeBand::of(80.0), AgeBand::Senior);
    }

    #[test]
    fn field_headers_are_unique() {
        let mut headers: Vec<&str> = Field::ALL.iter().map(|f| f.header()).collect();
        headers.sort_unstable();
        headers.dedup();
        assert_eq!(headers.len(), Field::ALL.len());
    }

    #[test]
    fn source_columns_match_discriminants() {
        for (i, field) in Field::SOURCE_COLUMNS.into_iter().enumerate() {
            assert_eq!(field as usize, i);
        }
    }

    #[test]
    fn category_codes() {
        assert_eq!(Sex::from_code("female"), Some(Sex::Female));
        assert_eq!(Sex::from_code("Female"), None);
        assert_eq!(PassengerClass::from_code("2"), Some(PassengerClass::Second));
        assert_eq!(PassengerClass::from_code("4"), None);
        assert_eq!(Port::from_code("Q"), Some(Port::Queenstown));
        assert_eq!(Port::from_code(""), None);
    }
}

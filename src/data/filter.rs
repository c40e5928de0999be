use super::model::{AgeBand, Field, Passenger, PassengerClass, Sex};

// ---------------------------------------------------------------------------
// Selection: an ordered, borrowed subset of the manifest
// ---------------------------------------------------------------------------

/// A subset of passengers, in manifest order.
///
/// Every filter takes a selection and returns a new one; the input is never
/// modified, and filtering an empty selection yields an empty selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection<'a> {
    records: Vec<&'a Passenger>,
}

impl<'a> Selection<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &'a Passenger> + '_ {
        self.records.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Passengers that satisfy `predicate`.
    pub fn filter(&self, predicate: impl Fn(&Passenger) -> bool) -> Selection<'a> {
        self.iter().filter(|p| predicate(p)).collect()
    }

    /// Passengers with a value present for `field`.
    pub fn with_field(&self, field: Field) -> Selection<'a> {
        self.filter(|p| field.is_present(p))
    }

    pub fn by_gender(&self, sex: Sex) -> Selection<'a> {
        self.filter(|p| p.sex == sex)
    }

    pub fn by_class(&self, class: PassengerClass) -> Selection<'a> {
        self.filter(|p| p.class == class)
    }

    pub fn by_family_size(&self, size: u32) -> Selection<'a> {
        self.filter(|p| p.family_size() == size)
    }

    /// Passengers whose age falls into `band`. Passengers without an age
    /// belong to no band.
    pub fn by_age_band(&self, band: AgeBand) -> Selection<'a> {
        self.filter(|p| p.age.is_some_and(|age| band.contains(age)))
    }

    pub fn by_outcome(&self, survived: bool) -> Selection<'a> {
        self.filter(|p| p.survived == survived)
    }
}

impl<'a> FromIterator<&'a Passenger> for Selection<'a> {
    fn from_iter<I: IntoIterator<Item = &'a Passenger>>(iter: I) -> Self {
        Selection {
            records: iter.into_iter().collect(),
        }
    }
}

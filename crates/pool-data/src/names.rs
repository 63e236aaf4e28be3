//! Sources of first and last names.
//!
//! Generators never create names themselves; they ask a [`NameSource`].
//! [`FakeNameSource`] draws English names from the `fake` crate, while
//! [`ListNameSource`] picks from fixed lists so tests can pin names down.

use fake::{
    Fake,
    faker::name::en::{FirstName, LastName},
};
use rand::{Rng, seq::SliceRandom};

use crate::error::GenerationError;

/// Provides culturally plausible first and last names.
pub trait NameSource {
    fn first_name<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String, GenerationError>;

    fn last_name<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String, GenerationError>;

    /// Returns `"First Last"`.
    fn full_name<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String, GenerationError> {
        let first = self.first_name(rng)?;
        let last = self.last_name(rng)?;
        Ok(format!("{first} {last}"))
    }
}

/// English names from the `fake` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FakeNameSource;

impl NameSource for FakeNameSource {
    fn first_name<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String, GenerationError> {
        Ok(FirstName().fake_with_rng(rng))
    }

    fn last_name<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String, GenerationError> {
        Ok(LastName().fake_with_rng(rng))
    }
}

/// Names picked uniformly from fixed lists.
#[derive(Debug, Clone)]
pub struct ListNameSource {
    first_names: Vec<String>,
    last_names: Vec<String>,
}

impl ListNameSource {
    pub fn new<F, L>(first_names: F, last_names: L) -> Self
    where
        F: IntoIterator,
        F::Item: Into<String>,
        L: IntoIterator,
        L::Item: Into<String>,
    {
        Self {
            first_names: first_names.into_iter().map(Into::into).collect(),
            last_names: last_names.into_iter().map(Into::into).collect(),
        }
    }

    /// A source that always answers with the same name.
    pub fn single(first: &str, last: &str) -> Self {
        Self::new([first], [last])
    }
}

impl NameSource for ListNameSource {
    fn first_name<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String, GenerationError> {
        self.first_names
            .choose(rng)
            .cloned()
            .ok_or_else(|| GenerationError::NameSource("no first names configured".into()))
    }

    fn last_name<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String, GenerationError> {
        self.last_names
            .choose(rng)
            .cloned()
            .ok_or_else(|| GenerationError::NameSource("no last names configured".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_fake_names_not_empty() {
        let mut rng = StdRng::seed_from_u64(7);
        let first = FakeNameSource.first_name(&mut rng).unwrap();
        let last = FakeNameSource.last_name(&mut rng).unwrap();
        assert!(!first.is_empty());
        assert!(!last.is_empty());
    }

    #[test]
    fn test_single_list_source() {
        let mut rng = StdRng::seed_from_u64(7);
        let names = ListNameSource::single("Ada", "Lovelace");
        assert_eq!(names.full_name(&mut rng).unwrap(), "Ada Lovelace");
    }

    #[test]
    fn test_empty_list_source_fails() {
        let mut rng = StdRng::seed_from_u64(7);
        let names = ListNameSource::new(Vec::<String>::new(), ["Smith"]);
        assert!(matches!(
            names.first_name(&mut rng),
            Err(GenerationError::NameSource(_))
        ));
    }
}

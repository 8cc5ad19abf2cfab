use std::ops::Deref;

/// Ordered collection of non-empty, trimmed strings.
///
/// Entries that are empty or only whitespace are dropped on construction.
/// Duplicates and ordering are preserved.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StringSet(Vec<String>);

impl StringSet {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        values.into_iter().collect()
    }

    /// Append values after the existing entries, applying the same filtering.
    pub fn extend<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let trimmed = values
            .into_iter()
            .map(|v| v.as_ref().trim().to_string())
            .filter(|v| !v.is_empty());
        self.0.extend(trimmed);
    }
}

impl<S: AsRef<str>> FromIterator<S> for StringSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = StringSet::default();
        set.extend(iter);
        set
    }
}

impl Deref for StringSet {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

use std::{fmt, sync::Arc};

/// A vocabulary entry, cheap to clone and shared between the snapshot and local state.
pub type Word = Arc<str>;

/// The index of a latent word class, always in `0..num_classes`.
pub type ClassId = usize;

/// An n-gram conditioning context, the words preceding a position in the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NgramHistory(Box<[Word]>);

impl NgramHistory {
    /// Creates a new `NgramHistory`.
    ///
    /// # Arguments
    /// * `words` - The context words, oldest first.
    ///
    /// # Returns
    /// A new `NgramHistory` instance.
    pub fn new(words: Vec<Word>) -> Self {
        Self(words.into_boxed_slice())
    }

    pub fn words(&self) -> &[Word] {
        &self.0
    }

    /// The order of the context, an empty history is the unigram context.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<const N: usize> From<[&str; N]> for NgramHistory {
    fn from(words: [&str; N]) -> Self {
        words.into_iter().collect()
    }
}

impl<'a> FromIterator<&'a str> for NgramHistory {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(Word::from).collect())
    }
}

impl FromIterator<Word> for NgramHistory {
    fn from_iter<I: IntoIterator<Item = Word>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for NgramHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut words = self.0.iter();

        if let Some(first) = words.next() {
            f.write_str(first)?;
        }

        for word in words {
            write!(f, " {word}")?;
        }

        Ok(())
    }
}

use crate::model::placement::WordPlacement;

/// The full ordered collection returned by one fetch, newest-first.
///
/// A snapshot is replaced wholesale, never patched.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    words: Vec<WordPlacement>,
}

impl Snapshot {
    /// Wrap entries that are already in newest-first order.
    pub fn new(words: Vec<WordPlacement>) -> Self {
        Self { words }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn as_slice(&self) -> &[WordPlacement] {
        &self.words
    }

    pub fn into_vec(self) -> Vec<WordPlacement> {
        self.words
    }

    /// Entries in fetch order (newest first).
    pub fn iter(&self) -> std::slice::Iter<'_, WordPlacement> {
        self.words.iter()
    }

    /// Entries in creation order (oldest first).
    pub fn chronological(&self) -> impl DoubleEndedIterator<Item = &WordPlacement> + '_ {
        self.words.iter().rev()
    }

    pub fn newest(&self) -> Option<&WordPlacement> {
        self.words.first()
    }

    /// Most-recent-entry marker used by reconciliation.
    pub fn marker(&self) -> Option<u64> {
        self.newest().and_then(|w| w.timestamp)
    }

    /// Case-insensitive substring filter on text, order preserved.
    pub fn filter(&self, query: &str) -> Vec<&WordPlacement> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.words.iter().collect();
        }
        self.words
            .iter()
            .filter(|w| w.text.to_lowercase().contains(&needle))
            .collect()
    }
}

impl From<Vec<WordPlacement>> for Snapshot {
    fn from(words: Vec<WordPlacement>) -> Self {
        Self::new(words)
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a WordPlacement;
    type IntoIter = std::slice::Iter<'a, WordPlacement>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/snapshot.rs"]
mod tests;

use serde::Serialize;

/// Recent successful lookups, most recent first
///
/// No two entries compare equal ignoring case, and the list never grows
/// past its capacity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SearchHistory {
    entries: Vec<String>,
    #[serde(skip)]
    capacity: usize,
}

impl SearchHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Move `city` to the front, replacing any entry that differs only in case.
    pub fn record(&mut self, city: &str) {
        let key = city.to_lowercase();
        self.entries.retain(|existing| existing.to_lowercase() != key);
        self.entries.insert(0, city.to_string());
        self.entries.truncate(self.capacity);
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Value → count pairs ordered by count descending, ties in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frequencies(Vec<(String, usize)>);

impl Frequencies {
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(k, n)| (k.as_str(), *n))
    }

    pub fn get(&self, key: &str) -> Option<usize> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, n)| *n)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.0.iter().map(|(_, n)| n).sum()
    }

    pub fn into_vec(self) -> Vec<(String, usize)> {
        self.0
    }
}

/// Keeps the given order.
impl FromIterator<(String, usize)> for Frequencies {
    fn from_iter<I: IntoIterator<Item = (String, usize)>>(iter: I) -> Self {
        Frequencies(iter.into_iter().collect())
    }
}

impl Serialize for Frequencies {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, count) in &self.0 {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}

/// Multiset that remembers the order in which values first appeared.
#[derive(Debug, Default)]
pub struct FrequencyCounter {
    counts: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl FrequencyCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, value: &str) {
        match self.index.get(value) {
            Some(&i) => self.counts[i].1 += 1,
            None => {
                self.index.insert(value.to_string(), self.counts.len());
                self.counts.push((value.to_string(), 1));
            }
        }
    }

    /// The `limit` most common values (all when `None`).
    pub fn most_common(self, limit: Option<usize>) -> Frequencies {
        let mut counts = self.counts;
        // stable: equal counts keep first-seen order
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        if let Some(n) = limit {
            counts.truncate(n);
        }
        Frequencies(counts)
    }
}

impl<'a> FromIterator<&'a str> for FrequencyCounter {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut counter = FrequencyCounter::new();
        for value in iter {
            counter.add(value);
        }
        counter
    }
}

use std::collections::HashMap;
use std::hash::Hash;

/// Frequency counter that remembers first-seen key order.
///
/// Ties in [`Tally::most_common`] resolve to the key that was seen first,
/// and [`Tally::sorted_desc`] is a stable sort over that order.
#[derive(Debug, Clone)]
pub struct Tally<K> {
    entries: Vec<(K, usize)>,
    index: HashMap<K, usize>,
}

impl<K> Default for Tally<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> Tally<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: K) {
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen order.
    pub fn entries(&self) -> &[(K, usize)] {
        &self.entries
    }

    /// Highest-count entry; earliest key wins on ties.
    pub fn most_common(&self) -> Option<&(K, usize)> {
        self.entries
            .iter()
            .fold(None, |best: Option<&(K, usize)>, entry| match best {
                Some(b) if b.1 >= entry.1 => Some(b),
                _ => Some(entry),
            })
    }

    /// How many distinct keys share the highest count.
    pub fn tied_at_max(&self) -> usize {
        match self.most_common() {
            Some(&(_, max)) => self.entries.iter().filter(|(_, c)| *c == max).count(),
            None => 0,
        }
    }

    /// Entries by count descending, first-seen order among equal counts.
    pub fn sorted_desc(&self) -> Vec<(K, usize)> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
    }
}

impl<K: Eq + Hash + Clone> FromIterator<K> for Tally<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tally = Tally::new();
        for key in iter {
            tally.add(key);
        }
        tally
    }
}

/// Hashable key for an `f64`; `-0.0` and `0.0` share a key.
pub(crate) fn float_key(v: f64) -> u64 {
    if v == 0.0 {
        0.0f64.to_bits()
    } else {
        v.to_bits()
    }
}

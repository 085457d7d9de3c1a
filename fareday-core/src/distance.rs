use std::collections::HashMap;

/// Great-circle distances between airport pairs, keyed on the unordered pair.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct AirportDistanceTable {
    distances: HashMap<(String, String), u32>,
}

fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

impl AirportDistanceTable {
    /// Build from `(departure, arrival, km)` rows. A later row for the same
    /// pair (in either direction) replaces an earlier one.
    pub fn from_rows<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = (S, S, u32)>,
        S: AsRef<str>,
    {
        let mut distances = HashMap::new();
        for (dep, arr, km) in rows {
            distances.insert(pair_key(dep.as_ref(), arr.as_ref()), km);
        }
        Self { distances }
    }

    /// Distance in km, symmetric in its arguments. Same airport is always 0.
    pub fn distance(&self, a: &str, b: &str) -> Option<u32> {
        if a == b {
            return Some(0);
        }
        self.distances.get(&pair_key(a, b)).copied()
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}

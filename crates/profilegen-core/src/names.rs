use std::collections::{HashMap, HashSet};

/// Canonical form used for every case-insensitive repository name comparison.
///
/// # Examples
///
/// ```
/// use profilegen_core::names::normalize_name;
///
/// assert_eq!(normalize_name("  My-Repo "), "my-repo");
/// ```
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Repository names to leave out of the profile.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    names: HashSet<String>,
}

impl ExclusionSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|name| normalize_name(name.as_ref()))
                .collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&normalize_name(name))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Caller-specified display order; earlier entries come first.
#[derive(Debug, Clone, Default)]
pub struct PriorityOrder {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl PriorityOrder {
    /// Builds the order. A name listed twice keeps its first position.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut order = Self::default();
        for name in names {
            let key = normalize_name(name.as_ref());
            if !order.index.contains_key(&key) {
                order.index.insert(key, order.names.len());
                order.names.push(name.as_ref().trim().to_string());
            }
        }
        order
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(&normalize_name(name)).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

use ahash::AHasher;
use hashbrown::HashMap;
use std::hash::BuildHasherDefault;

/// Caller input before normalization: either bare keys (implicit hashes
/// `0..K-1`) or explicit `(key, desired_hash)` pairs.
#[derive(Debug, Clone)]
pub enum Intake {
    Keys(Vec<String>),
    Pairs(Vec<(String, u64)>),
}

impl Intake {
    fn into_pairs(self) -> Vec<(String, u64)> {
        match self {
            Intake::Keys(keys) => keys
                .into_iter()
                .enumerate()
                .map(|(i, k)| (k, i as u64))
                .collect(),
            Intake::Pairs(pairs) => pairs,
        }
    }
}

/// Normalized `{key: desired_hash}` mapping, keys unique, built once per
/// `generate_hash`/`generate_code` call.
///
/// Uses `hashbrown`'s map keyed with `ahash` — the crate's own
/// `Cargo.toml` already named both dependencies for exactly this kind of
/// hot lookup table.
#[derive(Debug)]
pub struct KeyMap {
    order: Vec<String>,
    hashes: HashMap<String, u64, BuildHasherDefault<AHasher>>,
}

impl KeyMap {
    pub fn from_intake(intake: Intake) -> Self {
        let pairs = intake.into_pairs();
        let total = pairs.len();

        let mut order: Vec<String> = Vec::new();
        let mut hashes: HashMap<String, u64, BuildHasherDefault<AHasher>> = HashMap::default();
        for (key, hashval) in pairs {
            if !hashes.contains_key(&key) {
                order.push(key.clone());
            }
            hashes.insert(key, hashval);
        }

        if hashes.len() < total {
            log::warn!("input contains duplicate keys; later occurrence's desired hash wins");
        }
        let distinct_hashes: hashbrown::HashSet<u64> = hashes.values().copied().collect();
        if distinct_hashes.len() < total {
            log::warn!("input contains duplicate desired hash values");
        }

        Self { order, hashes }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Keys in first-seen order among the surviving (deduplicated) set.
    pub fn ordered_keys(&self) -> &[String] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.order.iter().map(move |k| (k.as_str(), self.hashes[k]))
    }

    pub fn max_hash(&self) -> Option<u64> {
        self.hashes.values().copied().max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_get_implicit_sequential_hashes() {
        let km = KeyMap::from_intake(Intake::Keys(vec!["a".into(), "b".into(), "c".into()]));
        let collected: Vec<(String, u64)> = km.iter().map(|(k, h)| (k.to_string(), h)).collect();
        assert_eq!(
            collected,
            vec![("a".to_string(), 0), ("b".to_string(), 1), ("c".to_string(), 2)]
        );
    }

    #[test]
    fn duplicate_key_last_occurrence_wins() {
        let km = KeyMap::from_intake(Intake::Pairs(vec![
            ("a".into(), 0),
            ("b".into(), 1),
            ("a".into(), 7),
        ]));
        assert_eq!(km.len(), 2);
        let collected: HashMap<String, u64, BuildHasherDefault<AHasher>> =
            km.iter().map(|(k, h)| (k.to_string(), h)).collect();
        assert_eq!(collected["a"], 7);
    }

    #[test]
    fn empty_intake_is_empty_keymap() {
        let km = KeyMap::from_intake(Intake::Keys(vec![]));
        assert!(km.is_empty());
        assert_eq!(km.max_hash(), None);
    }
}

use crate::config::FormatOptions;
use crate::format::format_seq;
use rand::RngCore;

/// Alphabet `StrSaltHash` draws its salt bytes from. Exposed publicly so
/// callers generating test keys can draw from the same alphabet as the
/// salt.
pub const ANUM_CHARS: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// A single, already-salted hash function `key -> [0, n)`.
///
/// Pure given its salt: constructing one fixes its behavior for the
/// lifetime of the trial that created it.
pub trait HashFn: std::fmt::Debug {
    fn n(&self) -> u64;
    fn evaluate(&self, key: &str) -> u64;
    /// Salt length, or `None` for a family whose salt is a single scalar.
    fn salt_len(&self) -> Option<usize>;
    /// Renders the salt the way the emitter's `$S1`/`$S2` placeholders expect it.
    fn format_salt(&self, opts: &FormatOptions) -> String;
}

/// Constructor for a family of statistically independent `HashFn`s, plus the
/// textual fragment that reproduces the family's evaluator in emitted code.
pub trait HashFamily {
    /// Builds a fresh, randomly salted hash function over `[0, n)`. `keys`
    /// is the full key set for the current trial, used to size any
    /// per-character salt up front (construction-time sizing, per the
    /// "grown lazily" contract: any sizing that is large enough for every
    /// key in this call is acceptable).
    fn generate(&self, n: u64, keys: &[String], rng: &mut dyn RngCore) -> Box<dyn HashFn>;

    fn name(&self) -> &'static str;

    /// Template fragment composed into `builtin_template`.
    fn template_fragment(&self) -> &'static str;
}

/// Salt: byte string as long as the longest key (in bytes) in the current
/// key set. Evaluator: `sum(salt[i] XOR key_bytes[i]) mod n`.
#[derive(Debug, Clone)]
pub struct StrSaltHash {
    n: u64,
    salt: Vec<u8>,
}

impl HashFn for StrSaltHash {
    fn n(&self) -> u64 {
        self.n
    }

    fn evaluate(&self, key: &str) -> u64 {
        let bytes = key.as_bytes();
        assert!(
            bytes.len() <= self.salt.len(),
            "StrSaltHash: key {key:?} ({} bytes) is longer than the salt sized for this trial ({} bytes)",
            bytes.len(),
            self.salt.len()
        );
        let mut acc: u64 = 0;
        for (i, &b) in bytes.iter().enumerate() {
            acc = acc.wrapping_add((self.salt[i] ^ b) as u64);
        }
        acc % self.n.max(1)
    }

    fn salt_len(&self) -> Option<usize> {
        Some(self.salt.len())
    }

    fn format_salt(&self, opts: &FormatOptions) -> String {
        format_seq(&self.salt, opts, false)
    }
}

#[derive(Debug, Default)]
pub struct StrSaltHashFamily;

impl HashFamily for StrSaltHashFamily {
    fn generate(&self, n: u64, keys: &[String], rng: &mut dyn RngCore) -> Box<dyn HashFn> {
        let max_len = keys.iter().map(|k| k.len()).max().unwrap_or(0);
        let salt: Vec<u8> = (0..max_len)
            .map(|_| ANUM_CHARS[(rng.next_u32() as usize) % ANUM_CHARS.len()])
            .collect();
        Box::new(StrSaltHash { n, salt })
    }

    fn name(&self) -> &'static str {
        "StrSaltHash"
    }

    fn template_fragment(&self) -> &'static str {
        "S1 = [$S1]\n\
         S2 = [$S2]\n\
         \n\
         def xor_sum_hash(key, salt):\n\
         \x20\x20\x20\x20acc = 0\n\
         \x20\x20\x20\x20for i, b in enumerate(key.encode('utf-8')):\n\
         \x20\x20\x20\x20\x20\x20\x20\x20acc += salt[i] ^ b\n\
         \x20\x20\x20\x20return acc % $NG\n\
         \n\
         def perfect_hash(key):\n\
         \x20\x20\x20\x20return (G[xor_sum_hash(key, S1)] + G[xor_sum_hash(key, S2)]) % $NG\n"
    }
}

/// Salt: sequence of integers in `[0, n)`, one per Unicode scalar value in
/// the longest key. Evaluator: `sum(salt[i] * code_point(key[i])) mod n`.
#[derive(Debug, Clone)]
pub struct IntSaltHash {
    n: u64,
    salt: Vec<u64>,
}

impl HashFn for IntSaltHash {
    fn n(&self) -> u64 {
        self.n
    }

    fn evaluate(&self, key: &str) -> u64 {
        let chars: Vec<char> = key.chars().collect();
        assert!(
            chars.len() <= self.salt.len(),
            "IntSaltHash: key {key:?} ({} chars) is longer than the salt sized for this trial ({} chars)",
            chars.len(),
            self.salt.len()
        );
        let mut acc: u64 = 0;
        for (i, c) in chars.iter().enumerate() {
            acc = acc.wrapping_add(self.salt[i].wrapping_mul(*c as u64));
        }
        acc % self.n.max(1)
    }

    fn salt_len(&self) -> Option<usize> {
        Some(self.salt.len())
    }

    fn format_salt(&self, opts: &FormatOptions) -> String {
        format_seq(&self.salt, opts, false)
    }
}

#[derive(Debug, Default)]
pub struct IntSaltHashFamily;

impl HashFamily for IntSaltHashFamily {
    fn generate(&self, n: u64, keys: &[String], rng: &mut dyn RngCore) -> Box<dyn HashFn> {
        let max_len = keys.iter().map(|k| k.chars().count()).max().unwrap_or(0);
        let bound = n.max(1);
        let salt: Vec<u64> = (0..max_len).map(|_| rng.next_u64() % bound).collect();
        Box::new(IntSaltHash { n, salt })
    }

    fn name(&self) -> &'static str {
        "IntSaltHash"
    }

    fn template_fragment(&self) -> &'static str {
        "S1 = [$S1]\n\
         S2 = [$S2]\n\
         \n\
         def code_point_hash(key, salt):\n\
         \x20\x20\x20\x20return sum(salt[i] * ord(c) for i, c in enumerate(key)) % $NG\n\
         \n\
         def perfect_hash(key):\n\
         \x20\x20\x20\x20return (G[code_point_hash(key, S1)] + G[code_point_hash(key, S2)]) % $NG\n"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn str_salt_len_matches_longest_key_bytes() {
        let family = StrSaltHashFamily;
        let mut rng = StdRng::seed_from_u64(1);
        let keys = vec!["Ilan".to_string(), "Arvin".to_string()];
        let f = family.generate(10, &keys, &mut rng);
        assert_eq!(f.salt_len(), Some(5));
    }

    #[test]
    fn int_salt_len_matches_longest_key_chars() {
        let family = IntSaltHashFamily;
        let mut rng = StdRng::seed_from_u64(1);
        let keys = vec!["\u{D55C}".to_string(), "A".to_string()];
        let f = family.generate(10, &keys, &mut rng);
        assert_eq!(f.salt_len(), Some(1));
    }

    #[test]
    fn evaluate_stays_in_range() {
        let family = IntSaltHashFamily;
        let mut rng = StdRng::seed_from_u64(7);
        let keys = vec!["foo".to_string(), "bar".to_string(), "baz".to_string()];
        let f = family.generate(7, &keys, &mut rng);
        for k in &keys {
            assert!(f.evaluate(k) < 7);
        }
    }

    #[test]
    fn two_calls_draw_distinct_salts() {
        let family = StrSaltHashFamily;
        let mut rng = StdRng::seed_from_u64(3);
        let keys = vec!["abcdefgh".to_string()];
        let opts = FormatOptions::default();
        let f1 = family.generate(16, &keys, &mut rng);
        let f2 = family.generate(16, &keys, &mut rng);
        assert_ne!(f1.format_salt(&opts), f2.format_salt(&opts));
    }
}

use crate::config::FormatOptions;
use crate::emitter::{builtin_template, substitute};
use crate::error::Error;
use crate::format::{format_scalar, format_seq};
use crate::generator::GeneratedHash;
use crate::hash::{HashFamily, IntSaltHashFamily, StrSaltHashFamily};
use crate::intake::KeyMap;
use std::collections::HashMap as StdHashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A snapshot of a successful construction's parameters — N, G, the two
/// rendered salts, and the keymap's keys/hashes — persistable so a caller
/// can re-emit code for other templates without rerunning the generator.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedParams {
    pub family_name: String,
    pub n: u64,
    pub g: Vec<u64>,
    pub salt1: String,
    pub salt2: String,
    pub salt_len: Option<usize>,
    pub keys: Vec<String>,
    pub hashes: Vec<u64>,
}

impl GeneratedParams {
    pub fn from_generated(
        family: &dyn HashFamily,
        keymap: &KeyMap,
        generated: &GeneratedHash,
        format_opts: &FormatOptions,
    ) -> Self {
        Self {
            family_name: family.name().to_string(),
            n: generated.f1.n(),
            g: generated.g.clone(),
            salt1: generated.f1.format_salt(format_opts),
            salt2: generated.f2.format_salt(format_opts),
            salt_len: generated.f1.salt_len(),
            keys: keymap.ordered_keys().to_vec(),
            hashes: keymap.iter().map(|(_, h)| h).collect(),
        }
    }

    /// Re-emits code from this snapshot without rerunning the generator.
    /// `template` falls back to the built-in template for `family_name`
    /// when `None`; that fallback only recognizes the crate's own built-in
    /// hash family names, so a custom `HashFamily` must pass its own
    /// template explicitly.
    pub fn emit(&self, template: Option<&str>, format_opts: &FormatOptions) -> Result<String, Error> {
        let owned_template;
        let template: &str = match template {
            Some(t) => t,
            None => {
                let family: Box<dyn HashFamily> = match self.family_name.as_str() {
                    "StrSaltHash" => Box::new(StrSaltHashFamily),
                    "IntSaltHash" => Box::new(IntSaltHashFamily),
                    other => {
                        return Err(Error::Template(format!(
                            "no built-in template for hash family {other:?}; supply one explicitly"
                        )));
                    }
                };
                owned_template = builtin_template(family.as_ref());
                &owned_template
            }
        };

        let ns = match self.salt_len {
            Some(len) => len.to_string(),
            None => "None".to_string(),
        };

        let mut vars: StdHashMap<&str, String> = StdHashMap::new();
        vars.insert("G", format_seq(&self.g, format_opts, false));
        vars.insert("NG", format_scalar(self.n));
        vars.insert("S1", self.salt1.clone());
        vars.insert("S2", self.salt2.clone());
        vars.insert("NS", ns);
        vars.insert("K", format_seq(&self.keys, format_opts, true));
        vars.insert("H", format_seq(&self.hashes, format_opts, false));
        vars.insert("NK", format_scalar(self.keys.len()));

        substitute(template, &vars)
    }

    #[cfg(feature = "serde")]
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        Ok(bincode::serialize(self)?)
    }

    #[cfg(feature = "serde")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Ok(bincode::deserialize(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildOptions;
    use crate::generator::generate_hash;
    use crate::hash::StrSaltHashFamily;
    use crate::intake::Intake;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn emit_reproduces_generate_code_output() {
        let family = StrSaltHashFamily;
        let km = KeyMap::from_intake(Intake::Keys(vec!["a".into(), "b".into(), "c".into()]));
        let mut rng = StdRng::seed_from_u64(5);
        let generated = generate_hash(&km, &family, &BuildOptions::default(), &mut rng).unwrap();
        let format_opts = FormatOptions::default();
        let params = GeneratedParams::from_generated(&family, &km, &generated, &format_opts);

        let emitted = params.emit(None, &format_opts).unwrap();
        assert!(emitted.contains("def perfect_hash(key):"));
        assert!(emitted.contains("\"a\""));
        assert!(!emitted.contains('$'));
    }

    #[test]
    fn emit_with_unknown_family_requires_explicit_template() {
        let mut params_like = GeneratedParams {
            family_name: "SomeCustomFamily".to_string(),
            n: 1,
            g: vec![0],
            salt1: "[]".to_string(),
            salt2: "[]".to_string(),
            salt_len: None,
            keys: vec![],
            hashes: vec![],
        };
        let err = params_like.emit(None, &FormatOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Template(_)));

        params_like.family_name = "StrSaltHash".to_string();
        assert!(params_like.emit(None, &FormatOptions::default()).is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn round_trips_through_bincode() {
        let family = StrSaltHashFamily;
        let km = KeyMap::from_intake(Intake::Keys(vec!["a".into(), "b".into(), "c".into()]));
        let mut rng = StdRng::seed_from_u64(5);
        let generated = generate_hash(&km, &family, &BuildOptions::default(), &mut rng).unwrap();
        let params = GeneratedParams::from_generated(&family, &km, &generated, &FormatOptions::default());

        let bytes = params.to_bytes().unwrap();
        let restored = GeneratedParams::from_bytes(&bytes).unwrap();
        assert_eq!(params, restored);
    }
}

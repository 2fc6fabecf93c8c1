use crate::config::{BuildOptions, FormatOptions};
use crate::error::Error;
use crate::format::{format_scalar, format_seq};
use crate::generator::generate_hash;
use crate::hash::HashFamily;
use crate::intake::{Intake, KeyMap};
use rand::RngCore;
use std::collections::HashMap as StdHashMap;

const PRELUDE: &str = "# Generated by mphf-forge. Do not edit by hand.\n\
G = [$G]\n\
\n";

const POSTLUDE: &str = "\n\
if __name__ == '__main__':\n\
\x20\x20\x20\x20keys = [$K]\n\
\x20\x20\x20\x20hashes = [$H]\n\
\x20\x20\x20\x20for key, expected in zip(keys, hashes):\n\
\x20\x20\x20\x20\x20\x20\x20\x20assert perfect_hash(key) == expected\n\
\x20\x20\x20\x20print('OK, verified $NK keys')\n";

/// Composes the fixed prelude, a hash family's template fragment, and the
/// sanity-check postlude into a complete, substitutable template.
pub fn builtin_template(family: &dyn HashFamily) -> String {
    format!("{PRELUDE}{}{POSTLUDE}", family.template_fragment())
}

/// Normalizes input to a keymap, runs the generator, and substitutes the
/// discovered parameters into `template` (or the built-in template for
/// `family` when none is supplied).
pub fn generate_code(
    intake: Intake,
    family: &dyn HashFamily,
    template: Option<&str>,
    format_opts: &FormatOptions,
    build_opts: &BuildOptions,
    rng: &mut dyn RngCore,
) -> Result<String, Error> {
    let keymap = KeyMap::from_intake(intake);
    let generated = generate_hash(&keymap, family, build_opts, rng)?;

    let n = generated.f1.n();
    assert_eq!(n, generated.f2.n(), "internal invariant violation: f1.n != f2.n");
    assert_eq!(
        n as usize,
        generated.g.len(),
        "internal invariant violation: f1.n != len(G)"
    );
    assert_eq!(
        generated.f1.salt_len(),
        generated.f2.salt_len(),
        "internal invariant violation: f1 and f2 salts have different lengths"
    );

    let owned_template;
    let template: &str = match template {
        Some(t) => t,
        None => {
            owned_template = builtin_template(family);
            &owned_template
        }
    };

    let ns = match generated.f1.salt_len() {
        Some(len) => len.to_string(),
        None => "None".to_string(),
    };

    let keys: Vec<&str> = keymap.ordered_keys().iter().map(String::as_str).collect();
    let hashes: Vec<u64> = keymap.iter().map(|(_, h)| h).collect();

    let mut vars: StdHashMap<&str, String> = StdHashMap::new();
    vars.insert("G", format_seq(&generated.g, format_opts, false));
    vars.insert("NG", format_scalar(n));
    vars.insert("S1", generated.f1.format_salt(format_opts));
    vars.insert("S2", generated.f2.format_salt(format_opts));
    vars.insert("NS", ns);
    vars.insert("K", format_seq(&keys, format_opts, true));
    vars.insert("H", format_seq(&hashes, format_opts, false));
    vars.insert("NK", format_scalar(keymap.len()));

    substitute(template, &vars)
}

/// Simple `$`-placeholder substitution: `$$` escapes a literal `$`, every
/// other `$name` must be a known variable. Deliberately not a general
/// template engine: there is no conditional or loop syntax, only flat
/// substitution.
pub(crate) fn substitute(template: &str, vars: &StdHashMap<&str, String>) -> Result<String, Error> {
    let bytes = template.as_bytes();
    let mut out = String::with_capacity(template.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'$' {
            let ch_len = template[i..].chars().next().unwrap().len_utf8();
            out.push_str(&template[i..i + ch_len]);
            i += ch_len;
            continue;
        }

        if i + 1 < bytes.len() && bytes[i + 1] == b'$' {
            out.push('$');
            i += 2;
            continue;
        }

        let start = i + 1;
        let mut end = start;
        while end < bytes.len() && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_') {
            end += 1;
        }
        if end == start {
            return Err(Error::Template(format!(
                "bare '$' not followed by an identifier or '$' at byte offset {i}"
            )));
        }

        let name = &template[start..end];
        match vars.get(name) {
            Some(value) => out.push_str(value),
            None => return Err(Error::Template(format!("unknown placeholder ${name}"))),
        }
        i = end;
    }
    Ok(out)
}

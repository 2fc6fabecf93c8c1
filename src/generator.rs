use crate::config::BuildOptions;
use crate::error::Error;
use crate::graph::Graph;
use crate::hash::{HashFamily, HashFn};
use crate::intake::KeyMap;
use rand::RngCore;

/// Result of a successful `generate_hash` call: two independent hash
/// functions and the vertex-value table that together form the MPHF.
pub struct GeneratedHash {
    pub f1: Box<dyn HashFn>,
    pub f2: Box<dyn HashFn>,
    pub g: Vec<u64>,
}

/// Runs the randomized retry loop: pick f1/f2, build a graph, attempt
/// vertex assignment; on failure discard and retry, growing N every
/// `trials_before_grow` failures, until `hard_trial_cap` is reached.
pub fn generate_hash(
    keymap: &KeyMap,
    family: &dyn HashFamily,
    opts: &BuildOptions,
    rng: &mut dyn RngCore,
) -> Result<GeneratedHash, Error> {
    let mut n = initial_n(keymap);
    let keys: Vec<String> = keymap.ordered_keys().to_vec();

    let mut trial: u64 = 0;
    loop {
        // Every `trials_before_grow`-th trial index (after the first block)
        // grows N and implicitly resets the per-block failure count, since
        // the next block starts counting from this same `trial` value.
        if trial > 0 && trial % opts.trials_before_grow as u64 == 0 {
            n = grow(n, opts.growth_factor);
            log::debug!("generator: grew N to {n} after {trial} total trial(s)");
        }

        if trial >= opts.hard_trial_cap {
            return Err(Error::TooManyIterations { trials: trial, n });
        }
        trial += 1;
        log::trace!("generator: trial {trial} at N={n}");

        let f1 = family.generate(n, &keys, rng);
        let f2 = family.generate(n, &keys, rng);

        let mut graph = Graph::new(n);
        for (key, hashval) in keymap.iter() {
            graph.connect(f1.evaluate(key) as u32, f2.evaluate(key) as u32, hashval);
        }

        if graph.assign_vertex_values() {
            let g: Vec<u64> = graph.vertex_values().iter().map(|&v| v as u64).collect();
            verify(keymap, f1.as_ref(), f2.as_ref(), &g);
            log::debug!("generator: acyclic graph found after {trial} trial(s), N={n}");
            return Ok(GeneratedHash { f1, f2, g });
        }
    }
}

fn initial_n(keymap: &KeyMap) -> u64 {
    match keymap.max_hash() {
        Some(max) => (max + 1).max(1),
        None => 1,
    }
}

fn grow(n: u64, growth_factor: f64) -> u64 {
    (n + 1).max((growth_factor * n as f64).floor() as u64)
}

/// Sanity-checks the generated hash before handing it to the emitter.
/// Failure here means the construction is internally inconsistent — a bug,
/// not a condition callers retry from.
fn verify(keymap: &KeyMap, f1: &dyn HashFn, f2: &dyn HashFn, g: &[u64]) {
    let n = g.len() as u64;
    for (key, hashval) in keymap.iter() {
        let computed = (g[f1.evaluate(key) as usize] + g[f2.evaluate(key) as usize]) % n.max(1);
        assert_eq!(
            computed, hashval,
            "internal invariant violation: key {key:?} hashes to {computed}, expected {hashval}"
        );
    }
}

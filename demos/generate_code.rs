//! Builds an MPHF over a large random key set and times key generation
//! and construction against a bulk key list.

use mphf_forge::{BuildOptions, FormatOptions, IntSaltHashFamily, Intake, generate_code};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::time::Instant;

const N_KEYS: usize = 100_000;
const GEN_SEED: u64 = 42;

fn main() {
    println!("--- mphf_forge bulk build ---");
    println!("n = {N_KEYS}");

    let t0 = Instant::now();
    let keys = gen_unique_keys(N_KEYS, GEN_SEED);
    println!("gen:    {:>8.3} s", t0.elapsed().as_secs_f64());

    let family = IntSaltHashFamily;
    let mut rng = StdRng::seed_from_u64(GEN_SEED);

    let t1 = Instant::now();
    let code = generate_code(
        Intake::Keys(keys),
        &family,
        None,
        &FormatOptions::default(),
        &BuildOptions::default(),
        &mut rng,
    )
    .expect("construction should succeed for well-behaved random keys");
    let build_s = t1.elapsed().as_secs_f64();
    println!(
        "build:  {:>8.3} s   ({:.1} k keys/s)",
        build_s,
        N_KEYS as f64 / build_s / 1e3
    );
    println!("emitted {} bytes of code", code.len());
}

fn gen_unique_keys(n: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut seen = HashSet::with_capacity(n);
    let mut keys = Vec::with_capacity(n);
    while keys.len() < n {
        let len = rng.gen_range(4..20);
        let key: String = (0..len)
            .map(|_| (b'a' + rng.gen_range(0..26)) as char)
            .collect();
        if seen.insert(key.clone()) {
            keys.push(key);
        }
    }
    keys
}

//! mphf_forge — minimal perfect hash function generator.
//!
//! Implements the Czech-Havas-Majewski construction: draw two independent
//! salted hash functions over a key set, build the graph they induce, and
//! look for an acyclic orientation via a single DFS. On success, the vertex
//! values that DFS produces are exactly the `G` table a two-probe perfect
//! hash needs. On failure (a cycle), reroll the salts and, periodically,
//! grow the table.
//!
//! The crate has two halves: construction (`graph`, `hash`, `generator`)
//! turns a key set into `(f1, f2, G)`, and emission (`format`, `emitter`)
//! turns that triple into source code in another language via a small
//! `$`-placeholder template. `reader` and `intake` handle getting keys in;
//! `params` handles persisting a construction's output without rerunning it.

mod config;
mod emitter;
mod error;
mod format;
mod generator;
mod graph;
mod hash;
mod intake;
mod params;
mod reader;
mod util;

pub use config::{BuildOptions, FormatOptions};
pub use emitter::{builtin_template, generate_code};
pub use error::{Error, Result};
pub use generator::{GeneratedHash, generate_hash};
pub use hash::{ANUM_CHARS, HashFamily, HashFn, IntSaltHash, IntSaltHashFamily, StrSaltHash, StrSaltHashFamily};
pub use intake::{Intake, KeyMap};
pub use params::GeneratedParams;
pub use reader::{ReaderOptions, read_keys_file};

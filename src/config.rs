/// Parameters controlling the acyclic-graph retry loop: when to grow `N`
/// and how long to keep retrying before giving up.
#[derive(Debug, Clone, Copy)]
pub struct BuildOptions {
    /// Failed trials at the current N before N is grown.
    pub trials_before_grow: u32,
    /// Growth multiplier applied to N: `N <- max(N+1, floor(growth_factor * N))`.
    pub growth_factor: f64,
    /// Total trials (across all growth events) before giving up with `TooManyIterations`.
    pub hard_trial_cap: u64,
}

impl Default for BuildOptions {
    fn default() -> Self {
        let trials_before_grow = 5;
        Self {
            trials_before_grow,
            growth_factor: 1.05,
            hard_trial_cap: 5 * trials_before_grow as u64,
        }
    }
}

/// Parameters controlling how parameter lists are rendered into emitted code.
#[derive(Debug, Clone)]
pub struct FormatOptions {
    pub width: usize,
    pub indent: usize,
    pub delimiter: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            width: 76,
            indent: 4,
            delimiter: ", ".to_string(),
        }
    }
}

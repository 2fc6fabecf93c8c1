//! `mphf-forge` — CLI front-end for the `mphf_forge` library.
//!
//! Reads a keys file (and, optionally, a template file), runs the
//! Czech-Havas-Majewski construction, and writes the emitted code to a file
//! or to standard output. Everything algorithmic lives in the library;
//! this binary is intake, wiring, and exit codes.

use clap::Parser;
use log::LevelFilter;
use mphf_forge::{
    BuildOptions, Error, FormatOptions, IntSaltHashFamily, Intake, ReaderOptions, StrSaltHashFamily,
    builtin_template, generate_code, read_keys_file,
};
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "mphf-forge", about = "Minimal perfect hash function generator")]
struct Cli {
    /// Keys file: one key per record, comments and columns per --comment/--splitby/--keycol.
    keys_file: Option<PathBuf>,

    /// Template file; the built-in template for --hft is used when omitted.
    template_file: Option<PathBuf>,

    #[arg(long, default_value = ", ")]
    delimiter: String,

    #[arg(long, default_value_t = 4)]
    indent: usize,

    #[arg(long, default_value_t = 76)]
    width: usize,

    #[arg(long, default_value = "#")]
    comment: String,

    #[arg(long, default_value = ",")]
    splitby: String,

    #[arg(long, default_value_t = 1)]
    keycol: usize,

    #[arg(long, default_value_t = 5)]
    trials: u32,

    /// Hash family: 1 = StrSaltHash, 2 = IntSaltHash.
    #[arg(long, default_value_t = 2)]
    hft: u8,

    /// Output path, or the literal `std` (stdout) or `no` (suppress output).
    #[arg(short, long)]
    output: Option<String>,

    /// Pipe the emitted code through an external interpreter for self-check.
    #[arg(short, long)]
    execute: bool,

    #[arg(short, long)]
    verbose: bool,

    /// Run the internal self-test suite instead of generating anything.
    #[arg(long)]
    test: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut builder = env_logger::Builder::new();
    builder.filter_level(if cli.verbose { LevelFilter::Debug } else { LevelFilter::Warn });
    builder.init();

    if cli.test {
        return match run_self_test() {
            Ok(()) => {
                println!("OK, self-test passed");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("self-test failed: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let Some(keys_file) = cli.keys_file.clone() else {
        eprintln!("error: KEYS_FILE is required unless --test is given");
        return ExitCode::FAILURE;
    };

    match run(&cli, &keys_file) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, keys_file: &Path) -> Result<(), Error> {
    let reader_opts = ReaderOptions {
        comment: cli.comment.clone(),
        splitby: cli.splitby.clone(),
        keycol: cli.keycol,
    };
    let pairs = read_keys_file(keys_file, &reader_opts)?;
    log::debug!("read {} key(s) from {}", pairs.len(), keys_file.display());

    let format_opts = FormatOptions {
        width: cli.width,
        indent: cli.indent,
        delimiter: cli.delimiter.clone(),
    };
    let mut build_opts = BuildOptions::default();
    build_opts.trials_before_grow = cli.trials;
    build_opts.hard_trial_cap = 5 * cli.trials as u64;

    let template_text = cli
        .template_file
        .as_ref()
        .map(std::fs::read_to_string)
        .transpose()?;

    let mut rng = rand::rngs::StdRng::from_entropy();

    let code = if cli.hft == 1 {
        let family = StrSaltHashFamily;
        generate_code(
            Intake::Pairs(pairs),
            &family,
            template_text.as_deref(),
            &format_opts,
            &build_opts,
            &mut rng,
        )?
    } else {
        let family = IntSaltHashFamily;
        generate_code(
            Intake::Pairs(pairs),
            &family,
            template_text.as_deref(),
            &format_opts,
            &build_opts,
            &mut rng,
        )?
    };

    match resolve_output(cli) {
        OutputTarget::File(path) => {
            std::fs::write(&path, &code)?;
            log::debug!("wrote emitted code to {path}");
            if cli.execute {
                execute(&path)?;
            }
        }
        OutputTarget::Stdout => {
            print!("{code}");
            if cli.execute {
                eprintln!("warning: --execute has no effect when writing to standard output");
            }
        }
        OutputTarget::Suppressed => {
            if cli.execute {
                eprintln!("warning: --execute has no effect when output is suppressed (--output no)");
            }
        }
    }

    Ok(())
}

/// Where emitted code goes: `-o`/`--output` accepts a file path, or the
/// literal `std` (stdout) or `no` (suppressed) per spec. Omitting `-o`
/// writes to the template path with `tmpl` replaced by `code`, or to
/// stdout when no template file was given.
enum OutputTarget {
    File(String),
    Stdout,
    Suppressed,
}

fn resolve_output(cli: &Cli) -> OutputTarget {
    match cli.output.as_deref() {
        Some("std") => OutputTarget::Stdout,
        Some("no") => OutputTarget::Suppressed,
        Some(path) => OutputTarget::File(path.to_string()),
        None => match &cli.template_file {
            Some(t) => OutputTarget::File(t.display().to_string().replacen("tmpl", "code", 1)),
            None => OutputTarget::Stdout,
        },
    }
}

#[cfg(feature = "execute")]
fn execute(path: &str) -> Result<(), Error> {
    let status = std::process::Command::new("python3").arg(path).status()?;
    if !status.success() {
        eprintln!("warning: emitted code exited with {status}");
    }
    Ok(())
}

#[cfg(not(feature = "execute"))]
fn execute(_path: &str) -> Result<(), Error> {
    eprintln!("warning: --execute requires the crate's `execute` feature; ignoring");
    Ok(())
}

/// Exercises the months scenario from end to end: construction, emission,
/// and re-parsing the built-in template so a broken build fails loudly.
fn run_self_test() -> Result<(), Error> {
    let months = [
        "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
    ];
    let family = IntSaltHashFamily;
    let mut rng = rand::rngs::StdRng::seed_from_u64(0);
    let code = generate_code(
        Intake::Keys(months.iter().map(|s| s.to_string()).collect()),
        &family,
        None,
        &FormatOptions::default(),
        &BuildOptions::default(),
        &mut rng,
    )?;
    if !code.contains("def perfect_hash(key):") {
        return Err(Error::Template("self-test: emitted code missing perfect_hash".into()));
    }
    let _ = builtin_template(&family);
    Ok(())
}

mod args;
mod render;

use crate::args::Cli;
use crate::render::{Batch, Verdict};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use randname_core::{Error, Policy, PolicySet};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli, &mut io::stdout().lock()) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("randname: {e}");
            ExitCode::from(2)
        }
    }
}

/// `RUST_LOG` wins over `-q` / `-v`.
fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        "error"
    } else {
        match cli.verbosity {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Writes the report to `out` and returns the exit status: 0 on success, 1
/// when `--check` finds no accepting rule.
fn run(cli: &Cli, out: &mut impl Write) -> Result<u8, Error> {
    let policies = select_policies(cli)?;

    if let Some(name) = cli.check.as_deref() {
        let verdicts = policies
            .iter()
            .map(|p| {
                Ok(Verdict {
                    rule: p.name(),
                    pattern: p.pattern(),
                    accepted: p.matches(name)?,
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;

        emit(out, &render::render_check(name, &verdicts, cli.format, cli.quiet))?;

        // Any accepting rule counts as a pass.
        let ok = verdicts.iter().any(|v| v.accepted);
        return Ok(if ok { 0 } else { 1 });
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut batches = Vec::with_capacity(policies.len());
    for policy in &policies {
        let names = (0..cli.count)
            .map(|_| policy.generate(&mut rng))
            .collect::<Result<Vec<_>, Error>>()?;
        debug!(rule = policy.name(), count = names.len(), "generated names");
        batches.push(Batch {
            rule: policy.name(),
            pattern: policy.pattern(),
            names,
        });
    }

    emit(
        out,
        &render::render(&batches, cli.format, cli.verbosity, cli.quiet),
    )?;
    Ok(0)
}

fn emit(out: &mut impl Write, text: &str) -> Result<(), Error> {
    out.write_all(text.as_bytes())
        .and_then(|()| out.flush())
        .map_err(|source| Error::Io {
            path: "<stdout>".into(),
            source,
        })
}

/// Priority:
///   1) positional PATTERN
///   2) defaults merged with --policy, filtered by --rule
fn select_policies(cli: &Cli) -> Result<Vec<Policy>, Error> {
    if let Some(pattern) = cli.pattern.as_deref() {
        return Ok(vec![Policy::new("pattern", pattern)?]);
    }

    let set = match cli.policy.as_deref() {
        Some(path) => PolicySet::load(path)?,
        None => PolicySet::defaults()?,
    };
    debug!(rules = ?set.names().collect::<Vec<_>>(), "policy set ready");

    if cli.rules.is_empty() {
        return Ok(set.iter().cloned().collect());
    }
    cli.rules
        .iter()
        .map(|name| set.get(name).cloned())
        .collect()
}

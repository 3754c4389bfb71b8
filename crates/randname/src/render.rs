use crate::args::OutputFormat;
use serde::Serialize;

/// Names generated from one rule.
pub struct Batch<'a> {
    pub rule: &'a str,
    pub pattern: &'a str,
    pub names: Vec<String>,
}

/// Whether one rule accepts the checked name.
pub struct Verdict<'a> {
    pub rule: &'a str,
    pub pattern: &'a str,
    pub accepted: bool,
}

#[derive(Serialize)]
struct JsonOut<'a> {
    ok: bool,
    rules: Vec<JsonBatch<'a>>,
}

#[derive(Serialize)]
struct JsonBatch<'a> {
    rule: &'a str,
    pattern: &'a str,
    names: &'a [String],
}

#[derive(Serialize)]
struct JsonCheck<'a> {
    ok: bool,
    name: &'a str,
    accepted_by: Vec<&'a str>,
    rules: Vec<JsonVerdict<'a>>,
}

#[derive(Serialize)]
struct JsonVerdict<'a> {
    rule: &'a str,
    pattern: &'a str,
    accepted: bool,
}

fn to_json<T: Serialize>(out: &T) -> String {
    // if this fails, it's a programmer error; still return something sane
    let mut s = serde_json::to_string_pretty(out).unwrap_or_else(|_| "{\"ok\":false}".to_string());
    s.push('\n');
    s
}

pub fn render_json(batches: &[Batch<'_>]) -> String {
    to_json(&JsonOut {
        ok: true,
        rules: batches
            .iter()
            .map(|b| JsonBatch {
                rule: b.rule,
                pattern: b.pattern,
                names: &b.names,
            })
            .collect(),
    })
}

pub fn render_human(batches: &[Batch<'_>], verbosity: u8, quiet: bool) -> String {
    let mut out = String::new();
    let labelled = !quiet && batches.len() > 1;

    for b in batches {
        if !quiet && verbosity > 0 {
            out.push_str(&format!("# {} = {}\n", b.rule, b.pattern));
        }
        for name in &b.names {
            if labelled {
                out.push_str(&format!("{}: {name}\n", b.rule));
            } else {
                out.push_str(name);
                out.push('\n');
            }
        }
    }

    out
}

pub fn render(
    batches: &[Batch<'_>],
    format: OutputFormat,
    verbosity: u8,
    quiet: bool,
) -> String {
    match format {
        OutputFormat::Human => render_human(batches, verbosity, quiet),
        OutputFormat::Json => render_json(batches),
    }
}

pub fn render_check(
    name: &str,
    verdicts: &[Verdict<'_>],
    format: OutputFormat,
    quiet: bool,
) -> String {
    let accepted_by: Vec<&str> = verdicts
        .iter()
        .filter(|v| v.accepted)
        .map(|v| v.rule)
        .collect();

    if format == OutputFormat::Json {
        return to_json(&JsonCheck {
            ok: !accepted_by.is_empty(),
            name,
            accepted_by,
            rules: verdicts
                .iter()
                .map(|v| JsonVerdict {
                    rule: v.rule,
                    pattern: v.pattern,
                    accepted: v.accepted,
                })
                .collect(),
        });
    }

    let mut out = String::new();
    if quiet {
        for rule in accepted_by {
            out.push_str(rule);
            out.push('\n');
        }
        return out;
    }

    if accepted_by.is_empty() {
        out.push_str(&format!("NO RULE accepts {name:?}\n"));
        return out;
    }
    for v in verdicts {
        let label = if v.accepted { "ACCEPT" } else { "reject" };
        out.push_str(&format!("{label} {}: {}\n", v.rule, v.pattern));
    }
    out
}

use crate::cli::{Args, Command, Input};
use anyhow::{Context, bail};
use clap::Parser;
use oxrdf::Triple;
use oxrdfio::{RdfFormat, RdfParser, RdfSerializer};
use oxreason::{
    KnowledgeBase, Reasoner, ReasonerConfig, StandardRule, ValidationReport, Validator,
    ValidatorRule,
};
use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write, stderr, stdin, stdout};
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod cli;

pub fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.log_json);
    match args.command {
        Command::Reason {
            input,
            output,
            max_iterations,
            timeout_secs,
            max_inferred_triples,
            rules,
            provenance,
        } => {
            let mut kb = load(&input)?;
            let reasoner = reasoner(&rules)?.with_config(ReasonerConfig {
                max_iterations,
                timeout: timeout_secs.map(Duration::from_secs),
                max_inferred_triples,
            });
            let report = reasoner.reason(&mut kb)?;
            tracing::info!(
                "{} triples inferred in {} passes",
                report.len(),
                report.iterations()
            );
            if provenance {
                let mut err = stderr().lock();
                for inference in report.inferences() {
                    writeln!(err, "{}: {}", inference.rule, inference.triple)?;
                }
            }
            let triples = report.into_iter().map(|inference| inference.triple);
            if let Some(output) = output {
                let file = File::create(&output)
                    .with_context(|| format!("Failed to create {}", output.display()))?;
                write_triples(BufWriter::new(file), triples)?;
            } else {
                write_triples(stdout().lock(), triples)?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Validate {
            input,
            no_reasoning,
            rules,
        } => {
            let mut kb = load(&input)?;
            if !no_reasoning {
                Reasoner::with_standard_rules().reason(&mut kb)?;
            }
            let validator = if rules.is_empty() {
                Validator::new()
            } else {
                Validator::with_rules(
                    rules
                        .iter()
                        .map(|name| {
                            ValidatorRule::from_name(name)
                                .with_context(|| format!("The validator rule '{name}' is unknown"))
                        })
                        .collect::<anyhow::Result<Vec<_>>>()?,
                )
            };
            let report = validator.validate(&kb);
            print_report(&report)?;
            Ok(if report.is_consistent() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn reasoner(rules: &[String]) -> anyhow::Result<Reasoner> {
    if rules.is_empty() {
        return Ok(Reasoner::with_standard_rules());
    }
    let mut reasoner = Reasoner::new();
    for name in rules {
        let rule = StandardRule::from_name(name)
            .with_context(|| format!("The entailment rule '{name}' is unknown"))?;
        reasoner.add_rule(rule.rule());
    }
    Ok(reasoner)
}

/// Loads the input files, or stdin if there are none, into a single knowledge base.
fn load(input: &Input) -> anyhow::Result<KnowledgeBase> {
    let format = input
        .format
        .as_deref()
        .map(rdf_format_from_name)
        .transpose()?;
    let mut kb = KnowledgeBase::new();
    if input.file.is_empty() {
        let Some(format) = format else {
            bail!("The --format option must be set when reading from stdin")
        };
        load_from_read(&mut kb, stdin().lock(), format, input.base.as_deref())?;
    }
    for file in &input.file {
        let format = if let Some(format) = format {
            format
        } else {
            rdf_format_from_path(file)?
        };
        let read = File::open(file)
            .with_context(|| format!("Failed to open {}", file.display()))?;
        load_from_read(&mut kb, BufReader::new(read), format, input.base.as_deref())
            .with_context(|| format!("Failed to load {}", file.display()))?;
    }
    tracing::debug!("{} triples loaded", kb.len());
    Ok(kb)
}

fn load_from_read(
    kb: &mut KnowledgeBase,
    read: impl Read,
    format: RdfFormat,
    base_iri: Option<&str>,
) -> anyhow::Result<()> {
    let mut parser = RdfParser::from_format(format);
    if let Some(base_iri) = base_iri {
        parser = parser
            .with_base_iri(base_iri)
            .with_context(|| format!("Invalid base IRI {base_iri}"))?;
    }
    for quad in parser.for_reader(read) {
        kb.insert(&Triple::from(quad?));
    }
    Ok(())
}

fn write_triples(write: impl Write, triples: impl IntoIterator<Item = Triple>) -> anyhow::Result<()> {
    let mut serializer = RdfSerializer::from_format(RdfFormat::NTriples).for_writer(write);
    for triple in triples {
        serializer.serialize_triple(&triple)?;
    }
    serializer.finish()?.flush()?;
    Ok(())
}

fn print_report(report: &ValidationReport) -> anyhow::Result<()> {
    let mut out = stdout().lock();
    for evidence in report {
        writeln!(out, "{evidence}")?;
    }
    writeln!(
        out,
        "{} errors, {} warnings",
        report.error_count(),
        report.warning_count()
    )?;
    Ok(())
}

fn format_from_path<T>(
    path: &Path,
    from_extension: impl FnOnce(&str) -> anyhow::Result<T>,
) -> anyhow::Result<T> {
    if let Some(ext) = path.extension().and_then(OsStr::to_str) {
        from_extension(ext).map_err(|e| {
            e.context(format!(
                "Not able to guess the file format from file name extension '{ext}'"
            ))
        })
    } else {
        bail!(
            "The path {} has no extension to guess a file format from",
            path.display()
        )
    }
}

fn rdf_format_from_path(path: &Path) -> anyhow::Result<RdfFormat> {
    format_from_path(path, |ext| {
        RdfFormat::from_extension(ext)
            .with_context(|| format!("The file extension '{ext}' is unknown"))
    })
}

fn rdf_format_from_name(name: &str) -> anyhow::Result<RdfFormat> {
    if let Some(t) = RdfFormat::from_extension(name) {
        return Ok(t);
    }
    if let Some(t) = RdfFormat::from_media_type(name) {
        return Ok(t);
    }
    bail!("The file format '{name}' is unknown")
}

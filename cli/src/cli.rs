use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

#[derive(Parser)]
#[command(about, version, name = "oxreason")]
/// OxReason command line tool: forward chaining and consistency checks of RDF/OWL files
pub struct Args {
    /// Write the logs as JSON lines
    ///
    /// The log level is set with the RUST_LOG environment variable.
    #[arg(long, global = true)]
    pub log_json: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute the triples entailed by the input files
    ///
    /// The inferred triples are written as N-Triples, in the order they were inferred.
    Reason {
        #[command(flatten)]
        input: Input,
        /// File to write the inferred triples to
        ///
        /// If no file is given, stdout is used.
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
        /// Maximal number of reasoning passes
        #[arg(long, default_value_t = 1_000)]
        max_iterations: usize,
        /// Maximal reasoning time in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
        /// Maximal number of inferred triples
        #[arg(long)]
        max_inferred_triples: Option<usize>,
        /// Only run the given entailment rules, like "cax-sco"
        ///
        /// By default all the built-in rules and the property chain axioms are used.
        #[arg(long = "rule")]
        rules: Vec<String>,
        /// Print the rule that entailed each triple to stderr
        #[arg(long)]
        provenance: bool,
    },
    /// Check the consistency of the input files
    ///
    /// Exits with status 1 if an error is found. Warnings do not change the exit status.
    Validate {
        #[command(flatten)]
        input: Input,
        /// Validate the asserted triples only, without computing the entailed ones first
        #[arg(long)]
        no_reasoning: bool,
        /// Only run the given validator rules, like "DisjointClasses"
        #[arg(long = "rule")]
        rules: Vec<String>,
    },
}

#[derive(clap::Args)]
pub struct Input {
    /// File(s) to load
    ///
    /// If no file is given, stdin is used as if it were the input file content.
    /// In this case, the content format must be specified using the --format option.
    /// The graph names of dataset formats are ignored.
    #[arg(short, long, num_args = 0.., value_hint = ValueHint::FilePath)]
    pub file: Vec<PathBuf>,
    /// The format of the file(s) to load
    ///
    /// It can be an extension like "nt" or a MIME type like "application/n-triples".
    ///
    /// By default, the format is guessed from the loaded file extension.
    #[arg(long, required_unless_present = "file")]
    pub format: Option<String>,
    /// Base IRI of the file(s) to load
    #[arg(long, value_hint = ValueHint::Url)]
    pub base: Option<String>,
}

//! Command-line interface for tolsplit.
//!
//! Usage:
//!   tolsplit `<input>` [--out-dir `<dir>`] [options]   - Convert a Newick tree of life
//!   tolsplit - < tree.tre                              - Read the tree from stdin

use clap::Parser;
use log::LevelFilter;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tolsplit::config::ExportConfig;
use tolsplit::decompose::DecompositionConfig;
use tolsplit::export::{DirectoryStore, Exporter};
use tolsplit::parser::ByteParser;
use tolsplit::search::SearchSplitConfig;

#[derive(Parser, Debug)]
#[command(name = "tolsplit", version, about = "Split a Newick tree of life into lazily loadable JSON documents")]
struct Cli {
    /// Newick file to convert, or `-` for stdin
    input: String,

    /// Directory receiving the documents
    #[arg(short, long, default_value = "data")]
    out_dir: PathBuf,

    /// Size ceiling of each decomposition pass, largest first
    #[arg(long, value_delimiter = ',', default_values_t = DecompositionConfig::default().max_subtree_sizes)]
    max_subtree_sizes: Vec<usize>,

    /// Smallest subtree extracted on its own
    #[arg(long, default_value_t = DecompositionConfig::default().min_subtree_size)]
    min_subtree_size: usize,

    /// Levels kept in the parent document below an extraction point
    #[arg(long, default_value_t = DecompositionConfig::default().max_overlap_depth)]
    overlap_depth: usize,

    /// Largest search sub-index written as its own document (in trie nodes)
    #[arg(long, default_value_t = SearchSplitConfig::default().max_subtree_size)]
    search_max_size: usize,

    /// Smallest search sub-index written as its own document (in trie nodes)
    #[arg(long, default_value_t = SearchSplitConfig::default().min_subtree_size)]
    search_min_size: usize,

    /// Prefix of external identifiers in labels
    #[arg(long, default_value_t = ExportConfig::default().ext_id_prefix)]
    ext_id_prefix: String,

    /// More log output (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn export_config(&self) -> ExportConfig {
        ExportConfig::default()
            .with_decomposition(
                DecompositionConfig::default()
                    .with_max_subtree_sizes(self.max_subtree_sizes.clone())
                    .with_min_subtree_size(self.min_subtree_size)
                    .with_max_overlap_depth(self.overlap_depth),
            )
            .with_search(SearchSplitConfig::new(self.search_max_size, self.search_min_size))
            .with_ext_id_prefix(self.ext_id_prefix.as_str())
    }

    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn init_logging(level: LevelFilter) {
    // RUST_LOG, when set, wins over the command-line flags
    if std::env::var("RUST_LOG").is_err() {
        env_logger::Builder::new()
            .filter_module("tolsplit", level)
            .format_timestamp(None)
            .init();
    } else {
        env_logger::init();
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    match convert(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn convert(cli: &Cli) -> Result<(), tolsplit::Error> {
    log::info!("reading {}", cli.input);
    let mut byte_parser = if cli.input == "-" {
        ByteParser::from_reader(&mut io::stdin().lock())?
    } else {
        ByteParser::from_file(&cli.input)?
    };

    let mut store = DirectoryStore::create(&cli.out_dir)?;
    let summary = Exporter::new(cli.export_config()).run(&mut byte_parser, &mut store)?;

    log::info!(
        "done: {} subtree(s), {} search document(s) in {}",
        summary.num_subtrees,
        summary.num_search_documents,
        store.dir().display()
    );
    Ok(())
}

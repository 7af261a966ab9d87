//! Word graph command-line tool.
//!
//! Provides the `wordgraph` binary, which builds a graph from a text file
//! with the default collaborators and prints JSON to stdout:
//!
//! - `ingest` prints the final snapshot, or one snapshot per line when
//!   `--frame-step` is given.
//! - `word` prints one node and its incident edges.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use serde_json::json;

use wordgraph_core::{Collaborators, GraphConfig, GraphError, WordGraph};

/// Word graph tools.
#[derive(Parser)]
#[command(name = "wordgraph", about = "Build semantic/temporal word graphs from text")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand that builds a graph.
#[derive(Args, Debug, Clone)]
struct GraphArgs {
    /// Sliding window capacity.
    #[arg(short, long, default_value_t = GraphConfig::DEFAULT_WINDOW_CAPACITY)]
    window: usize,

    /// Minimum similarity for a semantic edge.
    #[arg(short, long, default_value_t = GraphConfig::DEFAULT_SEMANTIC_THRESHOLD)]
    threshold: f32,

    /// Embedding dimensions of the hashing encoder.
    #[arg(long, default_value_t = wordgraph_core::HashingEncoder::DEFAULT_DIM)]
    dim: usize,
}

impl GraphArgs {
    fn build(&self) -> WordGraph {
        WordGraph::new(
            GraphConfig::new(self.window, self.threshold),
            Collaborators::with_defaults(self.dim),
        )
    }
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Ingest a text file and print the resulting graph.
    Ingest {
        /// Text file to ingest.
        file: PathBuf,

        #[command(flatten)]
        graph: GraphArgs,

        /// Print a snapshot every K tokens instead of only the final one.
        #[arg(long)]
        frame_step: Option<usize>,

        /// Pretty-print the final snapshot.
        #[arg(long)]
        pretty: bool,
    },
    /// Ingest a text file and print one word with its incident edges.
    Word {
        /// Text file to ingest.
        file: PathBuf,

        /// Word to look up (after segmentation, so lowercase).
        word: String,

        #[command(flatten)]
        graph: GraphArgs,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();

    let exit_code = match cli.command {
        Commands::Ingest {
            file,
            graph,
            frame_step,
            pretty,
        } => match read_text(&file) {
            Ok(text) => run_ingest(&text, &graph, frame_step, pretty, &mut stdout),
            Err(code) => code,
        },
        Commands::Word { file, word, graph } => match read_text(&file) {
            Ok(text) => run_word(&text, &word, &graph, &mut stdout),
            Err(code) => code,
        },
    };
    process::exit(exit_code);
}

fn read_text(path: &Path) -> Result<String, i32> {
    std::fs::read_to_string(path).map_err(|e| {
        eprintln!("Error: failed to read '{}': {}", path.display(), e);
        3
    })
}

/// Execute the ingest subcommand.
///
/// Returns exit code: 0 = success, 1 = engine error, 3 = I/O error.
fn run_ingest(
    text: &str,
    args: &GraphArgs,
    frame_step: Option<usize>,
    pretty: bool,
    out: &mut impl Write,
) -> i32 {
    let mut graph = args.build();

    if let Some(step) = frame_step {
        for frame in graph.ingest_text_frames(text, false, step) {
            let line = match frame {
                Ok(snapshot) => snapshot.to_json(),
                Err(e) => return engine_error(&e),
            };
            if let Err(code) = write_json(out, line) {
                return code;
            }
        }
        return 0;
    }

    if let Err(e) = graph.ingest_text(text, false) {
        return engine_error(&e);
    }
    let snapshot = graph.snapshot();
    let json = if pretty {
        snapshot.to_json_pretty()
    } else {
        snapshot.to_json()
    };
    write_json(out, json).err().unwrap_or(0)
}

/// Execute the word subcommand. A word that is not in the graph is an
/// engine error.
fn run_word(text: &str, word: &str, args: &GraphArgs, out: &mut impl Write) -> i32 {
    let mut graph = args.build();
    if let Err(e) = graph.ingest_text(text, false) {
        return engine_error(&e);
    }

    let Some(node) = graph.get_word(word) else {
        eprintln!("Error: word '{}' not found", word);
        return 1;
    };
    let edges = graph.incident_edges(word);
    let body = json!({
        "word": node,
        "incoming": edges.incoming,
        "outgoing": edges.outgoing,
    });
    write_json(out, serde_json::to_string_pretty(&body)).err().unwrap_or(0)
}

fn engine_error(err: &GraphError) -> i32 {
    eprintln!("Error: {}", err);
    1
}

fn write_json(out: &mut impl Write, json: Result<String, serde_json::Error>) -> Result<(), i32> {
    let json = json.map_err(|e| {
        eprintln!("Error: failed to serialize output: {}", e);
        1
    })?;
    writeln!(out, "{}", json).map_err(|e| {
        eprintln!("Error: failed to write output: {}", e);
        3
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(window: usize) -> GraphArgs {
        GraphArgs {
            window,
            threshold: 0.5,
            dim: 64,
        }
    }

    fn lines(out: &[u8]) -> Vec<serde_json::Value> {
        String::from_utf8_lossy(out)
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn cli_parses_shared_graph_options() {
        let cli = Cli::try_parse_from([
            "wordgraph", "ingest", "in.txt", "--window", "3", "--frame-step", "2",
        ])
        .unwrap();
        match cli.command {
            Commands::Ingest {
                graph, frame_step, ..
            } => {
                assert_eq!(graph.window, 3);
                assert_eq!(graph.threshold, 0.5);
                assert_eq!(frame_step, Some(2));
            }
            Commands::Word { .. } => panic!("expected ingest"),
        }
    }

    #[test]
    fn ingest_prints_final_snapshot() {
        let mut out = Vec::new();
        let code = run_ingest("one two. three", &args(30), None, false, &mut out);
        assert_eq!(code, 0);
        let snapshot = &lines(&out)[0];
        assert_eq!(snapshot["tick"], 3);
        assert_eq!(snapshot["nodes"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn ingest_frames_prints_one_line_per_frame() {
        let mut out = Vec::new();
        let code = run_ingest("a b c d e", &args(30), Some(2), false, &mut out);
        assert_eq!(code, 0);
        let frames = lines(&out);
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[2]["tick"], 4);
    }

    #[test]
    fn zero_dim_encoder_is_an_engine_error() {
        let mut out = Vec::new();
        let broken = GraphArgs { dim: 0, ..args(30) };
        assert_eq!(run_ingest("words here", &broken, None, false, &mut out), 1);
    }

    #[test]
    fn word_lookup() {
        let mut out = Vec::new();
        assert_eq!(run_word("red fox red", "red", &args(30), &mut out), 0);
        let body: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(body["word"]["occurrenceCount"], 2);

        let mut out = Vec::new();
        assert_eq!(run_word("red fox", "blue", &args(30), &mut out), 1);
    }
}

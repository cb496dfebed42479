//! CLI module for claimflow
//!
//! Provides command-line interface parsing and handling for the claimflow binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod init;
pub mod output;

use crate::types::{AppError, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};

/// claimflow - research synthesis and claim-bound post writing
///
/// Runs a research agent that turns raw claims into a structured understanding,
/// and a writer agent that formats claims into a social-media post.
#[derive(Parser, Debug)]
#[command(
    name = "claimflow",
    version,
    about = "claimflow - LLM research synthesis and claim-bound post writing",
    long_about = "Runs a research agent that synthesizes raw claims into a validated,\n\
                  structured understanding, and a writer agent that formats claims\n\
                  into a social-media post without adding facts.",
    after_help = "EXAMPLES:\n    \
                  claimflow init                                       # Scaffold claimflow.toml\n    \
                  claimflow research -t \"Tides\" -i claims.json         # Research a topic\n    \
                  claimflow write -i claims.json -p LinkedIn --tone Witty\n    \
                  claimflow agent show research                        # Print the research prompt"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "claimflow.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a claimflow project with configuration and sample claims
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Synthesize claims about a topic into a structured research result
    Research {
        /// Subject under research
        #[arg(short, long)]
        topic: String,

        /// JSON file holding the claims ("-" reads stdin)
        #[arg(short = 'i', long)]
        claims: PathBuf,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Format claims into a social-media post
    Write {
        /// JSON file holding the claims ("-" reads stdin)
        #[arg(short = 'i', long)]
        claims: PathBuf,

        /// Target platform
        #[arg(short, long, default_value = "Medium")]
        platform: String,

        /// Voice of the post
        #[arg(long, default_value = "Informative")]
        tone: String,

        /// Output format
        #[arg(short, long, default_value = "Text")]
        format: String,
    },

    /// Show configuration information
    Config {
        /// Validate the configuration file and report warnings
        #[arg(long)]
        validate: bool,
    },

    /// Inspect agents
    #[command(subcommand)]
    Agent(AgentCommands),
}

/// Agent inspection subcommands
#[derive(Subcommand, Debug)]
pub enum AgentCommands {
    /// List agents and the model profiles they use
    List,

    /// Show the model profile and system prompt of an agent
    Show {
        /// Name of the agent
        name: String,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Read claims from a JSON file, or stdin when the path is `-`.
///
/// The file must hold a JSON array; a single value is taken as a one-claim list.
pub fn load_claims(path: &Path) -> Result<Vec<Value>> {
    let content = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(path)?
    };

    parse_claims(&content)
}

/// Parse claims text; see [`load_claims`].
pub fn parse_claims(content: &str) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| AppError::InvalidInput(format!("Claims are not valid JSON: {}", e)))?;

    Ok(match value {
        Value::Array(claims) => claims,
        single => vec![single],
    })
}

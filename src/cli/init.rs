//! Init command implementation
//!
//! Scaffolds a claimflow project: configuration, environment template and a
//! sample claims file.

use super::output::Output;
use std::fs;
use std::path::Path;

/// Result of the init operation
pub enum InitResult {
    /// Initialization completed successfully
    Success,
    /// Project already exists (claimflow.toml found)
    AlreadyExists,
    /// An error occurred during initialization
    Error(String),
}

/// Configuration for the init command
pub struct InitConfig {
    /// Directory to initialize
    pub path: std::path::PathBuf,
    /// Overwrite existing files
    pub force: bool,
}

/// Run the init command
pub fn run(config: InitConfig, output: &Output) -> InitResult {
    output.header("Initializing claimflow project");

    let base_path = &config.path;

    let config_path = base_path.join("claimflow.toml");
    if config_path.exists() && !config.force {
        output.warning("claimflow.toml already exists!");
        output.hint("Use --force to overwrite existing files");
        return InitResult::AlreadyExists;
    }

    if let Err(e) = fs::create_dir_all(base_path) {
        output.error(&format!("Failed to create {}: {}", base_path.display(), e));
        return InitResult::Error(e.to_string());
    }

    output.subheader("Creating files");

    let files = [
        ("config", "claimflow.toml", generate_claimflow_toml()),
        ("env", ".env.example", generate_env_example()),
        ("claims", "claims.example.json", generate_example_claims()),
    ];

    for (file_type, name, content) in &files {
        let path = base_path.join(name);
        if path.exists() && !config.force {
            output.skipped(name, "already exists");
            continue;
        }
        if let Err(e) = write_file(&path, content, config.force) {
            output.error(&format!("Failed to create {}: {}", name, e));
            return InitResult::Error(e.to_string());
        }
        output.created(file_type, name);
    }

    output.complete("claimflow project initialized!");

    output.subheader("Next steps");
    output.info("Pull the configured models:");
    output.command("ollama pull deepseek-r1:8b");
    output.command("ollama pull llama3.2:1b");
    output.info("Run the research agent on the sample claims:");
    output.command("claimflow research -t \"Basic science\" -i claims.example.json");
    output.info("Write a post from the same claims:");
    output.command("claimflow write -i claims.example.json -p LinkedIn");

    InitResult::Success
}

fn write_file(path: &Path, content: &str, force: bool) -> std::io::Result<()> {
    if path.exists() && !force {
        return Ok(()); // Skip existing files unless force is true
    }
    fs::write(path, content)
}

fn generate_claimflow_toml() -> String {
    r#"# claimflow configuration
# =======================

[logging]
# Used when RUST_LOG is not set; --verbose forces "debug"
level = "info"
json = false

# ---------------------------------------------------------------------------
# Providers
# ---------------------------------------------------------------------------

[providers.ollama-local]
type = "ollama"
base_url = "http://localhost:11434"

# ---------------------------------------------------------------------------
# Model profiles
# ---------------------------------------------------------------------------

# Deterministic reasoning model for research synthesis
[models.reasoning]
provider = "ollama-local"
model = "deepseek-r1:8b"
temperature = 0.0

# Small model for post writing
[models.writing]
provider = "ollama-local"
model = "llama3.2:1b"
temperature = 0.7

# ---------------------------------------------------------------------------
# Agents
# ---------------------------------------------------------------------------

[agents.research]
model = "reasoning"

[agents.writer]
model = "writing"
"#
    .to_string()
}

fn generate_env_example() -> String {
    r#"# claimflow environment variables
# Copy this file to .env and adjust as needed.

# Optional: Logging filter (trace, debug, info, warn, error)
RUST_LOG=info,claimflow=debug
"#
    .to_string()
}

fn generate_example_claims() -> String {
    r#"[
  {
    "statement": "The Earth revolves around the Sun.",
    "source": "Astronomy Basics"
  },
  {
    "statement": "Water boils at 100 degrees Celsius at sea level.",
    "source": "Chemistry 101"
  }
]
"#
    .to_string()
}

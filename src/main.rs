use anyhow::{Context, Result, bail};
use claimflow::{
    AppError, ClaimflowConfig, LLMClient, ProviderRegistry, ResearchAgent, WriterAgent, agents,
    cli::{
        AgentCommands, Cli, Commands,
        init::{self, InitConfig, InitResult},
        load_claims,
        output::Output,
    },
    utils::{
        logging,
        toml_config::{LoggingConfig, ProviderConfig},
    },
};
use std::path::Path;
use std::process::ExitCode;
use tracing::debug;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();
    dotenvy::dotenv().ok();

    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    match run(cli, &output).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e, &output);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, output: &Output) -> Result<()> {
    let Cli {
        config: config_path,
        verbose,
        command,
        ..
    } = cli;

    match command {
        Commands::Init { path, force } => {
            logging::init(&LoggingConfig::default(), verbose)
                .context("Failed to initialize logging")?;

            match init::run(InitConfig { path, force }, output) {
                InitResult::Success | InitResult::AlreadyExists => {}
                InitResult::Error(e) => bail!("Initialization failed: {}", e),
            }
        }

        Commands::Research {
            topic,
            claims,
            json,
        } => {
            let config = load_config(&config_path, verbose)?;
            let claims = load_claims(&claims)?;
            let agent = ResearchAgent::new(client_for(&config, "research").await?);
            let result = agent.run(&claims, &topic).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                output.research_result(&result);
            }
        }

        Commands::Write {
            claims,
            platform,
            tone,
            format,
        } => {
            let config = load_config(&config_path, verbose)?;
            let claims = load_claims(&claims)?;
            let agent = WriterAgent::new(client_for(&config, "writer").await?);
            let post = agent.run(&claims, &platform, &tone, &format).await?;
            println!("{}", post);
        }

        Commands::Config { validate } => {
            let config = load_config(&config_path, verbose)?;
            show_config(&config, &config_path, validate, output)?;
        }

        Commands::Agent(command) => {
            let config = load_config(&config_path, verbose)?;
            match command {
                AgentCommands::List => list_agents(&config, output),
                AgentCommands::Show { name } => show_agent(&config, &name, output)?,
            }
        }
    }

    Ok(())
}

/// Load `claimflow.toml` (or the defaults) and install logging from it
fn load_config(path: &Path, verbose: bool) -> Result<ClaimflowConfig> {
    let config = ClaimflowConfig::load_or_default(path)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    logging::init(&config.logging, verbose).context("Failed to initialize logging")?;
    debug!(config = %path.display(), "Configuration resolved");
    Ok(config)
}

fn list_agents(config: &ClaimflowConfig, output: &Output) {
    output.header("Agents");
    output.table_header(&["Agent", "Profile", "Model"]);
    for (name, agent) in config.agents.iter() {
        let model = config
            .get_model(&agent.model)
            .map(|m| m.model.as_str())
            .unwrap_or("?");
        output.table_row(&[name, agent.model.as_str(), model]);
    }
}

fn show_agent(config: &ClaimflowConfig, name: &str, output: &Output) -> Result<()> {
    let prompt = agents::system_prompt(name).ok_or_else(|| {
        AppError::InvalidInput(format!(
            "Unknown agent '{}'. Available: {}",
            name,
            agents::AGENT_NAMES.join(", ")
        ))
    })?;

    output.header(&format!("Agent: {}", name));
    if let Some(profile) = config.agent_model(name) {
        output.kv("profile", profile);
        if let Some(model) = config.get_model(profile) {
            output.kv("model", &model.model);
            output.kv("temperature", &model.temperature.to_string());
        }
    }
    output.subheader("System prompt");
    output.paragraph(&prompt);

    Ok(())
}

/// Build the client for the model profile an agent is configured with
async fn client_for(config: &ClaimflowConfig, agent: &str) -> Result<Box<dyn LLMClient>> {
    let profile = config
        .agent_model(agent)
        .with_context(|| format!("No model profile configured for agent '{}'", agent))?;

    let registry = ProviderRegistry::from_config(config);
    Ok(registry.create_client_for_model(profile).await?)
}

fn show_config(
    config: &ClaimflowConfig,
    path: &Path,
    validate: bool,
    output: &Output,
) -> Result<()> {
    output.header("Configuration");
    if path.exists() {
        output.kv("file", &path.display().to_string());
    } else {
        output.kv("file", "(built-in defaults)");
    }
    output.kv("log level", &config.logging.level);
    output.kv("json logs", &config.logging.json.to_string());

    output.subheader("Providers");
    for (name, provider) in &config.providers {
        match provider {
            ProviderConfig::Ollama { base_url } => {
                output.kv(name, &format!("ollama @ {}", base_url))
            }
        }
    }

    output.subheader("Models");
    for (name, model) in &config.models {
        output.kv(
            name,
            &format!(
                "{} via {} (temperature {})",
                model.model, model.provider, model.temperature
            ),
        );
    }

    output.subheader("Agents");
    for (name, agent) in config.agents.iter() {
        output.kv(name, &agent.model);
    }

    if validate {
        output.newline();
        let warnings = config.validate_with_warnings()?;
        if warnings.is_empty() {
            output.success("Configuration is valid");
        } else {
            for warning in &warnings {
                output.warning(&warning.to_string());
            }
            output.success(&format!(
                "Configuration is valid with {} warning(s)",
                warnings.len()
            ));
        }
    }

    Ok(())
}

fn report(error: &anyhow::Error, output: &Output) {
    output.error(&format!("{:#}", error));

    match error.downcast_ref::<AppError>() {
        Some(AppError::SchemaViolation { .. }) => {
            output.hint("The model's research_confidence must be exactly HIGH, MEDIUM or LOW")
        }
        Some(AppError::LLM(_)) => {
            output.hint("Check that the Ollama server is running and the model is pulled");
            output.command("ollama list");
        }
        _ => {}
    }
}

//! CLI entrypoint for Avalon
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use avalon_application::{GameProgressNotifier, RunGameUseCase};
use avalon_domain::{GameSetup, OutputFormat};
use avalon_infrastructure::{
    ConfigLoader, FileConfig, FileGameRecorder, JsonlConversationLogger, ProviderFactory,
};
use avalon_presentation::{
    Cli, ConsoleFormatter, ConsoleProgress, OutputFormatter, ProgressReporter,
};
use clap::Parser;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("failed to load configuration: {}", e))?
    };
    apply_cli_overrides(&mut config, &cli);

    if cli.no_color || !config.output.color {
        ConsoleFormatter::set_color(false);
    }

    // Game logs live in their own directory; the diagnostic log goes there too
    let recorder = if cli.no_logs {
        None
    } else {
        FileGameRecorder::in_new_game_dir(&config.output.dir)
    };
    let _log_guard = init_tracing(cli.verbose, recorder.as_ref().map(|r| r.dir()));

    info!("Starting Avalon");

    for issue in config.check()? {
        warn!("{}", issue.message);
    }
    if !cli.no_logs && recorder.is_none() {
        warn!(
            "Could not create a game directory under {}; game logs are disabled",
            config.output.dir.display()
        );
    }

    let (game_config, _) = config.game.to_game_config();
    let (format, _) = config.output.parse_format();

    let seed = config.game.seed.unwrap_or_else(rand::random);
    info!(seed, "Dealing roles");
    let roster = config.game.roster();
    let setup = GameSetup::from_seed(&roster, seed).context("invalid player roster")?;

    // === Dependency Injection ===
    let factory = ProviderFactory::from_config(&config).with_seed(seed);
    let agents = factory
        .build(&roster)
        .with_context(|| format!("could not start the {} provider", factory.kind()))?;

    let mut use_case = RunGameUseCase::new(agents).with_config(game_config);

    let game_dir = recorder.as_ref().map(|r| r.dir().to_path_buf());
    if let Some(dir) = &game_dir {
        if config.output.conversation_log
            && let Some(logger) = JsonlConversationLogger::in_game_dir(dir)
        {
            use_case = use_case.with_conversation_logger(Arc::new(logger));
        }
    }
    if let Some(recorder) = recorder {
        use_case = use_case.with_recorder(Arc::new(recorder));
    }

    // Print header
    if !cli.quiet && format != OutputFormat::Json {
        println!();
        println!("+============================================================+");
        println!("|           Avalon - five agents, one traitor too many       |");
        println!("+============================================================+");
        println!();
        println!("Players: {}", config.game.players.join(", "));
        println!("Provider: {}", factory.kind());
        println!();
    }

    // Execute with or without progress reporting
    let report = if cli.quiet || format == OutputFormat::Json {
        use_case.execute(setup).await?
    } else {
        let progress: Box<dyn GameProgressNotifier> = if std::io::stdout().is_terminal() {
            Box::new(ProgressReporter::new())
        } else {
            Box::new(ConsoleProgress)
        };
        use_case.execute_with_progress(setup, progress.as_ref()).await?
    };

    // Output results
    println!("{}", ConsoleFormatter.render(&report, format));

    if let Some(dir) = game_dir
        && format != OutputFormat::Json
    {
        println!("Game logs: {}", dir.display());
    }

    Ok(())
}

/// Fold command-line flags into the loaded configuration
fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if !cli.players.is_empty() {
        config.game.players = cli.players.clone();
    }
    if let Some(seed) = cli.seed {
        config.game.seed = Some(seed);
    }
    if let Some(turns) = cli.turns {
        config.game.discussion_turns = turns;
    }
    if let Some(proposal) = &cli.proposal {
        config.game.proposal = proposal.clone();
    }
    if cli.sequential {
        config.game.parallel_decisions = false;
    }
    if let Some(provider) = &cli.provider {
        config.agents.provider = provider.clone();
    }
    if let Some(model) = &cli.model {
        config.agents.model = model.clone();
        config.agents.models.clear();
    }
    if let Some(dir) = &cli.output_dir {
        config.output.dir = dir.clone();
    }
    if let Some(output) = cli.output {
        config.output.format = Some(OutputFormat::from(output).as_str().to_string());
    }
}

/// Console logging by verbosity, plus `avalon.log` in the game directory.
///
/// `RUST_LOG` overrides the verbosity flags when set.
fn init_tracing(verbose: u8, game_dir: Option<&Path>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter);

    let (file, guard) = match game_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::never(dir, "avalon.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(EnvFilter::new("info"));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry().with(console).with(file).init();
    guard
}

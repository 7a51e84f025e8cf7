//! CLI command definitions

use avalon_domain::OutputFormat;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the final game report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    /// Result, score and assassination only
    Summary,
    /// Every round, with roles revealed
    Full,
    /// JSON game report
    Json,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Summary => OutputFormat::Summary,
            OutputArg::Full => OutputFormat::Full,
            OutputArg::Json => OutputFormat::Json,
        }
    }
}

/// CLI arguments for avalon
#[derive(Parser, Debug)]
#[command(name = "avalon")]
#[command(author, version, about = "Five LLM agents play The Resistance: Avalon")]
#[command(long_about = r#"
Avalon seats five agents at a game of The Resistance: Avalon.
Merlin and two Loyal Servants play for good; the Assassin and the Minion play for evil.

Each round has four phases:
1. Discussion: every player speaks, starting with the leader
2. Proposal: the leader names a quest team
3. Vote: everyone approves or rejects the team, privately and at once
4. Quest: team members play success or fail cards, privately and at once

Three successful quests send the game to the assassination.
Three failed quests, or five rejected proposals in a row, win it for evil.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./avalon.toml       Project-level config
3. ~/.config/avalon/config.toml   Global config

Example:
  avalon --provider random --seed 7
  avalon -p Alice -p Bob -p Carol -p Dave -p Eve --turns 2 -o full
  avalon --model claude-3-5-sonnet-latest -vv
"#)]
pub struct Cli {
    /// Player names in roster order (exactly five; repeat the flag)
    #[arg(short, long = "player", value_name = "NAME")]
    pub players: Vec<String>,

    /// Seed for role assignment and seating (random when omitted)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Discussion turns per player each round
    #[arg(short, long, value_name = "N")]
    pub turns: Option<usize>,

    /// Decision provider: "anthropic" or "random"
    #[arg(long, value_name = "PROVIDER")]
    pub provider: Option<String>,

    /// Model used by every player
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Team proposals: "leader" asks the leader, "seating" takes the first seats
    #[arg(long, value_name = "MODE")]
    pub proposal: Option<String>,

    /// Directory that receives the game logs
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputArg>,

    /// Ask players one at a time instead of concurrently
    #[arg(long)]
    pub sequential: bool,

    /// Do not write game logs
    #[arg(long)]
    pub no_logs: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

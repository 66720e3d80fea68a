//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for conclave
#[derive(Parser, Debug)]
#[command(name = "conclave")]
#[command(version, about = "Multi-LLM flows - several models collaborate on one task")]
#[command(long_about = r#"
Conclave runs a flow: several LLM providers collaborate on a single task
over multiple rounds.

Flow types:
  basic     All models brainstorm independently, then everyone sees
            everyone's work and refines. Democratic round-robin.
  leading   One model leads. Contributors ideate and respond; the leader
            periodically synthesizes everything into a unified plan.

Configuration is loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./conclave.toml     Project-level config
3. Built-in defaults   anthropic + openai + gemini, three example flows

Example:
  conclave basic-ideator ./task.md
  conclave leading-ideator ./task.md --prompt "Design a queue in Rust"
  conclave --list-flows
"#)]
pub struct Cli {
    /// The flow to run (a key under [flows] in the config)
    #[arg(required_unless_present = "list_flows")]
    pub flow: Option<String>,

    /// Input file with the task description
    #[arg(required_unless_present = "list_flows")]
    pub input: Option<PathBuf>,

    /// Replace the flow's round-1 prompt (input file is still appended)
    #[arg(short, long, value_name = "TEXT")]
    pub prompt: Option<String>,

    /// List configured flows and exit
    #[arg(long)]
    pub list_flows: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,
}

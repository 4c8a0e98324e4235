//! CLI - Command-line argument parsing
//!
//! Keeps argument parsing separate from execution logic.

use clap::{Args, Parser, Subcommand};

/// PromptCraft lab client
#[derive(Parser, Debug)]
#[command(name = "promptcraftctl")]
#[command(about = "PromptCraft - interactive prompt engineering labs", long_about = None)]
#[command(version)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Gateway base URL (overrides $PROMPTCRAFT_GATEWAY)
    #[arg(long, global = true)]
    pub gateway: Option<String>,

    /// Log requests to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage the stored API key
    Key {
        #[command(subcommand)]
        action: KeyCommands,
    },

    /// Basics lab: build a prompt from its six elements and send it
    Compose(ComposeArgs),

    /// List the prompting techniques of the techniques lab
    Techniques,

    /// Run a technique's base and enhanced prompt side by side
    Compare {
        /// Technique id (zero-shot, few-shot, chain-of-thought)
        technique: String,
    },

    /// Score a prompt with the quality heuristic
    Analyze {
        prompt: String,

        /// Also send the prompt to the gateway
        #[arg(long)]
        send: bool,
    },

    /// Run prompts as a chain, each step getting the previous answer as context
    Chain {
        /// Step prompt, in order (repeat for more steps)
        #[arg(long = "step", required = true)]
        steps: Vec<String>,
    },

    /// Refine a prompt version by version (reads prompts from stdin)
    Refine,

    /// Ask the same prompt three times and compare the answers
    Consistency {
        prompt: String,

        /// Keep successful runs when some fail
        #[arg(long)]
        per_run: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum KeyCommands {
    /// Store the API key
    Set { key: String },

    /// Show the stored key (masked)
    Show,

    /// Remove the stored key
    Clear,
}

#[derive(Args, Debug, Default)]
pub struct ComposeArgs {
    /// What exactly should be achieved
    #[arg(long)]
    pub task: String,

    #[arg(long)]
    pub context: Option<String>,

    /// Desired output format (length, structure, style)
    #[arg(long)]
    pub format: Option<String>,

    #[arg(long)]
    pub example: Option<String>,

    /// Who should answer
    #[arg(long)]
    pub persona: Option<String>,

    #[arg(long)]
    pub tone: Option<String>,

    /// Only print the assembled prompt
    #[arg(long)]
    pub dry_run: bool,
}

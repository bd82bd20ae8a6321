//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for code-crew
#[derive(Parser, Debug)]
#[command(name = "code-crew")]
#[command(author, version, about = "Code review crew - security, debugging and optimization reviewers with a lead")]
#[command(long_about = r#"
code-crew sends code to three specialized reviewers in parallel and has a
lead reviewer merge their findings into one report:

1. Review: security, debugging and optimization reviewers see the same prompt
2. Synthesis: the lead writes an executive summary
3. Report: summary first, then one section per reviewer in fixed order

Configuration files are loaded from (in priority order):
1. CODE_CREW_<SECTION>__<KEY>              Environment
2. --config <path>                          Explicit config file
3. ./code-crew.toml                         Project-level config
4. ~/.config/code-crew/config.toml          Global config

Example:
  code-crew review --before $GITHUB_BEFORE --after $GITHUB_SHA
  code-crew serve --port 8080
  code-crew ask "Is this SQL query safe? SELECT * FROM t WHERE id = '$id'"
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Review the files changed between two revisions and write one report per file
    Review {
        /// Revision before the push (empty or all zeros diffs against the empty tree)
        #[arg(long, env = "GITHUB_BEFORE", default_value = "")]
        before: String,

        /// Revision after the push
        #[arg(long, env = "GITHUB_SHA")]
        after: String,

        /// Repository root
        #[arg(long, value_name = "DIR", default_value = ".")]
        repo: PathBuf,
    },

    /// Serve the interactive web front end
    Serve {
        /// Bind address (overrides server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Ask the crew once and stream the report to stdout
    Ask {
        /// Code or question for the crew
        query: String,

        /// Continue an earlier session
        #[arg(short, long, value_name = "ID")]
        session: Option<String>,
    },
}

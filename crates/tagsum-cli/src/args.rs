use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(name = "tagsum", version, about = "AI-tagged campus transaction summaries on Solana")]
pub struct Cli {
    /// Emit JSON output on stdout.
    #[arg(long, global = true)]
    pub json: bool,

    /// JSON config file (CoreConfig). Flags and env vars override it.
    #[arg(long, global = true, env = "TAGSUM_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, env = "TAGSUM_RPC_URL")]
    pub rpc_url: Option<String>,

    #[arg(long, global = true, env = "TAGSUM_PROGRAM_ID")]
    pub program_id: Option<String>,

    /// Signer keypair file (default: ~/.config/solana/id.json).
    #[arg(long, global = true, env = "TAGSUM_KEYPAIR")]
    pub keypair: Option<PathBuf>,

    /// Groq API key. Without one, extraction uses the offline heuristic.
    #[arg(long, global = true, env = "GROQ_API_KEY", hide_env_values = true)]
    pub groq_api_key: Option<String>,

    /// Log as JSON lines on stderr.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Extract summary, tags, category and confidence from a description.
    Analyze { description: String },

    /// Analyze a description and store the result on chain.
    Submit {
        description: String,

        /// 64-char hex transaction hash (default: sha256 of the description).
        #[arg(long, conflicts_with = "random_hash")]
        hash: Option<String>,

        /// Use a fresh random transaction hash.
        #[arg(long)]
        random_hash: bool,

        /// Fail instead of initializing a missing summary store.
        #[arg(long)]
        no_init: bool,
    },

    /// Initialize the summary store if it does not exist.
    Init,

    /// Fetch one tagged summary.
    Get {
        #[arg(long)]
        hash: String,

        /// Owner wallet (default: the signer).
        #[arg(long)]
        wallet: Option<String>,
    },

    /// List tagged summaries, newest first.
    List {
        /// Owner wallet (default: the signer).
        #[arg(long, conflicts_with = "all")]
        wallet: Option<String>,

        /// Every record in the program, regardless of owner.
        #[arg(long)]
        all: bool,
    },

    /// Show the global summary store.
    Store,

    /// Derive store and record addresses offline.
    Derive {
        #[arg(long)]
        hash: String,

        #[arg(long)]
        wallet: Option<String>,
    },

    /// Check an AI result JSON file against every validation rule.
    Validate {
        #[arg(long)]
        file: PathBuf,
    },

    /// Run environment checks.
    Doctor,
}

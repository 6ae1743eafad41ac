use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "shipaddr", bin_name = "shipaddr", version = get_version())]
#[command(about = "Pick, edit and delete checkout shipping addresses", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (default: $SHIPADDR_DATA, then the OS data directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Store a new address
    #[command(alias = "a")]
    Add {
        /// Field value, e.g. --set city=London (repeatable)
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,

        /// Street line (repeatable, in order)
        #[arg(long)]
        street: Vec<String>,
    },

    /// List addresses
    #[command(alias = "ls")]
    List,

    /// Use an address for shipping
    #[command(alias = "s")]
    Select {
        /// Index of the address (e.g. 1)
        index: String,
    },

    /// Edit an address through the checkout form and submit it
    #[command(alias = "e")]
    Edit {
        /// Index of the address (e.g. 1)
        index: String,

        /// Form field value, e.g. --set postcode=NW1 (repeatable)
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,

        /// Street line, written from the first line on (repeatable)
        #[arg(long)]
        street: Vec<String>,

        /// Drop every street line input before applying --street
        #[arg(long)]
        clear_street: bool,
    },

    /// Delete an address
    #[command(alias = "rm")]
    Delete {
        /// Index of the address (e.g. 1)
        index: String,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the selected shipping address
    Status,

    /// Get or set configuration
    Config {
        /// Configuration key (e.g. update-button-label)
        key: Option<String>,

        /// Value to set
        value: Option<String>,
    },
}

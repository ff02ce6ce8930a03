//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use paddock_core::LayoutMode;

#[derive(Parser)]
#[command(name = "paddock")]
#[command(about = "Browse and manage your uploaded car photos")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Override the catalog service base URL
    #[arg(long, value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Optional path to the preferences file
    #[arg(long, value_name = "PATH", global = true)]
    pub prefs_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record the signed-in user's profile
    Login {
        /// Display name
        #[arg(long)]
        name: String,
        /// Account email; owns every uploaded entry
        #[arg(long)]
        email: String,
        /// Profile photo URL
        #[arg(long, default_value = "")]
        photo_url: String,
    },
    /// Clear the stored profile
    Logout,
    /// Show the stored profile
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List your uploaded cars
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Upload a new car photo
    Add {
        /// Car name
        #[arg(long)]
        name: String,
        /// Category or body type
        #[arg(long)]
        category: String,
        /// Where the photo was taken
        #[arg(long)]
        location: String,
        /// Path to the photo (any common image format)
        #[arg(long, value_name = "PATH")]
        image: PathBuf,
    },
    /// Delete one of your cars
    Delete {
        /// Entry id
        id: String,
    },
    /// Show or set the gallery layout
    Layout {
        /// New layout (prints the current one when omitted)
        #[arg(value_enum)]
        mode: Option<LayoutArg>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum LayoutArg {
    List,
    Grid,
}

impl From<LayoutArg> for LayoutMode {
    fn from(value: LayoutArg) -> Self {
        match value {
            LayoutArg::List => Self::List,
            LayoutArg::Grid => Self::Grid,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

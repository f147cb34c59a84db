use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Ask the car expert a single question, optionally about a photo
    Ask {
        prompt: Option<String>,

        #[arg(short, long)]
        image: Option<PathBuf>,
    },

    /// Compare two car models feature by feature
    Compare {
        car1: String,

        car2: String,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Identify and assess the car in a photo
    Analyze {
        image: PathBuf,

        /// Replace the default analysis question
        #[arg(short, long)]
        prompt: Option<String>,
    },

    /// Start an interactive session (type /help inside for commands)
    Chat,
}

//! CLI command implementations.

pub mod doctor;
pub mod init;
pub mod platforms;
pub mod resolve;
pub mod stage;

/// Output format for commands that print structured results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

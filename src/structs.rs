use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path of the configuration file.
    #[arg(long, default_value = "config.toml")]
    pub config: String,
    /// Create the config file if not exists or is broken.
    #[arg(long)]
    pub create_config: bool,
    /// Create the database file if it does not exist.
    #[arg(long)]
    pub create_database: bool,
    #[command(subcommand)]
    pub command: Option<Commands>
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Resolve an address and show how it is classified.
    Lookup {
        address: String,
        /// Print the result as JSON.
        #[arg(long)]
        json: bool
    },
    /// List every row of the ban tables.
    Bans,
    /// Ban one IPv4 address with no expiry.
    Ban {
        address: String
    },
    /// Create the statistics table and its views.
    InitStats,
    /// Delete expired player reports.
    ClearReports
}

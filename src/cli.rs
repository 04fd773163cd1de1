use clap::{Parser, Subcommand};
use std::num::NonZeroUsize;

#[derive(Parser, Debug)]
#[command(name = "globe-explorer")]
#[command(version = "0.1.0")]
#[command(about = "Browse country data and bookmark your favourite countries", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(
        long,
        value_name = "URL",
        global = true,
        help = "Country data provider base URL (overrides COUNTRY_API_URL env var)"
    )]
    pub country_api: Option<String>,

    #[arg(
        long,
        value_name = "URL",
        global = true,
        help = "Account service base URL (overrides ACCOUNT_API_URL env var)"
    )]
    pub account_api: Option<String>,

    #[arg(
        long,
        value_name = "N",
        global = true,
        help = "Countries per page (overrides PAGE_SIZE env var)"
    )]
    pub page_size: Option<NonZeroUsize>,

    #[arg(short, long, global = true, help = "Verbose output")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Quiet mode (minimal output)")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List countries, optionally filtered
    List {
        #[arg(long, short, help = "Search countries by name")]
        search: Option<String>,

        #[arg(long, short, help = "Only countries in this region")]
        region: Option<String>,

        #[arg(long, short, help = "Only countries where this language is spoken")]
        language: Option<String>,

        #[arg(long, short, default_value_t = 1, help = "Page to show")]
        page: usize,
    },
    /// Show details for one country by its 3-letter code
    Show { code: String },
    /// Show your favourite countries
    Favourites,
    /// Add or remove a country from your favourites
    Fav { code: String },
    /// Sign in to the account service
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, help = "Password (prompted for when omitted)")]
        password: Option<String>,
    },
    /// Sign out
    Logout,
    /// Show who is signed in
    Whoami,
    /// Browse the listing interactively
    Browse,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn get_country_api(&self, env_url: String) -> String {
        self.country_api.clone().unwrap_or(env_url)
    }

    pub fn get_account_api(&self, env_url: String) -> String {
        self.account_api.clone().unwrap_or(env_url)
    }

    pub fn get_page_size(&self, env_size: NonZeroUsize) -> NonZeroUsize {
        self.page_size.unwrap_or(env_size)
    }

    pub fn get_log_level(&self) -> &str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else if matches!(self.command, Command::Browse) {
            "info"
        } else {
            "warn"
        }
    }
}

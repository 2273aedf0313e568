use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;

/// CLI arguments for worldcities
#[derive(Debug, Parser)]
#[command(
    name = "worldcities",
    version,
    about = "CLI for managing a worldcities country/city snapshot"
)]
pub struct CliArgs {
    /// Snapshot file to read and, for mutating commands, write back
    #[arg(short = 'd', long = "db", global = true, default_value = "worldcities.db")]
    pub db: String,

    /// Delete a country's cities together with the country
    #[arg(long, global = true)]
    pub cascade: bool,

    /// Page size for listings (defaults to the store setting)
    #[arg(long = "page-size", global = true)]
    pub page_size: Option<usize>,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    Name,
    Id,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the store contents
    Stats,

    /// List countries
    Countries {
        /// Accent-insensitive name substring
        #[arg(long)]
        name: Option<String>,
        /// Zero-based page to print
        #[arg(long, default_value_t = 0)]
        page: usize,
        #[arg(long, value_enum, default_value_t = SortArg::Name)]
        sort: SortArg,
    },

    /// Show one country by id, ISO2/ISO3 code or name
    Country {
        /// Numeric id, code or name (e.g. 1, IT, ITA, Italy)
        key: String,
    },

    /// List cities
    Cities {
        /// Restrict to a country (id or code)
        #[arg(long)]
        country: Option<String>,
        /// Accent-insensitive substring of the name or ASCII name
        #[arg(long)]
        name: Option<String>,
        /// Zero-based page to print
        #[arg(long, default_value_t = 0)]
        page: usize,
        #[arg(long, value_enum, default_value_t = SortArg::Name)]
        sort: SortArg,
    },

    /// Add a country
    AddCountry {
        name: String,
        iso2: String,
        iso3: String,
    },

    /// Add a city
    AddCity {
        name: String,
        /// Country id or code
        #[arg(long)]
        country: String,
        #[arg(long, allow_hyphen_values = true)]
        lat: Decimal,
        #[arg(long, allow_hyphen_values = true)]
        lon: Decimal,
        /// ASCII name; derived from the name when omitted
        #[arg(long)]
        ascii: Option<String>,
    },

    /// Change fields of a country
    UpdateCountry {
        id: u32,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        iso2: Option<String>,
        #[arg(long)]
        iso3: Option<String>,
    },

    /// Change fields of a city
    UpdateCity {
        id: u32,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        ascii: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<Decimal>,
        #[arg(long, allow_hyphen_values = true)]
        lon: Option<Decimal>,
        /// Country id or code
        #[arg(long)]
        country: Option<String>,
    },

    /// Delete a country (see --cascade)
    DeleteCountry { id: u32 },

    /// Delete a city
    DeleteCity { id: u32 },

    /// Replace the snapshot with the contents of a JSON seed file
    #[cfg(feature = "json")]
    Import {
        /// Path to the seed document
        path: String,
    },
}

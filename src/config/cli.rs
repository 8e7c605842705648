use crate::domain::model::{RegionFilter, TileFilter};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "renewal-radar")]
#[command(about = "Renewal risk radar and negotiation brief generator")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// JSON contract file, overrides [data].path
    #[arg(long)]
    pub data: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the renewal table, risk distribution and summary tiles
    Radar {
        /// Only renewals due within this many days
        #[arg(long)]
        days: Option<i64>,

        /// "All Regions", EMEA, NA or APAC
        #[arg(long)]
        region: Option<RegionFilter>,

        /// ALL, HIGH_RISK, DPA or SPEND
        #[arg(long, default_value = "ALL")]
        tile: TileFilter,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Show one contract with its copilot analysis
    Detail {
        id: String,
    },

    /// Generate a negotiation brief for one contract
    Brief {
        id: String,

        /// Generation service key; without one the offline template is used
        #[arg(long, env = "API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

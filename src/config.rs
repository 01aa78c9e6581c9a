use crate::application::optimizer::Optimizer;
use crate::application::price_resolver::CashPriceResolver;
use crate::domain::ports::PriceSourceBox;
use crate::domain::transfer::StatusTier;
use crate::error::Result;
use crate::infrastructure::amadeus::{AmadeusCredentials, AmadeusPriceSource, DEFAULT_BASE_URL};
use crate::infrastructure::charts::AwardCharts;
use crate::infrastructure::lru_cache::DEFAULT_CAPACITY;
use crate::infrastructure::mock_price::MockPriceSource;
use clap::{Args, Parser, Subcommand};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Scores loyalty point redemptions against cash prices",
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    pub pricing: PricingConfig,

    /// Tracing filter directive, e.g. `info` or `pointpilot=debug`
    #[arg(long, env = "RUST_LOG", default_value = "info", global = true)]
    pub log_filter: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP API
    Serve(ServeArgs),
    /// Rank award redemptions for a flight and print them as JSON
    Flight(FlightArgs),
    /// Rank hotel programs for a stay and print them as JSON
    Hotel(HotelArgs),
    /// Compute points credited by a transfer to a partner program
    Transfer(TransferArgs),
}

/// Cash price source settings. Live pricing needs both credentials.
#[derive(Debug, Clone, Args)]
pub struct PricingConfig {
    /// Amadeus API key
    #[arg(long, env = "AMADEUS_ID", hide_env_values = true, global = true)]
    pub amadeus_id: Option<String>,

    /// Amadeus API secret
    #[arg(long, env = "AMADEUS_SECRET", hide_env_values = true, global = true)]
    pub amadeus_secret: Option<String>,

    #[arg(long, env = "AMADEUS_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub amadeus_base_url: String,

    /// Maximum number of distinct route/date prices kept in memory
    #[arg(
        long,
        env = "POINTPILOT_CACHE_CAPACITY",
        default_value_t = DEFAULT_CAPACITY,
        global = true
    )]
    pub cache_capacity: usize,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            amadeus_id: None,
            amadeus_secret: None,
            amadeus_base_url: DEFAULT_BASE_URL.to_string(),
            cache_capacity: DEFAULT_CAPACITY,
        }
    }
}

impl PricingConfig {
    pub fn credentials(&self) -> Option<AmadeusCredentials> {
        AmadeusCredentials::from_parts(self.amadeus_id.as_deref(), self.amadeus_secret.as_deref())
    }

    /// Live Amadeus pricing when credentials are configured, mock fares otherwise.
    pub fn price_source(&self) -> Result<PriceSourceBox> {
        match self.credentials() {
            Some(credentials) => {
                info!(base_url = %self.amadeus_base_url, "Using live Amadeus pricing");
                Ok(Box::new(AmadeusPriceSource::with_base_url(
                    credentials,
                    &self.amadeus_base_url,
                )?))
            }
            None => {
                info!("Amadeus credentials not set, using mock pricing");
                Ok(Box::new(MockPriceSource::new()))
            }
        }
    }

    pub fn build_optimizer(&self) -> Result<Optimizer> {
        let resolver = CashPriceResolver::new(self.price_source()?, self.cache_capacity);
        Ok(Optimizer::new(Arc::new(AwardCharts::builtin()), resolver))
    }
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    #[arg(long, env = "POINTPILOT_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,
}

#[derive(Debug, Clone, Args)]
pub struct FlightArgs {
    #[arg(long)]
    pub origin: String,

    #[arg(long)]
    pub destination: String,

    /// Departure date, YYYY-MM-DD
    #[arg(long)]
    pub date: String,

    #[arg(long)]
    pub return_date: Option<String>,

    /// Apply the rent-day half-price point discount
    #[arg(long)]
    pub rent_day: bool,
}

#[derive(Debug, Clone, Args)]
pub struct HotelArgs {
    /// City or airport code, e.g. NYC or JFK
    #[arg(long)]
    pub city_code: String,

    /// Check-in date, YYYY-MM-DD
    #[arg(long)]
    pub date: String,

    /// Check-out date, YYYY-MM-DD
    #[arg(long)]
    pub return_date: Option<String>,

    #[arg(long)]
    pub rent_day: bool,
}

#[derive(Debug, Clone, Args)]
pub struct TransferArgs {
    /// Points to transfer; separators like `20,000` are accepted
    #[arg(long)]
    pub points: String,

    /// Partner id: hyatt, marriott, accor, united, virgin, flyingblue
    #[arg(long)]
    pub partner: String,

    #[arg(long, value_parser = parse_status, default_value = "BLUE")]
    pub status: StatusTier,

    #[arg(long)]
    pub rent_day: bool,
}

fn parse_status(input: &str) -> std::result::Result<StatusTier, String> {
    StatusTier::ALL
        .into_iter()
        .find(|tier| format!("{tier:?}").eq_ignore_ascii_case(input.trim()))
        .ok_or_else(|| format!("unknown status '{input}', expected BLUE, SILVER, GOLD or PLATINUM"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flight_command() {
        let cli = Cli::try_parse_from([
            "pointpilot",
            "flight",
            "--origin",
            "JFK",
            "--destination",
            "LHR",
            "--date",
            "2024-07-01",
            "--rent-day",
        ])
        .unwrap();

        match cli.command {
            Command::Flight(args) => {
                assert_eq!(args.origin, "JFK");
                assert!(args.rent_day);
                assert!(args.return_date.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_status_is_case_insensitive() {
        assert_eq!(parse_status("gold").unwrap(), StatusTier::Gold);
        assert_eq!(parse_status("PLATINUM").unwrap(), StatusTier::Platinum);
        assert!(parse_status("diamond").is_err());
    }

    #[test]
    fn test_missing_credentials_mean_mock_mode() {
        let config = PricingConfig {
            amadeus_id: Some("id".to_string()),
            amadeus_secret: Some(String::new()),
            ..PricingConfig::default()
        };
        assert!(config.credentials().is_none());
        assert!(PricingConfig::default().credentials().is_none());
    }

    #[tokio::test]
    async fn test_build_optimizer_in_mock_mode() {
        let optimizer = PricingConfig::default().build_optimizer().unwrap();
        let price = optimizer
            .resolver()
            .resolve_price("JFK", "DXB", "2024-12-01")
            .await;
        assert_eq!(price, rust_decimal_macros::dec!(1200.0));
    }
}

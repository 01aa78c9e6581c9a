//! Live fares from the Amadeus Self-Service flight-offers search.
//!
//! Authenticates with the OAuth2 client-credentials flow and reuses the
//! access token until shortly before it expires. A lookup is a single
//! request with no retries; callers decide what to do on failure.

use crate::domain::ports::{PriceSource, RouteQuery};
use crate::error::{PointPilotError, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://test.api.amadeus.com";
const TOKEN_PATH: &str = "v1/security/oauth2/token";
const FLIGHT_OFFERS_PATH: &str = "v2/shopping/flight-offers";
const USER_AGENT: &str = concat!("pointpilot/", env!("CARGO_PKG_VERSION"));
/// Refresh this long before the advertised expiry.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(30);

/// API key pair issued by Amadeus for Self-Service APIs.
#[derive(Clone)]
pub struct AmadeusCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl AmadeusCredentials {
    /// Both values present and non-blank, otherwise `None`.
    pub fn from_parts(client_id: Option<&str>, client_secret: Option<&str>) -> Option<Self> {
        let client_id = client_id.map(str::trim).filter(|s| !s.is_empty())?;
        let client_secret = client_secret.map(str::trim).filter(|s| !s.is_empty())?;
        Some(Self {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        })
    }
}

impl std::fmt::Debug for AmadeusCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AmadeusCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct TokenDto {
    access_token: String,
    #[serde(default)]
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct FlightOffersDto {
    #[serde(default)]
    data: Vec<FlightOfferDto>,
}

#[derive(Debug, Deserialize)]
struct FlightOfferDto {
    price: OfferPriceDto,
}

#[derive(Debug, Deserialize)]
struct OfferPriceDto {
    total: String,
}

struct AccessToken {
    value: String,
    expires_at: Instant,
}

impl AccessToken {
    fn is_valid(&self) -> bool {
        Instant::now() + TOKEN_EXPIRY_MARGIN < self.expires_at
    }
}

pub struct AmadeusPriceSource {
    http: Client,
    base_url: Url,
    credentials: AmadeusCredentials,
    token: Mutex<Option<AccessToken>>,
}

impl AmadeusPriceSource {
    pub fn new(credentials: AmadeusCredentials) -> Result<Self> {
        Self::with_base_url(credentials, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(credentials: AmadeusCredentials, base: &str) -> Result<Self> {
        let base_url = parse_base_url(base)?;
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            base_url,
            credentials,
            token: Mutex::new(None),
        })
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| PointPilotError::PriceLookup(format!("invalid Amadeus URL: {e}")))
    }

    async fn access_token(&self) -> Result<String> {
        let mut token = self.token.lock().await;
        if let Some(current) = token.as_ref()
            && current.is_valid()
        {
            return Ok(current.value.clone());
        }

        debug!("Requesting Amadeus access token");
        let response = self
            .http
            .post(self.url(TOKEN_PATH)?)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.credentials.client_id.as_str()),
                ("client_secret", self.credentials.client_secret.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;
        let dto: TokenDto = response.json().await?;

        let value = dto.access_token.clone();
        *token = Some(AccessToken {
            value: dto.access_token,
            expires_at: Instant::now() + Duration::from_secs(dto.expires_in),
        });
        Ok(value)
    }
}

#[async_trait]
impl PriceSource for AmadeusPriceSource {
    async fn flight_price(&self, query: &RouteQuery) -> Result<Decimal> {
        let token = self.access_token().await?;

        debug!(route = %query, "Searching Amadeus flight offers");
        let response = self
            .http
            .get(self.url(FLIGHT_OFFERS_PATH)?)
            .bearer_auth(token)
            .query(&[
                ("originLocationCode", query.origin.as_str()),
                ("destinationLocationCode", query.destination.as_str()),
                ("departureDate", query.date.as_str()),
                ("adults", "1"),
                ("max", "1"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let offers: FlightOffersDto = response.json().await?;
        first_offer_total(offers)
    }
}

/// Appends a trailing slash so relative paths join under the base path.
fn parse_base_url(base: &str) -> Result<Url> {
    let normalized = if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{base}/")
    };
    Url::parse(&normalized).map_err(|e| {
        PointPilotError::PriceLookup(format!("invalid Amadeus base URL '{base}': {e}"))
    })
}

fn first_offer_total(offers: FlightOffersDto) -> Result<Decimal> {
    let offer = offers
        .data
        .into_iter()
        .next()
        .ok_or_else(|| PointPilotError::PriceLookup("no flight offers returned".to_string()))?;

    let total = Decimal::from_str(offer.price.total.trim()).map_err(|e| {
        PointPilotError::PriceLookup(format!(
            "unparseable offer total '{}': {e}",
            offer.price.total
        ))
    })?;

    // Fares are later scaled to cents; refuse anything that cannot be.
    if total.checked_mul(Decimal::ONE_HUNDRED).is_none() {
        return Err(PointPilotError::PriceLookup(format!(
            "offer total '{total}' is out of range"
        )));
    }
    Ok(total)
}

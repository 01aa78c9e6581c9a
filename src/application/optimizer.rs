use super::price_resolver::CashPriceResolver;
use crate::domain::award::{AwardOption, HotelProgram};
use crate::domain::calendar::{Season, stay_nights};
use crate::domain::ports::RouteQuery;
use crate::domain::transfer::{StatusTier, calculate_transfer, find_partner, parse_points};
use crate::domain::valuation::{Valuation, ValuationEngine, ValuationResult};
use crate::error::Result;
use crate::infrastructure::charts::AwardCharts;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
pub struct FlightSearch {
    pub origin: String,
    pub destination: String,
    pub date: String,
    #[serde(default)]
    pub return_date: Option<String>,
    #[serde(default)]
    pub is_rent_day: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HotelSearch {
    pub city_code: String,
    pub date: String,
    #[serde(default)]
    pub return_date: Option<String>,
    #[serde(default)]
    pub is_rent_day: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightBaseline {
    #[serde(with = "rust_decimal::serde::float")]
    pub cash_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotelBaseline {
    pub property: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub cash_price: Decimal,
}

/// Ranked redemptions for a search together with the cash price they were scored against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationReport<B> {
    pub best_option: ValuationResult,
    pub results: Vec<ValuationResult>,
    pub market_baseline: B,
}

impl<B> OptimizationReport<B> {
    fn new(valuation: Valuation, market_baseline: B) -> Self {
        Self {
            best_option: valuation.best_option,
            results: valuation.results,
            market_baseline,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransferRequest {
    pub points: PointsInput,
    pub partner: String,
    #[serde(default)]
    pub status: StatusTier,
    #[serde(default)]
    pub is_rent_day: bool,
}

/// Points typed by a user: either a JSON number or free text like `"20,000"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PointsInput {
    Number(u64),
    Text(String),
}

impl PointsInput {
    pub fn points(&self) -> u64 {
        match self {
            PointsInput::Number(points) => *points,
            PointsInput::Text(text) => parse_points(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferQuote {
    pub partner: String,
    pub points: u64,
    pub transferred_points: u64,
}

/// Runs flight and hotel searches against the award charts.
pub struct Optimizer {
    charts: Arc<AwardCharts>,
    resolver: CashPriceResolver,
    flight_engine: ValuationEngine,
    hotel_engine: ValuationEngine,
}

impl Optimizer {
    pub fn new(charts: Arc<AwardCharts>, resolver: CashPriceResolver) -> Self {
        Self {
            charts,
            resolver,
            flight_engine: ValuationEngine::flight(),
            hotel_engine: ValuationEngine::hotel(),
        }
    }

    pub fn charts(&self) -> &AwardCharts {
        &self.charts
    }

    pub fn resolver(&self) -> &CashPriceResolver {
        &self.resolver
    }

    pub async fn optimize_flight(
        &self,
        search: &FlightSearch,
    ) -> Result<OptimizationReport<FlightBaseline>> {
        let query = RouteQuery::new(&search.origin, &search.destination, &search.date);
        let cash_price = self.resolver.resolve(&query).await;
        let options = self.charts.flight_options(&query.route_key());

        let valuation = self
            .flight_engine
            .evaluate(cash_price, options, search.is_rent_day)?;

        info!(
            route = %query,
            rent_day = search.is_rent_day,
            %cash_price,
            best = %valuation.best_option.partner,
            cpp = %valuation.best_option.cpp,
            "Optimized flight"
        );

        Ok(OptimizationReport::new(valuation, FlightBaseline { cash_price }))
    }

    pub async fn optimize_hotel(
        &self,
        search: &HotelSearch,
    ) -> Result<OptimizationReport<HotelBaseline>> {
        let city = self.charts.city_for(&search.city_code);
        let property = self.charts.property(&city);
        let season = Season::from_date_str(&search.date);
        let nights = stay_nights(&search.date, search.return_date.as_deref());

        let total_cash = property.base_cash * Decimal::from(nights);
        let options: Vec<AwardOption> = HotelProgram::ALL
            .iter()
            .filter_map(|&program| {
                let per_night = self.charts.lookup_points(program, property.tier, season)?;
                let total_points = u64::from(per_night) * u64::from(nights);
                Some(AwardOption::new(program.label(), total_points, Decimal::ZERO))
            })
            .collect();

        let valuation = self
            .hotel_engine
            .evaluate(total_cash, &options, search.is_rent_day)?;

        info!(
            %city,
            property = %property.name,
            ?season,
            nights,
            rent_day = search.is_rent_day,
            best = %valuation.best_option.partner,
            "Optimized hotel"
        );

        Ok(OptimizationReport::new(
            valuation,
            HotelBaseline {
                property: property.name.clone(),
                cash_price: total_cash,
            },
        ))
    }

    pub fn quote_transfer(&self, request: &TransferRequest) -> Result<TransferQuote> {
        let partner = find_partner(&request.partner)?;
        let points = request.points.points();
        let transferred_points =
            calculate_transfer(points, partner, request.status, request.is_rent_day);

        Ok(TransferQuote {
            partner: partner.name.to_string(),
            points,
            transferred_points,
        })
    }
}

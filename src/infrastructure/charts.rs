//! Built-in award charts, hotel catalog and airport list.
//!
//! Everything here is constructed once at startup and only read afterwards;
//! share an [`AwardCharts`] behind an `Arc`.

use crate::domain::award::{AwardOption, HotelProgram, HotelProperty, Location};
use crate::domain::calendar::Season;
use rust_decimal_macros::dec;
use std::collections::{BTreeMap, HashMap};

/// Tier used when a property's tier is missing from a program's chart.
pub const DEFAULT_HOTEL_TIER: u8 = 6;

pub static SUPPORTED_LOCATIONS: [Location; 12] = [
    Location {
        code: "JFK",
        name: "New York (JFK)",
    },
    Location {
        code: "LHR",
        name: "London Heathrow",
    },
    Location {
        code: "CDG",
        name: "Paris Charles de Gaulle",
    },
    Location {
        code: "HND",
        name: "Tokyo Haneda",
    },
    Location {
        code: "NRT",
        name: "Tokyo Narita",
    },
    Location {
        code: "DXB",
        name: "Dubai International",
    },
    Location {
        code: "SIN",
        name: "Singapore Changi",
    },
    Location {
        code: "LAX",
        name: "Los Angeles",
    },
    Location {
        code: "SFO",
        name: "San Francisco",
    },
    Location {
        code: "MIA",
        name: "Miami International",
    },
    Location {
        code: "EZE",
        name: "Buenos Aires",
    },
    Location {
        code: "SYD",
        name: "Sydney Kingsford Smith",
    },
];

/// Points per night for one hotel tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierRates {
    pub standard: u32,
    pub peak: Option<u32>,
}

impl TierRates {
    pub fn new(standard: u32, peak: u32) -> Self {
        Self {
            standard,
            peak: Some(peak),
        }
    }

    /// Rate for `season`; a tier without a peak rate charges standard.
    pub fn for_season(&self, season: Season) -> u32 {
        match season {
            Season::Standard => self.standard,
            Season::Peak => self.peak.unwrap_or(self.standard),
        }
    }
}

/// One program's tier/season chart.
#[derive(Debug, Clone, Default)]
pub struct HotelChart {
    tiers: BTreeMap<u8, TierRates>,
}

impl HotelChart {
    pub fn with_tier(mut self, tier: u8, rates: TierRates) -> Self {
        self.tiers.insert(tier, rates);
        self
    }

    /// Points per night, falling back to [`DEFAULT_HOTEL_TIER`] for unknown tiers.
    pub fn points_per_night(&self, tier: u8, season: Season) -> Option<u32> {
        self.tiers
            .get(&tier)
            .or_else(|| self.tiers.get(&DEFAULT_HOTEL_TIER))
            .map(|rates| rates.for_season(season))
    }
}

/// Static award data: flight routes, hotel charts and the hotel catalog.
#[derive(Debug, Clone)]
pub struct AwardCharts {
    flight_routes: HashMap<String, Vec<AwardOption>>,
    fallback_flight: Vec<AwardOption>,
    hotel_charts: HashMap<HotelProgram, HotelChart>,
    hotel_catalog: HashMap<String, HotelProperty>,
    fallback_property: HotelProperty,
    airport_cities: HashMap<String, String>,
}

impl AwardCharts {
    pub fn builtin() -> Self {
        let flight_routes = [
            (
                "JFK-LHR",
                vec![
                    AwardOption::new("Virgin Atlantic", 20000, dec!(150)),
                    AwardOption::new("BA Avios", 25000, dec!(200)),
                ],
            ),
            (
                "JFK-CDG",
                vec![
                    AwardOption::new("Air France", 15000, dec!(80)),
                    AwardOption::new("Delta", 30000, dec!(5.60)),
                ],
            ),
            (
                "JFK-DXB",
                vec![
                    AwardOption::new("Emirates", 72500, dec!(100)),
                    AwardOption::new("Air Canada (Partner)", 55000, dec!(50)),
                ],
            ),
            (
                "LAX-HND",
                vec![
                    AwardOption::new("JAL (via BA)", 25750, dec!(45)),
                    AwardOption::new("American Airlines", 35000, dec!(5.60)),
                ],
            ),
            (
                "SFO-SIN",
                vec![
                    AwardOption::new("Singapore Airlines", 40000, dec!(25)),
                    AwardOption::new("United", 55000, dec!(5.60)),
                ],
            ),
            (
                "MIA-EZE",
                vec![
                    AwardOption::new("American Airlines", 20000, dec!(5.60)),
                    AwardOption::new("LATAM", 25000, dec!(30)),
                ],
            ),
            (
                "SYD-LAX",
                vec![
                    AwardOption::new("Qantas", 45000, dec!(120)),
                    AwardOption::new("American Airlines", 40000, dec!(5.60)),
                ],
            ),
        ]
        .into_iter()
        .map(|(route, options)| (route.to_string(), options))
        .collect();

        let fallback_flight = vec![
            AwardOption::new("United (Star Alliance)", 35000, dec!(50)),
            AwardOption::new("British Airways (Oneworld)", 30000, dec!(150)),
            AwardOption::new("Flying Blue (SkyTeam)", 25000, dec!(80)),
        ];

        let hotel_charts = HashMap::from([
            (
                HotelProgram::Hyatt,
                HotelChart::default()
                    .with_tier(1, TierRates::new(5000, 6500))
                    .with_tier(6, TierRates::new(25000, 29000))
                    .with_tier(7, TierRates::new(30000, 35000))
                    .with_tier(8, TierRates::new(40000, 45000)),
            ),
            (
                HotelProgram::Marriott,
                HotelChart::default()
                    .with_tier(1, TierRates::new(20000, 25000))
                    .with_tier(6, TierRates::new(50000, 60000))
                    .with_tier(7, TierRates::new(60000, 70000))
                    .with_tier(8, TierRates::new(85000, 100000)),
            ),
            (
                HotelProgram::Ihg,
                HotelChart::default()
                    .with_tier(1, TierRates::new(30000, 40000))
                    .with_tier(6, TierRates::new(70000, 85000))
                    .with_tier(7, TierRates::new(80000, 100000))
                    .with_tier(8, TierRates::new(120000, 150000)),
            ),
        ]);

        let hotel_catalog = [
            ("NYC", HotelProperty::new("Park Hyatt New York", 8, dec!(1200))),
            ("PAR", HotelProperty::new("Park Hyatt Paris-Vendôme", 8, dec!(1600))),
            ("TYO", HotelProperty::new("Andaz Tokyo Toranomon Hills", 7, dec!(950))),
            ("LON", HotelProperty::new("The London EDITION", 7, dec!(800))),
            ("DXB", HotelProperty::new("Al Maha Desert Resort", 8, dec!(1800))),
            ("SIN", HotelProperty::new("Marina Bay Sands (Partner)", 6, dec!(600))),
            ("LAX", HotelProperty::new("Waldorf Astoria Beverly Hills", 8, dec!(900))),
        ]
        .into_iter()
        .map(|(city, property)| (city.to_string(), property))
        .collect();

        let airport_cities = [
            ("JFK", "NYC"),
            ("LHR", "LON"),
            ("CDG", "PAR"),
            ("HND", "TYO"),
            ("NRT", "TYO"),
            ("DXB", "DXB"),
            ("SIN", "SIN"),
            ("LAX", "LAX"),
        ]
        .into_iter()
        .map(|(airport, city)| (airport.to_string(), city.to_string()))
        .collect();

        Self {
            flight_routes,
            fallback_flight,
            hotel_charts,
            hotel_catalog,
            fallback_property: HotelProperty::new("Luxury Collection Hotel", 5, dec!(500)),
            airport_cities,
        }
    }

    /// Number of routes with a published award chart.
    pub fn route_count(&self) -> usize {
        self.flight_routes.len()
    }

    /// Options for `route_key` (`ORIGIN-DESTINATION`), or the generic
    /// three-alliance list when the route has no chart.
    pub fn flight_options(&self, route_key: &str) -> &[AwardOption] {
        match self.flight_routes.get(route_key) {
            Some(options) if !options.is_empty() => options,
            _ => &self.fallback_flight,
        }
    }

    /// City code for an airport code; codes that are not airports we know
    /// are treated as city codes already.
    pub fn city_for(&self, code: &str) -> String {
        let code = code.trim().to_uppercase();
        self.airport_cities.get(&code).cloned().unwrap_or(code)
    }

    /// Catalog property for a city, or the generic luxury fallback.
    pub fn property(&self, city: &str) -> &HotelProperty {
        self.hotel_catalog
            .get(city)
            .unwrap_or(&self.fallback_property)
    }

    /// Points per night for `program` at `tier` in `season`.
    ///
    /// Unknown tiers use [`DEFAULT_HOTEL_TIER`]. `None` when the program has
    /// no chart at all.
    pub fn lookup_points(&self, program: HotelProgram, tier: u8, season: Season) -> Option<u32> {
        self.hotel_charts
            .get(&program)
            .and_then(|chart| chart.points_per_night(tier, season))
    }

    pub fn locations(&self) -> &'static [Location] {
        &SUPPORTED_LOCATIONS
    }

    #[cfg(test)]
    pub(crate) fn without_hotel_chart(mut self, program: HotelProgram) -> Self {
        self.hotel_charts.remove(&program);
        self
    }
}

impl Default for AwardCharts {
    fn default() -> Self {
        Self::builtin()
    }
}

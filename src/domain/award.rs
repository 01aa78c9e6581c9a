use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// A single way to pay for a trip with points.
///
/// Options live in the static award charts and are never mutated; the
/// valuation engine reads them together with a cash price to score them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AwardOption {
    /// Loyalty program or airline the points are redeemed with.
    pub partner: String,
    /// Points charged before any rent-day discount.
    pub point_cost: u64,
    /// Cash still owed on top of the points (taxes, carrier fees).
    #[serde(with = "rust_decimal::serde::float")]
    pub cash_tax: Decimal,
}

impl AwardOption {
    pub fn new(partner: impl Into<String>, point_cost: u64, cash_tax: Decimal) -> Self {
        Self {
            partner: partner.into(),
            point_cost,
            cash_tax,
        }
    }
}

/// Hotel loyalty programs with a published tier/season chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HotelProgram {
    Hyatt,
    Marriott,
    Ihg,
}

impl HotelProgram {
    /// Programs in the order they are scored and listed.
    pub const ALL: [HotelProgram; 3] = [
        HotelProgram::Hyatt,
        HotelProgram::Marriott,
        HotelProgram::Ihg,
    ];

    /// Partner label used in valuation results.
    pub fn label(&self) -> &'static str {
        match self {
            HotelProgram::Hyatt => "HYATT",
            HotelProgram::Marriott => "MARRIOTT",
            HotelProgram::Ihg => "IHG",
        }
    }
}

impl fmt::Display for HotelProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A bookable property from the hotel catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotelProperty {
    pub name: String,
    pub tier: u8,
    /// Nightly cash rate.
    #[serde(with = "rust_decimal::serde::float")]
    pub base_cash: Decimal,
}

impl HotelProperty {
    pub fn new(name: impl Into<String>, tier: u8, base_cash: Decimal) -> Self {
        Self {
            name: name.into(),
            tier,
            base_cash,
        }
    }
}

/// An airport the front end offers in its pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub code: &'static str,
    pub name: &'static str,
}

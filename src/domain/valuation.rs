use super::award::AwardOption;
use crate::error::{PointPilotError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

const CENTS_PER_UNIT: Decimal = dec!(100);
const RENT_DAY_DIVISOR: Decimal = dec!(2);
const MONEY_DP: u32 = 2;

/// Value tier of a redemption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValueStatus {
    Excellent,
    Good,
    Poor,
}

/// Maps a cents-per-point figure onto a [`ValueStatus`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClassificationPolicy {
    /// EXCELLENT at or above `excellent`, GOOD at or above `good`, POOR below.
    Tiered { excellent: Decimal, good: Decimal },
    /// EXCELLENT strictly above `excellent`, GOOD otherwise. Never POOR.
    Binary { excellent: Decimal },
}

impl ClassificationPolicy {
    pub fn classify(&self, cpp: Decimal) -> ValueStatus {
        match *self {
            ClassificationPolicy::Tiered { excellent, good } => {
                if cpp >= excellent {
                    ValueStatus::Excellent
                } else if cpp >= good {
                    ValueStatus::Good
                } else {
                    ValueStatus::Poor
                }
            }
            ClassificationPolicy::Binary { excellent } => {
                if cpp > excellent {
                    ValueStatus::Excellent
                } else {
                    ValueStatus::Good
                }
            }
        }
    }
}

/// How the cash saved by redeeming is reported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SavingsPolicy {
    /// Cash price minus the taxes still paid.
    NetCash,
    /// `((net × 100 / markup) − points) × markup / 100`: the net price
    /// converted to points at `markup`, less the points spent, converted back.
    InverseMarkup { markup: Decimal },
}

impl SavingsPolicy {
    /// Savings rounded to cents, or `None` if the arithmetic overflows.
    pub fn savings(&self, net_value: Decimal, effective_points: Decimal) -> Option<Decimal> {
        let savings = match *self {
            SavingsPolicy::NetCash => net_value,
            SavingsPolicy::InverseMarkup { markup } => net_value
                .checked_mul(CENTS_PER_UNIT)?
                .checked_div(markup)?
                .checked_sub(effective_points)?
                .checked_mul(markup)?
                .checked_div(CENTS_PER_UNIT)?,
        };
        Some(savings.round_dp(MONEY_DP))
    }
}

/// Classification and savings rules applied together for one travel domain.
///
/// Flights and hotels score differently and are kept apart on purpose:
/// callers pick [`ValuationPolicy::FLIGHT`] or [`ValuationPolicy::HOTEL`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValuationPolicy {
    pub classification: ClassificationPolicy,
    pub savings: SavingsPolicy,
}

impl ValuationPolicy {
    pub const FLIGHT: Self = Self {
        classification: ClassificationPolicy::Tiered {
            excellent: dec!(2.0),
            good: dec!(1.1),
        },
        savings: SavingsPolicy::NetCash,
    };

    pub const HOTEL: Self = Self {
        classification: ClassificationPolicy::Binary {
            excellent: dec!(2.0),
        },
        savings: SavingsPolicy::InverseMarkup {
            markup: dec!(1.25),
        },
    };
}

/// One scored redemption option.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuationResult {
    pub partner: String,
    pub points_required: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub cpp: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub cash_savings: Decimal,
    pub status: ValueStatus,
}

/// Ranked results with the top entry surfaced separately.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Valuation {
    pub best_option: ValuationResult,
    pub results: Vec<ValuationResult>,
}

/// Scores award options against a cash price.
#[derive(Debug, Clone, Copy)]
pub struct ValuationEngine {
    policy: ValuationPolicy,
}

impl ValuationEngine {
    pub fn new(policy: ValuationPolicy) -> Self {
        Self { policy }
    }

    pub fn flight() -> Self {
        Self::new(ValuationPolicy::FLIGHT)
    }

    pub fn hotel() -> Self {
        Self::new(ValuationPolicy::HOTEL)
    }

    /// Scores a single option.
    ///
    /// Fails with [`PointPilotError::ValueOverflow`] when the cash price is
    /// too large to express in cents.
    pub fn score(
        &self,
        cash_price: Decimal,
        option: &AwardOption,
        rent_day: bool,
    ) -> Result<ValuationResult> {
        let (effective_points, points_required) = if rent_day {
            (
                Decimal::from(option.point_cost) / RENT_DAY_DIVISOR,
                option.point_cost / 2,
            )
        } else {
            (Decimal::from(option.point_cost), option.point_cost)
        };

        let overflow = || PointPilotError::ValueOverflow {
            partner: option.partner.clone(),
        };
        let net_value = cash_price.checked_sub(option.cash_tax).ok_or_else(overflow)?;
        let raw_cpp = if effective_points > Decimal::ZERO {
            net_value
                .checked_mul(CENTS_PER_UNIT)
                .and_then(|cents| cents.checked_div(effective_points))
                .ok_or_else(overflow)?
        } else {
            Decimal::ZERO
        };
        let cash_savings = self
            .policy
            .savings
            .savings(net_value, effective_points)
            .ok_or_else(overflow)?;

        // Tier is decided on the unrounded figure: 1.996 reports as 2.00 but is GOOD.
        Ok(ValuationResult {
            partner: option.partner.clone(),
            points_required,
            cpp: raw_cpp.round_dp(MONEY_DP),
            cash_savings,
            status: self.policy.classification.classify(raw_cpp),
        })
    }

    /// Scores every option and ranks them by cents per point, best first.
    ///
    /// Ties keep the order the options were given in. Fails when `options`
    /// is empty or an option cannot be scored.
    pub fn evaluate(
        &self,
        cash_price: Decimal,
        options: &[AwardOption],
        rent_day: bool,
    ) -> Result<Valuation> {
        let mut results = options
            .iter()
            .map(|option| self.score(cash_price, option, rent_day))
            .collect::<Result<Vec<_>>>()?;

        // `sort_by` is stable, so equal cpp keeps chart order.
        results.sort_by(|a, b| b.cpp.cmp(&a.cpp));

        let best_option = results
            .first()
            .cloned()
            .ok_or(PointPilotError::NoOptionsAvailable)?;

        Ok(Valuation {
            best_option,
            results,
        })
    }
}

//! Point transfers from the rewards currency into partner programs.
//!
//! Transfers convert at a partner ratio, Marriott adds a bulk bonus for
//! every full 20k block, and on rent day the member's status tier adds a
//! percentage bonus on top.

use crate::error::{PointPilotError, Result};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

const MARRIOTT_BONUS_BLOCK: u64 = 20_000;
const MARRIOTT_BONUS_POINTS: u64 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PartnerKind {
    Hotel,
    Airline,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferPartner {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: PartnerKind,
    #[serde(with = "rust_decimal::serde::float")]
    pub ratio: Decimal,
    /// Marriott-style bonus of 5k points per 20k transferred.
    pub bulk_bonus: bool,
}

pub static TRANSFER_PARTNERS: [TransferPartner; 6] = [
    TransferPartner {
        id: "hyatt",
        name: "World of Hyatt",
        kind: PartnerKind::Hotel,
        ratio: dec!(1.0),
        bulk_bonus: false,
    },
    TransferPartner {
        id: "marriott",
        name: "Marriott Bonvoy",
        kind: PartnerKind::Hotel,
        ratio: dec!(1.0),
        bulk_bonus: true,
    },
    TransferPartner {
        id: "accor",
        name: "Accor Live Limitless",
        kind: PartnerKind::Hotel,
        ratio: dec!(0.666),
        bulk_bonus: false,
    },
    TransferPartner {
        id: "united",
        name: "United MileagePlus",
        kind: PartnerKind::Airline,
        ratio: dec!(1.0),
        bulk_bonus: false,
    },
    TransferPartner {
        id: "virgin",
        name: "Virgin Atlantic",
        kind: PartnerKind::Airline,
        ratio: dec!(1.0),
        bulk_bonus: false,
    },
    TransferPartner {
        id: "flyingblue",
        name: "Air France/KLM",
        kind: PartnerKind::Airline,
        ratio: dec!(1.0),
        bulk_bonus: false,
    },
];

/// Looks up a transfer partner by id, case-insensitively.
pub fn find_partner(id: &str) -> Result<&'static TransferPartner> {
    TRANSFER_PARTNERS
        .iter()
        .find(|partner| partner.id.eq_ignore_ascii_case(id.trim()))
        .ok_or_else(|| PointPilotError::UnknownPartner(id.to_string()))
}

/// Member status, which sets the rent-day transfer bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatusTier {
    #[default]
    Blue,
    Silver,
    Gold,
    Platinum,
}

impl StatusTier {
    pub const ALL: [StatusTier; 4] = [
        StatusTier::Blue,
        StatusTier::Silver,
        StatusTier::Gold,
        StatusTier::Platinum,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StatusTier::Blue => "Blue Member",
            StatusTier::Silver => "Silver Member",
            StatusTier::Gold => "Gold Member",
            StatusTier::Platinum => "Platinum Member",
        }
    }

    pub fn bonus_multiplier(&self) -> Decimal {
        match self {
            StatusTier::Blue => dec!(0.75),
            StatusTier::Silver => dec!(1.00),
            StatusTier::Gold => dec!(1.25),
            StatusTier::Platinum => dec!(1.50),
        }
    }
}

/// Reads a points amount from free-form input such as `"20,000 pts"`.
///
/// Every non-digit is dropped; an input with no digits, or one too large for
/// a `u64`, reads as zero.
pub fn parse_points(input: &str) -> u64 {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// Points credited to `partner` for a transfer of `points`.
pub fn calculate_transfer(
    points: u64,
    partner: &TransferPartner,
    status: StatusTier,
    rent_day: bool,
) -> u64 {
    if points == 0 {
        return 0;
    }

    let mut result = Decimal::from(points) * partner.ratio;

    if partner.bulk_bonus {
        let blocks = points / MARRIOTT_BONUS_BLOCK;
        result += Decimal::from(blocks * MARRIOTT_BONUS_POINTS);
    }

    if rent_day {
        result += result * status.bonus_multiplier();
    }

    result.floor().to_u64().unwrap_or(u64::MAX)
}

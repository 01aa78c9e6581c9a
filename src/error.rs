use thiserror::Error;

#[derive(Error, Debug)]
pub enum PointPilotError {
    #[error("No redemption options available")]
    NoOptionsAvailable,
    #[error("Unknown transfer partner: {0}")]
    UnknownPartner(String),
    #[error("Invalid travel date '{input}': {source}")]
    InvalidDate {
        input: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("Value of the {partner} redemption is out of range")]
    ValueOverflow { partner: String },
    #[error("Price lookup error: {0}")]
    PriceLookup(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Logging error: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, PointPilotError>;

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use pointpilot::application::optimizer::{FlightSearch, HotelSearch, PointsInput, TransferRequest};
use pointpilot::config::{Cli, Command};
use pointpilot::interfaces::http;
use pointpilot::logging;
use serde::Serialize;
use std::io::{self, Write};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(&cli.log_filter).into_diagnostic()?;

    let optimizer = cli.pricing.build_optimizer().into_diagnostic()?;

    match cli.command {
        Command::Serve(args) => {
            let addr: SocketAddr = format!("{}:{}", args.host, args.port)
                .parse()
                .into_diagnostic()?;
            http::serve(addr, Arc::new(optimizer)).await.into_diagnostic()?;
        }
        Command::Flight(args) => {
            let search = FlightSearch {
                origin: args.origin,
                destination: args.destination,
                date: args.date,
                return_date: args.return_date,
                is_rent_day: args.rent_day,
            };
            let report = optimizer.optimize_flight(&search).await.into_diagnostic()?;
            print_json(&report)?;
        }
        Command::Hotel(args) => {
            let search = HotelSearch {
                city_code: args.city_code,
                date: args.date,
                return_date: args.return_date,
                is_rent_day: args.rent_day,
            };
            let report = optimizer.optimize_hotel(&search).await.into_diagnostic()?;
            print_json(&report)?;
        }
        Command::Transfer(args) => {
            let request = TransferRequest {
                points: PointsInput::Text(args.points),
                partner: args.partner,
                status: args.status,
                is_rent_day: args.rent_day,
            };
            let quote = optimizer.quote_transfer(&request).into_diagnostic()?;
            print_json(&quote)?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value).into_diagnostic()?;
    writeln!(out).into_diagnostic()?;
    Ok(())
}

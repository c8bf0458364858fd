//! # atelier
//!
//! Entry point: parse arguments, set up logging, run one command, print
//! the report and map failures to an exit status.
//!
//! ```text
//! $ atelier statements --records work-status.json --partner A파트너
//! Saved 거래명세서
//!   ./거래명세서_A파트너_2025-09-16.pdf
//! A파트너: 공급가액 4,000원 / 부가세 400원 / 합계금액 4,400원
//! ```

use clap::Parser;
use std::process::ExitCode;

use atelier_cli::{init_tracing, run, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(&cli).await {
        Ok(report) => {
            if cli.json {
                match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        eprintln!("error: {e}");
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                print!("{report}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(code = ?err.code, "{}", err.message);
            if cli.json {
                if let Ok(json) = serde_json::to_string_pretty(&err) {
                    eprintln!("{json}");
                }
            } else {
                eprintln!("error: {}", err.message);
            }
            ExitCode::from(err.exit_status().clamp(1, 255) as u8)
        }
    }
}

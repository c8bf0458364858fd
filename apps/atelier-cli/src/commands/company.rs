//! # Company Profile Commands
//!
//! The company profile is the supplier on every statement and quote.

use clap::Subcommand;
use std::path::{Path, PathBuf};
use tracing::info;

use atelier_core::sanitize::sanitize_company_info;
use atelier_core::CompanyInfo;

use super::Report;
use crate::context::AppContext;
use crate::error::{CliError, CliResult};

#[derive(Debug, Clone, Subcommand)]
pub enum CompanyCommand {
    /// Show the company profile
    Show,

    /// Replace the company profile with a JSON object
    Import {
        /// JSON file with one company object
        file: PathBuf,
    },
}

pub async fn run(ctx: &AppContext, command: &CompanyCommand) -> CliResult<Report> {
    match command {
        CompanyCommand::Show => {
            let info = ctx.store.load_company_info().await?;
            Ok(Report::new(info.company_name.clone()).with_lines(profile_lines(&info)))
        }
        CompanyCommand::Import { file } => import(ctx, file).await,
    }
}

async fn import(ctx: &AppContext, file: &Path) -> CliResult<Report> {
    let text = tokio::fs::read_to_string(file)
        .await
        .map_err(|e| CliError::io(file, e))?;
    let raw: serde_json::Value =
        serde_json::from_str(&text).map_err(|e| CliError::parse(file, e))?;
    if !raw.is_object() {
        return Err(CliError::invalid_input(format!(
            "{} must contain a JSON object",
            file.display()
        )));
    }

    let info = sanitize_company_info(&raw);
    ctx.store.save_company_info(&info).await?;

    info!(file = %file.display(), company = %info.company_name, "Company profile imported");
    Ok(Report::new(format!("Imported company profile '{}'", info.company_name))
        .with_lines(profile_lines(&info)))
}

fn profile_lines(info: &CompanyInfo) -> Vec<String> {
    let optional = |value: &Option<String>| value.clone().unwrap_or_default();
    let seal = match info.seal_image.as_deref() {
        Some(seal) if seal.starts_with("data:") => "(embedded image)".to_string(),
        Some(seal) => seal.to_string(),
        None => String::new(),
    };

    vec![
        format!("상호: {}", info.company_name),
        format!("등록번호: {}", info.registration_number),
        format!("사업장: {}", info.business_address),
        format!("대표자: {}", optional(&info.representative_name)),
        format!("연락처: {}", info.phone),
        format!("입금 계좌: {}", info.account_number),
        format!("직인: {seal}"),
    ]
}

//! # Partner Commands
//!
//! `atelier partners list` prints the registry; `atelier partners import
//! FILE` replaces it with a JSON array. Imported entries go through the
//! same sanitization as stored ones, so exports from older admin versions
//! (`businessNumber`, `address`, no `uniqueId`) load unchanged.

use clap::Subcommand;
use std::path::{Path, PathBuf};
use tracing::info;

use atelier_core::sanitize::sanitize_partners;
use atelier_core::PartnerRecord;

use super::Report;
use crate::context::AppContext;
use crate::error::{CliError, CliResult};

#[derive(Debug, Clone, Subcommand)]
pub enum PartnersCommand {
    /// List registered partners
    List,

    /// Replace the partner registry with a JSON array
    Import {
        /// JSON file with an array of partner objects
        file: PathBuf,
    },
}

pub async fn run(ctx: &AppContext, command: &PartnersCommand) -> CliResult<Report> {
    match command {
        PartnersCommand::List => list(ctx).await,
        PartnersCommand::Import { file } => import(ctx, file).await,
    }
}

async fn list(ctx: &AppContext) -> CliResult<Report> {
    let partners = ctx.store.load_partners().await?;
    let lines = partners.iter().map(partner_line).collect();
    Ok(Report::new(format!("{} partner(s)", partners.len())).with_lines(lines))
}

async fn import(ctx: &AppContext, file: &Path) -> CliResult<Report> {
    let text = tokio::fs::read_to_string(file)
        .await
        .map_err(|e| CliError::io(file, e))?;
    let raw: serde_json::Value =
        serde_json::from_str(&text).map_err(|e| CliError::parse(file, e))?;

    let partners = sanitize_partners(&raw).ok_or_else(|| {
        CliError::invalid_input(format!("{} must contain a JSON array", file.display()))
    })?;
    ctx.store.save_partners(&partners).await?;

    info!(file = %file.display(), count = partners.len(), "Partners imported");
    let lines = partners.iter().map(partner_line).collect();
    Ok(Report::new(format!("Imported {} partner(s)", partners.len())).with_lines(lines))
}

/// `A파트너  김파트  010-7172-9698  /request/apartner-002`
fn partner_line(partner: &PartnerRecord) -> String {
    format!(
        "{}  {}  {}  {}",
        partner.name,
        partner.contact_person,
        partner.phone,
        partner.request_path()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testing::memory_context;
    use crate::error::ErrorCode;

    #[tokio::test]
    async fn test_list_defaults() {
        let (ctx, _sink) = memory_context();
        let report = run(&ctx, &PartnersCommand::List).await.unwrap();
        assert_eq!(report.message, "3 partner(s)");
        assert_eq!(
            report.lines[1],
            "A파트너  김파트  010-7172-9698  /request/apartner-002"
        );
    }

    #[tokio::test]
    async fn test_import_legacy_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("partners.json");
        std::fs::write(
            &file,
            r#"[{"id":"p1","name":"Legacy Co","businessNumber":"999-99-99999","address":"부산"}]"#,
        )
        .unwrap();

        let (ctx, _sink) = memory_context();
        let report = run(&ctx, &PartnersCommand::Import { file }).await.unwrap();
        assert_eq!(report.message, "Imported 1 partner(s)");

        let partners = ctx.store.load_partners().await.unwrap();
        assert_eq!(partners.len(), 1);
        assert_eq!(partners[0].registration_number, "999-99-99999");
        assert_eq!(partners[0].business_address, "부산");
        assert_eq!(partners[0].unique_id, "legacyco-0");
    }

    #[tokio::test]
    async fn test_import_rejects_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("partners.json");
        std::fs::write(&file, r#"[{"name":"A"},{"name":"A"}]"#).unwrap();

        let (ctx, _sink) = memory_context();
        let err = run(&ctx, &PartnersCommand::Import { file }).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(ctx.store.load_partners().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_import_rejects_object() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("partners.json");
        std::fs::write(&file, r#"{"name":"A"}"#).unwrap();

        let (ctx, _sink) = memory_context();
        let err = run(&ctx, &PartnersCommand::Import { file }).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }
}

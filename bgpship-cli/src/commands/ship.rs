//! `bgpship ship` command handler

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use bgpship_core::Credentials;
use bgpship_core::config::{BgpshipConfig, SecretProviderKind, SecretsConfig};
use bgpship_shipper::{
    Delivery, DeliveryOutcome, DumpShipper, EnvSecretProvider, IngestionClient,
    KeyVaultSecretProvider, ShipReport, fetch_credentials,
};

use crate::cli::{SecretsSource, ShipArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `ship` command.
///
/// Credentials are fetched before the dump is touched, so a missing secret
/// leaves the active file exactly as it was. A dry run still fetches them.
///
/// # Errors
///
/// Rotation, read and secret failures map to their own exit codes; a
/// rejected or undeliverable batch is rendered and then reported as
/// [`CliError::Delivery`].
pub async fn execute(
    args: ShipArgs,
    mut config: BgpshipConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    apply_overrides(&mut config, &args);
    config.validate()?;

    let credentials = fetch_from_provider(&config.secrets).await?;

    let delivery = if args.dry_run {
        info!("dry run requested, batch will be printed instead of sent");
        Delivery::DryRun
    } else {
        Delivery::Live(IngestionClient::new(credentials, &config.ingestion)?)
    };

    let shipper = DumpShipper::builder()
        .config(&config)
        .delivery(delivery)
        .build()?;

    info!(
        active = %config.rotation.active_path.display(),
        dry_run = args.dry_run,
        "starting ship cycle"
    );
    let report = shipper.ship().await?;

    if let ShipReport::DryRunPrinted {
        records,
        dropped_keys,
        body,
    } = &report
    {
        writer.raw(body)?;
        info!(records, dropped_keys, "dry run complete");
        return Ok(());
    }

    let summary = ShipSummary {
        active_path: config.rotation.active_path.display().to_string(),
        report,
    };
    writer.render(&summary)?;

    match &summary.report {
        ShipReport::Shipped { outcome, .. } if !outcome.is_delivered() => {
            Err(CliError::Delivery(describe_failure(outcome)))
        }
        _ => Ok(()),
    }
}

/// Apply `ship` flags on top of file and environment settings.
fn apply_overrides(config: &mut BgpshipConfig, args: &ShipArgs) {
    if let Some(ref vault_name) = args.vault_name {
        config.secrets.vault_name = Some(vault_name.clone());
    }
    if let Some(ref mrt_file) = args.mrt_file {
        config.rotation.active_path = mrt_file.clone();
        config.rotation.staging_path = staging_beside(mrt_file);
    }
    if let Some(source) = args.secrets {
        config.secrets.provider = provider_kind(source);
    }
}

/// `<mrt_file>.tmp`, kept on the same filesystem as the dump so the rename works.
fn staging_beside(mrt_file: &Path) -> PathBuf {
    let mut name = OsString::from(mrt_file.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

fn provider_kind(source: SecretsSource) -> SecretProviderKind {
    match source {
        SecretsSource::Env => SecretProviderKind::Env,
        SecretsSource::KeyVault => SecretProviderKind::KeyVault,
    }
}

async fn fetch_from_provider(secrets: &SecretsConfig) -> Result<Credentials, CliError> {
    let credentials = match secrets.provider {
        SecretProviderKind::KeyVault => {
            let provider = KeyVaultSecretProvider::from_config(secrets)?;
            fetch_credentials(&provider, secrets).await?
        }
        SecretProviderKind::Env => fetch_credentials(&EnvSecretProvider::new(), secrets).await?,
    };
    Ok(credentials)
}

fn describe_failure(outcome: &DeliveryOutcome) -> String {
    match outcome {
        DeliveryOutcome::Delivered { status } => format!("delivered with status {}", status),
        DeliveryOutcome::Rejected { status, body } => {
            format!("endpoint rejected batch with status {}: {}", status, body)
        }
        DeliveryOutcome::TransportFailed { cause } => format!("endpoint unreachable: {}", cause),
    }
}

/// Result of one ship cycle.
#[derive(Serialize)]
pub struct ShipSummary {
    /// Active dump file that was rotated
    pub active_path: String,
    #[serde(flatten)]
    pub report: ShipReport,
}

impl Render for ShipSummary {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Ship: {}", self.active_path.bold())?;

        match &self.report {
            ShipReport::Skipped => {
                writeln!(w, "  Result: {}", "SKIPPED".yellow().bold())?;
                writeln!(w, "  Active dump is empty, nothing rotated")?;
            }
            ShipReport::NoRecords { rotated_bytes } => {
                writeln!(w, "  Result: {}", "NO RECORDS".yellow().bold())?;
                writeln!(w, "  Rotated: {} bytes", rotated_bytes)?;
            }
            ShipReport::DryRunPrinted {
                records,
                dropped_keys,
                ..
            } => {
                writeln!(w, "  Result: {}", "DRY RUN".cyan().bold())?;
                writeln!(w, "  Records: {}", records)?;
                writeln!(w, "  Dropped keys: {}", dropped_keys)?;
            }
            ShipReport::Shipped {
                records,
                dropped_keys,
                body_bytes,
                outcome,
            } => {
                match outcome {
                    DeliveryOutcome::Delivered { status } => {
                        writeln!(w, "  Result: {} ({})", "DELIVERED".green().bold(), status)?;
                    }
                    DeliveryOutcome::Rejected { status, body } => {
                        writeln!(w, "  Result: {} ({})", "REJECTED".red().bold(), status)?;
                        if !body.is_empty() {
                            writeln!(w, "  Response: {}", body.red())?;
                        }
                    }
                    DeliveryOutcome::TransportFailed { cause } => {
                        writeln!(w, "  Result: {}", "TRANSPORT FAILED".red().bold())?;
                        writeln!(w, "  Cause: {}", cause.red())?;
                    }
                }
                writeln!(w, "  Records: {}", records)?;
                writeln!(w, "  Dropped keys: {}", dropped_keys)?;
                writeln!(w, "  Body: {} bytes", body_bytes)?;
            }
        }

        Ok(())
    }
}

//! Scan command implementations

use std::time::Duration;

use chrono::{DateTime, Utc};
use colored::Colorize;
use indicatif::ProgressBar;
use log::{debug, warn};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{parse_filter_params, CommandContext, ScanCreateArgs};
use crate::client::models::{ScanResponse, TaskRecord};
use crate::client::ScansApi;
use crate::error::Result;
use crate::output;
use crate::request::{input_document, synthesize, ScanOverrides};
use crate::source;

/// Scan record for table display
#[derive(Debug, Tabled, Serialize)]
struct ScanDisplay {
    #[tabled(rename = "SCAN ID")]
    id: String,
    #[tabled(rename = "PROJECT ID")]
    project_id: String,
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "CREATED AT")]
    created_at: String,
    #[tabled(rename = "UPDATED AT")]
    updated_at: String,
    #[tabled(rename = "TAGS")]
    tags: String,
    #[tabled(rename = "INITIATOR")]
    initiator: String,
    #[tabled(rename = "ORIGIN")]
    origin: String,
}

impl From<&ScanResponse> for ScanDisplay {
    fn from(scan: &ScanResponse) -> Self {
        let mut tags: Vec<String> = scan
            .tags
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect();
        tags.sort();

        Self {
            id: scan.id.clone(),
            project_id: scan.project_id.clone(),
            status: scan.status.clone(),
            created_at: format_timestamp(scan.created_at),
            updated_at: format_timestamp(scan.updated_at),
            tags: tags.join(","),
            initiator: scan.initiator.clone(),
            origin: origin_from_user_agent(&scan.user_agent),
        }
    }
}

/// Workflow step for table display
#[derive(Debug, Tabled, Serialize)]
struct TaskDisplay {
    #[tabled(rename = "SOURCE")]
    source: String,
    #[tabled(rename = "TIMESTAMP")]
    timestamp: String,
    #[tabled(rename = "INFO")]
    info: String,
}

impl From<&TaskRecord> for TaskDisplay {
    fn from(task: &TaskRecord) -> Self {
        Self {
            source: task.source.clone(),
            timestamp: format_timestamp(task.timestamp),
            info: task.info.clone(),
        }
    }
}

/// Tag key with its values for table display
#[derive(Debug, Tabled, Serialize)]
struct TagDisplay {
    #[tabled(rename = "KEY")]
    key: String,
    #[tabled(rename = "VALUES")]
    values: String,
}

fn format_timestamp(timestamp: Option<DateTime<Utc>>) -> String {
    timestamp
        .map(|t| t.format("%m-%d-%y %H:%M:%S").to_string())
        .unwrap_or_default()
}

/// Condense a client user-agent string to `name major`
fn origin_from_user_agent(user_agent: &str) -> String {
    let Some(product) = user_agent.split_whitespace().next() else {
        return String::new();
    };
    match product.split_once('/') {
        Some((name, version)) => {
            let major = version.split('.').next().unwrap_or(version);
            format!("{name} {major}")
        }
        None => product.to_string(),
    }
}

/// Run the scan create command: synthesize the request, resolve and upload
/// the sources, submit, and render the created scan.
pub async fn create(ctx: &CommandContext, args: ScanCreateArgs) -> Result<()> {
    let document = input_document(args.input_file.as_deref(), args.input.as_deref())?
        .unwrap_or_else(|| "{}".to_string());

    let overrides = ScanOverrides {
        project_name: args.project_name,
        project_source_type: args.project_source_type,
        project_type: args.project_type,
        incremental: args.incremental,
        preset_name: args.preset_name,
    };
    let mut request = synthesize(&document, &overrides)?;

    let spinner = (args.source_dir.is_some() || args.sources.is_some()).then(|| {
        let spinner = ProgressBar::new_spinner();
        spinner.set_message("Packaging and uploading sources...");
        spinner.enable_steady_tick(Duration::from_millis(120));
        spinner
    });

    let resolved = source::resolve(
        &ctx.channel,
        args.sources.as_deref(),
        args.source_dir.as_deref(),
        args.filter.as_deref(),
        args.exclusion.as_deref(),
    )
    .await;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let resolved = resolved?;

    for warning in &resolved.warnings {
        warn!("skipped during packaging: {warning}");
    }
    request.upload_url = resolved.upload_url;

    debug!(
        "payload to scans service: {}",
        serde_json::to_string(&request)?
    );

    let scan = ctx.client.create_scan(&request).await?;
    output::print_items(&[ScanDisplay::from(&scan)], ctx.format)
}

/// Run the scan list command
pub async fn list(ctx: &CommandContext, filters: &[String]) -> Result<()> {
    let params = parse_filter_params(filters)?;
    let collection = ctx.client.list_scans(&params).await?;

    let rows: Vec<ScanDisplay> = collection.scans.iter().map(ScanDisplay::from).collect();
    output::print_items(&rows, ctx.format)
}

/// Run the scan show command
pub async fn show(ctx: &CommandContext, scan_id: &str) -> Result<()> {
    let scan = ctx.client.get_scan(scan_id).await?;
    output::print_items(&[ScanDisplay::from(&scan)], ctx.format)
}

/// Run the scan workflow command
pub async fn workflow(ctx: &CommandContext, scan_id: &str) -> Result<()> {
    let tasks = ctx.client.scan_workflow(scan_id).await?;
    let rows: Vec<TaskDisplay> = tasks.iter().map(TaskDisplay::from).collect();
    output::print_items(&rows, ctx.format)
}

/// Run the scan delete command over one or more IDs
pub async fn delete(ctx: &CommandContext, scan_ids: &[String]) -> Result<()> {
    for scan_id in scan_ids {
        ctx.client.delete_scan(scan_id).await?;
        println!("{} Deleted scan {scan_id}", "✓".green());
    }
    Ok(())
}

/// Run the scan cancel command over one or more IDs
pub async fn cancel(ctx: &CommandContext, scan_ids: &[String]) -> Result<()> {
    for scan_id in scan_ids {
        ctx.client.cancel_scan(scan_id).await?;
        println!("{} Canceled scan {scan_id}", "✓".green());
    }
    Ok(())
}

/// Run the scan tags command
pub async fn tags(ctx: &CommandContext) -> Result<()> {
    let tags = ctx.client.scan_tags().await?;

    let mut rows: Vec<TagDisplay> = tags
        .into_iter()
        .map(|(key, values)| TagDisplay {
            key,
            values: values.join(";"),
        })
        .collect();
    rows.sort_by(|a, b| a.key.cmp(&b.key));

    output::print_items(&rows, ctx.format)
}

//! Implementation of the `ecocheck report` commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::context::AppContext;
use crate::cli::output::{
    colorize_status, create_spinner, list_table, output, render_list, truncate, CommandOutput,
};
use crate::domain::models::{ContactNumber, GeoPoint, NewReport, Report, ReportPhoto};
use crate::services::report_service::filter_by_status;

#[derive(Args, Debug)]
pub struct ReportArgs {
    #[command(subcommand)]
    pub command: ReportCommands,
}

#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// List reports
    List {
        /// Only reports you submitted
        #[arg(short, long)]
        mine: bool,

        /// Filter by status (Pending, "Pending Confirmation", "On Going", Resolved)
        #[arg(short, long)]
        status: Option<String>,

        /// Maximum number of reports to display
        #[arg(short, long, default_value = "50")]
        limit: usize,
    },

    /// Submit a new report
    Create(CreateReportArgs),
}

#[derive(Args, Debug)]
pub struct CreateReportArgs {
    /// JPEG photo of the waste
    #[arg(long)]
    pub photo: PathBuf,

    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,

    #[arg(short, long, default_value = "")]
    pub description: String,

    #[arg(long, default_value = "")]
    pub landmark: String,

    /// Address of the site
    #[arg(long, default_value = "")]
    pub location: String,

    /// Override the first name from your profile
    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub middle_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    /// Contact number, 10 digits after +63
    #[arg(long)]
    pub contact: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReportListOutput {
    pub reports: Vec<Report>,
    pub total: usize,
}

impl CommandOutput for ReportListOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["id", "status", "landmark", "location", "created"]);
        for report in &self.reports {
            table.add_row(vec![
                truncate(&report.id, 10),
                colorize_status(report.status.as_str()).to_string(),
                truncate(report.landmark.as_deref().unwrap_or("-"), 24),
                truncate(report.location.as_deref().unwrap_or("-"), 32),
                report
                    .created_at
                    .map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string()),
            ]);
        }
        render_list("report", &table, self.total)
    }
}

#[derive(Debug, Serialize)]
pub struct ReportCreatedOutput {
    pub success: bool,
    pub report: Report,
}

impl CommandOutput for ReportCreatedOutput {
    fn to_human(&self) -> String {
        format!(
            "Report submitted! ({}, status {})",
            self.report.id,
            colorize_status(self.report.status.as_str())
        )
    }
}

pub async fn execute(args: ReportArgs, ctx: &AppContext, json_mode: bool) -> Result<()> {
    match args.command {
        ReportCommands::List {
            mine,
            status,
            limit,
        } => list(ctx, mine, status.as_deref(), limit, json_mode).await,
        ReportCommands::Create(create_args) => create(ctx, create_args, json_mode).await,
    }
}

async fn list(
    ctx: &AppContext,
    mine: bool,
    status: Option<&str>,
    limit: usize,
    json_mode: bool,
) -> Result<()> {
    let service = ctx.reports();
    let spinner = create_spinner("Loading reports...");
    let reports = if mine {
        let identity = ctx.auth().current_identity().await?;
        service.list_mine(&identity).await
    } else {
        service.list().await
    };
    spinner.finish_and_clear();

    let mut reports = reports.context("Failed to load reports.")?;
    if let Some(status) = status {
        reports = filter_by_status(reports, status);
    }
    let total = reports.len();
    reports.truncate(limit);

    output(&ReportListOutput { reports, total }, json_mode);
    Ok(())
}

async fn create(ctx: &AppContext, args: CreateReportArgs, json_mode: bool) -> Result<()> {
    let auth = ctx.auth();
    let mut report = match auth.profile().await {
        Ok(profile) => NewReport::prefilled(&profile),
        Err(err) => {
            tracing::warn!(error = %err, "could not prefill report from profile");
            NewReport::default()
        }
    };

    let bytes = tokio::fs::read(&args.photo)
        .await
        .with_context(|| format!("Failed to read photo {}", args.photo.display()))?;
    report.photo = Some(ReportPhoto { bytes });
    report.position = GeoPoint::new(args.lat, args.lon);
    report.description = args.description;
    report.landmark = args.landmark;
    report.location = args.location;

    if let Some(first) = args.first_name {
        report.first_name = first;
    }
    if let Some(middle) = args.middle_name {
        report.middle_name = middle;
    }
    if let Some(last) = args.last_name {
        report.last_name = last;
    }
    if let Some(contact) = args.contact {
        report.contact = ContactNumber::from_input(&contact);
    }

    let spinner = create_spinner("Submitting report...");
    let created = ctx.reports().submit(&report).await;
    spinner.finish_and_clear();

    output(
        &ReportCreatedOutput {
            success: true,
            report: created?,
        },
        json_mode,
    );
    Ok(())
}

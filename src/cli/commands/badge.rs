//! Implementation of the `ecocheck badge` commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;
use serde::Serialize;

use crate::cli::context::AppContext;
use crate::cli::output::{create_spinner, cycle_bar, output, CommandOutput};
use crate::services::{ProgressView, SessionPhase};

#[derive(Args, Debug)]
pub struct BadgeArgs {
    #[command(subcommand)]
    pub command: BadgeCommands,
}

#[derive(Subcommand, Debug)]
pub enum BadgeCommands {
    /// Show the last saved badge without contacting the server
    Show,

    /// Recount resolved reports and update the badge
    Refresh,
}

#[derive(Debug, Serialize)]
pub struct BadgeOutput {
    #[serde(flatten)]
    pub view: ProgressView,
    pub tier_count: usize,
}

impl CommandOutput for BadgeOutput {
    fn to_human(&self) -> String {
        let view = &self.view;
        let mut lines = Vec::new();

        match &view.badge {
            Some(badge) => lines.push(format!(
                "Badge: {} {}",
                style(&badge.name).green().bold(),
                style(format!("({}/{}, {})", badge.id, self.tier_count, badge.image_key)).dim()
            )),
            None => lines.push(format!(
                "Badge: {}",
                style("none yet, resolve your first reports to earn one").dim()
            )),
        }

        if view.phase == SessionPhase::Idle {
            lines.push(
                style("Run `ecocheck badge refresh` for current progress.")
                    .dim()
                    .to_string(),
            );
        } else {
            lines.push(format!(
                "Resolved reports: {}  Challenges completed: {}",
                style(view.resolved_count).bold(),
                style(view.completed_cycles).bold()
            ));
            lines.push(format!(
                "Next challenge:   {}",
                cycle_bar(view.cycle_progress, view.cycle_goal)
            ));
        }

        if view.milestone_reached {
            if let Some(badge) = &view.badge {
                lines.push(String::new());
                lines.push(format!(
                    "{} You unlocked {}!",
                    style("★ Challenge complete!").yellow().bold(),
                    style(&badge.name).green().bold()
                ));
            }
        }

        lines.join("\n")
    }
}

pub async fn execute(args: BadgeArgs, ctx: &AppContext, json_mode: bool) -> Result<()> {
    let session = ctx.progress()?;
    let tier_count = session.catalog().tiers().len();

    let view = match args.command {
        BadgeCommands::Show => session.cached_view().await,
        BadgeCommands::Refresh => {
            let spinner = create_spinner("Counting resolved reports...");
            let view = session.refresh().await;
            spinner.finish_and_clear();
            view
        }
    };

    output(&BadgeOutput { view, tier_count }, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::CachedBadge;

    fn view(count: u32, milestone: bool) -> ProgressView {
        ProgressView {
            resolved_count: count,
            completed_cycles: count / 10,
            cycle_progress: count % 10,
            cycle_goal: 10,
            ratio: f64::from(count % 10) / 10.0,
            badge: Some(CachedBadge {
                id: 1,
                name: "Eco Starter".to_string(),
                image_key: "badge_eco_starter".to_string(),
            }),
            milestone_reached: milestone,
            phase: SessionPhase::TierAdvanced,
        }
    }

    #[test]
    fn test_milestone_line_only_when_reached() {
        console::set_colors_enabled(false);
        let shown = BadgeOutput { view: view(10, true), tier_count: 4 }.to_human();
        assert!(shown.contains("You unlocked Eco Starter!"));

        let quiet = BadgeOutput { view: view(13, false), tier_count: 4 }.to_human();
        assert!(!quiet.contains("unlocked"));
        assert!(quiet.contains("3/10"));
    }

    #[test]
    fn test_json_flattens_view() {
        let json = BadgeOutput { view: view(10, true), tier_count: 4 }.to_json();
        assert_eq!(json["resolved_count"], 10);
        assert_eq!(json["milestone_reached"], true);
        assert_eq!(json["badge"]["imageKey"], "badge_eco_starter");
        assert_eq!(json["phase"], "tier_advanced");
    }
}

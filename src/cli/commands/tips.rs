//! Implementation of the `ecocheck tips` command.

use anyhow::{bail, Result};
use clap::Args;
use console::style;
use serde::Serialize;

use crate::cli::output::{list_table, output, render_list, truncate, CommandOutput};
use crate::domain::models::{waste_tip, WasteTip, WASTE_TIPS};

#[derive(Args, Debug)]
pub struct TipsArgs {
    /// Show one tip in full (1-based)
    pub number: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct TipListOutput {
    pub tips: Vec<WasteTip>,
}

impl CommandOutput for TipListOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["#", "title", "tip"]);
        for (index, tip) in self.tips.iter().enumerate() {
            table.add_row(vec![
                (index + 1).to_string(),
                tip.title.to_string(),
                truncate(tip.content, 50),
            ]);
        }
        render_list("tip", &table, self.tips.len())
    }
}

#[derive(Debug, Serialize)]
pub struct TipOutput {
    pub tip: WasteTip,
}

impl CommandOutput for TipOutput {
    fn to_human(&self) -> String {
        format!("{}\n\n{}", style(self.tip.title).green().bold(), self.tip.content)
    }
}

pub fn execute(args: &TipsArgs, json_mode: bool) -> Result<()> {
    match args.number {
        None => output(&TipListOutput { tips: WASTE_TIPS.to_vec() }, json_mode),
        Some(number) => match waste_tip(number) {
            Some(tip) => output(&TipOutput { tip: *tip }, json_mode),
            None => bail!("No tip #{number}; choose 1 to {}", WASTE_TIPS.len()),
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_shows_every_title() {
        console::set_colors_enabled(false);
        let shown = TipListOutput { tips: WASTE_TIPS.to_vec() }.to_human();
        assert!(shown.starts_with("4 tips:"));
        for tip in &WASTE_TIPS {
            assert!(shown.contains(tip.title));
        }
    }

    #[test]
    fn test_single_tip_shows_full_content() {
        console::set_colors_enabled(false);
        let tip = *waste_tip(4).unwrap();
        let shown = TipOutput { tip }.to_human();
        assert!(shown.contains("prevent harmful chemicals from leaking."));

        let json = TipOutput { tip }.to_json();
        assert_eq!(json["tip"]["title"], "Handle E-Waste Safely");
    }

    #[test]
    fn test_out_of_range_number_is_an_error() {
        assert!(execute(&TipsArgs { number: Some(9) }, true).is_err());
        assert!(execute(&TipsArgs { number: Some(2) }, true).is_ok());
    }
}

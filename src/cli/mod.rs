//! Command-line interface.
//!
//! Each command owns its clap `Args`, an `execute(args, ctx, json)` entry
//! point, and output types implementing [`output::CommandOutput`].

pub mod commands;
pub mod context;
pub mod output;
pub mod types;

pub use context::AppContext;
pub use types::{Cli, Commands};

use console::style;

use crate::domain::{DomainError, LoginFailure};

/// Print a failed command and exit non-zero.
pub fn handle_error(err: &anyhow::Error, json_mode: bool) -> ! {
    let hint = err.downcast_ref::<DomainError>().and_then(hint_for);

    if json_mode {
        let body = serde_json::json!({
            "success": false,
            "error": format!("{err:#}"),
            "hint": hint,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&body).unwrap_or_default()
        );
    } else {
        eprintln!("{} {err:#}", style("error:").red().bold());
        if let Some(hint) = hint {
            eprintln!("{} {hint}", style("hint:").yellow());
        }
    }
    std::process::exit(1)
}

fn hint_for(err: &DomainError) -> Option<String> {
    match err {
        DomainError::NotAuthenticated | DomainError::InvalidToken(_) => {
            Some("run `ecocheck auth login` first".to_string())
        }
        DomainError::LoginRejected(LoginFailure::VerificationRequired { email }) => Some(format!(
            "check your inbox, then run `ecocheck auth verify-email --email {email} <code>`"
        )),
        DomainError::LoginRejected(LoginFailure::AccountDeactivated) => {
            Some("contact support to reactivate your account".to_string())
        }
        DomainError::Transport(_) => {
            Some("check api.base_url in .ecocheck/config.yaml and that the server is up".to_string())
        }
        _ => None,
    }
}

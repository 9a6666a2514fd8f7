//! Implementation of the `ecocheck auth` commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use comfy_table::{presets, Table};
use console::style;
use serde::Serialize;

use crate::cli::context::AppContext;
use crate::cli::output::{create_spinner, output, CommandOutput};
use crate::domain::models::{ContactNumber, UserProfile};

#[derive(Args, Debug)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommands,
}

#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Sign in and store the session token
    Login {
        #[arg(short, long)]
        email: String,

        /// Password, or set ECOCHECK_PASSWORD
        #[arg(short, long, env = "ECOCHECK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account
    Register {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long, env = "ECOCHECK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Confirm an email address with the 6-digit code
    VerifyEmail {
        #[arg(short, long)]
        email: String,

        code: String,
    },

    /// Send (or resend) a password reset code
    ForgotPassword {
        #[arg(short, long)]
        email: String,
    },

    /// Set a new password using a reset code
    ResetPassword {
        #[arg(short, long)]
        email: String,

        #[arg(long)]
        code: String,

        #[arg(long, env = "ECOCHECK_NEW_PASSWORD", hide_env_values = true)]
        new_password: String,

        #[arg(long, env = "ECOCHECK_CONFIRM_PASSWORD", hide_env_values = true)]
        confirm_password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the signed-in user and their profile
    Whoami,
}

#[derive(Debug, Serialize)]
pub struct AuthOutput {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl CommandOutput for AuthOutput {
    fn to_human(&self) -> String {
        let mark = if self.success {
            style("✓").green()
        } else {
            style("✗").red()
        };
        format!("{mark} {}", self.message)
    }
}

#[derive(Debug, Serialize)]
pub struct WhoamiOutput {
    pub user_id: String,
    pub profile: Option<UserProfile>,
}

impl CommandOutput for WhoamiOutput {
    fn to_human(&self) -> String {
        let Some(profile) = &self.profile else {
            return format!(
                "Signed in as {} {}",
                style(&self.user_id).bold(),
                style("(profile unavailable)").dim()
            );
        };

        let contact = profile
            .contact_number
            .as_deref()
            .and_then(ContactNumber::from_registered)
            .map(|c| c.display());

        let mut table = Table::new();
        table.load_preset(presets::NOTHING);
        for (label, value) in [
            ("Name", Some(profile.display_name())),
            ("Email", profile.email.clone()),
            ("Location", profile.location.clone()),
            ("Contact", contact),
            ("User ID", Some(self.user_id.clone())),
        ] {
            table.add_row(vec![
                style(label).bold().to_string(),
                value.unwrap_or_else(|| "-".to_string()),
            ]);
        }
        table.to_string()
    }
}

pub async fn execute(args: AuthArgs, ctx: &AppContext, json_mode: bool) -> Result<()> {
    let auth = ctx.auth();

    let result = match args.command {
        AuthCommands::Login { email, password } => {
            let spinner = create_spinner("Signing in...");
            let identity = auth.login(&email, &password).await;
            spinner.finish_and_clear();
            let identity = identity?;
            AuthOutput {
                success: true,
                message: "Login successful!".to_string(),
                user_id: Some(identity.user_id),
            }
        }
        AuthCommands::Register {
            name,
            email,
            password,
        } => {
            let identity = auth.register(&name, &email, &password).await?;
            AuthOutput {
                success: true,
                message: "Registration successful! Check your email for a verification code."
                    .to_string(),
                user_id: Some(identity.user_id),
            }
        }
        AuthCommands::VerifyEmail { email, code } => {
            auth.verify_email(&email, &code).await?;
            AuthOutput {
                success: true,
                message: "Email verified successfully! Please log in with your credentials."
                    .to_string(),
                user_id: None,
            }
        }
        AuthCommands::ForgotPassword { email } => {
            auth.forgot_password(&email).await?;
            AuthOutput {
                success: true,
                message: format!("A reset code has been sent to {email}."),
                user_id: None,
            }
        }
        AuthCommands::ResetPassword {
            email,
            code,
            new_password,
            confirm_password,
        } => {
            auth.reset_password(&email, &code, &new_password, &confirm_password)
                .await?;
            AuthOutput {
                success: true,
                message: "Your password has been reset. You can now log in.".to_string(),
                user_id: None,
            }
        }
        AuthCommands::Logout => {
            auth.logout().await?;
            AuthOutput {
                success: true,
                message: "You have been successfully logged out.".to_string(),
                user_id: None,
            }
        }
        AuthCommands::Whoami => {
            let identity = auth.current_identity().await?;
            let profile = match auth.profile().await {
                Ok(profile) => Some(profile),
                Err(err) => {
                    tracing::warn!(error = %err, "profile fetch failed");
                    None
                }
            };
            output(
                &WhoamiOutput {
                    user_id: identity.user_id,
                    profile,
                },
                json_mode,
            );
            return Ok(());
        }
    };

    output(&result, json_mode);
    Ok(())
}

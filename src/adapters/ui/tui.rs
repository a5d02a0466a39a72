//! Implements InteractionPort. Inquire-based interactive prompts.
//!
//! Menu, profile form, and status lines. Spinners cover probing and login.

use super::banner::{self, RuleAlign};
use super::progress::Spinner;
use crate::domain::{
    CarrierKind, DomainError, FailureReason, LoginProfile, ProbeError, ProfileDraft, UserAction,
};
use crate::ports::{InteractionPort, SessionEvent};
use async_trait::async_trait;
use crossterm::style::Stylize;
use inquire::error::InquireError;
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::{Password, PasswordDisplayMode, Select, Text};
use std::fmt;

/// Applies the prompt theme to all subsequent inquire prompts.
pub fn apply_theme() {
    let config = RenderConfig::default_colored()
        .with_prompt_prefix(Styled::new(">").with_fg(Color::LightCyan))
        .with_highlighted_option_prefix(Styled::new("›").with_fg(Color::LightYellow));
    inquire::set_global_render_config(config);
}

#[derive(Debug, Clone, Copy)]
struct MenuItem(UserAction);

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self.0 {
            UserAction::LoginOrRetry => "Log in with this profile",
            UserAction::EditProfile => "Edit profile",
            UserAction::Exit => "Exit",
        })
    }
}

const MENU: [MenuItem; 3] = [
    MenuItem(UserAction::LoginOrRetry),
    MenuItem(UserAction::EditProfile),
    MenuItem(UserAction::Exit),
];

fn is_cancel(e: &InquireError) -> bool {
    matches!(
        e,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// Run a prompt; `Ok(None)` on Esc / Ctrl-C, `Err` if the terminal is unusable.
fn cancellable<T>(result: Result<T, InquireError>) -> Result<Option<T>, DomainError> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(e) if is_cancel(&e) => Ok(None),
        Err(e) => Err(DomainError::Ui(e.to_string())),
    }
}

fn print_profile(profile: &LoginProfile) {
    println!();
    println!("{}", "── Login profile ──────────────────".dark_grey());
    println!("  {}{}", format!("{:<10}", "Account").bold(), profile.account.as_str().yellow());
    println!("  {}{}", format!("{:<10}", "Carrier").bold(), profile.carrier);
    println!("  {}{}", format!("{:<10}", "Password").bold(), profile.masked_password());
    println!("{}", "───────────────────────────────────".dark_grey());
}

fn probe_hint(e: &ProbeError) -> &'static str {
    match e {
        ProbeError::NotFound => {
            "The portal page did not show an address. You may already be logged in."
        }
        ProbeError::Network(_) => {
            "Check that you are connected to the campus network and your plan has balance."
        }
    }
}

fn failure_hint(reason: FailureReason) -> &'static str {
    match reason {
        FailureReason::InvalidCredentials => "Check the account and password in your profile.",
        FailureReason::UnsupportedCarrier => "Choose another carrier under \"Edit profile\".",
        FailureReason::NetworkError | FailureReason::IpProbeFailed => {
            "Check your connection to the campus network, then retry."
        }
        FailureReason::ProtocolError => "The portal may have changed; retry later.",
    }
}

/// TUI adapter. Inquire prompts.
#[derive(Default)]
pub struct TuiInteraction {
    spinner: Spinner,
}

impl TuiInteraction {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InteractionPort for TuiInteraction {
    async fn choose_action(&self, profile: &LoginProfile) -> Result<UserAction, DomainError> {
        print_profile(profile);
        let choice = Select::new("What next?", MENU.to_vec())
            .with_help_message("↑↓ to move, Enter to select")
            .prompt();
        // Esc / Ctrl-C on the menu means "exit", so a changed profile still gets saved.
        Ok(cancellable(choice)?.map_or(UserAction::Exit, |item| item.0))
    }

    async fn prompt_profile(
        &self,
        current: Option<&LoginProfile>,
    ) -> Result<Option<ProfileDraft>, DomainError> {
        println!(
            "{}",
            banner::rule("Create / edit login profile", banner::terminal_width(), RuleAlign::Left)
        );

        let cursor = current
            .and_then(|p| CarrierKind::ALL.iter().position(|&c| c == p.carrier))
            .unwrap_or(0);
        let Some(carrier) = cancellable(
            Select::new("Carrier:", CarrierKind::ALL.to_vec())
                .with_starting_cursor(cursor)
                .prompt(),
        )?
        else {
            return Ok(None);
        };

        let mut account_prompt = Text::new("Account (usually your student ID):");
        if let Some(p) = current {
            account_prompt = account_prompt.with_initial_value(&p.account);
        }
        let Some(account) = cancellable(account_prompt.prompt())? else {
            return Ok(None);
        };

        let Some(password) = cancellable(
            Password::new("Password:")
                .with_display_mode(PasswordDisplayMode::Masked)
                .without_confirmation()
                .prompt(),
        )?
        else {
            return Ok(None);
        };

        Ok(Some(ProfileDraft {
            carrier: Some(carrier),
            account,
            password,
        }))
    }

    fn notify(&self, event: SessionEvent) {
        self.spinner.stop();
        match event {
            SessionEvent::ProfileMissing => {
                println!("{}", "No saved profile found (or it could not be read).".red());
                println!("Let's create one.");
            }
            SessionEvent::ProfileRejected(problem) => {
                println!("{} {}", "Profile not accepted:".red(), problem);
            }
            SessionEvent::ProfileUpdated => println!("{}", "Profile ready.".green()),
            SessionEvent::ProbeStarted => self.spinner.start("Discovering client IP..."),
            SessionEvent::IpDiscovered(ip) => {
                println!("Client IP: {}", ip.as_str().yellow());
            }
            SessionEvent::ProbeFailed(e) => {
                println!("\n{} ({})", FailureReason::IpProbeFailed.to_string().red(), e);
                println!("{}\n", probe_hint(&e));
            }
            SessionEvent::LoginStarted => self.spinner.start("Logging in..."),
            SessionEvent::LoginSucceeded => println!("\n{}\n", "Logged in.".green().bold()),
            SessionEvent::LoginFailed(reason) => {
                println!("\n{} {}", "Login failed:".red().bold(), reason);
                println!("{}\n", failure_hint(reason));
            }
            SessionEvent::ProfileSaved => println!("{}", "Profile saved.".dark_grey()),
            SessionEvent::SaveFailed(e) => {
                println!("{} {}", "Could not save the profile:".red(), e);
                println!("It will need to be entered again next time.");
            }
        }
    }
}

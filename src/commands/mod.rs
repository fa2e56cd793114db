//! Command handlers for the datadash CLI
//!
//! Each submodule renders one command group against an [`AppContext`].
//! Failures are routed through [`AppContext::report`] by [`dispatch`], so
//! they surface as error toasts before the process exits.

use colored::Colorize;

use crate::app::AppContext;
use crate::cli::{Commands, DatasetCommand, SessionCommand, UserCommand};
use crate::error::Result;
use crate::models::ProfileUpdate;
use crate::store::{ToastKind, ToastQueue};

pub mod datasets;
pub mod session;
pub mod user;

/// Run one parsed command
pub async fn dispatch(ctx: &AppContext, command: Commands) -> Result<()> {
    let result = match command {
        Commands::Datasets { command } => match command {
            DatasetCommand::List { json } => datasets::list_datasets(ctx, json).await,
            DatasetCommand::Show { id, json } => datasets::show_dataset(ctx, &id, json).await,
            DatasetCommand::Page {
                page,
                page_size,
                keyword,
                creator,
                json,
            } => {
                let params = datasets::page_params(page, page_size, keyword, creator);
                datasets::page_datasets(ctx, &params, json).await
            }
        },
        Commands::User { command } => match command {
            UserCommand::Me { json } => user::show_me(ctx, json).await,
            UserCommand::Update {
                username,
                email,
                avatar,
            } => {
                let update = ProfileUpdate {
                    username,
                    email,
                    avatar,
                };
                user::update_profile(ctx, &update).await
            }
        },
        Commands::Session { command } => match command {
            SessionCommand::Show => session::show_session(ctx),
            SessionCommand::Set { id } => session::set_session(ctx, &id),
            SessionCommand::Clear => session::clear_session(ctx),
        },
    };
    ctx.report(result)
}

/// Print pending toasts to stderr, oldest first
pub fn print_toasts(toasts: &ToastQueue) {
    for toast in toasts.toasts() {
        let line = match toast.kind {
            ToastKind::Success => format!("✓ {}", toast.message).green(),
            ToastKind::Error => format!("error: {}", toast.message).red(),
            ToastKind::Info => toast.message.normal(),
        };
        eprintln!("{}", line);
    }
}

/// Shorten `text` to at most `max` characters, marking the cut with `...`
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

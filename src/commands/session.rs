use colored::Colorize;

use crate::app::AppContext;
use crate::error::{DashError, Result};

/// Handle `session show`
pub fn show_session(ctx: &AppContext) -> Result<()> {
    match ctx.session.session_id() {
        Some(id) => println!("{}", id.cyan()),
        None => println!("{}", "No active session.".yellow()),
    }
    Ok(())
}

/// Handle `session set`
pub fn set_session(ctx: &AppContext, id: &str) -> Result<()> {
    ctx.session.set_session_id(id);
    ensure_saved(ctx)?;
    println!("{}", format!("Session set to {}", id).green());
    Ok(())
}

/// Handle `session clear`
pub fn clear_session(ctx: &AppContext) -> Result<()> {
    ctx.session.clear_session();
    ensure_saved(ctx)?;
    println!("{}", "Session cleared".green());
    Ok(())
}

// Write failures only surface through `last_save_error`.
fn ensure_saved(ctx: &AppContext) -> Result<()> {
    match ctx.session.last_save_error() {
        Some(message) => Err(DashError::Storage(message).into()),
        None => Ok(()),
    }
}

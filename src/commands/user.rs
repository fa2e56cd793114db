use colored::Colorize;

use crate::app::AppContext;
use crate::error::Result;
use crate::models::{ProfileUpdate, User};

/// Handle `user me`
pub async fn show_me(ctx: &AppContext, json: bool) -> Result<()> {
    let user = ctx.users.me().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&user)?);
    } else {
        print_user(&user);
    }
    Ok(())
}

/// Handle `user update`
pub async fn update_profile(ctx: &AppContext, update: &ProfileUpdate) -> Result<()> {
    if update.is_empty() {
        println!(
            "{}",
            "Nothing to update. Pass --username, --email or --avatar.".yellow()
        );
        return Ok(());
    }

    let user = ctx.users.update_profile(update).await?;
    ctx.toasts.success("Profile updated");
    print_user(&user);
    Ok(())
}

fn print_user(user: &User) {
    println!("\n{} {}", user.username.bold(), format!("({})", user.id).cyan());
    println!("Role:   {}", user.role);
    println!("Email:  {}", user.email.as_deref().unwrap_or("-"));
    if let Some(avatar) = &user.avatar {
        println!("Avatar: {}", avatar);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::fake::FakeTransport;
    use crate::api::transport::Method;
    use crate::store::{MemorySessionRepository, ToastKind};
    use serde_json::json;
    use std::sync::Arc;

    fn context(fake: Arc<FakeTransport>) -> AppContext {
        AppContext::with_parts(fake, Arc::new(MemorySessionRepository::new()))
    }

    #[tokio::test]
    async fn test_empty_update_sends_nothing() {
        let fake = Arc::new(FakeTransport::new());
        let ctx = context(fake.clone());

        update_profile(&ctx, &ProfileUpdate::default()).await.unwrap();

        assert!(fake.requests().is_empty());
        assert!(ctx.toasts.is_empty());
    }

    #[tokio::test]
    async fn test_update_shows_success_toast() {
        let fake = Arc::new(FakeTransport::new());
        fake.respond_ok(
            Method::Put,
            "/user/profile",
            json!({"id": "u1", "username": "bob", "role": "user"}),
        );
        let ctx = context(fake.clone());

        let update = ProfileUpdate {
            username: Some("bob".to_string()),
            ..ProfileUpdate::default()
        };
        update_profile(&ctx, &update).await.unwrap();

        let toasts = ctx.toasts.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, ToastKind::Success);
        assert_eq!(fake.requests()[0].body, Some(json!({"username": "bob"})));
    }
}

//! Bot layer - Discord-specific interface and command handlers
//!
//! This module is the display layer of Laundry Desk: it renders the store's
//! contents and routes every write through the store's operations.

/// Discord command implementations (booking, catalog, admin, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{
    core::{auth::AdminCredentials, store::LaundryStore},
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use std::collections::HashSet;
use tokio::sync::Mutex;
use tracing::{error, info, instrument};

/// Shared data available to all bot commands.
///
/// The store sits behind a mutex so that store operations from concurrent
/// interactions run one at a time.
pub struct BotData {
    /// The record store
    pub store: Mutex<LaundryStore>,
    /// The admin credential pair
    pub credentials: AdminCredentials,
    /// Discord users that logged in as admin
    pub admins: Mutex<HashSet<serenity::UserId>>,
}

impl BotData {
    /// Creates a new `BotData` with no logged-in admins.
    #[must_use]
    pub fn new(store: LaundryStore, credentials: AdminCredentials) -> Self {
        Self {
            store: Mutex::new(store),
            credentials,
            admins: Mutex::new(HashSet::new()),
        }
    }

    /// Whether `user` has logged in as admin.
    pub async fn is_admin(&self, user: serenity::UserId) -> bool {
        self.admins.lock().await.contains(&user)
    }
}

/// Poise context used by every command.
pub type Context<'a> = poise::Context<'a, BotData, Error>;

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::CommandCheckFailed { error, ctx, .. } => {
            let reason = error.map_or_else(|| "Not allowed".to_string(), |e| e.to_string());
            let reply = poise::CreateReply::default()
                .content(format!("🔒 {reason}. Use `/login` first."))
                .ephemeral(true);
            if let Err(e) = ctx.send(reply).await {
                error!("Failed to send check failure message: {}", e);
            }
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("❌ An error occurred: {error}")).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Every command the bot registers.
#[must_use]
pub fn all_commands() -> Vec<poise::Command<BotData, Error>> {
    vec![
        commands::ping(),
        commands::help(),
        commands::services(),
        commands::book(),
        commands::login(),
        commands::logout(),
        commands::bookings(),
        commands::booking_info(),
        commands::set_status(),
        commands::report(),
        commands::service_manage(),
    ]
}

/// Builds the poise framework and runs the Discord client until it stops.
#[instrument(skip(token, data))]
pub async fn run_bot(token: String, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: all_commands(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {:?}", e))?;

    Ok(())
}

pub use commands::*;
pub use handlers::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_are_slash_only() {
        let commands = all_commands();
        assert!(commands.iter().all(|c| c.slash_action.is_some() || !c.subcommands.is_empty()));
        assert!(commands.iter().all(|c| c.prefix_action.is_none()));
    }

    #[test]
    fn test_admin_commands_are_checked() {
        let checked = ["bookings", "booking", "set_status", "report", "service_manage"];
        for command in all_commands() {
            if checked.contains(&command.name.as_str()) {
                assert_eq!(command.checks.len(), 1, "`{}` has no admin check", command.name);
            }
        }
    }
}

//! Service catalog Discord commands - `services` and `service_manage`.
//!
//! Anyone can browse the catalog; changing it requires an admin session.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, commands::admin::admin_check, handlers::autocomplete},
        core::{report, service::NewService},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Shows the service catalog.
    #[poise::command(slash_command)]
    pub async fn services(ctx: Context<'_>) -> Result<()> {
        let store = ctx.data().store.lock().await;

        if store.services().is_empty() {
            drop(store);
            ctx.say("No services are offered right now.").await?;
            return Ok(());
        }

        let description = store
            .services()
            .iter()
            .map(report::format_service_line)
            .collect::<Vec<_>>()
            .join("\n");
        drop(store);

        let embed = serenity::CreateEmbed::default()
            .title("🧺 Our Services")
            .description(description)
            .color(0x0034_98DB);

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Parent command for editing the service catalog.
    #[poise::command(
        slash_command,
        check = "admin_check",
        subcommands("service_add", "service_remove")
    )]
    pub async fn service_manage(ctx: Context<'_>) -> Result<()> {
        let help_text = "Service management command. Available subcommands:\n\
            `/service_manage add` - Add a service to the catalog\n\
            `/service_manage remove` - Remove a service from the catalog";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Adds a service to the catalog.
    ///
    /// A blank icon falls back to the default sparkle.
    #[poise::command(slash_command, rename = "add", check = "admin_check")]
    pub async fn service_add(
        ctx: Context<'_>,
        #[description = "Service name"] name: String,
        #[description = "Short description"] description: String,
        #[description = "Icon (emoji)"] icon: Option<String>,
    ) -> Result<()> {
        let input = NewService::new(name, icon.as_deref(), description);
        let result = ctx.data().store.lock().await.add_service(input).await;

        match result {
            Ok(service) => {
                ctx.say(format!(
                    "✅ Added {} **{}** to the catalog.",
                    service.icon, service.name
                ))
                .await?;
            }
            Err(Error::Validation(_)) => {
                ctx.send(
                    poise::CreateReply::default()
                        .content("❌ Service name cannot be empty.")
                        .ephemeral(true),
                )
                .await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Removes a service from the catalog.
    ///
    /// Existing bookings keep the service name they were made with.
    #[poise::command(slash_command, rename = "remove", check = "admin_check")]
    pub async fn service_remove(
        ctx: Context<'_>,
        #[description = "Service to remove"]
        #[autocomplete = "autocomplete::autocomplete_service_name"]
        name: String,
    ) -> Result<()> {
        let mut store = ctx.data().store.lock().await;

        let Some(id) = store
            .services()
            .iter()
            .find(|svc| svc.name.eq_ignore_ascii_case(name.trim()))
            .map(|svc| svc.id.clone())
        else {
            drop(store);
            ctx.say(format!("❌ No service named '{name}'.")).await?;
            return Ok(());
        };

        let removed = store.remove_service(&id).await?;
        drop(store);

        ctx.say(format!("🗑️ Removed **{}** from the catalog.", removed.name))
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;

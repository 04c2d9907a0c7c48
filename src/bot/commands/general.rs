//! General Discord commands - ping and help.
//! These commands don't touch the store.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{bot::Context, errors::Result};

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command)]
    pub async fn ping(ctx: Context<'_>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command)]
    pub async fn help(ctx: Context<'_>) -> Result<()> {
        let help_text = "**Laundry Desk Help**\n\
        Here is a summary of all available commands.\n\n\
        **Customer Commands**\n\
        • `/services` - Shows the service catalog.\n\
        • `/book <name> <phone> <services> [pieces...] [extras] [date] [time] [notes] [addresses]` - Requests a pickup.\n\
        \u{2003}Extras are written as `Rug: 2; Curtain: 1`.\n\n\
        **Admin Commands**\n\
        • `/login <username> <password>` / `/logout` - Admin session.\n\
        • `/bookings [status]` - Lists bookings, newest first.\n\
        • `/booking <id>` - Shows one booking in full.\n\
        • `/set_status <id> <status>` - Moves a booking to Pending, Washing, Ready or Delivered.\n\
        • `/report` - Monthly statistics.\n\
        • `/service_manage add|remove` - Edits the service catalog.\n\n\
        **Utility Commands**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;

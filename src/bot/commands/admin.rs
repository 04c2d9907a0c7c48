//! Admin Discord commands - login, booking management and the monthly report.
//!
//! Every command here except `login` requires an admin session started with
//! `/login`. Sessions live in memory and end with `/logout` or a restart.

use crate::{
    bot::Context,
    core::{report, stats::MonthlyStat},
    errors::{Error, Result},
};
use tracing::info;

/// Discord caps embed field values at 1024 characters.
const FIELD_LIMIT: usize = 1024;
/// Discord caps embed descriptions at 4096 characters.
const DESCRIPTION_LIMIT: usize = 4096;
/// Discord caps embeds at 25 fields.
const MAX_FIELDS: usize = 25;
/// Discord caps the combined text of the embeds in one message at 6000 characters.
const EMBED_TOTAL_LIMIT: usize = 6000;
/// Room kept on every report page for its title, description and footer.
const PAGE_OVERHEAD: usize = 200;
/// How many bookings `/bookings` lists.
const BOOKINGS_PAGE: usize = 20;

/// Command check that lets only logged-in admins through.
///
/// Fails with [`Error::AdminRequired`], which poise reports as
/// `CommandCheckFailed` and the framework error handler answers privately.
pub async fn admin_check(ctx: Context<'_>) -> Result<bool> {
    if ctx.data().is_admin(ctx.author().id).await {
        return Ok(true);
    }
    info!(
        "User {} tried `{}` without an admin session",
        ctx.author().id,
        ctx.command().name
    );
    Err(Error::AdminRequired)
}

/// Cuts `text` to at most `limit` characters, marking the cut with an ellipsis.
fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(limit.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// Renders one embed field per month and splits them into pages, each small
/// enough for a single embed. Months keep their order and none are dropped.
fn report_pages(stats: &[MonthlyStat]) -> Vec<Vec<(String, String)>> {
    let budget = EMBED_TOTAL_LIMIT - PAGE_OVERHEAD;
    let mut pages: Vec<Vec<(String, String)>> = Vec::new();
    let mut current: Vec<(String, String)> = Vec::new();
    let mut used = 0;

    for stat in stats {
        let name = stat.month_year.clone();
        let value = truncate(&report::format_monthly_stat(stat), FIELD_LIMIT);
        let size = name.chars().count() + value.chars().count();

        if !current.is_empty() && (used + size > budget || current.len() == MAX_FIELDS) {
            pages.push(std::mem::take(&mut current));
            used = 0;
        }
        used += size;
        current.push((name, value));
    }
    if !current.is_empty() {
        pages.push(current);
    }
    pages
}

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use super::{BOOKINGS_PAGE, DESCRIPTION_LIMIT, admin_check, report_pages, truncate};
    use crate::{
        bot::{Context, handlers::autocomplete},
        core::{
            booking::{BookingRecord, BookingStatus},
            report,
            stats::sort_chronologically,
        },
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use tracing::info;

    /// Starts an admin session for your Discord account.
    #[poise::command(slash_command, ephemeral)]
    pub async fn login(
        ctx: Context<'_>,
        #[description = "Admin username"] username: String,
        #[description = "Admin password"] password: String,
    ) -> Result<()> {
        let data = ctx.data();
        match data.credentials.verify(username.trim(), &password) {
            Ok(()) => {
                data.admins.lock().await.insert(ctx.author().id);
                info!("User {} logged in as admin", ctx.author().id);
                ctx.say("🔓 Logged in. Admin commands are now available.")
                    .await?;
            }
            Err(Error::Auth) => {
                ctx.say("❌ Invalid credentials.").await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Ends your admin session.
    #[poise::command(slash_command, ephemeral)]
    pub async fn logout(ctx: Context<'_>) -> Result<()> {
        let removed = ctx.data().admins.lock().await.remove(&ctx.author().id);
        if removed {
            info!("User {} logged out", ctx.author().id);
            ctx.say("🔒 Logged out.").await?;
        } else {
            ctx.say("You were not logged in.").await?;
        }
        Ok(())
    }

    /// Lists the most recent bookings, optionally filtered by status.
    #[poise::command(slash_command, check = "admin_check")]
    pub async fn bookings(
        ctx: Context<'_>,
        #[description = "Only bookings with this status"]
        #[autocomplete = "autocomplete::autocomplete_status"]
        status: Option<String>,
    ) -> Result<()> {
        let filter = match status.as_deref().map(str::parse::<BookingStatus>) {
            None => None,
            Some(Ok(status)) => Some(status),
            Some(Err(_)) => {
                ctx.say("❌ Status must be Pending, Washing, Ready or Delivered.")
                    .await?;
                return Ok(());
            }
        };

        let store = ctx.data().store.lock().await;
        let matching: Vec<&BookingRecord> = store
            .bookings()
            .iter()
            .rev()
            .filter(|b| filter.is_none_or(|status| b.status == status))
            .collect();
        let total = matching.len();
        let lines = matching
            .into_iter()
            .take(BOOKINGS_PAGE)
            .map(report::format_booking_summary)
            .collect::<Vec<_>>()
            .join("\n");
        drop(store);

        if total == 0 {
            ctx.say("No bookings found.").await?;
            return Ok(());
        }

        let title = filter.map_or_else(
            || "📋 Bookings".to_string(),
            |status| format!("📋 Bookings - {status}"),
        );
        let embed = serenity::CreateEmbed::default()
            .title(title)
            .description(truncate(&lines, DESCRIPTION_LIMIT))
            .color(0x0034_98DB)
            .footer(serenity::CreateEmbedFooter::new(format!(
                "Showing {} of {total} booking{}",
                total.min(BOOKINGS_PAGE),
                if total == 1 { "" } else { "s" }
            )));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Shows every detail of one booking.
    #[poise::command(slash_command, rename = "booking", check = "admin_check")]
    pub async fn booking_info(
        ctx: Context<'_>,
        #[description = "Booking reference"]
        #[autocomplete = "autocomplete::autocomplete_booking_id"]
        id: String,
    ) -> Result<()> {
        let id = id.trim().trim_start_matches('#');
        let details = ctx
            .data()
            .store
            .lock()
            .await
            .booking(id)
            .map(report::format_booking_details);

        match details {
            Some(details) => {
                let embed = serenity::CreateEmbed::default()
                    .title(format!("Booking #{id}"))
                    .description(truncate(&details, DESCRIPTION_LIMIT))
                    .color(0x0034_98DB);
                ctx.send(poise::CreateReply::default().embed(embed)).await?;
            }
            None => {
                ctx.say(format!("❌ Booking #{id} not found.")).await?;
            }
        }
        Ok(())
    }

    /// Moves a booking to a new status.
    #[poise::command(slash_command, check = "admin_check")]
    pub async fn set_status(
        ctx: Context<'_>,
        #[description = "Booking reference"]
        #[autocomplete = "autocomplete::autocomplete_booking_id"]
        id: String,
        #[description = "New status"]
        #[autocomplete = "autocomplete::autocomplete_status"]
        status: String,
    ) -> Result<()> {
        let Ok(status) = status.parse::<BookingStatus>() else {
            ctx.say("❌ Status must be Pending, Washing, Ready or Delivered.")
                .await?;
            return Ok(());
        };
        let id = id.trim().trim_start_matches('#');

        let result = ctx
            .data()
            .store
            .lock()
            .await
            .update_booking_status(id, status)
            .await;

        match result {
            Ok(record) => {
                ctx.say(format!(
                    "{} Booking #{} ({}) is now **{}**.",
                    record.status.emoji(),
                    record.id,
                    record.name,
                    record.status
                ))
                .await?;
            }
            Err(Error::BookingNotFound { id }) => {
                ctx.say(format!("❌ Booking #{id} not found.")).await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Shows order, piece and service totals for every month, oldest first.
    #[poise::command(slash_command, check = "admin_check")]
    pub async fn report(ctx: Context<'_>) -> Result<()> {
        let mut stats = ctx.data().store.lock().await.monthly_stats().to_vec();

        if stats.is_empty() {
            ctx.say("No bookings yet, nothing to report.").await?;
            return Ok(());
        }

        sort_chronologically(&mut stats);
        let months = stats.len();
        let total_orders: u64 = stats.iter().map(|s| s.total_orders).sum();

        let pages = report_pages(&stats);
        let page_count = pages.len();
        for (index, fields) in pages.into_iter().enumerate() {
            let mut embed = serenity::CreateEmbed::default()
                .title("📊 Monthly Report")
                .color(0x0034_98DB)
                .fields(fields.into_iter().map(|(name, value)| (name, value, false)));
            if index == 0 {
                embed = embed.description(format!(
                    "**{total_orders}** orders across {months} month(s)"
                ));
            }
            if page_count > 1 {
                embed = embed.footer(serenity::CreateEmbedFooter::new(format!(
                    "Page {}/{page_count}",
                    index + 1
                )));
            }

            ctx.send(poise::CreateReply::default().embed(embed)).await?;
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::services::default_services;
    use crate::core::{
        booking::{BookingRecord, ExtraItem, PieceBreakdown, PieceCategory},
        stats::{aggregate_monthly_stats, sort_chronologically},
    };
    use crate::test_utils::sample_record;

    #[test]
    fn test_truncate_short_text_is_unchanged() {
        assert_eq!(truncate("Orders: 3", FIELD_LIMIT), "Orders: 3");
    }

    fn busy_month(id: usize, date: &str) -> BookingRecord {
        let mut breakdown = PieceBreakdown::default();
        for (count, category) in (10..).zip(PieceCategory::ALL) {
            breakdown = breakdown.with(category, count);
        }
        breakdown.extra_items = vec![ExtraItem::new("Rug", 2), ExtraItem::new("Curtain", 4)];
        let catalog: Vec<String> = default_services().into_iter().map(|s| s.name).collect();
        let names: Vec<&str> = catalog.iter().map(String::as_str).collect();
        sample_record(&id.to_string(), date, breakdown, &names)
    }

    #[test]
    fn test_report_pages_fit_discord_limits() {
        let records: Vec<BookingRecord> = (0..24)
            .map(|i| busy_month(i, &format!("{}-{:02}-15", 2023 + i / 12, i % 12 + 1)))
            .collect();
        let mut stats = aggregate_monthly_stats(&records);
        sort_chronologically(&mut stats);

        let pages = report_pages(&stats);

        assert!(pages.len() > 1);
        for page in &pages {
            let chars: usize = page
                .iter()
                .map(|(name, value)| name.chars().count() + value.chars().count())
                .sum();
            assert!(chars + PAGE_OVERHEAD <= EMBED_TOTAL_LIMIT, "page has {chars} chars");
            assert!(page.len() <= MAX_FIELDS);
            assert!(page.iter().all(|(_, value)| value.chars().count() <= FIELD_LIMIT));
        }

        let months: Vec<&str> = pages.iter().flatten().map(|(name, _)| name.as_str()).collect();
        assert_eq!(months.len(), 24);
        assert_eq!(months[0], "January / 2023");
        assert_eq!(months[23], "December / 2024");
    }

    #[test]
    fn test_report_pages_keep_every_month_past_field_cap() {
        let records: Vec<BookingRecord> = (0..40)
            .map(|i| {
                sample_record(
                    &i.to_string(),
                    &format!("{}-{:02}-01", 2020 + i / 12, i % 12 + 1),
                    PieceBreakdown::default().with(PieceCategory::Shirt, 1),
                    &["Delicates"],
                )
            })
            .collect();
        let stats = aggregate_monthly_stats(&records);

        let pages = report_pages(&stats);

        assert_eq!(pages.iter().map(Vec::len).sum::<usize>(), 40);
        assert!(pages.iter().all(|page| page.len() <= MAX_FIELDS));
    }

    #[test]
    fn test_report_pages_empty() {
        assert!(report_pages(&[]).is_empty());
    }

    #[test]
    fn test_truncate_respects_limit_in_chars() {
        let long = "👕".repeat(FIELD_LIMIT + 10);
        let cut = truncate(&long, FIELD_LIMIT);
        assert_eq!(cut.chars().count(), FIELD_LIMIT);
        assert!(cut.ends_with('…'));
    }
}

//! Booking Discord command - `book`.
//!
//! Collects a booking submission from slash command options and hands it to
//! the store. Validation failures are answered privately and leave the store
//! untouched.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, handlers::autocomplete},
        core::{
            booking::{ExtraItem, NewBooking, PieceBreakdown, PieceCategory},
            service::ServiceOffering,
        },
        errors::{Error, Result, ValidationError},
    };

    /// Resolves user-typed service names against the catalog, case-insensitively.
    ///
    /// Returns the catalog spelling of every name, or the first unknown name.
    fn resolve_services(
        catalog: &[ServiceOffering],
        typed: &str,
    ) -> std::result::Result<Vec<String>, String> {
        typed
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| {
                catalog
                    .iter()
                    .find(|svc| svc.name.eq_ignore_ascii_case(name))
                    .map(|svc| svc.name.clone())
                    .ok_or_else(|| name.to_string())
            })
            .collect()
    }

    const fn validation_message(error: &ValidationError) -> &'static str {
        match error {
            ValidationError::NoPieces => "❌ Add at least one piece.",
            ValidationError::NoServiceSelected => "❌ Select at least one service.",
            ValidationError::MissingField { .. } => "❌ Name and phone are required.",
        }
    }

    /// Requests a laundry pickup.
    ///
    /// Piece counts default to zero. Extra items outside the fixed categories
    /// are written as `Rug: 2; Curtain: 1`.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command)]
    pub async fn book(
        ctx: Context<'_>,
        #[description = "Your name"] name: String,
        #[description = "Phone / WhatsApp"] phone: String,
        #[description = "Services, comma-separated"]
        #[autocomplete = "autocomplete::autocomplete_service_list"]
        services: String,
        #[description = "Pickup date (YYYY-MM-DD)"] date: Option<String>,
        #[description = "Pickup time (HH:MM)"] time: Option<String>,
        #[description = "Shirts"] shirts: Option<u32>,
        #[description = "Sweatshirts"] sweatshirts: Option<u32>,
        #[description = "T-shirts"] t_shirts: Option<u32>,
        #[description = "Pants"] pants: Option<u32>,
        #[description = "Suits"] suits: Option<u32>,
        #[description = "Bath towels"] bath_towels: Option<u32>,
        #[description = "Face towels"] face_towels: Option<u32>,
        #[description = "Sheets"] sheets: Option<u32>,
        #[description = "Extra items, e.g. 'Rug: 2; Curtain: 1'"] extras: Option<String>,
        #[description = "Notes for our team"] notes: Option<String>,
        #[description = "Pickup address"] pickup_address: Option<String>,
        #[description = "Delivery address"] delivery_address: Option<String>,
    ) -> Result<()> {
        let mut breakdown = PieceBreakdown::default();
        for (category, count) in [
            (PieceCategory::Shirt, shirts),
            (PieceCategory::Sweatshirt, sweatshirts),
            (PieceCategory::TShirt, t_shirts),
            (PieceCategory::Pants, pants),
            (PieceCategory::Suit, suits),
            (PieceCategory::BathTowel, bath_towels),
            (PieceCategory::FaceTowel, face_towels),
            (PieceCategory::Sheet, sheets),
        ] {
            *breakdown.count_mut(category) = count.unwrap_or(0);
        }
        breakdown.extra_items = extras
            .as_deref()
            .map(ExtraItem::parse_list)
            .unwrap_or_default();
        let capped: Vec<String> = breakdown
            .extra_items
            .iter()
            .filter(|item| item.is_capped() && !item.name.trim().is_empty())
            .map(|item| item.name.clone())
            .collect();

        let mut store = ctx.data().store.lock().await;

        let services = match resolve_services(store.services(), &services) {
            Ok(services) => services,
            Err(unknown) => {
                drop(store);
                ctx.send(
                    poise::CreateReply::default()
                        .content(format!(
                            "❌ Unknown service '{unknown}'. Use `/services` to see the catalog."
                        ))
                        .ephemeral(true),
                )
                .await?;
                return Ok(());
            }
        };

        let input = NewBooking {
            name,
            phone,
            breakdown,
            services,
            date: date.unwrap_or_default(),
            time: time.unwrap_or_default(),
            obs: notes,
            pickup_address,
            delivery_address,
        };

        match store.create_booking(input).await {
            Ok(record) => {
                drop(store);
                let mut reply = format!(
                    "✅ Booking requested! Reference **#{}** - {} pieces for {}.",
                    record.id,
                    record.quantity,
                    record.services.join(", ")
                );
                if !capped.is_empty() {
                    reply.push_str(&format!(
                        "\n⚠️ Quantity capped at {} for: {}.",
                        u32::MAX,
                        capped.join(", ")
                    ));
                }
                ctx.say(reply).await?;
            }
            Err(Error::Validation(error)) => {
                drop(store);
                ctx.send(
                    poise::CreateReply::default()
                        .content(validation_message(&error))
                        .ephemeral(true),
                )
                .await?;
            }
            Err(e) => return Err(e),
        }

        Ok(())
    }

}

// Re-export all commands
pub use inner::*;

//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggestions are read from the store under its lock and never mutate it.

use crate::{
    bot::BotData,
    core::{booking::BookingStatus, service::ServiceOffering},
    errors::Error,
};

/// Discord accepts at most 25 autocomplete suggestions.
const MAX_SUGGESTIONS: usize = 25;
/// Discord accepts autocomplete choices of at most 100 characters.
const MAX_CHOICE_CHARS: usize = 100;

/// Suggests catalog service names matching the partial input.
pub async fn autocomplete_service_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let store = ctx.data().store.lock().await;
    let partial_lower = partial.to_lowercase();

    store
        .services()
        .iter()
        .filter(|svc| svc.name.to_lowercase().contains(&partial_lower))
        .map(|svc| svc.name.clone())
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// Suggests service names for a comma-separated list, completing only the
/// entry being typed and keeping the ones before it.
pub async fn autocomplete_service_list(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let store = ctx.data().store.lock().await;
    service_list_suggestions(store.services(), partial)
}

/// Completions for the last entry of a comma-separated service list.
///
/// Discord rejects the whole response if any choice is longer than
/// [`MAX_CHOICE_CHARS`], so such choices are left out.
fn service_list_suggestions(catalog: &[ServiceOffering], partial: &str) -> Vec<String> {
    let (done, current) = match partial.rsplit_once(',') {
        Some((done, current)) => (Some(done.trim()), current.trim()),
        None => (None, partial.trim()),
    };
    let already: Vec<String> = done
        .map(|d| d.split(',').map(|s| s.trim().to_lowercase()).collect())
        .unwrap_or_default();
    let current_lower = current.to_lowercase();

    catalog
        .iter()
        .filter(|svc| {
            let name = svc.name.to_lowercase();
            name.contains(&current_lower) && !already.contains(&name)
        })
        .map(|svc| match done {
            Some(done) if !done.is_empty() => format!("{done}, {}", svc.name),
            _ => svc.name.clone(),
        })
        .filter(|choice| choice.chars().count() <= MAX_CHOICE_CHARS)
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// Suggests booking ids whose id or customer name matches the partial
/// input, most recent first.
pub async fn autocomplete_booking_id(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let store = ctx.data().store.lock().await;
    let partial_lower = partial.to_lowercase();

    store
        .bookings()
        .iter()
        .rev()
        .filter(|b| b.id.contains(partial) || b.name.to_lowercase().contains(&partial_lower))
        .map(|b| b.id.clone())
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// Suggests booking statuses.
pub async fn autocomplete_status(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let partial_lower = partial.to_lowercase();

    BookingStatus::ALL
        .iter()
        .map(|status| status.as_str())
        .filter(|name| name.to_lowercase().contains(&partial_lower))
        .map(str::to_string)
        .collect()
}

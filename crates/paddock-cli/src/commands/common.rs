use std::env;
use std::path::Path;

use chrono::{DateTime, Utc};
use paddock_core::api::{CarApiClient, DEFAULT_BASE_URL};
use paddock_core::feed::FeedCoordinator;
use paddock_core::models::{CarEntry, LayoutMode, UserProfile};
use paddock_core::prefs::PreferenceStore;
use serde::Serialize;

use crate::error::CliError;

/// Environment variable overriding the catalog service base URL.
pub const BASE_URL_ENV: &str = "PADDOCK_API_URL";

pub fn open_store(path: Option<&Path>) -> Result<PreferenceStore, CliError> {
    match path {
        Some(path) => Ok(PreferenceStore::open(path)?),
        None => Ok(PreferenceStore::open_default()?),
    }
}

pub fn require_signed_in(store: &PreferenceStore) -> Result<UserProfile, CliError> {
    let profile = store.profile();
    if profile.is_signed_in() {
        Ok(profile)
    } else {
        Err(CliError::NotSignedIn)
    }
}

pub fn resolve_base_url(explicit: Option<&str>) -> String {
    pick_base_url(explicit, env::var(BASE_URL_ENV).ok().as_deref())
}

/// Explicit flag wins over the environment, which wins over the default.
pub fn pick_base_url(explicit: Option<&str>, env_value: Option<&str>) -> String {
    if let Some(url) = normalize_url_value(explicit) {
        return url;
    }
    if let Some(url) = normalize_url_value(env_value) {
        return url;
    }
    DEFAULT_BASE_URL.to_string()
}

fn normalize_url_value(value: Option<&str>) -> Option<String> {
    let value = value?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

pub fn build_client(explicit: Option<&str>) -> Result<CarApiClient, CliError> {
    Ok(CarApiClient::new(resolve_base_url(explicit))?)
}

pub fn build_coordinator(explicit: Option<&str>) -> Result<FeedCoordinator<CarApiClient>, CliError> {
    Ok(FeedCoordinator::new(build_client(explicit)?))
}

#[derive(Debug, Serialize)]
pub struct CarListItem {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub location: String,
    pub created_at: String,
    pub uploaded: String,
    pub image_url: String,
}

pub fn car_to_list_item(entry: &CarEntry, client: &CarApiClient, now: DateTime<Utc>) -> CarListItem {
    CarListItem {
        id: entry.id.as_i64(),
        name: entry.name.clone(),
        category: entry.category.clone(),
        location: entry.location.clone(),
        created_at: entry.created_at.clone(),
        uploaded: format_uploaded_at(entry, now),
        image_url: client.image_url(&entry.image_id),
    }
}

/// Relative upload time for recent entries, plain date for older ones.
///
/// Falls back to the server's raw string when it cannot be parsed.
pub fn format_uploaded_at(entry: &CarEntry, now: DateTime<Utc>) -> String {
    let Some(created) = entry.created_at_utc() else {
        return entry.created_at.clone();
    };

    let diff = now.signed_duration_since(created);
    if diff.num_seconds() < 60 {
        "just now".to_string()
    } else if diff.num_minutes() < 60 {
        format!("{}m ago", diff.num_minutes())
    } else if diff.num_hours() < 24 {
        format!("{}h ago", diff.num_hours())
    } else if diff.num_days() < 7 {
        format!("{}d ago", diff.num_days())
    } else {
        created.format("%Y-%m-%d").to_string()
    }
}

pub fn format_car_lines(
    entries: &[CarEntry],
    client: &CarApiClient,
    layout: LayoutMode,
) -> Vec<String> {
    let now = Utc::now();
    match layout {
        LayoutMode::List => entries
            .iter()
            .map(|entry| {
                let item = car_to_list_item(entry, client, now);
                format!(
                    "{:>4}  {:<24}  {:<14}  {:<14}  {:<10}  {}",
                    item.id,
                    clip(&item.name, 24),
                    clip(&item.category, 14),
                    clip(&item.location, 14),
                    item.uploaded,
                    item.image_url
                )
            })
            .collect(),
        LayoutMode::Grid => entries
            .chunks(3)
            .map(|row| {
                row.iter()
                    .map(|entry| format!("{:<28}", clip(&format!("{} ({})", entry.name, entry.id), 26)))
                    .collect::<Vec<_>>()
                    .join("")
                    .trim_end()
                    .to_string()
            })
            .collect(),
    }
}

pub fn clip(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = text.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

//! Favorites (watched auction items) and saved searches.
//!
//! # Overview
//!
//! - [`Favorite`]: one watched item as returned by the buyer API
//! - [`FavoriteType`]: the `Type` filter of the favorites listing
//! - [`FavoriteStatus`]: whether the auction is still open
//! - [`SavedSearch`]: a saved search, kept as raw JSON
//! - [`FavoritesGateway`]: the authenticated operations
//!
//! A favorite is identified by its item id, but its note is saved against its
//! watchlist id. Notes longer than [`FAVORITES_MAX_NOTE_LENGTH`] characters
//! are truncated before sending.

mod error;
mod gateway;

pub use error::FavoritesError;
pub use gateway::FavoritesGateway;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of a favorite note, in characters.
pub const FAVORITES_MAX_NOTE_LENGTH: usize = 256;

/// Filter for the favorites listing.
///
/// # Example
///
/// ```rust
/// use shopgoodwill_api::FavoriteType;
///
/// assert_eq!(FavoriteType::default(), FavoriteType::Open);
/// assert_eq!(FavoriteType::Closed.as_str(), "closed");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FavoriteType {
    /// Every favorite.
    All,
    /// Favorites whose auction is still running.
    #[default]
    Open,
    /// Favorites whose auction has ended.
    Closed,
}

impl FavoriteType {
    /// Returns the `Type` query value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for FavoriteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Auction status of a favorite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FavoriteStatus {
    /// The auction is running.
    Open,
    /// The auction has ended.
    Close,
}

/// A saved search, preserved exactly as the API returned it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedSearch(pub serde_json::Value);

impl SavedSearch {
    /// Returns a field of the underlying record.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }
}

/// A watched auction item.
///
/// Timestamps are the site's local wall-clock times. They are accepted with
/// or without a UTC offset; an offset, if present, is dropped. Descriptive,
/// price and count fields read a missing or `null` value as zero or empty,
/// so one sparse record does not spoil a whole listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    /// The auction item id.
    pub item_id: i64,

    /// The watchlist entry id. Notes are saved against this id.
    pub watchlist_id: i64,

    /// The seller's id.
    pub seller_id: i64,

    /// The seller's display name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub seller_name: String,

    /// The listing title.
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    /// Full category path, e.g. `Electronics > Cameras`.
    #[serde(rename = "catFullName", default, deserialize_with = "null_as_default")]
    pub category: String,

    /// Host serving the item image.
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_server: String,

    /// Path of the item image on [`image_server`](Self::image_server).
    #[serde(rename = "imageURL", default, deserialize_with = "null_as_default")]
    pub image_url: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub image_status: i32,

    #[serde(default, deserialize_with = "null_as_default")]
    pub current_price: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub minimum_bid: f64,

    /// The user's maximum bid, if any.
    #[serde(default)]
    pub max_bid: Option<f64>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub buy_now_price: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub discounted_buy_now_price: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub discount: f64,

    /// Number of bids placed.
    #[serde(default, deserialize_with = "null_as_default")]
    pub num_bids: i32,

    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity_won: i32,

    #[serde(default, deserialize_with = "null_as_default")]
    pub item_quantity: i32,

    #[serde(default, deserialize_with = "null_as_default")]
    pub is_stock: bool,

    #[serde(default)]
    pub item_part_number: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub listing_type: i32,

    /// When the auction starts.
    #[serde(with = "timestamp")]
    pub start_time: NaiveDateTime,

    /// When the auction ends.
    #[serde(with = "timestamp")]
    pub end_time: NaiveDateTime,

    /// Whether the auction is still open.
    #[serde(rename = "type")]
    pub status: FavoriteStatus,

    /// The user's note, at most [`FAVORITES_MAX_NOTE_LENGTH`] characters.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Truncates a note to [`FAVORITES_MAX_NOTE_LENGTH`] characters.
///
/// Counts Unicode scalar values, so a multi-byte character is never split.
///
/// ```rust
/// use shopgoodwill_api::favorites::truncate_note;
///
/// assert_eq!(truncate_note("short"), "short");
/// assert_eq!(truncate_note(&"é".repeat(300)).chars().count(), 256);
/// ```
#[must_use]
pub fn truncate_note(note: &str) -> &str {
    match note.char_indices().nth(FAVORITES_MAX_NOTE_LENGTH) {
        Some((end, _)) => &note[..end],
        None => note,
    }
}

/// Reads `null` as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Serde adapter for favorite timestamps.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {raw}")))
    }

    pub(super) fn parse(raw: &str) -> Option<NaiveDateTime> {
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.naive_local())
            .ok()
            .or_else(|| NaiveDateTime::parse_from_str(raw, FORMAT).ok())
    }
}

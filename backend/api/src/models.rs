//! Core entities of the campaign store and their wire representations.
//!
//! Field names follow the JSON contract consumed by the mobile client
//! (`camelCase`, ISO-8601 timestamps, monetary values as plain numbers).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a fundraising campaign.
///
/// The only transition is `Active` → `Completed`, taken exactly once when
/// `raised` reaches `goal`. Completed campaigns never revert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    /// Accepting donations.
    Active,
    /// Goal reached; no further donations accepted.
    Completed,
}

impl CampaignStatus {
    /// Wire identifier, as it appears in JSON and in the `status` query filter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

/// A fundraising campaign.
///
/// `goal` and `createdAt` are immutable after seeding; `raised` and `status`
/// are mutated only by the donation acceptance workflow in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: u64,
    pub title: String,
    pub description: String,
    /// Target amount. Positive, never edited.
    pub goal: f64,
    /// Running total. Non-decreasing; kept equal to the sum of accepted
    /// donation amounts applied since startup.
    pub raised: f64,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub status: CampaignStatus,
    pub category: String,
    pub organizer: String,
}

/// A single recorded contribution. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: u64,
    /// The campaign this donation belongs to (wire name kept from the
    /// original API: `fundraiserId`).
    pub fundraiser_id: u64,
    pub amount: f64,
    /// Display name, or the literal `"Anonymous"` when the donor opted out.
    pub donor_name: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub anonymous: bool,
}

/// Request body for `POST /api/fundraisers/:id/donations`.
///
/// `amount` and `donorName` are optional here so that missing fields reach
/// the validation step and produce field-level messages instead of a
/// deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDonation {
    /// Non-numeric JSON values (strings, booleans, ...) deserialize as
    /// absent, so they fail the positivity check with its message rather
    /// than rejecting the whole body.
    #[serde(default, deserialize_with = "numeric_or_none")]
    pub amount: Option<f64>,
    pub donor_name: Option<String>,
    pub message: Option<String>,
    #[serde(default)]
    pub anonymous: bool,
}

fn numeric_or_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => Some(n),
        _ => None,
    })
}

// ─────────────────────────────────────────────────────────
// Sorting
// ─────────────────────────────────────────────────────────

/// Sortable campaign fields.
///
/// `sortBy` arrives as a free-form query string; anything outside this set
/// falls back to `CreatedAt` so the read endpoints never fail on input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CampaignSortField {
    #[default]
    CreatedAt,
    Title,
    Goal,
    Raised,
    Category,
}

impl CampaignSortField {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("title") => Self::Title,
            Some("goal") => Self::Goal,
            Some("raised") => Self::Raised,
            Some("category") => Self::Category,
            _ => Self::CreatedAt,
        }
    }
}

/// Sortable donation fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DonationSortField {
    #[default]
    CreatedAt,
    Amount,
    DonorName,
}

impl DonationSortField {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("amount") => Self::Amount,
            Some("donorName") => Self::DonorName,
            _ => Self::CreatedAt,
        }
    }
}

/// Sort direction. Anything other than `asc` sorts descending, matching the
/// original API's behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("asc") => Self::Asc,
            _ => Self::Desc,
        }
    }
}

// ─────────────────────────────────────────────────────────
// Pagination
// ─────────────────────────────────────────────────────────

/// Page metadata returned alongside every list response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    /// Size of the filtered set before slicing.
    pub total: u64,
    pub total_pages: u64,
}

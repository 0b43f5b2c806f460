//! The campaign store — single owner of the in-memory collections.
//!
//! All data lives in two `Vec`s behind one `RwLock`. Read-only queries
//! (listing, lookups, statistics) take the read lock, clone what they need,
//! and do their filtering/sorting on the snapshot. The donation acceptance
//! workflow is the only mutation; it holds the write lock across its whole
//! read-modify-write so no request can observe a campaign whose `raised`
//! was bumped without its completion check having run.

use std::cmp::Ordering;
use std::sync::RwLock;

use chrono::Utc;
use serde::Serialize;

use crate::errors::{ApiError, Result};
use crate::models::{
    Campaign, CampaignSortField, CampaignStatus, Donation, DonationSortField, NewDonation,
    Pagination, SortOrder,
};
use crate::seed;

/// Largest accepted donation amount.
pub const MAX_DONATION_AMOUNT: f64 = 100_000.0;

/// Donor name shown when a donation is marked anonymous.
pub const ANONYMOUS_DONOR: &str = "Anonymous";

// ─────────────────────────────────────────────────────────
// Query parameters
// ─────────────────────────────────────────────────────────

/// Filter, sort, and page parameters for [`CampaignStore::list_campaigns`].
#[derive(Debug, Clone, Default)]
pub struct CampaignQuery {
    /// Equality filter against the status wire string.
    pub status: Option<String>,
    /// Equality filter against the category.
    pub category: Option<String>,
    /// Case-insensitive substring match against title or description.
    pub search: Option<String>,
    pub sort_by: CampaignSortField,
    pub sort_order: SortOrder,
    pub page: u64,
    pub limit: u64,
}

impl CampaignQuery {
    fn matches(&self, campaign: &Campaign) -> bool {
        if let Some(status) = &self.status {
            if campaign.status.as_str() != status {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if &campaign.category != category {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let term = search.to_lowercase();
            let hit = campaign.title.to_lowercase().contains(&term)
                || campaign.description.to_lowercase().contains(&term);
            if !hit {
                return false;
            }
        }
        true
    }
}

/// Sort and page parameters for [`CampaignStore::donations_for_campaign`].
#[derive(Debug, Clone, Default)]
pub struct DonationQuery {
    pub sort_by: DonationSortField,
    pub sort_order: SortOrder,
    pub page: u64,
    pub limit: u64,
}

// ─────────────────────────────────────────────────────────
// Aggregates
// ─────────────────────────────────────────────────────────

/// Totals over the full filtered donation set (not just the returned page).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationSummary {
    pub total_amount: f64,
    pub total_count: u64,
    /// Mean donation, rounded to 2 decimals; `0` when there are none.
    pub average_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub fundraisers: CampaignCounts,
    pub fundraising: FundingTotals,
    pub donations: DonationTotals,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CampaignCounts {
    pub total: u64,
    pub active: u64,
    /// Anything not active counts as completed.
    pub completed: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingTotals {
    pub total_raised: f64,
    pub total_goal: f64,
    /// `100 * totalRaised / totalGoal`, rounded to 2 decimals; `0` when
    /// the goal total is zero.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationTotals {
    pub total_count: u64,
    pub total_amount: f64,
    pub average_amount: f64,
}

// ─────────────────────────────────────────────────────────
// Store
// ─────────────────────────────────────────────────────────

struct Collections {
    campaigns: Vec<Campaign>,
    donations: Vec<Donation>,
}

/// Owns the campaign and donation collections for the process lifetime.
pub struct CampaignStore {
    inner: RwLock<Collections>,
}

impl CampaignStore {
    /// Construct a store holding the fixed seed data.
    pub fn with_seed_data() -> Self {
        Self::new(seed::campaigns(), seed::donations())
    }

    pub fn new(campaigns: Vec<Campaign>, donations: Vec<Donation>) -> Self {
        Self {
            inner: RwLock::new(Collections {
                campaigns,
                donations,
            }),
        }
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Collections>> {
        self.inner
            .read()
            .map_err(|_| ApiError::Internal("store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Collections>> {
        self.inner
            .write()
            .map_err(|_| ApiError::Internal("store lock poisoned".to_string()))
    }

    // ── Campaign queries ─────────────────────────────────

    /// Filter, sort, and page the campaign collection.
    ///
    /// Filters combine with AND semantics; an empty result is a normal
    /// outcome, not an error.
    pub fn list_campaigns(&self, query: &CampaignQuery) -> Result<(Vec<Campaign>, Pagination)> {
        let mut matched: Vec<Campaign> = {
            let inner = self.read()?;
            inner
                .campaigns
                .iter()
                .filter(|c| query.matches(c))
                .cloned()
                .collect()
        };
        sort_campaigns(&mut matched, query.sort_by, query.sort_order);
        Ok(paginate(matched, query.page, query.limit))
    }

    /// Exact-match lookup by id.
    pub fn campaign(&self, id: u64) -> Result<Campaign> {
        let inner = self.read()?;
        inner
            .campaigns
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(ApiError::NotFound)
    }

    /// Distinct non-empty categories, in first-occurrence order.
    pub fn categories(&self) -> Result<Vec<String>> {
        let inner = self.read()?;
        let mut seen: Vec<String> = Vec::new();
        for campaign in &inner.campaigns {
            if !campaign.category.is_empty() && !seen.contains(&campaign.category) {
                seen.push(campaign.category.clone());
            }
        }
        Ok(seen)
    }

    /// Aggregate counts and funding totals across the whole store.
    pub fn statistics(&self) -> Result<Statistics> {
        let inner = self.read()?;

        let total = inner.campaigns.len() as u64;
        let active = inner
            .campaigns
            .iter()
            .filter(|c| c.status == CampaignStatus::Active)
            .count() as u64;

        let total_raised: f64 = inner.campaigns.iter().map(|c| c.raised).sum();
        let total_goal: f64 = inner.campaigns.iter().map(|c| c.goal).sum();
        let percentage = if total_goal > 0.0 {
            round2(100.0 * total_raised / total_goal)
        } else {
            0.0
        };

        let donation_count = inner.donations.len() as u64;
        let donation_amount: f64 = inner.donations.iter().map(|d| d.amount).sum();
        let average_amount = if donation_count > 0 {
            round2(donation_amount / donation_count as f64)
        } else {
            0.0
        };

        Ok(Statistics {
            fundraisers: CampaignCounts {
                total,
                active,
                completed: total - active,
            },
            fundraising: FundingTotals {
                total_raised,
                total_goal,
                percentage,
            },
            donations: DonationTotals {
                total_count: donation_count,
                total_amount: donation_amount,
                average_amount,
            },
        })
    }

    // ── Donation queries ─────────────────────────────────

    /// Donations belonging to one campaign, sorted and paged, plus a
    /// summary over the full filtered set.
    ///
    /// Fails with [`ApiError::NotFound`] when the campaign does not exist.
    pub fn donations_for_campaign(
        &self,
        campaign_id: u64,
        query: &DonationQuery,
    ) -> Result<(Vec<Donation>, DonationSummary, Pagination)> {
        let mut matched: Vec<Donation> = {
            let inner = self.read()?;
            if !inner.campaigns.iter().any(|c| c.id == campaign_id) {
                return Err(ApiError::NotFound);
            }
            inner
                .donations
                .iter()
                .filter(|d| d.fundraiser_id == campaign_id)
                .cloned()
                .collect()
        };
        sort_donations(&mut matched, query.sort_by, query.sort_order);

        let total_count = matched.len() as u64;
        let total_amount: f64 = matched.iter().map(|d| d.amount).sum();
        let summary = DonationSummary {
            total_amount,
            total_count,
            average_amount: if total_count > 0 {
                round2(total_amount / total_count as f64)
            } else {
                0.0
            },
        };

        let (page, pagination) = paginate(matched, query.page, query.limit);
        Ok((page, summary, pagination))
    }

    // ── Donation acceptance ──────────────────────────────

    /// Accept a donation: validate, record it, bump the campaign's running
    /// total, and evaluate goal completion — all under the write lock.
    ///
    /// Ordering of failures: unknown campaign, then non-active campaign,
    /// then field validation (which reports every violation at once).
    pub fn submit_donation(&self, campaign_id: u64, input: NewDonation) -> Result<Donation> {
        let mut inner = self.write()?;

        let idx = inner
            .campaigns
            .iter()
            .position(|c| c.id == campaign_id)
            .ok_or(ApiError::NotFound)?;

        if inner.campaigns[idx].status != CampaignStatus::Active {
            return Err(ApiError::InvalidState(
                "Cannot donate to a fundraiser that is not active".to_string(),
            ));
        }

        let valid = validate_donation(&input).map_err(ApiError::Validation)?;

        let next_id = inner.donations.iter().map(|d| d.id).max().unwrap_or(0) + 1;
        let donation = Donation {
            id: next_id,
            fundraiser_id: campaign_id,
            amount: valid.amount,
            donor_name: if input.anonymous {
                ANONYMOUS_DONOR.to_string()
            } else {
                valid.donor_name
            },
            message: input
                .message
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
            created_at: Utc::now(),
            anonymous: input.anonymous,
        };
        inner.donations.push(donation.clone());

        let campaign = &mut inner.campaigns[idx];
        campaign.raised += donation.amount;
        if campaign.raised >= campaign.goal && campaign.status == CampaignStatus::Active {
            campaign.status = CampaignStatus::Completed;
        }

        Ok(donation)
    }
}

// ─────────────────────────────────────────────────────────
// Validation
// ─────────────────────────────────────────────────────────

struct ValidatedDonation {
    amount: f64,
    donor_name: String,
}

/// Collect every field violation; the positivity and ceiling checks on
/// `amount` are evaluated independently of each other.
fn validate_donation(
    input: &NewDonation,
) -> std::result::Result<ValidatedDonation, Vec<String>> {
    let mut errors = Vec::new();

    let amount = input.amount.filter(|a| a.is_finite() && *a > 0.0);
    if amount.is_none() {
        errors.push("Amount must be a positive number".to_string());
    }
    if input.amount.is_some_and(|a| a > MAX_DONATION_AMOUNT) {
        errors.push("Amount cannot exceed $100,000".to_string());
    }

    let trimmed = input.donor_name.as_deref().map(str::trim);
    if trimmed.map_or(true, str::is_empty) {
        errors.push("Donor name is required".to_string());
    }
    // Length checks apply whenever a name was supplied at all, even one
    // that trims down to nothing.
    if let Some(name) = input.donor_name.as_deref().filter(|n| !n.is_empty()) {
        let len = name.trim().chars().count();
        if len < 2 {
            errors.push("Donor name must be at least 2 characters".to_string());
        }
        if len > 100 {
            errors.push("Donor name must be less than 100 characters".to_string());
        }
    }

    match (amount, trimmed) {
        (Some(amount), Some(name)) if errors.is_empty() => Ok(ValidatedDonation {
            amount,
            donor_name: name.to_string(),
        }),
        _ => Err(errors),
    }
}

// ─────────────────────────────────────────────────────────
// Sorting and paging
// ─────────────────────────────────────────────────────────

fn directed(ord: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Asc => ord,
        SortOrder::Desc => ord.reverse(),
    }
}

/// Sort campaigns by the requested field, tie-breaking on ascending id so
/// equal keys always come back in a deterministic order.
fn sort_campaigns(campaigns: &mut [Campaign], field: CampaignSortField, order: SortOrder) {
    campaigns.sort_by(|a, b| {
        let key = match field {
            CampaignSortField::CreatedAt => a.created_at.cmp(&b.created_at),
            CampaignSortField::Title => a.title.cmp(&b.title),
            CampaignSortField::Goal => a.goal.total_cmp(&b.goal),
            CampaignSortField::Raised => a.raised.total_cmp(&b.raised),
            CampaignSortField::Category => a.category.cmp(&b.category),
        };
        directed(key, order).then_with(|| a.id.cmp(&b.id))
    });
}

fn sort_donations(donations: &mut [Donation], field: DonationSortField, order: SortOrder) {
    donations.sort_by(|a, b| {
        let key = match field {
            DonationSortField::CreatedAt => a.created_at.cmp(&b.created_at),
            DonationSortField::Amount => a.amount.total_cmp(&b.amount),
            DonationSortField::DonorName => a.donor_name.cmp(&b.donor_name),
        };
        directed(key, order).then_with(|| a.id.cmp(&b.id))
    });
}

/// Slice out one page and report the metadata for the whole filtered set.
/// `page` and `limit` are clamped to at least 1.
fn paginate<T>(items: Vec<T>, page: u64, limit: u64) -> (Vec<T>, Pagination) {
    let page = page.max(1);
    let limit = limit.max(1);
    let total = items.len() as u64;
    let start = (page - 1).saturating_mul(limit);
    let slice = items
        .into_iter()
        .skip(start as usize)
        .take(limit as usize)
        .collect();
    (
        slice,
        Pagination {
            page,
            limit,
            total,
            total_pages: total.div_ceil(limit),
        },
    )
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ─────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────

use serde::Serialize;
use tracing::debug;

use super::ToolResult;
use crate::core::names::display_name;
use crate::core::{CurrencyCode, RateProvider, RateSnapshot, ToolError};

/// Base currency every listing is expressed against.
pub const REFERENCE_CURRENCY: &str = "USD";
/// Maximum number of entries returned by a listing.
pub const MAX_LISTED: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyEntry {
    pub code: String,
    pub name: String,
    pub rate_to_usd: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyListing {
    pub total_currencies: usize,
    pub currencies: Vec<CurrencyEntry>,
    pub timestamp: String,
    pub base_currency: String,
}

/// Failed listings still carry an empty `currencies` array.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListingEcho {
    pub currencies: Vec<CurrencyEntry>,
}

/// Builds the listing from a snapshot: sorted by code, capped at [`MAX_LISTED`].
pub fn build_listing(snapshot: RateSnapshot) -> CurrencyListing {
    let total_currencies = snapshot.rates.len();
    // Snapshot rates are keyed in a BTreeMap, so this is already ascending by code
    let currencies = snapshot
        .rates
        .iter()
        .take(MAX_LISTED)
        .map(|(code, rate)| CurrencyEntry {
            code: code.clone(),
            name: display_name(code).to_string(),
            rate_to_usd: *rate,
        })
        .collect();

    CurrencyListing {
        total_currencies,
        currencies,
        timestamp: snapshot.last_update,
        base_currency: snapshot.base,
    }
}

pub async fn list_available_currencies(
    provider: &dyn RateProvider,
) -> ToolResult<CurrencyListing, ListingEcho> {
    ToolResult::from_outcome(list(provider).await, ListingEcho::default())
}

pub async fn list(provider: &dyn RateProvider) -> Result<CurrencyListing, ToolError> {
    let base = CurrencyCode::parse(REFERENCE_CURRENCY)?;
    let snapshot = provider.latest(&base).await?;
    let listing = build_listing(snapshot);
    debug!(
        total = listing.total_currencies,
        listed = listing.currencies.len(),
        "Built currency listing"
    );
    Ok(listing)
}

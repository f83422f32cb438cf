//! Currency normalization contract and a fixed-rate reference converter.

use std::collections::HashMap;

use async_trait::async_trait;
use common::OwnerKey;
use domain::{CurrencyCode, Price, PriceFixed};

use crate::Result;
use crate::error::ProjectionError;

/// Converts amounts into a user's default currency.
///
/// Rate sourcing is external; this crate only defines the contract the
/// query engine sums against. Callers convert each record individually,
/// before summation, using the rate of that record's date.
#[async_trait]
pub trait PriceConverter: Send + Sync {
    /// The additive identity in the owner's default currency.
    async fn zero_default(&self, owner: OwnerKey) -> Result<Price>;

    /// Converts a dated amount into the owner's default currency, using a
    /// rate applicable at that date.
    async fn to_default(&self, owner: OwnerKey, fixed: &PriceFixed) -> Result<Price>;
}

/// Rates expressed in basis points of the target currency
/// (10_000 = 1.0), keeping money math in integers.
fn convert_cents(cents: i64, rate_bps: i64) -> i64 {
    (cents as i128 * rate_bps as i128 / 10_000) as i64
}

/// A converter with fixed rates, ignoring the date.
///
/// Reference implementation for tests and single-process setups: one
/// fallback default currency, optional per-owner overrides, and a flat
/// rate table keyed by source currency.
pub struct StaticRateConverter {
    fallback: CurrencyCode,
    owner_defaults: HashMap<OwnerKey, CurrencyCode>,
    /// (from, to) -> rate in basis points.
    rates: HashMap<(CurrencyCode, CurrencyCode), i64>,
}

impl StaticRateConverter {
    /// Creates a converter whose default currency for every owner is
    /// `fallback`.
    pub fn new(fallback: impl Into<CurrencyCode>) -> Self {
        Self {
            fallback: fallback.into(),
            owner_defaults: HashMap::new(),
            rates: HashMap::new(),
        }
    }

    /// Overrides the default currency for one owner.
    pub fn with_default(
        mut self,
        owner: OwnerKey,
        currency: impl Into<CurrencyCode>,
    ) -> Self {
        self.owner_defaults.insert(owner, currency.into());
        self
    }

    /// Registers a conversion rate in basis points (10_000 = identity).
    pub fn with_rate(
        mut self,
        from: impl Into<CurrencyCode>,
        to: impl Into<CurrencyCode>,
        rate_bps: i64,
    ) -> Self {
        self.rates.insert((from.into(), to.into()), rate_bps);
        self
    }

    fn default_currency(&self, owner: OwnerKey) -> &CurrencyCode {
        self.owner_defaults.get(&owner).unwrap_or(&self.fallback)
    }
}

#[async_trait]
impl PriceConverter for StaticRateConverter {
    async fn zero_default(&self, owner: OwnerKey) -> Result<Price> {
        Ok(Price::zero(self.default_currency(owner).clone()))
    }

    async fn to_default(&self, owner: OwnerKey, fixed: &PriceFixed) -> Result<Price> {
        let target = self.default_currency(owner).clone();
        let source = fixed.price().currency();
        if *source == target {
            return Ok(fixed.price().clone());
        }

        let rate = self
            .rates
            .get(&(source.clone(), target.clone()))
            .copied()
            .ok_or_else(|| ProjectionError::MissingRate {
                from: source.clone(),
                to: target.clone(),
            })?;

        Ok(Price::new(convert_cents(fixed.price().cents(), rate), target))
    }
}

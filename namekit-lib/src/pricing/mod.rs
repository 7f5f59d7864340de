//! Price oracle: character validation, USD pricing and asset conversion.
//!
//! A name's yearly USD rate is picked from a length bucket (1, 2, 3, 4, 5+)
//! and raised by a composition premium when it contains emoji. Multi-year
//! leases pay the first year at the base rate and every further year `k`
//! at `base * (1 + surcharge)^k`, so prepaying is never cheaper per year
//! than renewing annually. The USD total is finally divided by the asset's
//! feed price.

mod feed;

pub use feed::{FixedPriceFeed, PriceFeed};

use crate::access::Ownable;
use crate::config::{NamekitConfig, PricingConfig};
use crate::emoji::EmojiSet;
use crate::events::{Event, EventLog};
use crate::{Address, Amount, CallContext, Name, NamekitError, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Composition class of a name, driving the premium.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositionTier {
    /// No emoji.
    Plain,
    /// Some but not all units are emoji.
    Mixed,
    /// Every unit is an emoji.
    AllEmoji,
}

impl CompositionTier {
    pub fn classify(emoji_count: usize, len: usize) -> Self {
        if emoji_count == 0 {
            Self::Plain
        } else if emoji_count == len {
            Self::AllEmoji
        } else {
            Self::Mixed
        }
    }

    pub fn premium_percent(&self, pricing: &PricingConfig) -> u32 {
        match self {
            Self::Plain => 0,
            Self::Mixed => pricing.mixed_emoji_premium_percent,
            Self::AllEmoji => pricing.all_emoji_premium_percent,
        }
    }
}

/// Full breakdown of a price.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub usd_per_year: Amount,
    pub usd_total: Amount,
    pub asset_amount: Amount,
    pub tier: CompositionTier,
    pub emoji_count: usize,
}

/// Prices names in any asset with a registered feed.
pub struct PriceOracle {
    ownable: Ownable,
    emojis: EmojiSet,
    feeds: HashMap<Address, Arc<dyn PriceFeed>>,
    pricing: PricingConfig,
    max_lease_years: u32,
    events: EventLog,
}

impl PriceOracle {
    /// Oracle owned by `owner`, seeded with the default emoji set.
    pub fn new(owner: Address, config: &NamekitConfig) -> Self {
        Self {
            ownable: Ownable::new(owner),
            emojis: EmojiSet::with_defaults(),
            feeds: HashMap::new(),
            pricing: config.pricing.clone(),
            max_lease_years: config.max_lease_years,
            events: EventLog::new(),
        }
    }

    pub fn owner(&self) -> Address {
        self.ownable.owner()
    }

    pub fn transfer_ownership(&mut self, ctx: &CallContext, new_owner: Address) -> Result<()> {
        let previous = self.ownable.transfer(ctx.caller, new_owner)?;
        self.events.emit(Event::OwnershipTransferred {
            previous,
            new: new_owner,
        });
        Ok(())
    }

    /// Adds emoji clusters. Owner only; re-adding is a no-op.
    pub fn register_emojis<I, S>(&mut self, ctx: &CallContext, batch: I) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ownable.ensure_owner(ctx.caller)?;
        let added = self.emojis.insert_batch(batch);
        tracing::debug!(added, total = self.emojis.len(), "emojis registered");
        self.events.emit(Event::EmojisRegistered { added });
        Ok(added)
    }

    pub fn is_emoji(&self, unit: &str) -> bool {
        self.emojis.contains(unit)
    }

    pub fn emojis(&self) -> &EmojiSet {
        &self.emojis
    }

    /// Splits plain text into units using the current emoji set.
    pub fn segment(&self, text: &str) -> Result<Name> {
        Name::from_units(self.emojis.segment(text))
    }

    /// Upserts the feed for `asset`. Owner only.
    pub fn set_asset_oracle(
        &mut self,
        ctx: &CallContext,
        asset: Address,
        feed: Arc<dyn PriceFeed>,
    ) -> Result<()> {
        self.ownable.ensure_owner(ctx.caller)?;
        tracing::debug!(%asset, feed = %feed.description(), "asset oracle set");
        self.feeds.insert(asset, feed);
        self.events.emit(Event::AssetOracleSet { asset });
        Ok(())
    }

    pub fn has_feed(&self, asset: Address) -> bool {
        self.feeds.contains_key(&asset)
    }

    /// Checks every unit and returns how many are emoji.
    ///
    /// A unit must be a known emoji cluster or exactly one ASCII letter.
    pub fn validate_and_count_emoji(&self, name: &Name) -> Result<usize> {
        let mut count = 0;
        for (index, unit) in name.units().iter().enumerate() {
            if self.emojis.contains(unit) {
                count += 1;
                continue;
            }
            if !is_ascii_letter(unit) {
                return Err(NamekitError::InvalidCharacter {
                    index,
                    unit: unit.clone(),
                });
            }
        }
        Ok(count)
    }

    /// USD rate for one year, premium included.
    pub fn dollar_price_per_year(&self, name: &Name) -> Result<Amount> {
        let emoji_count = self.validate_and_count_emoji(name)?;
        self.yearly_rate(name, emoji_count)
    }

    /// Lease price for `years` in `asset` units.
    pub fn price_for_duration(&self, name: &Name, years: u32, asset: Address) -> Result<Amount> {
        Ok(self.quote(name, years, asset)?.asset_amount)
    }

    /// Price breakdown for `years` in `asset` units.
    pub fn quote(&self, name: &Name, years: u32, asset: Address) -> Result<PriceQuote> {
        self.check_duration(years)?;
        let emoji_count = self.validate_and_count_emoji(name)?;
        let usd_per_year = self.yearly_rate(name, emoji_count)?;
        let usd_total = self.compound(usd_per_year, years)?;
        let asset_amount = self.convert(usd_total, asset)?;

        tracing::trace!(name = %name, years, %asset, %asset_amount, "quoted");
        Ok(PriceQuote {
            usd_per_year,
            usd_total,
            asset_amount,
            tier: CompositionTier::classify(emoji_count, name.len()),
            emoji_count,
        })
    }

    /// Drain emitted events.
    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take()
    }

    fn check_duration(&self, years: u32) -> Result<()> {
        if years < 1 {
            return Err(NamekitError::LeaseTooShort { years });
        }
        if years > self.max_lease_years {
            return Err(NamekitError::LeaseTooLong {
                years,
                max: self.max_lease_years,
            });
        }
        Ok(())
    }

    fn yearly_rate(&self, name: &Name, emoji_count: usize) -> Result<Amount> {
        if name.len() == 1 && emoji_count == 1 {
            return Err(NamekitError::invalid_input(
                "single emoji names have no price tier",
            ));
        }
        let base = self
            .pricing
            .base_rate_for_len(name.len())
            .ok_or_else(|| NamekitError::invalid_input("name must not be empty"))?;
        let base = Amount::from_decimal(Decimal::from(base));
        let tier = CompositionTier::classify(emoji_count, name.len());
        base.with_premium(Decimal::from(tier.premium_percent(&self.pricing)))
            .ok_or(NamekitError::Overflow)
    }

    fn compound(&self, base: Amount, years: u32) -> Result<Amount> {
        let step = Decimal::ONE
            .checked_add(Decimal::from(self.pricing.yearly_surcharge_percent) / Decimal::ONE_HUNDRED)
            .ok_or(NamekitError::Overflow)?;
        let mut factor = step;
        let mut total = base;
        for _ in 2..=years {
            factor = factor.checked_mul(step).ok_or(NamekitError::Overflow)?;
            let year = base.checked_mul(factor).ok_or(NamekitError::Overflow)?;
            total = total.checked_add(&year).ok_or(NamekitError::Overflow)?;
        }
        Ok(total)
    }

    fn convert(&self, usd: Amount, asset: Address) -> Result<Amount> {
        let feed = self
            .feeds
            .get(&asset)
            .ok_or(NamekitError::UnsupportedAsset { asset })?;
        let answer = feed.latest_answer();
        if answer <= 0 {
            return Err(NamekitError::InvalidPriceFeed {
                asset,
                reason: format!("non-positive answer {}", answer),
            });
        }
        let unit_price = Decimal::try_from_i128_with_scale(answer, feed.decimals()).map_err(|e| {
            NamekitError::InvalidPriceFeed {
                asset,
                reason: e.to_string(),
            }
        })?;
        let amount = usd
            .as_decimal()
            .checked_div(unit_price)
            .ok_or(NamekitError::Overflow)?;
        // never undercharge by rounding
        Ok(Amount::from_decimal(amount.round_dp_with_strategy(
            self.pricing.asset_decimals,
            RoundingStrategy::AwayFromZero,
        )))
    }
}

fn is_ascii_letter(unit: &str) -> bool {
    let mut chars = unit.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_alphabetic())
}

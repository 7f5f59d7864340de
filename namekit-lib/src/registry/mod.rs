//! Name registry: lease lifecycle, access gates and lookups.
//!
//! Per name id the lifecycle is `Unminted -> Active -> Grace -> Lapsed`,
//! evaluated from the stored expiry at call time. A lapsed record is
//! overwritten by the next mint.
//!
//! Every entrypoint runs all checks first, then moves payment, then
//! mutates state, so a failure at any step leaves the registry untouched.

mod index;
mod lease;

pub use index::ReverseIndex;
pub use lease::{LeaseRecord, LeaseState};

use crate::access::Ownable;
use crate::config::NamekitConfig;
use crate::events::{Event, EventLog};
use crate::ledger::AssetLedger;
use crate::pricing::PriceOracle;
use crate::provider::{AddressKey, AddressesProvider};
use crate::{Address, Amount, CallContext, Name, NameId, NamekitError, Result};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Arguments of a paid mint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MintRequest {
    pub name: Name,
    pub duration_years: u32,
    pub owner: Address,
    pub metadata_uri: String,
    pub whois: Address,
}

impl MintRequest {
    /// Request with empty metadata and `whois` set to the owner.
    pub fn new(name: Name, duration_years: u32, owner: Address) -> Self {
        Self {
            name,
            duration_years,
            owner,
            metadata_uri: String::new(),
            whois: owner,
        }
    }

    pub fn with_metadata_uri(mut self, uri: impl Into<String>) -> Self {
        self.metadata_uri = uri.into();
        self
    }

    pub fn with_whois(mut self, whois: Address) -> Self {
        self.whois = whois;
        self
    }
}

#[derive(Clone, Copy, Debug)]
enum Payment {
    Native,
    Token(Address),
}

impl Payment {
    fn asset(&self) -> Address {
        match self {
            Self::Native => Address::NATIVE,
            Self::Token(asset) => *asset,
        }
    }
}

/// Lease table plus gates and indexes.
pub struct NameRegistry {
    ownable: Ownable,
    address: Address,
    provider: Arc<AddressesProvider>,
    config: NamekitConfig,
    records: HashMap<NameId, LeaseRecord>,
    owner_index: ReverseIndex,
    whois_index: ReverseIndex,
    whitelist: HashSet<Address>,
    paused: bool,
    whitelist_enabled: bool,
    events: EventLog,
}

impl NameRegistry {
    /// Registry deployed at `address`. Starts paused unless configured otherwise.
    pub fn new(
        owner: Address,
        address: Address,
        provider: Arc<AddressesProvider>,
        config: NamekitConfig,
    ) -> Self {
        let paused = config.start_paused;
        Self {
            ownable: Ownable::new(owner),
            address,
            provider,
            config,
            records: HashMap::new(),
            owner_index: ReverseIndex::new(),
            whois_index: ReverseIndex::new(),
            whitelist: HashSet::new(),
            paused,
            whitelist_enabled: false,
            events: EventLog::new(),
        }
    }

    pub fn owner(&self) -> Address {
        self.ownable.owner()
    }

    /// Address the registry spends token allowances as.
    pub fn address(&self) -> Address {
        self.address
    }

    pub fn transfer_ownership(&mut self, ctx: &CallContext, new_owner: Address) -> Result<()> {
        let previous = self.ownable.transfer(ctx.caller, new_owner)?;
        self.events.emit(Event::OwnershipTransferred {
            previous,
            new: new_owner,
        });
        Ok(())
    }

    /// Paid mint in the native asset; `ctx.value` must cover the price.
    pub fn mint_native(
        &mut self,
        ctx: &CallContext,
        request: MintRequest,
        oracle: &PriceOracle,
        ledger: &mut dyn AssetLedger,
    ) -> Result<NameId> {
        self.mint(ctx, request, Payment::Native, oracle, ledger)
    }

    /// Paid mint in a token; the registry pulls exactly the price.
    pub fn mint_erc20(
        &mut self,
        ctx: &CallContext,
        request: MintRequest,
        asset: Address,
        oracle: &PriceOracle,
        ledger: &mut dyn AssetLedger,
    ) -> Result<NameId> {
        let payment = token_payment(asset)?;
        self.mint(ctx, request, payment, oracle, ledger)
    }

    /// Extends a live lease by `years`, counted from the current expiry.
    pub fn renew_native(
        &mut self,
        ctx: &CallContext,
        name: &Name,
        years: u32,
        oracle: &PriceOracle,
        ledger: &mut dyn AssetLedger,
    ) -> Result<i64> {
        self.renew(ctx, name, years, Payment::Native, oracle, ledger)
    }

    pub fn renew_erc20(
        &mut self,
        ctx: &CallContext,
        name: &Name,
        years: u32,
        asset: Address,
        oracle: &PriceOracle,
        ledger: &mut dyn AssetLedger,
    ) -> Result<i64> {
        let payment = token_payment(asset)?;
        self.renew(ctx, name, years, payment, oracle, ledger)
    }

    /// Mints `names` to the auction house as unpaid inventory. Owner only.
    ///
    /// Bypasses pause, whitelist and pricing, but every unit must still be
    /// a letter or known emoji. The whole batch is checked before anything
    /// is written.
    pub fn mint_to_auction_house(
        &mut self,
        ctx: &CallContext,
        names: &[Name],
        oracle: &PriceOracle,
    ) -> Result<Vec<NameId>> {
        self.ownable.ensure_owner(ctx.caller)?;
        let house = self.provider.require(AddressKey::AuctionHouse)?;
        let lease_secs = self
            .config
            .lease_secs(self.config.inventory_lease_years)
            .ok_or(NamekitError::Overflow)?;
        let expiry = ctx.now.checked_add(lease_secs).ok_or(NamekitError::Overflow)?;

        let mut seen = HashSet::new();
        for name in names {
            oracle.validate_and_count_emoji(name)?;
            let id = name.id();
            if !seen.insert(id)
                || self.lease_state(id, ctx.now).blocks_mint()
                || self.held_by_auction_house(id)
            {
                return Err(NamekitError::AlreadyExists { id });
            }
        }

        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            let id = name.id();
            self.write_record(
                id,
                LeaseRecord {
                    name: name.clone(),
                    owner: house,
                    expiry,
                    metadata_uri: String::new(),
                    whois: house,
                },
            );
            self.events.emit(Event::Minted {
                id,
                name: name.to_string(),
                owner: house,
                expiry,
                asset: Address::NATIVE,
                price: Amount::zero(),
            });
            ids.push(id);
        }
        tracing::info!(count = ids.len(), %house, "inventory minted to auction house");
        Ok(ids)
    }

    /// Hands a name from the auction house to `to`. Callable by the
    /// auction house only, on a record it still owns; refreshes the lease
    /// to at least the inventory term from now.
    pub fn transfer_from_auction(&mut self, ctx: &CallContext, id: NameId, to: Address) -> Result<()> {
        let house = self.provider.auction_house();
        if house.is_zero() || ctx.caller != house {
            return Err(NamekitError::AccessDenied { caller: ctx.caller });
        }
        if to.is_zero() {
            return Err(NamekitError::ZeroAddress("recipient"));
        }
        // inventory may have outlived its lease while waiting for a buyer
        let record = self.records.get(&id).ok_or(NamekitError::NoEntity { id })?;
        if record.owner != house {
            return Err(NamekitError::NotOwner {
                id,
                caller: ctx.caller,
            });
        }
        let lease_secs = self
            .config
            .lease_secs(self.config.inventory_lease_years)
            .ok_or(NamekitError::Overflow)?;
        let refreshed = ctx.now.checked_add(lease_secs).ok_or(NamekitError::Overflow)?;
        let expiry = record.expiry.max(refreshed);

        self.move_record(id, to, Some(expiry));
        Ok(())
    }

    /// Owner-initiated transfer of a live lease.
    pub fn transfer(&mut self, ctx: &CallContext, id: NameId, to: Address) -> Result<()> {
        if to.is_zero() {
            return Err(NamekitError::ZeroAddress("recipient"));
        }
        self.owned_record(ctx, id)?;
        self.move_record(id, to, None);
        Ok(())
    }

    pub fn update_whois(&mut self, ctx: &CallContext, id: NameId, whois: Address) -> Result<()> {
        let previous = self.owned_record(ctx, id)?.whois;
        self.whois_index.relocate(id, previous, whois);
        if let Some(record) = self.records.get_mut(&id) {
            record.whois = whois;
        }
        self.events.emit(Event::WhoisUpdated { id, whois });
        Ok(())
    }

    pub fn update_metadata_uri(&mut self, ctx: &CallContext, id: NameId, uri: impl Into<String>) -> Result<()> {
        self.owned_record(ctx, id)?;
        let uri = uri.into();
        if let Some(record) = self.records.get_mut(&id) {
            record.metadata_uri = uri.clone();
        }
        self.events.emit(Event::MetadataUpdated { id, uri });
        Ok(())
    }

    /// Flips the pause flag and returns the new value. Owner only.
    pub fn toggle_pause(&mut self, ctx: &CallContext) -> Result<bool> {
        self.ownable.ensure_owner(ctx.caller)?;
        self.paused = !self.paused;
        tracing::info!(paused = self.paused, "registry pause toggled");
        self.events.emit(Event::PauseToggled {
            paused: self.paused,
        });
        Ok(self.paused)
    }

    /// Flips whitelist mode and returns the new value. Owner only.
    pub fn toggle_whitelist(&mut self, ctx: &CallContext) -> Result<bool> {
        self.ownable.ensure_owner(ctx.caller)?;
        self.whitelist_enabled = !self.whitelist_enabled;
        tracing::info!(enabled = self.whitelist_enabled, "whitelist toggled");
        self.events.emit(Event::WhitelistToggled {
            enabled: self.whitelist_enabled,
        });
        Ok(self.whitelist_enabled)
    }

    pub fn set_whitelisted(&mut self, ctx: &CallContext, accounts: &[Address], allowed: bool) -> Result<()> {
        self.ownable.ensure_owner(ctx.caller)?;
        for account in accounts {
            if allowed {
                self.whitelist.insert(*account);
            } else {
                self.whitelist.remove(account);
            }
            self.events.emit(Event::WhitelistUpdated {
                account: *account,
                allowed,
            });
        }
        Ok(())
    }

    /// Names currently owned by `owner`.
    pub fn reverse_lookup(&self, owner: Address, now: i64) -> Vec<Name> {
        self.indexed_names(&self.owner_index, owner, now)
    }

    /// Names whose whois points at `address`.
    pub fn whois_lookup(&self, address: Address, now: i64) -> Vec<Name> {
        self.indexed_names(&self.whois_index, address, now)
    }

    pub fn lease(&self, id: NameId) -> Option<&LeaseRecord> {
        self.records.get(&id)
    }

    pub fn name_of(&self, id: NameId) -> Option<&Name> {
        self.records.get(&id).map(|record| &record.name)
    }

    /// Owner of a lease that has not lapsed.
    pub fn owner_of(&self, id: NameId, now: i64) -> Option<Address> {
        self.live_record(id, now).ok().map(|record| record.owner)
    }

    pub fn lease_state(&self, id: NameId, now: i64) -> LeaseState {
        self.records
            .get(&id)
            .map(|record| record.state(now, self.config.grace_period_secs))
            .unwrap_or(LeaseState::Unminted)
    }

    /// Metadata URI, empty for unknown ids.
    pub fn metadata_uri(&self, id: NameId) -> &str {
        self.records
            .get(&id)
            .map(|record| record.metadata_uri.as_str())
            .unwrap_or("")
    }

    pub fn is_available(&self, id: NameId, now: i64) -> bool {
        !self.lease_state(id, now).blocks_mint() && !self.held_by_auction_house(id)
    }

    /// True while the auction house still holds the record, whatever its
    /// expiry. Inventory only leaves the house through an auction
    /// settlement, so it is never open to a paid mint.
    pub fn held_by_auction_house(&self, id: NameId) -> bool {
        let house = self.provider.auction_house();
        !house.is_zero() && self.records.get(&id).is_some_and(|record| record.owner == house)
    }

    /// Number of ids ever minted.
    pub fn total_supply(&self) -> usize {
        self.records.len()
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn whitelist_enabled(&self) -> bool {
        self.whitelist_enabled
    }

    pub fn is_whitelisted(&self, account: Address) -> bool {
        self.whitelist.contains(&account)
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take()
    }

    fn mint(
        &mut self,
        ctx: &CallContext,
        request: MintRequest,
        payment: Payment,
        oracle: &PriceOracle,
        ledger: &mut dyn AssetLedger,
    ) -> Result<NameId> {
        self.ensure_not_paused()?;
        if self.whitelist_enabled && !self.whitelist.contains(&ctx.caller) {
            return Err(NamekitError::NotWhitelisted { caller: ctx.caller });
        }
        if request.owner.is_zero() {
            return Err(NamekitError::ZeroAddress("owner"));
        }
        if request.duration_years < 1 {
            return Err(NamekitError::LeaseTooShort {
                years: request.duration_years,
            });
        }
        oracle.validate_and_count_emoji(&request.name)?;
        let id = request.name.id();
        if self.lease_state(id, ctx.now).blocks_mint() || self.held_by_auction_house(id) {
            return Err(NamekitError::AlreadyExists { id });
        }
        let asset = payment.asset();
        let price = oracle.price_for_duration(&request.name, request.duration_years, asset)?;
        let lease_secs = self
            .config
            .lease_secs(request.duration_years)
            .ok_or(NamekitError::Overflow)?;
        let expiry = ctx.now.checked_add(lease_secs).ok_or(NamekitError::Overflow)?;

        self.collect(ctx, payment, price, ledger)?;

        let name = request.name.to_string();
        let owner = request.owner;
        self.write_record(
            id,
            LeaseRecord {
                name: request.name,
                owner,
                expiry,
                metadata_uri: request.metadata_uri,
                whois: request.whois,
            },
        );
        tracing::info!(id = %id.short(), %name, %owner, expiry, %price, "name minted");
        self.events.emit(Event::Minted {
            id,
            name,
            owner,
            expiry,
            asset,
            price,
        });
        Ok(id)
    }

    fn renew(
        &mut self,
        ctx: &CallContext,
        name: &Name,
        years: u32,
        payment: Payment,
        oracle: &PriceOracle,
        ledger: &mut dyn AssetLedger,
    ) -> Result<i64> {
        self.ensure_not_paused()?;
        if years < 1 {
            return Err(NamekitError::LeaseTooShort { years });
        }
        let id = name.id();
        let current = self.live_record(id, ctx.now)?.expiry;
        let asset = payment.asset();
        let price = oracle.price_for_duration(name, years, asset)?;
        let lease_secs = self.config.lease_secs(years).ok_or(NamekitError::Overflow)?;
        let expiry = current.checked_add(lease_secs).ok_or(NamekitError::Overflow)?;

        self.collect(ctx, payment, price, ledger)?;

        if let Some(record) = self.records.get_mut(&id) {
            record.expiry = expiry;
        }
        tracing::info!(id = %id.short(), expiry, %price, "lease renewed");
        self.events.emit(Event::Renewed {
            id,
            expiry,
            asset,
            price,
        });
        Ok(expiry)
    }

    fn collect(
        &self,
        ctx: &CallContext,
        payment: Payment,
        price: Amount,
        ledger: &mut dyn AssetLedger,
    ) -> Result<()> {
        let funds = self.provider.require(AddressKey::FundsManager)?;
        match payment {
            Payment::Native => {
                if !price.is_within_limit(&ctx.value) {
                    return Err(NamekitError::PaymentInsufficient {
                        required: price,
                        provided: ctx.value,
                    });
                }
                ledger.transfer(Address::NATIVE, ctx.caller, funds, price)
            }
            Payment::Token(asset) => ledger.transfer_from(asset, self.address, ctx.caller, funds, price),
        }
    }

    fn ensure_not_paused(&self) -> Result<()> {
        if self.paused {
            return Err(NamekitError::Paused);
        }
        Ok(())
    }

    /// Record that is Active or in Grace, else `NoEntity`.
    fn live_record(&self, id: NameId, now: i64) -> Result<&LeaseRecord> {
        self.records
            .get(&id)
            .filter(|record| record.state(now, self.config.grace_period_secs).renewable())
            .ok_or(NamekitError::NoEntity { id })
    }

    fn owned_record(&self, ctx: &CallContext, id: NameId) -> Result<&LeaseRecord> {
        let record = self.live_record(id, ctx.now)?;
        if record.owner != ctx.caller {
            return Err(NamekitError::NotOwner {
                id,
                caller: ctx.caller,
            });
        }
        Ok(record)
    }

    /// Insert or overwrite a record, dropping index entries of the old one.
    fn write_record(&mut self, id: NameId, record: LeaseRecord) {
        if let Some(old) = self.records.get(&id) {
            let (old_owner, old_whois) = (old.owner, old.whois);
            self.owner_index.remove(old_owner, id);
            self.whois_index.remove(old_whois, id);
        }
        self.owner_index.insert(record.owner, id);
        self.whois_index.insert(record.whois, id);
        self.records.insert(id, record);
    }

    /// Move owner and whois to `to`, optionally resetting the expiry.
    fn move_record(&mut self, id: NameId, to: Address, expiry: Option<i64>) {
        let Some(record) = self.records.get_mut(&id) else {
            return;
        };
        let from = record.owner;
        let old_whois = record.whois;
        record.owner = to;
        record.whois = to;
        if let Some(expiry) = expiry {
            record.expiry = expiry;
        }
        self.owner_index.relocate(id, from, to);
        self.whois_index.relocate(id, old_whois, to);
        tracing::debug!(id = %id.short(), %from, %to, "lease transferred");
        self.events.emit(Event::Transferred { id, from, to });
    }

    fn indexed_names(&self, index: &ReverseIndex, holder: Address, now: i64) -> Vec<Name> {
        index
            .ids(holder)
            .filter_map(|id| self.live_record(id, now).ok())
            .map(|record| record.name.clone())
            .collect()
    }
}

fn token_payment(asset: Address) -> Result<Payment> {
    if asset.is_zero() {
        return Err(NamekitError::invalid_input(
            "token payment requires a token address",
        ));
    }
    Ok(Payment::Token(asset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::InMemoryLedger;
    use crate::pricing::FixedPriceFeed;

    const YEAR: i64 = 31_536_000;

    struct Fixture {
        owner: Address,
        alice: Address,
        funds: Address,
        oracle: PriceOracle,
        registry: NameRegistry,
        ledger: InMemoryLedger,
    }

    fn fixture() -> Fixture {
        let owner = Address::from_label("owner");
        let alice = Address::from_label("alice");
        let funds = Address::from_label("funds");
        let config = NamekitConfig::default().with_start_paused(false);
        let ctx = CallContext::new(owner, 0);

        let provider = Arc::new(AddressesProvider::new(owner));
        provider.set(&ctx, AddressKey::FundsManager, funds).unwrap();
        provider
            .set(&ctx, AddressKey::AuctionHouse, Address::from_label("house"))
            .unwrap();

        let mut oracle = PriceOracle::new(owner, &config);
        oracle
            .set_asset_oracle(&ctx, Address::NATIVE, Arc::new(FixedPriceFeed::one_usd()))
            .unwrap();
        let registry = NameRegistry::new(owner, Address::from_label("registry"), provider, config);

        let mut ledger = InMemoryLedger::new();
        ledger
            .mint(Address::NATIVE, alice, Amount::from_units(10_000))
            .unwrap();

        Fixture {
            owner,
            alice,
            funds,
            oracle,
            registry,
            ledger,
        }
    }

    fn ooga() -> Name {
        Name::from_units(["o", "o", "g", "a"]).unwrap()
    }

    #[test]
    fn test_mint_records_lease() {
        let mut f = fixture();
        let ctx = CallContext::new(f.alice, 1_000).with_value(Amount::from_units(80));
        let request = MintRequest::new(ooga(), 1, f.alice).with_metadata_uri("https://example.com");
        let id = f
            .registry
            .mint_native(&ctx, request, &f.oracle, &mut f.ledger)
            .unwrap();

        let lease = f.registry.lease(id).unwrap();
        assert_eq!(lease.owner, f.alice);
        assert_eq!(lease.expiry, 1_000 + YEAR);
        assert_eq!(f.registry.metadata_uri(id), "https://example.com");
        assert_eq!(f.ledger.balance_of(Address::NATIVE, f.funds), Amount::from_units(80));
        assert_eq!(f.registry.total_supply(), 1);
    }

    #[test]
    fn test_underpayment_changes_nothing() {
        let mut f = fixture();
        let ctx = CallContext::new(f.alice, 0).with_value(Amount::from_units(79));
        let err = f
            .registry
            .mint_native(&ctx, MintRequest::new(ooga(), 1, f.alice), &f.oracle, &mut f.ledger)
            .unwrap_err();
        assert!(matches!(err, NamekitError::PaymentInsufficient { .. }));
        assert_eq!(f.registry.total_supply(), 0);
        assert!(f.registry.take_events().is_empty());
    }

    #[test]
    fn test_paused_by_default() {
        let owner = Address::from_label("owner");
        let registry = NameRegistry::new(
            owner,
            Address::from_label("registry"),
            Arc::new(AddressesProvider::new(owner)),
            NamekitConfig::default(),
        );
        assert!(registry.paused());
        assert!(!registry.whitelist_enabled());
    }

    #[test]
    fn test_missing_funds_manager() {
        let mut f = fixture();
        let provider = Arc::new(AddressesProvider::new(f.owner));
        f.registry = NameRegistry::new(
            f.owner,
            Address::from_label("registry"),
            provider,
            NamekitConfig::default().with_start_paused(false),
        );
        let ctx = CallContext::new(f.alice, 0).with_value(Amount::from_units(80));
        assert_eq!(
            f.registry
                .mint_native(&ctx, MintRequest::new(ooga(), 1, f.alice), &f.oracle, &mut f.ledger),
            Err(NamekitError::ZeroAddress("funds manager"))
        );
    }

    #[test]
    fn test_whois_and_metadata_require_owner() {
        let mut f = fixture();
        let ctx = CallContext::new(f.alice, 0).with_value(Amount::from_units(80));
        let id = f
            .registry
            .mint_native(&ctx, MintRequest::new(ooga(), 1, f.alice), &f.oracle, &mut f.ledger)
            .unwrap();

        let stranger = CallContext::new(Address::from_label("stranger"), 10);
        assert!(matches!(
            f.registry.update_whois(&stranger, id, stranger.caller),
            Err(NamekitError::NotOwner { .. })
        ));
        assert!(matches!(
            f.registry.update_metadata_uri(&stranger, id, "x"),
            Err(NamekitError::NotOwner { .. })
        ));

        let target = Address::from_label("wallet");
        f.registry
            .update_whois(&CallContext::new(f.alice, 10), id, target)
            .unwrap();
        assert_eq!(f.registry.whois_lookup(target, 10), vec![ooga()]);
        assert!(f.registry.whois_lookup(f.alice, 10).is_empty());
        // ownership is unaffected by whois
        assert_eq!(f.registry.reverse_lookup(f.alice, 10), vec![ooga()]);
    }

    #[test]
    fn test_token_payment_rejects_native_address() {
        let mut f = fixture();
        let ctx = CallContext::new(f.alice, 0);
        assert!(matches!(
            f.registry.mint_erc20(
                &ctx,
                MintRequest::new(ooga(), 1, f.alice),
                Address::NATIVE,
                &f.oracle,
                &mut f.ledger
            ),
            Err(NamekitError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_only_auction_house_moves_inventory() {
        let mut f = fixture();
        let ids = f
            .registry
            .mint_to_auction_house(&CallContext::new(f.owner, 0), &[ooga()], &f.oracle)
            .unwrap();
        let id = ids[0];

        let err = f
            .registry
            .transfer_from_auction(&CallContext::new(f.owner, 5), id, f.alice)
            .unwrap_err();
        assert_eq!(err, NamekitError::AccessDenied { caller: f.owner });

        let house = Address::from_label("house");
        f.registry
            .transfer_from_auction(&CallContext::new(house, YEAR), id, f.alice)
            .unwrap();
        let lease = f.registry.lease(id).unwrap();
        assert_eq!(lease.owner, f.alice);
        assert_eq!(lease.expiry, 2 * YEAR);
    }

    #[test]
    fn test_lapsed_inventory_stays_with_house() {
        let mut f = fixture();
        let ids = f
            .registry
            .mint_to_auction_house(&CallContext::new(f.owner, 0), &[ooga()], &f.oracle)
            .unwrap();
        let id = ids[0];
        let lapsed = 2 * YEAR;
        assert_eq!(f.registry.lease_state(id, lapsed), LeaseState::Lapsed);
        assert!(f.registry.held_by_auction_house(id));
        assert!(!f.registry.is_available(id, lapsed));

        let ctx = CallContext::new(f.alice, lapsed).with_value(Amount::from_units(80));
        let err = f
            .registry
            .mint_native(&ctx, MintRequest::new(ooga(), 1, f.alice), &f.oracle, &mut f.ledger)
            .unwrap_err();
        assert_eq!(err, NamekitError::AlreadyExists { id });
        assert!(f.ledger.balance_of(Address::NATIVE, f.funds).is_zero());

        // once sold the name follows the normal lease rules again
        let house = Address::from_label("house");
        f.registry
            .transfer_from_auction(&CallContext::new(house, lapsed), id, f.owner)
            .unwrap();
        assert!(!f.registry.held_by_auction_house(id));
        assert!(f.registry.is_available(id, lapsed + 2 * YEAR));
    }
}

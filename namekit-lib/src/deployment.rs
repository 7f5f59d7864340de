//! A wired-up set of components sharing one ledger and clock.
//!
//! [`Deployment`] plays the host: it stamps every call with the clock
//! reading, routes the shared ledger to the component being called, and
//! collects emitted events in call order.

use crate::auction::AuctionHouse;
use crate::clock::Clock;
use crate::config::NamekitConfig;
use crate::events::Event;
use crate::ledger::{AssetLedger, InMemoryLedger};
use crate::pricing::{PriceFeed, PriceOracle, PriceQuote};
use crate::provider::{AddressKey, AddressesProvider};
use crate::registry::{MintRequest, NameRegistry};
use crate::{Address, Amount, CallContext, Name, NameId, NamekitError, Result};
use std::sync::Arc;

/// Labels the component addresses are derived from.
pub const REGISTRY_LABEL: &str = "namekit.registry";
pub const PRICE_ORACLE_LABEL: &str = "namekit.price-oracle";
pub const AUCTION_HOUSE_LABEL: &str = "namekit.auction-house";
pub const FUNDS_MANAGER_LABEL: &str = "namekit.funds-manager";

pub struct Deployment {
    owner: Address,
    clock: Arc<dyn Clock>,
    ledger: InMemoryLedger,
    provider: Arc<AddressesProvider>,
    oracle: PriceOracle,
    oracle_address: Address,
    registry: NameRegistry,
    auction_house: AuctionHouse,
    journal: Vec<Event>,
}

impl Deployment {
    /// Deploys every component owned by `owner` and points the provider at
    /// them. No price feed is registered yet.
    pub fn new(owner: Address, config: NamekitConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        config.validate()?;
        let registry_address = Address::from_label(REGISTRY_LABEL);
        let oracle_address = Address::from_label(PRICE_ORACLE_LABEL);
        let house_address = Address::from_label(AUCTION_HOUSE_LABEL);
        let funds_address = Address::from_label(FUNDS_MANAGER_LABEL);

        let provider = Arc::new(AddressesProvider::new(owner));
        let ctx = CallContext::new(owner, clock.now());
        provider.set(&ctx, AddressKey::Registry, registry_address)?;
        provider.set(&ctx, AddressKey::PriceOracle, oracle_address)?;
        provider.set(&ctx, AddressKey::AuctionHouse, house_address)?;
        provider.set(&ctx, AddressKey::FundsManager, funds_address)?;

        let oracle = PriceOracle::new(owner, &config);
        let auction_house = AuctionHouse::new(owner, house_address, Arc::clone(&provider), &config);
        let registry = NameRegistry::new(owner, registry_address, Arc::clone(&provider), config);

        tracing::info!(%owner, registry = %registry_address, house = %house_address, "deployment ready");
        let mut deployment = Self {
            owner,
            clock,
            ledger: InMemoryLedger::new(),
            provider,
            oracle,
            oracle_address,
            registry,
            auction_house,
            journal: Vec::new(),
        };
        deployment.drain();
        Ok(deployment)
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn now(&self) -> i64 {
        self.clock.now()
    }

    pub fn ctx(&self, caller: Address) -> CallContext {
        CallContext::new(caller, self.clock.now())
    }

    pub fn funds_manager(&self) -> Address {
        self.provider.funds_manager()
    }

    pub fn provider(&self) -> &AddressesProvider {
        &self.provider
    }

    pub fn oracle(&self) -> &PriceOracle {
        &self.oracle
    }

    pub fn registry(&self) -> &NameRegistry {
        &self.registry
    }

    pub fn auction_house(&self) -> &AuctionHouse {
        &self.auction_house
    }

    pub fn ledger(&self) -> &InMemoryLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut InMemoryLedger {
        &mut self.ledger
    }

    pub fn balance(&self, asset: Address, holder: Address) -> Amount {
        self.ledger.balance_of(asset, holder)
    }

    /// Native balance.
    pub fn native_balance(&self, holder: Address) -> Amount {
        self.ledger.balance_of(Address::NATIVE, holder)
    }

    /// Lets `holder` spend `amount` of `asset` through the registry.
    pub fn approve_registry(&mut self, holder: Address, asset: Address, amount: Amount) {
        let spender = self.registry.address();
        self.ledger.approve(asset, holder, spender, amount);
    }

    pub fn set_asset_oracle(&mut self, caller: Address, asset: Address, feed: Arc<dyn PriceFeed>) -> Result<()> {
        let ctx = self.ctx(caller);
        let result = self.oracle.set_asset_oracle(&ctx, asset, feed);
        self.finish(result)
    }

    pub fn register_emojis(&mut self, caller: Address, batch: &[&str]) -> Result<usize> {
        let ctx = self.ctx(caller);
        let result = self.oracle.register_emojis(&ctx, batch.iter().copied());
        self.finish(result)
    }

    pub fn quote(&self, name: &Name, years: u32, asset: Address) -> Result<PriceQuote> {
        self.oracle.quote(name, years, asset)
    }

    pub fn mint_native(&mut self, caller: Address, value: Amount, request: MintRequest) -> Result<NameId> {
        let ctx = self.ctx(caller).with_value(value);
        let result = self.ensure_wired().and_then(|()| {
            self.registry.mint_native(&ctx, request, &self.oracle, &mut self.ledger)
        });
        self.finish(result)
    }

    pub fn mint_erc20(&mut self, caller: Address, request: MintRequest, asset: Address) -> Result<NameId> {
        let ctx = self.ctx(caller);
        let result = self.ensure_wired().and_then(|()| {
            self.registry.mint_erc20(&ctx, request, asset, &self.oracle, &mut self.ledger)
        });
        self.finish(result)
    }

    pub fn renew_native(&mut self, caller: Address, value: Amount, name: &Name, years: u32) -> Result<i64> {
        let ctx = self.ctx(caller).with_value(value);
        let result = self.ensure_wired().and_then(|()| {
            self.registry.renew_native(&ctx, name, years, &self.oracle, &mut self.ledger)
        });
        self.finish(result)
    }

    pub fn renew_erc20(&mut self, caller: Address, name: &Name, years: u32, asset: Address) -> Result<i64> {
        let ctx = self.ctx(caller);
        let result = self.ensure_wired().and_then(|()| {
            self.registry.renew_erc20(&ctx, name, years, asset, &self.oracle, &mut self.ledger)
        });
        self.finish(result)
    }

    pub fn mint_to_auction_house(&mut self, caller: Address, names: &[Name]) -> Result<Vec<NameId>> {
        let ctx = self.ctx(caller);
        let result = self
            .ensure_wired()
            .and_then(|()| self.registry.mint_to_auction_house(&ctx, names, &self.oracle));
        self.finish(result)
    }

    pub fn transfer(&mut self, caller: Address, id: NameId, to: Address) -> Result<()> {
        let ctx = self.ctx(caller);
        let result = self.registry.transfer(&ctx, id, to);
        self.finish(result)
    }

    pub fn update_whois(&mut self, caller: Address, id: NameId, whois: Address) -> Result<()> {
        let ctx = self.ctx(caller);
        let result = self.registry.update_whois(&ctx, id, whois);
        self.finish(result)
    }

    pub fn update_metadata_uri(&mut self, caller: Address, id: NameId, uri: &str) -> Result<()> {
        let ctx = self.ctx(caller);
        let result = self.registry.update_metadata_uri(&ctx, id, uri);
        self.finish(result)
    }

    pub fn toggle_pause(&mut self, caller: Address) -> Result<bool> {
        let ctx = self.ctx(caller);
        let result = self.registry.toggle_pause(&ctx);
        self.finish(result)
    }

    pub fn toggle_whitelist(&mut self, caller: Address) -> Result<bool> {
        let ctx = self.ctx(caller);
        let result = self.registry.toggle_whitelist(&ctx);
        self.finish(result)
    }

    pub fn set_whitelisted(&mut self, caller: Address, accounts: &[Address], allowed: bool) -> Result<()> {
        let ctx = self.ctx(caller);
        let result = self.registry.set_whitelisted(&ctx, accounts, allowed);
        self.finish(result)
    }

    pub fn create_auction(
        &mut self,
        caller: Address,
        id: NameId,
        start: i64,
        end: i64,
        start_price: Amount,
    ) -> Result<()> {
        let ctx = self.ctx(caller);
        let result = self.ensure_wired().and_then(|()| {
            self.auction_house.create_auction(&ctx, id, start, end, start_price, &self.registry)
        });
        self.finish(result)
    }

    pub fn place_bid(&mut self, caller: Address, id: NameId, value: Amount) -> Result<()> {
        let ctx = self.ctx(caller).with_value(value);
        let result = self.auction_house.place_bid(&ctx, id, &mut self.ledger);
        self.finish(result)
    }

    pub fn claim(&mut self, caller: Address, id: NameId) -> Result<()> {
        let ctx = self.ctx(caller);
        let result = self.ensure_wired().and_then(|()| {
            self.auction_house.claim(&ctx, id, &mut self.registry, &mut self.ledger)
        });
        self.finish(result)
    }

    pub fn transfer_unclaimed(&mut self, caller: Address, id: NameId) -> Result<()> {
        let ctx = self.ctx(caller);
        let result = self.ensure_wired().and_then(|()| {
            self.auction_house.transfer_unclaimed(&ctx, id, &mut self.registry)
        });
        self.finish(result)
    }

    pub fn withdraw_refund(&mut self, caller: Address) -> Result<Amount> {
        let ctx = self.ctx(caller);
        let result = self.auction_house.withdraw_refund(&ctx, &mut self.ledger);
        self.finish(result)
    }

    pub fn set_address(&mut self, caller: Address, key: AddressKey, address: Address) -> Result<()> {
        let ctx = self.ctx(caller);
        let result = self.provider.set(&ctx, key, address);
        self.finish(result)
    }

    /// Events emitted since the last call, in call order.
    pub fn take_events(&mut self) -> Vec<Event> {
        self.drain();
        std::mem::take(&mut self.journal)
    }

    /// Fails with `Config` when the provider no longer names the registry
    /// and oracle this deployment routes calls to.
    fn ensure_wired(&self) -> Result<()> {
        for (key, expected) in [
            (AddressKey::Registry, self.registry.address()),
            (AddressKey::PriceOracle, self.oracle_address),
        ] {
            let current = self.provider.require(key)?;
            if current != expected {
                return Err(NamekitError::Config(format!(
                    "{} points at {}, not the deployed component",
                    key, current
                )));
            }
        }
        Ok(())
    }

    fn finish<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            tracing::debug!(code = err.code() as i32, error = %err, "call rejected");
        }
        self.drain();
        result
    }

    fn drain(&mut self) {
        self.journal.extend(self.provider.take_events());
        self.journal.extend(self.oracle.take_events());
        self.journal.extend(self.registry.take_events());
        self.journal.extend(self.auction_house.take_events());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    #[test]
    fn test_provider_points_at_components() {
        let owner = Address::from_label("owner");
        let clock = Arc::new(ManualClock::new(0));
        let mut deployment = Deployment::new(owner, NamekitConfig::default(), clock).unwrap();

        assert_eq!(deployment.provider().registry(), deployment.registry().address());
        assert_eq!(
            deployment.provider().auction_house(),
            deployment.auction_house().address()
        );
        assert_eq!(
            deployment.funds_manager(),
            Address::from_label(FUNDS_MANAGER_LABEL)
        );
        assert!(deployment.registry().paused());

        let events = deployment.take_events();
        assert_eq!(events.len(), 4);
        assert!(events.iter().all(|e| e.kind() == "AddressUpdated"));
        assert!(deployment.take_events().is_empty());
    }

    #[test]
    fn test_repointed_oracle_blocks_paid_calls() {
        let owner = Address::from_label("owner");
        let alice = Address::from_label("alice");
        let clock = Arc::new(ManualClock::new(0));
        let config = NamekitConfig::default().with_start_paused(false);
        let mut deployment = Deployment::new(owner, config, clock).unwrap();
        deployment
            .set_asset_oracle(owner, Address::NATIVE, Arc::new(crate::pricing::FixedPriceFeed::one_usd()))
            .unwrap();
        deployment
            .ledger_mut()
            .mint(Address::NATIVE, alice, Amount::from_units(1_000))
            .unwrap();

        let name = Name::from_units(["o", "o", "g", "a"]).unwrap();
        let price = deployment.quote(&name, 1, Address::NATIVE).unwrap().asset_amount;
        deployment
            .set_address(owner, AddressKey::PriceOracle, Address::from_label("elsewhere"))
            .unwrap();

        let result = deployment.mint_native(alice, price, MintRequest::new(name.clone(), 1, alice));
        assert!(matches!(result, Err(NamekitError::Config(_))));
        assert_eq!(deployment.native_balance(alice), Amount::from_units(1_000));
        assert_eq!(deployment.registry().total_supply(), 0);

        deployment
            .set_address(owner, AddressKey::PriceOracle, Address::from_label(PRICE_ORACLE_LABEL))
            .unwrap();
        deployment
            .mint_native(alice, price, MintRequest::new(name, 1, alice))
            .unwrap();
        assert_eq!(deployment.registry().total_supply(), 1);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = NamekitConfig::default().with_max_lease_years(0);
        let result = Deployment::new(
            Address::from_label("owner"),
            config,
            Arc::new(ManualClock::new(0)),
        );
        assert!(result.is_err());
    }
}

//! Common test utilities for namekit-lib integration tests

#![allow(dead_code)]

use namekit_lib::prelude::*;
use std::sync::Arc;

pub const DAY: i64 = 24 * 60 * 60;
pub const YEAR: i64 = 365 * DAY;
pub const GRACE: i64 = 30 * DAY;
pub const GENESIS: i64 = 1_700_000_000;

/// Deployment with funded accounts and a $1 native feed
#[allow(dead_code)]
pub struct TestContext {
    pub clock: Arc<ManualClock>,
    pub deployment: Deployment,
    pub owner: Address,
    pub alice: Address,
    pub bob: Address,
    pub token: Address,
}

#[allow(dead_code)]
impl TestContext {
    /// Unpaused deployment; alice and bob hold 10k native and 10k tokens
    pub fn new() -> Self {
        Self::with_config(NamekitConfig::default().with_start_paused(false))
    }

    pub fn with_config(config: NamekitConfig) -> Self {
        let owner = Address::from_label("owner");
        let alice = Address::from_label("alice");
        let bob = Address::from_label("bob");
        let token = Address::from_label("honey-token");
        let clock = Arc::new(ManualClock::new(GENESIS));

        let mut deployment = Deployment::new(owner, config, clock.clone()).unwrap();
        deployment
            .set_asset_oracle(owner, Address::NATIVE, Arc::new(FixedPriceFeed::one_usd()))
            .unwrap();
        deployment
            .set_asset_oracle(owner, token, Arc::new(FixedPriceFeed::one_usd()))
            .unwrap();
        for account in [alice, bob] {
            let ledger = deployment.ledger_mut();
            ledger
                .mint(Address::NATIVE, account, Amount::from_units(10_000))
                .unwrap();
            ledger.mint(token, account, Amount::from_units(10_000)).unwrap();
        }
        deployment.take_events();

        Self {
            clock,
            deployment,
            owner,
            alice,
            bob,
            token,
        }
    }

    pub fn now(&self) -> i64 {
        self.deployment.now()
    }

    /// Move the clock to `GENESIS + offset`
    pub fn warp_to(&self, offset: i64) {
        self.clock.set(GENESIS + offset);
    }

    pub fn advance(&self, secs: i64) -> i64 {
        self.clock.advance(secs)
    }

    /// Mint `units` for `who`, paying the quoted native price
    pub fn mint(&mut self, who: Address, units: &[&str], years: u32) -> Result<NameId> {
        let name = name(units);
        let price = self.deployment.quote(&name, years, Address::NATIVE)?.asset_amount;
        self.deployment
            .mint_native(who, price, MintRequest::new(name, years, who))
    }

    /// Seed the auction house with `names` and open an auction on the first
    pub fn open_auction(&mut self, names: &[Name], start_price: Amount) -> NameId {
        let ids = self
            .deployment
            .mint_to_auction_house(self.owner, names)
            .unwrap();
        let now = self.now();
        self.deployment
            .create_auction(self.owner, ids[0], now, now + 2 * DAY, start_price)
            .unwrap();
        ids[0]
    }
}

pub fn name(units: &[&str]) -> Name {
    Name::from_units(units.iter().copied()).unwrap()
}

pub fn ooga() -> Name {
    name(&["o", "o", "g", "a"])
}

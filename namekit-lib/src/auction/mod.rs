//! English auction over registry inventory.
//!
//! Per name id: `NoAuction -> Open -> {Claimed | Reclaimed}`. Bids are
//! escrowed by the house; an outbid bidder is refunded in the same call,
//! and a refund the recipient refuses is parked in [`RefundEscrow`] for a
//! later [`AuctionHouse::withdraw_refund`]. State is always updated before
//! value leaves the house.

mod escrow;

pub use escrow::RefundEscrow;

use crate::access::Ownable;
use crate::config::NamekitConfig;
use crate::events::{Event, EventLog};
use crate::ledger::AssetLedger;
use crate::provider::{AddressKey, AddressesProvider};
use crate::registry::NameRegistry;
use crate::{Address, Amount, CallContext, NameId, NamekitError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Current best offer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    pub bidder: Address,
    pub amount: Amount,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuctionStatus {
    Open,
    /// Highest bidder took the name.
    Claimed,
    /// Owner took back an unsold name.
    Reclaimed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Auction {
    pub start: i64,
    pub end: i64,
    pub start_price: Amount,
    pub highest_bid: Bid,
    pub status: AuctionStatus,
}

impl Auction {
    pub fn is_settled(&self) -> bool {
        self.status != AuctionStatus::Open
    }

    pub fn has_bids(&self) -> bool {
        !self.highest_bid.bidder.is_zero()
    }

    /// Window closed and nobody bid.
    pub fn expired_unsold(&self, now: i64) -> bool {
        now >= self.end && !self.has_bids()
    }

    /// Smallest amount a new bid must exceed.
    pub fn floor(&self) -> Amount {
        self.start_price.max(self.highest_bid.amount)
    }
}

/// Holds inventory names and runs one auction per name.
pub struct AuctionHouse {
    ownable: Ownable,
    address: Address,
    provider: Arc<AddressesProvider>,
    min_window_secs: i64,
    auctions: HashMap<NameId, Auction>,
    escrow: RefundEscrow,
    events: EventLog,
}

impl AuctionHouse {
    pub fn new(
        owner: Address,
        address: Address,
        provider: Arc<AddressesProvider>,
        config: &NamekitConfig,
    ) -> Self {
        Self {
            ownable: Ownable::new(owner),
            address,
            provider,
            min_window_secs: config.min_auction_window_secs,
            auctions: HashMap::new(),
            escrow: RefundEscrow::new(),
            events: EventLog::new(),
        }
    }

    pub fn owner(&self) -> Address {
        self.ownable.owner()
    }

    /// Address holding inventory and escrowed bids.
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

    /// Opens an auction for a name the house holds. Owner only.
    ///
    /// An auction that ended without a single bid is replaced; any other
    /// unsettled auction for `id` fails with `AlreadyExists`.
    pub fn create_auction(
        &mut self,
        ctx: &CallContext,
        id: NameId,
        start: i64,
        end: i64,
        start_price: Amount,
        registry: &NameRegistry,
    ) -> Result<()> {
        self.ownable.ensure_owner(ctx.caller)?;
        if end <= ctx.now {
            return Err(NamekitError::invalid_input("end must be later than now"));
        }
        if end.saturating_sub(start) < self.min_window_secs {
            return Err(NamekitError::invalid_input(format!(
                "end - start < {}",
                describe_window(self.min_window_secs)
            )));
        }
        if start_price.is_negative() {
            return Err(NamekitError::invalid_input("start price must not be negative"));
        }
        if self
            .auctions
            .get(&id)
            .is_some_and(|a| !a.is_settled() && !a.expired_unsold(ctx.now))
        {
            return Err(NamekitError::AlreadyExists { id });
        }
        // inventory may have lapsed while listed; the record owner still decides
        if registry.lease(id).map(|r| r.owner) != Some(self.address) {
            return Err(NamekitError::NotOwner {
                id,
                caller: self.address,
            });
        }

        self.auctions.insert(
            id,
            Auction {
                start,
                end,
                start_price,
                highest_bid: Bid::default(),
                status: AuctionStatus::Open,
            },
        );
        tracing::info!(id = %id.short(), start, end, %start_price, "auction created");
        self.events.emit(Event::AuctionCreated {
            id,
            start,
            end,
            start_price,
        });
        Ok(())
    }

    /// Bids `ctx.value` in the native asset.
    ///
    /// The previous highest bidder is refunded in full; if that transfer is
    /// refused the amount is deferred to the escrow and the bid still
    /// succeeds.
    pub fn place_bid(&mut self, ctx: &CallContext, id: NameId, ledger: &mut dyn AssetLedger) -> Result<()> {
        let auction = self.open_auction(id)?;
        if ctx.now < auction.start {
            return Err(NamekitError::AuctionNotStarted {
                id,
                start: auction.start,
                now: ctx.now,
            });
        }
        if ctx.now >= auction.end {
            return Err(NamekitError::AuctionFinished {
                id,
                end: auction.end,
                now: ctx.now,
            });
        }
        if ctx.caller.is_zero() {
            return Err(NamekitError::ZeroAddress("bidder"));
        }
        let floor = auction.floor();
        if ctx.value <= floor {
            return Err(NamekitError::invalid_input(format!(
                "bid {} must exceed {}",
                ctx.value, floor
            )));
        }
        let previous = auction.highest_bid;

        ledger.transfer(Address::NATIVE, ctx.caller, self.address, ctx.value)?;

        let bid = Bid {
            bidder: ctx.caller,
            amount: ctx.value,
        };
        if let Some(auction) = self.auctions.get_mut(&id) {
            auction.highest_bid = bid;
        }
        tracing::info!(id = %id.short(), bidder = %bid.bidder, amount = %bid.amount, "bid placed");
        self.events.emit(Event::BidPlaced {
            id,
            bidder: bid.bidder,
            amount: bid.amount,
        });

        if !previous.bidder.is_zero() {
            self.pay_out(previous.bidder, previous.amount, ledger)?;
        }
        Ok(())
    }

    /// Settles an ended auction in favour of its highest bidder.
    pub fn claim(
        &mut self,
        ctx: &CallContext,
        id: NameId,
        registry: &mut NameRegistry,
        ledger: &mut dyn AssetLedger,
    ) -> Result<()> {
        let auction = self.open_auction(id)?;
        if ctx.now < auction.end {
            return Err(NamekitError::AuctionNotFinished {
                id,
                end: auction.end,
                now: ctx.now,
            });
        }
        let winning = auction.highest_bid;
        if ctx.caller != winning.bidder {
            return Err(NamekitError::invalid_input("you're not a highest bidder"));
        }
        if winning.bidder.is_zero() {
            return Err(NamekitError::ZeroAddress("highest bidder"));
        }
        let funds = self.provider.require(AddressKey::FundsManager)?;

        registry.transfer_from_auction(&self.as_caller(ctx.now), id, winning.bidder)?;

        self.settle(id, AuctionStatus::Claimed);
        tracing::info!(id = %id.short(), winner = %winning.bidder, amount = %winning.amount, "auction claimed");
        self.events.emit(Event::Claimed {
            id,
            winner: winning.bidder,
            amount: winning.amount,
        });

        self.pay_out(funds, winning.amount, ledger)
    }

    /// Returns an unsold name to the house owner while its window is open.
    ///
    /// Once the window has closed without bids this path fails with
    /// `AuctionFinished`; the name stays with the house until
    /// [`AuctionHouse::create_auction`] lists it again.
    pub fn transfer_unclaimed(
        &mut self,
        ctx: &CallContext,
        id: NameId,
        registry: &mut NameRegistry,
    ) -> Result<()> {
        self.ownable.ensure_owner(ctx.caller)?;
        let auction = self.open_auction(id)?;
        if ctx.now < auction.start {
            return Err(NamekitError::AuctionNotStarted {
                id,
                start: auction.start,
                now: ctx.now,
            });
        }
        if ctx.now >= auction.end {
            return Err(NamekitError::AuctionFinished {
                id,
                end: auction.end,
                now: ctx.now,
            });
        }
        // a bid exists, so only claim may settle it
        if auction.has_bids() {
            return Err(NamekitError::ZeroAddress("highest bidder"));
        }
        let owner = self.owner();

        registry.transfer_from_auction(&self.as_caller(ctx.now), id, owner)?;

        self.settle(id, AuctionStatus::Reclaimed);
        tracing::info!(id = %id.short(), %owner, "unclaimed name reclaimed");
        self.events.emit(Event::Reclaimed { id, owner });
        Ok(())
    }

    /// Pays out everything deferred for the caller.
    pub fn withdraw_refund(&mut self, ctx: &CallContext, ledger: &mut dyn AssetLedger) -> Result<Amount> {
        let amount = self.escrow.take(ctx.caller)?;
        if let Err(err) = ledger.transfer(Address::NATIVE, self.address, ctx.caller, amount) {
            self.escrow.credit(ctx.caller, amount)?;
            return Err(err);
        }
        self.events.emit(Event::RefundWithdrawn {
            account: ctx.caller,
            amount,
        });
        Ok(amount)
    }

    pub fn pending_refund(&self, account: Address) -> Amount {
        self.escrow.pending(account)
    }

    pub fn auction(&self, id: NameId) -> Option<&Auction> {
        self.auctions.get(&id)
    }

    pub fn auctions(&self) -> impl Iterator<Item = (&NameId, &Auction)> {
        self.auctions.iter()
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take()
    }

    fn open_auction(&self, id: NameId) -> Result<&Auction> {
        let auction = self
            .auctions
            .get(&id)
            .ok_or(NamekitError::AuctionNotFound { id })?;
        if auction.is_settled() {
            return Err(NamekitError::AuctionSettled { id });
        }
        Ok(auction)
    }

    fn settle(&mut self, id: NameId, status: AuctionStatus) {
        if let Some(auction) = self.auctions.get_mut(&id) {
            auction.status = status;
        }
    }

    fn as_caller(&self, now: i64) -> CallContext {
        CallContext::new(self.address, now)
    }

    /// Push `amount` to `to`, deferring to the escrow if refused.
    fn pay_out(&mut self, to: Address, amount: Amount, ledger: &mut dyn AssetLedger) -> Result<()> {
        match ledger.transfer(Address::NATIVE, self.address, to, amount) {
            Ok(()) => Ok(()),
            Err(err) => {
                tracing::warn!(account = %to, %amount, error = %err, "push payment failed, deferring");
                self.escrow.credit(to, amount)?;
                self.events.emit(Event::RefundDeferred { account: to, amount });
                Ok(())
            }
        }
    }
}

fn describe_window(secs: i64) -> String {
    if secs % 3600 == 0 {
        format!("{} hours", secs / 3600)
    } else {
        format!("{} seconds", secs)
    }
}

//! Simulate command - run a scripted registry and auction lifecycle
//!
//! Everything happens against an in-memory ledger and a manual clock, so
//! the run is reproducible: deploy, open the registry, mint, auction two
//! inventory names, settle both ways and let a lease lapse into a re-mint.

use anyhow::{Context, Result};
use namekit_lib::clock::{Clock, ManualClock};
use namekit_lib::prelude::*;
use serde::Serialize;
use std::sync::Arc;

use crate::ui;

const DAY: i64 = 24 * 60 * 60;

/// Outcome of a simulation run
#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub started_at: i64,
    pub finished_at: i64,
    /// Ownership right after both auctions settled
    pub settled: Vec<OwnerLine>,
    /// Ownership once the first lease lapsed and was re-minted
    pub owners: Vec<OwnerLine>,
    pub balances: Vec<BalanceLine>,
    pub events: Vec<Event>,
}

#[derive(Debug, Serialize)]
pub struct OwnerLine {
    pub name: String,
    pub owner: Option<String>,
    pub state: LeaseState,
}

#[derive(Debug, Serialize)]
pub struct BalanceLine {
    pub account: String,
    pub native: Amount,
}

pub fn run(config: NamekitConfig, start: i64, usd_per_unit: &str, as_json: bool) -> Result<()> {
    let report = run_scenario(config, start, usd_per_unit)?;

    if as_json {
        ui::json(&serde_json::to_value(&report)?);
        return Ok(());
    }

    ui::header("Events");
    for event in &report.events {
        ui::event(event);
    }
    ui::separator();

    ui::header("After settlement");
    print_owners(&report.settled);
    ui::header("Final owners");
    print_owners(&report.owners);

    ui::header("Balances");
    for line in &report.balances {
        ui::key_value(&line.account, &line.native.to_string());
    }
    ui::success(&format!(
        "Simulated {} days",
        (report.finished_at - report.started_at) / DAY
    ));
    Ok(())
}

fn print_owners(lines: &[OwnerLine]) {
    for line in lines {
        let owner = line.owner.as_deref().unwrap_or("-");
        ui::key_value(&line.name, &format!("{} ({:?})", owner, line.state));
    }
}

fn snapshot(deployment: &Deployment, names: &[&Name], now: i64) -> Vec<OwnerLine> {
    let registry = deployment.registry();
    names
        .iter()
        .map(|name| OwnerLine {
            name: name.to_string(),
            owner: registry.owner_of(name.id(), now).map(|a| a.to_string()),
            state: registry.lease_state(name.id(), now),
        })
        .collect()
}

/// Run the scripted lifecycle and collect what happened.
pub fn run_scenario(config: NamekitConfig, start: i64, usd_per_unit: &str) -> Result<SimulationReport> {
    let clock = Arc::new(ManualClock::new(start));
    let owner = Address::from_label("owner");
    let alice = Address::from_label("alice");
    let bob = Address::from_label("bob");
    let grace = config.grace_period_secs;
    let year = config.seconds_per_year;

    let mut deployment = Deployment::new(owner, config, clock.clone())?;
    let feed = super::parse_feed(usd_per_unit)?;
    deployment.set_asset_oracle(owner, Address::NATIVE, Arc::new(feed))?;
    for account in [alice, bob] {
        deployment
            .ledger_mut()
            .mint(Address::NATIVE, account, Amount::from_units(10_000))?;
    }
    if deployment.registry().paused() {
        deployment.toggle_pause(owner)?;
    }

    let ooga = deployment.oracle().segment("ooga")?;
    let price = deployment.quote(&ooga, 1, Address::NATIVE)?.asset_amount;
    deployment
        .mint_native(alice, price, MintRequest::new(ooga.clone(), 1, alice))
        .context("alice mints ooga")?;

    let bear = deployment.oracle().segment("🐻")?;
    let card = deployment.oracle().segment("🪪")?;
    let ids = deployment.mint_to_auction_house(owner, &[bear.clone(), card.clone()])?;
    let now = clock.now();
    deployment.create_auction(owner, ids[0], now, now + 2 * DAY, Amount::from_units(10))?;
    deployment.create_auction(owner, ids[1], now, now + 2 * DAY, Amount::from_units(10))?;

    deployment.place_bid(bob, ids[0], Amount::from_units(100))?;
    deployment.place_bid(alice, ids[0], Amount::from_units(200))?;
    deployment.transfer_unclaimed(owner, ids[1])?;

    clock.advance(2 * DAY);
    deployment.claim(alice, ids[0]).context("alice claims the bear")?;
    let settled = snapshot(&deployment, &[&ooga, &bear, &card], clock.now());

    clock.advance(year + grace + 1);
    let price = deployment.quote(&ooga, 2, Address::NATIVE)?.asset_amount;
    deployment
        .mint_native(bob, price, MintRequest::new(ooga.clone(), 2, bob))
        .context("bob re-mints lapsed ooga")?;

    let now = clock.now();
    let owners = snapshot(&deployment, &[&ooga, &bear, &card], now);

    let funds = deployment.funds_manager();
    let balances = [("owner", owner), ("alice", alice), ("bob", bob), ("funds manager", funds)]
        .into_iter()
        .map(|(label, account)| BalanceLine {
            account: label.to_string(),
            native: deployment.native_balance(account),
        })
        .collect();

    Ok(SimulationReport {
        started_at: start,
        finished_at: now,
        settled,
        owners,
        balances,
        events: deployment.take_events(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_settles() {
        let report = run_scenario(NamekitConfig::default(), 1_700_000_000, "1").unwrap();

        let label = |who: &str| Some(Address::from_label(who).to_string());
        assert_eq!(report.settled[0].owner, label("alice"));
        assert_eq!(report.settled[1].owner, label("alice"));
        assert_eq!(report.settled[2].owner, label("owner"));

        let ooga = &report.owners[0];
        assert_eq!(ooga.owner, label("bob"));
        assert_eq!(ooga.state, LeaseState::Active);
        // inventory leases ran out alongside the first ooga lease
        assert_eq!(report.owners[1].state, LeaseState::Lapsed);
        assert_eq!(report.owners[2].owner, None);

        // 80 for ooga, 200 for the bear, 176.8 for the two-year re-mint
        let funds = report
            .balances
            .iter()
            .find(|b| b.account == "funds manager")
            .unwrap();
        assert_eq!(funds.native, Amount::from_str_checked("456.8").unwrap());

        assert!(report.events.iter().any(|e| e.kind() == "Claimed"));
        assert!(report.events.iter().any(|e| e.kind() == "Reclaimed"));
    }

    #[test]
    fn test_scenario_rejects_bad_feed() {
        assert!(run_scenario(NamekitConfig::default(), 0, "free").is_err());
    }
}

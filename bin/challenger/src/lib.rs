pub mod config;
pub mod metrics;

use crate::metrics::Metrics;
use agent::{Agent, Outcome, Responder};
use alloy_primitives::Address;
use game::{DisputeGameFactory, GameLoader, LoaderError, StatusFetcher};
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Per-cycle policy shared by every agent in the cycle.
#[derive(Debug, Clone, Copy)]
pub struct CycleOptions {
    /// Whether the operator agrees with the outputs being disputed
    pub agree_with_proposed_output: bool,
    /// Decide and check resolvability only
    pub dry_run: bool,
}

/// Summary of one monitoring cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Games returned by the enumeration
    pub games: usize,
    /// Games resolved by this cycle
    pub resolved: usize,
    /// Games that would have been resolved (dry-run)
    pub would_resolve: usize,
    /// Games that warrant resolution but cannot be resolved yet
    pub unresolvable: usize,
    /// Games whose resolution failed
    pub failures: usize,
}

/// Run one monitoring cycle: enumerate every game, then let an agent decide
/// (and act) on each of them.
///
/// A failed enumeration aborts the cycle before any game is looked at. A
/// failure on one game is logged and counted, and the cycle moves on.
pub async fn run_cycle<F, S, R>(
    loader: &GameLoader<F>,
    fetcher: &S,
    responder: &R,
    options: CycleOptions,
    metrics: &Metrics,
    cancel: &CancellationToken,
) -> Result<CycleReport, LoaderError>
where
    F: DisputeGameFactory,
    S: StatusFetcher,
    R: Responder,
{
    let started = Instant::now();

    let games = match loader.fetch_all_games(cancel).await {
        Ok(games) => games,
        Err(e) => {
            error!(error = %e, "Failed to fetch dispute games");
            metrics.record_cycle(false, started.elapsed());
            return Err(e);
        }
    };

    metrics.set_games_observed(games.len());
    debug!(games = games.len(), "Evaluating dispute games");

    let mut report = CycleReport {
        games: games.len(),
        ..Default::default()
    };

    for game in &games {
        if cancel.is_cancelled() {
            debug!("Cycle cancelled, skipping remaining games");
            break;
        }

        let agent = Agent::new(
            game.proxy,
            fetcher,
            responder,
            options.agree_with_proposed_output,
        )
        .with_dry_run(options.dry_run);

        match agent.act(cancel).await {
            Ok(Outcome::Skipped) => {}
            Ok(Outcome::Unresolvable) => {
                report.unresolvable += 1;
                metrics.record_resolution("unresolvable");
            }
            Ok(Outcome::WouldResolve) => {
                report.would_resolve += 1;
                metrics.record_resolution("dry_run");
            }
            Ok(Outcome::Resolved(receipt)) => {
                report.resolved += 1;
                metrics.record_resolution("resolved");
                info!(
                    game = %game.proxy,
                    tx_hash = %receipt.tx_hash,
                    "Resolution included"
                );
            }
            Err(e) => {
                report.failures += 1;
                metrics.record_resolution("failure");
                error!(game = %game.proxy, error = %e, "Failed to resolve dispute game");
            }
        }
    }

    metrics.record_cycle(report.failures == 0, started.elapsed());

    Ok(report)
}

/// Decide whether a single game should be resolved, without acting on it.
///
/// Goes through [`Agent::should_resolve`], so an unreadable status or a
/// cancelled read yields `false`.
pub async fn check_game<S, R>(
    fetcher: &S,
    responder: &R,
    game: Address,
    agree_with_proposed_output: bool,
    cancel: &CancellationToken,
) -> bool
where
    S: StatusFetcher,
    R: Responder,
{
    Agent::new(game, fetcher, responder, agree_with_proposed_output)
        .should_resolve(cancel)
        .await
}

//! Resolution decisions for dispute games.
//!
//! An [`Agent`] is bound to one game and one operator stance on the proposed
//! output. It reads the game status through a [`StatusFetcher`] and decides
//! whether the operator should trigger resolution. Submitting the resolution
//! is delegated to a [`Responder`].

pub mod responder;

pub use responder::{FaultResponder, ResolveReceipt, Responder};

use alloy_primitives::Address;
use game::{GameStatus, StatusFetcher};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Whether a game with the given status warrants resolution by an operator
/// that does (`agree = true`) or does not agree with the proposed output.
///
/// | agree | status        | resolve |
/// |-------|---------------|---------|
/// | true  | DefenderWon   | false   |
/// | true  | ChallengerWon | true    |
/// | false | DefenderWon   | true    |
/// | false | ChallengerWon | false   |
/// | any   | InProgress    | false   |
pub const fn resolution_required(agree_with_proposed_output: bool, status: GameStatus) -> bool {
    match status {
        GameStatus::InProgress => false,
        GameStatus::ChallengerWon => agree_with_proposed_output,
        GameStatus::DefenderWon => !agree_with_proposed_output,
    }
}

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("responder failed for game {game}: {reason}")]
    Responder { game: Address, reason: eyre::Report },

    #[error("cancelled before resolving game {0}")]
    Cancelled(Address),
}

/// Result of a single [`Agent::act`] pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to do for this game.
    Skipped,
    /// Resolution is warranted but the game cannot be resolved on-chain yet.
    Unresolvable,
    /// Resolution is warranted and possible, but the agent is in dry-run mode.
    WouldResolve,
    /// A resolve transaction was included.
    Resolved(ResolveReceipt),
}

/// Decides and (optionally) performs resolution of a single game.
pub struct Agent<S, R> {
    game: Address,
    fetcher: S,
    responder: R,
    agree_with_proposed_output: bool,
    dry_run: bool,
}

impl<S, R> Agent<S, R>
where
    S: StatusFetcher,
    R: Responder,
{
    pub const fn new(
        game: Address,
        fetcher: S,
        responder: R,
        agree_with_proposed_output: bool,
    ) -> Self {
        Self {
            game,
            fetcher,
            responder,
            agree_with_proposed_output,
            dry_run: false,
        }
    }

    /// Decide and check resolvability, but never submit transactions.
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// The game this agent is bound to.
    pub const fn game(&self) -> Address {
        self.game
    }

    /// Whether the operator should trigger resolution of the game.
    ///
    /// The status is read exactly once. A failed or cancelled read yields
    /// `false`: the agent never acts on a status it could not confirm.
    pub async fn should_resolve(&self, cancel: &CancellationToken) -> bool {
        let status = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(game = %self.game, "Status fetch cancelled");
                return false;
            }
            status = self.fetcher.game_status(self.game) => status,
        };

        match status {
            Ok(status) => {
                let resolve = resolution_required(self.agree_with_proposed_output, status);
                debug!(
                    game = %self.game,
                    %status,
                    agree_with_proposed_output = self.agree_with_proposed_output,
                    resolve,
                    "Evaluated game"
                );
                resolve
            }
            Err(e) => {
                warn!(game = %self.game, error = %e, "Failed to fetch game status");
                false
            }
        }
    }

    /// Evaluate the game and, if warranted and possible, resolve it.
    pub async fn act(&self, cancel: &CancellationToken) -> Result<Outcome, AgentError> {
        if !self.should_resolve(cancel).await {
            return Ok(Outcome::Skipped);
        }

        let resolvable = self
            .responder
            .can_resolve(self.game)
            .await
            .map_err(|reason| AgentError::Responder {
                game: self.game,
                reason,
            })?;

        if !resolvable {
            warn!(game = %self.game, "Game should be resolved but is not resolvable yet");
            return Ok(Outcome::Unresolvable);
        }

        if self.dry_run {
            info!(game = %self.game, "DRY-RUN: would resolve game");
            return Ok(Outcome::WouldResolve);
        }

        if cancel.is_cancelled() {
            return Err(AgentError::Cancelled(self.game));
        }

        let receipt = self
            .responder
            .resolve(self.game)
            .await
            .map_err(|reason| AgentError::Responder {
                game: self.game,
                reason,
            })?;

        Ok(Outcome::Resolved(receipt))
    }
}

//! Dispute game discovery and status reads.
//!
//! This crate provides the read side of the challenger: enumerating every game
//! the DisputeGameFactory has created and reading the status of a single game.
//! Both chain reads sit behind small traits so callers can be exercised
//! against in-memory stand-ins.

pub mod contract;
pub mod loader;
pub mod types;

pub use contract::{FactoryContract, GameStatusContract};
pub use loader::{GameLoader, LoaderError};
pub use types::{FaultDisputeGame, GameError, GameStatus, StatusError};

use alloy_primitives::Address;
use std::future::Future;

/// Point-in-time reads against the DisputeGameFactory.
pub trait DisputeGameFactory: Send + Sync {
    /// Total number of games the factory has created.
    fn game_count(&self) -> impl Future<Output = eyre::Result<u64>> + Send;

    /// The game created at `index` (zero-based, in creation order).
    fn game_at_index(
        &self,
        index: u64,
    ) -> impl Future<Output = eyre::Result<FaultDisputeGame>> + Send;
}

/// Reads the live status of a dispute game.
pub trait StatusFetcher: Send + Sync {
    /// Query the status of the game at `game`.
    fn game_status(&self, game: Address) -> impl Future<Output = eyre::Result<GameStatus>> + Send;
}

impl<T: DisputeGameFactory> DisputeGameFactory for &T {
    fn game_count(&self) -> impl Future<Output = eyre::Result<u64>> + Send {
        (**self).game_count()
    }

    fn game_at_index(
        &self,
        index: u64,
    ) -> impl Future<Output = eyre::Result<FaultDisputeGame>> + Send {
        (**self).game_at_index(index)
    }
}

impl<T: StatusFetcher> StatusFetcher for &T {
    fn game_status(&self, game: Address) -> impl Future<Output = eyre::Result<GameStatus>> + Send {
        (**self).game_status(game)
    }
}

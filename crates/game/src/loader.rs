//! Enumeration of all games known to the DisputeGameFactory.

use crate::{DisputeGameFactory, FaultDisputeGame};
use std::{error::Error, fmt, future::Future};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Upper bound on the up-front allocation for a game list.
const MAX_PREALLOCATED_GAMES: u64 = 1024;

/// Failure of a game enumeration.
///
/// The collaborator's [`eyre::Report`] is kept as is and exposed through
/// [`Error::source`], so callers can still downcast to the original error.
#[derive(Debug)]
pub enum LoaderError {
    /// Reading the total game count failed.
    GameCount(eyre::Report),

    /// Reading the game at `index` failed.
    GameAtIndex { index: u64, error: eyre::Report },

    /// The enumeration was cancelled before it completed.
    Cancelled,
}

impl fmt::Display for LoaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GameCount(error) => write!(f, "failed to read game count: {error}"),
            Self::GameAtIndex { index, error } => {
                write!(f, "failed to read game at index {index}: {error}")
            }
            Self::Cancelled => f.write_str("game enumeration cancelled"),
        }
    }
}

// eyre::Report is not a std error itself, so thiserror's #[source] cannot hold it.
impl Error for LoaderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::GameCount(error) | Self::GameAtIndex { error, .. } => Some(&**error),
            Self::Cancelled => None,
        }
    }
}

/// Loads a complete, ordered snapshot of the games created by a factory.
pub struct GameLoader<F> {
    factory: F,
}

impl<F> GameLoader<F>
where
    F: DisputeGameFactory,
{
    pub const fn new(factory: F) -> Self {
        Self { factory }
    }

    /// Fetch every game the factory has created, in creation order.
    ///
    /// The count is read once and indices `0..count` are then read one at a
    /// time. Any failed read (or cancellation) aborts the enumeration and no
    /// games are returned, so callers never see a list with gaps.
    pub async fn fetch_all_games(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<FaultDisputeGame>, LoaderError> {
        let count = cancellable(cancel, self.factory.game_count())
            .await?
            .map_err(LoaderError::GameCount)?;

        debug!(game_count = count, "Fetching dispute games");

        let mut games = Vec::with_capacity(count.min(MAX_PREALLOCATED_GAMES) as usize);
        for index in 0..count {
            let game = cancellable(cancel, self.factory.game_at_index(index))
                .await?
                .map_err(|error| LoaderError::GameAtIndex { index, error })?;

            games.push(game);
        }

        debug!(fetched = games.len(), "Fetched dispute games");

        Ok(games)
    }
}

/// Run `fut` unless `cancel` fires first.
async fn cancellable<T>(
    cancel: &CancellationToken,
    fut: impl Future<Output = T>,
) -> Result<T, LoaderError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(LoaderError::Cancelled),
        out = fut => Ok(out),
    }
}

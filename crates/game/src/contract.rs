//! Contract-backed implementations of [`DisputeGameFactory`] and [`StatusFetcher`].

use crate::{DisputeGameFactory, FaultDisputeGame, GameError, GameStatus, StatusFetcher};
use alloy_primitives::{Address, U256};
use alloy_provider::Provider;
use binding::opstack::{IDisputeGameFactory, IFaultDisputeGame};
use tracing::trace;

/// Reads games from an on-chain DisputeGameFactory.
#[derive(Debug, Clone)]
pub struct FactoryContract<P> {
    provider: P,
    factory_address: Address,
}

impl<P> FactoryContract<P>
where
    P: Provider + Clone,
{
    pub const fn new(provider: P, factory_address: Address) -> Self {
        Self {
            provider,
            factory_address,
        }
    }

    /// Address of the factory this reader points at.
    pub const fn address(&self) -> Address {
        self.factory_address
    }
}

impl<P> DisputeGameFactory for FactoryContract<P>
where
    P: Provider + Clone,
{
    async fn game_count(&self) -> eyre::Result<u64> {
        let factory = IDisputeGameFactory::new(self.factory_address, &self.provider);
        let count: U256 = factory.gameCount().call().await?;

        let count = count
            .try_into()
            .map_err(|_| GameError::CountOverflow(count))?;
        Ok(count)
    }

    async fn game_at_index(&self, index: u64) -> eyre::Result<FaultDisputeGame> {
        let factory = IDisputeGameFactory::new(self.factory_address, &self.provider);
        let game = factory.gameAtIndex(U256::from(index)).call().await?;

        trace!(
            index,
            game_type = game.gameType_,
            proxy = %game.proxy_,
            timestamp = game.timestamp_,
            "Read dispute game"
        );

        Ok(FaultDisputeGame {
            proxy: game.proxy_,
            timestamp: game.timestamp_,
        })
    }
}

/// Reads game status from FaultDisputeGame proxies.
#[derive(Debug, Clone)]
pub struct GameStatusContract<P> {
    provider: P,
}

impl<P> GameStatusContract<P>
where
    P: Provider + Clone,
{
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }
}

impl<P> StatusFetcher for GameStatusContract<P>
where
    P: Provider + Clone,
{
    async fn game_status(&self, game: Address) -> eyre::Result<GameStatus> {
        let contract = IFaultDisputeGame::new(game, &self.provider);
        let raw = contract.status().call().await?;

        Ok(GameStatus::try_from(raw)?)
    }
}

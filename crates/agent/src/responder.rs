//! Submission of resolve transactions.

use alloy_network::ReceiptResponse;
use alloy_primitives::{Address, TxHash};
use alloy_provider::Provider;
use binding::opstack::IFaultDisputeGame;
use client::SignerFn;
use std::future::Future;
use tracing::{debug, info};

/// Receipt of an included resolve transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveReceipt {
    /// Transaction hash
    pub tx_hash: TxHash,
    /// Block number where the transaction was included
    pub block_number: Option<u64>,
    /// Gas used
    pub gas_used: u64,
}

/// Submits on-chain resolution on behalf of the operator.
pub trait Responder: Send + Sync {
    /// Whether `resolve()` on the game would currently succeed.
    ///
    /// Fails only when the check itself could not be carried out.
    fn can_resolve(&self, game: Address) -> impl Future<Output = eyre::Result<bool>> + Send;

    /// Submit a `resolve()` transaction and wait for its receipt.
    fn resolve(&self, game: Address) -> impl Future<Output = eyre::Result<ResolveReceipt>> + Send;
}

impl<T: Responder> Responder for &T {
    fn can_resolve(&self, game: Address) -> impl Future<Output = eyre::Result<bool>> + Send {
        (**self).can_resolve(game)
    }

    fn resolve(&self, game: Address) -> impl Future<Output = eyre::Result<ResolveReceipt>> + Send {
        (**self).resolve(game)
    }
}

/// [`Responder`] that resolves FaultDisputeGame proxies directly.
pub struct FaultResponder<P> {
    provider: P,
    signer: SignerFn,
    from: Address,
}

impl<P> FaultResponder<P>
where
    P: Provider + Clone,
{
    pub fn new(provider: P, signer: SignerFn, from: Address) -> Self {
        Self {
            provider,
            signer,
            from,
        }
    }
}

impl<P> Responder for FaultResponder<P>
where
    P: Provider + Clone,
{
    async fn can_resolve(&self, game: Address) -> eyre::Result<bool> {
        let contract = IFaultDisputeGame::new(game, &self.provider);

        // Simulate with eth_call; a revert means the game cannot be resolved yet.
        match contract.resolve().from(self.from).call().await {
            Ok(status) => {
                debug!(game = %game, status, "resolve() simulation succeeded");
                Ok(true)
            }
            Err(e) if e.as_revert_data().is_some() => {
                debug!(game = %game, error = %e, "resolve() simulation reverted");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn resolve(&self, game: Address) -> eyre::Result<ResolveReceipt> {
        info!(game = %game, from = %self.from, "Resolving dispute game");

        let contract = IFaultDisputeGame::new(game, &self.provider);
        let tx_request = contract
            .resolve()
            .into_transaction_request()
            .from(self.from);

        let signed_tx = (self.signer)(tx_request).await?;

        let pending = self.provider.send_raw_transaction(&signed_tx).await?;
        let receipt = pending.get_receipt().await?;

        checked_receipt(game, &receipt)
    }
}

/// Turn the receipt of a resolve transaction into a [`ResolveReceipt`],
/// failing if the transaction reverted.
fn checked_receipt<R>(game: Address, receipt: &R) -> eyre::Result<ResolveReceipt>
where
    R: ReceiptResponse,
{
    let tx_hash = receipt.transaction_hash();
    if !receipt.status() {
        eyre::bail!("resolve transaction {tx_hash} reverted for game {game}");
    }

    info!(
        %tx_hash,
        block_number = receipt.block_number(),
        gas_used = receipt.gas_used(),
        game = %game,
        "Dispute game resolved"
    );

    Ok(ResolveReceipt {
        tx_hash,
        block_number: receipt.block_number(),
        gas_used: receipt.gas_used(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Agent;
    use alloy_consensus::{Eip658Value, Receipt, ReceiptEnvelope, ReceiptWithBloom};
    use alloy_primitives::{Bloom, Bytes, B256, U256};
    use alloy_provider::ProviderBuilder;
    use alloy_rpc_types::TransactionReceipt;
    use alloy_sol_types::SolValue;
    use alloy_transport::mock::Asserter;
    use game::GameStatusContract;
    use serde_json::value::RawValue;
    use std::borrow::Cow;
    use tokio_util::sync::CancellationToken;

    const GAME: Address = Address::repeat_byte(0x42);
    const OPERATOR: Address = Address::repeat_byte(0x0a);

    fn responder(asserter: Asserter) -> FaultResponder<impl Provider + Clone> {
        let provider = ProviderBuilder::new().connect_mocked_client(asserter);
        FaultResponder::new(provider, client::disabled_signer_fn(), OPERATOR)
    }

    /// `eth_call` error as returned by a node when the call reverts.
    fn revert_payload() -> alloy_json_rpc::ErrorPayload {
        alloy_json_rpc::ErrorPayload {
            code: 3,
            message: Cow::Borrowed("execution reverted"),
            data: Some(RawValue::from_string(r#""0xdeadbeef""#.to_string()).unwrap()),
        }
    }

    fn receipt(success: bool) -> TransactionReceipt {
        TransactionReceipt {
            inner: ReceiptEnvelope::Eip1559(ReceiptWithBloom {
                receipt: Receipt {
                    status: Eip658Value::Eip658(success),
                    cumulative_gas_used: 90_000,
                    logs: vec![],
                },
                logs_bloom: Bloom::ZERO,
            }),
            transaction_hash: B256::repeat_byte(0xab),
            transaction_index: Some(0),
            block_hash: Some(B256::repeat_byte(0xcd)),
            block_number: Some(21_000_000),
            gas_used: 65_000,
            effective_gas_price: 1_000_000_000,
            blob_gas_used: None,
            blob_gas_price: None,
            from: OPERATOR,
            to: Some(GAME),
            contract_address: None,
        }
    }

    #[tokio::test]
    async fn test_can_resolve_when_simulation_succeeds() {
        let asserter = Asserter::new();
        asserter.push_success(&Bytes::from(U256::from(1u8).abi_encode()));

        assert!(responder(asserter).can_resolve(GAME).await.unwrap());
    }

    #[tokio::test]
    async fn test_cannot_resolve_when_simulation_reverts() {
        let asserter = Asserter::new();
        asserter.push_failure(revert_payload());

        assert!(!responder(asserter).can_resolve(GAME).await.unwrap());
    }

    #[tokio::test]
    async fn test_simulation_transport_error_is_propagated() {
        let asserter = Asserter::new();
        asserter.push_failure_msg("upstream connect error");

        assert!(responder(asserter).can_resolve(GAME).await.is_err());
    }

    #[tokio::test]
    async fn test_resolve_fails_without_signing_key() {
        let err = responder(Asserter::new()).resolve(GAME).await.unwrap_err();

        assert!(err.to_string().contains("no signing key configured"));
    }

    #[test]
    fn test_successful_receipt() {
        let receipt = checked_receipt(GAME, &receipt(true)).unwrap();

        assert_eq!(
            receipt,
            ResolveReceipt {
                tx_hash: B256::repeat_byte(0xab),
                block_number: Some(21_000_000),
                gas_used: 65_000,
            }
        );
    }

    #[test]
    fn test_reverted_receipt_is_an_error() {
        let err = checked_receipt(GAME, &receipt(false)).unwrap_err();

        assert!(err.to_string().contains("reverted"));
    }

    #[tokio::test]
    async fn test_unknown_status_byte_is_not_resolved() {
        let asserter = Asserter::new();
        asserter.push_success(&Bytes::from(U256::from(3u8).abi_encode()));
        asserter.push_success(&Bytes::from(U256::from(3u8).abi_encode()));
        let provider = ProviderBuilder::new().connect_mocked_client(asserter);
        let fetcher = GameStatusContract::new(provider);

        for agree in [true, false] {
            let agent = Agent::new(GAME, &fetcher, responder(Asserter::new()), agree);
            assert!(!agent.should_resolve(&CancellationToken::new()).await);
        }
    }
}

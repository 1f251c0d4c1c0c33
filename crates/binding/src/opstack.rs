//! OP Stack fault proof contract bindings.
//!
//! Includes the L1 contracts of the dispute protocol:
//! - DisputeGameFactory (creates and indexes dispute games)
//! - FaultDisputeGame (one proxy per dispute)

use alloy_sol_types::sol;

sol! {
    /// DisputeGameFactory - Creates dispute game proxies and indexes them by creation order
    #[sol(rpc)]
    interface IDisputeGameFactory {
        /// Emitted when a new dispute game is created
        event DisputeGameCreated(
            address indexed disputeProxy,
            uint32 indexed gameType,
            bytes32 indexed rootClaim
        );

        /// Get the total number of dispute games created
        function gameCount() external view returns (uint256 gameCount_);

        /// Get the game type, creation timestamp and proxy address of a dispute game by index.
        /// `GameType` is a `uint32` and `Timestamp` a `uint64` user type on-chain.
        function gameAtIndex(uint256 _index)
            external view returns (uint32 gameType_, uint64 timestamp_, address proxy_);
    }

    /// IFaultDisputeGame - Standard interface for fault dispute games
    #[sol(rpc)]
    interface IFaultDisputeGame {
        /// Emitted when the game is resolved
        event Resolved(uint8 indexed status);

        /// Get the game status (0 = IN_PROGRESS, 1 = CHALLENGER_WINS, 2 = DEFENDER_WINS)
        function status() external view returns (uint8);

        /// Get the timestamp the game was created at
        function createdAt() external view returns (uint64);

        /// Get the L2 block number this game is disputing
        function l2BlockNumber() external view returns (uint256);

        /// Get the root claim (output root)
        function rootClaim() external view returns (bytes32);

        /// Resolve the game, returning the final status
        function resolve() external returns (uint8 status_);
    }
}

//! Contract bindings for the fault proof contracts the challenger reads and drives.
//!
//! - DisputeGameFactory (game enumeration)
//! - FaultDisputeGame (status reads and resolution)
//!
//! All bindings are generated using alloy's `sol!` macro.

pub mod opstack;

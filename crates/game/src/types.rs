use alloy_primitives::{Address, U256};
use std::fmt;
use thiserror::Error;

/// A dispute game as read from the factory at a given index.
///
/// `proxy` is the identity of the game. Games are indexed by the factory in
/// creation order and never reordered or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaultDisputeGame {
    /// Address of the game proxy contract
    pub proxy: Address,
    /// Block timestamp at which the game was created
    pub timestamp: u64,
}

/// On-chain status of a dispute game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum GameStatus {
    /// The game has not been resolved yet.
    InProgress = 0,
    /// The root claim was countered.
    ChallengerWon = 1,
    /// The root claim was upheld.
    DefenderWon = 2,
}

impl GameStatus {
    /// Whether the game has reached a final outcome.
    pub const fn is_resolved(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

impl TryFrom<u8> for GameStatus {
    type Error = StatusError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::InProgress),
            1 => Ok(Self::ChallengerWon),
            2 => Ok(Self::DefenderWon),
            other => Err(StatusError::Unknown(other)),
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InProgress => "in_progress",
            Self::ChallengerWon => "challenger_won",
            Self::DefenderWon => "defender_won",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatusError {
    #[error("unknown game status: {0}")]
    Unknown(u8),
}

/// Errors raised while decoding factory values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("game count {0} does not fit in u64")]
    CountOverflow(U256),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_u8() {
        assert_eq!(GameStatus::try_from(0).unwrap(), GameStatus::InProgress);
        assert_eq!(GameStatus::try_from(1).unwrap(), GameStatus::ChallengerWon);
        assert_eq!(GameStatus::try_from(2).unwrap(), GameStatus::DefenderWon);
    }

    #[test]
    fn test_status_unknown_value() {
        assert_eq!(GameStatus::try_from(3), Err(StatusError::Unknown(3)));
        assert_eq!(GameStatus::try_from(255), Err(StatusError::Unknown(255)));
    }

    #[test]
    fn test_status_is_resolved() {
        assert!(!GameStatus::InProgress.is_resolved());
        assert!(GameStatus::ChallengerWon.is_resolved());
        assert!(GameStatus::DefenderWon.is_resolved());
    }
}

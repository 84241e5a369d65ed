use serde::Serialize;

use crate::error::{MiniError, Result};

/// A network an action can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Chain {
    /// Key used in action metadata (`chains.source`).
    pub key: &'static str,
    /// EIP-155 chain id.
    pub id: u64,
    /// Human-readable name returned to clients as `chainId`.
    pub name: &'static str,
}

pub const FUJI: Chain = Chain {
    key: "fuji",
    id: 43113,
    name: "Avalanche Fuji",
};

pub const KNOWN_CHAINS: &[Chain] = &[
    FUJI,
    Chain {
        key: "avalanche",
        id: 43114,
        name: "Avalanche",
    },
    Chain {
        key: "celo",
        id: 42220,
        name: "Celo",
    },
    Chain {
        key: "alfajores",
        id: 44787,
        name: "Alfajores",
    },
    Chain {
        key: "monad-testnet",
        id: 10143,
        name: "Monad Testnet",
    },
    Chain {
        key: "ethereum",
        id: 1,
        name: "Ethereum",
    },
];

impl Chain {
    pub fn by_key(key: &str) -> Result<Chain> {
        KNOWN_CHAINS
            .iter()
            .find(|c| c.key == key)
            .copied()
            .ok_or_else(|| MiniError::UnknownNetwork(key.to_string()))
    }

    pub fn is_known(key: &str) -> bool {
        KNOWN_CHAINS.iter().any(|c| c.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fuji_lookup() {
        let chain = Chain::by_key("fuji").unwrap();
        assert_eq!(chain.id, 43113);
        assert_eq!(chain.name, "Avalanche Fuji");
    }

    #[test]
    fn unknown_key_is_error() {
        let err = Chain::by_key("solana").unwrap_err();
        assert!(matches!(err, MiniError::UnknownNetwork(k) if k == "solana"));
        assert!(!Chain::is_known("solana"));
    }

    #[test]
    fn keys_and_ids_are_unique() {
        for (i, a) in KNOWN_CHAINS.iter().enumerate() {
            for b in &KNOWN_CHAINS[i + 1..] {
                assert_ne!(a.key, b.key);
                assert_ne!(a.id, b.id);
            }
        }
    }
}

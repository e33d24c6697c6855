//! Balance lookup seam
//!
//! The library never talks to a chain. Front ends plug in a
//! [`BalanceSource`] and use [`Balance`] to turn the raw amount into a
//! display value.

use std::fmt;

use async_trait::async_trait;

use crate::crypto::keys::Chain;
use crate::error::Result;

/// An amount in a chain's smallest unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Balance {
    pub chain: Chain,
    /// Wei for Ethereum, lamports for Solana
    pub base_units: u128,
}

impl Balance {
    pub fn new(chain: Chain, base_units: u128) -> Self {
        Self { chain, base_units }
    }

    /// Decimal places between the smallest unit and the display unit
    pub fn decimals(chain: Chain) -> u32 {
        match chain {
            Chain::Ethereum => 18,
            Chain::Solana => 9,
        }
    }

    pub fn symbol(chain: Chain) -> &'static str {
        match chain {
            Chain::Ethereum => "ETH",
            Chain::Solana => "SOL",
        }
    }
}

impl fmt::Display for Balance {
    /// Exact decimal rendering with trailing zeros trimmed, e.g. `1.5 SOL`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let decimals = Self::decimals(self.chain);
        let scale = 10u128.pow(decimals);
        let whole = self.base_units / scale;
        let fraction = self.base_units % scale;

        if fraction == 0 {
            write!(f, "{} {}", whole, Self::symbol(self.chain))
        } else {
            let digits = format!("{:0width$}", fraction, width = decimals as usize);
            write!(f, "{}.{} {}", whole, digits.trim_end_matches('0'), Self::symbol(self.chain))
        }
    }
}

/// Resolves the balance of a public identifier on a chain
#[async_trait]
pub trait BalanceSource: Send + Sync {
    /// `identifier` is an Ethereum address or a Solana public key
    async fn balance(&self, chain: Chain, identifier: &str) -> Result<Balance>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_display_units() {
        assert_eq!(Balance::new(Chain::Solana, 1_500_000_000).to_string(), "1.5 SOL");
        assert_eq!(Balance::new(Chain::Solana, 0).to_string(), "0 SOL");
        assert_eq!(Balance::new(Chain::Solana, 1).to_string(), "0.000000001 SOL");
        assert_eq!(
            Balance::new(Chain::Ethereum, 2_000_000_000_000_000_000).to_string(),
            "2 ETH"
        );
        assert_eq!(
            Balance::new(Chain::Ethereum, 10_000_000_000_000_000).to_string(),
            "0.01 ETH"
        );
    }

    struct FixedSource;

    #[async_trait]
    impl BalanceSource for FixedSource {
        async fn balance(&self, chain: Chain, identifier: &str) -> Result<Balance> {
            if identifier.is_empty() {
                return Err(Error::Balance("empty identifier".to_string()));
            }
            Ok(Balance::new(chain, 42))
        }
    }

    #[tokio::test]
    async fn test_source_is_object_safe() {
        let source: Box<dyn BalanceSource> = Box::new(FixedSource);
        let balance = source.balance(Chain::Solana, "HAgk").await.unwrap();
        assert_eq!(balance.base_units, 42);
        assert!(source.balance(Chain::Solana, "").await.is_err());
    }
}

//! JSON-RPC balance lookup

use async_trait::async_trait;
use serde_json::Value;

use walletgen::balance::{Balance, BalanceSource};
use walletgen::crypto::keys::{ethereum, solana};
use walletgen::{Chain, Error, Result};

use crate::config::Config;

/// Balance source backed by each chain's JSON-RPC endpoint
pub struct RpcBalanceSource {
    config: Config,
    client: reqwest::Client,
}

impl RpcBalanceSource {
    pub fn new(config: Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.rpc_timeout())
            .build()
            .map_err(|e| Error::Balance(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Send a JSON-RPC request and return its `result` member
    async fn send_request(&self, url: &str, method: &str, params: Vec<Value>) -> Result<Value> {
        let request = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        tracing::debug!(url, method, "sending JSON-RPC request");
        let response = self.client.post(url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Balance(format!("Failed to send request: {}", e)))?;

        let response_json: Value = response.json()
            .await
            .map_err(|e| Error::Balance(format!("Failed to parse response: {}", e)))?;

        if let Some(error) = response_json.get("error") {
            return Err(Error::Balance(format!("JSON-RPC error: {}", error)));
        }

        response_json.get("result")
            .cloned()
            .ok_or_else(|| Error::Balance("No result in response".to_string()))
    }
}

#[async_trait]
impl BalanceSource for RpcBalanceSource {
    async fn balance(&self, chain: Chain, identifier: &str) -> Result<Balance> {
        let url = self.config.rpc_url(chain);
        let base_units = match chain {
            Chain::Ethereum => {
                if !ethereum::is_valid_address(identifier) {
                    return Err(Error::Balance(format!("not an Ethereum address: {}", identifier)));
                }
                let result = self
                    .send_request(url, "eth_getBalance", vec![identifier.into(), "latest".into()])
                    .await?;
                parse_wei(&result)?
            }
            Chain::Solana => {
                if !solana::is_valid_address(identifier) {
                    return Err(Error::Balance(format!("not a Solana public key: {}", identifier)));
                }
                let result = self.send_request(url, "getBalance", vec![identifier.into()]).await?;
                parse_lamports(&result)?
            }
        };

        Ok(Balance::new(chain, base_units))
    }
}

/// `eth_getBalance` answers with a 0x-prefixed hex quantity
fn parse_wei(result: &Value) -> Result<u128> {
    let quantity = result
        .as_str()
        .and_then(|s| s.strip_prefix("0x"))
        .ok_or_else(|| Error::Balance(format!("unexpected eth_getBalance result: {}", result)))?;

    if quantity.is_empty() {
        return Ok(0);
    }
    u128::from_str_radix(quantity, 16)
        .map_err(|e| Error::Balance(format!("invalid wei quantity {}: {}", quantity, e)))
}

/// `getBalance` answers with `{ "context": .., "value": lamports }`
fn parse_lamports(result: &Value) -> Result<u128> {
    result
        .get("value")
        .and_then(Value::as_u64)
        .map(u128::from)
        .ok_or_else(|| Error::Balance(format!("unexpected getBalance result: {}", result)))
}

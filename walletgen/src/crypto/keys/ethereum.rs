//! Ethereum key derivation

use secp256k1::{PublicKey, Secp256k1, SecretKey};
use sha3::{Digest, Keccak256};

use super::derivation::KeyMaterial;
use super::{Chain, ChainKeyAdapter};
use crate::account::EthereumWallet;
use crate::error::{Error, Result};

/// secp256k1 adapter producing checksummed Ethereum addresses
#[derive(Debug, Clone, Copy, Default)]
pub struct EthereumAdapter;

impl ChainKeyAdapter for EthereumAdapter {
    type Wallet = EthereumWallet;

    const CHAIN: Chain = Chain::Ethereum;

    fn derive_wallet(key: &KeyMaterial) -> Result<EthereumWallet> {
        derive_ethereum_wallet(key)
    }

    fn public_identifier(wallet: &EthereumWallet) -> &str {
        &wallet.address
    }
}

/// Derive an Ethereum wallet from 32 bytes of key material
///
/// # Errors
/// [`Error::InvalidKey`] if the bytes are zero or not below the curve order.
pub fn derive_ethereum_wallet(key: &KeyMaterial) -> Result<EthereumWallet> {
    let secp = Secp256k1::signing_only();
    let secret_key = SecretKey::from_slice(key.as_bytes())
        .map_err(|e| Error::InvalidKey(format!("Invalid secp256k1 secret key: {}", e)))?;
    let public_key = PublicKey::from_secret_key(&secp, &secret_key);

    Ok(EthereumWallet {
        address: public_key_to_address(&public_key.serialize_uncompressed()),
        private_key: format!("0x{}", hex::encode(secret_key.secret_bytes())),
    })
}

/// Get the checksummed Ethereum address of an uncompressed public key
pub fn public_key_to_address(public_key: &[u8; 65]) -> String {
    // Skip the first byte (0x04) and hash the rest
    let key_hash = keccak256(&public_key[1..]);

    // Take the last 20 bytes of the hash
    let mut address = [0u8; 20];
    address.copy_from_slice(&key_hash[12..]);

    to_checksum_address(&address)
}

/// Render 20 address bytes in EIP-55 mixed case
pub fn to_checksum_address(address: &[u8; 20]) -> String {
    let lower = hex::encode(address);
    let hash = keccak256(lower.as_bytes());

    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let nibble = if i % 2 == 0 { hash[i / 2] >> 4 } else { hash[i / 2] & 0x0f };
        if nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Check an Ethereum address string
///
/// All-lowercase and all-uppercase forms are accepted as unchecksummed;
/// mixed case must match the EIP-55 checksum exactly.
pub fn is_valid_address(address: &str) -> bool {
    let Some(body) = address.strip_prefix("0x") else {
        return false;
    };
    if body.len() != 40 {
        return false;
    }

    let mut bytes = [0u8; 20];
    if hex::decode_to_slice(body, &mut bytes).is_err() {
        return false;
    }

    let has_lower = body.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = body.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        return to_checksum_address(&bytes) == address;
    }
    true
}

/// Calculate the Keccak-256 hash of data
fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

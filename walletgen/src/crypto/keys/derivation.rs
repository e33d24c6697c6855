//! Hardened hierarchical key derivation
//!
//! SLIP-10 style derivation where every level is hardened. Both supported
//! chains walk the same routine, keyed by the `ed25519 seed` domain separator.

use std::fmt;
use std::str::FromStr;

use hmac::{Hmac, Mac};
use sha2::Sha512;
use zeroize::{Zeroize, Zeroizing};

use crate::error::{Error, Result};

type HmacSha512 = Hmac<Sha512>;

/// Bit set on every child index of a hardened path
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// BIP-44 purpose level
pub const BIP44_PURPOSE: u32 = 44;

const MASTER_SECRET: &[u8] = b"ed25519 seed";

/// An ordered list of child numbers, hardened bit included
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DerivationPath {
    indices: Vec<u32>,
}

impl DerivationPath {
    /// Build a path from raw child numbers, as they appear on the wire
    pub fn from_child_numbers(indices: Vec<u32>) -> Self {
        Self { indices }
    }

    /// Build an all-hardened path from plain indices
    pub fn hardened(indices: &[u32]) -> Result<Self> {
        let indices = indices
            .iter()
            .map(|&index| {
                if index >= HARDENED_OFFSET {
                    Err(Error::InvalidPath(format!(
                        "index {} does not fit below the hardened offset",
                        index
                    )))
                } else {
                    Ok(index | HARDENED_OFFSET)
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { indices })
    }

    /// `m/44'/coin_type'/account'/0'`
    pub fn bip44_account(coin_type: u32, account: u32) -> Result<Self> {
        Self::hardened(&[BIP44_PURPOSE, coin_type, account, 0])
    }

    pub fn child_numbers(&self) -> &[u32] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for index in &self.indices {
            if index & HARDENED_OFFSET != 0 {
                write!(f, "/{}'", index & !HARDENED_OFFSET)?;
            } else {
                write!(f, "/{}", index)?;
            }
        }
        Ok(())
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    /// Parse a BIP-32 derivation path such as `m/44'/501'/0'/0'`
    fn from_str(path: &str) -> Result<Self> {
        let rest = path
            .strip_prefix("m/")
            .ok_or_else(|| Error::InvalidPath(format!("Invalid derivation path: {}", path)))?;

        let mut indices = Vec::new();
        for component in rest.split('/') {
            let invalid =
                || Error::InvalidPath(format!("Invalid derivation path component: {}", component));

            let (digits, hardened) = match component.strip_suffix(['\'', 'h', 'H']) {
                Some(digits) => (digits, true),
                None => (component, false),
            };
            let index = digits.parse::<u32>().map_err(|_| invalid())?;
            if index >= HARDENED_OFFSET {
                return Err(invalid());
            }

            indices.push(if hardened { index | HARDENED_OFFSET } else { index });
        }

        Ok(Self { indices })
    }
}

/// 32 bytes of derived private key material, zeroized on drop
pub struct KeyMaterial(Zeroizing<[u8; 32]>);

impl KeyMaterial {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(Zeroizing::new(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KeyMaterial(..)")
    }
}

/// Derive the private key material at `path` from a BIP-39 seed
///
/// # Errors
/// [`Error::InvalidPath`] if the path is empty or any level is not hardened.
pub fn derive_key_material(seed: &[u8], path: &DerivationPath) -> Result<KeyMaterial> {
    if path.is_empty() {
        tracing::error!("refusing to derive from an empty path");
        return Err(Error::InvalidPath("empty derivation path".to_string()));
    }
    if let Some(index) = path.child_numbers().iter().find(|&&i| i & HARDENED_OFFSET == 0) {
        tracing::error!(%path, index, "non-hardened level in derivation path");
        return Err(Error::InvalidPath(format!(
            "{}: level {} is not hardened",
            path, index
        )));
    }

    // Derive the master key
    let (mut secret_key, mut chain_code) = derive_master_key(seed)?;

    // Derive the child keys
    for &index in path.child_numbers() {
        let (child_key, child_chain_code) = derive_child_key(&secret_key, &chain_code, index)?;
        secret_key.zeroize();
        chain_code.zeroize();
        secret_key = child_key;
        chain_code = child_chain_code;
    }
    chain_code.zeroize();

    tracing::debug!(%path, "derived key material");
    let material = KeyMaterial::from_bytes(secret_key);
    secret_key.zeroize();
    Ok(material)
}

/// Split an HMAC-SHA512 output into key and chain code halves
fn split_output(mac: HmacSha512) -> ([u8; 32], [u8; 32]) {
    let result = mac.finalize().into_bytes();

    let mut key = [0u8; 32];
    let mut chain_code = [0u8; 32];

    key.copy_from_slice(&result[0..32]);
    chain_code.copy_from_slice(&result[32..64]);

    (key, chain_code)
}

/// Derive the master key from a seed
fn derive_master_key(seed: &[u8]) -> Result<([u8; 32], [u8; 32])> {
    let mut hmac = HmacSha512::new_from_slice(MASTER_SECRET)
        .map_err(|_| Error::InvalidKey("HMAC error".to_string()))?;

    hmac.update(seed);
    Ok(split_output(hmac))
}

/// Derive a hardened child key from a parent key
fn derive_child_key(
    parent_key: &[u8; 32],
    parent_chain_code: &[u8; 32],
    index: u32,
) -> Result<([u8; 32], [u8; 32])> {
    let mut hmac = HmacSha512::new_from_slice(parent_chain_code)
        .map_err(|_| Error::InvalidKey("HMAC error".to_string()))?;

    // 0x00 || key || ser32(index)
    hmac.update(&[0]);
    hmac.update(parent_key);
    hmac.update(&index.to_be_bytes());

    Ok(split_output(hmac))
}

//! Solana key derivation

use ed25519_dalek::SigningKey;
use zeroize::Zeroizing;

use super::derivation::KeyMaterial;
use super::{Chain, ChainKeyAdapter};
use crate::account::SolanaWallet;
use crate::error::Result;

/// Ed25519 adapter producing base-58 Solana keys
#[derive(Debug, Clone, Copy, Default)]
pub struct SolanaAdapter;

impl ChainKeyAdapter for SolanaAdapter {
    type Wallet = SolanaWallet;

    const CHAIN: Chain = Chain::Solana;

    fn derive_wallet(key: &KeyMaterial) -> Result<SolanaWallet> {
        Ok(derive_solana_wallet(key))
    }

    fn public_identifier(wallet: &SolanaWallet) -> &str {
        &wallet.public_key
    }
}

/// Derive a Solana wallet, using the key material as the Ed25519 seed
///
/// Any 32 bytes form a valid Ed25519 seed, so this cannot fail.
pub fn derive_solana_wallet(key: &KeyMaterial) -> SolanaWallet {
    let signing_key = SigningKey::from_bytes(key.as_bytes());
    let verifying_key = signing_key.verifying_key();

    // secret || public, the conventional 64-byte export
    let keypair = Zeroizing::new(signing_key.to_keypair_bytes());

    SolanaWallet {
        public_key: public_key_to_address(verifying_key.as_bytes()),
        private_key: bs58::encode(&keypair[..]).into_string(),
    }
}

/// Get the Solana address from a public key
pub fn public_key_to_address(public_key: &[u8; 32]) -> String {
    bs58::encode(public_key).into_string()
}

/// Check that a string is base-58 and decodes to a 32-byte public key
pub fn is_valid_address(address: &str) -> bool {
    // 32 bytes never need more than 44 base-58 digits
    if address.is_empty() || address.len() > 44 {
        return false;
    }

    match bs58::decode(address).into_vec() {
        Ok(bytes) => bytes.len() == 32,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(hex_key: &str) -> KeyMaterial {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(hex_key, &mut bytes).unwrap();
        KeyMaterial::from_bytes(bytes)
    }

    #[test]
    fn test_known_seed_produces_known_keys() {
        let wallet = derive_solana_wallet(&key(
            "37df573b3ac4ad5b522e064e25b63ea16bcbe79d449e81a0268d1047948bb445",
        ));

        assert_eq!(wallet.public_key, "HAgk14JpMQLgt6rVgv7cBQFJWFto5Dqxi472uT3DKpqk");
        assert_eq!(
            wallet.private_key,
            "27npWoNE4HfmLeQo1TyWcW7NEA28qnsnDK7kcttDQEWrCWnro83HMJ97rMmpvYYZRwDAvG4KRuB7hTBacvwD7bgi"
        );
    }

    #[test]
    fn test_private_key_embeds_seed_and_public_key() {
        let material = key("37df573b3ac4ad5b522e064e25b63ea16bcbe79d449e81a0268d1047948bb445");
        let wallet = derive_solana_wallet(&material);

        let secret = bs58::decode(&wallet.private_key).into_vec().unwrap();
        let public = bs58::decode(&wallet.public_key).into_vec().unwrap();
        assert_eq!(secret.len(), 64);
        assert_eq!(&secret[..32], material.as_bytes());
        assert_eq!(&secret[32..], public.as_slice());
    }

    #[test]
    fn test_is_valid_address() {
        assert!(is_valid_address("HAgk14JpMQLgt6rVgv7cBQFJWFto5Dqxi472uT3DKpqk"));
        assert!(is_valid_address("11111111111111111111111111111111"));

        assert!(!is_valid_address("HAgk14JpMQLgt6rVgv7cBQFJWFto5Dqxi472uT3DKp"));
        assert!(!is_valid_address("0OIl4JpMQLgt6rVgv7cBQFJWFto5Dqxi472uT3DKpqk"));
        assert!(!is_valid_address(""));
    }
}

//! Mnemonic phrase generation and handling

use std::fmt;

use bip39::Mnemonic;
use rand::{rngs::OsRng, RngCore};
use zeroize::{Zeroize, Zeroizing};

use crate::error::{Error, Result};

/// Length in bytes of a BIP-39 seed
pub const SEED_LEN: usize = 64;

/// Supported mnemonic strengths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MnemonicStrength {
    /// 12 words (128 bits)
    #[default]
    Words12,
    /// 24 words (256 bits)
    Words24,
}

impl MnemonicStrength {
    /// Get entropy length in bytes
    fn entropy_bytes(&self) -> usize {
        match self {
            Self::Words12 => 16, // 128 bits = 16 bytes
            Self::Words24 => 32, // 256 bits = 32 bytes
        }
    }

    /// Map a word count onto a strength
    pub fn from_word_count(words: usize) -> Option<Self> {
        match words {
            12 => Some(Self::Words12),
            24 => Some(Self::Words24),
            _ => None,
        }
    }

    /// Number of words a phrase of this strength has
    pub fn word_count(&self) -> usize {
        match self {
            Self::Words12 => 12,
            Self::Words24 => 24,
        }
    }
}

/// A checksum-validated BIP-39 recovery phrase
#[derive(Clone, PartialEq, Eq)]
pub struct RecoveryPhrase {
    inner: Mnemonic,
}

impl RecoveryPhrase {
    /// The space-separated English phrase
    pub fn phrase(&self) -> String {
        self.inner.to_string()
    }

    pub fn word_count(&self) -> usize {
        self.inner.word_count()
    }

    /// Stretch the phrase into a 64-byte seed.
    ///
    /// PBKDF2-HMAC-SHA512 with 2048 rounds and the salt `"mnemonic" + passphrase`.
    pub fn to_seed(&self, passphrase: &str) -> Seed {
        Seed(Zeroizing::new(self.inner.to_seed(passphrase)))
    }
}

// Never print the words themselves through Debug.
impl fmt::Debug for RecoveryPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecoveryPhrase")
            .field("words", &self.word_count())
            .finish_non_exhaustive()
    }
}

/// Binary seed derived from a recovery phrase, zeroized on drop
pub struct Seed(Zeroizing<[u8; SEED_LEN]>);

impl Seed {
    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed(..)")
    }
}

/// Collapse surrounding and repeated whitespace into single spaces
fn normalize(phrase: &str) -> String {
    phrase.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Generate a new random mnemonic phrase with the specified strength
pub fn generate_mnemonic(strength: MnemonicStrength) -> Result<RecoveryPhrase> {
    let mut entropy = vec![0u8; strength.entropy_bytes()];
    OsRng.fill_bytes(&mut entropy);

    let mnemonic = Mnemonic::from_entropy(&entropy)
        .map_err(|e| Error::InvalidMnemonic(e.to_string()));
    entropy.zeroize();

    Ok(RecoveryPhrase { inner: mnemonic? })
}

/// Parse a candidate phrase, reporting why it was rejected
pub fn parse_mnemonic(phrase: &str) -> Result<RecoveryPhrase> {
    let normalized = normalize(phrase);
    if normalized.is_empty() {
        return Err(Error::InvalidMnemonic("empty phrase".to_string()));
    }

    let inner = Mnemonic::parse_normalized(&normalized)
        .map_err(|e| Error::InvalidMnemonic(e.to_string()))?;

    if MnemonicStrength::from_word_count(inner.word_count()).is_none() {
        return Err(Error::InvalidMnemonic(format!(
            "unsupported word count {}, expected 12 or 24",
            inner.word_count()
        )));
    }

    Ok(RecoveryPhrase { inner })
}

/// Validate a mnemonic phrase
///
/// Malformed input yields `false` rather than an error.
pub fn validate_mnemonic(phrase: &str) -> bool {
    parse_mnemonic(phrase).is_ok()
}

/// Generate a seed from a mnemonic phrase and optional passphrase
pub fn mnemonic_to_seed(phrase: &str, passphrase: Option<&str>) -> Result<Seed> {
    let mnemonic = parse_mnemonic(phrase)?;
    Ok(mnemonic.to_seed(passphrase.unwrap_or("")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABANDON: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_generate_mnemonic() {
        let mnemonic = generate_mnemonic(MnemonicStrength::Words12).unwrap();
        assert!(validate_mnemonic(&mnemonic.phrase()));

        let phrase = mnemonic.phrase();
        let words: Vec<&str> = phrase.split_whitespace().collect();
        assert_eq!(words.len(), 12);
    }

    #[test]
    fn test_generate_24_words() {
        let mnemonic = generate_mnemonic(MnemonicStrength::Words24).unwrap();
        assert_eq!(mnemonic.word_count(), 24);
        assert!(validate_mnemonic(&mnemonic.phrase()));
    }

    #[test]
    fn test_generate_never_repeats() {
        let a = generate_mnemonic(MnemonicStrength::Words12).unwrap();
        let b = generate_mnemonic(MnemonicStrength::Words12).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_validate_mnemonic() {
        let invalid = "invalid mnemonic phrase test test test test test test test test test";

        assert!(validate_mnemonic(ABANDON));
        assert!(!validate_mnemonic(invalid));
        assert!(!validate_mnemonic("not a real phrase"));
        assert!(!validate_mnemonic(""));
        assert!(!validate_mnemonic("   "));
    }

    #[test]
    fn test_validate_rejects_bad_checksum() {
        // Every word valid, last word breaks the checksum
        let bad = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon";
        assert!(!validate_mnemonic(bad));
    }

    #[test]
    fn test_single_word_mutation_is_rejected() {
        let words: Vec<&str> = ABANDON.split(' ').collect();
        for position in 0..words.len() {
            let mut mutated = words.clone();
            mutated[position] = "able";
            assert!(
                !validate_mnemonic(&mutated.join(" ")),
                "mutation at {} accepted",
                position
            );
        }
    }

    #[test]
    fn test_validate_rejects_unsupported_length() {
        // Valid 15-word BIP-39 phrase (160 bits of zero entropy)
        let fifteen = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon address";
        assert!(!validate_mnemonic(fifteen));
    }

    #[test]
    fn test_parse_normalizes_whitespace() {
        let padded = format!("  {}  ", ABANDON.replace(' ', "   "));
        let mnemonic = parse_mnemonic(&padded).unwrap();
        assert_eq!(mnemonic.phrase(), ABANDON);
    }

    #[test]
    fn test_mnemonic_to_seed() {
        let seed = mnemonic_to_seed(ABANDON, None).unwrap();

        // Known test vector for this seed
        assert_eq!(seed.as_bytes().len(), SEED_LEN);
        assert_eq!(hex::encode(&seed.as_bytes()[0..8]), "5eb00bbddcf06908");
    }

    #[test]
    fn test_mnemonic_to_seed_with_passphrase() {
        let seed = mnemonic_to_seed(ABANDON, Some("TREZOR")).unwrap();
        assert_eq!(
            hex::encode(seed.as_bytes()),
            "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e53495531f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04"
        );
    }

    #[test]
    fn test_debug_hides_words() {
        let mnemonic = parse_mnemonic(ABANDON).unwrap();
        let rendered = format!("{:?}", mnemonic);
        assert!(!rendered.contains("abandon"));
    }
}

//! Tests for key derivation

use walletgen::account::derive_wallet;
use walletgen::crypto::keys::*;
use walletgen::crypto::mnemonic::*;
use walletgen::ChainWallet;

const ABANDON: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

#[test]
fn test_ethereum_key_derivation() {
    let seed = mnemonic_to_seed(ABANDON, None).unwrap();

    let path: DerivationPath = "m/44'/60'/0'/0'".parse().unwrap();
    let key = derive_key_material(seed.as_bytes(), &path).unwrap();
    let wallet = ethereum::derive_ethereum_wallet(&key).unwrap();

    assert_eq!(wallet.address, "0x2759A6Ad812b8A7B73A63a243816D66F5b72A0A7");
    assert_eq!(
        wallet.private_key,
        "0xbca443f5149618b5dbe6e80b5c096ad4280d5a2e8bc0ce3ebc71c9c0878ba5de"
    );
    assert!(ethereum::is_valid_address(&wallet.address));
}

#[test]
fn test_solana_key_derivation() {
    let seed = mnemonic_to_seed(ABANDON, None).unwrap();

    let path: DerivationPath = "m/44'/501'/0'/0'".parse().unwrap();
    let key = derive_key_material(seed.as_bytes(), &path).unwrap();
    let wallet = solana::derive_solana_wallet(&key);

    assert_eq!(wallet.public_key, "HAgk14JpMQLgt6rVgv7cBQFJWFto5Dqxi472uT3DKpqk");
    assert_eq!(
        wallet.private_key,
        "27npWoNE4HfmLeQo1TyWcW7NEA28qnsnDK7kcttDQEWrCWnro83HMJ97rMmpvYYZRwDAvG4KRuB7hTBacvwD7bgi"
    );
    assert!(solana::is_valid_address(&wallet.public_key));
}

#[test]
fn test_account_indices() {
    let mnemonic = parse_mnemonic(ABANDON).unwrap();

    let expected_eth = [
        "0x2759A6Ad812b8A7B73A63a243816D66F5b72A0A7",
        "0x25e178dcd1fe8eb47F18d6E484c7641341fD27cB",
        "0x12AfCcda020278E30392aFA20014ABbB7ca6F7d7",
    ];
    let expected_sol = [
        "HAgk14JpMQLgt6rVgv7cBQFJWFto5Dqxi472uT3DKpqk",
        "Hh8QwFUA6MtVu1qAoq12ucvFHNwCcVTV7hpWjeY1Hztb",
        "7WktogJEd2wQ9eH2oWusmcoFTgeYi6rS632UviTBJ2jm",
    ];

    for (index, (eth, sol)) in expected_eth.iter().zip(expected_sol.iter()).enumerate() {
        let index = index as u32;
        assert_eq!(
            derive_wallet(Chain::Ethereum, &mnemonic, index).unwrap().public_identifier(),
            *eth
        );
        assert_eq!(
            derive_wallet(Chain::Solana, &mnemonic, index).unwrap().public_identifier(),
            *sol
        );
    }
}

#[test]
fn test_derivation_is_deterministic() {
    let first = parse_mnemonic(ABANDON).unwrap();
    let second = parse_mnemonic(ABANDON).unwrap();

    for chain in Chain::ALL {
        for index in [0, 1, 17] {
            assert_eq!(
                derive_wallet(chain, &first, index).unwrap(),
                derive_wallet(chain, &second, index).unwrap()
            );
        }
    }
}

#[test]
fn test_chains_derive_unrelated_keys() {
    let mnemonic = parse_mnemonic(ABANDON).unwrap();
    let seed = mnemonic.to_seed("");

    let eth = derive_key_material(seed.as_bytes(), &Chain::Ethereum.account_path(0).unwrap()).unwrap();
    let sol = derive_key_material(seed.as_bytes(), &Chain::Solana.account_path(0).unwrap()).unwrap();
    assert_ne!(eth.as_bytes(), sol.as_bytes());

    match derive_wallet(Chain::Solana, &mnemonic, 0).unwrap() {
        ChainWallet::Solana(wallet) => {
            let secret = bs58::decode(&wallet.private_key).into_vec().unwrap();
            assert_eq!(&secret[..32], sol.as_bytes());
            assert_ne!(&secret[..32], eth.as_bytes());
        }
        other => panic!("expected a Solana wallet, got {:?}", other),
    }
}

#[test]
fn test_generated_mnemonics_derive_distinct_wallets() {
    let a = generate_mnemonic(MnemonicStrength::Words12).unwrap();
    let b = generate_mnemonic(MnemonicStrength::Words12).unwrap();

    assert_ne!(
        derive_wallet(Chain::Ethereum, &a, 0).unwrap(),
        derive_wallet(Chain::Ethereum, &b, 0).unwrap()
    );
}

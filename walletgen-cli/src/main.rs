//! walletgen command-line interface
//!
//! Generates, lists and deletes deterministic Ethereum and Solana wallets
//! kept under a local data directory, and looks up their balances.

mod config;
mod rpc;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use walletgen::balance::BalanceSource;
use walletgen::crypto::mnemonic::{validate_mnemonic, MnemonicStrength};
use walletgen::storage::FileStore;
use walletgen::{Chain, ChainWallet, CollectionState, WalletManager};

use config::Config;
use rpc::RpcBalanceSource;

#[derive(Parser)]
#[command(name = "walletgen")]
#[command(about = "Deterministic Ethereum and Solana wallet generator")]
#[command(version = walletgen::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Wallet data directory override
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive the next wallet of a chain
    Generate {
        /// ethereum (eth) or solana (sol)
        chain: Chain,
        /// Recovery phrase to seed an empty collection or resume a stored one
        #[arg(short, long)]
        phrase: Option<String>,
        /// Words in a freshly generated phrase (12 or 24)
        #[arg(short, long)]
        words: Option<usize>,
        /// Number of wallets to derive
        #[arg(short, long, default_value_t = 1)]
        count: usize,
    },
    /// List the stored wallets of a chain
    List {
        chain: Chain,
        /// Also print private keys
        #[arg(long)]
        show_secrets: bool,
    },
    /// Delete one wallet by its 1-based position
    Delete { chain: Chain, position: usize },
    /// Delete every wallet of a chain
    DeleteAll { chain: Chain },
    /// Check whether a phrase is a valid 12 or 24 word mnemonic
    Validate {
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,
    },
    /// Query the balance of an address, or of a stored wallet by position
    Balance { chain: Chain, target: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("walletgen={},walletgen_cli={}", log_level, log_level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::from_env();
    if let Some(dir) = cli.data_dir.clone() {
        config.data_dir = dir;
    }
    debug!("Configuration: {:?}", config);

    match cli.command {
        Commands::Generate { chain, phrase, words, count } => {
            handle_generate(&config, chain, phrase, words, count)?;
        }
        Commands::List { chain, show_secrets } => handle_list(&config, chain, show_secrets)?,
        Commands::Delete { chain, position } => handle_delete(&config, chain, position)?,
        Commands::DeleteAll { chain } => handle_delete_all(&config, chain)?,
        Commands::Validate { words } => handle_validate(&words.join(" ")),
        Commands::Balance { chain, target } => handle_balance(config, chain, &target).await?,
    }

    Ok(())
}

fn open_manager(config: &Config, strength: MnemonicStrength) -> anyhow::Result<WalletManager> {
    let store = FileStore::new(&config.data_dir);
    WalletManager::open_with_strength(Arc::new(store), strength)
        .with_context(|| format!("failed to open wallets in {}", config.data_dir.display()))
}

fn handle_generate(
    config: &Config,
    chain: Chain,
    phrase: Option<String>,
    words: Option<usize>,
    count: usize,
) -> anyhow::Result<Option<String>> {
    let strength = match words {
        Some(words) => match MnemonicStrength::from_word_count(words) {
            Some(strength) => strength,
            None => bail!("unsupported phrase length {}, expected 12 or 24", words),
        },
        None => config.mnemonic_strength,
    };
    let manager = open_manager(config, strength)?;

    // A blank phrase asks for a fresh one, same as no phrase at all
    let phrase = phrase.filter(|p| !p.trim().is_empty());

    let was_empty = manager.state(chain)? == CollectionState::Empty;
    if manager.state(chain)? == CollectionState::Restored && phrase.is_none() {
        bail!(
            "{} wallets exist but their phrase is not kept; pass --phrase to continue",
            chain
        );
    }

    let start = manager.wallets(chain)?.len();
    for offset in 0..count {
        // The phrase only matters for the first derivation of a run
        let input = if offset == 0 { phrase.as_deref() } else { None };
        let wallet = manager.generate_next(chain, input)?;
        info!("Generated {} wallet #{}", chain, start + offset + 1);
        print_wallet(start + offset + 1, &wallet, true);
    }

    if !was_empty || phrase.is_some() {
        return Ok(None);
    }

    let mnemonic = manager.mnemonic(chain)?;
    if let Some(mnemonic) = &mnemonic {
        println!();
        println!("Recovery phrase (write it down, it is not stored):");
        println!("  {}", mnemonic);
    }
    Ok(mnemonic)
}

fn handle_list(config: &Config, chain: Chain, show_secrets: bool) -> anyhow::Result<()> {
    let manager = open_manager(config, config.mnemonic_strength)?;
    let wallets = manager.wallets(chain)?;

    if wallets.is_empty() {
        println!("No {} wallets", chain);
        return Ok(());
    }
    for (position, wallet) in wallets.iter().enumerate() {
        print_wallet(position + 1, wallet, show_secrets);
    }
    Ok(())
}

fn handle_delete(config: &Config, chain: Chain, position: usize) -> anyhow::Result<()> {
    if position == 0 {
        bail!("positions start at 1");
    }
    let manager = open_manager(config, config.mnemonic_strength)?;
    let removed = manager.delete_at(chain, position - 1)?;

    println!("Deleted {} wallet #{}: {}", chain, position, removed.public_identifier());
    if manager.state(chain)? == CollectionState::Empty {
        warn!("{} collection is now empty; its phrase has been forgotten", chain);
    }
    Ok(())
}

fn handle_delete_all(config: &Config, chain: Chain) -> anyhow::Result<()> {
    let manager = open_manager(config, config.mnemonic_strength)?;
    let count = manager.wallets(chain)?.len();
    manager.delete_all(chain)?;

    println!("Deleted {} {} wallet(s)", count, chain);
    Ok(())
}

fn handle_validate(phrase: &str) {
    if validate_mnemonic(phrase) {
        println!("valid");
    } else {
        println!("invalid");
    }
}

async fn handle_balance(config: Config, chain: Chain, target: &str) -> anyhow::Result<()> {
    let identifier = match target.parse::<usize>() {
        Ok(position) => {
            let manager = open_manager(&config, config.mnemonic_strength)?;
            let wallets = manager.wallets(chain)?;
            match position.checked_sub(1).and_then(|i| wallets.get(i)) {
                Some(wallet) => wallet.public_identifier().to_string(),
                None => bail!("no {} wallet at position {}", chain, position),
            }
        }
        Err(_) => target.to_string(),
    };

    let source = RpcBalanceSource::new(config)?;
    let balance = source.balance(chain, &identifier).await?;
    println!("{}: {}", identifier, balance);
    Ok(())
}

fn print_wallet(position: usize, wallet: &ChainWallet, show_secret: bool) {
    println!("#{} {}", position, wallet.public_identifier());
    if show_secret {
        println!("   private key: {}", wallet.private_key());
    }
}

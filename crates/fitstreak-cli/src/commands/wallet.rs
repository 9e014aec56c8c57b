use clap::Subcommand;
use fitstreak_core::{Config, WalletAddress};
use serde_json::json;

use super::{print_json, CmdResult};

#[derive(Subcommand)]
pub enum WalletAction {
    /// Connect a wallet address (0x + 40 hex digits)
    Connect {
        address: String,
    },
    /// Show the connected wallet
    Show,
    /// Forget the connected wallet
    Disconnect,
}

pub fn run(action: WalletAction) -> CmdResult {
    let mut config = Config::load()?;

    match action {
        WalletAction::Connect { address } => {
            let wallet = WalletAddress::parse(&address)?;
            config.connect_wallet(&wallet);
            config.save()?;
            tracing::info!(wallet = %wallet, "wallet connected");
            print_json(&json!({
                "walletAddress": wallet,
                "short": wallet.short(),
            }))?;
        }
        WalletAction::Show => match config.connected_wallet()? {
            Some(wallet) => print_json(&json!({
                "walletAddress": wallet,
                "short": wallet.short(),
            }))?,
            None => println!("no wallet connected"),
        },
        WalletAction::Disconnect => {
            config.disconnect_wallet();
            config.save()?;
            println!("wallet disconnected");
        }
    }
    Ok(())
}

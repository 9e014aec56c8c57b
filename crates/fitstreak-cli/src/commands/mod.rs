pub mod badge;
pub mod config;
pub mod streak;
pub mod wallet;
pub mod workout;

use fitstreak_core::{Clock, Config, FixedClock, LogDate, SystemClock, WalletAddress};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// `--wallet` if given, otherwise the connected wallet.
pub fn resolve_wallet(
    config: &Config,
    flag: Option<&str>,
) -> Result<WalletAddress, Box<dyn std::error::Error>> {
    if let Some(raw) = flag {
        return Ok(WalletAddress::parse(raw)?);
    }
    config
        .connected_wallet()?
        .ok_or_else(|| "no wallet connected; run `fitstreak wallet connect <address>` or pass --wallet".into())
}

/// Clock for a command, frozen at `as_of` when given.
pub fn clock(as_of: Option<&str>) -> Result<Box<dyn Clock>, Box<dyn std::error::Error>> {
    Ok(match as_of {
        Some(raw) => Box::new(FixedClock::at_date(LogDate::parse(raw)?)),
        None => Box::new(SystemClock),
    })
}

pub fn print_json<T: serde::Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

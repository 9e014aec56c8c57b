//! Milestone badges.
//!
//! Minting happens on-chain through the user's wallet; this module only
//! models what the app needs around it: the token URI per milestone, the
//! progress of a mint attempt, and the local record of confirmed mints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::streak::{StreakResult, STREAK_MILESTONES};
use crate::workout::WalletAddress;

/// Metadata URI passed to the badge contract for `milestone`.
pub fn token_uri(milestone: u32) -> String {
    format!("ipfs://badge-{milestone}-metadata.json")
}

/// Stages of a mint attempt, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MintStep {
    Idle,
    Preparing,
    AwaitingSignature,
    Confirming,
    Minted,
    Error,
}

/// How a stage renders relative to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepState {
    Pending,
    Active,
    Done,
}

impl MintStep {
    /// The stages shown to the user; `Idle` and `Error` are not among them.
    pub const PROGRESS: [MintStep; 4] = [
        MintStep::Preparing,
        MintStep::AwaitingSignature,
        MintStep::Confirming,
        MintStep::Minted,
    ];

    fn position(self) -> Option<usize> {
        Self::PROGRESS.iter().position(|&s| s == self)
    }

    /// A wallet or chain round-trip is in flight.
    pub fn is_busy(self) -> bool {
        matches!(
            self,
            MintStep::Preparing | MintStep::AwaitingSignature | MintStep::Confirming
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            MintStep::Idle => "Idle",
            MintStep::Preparing => "Prepare",
            MintStep::AwaitingSignature => "Sign",
            MintStep::Confirming => "Confirm",
            MintStep::Minted => "Minted",
            MintStep::Error => "Error",
        }
    }
}

/// State of `step` while the attempt is at `current`.
///
/// An errored attempt shows every stage as pending.
pub fn step_state(current: MintStep, step: MintStep) -> StepState {
    if current == MintStep::Error {
        return StepState::Pending;
    }
    // Idle sits before every progress stage
    let current_idx = current.position().map_or(-1, |i| i as i64);
    let step_idx = step.position().map_or(-1, |i| i as i64);
    if current_idx > step_idx {
        StepState::Done
    } else if current_idx == step_idx {
        StepState::Active
    } else {
        StepState::Pending
    }
}

/// One row of the mint progress display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepView {
    pub step: MintStep,
    pub label: &'static str,
    pub state: StepState,
}

/// Progress rows for an attempt currently at `current`.
pub fn progress(current: MintStep) -> Vec<StepView> {
    MintStep::PROGRESS
        .iter()
        .map(|&step| StepView {
            step,
            label: step.label(),
            state: step_state(current, step),
        })
        .collect()
}

/// A confirmed on-chain mint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeMint {
    pub wallet_address: WalletAddress,
    pub milestone: u32,
    pub token_uri: String,
    pub tx_hash: String,
    pub minted_at: DateTime<Utc>,
}

/// Whether a wallet can mint a badge right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeStatus {
    pub wallet_address: WalletAddress,
    pub streak_days: u32,
    pub eligible_milestone: Option<u32>,
    pub already_minted: bool,
    pub token_uri: Option<String>,
    pub next_milestone: Option<u32>,
    pub can_mint: bool,
    pub mint_step: MintStep,
    pub steps: Vec<StepView>,
}

impl BadgeStatus {
    pub fn new(wallet: WalletAddress, streak: StreakResult, already_minted: bool) -> Self {
        let eligible = streak.eligible_milestone;
        let mint_step = if already_minted {
            MintStep::Minted
        } else {
            MintStep::Idle
        };
        Self {
            wallet_address: wallet,
            streak_days: streak.streak_days,
            eligible_milestone: eligible,
            already_minted,
            token_uri: eligible.map(token_uri),
            next_milestone: STREAK_MILESTONES.next_after(streak.streak_days),
            can_mint: eligible.is_some() && !already_minted,
            mint_step,
            steps: progress(mint_step),
        }
    }
}

/// Transaction page on the block explorer.
pub fn explorer_tx_url(explorer_url: &str, tx_hash: &str) -> String {
    format!("{}/tx/{}", explorer_url.trim_end_matches('/'), tx_hash)
}

/// `0x` + 64 hex digits.
pub fn is_tx_hash(value: &str) -> bool {
    value.len() == 66
        && value.starts_with("0x")
        && value[2..].chars().all(|c| c.is_ascii_hexdigit())
}

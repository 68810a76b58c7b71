//! Core type aliases and tuning constants for bluffbid.
//!
//! This crate provides the foundational types and configuration parameters
//! used throughout the bluffbid workspace.
#![allow(dead_code)]

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Balances, deposits, and bids in abstract integer units.
pub type Chips = u32;
/// One-based round number within a match.
pub type Round = u8;
/// Ledger-assigned match identifier.
pub type MatchId = u64;
/// Expected values and heuristic scores.
pub type Utility = f64;
/// Sampling distributions over opponent bids.
pub type Probability = f64;

// ============================================================================
// MATCH PARAMETERS
// ============================================================================
/// Rounds per match.
pub const ROUNDS: Round = 5;
/// Starting balance each player deposits.
pub const DEPOSIT: Chips = 20;
/// Largest bid accepted in a single round.
pub const MAX_BID: Chips = 5;
/// Granularity of legal bids (0, STEP, 2·STEP, ...).
pub const BID_STEP: Chips = 1;

// ============================================================================
// MONTE CARLO SEARCH
// Expected utility per candidate bid, estimated against a smoothed
// frequency model of the opponent's revealed bids.
// ============================================================================
/// Trials per candidate bid.
pub const SIMULATIONS: usize = 100;
/// Pseudocount assigned to every legal bid before observations (Laplace).
pub const LAPLACE_PRIOR: Probability = 1.0;
/// Reward for leading on round wins after the simulated round.
pub const UTILITY_AHEAD: Utility = 100.0;
/// Reward for being level on round wins after the simulated round.
pub const UTILITY_LEVEL: Utility = 50.0;
/// Bonus for taking the simulated round outright.
pub const UTILITY_ROUND: Utility = 20.0;
/// Weight on each unit of balance left after the simulated round.
pub const UTILITY_CONSERVATION: Utility = 2.0;

// ============================================================================
// EXTERNAL DECISIONS
// ============================================================================
/// Upper bound on a single reasoning-oracle round trip.
pub const ORACLE_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);
/// Poll interval for terminal players watching the pending registry.
pub const PENDING_POLL: std::time::Duration = std::time::Duration::from_millis(250);

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

/// Register Ctrl+C handler for immediate (non-graceful) termination.
/// Pending external decisions are not drained; the ledger keeps its last state.
#[cfg(feature = "server")]
pub fn kys() {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!();
            log::warn!("violent interrupt received, exiting immediately");
            std::process::exit(0);
        }
    });
}

/// Parse an environment variable, ignoring absent or malformed values.
pub fn env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .inspect(|_| log::debug!("[config] {} overridden from environment", key))
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn defaults_fit_together() {
        assert!(MAX_BID <= DEPOSIT);
        assert_eq!(MAX_BID % BID_STEP, 0);
        assert!(ROUNDS > 0);
    }
    #[test]
    fn missing_env_is_none() {
        assert_eq!(env::<u32>("BLUFF_SURELY_NOT_SET_ANYWHERE"), None);
    }
}

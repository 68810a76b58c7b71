use bluff_auction::Rules;
use bluff_core::*;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Sealed-bid duels between named strategies")]
pub struct Args {
    /// Strategy in slot A (creates the match)
    #[arg(short, long, default_value = "montecarlo")]
    pub a: String,
    /// Strategy in slot B (joins the match)
    #[arg(short, long, default_value = "aggressive")]
    pub b: String,
    /// Rounds per match
    #[arg(long)]
    pub rounds: Option<Round>,
    /// Starting balance per player
    #[arg(long)]
    pub deposit: Option<Chips>,
    /// Largest bid per round
    #[arg(long)]
    pub max_bid: Option<Chips>,
    /// Bid granularity
    #[arg(long)]
    pub step: Option<Chips>,
    /// Seed for simulation players
    #[arg(long)]
    pub seed: Option<u64>,
    /// Matches to run concurrently
    #[arg(short, long, default_value_t = 1)]
    pub matches: usize,
    /// Print each match as JSON
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// Environment defaults, then command-line overrides.
    pub fn rules(&self) -> anyhow::Result<Rules> {
        let base = Rules::from_env();
        let rules = Rules {
            rounds: self.rounds.unwrap_or(base.rounds),
            deposit: self.deposit.unwrap_or(base.deposit),
            max_bid: self.max_bid.unwrap_or(base.max_bid),
            step: self.step.unwrap_or(base.step),
        };
        rules.validate().map_err(anyhow::Error::msg)?;
        Ok(rules)
    }
}

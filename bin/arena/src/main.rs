//! Arena Binary
//!
//! Runs one or more matches between named strategies on an in-memory
//! ledger. Any `external` slot is played from the terminal.
mod args;
mod terminal;

use args::Args;
use bluff_gameroom::MemoryLedger;
use bluff_gameroom::Registry;
use bluff_hosting::Arena;
use bluff_players::Roster;
use clap::Parser;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bluff_core::log();
    bluff_core::kys();
    let args = Args::parse();
    let rules = args.rules()?;
    let roster = match args.seed {
        Some(seed) => Roster::new(Registry::default()).with_seed(seed),
        None => Roster::new(Registry::default()),
    };
    let ledger = Arc::new(MemoryLedger::new(rules));
    let arena = Arc::new(Arena::new(ledger, rules, roster));
    let mut ids = Vec::with_capacity(args.matches);
    for _ in 0..args.matches {
        ids.push(arena.start(&args.a, &args.b).await?);
    }
    let interactive = Roster::is_external(&args.a) || Roster::is_external(&args.b);
    for id in ids {
        let result = match interactive {
            true => terminal::drive(&arena, id).await?,
            false => arena.finish(id).await?,
        };
        match args.json {
            true => println!("{}", arena.report(id).await?),
            false => {
                for record in result.rounds() {
                    println!("#{} {}", id, record);
                }
                println!("#{} {} vs {}: {}", id, args.a, args.b, result);
            }
        }
    }
    Ok(())
}

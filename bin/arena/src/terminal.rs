//! Terminal front end for `external` slots.
use bluff_auction::*;
use bluff_core::*;
use bluff_hosting::Arena;
use dialoguer::Input;

/// Polls the arena for pending decisions and answers them from stdin
/// until the match ends.
pub async fn drive(arena: &Arena, id: MatchId) -> anyhow::Result<MatchResult> {
    loop {
        tokio::select! {
            result = arena.finish(id) => return result,
            _ = tokio::time::sleep(PENDING_POLL) => {
                for (slot, view) in arena.pending(id) {
                    let bid = tokio::task::spawn_blocking(move || ask(id, slot, &view)).await??;
                    match arena.submit(id, slot, bid, "entered at terminal") {
                        Ok(()) => log::debug!("[terminal] #{} {} bid {}", id, slot, bid),
                        Err(e) => eprintln!("rejected: {}", e),
                    }
                }
            }
        }
    }
}

fn ask(id: MatchId, slot: Slot, view: &AgentView) -> anyhow::Result<Chips> {
    println!("\nmatch #{} seat {}\n{}", id, slot, view);
    let input = Input::<String>::new()
        .with_prompt(format!("bid [0-{}]", view.ceiling()))
        .validate_with(|i: &String| -> Result<(), String> {
            i.trim()
                .parse::<Chips>()
                .map(|_| ())
                .map_err(|_| String::from("enter a non-negative integer"))
        })
        .report(false)
        .interact_text()?;
    Ok(input.trim().parse::<Chips>()?)
}

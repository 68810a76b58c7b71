use super::*;
use bluff_auction::*;
use bluff_core::*;
use bluff_gameroom::*;
use std::sync::Arc;
use std::time::Duration;

/// Player that asks a reasoning [`Oracle`] for each bid.
///
/// Any failure (timeout, transport error, unparseable reply) is logged and
/// replaced by [`ModelBacked::fallback`], so `decide` never fails.
pub struct ModelBacked {
    oracle: Arc<dyn Oracle>,
    persona: Persona,
    timeout: Duration,
}

impl ModelBacked {
    pub fn new(oracle: Arc<dyn Oracle>, persona: Persona) -> Self {
        Self {
            oracle,
            persona,
            timeout: ORACLE_TIMEOUT,
        }
    }
    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }
    pub fn persona(&self) -> Persona {
        self.persona
    }
    /// Deterministic heuristic: nothing once the match is decided, a push
    /// late in the match when behind, a moderate bid otherwise.
    pub fn fallback(view: &AgentView) -> Decision {
        let rules = view.rules();
        let late = view.round() + 1 >= rules.rounds;
        let (bid, reason) = if view.is_decided() {
            (0, "match decided, conserving")
        } else if late && view.is_behind() {
            (rules.fraction(4, 5), "late and behind, pushing")
        } else {
            (rules.fraction(2, 5), "moderate default")
        };
        Decision::new(view.clamp(bid), format!("[fallback] {}", reason))
    }
    async fn consult(&self, view: &AgentView) -> Result<Decision, OracleError> {
        let prompt = Prompt::new(self.persona, view.clone());
        let text = tokio::time::timeout(self.timeout, self.oracle.query(&prompt))
            .await
            .map_err(|_| OracleError::Timeout)??;
        Reply::parse(&text)?.decision(view)
    }
}

#[async_trait::async_trait]
impl Strategy for ModelBacked {
    fn name(&self) -> &str {
        "model"
    }
    async fn decide(&mut self, view: &AgentView) -> Decision {
        match self.consult(view).await {
            Ok(decision) => decision,
            Err(e) => {
                log::warn!("[model] {} persona falling back: {}", self.persona, e);
                Self::fallback(view)
            }
        }
    }
}

use bluff_auction::*;
use bluff_core::*;
use serde::Deserialize;

/// A remote reasoning service that answers a bidding prompt with text.
///
/// Implementations own their transport and credentials. The reply is
/// expected to contain a JSON object `{"bid": <number>, "reason": "..."}`,
/// possibly surrounded by other text.
#[async_trait::async_trait]
pub trait Oracle: Send + Sync {
    async fn query(&self, prompt: &Prompt) -> Result<String, OracleError>;
}

/// Oracle for environments with no binding configured. Every query fails,
/// so callers always take their fallback.
#[derive(Debug, Default, Clone, Copy)]
pub struct Offline;

#[async_trait::async_trait]
impl Oracle for Offline {
    async fn query(&self, _prompt: &Prompt) -> Result<String, OracleError> {
        Err(OracleError::Unavailable(String::from("no oracle configured")))
    }
}

/// Playing style requested from the oracle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Persona {
    Aggressive,
    Conservative,
    #[default]
    Adaptive,
}

impl Persona {
    pub fn directive(&self) -> &'static str {
        match self {
            Self::Aggressive => {
                "Play to dominate. Bid high early, punish passive opponents, and never let a deficit stand."
            }
            Self::Conservative => {
                "Play to outlast. Spend little early, let the opponent drain their balance, and strike late."
            }
            Self::Adaptive => {
                "Read the opponent. Track their revealed bids and balance, then outbid or undercut as the pattern suggests."
            }
        }
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Aggressive => write!(f, "aggressive"),
            Self::Conservative => write!(f, "conservative"),
            Self::Adaptive => write!(f, "adaptive"),
        }
    }
}

impl TryFrom<&str> for Persona {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.to_ascii_lowercase().as_str() {
            "aggressive" => Ok(Self::Aggressive),
            "conservative" => Ok(Self::Conservative),
            "adaptive" => Ok(Self::Adaptive),
            other => Err(format!("unknown persona: {}", other)),
        }
    }
}

/// Everything an oracle is told about one decision.
#[derive(Debug, Clone)]
pub struct Prompt {
    persona: Persona,
    view: AgentView,
}

impl Prompt {
    pub fn new(persona: Persona, view: AgentView) -> Self {
        Self { persona, view }
    }
    pub fn persona(&self) -> Persona {
        self.persona
    }
    pub fn view(&self) -> &AgentView {
        &self.view
    }
    /// Standing instructions: rules, persona, and reply format.
    pub fn system(&self) -> String {
        let rules = self.view.rules();
        format!(
            "You are playing BluffBid, a sealed-bid duel.\n\
             - A match has {} rounds and each player starts with {}.\n\
             - Each round both players secretly bid between 0 and {} in steps of {}.\n\
             - Both players always pay their bid, win or lose.\n\
             - The higher bid takes the round; equal bids take nothing.\n\
             - Most round wins takes the match; equal wins fall to the higher balance.\n\
             - You cannot bid more than you hold.\n\
             {}\n\
             Reply with only a JSON object: {{\"bid\": <number>, \"reason\": \"<short explanation>\"}}",
            rules.rounds,
            rules.deposit,
            rules.max_bid,
            rules.step,
            self.persona.directive()
        )
    }
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.view)?;
        write!(f, "What is your bid for round {}?", self.view.round())
    }
}

/// Parsed oracle answer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Reply {
    bid: f64,
    #[serde(default)]
    reason: Option<String>,
}

impl Reply {
    /// Parse the outermost `{...}` span of `text`.
    pub fn parse(text: &str) -> Result<Self, OracleError> {
        let start = text.find('{');
        let end = text.rfind('}');
        match (start, end) {
            (Some(start), Some(end)) if start < end => serde_json::from_str(&text[start..=end])
                .map_err(|e| OracleError::Malformed(e.to_string())),
            _ => Err(OracleError::Malformed(format!("no JSON object in {:?}", text))),
        }
    }
    /// Floor and clamp the bid into the view's legal range.
    pub fn decision(self, view: &AgentView) -> Result<Decision, OracleError> {
        if !self.bid.is_finite() {
            return Err(OracleError::Malformed(format!("bid {} is not a number", self.bid)));
        }
        let bid = view.clamp(self.bid.max(0.).floor() as Chips);
        let reason = self.reason.unwrap_or_else(|| String::from("oracle decision"));
        Ok(Decision::new(bid, reason))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    /// No answer within the allotted time.
    Timeout,
    /// Answer did not contain a usable bid.
    Malformed(String),
    /// Transport, credential, or service failure.
    Unavailable(String),
}

impl std::fmt::Display for OracleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout => write!(f, "oracle timed out"),
            Self::Malformed(detail) => write!(f, "oracle reply malformed: {}", detail),
            Self::Unavailable(detail) => write!(f, "oracle unavailable: {}", detail),
        }
    }
}

impl std::error::Error for OracleError {}

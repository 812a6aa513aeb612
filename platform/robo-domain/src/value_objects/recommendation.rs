use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    SteadyRiseNoBuy,
    DeclineReversalBuy,
    SteadyDeclineNoBuy,
    Buy,
    NoBuy,
}

impl Outcome {
    pub fn label(self) -> &'static str {
        match self {
            Outcome::SteadyRiseNoBuy => "STEADY_RISE_NO_BUY",
            Outcome::DeclineReversalBuy => "DECLINE_REVERSAL_BUY",
            Outcome::SteadyDeclineNoBuy => "STEADY_DECLINE_NO_BUY",
            Outcome::Buy => "BUY",
            Outcome::NoBuy => "NO_BUY",
        }
    }

    pub fn rationale(self, symbol: &str) -> String {
        match self {
            Outcome::SteadyRiseNoBuy => format!("{symbol} IS ON A STEADY RISE. DO NOT BUY!"),
            Outcome::DeclineReversalBuy => {
                format!("{symbol} IS ON A STEADY DECLINE, BUT THIS CAN TURN. BUY!")
            }
            Outcome::SteadyDeclineNoBuy => format!("{symbol} IS ON A STEADY DECLINE. DO NOT BUY!"),
            Outcome::Buy => "BUY!".to_string(),
            Outcome::NoBuy => "DON'T BUY!".to_string(),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub outcome: Outcome,
    pub rationale: String,
}

impl Recommendation {
    pub fn new(outcome: Outcome, symbol: &str) -> Self {
        Self {
            outcome,
            rationale: outcome.rationale(symbol),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rationale_names_symbol_for_trend_outcomes() {
        let rec = Recommendation::new(Outcome::DeclineReversalBuy, "NFLX");
        assert_eq!(
            rec.rationale,
            "NFLX IS ON A STEADY DECLINE, BUT THIS CAN TURN. BUY!"
        );
        assert_eq!(Outcome::NoBuy.rationale("NFLX"), "DON'T BUY!");
    }
}

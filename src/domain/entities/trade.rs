use std::fmt;

use serde::{Deserialize, Serialize};

/// Buy/sell verb attached to a calculated trade. The API documents BUY and
/// SELL but is not exhaustive, so unknown verbs are carried through as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TradeAction {
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "SELL")]
    Sell,
    #[serde(untagged)]
    Other(String),
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeAction::Buy => write!(f, "BUY"),
            TradeAction::Sell => write!(f, "SELL"),
            TradeAction::Other(verb) => write!(f, "{}", verb),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniversalSymbol {
    pub symbol: String,
    pub currency: Currency,
}

/// A single recommendation produced by the remote rebalancing engine.
/// Read-only on this side; it is logged before submission, never modified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatedTrade {
    pub action: TradeAction,
    pub units: f64,
    pub price: f64,
    pub universal_symbol: UniversalSymbol,
}

/// The `calculated_trades` envelope nested in `GET /portfolioGroups/{id}/info`.
/// `id` is the trade-batch identifier submitted as a unit to `placeOrders`.
#[derive(Debug, Clone, Deserialize)]
pub struct CalculatedTrades {
    pub id: String,
    pub trades: Vec<CalculatedTrade>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PortfolioInfo {
    pub calculated_trades: CalculatedTrades,
}

/// Symbol shape used in `placeOrders` responses, where Passiv omits fields
/// freely.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecutionSymbol {
    pub symbol: Option<String>,
    pub currency: Option<Currency>,
}

/// One element of the `placeOrders` response. Every field may be absent, so
/// all of them are optional; the accessors below substitute placeholders for
/// logging.
#[derive(Debug, Clone, Deserialize)]
pub struct TradeExecution {
    pub state: Option<String>,
    pub action: Option<String>,
    pub filled_units: Option<f64>,
    pub price: Option<f64>,
    pub commissions: Option<f64>,
    pub universal_symbol: Option<ExecutionSymbol>,
}

impl TradeExecution {
    pub fn state(&self) -> &str {
        self.state.as_deref().unwrap_or("?")
    }

    pub fn action(&self) -> &str {
        self.action.as_deref().unwrap_or("?")
    }

    pub fn symbol(&self) -> &str {
        self.universal_symbol
            .as_ref()
            .and_then(|s| s.symbol.as_deref())
            .unwrap_or("?")
    }

    pub fn currency_code(&self) -> &str {
        self.universal_symbol
            .as_ref()
            .and_then(|s| s.currency.as_ref())
            .map(|c| c.code.as_str())
            .unwrap_or("?")
    }

    pub fn filled_units(&self) -> f64 {
        self.filled_units.unwrap_or(0.0)
    }

    pub fn price(&self) -> f64 {
        self.price.unwrap_or(0.0)
    }

    pub fn commission(&self) -> f64 {
        self.commissions.unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculated_trade_deserialization() {
        let json = r#"{
            "action": "BUY",
            "units": 2,
            "price": 151.25,
            "universal_symbol": {
                "symbol": "VTI",
                "currency": {"code": "USD"}
            }
        }"#;

        let trade: CalculatedTrade = serde_json::from_str(json).unwrap();
        assert_eq!(trade.action, TradeAction::Buy);
        assert_eq!(trade.units, 2.0);
        assert_eq!(trade.price, 151.25);
        assert_eq!(trade.universal_symbol.symbol, "VTI");
        assert_eq!(trade.universal_symbol.currency.code, "USD");
    }

    #[test]
    fn test_unknown_trade_action_is_preserved() {
        let trade: CalculatedTrade = serde_json::from_str(
            r#"{
                "action": "SELL_ALL",
                "units": 1,
                "price": 10.0,
                "universal_symbol": {"symbol": "X", "currency": {"code": "CAD"}}
            }"#,
        )
        .unwrap();
        assert_eq!(trade.action, TradeAction::Other("SELL_ALL".to_string()));
        assert_eq!(trade.action.to_string(), "SELL_ALL");
    }

    #[test]
    fn test_portfolio_info_envelope() {
        let json = r#"{
            "calculated_trades": {
                "id": "batch-42",
                "trades": [],
                "last_calculated": "2021-04-15"
            },
            "accuracy": 99.1
        }"#;

        let info: PortfolioInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.calculated_trades.id, "batch-42");
        assert!(info.calculated_trades.trades.is_empty());
    }

    #[test]
    fn test_trade_execution_with_all_fields() {
        let json = r#"{
            "state": "EXECUTED",
            "action": "BUY",
            "filled_units": 2.0,
            "price": 151.25,
            "commissions": 0.0,
            "universal_symbol": {"symbol": "VTI", "currency": {"code": "USD"}}
        }"#;

        let execution: TradeExecution = serde_json::from_str(json).unwrap();
        assert_eq!(execution.state(), "EXECUTED");
        assert_eq!(execution.action(), "BUY");
        assert_eq!(execution.filled_units(), 2.0);
        assert_eq!(execution.symbol(), "VTI");
        assert_eq!(execution.currency_code(), "USD");
        assert_eq!(execution.commission(), 0.0);
    }

    #[test]
    fn test_trade_execution_with_absent_fields() {
        let execution: TradeExecution = serde_json::from_str("{}").unwrap();
        assert_eq!(execution.state(), "?");
        assert_eq!(execution.action(), "?");
        assert_eq!(execution.symbol(), "?");
        assert_eq!(execution.currency_code(), "?");
        assert_eq!(execution.filled_units(), 0.0);
        assert_eq!(execution.price(), 0.0);
        assert_eq!(execution.commission(), 0.0);
    }

    #[test]
    fn test_trade_execution_with_partial_symbol() {
        let execution: TradeExecution =
            serde_json::from_str(r#"{"universal_symbol": {"symbol": "VTI"}}"#).unwrap();
        assert_eq!(execution.symbol(), "VTI");
        assert_eq!(execution.currency_code(), "?");
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a trade instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operation {
    #[serde(alias = "B", alias = "buy")]
    Buy,
    #[serde(alias = "S", alias = "sell")]
    Sell,
}

impl Operation {
    /// Both operations, in declaration order.
    pub const ALL: [Operation; 2] = [Operation::Buy, Operation::Sell];

    /// Directional label of the operation: money leaves on a buy and
    /// arrives on a sell.
    pub fn label(self) -> &'static str {
        match self {
            Operation::Buy => "Outgoing",
            Operation::Sell => "Incoming",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(Operation::Buy.label(), "Outgoing");
        assert_eq!(Operation::Sell.label(), "Incoming");
        assert_eq!(Operation::Sell.to_string(), "Incoming");
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(serde_json::to_string(&Operation::Buy).unwrap(), "\"BUY\"");
        let sell: Operation = serde_json::from_str("\"S\"").unwrap();
        assert_eq!(sell, Operation::Sell);
    }
}

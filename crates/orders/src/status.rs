use core::str::FromStr;

use serde::{Deserialize, Serialize};

use beltline_core::DomainError;

/// Order status lifecycle.
///
/// `Ordered` is set at creation. The admin workflow may move an order to
/// any other recognized status; unknown strings are rejected at the
/// boundary instead of being stored verbatim. No forward-only ordering is
/// enforced between recognized values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Ordered,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Ordered,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Ordered => "ordered",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ordered" => Ok(OrderStatus::Ordered),
            "processing" => Ok(OrderStatus::Processing),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(DomainError::validation(format!(
                "unknown order status '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_status_round_trips_through_its_string_form() {
        for status in OrderStatus::ALL {
            let parsed: OrderStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn unknown_status_strings_are_rejected() {
        let err = "teleported".parse::<OrderStatus>().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&OrderStatus::Shipped).unwrap();
        assert_eq!(json, "\"shipped\"");
    }
}

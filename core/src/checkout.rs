use chrono::{DateTime, Duration, Local};
use serde::Serialize;

use crate::models::{GUEST_NAME, Totals, UserProfile};

pub const ETA_MIN_MINUTES: i64 = 25;
pub const ETA_MAX_MINUTES: i64 = 35;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CheckoutDecision {
    EmptyCart,
    OverBudget { overage: f64 },
    Accepted,
}

/// Decide whether the current cart may be ordered. Never mutates anything.
#[must_use]
pub fn evaluate(totals: &Totals, profile: Option<&UserProfile>) -> CheckoutDecision {
    if totals.items == 0 {
        return CheckoutDecision::EmptyCart;
    }
    match profile {
        Some(p) if totals.price > p.budget => CheckoutDecision::OverBudget {
            overage: totals.price - p.budget,
        },
        _ => CheckoutDecision::Accepted,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FulfillmentWindow {
    pub min_minutes: i64,
    pub max_minutes: i64,
    pub ready_from: String,
    pub ready_by: String,
}

impl FulfillmentWindow {
    #[must_use]
    pub fn starting_at(now: DateTime<Local>) -> Self {
        Self {
            min_minutes: ETA_MIN_MINUTES,
            max_minutes: ETA_MAX_MINUTES,
            ready_from: (now + Duration::minutes(ETA_MIN_MINUTES)).to_rfc3339(),
            ready_by: (now + Duration::minutes(ETA_MAX_MINUTES)).to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckoutResult {
    pub accepted: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eta: Option<FulfillmentWindow>,
}

impl CheckoutResult {
    #[must_use]
    pub fn empty_cart() -> Self {
        Self {
            accepted: false,
            message: "Please add at least one meal before checkout.".to_string(),
            overage: None,
            eta: None,
        }
    }

    #[must_use]
    pub fn over_budget(overage: f64) -> Self {
        Self {
            accepted: false,
            message: format!("Cart exceeds your budget by ${overage:.2}. Adjust items."),
            overage: Some(overage),
            eta: None,
        }
    }

    #[must_use]
    pub fn accepted(profile: Option<&UserProfile>, eta: FulfillmentWindow) -> Self {
        let customer = profile.map_or(GUEST_NAME, |p| p.display_name());
        Self {
            accepted: true,
            message: format!(
                "Order placed for {customer}! ETA: {}-{} mins.",
                eta.min_minutes, eta.max_minutes
            ),
            overage: None,
            eta: Some(eta),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Activity, Goal};

    fn profile_with_budget(budget: f64) -> UserProfile {
        UserProfile {
            name: "Ada".to_string(),
            age: 31,
            weight: 70.0,
            height: 175.0,
            goal: Goal::Maintenance,
            activity: Activity::Moderate,
            budget,
            calories: 2100,
        }
    }

    fn totals(items: u64, price: f64) -> Totals {
        Totals {
            items,
            price,
            calories: 0,
        }
    }

    #[test]
    fn test_empty_cart_rejected_even_with_profile() {
        let p = profile_with_budget(0.0);
        assert_eq!(evaluate(&totals(0, 0.0), Some(&p)), CheckoutDecision::EmptyCart);
        assert_eq!(evaluate(&totals(0, 0.0), None), CheckoutDecision::EmptyCart);
    }

    #[test]
    fn test_over_budget_reports_overage() {
        let p = profile_with_budget(20.0);
        match evaluate(&totals(3, 25.0), Some(&p)) {
            CheckoutDecision::OverBudget { overage } => assert!((overage - 5.0).abs() < 1e-9),
            other => panic!("expected over budget, got {other:?}"),
        }
    }

    #[test]
    fn test_exactly_on_budget_is_accepted() {
        let p = profile_with_budget(25.0);
        assert_eq!(evaluate(&totals(2, 25.0), Some(&p)), CheckoutDecision::Accepted);
    }

    #[test]
    fn test_no_profile_always_accepted() {
        assert_eq!(evaluate(&totals(40, 9999.0), None), CheckoutDecision::Accepted);
    }

    #[test]
    fn test_messages() {
        assert!(CheckoutResult::empty_cart().message.contains("add at least one meal"));

        let over = CheckoutResult::over_budget(5.0);
        assert_eq!(over.message, "Cart exceeds your budget by $5.00. Adjust items.");
        assert_eq!(over.overage, Some(5.0));

        let eta = FulfillmentWindow::starting_at(Local::now());
        let ok = CheckoutResult::accepted(None, eta.clone());
        assert_eq!(ok.message, "Order placed for Guest! ETA: 25-35 mins.");

        let p = profile_with_budget(50.0);
        let ok = CheckoutResult::accepted(Some(&p), eta);
        assert_eq!(ok.message, "Order placed for Ada! ETA: 25-35 mins.");
    }

    #[test]
    fn test_window_bounds() {
        let now = Local::now();
        let eta = FulfillmentWindow::starting_at(now);
        let from = DateTime::parse_from_rfc3339(&eta.ready_from).unwrap();
        let by = DateTime::parse_from_rfc3339(&eta.ready_by).unwrap();
        assert_eq!((by - from).num_minutes(), ETA_MAX_MINUTES - ETA_MIN_MINUTES);
        assert_eq!((from.with_timezone(&Local) - now).num_minutes(), ETA_MIN_MINUTES);
    }

    #[test]
    fn test_rejection_json_has_no_eta() {
        let json = serde_json::to_value(CheckoutResult::over_budget(1.5)).unwrap();
        assert_eq!(json["accepted"], false);
        assert_eq!(json["overage"], 1.5);
        assert!(json.get("eta").is_none());
    }
}

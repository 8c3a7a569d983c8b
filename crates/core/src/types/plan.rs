//! Pricing tiers offered to merchants.

use serde::{Deserialize, Serialize};

use super::price::{CurrencyCode, Price};

/// A subscription tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPlan {
    /// Display name.
    pub name: String,
    /// Monthly price; `None` means custom pricing.
    pub monthly_price: Option<Price>,
    /// Feature bullets.
    pub features: Vec<String>,
    /// Call-to-action label.
    pub cta: String,
    /// Whether the call to action is the primary button.
    pub primary: bool,
}

impl PricingPlan {
    /// Price line shown under the plan name.
    #[must_use]
    pub fn price_label(&self) -> String {
        self.monthly_price.map_or_else(
            || "Custom Pricing".to_string(),
            |price| format!("{} / month", price.display()),
        )
    }

    /// The Free, Pro and Enterprise tiers, in display order.
    #[must_use]
    pub fn catalog() -> Vec<Self> {
        vec![
            Self {
                name: "Free".to_string(),
                monthly_price: Some(Price::whole(0, CurrencyCode::USD)),
                features: vec![
                    "Basic image translation".to_string(),
                    "Up to 50 images".to_string(),
                ],
                cta: "Start Free".to_string(),
                primary: true,
            },
            Self {
                name: "Pro".to_string(),
                monthly_price: Some(Price::whole(19, CurrencyCode::USD)),
                features: vec![
                    "Unlimited image translations".to_string(),
                    "Priority support".to_string(),
                ],
                cta: "Upgrade".to_string(),
                primary: true,
            },
            Self {
                name: "Enterprise".to_string(),
                monthly_price: None,
                features: vec![
                    "Dedicated account manager".to_string(),
                    "Custom integrations".to_string(),
                ],
                cta: "Contact Sales".to_string(),
                primary: false,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order() {
        let names: Vec<String> = PricingPlan::catalog().into_iter().map(|p| p.name).collect();
        assert_eq!(names, ["Free", "Pro", "Enterprise"]);
    }

    #[test]
    fn test_price_labels() {
        let labels: Vec<String> = PricingPlan::catalog()
            .iter()
            .map(PricingPlan::price_label)
            .collect();
        assert_eq!(labels, ["$0 / month", "$19 / month", "Custom Pricing"]);
    }
}

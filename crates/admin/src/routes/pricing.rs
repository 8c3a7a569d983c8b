//! Pricing plans route handlers.

use askama::Template;
use axum::{Json, response::Html};
use chrono::Datelike;
use imagelingo_core::PricingPlan;

/// Plan view for templates.
#[derive(Debug, Clone)]
pub struct PlanView {
    pub name: String,
    pub price: String,
    pub features: Vec<String>,
    pub cta: String,
    pub primary: bool,
}

impl From<&PricingPlan> for PlanView {
    fn from(plan: &PricingPlan) -> Self {
        Self {
            name: plan.name.clone(),
            price: plan.price_label(),
            features: plan.features.clone(),
            cta: plan.cta.clone(),
            primary: plan.primary,
        }
    }
}

/// Pricing page template.
#[derive(Template)]
#[template(path = "pricing.html")]
pub struct PricingTemplate {
    pub plans: Vec<PlanView>,
    /// Footer copyright year.
    pub year: i32,
}

impl PricingTemplate {
    /// The plan catalog, stamped with the current year.
    #[must_use]
    pub fn current() -> Self {
        Self {
            plans: PricingPlan::catalog().iter().map(PlanView::from).collect(),
            year: chrono::Utc::now().year(),
        }
    }
}

/// Pricing page handler.
pub async fn index() -> Html<String> {
    let template = PricingTemplate::current();

    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}

/// Pricing plans as JSON.
pub async fn list() -> Json<Vec<PricingPlan>> {
    Json(PricingPlan::catalog())
}

// src/handlers/plan.rs

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppError,
    handlers::respond,
    subscription::{
        Capability, Entitlements, Feature, Plan, PlanInfo, SubscriptionStatus, UsageStatus,
        required_plan,
    },
};

/// Lists every plan with its display info.
pub async fn list_plans() -> impl IntoResponse {
    let plans: Vec<PlanInfo> = Plan::ALL.into_iter().map(Plan::info).collect();
    respond("Plans retrieved", plans)
}

#[derive(Debug, Deserialize)]
pub struct AccessParams {
    pub feature: String,
    pub status: Option<String>,
    #[serde(default)]
    pub usage: u32,
}

#[derive(Debug, Serialize)]
pub struct AccessVerdict {
    pub plan: Plan,
    pub status: SubscriptionStatus,
    pub feature: Feature,
    pub capability: Capability,
    pub has_access: bool,
    pub has_reached_limit: bool,
    pub usage: UsageStatus,
    /// Cheapest plan enabling the feature, when this plan lacks it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upgrade_to: Option<PlanInfo>,
}

/// Access verdict for one feature. Unknown plan names resolve to the demo plan.
pub async fn check_access(
    Path(plan): Path<String>,
    Query(params): Query<AccessParams>,
) -> Result<impl IntoResponse, AppError> {
    let plan = Plan::parse_or_demo(&plan);
    let feature: Feature = params.feature.parse()?;
    let status = params
        .status
        .as_deref()
        .map(str::parse::<SubscriptionStatus>)
        .transpose()?
        .unwrap_or_default();

    let entitlements = Entitlements::resolve(plan, status);
    let has_access = entitlements.has_access(feature);
    let upgrade_to = if plan.capability(feature).enabled {
        None
    } else {
        required_plan(feature).map(Plan::info)
    };

    Ok(respond(
        "Access checked",
        AccessVerdict {
            plan,
            status,
            feature,
            capability: plan.capability(feature),
            has_access,
            has_reached_limit: entitlements.has_reached_limit(feature, params.usage),
            usage: entitlements.usage_status(feature, params.usage),
            upgrade_to,
        },
    ))
}

// src/subscription.rs

//! Plan-based feature gating.
//!
//! Each plan carries a static capability table. `Entitlements` resolves the
//! table for a plan and subscription status once, then answers access and
//! usage-limit questions.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Plan {
    Demo,
    Starter,
    Enterprise,
    EnterprisePlus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    #[default]
    Active,
    Trial,
    Inactive,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    AiReadinessAssessment,
    IndividualAssessment,
    BasicMissions,
    AdvancedMissions,
    RoiTracker,
    PromptEngineering,
    ToolsTracker,
    OrganizationalDashboard,
    ProgressTracking,
    Leaderboards,
    EmailSupport,
    TeamCollaboration,
    DepartmentAnalytics,
    AiChampionsProgram,
    QuarterlyReviews,
    PrioritySupport,
    CustomIntegrations,
    ApiAccess,
    WhiteLabel,
    CustomMissionDevelopment,
    DedicatedSuccessManager,
    AdvancedAnalytics,
    OnsiteTraining,
    PremiumSupport,
}

/// Feature variant unlocked by a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Basic,
    Advanced,
    Premium,
    Individual,
    Team,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capability {
    pub enabled: bool,
    /// Usage cap. `None` is unlimited.
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
}

const fn on() -> Capability {
    Capability { enabled: true, limit: None, tier: None }
}

const fn capped(limit: u32) -> Capability {
    Capability { enabled: true, limit: Some(limit), tier: None }
}

const fn tiered(tier: Tier) -> Capability {
    Capability { enabled: true, limit: None, tier: Some(tier) }
}

const fn off() -> Capability {
    Capability { enabled: false, limit: None, tier: None }
}

use Feature::*;

static DEMO: [(Feature, Capability); 12] = [
    (AiReadinessAssessment, capped(1)),
    (IndividualAssessment, capped(3)),
    (BasicMissions, capped(2)),
    (RoiTracker, capped(50)),
    (PromptEngineering, capped(2)),
    (ToolsTracker, capped(10)),
    (OrganizationalDashboard, off()),
    (AdvancedMissions, off()),
    (TeamCollaboration, off()),
    (ApiAccess, off()),
    (CustomIntegrations, off()),
    (WhiteLabel, off()),
];

static STARTER: [(Feature, Capability); 14] = [
    (AiReadinessAssessment, on()),
    (IndividualAssessment, on()),
    (BasicMissions, on()),
    (RoiTracker, on()),
    (PromptEngineering, on()),
    (ToolsTracker, on()),
    (OrganizationalDashboard, tiered(Tier::Basic)),
    (ProgressTracking, on()),
    (Leaderboards, tiered(Tier::Individual)),
    (EmailSupport, on()),
    (AdvancedMissions, off()),
    (TeamCollaboration, off()),
    (DepartmentAnalytics, off()),
    (ApiAccess, off()),
];

static ENTERPRISE: [(Feature, Capability); 17] = [
    (AiReadinessAssessment, on()),
    (IndividualAssessment, on()),
    (BasicMissions, on()),
    (AdvancedMissions, on()),
    (RoiTracker, on()),
    (PromptEngineering, on()),
    (ToolsTracker, on()),
    (OrganizationalDashboard, tiered(Tier::Advanced)),
    (TeamCollaboration, on()),
    (DepartmentAnalytics, on()),
    (AiChampionsProgram, on()),
    (QuarterlyReviews, on()),
    (PrioritySupport, on()),
    (CustomIntegrations, tiered(Tier::Basic)),
    (Leaderboards, tiered(Tier::Team)),
    (ApiAccess, off()),
    (WhiteLabel, off()),
];

static ENTERPRISE_PLUS: [(Feature, Capability); 19] = [
    (AiReadinessAssessment, on()),
    (IndividualAssessment, on()),
    (BasicMissions, on()),
    (AdvancedMissions, on()),
    (RoiTracker, on()),
    (PromptEngineering, on()),
    (ToolsTracker, on()),
    (OrganizationalDashboard, tiered(Tier::Premium)),
    (TeamCollaboration, on()),
    (DepartmentAnalytics, on()),
    (AiChampionsProgram, on()),
    (QuarterlyReviews, on()),
    (WhiteLabel, on()),
    (CustomMissionDevelopment, on()),
    (DedicatedSuccessManager, on()),
    (AdvancedAnalytics, on()),
    (ApiAccess, on()),
    (OnsiteTraining, on()),
    (PremiumSupport, on()),
];

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PlanInfo {
    pub plan: Plan,
    pub name: &'static str,
    pub price: &'static str,
    pub color: &'static str,
}

impl Plan {
    pub const ALL: [Plan; 4] = [Plan::Demo, Plan::Starter, Plan::Enterprise, Plan::EnterprisePlus];

    pub fn as_str(self) -> &'static str {
        match self {
            Plan::Demo => "demo",
            Plan::Starter => "starter",
            Plan::Enterprise => "enterprise",
            Plan::EnterprisePlus => "enterprise-plus",
        }
    }

    /// Unknown plan names fall back to the demo plan.
    pub fn parse_or_demo(s: &str) -> Plan {
        s.parse().unwrap_or(Plan::Demo)
    }

    pub fn capabilities(self) -> &'static [(Feature, Capability)] {
        match self {
            Plan::Demo => &DEMO,
            Plan::Starter => &STARTER,
            Plan::Enterprise => &ENTERPRISE,
            Plan::EnterprisePlus => &ENTERPRISE_PLUS,
        }
    }

    pub fn capability(self, feature: Feature) -> Capability {
        self.capabilities()
            .iter()
            .find(|(f, _)| *f == feature)
            .map(|(_, c)| *c)
            .unwrap_or(off())
    }

    pub fn info(self) -> PlanInfo {
        let (name, price, color) = match self {
            Plan::Demo => ("Demo Access", "$0", "#718096"),
            Plan::Starter => ("Starter", "$49/month", "#2b6cb0"),
            Plan::Enterprise => ("Enterprise", "$99/month", "#d69e2e"),
            Plan::EnterprisePlus => ("Enterprise Plus", "$199/month", "#2f855a"),
        };
        PlanInfo {
            plan: self,
            name,
            price,
            color,
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Plan::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| AppError::NotFound(format!("Unknown plan '{}'", s)))
    }
}

impl FromStr for Feature {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.to_string()))
            .map_err(|_| AppError::BadRequest(format!("Unknown feature '{}'", s)))
    }
}

impl FromStr for SubscriptionStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.to_string()))
            .map_err(|_| AppError::BadRequest(format!("Unknown subscription status '{}'", s)))
    }
}

/// How close a caller is to a feature's usage cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum UsageStatus {
    Disabled,
    Unlimited,
    Ok { remaining: u32 },
    /// At or above 80% of the cap.
    Approaching { remaining: u32 },
    Reached,
}

/// Capabilities of one subscriber, resolved once.
#[derive(Debug, Clone, Copy)]
pub struct Entitlements {
    pub plan: Plan,
    pub status: SubscriptionStatus,
    table: &'static [(Feature, Capability)],
}

impl Entitlements {
    pub fn resolve(plan: Plan, status: SubscriptionStatus) -> Self {
        Self {
            plan,
            status,
            table: plan.capabilities(),
        }
    }

    fn capability(&self, feature: Feature) -> Option<Capability> {
        self.table
            .iter()
            .find(|(f, _)| *f == feature)
            .map(|(_, c)| *c)
    }

    pub fn is_lapsed(&self) -> bool {
        matches!(
            self.status,
            SubscriptionStatus::Inactive | SubscriptionStatus::Cancelled
        )
    }

    pub fn has_access(&self, feature: Feature) -> bool {
        if self.is_lapsed() {
            return false;
        }
        self.capability(feature).is_some_and(|c| c.enabled)
    }

    pub fn has_reached_limit(&self, feature: Feature, usage: u32) -> bool {
        match self.capability(feature) {
            Some(c) if c.enabled => c.limit.is_some_and(|limit| usage >= limit),
            _ => true,
        }
    }

    pub fn usage_status(&self, feature: Feature, usage: u32) -> UsageStatus {
        match self.capability(feature) {
            Some(Capability { enabled: true, limit: None, .. }) => UsageStatus::Unlimited,
            Some(Capability { enabled: true, limit: Some(limit), .. }) => {
                if usage >= limit {
                    UsageStatus::Reached
                } else if u64::from(usage) * 10 >= u64::from(limit) * 8 {
                    UsageStatus::Approaching { remaining: limit - usage }
                } else {
                    UsageStatus::Ok { remaining: limit - usage }
                }
            }
            _ => UsageStatus::Disabled,
        }
    }
}

/// Cheapest plan that enables `feature`.
pub fn required_plan(feature: Feature) -> Option<Plan> {
    Plan::ALL
        .into_iter()
        .find(|plan| plan.capability(feature).enabled)
}

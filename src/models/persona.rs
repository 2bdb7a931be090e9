// src/models/persona.rs

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Impact persona assigned by the routing quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    EcoWarrior,
    CommunityBuilder,
    HealthFocused,
    TechInnovator,
    SocialImpact,
    LifestyleOptimizer,
}

/// Display data for a persona.
#[derive(Debug, Serialize)]
pub struct PersonaDetails {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub traits: &'static [&'static str],
    pub recommendations: &'static [&'static str],
}

impl Persona {
    pub const ALL: [Persona; 6] = [
        Persona::EcoWarrior,
        Persona::CommunityBuilder,
        Persona::HealthFocused,
        Persona::TechInnovator,
        Persona::SocialImpact,
        Persona::LifestyleOptimizer,
    ];

    pub fn as_str(self) -> &'static str {
        self.details().id
    }

    pub fn details(self) -> &'static PersonaDetails {
        match self {
            Persona::EcoWarrior => &ECO_WARRIOR,
            Persona::CommunityBuilder => &COMMUNITY_BUILDER,
            Persona::HealthFocused => &HEALTH_FOCUSED,
            Persona::TechInnovator => &TECH_INNOVATOR,
            Persona::SocialImpact => &SOCIAL_IMPACT,
            Persona::LifestyleOptimizer => &LIFESTYLE_OPTIMIZER,
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Persona {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Persona::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("Unknown persona '{}'", s))
    }
}

static ECO_WARRIOR: PersonaDetails = PersonaDetails {
    id: "eco_warrior",
    name: "Eco Warrior",
    description: "Environmental champion focused on sustainability and climate action",
    traits: &["environmental action", "sustainability", "climate consciousness"],
    recommendations: &[
        "Join local environmental cleanup initiatives",
        "Reduce carbon footprint through lifestyle changes",
        "Support renewable energy projects",
        "Participate in tree planting programs",
    ],
};

static COMMUNITY_BUILDER: PersonaDetails = PersonaDetails {
    id: "community_builder",
    name: "Community Builder",
    description: "Social connector dedicated to strengthening local communities",
    traits: &["community engagement", "social connection", "local impact"],
    recommendations: &[
        "Organize neighborhood events and gatherings",
        "Volunteer with local charities and nonprofits",
        "Mentor youth in your community",
        "Start community improvement projects",
    ],
};

static HEALTH_FOCUSED: PersonaDetails = PersonaDetails {
    id: "health_focused",
    name: "Health Advocate",
    description: "Wellness enthusiast promoting healthy lifestyles and mental wellbeing",
    traits: &["health promotion", "wellness advocacy", "mental health awareness"],
    recommendations: &[
        "Lead fitness or wellness groups",
        "Promote mental health awareness",
        "Support healthy food initiatives",
        "Organize wellness workshops",
    ],
};

static TECH_INNOVATOR: PersonaDetails = PersonaDetails {
    id: "tech_innovator",
    name: "Tech Innovator",
    description: "Technology enthusiast using innovation to solve social problems",
    traits: &["technological innovation", "problem solving", "digital literacy"],
    recommendations: &[
        "Develop apps or tools for social good",
        "Teach digital skills to underserved communities",
        "Support tech-for-good initiatives",
        "Participate in hackathons for social causes",
    ],
};

static SOCIAL_IMPACT: PersonaDetails = PersonaDetails {
    id: "social_impact",
    name: "Social Impact Leader",
    description: "Change agent focused on addressing social justice and equality",
    traits: &["social justice", "advocacy", "systemic change"],
    recommendations: &[
        "Advocate for policy changes and social justice",
        "Support marginalized communities",
        "Lead awareness campaigns",
        "Participate in peaceful activism",
    ],
};

static LIFESTYLE_OPTIMIZER: PersonaDetails = PersonaDetails {
    id: "lifestyle_optimizer",
    name: "Lifestyle Optimizer",
    description: "Efficiency expert focused on productivity and personal development",
    traits: &["personal optimization", "productivity", "continuous improvement"],
    recommendations: &[
        "Share productivity tips and life hacks",
        "Mentor others in goal achievement",
        "Organize skill-building workshops",
        "Lead by example in personal growth",
    ],
};

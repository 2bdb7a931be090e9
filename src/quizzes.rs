// src/quizzes.rs

//! Static quiz catalog.

use crate::scoring::{AnswerOption, Band, Grading, Question, Quiz, Urgency};

pub const LEADERSHIP_SCORECARD: &str = "leadership-scorecard";
pub const MONEY_LEAK: &str = "money-leak";
pub const AI_READINESS: &str = "ai-readiness";
pub const IMPACT_PERSONA: &str = "impact-persona";

pub static QUIZZES: [&Quiz; 4] = [
    &LEADERSHIP_QUIZ,
    &MONEY_LEAK_QUIZ,
    &AI_READINESS_QUIZ,
    &PERSONA_QUIZ,
];

macro_rules! opt {
    ($id:literal, $label:literal, $weight:literal) => {
        AnswerOption {
            id: $id,
            label: $label,
            weight: $weight,
            awards: &[],
        }
    };
}

pub fn find(slug: &str) -> Option<&'static Quiz> {
    QUIZZES.iter().copied().find(|quiz| quiz.slug == slug)
}

/// Never / Rarely / Sometimes / Often / Always, weighted 1 to 5.
const FREQUENCY_SCALE: &[AnswerOption] = &[
    opt!("1", "Never", 1),
    opt!("2", "Rarely", 2),
    opt!("3", "Sometimes", 3),
    opt!("4", "Often", 4),
    opt!("5", "Always", 5),
];

const fn statement(id: &'static str, prompt: &'static str) -> Question {
    Question {
        id,
        prompt,
        category: None,
        reverse: false,
        options: FREQUENCY_SCALE,
    }
}

// Leadership Scorecard

pub static LEADERSHIP_QUIZ: Quiz = Quiz {
    slug: LEADERSHIP_SCORECARD,
    title: "Leadership Scorecard",
    description: "Rate how often each statement describes your leadership.",
    questions: &[
        statement("q1", "I actively listen to my team members and value their input"),
        statement("q2", "I inspire and motivate others to achieve their best"),
        statement("q3", "I communicate vision and goals clearly to my team"),
        statement("q4", "I lead by example and demonstrate integrity"),
        statement("q5", "I provide constructive feedback and support growth"),
        statement("q6", "I adapt my leadership style to different situations"),
        statement("q7", "I build trust and foster collaboration within my team"),
        statement("q8", "I make decisions confidently and take responsibility"),
        statement("q9", "I recognize and celebrate team achievements"),
        statement("q10", "I continuously seek to improve and learn as a leader"),
    ],
    grading: Grading::Percentage(&LEADERSHIP_BANDS),
    categories: &[],
};

static LEADERSHIP_BANDS: [Band; 4] = [
    Band {
        min: 85,
        label: "Exceptional Leader",
        title: None,
        description: "You demonstrate outstanding leadership qualities and consistently inspire others to achieve excellence.",
        highlights: &[
            "Exceptional communication and vision-setting abilities",
            "Strong emotional intelligence and team-building skills",
            "Consistent demonstration of integrity and accountability",
            "Effective at adapting leadership style to different situations",
        ],
        recommendations: &[
            "Consider mentoring other emerging leaders",
            "Explore strategic leadership and organizational transformation",
            "Develop expertise in leading through change and uncertainty",
            "Focus on building high-performance culture at scale",
        ],
        track: None,
        timeline: None,
        urgency: None,
    },
    Band {
        min: 70,
        label: "Strong Leader",
        title: None,
        description: "You have solid leadership foundations with room for focused development in key areas.",
        highlights: &[
            "Good foundational leadership skills",
            "Ability to motivate and guide team members",
            "Decent communication and decision-making abilities",
            "Shows initiative in personal development",
        ],
        recommendations: &[
            "Enhance active listening and empathy skills",
            "Develop more consistent feedback and coaching abilities",
            "Work on adapting leadership style to different team members",
            "Focus on building stronger team collaboration",
        ],
        track: None,
        timeline: None,
        urgency: None,
    },
    Band {
        min: 55,
        label: "Developing Leader",
        title: None,
        description: "You show leadership potential with opportunities for significant growth and skill development.",
        highlights: &[
            "Shows willingness to take on leadership responsibilities",
            "Demonstrates some natural leadership instincts",
            "Has foundation skills that can be built upon",
            "Shows commitment to personal growth",
        ],
        recommendations: &[
            "Develop clear communication and vision-setting skills",
            "Build confidence in decision-making and accountability",
            "Learn effective team motivation and engagement techniques",
            "Practice active listening and emotional intelligence",
        ],
        track: None,
        timeline: None,
        urgency: None,
    },
    Band {
        min: i64::MIN,
        label: "Emerging Leader",
        title: None,
        description: "You're at the beginning of your leadership journey with tremendous potential for growth.",
        highlights: &[
            "You have the awareness to seek growth and development",
            "With focused effort, you can develop strong leadership skills",
            "Your commitment to improvement is already a leadership quality",
        ],
        recommendations: &[
            "Focus on developing self-awareness and emotional intelligence",
            "Practice basic communication and listening skills",
            "Learn fundamental principles of team leadership",
            "Build confidence through small leadership opportunities",
        ],
        track: None,
        timeline: None,
        urgency: None,
    },
];

// Money Leak Quiz

pub static MONEY_LEAK_QUIZ: Quiz = Quiz {
    slug: MONEY_LEAK,
    title: "Money Leak Quiz",
    description: "Are you leaking money because of poor management training?",
    questions: &[
        statement("q1", "Do you find yourself constantly stepping in to solve team issues?"),
        statement("q2", "Are your managers unclear on how to give effective performance feedback?"),
        statement("q3", "Do you frequently deal with high team turnover or rehiring costs?"),
        statement("q4", "Are customer complaints linked to staff behavior or service delivery?"),
        statement("q5", "Do your managers avoid having accountability conversations with team members?"),
        statement("q6", "Is inconsistent execution affecting your store or service performance?"),
        Question {
            id: "q7",
            prompt: "Have your managers received formal training in the last 6 months?",
            category: None,
            reverse: true,
            options: FREQUENCY_SCALE,
        },
    ],
    grading: Grading::RawTotal(&MONEY_LEAK_BANDS),
    categories: &[],
};

static MONEY_LEAK_BANDS: [Band; 3] = [
    Band {
        min: 25,
        label: "Severe Leak",
        title: Some("You're bleeding profits from the top down"),
        description: "Your business is losing money to leadership gaps every day. Your managers need immediate, intensive support.",
        highlights: &[],
        recommendations: &[
            "Immediate management intervention",
            "Emergency leadership training within 7 days",
            "One-on-one coaching for all managers",
            "Complete management system overhaul",
        ],
        track: Some("Emergency Leadership Intervention"),
        timeline: None,
        urgency: Some(Urgency::High),
    },
    Band {
        min: 15,
        label: "Moderate Leak",
        title: Some("Leadership gaps are costing you money"),
        description: "Your managers have potential but need structured support to perform at their best. The gaps are manageable with the right training.",
        highlights: &[],
        recommendations: &[
            "Implement immediate management training program",
            "Establish clear performance feedback systems",
            "Create accountability frameworks for managers",
            "Invest in leadership coaching within 30 days",
        ],
        track: Some("Stop the Money Leak Now"),
        timeline: None,
        urgency: Some(Urgency::Medium),
    },
    Band {
        min: i64::MIN,
        label: "Minimal Leak",
        title: Some("You're doing well but have small cracks"),
        description: "Your leadership foundation is solid. Small improvements in management training could unlock even more potential.",
        highlights: &[],
        recommendations: &[
            "Continue regular leadership development sessions",
            "Focus on preventive training to maintain your edge",
            "Consider advanced leadership coaching for your top performers",
            "Implement quarterly leadership assessments",
        ],
        track: Some("Optimize Your Leadership"),
        timeline: None,
        urgency: Some(Urgency::Low),
    },
];

// AI Readiness Assessment

const fn weighted(
    id: &'static str,
    category: &'static str,
    prompt: &'static str,
    options: &'static [AnswerOption],
) -> Question {
    Question {
        id,
        prompt,
        category: Some(category),
        reverse: false,
        options,
    }
}

pub static AI_READINESS_QUIZ: Quiz = Quiz {
    slug: AI_READINESS,
    title: "AI Readiness Assessment",
    description: "Discover your organization's AI adoption score and department breakdown.",
    questions: &[
        weighted("tools_current", "Current AI Usage", "How many AI tools does your organization currently use regularly?", &[
            opt!("1", "None", 0),
            opt!("2", "1-2 basic tools", 2),
            opt!("3", "3-5 tools across departments", 4),
            opt!("4", "6-10 integrated tools", 6),
            opt!("5", "10+ tools with enterprise integration", 8),
        ]),
        weighted("comfort_employees", "Employee Readiness", "What percentage of your employees are comfortable using AI tools?", &[
            opt!("1", "Less than 10%", 0),
            opt!("2", "10-25%", 2),
            opt!("3", "26-50%", 4),
            opt!("4", "51-75%", 6),
            opt!("5", "More than 75%", 8),
        ]),
        weighted("marketing_ai", "Marketing & Sales", "How advanced is your marketing team's AI knowledge?", &[
            opt!("1", "No AI experience", 0),
            opt!("2", "Basic awareness", 1),
            opt!("3", "Some experimentation", 2),
            opt!("4", "Regular usage", 3),
            opt!("5", "Advanced implementation", 4),
        ]),
        weighted("operations_ai", "Operations", "Does your operations team use AI for automation or optimization?", &[
            opt!("1", "Not at all", 0),
            opt!("2", "Minimal use", 1),
            opt!("3", "Some processes", 2),
            opt!("4", "Many processes", 3),
            opt!("5", "Fully integrated", 4),
        ]),
        weighted("hr_ai", "Human Resources", "How does your HR team leverage AI tools?", &[
            opt!("1", "No AI usage", 0),
            opt!("2", "Basic recruitment tools", 1),
            opt!("3", "Multiple HR AI tools", 2),
            opt!("4", "Integrated AI systems", 3),
            opt!("5", "AI-driven HR strategy", 4),
        ]),
        weighted("governance_policies", "Governance & Policies", "What AI governance policies does your organization have?", &[
            opt!("1", "No formal policies", 0),
            opt!("2", "Basic usage guidelines", 2),
            opt!("3", "Department-specific policies", 4),
            opt!("4", "Comprehensive AI governance", 6),
            opt!("5", "Enterprise AI strategy with compliance", 8),
        ]),
        weighted("barriers_cost", "Implementation Barriers", "How much budget is available for AI adoption?", &[
            opt!("1", "Major budget constraints", 0),
            opt!("2", "Limited budget", 1),
            opt!("3", "Moderate budget available", 2),
            opt!("4", "Good budget allocation", 3),
            opt!("5", "Ample AI investment budget", 4),
        ]),
        weighted("barriers_skills", "Skills & Training", "How would you rate your organization's AI skills gap?", &[
            opt!("1", "Severe skills shortage", 0),
            opt!("2", "Significant gap", 1),
            opt!("3", "Moderate gap", 2),
            opt!("4", "Minor gap", 3),
            opt!("5", "Well-equipped team", 4),
        ]),
        weighted("compliance_concerns", "Compliance & Security", "How concerned is your organization about AI compliance and security?", &[
            opt!("1", "Extremely concerned/blocked", 0),
            opt!("2", "Very cautious", 1),
            opt!("3", "Moderately concerned", 2),
            opt!("4", "Manageable concerns", 3),
            opt!("5", "Confident in security", 4),
        ]),
        weighted("leadership_support", "Leadership & Culture", "How supportive is your leadership team of AI initiatives?", &[
            opt!("1", "Resistant to AI", 0),
            opt!("2", "Skeptical but open", 1),
            opt!("3", "Neutral/waiting", 2),
            opt!("4", "Supportive", 3),
            opt!("5", "Championing AI adoption", 4),
        ]),
    ],
    grading: Grading::Percentage(&AI_READINESS_BANDS),
    categories: &[],
};

static AI_READINESS_BANDS: [Band; 4] = [
    Band {
        min: 80,
        label: "AI Advanced",
        title: None,
        description: "Your organization is leading in AI adoption with strong foundations across all areas.",
        highlights: &[],
        recommendations: &[
            "Focus on AI innovation and competitive advantage",
            "Become an AI Center of Excellence",
            "Mentor other organizations in AI adoption",
            "Explore cutting-edge AI technologies",
        ],
        track: Some("Advanced AI Leadership & Innovation Track"),
        timeline: Some("Continuous innovation cycle"),
        urgency: None,
    },
    Band {
        min: 60,
        label: "AI Ready",
        title: None,
        description: "Your organization has good foundations with some areas for strategic improvement.",
        highlights: &[],
        recommendations: &[
            "Scale successful AI implementations",
            "Address remaining skill gaps through targeted training",
            "Expand AI governance and policies",
            "Increase cross-department collaboration",
        ],
        track: Some("AI Acceleration & Scaling Track"),
        timeline: Some("6-9 months to full optimization"),
        urgency: None,
    },
    Band {
        min: 40,
        label: "AI Developing",
        title: None,
        description: "Your organization is making progress but needs strategic focus to accelerate AI adoption.",
        highlights: &[],
        recommendations: &[
            "Establish AI governance framework",
            "Invest in comprehensive team training",
            "Start with high-impact, low-risk AI pilots",
            "Build internal AI advocacy champions",
        ],
        track: Some("AI Fundamentals & Implementation Track"),
        timeline: Some("9-12 months to readiness"),
        urgency: None,
    },
    Band {
        min: i64::MIN,
        label: "AI Beginner",
        title: None,
        description: "You're at the starting point. With the right strategy, you can advance quickly.",
        highlights: &[],
        recommendations: &[
            "Start with basic AI literacy training company-wide",
            "Identify AI champions in each department",
            "Begin with simple, proven AI tools",
            "Create AI experimentation safe spaces",
        ],
        track: Some("AI Foundation & Readiness Track"),
        timeline: Some("12-18 months to full readiness"),
        urgency: None,
    },
];

// Impact persona routing quiz

/// Routing options carry no weight of their own, only persona awards.
macro_rules! routed {
    ($id:literal, $label:literal, $awards:expr) => {
        AnswerOption {
            id: $id,
            label: $label,
            weight: 0,
            awards: $awards,
        }
    };
}

const fn routing(id: &'static str, prompt: &'static str, options: &'static [AnswerOption]) -> Question {
    Question {
        id,
        prompt,
        category: None,
        reverse: false,
        options,
    }
}

pub static PERSONA_QUIZ: Quiz = Quiz {
    slug: IMPACT_PERSONA,
    title: "Find Your Impact Persona",
    description: "Six questions to match you with the way you like to make a difference.",
    questions: &[
        routing("1", "What motivates you most when thinking about making a positive impact?", &[
            routed!("a", "Protecting the environment for future generations", &[("eco_warrior", 3), ("community_builder", 1)]),
            routed!("b", "Bringing people together to solve shared challenges", &[("community_builder", 3), ("social_impact", 1)]),
            routed!("c", "Improving health and wellness in my community", &[("health_focused", 3), ("community_builder", 1)]),
            routed!("d", "Using technology to create innovative solutions", &[("tech_innovator", 3), ("lifestyle_optimizer", 1)]),
            routed!("e", "Fighting for justice and equality", &[("social_impact", 3), ("community_builder", 1)]),
            routed!("f", "Optimizing systems and helping others improve", &[("lifestyle_optimizer", 3), ("tech_innovator", 1)]),
        ]),
        routing("2", "When you have free time, you're most likely to:", &[
            routed!("a", "Research sustainable living practices", &[("eco_warrior", 3), ("lifestyle_optimizer", 1)]),
            routed!("b", "Organize a get-together with friends and neighbors", &[("community_builder", 3), ("social_impact", 1)]),
            routed!("c", "Try a new fitness routine or wellness practice", &[("health_focused", 3), ("lifestyle_optimizer", 1)]),
            routed!("d", "Learn about emerging technologies", &[("tech_innovator", 3), ("lifestyle_optimizer", 1)]),
            routed!("e", "Read about social issues or volunteer", &[("social_impact", 3), ("community_builder", 1)]),
            routed!("f", "Optimize your daily routines and productivity systems", &[("lifestyle_optimizer", 3), ("tech_innovator", 1)]),
        ]),
        routing("3", "Your ideal weekend project would be:", &[
            routed!("a", "Starting a community garden or composting program", &[("eco_warrior", 3), ("community_builder", 2)]),
            routed!("b", "Planning a neighborhood block party", &[("community_builder", 3), ("social_impact", 1)]),
            routed!("c", "Organizing a group fitness class or mental health workshop", &[("health_focused", 3), ("community_builder", 2)]),
            routed!("d", "Building an app or website for a local cause", &[("tech_innovator", 3), ("lifestyle_optimizer", 1)]),
            routed!("e", "Volunteering for a social justice organization", &[("social_impact", 3), ("community_builder", 1)]),
            routed!("f", "Creating systems to help others be more productive", &[("lifestyle_optimizer", 3), ("tech_innovator", 2)]),
        ]),
        routing("4", "When facing a community problem, your first instinct is to:", &[
            routed!("a", "Research the environmental impact and sustainable solutions", &[("eco_warrior", 3), ("tech_innovator", 1)]),
            routed!("b", "Gather people together to brainstorm collective action", &[("community_builder", 3), ("social_impact", 2)]),
            routed!("c", "Consider the health and wellness implications", &[("health_focused", 3), ("community_builder", 1)]),
            routed!("d", "Look for technological tools or data-driven solutions", &[("tech_innovator", 3), ("lifestyle_optimizer", 2)]),
            routed!("e", "Analyze systemic causes and advocate for policy change", &[("social_impact", 3), ("eco_warrior", 1)]),
            routed!("f", "Break down the problem and create an efficient action plan", &[("lifestyle_optimizer", 3), ("tech_innovator", 1)]),
        ]),
        routing("5", "Your friends would describe your communication style as:", &[
            routed!("a", "Passionate advocate who educates about sustainability", &[("eco_warrior", 3), ("social_impact", 1)]),
            routed!("b", "Natural connector who brings diverse groups together", &[("community_builder", 3), ("health_focused", 1)]),
            routed!("c", "Supportive coach focused on wellbeing", &[("health_focused", 3), ("community_builder", 1)]),
            routed!("d", "Clear explainer of complex technical concepts", &[("tech_innovator", 3), ("lifestyle_optimizer", 2)]),
            routed!("e", "Compelling speaker about social issues", &[("social_impact", 3), ("community_builder", 1)]),
            routed!("f", "Practical advisor sharing actionable tips", &[("lifestyle_optimizer", 3), ("health_focused", 1)]),
        ]),
        routing("6", "Success for you means:", &[
            routed!("a", "Measurably reducing environmental damage", &[("eco_warrior", 3), ("lifestyle_optimizer", 1)]),
            routed!("b", "Seeing stronger, more connected communities", &[("community_builder", 3), ("social_impact", 2)]),
            routed!("c", "Improving people's physical and mental health", &[("health_focused", 3), ("community_builder", 1)]),
            routed!("d", "Creating scalable solutions through innovation", &[("tech_innovator", 3), ("lifestyle_optimizer", 2)]),
            routed!("e", "Achieving meaningful social and policy change", &[("social_impact", 3), ("eco_warrior", 1)]),
            routed!("f", "Helping others achieve their maximum potential", &[("lifestyle_optimizer", 3), ("health_focused", 2)]),
        ]),
    ],
    grading: Grading::TopCategory,
    categories: &[
        "eco_warrior",
        "community_builder",
        "health_focused",
        "tech_innovator",
        "social_impact",
        "lifestyle_optimizer",
    ],
};

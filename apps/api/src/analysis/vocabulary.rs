//! Static word lists used by the analysis signals and the local suggestion heuristics.

/// Past-tense achievement verbs, lower-case.
pub const ACTION_VERBS: &[&str] = &[
    "accelerated",
    "achieved",
    "analyzed",
    "architected",
    "automated",
    "built",
    "collaborated",
    "coordinated",
    "created",
    "cut",
    "delivered",
    "designed",
    "developed",
    "directed",
    "drove",
    "established",
    "exceeded",
    "executed",
    "expanded",
    "facilitated",
    "generated",
    "grew",
    "implemented",
    "improved",
    "increased",
    "launched",
    "led",
    "managed",
    "mentored",
    "migrated",
    "negotiated",
    "optimized",
    "organized",
    "reduced",
    "resolved",
    "saved",
    "shipped",
    "spearheaded",
    "streamlined",
    "supervised",
    "trained",
];

/// Industry terms across common résumé domains. Multi-word entries match as phrases.
pub const INDUSTRY_KEYWORDS: &[&str] = &[
    "python",
    "javascript",
    "typescript",
    "react",
    "nodejs",
    "node.js",
    "sql",
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "rust",
    "java",
    "golang",
    "ci/cd",
    "api",
    "microservices",
    "machine learning",
    "data analysis",
    "leadership",
    "strategy",
    "analytics",
    "optimization",
    "roi",
    "kpi",
    "budget",
    "stakeholder",
    "agile",
    "scrum",
    "project management",
    "team collaboration",
    "problem solving",
    "communication",
    "customer success",
    "compliance",
];

/// Vague or passive phrasing that hides the candidate's own impact.
pub const WEAK_PHRASES: &[&str] = &[
    "responsible for",
    "duties included",
    "tasks involved",
    "worked on",
    "helped with",
    "assisted with",
    "participated in",
    "involved in",
];

/// Openers that mark a cover letter rather than a résumé.
pub const COVER_LETTER_MARKERS: &[&str] = &[
    "dear hiring manager",
    "i am excited to apply",
    "i am writing to",
    "to whom it may concern",
    "sincerely",
];

/// First-person narrative phrases.
pub const NARRATIVE_PHRASES: &[&str] = &[
    "i am", "my ability", "i have", "i can", "i know", "i take pride",
];

/// Technical tools whose absence suggests a skills gap on a technical résumé.
pub const TECHNICAL_TERMS: &[&str] = &["python", "javascript", "react", "node", "sql", "aws"];

pub fn is_action_verb(word: &str) -> bool {
    ACTION_VERBS.contains(&word)
}

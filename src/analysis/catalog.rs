//! Pattern Catalog
//!
//! Static, hand-curated trigger tables for the question detector and the
//! resume pipeline. Compiled once on first access.
//!
//! The question catalog is an ordered list on purpose: classification
//! iterates it in declaration order and resolves confidence ties by keeping
//! the first match encountered, so the order below is part of the contract.

use super::types::QuestionType;
use once_cell::sync::Lazy;
use regex::Regex;

// ============================================================
// QUESTION PATTERNS
// ============================================================

/// Ordered (type, patterns) catalog matched against the lowercased buffer
pub static QUESTION_PATTERNS: Lazy<Vec<(QuestionType, Vec<Regex>)>> = Lazy::new(|| {
    vec![
        (
            QuestionType::Behavioral,
            compile(&[
                r"tell me about a time when",
                r"describe a situation where",
                r"give me an example of",
                r"have you ever had to",
                r"can you share an experience",
                r"walk me through a time",
                r"describe a challenge you faced",
                r"tell me about your experience with",
                r"how did you handle",
                r"what did you do when",
                r"describe the most difficult",
                r"tell me about a project",
            ]),
        ),
        (
            QuestionType::Technical,
            compile(&[
                r"how does .+ work",
                r"what is the difference between",
                r"explain .+ to me",
                r"how would you implement",
                r"what are the advantages of",
                r"can you explain",
                r"what is your understanding of",
                r"describe how .+ works",
                r"what happens when",
                r"why would you use",
                r"compare .+ and",
                r"what's the time complexity",
                r"how do you optimize",
            ]),
        ),
        (
            QuestionType::Situational,
            compile(&[
                r"what would you do if",
                r"how would you approach",
                r"imagine you",
                r"suppose you",
                r"if you were",
                r"how would you handle",
                r"what if",
                r"let's say",
                r"hypothetically",
            ]),
        ),
        (
            QuestionType::Competency,
            compile(&[
                r"what are your strengths",
                r"what is your greatest",
                r"how do you prioritize",
                r"how do you manage",
                r"what's your approach to",
                r"how do you stay",
                r"what motivates you",
                r"how do you deal with",
            ]),
        ),
        (
            QuestionType::Coding,
            compile(&[
                r"write a function",
                r"implement .+ algorithm",
                r"solve this problem",
                r"code a solution",
                r"write code to",
                r"can you code",
                r"leetcode",
                r"hackerrank",
                r"data structure",
                r"reverse .+ string",
                r"find .+ in .+ array",
                r"sort .+ array",
            ]),
        ),
        (
            QuestionType::SystemDesign,
            compile(&[
                r"design a system",
                r"how would you design",
                r"architect .+ solution",
                r"scale .+ to",
                r"design .+ like",
                r"build .+ from scratch",
                r"high-level design",
                r"system architecture",
            ]),
        ),
    ]
});

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("static question pattern"))
        .collect()
}

/// Words and phrases that open a question
pub const QUESTION_INDICATORS: &[&str] = &[
    "what",
    "why",
    "how",
    "when",
    "where",
    "who",
    "which",
    "can you",
    "could you",
    "would you",
    "do you",
    "did you",
    "tell me",
    "describe",
    "explain",
    "share",
    "walk me through",
];

/// Interviewer phrases that mark a question even without a question mark
pub const INTERVIEW_PHRASES: &[&str] = &[
    "tell me about",
    "walk me through",
    "describe",
    "explain",
    "what is your",
    "how do you",
    "why do you",
];

/// Question words counted into the confidence score
pub static QUESTION_WORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(what|how|why|when|where|who|which|tell|describe|explain)\b")
        .expect("static question-word pattern")
});

/// Technical terms pulled out as question keywords
pub static TECHNICAL_TERM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(api|database|algorithm|function|class|system|design|performance|security|testing|deployment)\b",
    )
    .expect("static technical-term pattern")
});

// ============================================================
// RESUME VOCABULARIES
// ============================================================

/// Known skills scanned for anywhere in a resume (substring, lowercase)
pub const SKILL_KEYWORDS: &[&str] = &[
    // Programming languages
    "javascript", "typescript", "python", "java", "c++", "c#", "ruby", "go", "rust", "swift",
    "kotlin", "php", "scala", "r", "matlab", "perl", "sql", "html", "css", "sass", "less",
    // Frameworks
    "react", "angular", "vue", "node.js", "express", "django", "flask", "spring", "rails",
    "next.js", "nuxt", "svelte", "jquery", "bootstrap", "tailwind", "material-ui", "redux",
    // Cloud & DevOps
    "aws", "azure", "gcp", "docker", "kubernetes", "terraform", "jenkins", "gitlab", "github",
    "circleci", "ansible", "puppet", "chef", "nginx", "apache", "linux", "unix", "bash",
    // Databases
    "postgresql", "mysql", "mongodb", "redis", "elasticsearch", "cassandra", "dynamodb",
    "oracle", "sqlite", "neo4j", "graphql", "rest", "api",
    // AI/ML
    "machine learning", "deep learning", "tensorflow", "pytorch", "keras", "scikit-learn",
    "nlp", "computer vision", "data science", "pandas", "numpy", "jupyter",
];

/// Synonyms that open the work-experience section
pub const EXPERIENCE_HEADERS: &[&str] = &[
    "experience",
    "work experience",
    "professional experience",
    "employment history",
    "work history",
    "career history",
    "professional background",
];

/// Other recognized section headers (used to skip header lines during
/// name extraction)
pub const OTHER_SECTION_HEADERS: &[&str] = &[
    "education",
    "skills",
    "projects",
    "certifications",
    "awards",
    "summary",
    "objective",
    "contact",
    "references",
];

/// Headers that can introduce a professional summary, tried in order
pub const SUMMARY_HEADERS: &[&str] =
    &["summary", "professional summary", "about", "profile", "objective"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_is_stable() {
        let types: Vec<QuestionType> = QUESTION_PATTERNS.iter().map(|(t, _)| *t).collect();
        assert_eq!(
            types,
            vec![
                QuestionType::Behavioral,
                QuestionType::Technical,
                QuestionType::Situational,
                QuestionType::Competency,
                QuestionType::Coding,
                QuestionType::SystemDesign,
            ]
        );
    }

    #[test]
    fn test_patterns_match_lowercased_text() {
        let (_, behavioral) = &QUESTION_PATTERNS[0];
        assert!(behavioral
            .iter()
            .any(|re| re.is_match("tell me about a time when you failed")));
        let (_, technical) = &QUESTION_PATTERNS[1];
        assert!(technical
            .iter()
            .any(|re| re.is_match("how does garbage collection work")));
    }

    #[test]
    fn test_technical_term_extraction() {
        let terms: Vec<&str> = TECHNICAL_TERM_RE
            .find_iter("the api calls the database layer")
            .map(|m| m.as_str())
            .collect();
        assert_eq!(terms, vec!["api", "database"]);
    }

    #[test]
    fn test_question_word_boundaries() {
        // "whatever" must not count as "what"
        assert!(!QUESTION_WORD_RE.is_match("whatever happens"));
        assert_eq!(QUESTION_WORD_RE.find_iter("what and how and why").count(), 3);
    }
}

//! Analysis Types
//!
//! Core data structures shared by the question detector and the resume
//! pipeline. Everything here is a plain serde value; the ad-hoc dicts of
//! earlier prototypes are replaced by explicit tagged structures with
//! optional fields spelled out.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

// ============================================================
// QUESTION CLASSIFICATION
// ============================================================

/// Interview question categories, in catalog order.
///
/// The declaration order here matches the pattern catalog iteration order,
/// which is the tie-break rule when two patterns score equally.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    Behavioral,
    Technical,
    Situational,
    Competency,
    Coding,
    SystemDesign,
    /// Looks like a question but matched no specific pattern
    General,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Behavioral => "behavioral",
            QuestionType::Technical => "technical",
            QuestionType::Situational => "situational",
            QuestionType::Competency => "competency",
            QuestionType::Coding => "coding",
            QuestionType::SystemDesign => "system-design",
            QuestionType::General => "general",
        }
    }

    /// Fixed answer-format suggestion per question category
    pub fn suggested_format(&self) -> AnswerFormat {
        match self {
            QuestionType::Behavioral | QuestionType::Situational => AnswerFormat::Star,
            QuestionType::Technical | QuestionType::Coding => AnswerFormat::Technical,
            QuestionType::SystemDesign => AnswerFormat::Detailed,
            QuestionType::Competency | QuestionType::General => AnswerFormat::Concise,
        }
    }
}

/// Suggested answer structuring for a detected question
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AnswerFormat {
    #[serde(rename = "STAR")]
    Star,
    #[serde(rename = "technical")]
    Technical,
    #[serde(rename = "detailed")]
    Detailed,
    #[serde(rename = "concise")]
    Concise,
}

/// A classified interview question emitted by the detector.
///
/// Immutable once constructed; the detector keeps a bounded history of
/// these but otherwise hands ownership to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedQuestion {
    /// Cleaned question text (capitalized, terminal punctuation ensured)
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    /// Heuristic certainty in [0, 1], not a calibrated probability
    pub confidence: f32,
    /// Up to 5 distinct lowercase technical terms found in the question
    pub keywords: Vec<String>,
    pub suggested_format: AnswerFormat,
}

// ============================================================
// RESUME STRUCTURES
// ============================================================

/// Source format tag for an uploaded resume.
///
/// Advisory only: it is echoed in the parse output and never branches
/// extraction logic. Binary-to-text decoding happens upstream.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Pdf,
    Docx,
    Txt,
}

#[derive(Error, Debug)]
pub enum FileTypeError {
    #[error("unsupported file type: {0}")]
    Unsupported(String),
}

impl FromStr for FileType {
    type Err = FileTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(FileType::Pdf),
            "docx" | "doc" => Ok(FileType::Docx),
            "txt" => Ok(FileType::Txt),
            other => Err(FileTypeError::Unsupported(other.to_string())),
        }
    }
}

/// Structured candidate profile produced by the resume pipeline.
///
/// Produced fresh on every invocation; every bounded list respects its cap
/// (extraction stops adding once full). All strings are substrings or light
/// transformations of the normalized input text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedResume {
    pub file_type: FileType,
    /// Additive field-presence score in [0, 1]
    pub parse_confidence: f32,
    pub name: Option<String>,
    pub title: Option<String>,
    pub summary: Option<String>,
    /// At most 5 entries
    pub experience: Vec<ExperienceEntry>,
    /// At most 30 entries, lowercase, no duplicates
    pub skills: Vec<String>,
    /// At most 3 entries
    pub education: Vec<EducationEntry>,
    /// At most 5 entries
    pub projects: Vec<ProjectEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub company: String,
    pub role: String,
    pub duration: Option<String>,
    /// Bullet-level detail is not parsed; always empty
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationEntry {
    /// Not extracted by this stage; always None
    pub institution: Option<String>,
    pub degree: String,
    pub year: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    /// At most 10 entries, drawn from the skills vocabulary
    pub technologies: Vec<String>,
}

//! Streaming Question Detector
//!
//! Consumes live transcript fragments one at a time and emits a classified
//! interview question once the buffered speech forms a complete utterance
//! that clears the confidence floor.
//!
//! One detector instance per interview session. The buffer is explicit
//! per-session state owned by the caller; calls for the same session must be
//! serialized, calls across sessions are independent.

use super::catalog::{
    INTERVIEW_PHRASES, QUESTION_INDICATORS, QUESTION_PATTERNS, QUESTION_WORD_RE, TECHNICAL_TERM_RE,
};
use super::types::{DetectedQuestion, QuestionType};

/// Buffers longer than this are discarded and reseeded with the incoming
/// fragment, so run-on speech cannot grow the buffer without bound.
const MAX_BUFFER_CHARS: usize = 500;

/// Emissions below this confidence are suppressed and the buffer retained.
const MIN_CONFIDENCE: f32 = 0.3;

const MAX_KEYWORDS: usize = 5;
const MAX_HISTORY: usize = 50;

/// Per-session question detector.
///
/// States are `empty` and `buffering`; emission and `clear_history` return
/// to `empty`, overflow reseeds `buffering` with the current fragment.
#[derive(Debug, Default)]
pub struct QuestionDetector {
    buffer: String,
    history: Vec<DetectedQuestion>,
}

impl QuestionDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one transcript fragment; returns a question if one resolved.
    ///
    /// The fragment is appended to the session buffer with a separating
    /// space. Incomplete or sub-threshold buffers return `None` and are
    /// retried on the next call.
    pub fn detect(&mut self, fragment: &str) -> Option<DetectedQuestion> {
        if self.buffer.chars().count() > MAX_BUFFER_CHARS {
            self.buffer = fragment.trim().to_string();
        } else {
            self.buffer = format!("{} {}", self.buffer, fragment).trim().to_string();
        }

        if !is_complete_utterance(&self.buffer) {
            return None;
        }

        let question = analyze_for_question(&self.buffer)?;

        log::debug!(
            "question detected: type={} confidence={:.2}",
            question.question_type.as_str(),
            question.confidence
        );
        self.buffer.clear();
        self.history.push(question.clone());
        if self.history.len() > MAX_HISTORY {
            self.history.remove(0);
        }
        Some(question)
    }

    /// Last `count` emitted questions, oldest first
    pub fn recent_questions(&self, count: usize) -> &[DetectedQuestion] {
        let start = self.history.len().saturating_sub(count);
        &self.history[start..]
    }

    /// Reset buffer and history to empty
    pub fn clear_history(&mut self) {
        self.buffer.clear();
        self.history.clear();
    }
}

/// A buffer is classifiable once it ends in terminal punctuation, or is at
/// least 8 words long and opens with a question indicator.
fn is_complete_utterance(text: &str) -> bool {
    let text = text.trim();
    if text.ends_with(['.', '?', '!']) {
        return true;
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() >= 8 {
        let first = words[0].to_lowercase();
        return QUESTION_INDICATORS.iter().any(|indicator| {
            let head = indicator.split_whitespace().next().unwrap_or(indicator);
            first.starts_with(head)
        });
    }

    false
}

/// Classify a complete utterance, or `None` below the confidence floor.
///
/// The question heuristic does not short-circuit classification: the
/// catalog is always consulted and the confidence floor filters
/// non-questions. A statement containing a strong pattern (e.g. "data
/// structure") can therefore still emit; that matches observed behavior of
/// the catalog and is relied upon by callers.
fn analyze_for_question(text: &str) -> Option<DetectedQuestion> {
    let lower = text.trim().to_lowercase();
    let looks_like = looks_like_question(&lower);

    // Iterate the catalog in declaration order; ties keep the first match.
    let mut best: Option<(QuestionType, f32)> = None;
    for (question_type, patterns) in QUESTION_PATTERNS.iter() {
        for pattern in patterns {
            if pattern.is_match(&lower) {
                let confidence = calculate_confidence(&lower);
                if best.map_or(true, |(_, c)| confidence > c) {
                    best = Some((*question_type, confidence));
                }
            }
        }
    }

    let (question_type, confidence) = match best {
        Some(found) => found,
        None if looks_like => (QuestionType::General, 0.5),
        None => return None,
    };

    if confidence < MIN_CONFIDENCE {
        return None;
    }

    Some(DetectedQuestion {
        text: clean_question_text(text),
        question_type,
        confidence,
        keywords: extract_keywords(&lower),
        suggested_format: question_type.suggested_format(),
    })
}

fn looks_like_question(lower: &str) -> bool {
    if lower.contains('?') {
        return true;
    }

    for indicator in QUESTION_INDICATORS {
        if lower.starts_with(&format!("{} ", indicator))
            || lower.starts_with(&format!("{},", indicator))
        {
            return true;
        }
    }

    INTERVIEW_PHRASES.iter().any(|phrase| lower.contains(phrase))
}

fn calculate_confidence(lower: &str) -> f32 {
    let mut confidence: f32 = 0.6;

    if lower.contains('?') {
        confidence += 0.2;
    }
    if QUESTION_WORD_RE.find_iter(lower).count() > 1 {
        confidence += 0.1;
    }
    if lower.split_whitespace().count() < 5 {
        confidence -= 0.2;
    }

    confidence.clamp(0.0, 1.0)
}

/// Up to 5 distinct lowercase technical terms found in the utterance
fn extract_keywords(lower: &str) -> Vec<String> {
    let mut keywords = Vec::new();
    for term in TECHNICAL_TERM_RE.find_iter(lower) {
        let term = term.as_str().to_string();
        if !keywords.contains(&term) {
            keywords.push(term);
            if keywords.len() == MAX_KEYWORDS {
                break;
            }
        }
    }
    keywords
}

/// Trim, capitalize the first character, ensure terminal punctuation
fn clean_question_text(text: &str) -> String {
    let trimmed = text.trim();
    let mut chars = trimmed.chars();
    let mut cleaned = match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    };

    if !cleaned.ends_with(['.', '?', '!']) {
        cleaned.push('?');
    }

    cleaned
}

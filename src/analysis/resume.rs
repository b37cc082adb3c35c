//! Resume Structuring Pipeline
//!
//! Turns already-decoded resume text into a typed candidate profile in one
//! pass: normalize, locate sections, run the field extractors, score.
//!
//! The pipeline is a pure function of its input and is total: malformed or
//! sparse text degrades to absent fields and a low confidence score, never
//! an error. Binary-to-text decoding for PDF/DOCX happens upstream; if the
//! decoder hands over a placeholder failure string it is parsed like any
//! other text and simply scores low.

use super::catalog::{
    EXPERIENCE_HEADERS, OTHER_SECTION_HEADERS, SKILL_KEYWORDS, SUMMARY_HEADERS,
};
use super::types::{EducationEntry, ExperienceEntry, FileType, ParsedResume, ProjectEntry};
use once_cell::sync::Lazy;
use regex::Regex;

const MAX_EXPERIENCE: usize = 5;
const MAX_SKILLS: usize = 30;
const MAX_EDUCATION: usize = 3;
const MAX_PROJECTS: usize = 5;
const MAX_TECHNOLOGIES: usize = 10;

// ============================================================
// COMPILED PATTERNS
// ============================================================

static SPACE_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r" +").expect("static pattern"));
static BLANK_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").expect("static pattern"));

/// 2-4 capitalized words, the preferred name shape
static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z][a-z]+\s+){1,3}[A-Z][a-z]+$").expect("static pattern"));

static TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)senior|junior|lead|principal|staff|engineer|developer|manager|director|analyst|designer|architect|consultant",
    )
    .expect("static pattern")
});

static CONTACT_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"@",
        r"\+?\d{1,3}[-.\s]?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}",
        r"(?i)linkedin\.com",
        r"(?i)github\.com",
        r"(?i)http",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static pattern"))
    .collect()
});

/// One anchored capture per summary header, tried in header order
static SUMMARY_SECTION_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    SUMMARY_HEADERS
        .iter()
        .map(|header| {
            Regex::new(&format!(
                r"(?i)(?:{header})[:\s]*([\s\S]*?)(?:\n\n|experience|education|skills|$)"
            ))
            .expect("static pattern")
        })
        .collect()
});

static EXPERIENCE_SECTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)(?:{})[:\s]*([\s\S]*?)(?:\n(?:education|skills|projects|certifications)|$)",
        EXPERIENCE_HEADERS.join("|")
    ))
    .expect("static pattern")
});

/// One `Company | Role | YYYY-YYYY` shaped line; separators may be
/// `|`, `•`, `-` or an en-dash, and the year range is optional
static EXPERIENCE_ENTRY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?im)^([a-z][^•|\n]*?)\s*[|•–-]\s*([^•|\n]+?)(?:\s*[|•–-]\s*(\d{4}\s*[–-]\s*(?:\d{4}|present|current)))?\s*$",
    )
    .expect("static pattern")
});

static SKILLS_SECTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:skills|technical skills|technologies)[:\s]*([^\n]+(?:\n[^\n]+)*?)(?:\n\n|experience|education|$)",
    )
    .expect("static pattern")
});

static SKILL_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,•|;]").expect("static pattern"));

static EDUCATION_SECTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:education|academic)[:\s]*([\s\S]*?)(?:\n\n|experience|skills|$)")
        .expect("static pattern")
});

static DEGREE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(bachelor|master|phd|doctorate|mba|bs|ba|ms|ma|bsc|msc)[^\n]*(?:in|of)?\s*([^\n,]*)")
        .expect("static pattern")
});

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(19|20)\d{2}\b").expect("static pattern"));

static PROJECTS_SECTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:projects|personal projects|side projects)[:\s]*([\s\S]*?)(?:\n\n|experience|education|skills|$)",
    )
    .expect("static pattern")
});

/// Everything before the first `:` / dash is the project name
static PROJECT_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[•*-]?\s*([^:–-]+)").expect("static pattern"));

// ============================================================
// PIPELINE ENTRY POINT
// ============================================================

/// Parse one resume text into a structured profile.
///
/// `file_type` is advisory and echoed in the output; extraction is purely
/// text-pattern based regardless of origin format.
pub fn parse_resume(raw_text: &str, file_type: FileType) -> ParsedResume {
    let normalized = normalize_text(raw_text);

    let name = extract_name(&normalized);
    let title = extract_title(&normalized);
    let summary = extract_summary(&normalized);
    let experience = extract_experience(&normalized);
    let skills = extract_skills(&normalized);
    let education = extract_education(&normalized);
    let projects = extract_projects(&normalized);

    let parse_confidence =
        calculate_confidence(&name, &title, &experience, &skills, &education);

    log::debug!(
        "resume parsed: confidence={:.2} skills={} experience={}",
        parse_confidence,
        skills.len(),
        experience.len()
    );

    ParsedResume {
        file_type,
        parse_confidence,
        name,
        title,
        summary,
        experience,
        skills,
        education,
        projects,
    }
}

// ============================================================
// NORMALIZATION
// ============================================================

/// Unify line endings, collapse horizontal whitespace runs, collapse blank
/// line runs to exactly one blank line, trim.
fn normalize_text(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n").replace('\t', " ");
    let text = SPACE_RUN_RE.replace_all(&text, " ");
    let text = BLANK_RUN_RE.replace_all(&text, "\n\n");
    text.trim().to_string()
}

// ============================================================
// FIELD EXTRACTORS
// ============================================================

/// Candidate name from the first 5 non-blank lines, skipping contact info
/// and section headers. A 2-4 capitalized-word line wins; otherwise the
/// first short line without an email sign.
fn extract_name(text: &str) -> Option<String> {
    for line in non_blank_lines(text).take(5) {
        if is_contact_info(line) || is_section_header(line) {
            continue;
        }

        if NAME_RE.is_match(line) {
            return Some(line.to_string());
        }

        let len = line.chars().count();
        if len > 3 && len < 50 && !line.contains('@') {
            return Some(line.to_string());
        }
    }

    None
}

/// First of the opening 10 non-blank lines carrying a seniority or role
/// keyword
fn extract_title(text: &str) -> Option<String> {
    for line in non_blank_lines(text).take(10) {
        let len = line.chars().count();
        if len > 5 && len < 80 && TITLE_RE.is_match(line) && !is_contact_info(line) {
            return Some(line.to_string());
        }
    }

    None
}

/// Professional summary anchored on a summary header; accepted only between
/// 50 and 999 characters, first qualifying header wins
fn extract_summary(text: &str) -> Option<String> {
    for re in SUMMARY_SECTION_RES.iter() {
        if let Some(m) = re.captures(text).and_then(|c| c.get(1)) {
            let summary = m.as_str().trim();
            let len = summary.chars().count();
            if len > 50 && len < 1000 {
                return Some(summary.to_string());
            }
        }
    }

    None
}

/// Work experience entries from the experience section, at most 5.
///
/// Bullet-level detail is not parsed, so `highlights` stays empty.
fn extract_experience(text: &str) -> Vec<ExperienceEntry> {
    let mut experience = Vec::new();

    let section = match EXPERIENCE_SECTION_RE.captures(text).and_then(|c| c.get(1)) {
        Some(m) => m.as_str(),
        None => return experience,
    };

    for caps in EXPERIENCE_ENTRY_RE.captures_iter(section) {
        if experience.len() >= MAX_EXPERIENCE {
            break;
        }

        let company = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
        let role = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");
        if company.is_empty() || role.is_empty() {
            continue;
        }

        experience.push(ExperienceEntry {
            company: company.to_string(),
            role: role.to_string(),
            duration: caps.get(3).map(|m| m.as_str().trim().to_string()),
            highlights: Vec::new(),
        });
    }

    experience
}

/// Union of skills-section items and known vocabulary terms found anywhere
/// in the text. Lowercase, no duplicates, stops adding at 30.
fn extract_skills(text: &str) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();
    let lower_text = text.to_lowercase();

    if let Some(m) = SKILLS_SECTION_RE.captures(text).and_then(|c| c.get(1)) {
        for item in SKILL_SPLIT_RE.split(m.as_str()) {
            let skill = item.trim().to_lowercase();
            let len = skill.chars().count();
            if len > 1 && len < 50 && !skills.contains(&skill) {
                skills.push(skill);
                if skills.len() >= MAX_SKILLS {
                    return skills;
                }
            }
        }
    }

    for skill in SKILL_KEYWORDS {
        if skills.len() >= MAX_SKILLS {
            break;
        }
        if lower_text.contains(skill) && !skills.iter().any(|s| s == skill) {
            skills.push((*skill).to_string());
        }
    }

    skills
}

/// Degree entries from the education section, at most 3.
///
/// Institution names are not extracted by this stage.
fn extract_education(text: &str) -> Vec<EducationEntry> {
    let mut education = Vec::new();

    let section = match EDUCATION_SECTION_RE.captures(text).and_then(|c| c.get(1)) {
        Some(m) => m.as_str(),
        None => return education,
    };

    for caps in DEGREE_RE.captures_iter(section) {
        if education.len() >= MAX_EDUCATION {
            break;
        }

        let degree = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        let field = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        let degree = format!("{} {}", degree, field).trim().to_string();

        let year = caps
            .get(0)
            .and_then(|whole| YEAR_RE.find(whole.as_str()))
            .map(|m| m.as_str().to_string());

        education.push(EducationEntry {
            institution: None,
            degree,
            year,
        });
    }

    education
}

/// Project entries from the projects section, at most 5, each with up to 10
/// vocabulary technologies scanned from its line
fn extract_projects(text: &str) -> Vec<ProjectEntry> {
    let mut projects = Vec::new();

    let section = match PROJECTS_SECTION_RE.captures(text).and_then(|c| c.get(1)) {
        Some(m) => m.as_str(),
        None => return projects,
    };

    for line in non_blank_lines(section) {
        if projects.len() >= MAX_PROJECTS {
            break;
        }
        if line.chars().count() < 10 {
            continue;
        }

        if let Some(name) = PROJECT_NAME_RE.captures(line).and_then(|c| c.get(1)) {
            projects.push(ProjectEntry {
                name: name.as_str().trim().to_string(),
                description: line.to_string(),
                technologies: extract_technologies(line),
            });
        }
    }

    projects
}

fn extract_technologies(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    SKILL_KEYWORDS
        .iter()
        .filter(|skill| lower.contains(*skill))
        .take(MAX_TECHNOLOGIES)
        .map(|s| (*s).to_string())
        .collect()
}

// ============================================================
// CLASSIFIERS & SCORING
// ============================================================

fn non_blank_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty())
}

fn is_contact_info(line: &str) -> bool {
    CONTACT_RES.iter().any(|re| re.is_match(line))
}

fn is_section_header(line: &str) -> bool {
    let lower = line.trim().to_lowercase();
    EXPERIENCE_HEADERS
        .iter()
        .chain(OTHER_SECTION_HEADERS.iter())
        .any(|h| lower == *h || lower.starts_with(&format!("{}:", h)))
}

/// Additive field-presence score, independent of field quality
fn calculate_confidence(
    name: &Option<String>,
    title: &Option<String>,
    experience: &[ExperienceEntry],
    skills: &[String],
    education: &[EducationEntry],
) -> f32 {
    let mut score: f32 = 0.0;

    if name.is_some() {
        score += 0.20;
    }
    if title.is_some() {
        score += 0.15;
    }
    if !experience.is_empty() {
        score += 0.25;
    }
    if !skills.is_empty() {
        score += 0.20;
    }
    if !education.is_empty() {
        score += 0.20;
    }

    score.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_RESUME: &str = "\
Jane Doe
Senior Software Engineer
jane@example.com | +1 555-123-4567

Summary
Seasoned backend engineer who enjoys building distributed systems, mentoring teammates, and shipping reliable services at scale.

Experience
Acme Corp | Software Engineer | 2019-2023
Globex Inc • Senior Developer • 2017 - 2019

Skills: Python, React, AWS

Education
BS Computer Science 2019

Projects

Weather Dashboard: React app with live maps
TinyDB - A toy database engine written in Rust";

    #[test]
    fn test_name_and_title() {
        let resume = parse_resume(FULL_RESUME, FileType::Txt);
        assert_eq!(resume.name.as_deref(), Some("Jane Doe"));
        assert!(resume.title.as_deref().unwrap().contains("Engineer"));
    }

    #[test]
    fn test_summary_extraction() {
        let resume = parse_resume(FULL_RESUME, FileType::Txt);
        let summary = resume.summary.expect("summary present");
        assert!(summary.starts_with("Seasoned backend engineer"));
        assert!(summary.len() > 50);
    }

    #[test]
    fn test_experience_entries() {
        let resume = parse_resume(FULL_RESUME, FileType::Txt);
        assert_eq!(resume.experience.len(), 2);

        let first = &resume.experience[0];
        assert_eq!(first.company, "Acme Corp");
        assert_eq!(first.role, "Software Engineer");
        assert_eq!(first.duration.as_deref(), Some("2019-2023"));
        assert!(first.highlights.is_empty());

        let second = &resume.experience[1];
        assert_eq!(second.company, "Globex Inc");
        assert_eq!(second.role, "Senior Developer");
        assert_eq!(second.duration.as_deref(), Some("2017 - 2019"));
    }

    #[test]
    fn test_skills_from_section_and_vocabulary() {
        let resume = parse_resume(FULL_RESUME, FileType::Txt);
        for expected in ["python", "react", "aws"] {
            assert!(
                resume.skills.iter().any(|s| s == expected),
                "missing skill {}",
                expected
            );
        }
        // set semantics: section item "python" and vocabulary "python" merge
        assert_eq!(resume.skills.iter().filter(|s| *s == "python").count(), 1);
        assert!(resume.skills.len() <= 30);
    }

    #[test]
    fn test_education_degree_and_year() {
        let resume = parse_resume(FULL_RESUME, FileType::Txt);
        assert_eq!(resume.education.len(), 1);
        let entry = &resume.education[0];
        assert!(entry.degree.to_lowercase().starts_with("bs"));
        assert_eq!(entry.year.as_deref(), Some("2019"));
        assert!(entry.institution.is_none());
    }

    #[test]
    fn test_projects_extraction() {
        let resume = parse_resume(FULL_RESUME, FileType::Txt);
        assert_eq!(resume.projects.len(), 2);
        assert_eq!(resume.projects[0].name, "Weather Dashboard");
        assert!(resume.projects[0].technologies.iter().any(|t| t == "react"));
        assert_eq!(resume.projects[1].name, "TinyDB");
        assert!(resume.projects[1].technologies.iter().any(|t| t == "rust"));
        for project in &resume.projects {
            assert!(project.technologies.len() <= 10);
        }
    }

    #[test]
    fn test_confidence_accumulates() {
        let resume = parse_resume(FULL_RESUME, FileType::Txt);
        // name + title + experience + skills + education all present
        assert!((resume.parse_confidence - 1.0).abs() < 1e-6);
        assert!((0.0..=1.0).contains(&resume.parse_confidence));
    }

    #[test]
    fn test_minimal_resume_confidence() {
        let text = "Jane Doe\nSenior Software Engineer\n\nSkills: Python, React, AWS\n\nEducation\nBS Computer Science 2019";
        let resume = parse_resume(text, FileType::Txt);
        assert_eq!(resume.name.as_deref(), Some("Jane Doe"));
        assert!(resume.title.is_some());
        assert!(!resume.skills.is_empty());
        assert_eq!(resume.education.len(), 1);
        assert_eq!(resume.education[0].year.as_deref(), Some("2019"));
        // name .20 + title .15 + skills .20 + education .20
        assert!(resume.parse_confidence >= 0.55);
    }

    #[test]
    fn test_empty_input_degrades() {
        let resume = parse_resume("", FileType::Pdf);
        assert!(resume.name.is_none());
        assert!(resume.title.is_none());
        assert!(resume.summary.is_none());
        assert!(resume.experience.is_empty());
        assert!(resume.skills.is_empty());
        assert!(resume.education.is_empty());
        assert!(resume.projects.is_empty());
        assert_eq!(resume.parse_confidence, 0.0);
        assert_eq!(resume.file_type, FileType::Pdf);
    }

    #[test]
    fn test_decoder_placeholder_is_ordinary_text() {
        // An upstream decoder failure string is parsed like any other text
        // and just scores low; callers must inspect parse_confidence.
        let resume = parse_resume("[document text extraction unavailable]", FileType::Docx);
        assert!(resume.experience.is_empty());
        assert!(resume.education.is_empty());
        assert!(resume.parse_confidence < 0.5);
    }

    #[test]
    fn test_skills_case_insensitive_dedup() {
        let text = "John Smith\n\nSkills: PYTHON, python, Python";
        let resume = parse_resume(text, FileType::Txt);
        assert_eq!(resume.skills.iter().filter(|s| *s == "python").count(), 1);
    }

    #[test]
    fn test_skills_cap_stops_adding() {
        let items: Vec<String> = (0..40).map(|i| format!("skill{:02}", i)).collect();
        let text = format!("John Smith\n\nSkills: {}", items.join(", "));
        let resume = parse_resume(&text, FileType::Txt);
        assert_eq!(resume.skills.len(), 30);
    }

    #[test]
    fn test_experience_cap() {
        let mut text = String::from("John Smith\n\nExperience\n");
        for i in 0..8 {
            text.push_str(&format!("Company{} | Engineer | 2010-2015\n", i));
        }
        let resume = parse_resume(&text, FileType::Txt);
        assert_eq!(resume.experience.len(), 5);
    }

    #[test]
    fn test_contact_lines_skipped_for_name() {
        let text = "jane@example.com\nlinkedin.com/in/janedoe\nJane Doe\nSenior Engineer";
        let resume = parse_resume(text, FileType::Txt);
        assert_eq!(resume.name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_name_fallback_short_line() {
        let text = "J. Doe\nSenior Software Engineer";
        let resume = parse_resume(text, FileType::Txt);
        assert_eq!(resume.name.as_deref(), Some("J. Doe"));
    }

    #[test]
    fn test_no_name_candidate() {
        let text = "https://github.com/janedoe\njane@example.com";
        let resume = parse_resume(text, FileType::Txt);
        assert!(resume.name.is_none());
    }

    #[test]
    fn test_normalization() {
        let normalized = normalize_text("Line1\r\nLine2\rLine3\tX  Y\n\n\n\nEnd");
        assert_eq!(normalized, "Line1\nLine2\nLine3 X Y\n\nEnd");
    }

    #[test]
    fn test_section_header_detection() {
        assert!(is_section_header("Education"));
        assert!(is_section_header("SKILLS: "));
        assert!(is_section_header("Work Experience"));
        assert!(!is_section_header("Jane Doe"));
    }
}

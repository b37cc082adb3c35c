//! Web API Module
//!
//! Exposes RESTful endpoints for the Interview Copilot clients. All
//! endpoints return JSON. Authentication, billing and the external
//! transcription/answer-generation proxies live in other services; this
//! surface carries session bookkeeping and the text-analysis core.

use crate::analysis::{
    detector::QuestionDetector,
    resume::parse_resume,
    types::{DetectedQuestion, FileType, ParsedResume},
};
use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

// ============================================================
// APPLICATION STATE
// ============================================================

/// Shared application state.
///
/// Every store is in-process memory; sessions do not survive a restart.
/// Each interview session owns exactly one detector instance, so transcript
/// fragments for a session always resolve against the same buffer.
pub struct AppState {
    pub sessions: Mutex<HashMap<String, InterviewSession>>,
    pub detectors: Mutex<HashMap<String, QuestionDetector>>,
    pub qa_history: Mutex<HashMap<String, Vec<QaPair>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            detectors: Mutex::new(HashMap::new()),
            qa_history: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// One live interview session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewSession {
    pub id: String,
    pub company_name: Option<String>,
    pub job_title: Option<String>,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub questions_count: usize,
}

/// A question/answer pair recorded against a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub question_type: String,
    pub answer: String,
    pub answer_length: String,
    pub timestamp: DateTime<Utc>,
}

// ============================================================
// API REQUEST/RESPONSE TYPES
// ============================================================

#[derive(Deserialize)]
pub struct CreateSessionRequest {
    pub company_name: Option<String>,
    pub job_title: Option<String>,
}

#[derive(Deserialize)]
pub struct DetectQuestionRequest {
    /// One increment of live transcript text
    pub text: String,
}

#[derive(Deserialize)]
pub struct AddQaRequest {
    pub question: String,
    pub question_type: String,
    pub answer: String,
    pub answer_length: String,
}

#[derive(Deserialize)]
pub struct ParseResumeRequest {
    /// Already-decoded document text; binary decoding happens upstream
    pub text: String,
    /// "pdf" | "docx" | "txt"
    pub file_type: String,
}

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: &str) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message.to_string()),
        }
    }
}

// ============================================================
// API HANDLERS
// ============================================================

async fn root() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "message": "Interview Copilot API v0.1.0"
    }))
}

async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339()
    }))
}

/// Create a new interview session with its own detector
async fn create_session(
    data: web::Data<Arc<AppState>>,
    req: web::Json<CreateSessionRequest>,
) -> impl Responder {
    let session = InterviewSession {
        id: Uuid::new_v4().to_string(),
        company_name: req.company_name.clone(),
        job_title: req.job_title.clone(),
        started_at: Utc::now(),
        ended_at: None,
        questions_count: 0,
    };

    {
        let mut sessions = data.sessions.lock().unwrap();
        sessions.insert(session.id.clone(), session.clone());
    }
    {
        let mut detectors = data.detectors.lock().unwrap();
        detectors.insert(session.id.clone(), QuestionDetector::new());
    }
    {
        let mut qa_history = data.qa_history.lock().unwrap();
        qa_history.insert(session.id.clone(), Vec::new());
    }

    log::info!("session created: {}", session.id);
    HttpResponse::Ok().json(ApiResponse::success(session))
}

/// List all sessions, most recent first
async fn get_sessions(data: web::Data<Arc<AppState>>) -> impl Responder {
    let sessions = data.sessions.lock().unwrap();
    let mut all: Vec<InterviewSession> = sessions.values().cloned().collect();
    all.sort_by(|a, b| b.started_at.cmp(&a.started_at));
    HttpResponse::Ok().json(ApiResponse::success(all))
}

async fn get_session(data: web::Data<Arc<AppState>>, path: web::Path<String>) -> impl Responder {
    let session_id = path.into_inner();

    let sessions = data.sessions.lock().unwrap();
    match sessions.get(&session_id) {
        Some(session) => HttpResponse::Ok().json(ApiResponse::success(session.clone())),
        None => HttpResponse::NotFound().json(ApiResponse::<()>::error("Session not found")),
    }
}

/// End a session; freezes the question count from the Q&A history
async fn end_session(data: web::Data<Arc<AppState>>, path: web::Path<String>) -> impl Responder {
    let session_id = path.into_inner();

    let qa_count = {
        let qa_history = data.qa_history.lock().unwrap();
        qa_history.get(&session_id).map(|h| h.len()).unwrap_or(0)
    };

    let mut sessions = data.sessions.lock().unwrap();
    match sessions.get_mut(&session_id) {
        Some(session) => {
            session.ended_at = Some(Utc::now());
            session.questions_count = qa_count;
            log::info!("session ended: {} ({} questions)", session_id, qa_count);
            HttpResponse::Ok().json(ApiResponse::success(session.clone()))
        }
        None => HttpResponse::NotFound().json(ApiResponse::<()>::error("Session not found")),
    }
}

/// Feed one transcript fragment to the session's detector.
///
/// Returns the detected question, or `data: null` while the buffer is
/// still accumulating. The detector map mutex serializes calls, so
/// fragments for one session are always applied in arrival order.
async fn detect_question(
    data: web::Data<Arc<AppState>>,
    path: web::Path<String>,
    req: web::Json<DetectQuestionRequest>,
) -> impl Responder {
    let session_id = path.into_inner();

    let mut detectors = data.detectors.lock().unwrap();
    match detectors.get_mut(&session_id) {
        Some(detector) => {
            let detected: Option<DetectedQuestion> = detector.detect(&req.text);
            if let Some(question) = &detected {
                log::info!(
                    "session {}: detected {} question (confidence {:.2})",
                    session_id,
                    question.question_type.as_str(),
                    question.confidence
                );
            }
            HttpResponse::Ok().json(ApiResponse::success(detected))
        }
        None => HttpResponse::NotFound().json(ApiResponse::<()>::error("Session not found")),
    }
}

/// Last detected questions for a session, oldest first
async fn get_recent_questions(
    data: web::Data<Arc<AppState>>,
    path: web::Path<String>,
) -> impl Responder {
    let session_id = path.into_inner();

    let detectors = data.detectors.lock().unwrap();
    match detectors.get(&session_id) {
        Some(detector) => {
            let recent: Vec<DetectedQuestion> = detector.recent_questions(10).to_vec();
            HttpResponse::Ok().json(ApiResponse::success(recent))
        }
        None => HttpResponse::NotFound().json(ApiResponse::<()>::error("Session not found")),
    }
}

/// Reset the session's transcript buffer and question history
async fn clear_history(data: web::Data<Arc<AppState>>, path: web::Path<String>) -> impl Responder {
    let session_id = path.into_inner();

    let mut detectors = data.detectors.lock().unwrap();
    match detectors.get_mut(&session_id) {
        Some(detector) => {
            detector.clear_history();
            HttpResponse::Ok().json(ApiResponse::success(serde_json::json!({"status": "ok"})))
        }
        None => HttpResponse::NotFound().json(ApiResponse::<()>::error("Session not found")),
    }
}

/// Record a question/answer pair against a session
async fn add_qa_pair(
    data: web::Data<Arc<AppState>>,
    path: web::Path<String>,
    req: web::Json<AddQaRequest>,
) -> impl Responder {
    let session_id = path.into_inner();

    {
        let sessions = data.sessions.lock().unwrap();
        if !sessions.contains_key(&session_id) {
            return HttpResponse::NotFound().json(ApiResponse::<()>::error("Session not found"));
        }
    }

    let pair = QaPair {
        question: req.question.clone(),
        question_type: req.question_type.clone(),
        answer: req.answer.clone(),
        answer_length: req.answer_length.clone(),
        timestamp: Utc::now(),
    };

    let mut qa_history = data.qa_history.lock().unwrap();
    let history = qa_history.entry(session_id).or_default();
    history.push(pair);

    HttpResponse::Ok().json(ApiResponse::success(
        serde_json::json!({"status": "ok", "count": history.len()}),
    ))
}

async fn get_qa_history(data: web::Data<Arc<AppState>>, path: web::Path<String>) -> impl Responder {
    let session_id = path.into_inner();

    {
        let sessions = data.sessions.lock().unwrap();
        if !sessions.contains_key(&session_id) {
            return HttpResponse::NotFound().json(ApiResponse::<()>::error("Session not found"));
        }
    }

    let qa_history = data.qa_history.lock().unwrap();
    let history = qa_history.get(&session_id).cloned().unwrap_or_default();
    HttpResponse::Ok().json(ApiResponse::success(history))
}

/// Structure already-decoded resume text into a candidate profile.
///
/// Never fails on sparse or garbled text; callers needing a hard failure
/// signal must inspect `parse_confidence`.
async fn parse_resume_handler(req: web::Json<ParseResumeRequest>) -> impl Responder {
    let file_type: FileType = match req.file_type.parse() {
        Ok(ft) => ft,
        Err(e) => {
            return HttpResponse::BadRequest().json(ApiResponse::<()>::error(&e.to_string()));
        }
    };

    let resume: ParsedResume = parse_resume(&req.text, file_type);
    log::info!(
        "resume parsed: file_type={} confidence={:.2}",
        req.file_type,
        resume.parse_confidence
    );

    HttpResponse::Ok().json(ApiResponse::success(resume))
}

// ============================================================
// SERVER CONFIGURATION
// ============================================================

/// Route table, shared between the server and handler tests
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .route("/health", web::get().to(health_check))
        .route("/api/sessions", web::post().to(create_session))
        .route("/api/sessions", web::get().to(get_sessions))
        .route("/api/sessions/{session_id}", web::get().to(get_session))
        .route("/api/sessions/{session_id}/end", web::post().to(end_session))
        .route(
            "/api/sessions/{session_id}/detect-question",
            web::post().to(detect_question),
        )
        .route(
            "/api/sessions/{session_id}/questions",
            web::get().to(get_recent_questions),
        )
        .route(
            "/api/sessions/{session_id}/clear-history",
            web::post().to(clear_history),
        )
        .route("/api/sessions/{session_id}/qa", web::post().to(add_qa_pair))
        .route("/api/sessions/{session_id}/qa", web::get().to(get_qa_history))
        .route("/api/parse-resume", web::post().to(parse_resume_handler));
}

/// Configure and run the API server
pub async fn run_server(host: &str, port: u16) -> std::io::Result<()> {
    let state = Arc::new(AppState::new());

    log::info!("Interview Copilot API starting at http://{}:{}", host, port);
    println!("API Endpoints:");
    println!("   POST /api/sessions                       - Create session");
    println!("   GET  /api/sessions                       - List sessions");
    println!("   GET  /api/sessions/:id                   - Get session");
    println!("   POST /api/sessions/:id/end               - End session");
    println!("   POST /api/sessions/:id/detect-question   - Feed transcript fragment");
    println!("   GET  /api/sessions/:id/questions         - Recent detected questions");
    println!("   POST /api/sessions/:id/clear-history     - Reset detector");
    println!("   POST /api/sessions/:id/qa                - Record Q&A pair");
    println!("   GET  /api/sessions/:id/qa                - Q&A history");
    println!("   POST /api/parse-resume                   - Structure resume text");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .wrap(cors)
            .app_data(web::Data::new(state.clone()))
            .configure(configure_routes)
    })
    .bind((host, port))?
    .run()
    .await
}

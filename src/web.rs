use actix_files::Files;
use actix_web::http::StatusCode;
use actix_web::{middleware, web, App, HttpResponse, HttpServer, ResponseError, Result};
use serde::Deserialize;
use std::sync::{Mutex, MutexGuard};
use tracing::info;

use crate::config::Config;
use crate::display::export_assignments_to_csv;
use crate::error::PlannerError;
use crate::storage::FileStorage;
use crate::timetable::slots::{self, slot_data};
use crate::timetable::views::{faculty_by_slot_combination, faculty_overview, grid, summary};
use crate::timetable::{AssignmentStore, FacultyUpdate, SlotRef};

pub struct AppState {
    pub store: Mutex<AssignmentStore<FileStorage>>,
}

impl AppState {
    pub fn new(store: AssignmentStore<FileStorage>) -> Self {
        Self { store: Mutex::new(store) }
    }
}

impl ResponseError for PlannerError {
    fn status_code(&self) -> StatusCode {
        match self {
            PlannerError::UnknownSlot(_)
            | PlannerError::LunchSlot
            | PlannerError::NoSlots
            | PlannerError::BlankFaculty => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({"success": false, "error": self.to_string()}))
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    slots: Vec<String>,
    // absent or null clears the whole assignment
    #[serde(default)]
    faculty_names: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveRequest {
    faculty_name: String,
    slot_codes: Vec<String>,
}

#[derive(Deserialize)]
pub struct GridQuery {
    #[serde(default)]
    available_only: bool,
}

fn lock_store(state: &AppState) -> Result<MutexGuard<'_, AssignmentStore<FileStorage>>> {
    state
        .store
        .lock()
        .map_err(|_| actix_web::error::ErrorInternalServerError("assignment store unavailable"))
}

/// Resolves requested codes against the slot table
fn resolve_slots(codes: &[String]) -> std::result::Result<Vec<SlotRef>, PlannerError> {
    if codes.is_empty() {
        return Err(PlannerError::NoSlots);
    }
    codes
        .iter()
        .map(|code| {
            let code = code.trim();
            if slots::is_lunch(code) {
                return Err(PlannerError::LunchSlot);
            }
            slots::locate(code).ok_or_else(|| PlannerError::UnknownSlot(code.to_string()))
        })
        .collect()
}

/// Trims names and drops blanks. A non-empty list made only of blanks is
/// rejected rather than read as "clear faculty".
fn clean_faculty_names(names: Option<Vec<String>>) -> std::result::Result<Option<Vec<String>>, PlannerError> {
    match names {
        Some(names) if !names.is_empty() => {
            let cleaned: Vec<String> = names
                .iter()
                .map(|name| name.trim())
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect();
            if cleaned.is_empty() {
                Err(PlannerError::BlankFaculty)
            } else {
                Ok(Some(cleaned))
            }
        }
        other => Ok(other),
    }
}

async fn get_slots() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(slot_data()))
}

async fn get_grid(query: web::Query<GridQuery>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let store = lock_store(&state)?;
    Ok(HttpResponse::Ok().json(grid(store.assignments(), query.available_only)))
}

async fn list_assignments(state: web::Data<AppState>) -> Result<HttpResponse> {
    let store = lock_store(&state)?;
    Ok(HttpResponse::Ok().json(store.assignments()))
}

async fn get_assignment(slot: web::Path<String>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let store = lock_store(&state)?;
    match store.get_assignment(slot.as_str()) {
        Some(assignment) => Ok(HttpResponse::Ok().json(assignment)),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "Slot not assigned"}))),
    }
}

async fn apply_assignment(req: web::Json<AssignRequest>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let req = req.into_inner();
    let slots = resolve_slots(&req.slots)?;
    let update = FacultyUpdate::from_names(clean_faculty_names(req.faculty_names)?);

    let mut store = lock_store(&state)?;
    store.apply_assignment(&slots, update);
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "assignments": store.assignments(),
    })))
}

async fn remove_faculty(req: web::Json<RemoveRequest>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let mut store = lock_store(&state)?;
    // Saved names are never trimmed, so match them exactly as sent
    store.remove_faculty_from_slots(&req.faculty_name, &req.slot_codes);
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "assignments": store.assignments(),
    })))
}

async fn clear_all(state: web::Data<AppState>) -> Result<HttpResponse> {
    let mut store = lock_store(&state)?;
    store.clear_all();
    Ok(HttpResponse::Ok().json(serde_json::json!({"success": true})))
}

async fn get_faculty(state: web::Data<AppState>) -> Result<HttpResponse> {
    let store = lock_store(&state)?;
    Ok(HttpResponse::Ok().json(faculty_by_slot_combination(store.assignments())))
}

async fn get_faculty_overview(state: web::Data<AppState>) -> Result<HttpResponse> {
    let store = lock_store(&state)?;
    Ok(HttpResponse::Ok().json(faculty_overview(store.assignments())))
}

async fn get_summary(state: web::Data<AppState>) -> Result<HttpResponse> {
    let store = lock_store(&state)?;
    Ok(HttpResponse::Ok().json(summary(store.assignments())))
}

async fn export_csv(state: web::Data<AppState>) -> Result<HttpResponse> {
    let store = lock_store(&state)?;
    let mut body = Vec::new();
    export_assignments_to_csv(store.assignments(), &mut body)?;
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(("Content-Disposition", "attachment; filename=\"timetable.csv\""))
        .body(body))
}

async fn index() -> Result<HttpResponse> {
    let html = include_str!("../templates/index.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

/// Registers the page and every API route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/api/slots", web::get().to(get_slots))
        .route("/api/grid", web::get().to(get_grid))
        .route("/api/faculty", web::get().to(get_faculty))
        .route("/api/faculty/overview", web::get().to(get_faculty_overview))
        .route("/api/summary", web::get().to(get_summary))
        .route("/api/export.csv", web::get().to(export_csv))
        .route("/api/assignments/remove", web::post().to(remove_faculty))
        .service(
            web::resource("/api/assignments")
                .route(web::get().to(list_assignments))
                .route(web::post().to(apply_assignment))
                .route(web::delete().to(clear_all)),
        )
        .service(web::resource("/api/assignments/{slot}").route(web::get().to(get_assignment)));
}

pub async fn start_server(config: Config) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState::new(config.open_store()));
    let static_dir = config.static_dir.clone();

    info!(host = %config.bind_host, port = config.port, "starting planner server");
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .service(Files::new("/static", static_dir.clone()))
            .configure(configure)
    })
    .bind((config.bind_host.as_str(), config.port))?
    .run()
    .await
}

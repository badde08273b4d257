use crate::application::{DashboardService, DatasetCache};
use crate::domain::dashboard_config::DashboardConfig;
use crate::domain::dataset::FilterParams;
use crate::domain::error::AppError;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

const MAX_LOG_ENTRIES: usize = 100;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub struct HttpState {
    pub cache: DatasetCache,
    pub service: DashboardService,
    pub export_file_name: String,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
}

impl HttpState {
    pub fn from_config(config: &DashboardConfig, logs: Arc<Mutex<Vec<LogEntry>>>) -> Self {
        Self {
            cache: DatasetCache::from_config(config),
            service: DashboardService::from_config(config),
            export_file_name: config.export_file_name.clone(),
            logs,
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[get("/dataset")]
async fn dataset_info(data: web::Data<HttpState>) -> impl Responder {
    match data.cache.session() {
        Ok(session) => HttpResponse::Ok().json(data.service.controls(&session)),
        Err(e) => error_response(&data.logs, e),
    }
}

#[post("/dashboard")]
async fn dashboard(data: web::Data<HttpState>, req: web::Json<FilterParams>) -> impl Responder {
    let session = match data.cache.session() {
        Ok(session) => session,
        Err(e) => return error_response(&data.logs, e),
    };

    match data.service.render(&session, &req) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(e) => error_response(&data.logs, e),
    }
}

#[post("/export")]
async fn export(data: web::Data<HttpState>, req: web::Json<FilterParams>) -> impl Responder {
    let session = match data.cache.session() {
        Ok(session) => session,
        Err(e) => return error_response(&data.logs, e),
    };

    match data.service.export(&session, &req) {
        Ok(bytes) => {
            add_log(
                &data.logs,
                "INFO",
                "Export",
                &format!("Exported {} bytes as {}", bytes.len(), data.export_file_name),
            );
            HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .insert_header((
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", data.export_file_name),
                ))
                .body(bytes)
        }
        Err(e) => error_response(&data.logs, e),
    }
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    let logs = data.logs.lock().unwrap_or_else(|p| p.into_inner());
    HttpResponse::Ok().json(logs.clone())
}

fn error_response(logs: &Mutex<Vec<LogEntry>>, err: AppError) -> HttpResponse {
    add_log(logs, "ERROR", "HttpApi", &err.to_string());

    let body = ErrorResponse {
        error: err.to_string(),
    };
    match err {
        e if e.is_fatal() => HttpResponse::ServiceUnavailable().json(body),
        AppError::ValidationError(_) => HttpResponse::BadRequest().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}

pub fn add_log_entry(
    logs: &Mutex<Vec<LogEntry>>,
    level: &str,
    source: &str,
    message: &str,
) -> LogEntry {
    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    let mut logs = logs.lock().unwrap_or_else(|p| p.into_inner());
    logs.push(entry.clone());
    if logs.len() > MAX_LOG_ENTRIES {
        logs.remove(0);
    }
    entry
}

pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    add_log_entry(logs, level, source, message);
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(dataset_info)
            .service(dashboard)
            .service(export)
            .service(get_logs),
    );
}

pub fn start_server(state: web::Data<HttpState>, host: &str, port: u16) -> std::io::Result<Server> {
    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Allow all origins for local tool

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((host, port))?
    .run();

    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test as actix_test;
    use std::fs;

    const HOLDINGS: &str = "번호,종목명,평가액(억 원),자산군 내 비중(퍼센트),지분율(퍼센트)\n\
        1,Apple,100,10,5\n\
        2,BANANA,50,20,50\n\
        3,cherry,200,5,1\n";

    fn state(dir: &std::path::Path) -> web::Data<HttpState> {
        let config = DashboardConfig {
            data_dir: dir.to_path_buf(),
            ..DashboardConfig::default()
        };
        web::Data::new(HttpState::from_config(
            &config,
            Arc::new(Mutex::new(Vec::new())),
        ))
    }

    #[actix_web::test]
    async fn test_dataset_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("국민연금.csv"), HOLDINGS).unwrap();
        let app = actix_test::init_service(App::new().app_data(state(dir.path())).configure(configure)).await;

        let req = actix_test::TestRequest::get().uri("/api/dataset").to_request();
        let body: serde_json::Value = actix_test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["info"]["fileName"], "국민연금.csv");
        assert_eq!(body["totalRows"], 3);
        assert_eq!(body["ranges"]["val"]["min"], 50.0);
        assert_eq!(body["ranges"]["val"]["max"], 200.0);
        assert_eq!(body["topNDefault"], 20);
    }

    #[actix_web::test]
    async fn test_dashboard_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("holdings.csv"), HOLDINGS).unwrap();
        let app = actix_test::init_service(App::new().app_data(state(dir.path())).configure(configure)).await;

        let req = actix_test::TestRequest::post()
            .uri("/api/dashboard")
            .set_json(serde_json::json!({ "keyword": "a", "topN": 5 }))
            .to_request();
        let body: serde_json::Value = actix_test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"]["filteredRows"], 2);
        assert_eq!(body["summary"]["totalValuation"], 150.0);
        assert_eq!(body["summary"]["topNShare"]["status"], "available");
    }

    #[actix_web::test]
    async fn test_dashboard_rejects_bad_top_n() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("holdings.csv"), HOLDINGS).unwrap();
        let app = actix_test::init_service(App::new().app_data(state(dir.path())).configure(configure)).await;

        let req = actix_test::TestRequest::post()
            .uri("/api/dashboard")
            .set_json(serde_json::json!({ "topN": 100 }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_no_data_is_service_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let data = state(dir.path());
        let app = actix_test::init_service(App::new().app_data(data.clone()).configure(configure)).await;

        let req = actix_test::TestRequest::get().uri("/api/dataset").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::SERVICE_UNAVAILABLE);

        let logs = data.logs.lock().unwrap();
        assert_eq!(logs.last().unwrap().level, "ERROR");
    }

    #[actix_web::test]
    async fn test_export_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("holdings.csv"), HOLDINGS).unwrap();
        let app = actix_test::init_service(App::new().app_data(state(dir.path())).configure(configure)).await;

        let req = actix_test::TestRequest::post()
            .uri("/api/export")
            .set_json(serde_json::json!({ "valRange": { "min": 60, "max": 250 } }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers().get(header::CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"filtered_result.csv\""
        );

        let body = actix_test::read_body(resp).await;
        let text = std::str::from_utf8(&body).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.starts_with("번호,종목명"));
    }

    #[test]
    fn test_log_buffer_is_bounded() {
        let logs = Mutex::new(Vec::new());
        for i in 0..(MAX_LOG_ENTRIES + 5) {
            add_log(&logs, "INFO", "Test", &format!("entry {}", i));
        }
        let logs = logs.into_inner().unwrap();
        assert_eq!(logs.len(), MAX_LOG_ENTRIES);
        assert_eq!(logs[0].message, "entry 5");
    }
}

use crate::core::{normalize, SearchEngine};
use crate::models::{
    ErrorResponse, HealthResponse, ProfileSummary, RecallResponse, SearchRequest, SearchResponse,
};
use crate::services::{DirectoryStore, RecallError, RecallStore, StoreError};
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DirectoryStore>,
    /// Absent when Redis is unavailable; search still works, the form just
    /// loses its memory.
    pub recall: Option<Arc<RecallStore>>,
    pub engine: SearchEngine,
}

/// Configure all search-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/search", web::post().to(search))
        .route("/search/recall", web::get().to(recall_criteria));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Privacy-aware directory search
///
/// POST /api/v1/search
///
/// Request body:
/// ```json
/// {
///   "accountId": "string",
///   "ageMin": 20,
///   "ageMax": 28,
///   "seeking": "MW|WM|MM|WW",
///   "collegeCountry": "string",
///   "collegeState": "string",
///   "collegeName": "string",
///   "fieldOfStudy": "string"
/// }
/// ```
async fn search(state: web::Data<AppState>, req: web::Json<SearchRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for search request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let criteria = match req.criteria() {
        Ok(criteria) => criteria,
        Err(message) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid seeking code".to_string(),
                message,
                status_code: 400,
            });
        }
    };

    let request_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(
        "Search {} for account {}: {:?}",
        request_id,
        req.account_id,
        criteria
    );

    // Resolve the requester context; a missing account is the one
    // caller-contract error this endpoint surfaces.
    let requester = match state.store.load_requester(&req.account_id).await {
        Ok(requester) => requester,
        Err(StoreError::AccountNotFound(account_id)) => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Account not found".to_string(),
                message: format!("No account with id {}", account_id),
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Failed to load requester {}: {}", req.account_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to load requester".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let fields = match state.store.list_fields_of_study().await {
        Ok(fields) => fields,
        Err(e) => {
            tracing::error!("Failed to load fields of study: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to load fields of study".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let today = chrono::Utc::now().date_naive();
    let predicate = normalize(&criteria, &fields, today);

    let pool = match state.store.load_candidates().await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to load candidate pool: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to load candidates".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let outcome = state.engine.search(&predicate, &requester, pool);

    tracing::info!(
        "Search {} returned {} of {} candidates ({} excluded by visibility rules)",
        request_id,
        outcome.profiles.len(),
        outcome.total_candidates,
        outcome.excluded
    );

    // Remember the submitted criteria for form pre-fill; best-effort and
    // strictly after the result computation.
    if let Some(recall) = &state.recall {
        if let Err(e) = recall.remember(&req.account_id, &criteria).await {
            tracing::warn!("Failed to remember criteria for {}: {}", req.account_id, e);
        }
    }

    let results: Vec<ProfileSummary> = outcome
        .profiles
        .iter()
        .map(|profile| ProfileSummary::from_profile(profile, today))
        .collect();

    HttpResponse::Ok().json(SearchResponse {
        request_id,
        total_results: results.len(),
        results,
    })
}

/// Last remembered search criteria for an account
///
/// GET /api/v1/search/recall?accountId={accountId}
async fn recall_criteria(
    state: web::Data<AppState>,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> impl Responder {
    let account_id = match query.get("accountId") {
        Some(id) => id,
        None => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Missing accountId parameter".to_string(),
                message: "accountId query parameter is required".to_string(),
                status_code: 400,
            });
        }
    };

    let Some(recall) = &state.recall else {
        return HttpResponse::Ok().json(RecallResponse {
            account_id: account_id.clone(),
            criteria: None,
        });
    };

    match recall.recall(account_id).await {
        Ok(criteria) => HttpResponse::Ok().json(RecallResponse {
            account_id: account_id.clone(),
            criteria: Some(criteria),
        }),
        Err(RecallError::Empty(_)) => HttpResponse::Ok().json(RecallResponse {
            account_id: account_id.clone(),
            criteria: None,
        }),
        Err(e) => {
            tracing::error!("Failed to recall criteria for {}: {}", account_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to recall criteria".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }
}

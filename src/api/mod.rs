mod handlers;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    routing::{get, post, put},
    Router,
};
use tokio::sync::Mutex as TokioMutex;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::db::Database;
use crate::suggest::SizeSuggester;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub suggester: Arc<dyn SizeSuggester>,
    project_locks: Arc<Mutex<HashMap<Uuid, Arc<TokioMutex<()>>>>>,
}

impl AppState {
    pub fn new(db: Database, suggester: Arc<dyn SizeSuggester>) -> Self {
        Self {
            db,
            suggester,
            project_locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Lock held across a load/mutate/save cycle on one project.
    pub fn project_lock(&self, id: Uuid) -> Arc<TokioMutex<()>> {
        let mut locks = match self.project_locks.lock() {
            Ok(locks) => locks,
            Err(poisoned) => poisoned.into_inner(),
        };
        locks
            .entry(id)
            .or_insert_with(|| Arc::new(TokioMutex::new(())))
            .clone()
    }

    /// Drop the lock entry of a deleted project.
    fn forget_project(&self, id: Uuid) {
        let mut locks = match self.project_locks.lock() {
            Ok(locks) => locks,
            Err(poisoned) => poisoned.into_inner(),
        };
        locks.remove(&id);
    }
}

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        // Projects
        .route(
            "/projects",
            get(handlers::list_projects).post(handlers::create_project),
        )
        .route(
            "/projects/{id}",
            get(handlers::get_project)
                .put(handlers::update_project)
                .delete(handlers::delete_project),
        )
        .route("/projects/{id}/cost-model", put(handlers::update_cost_model))
        // Features (scoped to their project)
        .route("/projects/{id}/features", post(handlers::add_feature))
        .route(
            "/projects/{id}/features/{feature_id}",
            put(handlers::update_feature).delete(handlers::delete_feature),
        )
        .route(
            "/projects/{id}/features/{feature_id}/suggestion",
            post(handlers::suggest_for_feature),
        )
        // Suggestions
        .route("/suggestions", post(handlers::suggest))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// Axum API Server Module
//
// JSON API over the selection engine, per-user compressor workspaces, the
// wire inventory, and the CSV downloads. Handlers stay thin: validation in
// `crate::input`, selection in `crate::selection`, state in `crate::store`.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::compressor::{Workspace, WorkspaceError};
use crate::config::Config;
use crate::export::{
    compressors_to_csv, selection_sheet_csv, EXPORT_FILENAME, SELECTION_SHEET_FILENAME,
};
use crate::input::InputError;
use crate::inventory::{Inventory, InventoryError, LENGTHS};
use crate::labels::{self, ComponentClass};
use crate::selection::{select_batch, SelectionInput, SelectionReport};
use crate::store::{InvalidUserId, InventoryStore, WorkspaceStore};
use crate::tables::reference_tables;

// ============================================================================
// Application State
// ============================================================================

/// Shared handles to the on-disk stores; each mutex admits one writer at a time
#[derive(Clone)]
pub struct AppState {
    pub inventory: Arc<Mutex<InventoryStore>>,
    pub workspaces: Arc<Mutex<WorkspaceStore>>,
}

impl AppState {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let inventory = InventoryStore::new(config.inventory_path());

        // Fail at start-up rather than on first request if the file is unreadable
        let stocked = inventory.read()?.entries().len();
        tracing::info!("Inventory loaded from {:?} ({} entries)", inventory.path(), stocked);

        let workspaces = WorkspaceStore::new(config.workspace_dir());
        tracing::info!("Workspaces stored under {:?}", config.workspace_dir());

        // Build tables now so the first request does not pay for it
        let tables = reference_tables();
        tracing::info!("Reference tables ready ({} cable gauges)", tables.cables.len());

        Ok(Self {
            inventory: Arc::new(Mutex::new(inventory)),
            workspaces: Arc::new(Mutex::new(workspaces)),
        })
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))

        // Stateless selection
        .route("/api/tables", get(get_tables))
        .route("/api/select", post(select_components))
        .route("/api/select/batch", post(select_components_batch))

        // Per-user compressor workspace
        .route(
            "/api/users/:user/compressors",
            get(list_compressors).post(add_compressor).delete(reset_compressors),
        )
        .route(
            "/api/users/:user/compressors/:index",
            put(edit_compressor).delete(delete_compressor),
        )
        .route("/api/users/:user/selection", post(select_compressor))
        .route("/api/users/:user/components/:class", get(component_detail))
        .route("/api/users/:user/export.csv", get(download_csv))
        .route("/api/users/:user/selection.csv", get(download_selection_csv))

        // Wire inventory
        .route("/api/inventory", get(get_inventory))
        .route("/api/inventory/search", get(search_inventory))
        .route("/api/inventory/add", post(add_inventory))
        .route("/api/inventory/remove", post(remove_inventory))

        // Middleware (applied in reverse order)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Request bodies
// ============================================================================

/// Load/ambient as sent by a form: numbers or numeric strings
#[derive(Debug, Deserialize)]
struct SelectRequest {
    load: Option<Value>,
    ambient: Option<Value>,
}

impl SelectRequest {
    fn input(&self) -> Result<SelectionInput, InputError> {
        SelectionInput::from_fields(
            field_text(self.load.as_ref()).as_deref(),
            field_text(self.ambient.as_ref()).as_deref(),
        )
    }
}

#[derive(Debug, Deserialize)]
struct BatchSelectRequest {
    inputs: Vec<SelectRequest>,
}

#[derive(Debug, Deserialize)]
struct CompressorForm {
    #[serde(default)]
    name: String,
    load: Option<Value>,
    ambient: Option<Value>,
}

impl CompressorForm {
    fn input(&self) -> Result<SelectionInput, InputError> {
        SelectionInput::from_fields(
            field_text(self.load.as_ref()).as_deref(),
            field_text(self.ambient.as_ref()).as_deref(),
        )
    }
}

#[derive(Debug, Deserialize)]
struct SelectCompressorRequest {
    index: usize,
}

#[derive(Debug, Deserialize)]
struct WireForm {
    wire_type: Option<String>,
    length: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct WireSearchQuery {
    wire_type: Option<String>,
}

/// Text of a JSON form value; `null` counts as absent
fn field_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

// ============================================================================
// Endpoint Handlers: selection
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn get_tables() -> impl IntoResponse {
    let tables = reference_tables();
    Json(json!({
        "tables": tables,
        "breaker_columns": tables.breaker_columns(),
    }))
}

fn report_json(report: &SelectionReport) -> Value {
    let labels: Map<String, Value> = ComponentClass::ALL
        .into_iter()
        .map(|class| {
            let label = labels::or_not_found(report.label(class));
            (class.as_str().to_string(), Value::String(label))
        })
        .collect();

    json!({
        "report": report,
        "labels": labels,
        "mms_range_label": labels::or_not_found(report.mms_range.as_ref().map(labels::mms_range_label)),
    })
}

async fn select_components(Json(req): Json<SelectRequest>) -> Result<Json<Value>, AppError> {
    let report = SelectionReport::compute(req.input()?);
    Ok(Json(report_json(&report)))
}

/// Many inputs at once; the selection runs on Rayon off the async runtime
async fn select_components_batch(
    Json(req): Json<BatchSelectRequest>,
) -> Result<Json<Value>, AppError> {
    let inputs = req
        .inputs
        .iter()
        .enumerate()
        .map(|(i, r)| {
            r.input()
                .map_err(|e| AppError::BadRequest(format!("Invalid input at position {}: {}", i, e)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let start = std::time::Instant::now();
    let reports = tokio::task::spawn_blocking(move || select_batch(&inputs))
        .await
        .map_err(|e| AppError::Internal(format!("Batch selection failed: {}", e)))?;
    tracing::debug!("Batch selection of {} inputs took {:?}", reports.len(), start.elapsed());

    let results: Vec<Value> = reports.iter().map(report_json).collect();
    Ok(Json(json!({
        "rows": results.len(),
        "results": results,
    })))
}

// ============================================================================
// Endpoint Handlers: workspace
// ============================================================================

/// Run store I/O on the blocking pool
async fn blocking<R>(f: impl FnOnce() -> anyhow::Result<R> + Send + 'static) -> Result<R, AppError>
where
    R: Send + 'static,
{
    let result = tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(format!("Store task failed: {}", e)))?;
    Ok(result?)
}

async fn read_workspace(state: &AppState, user: &str) -> Result<Workspace, AppError> {
    let workspaces = state.workspaces.lock().await;
    let store = workspaces.for_user(user)?;
    blocking(move || store.read()).await
}

/// Apply `f` to the user's workspace; persisted only when `f` succeeds
async fn update_workspace<R>(
    state: &AppState,
    user: &str,
    f: impl FnOnce(&mut Workspace) -> Result<R, WorkspaceError> + Send + 'static,
) -> Result<R, AppError>
where
    R: Send + 'static,
{
    let workspaces = state.workspaces.lock().await;
    let store = workspaces.for_user(user)?;
    Ok(blocking(move || store.try_update(f)).await??)
}

fn workspace_json(workspace: &Workspace, message: Option<String>) -> Json<Value> {
    Json(json!({
        "message": message,
        "compressors": workspace.compressors,
        "selected_index": workspace.selected_index,
    }))
}

async fn list_compressors(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<Json<Value>, AppError> {
    let workspace = read_workspace(&state, &user).await?;
    Ok(workspace_json(&workspace, None))
}

async fn add_compressor(
    State(state): State<AppState>,
    Path(user): Path<String>,
    Json(form): Json<CompressorForm>,
) -> Result<Json<Value>, AppError> {
    let input = form.input()?;
    let (name, workspace) = update_workspace(&state, &user, move |ws| {
        let name = ws.add(&form.name, input).name.clone();
        Ok((name, ws.clone()))
    })
    .await?;

    tracing::info!(user = %user, "Compressor {:?} added", name);
    Ok(workspace_json(&workspace, Some(format!("Compressor \"{}\" added.", name))))
}

async fn edit_compressor(
    State(state): State<AppState>,
    Path((user, index)): Path<(String, usize)>,
    Json(form): Json<CompressorForm>,
) -> Result<Json<Value>, AppError> {
    let input = form.input()?;
    let (name, workspace) = update_workspace(&state, &user, move |ws| {
        let name = ws.edit(index, &form.name, input)?.name.clone();
        Ok((name, ws.clone()))
    })
    .await?;

    Ok(workspace_json(&workspace, Some(format!("Compressor \"{}\" updated.", name))))
}

async fn delete_compressor(
    State(state): State<AppState>,
    Path((user, index)): Path<(String, usize)>,
) -> Result<Json<Value>, AppError> {
    let (removed, workspace) = update_workspace(&state, &user, move |ws| {
        let removed = ws.delete(index)?;
        Ok((removed, ws.clone()))
    })
    .await?;

    tracing::info!(user = %user, "Compressor {:?} deleted", removed.name);
    Ok(workspace_json(&workspace, Some(format!("Compressor \"{}\" deleted.", removed.name))))
}

async fn reset_compressors(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<Json<Value>, AppError> {
    let workspace = update_workspace(&state, &user, |ws| {
        ws.reset();
        Ok(ws.clone())
    })
    .await?;

    Ok(workspace_json(&workspace, Some("All compressors have been reset.".to_string())))
}

async fn select_compressor(
    State(state): State<AppState>,
    Path(user): Path<String>,
    Json(req): Json<SelectCompressorRequest>,
) -> Result<Json<Value>, AppError> {
    let (name, workspace) = update_workspace(&state, &user, move |ws| {
        let name = ws.select(req.index)?.name.clone();
        Ok((name, ws.clone()))
    })
    .await?;

    Ok(workspace_json(&workspace, Some(format!("Selected compressor: {}", name))))
}

/// Working and table for one component class of the selected compressor
async fn component_detail(
    State(state): State<AppState>,
    Path((user, class)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let class: ComponentClass = class.parse().map_err(AppError::BadRequest)?;
    let workspace = read_workspace(&state, &user).await?;
    let record = workspace.selected()?;
    let report = SelectionReport::compute(record.input());
    let tables = reference_tables();

    let detail = match class {
        ComponentClass::Cable => json!({
            "mca": report.mca,
            "selected_cable": report.cable,
            "cable_table": tables.cables,
        }),
        ComponentClass::Contactor => json!({
            "min_contactor_amp": report.contactor_min_rating,
            "selected_contactor": report.contactor,
            "contactor_table": tables.contactors,
        }),
        ComponentClass::CircuitBreaker => json!({
            "min_cb_amp": report.breaker_window.0,
            "max_cb_amp": report.breaker_window.1,
            "selected_cb": report.breakers,
            "cb_table_mcb": tables.mcb,
            "cb_table_mccb": tables.mccb,
            "cb_table_columns": tables.breaker_columns(),
        }),
        ComponentClass::Vfd => json!({
            "vfd_amp": report.vfd_target_current,
            "selected_vfd": report.vfd,
            "vfd_table": tables.vfd_frames().collect::<Vec<_>>(),
        }),
        ComponentClass::Mms => json!({
            "mms_ampacity": report.mms_adjusted_current,
            "selected_mms": report.mms_range,
            "mms_ranges": tables.mms_ranges,
            "mms_rating": report.mms_rating,
        }),
    };

    let label = match class {
        ComponentClass::Mms => report.mms_range.as_ref().map(labels::mms_range_label),
        other => report.label(other),
    };

    Ok(Json(json!({
        "component": class.as_str(),
        "selected_compressor": record,
        "load_current": record.load,
        "ambient_temp": record.ambient,
        "label": labels::or_not_found(label),
        "detail": detail,
    })))
}

fn csv_response(filename: &str, bytes: Vec<u8>) -> Response {
    let disposition = format!("attachment;filename={}", filename);
    (
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response()
}

async fn download_csv(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<Response, AppError> {
    let workspace = read_workspace(&state, &user).await?;
    let bytes = compressors_to_csv(&workspace.compressors)?;
    tracing::info!(user = %user, "Exported {} compressors", workspace.compressors.len());
    Ok(csv_response(EXPORT_FILENAME, bytes))
}

async fn download_selection_csv(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<Response, AppError> {
    let workspace = read_workspace(&state, &user).await?;
    let record = workspace.selected()?;
    let bytes = selection_sheet_csv(&SelectionReport::compute(record.input()))?;
    Ok(csv_response(SELECTION_SHEET_FILENAME, bytes))
}

// ============================================================================
// Endpoint Handlers: inventory
// ============================================================================

fn wire_fields(form: &WireForm, missing_message: &str) -> Result<(String, u32), AppError> {
    let wire_type = form
        .wire_type
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());
    let length = field_text(form.length.as_ref());

    let (wire_type, length) = match (wire_type, length) {
        (Some(t), Some(l)) => (t.to_string(), l),
        _ => return Err(AppError::BadRequest(missing_message.to_string())),
    };

    let length: u32 = length
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid length: {:?}", length)))?;
    if !LENGTHS.contains(&length) {
        return Err(AppError::BadRequest(format!(
            "Length must be between {} and {} m",
            LENGTHS.start(),
            LENGTHS.end()
        )));
    }

    Ok((wire_type, length))
}

async fn read_inventory(state: &AppState) -> Result<Inventory, AppError> {
    let guard = state.inventory.lock().await;
    let store = guard.clone();
    blocking(move || store.read()).await
}

/// Apply `f` to the inventory; persisted only when `f` succeeds
async fn update_inventory<R>(
    state: &AppState,
    f: impl FnOnce(&mut Inventory) -> Result<R, InventoryError> + Send + 'static,
) -> Result<R, AppError>
where
    R: Send + 'static,
{
    let guard = state.inventory.lock().await;
    let store = guard.clone();
    Ok(blocking(move || store.try_update(f)).await??)
}

async fn get_inventory(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let inventory = read_inventory(&state).await?;
    Ok(Json(json!({
        "inventory": inventory,
        "wire_types": inventory.wire_types(),
        "totals": inventory.totals_by_type(),
        "lengths": LENGTHS.collect::<Vec<_>>(),
    })))
}

async fn search_inventory(
    State(state): State<AppState>,
    Query(query): Query<WireSearchQuery>,
) -> Result<Json<Value>, AppError> {
    let wire_type = query
        .wire_type
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::BadRequest("Please select a wire type to search.".to_string()))?;

    let inventory = read_inventory(&state).await?;
    let results = inventory.search(wire_type);
    let message = if results.is_empty() {
        Some(format!("No lengths available for {}.", wire_type))
    } else {
        None
    };

    Ok(Json(json!({
        "message": message,
        "results": results,
    })))
}

async fn add_inventory(
    State(state): State<AppState>,
    Json(form): Json<WireForm>,
) -> Result<Json<Value>, AppError> {
    let (wire_type, length) = wire_fields(&form, "Please select wire type and length to add.")?;

    let stock = {
        let wire_type = wire_type.clone();
        update_inventory(&state, move |inv| inv.add(&wire_type, length).cloned()).await?
    };

    tracing::info!("Inventory +1 {} (now {})", stock.reference, stock.quantity);
    Ok(Json(json!({
        "message": format!("Added {} ({}m) to inventory.", wire_type, length),
        "stock": stock,
    })))
}

async fn remove_inventory(
    State(state): State<AppState>,
    Json(form): Json<WireForm>,
) -> Result<Json<Value>, AppError> {
    let (wire_type, length) = wire_fields(&form, "Please select wire type and length to remove.")?;

    let remaining = {
        let wire_type = wire_type.clone();
        update_inventory(&state, move |inv| inv.remove(&wire_type, length)).await?
    };

    tracing::info!("Inventory -1 {} ({}m), {} left", wire_type, length, remaining);
    Ok(Json(json!({
        "message": format!("Removed one {} ({}m) from inventory.", wire_type, length),
        "remaining": remaining,
    })))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        tracing::error!("Internal error: {:#}", err);
        AppError::Internal(format!("{:#}", err))
    }
}

impl From<InputError> for AppError {
    fn from(err: InputError) -> Self {
        AppError::BadRequest(format!("Invalid input: {}", err))
    }
}

impl From<InvalidUserId> for AppError {
    fn from(err: InvalidUserId) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<WorkspaceError> for AppError {
    fn from(err: WorkspaceError) -> Self {
        AppError::NotFound(err.to_string())
    }
}

impl From<InventoryError> for AppError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::InvalidWireType => AppError::BadRequest(err.to_string()),
            InventoryError::NotInStock { .. } => AppError::NotFound(err.to_string()),
            InventoryError::ReferenceConflict { .. } => AppError::Conflict(err.to_string()),
        }
    }
}

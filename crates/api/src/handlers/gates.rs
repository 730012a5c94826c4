//! Handlers for the `/gates` resource.
//!
//! All lifecycle decisions are delegated to the pure transition
//! functions in `launchos_core::gate`; these handlers only load state,
//! call into core, and persist the result. Role gating happens here and
//! nowhere else: cadastro operates gates, auditors decide them.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use launchos_core::error::CoreError;
use launchos_core::evidence::{validate_evidence_type, EvidenceRef};
use launchos_core::gate::{
    can_attach_evidence, is_checklist_editable, should_unlock, validate_rejection_reason,
    validate_reopen, validate_submit, validate_transition, GateCheckItem, GateStatus,
};
use launchos_core::types::DbId;
use launchos_db::models::gate::{GateRun, GateRunWithDef, UpdateGateRun};
use launchos_db::repositories::gate_repo::GateRunRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuditor, RequireAuth, RequireCadastro};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// JSONB projections
// ---------------------------------------------------------------------------

/// The core-typed view of a gate run row's JSONB columns.
struct GateView {
    status: GateStatus,
    checklist: Vec<GateCheckItem>,
    checks: HashMap<String, bool>,
    evidence_types: Vec<String>,
    evidence: Vec<EvidenceRef>,
}

impl GateView {
    fn from_row(run: &GateRunWithDef) -> Result<Self, AppError> {
        Ok(Self {
            status: GateStatus::from_str_value(&run.status)?,
            checklist: serde_json::from_value(run.checklist.clone())
                .map_err(|e| AppError::InternalError(format!("Corrupt gate checklist: {e}")))?,
            checks: serde_json::from_value(run.checks.clone())
                .map_err(|e| AppError::InternalError(format!("Corrupt gate checks: {e}")))?,
            evidence_types: serde_json::from_value(run.evidence_types.clone())
                .map_err(|e| AppError::InternalError(format!("Corrupt evidence types: {e}")))?,
            evidence: serde_json::from_value(run.evidence.clone())
                .map_err(|e| AppError::InternalError(format!("Corrupt gate evidence: {e}")))?,
        })
    }
}

async fn load_gate(state: &AppState, id: DbId) -> Result<GateRunWithDef, AppError> {
    GateRunRepo::get(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "GateRun",
            id,
        })
        .map_err(AppError::from)
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/v1/workspaces/{id}/gates
///
/// Sorted by `(marketplace_key, gate_order)`.
pub async fn list_by_workspace(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(workspace_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<GateRunWithDef>>>> {
    let gates = GateRunRepo::list_by_workspace(&state.pool, workspace_id).await?;
    Ok(Json(DataResponse { data: gates }))
}

/// GET /api/v1/gates/{id}
pub async fn get(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<GateRunWithDef>> {
    let gate = load_gate(&state, id).await?;
    Ok(Json(gate))
}

// ---------------------------------------------------------------------------
// Checklist and evidence
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ToggleCheck {
    pub key: String,
    pub checked: bool,
}

/// PATCH /api/v1/gates/{id}/checks
///
/// Toggles one checklist item. Only editable while the gate is
/// `in_progress`.
pub async fn patch_checks(
    State(state): State<AppState>,
    RequireCadastro(_user): RequireCadastro,
    Path(id): Path<DbId>,
    Json(input): Json<ToggleCheck>,
) -> AppResult<Json<GateRun>> {
    let gate = load_gate(&state, id).await?;
    let view = GateView::from_row(&gate)?;

    if !is_checklist_editable(view.status) {
        return Err(CoreError::Validation(format!(
            "Checklist is not editable while gate is {}",
            view.status.as_str()
        ))
        .into());
    }
    if !view.checklist.iter().any(|item| item.key == input.key) {
        return Err(CoreError::Validation(format!(
            "Unknown checklist item '{}'",
            input.key
        ))
        .into());
    }

    let mut checks = view.checks;
    checks.insert(input.key, input.checked);

    let updated = GateRunRepo::update(
        &state.pool,
        id,
        &UpdateGateRun {
            checks: Some(json!(checks)),
            ..Default::default()
        },
    )
    .await?;
    Ok(Json(updated))
}

#[derive(Debug, Deserialize)]
pub struct AttachEvidence {
    pub evidence_type: String,
    pub filename: String,
    pub url: String,
}

/// POST /api/v1/gates/{id}/evidence
///
/// Attaches an evidence artifact. Allowed at any point before approval.
pub async fn attach_evidence(
    State(state): State<AppState>,
    RequireCadastro(_user): RequireCadastro,
    Path(id): Path<DbId>,
    Json(input): Json<AttachEvidence>,
) -> AppResult<Json<GateRun>> {
    let gate = load_gate(&state, id).await?;
    let view = GateView::from_row(&gate)?;

    if !can_attach_evidence(view.status) {
        return Err(CoreError::Validation(format!(
            "Evidence cannot be attached while gate is {}",
            view.status.as_str()
        ))
        .into());
    }
    validate_evidence_type(&input.evidence_type)?;
    if !view.evidence_types.is_empty()
        && !view.evidence_types.contains(&input.evidence_type)
    {
        return Err(CoreError::Validation(format!(
            "This gate accepts evidence types: {}",
            view.evidence_types.join(", ")
        ))
        .into());
    }

    let mut evidence = view.evidence;
    evidence.push(EvidenceRef {
        id: Uuid::new_v4().to_string(),
        evidence_type: input.evidence_type,
        filename: input.filename,
        url: input.url,
        uploaded_at: Utc::now(),
    });

    let updated = GateRunRepo::update(
        &state.pool,
        id,
        &UpdateGateRun {
            evidence: Some(json!(evidence)),
            ..Default::default()
        },
    )
    .await?;
    Ok(Json(updated))
}

// ---------------------------------------------------------------------------
// Lifecycle transitions
// ---------------------------------------------------------------------------

/// POST /api/v1/gates/{id}/submit
///
/// Validates the submission preconditions (all required items checked,
/// evidence attached when the gate requires it) before transitioning.
pub async fn submit(
    State(state): State<AppState>,
    RequireCadastro(user): RequireCadastro,
    Path(id): Path<DbId>,
) -> AppResult<Json<GateRun>> {
    let gate = load_gate(&state, id).await?;
    let view = GateView::from_row(&gate)?;

    validate_transition(view.status, GateStatus::Submitted)?;
    validate_submit(
        &view.checklist,
        &view.checks,
        &view.evidence_types,
        view.evidence.len(),
    )?;

    let updated = GateRunRepo::update(
        &state.pool,
        id,
        &UpdateGateRun {
            status: Some(GateStatus::Submitted.as_str().to_string()),
            submitted_at: Some(Utc::now()),
            ..Default::default()
        },
    )
    .await?;

    super::record_activity(
        &state.pool,
        gate.workspace_id,
        &user,
        "gate_submitted",
        "gate_run",
        Some(id),
        Some(json!({ "gate_key": gate.gate_key, "marketplace": gate.marketplace_key })),
    )
    .await;
    Ok(Json(updated))
}

/// POST /api/v1/gates/{id}/approve
///
/// Approves a submitted gate and unlocks the next gate in the same
/// marketplace sequence, but only when that successor is still locked.
pub async fn approve(
    State(state): State<AppState>,
    RequireAuditor(user): RequireAuditor,
    Path(id): Path<DbId>,
) -> AppResult<Json<GateRun>> {
    let gate = load_gate(&state, id).await?;
    let status = GateStatus::from_str_value(&gate.status)?;
    validate_transition(status, GateStatus::Approved)?;

    let updated = GateRunRepo::update(
        &state.pool,
        id,
        &UpdateGateRun {
            status: Some(GateStatus::Approved.as_str().to_string()),
            decided_by: Some(user.user_id),
            decided_at: Some(Utc::now()),
            ..Default::default()
        },
    )
    .await?;

    unlock_successor(&state, &gate).await?;

    super::record_activity(
        &state.pool,
        gate.workspace_id,
        &user,
        "gate_approved",
        "gate_run",
        Some(id),
        Some(json!({ "gate_key": gate.gate_key, "marketplace": gate.marketplace_key })),
    )
    .await;
    Ok(Json(updated))
}

/// Unlock the next gate in the sequence if it is still locked. A
/// repeated approval never re-triggers the advance.
async fn unlock_successor(state: &AppState, gate: &GateRunWithDef) -> Result<(), AppError> {
    let successor = GateRunRepo::successor(
        &state.pool,
        gate.workspace_id,
        &gate.marketplace_key,
        gate.gate_order,
    )
    .await?;

    if let Some(next) = successor {
        let next_status = GateStatus::from_str_value(&next.status)?;
        if should_unlock(next_status) {
            GateRunRepo::update(
                &state.pool,
                next.id,
                &UpdateGateRun {
                    status: Some(GateStatus::InProgress.as_str().to_string()),
                    ..Default::default()
                },
            )
            .await?;
            tracing::info!(
                gate_run_id = next.id,
                gate_key = %next.gate_key,
                "Unlocked successor gate"
            );
        }
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct RejectGate {
    pub reason: String,
}

/// POST /api/v1/gates/{id}/reject
///
/// Rejects a submitted gate with a mandatory reason.
pub async fn reject(
    State(state): State<AppState>,
    RequireAuditor(user): RequireAuditor,
    Path(id): Path<DbId>,
    Json(input): Json<RejectGate>,
) -> AppResult<Json<GateRun>> {
    let gate = load_gate(&state, id).await?;
    let status = GateStatus::from_str_value(&gate.status)?;
    validate_transition(status, GateStatus::Rejected)?;
    validate_rejection_reason(&input.reason)?;

    let updated = GateRunRepo::update(
        &state.pool,
        id,
        &UpdateGateRun {
            status: Some(GateStatus::Rejected.as_str().to_string()),
            rejection_reason: Some(input.reason.trim().to_string()),
            decided_by: Some(user.user_id),
            decided_at: Some(Utc::now()),
            ..Default::default()
        },
    )
    .await?;

    super::record_activity(
        &state.pool,
        gate.workspace_id,
        &user,
        "gate_rejected",
        "gate_run",
        Some(id),
        Some(json!({ "gate_key": gate.gate_key, "reason": input.reason.trim() })),
    )
    .await;
    Ok(Json(updated))
}

/// POST /api/v1/gates/{id}/reopen
///
/// Returns a rejected gate to `in_progress` so the checklist can be
/// fixed and the gate resubmitted. Clears the rejection reason.
pub async fn reopen(
    State(state): State<AppState>,
    RequireCadastro(user): RequireCadastro,
    Path(id): Path<DbId>,
) -> AppResult<Json<GateRun>> {
    let gate = load_gate(&state, id).await?;
    let status = GateStatus::from_str_value(&gate.status)?;
    validate_reopen(status)?;

    GateRunRepo::update(
        &state.pool,
        id,
        &UpdateGateRun {
            status: Some(GateStatus::InProgress.as_str().to_string()),
            ..Default::default()
        },
    )
    .await?;
    let updated = GateRunRepo::clear_rejection(&state.pool, id).await?;

    super::record_activity(
        &state.pool,
        gate.workspace_id,
        &user,
        "gate_reopened",
        "gate_run",
        Some(id),
        None,
    )
    .await;
    Ok(Json(updated))
}

//! HTTP handlers.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde_json::{Value, json};

use crate::api_types::{
    AnalyzeRequest, AnalyzeResponse, AnswerResponse, ArchitectureRequest, DiagramResponse,
    PricingRequest, PricingResponse, QuestionRequest, Success, TerraformResponse,
};
use crate::error::ApiError;
use crate::state::AppState;

type ApiResult<T> = Result<Json<Success<T>>, ApiError>;

pub async fn healthz() -> Json<Value> {
    Json(json!({ "ok": true, "service": "archwright" }))
}

/// POST /analyze
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> ApiResult<AnalyzeResponse> {
    let Json(request) = payload?;
    tracing::debug!(
        chars = request.requirements.len(),
        include_diagram = request.include_diagram,
        include_terraform = request.include_terraform,
        "Analyze requested"
    );

    let architecture = state.pipeline().analyze(&request.requirements).await?;
    Ok(Json(Success::new(AnalyzeResponse { architecture })))
}

/// POST /generate-diagram
pub async fn generate_diagram(
    State(state): State<AppState>,
    payload: Result<Json<ArchitectureRequest>, JsonRejection>,
) -> ApiResult<DiagramResponse> {
    let Json(request) = payload?;
    let diagram_code = state
        .pipeline()
        .generate_diagram(&request.architecture)
        .await?;
    Ok(Json(Success::new(DiagramResponse { diagram_code })))
}

/// POST /generate-terraform
pub async fn generate_terraform(
    State(state): State<AppState>,
    payload: Result<Json<ArchitectureRequest>, JsonRejection>,
) -> ApiResult<TerraformResponse> {
    let Json(request) = payload?;
    let terraform_code = state
        .pipeline()
        .generate_infrastructure_code(&request.architecture)
        .await?;
    Ok(Json(Success::new(TerraformResponse { terraform_code })))
}

/// POST /get-pricing
pub async fn get_pricing(
    State(state): State<AppState>,
    payload: Result<Json<PricingRequest>, JsonRejection>,
) -> ApiResult<PricingResponse> {
    let Json(request) = payload?;
    let pricing = state.pipeline().get_pricing(&request.services).await;
    Ok(Json(Success::new(PricingResponse { pricing })))
}

/// POST /question
pub async fn question(
    State(state): State<AppState>,
    payload: Result<Json<QuestionRequest>, JsonRejection>,
) -> ApiResult<AnswerResponse> {
    let Json(request) = payload?;
    let answer = state
        .pipeline()
        .ask(&request.question, &request.context)
        .await?;
    Ok(Json(Success::new(AnswerResponse { answer })))
}

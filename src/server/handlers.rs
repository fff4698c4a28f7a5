//! Route handlers for the HTTP API

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use super::auth::RequestContext;
use super::error::{ApiError, ApiMessage};
use crate::error::VocabError;
use crate::practice::{practice_session, PracticeSession};
use crate::samples::{SampleSkill, SubmitSampleRequest, WordFrequency, WorkSample};
use crate::scores::{CreateScoreRequest, ScoreSummary, TestScore};
use crate::srs::{self, local_day, DueQueue, ReviewMode, ReviewRequest, ReviewStats};
use crate::vocabulary::{
    self, CategoryCount, CreateWordRequest, Difficulty, UpdateWordRequest, VocabularyWord, WordFilter,
};
use crate::AppState;

type ApiResult<T> = Result<T, ApiError>;

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|e| ApiError::BadRequest(e.body_text()))
}

fn query<T>(params: Result<Query<T>, QueryRejection>) -> ApiResult<T> {
    params
        .map(|Query(value)| value)
        .map_err(|e| ApiError::BadRequest(e.body_text()))
}

/// Run file-backed work on the blocking pool
async fn blocking<T, F>(state: &Arc<AppState>, work: F) -> ApiResult<T>
where
    F: FnOnce(&AppState) -> crate::error::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || work(&state))
        .await
        .map_err(|e| ApiError::Internal(format!("Task failed: {}", e)))?
        .map_err(ApiError::from)
}

fn parse_uuid(id: &str, what: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| VocabError::NotFound(format!("{} {}", what, id)).into())
}

pub async fn health() -> Json<ApiMessage> {
    Json(ApiMessage::ok("ok"))
}

// ==================== Words ====================

#[derive(Debug, Default, Deserialize)]
pub struct WordQuery {
    pub query: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub band: Option<u8>,
}

impl WordQuery {
    fn into_filter(self) -> ApiResult<WordFilter> {
        let difficulty = self
            .difficulty
            .filter(|d| !d.trim().is_empty())
            .map(|d| d.parse::<Difficulty>())
            .transpose()?;
        Ok(WordFilter {
            query: self.query,
            category: self.category,
            difficulty,
            band: self.band,
        })
    }
}

pub async fn list_words(
    _ctx: RequestContext,
    State(state): State<Arc<AppState>>,
    params: Result<Query<WordQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<VocabularyWord>>> {
    let filter = query(params)?.into_filter()?;
    let words = blocking(&state, move |s| vocabulary::search_words(s.store.as_ref(), &filter)).await?;
    Ok(Json(words))
}

pub async fn create_word(
    ctx: RequestContext,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateWordRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<VocabularyWord>)> {
    let request = body(payload)?;
    let word = blocking(&state, move |s| vocabulary::create_word(s.store.as_ref(), request)).await?;
    log::debug!("{} added word {}", ctx.user, word.id);
    Ok((StatusCode::CREATED, Json(word)))
}

pub async fn get_word(
    _ctx: RequestContext,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<VocabularyWord>> {
    Ok(Json(blocking(&state, move |s| s.store.get(&id)).await?))
}

pub async fn update_word(
    ctx: RequestContext,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateWordRequest>, JsonRejection>,
) -> ApiResult<Json<VocabularyWord>> {
    let request = body(payload)?;
    let word = blocking(&state, move |s| vocabulary::edit_word(s.store.as_ref(), &id, request)).await?;
    log::debug!("{} edited word {}", ctx.user, word.id);
    Ok(Json(word))
}

pub async fn delete_word(
    ctx: RequestContext,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiMessage>> {
    let target = id.clone();
    blocking(&state, move |s| vocabulary::delete_word(s.store.as_ref(), &target)).await?;
    log::debug!("{} deleted word {}", ctx.user, id);
    Ok(Json(ApiMessage::ok(format!("Deleted word {}", id))))
}

pub async fn list_categories(
    _ctx: RequestContext,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<CategoryCount>>> {
    Ok(Json(blocking(&state, |s| vocabulary::category_counts(s.store.as_ref())).await?))
}

// ==================== Reviews ====================

pub async fn record_review(
    ctx: RequestContext,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ReviewRequest>, JsonRejection>,
) -> ApiResult<Json<ApiMessage>> {
    let request = body(payload)?;
    let word = blocking(&state, move |s| s.recorder.record(&request)).await?;
    log::debug!("{} reviewed word {}", ctx.user, word.id);

    let next = word
        .next_review
        .map(|d| d.to_string())
        .unwrap_or_else(|| "unscheduled".to_string());
    Ok(Json(ApiMessage::ok(format!(
        "'{}' is now at level {}, next review {}",
        word.english, word.srs_level, next
    ))))
}

#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

pub async fn due_words(
    _ctx: RequestContext,
    State(state): State<Arc<AppState>>,
    params: Result<Query<LimitQuery>, QueryRejection>,
) -> ApiResult<Json<DueQueue>> {
    let limit = query(params)?.limit.unwrap_or(state.due_limit);
    let today = local_day(Utc::now());
    Ok(Json(blocking(&state, move |s| srs::due_queue(s.store.as_ref(), today, limit)).await?))
}

pub async fn review_stats(
    _ctx: RequestContext,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ReviewStats>> {
    let today = local_day(Utc::now());
    Ok(Json(blocking(&state, move |s| srs::review_stats(s.store.as_ref(), today)).await?))
}

#[derive(Debug, Default, Deserialize)]
pub struct PracticeQuery {
    pub mode: Option<String>,
    pub size: Option<usize>,
}

pub async fn practice(
    _ctx: RequestContext,
    State(state): State<Arc<AppState>>,
    params: Result<Query<PracticeQuery>, QueryRejection>,
) -> ApiResult<Json<PracticeSession>> {
    let params = query(params)?;
    let mode = match params.mode.as_deref() {
        Some(mode) => mode.parse::<ReviewMode>()?,
        None => ReviewMode::Flashcard,
    };
    let size = params.size.unwrap_or(state.due_limit);
    let today = local_day(Utc::now());

    let session = blocking(&state, move |s| {
        let mut rng = rand::thread_rng();
        practice_session(s.store.as_ref(), mode, today, size, &mut rng)
    })
    .await?;
    Ok(Json(session))
}

// ==================== Scores ====================

pub async fn list_scores(
    _ctx: RequestContext,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<TestScore>>> {
    Ok(Json(blocking(&state, |s| s.scores.list_scores()).await?))
}

pub async fn add_score(
    ctx: RequestContext,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateScoreRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TestScore>)> {
    let request = body(payload)?;
    let score = blocking(&state, move |s| s.scores.add_score(request)).await?;
    log::debug!("{} recorded score {}", ctx.user, score.id);
    Ok((StatusCode::CREATED, Json(score)))
}

pub async fn score_summary(
    _ctx: RequestContext,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ScoreSummary>> {
    Ok(Json(blocking(&state, |s| s.scores.summary()).await?))
}

pub async fn delete_score(
    _ctx: RequestContext,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiMessage>> {
    let score_id = parse_uuid(&id, "Score")?;
    blocking(&state, move |s| s.scores.delete_score(score_id)).await?;
    Ok(Json(ApiMessage::ok(format!("Deleted score {}", id))))
}

// ==================== Samples ====================

pub async fn list_samples(
    _ctx: RequestContext,
    State(state): State<Arc<AppState>>,
    Path(skill): Path<String>,
) -> ApiResult<Json<Vec<WorkSample>>> {
    let skill: SampleSkill = skill.parse()?;
    Ok(Json(blocking(&state, move |s| s.samples.list_samples(skill)).await?))
}

pub async fn submit_sample(
    ctx: RequestContext,
    State(state): State<Arc<AppState>>,
    Path(skill): Path<String>,
    payload: Result<Json<SubmitSampleRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<WorkSample>)> {
    let skill: SampleSkill = skill.parse()?;
    let request = body(payload)?;
    let sample = blocking(&state, move |s| s.samples.submit_sample(skill, request)).await?;
    log::debug!("{} submitted {} sample {}", ctx.user, skill, sample.id);
    Ok((StatusCode::CREATED, Json(sample)))
}

pub async fn delete_sample(
    _ctx: RequestContext,
    State(state): State<Arc<AppState>>,
    Path((skill, id)): Path<(String, String)>,
) -> ApiResult<Json<ApiMessage>> {
    let skill: SampleSkill = skill.parse()?;
    let sample_id = parse_uuid(&id, "Sample")?;
    blocking(&state, move |s| s.samples.delete_sample(skill, sample_id)).await?;
    Ok(Json(ApiMessage::ok(format!("Deleted sample {}", id))))
}

pub async fn word_frequencies(
    _ctx: RequestContext,
    State(state): State<Arc<AppState>>,
    Path(skill): Path<String>,
    params: Result<Query<LimitQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<WordFrequency>>> {
    let skill: SampleSkill = skill.parse()?;
    let limit = query(params)?.limit.unwrap_or(50);
    Ok(Json(blocking(&state, move |s| s.samples.top_words(skill, limit)).await?))
}

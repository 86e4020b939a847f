use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use catalog::{ImageRecord, SimilarImage};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Query string for `GET /api/v1/images/{id}/similar`
#[derive(Debug, Deserialize)]
pub struct SimilarQuery {
    /// Requested result count. Kept as text so a malformed value is
    /// reported as a 400 instead of axum's plain-text rejection.
    #[serde(default)]
    pub limit: Option<String>,
}

impl SimilarQuery {
    fn requested_limit(&self) -> ServerResult<Option<i64>> {
        match self.limit.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse::<i64>().map(Some).map_err(|_| {
                ServerError::BadRequest(format!("limit must be an integer, got {raw:?}"))
            }),
        }
    }
}

/// Similar images response
#[derive(Debug, Serialize, Deserialize)]
pub struct SimilarResponse {
    pub image_id: String,
    pub limit: usize,
    pub total: usize,
    pub results: Vec<SimilarHit>,
}

/// Single ranked image
#[derive(Debug, Serialize, Deserialize)]
pub struct SimilarHit {
    pub rank: usize,
    pub score: f32,
    pub tag_similarity: f32,
    pub embedding_similarity: f32,
    pub image: ImageRecord,
}

/// Find images similar to `{id}` within the same owner's collection.
///
/// Missing or negative `limit` falls back to the configured default,
/// `limit=0` returns no results and larger values are capped.
pub async fn similar_images(
    State(state): State<Arc<ServerState>>,
    Path(image_id): Path<String>,
    Query(query): Query<SimilarQuery>,
) -> ServerResult<impl IntoResponse> {
    let requested = query.requested_limit()?;
    let limit = state.similarity.policy().resolve(requested);

    let results = state.similarity.find_similar_top(&image_id, limit).await?;

    tracing::debug!(
        image_id = %image_id,
        limit,
        results = results.len(),
        "similar images served"
    );

    let results: Vec<SimilarHit> = results
        .into_iter()
        .enumerate()
        .map(|(i, hit)| SimilarHit {
            rank: i + 1,
            score: hit.score,
            tag_similarity: hit.tag_similarity,
            embedding_similarity: hit.embedding_similarity,
            image: hit.image,
        })
        .collect();

    Ok(Json(SimilarResponse {
        image_id: image_id.trim().to_ascii_lowercase(),
        limit,
        total: results.len(),
        results,
    }))
}

/// Compare request
#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub left_id: String,
    pub right_id: String,
}

/// Compare response
#[derive(Debug, Serialize, Deserialize)]
pub struct CompareResponse {
    pub left_id: String,
    pub right_id: String,
    pub score: f32,
    pub tag_similarity: f32,
    pub embedding_similarity: f32,
}

/// Score one image against another, regardless of owner.
pub async fn compare_images(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<CompareRequest>,
) -> ServerResult<impl IntoResponse> {
    let SimilarImage {
        image,
        score,
        tag_similarity,
        embedding_similarity,
    } = state
        .similarity
        .compare(&request.left_id, &request.right_id)
        .await?;

    Ok(Json(CompareResponse {
        left_id: request.left_id.trim().to_ascii_lowercase(),
        right_id: image.id.to_string(),
        score,
        tag_similarity,
        embedding_similarity,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(limit: Option<&str>) -> SimilarQuery {
        SimilarQuery {
            limit: limit.map(str::to_string),
        }
    }

    #[test]
    fn limit_parsing() {
        assert_eq!(query(None).requested_limit().unwrap(), None);
        assert_eq!(query(Some("")).requested_limit().unwrap(), None);
        assert_eq!(query(Some("5")).requested_limit().unwrap(), Some(5));
        assert_eq!(query(Some("-2")).requested_limit().unwrap(), Some(-2));
        assert!(matches!(
            query(Some("ten")).requested_limit(),
            Err(ServerError::BadRequest(_))
        ));
    }
}

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use reelnest_model::{
    NewVideo, Video, VideoID, VideoPatch, VideoWithRelations,
};
use serde::Deserialize;

use crate::auth::AuthenticatedAccount;
use crate::handlers::parse_id;
use crate::infra::{app_state::AppState, errors::AppResult};

#[derive(Debug, Default, Deserialize)]
pub struct ListVideosQuery {
    #[serde(default)]
    pub owned: bool,
}

pub async fn create_video(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
    Json(input): Json<NewVideo>,
) -> AppResult<(StatusCode, Json<Video>)> {
    let video = state.videos.create(input, caller.id()).await?;
    Ok((StatusCode::CREATED, Json(video)))
}

pub async fn list_videos(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
    Query(query): Query<ListVideosQuery>,
) -> AppResult<Json<Vec<Video>>> {
    Ok(Json(state.videos.list(caller.id(), query.owned).await?))
}

pub async fn get_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<VideoWithRelations>> {
    let id: VideoID = parse_id(&id)?;
    Ok(Json(state.videos.find(id).await?))
}

pub async fn update_video(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
    Path(id): Path<String>,
    Json(patch): Json<VideoPatch>,
) -> AppResult<Json<Video>> {
    let id: VideoID = parse_id(&id)?;
    Ok(Json(state.videos.update(id, patch, caller.id()).await?))
}

pub async fn publish_video(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
    Path(id): Path<String>,
) -> AppResult<Json<Video>> {
    let id: VideoID = parse_id(&id)?;
    Ok(Json(state.publication.publish(id, caller.id()).await?))
}

pub async fn unpublish_video(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
    Path(id): Path<String>,
) -> AppResult<Json<Video>> {
    let id: VideoID = parse_id(&id)?;
    Ok(Json(state.publication.unpublish(id, caller.id()).await?))
}

pub async fn like_video(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
    Path(id): Path<String>,
) -> AppResult<Json<VideoWithRelations>> {
    let id: VideoID = parse_id(&id)?;
    Ok(Json(state.engagement.like(caller.id(), id).await?))
}

pub async fn dislike_video(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
    Path(id): Path<String>,
) -> AppResult<Json<VideoWithRelations>> {
    let id: VideoID = parse_id(&id)?;
    Ok(Json(state.engagement.dislike(caller.id(), id).await?))
}

pub async fn favorite_video(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
    Path(id): Path<String>,
) -> AppResult<Json<VideoWithRelations>> {
    let id: VideoID = parse_id(&id)?;
    Ok(Json(state.engagement.add_to_favorites(caller.id(), id).await?))
}

pub async fn unfavorite_video(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
    Path(id): Path<String>,
) -> AppResult<Json<VideoWithRelations>> {
    let id: VideoID = parse_id(&id)?;
    Ok(Json(
        state
            .engagement
            .remove_from_favorites(caller.id(), id)
            .await?,
    ))
}

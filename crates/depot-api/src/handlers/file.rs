//! File node handlers: upload, lookup, listing, visibility, and content.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;

use depot_core::types::{PageRequest, RawParent};
use depot_entity::file::FileNode;

use crate::dto::request::{ContentQuery, ListFilesQuery, create_file_request};
use crate::error::ApiError;
use crate::extractors::{AuthUser, OptionalUser};
use crate::state::AppState;

/// Content type served when the name has no recognizable extension.
const DEFAULT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// POST /files
pub async fn upload(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Bytes,
) -> Result<(StatusCode, Json<FileNode>), ApiError> {
    let node = state.files.create(&auth, create_file_request(&body)).await?;
    Ok((StatusCode::CREATED, Json(node)))
}

/// GET /files/{id}
pub async fn show(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<FileNode>, ApiError> {
    Ok(Json(state.files.get_owned(&auth, &id).await?))
}

/// GET /files?parentId=..&page=..
pub async fn index(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListFilesQuery>,
) -> Result<Json<Vec<FileNode>>, ApiError> {
    let parent = RawParent::parse(query.parent_id.as_deref());
    let page = PageRequest::parse_lenient(query.page.as_deref());
    Ok(Json(state.files.list_children(&auth, &parent, page).await?))
}

/// PUT /files/{id}/publish
pub async fn publish(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<FileNode>, ApiError> {
    Ok(Json(state.files.set_visibility(&auth, &id, true).await?))
}

/// PUT /files/{id}/unpublish
pub async fn unpublish(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<FileNode>, ApiError> {
    Ok(Json(state.files.set_visibility(&auth, &id, false).await?))
}

/// GET /files/{id}/data?size=..
pub async fn content(
    State(state): State<AppState>,
    OptionalUser(requester): OptionalUser,
    Path(id): Path<String>,
    Query(query): Query<ContentQuery>,
) -> Result<Response, ApiError> {
    let content = state
        .files
        .read_content(&id, requester, query.size.as_deref())
        .await?;
    let content_type = content_type_for(&content.node.name);
    Ok(([(header::CONTENT_TYPE, content_type)], content.data).into_response())
}

/// Content type from the node name; text types are served as UTF-8.
pub fn content_type_for(name: &str) -> String {
    match mime_guess::from_path(name).first() {
        Some(mime) if mime.type_() == mime_guess::mime::TEXT && mime.get_param("charset").is_none() => {
            format!("{mime}; charset=utf-8")
        }
        Some(mime) => mime.to_string(),
        None => DEFAULT_CONTENT_TYPE.to_string(),
    }
}

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::get,
    Json, Router,
};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
    users::{
        dto::{AverageAgeResponse, IdResponse, UserPayload},
        repo_types::{User, UserJson},
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/usuarios", get(list_users).post(create_user))
        .route("/usuarios/", get(list_users).post(create_user))
        .route("/usuarios/promedio-edad", get(average_age))
        .route(
            "/usuarios/:id",
            get(find_user).put(update_user).delete(delete_user),
        )
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserJson>>> {
    let users = state.users.list_all().await.map_err(|e| {
        error!(error = %e, "list users failed");
        e
    })?;
    let body = users
        .iter()
        .map(User::to_json)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(body))
}

#[instrument(skip(state))]
pub async fn average_age(State(state): State<AppState>) -> ApiResult<Json<AverageAgeResponse>> {
    let promedio_edad = state.users.average_age().await.map_err(|e| {
        error!(error = %e, "average age failed");
        e
    })?;
    Ok(Json(AverageAgeResponse { promedio_edad }))
}

#[instrument(skip(state))]
pub async fn find_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<UserJson>> {
    // A key that is not a UUID cannot be in the table.
    let Ok(id) = Uuid::parse_str(&id) else {
        return Err(ApiError::not_found_empty());
    };
    match state.users.find(id).await {
        Ok(Some(user)) => Ok(Json(user.to_json()?)),
        Ok(None) => Err(ApiError::not_found_empty()),
        Err(e) => {
            error!(error = %e, %id, "find user failed");
            Err(e.into())
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> ApiResult<Json<IdResponse>> {
    let Json(payload) = payload.map_err(bad_body)?;
    let user = payload
        .into_user(Uuid::new_v4())
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let affected = state.users.insert(&user).await.map_err(|e| {
        error!(error = %e, "insert user failed");
        e
    })?;
    if affected != 1 {
        warn!(affected, "insert affected no rows");
        return Err(ApiError::not_found_message("Error al insertar el usuario"));
    }

    info!(user_id = %user.id, "user created");
    Ok(Json(IdResponse {
        id: user.id.to_string(),
    }))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> ApiResult<Json<IdResponse>> {
    const NOT_UPDATED: &str = "Ningun usuario actualizado.";

    let Json(payload) = payload.map_err(bad_body)?;
    let Ok(uuid) = Uuid::parse_str(&id) else {
        return Err(ApiError::not_found_message(NOT_UPDATED));
    };
    let user = payload
        .into_user(uuid)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let affected = state.users.update(&user).await.map_err(|e| {
        error!(error = %e, user_id = %uuid, "update user failed");
        e
    })?;
    if affected != 1 {
        warn!(user_id = %uuid, affected, "update matched no user");
        return Err(ApiError::not_found_message(NOT_UPDATED));
    }

    info!(user_id = %uuid, "user updated");
    Ok(Json(IdResponse { id }))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<IdResponse>> {
    const NOT_DELETED: &str = "Ningun usuario eliminado.";

    let Ok(uuid) = Uuid::parse_str(&id) else {
        return Err(ApiError::not_found_message(NOT_DELETED));
    };

    let affected = state.users.delete(&User::new(uuid)).await.map_err(|e| {
        error!(error = %e, user_id = %uuid, "delete user failed");
        e
    })?;
    if affected != 1 {
        warn!(user_id = %uuid, affected, "delete matched no user");
        return Err(ApiError::not_found_message(NOT_DELETED));
    }

    info!(user_id = %uuid, "user deleted");
    Ok(Json(IdResponse { id }))
}

fn bad_body(rejection: JsonRejection) -> ApiError {
    warn!(error = %rejection.body_text(), "rejected request body");
    ApiError::BadRequest(rejection.body_text())
}

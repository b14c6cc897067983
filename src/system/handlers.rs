use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tracing::{error, instrument};

use crate::{
    config::{ConfigError, SystemConfig},
    error::ApiResult,
    state::AppState,
};

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfo {
    pub name_system: String,
    pub version: String,
    pub developer: String,
    pub email: String,
}

impl SystemInfo {
    pub fn from_config(cfg: &SystemConfig) -> Result<Self, ConfigError> {
        fn require(value: &Option<String>, key: &'static str) -> Result<String, ConfigError> {
            value.clone().ok_or(ConfigError::Missing(key))
        }
        Ok(Self {
            name_system: require(&cfg.name, "SYSTEM_NAME")?,
            version: require(&cfg.version, "SYSTEM_VERSION")?,
            developer: require(&cfg.developer, "DEVELOPER_NAME")?,
            email: require(&cfg.email, "DEVELOPER_EMAIL")?,
        })
    }
}

pub fn status_routes() -> Router<AppState> {
    Router::new()
        .route("/estado", get(system_info))
        .route("/estado/", get(system_info))
}

#[instrument(skip(state))]
pub async fn system_info(State(state): State<AppState>) -> ApiResult<Json<SystemInfo>> {
    let info = SystemInfo::from_config(&state.config.system).map_err(|e| {
        error!(error = %e, "system metadata unavailable");
        e
    })?;
    Ok(Json(info))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::app::build_app;

    async fn get_status(state: AppState) -> (StatusCode, Value) {
        let res = build_app(state)
            .oneshot(Request::builder().uri("/estado/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn reports_configured_metadata() {
        let (status, body) = get_status(AppState::fake()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "nameSystem": "usuarios",
                "version": "1.0.0",
                "developer": "Equipo Usuarios",
                "email": "equipo@example.com"
            })
        );
    }

    #[tokio::test]
    async fn missing_key_is_500() {
        let state = AppState::fake();
        let mut config = (*state.config).clone();
        config.system.email = None;
        let state = state.with_config(Arc::new(config));

        let (status, body) = get_status(state).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({ "message": "missing configuration key DEVELOPER_EMAIL" })
        );
    }
}

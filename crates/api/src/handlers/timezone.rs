use axum::{extract::State, Json};
use serde::Serialize;
use zendo_core::{server_timezone_name, TimezoneSnapshot};

use crate::routes::AppState;

#[derive(Debug, Serialize)]
pub struct DebugTimezoneResponse {
    #[serde(flatten)]
    pub snapshot: TimezoneSnapshot,
    pub server_local_time: String,
}

#[derive(Debug, Serialize)]
pub struct ServerTimezonesResponse {
    pub timezones: String,
}

/// 当前配置的时区信息
pub async fn get_timezone(State(state): State<AppState>) -> Json<TimezoneSnapshot> {
    Json(state.clock.snapshot())
}

/// 时区信息，额外附带服务器本机时间
pub async fn debug_timezone(State(state): State<AppState>) -> Json<DebugTimezoneResponse> {
    Json(DebugTimezoneResponse {
        snapshot: state.clock.snapshot(),
        server_local_time: state.clock.server_local_time(),
    })
}

/// 服务器进程本机时区
pub async fn list_timezones() -> Json<ServerTimezonesResponse> {
    Json(ServerTimezonesResponse {
        timezones: server_timezone_name(),
    })
}

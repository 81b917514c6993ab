//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 登录与当前用户
//! - [`rooms`] - 房间目录
//! - [`bookings`] - 预订创建、查询、修改
//! - [`availability`] - 可用房间与日历
//! - [`cleaning`] - 清洁状态
//! - [`overview`] - 今日概览与房态板
//! - [`dashboard`] - 入住率统计与热门房间
//! - [`receipts`] - 收据
//! - [`bootstrap`] - 登录后一次性加载

pub mod query;

pub mod auth;
pub mod availability;
pub mod bookings;
pub mod bootstrap;
pub mod cleaning;
pub mod dashboard;
pub mod health;
pub mod overview;
pub mod receipts;
pub mod rooms;

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

/// 全部路由 (不含状态)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(rooms::router())
        .merge(bookings::router())
        .merge(availability::router())
        .merge(cleaning::router())
        .merge(overview::router())
        .merge(dashboard::router())
        .merge(receipts::router())
        .merge(bootstrap::router())
}

/// 完整应用: 路由 + JWT 中间件 + CORS + 请求追踪
pub fn build_router(state: ServerState) -> Router {
    build_app()
        // require_auth 内部跳过公共路由
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

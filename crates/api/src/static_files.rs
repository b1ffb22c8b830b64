//! 前端静态资源
//!
//! 未命中API路由的请求交给这里：存在的文件原样返回；缺失的静态资源返回404；
//! 其余路径视为前端路由，返回入口页面。

use axum::{
    body::Body,
    extract::Request,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::path::PathBuf;
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};
use tracing::debug;
use zendo_core::FrontendConfig;

const STATIC_EXTENSIONS: [&str; 12] = [
    ".js", ".css", ".png", ".jpg", ".jpeg", ".gif", ".svg", ".ico", ".woff", ".woff2", ".ttf",
    ".eot",
];

/// 请求路径是否指向静态资源文件
pub fn is_static_asset(path: &str) -> bool {
    let path = path.trim_start_matches('/');
    STATIC_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) || path.starts_with("_app/")
}

#[derive(Debug, Clone)]
pub struct StaticRoot {
    dir: PathBuf,
    index: PathBuf,
}

impl StaticRoot {
    pub fn new(config: &FrontendConfig) -> Self {
        Self {
            dir: config.static_dir.clone(),
            index: config.index_path(),
        }
    }
}

pub async fn serve_frontend(root: StaticRoot, request: Request) -> Response {
    let path = request.uri().path().to_owned();
    let headers = request.headers().clone();

    let response = match ServeDir::new(&root.dir).oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };

    if response.status() != StatusCode::NOT_FOUND || is_static_asset(&path) {
        return response.into_response();
    }

    debug!("前端路由回退: {} 不存在，返回入口页面", path);

    let mut index_request = Request::new(Body::empty());
    *index_request.headers_mut() = headers;

    match ServeFile::new(&root.index).oneshot(index_request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_asset_classification() {
        for path in [
            "/main.js",
            "/styles/app.css",
            "/logo.png",
            "/photo.jpeg",
            "/favicon.ico",
            "/fonts/inter.woff2",
            "/_app/immutable/entry",
            "_app/version.json",
        ] {
            assert!(is_static_asset(path), "{path} should be an asset");
        }

        for path in ["/", "/week/2024-01-07", "/settings", "/tasks/json", "/app/_app"] {
            assert!(!is_static_asset(path), "{path} should be a page");
        }
    }
}

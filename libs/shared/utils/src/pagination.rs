use axum::{
    http::{HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use shared_config::AppConfig;
use shared_models::error::AppError;
use shared_models::pagination::{Page, PageRequest};

pub const TOTAL_COUNT_HEADER: &str = "x-total-count";
pub const TOTAL_PAGES_HEADER: &str = "x-total-pages";

/// `?page=&limit=` on the bare collection routes.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

impl PageQuery {
    /// Neither `page` nor `limit` was given.
    pub fn is_unset(&self) -> bool {
        self.page.is_none() && self.limit.is_none()
    }

    pub fn resolve(self, config: &AppConfig) -> Result<PageRequest, AppError> {
        page_request(self.page, self.limit, config)
    }
}

/// `/page/{page}/limit/{limit}`
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PagePath {
    pub page: usize,
    pub limit: usize,
}

impl PagePath {
    pub fn resolve(self, config: &AppConfig) -> Result<PageRequest, AppError> {
        page_request(Some(self.page), Some(self.limit), config)
    }
}

/// Applies the configured defaults. A zero limit is rejected; limits over
/// the configured maximum are clamped to it.
pub fn page_request(
    page: Option<usize>,
    limit: Option<usize>,
    config: &AppConfig,
) -> Result<PageRequest, AppError> {
    let limit = limit.unwrap_or(config.default_page_limit);
    if limit == 0 {
        return Err(AppError::ValidationError("limit must be a positive integer".to_string()));
    }

    Ok(PageRequest {
        page: page.unwrap_or(0),
        limit: limit.min(config.max_page_limit),
    })
}

/// A page rendered as a bare JSON array, with the totals in headers.
pub struct PagedJson<T>(pub Page<T>);

impl<T: Serialize> IntoResponse for PagedJson<T> {
    fn into_response(self) -> Response {
        let PagedJson(page) = self;
        let total = page.total;
        let total_pages = page.total_pages();

        let mut response = Json(page.items).into_response();
        let headers = response.headers_mut();
        headers.insert(HeaderName::from_static(TOTAL_COUNT_HEADER), HeaderValue::from(total));
        headers.insert(HeaderName::from_static(TOTAL_PAGES_HEADER), HeaderValue::from(total_pages));
        response
    }
}

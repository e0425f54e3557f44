use serde::Serialize;
use utoipa::ToSchema;

use crate::application::dto::pagination::{PageMeta, PageRequest};
use crate::presentation::http::error::ApiError;

#[derive(Debug, Serialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageMetaResponse {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

impl From<PageMeta> for PageMetaResponse {
    fn from(m: PageMeta) -> Self {
        PageMetaResponse {
            total: m.total,
            page: m.page,
            limit: m.limit,
            total_pages: m.total_pages,
        }
    }
}

pub fn page_request(page: Option<i64>, limit: Option<i64>) -> Result<PageRequest, ApiError> {
    Ok(PageRequest::new(page, limit)?)
}

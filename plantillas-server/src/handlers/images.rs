use axum::{
    Json,
    extract::{RawQuery, State},
};
use plantillas_core::ImageFilter;
use plantillas_model::{ImagePage, PageParams, Pagination};

use crate::infra::{app_state::AppState, errors::AppResult};

/// Listing parameters pulled from a raw query string. `tag` may repeat;
/// for `page` and `limit` the first occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub tags: Vec<String>,
}

impl ListingQuery {
    pub fn parse(raw: Option<&str>) -> Self {
        let mut query = Self::default();
        let Some(raw) = raw else {
            return query;
        };

        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            match key.as_ref() {
                "page" if query.page.is_none() => {
                    query.page = Some(value.into_owned())
                }
                "limit" if query.limit.is_none() => {
                    query.limit = Some(value.into_owned())
                }
                "tag" if !value.is_empty() => query.tags.push(value.into_owned()),
                _ => {}
            }
        }
        query
    }

    pub fn pagination(&self, max_limit: i64) -> Pagination {
        Pagination::resolve(
            PageParams {
                page: self.page.as_deref(),
                limit: self.limit.as_deref(),
            },
            Some(max_limit),
        )
    }
}

/// GET /images - newest images first, paginated
pub async fn list_images_handler(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> AppResult<Json<ImagePage>> {
    let query = ListingQuery::parse(raw.as_deref());
    let pagination = query.pagination(state.config().max_page_limit);

    let page = state.catalog.list(&ImageFilter::All, pagination).await?;
    Ok(Json(page))
}

/// GET /images/hashtag - images sharing any of the `tag` values. Without
/// tags it answers exactly like `/images`.
pub async fn list_images_by_hashtag_handler(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> AppResult<Json<ImagePage>> {
    let query = ListingQuery::parse(raw.as_deref());
    let pagination = query.pagination(state.config().max_page_limit);

    let page = state.catalog.list_by_hashtags(query.tags, pagination).await?;
    Ok(Json(page))
}

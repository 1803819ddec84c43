use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::credential::models::AuthenticatedIdentity;
use crate::inbound::http::router::AppState;
use crate::user::models::Page;
use crate::user::models::PageRequest;
use crate::user::models::User;

pub async fn list_users(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedIdentity>,
    params: Result<Query<ListUsersParams>, QueryRejection>,
) -> Result<ApiSuccess<ListUsersResponseData>, ApiError> {
    // Unreadable paging parameters fall back to the defaults.
    let params = params.map(|Query(params)| params).unwrap_or_default();
    let request = PageRequest::new(params.page(), params.limit(), state.page_defaults);

    tracing::debug!(
        requested_by = %identity.username,
        page = request.page(),
        limit = request.limit(),
        "Listing users"
    );

    state
        .user_service
        .list_users(request)
        .await
        .map_err(ApiError::from)
        .map(|ref page| ApiSuccess::new(StatusCode::OK, page.into()))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListUsersParams {
    page: Option<String>,
    limit: Option<String>,
}

impl ListUsersParams {
    fn page(&self) -> Option<i64> {
        Self::number(self.page.as_deref())
    }

    fn limit(&self) -> Option<i64> {
        Self::number(self.limit.as_deref())
    }

    fn number(value: Option<&str>) -> Option<i64> {
        value.and_then(|v| v.parse().ok())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListUsersResponseData {
    pub current_page: u32,
    pub previous_page: Option<u32>,
    pub next_page: Option<u32>,
    pub total: u64,
    pub limit: u32,
    pub items: Vec<UserData>,
}

impl From<&Page<User>> for ListUsersResponseData {
    fn from(page: &Page<User>) -> Self {
        Self {
            current_page: page.page,
            previous_page: page.previous_page(),
            next_page: page.next_page(),
            total: page.total,
            limit: page.limit,
            items: page.items.iter().map(UserData::from).collect(),
        }
    }
}

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::error::ApiError;
use crate::models::{Comment, NewUser, Page, Pagination, Post, User, UserUpdate, UsersQuery};

const API_BASE_URL: &str = match option_env!("DIRECTORY_API_BASE_URL") {
    Some(value) => value,
    None => "https://gorest.co.in/public/v2",
};

const API_TOKEN: Option<&str> = option_env!("DIRECTORY_API_TOKEN");

fn endpoint(path: &str) -> String {
    format!(
        "{}/{}",
        API_BASE_URL.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn authorized(builder: RequestBuilder) -> RequestBuilder {
    let builder = builder.header("Accept", "application/json");
    match API_TOKEN.map(str::trim).filter(|token| !token.is_empty()) {
        Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
        None => builder,
    }
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}

async fn ensure_ok(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::from_response(status, &body))
}

async fn send(builder: RequestBuilder) -> Result<Response, ApiError> {
    let response = builder
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;
    ensure_ok(response).await
}

async fn send_json<B: Serialize>(builder: RequestBuilder, body: &B) -> Result<Response, ApiError> {
    let response = builder
        .json(body)
        .map_err(|err| ApiError::Encode(err.to_string()))?
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;
    ensure_ok(response).await
}

pub(crate) async fn get<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    debug!(path, "GET");
    let response = send(authorized(Request::get(&endpoint(path)))).await?;
    parse_json(response).await
}

pub(crate) async fn post<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    debug!(path, "POST");
    let response = send_json(authorized(Request::post(&endpoint(path))), body).await?;
    parse_json(response).await
}

pub(crate) async fn put<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    debug!(path, "PUT");
    let response = send_json(authorized(Request::put(&endpoint(path))), body).await?;
    parse_json(response).await
}

pub(crate) async fn delete(path: &str) -> Result<(), ApiError> {
    debug!(path, "DELETE");
    send(authorized(Request::delete(&endpoint(path)))).await?;
    Ok(())
}

pub(crate) async fn list_posts() -> Result<Vec<Post>, ApiError> {
    get("/posts").await
}

pub(crate) async fn list_comments(post_id: i64) -> Result<Vec<Comment>, ApiError> {
    get(&format!("/posts/{post_id}/comments")).await
}

pub(crate) async fn list_users(query: &UsersQuery) -> Result<Page<User>, ApiError> {
    debug!(?query, "GET /users");
    let builder = authorized(Request::get(&endpoint("/users"))).query(query.to_params());
    let response = send(builder).await?;

    let headers = response.headers();
    let pagination = Pagination::from_header_values(
        headers.get("x-pagination-total"),
        headers.get("x-pagination-pages"),
        headers.get("x-pagination-page"),
        headers.get("x-pagination-limit"),
    );
    let items = parse_json(response).await?;

    Ok(Page { items, pagination })
}

pub(crate) async fn create_user(user: &NewUser) -> Result<User, ApiError> {
    post("/users", user).await
}

pub(crate) async fn update_user(id: i64, update: &UserUpdate) -> Result<User, ApiError> {
    put(&format!("/users/{id}"), update).await
}

pub(crate) async fn delete_user(id: i64) -> Result<(), ApiError> {
    delete(&format!("/users/{id}")).await
}

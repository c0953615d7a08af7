use reqwest::header::{ACCEPT, HeaderMap};
use reqwest::{Client, Method, RequestBuilder};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{RequestError, RequestResult};
use crate::models::{Comment, NewUser, Page, Pagination, Post, User, UserUpdate, UsersQuery};

const PAGINATION_TOTAL: &str = "x-pagination-total";
const PAGINATION_PAGES: &str = "x-pagination-pages";
const PAGINATION_PAGE: &str = "x-pagination-page";
const PAGINATION_LIMIT: &str = "x-pagination-limit";

#[derive(Debug, Clone)]
/// HTTP-клиент REST API Directory Service.
///
/// Все методы принимают путь относительно базового URL и возвращают
/// декодированное тело ответа либо [`RequestError`].
pub struct DirectoryClient {
    base_url: String,
    token: Option<String>,
    client: Client,
}

impl DirectoryClient {
    /// Создаёт клиент по конфигурации.
    pub fn new(config: ClientConfig) -> RequestResult<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| RequestError::InvalidConfig(format!("failed to build http client: {err}")))?;

        Ok(Self {
            base_url: config.base_url,
            token: config.token,
            client,
        })
    }

    /// Базовый URL, к которому привязан клиент.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Есть ли у клиента токен доступа.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut request = self
            .client
            .request(method, self.endpoint(path))
            .header(ACCEPT, "application/json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request
    }

    /// Отправляет запрос и возвращает успешный ответ либо ошибку по статусу.
    async fn execute(
        &self,
        method: &Method,
        path: &str,
        request: RequestBuilder,
    ) -> RequestResult<reqwest::Response> {
        debug!(%method, path, "directory request");

        let response = request.send().await.map_err(|err| {
            warn!(%method, path, error = %err, "directory request failed");
            RequestError::from_reqwest(err)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = RequestError::from_http_status(status, &body);
            warn!(%method, path, %status, error = %err, "directory request rejected");
            return Err(err);
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> RequestResult<T> {
        let body = response.text().await.map_err(RequestError::from_reqwest)?;
        serde_json::from_str(&body).map_err(|err| RequestError::Decode(err.to_string()))
    }

    /// `GET {path}`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> RequestResult<T> {
        let response = self
            .execute(&Method::GET, path, self.request(Method::GET, path))
            .await?;
        Self::decode(response).await
    }

    /// `GET {path}?{query}`, вместе с заголовками ответа.
    pub async fn get_with_query<Q, T>(&self, path: &str, query: &Q) -> RequestResult<(T, HeaderMap)>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::GET, path).query(query);
        let response = self.execute(&Method::GET, path, request).await?;
        let headers = response.headers().clone();
        let body = Self::decode(response).await?;
        Ok((body, headers))
    }

    /// `POST {path}` с JSON-телом.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> RequestResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path).json(body);
        let response = self.execute(&Method::POST, path, request).await?;
        Self::decode(response).await
    }

    /// `PUT {path}` с JSON-телом.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> RequestResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::PUT, path).json(body);
        let response = self.execute(&Method::PUT, path, request).await?;
        Self::decode(response).await
    }

    /// `DELETE {path}`; тело ответа игнорируется.
    pub async fn delete(&self, path: &str) -> RequestResult<()> {
        self.execute(&Method::DELETE, path, self.request(Method::DELETE, path))
            .await?;
        Ok(())
    }

    /// Все посты в порядке сервиса.
    pub async fn list_posts(&self) -> RequestResult<Vec<Post>> {
        self.get("/posts").await
    }

    /// Комментарии поста `post_id`.
    pub async fn list_comments(&self, post_id: i64) -> RequestResult<Vec<Comment>> {
        self.get(&format!("/posts/{post_id}/comments")).await
    }

    /// Одна страница пользователей под фильтром по имени.
    pub async fn list_users(&self, query: &UsersQuery) -> RequestResult<Page<User>> {
        let (items, headers) = self.get_with_query::<_, Vec<User>>("/users", query).await?;
        Ok(Page {
            items,
            pagination: pagination_from_headers(&headers),
        })
    }

    /// Создаёт пользователя.
    pub async fn create_user(&self, user: &NewUser) -> RequestResult<User> {
        self.post("/users", user).await
    }

    /// Обновляет имя, email и статус пользователя.
    pub async fn update_user(&self, id: i64, update: &UserUpdate) -> RequestResult<User> {
        self.put(&format!("/users/{id}"), update).await
    }

    /// Удаляет пользователя.
    pub async fn delete_user(&self, id: i64) -> RequestResult<()> {
        self.delete(&format!("/users/{id}")).await
    }
}

fn header_number<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}

pub(crate) fn pagination_from_headers(headers: &HeaderMap) -> Option<Pagination> {
    Some(Pagination {
        total: header_number(headers, PAGINATION_TOTAL)?,
        pages: header_number(headers, PAGINATION_PAGES)?,
        page: header_number(headers, PAGINATION_PAGE)?,
        limit: header_number(headers, PAGINATION_LIMIT)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn client(base_url: &str) -> DirectoryClient {
        DirectoryClient::new(ClientConfig::new(base_url)).expect("client should build")
    }

    #[test]
    fn endpoint_normalizes_slashes() {
        let client = client("https://gorest.co.in/public/v2/");
        assert_eq!(
            client.endpoint("/users/42"),
            "https://gorest.co.in/public/v2/users/42"
        );
        assert_eq!(
            client.endpoint("posts"),
            "https://gorest.co.in/public/v2/posts"
        );
    }

    #[test]
    fn pagination_is_read_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(PAGINATION_TOTAL, HeaderValue::from_static("2875"));
        headers.insert(PAGINATION_PAGES, HeaderValue::from_static("288"));
        headers.insert(PAGINATION_PAGE, HeaderValue::from_static("1"));
        headers.insert(PAGINATION_LIMIT, HeaderValue::from_static("10"));

        let pagination = pagination_from_headers(&headers).expect("all headers present");
        assert_eq!(pagination.total, 2875);
        assert_eq!(pagination.pages, 288);
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.limit, 10);
    }

    #[test]
    fn pagination_is_none_when_any_header_is_missing_or_broken() {
        let mut headers = HeaderMap::new();
        headers.insert(PAGINATION_TOTAL, HeaderValue::from_static("10"));
        headers.insert(PAGINATION_PAGES, HeaderValue::from_static("1"));
        headers.insert(PAGINATION_PAGE, HeaderValue::from_static("1"));
        assert!(pagination_from_headers(&headers).is_none());

        headers.insert(PAGINATION_LIMIT, HeaderValue::from_static("ten"));
        assert!(pagination_from_headers(&headers).is_none());
    }
}

use serde::{Deserialize, Serialize};

pub const DEFAULT_PER_PAGE: u32 = 10;
pub const PER_PAGE_OPTIONS: [u32; 4] = [10, 20, 30, 50];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub gender: Gender,
    pub status: UserStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub gender: Gender,
    pub status: UserStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserUpdate {
    pub name: String,
    pub email: String,
    pub status: UserStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsersQuery {
    pub page: u32,
    pub per_page: u32,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub total: u64,
    pub pages: u32,
    pub page: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            _ => None,
        }
    }
}

impl UserStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

impl UsersQuery {
    /// Пары query-строки в порядке `page`, `per_page`, `name`.
    pub fn to_params(&self) -> [(&'static str, String); 3] {
        [
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
            ("name", self.name.clone()),
        ]
    }
}

impl Pagination {
    /// Собирает метаданные из значений заголовков `x-pagination-*`.
    pub fn from_header_values(
        total: Option<String>,
        pages: Option<String>,
        page: Option<String>,
        limit: Option<String>,
    ) -> Option<Self> {
        Some(Self {
            total: total?.trim().parse().ok()?,
            pages: pages?.trim().parse().ok()?,
            page: page?.trim().parse().ok()?,
            limit: limit?.trim().parse().ok()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_params_keep_empty_name() {
        let query = UsersQuery {
            page: 1,
            per_page: 10,
            name: String::new(),
        };
        let params = query.to_params();
        assert_eq!(params[0], ("page", "1".to_string()));
        assert_eq!(params[1], ("per_page", "10".to_string()));
        assert_eq!(params[2], ("name", String::new()));
    }

    #[test]
    fn pagination_requires_all_headers() {
        let full = Pagination::from_header_values(
            Some("21".into()),
            Some("3".into()),
            Some("1".into()),
            Some("10".into()),
        );
        assert_eq!(full.map(|p| p.pages), Some(3));

        let partial =
            Pagination::from_header_values(Some("21".into()), None, Some("1".into()), Some("10".into()));
        assert!(partial.is_none());
    }

    #[test]
    fn user_parses_from_service_json() {
        let raw = r#"{"id":1,"name":"Ann","email":"a@x.com","gender":"male","status":"active"}"#;
        let user: User = serde_json::from_str(raw).expect("user should parse");
        assert_eq!(user.gender, Gender::Male);
        assert_eq!(UserStatus::parse(user.status.as_str()), Some(UserStatus::Active));
    }
}

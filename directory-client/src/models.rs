use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Размер страницы пользователей по умолчанию.
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Допустимые размеры страницы в списке пользователей.
pub const PER_PAGE_OPTIONS: [u32; 4] = [10, 20, 30, 50];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Пост блога. Только для чтения.
pub struct Post {
    /// Идентификатор поста.
    pub id: i64,
    /// Идентификатор автора; локально не проверяется.
    pub user_id: i64,
    /// Заголовок.
    pub title: String,
    /// Текст поста.
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Комментарий к посту.
pub struct Comment {
    /// Идентификатор комментария.
    pub id: i64,
    /// Имя автора комментария.
    pub name: String,
    /// Email автора комментария.
    pub email: String,
    /// Текст комментария.
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Пол пользователя.
pub enum Gender {
    /// `male`
    Male,
    /// `female`
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Статус пользователя.
pub enum UserStatus {
    /// `active`
    Active,
    /// `inactive`
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Пользователь каталога.
pub struct User {
    /// Идентификатор, назначенный сервисом.
    pub id: i64,
    /// Имя.
    pub name: String,
    /// Email.
    pub email: String,
    /// Пол.
    pub gender: Gender,
    /// Статус.
    pub status: UserStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Тело запроса `POST /users`.
pub struct NewUser {
    /// Имя.
    pub name: String,
    /// Email.
    pub email: String,
    /// Пол.
    pub gender: Gender,
    /// Статус.
    pub status: UserStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Тело запроса `PUT /users/{id}`. Пол не редактируется.
pub struct UserUpdate {
    /// Имя.
    pub name: String,
    /// Email.
    pub email: String,
    /// Статус.
    pub status: UserStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Параметры `GET /users`.
pub struct UsersQuery {
    /// Номер страницы, начиная с 1.
    pub page: u32,
    /// Размер страницы.
    pub per_page: u32,
    /// Подстрока имени; пустая строка совпадает со всеми.
    pub name: String,
}

impl Default for UsersQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            name: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
/// Метаданные пагинации из заголовков `x-pagination-*`.
pub struct Pagination {
    /// Всего записей под фильтром.
    pub total: u64,
    /// Всего страниц.
    pub pages: u32,
    /// Текущая страница.
    pub page: u32,
    /// Размер страницы.
    pub limit: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Страница результатов списка.
pub struct Page<T> {
    /// Записи текущей страницы в порядке сервиса.
    pub items: Vec<T>,
    /// Метаданные, если сервис их прислал.
    pub pagination: Option<Pagination>,
}

impl Gender {
    /// Строковое значение для запросов и форм.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl UserStatus {
    /// Строковое значение для запросов и форм.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            other => Err(format!("unknown gender: {other}")),
        }
    }
}

impl FromStr for UserStatus {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(format!("unknown status: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_deserializes_lowercase_enums() {
        let raw = r#"{"id":42,"name":"Ann","email":"ann@x.com","gender":"female","status":"inactive"}"#;
        let user: User = serde_json::from_str(raw).expect("user should parse");
        assert_eq!(user.gender, Gender::Female);
        assert_eq!(user.status, UserStatus::Inactive);
    }

    #[test]
    fn update_body_has_no_gender() {
        let update = UserUpdate {
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            status: UserStatus::Active,
        };
        let value = serde_json::to_value(&update).expect("serializable");
        assert!(value.get("gender").is_none());
        assert_eq!(value["status"], "active");
    }

    #[test]
    fn enums_parse_only_exact_values() {
        assert_eq!("male".parse::<Gender>(), Ok(Gender::Male));
        assert!("Male".parse::<Gender>().is_err());
        assert!("".parse::<UserStatus>().is_err());
    }

    #[test]
    fn default_query_starts_at_first_page() {
        let query = UsersQuery::default();
        assert_eq!(query.page, 1);
        assert_eq!(query.per_page, DEFAULT_PER_PAGE);
        assert!(query.name.is_empty());
    }

    #[test]
    fn page_serializes_items_with_pagination() {
        let page = Page {
            items: vec![Post {
                id: 1,
                user_id: 7,
                title: "t".to_string(),
                body: "b".to_string(),
            }],
            pagination: Some(Pagination {
                total: 31,
                pages: 4,
                page: 2,
                limit: 10,
            }),
        };
        let value = serde_json::to_value(&page).expect("serializable");
        assert_eq!(value["items"][0]["user_id"], 7);
        assert_eq!(value["pagination"]["total"], 31);
        assert_eq!(value["pagination"]["pages"], 4);
    }
}

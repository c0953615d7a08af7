//! Клиентская библиотека для работы с REST API Directory Service.
//!
//! Сервис хранит посты, комментарии к ним и пользователей; клиент умеет
//! читать посты и комментарии, листать пользователей постранично с фильтром
//! по имени, а также создавать, обновлять и удалять пользователей.
//!
//! Все ошибки сводятся к [`RequestError`]: клиент ничего не кэширует и не
//! повторяет запросы.
#![warn(missing_docs)]

mod config;
mod error;
mod http_client;
mod models;

pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{FieldIssue, RequestError, RequestResult};
pub use http_client::DirectoryClient;
pub use models::{
    Comment, DEFAULT_PER_PAGE, Gender, NewUser, PER_PAGE_OPTIONS, Page, Pagination, Post, User,
    UserStatus, UserUpdate, UsersQuery,
};

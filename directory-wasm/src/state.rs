//! Состояния страниц без привязки к Leptos.
//!
//! Компоненты держат их в `RwSignal` и меняют только через методы ниже,
//! поэтому правила пагинации и отбрасывания устаревших ответов проверяются
//! обычными unit-тестами.

use crate::models::{Comment, DEFAULT_PER_PAGE, Page, Pagination, Post, User, UsersQuery};

/// Страница с таким или меньшим числом строк считается последней, если
/// сервис не прислал метаданные пагинации.
pub const LAST_PAGE_ROW_THRESHOLD: usize = 1;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
}

/// Монотонный счётчик запросов: применяется только ответ на последний.
#[derive(Debug, Clone, Default)]
struct RequestSeq {
    issued: u64,
}

impl RequestSeq {
    fn issue(&mut self) -> FetchTicket {
        self.issued += 1;
        FetchTicket { seq: self.issued }
    }

    fn is_latest(&self, ticket: FetchTicket) -> bool {
        ticket.seq == self.issued
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsersFetch {
    pub ticket: FetchTicket,
    pub query: UsersQuery,
}

#[derive(Debug, Clone)]
pub struct UserListState {
    page: u32,
    per_page: u32,
    search: String,
    users: Vec<User>,
    pagination: Option<Pagination>,
    load: LoadState,
    seq: RequestSeq,
}

impl Default for UserListState {
    fn default() -> Self {
        Self::new()
    }
}

impl UserListState {
    pub fn new() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            search: String::new(),
            users: Vec::new(),
            pagination: None,
            load: LoadState::Idle,
            seq: RequestSeq::default(),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn load(&self) -> &LoadState {
        &self.load
    }

    pub fn is_loading(&self) -> bool {
        self.load.is_loading()
    }

    pub fn query(&self) -> UsersQuery {
        UsersQuery {
            page: self.page,
            per_page: self.per_page,
            name: self.search.clone(),
        }
    }

    /// Возвращает `true`, если размер страницы изменился.
    pub fn set_per_page(&mut self, per_page: u32) -> bool {
        if per_page == 0 || per_page == self.per_page {
            return false;
        }
        self.per_page = per_page;
        self.page = 1;
        true
    }

    /// Применяет уже устоявшийся (после debounce) поисковый запрос.
    pub fn apply_search(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        if term == self.search {
            return false;
        }
        self.search = term;
        self.page = 1;
        true
    }

    pub fn can_prev(&self) -> bool {
        self.page > 1 && !self.is_loading()
    }

    pub fn can_next(&self) -> bool {
        if self.is_loading() {
            return false;
        }
        match self.pagination {
            Some(pagination) => self.page < pagination.pages,
            None => self.users.len() > LAST_PAGE_ROW_THRESHOLD,
        }
    }

    pub fn per_page_locked(&self) -> bool {
        self.is_loading() || self.users.len() <= LAST_PAGE_ROW_THRESHOLD
    }

    pub fn prev_page(&mut self) -> bool {
        if !self.can_prev() {
            return false;
        }
        self.page -= 1;
        true
    }

    pub fn next_page(&mut self) -> bool {
        if !self.can_next() {
            return false;
        }
        self.page += 1;
        true
    }

    pub fn begin_fetch(&mut self) -> UsersFetch {
        self.load = LoadState::Loading;
        UsersFetch {
            ticket: self.seq.issue(),
            query: self.query(),
        }
    }

    /// Применяет ответ; устаревший ответ ничего не меняет и даёт `false`.
    pub fn finish_fetch(&mut self, ticket: FetchTicket, result: Result<Page<User>, String>) -> bool {
        if !self.seq.is_latest(ticket) {
            return false;
        }
        match result {
            Ok(page) => {
                self.users = page.items;
                self.pagination = page.pagination;
                self.load = LoadState::Idle;
            }
            Err(message) => self.load = LoadState::Failed(message),
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Even,
    Odd,
}

impl Accent {
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 { Self::Even } else { Self::Odd }
    }

    pub fn class(self) -> &'static str {
        match self {
            Self::Even => "accent accent-even",
            Self::Odd => "accent accent-odd",
        }
    }
}

/// Последние три цифры id для значка комментария.
pub fn comment_badge(id: i64) -> String {
    let digits = id.to_string();
    let start = digits.len().saturating_sub(3);
    digits[start..].to_string()
}

#[derive(Debug, Clone, Default)]
pub struct PostListState {
    posts: Vec<Post>,
    load: LoadState,
    posts_seq: RequestSeq,
    comments: Vec<Comment>,
    comments_for: Option<i64>,
    comments_pending: Option<i64>,
    comments_open: bool,
    comments_error: Option<String>,
    comments_seq: RequestSeq,
}

impl PostListState {
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn load(&self) -> &LoadState {
        &self.load
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn comments_for(&self) -> Option<i64> {
        self.comments_for
    }

    pub fn comments_open(&self) -> bool {
        self.comments_open
    }

    pub fn comments_loading(&self) -> Option<i64> {
        self.comments_pending
    }

    pub fn comments_error(&self) -> Option<&str> {
        self.comments_error.as_deref()
    }

    pub fn begin_load(&mut self) -> FetchTicket {
        self.load = LoadState::Loading;
        self.posts_seq.issue()
    }

    /// При ошибке прежний список остаётся на месте.
    pub fn finish_load(&mut self, ticket: FetchTicket, result: Result<Vec<Post>, String>) -> bool {
        if !self.posts_seq.is_latest(ticket) {
            return false;
        }
        match result {
            Ok(posts) => {
                self.posts = posts;
                self.load = LoadState::Idle;
            }
            Err(message) => self.load = LoadState::Failed(message),
        }
        true
    }

    pub fn begin_comments(&mut self, post_id: i64) -> FetchTicket {
        self.comments_pending = Some(post_id);
        self.comments_error = None;
        self.comments_seq.issue()
    }

    /// Успех заменяет комментарии и открывает оверлей; ошибка его не открывает.
    pub fn finish_comments(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Comment>, String>,
    ) -> bool {
        if !self.comments_seq.is_latest(ticket) {
            return false;
        }
        let post_id = self.comments_pending.take();
        match result {
            Ok(comments) => {
                self.comments = comments;
                self.comments_for = post_id;
                self.comments_open = true;
            }
            Err(message) => self.comments_error = Some(message),
        }
        true
    }

    /// Закрывает оверлей; комментарии перезапишутся при следующем открытии.
    pub fn close_comments(&mut self) {
        self.comments_open = false;
    }
}

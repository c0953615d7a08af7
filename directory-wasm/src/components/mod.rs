pub(crate) mod modal;
pub(crate) mod posts_page;
pub(crate) mod user_forms;
pub(crate) mod users_page;

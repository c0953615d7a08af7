use crate::error::ApiError;
use crate::models::{Gender, NewUser, User, UserStatus, UserUpdate};

pub const NAME_REQUIRED: &str = "Please input name.";
pub const EMAIL_REQUIRED: &str = "Please input email.";
pub const GENDER_REQUIRED: &str = "Please select gender.";
pub const STATUS_REQUIRED: &str = "Please select status.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Gender,
    Status,
}

impl FormField {
    fn from_issue_field(field: &str) -> Option<Self> {
        match field {
            "name" => Some(Self::Name),
            "email" => Some(Self::Email),
            "gender" => Some(Self::Gender),
            "status" => Some(Self::Status),
            _ => None,
        }
    }
}

/// Сырые значения полей в том виде, в каком их ввёл пользователь.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub gender: String,
    pub status: String,
}

impl UserForm {
    fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            gender: user.gender.as_str().to_string(),
            status: user.status.as_str().to_string(),
        }
    }

    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::Name => self.name = value,
            FormField::Email => self.email = value,
            FormField::Gender => self.gender = value,
            FormField::Status => self.status = value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub status: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.gender.is_none() && self.status.is_none()
    }

    fn slot(&mut self, field: FormField) -> &mut Option<String> {
        match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Gender => &mut self.gender,
            FormField::Status => &mut self.status,
        }
    }

    /// Переносит замечания сервиса (`422`) на поля формы.
    fn apply_issues(&mut self, err: &ApiError) {
        for issue in err.field_issues() {
            if let Some(field) = FormField::from_issue_field(&issue.field) {
                *self.slot(field) = Some(format!("{} {}", capitalize(&issue.field), issue.message));
            }
        }
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn required(value: &str, message: &str, error: &mut Option<String>) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        *error = Some(message.to_string());
        return None;
    }
    *error = None;
    Some(value.to_string())
}

fn required_choice<T>(
    value: &str,
    parse: fn(&str) -> Option<T>,
    message: &str,
    error: &mut Option<String>,
) -> Option<T> {
    match parse(value.trim()) {
        Some(choice) => {
            *error = None;
            Some(choice)
        }
        None => {
            *error = Some(message.to_string());
            None
        }
    }
}

/// Проверяет все четыре поля; ошибки выставляются по каждому полю сразу.
pub fn validate_new_user(form: &UserForm) -> Result<NewUser, FieldErrors> {
    let mut errors = FieldErrors::default();
    let name = required(&form.name, NAME_REQUIRED, &mut errors.name);
    let email = required(&form.email, EMAIL_REQUIRED, &mut errors.email);
    let gender = required_choice(&form.gender, Gender::parse, GENDER_REQUIRED, &mut errors.gender);
    let status =
        required_choice(&form.status, UserStatus::parse, STATUS_REQUIRED, &mut errors.status);

    match (name, email, gender, status) {
        (Some(name), Some(email), Some(gender), Some(status)) => Ok(NewUser {
            name,
            email,
            gender,
            status,
        }),
        _ => Err(errors),
    }
}

/// Пол при редактировании не проверяется и не отправляется.
pub fn validate_user_update(form: &UserForm) -> Result<UserUpdate, FieldErrors> {
    let mut errors = FieldErrors::default();
    let name = required(&form.name, NAME_REQUIRED, &mut errors.name);
    let email = required(&form.email, EMAIL_REQUIRED, &mut errors.email);
    let status =
        required_choice(&form.status, UserStatus::parse, STATUS_REQUIRED, &mut errors.status);

    match (name, email, status) {
        (Some(name), Some(email), Some(status)) => Ok(UserUpdate {
            name,
            email,
            status,
        }),
        _ => Err(errors),
    }
}

#[derive(Debug, Clone, Default)]
pub struct AddUserForm {
    pub data: UserForm,
    pub errors: FieldErrors,
    pub open: bool,
    pub saving: bool,
    pub submit_error: Option<String>,
}

impl AddUserForm {
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Закрытие сбрасывает введённые значения и ошибки; во время сохранения игнорируется.
    pub fn close(&mut self) {
        if self.saving {
            return;
        }
        self.data = UserForm::default();
        self.errors = FieldErrors::default();
        self.submit_error = None;
        self.open = false;
    }

    pub fn set_field(&mut self, field: FormField, value: String) {
        self.data.set(field, value);
    }

    /// `Some` означает, что форма валидна и запрос нужно отправить.
    pub fn submit(&mut self) -> Option<NewUser> {
        if self.saving {
            return None;
        }
        match validate_new_user(&self.data) {
            Ok(user) => {
                self.errors = FieldErrors::default();
                self.submit_error = None;
                self.saving = true;
                Some(user)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    pub fn submit_succeeded(&mut self) {
        self.saving = false;
        self.close();
    }

    /// Форма остаётся открытой и заполненной, чтобы можно было повторить.
    pub fn submit_failed(&mut self, err: &ApiError) {
        self.saving = false;
        self.errors.apply_issues(err);
        self.submit_error = Some(err.to_string());
    }
}

#[derive(Debug, Clone)]
pub struct EditUserForm {
    id: i64,
    seed: UserForm,
    pub data: UserForm,
    pub errors: FieldErrors,
    pub open: bool,
    pub saving: bool,
    pub submit_error: Option<String>,
}

impl EditUserForm {
    pub fn new(user: &User) -> Self {
        let seed = UserForm::from_user(user);
        Self {
            id: user.id,
            data: seed.clone(),
            seed,
            errors: FieldErrors::default(),
            open: false,
            saving: false,
            submit_error: None,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Закрытие возвращает значения, с которыми форма была открыта.
    pub fn close(&mut self) {
        if self.saving {
            return;
        }
        self.data = self.seed.clone();
        self.errors = FieldErrors::default();
        self.submit_error = None;
        self.open = false;
    }

    pub fn set_field(&mut self, field: FormField, value: String) {
        if field == FormField::Gender {
            return;
        }
        self.data.set(field, value);
    }

    pub fn submit(&mut self) -> Option<(i64, UserUpdate)> {
        if self.saving {
            return None;
        }
        match validate_user_update(&self.data) {
            Ok(update) => {
                self.errors = FieldErrors::default();
                self.submit_error = None;
                self.saving = true;
                Some((self.id, update))
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    /// Отредактированные значения остаются в форме.
    pub fn submit_succeeded(&mut self) {
        self.saving = false;
        self.seed = self.data.clone();
        self.open = false;
    }

    /// Поле пола в форме не показывается, его замечание остаётся только в `submit_error`.
    pub fn submit_failed(&mut self, err: &ApiError) {
        self.saving = false;
        self.errors.apply_issues(err);
        self.errors.gender = None;
        self.submit_error = Some(err.to_string());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTarget {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct DeleteDialog {
    target: Option<DeleteTarget>,
    deleting: bool,
    error: Option<String>,
}

impl DeleteDialog {
    pub fn target(&self) -> Option<&DeleteTarget> {
        self.target.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn open(&mut self, id: i64, name: impl Into<String>) {
        self.target = Some(DeleteTarget {
            id,
            name: name.into(),
        });
        self.error = None;
    }

    /// Отмена без побочных эффектов; во время удаления игнорируется.
    pub fn cancel(&mut self) {
        if self.deleting {
            return;
        }
        self.target = None;
        self.error = None;
    }

    /// Возвращает id для единственного запроса удаления.
    pub fn confirm(&mut self) -> Option<i64> {
        if self.deleting {
            return None;
        }
        let id = self.target.as_ref()?.id;
        self.deleting = true;
        self.error = None;
        Some(id)
    }

    pub fn succeeded(&mut self) {
        self.deleting = false;
        self.target = None;
    }

    pub fn failed(&mut self, err: &ApiError) {
        self.deleting = false;
        self.error = Some(err.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldIssue;

    fn filled_add_form() -> AddUserForm {
        let mut form = AddUserForm::default();
        form.open();
        form.set_field(FormField::Name, "Alice".to_string());
        form.set_field(FormField::Email, "a@x.com".to_string());
        form.set_field(FormField::Gender, "female".to_string());
        form.set_field(FormField::Status, "active".to_string());
        form
    }

    fn sample_user() -> User {
        User {
            id: 42,
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            gender: Gender::Female,
            status: UserStatus::Active,
        }
    }

    #[test]
    fn add_submit_returns_body_for_valid_form() {
        let mut form = filled_add_form();
        let user = form.submit().expect("form is valid");
        assert_eq!(
            user,
            NewUser {
                name: "Alice".to_string(),
                email: "a@x.com".to_string(),
                gender: Gender::Female,
                status: UserStatus::Active,
            }
        );
        assert!(form.saving);
        assert!(form.errors.is_empty());
    }

    #[test]
    fn add_blank_name_blocks_submit_with_message() {
        let mut form = filled_add_form();
        form.set_field(FormField::Name, String::new());

        assert!(form.submit().is_none());
        assert_eq!(form.errors.name.as_deref(), Some(NAME_REQUIRED));
        assert_eq!(form.errors.name.as_deref(), Some("Please input name."));
        assert!(form.errors.email.is_none());
        assert!(!form.saving);
    }

    #[test]
    fn add_sets_every_failing_field_at_once() {
        let mut form = AddUserForm::default();
        form.set_field(FormField::Name, "   ".to_string());
        form.set_field(FormField::Email, "\t".to_string());

        assert!(form.submit().is_none());
        assert_eq!(form.errors.name.as_deref(), Some(NAME_REQUIRED));
        assert_eq!(form.errors.email.as_deref(), Some(EMAIL_REQUIRED));
        assert_eq!(form.errors.gender.as_deref(), Some(GENDER_REQUIRED));
        assert_eq!(form.errors.status.as_deref(), Some(STATUS_REQUIRED));
    }

    #[test]
    fn valid_resubmit_clears_previous_errors() {
        let mut form = filled_add_form();
        form.set_field(FormField::Email, " ".to_string());
        assert!(form.submit().is_none());
        assert!(form.errors.email.is_some());

        form.set_field(FormField::Email, "a@x.com".to_string());
        assert!(form.submit().is_some());
        assert!(form.errors.is_empty());
    }

    #[test]
    fn add_values_are_trimmed() {
        let mut form = filled_add_form();
        form.set_field(FormField::Name, "  Alice  ".to_string());
        let user = form.submit().expect("form is valid");
        assert_eq!(user.name, "Alice");
    }

    #[test]
    fn add_success_resets_and_closes() {
        let mut form = filled_add_form();
        form.submit();
        form.submit_succeeded();

        assert!(!form.open);
        assert!(!form.saving);
        assert_eq!(form.data, UserForm::default());
    }

    #[test]
    fn add_failure_keeps_form_open_and_maps_field_issues() {
        let mut form = filled_add_form();
        form.submit();
        form.submit_failed(&ApiError::Validation(vec![FieldIssue {
            field: "email".to_string(),
            message: "has already been taken".to_string(),
        }]));

        assert!(form.open);
        assert!(!form.saving);
        assert_eq!(form.data.name, "Alice");
        assert_eq!(form.errors.email.as_deref(), Some("Email has already been taken"));
        assert!(form.submit_error.is_some());
    }

    #[test]
    fn add_close_discards_input() {
        let mut form = filled_add_form();
        form.set_field(FormField::Name, String::new());
        form.submit();
        form.close();

        assert!(!form.open);
        assert_eq!(form.data, UserForm::default());
        assert!(form.errors.is_empty());
    }

    #[test]
    fn add_does_not_submit_twice_while_saving() {
        let mut form = filled_add_form();
        assert!(form.submit().is_some());
        assert!(form.submit().is_none());
    }

    #[test]
    fn add_close_is_ignored_while_saving() {
        let mut form = filled_add_form();
        assert!(form.submit().is_some());
        form.close();
        assert!(form.open);
        assert_eq!(form.data.name, "Alice");

        form.submit_failed(&ApiError::Validation(vec![FieldIssue {
            field: "email".to_string(),
            message: "has already been taken".to_string(),
        }]));
        assert!(form.open);
        assert_eq!(form.errors.email.as_deref(), Some("Email has already been taken"));

        form.close();
        form.open();
        assert_eq!(form.data, UserForm::default());
        assert!(form.errors.is_empty());
        assert!(form.submit_error.is_none());
    }

    #[test]
    fn edit_close_is_ignored_while_saving() {
        let mut form = EditUserForm::new(&sample_user());
        form.open();
        form.set_field(FormField::Name, "Anna".to_string());
        assert!(form.submit().is_some());
        form.close();
        assert!(form.open);

        form.submit_succeeded();
        form.open();
        assert_eq!(form.data.name, "Anna");
    }

    #[test]
    fn edit_gender_issue_goes_to_submit_error() {
        let mut form = EditUserForm::new(&sample_user());
        form.open();
        form.submit();
        form.submit_failed(&ApiError::Validation(vec![FieldIssue {
            field: "gender".to_string(),
            message: "can't be blank".to_string(),
        }]));

        assert!(form.errors.gender.is_none());
        assert_eq!(
            form.submit_error.as_deref(),
            Some("validation failed: gender can't be blank")
        );
    }

    #[test]
    fn edit_ignores_gender_and_sends_update() {
        let mut form = EditUserForm::new(&sample_user());
        form.open();
        form.set_field(FormField::Gender, String::new());
        form.set_field(FormField::Status, "inactive".to_string());

        let (id, update) = form.submit().expect("form is valid");
        assert_eq!(id, 42);
        assert_eq!(update.status, UserStatus::Inactive);
        assert_eq!(form.data.gender, "female");
    }

    #[test]
    fn edit_blank_fields_block_submit() {
        let mut form = EditUserForm::new(&sample_user());
        form.set_field(FormField::Name, " ".to_string());
        form.set_field(FormField::Email, String::new());

        assert!(form.submit().is_none());
        assert_eq!(form.errors.name.as_deref(), Some(NAME_REQUIRED));
        assert_eq!(form.errors.email.as_deref(), Some(EMAIL_REQUIRED));
        assert!(form.errors.gender.is_none());
    }

    #[test]
    fn edit_success_keeps_edited_values() {
        let mut form = EditUserForm::new(&sample_user());
        form.open();
        form.set_field(FormField::Name, "Anna".to_string());
        form.submit();
        form.submit_succeeded();

        assert!(!form.open);
        assert_eq!(form.data.name, "Anna");

        form.open();
        form.close();
        assert_eq!(form.data.name, "Anna");
    }

    #[test]
    fn edit_close_restores_original_values() {
        let mut form = EditUserForm::new(&sample_user());
        form.open();
        form.set_field(FormField::Name, "Changed".to_string());
        form.close();
        assert_eq!(form.data.name, "Ann");
    }

    #[test]
    fn delete_confirm_yields_id_exactly_once() {
        let mut dialog = DeleteDialog::default();
        dialog.open(42, "Ann");
        assert_eq!(dialog.target().map(|t| t.name.as_str()), Some("Ann"));

        assert_eq!(dialog.confirm(), Some(42));
        assert_eq!(dialog.confirm(), None);

        dialog.succeeded();
        assert!(!dialog.is_open());
    }

    #[test]
    fn delete_cancel_yields_nothing() {
        let mut dialog = DeleteDialog::default();
        dialog.open(42, "Ann");
        dialog.cancel();

        assert!(!dialog.is_open());
        assert_eq!(dialog.confirm(), None);
    }

    #[test]
    fn delete_failure_keeps_dialog_open_for_retry() {
        let mut dialog = DeleteDialog::default();
        dialog.open(42, "Ann");
        dialog.confirm();
        dialog.failed(&ApiError::Network("offline".to_string()));

        assert!(dialog.is_open());
        assert!(!dialog.is_deleting());
        assert_eq!(dialog.error(), Some("network error: offline"));
        assert_eq!(dialog.confirm(), Some(42));
    }
}

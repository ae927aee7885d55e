/*!
View-controller state for the profile page.

Holds the loaded record, the edit-mode form buffer, and the password-modal
buffer; every operation returns an explicit `Outcome` for the frontend to
render as a banner, instead of mutating message fields on the page, so a
stale success message can never outlive a later failure.
*/
use time::{
    Date,
    format_description::FormatItem,
    macros::format_description,
};

use crate::{
    profile::{FormBuffer, PasswordForm, ProfileRecord},
    remote::Remote,
    user::{AuthContext, Role},
};

/// Shown for any display field the backend has no value for.
pub static PLACEHOLDER: &str = "Chưa cập nhật";

const ISO_DATE: &[FormatItem] = format_description!("[year]-[month]-[day]");
const DISPLAY_DATE: &[FormatItem] = format_description!("[day]/[month]/[year]");

/// Result of a page operation, carrying the localized banner text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Success(String),
    Failure(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Outcome::Success(msg) => msg,
            Outcome::Failure(msg) => msg,
        }
    }
}

/**
The profile page.

Two independent pieces of mode state: `editing` toggles between viewing and
editing (the form buffer is rebuilt from the loaded record on every entry
and cancel), and the password form exists exactly while the change-password
modal is open.
*/
pub struct ProfilePage {
    remote: Remote,
    user_id: i64,
    role: Option<Role>,
    profile: Option<ProfileRecord>,
    form: FormBuffer,
    editing: bool,
    password_form: Option<PasswordForm>,
}

impl ProfilePage {
    pub fn new(remote: Remote, auth: &AuthContext) -> Self {
        log::trace!("ProfilePage::new( {:?} ) called.", auth);

        Self {
            remote,
            user_id: auth.id,
            role: auth.primary_role(),
            profile: None,
            form: FormBuffer::default(),
            editing: false,
            password_form: None,
        }
    }

    /// `None` after a failed load; the frontend renders its not-found state.
    pub fn profile(&self) -> Option<&ProfileRecord> {
        self.profile.as_ref()
    }

    pub fn form(&self) -> &FormBuffer {
        &self.form
    }

    /// The frontend binds its inputs here while editing.
    pub fn form_mut(&mut self) -> &mut FormBuffer {
        &mut self.form
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn password_form(&self) -> Option<&PasswordForm> {
        self.password_form.as_ref()
    }

    pub fn password_form_mut(&mut self) -> Option<&mut PasswordForm> {
        self.password_form.as_mut()
    }

    /// Fetch the record for the user's primary role and rebuild the form
    /// buffer from it. On failure the record is cleared.
    pub async fn load(&mut self) -> Outcome {
        log::trace!("ProfilePage::load() called (user {}).", self.user_id);

        match self.remote.fetch_profile(self.user_id, self.role).await {
            Ok(rec) => {
                self.form = FormBuffer::from_record(&rec);
                self.profile = Some(rec);
                Outcome::Success("Đã tải thông tin người dùng.".to_owned())
            },
            Err(e) => {
                log::error!(
                    "Error loading profile for user {}: {}",
                    self.user_id, &e
                );
                self.profile = None;
                Outcome::Failure("Không thể tải thông tin người dùng.".to_owned())
            },
        }
    }

    pub fn begin_edit(&mut self) {
        log::trace!("ProfilePage::begin_edit() called.");

        if let Some(rec) = &self.profile {
            self.form = FormBuffer::from_record(rec);
        }
        self.editing = true;
    }

    /// Discard unsaved edits; the form buffer reverts to the last-loaded
    /// record.
    pub fn cancel_edit(&mut self) {
        log::trace!("ProfilePage::cancel_edit() called.");

        if let Some(rec) = &self.profile {
            self.form = FormBuffer::from_record(rec);
        }
        self.editing = false;
    }

    /**
    Send the form buffer. Success exits edit mode and resynchronizes with the
    backend-authoritative record; the success outcome is decided before that
    reload, so a reload failure leaves the page in its not-found state
    without retracting the reported success. Failure keeps edit mode and the
    buffer intact.
    */
    pub async fn save(&mut self) -> Outcome {
        log::trace!("ProfilePage::save() called (user {}).", self.user_id);

        match self.remote.update_profile(self.user_id, self.role, &self.form).await {
            Ok(_) => {
                self.editing = false;
                let outcome =
                    Outcome::Success("Cập nhật thông tin thành công!".to_owned());
                let _ = self.load().await;
                outcome
            },
            Err(e) => {
                log::error!(
                    "Error saving profile for user {}: {}",
                    self.user_id, &e
                );
                Outcome::Failure("Cập nhật thông tin thất bại.".to_owned())
            },
        }
    }

    pub fn open_password_form(&mut self) {
        log::trace!("ProfilePage::open_password_form() called.");

        self.password_form = Some(PasswordForm::default());
    }

    pub fn cancel_password_form(&mut self) {
        log::trace!("ProfilePage::cancel_password_form() called.");

        self.password_form = None;
    }

    /// Validate locally, then submit. A mismatch aborts before any network
    /// call; a backend failure keeps the modal open with the buffer intact.
    pub async fn change_password(&mut self) -> Outcome {
        log::trace!("ProfilePage::change_password() called (user {}).", self.user_id);

        let form = match &self.password_form {
            Some(form) => form.clone(),
            None => {
                return Outcome::Failure(
                    "Biểu mẫu đổi mật khẩu chưa được mở.".to_owned()
                );
            },
        };

        if let Err(msg) = form.validate() {
            return Outcome::Failure(msg);
        }

        match self.remote.change_password(self.user_id, self.role, &form).await {
            Ok(()) => {
                self.password_form = None;
                Outcome::Success("Đổi mật khẩu thành công!".to_owned())
            },
            Err(e) => {
                log::error!(
                    "Error changing password for user {}: {}",
                    self.user_id, &e
                );
                Outcome::Failure("Đổi mật khẩu thất bại.".to_owned())
            },
        }
    }
}

/// Localized role label for the profile header badge.
pub fn role_label(role_name: &str) -> &'static str {
    match role_name.to_lowercase().as_str() {
        "student" => "Sinh viên",
        "teacher" => "Giảng viên",
        "admin" => "Quản trị viên",
        _ => "Người dùng",
    }
}

/// Badge color classes per role.
pub fn role_color_class(role_name: &str) -> &'static str {
    match role_name.to_lowercase().as_str() {
        "student" => "bg-blue-100 text-blue-800",
        "teacher" => "bg-green-100 text-green-800",
        "admin" => "bg-purple-100 text-purple-800",
        _ => "bg-gray-100 text-gray-800",
    }
}

pub fn display_or_placeholder(field: Option<&str>) -> &str {
    match field {
        Some(s) if !s.is_empty() => s,
        _ => PLACEHOLDER,
    }
}

pub fn display_gender(gender: Option<&str>) -> &str {
    match gender {
        Some(g) if g.eq_ignore_ascii_case("male") => "Nam",
        Some(g) if g.eq_ignore_ascii_case("female") => "Nữ",
        Some(g) if !g.is_empty() => g,
        _ => PLACEHOLDER,
    }
}

/// ISO `yyyy-mm-dd` renders as `dd/mm/yyyy`; anything unparseable passes
/// through untouched.
pub fn display_date(dob: Option<&str>) -> String {
    let raw = match dob {
        Some(s) if !s.is_empty() => s,
        _ => { return PLACEHOLDER.to_owned(); },
    };

    match Date::parse(raw, &ISO_DATE) {
        Ok(d) => d.format(&DISPLAY_DATE).unwrap_or_else(|_| raw.to_owned()),
        Err(_) => raw.to_owned(),
    }
}

/*!
Unified profile records and the editable buffers derived from them.

The backend stores students and staff in different resources with different
field sets; everything past the data-access layer works with the tagged
`ProfileRecord` union and the flat `FormBuffer` projection of it.
*/
use serde::{Deserialize, Serialize};

/// Student resource, as returned by `GET /student/profile/{id}`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentProfile {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<String>,
    pub student_code: Option<String>,
    pub class_name: Option<String>,
    pub major: Option<String>,
    pub course_year: Option<String>,
}

/// Generic user resource, as returned by `GET /users/{id}` for teachers and
/// administrators. The backend keeps no address, date of birth, gender,
/// department, or specialization for staff; those display fields always
/// render as the not-yet-updated placeholder.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StaffProfile {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub username: Option<String>,
}

/// Normalized, role-tagged profile data. Exactly one variant is active per
/// page visit, selected by the user's primary role.
#[derive(Clone, Debug, PartialEq)]
pub enum ProfileRecord {
    Student(StudentProfile),
    Staff(StaffProfile),
}

impl ProfileRecord {
    pub fn full_name(&self) -> &str {
        match self {
            ProfileRecord::Student(s) => &s.full_name,
            ProfileRecord::Staff(t) => &t.full_name,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            ProfileRecord::Student(s) => &s.email,
            ProfileRecord::Staff(t) => &t.email,
        }
    }

    pub fn phone(&self) -> Option<&str> {
        match self {
            ProfileRecord::Student(s) => s.phone.as_deref(),
            ProfileRecord::Staff(t) => t.phone.as_deref(),
        }
    }
}

/**
Split a full name into (first, last): the last whitespace token becomes the
last name, everything before it the first name.

This is lossy for multi-word given names, but it is what the backend round
trip has always done, so it stays.
*/
pub fn split_name(full: &str) -> (String, String) {
    let mut parts: Vec<&str> = full.split_whitespace().collect();
    match parts.pop() {
        None => (String::new(), String::new()),
        Some(last) => (parts.join(" "), last.to_owned()),
    }
}

/**
The mutable, editable projection of a `ProfileRecord` used while editing.

Rebuilt from the loaded record whenever it changes and whenever edit mode is
entered or cancelled; fields the record's variant does not carry stay empty
and are never sent back.
*/
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormBuffer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub gender: String,
    pub dob: String,
    pub address: String,
    pub class_name: String,
    pub major: String,
    pub course_year: String,
}

impl FormBuffer {
    pub fn from_record(rec: &ProfileRecord) -> Self {
        let (first_name, last_name) = split_name(rec.full_name());

        match rec {
            ProfileRecord::Student(s) => Self {
                first_name,
                last_name,
                email: s.email.clone(),
                phone: s.phone.clone().unwrap_or_default(),
                gender: s.gender.clone().unwrap_or_default(),
                dob: s.dob.clone().unwrap_or_default(),
                address: s.address.clone().unwrap_or_default(),
                class_name: s.class_name.clone().unwrap_or_default(),
                major: s.major.clone().unwrap_or_default(),
                course_year: s.course_year.clone().unwrap_or_default(),
            },
            ProfileRecord::Staff(t) => Self {
                first_name,
                last_name,
                email: t.email.clone(),
                phone: t.phone.clone().unwrap_or_default(),
                ..Self::default()
            },
        }
    }

    /// Rejoin the edited name the way the backend expects it.
    pub fn full_name(&self) -> String {
        format!("{} {}", &self.first_name, &self.last_name)
            .trim()
            .to_owned()
    }
}

/// Transient buffer backing the change-password modal; cleared after submit
/// or cancel.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordForm {
    /// Local check run before any network call. Returns the localized
    /// message to show when the form is not submittable.
    pub fn validate(&self) -> Result<(), String> {
        if self.new_password.is_empty() {
            return Err("Vui lòng nhập mật khẩu mới.".to_owned());
        }
        if self.new_password != self.confirm_password {
            return Err("Mật khẩu xác nhận không khớp.".to_owned());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::ensure_logging;

    #[test]
    fn name_split_keeps_last_token() {
        ensure_logging();

        assert_eq!(
            split_name("Nguyen Van A"),
            ("Nguyen Van".to_owned(), "A".to_owned())
        );
        assert_eq!(split_name("Lan"), (String::new(), "Lan".to_owned()));
        assert_eq!(split_name("  "), (String::new(), String::new()));
    }

    #[test]
    fn name_rejoins_exactly() {
        ensure_logging();

        let rec = ProfileRecord::Student(StudentProfile {
            full_name: "Nguyen Van A".to_owned(),
            ..StudentProfile::default()
        });
        let form = FormBuffer::from_record(&rec);
        assert_eq!(&form.first_name, "Nguyen Van");
        assert_eq!(&form.last_name, "A");
        assert_eq!(form.full_name(), "Nguyen Van A");
    }

    #[test]
    fn staff_form_leaves_student_fields_empty() {
        ensure_logging();

        let rec = ProfileRecord::Staff(StaffProfile {
            full_name: "Tran Thi B".to_owned(),
            email: "b@portal.example.vn".to_owned(),
            phone: None,
            username: Some("btran".to_owned()),
        });
        let form = FormBuffer::from_record(&rec);
        assert_eq!(&form.email, "b@portal.example.vn");
        assert!(form.phone.is_empty());
        assert!(form.address.is_empty());
        assert!(form.dob.is_empty());
        assert!(form.class_name.is_empty());
    }

    #[test]
    fn password_form_mismatch() {
        ensure_logging();

        let form = PasswordForm {
            current_password: "old".to_owned(),
            new_password: "new-one".to_owned(),
            confirm_password: "new-two".to_owned(),
        };
        assert!(form.validate().is_err());

        let form = PasswordForm {
            current_password: "old".to_owned(),
            new_password: "new-one".to_owned(),
            confirm_password: "new-one".to_owned(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn student_record_decodes_from_camel_case() {
        ensure_logging();

        let rec: StudentProfile = serde_json::from_value(serde_json::json!({
            "fullName": "Nguyen Van A",
            "email": "a@portal.example.vn",
            "studentCode": "SV001",
            "className": "CNTT1",
            "courseYear": "2021"
        })).unwrap();
        assert_eq!(&rec.full_name, "Nguyen Van A");
        assert_eq!(rec.student_code.as_deref(), Some("SV001"));
        assert_eq!(rec.class_name.as_deref(), Some("CNTT1"));
        assert!(rec.address.is_none());
    }
}

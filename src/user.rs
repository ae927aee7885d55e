/*!
Roles and the authenticated-user context the page is opened with.
*/

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Student,
    Teacher,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let token = match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
            Role::Admin   => "admin",
        };

        write!(f, "{}", token)
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "teacher" => Ok(Role::Teacher),
            "admin"   => Ok(Role::Admin),
            _ => Err(format!("{:?} is not a known role.", s)),
        }
    }
}

/**
Identity of the user the page was opened for, as supplied by the external
auth system: the user id plus the role names assigned to them.

Immutable for the duration of a page visit.
*/
#[derive(Clone, Debug)]
pub struct AuthContext {
    pub id: i64,
    pub roles: Vec<String>,
}

impl AuthContext {
    pub fn new(id: i64, roles: Vec<String>) -> Self {
        Self { id, roles }
    }

    /// The first role in the list, lower-cased, decides which backend schema
    /// applies. An unknown or missing role name yields `None`; downstream
    /// dispatch then falls back to the generic user endpoints.
    pub fn primary_role(&self) -> Option<Role> {
        self.roles.first()?.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::ensure_logging;

    #[test]
    fn role_round_trip() {
        ensure_logging();

        for role in [Role::Student, Role::Teacher, Role::Admin] {
            let parsed: Role = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
        assert!("boss".parse::<Role>().is_err());
    }

    #[test]
    fn primary_role_is_first_entry() {
        ensure_logging();

        let ctx = AuthContext::new(3, vec!["TEACHER".to_owned(), "admin".to_owned()]);
        assert_eq!(ctx.primary_role(), Some(Role::Teacher));
    }

    #[test]
    fn unknown_or_missing_primary_role() {
        ensure_logging();

        let ctx = AuthContext::new(3, vec!["superuser".to_owned()]);
        assert_eq!(ctx.primary_role(), None);

        let ctx = AuthContext::new(3, vec![]);
        assert_eq!(ctx.primary_role(), None);
    }
}

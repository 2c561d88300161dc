use shared::error::AppError;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Student,
    Staff,
    Lecturer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Staff => "staff",
            Role::Lecturer => "lecturer",
        }
    }

    /// Staff and lecturers share the elevated permission set: deciding
    /// bookings, managing rooms, and reading the unfiltered history.
    pub fn is_staff_level(&self) -> bool {
        matches!(self, Role::Staff | Role::Lecturer)
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "staff" => Ok(Role::Staff),
            "lecturer" => Ok(Role::Lecturer),
            other => Err(AppError::ConversionEntityError(format!(
                "unknown role: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips() {
        for role in [Role::Student, Role::Staff, Role::Lecturer] {
            assert_eq!(Role::from_str(role.as_str()).unwrap(), role);
        }
    }

    #[test]
    fn only_students_lack_the_elevated_permission_set() {
        assert!(!Role::Student.is_staff_level());
        assert!(Role::Staff.is_staff_level());
        assert!(Role::Lecturer.is_staff_level());
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(Role::from_str("admin").is_err());
    }
}

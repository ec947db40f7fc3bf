use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};
use strum::EnumIter;

#[cfg(feature = "database")]
use sea_orm::Value;

/// Lifecycle states of a student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StudentStatus {
    Active,
    Graduated,
    DroppedOut,
    Suspended,
    Inactive,
}

impl StudentStatus {
    /// GRADUATED and DROPPED_OUT are one-way: no path back to ACTIVE
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Graduated | Self::DroppedOut)
    }

    /// Transition table. ACTIVE may move anywhere; SUSPENDED and INACTIVE
    /// may only be reactivated.
    pub fn can_transition(self, to: Self) -> bool {
        match self {
            Self::Active => to != Self::Active,
            Self::Suspended | Self::Inactive => to == Self::Active,
            Self::Graduated | Self::DroppedOut => false,
        }
    }
}

impl Display for StudentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Active => write!(f, "ACTIVE"),
            Self::Graduated => write!(f, "GRADUATED"),
            Self::DroppedOut => write!(f, "DROPPED_OUT"),
            Self::Suspended => write!(f, "SUSPENDED"),
            Self::Inactive => write!(f, "INACTIVE"),
        }
    }
}

impl FromStr for StudentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "GRADUATED" => Ok(Self::Graduated),
            "DROPPED_OUT" => Ok(Self::DroppedOut),
            "SUSPENDED" => Ok(Self::Suspended),
            "INACTIVE" => Ok(Self::Inactive),
            _ => Err(format!("Unknown student status: {s}")),
        }
    }
}

#[cfg(feature = "database")]
impl From<StudentStatus> for Value {
    fn from(status: StudentStatus) -> Self {
        Value::String(Some(Box::new(status.to_string())))
    }
}

#[cfg(feature = "database")]
impl sea_orm::TryGetable for StudentStatus {
    fn try_get_by<I: sea_orm::ColIdx>(
        res: &sea_orm::QueryResult,
        index: I,
    ) -> Result<Self, sea_orm::TryGetError> {
        let val: String = res.try_get_by(index)?;

        val.parse().map_err(|e| {
            sea_orm::TryGetError::DbErr(sea_orm::DbErr::Type(format!(
                "Failed to parse StudentStatus: {e}"
            )))
        })
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::ValueType for StudentStatus {
    fn try_from(v: Value) -> Result<Self, sea_orm::sea_query::ValueTypeErr> {
        match v {
            Value::String(Some(s)) => s.parse().map_err(|_| sea_orm::sea_query::ValueTypeErr),
            _ => Err(sea_orm::sea_query::ValueTypeErr),
        }
    }

    fn type_name() -> String {
        "StudentStatus".to_string()
    }

    fn array_type() -> sea_orm::sea_query::ArrayType {
        sea_orm::sea_query::ArrayType::String
    }

    fn column_type() -> sea_orm::sea_query::ColumnType {
        sea_orm::sea_query::ColumnType::Text
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::Nullable for StudentStatus {
    fn null() -> Value {
        Value::String(None)
    }
}

#[cfg(test)]
mod tests {
    use super::StudentStatus;
    use strum::IntoEnumIterator;

    #[test]
    fn test_active_may_move_anywhere() {
        assert!(StudentStatus::Active.can_transition(StudentStatus::Graduated));
        assert!(StudentStatus::Active.can_transition(StudentStatus::DroppedOut));
        assert!(StudentStatus::Active.can_transition(StudentStatus::Suspended));
        assert!(StudentStatus::Active.can_transition(StudentStatus::Inactive));
    }

    #[test]
    fn test_reactivation() {
        assert!(StudentStatus::Suspended.can_transition(StudentStatus::Active));
        assert!(StudentStatus::Inactive.can_transition(StudentStatus::Active));
        // A suspension must be lifted before any other move
        assert!(!StudentStatus::Suspended.can_transition(StudentStatus::Graduated));
        assert!(!StudentStatus::Inactive.can_transition(StudentStatus::DroppedOut));
    }

    #[test]
    fn test_terminal_states_are_sealed() {
        for to in StudentStatus::iter() {
            assert!(!StudentStatus::Graduated.can_transition(to));
            assert!(!StudentStatus::DroppedOut.can_transition(to));
        }
    }

    #[test]
    fn test_storage_round_trip() {
        for status in StudentStatus::iter() {
            let parsed: StudentStatus = status.to_string().parse().unwrap();
            assert_eq!(status, parsed);
        }
    }
}

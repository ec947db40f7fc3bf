use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};
use strum::EnumIter;

#[cfg(feature = "database")]
use sea_orm::Value;

/// Lifecycle states of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchStatus {
    Planned,
    Active,
    Completed,
    Cancelled,
}

impl BatchStatus {
    /// A terminal status admits no further transitions
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Transition table: PLANNED -> ACTIVE -> COMPLETED, with cancellation
    /// possible from PLANNED and ACTIVE
    pub fn can_transition(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Planned, Self::Active)
                | (Self::Planned, Self::Cancelled)
                | (Self::Active, Self::Completed)
                | (Self::Active, Self::Cancelled)
        )
    }

    /// Whether a batch in this status accepts new enrollments
    pub fn accepts_enrollment(self) -> bool {
        matches!(self, Self::Planned | Self::Active)
    }
}

impl Display for BatchStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Planned => write!(f, "PLANNED"),
            Self::Active => write!(f, "ACTIVE"),
            Self::Completed => write!(f, "COMPLETED"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

impl FromStr for BatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PLANNED" => Ok(Self::Planned),
            "ACTIVE" => Ok(Self::Active),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(format!("Unknown batch status: {s}")),
        }
    }
}

#[cfg(feature = "database")]
impl From<BatchStatus> for Value {
    fn from(status: BatchStatus) -> Self {
        Value::String(Some(Box::new(status.to_string())))
    }
}

#[cfg(feature = "database")]
impl sea_orm::TryGetable for BatchStatus {
    fn try_get_by<I: sea_orm::ColIdx>(
        res: &sea_orm::QueryResult,
        index: I,
    ) -> Result<Self, sea_orm::TryGetError> {
        let val: String = res.try_get_by(index)?;

        val.parse().map_err(|e| {
            sea_orm::TryGetError::DbErr(sea_orm::DbErr::Type(format!(
                "Failed to parse BatchStatus: {e}"
            )))
        })
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::ValueType for BatchStatus {
    fn try_from(v: Value) -> Result<Self, sea_orm::sea_query::ValueTypeErr> {
        match v {
            Value::String(Some(s)) => s.parse().map_err(|_| sea_orm::sea_query::ValueTypeErr),
            _ => Err(sea_orm::sea_query::ValueTypeErr),
        }
    }

    fn type_name() -> String {
        "BatchStatus".to_string()
    }

    fn array_type() -> sea_orm::sea_query::ArrayType {
        sea_orm::sea_query::ArrayType::String
    }

    fn column_type() -> sea_orm::sea_query::ColumnType {
        sea_orm::sea_query::ColumnType::Text
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::Nullable for BatchStatus {
    fn null() -> Value {
        Value::String(None)
    }
}

#[cfg(test)]
mod tests {
    use super::BatchStatus;
    use strum::IntoEnumIterator;

    #[test]
    fn test_forward_path() {
        assert!(BatchStatus::Planned.can_transition(BatchStatus::Active));
        assert!(BatchStatus::Active.can_transition(BatchStatus::Completed));
        assert!(!BatchStatus::Planned.can_transition(BatchStatus::Completed));
    }

    #[test]
    fn test_cancellation() {
        assert!(BatchStatus::Planned.can_transition(BatchStatus::Cancelled));
        assert!(BatchStatus::Active.can_transition(BatchStatus::Cancelled));
    }

    #[test]
    fn test_terminal_states_are_sealed() {
        for to in BatchStatus::iter() {
            assert!(!BatchStatus::Completed.can_transition(to));
            assert!(!BatchStatus::Cancelled.can_transition(to));
        }
    }

    #[test]
    fn test_enrollment_acceptance() {
        assert!(BatchStatus::Planned.accepts_enrollment());
        assert!(BatchStatus::Active.accepts_enrollment());
        assert!(!BatchStatus::Completed.accepts_enrollment());
        assert!(!BatchStatus::Cancelled.accepts_enrollment());
    }

    #[test]
    fn test_storage_round_trip() {
        for status in BatchStatus::iter() {
            let parsed: BatchStatus = status.to_string().parse().unwrap();
            assert_eq!(status, parsed);
        }
    }
}

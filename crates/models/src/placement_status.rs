use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};
use strum::EnumIter;

#[cfg(feature = "database")]
use sea_orm::Value;

/// Outcome states of a placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlacementStatus {
    Placed,
    Resigned,
    Terminated,
    Completed,
}

impl PlacementStatus {
    /// Every outcome other than PLACED closes the placement
    pub fn is_terminal(self) -> bool {
        self != Self::Placed
    }

    /// PLACED -> RESIGNED | TERMINATED | COMPLETED, each terminal
    pub fn can_transition(self, to: Self) -> bool {
        self == Self::Placed && to != Self::Placed
    }
}

impl Display for PlacementStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Placed => write!(f, "PLACED"),
            Self::Resigned => write!(f, "RESIGNED"),
            Self::Terminated => write!(f, "TERMINATED"),
            Self::Completed => write!(f, "COMPLETED"),
        }
    }
}

impl FromStr for PlacementStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PLACED" => Ok(Self::Placed),
            "RESIGNED" => Ok(Self::Resigned),
            "TERMINATED" => Ok(Self::Terminated),
            "COMPLETED" => Ok(Self::Completed),
            _ => Err(format!("Unknown placement status: {s}")),
        }
    }
}

#[cfg(feature = "database")]
impl From<PlacementStatus> for Value {
    fn from(status: PlacementStatus) -> Self {
        Value::String(Some(Box::new(status.to_string())))
    }
}

#[cfg(feature = "database")]
impl sea_orm::TryGetable for PlacementStatus {
    fn try_get_by<I: sea_orm::ColIdx>(
        res: &sea_orm::QueryResult,
        index: I,
    ) -> Result<Self, sea_orm::TryGetError> {
        let val: String = res.try_get_by(index)?;

        val.parse().map_err(|e| {
            sea_orm::TryGetError::DbErr(sea_orm::DbErr::Type(format!(
                "Failed to parse PlacementStatus: {e}"
            )))
        })
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::ValueType for PlacementStatus {
    fn try_from(v: Value) -> Result<Self, sea_orm::sea_query::ValueTypeErr> {
        match v {
            Value::String(Some(s)) => s.parse().map_err(|_| sea_orm::sea_query::ValueTypeErr),
            _ => Err(sea_orm::sea_query::ValueTypeErr),
        }
    }

    fn type_name() -> String {
        "PlacementStatus".to_string()
    }

    fn array_type() -> sea_orm::sea_query::ArrayType {
        sea_orm::sea_query::ArrayType::String
    }

    fn column_type() -> sea_orm::sea_query::ColumnType {
        sea_orm::sea_query::ColumnType::Text
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::Nullable for PlacementStatus {
    fn null() -> Value {
        Value::String(None)
    }
}

#[cfg(test)]
mod tests {
    use super::PlacementStatus;
    use strum::IntoEnumIterator;

    #[test]
    fn test_placed_may_close() {
        assert!(PlacementStatus::Placed.can_transition(PlacementStatus::Resigned));
        assert!(PlacementStatus::Placed.can_transition(PlacementStatus::Terminated));
        assert!(PlacementStatus::Placed.can_transition(PlacementStatus::Completed));
    }

    #[test]
    fn test_closed_placements_are_sealed() {
        for from in [
            PlacementStatus::Resigned,
            PlacementStatus::Terminated,
            PlacementStatus::Completed,
        ] {
            assert!(from.is_terminal());
            for to in PlacementStatus::iter() {
                assert!(!from.can_transition(to));
            }
        }
    }

    #[test]
    fn test_storage_round_trip() {
        for status in PlacementStatus::iter() {
            let parsed: PlacementStatus = status.to_string().parse().unwrap();
            assert_eq!(status, parsed);
        }
    }
}

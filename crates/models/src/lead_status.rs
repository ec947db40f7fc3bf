use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};
use strum::EnumIter;

#[cfg(feature = "database")]
use sea_orm::Value;

/// Pipeline states of a lead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeadStatus {
    New,
    Contacted,
    Interested,
    Converted,
    Lost,
    NotInterested,
}

impl LeadStatus {
    /// CONVERTED, LOST and NOT_INTERESTED end the pipeline
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Converted | Self::Lost | Self::NotInterested)
    }

    /// A non-terminal lead may move to any other status, side exits
    /// included. The NEW -> CONTACTED -> INTERESTED ordering is not
    /// enforced; terminal immutability is.
    pub fn can_transition(self, to: Self) -> bool {
        !self.is_terminal() && self != to
    }
}

impl Display for LeadStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::New => write!(f, "NEW"),
            Self::Contacted => write!(f, "CONTACTED"),
            Self::Interested => write!(f, "INTERESTED"),
            Self::Converted => write!(f, "CONVERTED"),
            Self::Lost => write!(f, "LOST"),
            Self::NotInterested => write!(f, "NOT_INTERESTED"),
        }
    }
}

impl FromStr for LeadStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEW" => Ok(Self::New),
            "CONTACTED" => Ok(Self::Contacted),
            "INTERESTED" => Ok(Self::Interested),
            "CONVERTED" => Ok(Self::Converted),
            "LOST" => Ok(Self::Lost),
            "NOT_INTERESTED" => Ok(Self::NotInterested),
            _ => Err(format!("Unknown lead status: {s}")),
        }
    }
}

#[cfg(feature = "database")]
impl From<LeadStatus> for Value {
    fn from(status: LeadStatus) -> Self {
        Value::String(Some(Box::new(status.to_string())))
    }
}

#[cfg(feature = "database")]
impl sea_orm::TryGetable for LeadStatus {
    fn try_get_by<I: sea_orm::ColIdx>(
        res: &sea_orm::QueryResult,
        index: I,
    ) -> Result<Self, sea_orm::TryGetError> {
        let val: String = res.try_get_by(index)?;

        val.parse().map_err(|e| {
            sea_orm::TryGetError::DbErr(sea_orm::DbErr::Type(format!(
                "Failed to parse LeadStatus: {e}"
            )))
        })
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::ValueType for LeadStatus {
    fn try_from(v: Value) -> Result<Self, sea_orm::sea_query::ValueTypeErr> {
        match v {
            Value::String(Some(s)) => s.parse().map_err(|_| sea_orm::sea_query::ValueTypeErr),
            _ => Err(sea_orm::sea_query::ValueTypeErr),
        }
    }

    fn type_name() -> String {
        "LeadStatus".to_string()
    }

    fn array_type() -> sea_orm::sea_query::ArrayType {
        sea_orm::sea_query::ArrayType::String
    }

    fn column_type() -> sea_orm::sea_query::ColumnType {
        sea_orm::sea_query::ColumnType::Text
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::Nullable for LeadStatus {
    fn null() -> Value {
        Value::String(None)
    }
}

#[cfg(test)]
mod tests {
    use super::LeadStatus;
    use strum::IntoEnumIterator;

    #[test]
    fn test_forward_moves_are_unordered() {
        // Skipping a stage is legal
        assert!(LeadStatus::New.can_transition(LeadStatus::Interested));
        assert!(LeadStatus::New.can_transition(LeadStatus::Converted));
        assert!(LeadStatus::Contacted.can_transition(LeadStatus::New));
    }

    #[test]
    fn test_side_exits() {
        for from in [LeadStatus::New, LeadStatus::Contacted, LeadStatus::Interested] {
            assert!(from.can_transition(LeadStatus::Lost));
            assert!(from.can_transition(LeadStatus::NotInterested));
        }
    }

    #[test]
    fn test_terminal_states_are_sealed() {
        for from in [
            LeadStatus::Converted,
            LeadStatus::Lost,
            LeadStatus::NotInterested,
        ] {
            assert!(from.is_terminal());
            for to in LeadStatus::iter() {
                assert!(!from.can_transition(to));
            }
        }
    }

    #[test]
    fn test_storage_round_trip() {
        for status in LeadStatus::iter() {
            let parsed: LeadStatus = status.to_string().parse().unwrap();
            assert_eq!(status, parsed);
        }
    }
}

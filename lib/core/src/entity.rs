use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Kind of geographic entity. Each kind has its own table and its own set
/// of supported attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    State,
    County,
    City,
}

impl EntityType {
    pub const ALL: [EntityType; 3] = [EntityType::State, EntityType::County, EntityType::City];

    /// Wire code used by requests: 0 state, 1 county, 2 city
    pub fn code(self) -> u8 {
        match self {
            EntityType::State => 0,
            EntityType::County => 1,
            EntityType::City => 2,
        }
    }

    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            0 => Ok(EntityType::State),
            1 => Ok(EntityType::County),
            2 => Ok(EntityType::City),
            other => Err(Error::UnknownEntityType(other)),
        }
    }

    /// Position in per-type arrays
    pub(crate) fn index(self) -> usize {
        self.code() as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            EntityType::State => "state",
            EntityType::County => "county",
            EntityType::City => "city",
        }
    }
}

impl TryFrom<i64> for EntityType {
    type Error = Error;

    fn try_from(code: i64) -> Result<Self> {
        EntityType::from_code(code)
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Entity identifier, unique only within one [`EntityType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        EntityId(id)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_type_codes() {
        for entity_type in EntityType::ALL {
            assert_eq!(EntityType::from_code(entity_type.code() as i64).unwrap(), entity_type);
        }
        assert_eq!(EntityType::try_from(1).unwrap(), EntityType::County);
    }

    #[test]
    fn test_unknown_entity_type() {
        assert!(matches!(EntityType::from_code(3), Err(Error::UnknownEntityType(3))));
        assert!(matches!(EntityType::from_code(-1), Err(Error::UnknownEntityType(-1))));
    }

    #[test]
    fn test_entity_id_ordering() {
        let mut ids = vec![EntityId(9), EntityId(2), EntityId(5)];
        ids.sort();
        assert_eq!(ids, vec![EntityId(2), EntityId(5), EntityId(9)]);
        assert_eq!(serde_json::to_string(&EntityId(42)).unwrap(), "42");
    }
}

//! Tagged sum of every entity this contract stores

use ledger_core::Result;
use ledger_entity::{Entity, EntityDecoders};

use crate::course::Course;
use crate::user::User;

/// Any record written by the EdTech contract
#[derive(Debug, Clone, PartialEq)]
pub enum EdTechEntity {
    /// `org.upgrad-network.edtech.participants.user`
    User(User),
    /// `org.upgrad-network.edtech.assets.course`
    Course(Course),
}

impl EdTechEntity {
    /// Decoder table for every contract entity
    pub fn decoders() -> EntityDecoders<EdTechEntity> {
        EntityDecoders::new()
            .register::<User>(EdTechEntity::User)
            .register::<Course>(EdTechEntity::Course)
    }

    /// Decode a stored record or invocation response
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::decoders().decode(bytes)
    }

    /// Class id of the wrapped entity
    pub fn class_id(&self) -> &'static str {
        match self {
            EdTechEntity::User(_) => User::CLASS_ID,
            EdTechEntity::Course(_) => Course::CLASS_ID,
        }
    }

    /// Lifecycle state of the wrapped entity
    pub fn lifecycle_state(&self) -> &str {
        match self {
            EdTechEntity::User(u) => u.lifecycle_state(),
            EdTechEntity::Course(c) => c.lifecycle_state(),
        }
    }
}

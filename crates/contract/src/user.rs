//! User participant
//!
//! Key: `[userId]` under `org.upgrad-network.edtech.participants.userlist`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use ledger_core::{Error, Result};
use ledger_entity::Entity;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::STATE_CREATED;

/// A learner or teacher registered on the network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct User {
    user_id: String,
    /// First name
    pub fname: String,
    /// Last name
    pub lname: String,
    /// Contact email
    pub email: String,
    /// Client identity that created the user
    pub owner: String,
    /// Gyan score, starts at 0
    pub gyan: u64,
    /// Enrollments keyed by course id
    pub courses: BTreeMap<String, Enrollment>,
    /// Earned badges keyed by badge id
    pub badges: BTreeMap<String, Value>,
    /// Awarded scholarships keyed by scholarship id
    pub scholarships: BTreeMap<String, Value>,
    /// Invocation timestamp of creation
    pub created_at: DateTime<Utc>,
    /// Invocation timestamp of the last change
    pub updated_at: DateTime<Utc>,
    current_state: String,
}

/// Arguments for creating a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewUser {
    /// Unique user id (key field)
    pub user_id: String,
    /// First name
    pub fname: String,
    /// Last name
    pub lname: String,
    /// Contact email
    pub email: String,
}

/// Membership of a user in one course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Enrollment {
    /// Invocation timestamp of joining
    pub join_date: DateTime<Utc>,
    /// Client identity that submitted the join
    pub joined_from: String,
    /// Course activity log
    pub activities: Vec<Value>,
}

impl Enrollment {
    /// Fresh enrollment with no activities
    pub fn new(join_date: DateTime<Utc>, joined_from: impl Into<String>) -> Self {
        Enrollment {
            join_date,
            joined_from: joined_from.into(),
            activities: Vec::new(),
        }
    }
}

impl User {
    /// Build a new user in the `CREATED` state
    ///
    /// No ledger I/O; only checks that the key field is present.
    pub fn create_instance(params: NewUser, owner: &str, now: DateTime<Utc>) -> Result<Self> {
        if params.user_id.is_empty() {
            return Err(Error::InvalidArgument("userId must not be empty".to_string()));
        }
        Ok(User {
            user_id: params.user_id,
            fname: params.fname,
            lname: params.lname,
            email: params.email,
            owner: owner.to_string(),
            gyan: 0,
            courses: BTreeMap::new(),
            badges: BTreeMap::new(),
            scholarships: BTreeMap::new(),
            created_at: now,
            updated_at: now,
            current_state: STATE_CREATED.to_string(),
        })
    }

    /// Unique user id
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Record (or replace) the enrollment for `course_id`
    pub fn enroll(&mut self, course_id: impl Into<String>, enrollment: Enrollment) {
        self.updated_at = enrollment.join_date;
        self.courses.insert(course_id.into(), enrollment);
    }

    /// True if the user has joined `course_id`
    pub fn is_enrolled(&self, course_id: &str) -> bool {
        self.courses.contains_key(course_id)
    }
}

impl Entity for User {
    const CLASS_ID: &'static str = "org.upgrad-network.edtech.participants.user";

    fn key_parts(&self) -> Vec<String> {
        vec![self.user_id.clone()]
    }

    fn lifecycle_state(&self) -> &str {
        &self.current_state
    }

    fn set_lifecycle_state(&mut self, state: &str) {
        self.current_state = state.to_string();
    }
}

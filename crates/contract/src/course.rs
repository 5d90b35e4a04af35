//! Course asset
//!
//! Key: `[courseId]` under `org.upgrad-network.edtech.assets.courselist`.

use chrono::{DateTime, Utc};
use ledger_core::{Error, Result};
use ledger_entity::Entity;
use serde::{Deserialize, Serialize};

use crate::STATE_CREATED;

/// A course offered on the network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Course {
    course_id: String,
    /// Course title
    pub title: String,
    /// Free-form description
    pub description: String,
    /// User id of the teacher
    pub teacher_id: String,
    /// Topics covered
    pub topics: Vec<String>,
    /// Client identity that created the course
    pub owner: String,
    /// Invocation timestamp of creation
    pub created_at: DateTime<Utc>,
    /// Invocation timestamp of the last change
    pub updated_at: DateTime<Utc>,
    current_state: String,
}

/// Arguments for creating a course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCourse {
    /// Unique course id (key field)
    pub course_id: String,
    /// Course title
    pub title: String,
    /// Free-form description
    pub description: String,
    /// User id of the teacher
    pub teacher_id: String,
    /// Comma-separated topic list, e.g. `"rust, ledgers"`
    pub topics: String,
}

/// Split a comma-separated topic list, trimming and dropping empty entries
pub fn parse_topics(topics: &str) -> Vec<String> {
    topics
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

impl Course {
    /// Build a new course in the `CREATED` state
    ///
    /// No ledger I/O; only checks that the key field is present.
    pub fn create_instance(params: NewCourse, owner: &str, now: DateTime<Utc>) -> Result<Self> {
        if params.course_id.is_empty() {
            return Err(Error::InvalidArgument(
                "courseId must not be empty".to_string(),
            ));
        }
        Ok(Course {
            course_id: params.course_id,
            title: params.title,
            description: params.description,
            teacher_id: params.teacher_id,
            topics: parse_topics(&params.topics),
            owner: owner.to_string(),
            created_at: now,
            updated_at: now,
            current_state: STATE_CREATED.to_string(),
        })
    }

    /// Unique course id
    pub fn course_id(&self) -> &str {
        &self.course_id
    }
}

impl Entity for Course {
    const CLASS_ID: &'static str = "org.upgrad-network.edtech.assets.course";

    fn key_parts(&self) -> Vec<String> {
        vec![self.course_id.clone()]
    }

    fn lifecycle_state(&self) -> &str {
        &self.current_state
    }

    fn set_lifecycle_state(&mut self, state: &str) {
        self.current_state = state.to_string();
    }
}

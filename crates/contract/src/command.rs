//! Typed contract invocations
//!
//! Hosts deliver an invocation as a function name plus positional string
//! arguments. [`Command::from_args`] turns that into one of the variants
//! below, rejecting unknown functions and wrong arity up front so business
//! methods only ever see well-formed input.
//!
//! Commands are also serde-serializable for hosts that speak JSON.

use ledger_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::course::NewCourse;
use crate::user::NewUser;

/// One contract invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum Command {
    /// Contract instantiation hook. Arguments: none
    Instantiate,

    /// Register a new user.
    /// Arguments: `userId, fname, lname, email`
    CreateUser(NewUser),

    /// Register a new course.
    /// Arguments: `courseId, title, description, teacherId, topics`
    CreateCourse(NewCourse),

    /// Enroll an existing user in an existing course.
    /// Arguments: `userId, courseId`
    JoinCourse {
        /// User joining the course
        user_id: String,
        /// Course being joined
        course_id: String,
    },
}

impl Command {
    /// Parse a function name and positional arguments
    pub fn from_args<A: AsRef<str>>(function: &str, args: &[A]) -> Result<Self> {
        let arg = |i: usize| args[i].as_ref().to_string();

        let expected = match function {
            "instantiate" => 0,
            "createUser" => 4,
            "createCourse" => 5,
            "joinCourse" => 2,
            other => {
                return Err(Error::InvalidArgument(format!(
                    "unknown function: {other}"
                )))
            }
        };
        if args.len() != expected {
            return Err(Error::InvalidArgument(format!(
                "{function} expects {expected} arguments, got {}",
                args.len()
            )));
        }

        Ok(match function {
            "createUser" => Command::CreateUser(NewUser {
                user_id: arg(0),
                fname: arg(1),
                lname: arg(2),
                email: arg(3),
            }),
            "createCourse" => Command::CreateCourse(NewCourse {
                course_id: arg(0),
                title: arg(1),
                description: arg(2),
                teacher_id: arg(3),
                topics: arg(4),
            }),
            "joinCourse" => Command::JoinCourse {
                user_id: arg(0),
                course_id: arg(1),
            },
            _ => Command::Instantiate,
        })
    }

    /// Function name this command is invoked by
    pub fn name(&self) -> &'static str {
        match self {
            Command::Instantiate => "instantiate",
            Command::CreateUser(_) => "createUser",
            Command::CreateCourse(_) => "createCourse",
            Command::JoinCourse { .. } => "joinCourse",
        }
    }
}

//! The EdTech contract
//!
//! Every business method follows the same shape: load through a registry,
//! build or mutate an entity, persist it through the registry, and return the
//! stored record bytes. Methods never recover from errors; the host discards
//! the invocation's writes when one is returned.

use ledger_core::{Error, Limits, Result, Store};
use ledger_entity::Entity;
use tracing::{info, warn};

use crate::command::Command;
use crate::config::ContractConfig;
use crate::context::EdTechContext;
use crate::course::{Course, NewCourse};
use crate::user::{Enrollment, NewUser, User};

/// Users, courses and enrollments
#[derive(Debug, Clone, Default)]
pub struct EdTechContract {
    config: ContractConfig,
}

impl EdTechContract {
    /// Create the contract with `config`
    pub fn new(config: ContractConfig) -> Self {
        EdTechContract { config }
    }

    /// Contract name
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Limits applied by every registry
    pub fn limits(&self) -> &Limits {
        &self.config.limits
    }

    /// Dispatch a function name and positional arguments
    pub fn invoke<S, A>(&self, ctx: &EdTechContext<'_, S>, function: &str, args: &[A]) -> Result<Vec<u8>>
    where
        S: Store + ?Sized,
        A: AsRef<str>,
    {
        let command = Command::from_args(function, args).map_err(|e| {
            warn!(function, error = %e, "rejected invocation");
            e
        })?;
        self.execute(ctx, command)
    }

    /// Execute a parsed command
    pub fn execute<S: Store + ?Sized>(&self, ctx: &EdTechContext<'_, S>, command: Command) -> Result<Vec<u8>> {
        let name = command.name();
        let result = match command {
            Command::Instantiate => self.instantiate(ctx),
            Command::CreateUser(params) => self.create_user(ctx, params),
            Command::CreateCourse(params) => self.create_course(ctx, params),
            Command::JoinCourse { user_id, course_id } => self.join_course(ctx, &user_id, &course_id),
        };
        if let Err(e) = &result {
            warn!(
                function = name,
                tx_id = %ctx.tx().tx_id,
                kind = %e.kind(),
                error = %e,
                "invocation failed"
            );
        }
        result
    }

    /// Instantiation hook; writes nothing
    pub fn instantiate<S: Store + ?Sized>(&self, ctx: &EdTechContext<'_, S>) -> Result<Vec<u8>> {
        info!(contract = %self.config.name, tx_id = %ctx.tx().tx_id, "contract instantiated");
        Ok(Vec::new())
    }

    /// Register a new user owned by the submitting client
    ///
    /// Fails with `DuplicateKey` if the user id is taken.
    pub fn create_user<S: Store + ?Sized>(&self, ctx: &EdTechContext<'_, S>, params: NewUser) -> Result<Vec<u8>> {
        let user = User::create_instance(params, ctx.client_id(), ctx.timestamp())?;
        ctx.users.add(&user)?;
        user.to_bytes(self.limits())
    }

    /// Register a new course owned by the submitting client
    ///
    /// Fails with `DuplicateKey` if the course id is taken.
    pub fn create_course<S: Store + ?Sized>(
        &self,
        ctx: &EdTechContext<'_, S>,
        params: NewCourse,
    ) -> Result<Vec<u8>> {
        let course = Course::create_instance(params, ctx.client_id(), ctx.timestamp())?;
        ctx.courses.add(&course)?;
        course.to_bytes(self.limits())
    }

    /// Enroll `user_id` in `course_id`
    ///
    /// Both must exist. Joining a course again replaces the earlier
    /// enrollment with a fresh one.
    pub fn join_course<S: Store + ?Sized>(
        &self,
        ctx: &EdTechContext<'_, S>,
        user_id: &str,
        course_id: &str,
    ) -> Result<Vec<u8>> {
        let mut user = ctx.users.get([user_id]).map_err(|e| match e {
            Error::NotFound { key } => Error::NotFound {
                key: format!("{key} (no such user)"),
            },
            other => other,
        })?;
        if !ctx.courses.exists([course_id])? {
            return Err(Error::NotFound {
                key: format!("{} (no such course)", ctx.courses.make_key([course_id])?),
            });
        }

        user.enroll(course_id, Enrollment::new(ctx.timestamp(), ctx.client_id()));
        ctx.users.update(&user)?;
        user.to_bytes(self.limits())
    }
}

//! Operations behind each `mvnship` command.
//!
//! [`ops_plan::prepare`] turns a target invocation into a [`plan::GoalPlan`];
//! [`ops_exec::execute`] runs it.

pub mod archive;
pub mod ops_exec;
pub mod ops_plan;
pub mod plan;
pub mod runner;
pub mod vcs;

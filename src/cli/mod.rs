//! Command-line facing workflow, independent of argument parsing

pub mod orchestration;

pub use orchestration::{
    apply_plan, plan_tag, run_tag_workflow, TagPlan, TagWorkflowArgs, WorkflowResult,
};

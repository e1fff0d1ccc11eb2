//! Crash reports and stage tracking.
//!
//! Install the panic hook at startup and mark stages as they run:
//!
//! ```ignore
//! use ai_maturity::observability::{install_panic_hook, set_stage, PipelineStage};
//!
//! install_panic_hook();
//! let _stage = set_stage(PipelineStage::Index);
//! ```

pub mod context;
pub mod panic_hook;

pub use context::{
    get_current_context, reset_context, set_current_file, set_stage, ContextGuard,
    PipelineContext, PipelineStage,
};
pub use panic_hook::install_panic_hook;

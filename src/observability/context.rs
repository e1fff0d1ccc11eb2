//! Thread-local pipeline context for crash reports.
//!
//! Records which stage is running and which file it is reading or writing
//! so a panic can say where it happened. Guards restore the previous
//! context on drop, so nested settings unwind cleanly.

use std::cell::RefCell;
use std::fmt;
use std::path::PathBuf;

thread_local! {
    static CURRENT_CONTEXT: RefCell<PipelineContext> = const { RefCell::new(PipelineContext::new()) };
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineContext {
    pub stage: Option<PipelineStage>,
    /// File currently being read or written
    pub current_file: Option<PathBuf>,
}

impl PipelineContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            stage: None,
            current_file: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Collect,
    Index,
    Render,
    View,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collect => write!(f, "collect"),
            Self::Index => write!(f, "index"),
            Self::Render => write!(f, "render"),
            Self::View => write!(f, "view"),
        }
    }
}

/// Restores the previous context when dropped.
pub struct ContextGuard {
    previous: PipelineContext,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        CURRENT_CONTEXT.with(|ctx| {
            *ctx.borrow_mut() = self.previous.clone();
        });
    }
}

#[must_use]
pub fn set_stage(stage: PipelineStage) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        ctx.borrow_mut().stage = Some(stage);
        ContextGuard { previous }
    })
}

#[must_use]
pub fn set_current_file(path: impl Into<PathBuf>) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        ctx.borrow_mut().current_file = Some(path.into());
        ContextGuard { previous }
    })
}

/// Snapshot of the current thread's context.
#[must_use]
pub fn get_current_context() -> PipelineContext {
    CURRENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

pub fn reset_context() {
    CURRENT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = PipelineContext::new();
    });
}

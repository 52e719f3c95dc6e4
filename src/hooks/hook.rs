//! Core hook types and traits

use crate::host::descriptor::TargetDescriptor;
use crate::host::operations::HostOperation;
use crate::ports::PolicyPorts;

/// Control effect of a before handler on the host operation
#[derive(Debug, Clone, PartialEq)]
pub enum BeforeOutcome<R> {
    /// Let the host's original logic run
    RunOriginal,
    /// Do not run the original; use this value as its result
    SkipWithResult(R),
}

impl<R> BeforeOutcome<R> {
    pub fn is_skip(&self) -> bool {
        matches!(self, BeforeOutcome::SkipWithResult(_))
    }
}

/// A before/after handler pair bound to one host operation
///
/// Per invocation the dispatcher calls `capture`, then `before`, then the
/// original (unless skipped), then `after` with the captured value. The
/// capture lives on the dispatcher's stack and is dropped when `after`
/// returns, so it never crosses entities or ticks.
///
/// Handlers run inline on the host's hot path. Port calls must be O(1).
pub trait Hook<Op: HostOperation>: Send + Sync + 'static {
    /// Scratch value threaded from `capture` to `after`
    type Capture;

    /// A unique name for this hook
    fn name(&self) -> &'static str;

    /// Other host operations this hook calls into
    ///
    /// Each must resolve to exactly one host operation before the slot is
    /// bound, just like the hooked operation itself.
    fn requires(&self) -> Vec<TargetDescriptor> {
        Vec::new()
    }

    /// Control effect used when `capture` or `before` panics
    ///
    /// Default: run the original on the untouched arguments.
    fn fallback(&self) -> BeforeOutcome<Op::Output> {
        BeforeOutcome::RunOriginal
    }

    /// Read the pre-call state this hook needs later
    fn capture(&self, args: &Op::Args) -> Self::Capture;

    /// Runs before the original. Default: run the original unchanged.
    fn before(&self, _args: &mut Op::Args, _ports: &PolicyPorts) -> BeforeOutcome<Op::Output> {
        BeforeOutcome::RunOriginal
    }

    /// Runs after the original (or after a skip). Default: no-op.
    fn after(
        &self,
        _args: &mut Op::Args,
        _output: &mut Op::Output,
        _capture: Self::Capture,
        _ports: &PolicyPorts,
    ) {
    }
}

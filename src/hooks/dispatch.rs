//! Per-invocation dispatch of a bound hook
//!
//! Every handler phase runs under `catch_unwind`. A panic inside a handler
//! must never reach the host's simulation step, so the dispatcher restores
//! the values the handler may have half-written. A failed `capture` or
//! `before` ends the call with the hook's fallback outcome; a failed `after`
//! keeps the result the call had before `after` ran.

use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::hooks::hook::{BeforeOutcome, Hook};
use crate::host::operations::HostOperation;
use crate::ports::PolicyPorts;

/// Object-safe entry point the host calls instead of the original
pub trait Dispatch<Op: HostOperation>: Send + Sync {
    fn dispatch(
        &self,
        args: Op::Args,
        original: &mut dyn FnMut(&mut Op::Args) -> Op::Output,
    ) -> (Op::Args, Op::Output);
}

/// A hook together with the ports it was installed with
pub struct BoundHook<Op, H> {
    hook: H,
    ports: Arc<PolicyPorts>,
    _op: PhantomData<fn() -> Op>,
}

impl<Op, H> BoundHook<Op, H>
where
    Op: HostOperation,
    H: Hook<Op>,
{
    pub fn new(hook: H, ports: Arc<PolicyPorts>) -> Self {
        Self {
            hook,
            ports,
            _op: PhantomData,
        }
    }

    pub fn hook(&self) -> &H {
        &self.hook
    }
}

impl<Op, H> Dispatch<Op> for BoundHook<Op, H>
where
    Op: HostOperation,
    H: Hook<Op>,
{
    fn dispatch(
        &self,
        mut args: Op::Args,
        original: &mut dyn FnMut(&mut Op::Args) -> Op::Output,
    ) -> (Op::Args, Op::Output) {
        let name = self.hook.name();
        let ports = self.ports.as_ref();

        let capture = match guarded(name, "capture", || self.hook.capture(&args)) {
            Some(capture) => capture,
            None => return self.fall_back(args, original),
        };

        let snapshot = args.clone();
        let outcome = match guarded(name, "before", || self.hook.before(&mut args, ports)) {
            Some(outcome) => outcome,
            None => return self.fall_back(snapshot, original),
        };

        let mut output = match outcome {
            BeforeOutcome::RunOriginal => original(&mut args),
            BeforeOutcome::SkipWithResult(value) => value,
        };

        let snapshot = (args.clone(), output.clone());
        let finished = guarded(name, "after", || {
            self.hook.after(&mut args, &mut output, capture, ports)
        });
        if finished.is_none() {
            (args, output) = snapshot;
        }

        (args, output)
    }
}

impl<Op, H> BoundHook<Op, H>
where
    Op: HostOperation,
    H: Hook<Op>,
{
    /// Finish a call whose policy decision failed; `after` does not run
    fn fall_back(
        &self,
        mut args: Op::Args,
        original: &mut dyn FnMut(&mut Op::Args) -> Op::Output,
    ) -> (Op::Args, Op::Output) {
        let outcome = guarded(self.hook.name(), "fallback", || self.hook.fallback());
        match outcome {
            Some(BeforeOutcome::SkipWithResult(value)) => (args, value),
            Some(BeforeOutcome::RunOriginal) | None => {
                let output = original(&mut args);
                (args, output)
            }
        }
    }
}

/// Run one handler phase; `None` if it panicked
fn guarded<R>(hook: &'static str, phase: &'static str, f: impl FnOnce() -> R) -> Option<R> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(hook, phase, "Hook handler panicked, skipping policy decision");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::building::Building;
    use crate::host::operations::{ConstructionTime, ConstructionTimeArgs, HandleCrime, HandleCrimeArgs};

    /// Records the captured value and bumps the counter after the call.
    struct Tracer {
        skip: bool,
        panic_in: Option<&'static str>,
    }

    impl Hook<HandleCrime> for Tracer {
        type Capture = u16;

        fn name(&self) -> &'static str {
            "tracer"
        }

        fn capture(&self, args: &HandleCrimeArgs) -> u16 {
            if self.panic_in == Some("capture") {
                panic!("capture failed");
            }
            args.data.crime_buffer
        }

        fn before(&self, args: &mut HandleCrimeArgs, _ports: &PolicyPorts) -> BeforeOutcome<()> {
            args.citizen_count += 1;
            if self.panic_in == Some("before") {
                panic!("before failed");
            }
            if self.skip {
                BeforeOutcome::SkipWithResult(())
            } else {
                BeforeOutcome::RunOriginal
            }
        }

        fn after(&self, args: &mut HandleCrimeArgs, _output: &mut (), capture: u16, _ports: &PolicyPorts) {
            args.data.crime_buffer = capture + 1000;
            if self.panic_in == Some("after") {
                panic!("after failed");
            }
        }
    }

    fn args() -> HandleCrimeArgs {
        HandleCrimeArgs {
            data: Building {
                crime_buffer: 10,
                ..Building::default()
            },
            crime_accumulation: 5,
            ..HandleCrimeArgs::default()
        }
    }

    fn run(tracer: Tracer) -> (HandleCrimeArgs, usize) {
        let bound = BoundHook::<HandleCrime, _>::new(tracer, Arc::new(PolicyPorts::new()));
        let mut runs = 0;
        let (args, ()) = bound.dispatch(args(), &mut |a: &mut HandleCrimeArgs| {
            runs += 1;
            a.data.crime_buffer += a.crime_accumulation as u16;
        });
        (args, runs)
    }

    #[test]
    fn test_full_sequence() {
        let (args, runs) = run(Tracer { skip: false, panic_in: None });
        assert_eq!(runs, 1);
        assert_eq!(args.citizen_count, 1);
        // capture saw the pre-call value 10
        assert_eq!(args.data.crime_buffer, 1010);
    }

    #[test]
    fn test_skip_original_still_runs_after() {
        let (args, runs) = run(Tracer { skip: true, panic_in: None });
        assert_eq!(runs, 0);
        assert_eq!(args.data.crime_buffer, 1010);
    }

    #[test]
    fn test_capture_panic_runs_original_only() {
        let (args, runs) = run(Tracer { skip: true, panic_in: Some("capture") });
        assert_eq!(runs, 1);
        assert_eq!(args.citizen_count, 0);
        assert_eq!(args.data.crime_buffer, 15);
    }

    #[test]
    fn test_before_panic_restores_args() {
        let (args, runs) = run(Tracer { skip: true, panic_in: Some("before") });
        assert_eq!(runs, 1);
        // the increment made before the panic is rolled back
        assert_eq!(args.citizen_count, 0);
        assert_eq!(args.data.crime_buffer, 15);
    }

    #[test]
    fn test_after_panic_keeps_original_result() {
        let (args, runs) = run(Tracer { skip: false, panic_in: Some("after") });
        assert_eq!(runs, 1);
        assert_eq!(args.data.crime_buffer, 15);
    }

    struct FailingDuration;

    impl Hook<ConstructionTime> for FailingDuration {
        type Capture = ();

        fn name(&self) -> &'static str {
            "failing_duration"
        }

        fn capture(&self, _args: &ConstructionTimeArgs) {}

        fn fallback(&self) -> BeforeOutcome<u32> {
            BeforeOutcome::SkipWithResult(0)
        }

        fn before(&self, _args: &mut ConstructionTimeArgs, _ports: &PolicyPorts) -> BeforeOutcome<u32> {
            panic!("duration lookup failed");
        }

        fn after(&self, _args: &mut ConstructionTimeArgs, output: &mut u32, _capture: (), _ports: &PolicyPorts) {
            *output += 1;
        }
    }

    #[test]
    fn test_before_panic_uses_hook_fallback() {
        let bound = BoundHook::<ConstructionTime, _>::new(FailingDuration, Arc::new(PolicyPorts::new()));
        let mut runs = 0;

        let (_, duration) = bound.dispatch(ConstructionTimeArgs, &mut |_: &mut ConstructionTimeArgs| {
            runs += 1;
            640
        });

        assert_eq!(duration, 0);
        assert_eq!(runs, 0);
    }
}

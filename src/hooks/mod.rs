//! Hook machinery for intercepting host operations.
//!
//! A [`Hook`] is a capture/before/after handler set for one host operation.
//! [`BoundHook`] pairs it with the policy ports and runs one invocation with
//! fault containment. A [`HookSlot`] ties a bound hook to its target
//! descriptor, and the [`HookRegistry`] installs or removes every slot at once.

pub mod dispatch;
pub mod hook;
pub mod registry;
pub mod slot;

pub use dispatch::{BoundHook, Dispatch};
pub use hook::{BeforeOutcome, Hook};
pub use registry::HookRegistry;
pub use slot::{HookSlot, SlotStatus};

//! Host runtime boundary
//!
//! The host lists its operations by structural signature and lets the layer
//! attach a redirect to a handle. When the host runs an operation it asks its
//! [`RedirectTable`] whether a redirect is bound; if not, the original runs
//! untouched.

use std::any::Any;
use std::sync::{Arc, RwLock};

use ahash::AHashMap;

use crate::core::types::Color;
use crate::hooks::dispatch::Dispatch;
use crate::host::building::InfoMode;
use crate::host::descriptor::TargetDescriptor;
use crate::host::operations::HostOperation;

/// Opaque handle of one host operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperationHandle(pub u32);

/// The surface an opaque host exposes to the interception layer
pub trait Host: Send + Sync {
    /// Every operation the host can redirect, with its structural signature
    fn operations(&self) -> Vec<(OperationHandle, TargetDescriptor)>;

    /// Redirect `handle` through `redirect`
    ///
    /// Returns a human-readable reason when the host refuses.
    fn bind(&self, handle: OperationHandle, redirect: Redirect) -> Result<(), String>;

    /// Restore the original behavior of `handle`; false if nothing was bound
    fn unbind(&self, handle: OperationHandle) -> bool;

    /// Reference `(negative, target)` colors of a visualization mode
    fn mode_colors(&self, _mode: InfoMode) -> Option<(Color, Color)> {
        None
    }
}

/// A type-erased dispatcher for one host operation
#[derive(Clone)]
pub struct Redirect {
    label: &'static str,
    descriptor: TargetDescriptor,
    target: Arc<dyn Any + Send + Sync>,
}

impl Redirect {
    pub fn new<Op: HostOperation>(dispatch: Arc<dyn Dispatch<Op>>) -> Self {
        Self {
            label: Op::LABEL,
            descriptor: Op::descriptor(),
            target: Arc::new(dispatch),
        }
    }

    /// Descriptor of the operation this redirect was built for
    pub fn descriptor(&self) -> &TargetDescriptor {
        &self.descriptor
    }

    /// Recover the typed dispatcher; `None` if `Op` is not the bound type
    pub fn dispatcher<Op: HostOperation>(&self) -> Option<Arc<dyn Dispatch<Op>>> {
        self.target.downcast_ref::<Arc<dyn Dispatch<Op>>>().cloned()
    }
}

impl std::fmt::Debug for Redirect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Redirect")
            .field("label", &self.label)
            .field("descriptor", &self.descriptor)
            .finish()
    }
}

/// Redirects currently bound in a host, keyed by handle
#[derive(Default)]
pub struct RedirectTable {
    entries: RwLock<AHashMap<OperationHandle, Redirect>>,
}

impl RedirectTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a redirect; returns the one it replaced, if any
    pub fn insert(&self, handle: OperationHandle, redirect: Redirect) -> Option<Redirect> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(handle, redirect)
    }

    pub fn remove(&self, handle: OperationHandle) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.remove(&handle).is_some()
    }

    pub fn contains(&self, handle: OperationHandle) -> bool {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run operation `Op` at `handle`, through its redirect when one is bound
    ///
    /// Returns the in/out struct as it stands after the call together with
    /// the operation's result.
    pub fn invoke<Op, F>(&self, handle: OperationHandle, args: Op::Args, mut original: F) -> (Op::Args, Op::Output)
    where
        Op: HostOperation,
        F: FnMut(&mut Op::Args) -> Op::Output,
    {
        // Clone the dispatcher out so the lock is not held while hooks run.
        let dispatcher = {
            let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
            entries.get(&handle).and_then(|r| r.dispatcher::<Op>())
        };

        match dispatcher {
            Some(dispatcher) => dispatcher.dispatch(args, &mut original),
            None => {
                let mut args = args;
                let output = original(&mut args);
                (args, output)
            }
        }
    }
}

//! Hook slots - one hook bound (or not) to one host operation

use std::sync::Arc;

use crate::core::error::{InterceptError, Result};
use crate::hooks::dispatch::BoundHook;
use crate::hooks::hook::Hook;
use crate::host::descriptor::TargetDescriptor;
use crate::host::locator::{locate, locate_operation};
use crate::host::operations::HostOperation;
use crate::host::runtime::{Host, OperationHandle, Redirect};
use crate::ports::PolicyPorts;

/// A hook paired with the descriptor of the operation it overrides
///
/// A slot is either fully bound (the host redirects the operation through
/// it) or fully unbound (the host operation is pristine).
pub struct HookSlot {
    name: &'static str,
    descriptor: TargetDescriptor,
    requires: Vec<TargetDescriptor>,
    locate_target: fn(&dyn Host) -> Result<OperationHandle>,
    redirect: Redirect,
    bound: Option<OperationHandle>,
}

impl std::fmt::Debug for HookSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookSlot")
            .field("name", &self.name)
            .field("descriptor", &self.descriptor)
            .field("requires", &self.requires)
            .field("bound", &self.bound)
            .finish_non_exhaustive()
    }
}

/// Read-only view of a slot for listings
#[derive(Debug, Clone, PartialEq)]
pub struct SlotStatus {
    pub name: &'static str,
    pub descriptor: TargetDescriptor,
    /// Host operations the hook calls into besides its own target
    pub requires: Vec<TargetDescriptor>,
    pub installed: bool,
}

impl HookSlot {
    pub fn new<Op, H>(hook: H, ports: Arc<PolicyPorts>) -> Self
    where
        Op: HostOperation,
        H: Hook<Op>,
    {
        let name = hook.name();
        let requires = hook.requires();
        let bound = BoundHook::<Op, H>::new(hook, ports);
        Self {
            name,
            descriptor: Op::descriptor(),
            requires,
            locate_target: locate_target::<Op>,
            redirect: Redirect::new::<Op>(Arc::new(bound)),
            bound: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn descriptor(&self) -> &TargetDescriptor {
        &self.descriptor
    }

    pub fn installed(&self) -> bool {
        self.bound.is_some()
    }

    pub fn status(&self) -> SlotStatus {
        SlotStatus {
            name: self.name,
            descriptor: self.descriptor.clone(),
            requires: self.requires.clone(),
            installed: self.installed(),
        }
    }

    /// Resolve the hooked operation, checking every required sibling first
    pub(crate) fn resolve(&self, host: &dyn Host) -> Result<OperationHandle> {
        for descriptor in &self.requires {
            locate(host, descriptor)?;
        }
        (self.locate_target)(host)
    }

    pub(crate) fn bind(&mut self, host: &dyn Host, handle: OperationHandle) -> Result<()> {
        if self.bound == Some(handle) {
            return Ok(());
        }

        host.bind(handle, self.redirect.clone())
            .map_err(|reason| InterceptError::BindFailed {
                target: self.descriptor.to_string(),
                reason,
            })?;

        tracing::debug!(hook = self.name, target = %self.descriptor, "Bound hook slot");
        self.bound = Some(handle);
        Ok(())
    }

    /// Restore the host operation; true if the slot was bound
    pub(crate) fn unbind(&mut self, host: &dyn Host) -> bool {
        match self.bound.take() {
            Some(handle) => {
                if !host.unbind(handle) {
                    tracing::warn!(hook = self.name, "Host had no redirect for bound slot");
                }
                tracing::debug!(hook = self.name, "Unbound hook slot");
                true
            }
            None => false,
        }
    }
}

fn locate_target<Op: HostOperation>(host: &dyn Host) -> Result<OperationHandle> {
    locate_operation::<Op>(host).map(|call| call.handle())
}

//! Hook registry - installs and removes the whole slot set atomically

use crate::core::error::Result;
use crate::hooks::slot::{HookSlot, SlotStatus};
use crate::host::runtime::{Host, OperationHandle};

/// Owns every hook slot of the augmentation
///
/// `install_all` either binds every slot or none of them. Dropping the
/// registry does not unbind anything; call `uninstall_all` explicitly.
#[derive(Debug, Default)]
pub struct HookRegistry {
    slots: Vec<HookSlot>,
    installed: bool,
}

impl HookRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a slot. Ignored while installed; uninstall first.
    pub fn register(&mut self, slot: HookSlot) -> bool {
        if self.installed {
            tracing::warn!(hook = slot.name(), "Registry is installed, slot not added");
            return false;
        }
        self.slots.push(slot);
        true
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// True once `install_all` has succeeded and until `uninstall_all`
    pub fn is_installed(&self) -> bool {
        self.installed
    }

    /// Status of every slot in registration order
    pub fn slots(&self) -> Vec<SlotStatus> {
        self.slots.iter().map(HookSlot::status).collect()
    }

    /// Locate every target and bind every slot
    ///
    /// All targets, and the host operations the hooks call into, are resolved
    /// before anything is bound, so an incompatible host is never touched. If
    /// a bind fails, slots bound earlier in the same call are unbound again. Calling this while installed is a no-op.
    pub fn install_all(&mut self, host: &dyn Host) -> Result<()> {
        if self.installed {
            tracing::debug!("Hooks already installed");
            return Ok(());
        }

        let handles = match self.resolve_all(host) {
            Ok(handles) => handles,
            Err(err) => {
                tracing::error!(error = %err, "Host is incompatible, no hooks installed");
                return Err(err);
            }
        };

        for index in 0..self.slots.len() {
            if let Err(err) = self.slots[index].bind(host, handles[index]) {
                tracing::warn!(
                    hook = self.slots[index].name(),
                    rolled_back = index,
                    "Bind failed, rolling back"
                );
                for slot in &mut self.slots[..index] {
                    slot.unbind(host);
                }
                tracing::error!(error = %err, "Hook installation aborted");
                return Err(err);
            }
        }

        self.installed = true;
        tracing::info!(slots = self.slots.len(), "Installed hooks");
        Ok(())
    }

    /// Restore every host operation; safe after a failed or partial install
    ///
    /// Returns the number of slots that were bound.
    pub fn uninstall_all(&mut self, host: &dyn Host) -> usize {
        let restored = self.slots.iter_mut().map(|slot| slot.unbind(host)).filter(|was_bound| *was_bound).count();
        self.installed = false;
        tracing::info!(restored, "Uninstalled hooks");
        restored
    }

    fn resolve_all(&self, host: &dyn Host) -> Result<Vec<OperationHandle>> {
        self.slots
            .iter()
            .map(|slot| slot.resolve(host))
            .collect()
    }
}

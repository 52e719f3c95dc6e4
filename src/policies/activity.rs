//! Activity window gate - switches buildings dark after goods production

use crate::hooks::hook::Hook;
use crate::host::building::BuildingFlags;
use crate::host::operations::{ProduceGoods, ProduceGoodsArgs};
use crate::ports::PolicyPorts;

/// Clears the active flag of buildings the policy wants dark
pub struct ActivityWindowGate;

impl Hook<ProduceGoods> for ActivityWindowGate {
    type Capture = ();

    fn name(&self) -> &'static str {
        "activity_window_gate"
    }

    fn capture(&self, _args: &ProduceGoodsArgs) {}

    fn after(&self, args: &mut ProduceGoodsArgs, _output: &mut (), _capture: (), ports: &PolicyPorts) {
        if !args.data.is_active() {
            return;
        }

        let Some(policy) = ports.building() else {
            return;
        };

        if policy.should_appear_dark(args.building_id) {
            args.data.flags.remove(BuildingFlags::ACTIVE);
        }
    }
}

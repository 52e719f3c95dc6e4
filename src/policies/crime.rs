//! Crime accumulation corrector
//!
//! The host keeps growing the crime buffer of industry buildings even while
//! they are inactive. For inactive buildings the buffer is put back to its
//! pre-step value; active buildings keep whatever the host computed.

use crate::hooks::hook::Hook;
use crate::host::operations::{HandleCrime, HandleCrimeArgs};
use crate::ports::PolicyPorts;

pub struct CrimeCorrector;

impl Hook<HandleCrime> for CrimeCorrector {
    type Capture = u16;

    fn name(&self) -> &'static str {
        "crime_corrector"
    }

    fn capture(&self, args: &HandleCrimeArgs) -> u16 {
        args.data.crime_buffer
    }

    fn after(&self, args: &mut HandleCrimeArgs, _output: &mut (), prior: u16, _ports: &PolicyPorts) {
        if !args.data.is_active() {
            args.data.crime_buffer = prior;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::building::{Building, BuildingFlags};

    fn args(flags: BuildingFlags, crime: u16) -> HandleCrimeArgs {
        HandleCrimeArgs {
            data: Building {
                flags,
                crime_buffer: crime,
                ..Building::default()
            },
            ..HandleCrimeArgs::default()
        }
    }

    #[test]
    fn test_inactive_restores_counter() {
        let mut args = args(BuildingFlags::CREATED, 120);
        let prior = CrimeCorrector.capture(&args);
        args.data.crime_buffer = 180;

        CrimeCorrector.after(&mut args, &mut (), prior, &PolicyPorts::new());

        assert_eq!(args.data.crime_buffer, 120);
    }

    #[test]
    fn test_active_keeps_host_result() {
        let mut args = args(BuildingFlags::ACTIVE, 120);
        let prior = CrimeCorrector.capture(&args);
        args.data.crime_buffer = 90;

        CrimeCorrector.after(&mut args, &mut (), prior, &PolicyPorts::new());

        assert_eq!(args.data.crime_buffer, 90);
    }
}

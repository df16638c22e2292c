//! Precondition check for the GRASS addons the pipeline delegates to.

use crate::error::{LcError, Result};
use crate::ports::CapabilityProbe;

/// Addons that must be installed before any map is touched.
pub const REQUIRED_SERVICES: [&str; 2] = ["v.colors.to.rast", "r.colors.fuzzy_lc"];

/// Fail on the first required service the probe cannot find.
pub fn require_services<P: CapabilityProbe + ?Sized>(probe: &P) -> Result<()> {
    for name in REQUIRED_SERVICES {
        if !probe.exists(name) {
            return Err(LcError::MissingService {
                name: name.to_string(),
                hint: format!("g.extension {name}"),
            });
        }
    }
    Ok(())
}

//! Temperature source trait.

use crate::error::DeviceResult;

/// A device that reports a temperature.
///
/// Each source carries a single-character designator tag (for example `'T'`
/// for a hotend, `'B'` for a bed). Fader instances select their sources by
/// tag, not by individual device, so several sensors can share one tag.
pub trait TemperatureSource {
    /// Designator tag used for group selection.
    fn designator(&self) -> char;

    /// Current reading in degrees Celsius.
    ///
    /// Fails with [`DeviceError::NotAvailable`](crate::DeviceError) when the
    /// sensor cannot produce a reading on this poll; callers are expected to
    /// treat that as "contributes nothing" rather than as a fault.
    fn current_temperature(&self) -> DeviceResult<f64>;
}

use core::fmt;
use core::num::NonZeroU32;

/// Handle types for devices registered in an arena.
///
/// Sensors and switches get distinct handle types so a switch handle can
/// never be used to read a temperature (and vice versa). Both store the
/// 0-based arena index as index+1 in a `NonZeroU32`:
/// - `u32` keeps memory small
/// - `NonZero` enables `Option<SensorId>` to be pointer-optimized
macro_rules! device_id {
    ($(#[$doc:meta])* $name:ident, $label:literal) => {
        $(#[$doc])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(NonZeroU32);

        impl $name {
            /// Create a handle from a 0-based arena index by storing index+1.
            pub fn from_index(index: u32) -> Self {
                // index+1 must be nonzero
                Self(NonZeroU32::new(index + 1).expect("index+1 is nonzero"))
            }

            /// Recover the 0-based arena index.
            pub fn index(self) -> u32 {
                self.0.get() - 1
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "({})"), self.index())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.index())
            }
        }
    };
}

device_id!(
    /// Handle to a registered temperature source.
    SensorId,
    "SensorId"
);

device_id!(
    /// Handle to a registered switch/PWM output.
    SwitchId,
    "SwitchId"
);

use core::fmt;
use core::num::NonZeroU32;

/// Identifier of a compound in a component property table.
///
/// Table ids are 1-based, so the `NonZero` niche keeps `Option<ComponentId>`
/// the same size as `ComponentId`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ComponentId(NonZeroU32);

impl ComponentId {
    /// Create an id from a raw table key. Returns `None` for 0.
    pub const fn new(raw: u32) -> Option<Self> {
        match NonZeroU32::new(raw) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Raw table key.
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Debug for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentId({})", self.get())
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Declare a well-known component id as a constant.
#[macro_export]
macro_rules! component_id {
    ($raw:expr) => {
        match $crate::ComponentId::new($raw) {
            Some(id) => id,
            None => panic!("component id must be nonzero"),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_round_trip_raw() {
        for raw in [1_u32, 2, 4, 46, 10_000] {
            let id = ComponentId::new(raw).unwrap();
            assert_eq!(id.get(), raw);
        }
    }

    #[test]
    fn zero_is_not_an_id() {
        assert!(ComponentId::new(0).is_none());
    }

    #[test]
    fn option_id_is_small() {
        assert_eq!(
            core::mem::size_of::<ComponentId>(),
            core::mem::size_of::<Option<ComponentId>>()
        );
    }

    #[test]
    fn const_macro() {
        const PROPANE: ComponentId = component_id!(4);
        assert_eq!(PROPANE.get(), 4);
        assert_eq!(format!("{PROPANE}"), "4");
    }
}

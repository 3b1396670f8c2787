/// A single cell in an open-addressing table.
///
/// The three states are an explicit enum rather than an `occupied` flag so
/// the probe rules cannot conflate "never written" with "deleted": a lookup
/// terminates at [`Slot::Empty`] but must continue past [`Slot::Tombstone`],
/// since the entry it is looking for may have been placed beyond the deleted
/// slot while it was still live.
///
/// A `Tombstone` can be claimed by a later insertion along the same probe
/// sequence; the only way back to `Empty` is a full resize, which rebuilds
/// the array from scratch and drops every tombstone.
pub(crate) enum Slot<K, V> {
    /// Never written. Terminates any probe sequence.
    Empty,
    /// A live entry.
    Occupied(K, V),
    /// Deleted, not yet reclaimed. Transparent to lookups.
    Tombstone,
}

impl<K, V> Slot<K, V> {
    /// Returns the entry if the slot is live.
    pub(crate) fn as_occupied(&self) -> Option<(&K, &V)> {
        match self {
            Slot::Occupied(key, value) => Some((key, value)),
            _ => None,
        }
    }

    /// Takes the entry out, leaving a tombstone behind.
    pub(crate) fn bury(&mut self) -> Option<(K, V)> {
        match core::mem::replace(self, Slot::Tombstone) {
            Slot::Occupied(key, value) => Some((key, value)),
            // Not live; put the original state back.
            other => {
                *self = other;
                None
            }
        }
    }
}

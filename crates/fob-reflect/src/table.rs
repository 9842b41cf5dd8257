//! Mirror storage and the declaration-id resolution table.
//!
//! Every mirror lives in a [`MirrorArena`] slot addressed by a [`MirrorId`]. Declarations
//! reserve their slot *before* their children are resolved, so a reference back to a
//! declaration that is still being built returns the reserved handle instead of recursing.
//! That is what makes self-referential and mutually recursive types terminate.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::classify::DeclKind;
use crate::error::{ReflectError, Result};
use crate::mirror::Mirror;
use crate::raw::DeclId;

/// Stable handle to a mirror owned by a [`Reflector`](crate::Reflector).
///
/// Two handles are equal exactly when they name the same mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MirrorId(u32);

impl MirrorId {
    pub(crate) const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Position of the mirror in its arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for MirrorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mirror#{}", self.0)
    }
}

#[derive(Debug)]
enum Slot {
    Reserved,
    Filled(Mirror),
}

/// Append-only mirror storage used while a pass is running.
#[derive(Debug, Default)]
pub(crate) struct MirrorArena {
    slots: Vec<Slot>,
}

impl MirrorArena {
    /// Stores an already complete mirror.
    pub fn alloc(&mut self, mirror: Mirror) -> MirrorId {
        let id = self.next_id();
        self.slots.push(Slot::Filled(mirror));
        id
    }

    /// Reserves an empty slot to be filled once its contents are built.
    pub fn reserve(&mut self) -> MirrorId {
        let id = self.next_id();
        self.slots.push(Slot::Reserved);
        id
    }

    /// Populates a reserved slot. Each slot is written exactly once.
    pub fn fill(&mut self, id: MirrorId, mirror: Mirror) -> Result<()> {
        let Some(slot) = self.slots.get_mut(id.index()) else {
            return Err(ReflectError::invariant(format!("{id} was never reserved")));
        };
        if matches!(slot, Slot::Filled(_)) {
            return Err(ReflectError::invariant(format!("{id} was filled twice")));
        }
        *slot = Slot::Filled(mirror);
        Ok(())
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Ends the pass. Fails if any reservation was never filled.
    pub fn freeze(self) -> Result<Vec<Mirror>> {
        self.slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| match slot {
                Slot::Filled(mirror) => Ok(mirror),
                Slot::Reserved => Err(ReflectError::invariant(format!(
                    "mirror#{index} was reserved but never filled"
                ))),
            })
            .collect()
    }

    fn next_id(&self) -> MirrorId {
        // More than u32::MAX mirrors cannot come from a document that fits in memory.
        MirrorId::new(self.slots.len() as u32)
    }
}

/// Outcome of asking the table for a declaration's slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reservation {
    /// First request: the caller owns the slot and must fill it.
    Fresh(MirrorId),
    /// Already reserved or built; use as-is.
    Existing(Resolved),
}

/// A declaration's mirror together with the kind it was classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Resolved {
    pub mirror: MirrorId,
    /// `None` when the declaration was unrecognized and maps to the Unknown builtin.
    pub kind: Option<DeclKind>,
}

/// Mapping from declaration id to its single mirror.
#[derive(Debug, Default)]
pub(crate) struct ResolutionTable {
    entries: FxHashMap<DeclId, Resolved>,
}

impl ResolutionTable {
    pub fn lookup(&self, decl: DeclId) -> Option<Resolved> {
        self.entries.get(&decl).copied()
    }

    /// Reserves a slot for `decl` unless one already exists.
    pub fn reserve(&mut self, arena: &mut MirrorArena, decl: DeclId, kind: DeclKind) -> Reservation {
        if let Some(existing) = self.lookup(decl) {
            return Reservation::Existing(existing);
        }
        let mirror = arena.reserve();
        self.entries.insert(
            decl,
            Resolved {
                mirror,
                kind: Some(kind),
            },
        );
        Reservation::Fresh(mirror)
    }

    /// Pins an unrecognized declaration to a shared fallback mirror.
    pub fn pin_unrecognized(&mut self, decl: DeclId, fallback: MirrorId) -> Resolved {
        *self.entries.entry(decl).or_insert(Resolved {
            mirror: fallback,
            kind: None,
        })
    }

    /// Declaration-id lookup map for the finished reflector.
    pub fn into_mirrors(self) -> FxHashMap<DeclId, MirrorId> {
        self.entries
            .into_iter()
            .map(|(decl, resolved)| (decl, resolved.mirror))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mirror::{Mirror, PrimitiveMirror};

    fn leaf() -> Mirror {
        Mirror::Unknown(PrimitiveMirror::new("unknown"))
    }

    #[test]
    fn second_reservation_returns_the_same_slot() {
        let mut arena = MirrorArena::default();
        let mut table = ResolutionTable::default();

        let Reservation::Fresh(first) = table.reserve(&mut arena, DeclId(7), DeclKind::Class) else {
            panic!("first reservation must be fresh");
        };
        let second = table.reserve(&mut arena, DeclId(7), DeclKind::Class);
        assert_eq!(
            second,
            Reservation::Existing(Resolved {
                mirror: first,
                kind: Some(DeclKind::Class)
            })
        );
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn slots_are_written_once() {
        let mut arena = MirrorArena::default();
        let id = arena.reserve();
        arena.fill(id, leaf()).expect("first fill");
        assert!(matches!(
            arena.fill(id, leaf()),
            Err(ReflectError::InvariantViolation { .. })
        ));
        assert!(arena.fill(MirrorId::new(42), leaf()).is_err());
    }

    #[test]
    fn freeze_rejects_dangling_reservations() {
        let mut arena = MirrorArena::default();
        arena.alloc(leaf());
        arena.reserve();
        assert!(matches!(
            arena.freeze(),
            Err(ReflectError::InvariantViolation { .. })
        ));
    }

    #[test]
    fn unrecognized_declarations_keep_their_first_pin() {
        let mut table = ResolutionTable::default();
        let first = table.pin_unrecognized(DeclId(3), MirrorId::new(0));
        let again = table.pin_unrecognized(DeclId(3), MirrorId::new(9));
        assert_eq!(first, again);
        assert_eq!(again.kind, None);
    }
}

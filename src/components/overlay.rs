//! Map overlay drawer.
//!
//! Each map entity carries an [`OverlayDrawer`] that records which marker
//! overlays are drawn over which entities. Callers enable an overlay and get
//! back an [`OverlayHandle`]; the handle is the only way to disable it again.
//!
//! # Ownership
//!
//! `OverlayHandle` is not `Clone`. Whoever holds the handle owns
//! the overlay, and [`OverlayDrawer::disable`] takes it out of the caller's
//! `Option`, so the same handle cannot be released twice.
//!
//! Several handles of the same kind on one entity share a single drawn
//! marker; the marker stays visible while any of them is active.

use bevy_ecs::prelude::{Component, Entity};
use log::{debug, trace};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Marker overlays a drawer knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    QuestionMark,
    Forbidden,
    NeedsPower,
    OutOfFuel,
    BrokenDown,
}

/// Token for one active overlay.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct OverlayHandle {
    id: u64,
    kind: OverlayKind,
}

impl OverlayHandle {
    pub fn kind(&self) -> OverlayKind {
        self.kind
    }
}

/// Overlay registry for one map.
#[derive(Component, Debug, Default)]
pub struct OverlayDrawer {
    next_id: u64,
    active: FxHashMap<Entity, SmallVec<[(u64, OverlayKind); 2]>>,
}

impl OverlayDrawer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start drawing `kind` over `entity`.
    pub fn enable(&mut self, entity: Entity, kind: OverlayKind) -> OverlayHandle {
        self.next_id += 1;
        let id = self.next_id;
        self.active.entry(entity).or_default().push((id, kind));
        trace!("Overlay {:?} #{} enabled on {:?}", kind, id, entity);
        OverlayHandle { id, kind }
    }

    /// Stop drawing the overlay behind `handle` and clear the handle.
    ///
    /// Returns `true` if an active overlay was removed. An empty handle or a
    /// handle this drawer doesn't know about is a no-op (the handle is still
    /// cleared).
    pub fn disable(&mut self, entity: Entity, handle: &mut Option<OverlayHandle>) -> bool {
        let Some(handle) = handle.take() else {
            return false;
        };
        let Some(overlays) = self.active.get_mut(&entity) else {
            debug!(
                "Overlay #{} not active on {:?}, nothing to disable",
                handle.id, entity
            );
            return false;
        };
        let before = overlays.len();
        overlays.retain(|(id, _)| *id != handle.id);
        let removed = overlays.len() != before;
        if overlays.is_empty() {
            self.active.remove(&entity);
        }
        if removed {
            trace!(
                "Overlay {:?} #{} disabled on {:?}",
                handle.kind, handle.id, entity
            );
        } else {
            debug!(
                "Overlay #{} not active on {:?}, nothing to disable",
                handle.id, entity
            );
        }
        removed
    }

    /// Whether an overlay of `kind` is drawn over `entity`.
    pub fn is_shown(&self, entity: Entity, kind: OverlayKind) -> bool {
        self.active
            .get(&entity)
            .is_some_and(|overlays| overlays.iter().any(|(_, k)| *k == kind))
    }

    /// Distinct overlay kinds drawn over `entity`.
    pub fn kinds_on(&self, entity: Entity) -> SmallVec<[OverlayKind; 2]> {
        let mut kinds: SmallVec<[OverlayKind; 2]> = SmallVec::new();
        if let Some(overlays) = self.active.get(&entity) {
            for (_, kind) in overlays {
                if !kinds.contains(kind) {
                    kinds.push(*kind);
                }
            }
        }
        kinds
    }

    /// Total number of active handles on this map.
    pub fn overlay_count(&self) -> usize {
        self.active.values().map(|o| o.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::world::World;

    fn two_entities() -> (Entity, Entity) {
        let mut world = World::new();
        (world.spawn_empty().id(), world.spawn_empty().id())
    }

    #[test]
    fn enable_then_disable_clears_handle() {
        let (a, _) = two_entities();
        let mut drawer = OverlayDrawer::new();
        let mut handle = Some(drawer.enable(a, OverlayKind::QuestionMark));
        assert!(drawer.is_shown(a, OverlayKind::QuestionMark));
        assert_eq!(drawer.overlay_count(), 1);

        assert!(drawer.disable(a, &mut handle));
        assert!(handle.is_none());
        assert!(!drawer.is_shown(a, OverlayKind::QuestionMark));
        assert_eq!(drawer.overlay_count(), 0);
    }

    #[test]
    fn disable_empty_handle_is_noop() {
        let (a, _) = two_entities();
        let mut drawer = OverlayDrawer::new();
        let mut handle = None;
        assert!(!drawer.disable(a, &mut handle));
    }

    #[test]
    fn disable_on_wrong_entity_keeps_overlay() {
        let (a, b) = two_entities();
        let mut drawer = OverlayDrawer::new();
        let mut handle = Some(drawer.enable(a, OverlayKind::QuestionMark));
        assert!(!drawer.disable(b, &mut handle));
        assert!(handle.is_none());
        assert!(drawer.is_shown(a, OverlayKind::QuestionMark));
    }

    #[test]
    fn same_kind_stays_shown_until_last_handle_released() {
        let (a, _) = two_entities();
        let mut drawer = OverlayDrawer::new();
        let mut first = Some(drawer.enable(a, OverlayKind::Forbidden));
        let mut second = Some(drawer.enable(a, OverlayKind::Forbidden));
        assert_eq!(drawer.kinds_on(a).as_slice(), &[OverlayKind::Forbidden]);

        drawer.disable(a, &mut first);
        assert!(drawer.is_shown(a, OverlayKind::Forbidden));
        drawer.disable(a, &mut second);
        assert!(!drawer.is_shown(a, OverlayKind::Forbidden));
    }
}

//! Overlay change notifications.
//!
//! Triggered every time an indicator enables or disables an overlay on an
//! [`OverlayDrawer`](crate::components::overlay::OverlayDrawer).

use bevy_ecs::prelude::*;
use log::info;

use crate::components::overlay::OverlayKind;

/// Event emitted when an overlay is shown or hidden over an entity.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayToggled {
    pub entity: Entity,
    pub kind: OverlayKind,
    /// `true` for enable, `false` for disable.
    pub shown: bool,
}

/// Observer that logs overlay changes.
pub fn log_overlay_toggled(trigger: On<OverlayToggled>) {
    let event = trigger.event();
    if event.shown {
        info!("{:?} shown over {:?}", event.kind, event.entity);
    } else {
        info!("{:?} hidden over {:?}", event.kind, event.entity);
    }
}

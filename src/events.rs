//! Events exchanged with the rest of the game.
use bevy::prelude::*;

use crate::prelude::{ActionKind, TriggerName};

/// Overlap notifications sent by the physics layer of the game.
///
/// The entity is the one holding the [`Interactable`](crate::prelude::Interactable). What
/// overlaps it does not matter.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapEvent {
    /// Something started overlapping the interactable.
    Started(Entity),
    /// Something stopped overlapping the interactable.
    Ended(Entity),
}

/// Sent every time an interactable performs its action.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionFired {
    /// The entity with the `Interactable` component.
    pub interactable: Entity,
    /// The entity the action was performed on.
    pub target: Entity,
    /// The signal that caused it.
    pub trigger: TriggerName,
    /// The performed action.
    pub action: ActionKind,
}

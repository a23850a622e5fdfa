//! The interactable component.
use bevy::prelude::Component;

use crate::prelude::{InteractionConfig, InteractionController};

/// Makes an entity react to overlaps, keys or scene start.
///
/// It is initialized by the plugin during the first update after being added: from then on
/// its target is fixed.
///
/// # Examples
///
/// ```
/// use bevy::prelude::*;
/// use bevy_interactables::prelude::*;
///
/// fn spawn_door(mut commands: Commands) {
///     commands.spawn((
///         Interactable::new(
///             InteractionConfig::new(ActionKind::Hide)
///                 .triggered_by(TriggerKind::OnKey)
///                 .once(),
///         ),
///         Renderer::default(),
///         Collider::default(),
///     ));
/// }
/// ```
#[derive(Component, Debug, Clone)]
pub struct Interactable {
    /// The state machine.
    pub(crate) controller: InteractionController,
}

impl Interactable {
    /// Creates an interactable from its configuration.
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            controller: InteractionController::new(config),
        }
    }

    /// The state machine.
    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    /// The configuration.
    pub fn config(&self) -> &InteractionConfig {
        self.controller.config()
    }

    /// Returns true once the interactable will never fire again.
    pub fn is_disabled(&self) -> bool {
        self.controller.is_disabled()
    }
}

impl From<InteractionConfig> for Interactable {
    fn from(config: InteractionConfig) -> Self {
        Self::new(config)
    }
}

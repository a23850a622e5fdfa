//! Author-time configuration of an interactable.
//!
//! An [`InteractionConfig`] says *what* happens ([`ActionKind`]), *when* it happens
//! ([`TriggerKind`]), on *which* object ([`Delegation`]) and *if* it is allowed to happen
//! ([`VisibilityGate`]). It is immutable once the interactable has been initialized.
use bevy::prelude::{Entity, KeyCode};
use serde::Deserialize;

use crate::condition::{condition_passes, RendererStates};

/// The action an interactable performs on its target.
#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Fire the "enter", "exit" and "key" triggers of the target animator.
    ///
    /// With this action the [`TriggerKind`] is ignored: all three sources are live and each
    /// one fires the animator trigger with the same name.
    #[default]
    AnimationTriggers,
    /// Enable renderers, lights and solid colliders of the target subtree.
    Show,
    /// Disable renderers, lights and solid colliders of the target subtree.
    Hide,
    /// Start the target audio source if it is not playing already.
    AudioPlay,
    /// Stop the target audio source.
    AudioStop,
    /// Start the target particle system if it is not playing already.
    ParticlesPlay,
    /// Stop the target particle system.
    ParticlesStop,
}

/// The signal that makes an interactable perform its action.
#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerKind {
    /// Once, as soon as the interactable is initialized.
    #[default]
    SceneStart,
    /// When something starts overlapping the interactable.
    OnEnter,
    /// When something stops overlapping the interactable.
    OnExit,
    /// When the configured key is pressed while something overlaps the interactable.
    OnKey,
}

/// The visibility a gate object must have for the interaction to go through.
#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisibilityCondition {
    /// Every renderer of the gate object must be enabled.
    #[default]
    IsVisible,
    /// Every renderer of the gate object must be disabled.
    IsHidden,
}

impl VisibilityCondition {
    /// The enabled flag every renderer is expected to have.
    pub const fn expects_visible(&self) -> bool {
        matches!(self, VisibilityCondition::IsVisible)
    }
}

/// Makes an interaction depend on the visibility of another object.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityGate {
    /// Whether the gate is checked at all.
    pub enabled: bool,
    /// The object whose renderers are inspected.
    pub object: Option<Entity>,
    /// The expected visibility of the object.
    pub state: VisibilityCondition,
}

impl VisibilityGate {
    /// Returns true if the interaction is currently allowed by this gate.
    ///
    /// A disabled gate, or a gate without an object, always passes.
    pub fn passes(&self, renderers: &impl RendererStates) -> bool {
        condition_passes(
            self.enabled,
            self.object,
            self.state.expects_visible(),
            renderers,
        )
    }
}

/// Redirects the action of an interactable to another object.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Delegation {
    /// Whether the action is redirected.
    pub enabled: bool,
    /// The object that receives the action.
    pub target: Option<Entity>,
}

/// The full configuration of an interactable.
///
/// # Examples
///
/// ```
/// use bevy::prelude::KeyCode;
/// use bevy_interactables::prelude::*;
///
/// let config = InteractionConfig::new(ActionKind::Hide)
///     .triggered_by(TriggerKind::OnKey)
///     .with_key(KeyCode::E)
///     .once();
///
/// assert_eq!(config.key, KeyCode::E);
/// assert!(!config.repeatable);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionConfig {
    /// What happens.
    pub action: ActionKind,
    /// When it happens.
    pub trigger: TriggerKind,
    /// The key polled for [`TriggerKind::OnKey`] and for the "key" animation trigger.
    pub key: KeyCode,
    /// If false the interactable disables itself after firing.
    pub repeatable: bool,
    /// Optional visibility gate.
    pub gate: VisibilityGate,
    /// Optional redirection of the action.
    pub delegation: Delegation,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            action: ActionKind::default(),
            trigger: TriggerKind::default(),
            key: KeyCode::F,
            repeatable: true,
            gate: VisibilityGate::default(),
            delegation: Delegation::default(),
        }
    }
}

impl InteractionConfig {
    /// A repeatable configuration for `action`, fired at scene start with the `F` key bound.
    pub fn new(action: ActionKind) -> Self {
        Self {
            action,
            ..Default::default()
        }
    }

    /// Sets the trigger kind.
    pub fn triggered_by(mut self, trigger: TriggerKind) -> Self {
        self.trigger = trigger;
        self
    }

    /// Sets the polled key.
    pub fn with_key(mut self, key: KeyCode) -> Self {
        self.key = key;
        self
    }

    /// Makes the interaction fire only once.
    pub fn once(mut self) -> Self {
        self.repeatable = false;
        self
    }

    /// Enables the visibility gate on `object`.
    pub fn gated_by(mut self, object: Entity, state: VisibilityCondition) -> Self {
        self.gate = VisibilityGate {
            enabled: true,
            object: Some(object),
            state,
        };
        self
    }

    /// Redirects the action to `target`.
    pub fn delegate_to(mut self, target: Entity) -> Self {
        self.delegation = Delegation {
            enabled: true,
            target: Some(target),
        };
        self
    }

    /// The object the action applies to when the interactable is owned by `owner`.
    pub fn resolve_target(&self, owner: Entity) -> Entity {
        match self.delegation {
            Delegation {
                enabled: true,
                target: Some(target),
            } => target,
            _ => owner,
        }
    }
}

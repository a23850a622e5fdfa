//! Interaction presets: interactable configurations stored as `.interaction.ron` assets.
//!
//! Objects are referenced by their [`Name`] and resolved when the preset is attached.
use bevy::prelude::*;
use bevy::reflect::TypePath;
use serde::Deserialize;

use crate::prelude::{
    ActionKind, Delegation, Interactable, InteractionConfig, TriggerKind, VisibilityCondition,
    VisibilityGate,
};

pub mod loader;

/// A visibility gate as written in a preset.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct PresetGate {
    /// The name of the gate object.
    pub object: String,
    /// The expected visibility.
    #[serde(default)]
    pub state: VisibilityCondition,
}

/// The preset asset type.
///
/// ```ron
/// (
///     action: Hide,
///     trigger: OnKey,
///     key: E,
///     repeatable: false,
///     condition: Some((object: "Lamp", state: IsVisible)),
///     delegate_to: Some("Door"),
/// )
/// ```
#[derive(Asset, TypePath, Debug, Deserialize, Clone, PartialEq)]
pub struct InteractionPreset {
    /// What happens.
    pub action: ActionKind,
    /// When it happens.
    #[serde(default)]
    pub trigger: TriggerKind,
    /// The polled key.
    #[serde(default = "default_key")]
    pub key: KeyCode,
    /// If false the interactable fires only once.
    #[serde(default = "default_repeatable")]
    pub repeatable: bool,
    /// Optional visibility gate.
    #[serde(default)]
    pub condition: Option<PresetGate>,
    /// Optional name of the object receiving the action.
    #[serde(default)]
    pub delegate_to: Option<String>,
}

/// `F`, as in the code defaults.
fn default_key() -> KeyCode {
    KeyCode::F
}

/// Interactions repeat unless told otherwise.
fn default_repeatable() -> bool {
    true
}

impl InteractionPreset {
    /// Builds the configuration, resolving object names with `resolve`.
    ///
    /// A name that does not resolve leaves the gate or the delegation enabled but without
    /// object: the gate then always passes and the action stays on the owner.
    pub fn to_config(&self, mut resolve: impl FnMut(&str) -> Option<Entity>) -> InteractionConfig {
        InteractionConfig {
            action: self.action,
            trigger: self.trigger,
            key: self.key,
            repeatable: self.repeatable,
            gate: self
                .condition
                .as_ref()
                .map(|gate| VisibilityGate {
                    enabled: true,
                    object: resolve(&gate.object),
                    state: gate.state,
                })
                .unwrap_or_default(),
            delegation: self
                .delegate_to
                .as_deref()
                .map(|name| Delegation {
                    enabled: true,
                    target: resolve(name),
                })
                .unwrap_or_default(),
        }
    }
}

/// Turns the entity into an [`Interactable`] configured by the preset once it is loaded.
#[derive(Component, Debug, Clone)]
pub struct InteractionPresetHandle(pub Handle<InteractionPreset>);

/// Replaces loaded [`InteractionPresetHandle`]s with [`Interactable`]s.
pub(crate) fn attach_presets(
    mut commands: Commands,
    pending: Query<(Entity, &InteractionPresetHandle), Without<Interactable>>,
    presets: Res<Assets<InteractionPreset>>,
    names: Query<(Entity, &Name)>,
) {
    for (entity, handle) in &pending {
        let Some(preset) = presets.get(&handle.0) else {
            continue;
        };
        let config = preset.to_config(|wanted| {
            let found = names
                .iter()
                .find(|(_, name)| name.as_str() == wanted)
                .map(|(e, _)| e);
            if found.is_none() {
                warn!("Interaction preset on {:?}: no entity named {}", entity, wanted);
            }
            found
        });
        commands
            .entity(entity)
            .insert(Interactable::new(config))
            .remove::<InteractionPresetHandle>();
    }
}

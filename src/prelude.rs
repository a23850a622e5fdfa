//! Prelude for the `bevy_interactables` crate.
pub use super::{InteractablesPlugin, InteractablesSet};
pub use super::{
    capabilities::{components::*, *},
    condition::*,
    config::*,
    controller::*,
    errors::*,
    events::*,
    interactable::*,
    preset::{loader::InteractionPresetLoader, InteractionPreset, InteractionPresetHandle, PresetGate},
    triggers::*,
};

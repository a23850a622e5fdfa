#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]
#![forbid(unsafe_code)]
#![warn(clippy::doc_markdown)]
// Often exceeded by queries
#![allow(clippy::type_complexity)]
// Unhelpful for systems
#![allow(clippy::too_many_arguments)]

//! [`bevy_interactables`] is a Bevy plugin to make objects react to the player:
//! show or hide things, play sounds or particles, or fire animation triggers when
//! something enters or leaves a collider, when a key is pressed, or at scene start.

use bevy::prelude::*;

use prelude::*;

pub mod capabilities;
pub mod condition;
pub mod config;
pub mod controller;
pub(crate) mod driver;
pub mod errors;
pub mod events;
pub mod interactable;
pub mod prelude;
pub mod preset;
pub mod triggers;

/// The plugin that makes [`Interactable`]s work.
///
/// Overlaps come from [`OverlapEvent`]s sent by the game physics, keys from
/// [`Input<KeyCode>`]. Send the overlap events before [`InteractablesSet::Drive`] to have
/// them handled in the same frame.
///
/// Without Bevy's `InputPlugin` the plugin adds [`Input<KeyCode>`] itself and clears its
/// just pressed keys in [`Last`], so a key pressed between two updates is seen by one frame.
pub struct InteractablesPlugin;

impl Plugin for InteractablesPlugin {
    fn build(&self, app: &mut App) {
        if !app.world.contains_resource::<Input<KeyCode>>() {
            app.init_resource::<Input<KeyCode>>()
                .add_systems(Last, driver::clear_key_transitions);
        }
        app.add_event::<OverlapEvent>()
            .add_event::<InteractionFired>()
            .init_asset::<InteractionPreset>()
            .init_asset_loader::<InteractionPresetLoader>()
            .register_type::<Animator>()
            .register_type::<AudioEmitter>()
            .register_type::<ParticleEmitter>()
            .register_type::<Renderer>()
            .register_type::<LightEmitter>()
            .register_type::<Collider>()
            .register_animator::<Animator>()
            .register_audio_source::<AudioEmitter>()
            .register_particle_system::<ParticleEmitter>()
            .register_renderer::<Renderer>()
            .register_light::<LightEmitter>()
            .register_collider::<Collider>()
            .configure_sets(
                Update,
                (
                    InteractablesSet::Attach,
                    InteractablesSet::Initialize,
                    InteractablesSet::Drive,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    preset::attach_presets.in_set(InteractablesSet::Attach),
                    // attached interactables are initialized in the same frame
                    apply_deferred
                        .after(InteractablesSet::Attach)
                        .before(InteractablesSet::Initialize),
                    driver::initialize_interactables.in_set(InteractablesSet::Initialize),
                    driver::drive_interactables.in_set(InteractablesSet::Drive),
                ),
            );
    }
}

/// The plugin systems, run in this order in [`Update`].
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractablesSet {
    /// Loaded presets become interactables.
    Attach,
    /// New interactables resolve their target and check its capabilities.
    Initialize,
    /// Overlaps and keys are fed to the interactables and actions performed.
    Drive,
}

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::prelude::*;

    /// A minimal Bevy app with the Interactables plugin.
    pub fn minimal_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default(), InteractablesPlugin));
        app
    }

    #[test]
    fn plugin_registers_resources() {
        let app = minimal_app();
        assert!(app.world.contains_resource::<Events<OverlapEvent>>());
        assert!(app.world.contains_resource::<Events<InteractionFired>>());
        assert!(app.world.contains_resource::<Input<KeyCode>>());
        assert!(app.world.contains_resource::<Assets<InteractionPreset>>());
    }

    #[test]
    fn one_key_press_fires_once() {
        let mut app = minimal_app();
        let radio = app
            .world
            .spawn((
                Interactable::new(
                    InteractionConfig::new(ActionKind::AudioPlay).triggered_by(TriggerKind::OnKey),
                ),
                AudioEmitter::default(),
            ))
            .id();
        app.update();
        app.world.send_event(OverlapEvent::Started(radio));
        app.update();

        let mut reader = app.world.resource::<Events<InteractionFired>>().get_reader();
        app.world.resource_mut::<Input<KeyCode>>().press(KeyCode::F);
        let mut count = 0;
        for _ in 0..3 {
            app.update();
            let events = app.world.resource::<Events<InteractionFired>>();
            count += reader.read(events).count();
        }

        assert_eq!(count, 1);
        assert!(app.world.resource::<Input<KeyCode>>().pressed(KeyCode::F));
        assert!(!app.world.resource::<Input<KeyCode>>().just_pressed(KeyCode::F));
    }

    #[test]
    fn delegated_interaction_fires_event() {
        let mut app = minimal_app();
        let lamp = app.world.spawn(LightEmitter::default()).id();
        let switch = app
            .world
            .spawn(Interactable::new(
                InteractionConfig::new(ActionKind::Hide)
                    .triggered_by(TriggerKind::OnExit)
                    .delegate_to(lamp),
            ))
            .id();
        app.update();

        app.world.send_event(OverlapEvent::Ended(switch));
        app.update();

        assert!(!app.world.get::<LightEmitter>(lamp).unwrap().enabled);
        let events = app.world.resource::<Events<InteractionFired>>();
        let fired: Vec<_> = events.get_reader().read(events).copied().collect();
        assert_eq!(
            fired,
            vec![InteractionFired {
                interactable: switch,
                target: lamp,
                trigger: TriggerName::Exit,
                action: ActionKind::Hide,
            }]
        );
    }
}

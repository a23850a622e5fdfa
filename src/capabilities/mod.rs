//! What an interactable needs from the objects it acts on.
//!
//! Each capability is a trait that can be queried with `bevy-trait-query`, so the host game
//! can plug its own components in (its audio player, its physics colliders, ...) through
//! [`AppInteractablesExt`]. The [`components`] module has small stock components implementing
//! every capability; [`InteractablesPlugin`](crate::InteractablesPlugin) registers them.
use bevy::prelude::*;
use bevy_trait_query::RegisterExt;

pub mod components;

/// An animation controller with named trigger parameters.
#[bevy_trait_query::queryable]
pub trait AnimatorTriggers {
    /// All the parameter names declared by the controller.
    fn parameter_names(&self) -> Vec<String>;
    /// Fires the trigger parameter `name`.
    fn set_trigger(&mut self, name: &str);
}

/// Something that plays sound.
#[bevy_trait_query::queryable]
pub trait AudioPlayback {
    /// Returns true while playing.
    fn is_playing(&self) -> bool;
    /// Starts playback.
    fn play(&mut self);
    /// Stops playback.
    fn stop(&mut self);
}

/// Something that emits particles.
#[bevy_trait_query::queryable]
pub trait ParticlePlayback {
    /// Returns true while emitting.
    fn is_playing(&self) -> bool;
    /// Starts emitting.
    fn play(&mut self);
    /// Stops emitting.
    fn stop(&mut self);
}

/// A visual element that can be switched on and off.
#[bevy_trait_query::queryable]
pub trait RenderSwitch {
    /// Whether the element is drawn.
    fn is_enabled(&self) -> bool;
    /// Switches the element.
    fn set_enabled(&mut self, enabled: bool);
}

/// A light that can be switched on and off.
#[bevy_trait_query::queryable]
pub trait LightSwitch {
    /// Whether the light is on.
    fn is_enabled(&self) -> bool;
    /// Switches the light.
    fn set_enabled(&mut self, enabled: bool);
}

/// A collision shape that can be switched on and off.
#[bevy_trait_query::queryable]
pub trait ColliderSwitch {
    /// Whether the collider takes part in the simulation.
    fn is_enabled(&self) -> bool;
    /// Switches the collider.
    fn set_enabled(&mut self, enabled: bool);
    /// Sensors only report overlaps. Show and Hide never touch them.
    fn is_sensor(&self) -> bool;
}

/// Extension trait for [`App`] to register host components as interaction capabilities.
///
/// A component should be registered for at most one capability.
pub trait AppInteractablesExt {
    /// Registers an animator component.
    fn register_animator<C: Component + AnimatorTriggers>(&mut self) -> &mut Self;
    /// Registers an audio source component.
    fn register_audio_source<C: Component + AudioPlayback>(&mut self) -> &mut Self;
    /// Registers a particle system component.
    fn register_particle_system<C: Component + ParticlePlayback>(&mut self) -> &mut Self;
    /// Registers a renderer component.
    fn register_renderer<C: Component + RenderSwitch>(&mut self) -> &mut Self;
    /// Registers a light component.
    fn register_light<C: Component + LightSwitch>(&mut self) -> &mut Self;
    /// Registers a collider component.
    fn register_collider<C: Component + ColliderSwitch>(&mut self) -> &mut Self;
}

impl AppInteractablesExt for App {
    fn register_animator<C: Component + AnimatorTriggers>(&mut self) -> &mut Self {
        self.register_component_as::<dyn AnimatorTriggers, C>();
        debug!("Registered animator: {}", std::any::type_name::<C>());
        self
    }

    fn register_audio_source<C: Component + AudioPlayback>(&mut self) -> &mut Self {
        self.register_component_as::<dyn AudioPlayback, C>();
        debug!("Registered audio source: {}", std::any::type_name::<C>());
        self
    }

    fn register_particle_system<C: Component + ParticlePlayback>(&mut self) -> &mut Self {
        self.register_component_as::<dyn ParticlePlayback, C>();
        debug!("Registered particle system: {}", std::any::type_name::<C>());
        self
    }

    fn register_renderer<C: Component + RenderSwitch>(&mut self) -> &mut Self {
        self.register_component_as::<dyn RenderSwitch, C>();
        debug!("Registered renderer: {}", std::any::type_name::<C>());
        self
    }

    fn register_light<C: Component + LightSwitch>(&mut self) -> &mut Self {
        self.register_component_as::<dyn LightSwitch, C>();
        debug!("Registered light: {}", std::any::type_name::<C>());
        self
    }

    fn register_collider<C: Component + ColliderSwitch>(&mut self) -> &mut Self {
        self.register_component_as::<dyn ColliderSwitch, C>();
        debug!("Registered collider: {}", std::any::type_name::<C>());
        self
    }
}

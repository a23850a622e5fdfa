//! Stock components implementing the interaction capabilities.
//!
//! They only hold state. A game either syncs them with its real engine objects
//! (e.g. by reacting to `Changed<AudioEmitter>`) or registers its own components instead.
use bevy::prelude::*;

use super::{
    AnimatorTriggers, AudioPlayback, ColliderSwitch, LightSwitch, ParticlePlayback, RenderSwitch,
};

/// Animation controller with declared parameters and a queue of fired triggers.
///
/// A trigger stays pending until the animation system takes it with
/// [`Animator::drain_fired`], which it should do every frame. Setting a trigger that is
/// already pending does nothing, so the queue never holds more than one entry per name.
#[derive(Component, Reflect, Debug, Default, Clone, PartialEq, Eq)]
#[reflect(Component)]
pub struct Animator {
    /// The declared parameter names.
    pub parameters: Vec<String>,
    /// Triggers fired and not yet drained, oldest first, without duplicates.
    fired: Vec<String>,
}

impl Animator {
    /// An animator declaring `parameters`.
    pub fn with_parameters<I, S>(parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parameters: parameters.into_iter().map(Into::into).collect(),
            fired: Vec::new(),
        }
    }

    /// The triggers fired since the last [`Animator::drain_fired`].
    pub fn fired(&self) -> &[String] {
        &self.fired
    }

    /// Takes the fired triggers, for the animation system to consume.
    pub fn drain_fired(&mut self) -> Vec<String> {
        std::mem::take(&mut self.fired)
    }
}

impl AnimatorTriggers for Animator {
    fn parameter_names(&self) -> Vec<String> {
        self.parameters.clone()
    }

    fn set_trigger(&mut self, name: &str) {
        if !self.fired.iter().any(|pending| pending == name) {
            self.fired.push(name.to_owned());
        }
    }
}

/// Playback state of a sound.
#[derive(Component, Reflect, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[reflect(Component)]
pub struct AudioEmitter {
    /// Currently playing.
    playing: bool,
    /// How many times playback was started.
    starts: u32,
}

impl AudioEmitter {
    /// An emitter that is already playing.
    pub fn playing() -> Self {
        Self {
            playing: true,
            starts: 0,
        }
    }

    /// How many times playback was started.
    pub fn starts(&self) -> u32 {
        self.starts
    }
}

impl AudioPlayback for AudioEmitter {
    fn is_playing(&self) -> bool {
        self.playing
    }

    fn play(&mut self) {
        self.playing = true;
        self.starts += 1;
    }

    fn stop(&mut self) {
        self.playing = false;
    }
}

/// Emission state of a particle system.
#[derive(Component, Reflect, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[reflect(Component)]
pub struct ParticleEmitter {
    /// Currently emitting.
    playing: bool,
    /// How many times emission was started.
    starts: u32,
}

impl ParticleEmitter {
    /// An emitter that is already emitting.
    pub fn playing() -> Self {
        Self {
            playing: true,
            starts: 0,
        }
    }

    /// How many times emission was started.
    pub fn starts(&self) -> u32 {
        self.starts
    }
}

impl ParticlePlayback for ParticleEmitter {
    fn is_playing(&self) -> bool {
        self.playing
    }

    fn play(&mut self) {
        self.playing = true;
        self.starts += 1;
    }

    fn stop(&mut self) {
        self.playing = false;
    }
}

/// Whether a visual element is drawn.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component)]
pub struct Renderer {
    /// Drawn when true.
    pub enabled: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl RenderSwitch for Renderer {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

/// Whether a light is on.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component)]
pub struct LightEmitter {
    /// On when true.
    pub enabled: bool,
}

impl Default for LightEmitter {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl LightSwitch for LightEmitter {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

/// Whether a collision shape is active, and if it is a sensor.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component)]
pub struct Collider {
    /// Active when true.
    pub enabled: bool,
    /// Sensors only report overlaps.
    pub sensor: bool,
}

impl Default for Collider {
    fn default() -> Self {
        Self {
            enabled: true,
            sensor: false,
        }
    }
}

impl Collider {
    /// An enabled sensor.
    pub fn sensor() -> Self {
        Self {
            enabled: true,
            sensor: true,
        }
    }
}

impl ColliderSwitch for Collider {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn is_sensor(&self) -> bool {
        self.sensor
    }
}

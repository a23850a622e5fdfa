//! Errors that can happen when using `bevy_interactables`.

use bevy::prelude::Entity;
use thiserror::Error;

/// A capability required by the configured action is missing on the target.
///
/// The interactable disables itself for good when this happens. It is reported once, as a
/// warning, and never checked again.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionError {
    /// An animation trigger interactable targets an entity without an animator.
    #[error("no animator on {0:?}, interaction disabled")]
    MissingAnimator(Entity),
    /// An audio interactable targets an entity without an audio source.
    #[error("no audio source on {0:?}, interaction disabled")]
    MissingAudioSource(Entity),
    /// A particle interactable targets an entity without a particle system.
    #[error("no particle system on {0:?}, interaction disabled")]
    MissingParticleSystem(Entity),
}

impl InteractionError {
    /// The target that lacks the capability.
    pub fn target(&self) -> Entity {
        match *self {
            InteractionError::MissingAnimator(e)
            | InteractionError::MissingAudioSource(e)
            | InteractionError::MissingParticleSystem(e) => e,
        }
    }
}

/// Errors when loading an interaction preset.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum PresetLoaderError {
    /// An [IO Error](std::io::Error)
    #[error("Could not read the file: {0}")]
    Io(#[from] std::io::Error),
    /// A [RON Error](serde_ron::error::SpannedError)
    #[error("Could not parse RON: {0}")]
    RonError(#[from] serde_ron::error::SpannedError),
}

//! The interaction state machine.
//!
//! [`InteractionController`] knows nothing about the ECS. It is driven through four hooks
//! ([`initialize`](InteractionController::initialize),
//! [`on_overlap_enter`](InteractionController::on_overlap_enter),
//! [`on_overlap_exit`](InteractionController::on_overlap_exit) and
//! [`on_tick`](InteractionController::on_tick)) and answers with the [`Dispatch`] the caller
//! has to perform on the target, if any.
use bevy::prelude::Entity;

use crate::config::{ActionKind, InteractionConfig, TriggerKind};
use crate::condition::RendererStates;
use crate::errors::InteractionError;
use crate::triggers::{TriggerCapacities, TriggerName};

/// What has to be done on the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Fire the animator trigger with this name.
    AnimatorTrigger(TriggerName),
    /// Enable (true) or disable (false) renderers, lights and solid colliders of the subtree.
    SetVisible(bool),
    /// Start the audio source unless it is playing.
    PlayAudio,
    /// Stop the audio source.
    StopAudio,
    /// Start the particle system unless it is playing.
    PlayParticles,
    /// Stop the particle system.
    StopParticles,
}

/// An action the controller decided to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    /// The resolved target.
    pub target: Entity,
    /// The signal that caused it.
    pub trigger: TriggerName,
    /// What to do.
    pub effect: Effect,
}

/// The capabilities found on the target when the controller is initialized.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TargetCapabilities {
    /// The parameter names of the target animator, `None` without an animator.
    pub animator_parameters: Option<Vec<String>>,
    /// The target has an audio source.
    pub audio_source: bool,
    /// The target has a particle system.
    pub particle_system: bool,
}

/// Lifecycle of a controller. Transitions only go forward.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    /// Not initialized yet: signals are ignored.
    #[default]
    Uninitialized,
    /// Reacting to signals.
    Armed,
    /// Never fires again.
    Disabled,
}

/// The configured action together with the state it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    /// Animator triggers with their remaining capacities.
    AnimationTriggers(TriggerCapacities),
    /// Show the subtree.
    Show,
    /// Hide the subtree.
    Hide,
    /// Start audio.
    AudioPlay,
    /// Stop audio.
    AudioStop,
    /// Start particles.
    ParticlesPlay,
    /// Stop particles.
    ParticlesStop,
}

impl From<ActionKind> for Action {
    fn from(kind: ActionKind) -> Self {
        match kind {
            ActionKind::AnimationTriggers => Action::AnimationTriggers(TriggerCapacities::default()),
            ActionKind::Show => Action::Show,
            ActionKind::Hide => Action::Hide,
            ActionKind::AudioPlay => Action::AudioPlay,
            ActionKind::AudioStop => Action::AudioStop,
            ActionKind::ParticlesPlay => Action::ParticlesPlay,
            ActionKind::ParticlesStop => Action::ParticlesStop,
        }
    }
}

/// The state machine behind an interactable.
#[derive(Debug, Clone)]
pub struct InteractionController {
    /// Author-time configuration.
    config: InteractionConfig,
    /// The action and its runtime data.
    action: Action,
    /// Where in the lifecycle we are.
    state: InteractionState,
    /// Resolved once by [`InteractionController::initialize`].
    target: Option<Entity>,
    /// Something currently overlaps the interactable.
    in_collider: bool,
}

impl InteractionController {
    /// Creates an uninitialized controller.
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            action: config.action.into(),
            config,
            state: InteractionState::Uninitialized,
            target: None,
            in_collider: false,
        }
    }

    /// The configuration.
    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// The lifecycle state.
    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Returns true once the controller will never fire again.
    pub fn is_disabled(&self) -> bool {
        self.state == InteractionState::Disabled
    }

    /// Returns true while something overlaps the interactable.
    pub fn is_in_collider(&self) -> bool {
        self.in_collider
    }

    /// The resolved target, `None` before initialization.
    pub fn target(&self) -> Option<Entity> {
        self.target
    }

    /// The remaining animator trigger capacities, for animation trigger interactables.
    pub fn capacities(&self) -> Option<TriggerCapacities> {
        match self.action {
            Action::AnimationTriggers(caps) => Some(caps),
            _ => None,
        }
    }

    /// Resolves the target and checks that it has what the action needs.
    ///
    /// On a missing capability the controller is disabled and the error returned, the
    /// caller is expected to report it. With [`TriggerKind::SceneStart`] the action is
    /// dispatched right away with [`TriggerName::Default`].
    ///
    /// Calling it again after the first time does nothing.
    pub fn initialize(
        &mut self,
        owner: Entity,
        capabilities: TargetCapabilities,
        renderers: &impl RendererStates,
    ) -> Result<Option<Dispatch>, InteractionError> {
        if self.state != InteractionState::Uninitialized {
            return Ok(None);
        }
        let target = self.config.resolve_target(owner);
        self.target = Some(target);
        self.state = InteractionState::Armed;

        let missing = match self.config.action {
            ActionKind::AnimationTriggers => match capabilities.animator_parameters {
                Some(parameters) => {
                    self.action =
                        Action::AnimationTriggers(TriggerCapacities::from_parameters(&parameters));
                    None
                }
                None => Some(InteractionError::MissingAnimator(target)),
            },
            ActionKind::AudioPlay | ActionKind::AudioStop if !capabilities.audio_source => {
                Some(InteractionError::MissingAudioSource(target))
            }
            ActionKind::ParticlesPlay | ActionKind::ParticlesStop
                if !capabilities.particle_system =>
            {
                Some(InteractionError::MissingParticleSystem(target))
            }
            _ => None,
        };
        if let Some(err) = missing {
            self.state = InteractionState::Disabled;
            return Err(err);
        }

        if self.config.trigger == TriggerKind::SceneStart {
            return Ok(self.dispatch_gated(TriggerName::Default, renderers));
        }
        Ok(None)
    }

    /// Something started overlapping the interactable.
    pub fn on_overlap_enter(&mut self, renderers: &impl RendererStates) -> Option<Dispatch> {
        self.in_collider = true;
        if !self.listens_to(TriggerKind::OnEnter) {
            return None;
        }
        self.dispatch_gated(TriggerName::Enter, renderers)
    }

    /// Something stopped overlapping the interactable.
    pub fn on_overlap_exit(&mut self, renderers: &impl RendererStates) -> Option<Dispatch> {
        self.in_collider = false;
        if !self.listens_to(TriggerKind::OnExit) {
            return None;
        }
        self.dispatch_gated(TriggerName::Exit, renderers)
    }

    /// Per frame key poll. `key_just_pressed` is whether the configured key went down this frame.
    pub fn on_tick(
        &mut self,
        key_just_pressed: bool,
        renderers: &impl RendererStates,
    ) -> Option<Dispatch> {
        if !self.in_collider || !key_just_pressed || !self.listens_to(TriggerKind::OnKey) {
            return None;
        }
        self.dispatch_gated(TriggerName::Key, renderers)
    }

    /// Animation trigger interactables listen to every source.
    fn listens_to(&self, trigger: TriggerKind) -> bool {
        self.config.trigger == trigger || self.config.action == ActionKind::AnimationTriggers
    }

    /// Dispatches only while armed and while the gate passes.
    fn dispatch_gated(
        &mut self,
        trigger: TriggerName,
        renderers: &impl RendererStates,
    ) -> Option<Dispatch> {
        if self.state != InteractionState::Armed || !self.config.gate.passes(renderers) {
            return None;
        }
        self.dispatch(trigger)
    }

    /// Runs the action for `trigger` then the finalize step.
    fn dispatch(&mut self, trigger: TriggerName) -> Option<Dispatch> {
        let target = self.target?;
        let repeatable = self.config.repeatable;
        let effect = match &mut self.action {
            Action::AnimationTriggers(caps) => {
                if caps.is_available(trigger) {
                    if !repeatable {
                        caps.consume(trigger);
                    }
                    Some(Effect::AnimatorTrigger(trigger))
                } else {
                    None
                }
            }
            Action::Show => Some(Effect::SetVisible(true)),
            Action::Hide => Some(Effect::SetVisible(false)),
            Action::AudioPlay => Some(Effect::PlayAudio),
            Action::AudioStop => Some(Effect::StopAudio),
            Action::ParticlesPlay => Some(Effect::PlayParticles),
            Action::ParticlesStop => Some(Effect::StopParticles),
        };
        self.finalize();
        effect.map(|effect| Dispatch {
            target,
            trigger,
            effect,
        })
    }

    /// Disables single-use interactables once they have nothing left to fire.
    fn finalize(&mut self) {
        if self.config.repeatable {
            return;
        }
        let exhausted = match self.action {
            Action::AnimationTriggers(caps) => !caps.any_available(),
            _ => true,
        };
        if exhausted {
            self.state = InteractionState::Disabled;
        }
    }
}

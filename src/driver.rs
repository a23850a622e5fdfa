//! Systems feeding the interaction controllers and applying what they dispatch.
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::capabilities::{
    AnimatorTriggers, AudioPlayback, ColliderSwitch, LightSwitch, ParticlePlayback, RenderSwitch,
};
use crate::condition::RendererStates;
use crate::controller::{Dispatch, Effect, TargetCapabilities};
use crate::events::{InteractionFired, OverlapEvent};
use crate::interactable::Interactable;

/// Access to the capabilities of every object an interactable may look at or act on.
#[derive(SystemParam)]
pub(crate) struct SceneAccess<'w, 's> {
    /// Hierarchy, for subtree walks.
    children: Query<'w, 's, &'static Children>,
    /// Animators.
    animators: Query<'w, 's, &'static mut dyn AnimatorTriggers>,
    /// Audio sources.
    audio: Query<'w, 's, &'static mut dyn AudioPlayback>,
    /// Particle systems.
    particles: Query<'w, 's, &'static mut dyn ParticlePlayback>,
    /// Renderers.
    renderers: Query<'w, 's, &'static mut dyn RenderSwitch>,
    /// Lights.
    lights: Query<'w, 's, &'static mut dyn LightSwitch>,
    /// Colliders.
    colliders: Query<'w, 's, &'static mut dyn ColliderSwitch>,
}

impl SceneAccess<'_, '_> {
    /// `root` followed by all its descendants, breadth first.
    fn subtree(&self, root: Entity) -> Vec<Entity> {
        let mut entities = vec![root];
        let mut next = 0;
        while let Some(&entity) = entities.get(next) {
            if let Ok(children) = self.children.get(entity) {
                entities.extend(children.iter().copied());
            }
            next += 1;
        }
        entities
    }

    /// The capabilities found on `target` itself.
    pub(crate) fn capabilities(&self, target: Entity) -> TargetCapabilities {
        TargetCapabilities {
            animator_parameters: self.animators.get(target).ok().map(|animators| {
                animators
                    .into_iter()
                    .flat_map(|animator| animator.parameter_names())
                    .collect()
            }),
            audio_source: self.audio.get(target).is_ok(),
            particle_system: self.particles.get(target).is_ok(),
        }
    }

    /// Performs `dispatch` on its target.
    pub(crate) fn apply(&mut self, dispatch: &Dispatch) {
        let target = dispatch.target;
        match dispatch.effect {
            Effect::AnimatorTrigger(name) => {
                if let Ok(animators) = self.animators.get_mut(target) {
                    for mut animator in animators {
                        animator.set_trigger(name.as_str());
                    }
                }
            }
            Effect::SetVisible(visible) => self.set_visible(target, visible),
            Effect::PlayAudio => {
                if let Ok(sources) = self.audio.get_mut(target) {
                    for mut source in sources {
                        if !source.is_playing() {
                            source.play();
                        }
                    }
                }
            }
            Effect::StopAudio => {
                if let Ok(sources) = self.audio.get_mut(target) {
                    for mut source in sources {
                        source.stop();
                    }
                }
            }
            Effect::PlayParticles => {
                if let Ok(systems) = self.particles.get_mut(target) {
                    for mut system in systems {
                        if !system.is_playing() {
                            system.play();
                        }
                    }
                }
            }
            Effect::StopParticles => {
                if let Ok(systems) = self.particles.get_mut(target) {
                    for mut system in systems {
                        system.stop();
                    }
                }
            }
        }
    }

    /// Switches renderers, lights and non-sensor colliders of the subtree of `root`.
    fn set_visible(&mut self, root: Entity, visible: bool) {
        for entity in self.subtree(root) {
            if let Ok(renderers) = self.renderers.get_mut(entity) {
                for mut renderer in renderers {
                    renderer.set_enabled(visible);
                }
            }
            if let Ok(lights) = self.lights.get_mut(entity) {
                for mut light in lights {
                    light.set_enabled(visible);
                }
            }
            if let Ok(colliders) = self.colliders.get_mut(entity) {
                for mut collider in colliders {
                    if !collider.is_sensor() {
                        collider.set_enabled(visible);
                    }
                }
            }
        }
    }
}

impl RendererStates for SceneAccess<'_, '_> {
    fn all_renderers(&self, object: Entity, visit: &mut dyn FnMut(bool) -> bool) -> bool {
        self.subtree(object)
            .into_iter()
            .all(|entity| match self.renderers.get(entity) {
                Ok(renderers) => renderers
                    .into_iter()
                    .all(|renderer| visit(renderer.is_enabled())),
                Err(_) => true,
            })
    }
}

/// Initializes the interactables added since the last run.
pub(crate) fn initialize_interactables(
    mut added: Query<(Entity, &mut Interactable), Added<Interactable>>,
    mut scene: SceneAccess,
    mut fired: EventWriter<InteractionFired>,
) {
    for (entity, mut interactable) in &mut added {
        let target = interactable.config().resolve_target(entity);
        let capabilities = scene.capabilities(target);
        match interactable
            .controller
            .initialize(entity, capabilities, &scene)
        {
            Ok(dispatch) => finish(entity, false, &interactable, dispatch, &mut scene, &mut fired),
            Err(err) => warn!(
                "Interactable {:?} targeting {:?}: {}",
                entity,
                err.target(),
                err
            ),
        }
    }
}

/// Feeds overlap events, then the key poll, to the interactables.
pub(crate) fn drive_interactables(
    mut overlaps: EventReader<OverlapEvent>,
    keys: Res<Input<KeyCode>>,
    mut interactables: Query<(Entity, &mut Interactable)>,
    mut scene: SceneAccess,
    mut fired: EventWriter<InteractionFired>,
) {
    for overlap in overlaps.read() {
        let (entity, started) = match *overlap {
            OverlapEvent::Started(e) => (e, true),
            OverlapEvent::Ended(e) => (e, false),
        };
        let Ok((_, mut interactable)) = interactables.get_mut(entity) else {
            continue;
        };
        let was_disabled = interactable.is_disabled();
        let dispatch = if started {
            interactable.controller.on_overlap_enter(&scene)
        } else {
            interactable.controller.on_overlap_exit(&scene)
        };
        finish(entity, was_disabled, &interactable, dispatch, &mut scene, &mut fired);
    }

    for (entity, mut interactable) in &mut interactables {
        // on_tick is a no-op without a key press, skip it to keep change detection quiet
        if !keys.just_pressed(interactable.config().key) {
            continue;
        }
        let was_disabled = interactable.is_disabled();
        let dispatch = interactable.controller.on_tick(true, &scene);
        finish(entity, was_disabled, &interactable, dispatch, &mut scene, &mut fired);
    }
}

/// Ends the key transitions of the frame, for apps without Bevy's input plugin.
pub(crate) fn clear_key_transitions(mut keys: ResMut<Input<KeyCode>>) {
    keys.clear();
}

/// Applies a dispatch, announces it, and logs when the interactable got used up.
fn finish(
    entity: Entity,
    was_disabled: bool,
    interactable: &Interactable,
    dispatch: Option<Dispatch>,
    scene: &mut SceneAccess,
    fired: &mut EventWriter<InteractionFired>,
) {
    if let Some(dispatch) = dispatch {
        let action = interactable.config().action;
        debug!(
            "Interactable {:?}: {:?} on {:?} ({})",
            entity, action, dispatch.target, dispatch.trigger
        );
        scene.apply(&dispatch);
        fired.send(InteractionFired {
            interactable: entity,
            target: dispatch.target,
            trigger: dispatch.trigger,
            action,
        });
    }
    if !was_disabled && interactable.is_disabled() {
        info!("Interactable {:?} used up, disabled", entity);
    }
}

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::prelude::*;
    use crate::tests::minimal_app;

    /// The `InteractionFired` events sent so far.
    fn fired(app: &App) -> Vec<InteractionFired> {
        let events = app.world.resource::<Events<InteractionFired>>();
        events.get_reader().read(events).copied().collect()
    }

    fn press(app: &mut App, key: KeyCode) {
        let mut keys = app.world.resource_mut::<Input<KeyCode>>();
        keys.release(key);
        keys.clear();
        keys.press(key);
    }

    fn release_all(app: &mut App) {
        let mut keys = app.world.resource_mut::<Input<KeyCode>>();
        keys.release_all();
        keys.clear();
    }

    #[test]
    fn scene_start_shows_once() {
        let mut app = minimal_app();
        let door = app
            .world
            .spawn((
                Interactable::new(InteractionConfig::new(ActionKind::Show)),
                Renderer { enabled: false },
            ))
            .id();

        app.update();
        app.update();

        assert!(app.world.get::<Renderer>(door).unwrap().enabled);
        let events = fired(&app);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].trigger, TriggerName::Default);
        assert_eq!(events[0].interactable, door);
        assert_eq!(events[0].target, door);
    }

    #[test]
    fn hide_then_show_leaves_sensors_alone() {
        let mut app = minimal_app();
        let root = app.world.spawn(Renderer::default()).id();
        let solid = app.world.spawn((Collider::default(), LightEmitter::default())).id();
        let sensor = app.world.spawn(Collider { enabled: false, sensor: true }).id();
        let grandchild = app.world.spawn(Renderer::default()).id();
        app.world.entity_mut(root).push_children(&[solid, sensor]);
        app.world.entity_mut(solid).push_children(&[grandchild]);

        let hide = app
            .world
            .spawn(Interactable::new(
                InteractionConfig::new(ActionKind::Hide)
                    .triggered_by(TriggerKind::OnEnter)
                    .delegate_to(root),
            ))
            .id();
        let show = app
            .world
            .spawn(Interactable::new(
                InteractionConfig::new(ActionKind::Show)
                    .triggered_by(TriggerKind::OnEnter)
                    .delegate_to(root),
            ))
            .id();
        app.update();

        app.world.send_event(OverlapEvent::Started(hide));
        app.update();
        assert!(!app.world.get::<Renderer>(root).unwrap().enabled);
        assert!(!app.world.get::<Renderer>(grandchild).unwrap().enabled);
        assert!(!app.world.get::<LightEmitter>(solid).unwrap().enabled);
        assert!(!app.world.get::<Collider>(solid).unwrap().enabled);
        assert!(!app.world.get::<Collider>(sensor).unwrap().enabled);

        // flip the sensor by hand, Show must not touch it either
        app.world.get_mut::<Collider>(sensor).unwrap().enabled = true;

        app.world.send_event(OverlapEvent::Started(show));
        app.update();
        assert!(app.world.get::<Renderer>(root).unwrap().enabled);
        assert!(app.world.get::<Renderer>(grandchild).unwrap().enabled);
        assert!(app.world.get::<LightEmitter>(solid).unwrap().enabled);
        assert!(app.world.get::<Collider>(solid).unwrap().enabled);
        assert!(app.world.get::<Collider>(sensor).unwrap().enabled);

        app.world.send_event(OverlapEvent::Started(hide));
        app.update();
        assert!(app.world.get::<Collider>(sensor).unwrap().enabled);
    }

    #[test]
    fn missing_audio_source_disables() {
        let mut app = minimal_app();
        let radio = app
            .world
            .spawn(Interactable::new(
                InteractionConfig::new(ActionKind::AudioPlay).triggered_by(TriggerKind::OnEnter),
            ))
            .id();
        app.update();

        assert!(app.world.get::<Interactable>(radio).unwrap().is_disabled());

        // an audio source added afterwards is never picked up
        app.world.entity_mut(radio).insert(AudioEmitter::default());
        app.world.send_event(OverlapEvent::Started(radio));
        app.update();

        assert_eq!(app.world.get::<AudioEmitter>(radio).unwrap().starts(), 0);
        assert!(fired(&app).is_empty());
    }

    #[test]
    fn audio_play_does_not_restart() {
        let mut app = minimal_app();
        let radio = app
            .world
            .spawn((
                Interactable::new(
                    InteractionConfig::new(ActionKind::AudioPlay).triggered_by(TriggerKind::OnEnter),
                ),
                AudioEmitter::default(),
            ))
            .id();
        app.update();

        for _ in 0..2 {
            app.world.send_event(OverlapEvent::Started(radio));
            app.update();
        }

        let audio = app.world.get::<AudioEmitter>(radio).unwrap();
        assert!(audio.is_playing());
        assert_eq!(audio.starts(), 1);
    }

    #[test]
    fn particles_stop_on_delegate() {
        let mut app = minimal_app();
        let fountain = app.world.spawn(ParticleEmitter::playing()).id();
        let valve = app
            .world
            .spawn(Interactable::new(
                InteractionConfig::new(ActionKind::ParticlesStop)
                    .triggered_by(TriggerKind::OnExit)
                    .delegate_to(fountain)
                    .once(),
            ))
            .id();
        app.update();

        app.world.send_event(OverlapEvent::Started(valve));
        app.update();
        assert!(app.world.get::<ParticleEmitter>(fountain).unwrap().is_playing());

        app.world.send_event(OverlapEvent::Ended(valve));
        app.update();
        assert!(!app.world.get::<ParticleEmitter>(fountain).unwrap().is_playing());
        assert!(app.world.get::<Interactable>(valve).unwrap().is_disabled());
    }

    #[test]
    fn key_only_fires_while_overlapping() {
        let mut app = minimal_app();
        let chest = app
            .world
            .spawn((
                Interactable::new(
                    InteractionConfig::new(ActionKind::Hide)
                        .triggered_by(TriggerKind::OnKey)
                        .with_key(KeyCode::E),
                ),
                Renderer::default(),
            ))
            .id();
        app.update();

        press(&mut app, KeyCode::E);
        app.update();
        assert!(app.world.get::<Renderer>(chest).unwrap().enabled);

        release_all(&mut app);
        app.world.send_event(OverlapEvent::Started(chest));
        app.update();
        assert!(app.world.get::<Renderer>(chest).unwrap().enabled);

        press(&mut app, KeyCode::F);
        app.update();
        assert!(app.world.get::<Renderer>(chest).unwrap().enabled);

        press(&mut app, KeyCode::E);
        app.update();
        assert!(!app.world.get::<Renderer>(chest).unwrap().enabled);
        assert_eq!(fired(&app).len(), 1);
    }

    #[test]
    fn animation_triggers_fire_each_name_once() {
        let mut app = minimal_app();
        let gate = app
            .world
            .spawn((
                Interactable::new(
                    InteractionConfig::new(ActionKind::AnimationTriggers)
                        .triggered_by(TriggerKind::OnEnter)
                        .once(),
                ),
                Animator::with_parameters(["enter", "exit", "key", "open"]),
            ))
            .id();
        app.update();

        app.world.send_event(OverlapEvent::Started(gate));
        app.update();
        press(&mut app, KeyCode::F);
        app.update();
        release_all(&mut app);
        app.world.send_event(OverlapEvent::Ended(gate));
        app.update();
        assert!(app.world.get::<Interactable>(gate).unwrap().is_disabled());

        app.world.send_event(OverlapEvent::Started(gate));
        app.update();

        let animator = app.world.get::<Animator>(gate).unwrap();
        assert_eq!(animator.fired(), ["enter", "key", "exit"]);
    }

    #[test]
    fn gate_reads_renderers_under_object() {
        let mut app = minimal_app();
        let lamp = app.world.spawn(Renderer::default()).id();
        let bulb = app.world.spawn(Renderer { enabled: false }).id();
        app.world.entity_mut(lamp).push_children(&[bulb]);

        let switch = app
            .world
            .spawn((
                Interactable::new(
                    InteractionConfig::new(ActionKind::ParticlesPlay)
                        .triggered_by(TriggerKind::OnEnter)
                        .gated_by(lamp, VisibilityCondition::IsVisible),
                ),
                ParticleEmitter::default(),
            ))
            .id();
        app.update();

        app.world.send_event(OverlapEvent::Started(switch));
        app.update();
        assert!(!app.world.get::<ParticleEmitter>(switch).unwrap().is_playing());

        app.world.get_mut::<Renderer>(bulb).unwrap().enabled = true;
        app.world.send_event(OverlapEvent::Started(switch));
        app.update();
        assert!(app.world.get::<ParticleEmitter>(switch).unwrap().is_playing());
    }
}

//! A lever that opens a gate while a lamp is lit, driven without a window.
//!
//! The lever is loaded from `assets/interactions/lever.interaction.ron`. The player walks
//! onto the lever, presses F and the gate (renderer + solid collider) disappears.
use std::time::Duration;

use bevy::{log::LogPlugin, prelude::*};
use bevy_interactables::prelude::*;

#[derive(Component)]
struct Gate;

fn main() {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        LogPlugin::default(),
        AssetPlugin::default(),
        InteractablesPlugin,
    ))
    .add_systems(Startup, setup)
    .add_systems(Update, print_fired.after(InteractablesSet::Drive));

    // wait for the preset to load
    for _ in 0..200 {
        app.update();
        let mut levers = app.world.query::<&Interactable>();
        if levers.iter(&app.world).next().is_some() {
            break;
        }
        std::thread::sleep(Duration::from_millis(10));
    }

    let lever = {
        let mut levers = app.world.query_filtered::<Entity, With<Interactable>>();
        levers.iter(&app.world).next()
    };
    let Some(lever) = lever else {
        error!("The lever preset did not load");
        return;
    };

    info!("Player steps on the lever");
    app.world.send_event(OverlapEvent::Started(lever));
    app.update();

    info!("Player presses F");
    app.world.resource_mut::<Input<KeyCode>>().press(KeyCode::F);
    app.update();

    let mut gates = app.world.query_filtered::<(&Renderer, &Collider), With<Gate>>();
    for (renderer, collider) in gates.iter(&app.world) {
        info!(
            "Gate renderer enabled: {}, collider enabled: {}",
            renderer.enabled, collider.enabled
        );
    }
}

fn setup(mut commands: Commands, server: Res<AssetServer>) {
    commands.spawn((Name::new("Lamp"), Renderer::default(), LightEmitter::default()));
    commands.spawn((Gate, Name::new("Gate"), Renderer::default(), Collider::default()));

    let lever: Handle<InteractionPreset> = server.load("interactions/lever.interaction.ron");
    commands.spawn((
        Name::new("Lever"),
        InteractionPresetHandle(lever),
        Collider::sensor(),
    ));
}

fn print_fired(mut fired: EventReader<InteractionFired>) {
    for ev in fired.read() {
        info!(
            "{:?} fired {:?} on {:?} ({})",
            ev.interactable, ev.action, ev.target, ev.trigger
        );
    }
}

//! The visibility gate predicate.
use bevy::prelude::Entity;

/// Read access to the renderers of an object and all its descendants.
pub trait RendererStates {
    /// Calls `visit` with the enabled flag of every renderer in the subtree rooted at
    /// `object`, stopping at the first call that returns false.
    ///
    /// Returns false if a call returned false, true otherwise (including when there are
    /// no renderers at all).
    fn all_renderers(&self, object: Entity, visit: &mut dyn FnMut(bool) -> bool) -> bool;
}

/// Returns true if an interaction gated on `object` being `expected_visible` may fire.
///
/// Fails open: a disabled gate or a missing object always passes. Otherwise every
/// renderer under `object` must have its enabled flag equal to `expected_visible`.
/// Lights and colliders are not looked at. Nothing is cached, the renderers are read on
/// every call.
pub fn condition_passes(
    enabled: bool,
    object: Option<Entity>,
    expected_visible: bool,
    renderers: &impl RendererStates,
) -> bool {
    let Some(object) = object.filter(|_| enabled) else {
        return true;
    };
    renderers.all_renderers(object, &mut |renderer_enabled| {
        renderer_enabled == expected_visible
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use rstest::rstest;

    use super::*;

    /// Renderer states keyed by object, descendants already flattened in.
    #[derive(Default)]
    pub(crate) struct FakeRenderers(pub(crate) HashMap<Entity, Vec<bool>>);

    impl RendererStates for FakeRenderers {
        fn all_renderers(&self, object: Entity, visit: &mut dyn FnMut(bool) -> bool) -> bool {
            self.0
                .get(&object)
                .map_or(true, |states| states.iter().all(|s| visit(*s)))
        }
    }

    fn gate_object() -> Entity {
        Entity::from_raw(7)
    }

    #[rstest]
    #[case(vec![])]
    #[case(vec![false])]
    #[case(vec![true, false])]
    fn disabled_gate_always_passes(#[case] states: Vec<bool>) {
        let renderers = FakeRenderers(HashMap::from([(gate_object(), states)]));
        assert!(condition_passes(false, Some(gate_object()), true, &renderers));
    }

    #[test]
    fn missing_object_passes() {
        let renderers = FakeRenderers::default();
        assert!(condition_passes(true, None, true, &renderers));
    }

    #[rstest]
    #[case(vec![], true)]
    #[case(vec![true, true, true], true)]
    #[case(vec![true, false, true], false)]
    #[case(vec![false], false)]
    fn expect_visible(#[case] states: Vec<bool>, #[case] expected: bool) {
        let renderers = FakeRenderers(HashMap::from([(gate_object(), states)]));
        assert_eq!(
            condition_passes(true, Some(gate_object()), true, &renderers),
            expected
        );
    }

    #[rstest]
    #[case(vec![], true)]
    #[case(vec![false, false], true)]
    #[case(vec![false, true], false)]
    fn expect_hidden(#[case] states: Vec<bool>, #[case] expected: bool) {
        let renderers = FakeRenderers(HashMap::from([(gate_object(), states)]));
        assert_eq!(
            condition_passes(true, Some(gate_object()), false, &renderers),
            expected
        );
    }

    #[test]
    fn reads_current_state_on_every_call() {
        let mut renderers = FakeRenderers(HashMap::from([(gate_object(), vec![true])]));
        assert!(condition_passes(true, Some(gate_object()), true, &renderers));

        renderers.0.insert(gate_object(), vec![false]);
        assert!(!condition_passes(true, Some(gate_object()), true, &renderers));
    }
}

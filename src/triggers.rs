//! Trigger names and the per-name firing capacity of animation interactables.
use std::fmt;

/// The symbolic name a signal source dispatches with.
///
/// Only [`ActionKind::AnimationTriggers`](crate::prelude::ActionKind::AnimationTriggers)
/// looks at it: "enter", "exit" and "key" are the animator triggers it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerName {
    /// The scene start dispatch.
    Default,
    /// Something started overlapping.
    Enter,
    /// Something stopped overlapping.
    Exit,
    /// The key was pressed while overlapping.
    Key,
}

impl TriggerName {
    /// The names an animator can declare as trigger parameters.
    pub const ANIMATED: [TriggerName; 3] = [TriggerName::Enter, TriggerName::Exit, TriggerName::Key];

    /// The name as used by animator parameters.
    pub const fn as_str(&self) -> &'static str {
        match self {
            TriggerName::Default => "default",
            TriggerName::Enter => "enter",
            TriggerName::Exit => "exit",
            TriggerName::Key => "key",
        }
    }
}

impl fmt::Display for TriggerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether each animator trigger can still be fired.
///
/// A slot starts true only if the animator declares a parameter with that name, and is
/// consumed when a non-repeatable interactable fires it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TriggerCapacities {
    /// The "enter" trigger.
    pub enter: bool,
    /// The "exit" trigger.
    pub exit: bool,
    /// The "key" trigger.
    pub key: bool,
}

impl TriggerCapacities {
    /// Seeds the capacities from the parameter names declared by an animator.
    /// Names other than "enter", "exit" and "key" are ignored.
    pub fn from_parameters<S: AsRef<str>>(parameters: &[S]) -> Self {
        let declared = |name: TriggerName| parameters.iter().any(|p| p.as_ref() == name.as_str());
        Self {
            enter: declared(TriggerName::Enter),
            exit: declared(TriggerName::Exit),
            key: declared(TriggerName::Key),
        }
    }

    /// Returns true if `name` has a slot and it has not been consumed.
    pub fn is_available(&self, name: TriggerName) -> bool {
        match name {
            TriggerName::Default => false,
            TriggerName::Enter => self.enter,
            TriggerName::Exit => self.exit,
            TriggerName::Key => self.key,
        }
    }

    /// Consumes the slot of `name`, if any.
    pub fn consume(&mut self, name: TriggerName) {
        match name {
            TriggerName::Default => {}
            TriggerName::Enter => self.enter = false,
            TriggerName::Exit => self.exit = false,
            TriggerName::Key => self.key = false,
        }
    }

    /// Returns true while at least one slot is available.
    pub fn any_available(&self) -> bool {
        self.enter || self.exit || self.key
    }
}

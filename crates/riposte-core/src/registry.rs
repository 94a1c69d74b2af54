//! Collaborator seams between the binding subsystem and its host.

use crate::call::ActionCall;
use crate::id::ObjectId;

/// Identifier-validated dispatch into live target objects.
///
/// The binding subsystem never holds references to the objects it signals.
/// It stores an [`ObjectId`] and resolves it here at dispatch time, so a
/// target destroyed between its make and its break degrades to a skipped
/// call instead of a dangling access.
pub trait TargetRegistry {
    /// Returns `true` if the object behind `id` is still alive.
    fn contains(&self, id: ObjectId) -> bool;

    /// Invoke `function` on the object behind `id`.
    ///
    /// Returns `false` when the object is gone or exposes no function under
    /// that name.
    fn dispatch(&mut self, id: ObjectId, function: &str, call: ActionCall) -> bool;
}

/// Executes the command strings attached to bindings.
///
/// Implementations forward to the host's command or script layer.
pub trait CommandRunner {
    /// Execute a single command string.
    fn run(&mut self, command: &str);
}

impl<F: FnMut(&str)> CommandRunner for F {
    fn run(&mut self, command: &str) {
        self(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_run_commands() {
        let mut seen = Vec::new();
        let mut runner = |command: &str| seen.push(command.to_string());
        CommandRunner::run(&mut runner, "jump();");
        assert_eq!(seen, ["jump();"]);
    }
}

//! Definition checks, accumulated with `Validation`.

use crate::core::{Event, Payload, State};
use crate::machine::Machine;
use crate::validation::violations::DefinitionError;
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Result of validating a machine definition.
pub type DefinitionReport = Validation<(), NonEmptyVec<DefinitionError>>;

impl<S: State, E: Event, P: Payload> Machine<S, E, P> {
    /// Check the registered definition, reporting every problem at once.
    ///
    /// Validation is advisory: an invalid machine can still be stepped.
    pub fn validate(&self) -> DefinitionReport {
        let checks = vec![
            self.check_has_transitions(),
            self.check_initial_has_exit(),
            self.check_terminated_is_final(),
            self.check_guarded_states_reachable(),
        ];

        Validation::all_vec(checks).map(|_| ())
    }

    fn check_has_transitions(&self) -> DefinitionReport {
        if self.table().values().all(|t| t.is_empty()) {
            Validation::fail(DefinitionError::NoTransitions)
        } else {
            Validation::success(())
        }
    }

    fn check_initial_has_exit(&self) -> DefinitionReport {
        let has_transitions = self.table().values().any(|t| !t.is_empty());
        let initial = self.initial();
        let has_exit = self
            .transitions_from(initial)
            .is_some_and(|t| !t.is_empty());

        if has_transitions && !has_exit {
            Validation::fail(DefinitionError::InitialHasNoExit {
                state: Self::state_to_string(initial),
            })
        } else {
            Validation::success(())
        }
    }

    fn check_terminated_is_final(&self) -> DefinitionReport {
        let Some(terminated) = self.terminated() else {
            return Validation::success(());
        };
        let Some(outgoing) = self.transitions_from(terminated) else {
            return Validation::success(());
        };

        let mut events: Vec<String> = outgoing
            .events()
            .filter(|e| !outgoing.candidates(e).is_empty())
            .map(str::to_owned)
            .collect();
        if events.is_empty() {
            return Validation::success(());
        }
        events.sort();

        Validation::fail(DefinitionError::ExitFromTerminated {
            state: Self::state_to_string(terminated),
            events,
        })
    }

    fn check_guarded_states_reachable(&self) -> DefinitionReport {
        let targets: HashSet<&S> = self.table().values().flat_map(|t| t.targets()).collect();

        let mut unreachable: Vec<String> = self
            .context()
            .guarded_states()
            .filter(|s| !targets.contains(s))
            .map(Self::state_to_string)
            .collect();
        unreachable.sort();

        let checks: Vec<DefinitionReport> = unreachable
            .into_iter()
            .map(|state| Validation::fail(DefinitionError::UnreachableGuardedState { state }))
            .collect();
        Validation::all_vec(checks).map(|_| ())
    }
}

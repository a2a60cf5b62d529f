//! The state machine engine: registration and the step algorithm.

use super::context::Context;
use super::error::{Reason, StepError};
use super::lock::LockPolicy;
use super::options::MachineOptions;
use super::transition::{Transition, TransitionItem};
use crate::builder::{StateBuilder, TransitionBuilder};
use crate::core::ident::shorten;
use crate::core::{
    BasicPayload, Event, EventName, Guard, Payload, State, StateActions, StateHistory,
    StateTransition,
};
use chrono::Utc;
use parking_lot::Mutex;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, trace};

/// Observer for committed transitions: `(from, event, to, item, payload)`.
pub type OnTransition<S, E, P> =
    Box<dyn Fn(&S, &E, &S, &TransitionItem<S, E, P>, &P) + Send + Sync>;

/// Observer for rejected steps: `(reason, from, context, event, payload)`.
pub type OnError<S, E, P> = Box<dyn Fn(Reason, &S, &Context<S, E, P>, &E, &P) + Send + Sync>;

/// A finite state machine.
///
/// Registration methods take `&mut self` and stepping takes `&self`: once
/// every state and transition is registered, the machine can be shared (for
/// example behind an `Arc`) and stepped from several threads. Choose
/// [`MachineOptions::synchronized`] for that.
///
/// # Example
///
/// ```rust
/// use fsmkit::core::{BasicPayload, Payload};
/// use fsmkit::machine::Machine;
/// use fsmkit::{event_enum, state_enum};
///
/// state_enum! {
///     enum Door {
///         Initial,
///         Closed,
///         Opened,
///         Terminated,
///     }
///     final: [Terminated]
/// }
///
/// event_enum! {
///     enum DoorEvent {
///         Begin,
///         Open,
///         Close,
///         End,
///     }
/// }
///
/// let mut m: Machine<Door, DoorEvent> = Machine::new(Door::Initial);
/// m.transition().set(Door::Initial, "Begin", Door::Closed).build().unwrap();
/// m.transition()
///     .set(Door::Closed, "Open", Door::Opened)
///     .guard(|_, _, _, p: &BasicPayload| p.ok())
///     .build()
///     .unwrap();
/// m.transition().set(Door::Opened, "Close", Door::Closed).build().unwrap();
/// m.transition().set(Door::Closed, "End", Door::Terminated).build().unwrap();
///
/// assert!(m.step_by(&DoorEvent::Begin));
/// assert!(!m.step_with(&DoorEvent::Open, &BasicPayload::rejected()));
/// assert_eq!(m.current(), Door::Closed);
/// assert!(m.step_by(&DoorEvent::Open));
/// assert!(m.step_by(&DoorEvent::Close));
/// assert!(m.step_by(&DoorEvent::End));
/// assert_eq!(m.current(), Door::Terminated);
/// ```
pub struct Machine<S: State, E: Event, P: Payload = BasicPayload> {
    ctx: Context<S, E, P>,
    initial: S,
    terminated: Option<S>,
    error: Option<S>,
    table: HashMap<S, Transition<S, E, P>>,
    state_actions: HashMap<S, StateActions<S, E, P>>,
    on_transition: Option<OnTransition<S, E, P>>,
    on_error: Option<OnError<S, E, P>>,
    history: Option<Mutex<StateHistory<S>>>,
}

impl<S: State, E: Event, P: Payload> Machine<S, E, P> {
    /// Create a single-threaded machine in `initial`.
    pub fn new(initial: S) -> Self {
        Self::with_options(initial, MachineOptions::default())
    }

    /// Create a machine whose current state is guarded by a mutex.
    pub fn synchronized(initial: S) -> Self {
        Self::with_options(initial, MachineOptions::synchronized())
    }

    /// Create a machine configured by `options`.
    pub fn with_options(initial: S, options: MachineOptions) -> Self {
        let lock = options.lock.policy();
        Self::build(initial, lock, &options)
    }

    /// Create a machine with a caller-supplied lock policy. `options.lock`
    /// is ignored.
    pub fn with_lock_policy(
        initial: S,
        lock: Box<dyn LockPolicy>,
        options: MachineOptions,
    ) -> Self {
        Self::build(initial, lock, &options)
    }

    fn build(initial: S, lock: Box<dyn LockPolicy>, options: &MachineOptions) -> Self {
        let history = options.record_history.then(|| {
            Mutex::new(match options.history_limit {
                Some(limit) => StateHistory::bounded(limit),
                None => StateHistory::new(),
            })
        });

        Self {
            ctx: Context::with_lock(initial.clone(), lock),
            initial,
            terminated: None,
            error: None,
            table: HashMap::new(),
            state_actions: HashMap::new(),
            on_transition: None,
            on_error: None,
            history,
        }
    }

    /// Designate the initial state and move the machine into it.
    pub fn set_initial(&mut self, state: S) -> &mut Self {
        self.ctx.reset(state.clone(), false);
        self.initial = state;
        self
    }

    /// Designate the terminated state, replacing any previous one.
    pub fn set_terminated(&mut self, state: S) -> &mut Self {
        self.terminated = Some(state);
        self
    }

    /// Designate the error state, replacing any previous one.
    pub fn set_error(&mut self, state: S) -> &mut Self {
        self.error = Some(state);
        self
    }

    /// Register entry/exit actions for a state.
    ///
    /// Empty action sets are ignored; otherwise they replace what was
    /// registered before.
    pub fn add_state(&mut self, state: S, actions: StateActions<S, E, P>) -> &mut Self {
        if actions.is_set() {
            self.state_actions.insert(state, actions);
        }
        self
    }

    /// Register a guard consulted for every transition into `state`.
    pub fn add_guard(&mut self, state: S, guard: Guard<S, E, P>) -> &mut Self {
        self.ctx.add_guard(state, guard);
        self
    }

    /// Append a transition alternative for `(from, event)`.
    pub fn add_transition(
        &mut self,
        from: S,
        event: impl Into<EventName>,
        item: TransitionItem<S, E, P>,
    ) -> &mut Self {
        let event = event.into();
        trace!(
            from = %Self::state_to_string(&from),
            to = %Self::state_to_string(&item.to),
            event = %event,
            "transition registered"
        );
        self.table
            .entry(from)
            .or_default()
            .add(event.into_string(), item);
        self
    }

    /// Fluent builder for a state.
    pub fn state(&mut self) -> StateBuilder<'_, S, E, P> {
        StateBuilder::new(self)
    }

    /// Fluent builder for a transition.
    pub fn transition(&mut self) -> TransitionBuilder<'_, S, E, P> {
        TransitionBuilder::new(self)
    }

    /// Observe every committed transition. The observer runs after the state
    /// changes and before the entry actions. Replaces any earlier observer.
    pub fn on_transition<F>(&mut self, observer: F) -> &mut Self
    where
        F: Fn(&S, &E, &S, &TransitionItem<S, E, P>, &P) + Send + Sync + 'static,
    {
        self.on_transition = Some(Box::new(observer));
        self
    }

    /// Observe every rejected step with its [`Reason`]. Replaces any earlier
    /// observer.
    pub fn on_error<F>(&mut self, observer: F) -> &mut Self
    where
        F: Fn(Reason, &S, &Context<S, E, P>, &E, &P) + Send + Sync + 'static,
    {
        self.on_error = Some(Box::new(observer));
        self
    }

    /// Move back to the initial state. Guards and history are kept.
    pub fn reset(&self) -> &Self {
        debug!(initial = %Self::state_to_string(&self.initial), "machine reset");
        self.ctx.set_current(self.initial.clone());
        self
    }

    /// Step with a default payload. Returns whether the transition happened.
    pub fn step_by(&self, event: &E) -> bool
    where
        P: Default,
    {
        self.step_with(event, &P::default())
    }

    /// Step with an explicit payload. Returns whether the transition happened.
    pub fn step_with(&self, event: &E, payload: &P) -> bool {
        self.try_step_with(event, payload).is_ok()
    }

    /// Like [`Machine::step_by`], reporting the new state or the rejection.
    pub fn try_step_by(&self, event: &E) -> Result<S, StepError>
    where
        P: Default,
    {
        self.try_step_with(event, &P::default())
    }

    /// Run one step of the machine.
    ///
    /// On success, the hooks fire in this order: edge exit action, exit
    /// action of the source state, state change, `on_transition`, edge entry
    /// action, entry action of the target state. On rejection the current
    /// state is unchanged and `on_error` is notified. No internal lock is held
    /// while hooks or observers run.
    pub fn try_step_with(&self, event: &E, payload: &P) -> Result<S, StepError> {
        let event_name = event.name();

        let held = self.ctx.lock();
        let from = self.ctx.current_unlocked();
        let selected = self.select(&from, event_name, event, payload);
        held.unlock();

        match selected {
            Ok(item) => {
                self.commit(&from, item, event, payload);
                Ok(item.to.clone())
            }
            Err(reason) => {
                debug!(
                    from = %Self::state_to_string(&from),
                    event = event_name,
                    %reason,
                    "step rejected"
                );
                if let Some(on_error) = &self.on_error {
                    on_error(reason, &from, &self.ctx, event, payload);
                }
                Err(StepError {
                    reason,
                    from: Self::state_to_string(&from),
                    event: event_name.to_owned(),
                })
            }
        }
    }

    /// Step through every event in order with default payloads, continuing
    /// past rejections. Returns how many steps succeeded.
    pub fn feed<I>(&self, events: I) -> usize
    where
        I: IntoIterator,
        I::Item: Borrow<E>,
        P: Default,
    {
        let mut stepped = 0;
        for event in events {
            if self.step_by(<I::Item as Borrow<E>>::borrow(&event)) {
                stepped += 1;
            }
        }
        stepped
    }

    fn select(
        &self,
        from: &S,
        event_name: &str,
        event: &E,
        payload: &P,
    ) -> Result<&TransitionItem<S, E, P>, Reason> {
        let transition = self.table.get(from).ok_or(Reason::StateNotFound)?;
        let item = transition
            .get(event_name, event, &self.ctx, payload)
            .ok_or(Reason::StateNotFound)?;

        trace!(
            from = %Self::state_to_string(from),
            to = %Self::state_to_string(&item.to),
            event = event_name,
            "candidate selected"
        );

        if !self.ctx.verify(&item.to, event, payload) {
            return Err(Reason::FailureGuard);
        }
        Ok(item)
    }

    fn commit(&self, from: &S, item: &TransitionItem<S, E, P>, event: &E, payload: &P) {
        let to = &item.to;

        item.exit_action.call(event, &self.ctx, from, payload);
        if let Some(actions) = self.state_actions.get(from) {
            actions.exit.call(event, &self.ctx, to, payload);
        }

        let event_name = event.name();
        // History is appended in the order the state changes.
        let prev = {
            let _held = self.ctx.lock();
            let prev = self.ctx.set_current(to.clone());
            if let Some(history) = &self.history {
                history.lock().record(StateTransition {
                    from: prev.clone(),
                    to: to.clone(),
                    event: event_name.to_owned(),
                    timestamp: Utc::now(),
                });
            }
            prev
        };
        debug!(
            from = %Self::state_to_string(&prev),
            to = %Self::state_to_string(to),
            event = event_name,
            payload = %payload.describe(),
            "transition"
        );

        if let Some(on_transition) = &self.on_transition {
            on_transition(from, event, to, item, payload);
        }

        item.entry_action.call(event, &self.ctx, to, payload);
        if let Some(actions) = self.state_actions.get(to) {
            actions.entry.call(event, &self.ctx, from, payload);
        }
    }

    /// Snapshot of the current state.
    pub fn current(&self) -> S {
        self.ctx.current()
    }

    /// The execution context, as guards and actions see it.
    pub fn context(&self) -> &Context<S, E, P> {
        &self.ctx
    }

    /// The state `reset` returns to.
    pub fn initial(&self) -> &S {
        &self.initial
    }

    /// The designated terminated state, if any.
    pub fn terminated(&self) -> Option<&S> {
        self.terminated.as_ref()
    }

    /// The designated error state, if any.
    pub fn error_state(&self) -> Option<&S> {
        self.error.as_ref()
    }

    /// True when the current state is the registered terminated state.
    pub fn is_terminated(&self) -> bool {
        self.terminated
            .as_ref()
            .is_some_and(|t| *t == self.current())
    }

    /// True when the current state is the registered error state.
    pub fn in_error(&self) -> bool {
        self.error.as_ref().is_some_and(|e| *e == self.current())
    }

    /// Outgoing transitions registered for `state`.
    pub fn transitions_from(&self, state: &S) -> Option<&Transition<S, E, P>> {
        self.table.get(state)
    }

    pub(crate) fn table(&self) -> &HashMap<S, Transition<S, E, P>> {
        &self.table
    }

    /// Snapshot of the recorded history, if recording is enabled.
    pub fn history(&self) -> Option<StateHistory<S>> {
        self.history.as_ref().map(|h| h.lock().clone())
    }

    pub(crate) fn replace_history(&self, history: StateHistory<S>) {
        if let Some(slot) = &self.history {
            *slot.lock() = history;
        }
    }

    pub(crate) fn context_mut(&mut self) -> &mut Context<S, E, P> {
        &mut self.ctx
    }

    /// Display name of a state, without any scope prefix.
    pub fn state_to_string(state: &S) -> String {
        shorten(state.name())
    }
}

impl<S: State, E: Event, P: Payload> fmt::Debug for Machine<S, E, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("current", &self.current())
            .field("initial", &self.initial)
            .field("terminated", &self.terminated)
            .field("error", &self.error)
            .field("states_with_transitions", &self.table.len())
            .field("states_with_actions", &self.state_actions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Action;
    use crate::machine::{LockKind, MutexLock, StepGuard};
    use crate::{event_enum, state_enum};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{mpsc, Arc, OnceLock, Weak};
    use std::time::Duration;

    state_enum! {
        enum Door {
            Initial,
            Closed,
            Opened,
            Locked,
            Terminated,
            Broken,
        }
        final: [Terminated, Broken]
        error: [Broken]
    }

    event_enum! {
        enum DoorEvent {
            Begin,
            Open,
            Close,
            Lock,
            End,
        }
    }

    type DoorMachine = Machine<Door, DoorEvent>;
    type Recorder = Arc<Mutex<Vec<String>>>;

    fn push(rec: &Recorder, tag: &str) {
        rec.lock().push(tag.to_string());
    }

    fn door() -> DoorMachine {
        let mut m = DoorMachine::new(Door::Initial);
        m.add_transition(Door::Initial, "Begin", TransitionItem::new(Door::Closed))
            .add_transition(
                Door::Closed,
                "Open",
                TransitionItem::new(Door::Opened).with_guard(Guard::payload_ok()),
            )
            .add_transition(Door::Opened, "Close", TransitionItem::new(Door::Closed))
            .add_transition(Door::Closed, "End", TransitionItem::new(Door::Terminated));
        m
    }

    #[test]
    fn new_machine_starts_in_initial() {
        let m = door();
        assert_eq!(m.current(), Door::Initial);
        assert_eq!(m.initial(), &Door::Initial);
    }

    #[test]
    fn successful_step_moves_once() {
        let m = door();
        assert_eq!(m.try_step_by(&DoorEvent::Begin), Ok(Door::Closed));
        assert_eq!(m.current(), Door::Closed);

        assert!(!m.step_by(&DoorEvent::Begin));
        assert_eq!(m.current(), Door::Closed);
    }

    #[test]
    fn edge_guard_rejection_is_state_not_found() {
        let m = door();
        m.step_by(&DoorEvent::Begin);

        let err = m
            .try_step_with(&DoorEvent::Open, &BasicPayload::rejected())
            .unwrap_err();
        assert_eq!(err.reason, Reason::StateNotFound);
        assert_eq!(err.from, "Closed");
        assert_eq!(err.event, "Open");
        assert_eq!(m.current(), Door::Closed);
    }

    #[test]
    fn target_guard_rejection_is_failure_guard() {
        let mut m = door();
        m.add_guard(Door::Closed, Guard::new(|_, _, _, p: &BasicPayload| p.ok()));

        let err = m
            .try_step_with(&DoorEvent::Begin, &BasicPayload::rejected())
            .unwrap_err();
        assert_eq!(err.reason, Reason::FailureGuard);
        assert_eq!(m.current(), Door::Initial);
    }

    #[test]
    fn unknown_source_state_is_state_not_found() {
        let mut m = door();
        m.set_initial(Door::Broken);

        let err = m.try_step_by(&DoorEvent::Open).unwrap_err();
        assert_eq!(err.reason, Reason::StateNotFound);
        assert_eq!(err.from, "Broken");
    }

    #[test]
    fn on_error_receives_reason_and_source() {
        let mut m = door();
        let seen: Arc<Mutex<Vec<(Reason, Door, String)>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        m.on_error(move |reason, from, ctx, ev, _| {
            assert_eq!(ctx.current(), *from);
            sink.lock().push((reason, from.clone(), ev.name().to_string()));
        });

        assert!(!m.step_by(&DoorEvent::Close));

        assert_eq!(
            *seen.lock(),
            vec![(Reason::StateNotFound, Door::Initial, "Close".to_string())]
        );
    }

    #[test]
    fn hooks_fire_in_order() {
        let rec: Recorder = Arc::new(Mutex::new(Vec::new()));
        let mut m = DoorMachine::new(Door::Closed);

        let r = Arc::clone(&rec);
        let r2 = Arc::clone(&rec);
        m.add_state(
            Door::Closed,
            StateActions::new(
                Action::new(move |_, _, _, _| push(&r, "state-entry(Closed)")),
                Action::new(move |_, ctx, next, _| {
                    assert_eq!(ctx.current(), Door::Closed);
                    assert_eq!(*next, Door::Opened);
                    push(&r2, "state-exit(Closed)");
                }),
            ),
        );
        let r = Arc::clone(&rec);
        let r2 = Arc::clone(&rec);
        m.add_state(
            Door::Opened,
            StateActions::new(
                Action::new(move |_, ctx, prev, _| {
                    assert_eq!(ctx.current(), Door::Opened);
                    assert_eq!(*prev, Door::Closed);
                    push(&r, "state-entry(Opened)");
                }),
                Action::new(move |_, _, _, _| push(&r2, "state-exit(Opened)")),
            ),
        );

        let r = Arc::clone(&rec);
        let r2 = Arc::clone(&rec);
        m.add_transition(
            Door::Closed,
            "Open",
            TransitionItem::new(Door::Opened)
                .with_entry_action(Action::new(move |_, _, to, _| {
                    assert_eq!(*to, Door::Opened);
                    push(&r, "edge-entry");
                }))
                .with_exit_action(Action::new(move |_, _, from, _| {
                    assert_eq!(*from, Door::Closed);
                    push(&r2, "edge-exit");
                })),
        );

        let r = Arc::clone(&rec);
        m.on_transition(move |from, _, to, _, _| {
            push(&r, &format!("changed({}->{})", from.name(), to.name()));
        });

        assert!(m.step_by(&DoorEvent::Open));
        assert_eq!(
            *rec.lock(),
            vec![
                "edge-exit",
                "state-exit(Closed)",
                "changed(Closed->Opened)",
                "edge-entry",
                "state-entry(Opened)",
            ]
        );
    }

    #[test]
    fn rejected_step_fires_no_actions() {
        let rec: Recorder = Arc::new(Mutex::new(Vec::new()));
        let mut m = door();
        let r = Arc::clone(&rec);
        m.add_state(
            Door::Initial,
            StateActions::new(
                Action::none(),
                Action::new(move |_, _, _, _| push(&r, "exit")),
            ),
        );
        let r = Arc::clone(&rec);
        m.on_transition(move |_, _, _, _, _| push(&r, "transition"));

        assert!(!m.step_by(&DoorEvent::Open));
        assert!(rec.lock().is_empty());
    }

    #[test]
    fn first_accepting_alternative_wins() {
        let mut m = DoorMachine::new(Door::Closed);
        m.add_transition(
            Door::Closed,
            "Open",
            TransitionItem::new(Door::Opened).with_guard(Guard::payload_ok()),
        )
        .add_transition(Door::Closed, "Open", TransitionItem::new(Door::Locked));

        assert!(m.step_with(&DoorEvent::Open, &BasicPayload::new(true)));
        assert_eq!(m.current(), Door::Opened);

        m.reset();
        assert!(m.step_with(&DoorEvent::Open, &BasicPayload::new(false)));
        assert_eq!(m.current(), Door::Locked);
    }

    #[test]
    fn reset_restores_initial() {
        let m = door();
        m.step_by(&DoorEvent::Begin);
        m.step_by(&DoorEvent::Open);
        m.step_by(&DoorEvent::Lock);

        m.reset();
        assert_eq!(m.current(), Door::Initial);
        m.reset();
        assert_eq!(m.current(), Door::Initial);
    }

    #[test]
    fn set_initial_overwrites_previous_role() {
        let mut m = door();
        m.set_initial(Door::Closed);
        assert_eq!(m.current(), Door::Closed);
        m.step_by(&DoorEvent::Open);
        m.reset();
        assert_eq!(m.current(), Door::Closed);
    }

    #[test]
    fn stepping_continues_after_terminated() {
        let mut m = door();
        m.set_terminated(Door::Terminated);
        m.add_transition(Door::Terminated, "Begin", TransitionItem::new(Door::Closed));

        assert_eq!(m.feed([DoorEvent::Begin, DoorEvent::End]), 2);
        assert!(m.is_terminated());
        assert!(!m.in_error());

        assert!(m.step_by(&DoorEvent::Begin));
        assert!(!m.is_terminated());
    }

    #[test]
    fn feed_counts_successes() {
        let m = door();
        let events = vec![
            DoorEvent::Begin,
            DoorEvent::Close,
            DoorEvent::Open,
            DoorEvent::Close,
            DoorEvent::End,
        ];
        assert_eq!(m.feed(&events), 4);
        assert_eq!(m.current(), Door::Terminated);
    }

    #[test]
    fn history_records_committed_transitions() {
        let m = door();
        m.feed([DoorEvent::Begin, DoorEvent::Lock, DoorEvent::Open]);

        let history = m.history().unwrap();
        assert_eq!(
            history.get_path(),
            vec![&Door::Initial, &Door::Closed, &Door::Opened]
        );
        let events: Vec<_> = history.transitions().map(|t| t.event.clone()).collect();
        assert_eq!(events, vec!["Begin", "Open"]);
    }

    #[test]
    fn history_can_be_disabled() {
        let mut m: DoorMachine =
            Machine::with_options(Door::Initial, MachineOptions::default().record_history(false));
        m.add_transition(Door::Initial, "Begin", TransitionItem::new(Door::Closed));
        assert!(m.step_by(&DoorEvent::Begin));
        assert_eq!(m.current(), Door::Closed);
        assert!(m.history().is_none());
    }

    #[test]
    fn state_to_string_strips_scope() {
        assert_eq!(DoorMachine::state_to_string(&Door::Opened), "Opened");
    }

    #[test]
    fn reentrant_step_from_action_does_not_deadlock() {
        let slot: Arc<OnceLock<Weak<DoorMachine>>> = Arc::new(OnceLock::new());
        let mut m: DoorMachine = Machine::synchronized(Door::Initial);
        m.add_transition(Door::Initial, "Begin", TransitionItem::new(Door::Closed))
            .add_transition(Door::Closed, "Open", TransitionItem::new(Door::Opened));
        m.add_guard(
            Door::Closed,
            Guard::new(|_, ctx, _, _: &BasicPayload| ctx.current() == Door::Initial),
        );

        let handle = Arc::clone(&slot);
        m.add_state(
            Door::Closed,
            StateActions::new(
                Action::new(move |_, _, _, _| {
                    if let Some(machine) = handle.get().and_then(Weak::upgrade) {
                        assert!(machine.step_by(&DoorEvent::Open));
                    }
                }),
                Action::none(),
            ),
        );

        let m = Arc::new(m);
        assert!(slot.set(Arc::downgrade(&m)).is_ok());

        assert!(m.step_by(&DoorEvent::Begin));
        assert_eq!(m.current(), Door::Opened);
    }

    /// Mutex policy that counts acquisitions.
    struct CountingLock {
        inner: MutexLock,
        acquired: Arc<AtomicUsize>,
    }

    impl LockPolicy for CountingLock {
        fn lock(&self) -> StepGuard<'_> {
            self.acquired.fetch_add(1, Ordering::SeqCst);
            self.inner.lock()
        }

        fn kind(&self) -> LockKind {
            self.inner.kind()
        }
    }

    /// Read the current state on another thread; `None` if it blocks for
    /// longer than two seconds.
    fn read_from_other_thread(machine: &Arc<DoorMachine>) -> Option<Door> {
        let machine = Arc::clone(machine);
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let _ = tx.send(machine.current());
        });
        rx.recv_timeout(Duration::from_secs(2)).ok()
    }

    type Sightings = Arc<Mutex<Vec<(&'static str, Option<Door>)>>>;

    fn assert_callbacks_run_unlocked(mut m: DoorMachine) {
        let slot: Arc<OnceLock<Weak<DoorMachine>>> = Arc::new(OnceLock::new());
        let seen: Sightings = Arc::default();

        m.add_transition(Door::Initial, "Begin", TransitionItem::new(Door::Closed));

        let (handle, log) = (Arc::clone(&slot), Arc::clone(&seen));
        m.add_state(
            Door::Closed,
            StateActions::new(
                Action::new(move |_, _, _, _| {
                    if let Some(machine) = handle.get().and_then(Weak::upgrade) {
                        let read = read_from_other_thread(&machine);
                        log.lock().push(("entry", read));
                    }
                }),
                Action::none(),
            ),
        );

        let (handle, log) = (Arc::clone(&slot), Arc::clone(&seen));
        m.on_transition(move |_, _, _, _, _| {
            if let Some(machine) = handle.get().and_then(Weak::upgrade) {
                let read = read_from_other_thread(&machine);
                log.lock().push(("transition", read));
            }
        });

        let (handle, log) = (Arc::clone(&slot), Arc::clone(&seen));
        m.on_error(move |_, _, _, _, _| {
            if let Some(machine) = handle.get().and_then(Weak::upgrade) {
                let read = read_from_other_thread(&machine);
                log.lock().push(("error", read));
            }
        });

        let m = Arc::new(m);
        assert!(slot.set(Arc::downgrade(&m)).is_ok());

        assert!(m.step_by(&DoorEvent::Begin));
        assert!(!m.step_by(&DoorEvent::Close));

        assert_eq!(
            *seen.lock(),
            vec![
                ("transition", Some(Door::Closed)),
                ("entry", Some(Door::Closed)),
                ("error", Some(Door::Closed)),
            ]
        );
    }

    #[test]
    fn callbacks_run_without_the_step_lock_held() {
        assert_callbacks_run_unlocked(Machine::synchronized(Door::Initial));
    }

    #[test]
    fn custom_lock_policy_guards_steps() {
        let acquired = Arc::new(AtomicUsize::new(0));
        let policy = CountingLock {
            inner: MutexLock::new(),
            acquired: Arc::clone(&acquired),
        };
        let m = DoorMachine::with_lock_policy(
            Door::Initial,
            Box::new(policy),
            MachineOptions::default(),
        );
        assert_eq!(m.context().lock_policy().kind(), LockKind::Mutex);

        assert_callbacks_run_unlocked(m);
        assert!(acquired.load(Ordering::SeqCst) > 0);
    }

    #[test]
    fn history_follows_actual_state_changes() {
        let m = Arc::new({
            let mut m: DoorMachine = Machine::synchronized(Door::Closed);
            m.add_transition(Door::Closed, "Open", TransitionItem::new(Door::Opened))
                .add_transition(Door::Opened, "Open", TransitionItem::new(Door::Closed));
            m
        });

        let workers: Vec<_> = (0..8)
            .map(|_| {
                let m = Arc::clone(&m);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        m.step_by(&DoorEvent::Open);
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        let history = m.history().unwrap();
        assert_eq!(history.len(), 800);
        let transitions: Vec<_> = history.transitions().collect();
        for pair in transitions.windows(2) {
            assert_eq!(pair[0].to, pair[1].from);
        }
        assert_eq!(transitions.first().map(|t| t.from), Some(Door::Closed));
        assert_eq!(transitions.last().map(|t| t.to), Some(m.current()));
    }
}

//! Door State Machine
//!
//! The door walks Initial -> Closed -> Opened -> Closed -> Terminated. Opening
//! only succeeds when the payload allows it; a rejected attempt leaves the
//! door closed and reports the reason.
//!
//! Run with: cargo run --example door

use fsmkit::builder::BuildError;
use fsmkit::core::Event;
use fsmkit::{event_enum, state_enum, BasicPayload, Machine};

state_enum! {
    enum Door {
        Initial,
        Closed,
        Opened,
        Terminated,
        Error,
    }
    final: [Terminated, Error]
    error: [Error]
}

event_enum! {
    enum DoorEvent {
        Begin { val: i32 },
        Open,
        Close,
        End,
    }
}

fn build() -> Result<Machine<Door, DoorEvent>, BuildError> {
    let mut m: Machine<Door, DoorEvent> = Machine::new(Door::Initial);

    m.state()
        .set(Door::Opened)
        .guard(|_, _, _, p: &BasicPayload| p.ok)
        .entry_action(|_, _, prev, _| println!("    entered Opened from {prev:?}"))
        .exit_action(|_, _, next, _| println!("    leaving Opened for {next:?}"))
        .build()?
        .state()
        .set(Door::Terminated)
        .as_terminated()
        .build()?
        .state()
        .set(Door::Error)
        .as_error()
        .build()?;

    m.transition()
        .set(Door::Initial, "Begin", Door::Closed)
        .entry_action(|ev, _, _, _| {
            if let DoorEvent::Begin { val } = ev {
                println!("    begin with val={val}");
            }
        })
        .build()?
        .transition()
        .set(Door::Closed, "Open", Door::Opened)
        .build()?
        .transition()
        .set(Door::Opened, "Close", Door::Closed)
        .build()?
        .transition()
        .set(Door::Closed, "End", Door::Terminated)
        .build()?;

    m.on_transition(|from, ev, to, _, _| println!("  [{}] {from:?} -> {to:?}", ev.name()))
        .on_error(|reason, from, _, ev, _| {
            println!("  [{}] rejected in {from:?}: {reason}", ev.name())
        });

    Ok(m)
}

fn main() -> Result<(), BuildError> {
    println!("=== Door State Machine ===\n");

    let door = build()?;
    if let stillwater::validation::Validation::Failure(errors) = door.validate() {
        for error in errors.iter() {
            println!("definition problem: {error}");
        }
    }

    door.step_by(&DoorEvent::Begin { val: 9 });
    door.step_with(&DoorEvent::Open, &BasicPayload::rejected());
    door.step_with(&DoorEvent::Open, &BasicPayload::new(true));
    door.step_by(&DoorEvent::Close);

    let checkpoint = door.checkpoint();
    door.step_by(&DoorEvent::End);

    println!("\nFinal state: {:?}", door.current());
    println!("Terminated: {}", door.is_terminated());
    println!(
        "Checkpoint {} was taken in {:?}",
        checkpoint.id, checkpoint.current_state
    );

    println!("\n=== Example Complete ===");
    Ok(())
}

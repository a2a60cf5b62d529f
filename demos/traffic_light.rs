//! Traffic Light State Machine
//!
//! A cyclic machine driven by a single `tick` event, with a guard that holds
//! the light on red while a pedestrian is crossing.
//!
//! Run with: cargo run --example traffic_light

use fsmkit::core::Payload;
use fsmkit::machine::{Machine, TransitionItem};
use fsmkit::{state_enum, Guard};

state_enum! {
    enum TrafficLight {
        Red,
        Yellow,
        Green,
    }
}

#[derive(Debug, Default)]
struct Crossing {
    pedestrians: u32,
}

impl Payload for Crossing {
    fn ok(&self) -> bool {
        self.pedestrians == 0
    }
}

fn main() {
    println!("=== Traffic Light State Machine ===\n");

    let mut light: Machine<TrafficLight, &'static str, Crossing> =
        Machine::new(TrafficLight::Red);
    light
        .add_transition(
            TrafficLight::Red,
            "tick",
            TransitionItem::new(TrafficLight::Green).with_guard(Guard::payload_ok()),
        )
        .add_transition(
            TrafficLight::Green,
            "tick",
            TransitionItem::new(TrafficLight::Yellow),
        )
        .add_transition(
            TrafficLight::Yellow,
            "tick",
            TransitionItem::new(TrafficLight::Red),
        )
        .on_transition(|from, _, to, _, _| println!("  {from:?} -> {to:?}"))
        .on_error(|reason, from, _, _, payload| {
            println!(
                "  held on {from:?} ({reason}, {} crossing)",
                payload.pedestrians
            )
        });

    println!("Initial state: {:?}\n", light.current());

    for pedestrians in [0, 0, 0, 2, 0, 0] {
        light.step_with(&"tick", &Crossing { pedestrians });
    }

    println!("\nFinal state: {:?}", light.current());
    if let Some(history) = light.history() {
        println!("Transitions recorded: {}", history.len());
    }

    println!("\n=== Example Complete ===");
}

//! Player Controller
//!
//! A platformer player driven by a fixed-timestep loop.
//!
//! Key concepts:
//! - Explicit transitions requested by input (run, jump, stop)
//! - Automatic transitions driven by physics (falling, landing)
//! - Per-state handlers issuing movement commands every tick
//! - An observer mirroring the current state for state-aware guards
//!
//! Run with: cargo run --example player_controller

use std::cell::{Cell, RefCell};
use std::error::Error;
use std::rc::Rc;
use tickstate::{state_enum, AutoStateMachine, MachineConfig, Time};
use tracing::info;
use tracing_subscriber::EnvFilter;

state_enum! {
    enum PlayerState {
        Standing,
        Running,
        Jumping,
        Falling,
    }
}

const DT: Time = 0.02;
const GRAVITY: f32 = -20.0;
const RUN_SPEED: f32 = 4.0;
const JUMP_SPEED: f32 = 8.0;

#[derive(Debug, Default)]
struct Body {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
}

impl Body {
    fn grounded(&self) -> bool {
        self.y <= 0.0 && self.vy <= 0.0
    }

    /// Vertical integration only; horizontal movement belongs to the state
    /// handlers.
    fn integrate(&mut self, dt: f32) {
        self.vy += GRAVITY * dt;
        self.y += self.vy * dt;
        if self.y <= 0.0 {
            self.y = 0.0;
            self.vy = self.vy.max(0.0);
        }
    }
}

fn build_controller(
    body: &Rc<RefCell<Body>>,
    config: MachineConfig,
) -> AutoStateMachine<PlayerState> {
    use PlayerState::*;

    let mut machine = AutoStateMachine::with_config(Standing, config);

    // Guards only see tick time, so keep a copy of the state they can read.
    let state = Rc::new(Cell::new(Standing));
    let mirror = Rc::clone(&state);
    machine.subscribe(move |_: &PlayerState, new: &PlayerState| mirror.set(*new));

    let b = Rc::clone(body);
    machine.add_transition_with(Standing, Running, move || {
        b.borrow_mut().vx = RUN_SPEED;
        Ok(())
    });
    let b = Rc::clone(body);
    machine.add_transition_with(Running, Standing, move || {
        b.borrow_mut().vx = 0.0;
        Ok(())
    });
    for from in [Standing, Running] {
        let b = Rc::clone(body);
        machine.add_transition_with(from, Jumping, move || {
            b.borrow_mut().vy = JUMP_SPEED;
            Ok(())
        });
        machine.add_transition(from, Falling);
    }
    machine.add_transition(Jumping, Falling);
    machine.add_transition(Falling, Standing);
    machine.add_transition(Falling, Running);

    let (s, b) = (Rc::clone(&state), Rc::clone(body));
    machine.add_auto_transition(Falling, move |_| {
        s.get() != Falling && !b.borrow().grounded() && b.borrow().vy < 0.0
    });
    let (s, b) = (Rc::clone(&state), Rc::clone(body));
    machine.add_auto_transition(Standing, move |_| {
        s.get() == Falling && b.borrow().grounded() && b.borrow().vx == 0.0
    });
    let (s, b) = (Rc::clone(&state), Rc::clone(body));
    machine.add_auto_transition(Running, move |_| {
        s.get() == Falling && b.borrow().grounded() && b.borrow().vx != 0.0
    });

    for moving in [Running, Jumping, Falling] {
        let b = Rc::clone(body);
        machine.add_state_handler(moving, move |_| {
            let mut body = b.borrow_mut();
            body.x += body.vx * DT;
            Ok(())
        });
    }

    machine
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Player Controller ===\n");

    let config =
        MachineConfig::from_json(r#"{ "log_transitions": true, "history_capacity": 32 }"#)?;
    let body = Rc::new(RefCell::new(Body::default()));
    let mut player = build_controller(&body, config);

    for step in 0..120u32 {
        let now = step as Time * DT;

        // Scripted input: start running, jump, stop after landing.
        match step {
            10 => player.change_state(PlayerState::Running)?,
            30 => player.change_state(PlayerState::Jumping)?,
            100 => player.change_state(PlayerState::Standing)?,
            _ => {}
        }

        body.borrow_mut().integrate(DT);
        let outcome = player.tick(now)?;

        if let Some((from, to)) = outcome.transitioned {
            info!(%from, %to, now, "physics moved the player");
        }
    }

    let path: Vec<String> = player
        .history()
        .get_path()
        .iter()
        .map(|state| state.to_string())
        .collect();
    println!("\nPath: {}", path.join(" -> "));
    println!("Final position: x = {:.2}", body.borrow().x);
    println!("Final state: {}", player.current_state());

    println!("\n=== Example Complete ===");
    Ok(())
}

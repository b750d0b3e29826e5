//! Fixed timestep simulation tick
//!
//! Core state machine that advances a run deterministically. Illegal commands
//! (flapping outside play, starting a run that is already going) are silent
//! no-ops that report `false`.

use super::body::Contact;
use super::collision::first_hit;
use super::state::{Body, GameEvent, GamePhase, GameState};
use crate::tuning::SimParams;

/// Reset everything a run owns and enter Playing.
///
/// Only legal from Idle or GameOver.
pub fn start_run(state: &mut GameState, params: &SimParams) -> bool {
    if state.phase.is_active() {
        log::debug!("Ignoring start while {:?}", state.phase);
        return false;
    }

    let bounds = &params.bounds;
    state.body = Body::spawn(bounds);
    state.obstacles.reset(bounds);
    state.field.reset();
    state.score = 0;
    state.time_ticks = 0;
    state.phase = GamePhase::Playing;
    state.events.push(GameEvent::Started);
    true
}

/// Apply the flap impulse. Only accepted while Playing.
pub fn flap(state: &mut GameState, params: &SimParams) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }
    state.body.flap(params);
    state.flap_toggle = !state.flap_toggle;
    state.events.push(GameEvent::Flapped);
    true
}

/// Advance the run by one fixed timestep
pub fn tick(state: &mut GameState, params: &SimParams) {
    match state.phase {
        GamePhase::Idle | GamePhase::GameOver => {}
        GamePhase::Playing => {
            state.time_ticks += 1;
            tick_playing(state, params);
        }
        GamePhase::CollidedFalling => {
            state.time_ticks += 1;
            tick_falling(state, params);
        }
    }
}

fn tick_playing(state: &mut GameState, params: &SimParams) {
    // Integrator
    match state.body.advance(params, true) {
        Contact::Airborne => {}
        Contact::Bounced => {
            state.events.push(GameEvent::Bounced {
                velocity: state.body.vel,
            });
            state.phase = GamePhase::CollidedFalling;
        }
        Contact::Settled | Contact::CeilingBreach => {
            end_run(state);
            return;
        }
    }

    // Obstacle pool (owns scoring)
    let bounds = &params.bounds;
    let recycled = state.obstacles.advance(params.obstacle_speed, bounds);
    for _ in 0..recycled {
        state.add_point();
    }

    // Scrolling field
    state.field.advance(params.field_speed, bounds.width);

    // Collision detector; a tick that bounced off the ground still runs it
    if let Some(slot) = first_hit(&state.body, state.obstacles.iter()) {
        log::debug!("Collided with slot {} at tick {}", slot, state.time_ticks);
        state.body.vel = 0.0;
        state.phase = GamePhase::CollidedFalling;
        state.events.push(GameEvent::Collided { slot });
    }
}

fn tick_falling(state: &mut GameState, params: &SimParams) {
    // Already resting with nothing left to bounce
    if state.body.on_ground(params.bounds.ground_line()) && state.body.is_settled(params) {
        end_run(state);
        return;
    }

    match state.body.advance(params, false) {
        Contact::Airborne | Contact::CeilingBreach => {}
        Contact::Bounced => state.events.push(GameEvent::Bounced {
            velocity: state.body.vel,
        }),
        Contact::Settled => end_run(state),
    }
}

/// Tear down an unfinished run, ending it as if it had settled.
///
/// Returns false when no run was in progress.
pub fn abandon_run(state: &mut GameState) -> bool {
    if !state.phase.is_active() {
        return false;
    }
    log::debug!("Abandoning run in {:?}", state.phase);
    end_run(state);
    true
}

fn end_run(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    state.events.push(GameEvent::GameOver { score: state.score });
    log::debug!(
        "Run over after {} ticks with score {}",
        state.time_ticks,
        state.score
    );
}

//! Fixed timestep simulation tick
//!
//! Order within a tick: steer, move the agent, eat, check for a clear board,
//! then move each ghost in index order and test it against the agent. Ghosts
//! still move on the tick the board is cleared; a win is never undone.

use super::adversary::legal_directions;
use super::motion::Direction;
use super::state::{GameEvent, GameSession, Outcome};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Heading requested this tick, if any key was pressed
    pub direction: Option<Direction>,
    /// Demo mode - the agent wanders like a ghost
    pub autopilot: bool,
}

impl TickInput {
    pub fn steer(direction: Direction) -> Self {
        Self {
            direction: Some(direction),
            ..Default::default()
        }
    }
}

/// Advance the session by one fixed timestep, returning what happened
pub fn tick(session: &mut GameSession, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if session.is_over() {
        return events;
    }

    session.time_ticks += 1;

    if input.autopilot {
        autopilot(session);
    }
    if let Some(dir) = input.direction {
        session.agent.steer(dir);
    }

    if let Some(cell) = session.agent.update(&mut session.grid) {
        session.score += PELLET_SCORE;
        session.pellets_left -= 1;
        events.push(GameEvent::PelletEaten);
        log::trace!("Pellet eaten at {:?}, {} left", cell, session.pellets_left);

        if session.pellets_left == 0 {
            session.score += CLEAR_BONUS;
            session.outcome = Some(Outcome::Won);
            events.push(GameEvent::Won);
            log::info!("Board cleared! Final score {}", session.score);
        }
    }

    for i in 0..session.adversaries.len() {
        session.adversaries[i].update(&session.grid, &mut session.rng);

        if !super::collision::entities_collide(session.agent.pos(), session.adversaries[i].pos()) {
            continue;
        }

        // Every overlapping ghost costs a life, even within the same tick.
        // Hits after the last life still report Death; lives stay at zero.
        session.lives = session.lives.saturating_sub(1);
        events.push(GameEvent::Death);

        if session.lives > 0 {
            log::info!("Caught by ghost {}, {} lives left", i, session.lives);
            session.reset_characters();
            session.pending_pause += RESPAWN_PAUSE;
        } else if session.outcome.is_none() {
            log::info!("Game over! Final score {}", session.score);
            session.outcome = Some(Outcome::Lost);
            events.push(GameEvent::Lost);
        }
    }

    events
}

/// Steer the agent at tile centers the way ghosts wander
fn autopilot(session: &mut GameSession) {
    let agent = &session.agent;
    if !agent.motion.is_aligned() {
        return;
    }

    let cell = agent.motion.cell();
    let mut options = legal_directions(&session.grid, cell, agent.dir());
    if options.is_empty() {
        // Dead end: allow the way back
        options = legal_directions(&session.grid, cell, Direction::None);
    }
    if let Some(dir) = options.choose(&mut session.rng) {
        session.agent.steer(dir);
    }
}

//! The timers and the input stream that drive a session.
//!
//! All four sources live in one [`Schedule`]; dropping it detaches every one
//! of them at once, so no callback can outlive the session.

use std::io;
use std::time::Instant;

use crossterm::event::Event;
use futures::{Stream, StreamExt};
use tokio::time::{Interval, MissedTickBehavior, interval, interval_at};

use crate::game::GameConfig;

/// Why the schedule woke up
#[derive(Debug)]
pub enum Wake {
    /// Movement tick
    Tick(Instant),
    /// Food spawn cadence
    Spawn(Instant),
    /// Food expiry check cadence
    Expire(Instant),
    Input(Event),
    /// The terminal event stream is gone
    InputClosed,
}

pub struct Schedule<S> {
    movement: Interval,
    spawn: Interval,
    expiry: Interval,
    events: S,
}

impl<S> Schedule<S>
where
    S: Stream<Item = io::Result<Event>> + Unpin,
{
    /// Movement fires immediately, then every tick interval. Spawn and
    /// expiry first fire one full period after start.
    pub fn new(config: &GameConfig, events: S) -> Self {
        let mut movement = interval(config.tick_interval());
        movement.set_missed_tick_behavior(MissedTickBehavior::Delay);

        Self {
            movement,
            spawn: delayed_interval(config.food_spawn_interval()),
            expiry: delayed_interval(config.food_expiry_check()),
            events,
        }
    }

    /// Wait for the next source to fire.
    ///
    /// Cancel-safe: dropping the future loses no tick and no event.
    pub async fn next(&mut self) -> Wake {
        loop {
            tokio::select! {
                biased;

                at = self.movement.tick() => return Wake::Tick(at.into_std()),
                at = self.spawn.tick() => return Wake::Spawn(at.into_std()),
                at = self.expiry.tick() => return Wake::Expire(at.into_std()),
                event = self.events.next() => match event {
                    Some(Ok(event)) => return Wake::Input(event),
                    Some(Err(err)) => {
                        tracing::warn!(%err, "terminal event error");
                    }
                    None => return Wake::InputClosed,
                },
            }
        }
    }

    /// Re-arm the food cadences from now, as a fresh round starts
    pub fn restart_food_timers(&mut self) {
        self.spawn.reset();
        self.expiry.reset();
    }
}

fn delayed_interval(period: std::time::Duration) -> Interval {
    let mut timer = interval_at(tokio::time::Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

//! Restart supervisor.
//!
//! Runs one [`Session`] after another. A session either ends normally (game
//! over: hold the message, start over) or with a [`SessionFault`] (log it,
//! wait, start over). Only an explicit quit request stops the loop.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::clock::Clock;
use crate::core::{Shape, SimpleRng};
use crate::error::SessionFault;
use crate::session::{Devices, Session, SessionStats, TickOutcome};
use crate::types::GameConfig;

/// How a single session finished without faulting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    GameOver(SessionStats),
    Quit,
}

/// What one supervised step did.
#[derive(Debug)]
pub enum SupervisorStep {
    GameOver(SessionStats),
    Faulted(SessionFault),
    Quit,
}

#[derive(Debug, Clone)]
pub struct Supervisor {
    config: GameConfig,
    catalog: &'static [Shape],
    rng: SimpleRng,
    sessions_started: u32,
}

impl Supervisor {
    pub fn new(config: GameConfig, catalog: &'static [Shape], seed: u32) -> Self {
        Self {
            config,
            catalog,
            rng: SimpleRng::new(seed),
            sessions_started: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn sessions_started(&self) -> u32 {
        self.sessions_started
    }

    /// Build a fresh session with its own seed.
    pub fn new_session(&mut self) -> Session {
        self.sessions_started += 1;
        Session::new(self.config, self.catalog, self.rng.next_u32())
    }

    /// Drive `session` until it ends, sleeping `idle_sleep_ms` between passes.
    pub fn run_session(
        &self,
        session: &mut Session,
        devices: &mut Devices<'_>,
        clock: &mut dyn Clock,
    ) -> Result<SessionEnd, SessionFault> {
        let mut outcome = session.start(clock.now_ms(), devices)?;
        loop {
            match outcome {
                TickOutcome::Running => {}
                TickOutcome::GameOver(stats) => return Ok(SessionEnd::GameOver(stats)),
                TickOutcome::Quit => return Ok(SessionEnd::Quit),
            }
            clock.sleep_ms(self.config.idle_sleep_ms);
            outcome = session.tick(clock.now_ms(), devices)?;
        }
    }

    /// One full session plus the pause that follows it.
    pub fn run_once(&mut self, devices: &mut Devices<'_>, clock: &mut dyn Clock) -> SupervisorStep {
        let mut session = self.new_session();
        log::debug!("starting session {}", self.sessions_started);

        // A panic inside a session is treated like any other fault.
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            self.run_session(&mut session, devices, clock)
        }))
        .unwrap_or_else(|payload| Err(SessionFault::Panicked(panic_message(&*payload))));

        match result {
            Ok(SessionEnd::GameOver(stats)) => {
                clock.sleep_ms(self.config.game_over_hold_ms);
                SupervisorStep::GameOver(stats)
            }
            Ok(SessionEnd::Quit) => SupervisorStep::Quit,
            Err(fault) => {
                log::error!(
                    "session {} faulted: {fault}; restarting in {} ms",
                    self.sessions_started,
                    self.config.restart_delay_ms
                );
                clock.sleep_ms(self.config.restart_delay_ms);
                SupervisorStep::Faulted(fault)
            }
        }
    }

    /// Play sessions back to back until a quit is requested.
    pub fn run(&mut self, devices: &mut Devices<'_>, clock: &mut dyn Clock) {
        loop {
            if let SupervisorStep::Quit = self.run_once(devices, clock) {
                log::info!("quit requested after {} sessions", self.sessions_started);
                return;
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

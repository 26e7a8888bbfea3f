//! Game engine - the scheduler loop and restart supervision.
//!
//! [`Session`] owns everything one game needs and advances it one cooperative
//! pass at a time via [`Session::tick`]. [`Supervisor`] runs sessions back to
//! back: after a game over it holds the message and starts over, after a
//! [`SessionFault`] it logs, waits and starts over.
//!
//! Time only enters through `now_ms` arguments and the [`Clock`] trait, so the
//! whole engine runs under a manual clock in tests.

pub mod clock;
pub mod error;
pub mod session;
pub mod supervisor;

pub use matrix_tetris_core as core;
pub use matrix_tetris_input as input;
pub use matrix_tetris_types as types;

pub use clock::{Clock, SystemClock};
pub use error::SessionFault;
pub use session::{Devices, Phase, Session, SessionStats, TickOutcome, Timers};
pub use supervisor::{SessionEnd, Supervisor, SupervisorStep};

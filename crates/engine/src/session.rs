//! Session - one game from first spawn to game over
//!
//! All mutable game state lives in [`Session`]: board, active piece, frame
//! buffers, timers and RNG. Resetting after a fault is just building a new one.
//!
//! # Scheduling
//!
//! [`Session::tick`] is one cooperative scheduler pass at time `now_ms`. Each
//! activity fires when strictly more than its interval has passed since it last
//! fired, always in this order:
//!
//! 1. **Buttons** (`input_poll`, also the shared move debounce window)
//! 2. **Tilt** (`tilt_poll`, only with a tilt source)
//! 3. **Gravity** (`gravity`): one step along +x, or lock → clear → spawn
//! 4. **Render** (`render`): clear next, draw, swap, present
//!
//! so a single pass can move, then lock and spawn, then show the post-lock state.
//! The idle sleep between passes belongs to the caller (see [`crate::supervisor`]).
//!
//! # States
//!
//! ```text
//! Spawning → Falling ⇄ (Locking → Spawning)
//!               └────→ GameOver   (spawn position already blocked)
//! ```

use crate::core::{
    frame::GAME_OVER_TEXT, shapes, ActivePiece, Board, ButtonSource, DisplaySink, Palette, RenderBuffer,
    Shape, SimpleRng, TiltSource,
};
use crate::error::SessionFault;
use crate::input::InputMapper;
use crate::types::{GameConfig, Intent, Timer};

/// The collaborators a session drives.
pub struct Devices<'a> {
    pub display: &'a mut dyn DisplaySink,
    pub buttons: &'a mut dyn ButtonSource,
    /// Absent sensor only disables tilt intents.
    pub tilt: Option<&'a mut dyn TiltSource>,
}

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Spawning,
    Falling,
    Locking,
    GameOver,
}

/// The four scheduler timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timers {
    pub input_poll: Timer,
    pub gravity: Timer,
    pub tilt_poll: Timer,
    pub render: Timer,
}

impl Timers {
    pub fn new(config: &GameConfig, now_ms: u64) -> Self {
        Self {
            input_poll: Timer::new(config.button_interval_ms, now_ms),
            gravity: Timer::new(config.fall_interval_ms, now_ms),
            tilt_poll: Timer::new(config.tilt_poll_interval_ms, now_ms),
            render: Timer::new(config.render_interval_ms, now_ms),
        }
    }
}

/// Counters reported when a session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionStats {
    pub pieces_locked: u32,
    pub rows_cleared: u32,
    pub frames_presented: u32,
}

/// Result of one scheduler pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running,
    GameOver(SessionStats),
    Quit,
}

/// Complete state of one game.
#[derive(Debug, Clone)]
pub struct Session {
    config: GameConfig,
    catalog: &'static [Shape],
    palette: Palette,
    board: Board,
    piece: Option<ActivePiece>,
    frames: RenderBuffer,
    timers: Timers,
    mapper: InputMapper,
    rng: SimpleRng,
    phase: Phase,
    stats: SessionStats,
}

impl Session {
    /// Create a session with an empty board sized from `config`.
    pub fn new(config: GameConfig, catalog: &'static [Shape], seed: u32) -> Self {
        Self {
            palette: Palette::for_catalog(catalog),
            board: Board::with_size(config.board_width, config.board_height),
            piece: None,
            frames: RenderBuffer::new(config.board_width as u16, config.board_height as u16),
            timers: Timers::new(&config, 0),
            mapper: InputMapper::new(&config),
            rng: SimpleRng::new(seed),
            phase: Phase::Spawning,
            stats: SessionStats::default(),
            config,
            catalog,
        }
    }

    /// Replace the starting board (and size the frame buffers to match).
    pub fn with_board(mut self, board: Board) -> Self {
        self.frames = RenderBuffer::new(board.width() as u16, board.height() as u16);
        self.board = board;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn piece(&self) -> Option<&ActivePiece> {
        self.piece.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn frames(&self) -> &RenderBuffer {
        &self.frames
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Load the palette, spawn the first piece and show the border frame.
    ///
    /// If the board is already blocked at the spawn point the session goes
    /// straight to game over without ever presenting a falling frame.
    pub fn start(&mut self, now_ms: u64, devices: &mut Devices<'_>) -> Result<TickOutcome, SessionFault> {
        devices.display.load_palette(&self.palette)?;
        self.timers = Timers::new(&self.config, now_ms);

        if !self.spawn() {
            return self.game_over(devices);
        }

        let first = self.current_piece("starting")?.shape_id();
        log::info!(
            "session started, first piece {}",
            shapes::shape(self.catalog, first).map_or("?", |s| s.name)
        );

        self.frames.clear_next();
        self.frames.draw_borders();
        self.present(devices)?;
        Ok(TickOutcome::Running)
    }

    /// One scheduler pass.
    pub fn tick(&mut self, now_ms: u64, devices: &mut Devices<'_>) -> Result<TickOutcome, SessionFault> {
        if self.phase == Phase::GameOver {
            return Ok(TickOutcome::GameOver(self.stats));
        }
        if devices.buttons.exit_requested() {
            return Ok(TickOutcome::Quit);
        }

        self.poll_buttons(now_ms, devices);
        self.poll_tilt(now_ms, devices);

        if self.timers.gravity.is_due(now_ms) {
            self.timers.gravity.fire(now_ms);
            if !self.fall()? {
                return self.game_over(devices);
            }
        }

        if self.timers.render.is_due(now_ms) {
            self.timers.render.fire(now_ms);
            self.render(devices)?;
        }

        Ok(TickOutcome::Running)
    }

    /// Apply one intent to the active piece. Returns whether the piece changed.
    pub fn apply_intent(&mut self, intent: Intent) -> bool {
        let Some(piece) = self.piece.as_mut() else {
            return false;
        };
        let changed = match intent {
            Intent::MoveUp | Intent::MoveDown => {
                let (dx, dy) = intent.delta();
                piece.try_move(&self.board, dx, dy)
            }
            Intent::Rotate => piece.rotate(&self.board),
        };
        if !changed {
            log::trace!("{} blocked", intent.as_str());
        }
        changed
    }

    fn poll_buttons(&mut self, now_ms: u64, devices: &mut Devices<'_>) {
        if !self.timers.input_poll.is_due(now_ms) {
            return;
        }
        let state = devices.buttons.poll();
        if let Some(intents) = self
            .mapper
            .poll_buttons(&mut self.timers.input_poll, now_ms, state)
        {
            for intent in intents {
                self.apply_intent(intent);
            }
        }
    }

    fn poll_tilt(&mut self, now_ms: u64, devices: &mut Devices<'_>) {
        let Some(tilt) = devices.tilt.as_deref_mut() else {
            return;
        };
        if !self.timers.tilt_poll.is_due(now_ms) {
            return;
        }
        self.timers.tilt_poll.fire(now_ms);

        let reading = self.mapper.interpret_tilt(tilt.read());
        if let Some(intent) = reading.move_intent() {
            if self.mapper.tilt_move_allowed(&self.timers.input_poll, now_ms)
                && self.apply_intent(intent)
            {
                self.timers.input_poll.fire(now_ms);
            }
        }
        if reading.rotate {
            self.apply_intent(Intent::Rotate);
        }
    }

    /// Advance one step along the gravity axis; lock and respawn when blocked.
    ///
    /// Returns `false` when the fresh piece has nowhere to go.
    fn fall(&mut self) -> Result<bool, SessionFault> {
        let piece = self
            .piece
            .as_mut()
            .ok_or(SessionFault::NoActivePiece("falling"))?;
        if piece.try_move(&self.board, 1, 0) {
            return Ok(true);
        }
        self.lock()?;
        Ok(self.spawn())
    }

    fn lock(&mut self) -> Result<(), SessionFault> {
        self.phase = Phase::Locking;
        let piece = self
            .piece
            .take()
            .ok_or(SessionFault::NoActivePiece("locking"))?;
        let placement = piece.place(&self.board).map_err(|p| {
            let (x, y) = p.position();
            SessionFault::Placement {
                shape: p.shape_id(),
                x,
                y,
            }
        })?;
        self.board.commit(placement);

        let cleared = self.board.clear_full_rows();
        self.stats.pieces_locked += 1;
        self.stats.rows_cleared += cleared as u32;
        log::debug!(
            "locked piece {} at {:?}, cleared {} rows",
            piece.shape_id().0,
            piece.position(),
            cleared
        );
        Ok(())
    }

    /// Spawn a new piece. Returns `false` (and enters game over) if it collides.
    fn spawn(&mut self) -> bool {
        self.phase = Phase::Spawning;
        let piece = ActivePiece::spawn(self.catalog, &mut self.rng, &self.board);
        if piece.check_collision(&self.board, 0, 0) {
            self.piece = None;
            self.phase = Phase::GameOver;
            return false;
        }
        self.piece = Some(piece);
        self.phase = Phase::Falling;
        true
    }

    fn current_piece(&self, context: &'static str) -> Result<&ActivePiece, SessionFault> {
        self.piece
            .as_ref()
            .ok_or(SessionFault::NoActivePiece(context))
    }

    fn render(&mut self, devices: &mut Devices<'_>) -> Result<(), SessionFault> {
        self.frames.clear_next();
        self.frames
            .draw_board_and_piece(&self.board, self.piece.as_ref());
        self.present(devices)
    }

    fn present(&mut self, devices: &mut Devices<'_>) -> Result<(), SessionFault> {
        self.frames.swap();
        devices.display.present(self.frames.current())?;
        self.stats.frames_presented += 1;
        Ok(())
    }

    fn game_over(&mut self, devices: &mut Devices<'_>) -> Result<TickOutcome, SessionFault> {
        self.phase = Phase::GameOver;
        self.piece = None;
        log::info!(
            "game over: {} pieces locked, {} rows cleared",
            self.stats.pieces_locked,
            self.stats.rows_cleared
        );
        self.frames
            .draw_message(GAME_OVER_TEXT, self.palette.text_index());
        self.present(devices)?;
        Ok(TickOutcome::GameOver(self.stats))
    }
}

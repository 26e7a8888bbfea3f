use criterion::{black_box, criterion_group, criterion_main, Criterion};
use matrix_tetris::core::{
    ActivePiece, Board, ButtonSource, DisplayError, DisplaySink, Palette, PaletteSink, PixelBuffer,
    SHAPES,
};
use matrix_tetris::engine::{Devices, Session};
use matrix_tetris::types::{ButtonState, Cell, GameConfig, ShapeId};

struct NullDisplay;

impl PaletteSink for NullDisplay {
    fn load_palette(&mut self, _palette: &Palette) -> Result<(), DisplayError> {
        Ok(())
    }
}

impl DisplaySink for NullDisplay {
    fn present(&mut self, frame: &PixelBuffer) -> Result<(), DisplayError> {
        black_box(frame.pixels());
        Ok(())
    }
}

struct IdleButtons;

impl ButtonSource for IdleButtons {
    fn poll(&mut self) -> ButtonState {
        ButtonState::RELEASED
    }
}

fn bench_tick(c: &mut Criterion) {
    let mut display = NullDisplay;
    let mut buttons = IdleButtons;
    let mut devices = Devices {
        display: &mut display,
        buttons: &mut buttons,
        tilt: None,
    };
    let mut session = Session::new(GameConfig::default(), &SHAPES, 12345);
    session.start(0, &mut devices).unwrap();
    let mut now = 0u64;

    c.bench_function("session_tick_1ms", |b| {
        b.iter(|| {
            now += 1;
            if session.piece().is_none() {
                session = Session::new(GameConfig::default(), &SHAPES, 12345);
                session.start(now, &mut devices).unwrap();
            }
            black_box(session.tick(black_box(now), &mut devices).unwrap());
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_rows", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for y in 28..32 {
                for x in 0..64 {
                    board.set(x, y, Cell::Filled(ShapeId(0)));
                }
            }
            black_box(board.clear_full_rows());
        })
    });
}

fn bench_try_move(c: &mut Criterion) {
    let board = Board::new();
    let start = ActivePiece::spawn_shape(&SHAPES, ShapeId(2), &board);

    c.bench_function("try_move", |b| {
        b.iter(|| {
            let mut piece = start;
            black_box(piece.try_move(&board, 1, 0));
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let board = Board::new();
    let mut piece = ActivePiece::spawn_shape(&SHAPES, ShapeId(2), &board);
    piece.try_move(&board, 10, 0);

    c.bench_function("rotate", |b| {
        b.iter(|| {
            black_box(piece.rotate(&board));
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let board = Board::new();
    let piece = ActivePiece::spawn_shape(&SHAPES, ShapeId(3), &board);
    let mut buf = PixelBuffer::new(64, 32);

    c.bench_function("draw_board_and_piece", |b| {
        b.iter(|| {
            buf.fill(0);
            matrix_tetris::core::frame::draw_board_and_piece(&mut buf, &board, Some(&piece));
            black_box(buf.lit_count());
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_try_move,
    bench_rotate,
    bench_render
);
criterion_main!(benches);

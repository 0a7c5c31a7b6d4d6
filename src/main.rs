//! Default binary: blockfall in the terminal.
//!
//! Input comes straight from crossterm events; frames go out through the
//! framebuffer renderer. There is no widget toolkit in the loop.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::core::{GameSnapshot, GameState};
use blockfall::input::{handle_key_event, should_quit, InputHandler};
use blockfall::scores::{ScoreBoard, ScoreStore};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::{StepOutcome, TICK_MS};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Restore the terminal even when the loop bailed with an error.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let store = ScoreStore::at_default_location();
    let mut scores = store.load_or_default();

    let mut game = GameState::new(time_seed());
    let mut view = GameView::default();
    view.set_best_score(scores.high_score());
    let mut input = InputHandler::new();

    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        let viewport = crossterm::terminal::size()
            .map(|(w, h)| Viewport::new(w, h))
            .unwrap_or(Viewport::new(80, 24));
        game.snapshot_into(&mut snap);
        view.render_into(&snap, viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        // Block on input, but never past the next gravity tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            return Ok(());
                        }
                        if let Some(command) = handle_key_event(key) {
                            if let Some(command) = input.press(command) {
                                let outcome = game.apply_command(command);
                                record_if_over(outcome, &game, &store, &mut scores, &mut view);
                            }
                        }
                    }
                    KeyEventKind::Repeat => {
                        // The DAS/ARR handler owns repeats; terminal
                        // auto-repeat would double them up.
                    }
                    KeyEventKind::Release => {
                        if let Some(command) = handle_key_event(key) {
                            input.release(command);
                        }
                    }
                },
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            for command in input.update(TICK_MS) {
                let outcome = game.apply_command(command);
                record_if_over(outcome, &game, &store, &mut scores, &mut view);
            }

            let outcome = game.tick(TICK_MS);
            record_if_over(outcome, &game, &store, &mut scores, &mut view);
        }
    }
}

/// Records a finished game in the score table. The savefile write is
/// best-effort; a failed write never interrupts play.
fn record_if_over(
    outcome: StepOutcome,
    game: &GameState,
    store: &ScoreStore,
    scores: &mut ScoreBoard,
    view: &mut GameView,
) {
    if !outcome.game_over {
        return;
    }
    scores.record(game.score());
    view.set_best_score(scores.high_score());
    let _ = store.save(scores);
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u32)
        .unwrap_or(1)
}

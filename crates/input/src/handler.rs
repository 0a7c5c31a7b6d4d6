//! DAS/ARR repeat handling for held movement keys.
//!
//! A timeout stands in for release events on terminals that never send them.

use arrayvec::ArrayVec;

use crate::types::{Command, DEFAULT_ARR_MS, DEFAULT_DAS_MS, SOFT_DROP_ARR_MS, SOFT_DROP_DAS_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Horizontal {
    Left,
    Right,
}

impl Horizontal {
    fn command(self) -> Command {
        match self {
            Horizontal::Left => Command::MoveLeft,
            Horizontal::Right => Command::MoveRight,
        }
    }
}

/// Delayed-auto-shift timer for one held key.
///
/// Repeats start only once the key has been held past the DAS delay; from
/// then on every ARR interval of held time is worth one repeat. Held time
/// beyond the delay carries over between updates so repeat pacing does not
/// depend on the update cadence.
#[derive(Debug, Clone, Copy, Default)]
struct RepeatTimer {
    held_ms: u32,
    arr_accumulator: u32,
}

impl RepeatTimer {
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn advance(&mut self, elapsed_ms: u32, das_delay: u32, arr_rate: u32) -> u32 {
        let arr_rate = arr_rate.max(1);
        let prev_held = self.held_ms;
        self.held_ms = self.held_ms.saturating_add(elapsed_ms);
        if self.held_ms < das_delay {
            return 0;
        }
        // Only time past the DAS threshold counts toward repeats.
        let excess = if prev_held < das_delay {
            self.held_ms - das_delay
        } else {
            elapsed_ms
        };
        self.arr_accumulator += excess;
        let repeats = self.arr_accumulator / arr_rate;
        self.arr_accumulator %= arr_rate;
        repeats
    }
}

// Terminals that swallow key-release events would otherwise leave a tapped
// key held forever; after this long without a press the hold is dropped.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Tracks held movement commands and emits their DAS/ARR repeats.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: Option<Horizontal>,
    soft_dropping: bool,
    last_key_time: std::time::Instant,
    horizontal_timer: RepeatTimer,
    soft_drop_timer: RepeatTimer,
    das_delay: u32,
    arr_rate: u32,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }

    pub fn with_config(das_delay: u32, arr_rate: u32) -> Self {
        Self {
            horizontal: None,
            soft_dropping: false,
            last_key_time: std::time::Instant::now(),
            horizontal_timer: RepeatTimer::default(),
            soft_drop_timer: RepeatTimer::default(),
            das_delay,
            arr_rate,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// Feeds a pressed command through the hold tracker.
    ///
    /// Returns the command to apply right now, or `None` when the press is
    /// a terminal auto-repeat of a hold we are already tracking. Commands
    /// without hold behavior pass through unchanged.
    pub fn press(&mut self, command: Command) -> Option<Command> {
        match command {
            Command::MoveLeft => self.press_horizontal(Horizontal::Left),
            Command::MoveRight => self.press_horizontal(Horizontal::Right),
            Command::SoftDrop => {
                self.last_key_time = std::time::Instant::now();
                if self.soft_dropping {
                    None
                } else {
                    self.soft_dropping = true;
                    self.soft_drop_timer.reset();
                    Some(Command::SoftDrop)
                }
            }
            other => Some(other),
        }
    }

    fn press_horizontal(&mut self, dir: Horizontal) -> Option<Command> {
        self.last_key_time = std::time::Instant::now();
        if self.horizontal == Some(dir) {
            None
        } else {
            self.horizontal = Some(dir);
            self.horizontal_timer.reset();
            Some(dir.command())
        }
    }

    /// Marks a held command as released. Commands without hold behavior are
    /// ignored.
    pub fn release(&mut self, command: Command) {
        match command {
            Command::MoveLeft if self.horizontal == Some(Horizontal::Left) => {
                self.horizontal = None;
                self.horizontal_timer.reset();
            }
            Command::MoveRight if self.horizontal == Some(Horizontal::Right) => {
                self.horizontal = None;
                self.horizontal_timer.reset();
            }
            Command::SoftDrop => {
                self.soft_dropping = false;
                self.soft_drop_timer.reset();
            }
            _ => {}
        }
    }

    /// Advances hold timers by `elapsed_ms` and returns the repeats due.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<Command, 32> {
        let mut commands = ArrayVec::<Command, 32>::new();

        // Auto-release when the terminal does not emit release events.
        let since_last_key = self.last_key_time.elapsed().as_millis() as u32;
        if since_last_key > self.key_release_timeout_ms {
            if self.horizontal.is_some() {
                self.horizontal = None;
                self.horizontal_timer.reset();
            }
            if self.soft_dropping {
                self.soft_dropping = false;
                self.soft_drop_timer.reset();
            }
        }

        if let Some(dir) = self.horizontal {
            let repeats = self
                .horizontal_timer
                .advance(elapsed_ms, self.das_delay, self.arr_rate);
            for _ in 0..repeats {
                let _ = commands.try_push(dir.command());
            }
        } else {
            self.horizontal_timer.reset();
        }

        if self.soft_dropping {
            let repeats =
                self.soft_drop_timer
                    .advance(elapsed_ms, SOFT_DROP_DAS_MS, SOFT_DROP_ARR_MS);
            for _ in 0..repeats {
                let _ = commands.try_push(Command::SoftDrop);
            }
        } else {
            self.soft_drop_timer.reset();
        }

        commands
    }

    pub fn reset(&mut self) {
        self.horizontal = None;
        self.soft_dropping = false;
        self.last_key_time = std::time::Instant::now();
        self.horizontal_timer.reset();
        self.soft_drop_timer.reset();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_direction_repeats_after_the_das_delay() {
        let mut ih = InputHandler::with_config(120, 30);

        assert_eq!(ih.press(Command::MoveLeft), Some(Command::MoveLeft));

        // 119ms held: still inside the DAS delay.
        let commands = ih.update(119);
        assert!(commands.is_empty());

        // Crossing the delay exactly leaves zero excess, so nothing fires yet.
        let commands = ih.update(1);
        assert!(commands.is_empty());

        // One full ARR interval past the delay.
        let commands = ih.update(30);
        assert_eq!(commands.as_slice(), &[Command::MoveLeft]);

        // And again each interval after that.
        let commands = ih.update(30);
        assert_eq!(commands.as_slice(), &[Command::MoveLeft]);
    }

    #[test]
    fn test_repeated_press_of_held_direction_is_swallowed() {
        let mut ih = InputHandler::with_config(120, 30);

        assert_eq!(ih.press(Command::MoveLeft), Some(Command::MoveLeft));
        assert_eq!(ih.press(Command::MoveLeft), None);
    }

    #[test]
    fn test_direction_change_restarts_the_das_delay() {
        let mut ih = InputHandler::with_config(120, 30).with_key_release_timeout_ms(60_000);

        assert_eq!(ih.press(Command::MoveLeft), Some(Command::MoveLeft));
        assert!(!ih.update(200).is_empty());

        assert_eq!(ih.press(Command::MoveRight), Some(Command::MoveRight));
        let commands = ih.update(119);
        assert!(commands.is_empty());
        let commands = ih.update(31);
        assert_eq!(commands.as_slice(), &[Command::MoveRight]);
    }

    #[test]
    fn test_stale_holds_auto_release_after_the_timeout() {
        let mut ih = InputHandler::with_config(120, 30).with_key_release_timeout_ms(40);

        assert_eq!(ih.press(Command::MoveLeft), Some(Command::MoveLeft));
        assert_eq!(ih.horizontal, Some(Horizontal::Left));

        // Age the last press beyond the timeout instead of sleeping.
        ih.last_key_time = std::time::Instant::now() - std::time::Duration::from_millis(41);

        let commands = ih.update(0);
        assert!(commands.is_empty());
        assert_eq!(ih.horizontal, None);
    }

    #[test]
    fn test_pass_through_command_does_not_extend_auto_release_timeout() {
        let mut ih = InputHandler::with_config(120, 30).with_key_release_timeout_ms(40);

        assert_eq!(ih.press(Command::MoveLeft), Some(Command::MoveLeft));
        assert_eq!(ih.horizontal, Some(Horizontal::Left));

        // A stuck movement key, then an unrelated press.
        ih.last_key_time = std::time::Instant::now() - std::time::Duration::from_millis(41);
        assert_eq!(ih.press(Command::Rotate), Some(Command::Rotate));

        // The stale hold must still expire.
        let commands = ih.update(0);
        assert!(commands.is_empty());
        assert_eq!(ih.horizontal, None);
    }

    #[test]
    fn test_pass_through_commands_never_repeat() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(60_000);

        assert_eq!(ih.press(Command::HardDrop), Some(Command::HardDrop));
        assert_eq!(ih.press(Command::Hold), Some(Command::Hold));
        assert!(ih.update(1_000).is_empty());
    }

    #[test]
    fn test_auto_release_is_on_by_default() {
        assert_ne!(InputHandler::new().key_release_timeout_ms(), 0);
    }

    #[test]
    fn test_soft_drop_repeats_on_its_own_faster_clock() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(60_000);

        assert_eq!(ih.press(Command::SoftDrop), Some(Command::SoftDrop));

        // 49ms held: one short of the soft-drop interval.
        let commands = ih.update(49);
        assert!(commands.is_empty());

        // The 50ms boundary emits the first repeat.
        let commands = ih.update(1);
        assert_eq!(commands.as_slice(), &[Command::SoftDrop]);

        // Two intervals' worth of time, two repeats.
        let commands = ih.update(100);
        assert_eq!(commands.as_slice(), &[Command::SoftDrop, Command::SoftDrop]);
    }

    #[test]
    fn test_release_stops_repeats() {
        let mut ih = InputHandler::with_config(120, 30).with_key_release_timeout_ms(60_000);

        assert_eq!(ih.press(Command::MoveLeft), Some(Command::MoveLeft));
        assert!(!ih.update(200).is_empty(), "expected repeats before release");

        ih.release(Command::MoveLeft);
        assert!(ih.update(200).is_empty(), "release should stop repeats");
    }

    #[test]
    fn test_release_of_the_other_direction_is_ignored() {
        let mut ih = InputHandler::with_config(120, 30).with_key_release_timeout_ms(60_000);

        assert_eq!(ih.press(Command::MoveLeft), Some(Command::MoveLeft));
        ih.release(Command::MoveRight);
        assert!(!ih.update(200).is_empty(), "left should still be held");
    }

    #[test]
    fn test_reset_forgets_all_held_keys() {
        let mut ih = InputHandler::with_config(120, 30).with_key_release_timeout_ms(60_000);

        assert_eq!(ih.press(Command::MoveLeft), Some(Command::MoveLeft));
        assert!(!ih.update(200).is_empty(), "expected repeats before reset");

        ih.reset();
        assert!(ih.update(200).is_empty(), "nothing may repeat after reset");
    }
}

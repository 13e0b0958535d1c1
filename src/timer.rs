//! Pomodoro countdown.
//!
//! The timer is a pure state machine ticked once per second by the caller;
//! it never sleeps or spawns anything itself. After every
//! `sessions_per_long_break`-th focus session the break is a long one.

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PomodoroPhase {
    Focus,
    ShortBreak,
    LongBreak,
}

impl PomodoroPhase {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Focus => "Focus",
            Self::ShortBreak => "Short break",
            Self::LongBreak => "Long break",
        }
    }
}

#[derive(Debug, Clone)]
pub struct PomodoroConfig {
    pub focus_secs: u32,
    pub short_break_secs: u32,
    pub long_break_secs: u32,
    pub sessions_per_long_break: u32,
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        Self {
            focus_secs: 25 * 60,
            short_break_secs: 5 * 60,
            long_break_secs: 15 * 60,
            sessions_per_long_break: 4,
        }
    }
}

impl PomodoroConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            focus_secs: config.pomodoro_focus_mins.max(1) * 60,
            short_break_secs: config.pomodoro_short_break_mins.max(1) * 60,
            long_break_secs: config.pomodoro_long_break_mins.max(1) * 60,
            sessions_per_long_break: config.pomodoro_sessions_per_long_break.max(1),
        }
    }

    fn duration_secs(&self, phase: PomodoroPhase) -> u32 {
        match phase {
            PomodoroPhase::Focus => self.focus_secs,
            PomodoroPhase::ShortBreak => self.short_break_secs,
            PomodoroPhase::LongBreak => self.long_break_secs,
        }
    }
}

#[derive(Debug)]
pub struct PomodoroTimer {
    config: PomodoroConfig,
    phase: PomodoroPhase,
    remaining_secs: u32,
    focus_completed: u32,
    paused: bool,
}

impl PomodoroTimer {
    pub fn new(config: PomodoroConfig) -> Self {
        let remaining_secs = config.focus_secs;
        Self {
            config,
            phase: PomodoroPhase::Focus,
            remaining_secs,
            focus_completed: 0,
            paused: false,
        }
    }

    pub fn phase(&self) -> PomodoroPhase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn focus_completed(&self) -> u32 {
        self.focus_completed
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Advance one second. Returns the new phase when the current one just
    /// ended. Paused timers don't move.
    pub fn tick(&mut self) -> Option<PomodoroPhase> {
        if self.paused {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Jump to the next phase immediately.
    pub fn skip(&mut self) -> PomodoroPhase {
        self.advance()
    }

    fn advance(&mut self) -> PomodoroPhase {
        self.phase = match self.phase {
            PomodoroPhase::Focus => {
                self.focus_completed += 1;
                if self.focus_completed % self.config.sessions_per_long_break == 0 {
                    PomodoroPhase::LongBreak
                } else {
                    PomodoroPhase::ShortBreak
                }
            }
            PomodoroPhase::ShortBreak | PomodoroPhase::LongBreak => PomodoroPhase::Focus,
        };
        self.remaining_secs = self.config.duration_secs(self.phase);
        self.phase
    }

    pub fn format_remaining(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.remaining_secs / 60,
            self.remaining_secs % 60
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short_config() -> PomodoroConfig {
        PomodoroConfig {
            focus_secs: 3,
            short_break_secs: 2,
            long_break_secs: 5,
            sessions_per_long_break: 2,
        }
    }

    fn run_until_transition(timer: &mut PomodoroTimer) -> PomodoroPhase {
        for _ in 0..10_000 {
            if let Some(phase) = timer.tick() {
                return phase;
            }
        }
        panic!("timer never transitioned");
    }

    #[test]
    fn test_focus_rolls_into_short_break() {
        let mut timer = PomodoroTimer::new(short_config());
        assert_eq!(timer.phase(), PomodoroPhase::Focus);
        assert_eq!(run_until_transition(&mut timer), PomodoroPhase::ShortBreak);
        assert_eq!(timer.remaining_secs(), 2);
        assert_eq!(timer.focus_completed(), 1);
    }

    #[test]
    fn test_every_nth_focus_earns_a_long_break() {
        let mut timer = PomodoroTimer::new(short_config());
        assert_eq!(run_until_transition(&mut timer), PomodoroPhase::ShortBreak);
        assert_eq!(run_until_transition(&mut timer), PomodoroPhase::Focus);
        assert_eq!(run_until_transition(&mut timer), PomodoroPhase::LongBreak);
        assert_eq!(timer.focus_completed(), 2);
    }

    #[test]
    fn test_pause_freezes_countdown() {
        let mut timer = PomodoroTimer::new(short_config());
        timer.toggle_pause();
        for _ in 0..100 {
            assert!(timer.tick().is_none());
        }
        assert_eq!(timer.remaining_secs(), 3);
        timer.toggle_pause();
        assert!(timer.tick().is_none());
        assert_eq!(timer.remaining_secs(), 2);
    }

    #[test]
    fn test_skip_moves_straight_to_break() {
        let mut timer = PomodoroTimer::new(short_config());
        assert_eq!(timer.skip(), PomodoroPhase::ShortBreak);
        assert_eq!(timer.remaining_secs(), 2);
    }

    #[test]
    fn test_format_remaining() {
        let mut config = short_config();
        config.focus_secs = 25 * 60;
        let timer = PomodoroTimer::new(config);
        assert_eq!(timer.format_remaining(), "25:00");
    }
}

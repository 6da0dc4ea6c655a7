use crate::scoring::{score, ScoreResult};
use crate::typing_policy::LookalikePolicy;
use log::debug;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Typing is not accepted until `remaining` runs out
    Countdown {
        remaining: Duration,
    },
    Typing,
    Paused,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Correct,
    /// First wrong key on the current character
    Mistake,
    /// Wrong again on a character that is already counted as a mistake
    Repeated,
    Paused,
    Ignored,
}

/// Counters that survive a pause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub typed_count: usize,
    pub mistakes: usize,
    pub in_mistake: bool,
}

/// One timed typing session against a fixed target text
#[derive(Debug, Clone)]
pub struct Attempt {
    target: Vec<char>,
    cursor: usize,
    typed_count: usize,
    mistakes: usize,
    in_mistake: bool,
    elapsed: Duration,
    time_limit: Duration,
    countdown: Duration,
    phase: Phase,
    policy: LookalikePolicy,
}

impl Attempt {
    pub fn new(target: &str, time_limit: Duration, countdown: Duration) -> Self {
        Self {
            target: target.chars().collect(),
            cursor: 0,
            typed_count: 0,
            mistakes: 0,
            in_mistake: false,
            elapsed: Duration::ZERO,
            time_limit,
            countdown,
            phase: Phase::Idle,
            policy: LookalikePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: LookalikePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    pub fn typed_count(&self) -> usize {
        self.typed_count
    }

    pub fn mistakes(&self) -> usize {
        self.mistakes
    }

    pub fn in_mistake(&self) -> bool {
        self.in_mistake
    }

    pub fn progress(&self) -> Progress {
        Progress {
            typed_count: self.typed_count,
            mistakes: self.mistakes,
            in_mistake: self.in_mistake,
        }
    }

    pub fn typed_text(&self) -> String {
        self.target[..self.cursor].iter().collect()
    }

    pub fn remaining_text(&self) -> String {
        self.target[self.cursor..].iter().collect()
    }

    pub fn expected_char(&self) -> Option<char> {
        self.target.get(self.cursor).copied()
    }

    /// Whole seconds left on the countdown, rounded up
    pub fn countdown_secs(&self) -> Option<u64> {
        match self.phase {
            Phase::Countdown { remaining } => {
                let millis = remaining.as_millis() as u64;
                Some(millis.div_ceil(1000))
            }
            _ => None,
        }
    }

    pub fn is_accepting_input(&self) -> bool {
        self.phase == Phase::Typing
    }

    pub fn has_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn start(&mut self) {
        if self.phase == Phase::Idle {
            self.begin_countdown();
        }
    }

    pub fn pause(&mut self) {
        if self.phase == Phase::Typing {
            debug!("attempt paused at {:?}", self.elapsed);
            self.phase = Phase::Paused;
        }
    }

    /// Continue after a pause; the countdown runs again before typing resumes
    pub fn resume(&mut self) {
        if self.phase == Phase::Paused {
            debug!("attempt resumed at {:?}", self.elapsed);
            self.begin_countdown();
        }
    }

    /// Advance the clock by `delta`
    pub fn on_tick(&mut self, delta: Duration) {
        match self.phase {
            Phase::Countdown { remaining } => {
                if delta >= remaining {
                    self.phase = Phase::Typing;
                    self.check_finished();
                } else {
                    self.phase = Phase::Countdown {
                        remaining: remaining - delta,
                    };
                }
            }
            Phase::Typing => {
                self.elapsed += delta;
                self.check_finished();
            }
            Phase::Idle | Phase::Paused | Phase::Finished => {}
        }
    }

    /// Handle one typed character. Return/Enter pauses instead of typing.
    pub fn on_key(&mut self, c: char) -> KeyOutcome {
        if self.phase != Phase::Typing {
            return KeyOutcome::Ignored;
        }

        if c == '\n' || c == '\r' {
            self.pause();
            return KeyOutcome::Paused;
        }

        let Some(expected) = self.expected_char() else {
            return KeyOutcome::Ignored;
        };

        if self.policy.chars_match(expected, c) {
            self.in_mistake = false;
            self.typed_count += 1;
            self.cursor += 1;
            self.check_finished();
            KeyOutcome::Correct
        } else if self.in_mistake {
            KeyOutcome::Repeated
        } else {
            self.in_mistake = true;
            self.mistakes += 1;
            KeyOutcome::Mistake
        }
    }

    /// Speed and accuracy for the attempt so far
    pub fn score(&self) -> ScoreResult {
        score(self.elapsed, self.typed_count, self.mistakes)
    }

    fn begin_countdown(&mut self) {
        if self.countdown.is_zero() {
            self.phase = Phase::Typing;
            self.check_finished();
        } else {
            self.phase = Phase::Countdown {
                remaining: self.countdown,
            };
        }
    }

    fn check_finished(&mut self) {
        if self.phase == Phase::Typing
            && (self.elapsed >= self.time_limit || self.cursor >= self.target.len())
        {
            debug!(
                "attempt finished: elapsed={:?} typed={} mistakes={}",
                self.elapsed, self.typed_count, self.mistakes
            );
            self.phase = Phase::Finished;
        }
    }
}

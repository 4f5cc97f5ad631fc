//! Input handling.
//!
//! Keyboard polling is left to whatever hosts the client. This module covers
//! the headless sources: holding nothing, and replaying a timeline.
//!
//! Timeline format, one step per line:
//!
//! ```text
//! # frames  buttons held
//! 30        forward
//! 10        forward run turn_left
//! 1         place_1
//! 5
//! 1         cancel
//! ```

use std::collections::VecDeque;

use anyhow::{bail, Context};
use engine_shared::input::Buttons;

/// Produces one button snapshot per frame.
pub trait InputSource {
    fn poll(&mut self) -> Buttons;

    /// True once the source has nothing more to say.
    fn is_exhausted(&self) -> bool {
        false
    }
}

/// Never presses anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdleInput;

impl InputSource for IdleInput {
    fn poll(&mut self) -> Buttons {
        Buttons::empty()
    }
}

/// Replays a fixed `(frames, buttons)` timeline, then holds nothing.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    steps: VecDeque<(u32, Buttons)>,
}

impl ScriptedInput {
    pub fn new(steps: impl IntoIterator<Item = (u32, Buttons)>) -> Self {
        Self {
            steps: steps.into_iter().filter(|(n, _)| *n > 0).collect(),
        }
    }

    /// Parses a timeline.
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let mut steps = Vec::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or("").trim();
            let mut tokens = line.split_whitespace();
            let Some(count) = tokens.next() else {
                continue;
            };
            let frames: u32 = count
                .parse()
                .with_context(|| format!("line {}: bad frame count '{count}'", idx + 1))?;
            let mut held = Buttons::empty();
            for name in tokens {
                match Buttons::from_action(name) {
                    Some(b) => held |= b,
                    None => bail!("line {}: unknown button '{name}'", idx + 1),
                }
            }
            steps.push((frames, held));
        }
        Ok(Self::new(steps))
    }

    /// Frames left in the timeline.
    pub fn remaining(&self) -> u64 {
        self.steps.iter().map(|(n, _)| u64::from(*n)).sum()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Buttons {
        let Some((frames, held)) = self.steps.front_mut() else {
            return Buttons::empty();
        };
        let held = *held;
        *frames -= 1;
        if *frames == 0 {
            self.steps.pop_front();
        }
        held
    }

    fn is_exhausted(&self) -> bool {
        self.steps.is_empty()
    }
}

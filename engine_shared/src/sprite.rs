//! Sprite scripts.
//!
//! A sprite is drawn by replaying a short turtle-style script at the
//! projected anchor. Lengths and radii shrink with distance; angles, step
//! counts and colors are passed through untouched.
//!
//! ```text
//! f_c 0.8 0.1 0.1   # fill color
//! f_b               # begin fill
//! d                 # pen down
//! c 5               # full circle of radius 5
//! f_e               # end fill
//! u                 # pen up
//! r 90              # turn right 90 degrees
//! f 3               # forward 3
//! ```

use tracing::debug;

use crate::{error::SceneLoadError, render::Canvas, scene::Rgb};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpriteCommand {
    Forward(f64),
    Arc {
        radius: f64,
        extent: Option<f64>,
        steps: Option<u32>,
    },
    PenUp,
    PenDown,
    /// Clockwise turn in degrees.
    Turn(f64),
    BeginFill,
    EndFill,
    FillColor(Rgb),
}

/// Parsed sprite script.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpriteScript {
    pub commands: Vec<SpriteCommand>,
}

impl SpriteScript {
    /// Parses script text; `name` is only used in error messages.
    pub fn parse(name: &str, text: &str) -> Result<Self, SceneLoadError> {
        let mut commands = Vec::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or("").trim();
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let Some((&op, args)) = tokens.split_first() else {
                continue;
            };
            let num = |i: usize| -> Result<f64, SceneLoadError> {
                let tok = args.get(i).ok_or_else(|| SceneLoadError::Malformed {
                    file: name.to_string(),
                    line: idx + 1,
                    message: format!("'{op}' is missing operand {}", i + 1),
                })?;
                tok.parse().map_err(|_| SceneLoadError::Malformed {
                    file: name.to_string(),
                    line: idx + 1,
                    message: format!("'{op}': '{tok}' is not a number"),
                })
            };

            let cmd = match op {
                "f" => SpriteCommand::Forward(num(0)?),
                "c" => SpriteCommand::Arc {
                    radius: num(0)?,
                    extent: if args.len() > 1 { Some(num(1)?) } else { None },
                    steps: if args.len() > 2 {
                        Some(num(2)?.max(1.0) as u32)
                    } else {
                        None
                    },
                },
                "u" => SpriteCommand::PenUp,
                "d" => SpriteCommand::PenDown,
                "r" => SpriteCommand::Turn(num(0)?),
                "f_b" => SpriteCommand::BeginFill,
                "f_e" => SpriteCommand::EndFill,
                "f_c" => SpriteCommand::FillColor(Rgb::new(num(0)?, num(1)?, num(2)?)),
                other => {
                    debug!(sprite = %name, line = idx + 1, command = %other, "Skipping unknown sprite command");
                    continue;
                }
            };
            commands.push(cmd);
        }
        Ok(Self { commands })
    }

    /// Replays the script onto `canvas`, multiplying every length by `factor`.
    pub fn replay<C: Canvas + ?Sized>(&self, canvas: &mut C, factor: f64) {
        for cmd in &self.commands {
            match *cmd {
                SpriteCommand::Forward(len) => canvas.forward(len * factor),
                SpriteCommand::Arc {
                    radius,
                    extent,
                    steps,
                } => canvas.arc(radius * factor, extent, steps),
                SpriteCommand::PenUp => canvas.pen_up(),
                SpriteCommand::PenDown => canvas.pen_down(),
                SpriteCommand::Turn(deg) => canvas.turn(deg),
                SpriteCommand::BeginFill => canvas.begin_fill(),
                SpriteCommand::EndFill => canvas.end_fill(),
                SpriteCommand::FillColor(c) => canvas.set_fill_color(c),
            }
        }
    }
}

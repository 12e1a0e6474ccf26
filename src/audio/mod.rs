//! Audio cues for game events
//!
//! The game only emits semantic signals. A sink may turn them into sound;
//! a failing sink is logged and otherwise ignored.

use std::io::{self, Write};

use log::warn;

/// Events worth a sound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameSignal {
    FoodConsumed,
    Collision,
}

pub trait AudioSink {
    fn play(&mut self, signal: GameSignal) -> io::Result<()>;
}

/// Forward a signal to `sink`, swallowing playback errors
pub fn emit(sink: &mut dyn AudioSink, signal: GameSignal) {
    if let Err(err) = sink.play(signal) {
        warn!("dropping {signal:?} cue: {err}");
    }
}

/// Plays nothing (`--mute`)
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _signal: GameSignal) -> io::Result<()> {
        Ok(())
    }
}

/// Rings the terminal bell: once for food, twice for a crash
#[derive(Debug)]
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl TerminalBell<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, signal: GameSignal) -> io::Result<()> {
        let bell: &[u8] = match signal {
            GameSignal::FoodConsumed => b"\x07",
            GameSignal::Collision => b"\x07\x07",
        };
        self.out.write_all(bell)?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl AudioSink for Broken {
        fn play(&mut self, _signal: GameSignal) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::NotFound, "no audio device"))
        }
    }

    #[test]
    fn test_terminal_bell_writes_bel() {
        let mut bell = TerminalBell::new(Vec::new());
        bell.play(GameSignal::FoodConsumed).unwrap();
        bell.play(GameSignal::Collision).unwrap();
        assert_eq!(bell.out, b"\x07\x07\x07");
    }

    #[test]
    fn test_emit_swallows_errors() {
        emit(&mut Broken, GameSignal::Collision);
        emit(&mut Silent, GameSignal::FoodConsumed);
    }
}

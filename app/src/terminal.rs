//! Terminal keyboard input for the interactive loop.

use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use rusty_scene::core::{Engine, KeyCode};

/// Raw mode for as long as it lives.
struct RawMode;

impl RawMode {
    fn enable() -> std::io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(RawMode)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn key_code(code: event::KeyCode) -> Option<KeyCode> {
    match code {
        event::KeyCode::Esc => Some(KeyCode::Escape),
        event::KeyCode::Enter => Some(KeyCode::Enter),
        event::KeyCode::Tab => Some(KeyCode::Tab),
        event::KeyCode::Backspace => Some(KeyCode::Backspace),
        event::KeyCode::Up => Some(KeyCode::Up),
        event::KeyCode::Down => Some(KeyCode::Down),
        event::KeyCode::Left => Some(KeyCode::Left),
        event::KeyCode::Right => Some(KeyCode::Right),
        event::KeyCode::F(1) => Some(KeyCode::F1),
        event::KeyCode::Char(c) => KeyCode::from_char(c),
        _ => None,
    }
}

/// Run the engine on the wall clock, feeding terminal key presses into the world's input.
///
/// Most terminals only report presses, so a key counts as released one frame after it went
/// down unless the terminal reports the release itself.
pub fn run_interactive(engine: &mut Engine) -> rusty_scene::Result<u64> {
    let _raw = RawMode::enable()?;
    let mut frames = 0;
    let mut held: Vec<KeyCode> = Vec::new();

    loop {
        let input = engine.world_mut().input_mut();
        for key in held.drain(..) {
            input.release(key);
        }

        while event::poll(Duration::ZERO)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.code == event::KeyCode::Char('c')
                && key.modifiers.contains(KeyModifiers::CONTROL)
            {
                engine.world_mut().request_quit();
                continue;
            }
            let Some(code) = key_code(key.code) else {
                continue;
            };
            let input = engine.world_mut().input_mut();
            match key.kind {
                KeyEventKind::Release => input.release(code),
                _ => {
                    input.press(code);
                    held.push(code);
                }
            }
        }

        frames += 1;
        if !engine.update()? {
            return Ok(frames);
        }
        std::thread::sleep(Duration::from_millis(5));
    }
}

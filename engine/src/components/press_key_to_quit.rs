use crate::core::input::KeyCode;
use crate::error::Result;
use crate::scene::{Component, Context};

/// Requests application quit when `quit_key` goes down.
#[derive(Debug, Clone, PartialEq)]
pub struct PressKeyToQuit {
    pub quit_key: KeyCode,
}

impl PressKeyToQuit {
    pub fn new(quit_key: KeyCode) -> Self {
        Self { quit_key }
    }
}

impl Default for PressKeyToQuit {
    fn default() -> Self {
        Self::new(KeyCode::Escape)
    }
}

impl Component for PressKeyToQuit {
    fn update(&mut self, ctx: &mut Context<'_>) -> Result<()> {
        if ctx.world.input().key_down(self.quit_key) {
            log::info!("{:?} pressed, quitting", self.quit_key);
            ctx.world.request_quit();
        }
        Ok(())
    }
}

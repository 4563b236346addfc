use std::thread;
use std::time::Duration;

use crate::{Action, Renderable, Result};

/// Boundary to the presentation toolkit.
///
/// The core never touches a display surface or a timing primitive directly;
/// everything it needs from a toolkit is behind this trait so the action
/// sequence stays backend independent.
pub trait PresentationDriver {
    /// Opens the presentation window at the configured size.
    fn open(&mut self, width: u32, height: u32) -> Result<()>;
    /// Renders one stimulus and presents the frame.
    fn show(&mut self, stimulus: &Renderable) -> Result<()>;
    /// Blocks for the given number of seconds.
    fn wait(&mut self, seconds: f64) -> Result<()>;
    /// Tears the window down.
    fn close(&mut self) -> Result<()>;
}

/// Plays an action sequence in strict order: show, then wait, one action at
/// a time, no overlap.
pub fn play(driver: &mut dyn PresentationDriver, actions: &[Action]) -> Result<()> {
    for action in actions {
        driver.show(&action.msg)?;
        driver.wait(action.interval)?;
    }
    Ok(())
}

/// Driver that logs each stimulus and sleeps for its interval.
///
/// Keeps the full playback path exercisable without a display attached.
// TODO: add a windowed driver once a rendering toolkit is chosen.
#[derive(Debug, Default)]
pub struct HeadlessDriver {
    is_open: bool,
}

impl HeadlessDriver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PresentationDriver for HeadlessDriver {
    fn open(&mut self, width: u32, height: u32) -> Result<()> {
        tracing::info!(width, height, "opening presentation window");
        self.is_open = true;
        Ok(())
    }

    fn show(&mut self, stimulus: &Renderable) -> Result<()> {
        match stimulus {
            Renderable::Image(path) => {
                tracing::info!(image = %path.display(), "presenting stimulus");
            }
            Renderable::Text(text) => {
                tracing::info!(text = %text, "presenting stimulus");
            }
        }
        Ok(())
    }

    fn wait(&mut self, seconds: f64) -> Result<()> {
        thread::sleep(Duration::from_secs_f64(seconds.max(0.0)));
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        tracing::info!("closing presentation window");
        self.is_open = false;
        Ok(())
    }
}

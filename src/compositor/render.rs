use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use std::io::Write;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::{Compositor, Grid};
use crate::error::Result;

/// Redraws a compositor on a fixed interval until cancelled.
///
/// Without a frame budget the task only stops through its cancellation token,
/// which is how the splash screen runs until the operator interrupts it.
pub struct RenderTask {
    compositor: Compositor,
    interval: Duration,
    max_frames: Option<u64>,
}

impl RenderTask {
    pub fn new(compositor: Compositor, interval: Duration) -> Self {
        Self {
            compositor,
            interval,
            max_frames: None,
        }
    }

    /// Stop on its own after `frames` frames
    pub fn with_frame_budget(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    /// Render frames into `out`, returning how many were drawn
    pub async fn run<W: Write>(&self, out: &mut W, cancel: &CancellationToken) -> Result<u64> {
        let mut ticker = tokio::time::interval(self.interval);
        let mut frames = 0u64;

        info!("🖥️ Render loop started ({}ms per frame)", self.interval.as_millis());

        loop {
            if self.max_frames.is_some_and(|max| frames >= max) {
                break;
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let grid = self.compositor.compose();
            present(out, &grid)?;
            frames += 1;
            debug!("Frame {} drawn", frames);
        }

        info!("Render loop stopped after {} frames", frames);
        Ok(frames)
    }
}

/// Clear the display and write the grid from the top-left corner
pub fn present<W: Write>(out: &mut W, grid: &Grid) -> Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    out.write_all(grid.render().as_bytes())?;
    out.flush()?;
    Ok(())
}

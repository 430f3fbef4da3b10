use crate::events::{Relayout, ViewportChanged};
use crate::stars::Viewport;
use anyhow::Result;
use tokio::select;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio::time::{Duration, sleep};
use tracing::debug;

/// Debounces viewport resizes into relayout requests.
///
/// Rules:
/// - Every resize replaces the pending viewport and restarts the quiet timer.
/// - Once `quiet` passes without a resize, the pending viewport is forwarded.
/// - When the resize side closes, a pending viewport is flushed before exit.
/// - A closed relayout side ends the task.
pub async fn run(
    mut resize_rx: Receiver<ViewportChanged>,
    to_stars: Sender<Relayout>,
    quiet: Duration,
) -> Result<()> {
    let mut pending: Option<Viewport> = None;

    loop {
        select! {
            maybe = resize_rx.recv() => match maybe {
                Some(ViewportChanged(viewport)) => {
                    pending = Some(viewport);
                }
                None => break,
            },

            _ = sleep(quiet), if pending.is_some() => {
                if let Some(viewport) = pending.take() {
                    debug!(?viewport, "resize settled");
                    if to_stars.send(Relayout(viewport)).await.is_err() {
                        debug!("relayout receiver closed");
                        return Ok(());
                    }
                }
            }
        }
    }

    if let Some(viewport) = pending.take() {
        let _ = to_stars.send(Relayout(viewport)).await;
    }
    Ok(())
}

//! Existence checks for candidate image files.

use std::future::Future;
use std::path::Path;

use tracing::trace;

/// Answers "does this candidate resolve to a loadable image?".
///
/// A `false` answer is a normal outcome, never an error. Implementations must
/// eventually resolve; the scanner applies no timeout of its own.
pub trait ImageProbe {
    fn probe(&self, candidate: &Path) -> impl Future<Output = bool> + Send;
}

/// Probes the local filesystem by opening and decoding the candidate.
///
/// The format is sniffed from the file content, so a PNG saved as `A1.jpg`
/// still loads. Decoding runs on the blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl ImageProbe for FsProbe {
    fn probe(&self, candidate: &Path) -> impl Future<Output = bool> + Send {
        let path = candidate.to_path_buf();
        async move {
            let shown = path.clone();
            match tokio::task::spawn_blocking(move || decodes(&path)).await {
                Ok(Ok(())) => true,
                Ok(Err(err)) => {
                    trace!(path = %shown.display(), error = %err, "probe miss");
                    false
                }
                Err(err) => {
                    trace!(path = %shown.display(), error = %err, "probe task failed");
                    false
                }
            }
        }
    }
}

fn decodes(path: &Path) -> anyhow::Result<()> {
    image::ImageReader::open(path)?
        .with_guessed_format()?
        .decode()?;
    Ok(())
}

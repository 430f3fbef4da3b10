use crate::stars::Viewport;

/// The viewport was resized.
#[derive(Debug, Clone, Copy)]
pub struct ViewportChanged(pub Viewport);

/// Resizing settled; stars should be laid out again for this viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Relayout(pub Viewport);

use thiserror::Error;

/// Failure to set up or resize the drawing surfaces.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FxError {
    #[error("drawing surface unavailable: viewport is {cols}x{rows} cells")]
    SurfaceUnavailable { cols: u16, rows: u16 },
}

use crate::model::BoardModelError;

/// Fatal calibration failures for one image.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CalibrationError {
    #[error("no horizontal or vertical line segments survived classification")]
    NoAxisAlignedLines,
    #[error(transparent)]
    Model(#[from] BoardModelError),
}

use thiserror::Error;

use cvfill_driver::DriverError;

#[derive(Debug, Error)]
pub enum FillError {
    #[error("driver error: {0}")]
    Driver(#[from] DriverError),
}

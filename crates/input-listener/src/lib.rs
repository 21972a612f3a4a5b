use std::{io, path::PathBuf};

use thiserror::Error;

mod batch;
pub mod discovery;
mod reader;

pub use batch::{EventBatch, Events};
pub use reader::{DeviceReader, BUFFER_CAPACITY, EVENT_SIZE};

#[derive(Debug, Error)]
pub enum DeviceOpenError {
    #[error("Input device {} does not exist", .0.display())]
    NotFound(PathBuf),
    #[error("Permission denied opening input device {}", .0.display())]
    PermissionDenied(PathBuf),
    #[error("{} is not a readable input device", .0.display())]
    NotADevice(PathBuf),
    #[error("IO error opening input device {}", .path.display())]
    IOError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DeviceOpenError {
    pub(crate) fn from_io(path: PathBuf, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => DeviceOpenError::NotFound(path),
            io::ErrorKind::PermissionDenied => DeviceOpenError::PermissionDenied(path),
            _ => DeviceOpenError::IOError { path, source },
        }
    }
}

#[derive(Debug, Error)]
pub enum DeviceReadError {
    #[error("Read from input device failed")]
    IOError {
        code: Option<i32>,
        #[source]
        source: io::Error,
    },
    #[error("Read returned {} bytes, not a whole number of {}-byte events", .bytes, EVENT_SIZE)]
    PartialRecord { bytes: usize },
}

impl DeviceReadError {
    /// Partial records mean the device does not speak the native event
    /// layout, so retrying cannot help.
    pub fn is_fatal(&self) -> bool {
        matches!(self, DeviceReadError::PartialRecord { .. })
    }

    pub fn code(&self) -> Option<i32> {
        match self {
            DeviceReadError::IOError { code, .. } => *code,
            DeviceReadError::PartialRecord { .. } => None,
        }
    }
}

impl From<io::Error> for DeviceReadError {
    fn from(source: io::Error) -> Self {
        DeviceReadError::IOError {
            code: source.raw_os_error(),
            source,
        }
    }
}

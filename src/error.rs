use std::error::Error as StdError;

use input_listener::{DeviceOpenError, DeviceReadError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Input device returned unusable data")]
    DeviceReadError(#[from] DeviceReadError),
    #[error("Giving up after {failures} consecutive failed reads")]
    TooManyReadFailures {
        failures: u32,
        #[source]
        last: DeviceReadError,
    },
}

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Could not open keyboard device")]
    DeviceOpenError(#[from] DeviceOpenError),
    #[error("Key capture stopped")]
    CaptureError(#[from] CaptureError),
    #[error("Could not write captured text")]
    OutputError(#[source] std::io::Error),
    #[error("Could not listen for Ctrl-C")]
    SignalError(#[source] std::io::Error),
    #[error("Could not start capture thread")]
    SpawnError(#[source] std::io::Error),
    #[error("Capture thread panicked")]
    CapturePanicked,
}

/// Renders an error followed by its chain of causes, e.g. `a: b: c`.
pub fn report(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod test {
    use std::{io, path::PathBuf};

    use input_listener::DeviceOpenError;

    use super::{report, LoggerError};

    #[test]
    fn given_nested_error_should_report_whole_chain() {
        let err = LoggerError::from(DeviceOpenError::NotFound(PathBuf::from("/dev/input/event9")));

        assert_eq!(
            report(&err),
            "Could not open keyboard device: Input device /dev/input/event9 does not exist"
        );
    }

    #[test]
    fn given_signal_registration_failure_should_report_cause() {
        let err = LoggerError::SignalError(io::Error::other("no signal driver"));

        assert_eq!(report(&err), "Could not listen for Ctrl-C: no signal driver");
    }
}

use std::{io, thread};

use input_event::EventParser;
use input_listener::DeviceReader;
use log::info;
use tokio::{
    io::{AsyncWrite, AsyncWriteExt},
    signal,
    sync::mpsc,
};
use tokio_util::sync::CancellationToken;

use crate::{capture::capture_keys, config::Config, error::LoggerError};

/// Opens the keyboard and streams its text to stdout until Ctrl-C, the output
/// closing, or a fatal capture error.
pub async fn run(config: Config) -> Result<(), LoggerError> {
    let reader = DeviceReader::open(&config.device_path)?;
    info!("Opened keyboard device {}", config.device_path.display());

    let (text_tx, text_rx) = mpsc::channel(32);
    let cancellation_token = CancellationToken::new();

    let cancellation_token_clone = cancellation_token.clone();
    let capture_config = config.capture.clone();
    let capture = thread::Builder::new()
        .name("key-capture".to_string())
        .spawn(move || {
            capture_keys(
                reader,
                EventParser::default(),
                text_tx,
                &capture_config,
                cancellation_token_clone,
            )
        })
        .map_err(LoggerError::SpawnError)?;

    tokio::select! {
        result = emit_text(tokio::io::stdout(), text_rx) => {
            cancellation_token.cancel();
            match result.map_err(LoggerError::OutputError)? {
                OutputEnd::CaptureStopped { .. } => {},
                OutputEnd::OutputClosed { .. } => {
                    info!("Output closed, shutting down");
                    // same as Ctrl-C, the capture thread may be blocked in a read
                    return Ok(());
                },
            }
        },
        result = signal::ctrl_c() => {
            cancellation_token.cancel();
            return match result {
                Ok(()) => {
                    info!("Received interrupt, shutting down");
                    // the capture thread may be blocked in a read, leave it to process exit
                    Ok(())
                }
                Err(err) => Err(LoggerError::SignalError(err)),
            };
        },
    }

    // the channel only closes once the capture thread has returned
    match capture.join() {
        Ok(result) => Ok(result?),
        Err(_) => Err(LoggerError::CapturePanicked),
    }
}

/// Why [`emit_text`] stopped, with the number of bytes written until then.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputEnd {
    /// Every sender is gone, i.e. the capture loop has returned.
    CaptureStopped { written: u64 },
    /// The reading end of the output went away.
    OutputClosed { written: u64 },
}

/// Writes every received text as it arrives, flushing after each one.
pub async fn emit_text<W>(
    mut writer: W,
    mut text_receiver: mpsc::Receiver<String>,
) -> Result<OutputEnd, io::Error>
where
    W: AsyncWrite + Unpin,
{
    let mut written = 0;
    while let Some(text) = text_receiver.recv().await {
        let result = match writer.write_all(text.as_bytes()).await {
            Ok(()) => writer.flush().await,
            Err(err) => Err(err),
        };
        match result {
            Ok(()) => written += text.len() as u64,
            Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
                return Ok(OutputEnd::OutputClosed { written })
            }
            Err(err) => return Err(err),
        }
    }
    Ok(OutputEnd::CaptureStopped { written })
}

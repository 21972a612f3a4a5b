use std::{io::Read, thread};

use input_event::EventParser;
use input_listener::DeviceReader;
use log::{debug, error, info};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::{
    config::CaptureConfig,
    error::{report, CaptureError},
};

/// Blocking capture loop, meant to run on its own thread.
///
/// Reads a batch, parses it and hands the text to `text_sender` until the
/// token is cancelled or the receiving side goes away. Failed reads are logged
/// and retried after the configured delay. The token is only checked between
/// reads, a read that blocks keeps blocking.
///
/// An empty read is not an end of input: a replayed dump file keeps being
/// polled at EOF every `read_delay` until cancelled, like an idle device.
pub fn capture_keys<R: Read>(
    mut reader: DeviceReader<R>,
    parser: EventParser<'_>,
    text_sender: mpsc::Sender<String>,
    config: &CaptureConfig,
    cancellation_token: CancellationToken,
) -> Result<(), CaptureError> {
    let mut failures = 0;

    while !cancellation_token.is_cancelled() {
        match reader.read_batch() {
            Ok(batch) => {
                failures = 0;
                let text = parser.parse(batch);
                if !text.is_empty() {
                    debug!("Parsed {} events into {:?}", batch.len(), text);
                    if text_sender.blocking_send(text).is_err() {
                        info!("Text receiver closed, stopping capture");
                        return Ok(());
                    }
                }
            }
            Err(err) if err.is_fatal() => return Err(err.into()),
            Err(err) => {
                failures += 1;
                error!("Failed to read bytes: {}", report(&err));
                if config.max_read_failures.is_some_and(|max| failures >= max) {
                    return Err(CaptureError::TooManyReadFailures { failures, last: err });
                }
            }
        }

        if !config.read_delay.is_zero() {
            thread::sleep(config.read_delay);
        }
    }

    debug!("Capture cancelled");
    Ok(())
}

#[cfg(test)]
mod test {
    use std::{
        collections::VecDeque,
        io::{self, Read},
        time::Duration,
    };

    use input_event::EventParser;
    use input_listener::{DeviceReadError, DeviceReader, EVENT_SIZE};
    use tokio::sync::mpsc;
    use tokio_util::sync::CancellationToken;

    use crate::{config::CaptureConfig, error::CaptureError};

    use super::capture_keys;

    const EV_KEY: u16 = 1;
    const KEY_H: u16 = 35;
    const KEY_I: u16 = 23;

    fn encode(events: &[(u16, u16, i32)]) -> Vec<u8> {
        let mut bytes = Vec::new();
        for (event_type, code, value) in events {
            bytes.extend(std::iter::repeat(0u8).take(EVENT_SIZE - 8));
            bytes.extend(event_type.to_ne_bytes());
            bytes.extend(code.to_ne_bytes());
            bytes.extend(value.to_ne_bytes());
        }
        bytes
    }

    /// Replays a fixed list of read results, then fails every read with ENODEV.
    struct ScriptedDevice {
        reads: VecDeque<io::Result<Vec<u8>>>,
    }

    impl ScriptedDevice {
        fn new(reads: Vec<io::Result<Vec<u8>>>) -> DeviceReader<Self> {
            DeviceReader::from_source(ScriptedDevice {
                reads: reads.into(),
            })
        }
    }

    impl Read for ScriptedDevice {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.reads.pop_front() {
                Some(Ok(bytes)) => {
                    buf[..bytes.len()].copy_from_slice(&bytes);
                    Ok(bytes.len())
                }
                Some(Err(err)) => Err(err),
                None => Err(io::Error::from_raw_os_error(19)),
            }
        }
    }

    fn config(max_read_failures: Option<u32>) -> CaptureConfig {
        CaptureConfig {
            read_delay: Duration::ZERO,
            max_read_failures,
        }
    }

    fn drain(mut receiver: mpsc::Receiver<String>) -> Vec<String> {
        let mut texts = Vec::new();
        while let Ok(text) = receiver.try_recv() {
            texts.push(text);
        }
        texts
    }

    #[test]
    fn given_key_presses_should_send_text_per_batch() {
        let reader = ScriptedDevice::new(vec![
            Ok(encode(&[(EV_KEY, KEY_H, 1), (0, 0, 0), (EV_KEY, KEY_H, 0)])),
            Ok(Vec::new()),
            Ok(encode(&[(EV_KEY, KEY_I, 1)])),
        ]);
        let (sender, receiver) = mpsc::channel(8);

        let result = capture_keys(
            reader,
            EventParser::default(),
            sender,
            &config(Some(1)),
            CancellationToken::new(),
        );

        assert!(matches!(
            result,
            Err(CaptureError::TooManyReadFailures { failures: 1, .. })
        ));
        assert_eq!(drain(receiver), vec!["h".to_string(), "i".to_string()]);
    }

    #[test]
    fn given_transient_failures_should_keep_reading() {
        let reader = ScriptedDevice::new(vec![
            Err(io::Error::from_raw_os_error(4)),
            Err(io::Error::from_raw_os_error(5)),
            Ok(encode(&[(EV_KEY, KEY_H, 1), (EV_KEY, KEY_I, 1)])),
            Err(io::Error::from_raw_os_error(5)),
            Err(io::Error::from_raw_os_error(5)),
        ]);
        let (sender, receiver) = mpsc::channel(8);

        let result = capture_keys(
            reader,
            EventParser::default(),
            sender,
            &config(Some(3)),
            CancellationToken::new(),
        );

        // two failures before the batch and three after it, the counter resets in between
        match result {
            Err(CaptureError::TooManyReadFailures { failures, last }) => {
                assert_eq!(failures, 3);
                assert_eq!(last.code(), Some(19));
            }
            other => panic!("expected too many failures, got {other:?}"),
        }
        assert_eq!(drain(receiver), vec!["hi".to_string()]);
    }

    #[test]
    fn given_partial_record_should_stop_immediately() {
        let mut bytes = encode(&[(EV_KEY, KEY_H, 1)]);
        bytes.pop();
        let reader = ScriptedDevice::new(vec![Ok(bytes)]);
        let (sender, receiver) = mpsc::channel(8);

        let result = capture_keys(
            reader,
            EventParser::default(),
            sender,
            &config(None),
            CancellationToken::new(),
        );

        assert!(matches!(
            result,
            Err(CaptureError::DeviceReadError(DeviceReadError::PartialRecord { .. }))
        ));
        assert!(drain(receiver).is_empty());
    }

    #[test]
    fn given_cancelled_token_should_not_read() {
        let reader = ScriptedDevice::new(Vec::new());
        let (sender, _receiver) = mpsc::channel(8);
        let cancellation_token = CancellationToken::new();
        cancellation_token.cancel();

        let result = capture_keys(
            reader,
            EventParser::default(),
            sender,
            &config(Some(1)),
            cancellation_token,
        );

        assert!(result.is_ok());
    }

    #[test]
    fn given_closed_receiver_should_stop_after_first_text() {
        let reader = ScriptedDevice::new(vec![Ok(encode(&[(EV_KEY, KEY_H, 1)]))]);
        let (sender, receiver) = mpsc::channel(8);
        drop(receiver);

        let result = capture_keys(
            reader,
            EventParser::default(),
            sender,
            &config(Some(1)),
            CancellationToken::new(),
        );

        assert!(result.is_ok());
    }
}

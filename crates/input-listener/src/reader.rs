use std::{fmt, fs::File, io::Read, mem, path::Path, slice};

use libc::input_event;
use log::debug;

use crate::{DeviceOpenError, DeviceReadError, EventBatch};

/// Number of events a single read can return.
pub const BUFFER_CAPACITY: usize = 1024;
/// Size in bytes of one native `struct input_event`.
pub const EVENT_SIZE: usize = mem::size_of::<input_event>();

/// Owns an input device handle together with the buffer its events are read into.
///
/// The handle is closed when the reader is dropped. Readers can be moved but
/// not cloned.
pub struct DeviceReader<R = File> {
    source: R,
    buffer: Box<[input_event]>,
}

impl DeviceReader<File> {
    /// Opens `path` read-only. Regular files are accepted so recorded dumps
    /// can be replayed; at their end every read returns an empty batch.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DeviceOpenError> {
        let path = path.as_ref();
        let file =
            File::open(path).map_err(|err| DeviceOpenError::from_io(path.to_path_buf(), err))?;
        let metadata = file
            .metadata()
            .map_err(|err| DeviceOpenError::from_io(path.to_path_buf(), err))?;
        if metadata.is_dir() {
            return Err(DeviceOpenError::NotADevice(path.to_path_buf()));
        }

        debug!("Opened {} for reading", path.display());
        Ok(DeviceReader::from_source(file))
    }
}

impl<R: Read> DeviceReader<R> {
    /// Reads events from anything that yields native `input_event` records,
    /// e.g. a recorded dump of a device.
    pub fn from_source(source: R) -> Self {
        // SAFETY: input_event only contains integers, so all-zero is a valid value
        let empty: input_event = unsafe { mem::zeroed() };
        DeviceReader {
            source,
            buffer: vec![empty; BUFFER_CAPACITY].into_boxed_slice(),
        }
    }

    /// Performs exactly one read and returns the events it produced.
    pub fn read_batch(&mut self) -> Result<EventBatch<'_>, DeviceReadError> {
        let bytes = self.source.read(as_bytes_mut(&mut self.buffer))?;
        if bytes % EVENT_SIZE != 0 {
            return Err(DeviceReadError::PartialRecord { bytes });
        }

        Ok(EventBatch::new(&self.buffer[..bytes / EVENT_SIZE]))
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }
}

impl<R: fmt::Debug> fmt::Debug for DeviceReader<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceReader")
            .field("source", &self.source)
            .field("capacity", &self.buffer.len())
            .finish()
    }
}

fn as_bytes_mut(events: &mut [input_event]) -> &mut [u8] {
    let len = mem::size_of_val(events);
    // SAFETY: the slice is valid for `len` bytes and every byte pattern is a valid input_event
    unsafe { slice::from_raw_parts_mut(events.as_mut_ptr().cast::<u8>(), len) }
}

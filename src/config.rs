use std::{path::PathBuf, time::Duration};

use clap::Parser;

pub const DEFAULT_KEYBOARD_PATH: &str = "/dev/input/by-path/platform-i8042-serio-0-event-kbd";

#[derive(Debug, Parser)]
#[command(version, about = "Prints the text typed on a keyboard input device")]
pub struct Args {
    /// evdev node of the keyboard
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_KEYBOARD_PATH)]
    pub device: PathBuf,

    /// Pause between two reads, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 100)]
    pub delay_ms: u64,

    /// Exit after this many consecutive failed reads instead of retrying forever
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub max_read_failures: Option<u32>,

    /// List keyboard devices and exit
    #[arg(long)]
    pub list_devices: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub device_path: PathBuf,
    pub capture: CaptureConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureConfig {
    pub read_delay: Duration,
    /// `None` retries failed reads forever.
    pub max_read_failures: Option<u32>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        CaptureConfig {
            read_delay: Duration::from_millis(100),
            max_read_failures: None,
        }
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Config {
            device_path: args.device,
            capture: CaptureConfig {
                read_delay: Duration::from_millis(args.delay_ms),
                max_read_failures: args.max_read_failures,
            },
        }
    }
}

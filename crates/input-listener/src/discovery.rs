use std::path::PathBuf;

use evdev::{Device, Key};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardDevice {
    pub path: PathBuf,
    pub name: String,
}

/// Lists the evdev nodes that report letter keys, sorted by path.
///
/// Devices the process may not open are silently skipped, so running without
/// access to /dev/input simply yields an empty list.
pub fn list_keyboards() -> Vec<KeyboardDevice> {
    let mut keyboards = evdev::enumerate()
        .filter(|(_, device)| is_keyboard(device))
        .map(|(path, device)| KeyboardDevice {
            name: device.name().unwrap_or("Unnamed device").to_string(),
            path,
        })
        .collect::<Vec<_>>();
    keyboards.sort_by(|a, b| a.path.cmp(&b.path));
    keyboards
}

fn is_keyboard(device: &Device) -> bool {
    device
        .supported_keys()
        .is_some_and(|keys| keys.contains(Key::KEY_A) && keys.contains(Key::KEY_ENTER))
}

//! Flash-backed preference record.
//!
//! One small fixed-layout record in the NVS region of internal flash:
//!
//!   [magic u32][version u8][reserved u8 x3][brightness i32]
//!
//! Only the brightness preference exists today; unknown keys read as `None`
//! and refuse writes, so a corrupt caller can't scribble over the record.

use embedded_storage::{ReadStorage, Storage};
use esp_storage::FlashStorage;

use dial_pendant::config::BRIGHTNESS_PREF_KEY;
use dial_pendant::prefs::{PrefError, PrefStore};

/// Flash offset of the preference record (inside the NVS partition).
const PREFS_OFFSET: u32 = 0x9000;

/// "PDPR" little-endian.
const MAGIC: u32 = 0x5250_4450;

const RECORD_VERSION: u8 = 1;
const RECORD_LEN: usize = 12;

pub struct FlashPrefs {
    flash: FlashStorage,
}

impl FlashPrefs {
    pub fn new() -> Self {
        Self {
            flash: FlashStorage::new(),
        }
    }

    fn read_record(&mut self) -> Option<[u8; RECORD_LEN]> {
        let mut buf = [0u8; RECORD_LEN];
        self.flash.read(PREFS_OFFSET, &mut buf).ok()?;
        let magic = u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
        if magic != MAGIC || buf[4] != RECORD_VERSION {
            return None;
        }
        Some(buf)
    }

}

impl Default for FlashPrefs {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefStore for FlashPrefs {
    fn get_i32(&mut self, key: &str) -> Option<i32> {
        if key != BRIGHTNESS_PREF_KEY {
            return None;
        }
        let buf = self.read_record()?;
        Some(i32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]))
    }

    fn set_i32(&mut self, key: &str, value: i32) -> Result<(), PrefError> {
        if key != BRIGHTNESS_PREF_KEY {
            return Err(PrefError::Unavailable);
        }
        let mut buf = [0u8; RECORD_LEN];
        buf[0..4].copy_from_slice(&MAGIC.to_le_bytes());
        buf[4] = RECORD_VERSION;
        buf[8..12].copy_from_slice(&value.to_le_bytes());
        self.flash
            .write(PREFS_OFFSET, &buf)
            .map_err(|_| PrefError::Unavailable)
    }
}

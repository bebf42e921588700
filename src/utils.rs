use crate::entities::Torrent;
use crate::entities::TorrentState::{
    Downloading, ForcedDl, ForcedUp, MetaDl, StalledDl, StalledUp, Uploading,
};
use byte_unit::{Byte, UnitType};

/// ETA reported by the server when it cannot estimate one
const INFINITE_ETA: i64 = 8_640_000;

impl Torrent {
    /// Size of the selected files, `Unknown` until metadata is fetched
    #[must_use]
    pub fn calculate_size(&self) -> String {
        format_bytes(self.size).unwrap_or_else(|| String::from("Unknown"))
    }

    /// Progress as a whole percentage
    #[must_use]
    pub fn calculate_progress(&self) -> f64 {
        (self.progress * 100.0).round().clamp(0.0, 100.0)
    }

    #[must_use]
    pub fn is_downloading(&self) -> bool {
        matches!(self.state, Downloading | ForcedDl | MetaDl | StalledDl)
    }

    #[must_use]
    pub fn is_seeding(&self) -> bool {
        matches!(self.state, Uploading | ForcedUp | StalledUp)
    }

    #[must_use]
    pub fn calculate_speed(&self) -> String {
        let speed = if self.is_downloading() {
            self.dlspeed
        } else if self.is_seeding() {
            self.upspeed
        } else {
            return String::new();
        };

        Some(speed)
            .filter(|speed| *speed > 0)
            .and_then(format_bytes)
            .map(|speed| format!("({speed}/s)"))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn calculate_time_left(&self) -> String {
        if !self.is_downloading() {
            return String::new();
        }
        let eta = if self.eta >= INFINITE_ETA { -1 } else { self.eta };
        format!("⏳Time left: {}", convert_time_left(eta))
    }
}

/// `None` for the negative placeholder the server sends for unknown sizes
fn format_bytes(bytes: i64) -> Option<String> {
    let size = Byte::from(u64::try_from(bytes).ok()?);
    Some(format!("{:#.2}", size.get_appropriate_unit(UnitType::Decimal)))
}

#[must_use]
pub fn convert_time_left(input: i64) -> String {
    if input < 0 {
        return String::from("Unknown");
    }

    if input < 60 {
        return format!("{input} s");
    }

    if input < 3600 {
        let minutes = input / 60;
        let seconds = input - 60 * minutes;
        return format!("{minutes} m {seconds} s");
    }

    if input < 86400 {
        let hours = input / 3600;
        let minutes = (input - hours * 3600) / 60;
        return format!("{hours} h {minutes} m");
    }

    let days = input / 86400;
    let hours = (input - days * 86400) / 3600;
    let minutes = (input - days * 86400 - hours * 3600) / 60;
    format!("{days} d {hours} h {minutes} m")
}

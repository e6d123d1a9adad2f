// 🏷️ Filenames - Attachment names for the two downloads

use chrono::{DateTime, SecondsFormat, Utc};

/// Source of "now" for timestamped filenames.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock, UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// `finanzas_respaldo_YYYY-MM-DDTHH-MM-SS.json`, one-second resolution.
pub fn backup_filename(now: DateTime<Utc>) -> String {
    let iso = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    let token: String = iso
        .chars()
        .map(|c| if c == ':' || c == '.' { '-' } else { c })
        .take(19)
        .collect();

    format!("finanzas_respaldo_{}.json", token)
}

/// `movimientos_hogar_<mes>.json`
///
/// `mes` is interpolated as given. The caller owns its filename, so no
/// sanitization happens here; characters that cannot travel in a header
/// value are caught when the Content-Disposition header is built.
pub fn household_filename(mes: &str) -> String {
    format!("movimientos_hogar_{}.json", mes)
}

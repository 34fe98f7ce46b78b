use chrono::prelude::*;
use concentration_core::Millis;
use gloo::storage::{LocalStorage, Storage};
use serde::{Serialize, de::DeserializeOwned};

/// Local storage key a type is persisted under.
pub(crate) trait StorageKey {
    const KEY: &'static str;
}

pub(crate) fn load_local<T: StorageKey + DeserializeOwned>() -> Option<T> {
    match LocalStorage::get(T::KEY) {
        Ok(value) => Some(value),
        Err(err) => {
            log::debug!("nothing usable stored under {}: {:?}", T::KEY, err);
            None
        }
    }
}

pub(crate) fn save_local<T: StorageKey + Serialize>(value: &T) {
    if let Err(err) = LocalStorage::set(T::KEY, value) {
        log::error!("could not save {} to local storage: {:?}", T::KEY, err);
    }
}

pub(crate) trait LocalOrDefault {
    fn local_or_default() -> Self;
}

impl<T: StorageKey + DeserializeOwned> LocalOrDefault for Option<T> {
    fn local_or_default() -> Self {
        load_local()
    }
}

pub(crate) trait LocalSave {
    fn local_save(&self);
}

impl<T: StorageKey + Serialize> LocalSave for Option<T> {
    fn local_save(&self) {
        match self {
            Some(value) => save_local(value),
            None => LocalStorage::delete(T::KEY),
        }
    }
}

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

pub(crate) fn now_millis() -> Millis {
    js_sys::Date::now() as Millis
}

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Wall clock time in the browser's timezone, formatted for leaderboard rows.
pub(crate) fn local_timestamp() -> String {
    let date = js_sys::Date::new_0();
    let utc = DateTime::<Utc>::from_timestamp_millis(date.get_time() as i64).unwrap_or_default();
    // getTimezoneOffset is UTC minus local, in minutes
    let offset_secs = -(date.get_timezone_offset() as i32) * 60;
    format_timestamp(utc, offset_secs)
}

pub(crate) fn format_timestamp(utc: DateTime<Utc>, offset_secs: i32) -> String {
    match FixedOffset::east_opt(offset_secs) {
        Some(offset) => utc.with_timezone(&offset).format(TIMESTAMP_FORMAT).to_string(),
        None => utc.format(TIMESTAMP_FORMAT).to_string(),
    }
}

/// Seconds with one decimal, e.g. `12.3s`.
pub(crate) fn format_elapsed(millis: Millis) -> String {
    format!("{:.1}s", millis as f64 / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_sort_like_time() {
        let utc = DateTime::<Utc>::from_timestamp_millis(1_700_000_000_000).unwrap();

        assert_eq!(format_timestamp(utc, 0), "2023-11-14 22:13:20");
        assert_eq!(format_timestamp(utc, 8 * 3600), "2023-11-15 06:13:20");
        assert_eq!(format_timestamp(utc, 48 * 3600), "2023-11-14 22:13:20");
    }

    #[test]
    fn elapsed_has_one_decimal() {
        assert_eq!(format_elapsed(0), "0.0s");
        assert_eq!(format_elapsed(12_345), "12.3s");
    }
}

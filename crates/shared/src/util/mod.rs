use std::time::{SystemTime, UNIX_EPOCH};

/// Skip in a loop if an option is none
#[macro_export]
macro_rules! skip_none {
	($res:expr) => {
		match $res {
			Some(val) => val,
			None => continue,
		}
	};
}

/// Checks whether a string is empty or made only of whitespace
///
/// ```
/// use osgirun_shared::util::is_blank;
///
/// assert!(is_blank(""));
/// assert!(is_blank(" \t\n"));
/// assert!(!is_blank(" javax.* "));
/// ```
pub fn is_blank(string: &str) -> bool {
	string.trim().is_empty()
}

/// Gets the current UTC timestamp in seconds
pub fn utc_timestamp() -> anyhow::Result<u64> {
	Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs())
}

/// Gets the current UTC timestamp in milliseconds
pub fn utc_timestamp_millis() -> anyhow::Result<u128> {
	Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis())
}

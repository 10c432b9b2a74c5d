/// First year offered by the year picker unless configured otherwise.
pub const DEFAULT_MIN_YEAR: i32 = 1900;

/// Last year offered by the year picker unless configured otherwise.
pub const DEFAULT_MAX_YEAR: i32 = 2200;

/// Shortest password the identity provider accepts.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Single-letter weekday header, Sunday first.
pub const WEEKDAY_HEADER: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];

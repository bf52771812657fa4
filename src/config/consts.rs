/// Number of virtual users spawned when the config doesn't say
pub const DEFAULT_USERS: usize = 1;
/// Users started per second
pub const DEFAULT_SPAWN_RATE: f64 = 1.0;
/// Relative weight of a user class in the spawn mix
pub const DEFAULT_USER_WEIGHT: u32 = 1;
/// Address the plugin web server binds to
pub const DEFAULT_WEB_BIND: &str = "127.0.0.1:8089";
/// Completed transaction rows buffered before they are written to disk
pub const DEFAULT_TRANSACTION_FLUSH_SIZE: usize = 100;

//! Application-wide constants

pub const DEFAULT_PAGE_SIZE: u32 = 50;
pub const MAX_PAGE_SIZE: u32 = 100;

pub const SESSION_COOKIE: &str = "session";
pub const TENANT_HEADER: &str = "x-tenant-id";

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Base currency units per display unit (e.g. yen per 10k-yen).
pub const DEFAULT_AMOUNT_UNIT: i64 = 10_000;

pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

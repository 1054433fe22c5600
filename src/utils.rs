mod now;

pub use now::now_iso8601;

pub mod sexagesimal;
pub mod time_utils;

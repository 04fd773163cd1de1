pub mod format;

pub use format::{
    format_count, format_currencies, format_decimal, format_list, or_not_available, NOT_AVAILABLE,
};

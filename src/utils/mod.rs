pub mod date;
pub mod text;

pub use date::{
    in_month, in_window, month_window, now_stamp, parse_date, parse_date_req, stamp_date, today,
};

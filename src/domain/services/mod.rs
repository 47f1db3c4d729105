pub mod next_date;

pub use next_date::next_date;

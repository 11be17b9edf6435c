//! One page per displayable mode

mod clock;
mod greeting;
mod page;
mod page_set;
mod solar_system;
mod thermometer;

pub use clock::{ClockPage, format_date, format_time};
pub use greeting::GreetingPage;
pub use page::Page;
pub use page_set::PageSet;
pub use solar_system::{SOL_LABEL_ORIGIN, SolarSystemPage};
pub use thermometer::{ThermometerPage, format_reading};

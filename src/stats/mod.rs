//! Age, averaging and age-band logic shared by the results and summary endpoints.

pub mod age;
pub mod averages;
pub mod bands;

pub use age::age_on;
pub use averages::Averages;
pub use bands::AgeBand;

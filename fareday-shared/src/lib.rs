pub mod models;

pub use models::holiday::HolidayProximity;
pub use models::record::FlightPriceRecord;

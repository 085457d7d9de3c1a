pub mod events;
pub mod holiday;
pub mod record;

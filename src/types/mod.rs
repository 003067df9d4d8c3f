pub mod itinerary;
pub mod place;
pub mod request;

pub use itinerary::{DayPlan, ItineraryResponse, ScheduleItem};
pub use place::Place;
pub use request::ItineraryRequest;

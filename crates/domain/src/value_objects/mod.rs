//! Value Objects - Immutable, identity-less domain primitives

mod city_query;
mod geo_location;
mod question;
mod unix_timestamp;
mod weather_selector;

pub use city_query::CityQuery;
pub use geo_location::GeoLocation;
pub use question::{MAX_QUESTION_LENGTH, Question};
pub use unix_timestamp::UnixTimestamp;
pub use weather_selector::{HistoryGranularity, WeatherDataKind};

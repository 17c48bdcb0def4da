pub mod dates;
pub mod db;
pub mod routes;
mod startup;
pub mod templates;
mod utils;

pub use db::{
    ClimateData, ClimateDb, Precipitation, TemperatureObservation, TemperatureStats,
    MOST_ACTIVE_STATION,
};
pub use routes::*;
pub use startup::*;
pub use utils::*;

pub mod api;

pub use api::{get_status, health_check, submit_location, LocationRequest};

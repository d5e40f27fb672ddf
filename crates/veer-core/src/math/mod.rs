pub mod angle;

pub use angle::{circular_distance, circular_mean, is_valid_heading, signed_step, FULL_TURN_DEG};

pub mod addr;
pub mod model;
pub mod stats;

pub mod comparisons;
pub mod courses;
pub mod saved;
pub mod universities;
pub mod users;

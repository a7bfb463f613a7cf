pub mod dhis;

pub use dhis::DhisClient;

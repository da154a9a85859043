pub mod aggregate;
pub mod fetch;
pub mod normalize;
pub mod output;
pub mod parser;
pub mod schedule;
pub mod station;

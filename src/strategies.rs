pub mod examples;
pub mod remote;

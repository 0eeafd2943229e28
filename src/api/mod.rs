pub mod client;

pub use client::WorkoutClient;

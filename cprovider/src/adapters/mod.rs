#[cfg(feature = "provider-cohere")]
pub mod cohere;

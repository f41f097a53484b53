//! Clients for the external collaborators: the Gemini assistant, the
//! Pexels/Unsplash photo providers and the weather source.
//!
//! Every client degrades instead of failing: when a provider is down,
//! misconfigured or returns garbage, callers get a usable fallback value
//! and the incident is logged.

pub use assist::AssistClient;
pub use photos::PhotoClient;
pub use weather::WeatherService;

pub mod assist;
pub mod photos;
pub mod weather;

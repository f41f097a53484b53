//! Domain logic for the Sahyaatra travel-planning service.
//!
//! The engine owns every trip, co-traveler request, chat message, budget and
//! tourist-place operation, running each one inside a single database
//! transaction. HTTP concerns live in the `server` crate; the engine only
//! knows about authenticated user ids.

pub use budgets::{Budget, BudgetSummary};
pub use categories::{CategorySet, ExpenseCategory};
pub use error::EngineError;
pub use expenses::Expense;
pub use messages::{Message, MessageKind, Participant, ParticipantRole, SenderSummary};
pub use ops::{Engine, EngineBuilder};
pub use places::{CategoryCount, NewPlace, Place, StatePlaceCount};
pub use profiles::{Profile, ProfileView, UserStats};
pub use states::State;
pub use trip_requests::{
    RequestDecision, RequestStatus, RequestWithRequester, RequestWithTrip, RequesterSummary,
    TripRequest,
};
pub use trips::{AuthorSummary, NewTrip, Trip, TripSearch, TripStatus, TripWithAuthor};

pub mod budgets;
mod categories;
mod error;
pub mod expenses;
pub mod messages;
mod ops;
pub mod places;
pub mod profiles;
pub mod states;
pub mod trip_requests;
pub mod trips;
pub mod users;

type ResultEngine<T> = Result<T, EngineError>;

//! Place resolution and nearby-candidate search for itinerary entries.
//!
//! [`SearchOrchestrator::search`] geocodes the trip's city, resolves every
//! itinerary entry to an anchor place through fallback text searches, looks
//! up nearby alternatives around each anchor, keeps only the ones that pass
//! [`is_acceptable`], and returns the aggregated session together with the
//! number of API calls spent.

pub mod categories;
pub mod error;
pub mod filter;
pub mod geocode;
pub mod orchestrator;
pub mod session;
pub mod tally;
pub mod worker;

pub use error::{GeocodeError, SearchError};
pub use filter::{evaluate, is_acceptable, FilterCriteria, Rejection};
pub use geocode::{GeoLookup, NominatimGeocoder};
pub use orchestrator::{SearchOptions, SearchOrchestrator, SearchOutcome};
pub use session::{AnchorRecord, NearbyIndex, SearchSession, SharedSession};
pub use tally::{ApiCallTally, CallCategory};
pub use worker::{EntryOutcome, ResolutionWorker, SearchContext};

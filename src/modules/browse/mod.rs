pub mod clock;
pub mod debouncer;
pub mod detail_loader;
pub mod query_controller;
pub mod search_state;

pub use clock::{Clock, ManualClock, TokioClock};
pub use debouncer::Debouncer;
pub use detail_loader::{DetailError, DetailLoader, DetailState};
pub use query_controller::QueryController;
pub use search_state::{SearchError, SearchPhase, SearchSnapshot};

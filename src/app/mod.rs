//! App-Schicht: Sitzungskontext, Intents, Controller und der
//! Routen-Zustandsautomat.

pub mod controller;
pub mod coordinator;
pub mod events;
pub mod session;
pub mod state;

pub use controller::SessionController;
pub use coordinator::{ResolvedRoute, RouteCoordinator, RouteTicket};
pub use events::SessionIntent;
pub use session::SessionState;
pub use state::{FeedStatus, RouteFinderState, RoutePhase};

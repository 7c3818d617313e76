pub mod actor;
pub mod client;
pub mod http;
pub mod local;

pub use actor::{CalculatorActor, RemoteError};
pub use client::{PendingStatus, RemoteClient};
pub use http::HttpActor;
pub use local::LocalActor;

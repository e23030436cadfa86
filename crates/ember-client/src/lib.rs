/// Ember client core
///
/// Session state, the streak cache and the verbs that keep them in sync with
/// the streak service. Front ends render from [`projection::Screen`] and call
/// into [`orchestrator::Orchestrator`].
pub mod api;
pub mod cache;
pub mod config;
pub mod drafts;
pub mod error;
pub mod notice;
pub mod orchestrator;
pub mod projection;
pub mod session;
pub mod transport;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use notice::{Notice, NoticeLevel, NoticeReceiver, Notifier};
pub use orchestrator::{Orchestrator, SessionContext};
pub use projection::Screen;
pub use session::View;
pub use transport::{HttpApi, StreakApi, TransportError};

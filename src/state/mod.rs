pub mod preview;
pub mod progress;
pub mod session;
pub mod viewport;

pub use preview::{PreviewAction, StitchPreview};
pub use progress::{ChannelState, ProgressAction, ProgressEvent, ProgressLog};
pub use session::{Session, User};
pub use viewport::{Vec2, ViewportAction, ViewportConfig, ViewportState};

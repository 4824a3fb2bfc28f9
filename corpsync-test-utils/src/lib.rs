pub mod builder;
pub mod constant;
pub mod error;
pub mod fixtures;
pub mod setup;
pub mod sink;
pub mod transport;

pub use builder::TestBuilder;
pub use error::TestError;
pub use setup::TestSetup;
pub use sink::{Notified, RecordingNotificationSink};
pub use transport::MockTransport;

pub mod prelude {
    pub use crate::{
        constant::*, fixtures::factory, MockTransport, Notified, RecordingNotificationSink,
        TestBuilder, TestError, TestSetup,
    };
}

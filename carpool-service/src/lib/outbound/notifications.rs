pub mod logging;
pub mod resend;

pub use logging::LoggingNotifier;
pub use resend::ResendNotifier;

// rutokens/src/transport/mod.rs

/// Scripted transport for tests
pub mod mock;
pub mod poll;
/// The transport collaborator trait
pub mod traits;
/// Rutoken S over vendor USB control transfers
#[cfg(feature = "usb")]
pub mod usb;

pub use mock::MockTransport;
pub use poll::BusyPoll;
pub use traits::Transport;
#[cfg(feature = "usb")]
pub use usb::UsbTransport;

// rutokens/src/transport/usb/descriptor.rs

use rusb::{Device, DeviceDescriptor, UsbContext};

use crate::constants::{RUTOKEN_S_PRODUCT_ID, RUTOKEN_VENDOR_ID};

/// Vendor/product pair accepted by `UsbTransport::open`
pub fn is_rutoken(dd: &DeviceDescriptor) -> bool {
    dd.vendor_id() == RUTOKEN_VENDOR_ID && dd.product_id() == RUTOKEN_S_PRODUCT_ID
}

/// Number of the first interface in the active configuration. The reader
/// exposes a single interface; control transfers carry its number in wIndex.
pub fn find_interface<T: UsbContext>(device: &Device<T>) -> Option<u8> {
    let config = device
        .active_config_descriptor()
        .or_else(|_| device.config_descriptor(0))
        .ok()?;
    config
        .interfaces()
        .flat_map(|interface| interface.descriptors())
        .map(|desc| desc.interface_number())
        .next()
}

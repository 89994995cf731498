//! Host identity presented to managers.

/// Identity of the application calling into a manager.
pub trait HostInterface {
    /// Unique, reverse-DNS style identifier.
    fn identifier(&self) -> &str;
    fn display_name(&self) -> &str;
}

pub const HOST_IDENTIFIER: &str = "org.assetlink.medialinker";
pub const HOST_DISPLAY_NAME: &str = "Timeline Asset Media Linker";

/// Host identity of the media linker.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinkerHost;

impl HostInterface for LinkerHost {
    fn identifier(&self) -> &str {
        HOST_IDENTIFIER
    }

    fn display_name(&self) -> &str {
        HOST_DISPLAY_NAME
    }
}

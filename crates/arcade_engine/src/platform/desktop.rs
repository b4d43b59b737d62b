use super::Platform;

/// Root of loose assets on desktop, relative to the working directory
pub const DESKTOP_ASSET_ROOT: &str = "./resources/";

/// Desktop platform: no lifecycle work, assets from a loose directory
#[derive(Debug, Default, Clone, Copy)]
pub struct Desktop;

impl Desktop {
    /// Create the desktop platform
    pub fn new() -> Self {
        Self
    }
}

impl Platform for Desktop {
    fn on_process_start(&mut self) {}

    fn on_process_end(&mut self) {}

    fn resolve_asset(&self, name: &str) -> String {
        format!("{DESKTOP_ASSET_ROOT}{name}")
    }

    fn forced_resolution(&self) -> Option<(u32, u32)> {
        None
    }
}

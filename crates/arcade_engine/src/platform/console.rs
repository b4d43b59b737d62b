use super::Platform;

/// Resolution the handheld always presents at
pub const CONSOLE_RESOLUTION: (u32, u32) = (1280, 720);

/// Prefix of the mounted read-only asset archive
pub const ROMFS_ROOT: &str = "romfs:/";

/// System services the handheld platform depends on
///
/// [`super::LibnxServices`] binds these to the console SDK; tests substitute
/// a recording fake.
pub trait ConsoleServices {
    /// Mount the application's read-only asset archive
    fn mount_romfs(&mut self) -> Result<(), u32>;

    /// Unmount the asset archive
    fn unmount_romfs(&mut self);

    /// Bring up the socket layer
    fn socket_init(&mut self) -> Result<(), u32>;

    /// Shut down the socket layer
    fn socket_exit(&mut self);

    /// Connect stdout to the network debug host; returns the socket on success
    fn redirect_stdout(&mut self) -> Option<i32>;

    /// Close a socket returned by [`ConsoleServices::redirect_stdout`]
    fn close_socket(&mut self, socket: i32);

    /// The applet's keep-running signal
    fn main_loop(&mut self) -> bool;
}

/// Handheld console platform
///
/// Mounts the asset archive at start and, when built with diagnostics
/// enabled, redirects stdout to a network debug listener. Both are undone at
/// process end.
pub struct HandheldConsole<S: ConsoleServices> {
    services: S,
    diagnostics: bool,
    started: bool,
    romfs_mounted: bool,
    debug_socket: Option<i32>,
}

impl<S: ConsoleServices> HandheldConsole<S> {
    /// Create the platform; `diagnostics` enables the debug output redirect
    pub fn new(services: S, diagnostics: bool) -> Self {
        Self {
            services,
            diagnostics,
            started: false,
            romfs_mounted: false,
            debug_socket: None,
        }
    }

    /// Whether stdout currently goes to the debug host
    pub fn diagnostics_active(&self) -> bool {
        self.debug_socket.is_some()
    }

    /// Whether the asset archive is mounted
    pub fn assets_mounted(&self) -> bool {
        self.romfs_mounted
    }

    /// Underlying services
    pub fn services(&self) -> &S {
        &self.services
    }

    fn start_debug_redirect(&mut self) {
        if self.services.socket_init().is_err() {
            // Remote diagnostics are simply unavailable
            return;
        }

        match self.services.redirect_stdout() {
            Some(socket) => {
                self.debug_socket = Some(socket);
                log::info!("stdout now goes to nxlink server");
            }
            None => self.services.socket_exit(),
        }
    }

    fn stop_debug_redirect(&mut self) {
        if let Some(socket) = self.debug_socket.take() {
            self.services.close_socket(socket);
            self.services.socket_exit();
        }
    }
}

impl<S: ConsoleServices> Platform for HandheldConsole<S> {
    fn on_process_start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        match self.services.mount_romfs() {
            Ok(()) => self.romfs_mounted = true,
            Err(code) => log::warn!("Failed to mount romfs: 0x{code:x}"),
        }

        if self.diagnostics {
            self.start_debug_redirect();
        }
    }

    fn on_process_end(&mut self) {
        self.stop_debug_redirect();

        if self.romfs_mounted {
            self.services.unmount_romfs();
            self.romfs_mounted = false;
        }
        self.started = false;
    }

    fn resolve_asset(&self, name: &str) -> String {
        format!("{ROMFS_ROOT}{name}")
    }

    fn forced_resolution(&self) -> Option<(u32, u32)> {
        Some(CONSOLE_RESOLUTION)
    }

    fn should_continue(&mut self) -> bool {
        self.services.main_loop()
    }
}

//! Console SDK bindings for the handheld target
//!
//! Links against libnx, which the homebrew toolchain provides at link time.

use super::ConsoleServices;
use std::ffi::{c_char, c_int, c_void};

const ROMFS_DEVICE: &[u8] = b"romfs\0";

extern "C" {
    fn romfsMountSelf(name: *const c_char) -> u32;
    fn romfsUnmount(name: *const c_char) -> u32;
    fn socketInitialize(config: *const c_void) -> u32;
    fn socketExit();
    fn nxlinkConnectToHost(redir_stdout: bool, redir_stderr: bool) -> c_int;
    fn appletMainLoop() -> bool;
    fn close(fd: c_int) -> c_int;
}

/// [`ConsoleServices`] backed by libnx
#[derive(Debug, Default)]
pub struct LibnxServices;

impl ConsoleServices for LibnxServices {
    fn mount_romfs(&mut self) -> Result<(), u32> {
        let rc = unsafe { romfsMountSelf(ROMFS_DEVICE.as_ptr().cast()) };
        if rc == 0 {
            Ok(())
        } else {
            Err(rc)
        }
    }

    fn unmount_romfs(&mut self) {
        let rc = unsafe { romfsUnmount(ROMFS_DEVICE.as_ptr().cast()) };
        if rc != 0 {
            log::warn!("romfs unmount failed: 0x{rc:x}");
        }
    }

    fn socket_init(&mut self) -> Result<(), u32> {
        // A null config selects the default socket layer settings
        let rc = unsafe { socketInitialize(std::ptr::null()) };
        if rc == 0 {
            Ok(())
        } else {
            Err(rc)
        }
    }

    fn socket_exit(&mut self) {
        unsafe { socketExit() };
    }

    fn redirect_stdout(&mut self) -> Option<i32> {
        let socket = unsafe { nxlinkConnectToHost(true, false) };
        (socket >= 0).then_some(socket)
    }

    fn close_socket(&mut self, socket: i32) {
        unsafe { close(socket) };
    }

    fn main_loop(&mut self) -> bool {
        unsafe { appletMainLoop() }
    }
}

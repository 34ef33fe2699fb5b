/// Lock resolver: find which processes hold a path open, and kill them
use std::io;
use std::path::Path;

use log::{debug, info};

use super::terminate::terminate_process;
use crate::state::ProcessId;

/// Discovers and terminates processes that block access to a path
pub trait LockResolver: Send + Sync {
    /// Processes holding `path` open; empty when none are found or the
    /// platform's lock registry is unavailable
    fn find_blocking_processes(&self, path: &Path) -> Vec<ProcessId>;

    /// Forced termination. Failures are not reported.
    fn terminate_process(&self, pid: ProcessId);

    /// Find and kill everything blocking `path`, returning the pids targeted
    fn terminate_blocking(&self, path: &Path) -> Vec<ProcessId> {
        let pids = self.find_blocking_processes(path);
        for &pid in &pids {
            self.terminate_process(pid);
        }
        pids
    }
}

/// Resolver backed by the OS lock registry
/// (Restart Manager on Windows, procfs on Linux)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLockResolver;

impl LockResolver for SystemLockResolver {
    fn find_blocking_processes(&self, path: &Path) -> Vec<ProcessId> {
        let pids = find_locking_processes(path);
        if !pids.is_empty() {
            info!("🔒 {} is held open by {:?}", path.display(), pids);
        }
        pids
    }

    fn terminate_process(&self, pid: ProcessId) {
        if let Err(e) = terminate_process(pid) {
            debug!("could not terminate PID {}: {}", pid, e);
        }
    }
}

/// True when an I/O error looks like a sharing/lock violation rather than a
/// plain failure
pub fn looks_locked(error: &io::Error) -> bool {
    if error.kind() == io::ErrorKind::PermissionDenied {
        return true;
    }

    #[cfg(unix)]
    {
        matches!(error.raw_os_error(), Some(libc::EBUSY) | Some(libc::ETXTBSY))
    }

    #[cfg(windows)]
    {
        use winapi::shared::winerror::{ERROR_LOCK_VIOLATION, ERROR_SHARING_VIOLATION};
        matches!(
            error.raw_os_error().map(|code| code as u32),
            Some(ERROR_SHARING_VIOLATION) | Some(ERROR_LOCK_VIOLATION)
        )
    }

    #[cfg(not(any(unix, windows)))]
    {
        false
    }
}

#[cfg(target_os = "linux")]
fn find_locking_processes(path: &Path) -> Vec<ProcessId> {
    use std::fs;

    let Ok(target) = fs::canonicalize(path) else {
        return Vec::new();
    };

    let proc_entries = match fs::read_dir("/proc") {
        Ok(entries) => entries,
        Err(e) => {
            debug!("cannot read /proc: {}", e);
            return Vec::new();
        }
    };

    let own_pid = std::process::id();
    let mut pids = Vec::new();

    for entry in proc_entries.flatten() {
        let Some(pid) = entry
            .file_name()
            .to_str()
            .and_then(|name| name.parse::<ProcessId>().ok())
        else {
            continue;
        };

        if pid == own_pid {
            continue;
        }

        // other users' processes are unreadable without privileges
        let Ok(fds) = fs::read_dir(entry.path().join("fd")) else {
            continue;
        };

        let holds_target = fds
            .flatten()
            .any(|fd| fs::read_link(fd.path()).is_ok_and(|link| link == target));

        if holds_target {
            pids.push(pid);
        }
    }

    pids
}

#[cfg(windows)]
fn find_locking_processes(path: &Path) -> Vec<ProcessId> {
    use std::mem;
    use std::os::windows::ffi::OsStrExt;
    use std::ptr;
    use winapi::shared::minwindef::{DWORD, UINT};
    use winapi::shared::winerror::{ERROR_MORE_DATA, ERROR_SUCCESS};
    use winapi::um::restartmanager::{
        CCH_RM_SESSION_KEY, RM_PROCESS_INFO, RmEndSession, RmGetList, RmRegisterResources,
        RmStartSession,
    };

    let wide: Vec<u16> = path.as_os_str().encode_wide().chain(Some(0)).collect();
    let mut session: DWORD = 0;
    let mut session_key = [0u16; CCH_RM_SESSION_KEY + 1];
    let mut pids = Vec::new();

    unsafe {
        if RmStartSession(&mut session, 0, session_key.as_mut_ptr()) != ERROR_SUCCESS {
            debug!("Restart Manager session could not be started");
            return pids;
        }

        let mut files = [wide.as_ptr()];
        if RmRegisterResources(
            session,
            1,
            files.as_mut_ptr(),
            0,
            ptr::null_mut(),
            0,
            ptr::null_mut(),
        ) != ERROR_SUCCESS
        {
            RmEndSession(session);
            return pids;
        }

        let mut needed: UINT = 0;
        let mut count: UINT = 0;
        let mut reboot_reasons: DWORD = 0;
        let result = RmGetList(
            session,
            &mut needed,
            &mut count,
            ptr::null_mut(),
            &mut reboot_reasons,
        );

        if result == ERROR_MORE_DATA && needed > 0 {
            let mut infos: Vec<RM_PROCESS_INFO> = vec![mem::zeroed(); needed as usize];
            count = needed;

            if RmGetList(
                session,
                &mut needed,
                &mut count,
                infos.as_mut_ptr(),
                &mut reboot_reasons,
            ) == ERROR_SUCCESS
            {
                pids.extend(
                    infos[..count as usize]
                        .iter()
                        .map(|info| info.Process.dwProcessId),
                );
            }
        }

        RmEndSession(session);
    }

    pids
}

#[cfg(not(any(target_os = "linux", windows)))]
fn find_locking_processes(_path: &Path) -> Vec<ProcessId> {
    Vec::new()
}

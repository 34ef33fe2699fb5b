/// Forced process termination (cross-platform)
use std::io;

use log::debug;

use crate::state::ProcessId;

/// Kill `pid` without giving it a chance to clean up.
///
/// Refuses to target the current process or pid 0 (which on Unix would
/// address the whole process group).
pub fn terminate_process(pid: ProcessId) -> io::Result<()> {
    if pid == 0 || pid == std::process::id() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("refusing to terminate pid {}", pid),
        ));
    }

    debug!("🛑 Terminating PID {}...", pid);

    #[cfg(unix)]
    {
        use nix::sys::signal::{Signal, kill};
        use nix::unistd::Pid;

        let raw = i32::try_from(pid)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "pid out of range"))?;
        kill(Pid::from_raw(raw), Signal::SIGKILL).map_err(io::Error::from)?;
    }

    #[cfg(windows)]
    {
        use winapi::shared::minwindef::FALSE;
        use winapi::um::handleapi::CloseHandle;
        use winapi::um::processthreadsapi::{OpenProcess, TerminateProcess};
        use winapi::um::winnt::PROCESS_TERMINATE;

        unsafe {
            let handle = OpenProcess(PROCESS_TERMINATE, FALSE, pid);
            if handle.is_null() {
                return Err(io::Error::last_os_error());
            }

            let result = TerminateProcess(handle, 1);
            let error = io::Error::last_os_error();
            CloseHandle(handle);

            if result == 0 {
                return Err(error);
            }
        }
    }

    #[cfg(not(any(unix, windows)))]
    {
        return Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "process termination is not supported on this platform",
        ));
    }

    Ok(())
}

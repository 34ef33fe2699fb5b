/// Process utilities
use crate::state::ProcessId;

/// True while `pid` refers to a live (or not yet reaped) process
pub fn process_exists(pid: ProcessId) -> bool {
    #[cfg(unix)]
    {
        use nix::errno::Errno;
        use nix::sys::signal::kill;
        use nix::unistd::Pid;

        let Ok(raw) = i32::try_from(pid) else {
            return false;
        };
        if raw <= 0 {
            return false;
        }

        // signal 0: permission and existence check only
        match kill(Pid::from_raw(raw), None) {
            Ok(()) => true,
            Err(Errno::EPERM) => true,
            Err(_) => false,
        }
    }

    #[cfg(windows)]
    {
        use winapi::shared::minwindef::{DWORD, FALSE};
        use winapi::um::handleapi::CloseHandle;
        use winapi::um::minwinbase::STILL_ACTIVE;
        use winapi::um::processthreadsapi::{GetExitCodeProcess, OpenProcess};
        use winapi::um::winnt::PROCESS_QUERY_LIMITED_INFORMATION;

        unsafe {
            let handle = OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, FALSE, pid);
            if handle.is_null() {
                return false;
            }

            let mut code: DWORD = 0;
            let ok = GetExitCodeProcess(handle, &mut code);
            CloseHandle(handle);
            ok != 0 && code == STILL_ACTIVE
        }
    }

    #[cfg(not(any(unix, windows)))]
    {
        let _ = pid;
        false
    }
}

/// Best-effort executable name of `pid`, for conflict prompts
pub fn process_name(pid: ProcessId) -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        if let Ok(exe) = std::fs::read_link(format!("/proc/{}/exe", pid)) {
            if let Some(name) = exe.file_name() {
                return Some(name.to_string_lossy().into_owned());
            }
        }

        std::fs::read_to_string(format!("/proc/{}/comm", pid))
            .ok()
            .map(|comm| comm.trim().to_string())
            .filter(|comm| !comm.is_empty())
    }

    #[cfg(windows)]
    {
        use std::path::Path;
        use std::ptr;
        use winapi::shared::minwindef::FALSE;
        use winapi::um::handleapi::CloseHandle;
        use winapi::um::processthreadsapi::OpenProcess;
        use winapi::um::psapi::GetModuleFileNameExW;
        use winapi::um::winnt::{PROCESS_QUERY_INFORMATION, PROCESS_VM_READ};

        unsafe {
            let handle = OpenProcess(PROCESS_QUERY_INFORMATION | PROCESS_VM_READ, FALSE, pid);
            if handle.is_null() {
                return None;
            }

            let mut path_buf = vec![0u16; 4096];
            let result = GetModuleFileNameExW(
                handle,
                ptr::null_mut(),
                path_buf.as_mut_ptr(),
                path_buf.len() as u32,
            );
            CloseHandle(handle);

            if result == 0 {
                return None;
            }

            let path = String::from_utf16_lossy(&path_buf[..result as usize]);
            Path::new(&path)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        }
    }

    #[cfg(not(any(target_os = "linux", windows)))]
    {
        let _ = pid;
        None
    }
}

// sierra-export: Sierra Engine Release Packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Killing a tool together with everything it started.
//!
//! ```text
//! unix     spawn in a new process group --> killpg(SIGKILL)
//! windows  assign to a Job Object        --> TerminateJobObject / close
//! ```
//!
//! `dotnet publish` forks MSBuild and compiler workers that inherit the
//! output pipes; killing only the direct child leaves them running.

use tokio::process::{Child, Command};
use tracing::debug;

/// Makes the child the root of its own group so the whole tree can be
/// signalled at once.
pub(super) fn isolate(command: &mut Command) {
    #[cfg(unix)]
    command.process_group(0);
    #[cfg(not(unix))]
    let _ = command;
}

/// Handle on a spawned child and its descendants.
pub(super) struct ProcessTree {
    #[cfg(unix)]
    group: Option<nix::unistd::Pid>,
    #[cfg(windows)]
    job: Option<job::JobObject>,
}

impl ProcessTree {
    #[cfg(unix)]
    pub(super) fn attach(child: &Child) -> Self {
        Self {
            group: child
                .id()
                .and_then(|pid| i32::try_from(pid).ok())
                .map(nix::unistd::Pid::from_raw),
        }
    }

    #[cfg(windows)]
    pub(super) fn attach(child: &Child) -> Self {
        let job = child.id().and_then(|pid| match job::JobObject::containing(pid) {
            Ok(job) => Some(job),
            Err(e) => {
                debug!(pid, error = %e, "job object unavailable, killing the child only");
                None
            }
        });
        Self { job }
    }

    #[cfg(not(any(unix, windows)))]
    pub(super) const fn attach(_child: &Child) -> Self {
        Self {}
    }

    /// Kills every process in the tree. The direct child still has to be
    /// reaped by the caller.
    pub(super) fn kill(&self) {
        #[cfg(unix)]
        if let Some(group) = self.group {
            use nix::sys::signal::{Signal, killpg};

            if let Err(e) = killpg(group, Signal::SIGKILL) {
                debug!(group = %group, error = %e, "killpg failed");
            }
        }

        #[cfg(windows)]
        if let Some(job) = &self.job {
            if let Err(e) = job.terminate() {
                debug!(error = %e, "TerminateJobObject failed");
            }
        }
    }
}

#[cfg(windows)]
mod job {
    use std::io;

    use windows::Win32::Foundation::{CloseHandle, HANDLE};
    use windows::Win32::System::JobObjects::{
        AssignProcessToJobObject, CreateJobObjectW, JOB_OBJECT_LIMIT_KILL_ON_JOB_CLOSE,
        JOBOBJECT_EXTENDED_LIMIT_INFORMATION, JobObjectExtendedLimitInformation,
        SetInformationJobObject, TerminateJobObject,
    };
    use windows::Win32::System::Threading::{OpenProcess, PROCESS_SET_QUOTA, PROCESS_TERMINATE};

    fn io_error(err: &windows::core::Error) -> io::Error {
        io::Error::from_raw_os_error(err.code().0)
    }

    /// Job Object with `KILL_ON_JOB_CLOSE`; dropping it kills its members.
    pub(super) struct JobObject(HANDLE);

    // SAFETY: the handle is an opaque kernel object reference usable from any thread.
    unsafe impl Send for JobObject {}
    unsafe impl Sync for JobObject {}

    impl JobObject {
        /// Creates a job and puts process `pid` in it. Processes it starts
        /// afterwards join the job too.
        pub(super) fn containing(pid: u32) -> io::Result<Self> {
            // SAFETY: every handle opened here is checked and closed on failure.
            unsafe {
                let handle = CreateJobObjectW(None, None).map_err(|e| io_error(&e))?;
                let job = Self(handle);

                let mut info = JOBOBJECT_EXTENDED_LIMIT_INFORMATION::default();
                info.BasicLimitInformation.LimitFlags = JOB_OBJECT_LIMIT_KILL_ON_JOB_CLOSE;
                SetInformationJobObject(
                    job.0,
                    JobObjectExtendedLimitInformation,
                    (&raw const info).cast(),
                    u32::try_from(size_of::<JOBOBJECT_EXTENDED_LIMIT_INFORMATION>())
                        .unwrap_or(u32::MAX),
                )
                .map_err(|e| io_error(&e))?;

                let process = OpenProcess(PROCESS_SET_QUOTA | PROCESS_TERMINATE, false, pid)
                    .map_err(|e| io_error(&e))?;
                let assigned = AssignProcessToJobObject(job.0, process);
                let _ = CloseHandle(process);
                assigned.map_err(|e| io_error(&e))?;

                Ok(job)
            }
        }

        pub(super) fn terminate(&self) -> io::Result<()> {
            // SAFETY: self.0 is a live job handle owned by this value.
            unsafe { TerminateJobObject(self.0, 1).map_err(|e| io_error(&e)) }
        }
    }

    impl Drop for JobObject {
        fn drop(&mut self) {
            // SAFETY: the handle is owned and closed exactly once.
            unsafe {
                let _ = CloseHandle(self.0);
            }
        }
    }
}

// native/win32.rs
#![allow(unsafe_code)]

use super::{FileAttributes, FindEntry, NativeFs};
use crate::error::Win32Error;
use ::windows::core::PCWSTR;
use ::windows::Win32::Foundation::{FILETIME, HANDLE};
use ::windows::Win32::Storage::FileSystem::{
    FindClose, FindExInfoBasic, FindExSearchNameMatch, FindFirstFileExW, FindNextFileW,
    GetFileAttributesW, GetFullPathNameW, FIND_FIRST_EX_FLAGS, INVALID_FILE_ATTRIBUTES,
    WIN32_FIND_DATAW,
};

/// [`NativeFs`] backed by kernel32
#[derive(Clone, Copy, Debug, Default)]
pub struct Win32Fs;

/// An open `FindFirstFileExW` search handle
#[derive(Debug)]
pub struct Win32FindHandle(HANDLE);

fn nul_terminated(path: &[u16]) -> Vec<u16> {
    let mut w = Vec::with_capacity(path.len() + 1);
    w.extend_from_slice(path);
    w.push(0);
    w
}

fn last_error() -> Win32Error {
    Win32Error(unsafe { ::windows::Win32::Foundation::GetLastError() }.0)
}

/// Recovers the Win32 code from an `HRESULT_FROM_WIN32` value
fn win32_code(err: &::windows::core::Error) -> Win32Error {
    let hr = err.code().0 as u32;
    if hr & 0xFFFF_0000 == 0x8007_0000 {
        Win32Error(hr & 0xFFFF)
    } else {
        Win32Error(hr)
    }
}

fn filetime(ft: FILETIME) -> u64 {
    ((ft.dwHighDateTime as u64) << 32) | ft.dwLowDateTime as u64
}

fn to_entry(data: &WIN32_FIND_DATAW) -> FindEntry {
    let name_len = data
        .cFileName
        .iter()
        .position(|&c| c == 0)
        .unwrap_or(data.cFileName.len());
    FindEntry {
        name: String::from_utf16_lossy(&data.cFileName[..name_len]),
        attributes: FileAttributes::from_bits_retain(data.dwFileAttributes),
        size: ((data.nFileSizeHigh as u64) << 32) | data.nFileSizeLow as u64,
        creation_time: filetime(data.ftCreationTime),
        last_access_time: filetime(data.ftLastAccessTime),
        last_write_time: filetime(data.ftLastWriteTime),
    }
}

impl NativeFs for Win32Fs {
    type Handle = Win32FindHandle;

    fn full_path_name(&self, path: &[u16], buffer: &mut [u16]) -> Result<usize, Win32Error> {
        let w = nul_terminated(path);
        let out = if buffer.is_empty() { None } else { Some(buffer) };
        let n = unsafe { GetFullPathNameW(PCWSTR(w.as_ptr()), out, None) };
        if n == 0 {
            return Err(last_error());
        }
        Ok(n as usize)
    }

    fn file_attributes(&self, path: &[u16]) -> Result<FileAttributes, Win32Error> {
        let w = nul_terminated(path);
        let attrs = unsafe { GetFileAttributesW(PCWSTR(w.as_ptr())) };
        if attrs == INVALID_FILE_ATTRIBUTES {
            return Err(last_error());
        }
        Ok(FileAttributes::from_bits_retain(attrs))
    }

    fn find_first(&self, pattern: &[u16]) -> Result<(Self::Handle, FindEntry), Win32Error> {
        let w = nul_terminated(pattern);
        let mut data = WIN32_FIND_DATAW::default();
        // basic info level skips 8.3 short-name generation
        let handle = unsafe {
            FindFirstFileExW(
                PCWSTR(w.as_ptr()),
                FindExInfoBasic,
                &mut data as *mut WIN32_FIND_DATAW as *mut _,
                FindExSearchNameMatch,
                None,
                FIND_FIRST_EX_FLAGS(0),
            )
        }
        .map_err(|e| win32_code(&e))?;
        Ok((Win32FindHandle(handle), to_entry(&data)))
    }

    fn find_next(&self, handle: &mut Self::Handle) -> Result<Option<FindEntry>, Win32Error> {
        let mut data = WIN32_FIND_DATAW::default();
        match unsafe { FindNextFileW(handle.0, &mut data) } {
            Ok(()) => Ok(Some(to_entry(&data))),
            Err(e) => {
                let code = win32_code(&e);
                if code == Win32Error::NO_MORE_FILES {
                    Ok(None)
                } else {
                    Err(code)
                }
            }
        }
    }

    fn find_close(&self, handle: Self::Handle) {
        if let Err(e) = unsafe { FindClose(handle.0) } {
            tracing::warn!(code = win32_code(&e).code(), "FindClose failed");
        }
    }
}

// tests/common/mod.rs
#![allow(dead_code)]

use globset::GlobBuilder;
use longpath::{FileAttributes, FindEntry, NativeFs, Win32Error};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};

pub fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

pub fn narrow(w: &[u16]) -> String {
    String::from_utf16_lossy(w)
}

/// An in-memory stand-in for kernel32
///
/// Resolves paths against a fixed current directory the way
/// `GetFullPathNameW` does, and serves directory listings registered with
/// [`FakeFs::add_dir`] / [`FakeFs::add_file`].
pub struct FakeFs {
    pub cwd: String,
    dirs: BTreeMap<String, Vec<FindEntry>>,
    pub full_path_calls: Cell<usize>,
    pub searches: RefCell<Vec<String>>,
    pub opened: Cell<usize>,
    pub closes: RefCell<BTreeMap<usize, usize>>,
    pub fail_resolution: Cell<Option<Win32Error>>,
    pub fail_open: Cell<Option<Win32Error>>,
}

pub struct FakeHandle {
    id: usize,
    remaining: VecDeque<FindEntry>,
}

fn key(path: &str) -> String {
    path.trim_end_matches('\\').to_lowercase()
}

fn strip_extended(path: &str) -> String {
    if let Some(rest) = path.strip_prefix(r"\\?\UNC\") {
        format!(r"\\{rest}")
    } else if let Some(rest) = path.strip_prefix(r"\\?\") {
        rest.to_string()
    } else {
        path.to_string()
    }
}

impl FakeFs {
    pub fn new(cwd: &str) -> Self {
        let mut fs = Self {
            cwd: cwd.to_string(),
            dirs: BTreeMap::new(),
            full_path_calls: Cell::new(0),
            searches: RefCell::new(Vec::new()),
            opened: Cell::new(0),
            closes: RefCell::new(BTreeMap::new()),
            fail_resolution: Cell::new(None),
            fail_open: Cell::new(None),
        };
        fs.add_dir(cwd);
        fs
    }

    /// Registers a directory (and its parents)
    pub fn add_dir(&mut self, path: &str) {
        let path = path.trim_end_matches('\\');
        if self.dirs.contains_key(&key(path)) {
            return;
        }
        self.dirs.insert(key(path), Vec::new());
        if let Some((parent, name)) = path.rsplit_once('\\') {
            if !parent.is_empty() && !parent.ends_with('\\') {
                let parent = if parent.len() == 2 && parent.ends_with(':') {
                    format!("{parent}\\")
                } else {
                    parent.to_string()
                };
                self.add_dir(&parent);
                self.push_entry(&parent, name, FileAttributes::DIRECTORY, 0);
            }
        }
    }

    pub fn add_file(&mut self, dir: &str, name: &str, size: u64) {
        self.add_dir(dir);
        self.push_entry(dir, name, FileAttributes::ARCHIVE, size);
    }

    fn push_entry(&mut self, dir: &str, name: &str, attributes: FileAttributes, size: u64) {
        let entries = self.dirs.entry(key(dir)).or_default();
        if entries.iter().any(|e| e.name.eq_ignore_ascii_case(name)) {
            return;
        }
        entries.push(FindEntry {
            name: name.to_string(),
            attributes,
            size,
            ..Default::default()
        });
    }

    /// Total number of closes across all handles
    pub fn total_closes(&self) -> usize {
        self.closes.borrow().values().sum()
    }

    fn resolve(&self, input: &str) -> String {
        let input = input.replace('/', "\\");
        let trailing = input.ends_with('\\');

        let (root, rest): (String, String) = if let Some(rest) = input.strip_prefix(r"\\.\") {
            (r"\\.".to_string(), rest.to_string())
        } else if let Some(rest) = input.strip_prefix(r"\\") {
            let mut parts = rest.splitn(3, '\\');
            let server = parts.next().unwrap_or_default();
            let share = parts.next().unwrap_or_default();
            let tail = parts.next().unwrap_or_default();
            (format!(r"\\{server}\{share}"), tail.to_string())
        } else if input.len() >= 2 && input.as_bytes()[1] == b':' {
            let drive = &input[..2];
            let rest = &input[2..];
            if let Some(abs) = rest.strip_prefix('\\') {
                (drive.to_string(), abs.to_string())
            } else if self.cwd[..2].eq_ignore_ascii_case(drive) {
                (drive.to_string(), format!(r"{}\{rest}", &self.cwd[3..]))
            } else {
                (drive.to_string(), rest.to_string())
            }
        } else if let Some(abs) = input.strip_prefix('\\') {
            (self.cwd[..2].to_string(), abs.to_string())
        } else {
            (self.cwd[..2].to_string(), format!(r"{}\{input}", &self.cwd[3..]))
        };

        let mut segments: Vec<&str> = Vec::new();
        for seg in rest.split('\\') {
            match seg {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                s => segments.push(s),
            }
        }

        let joined = segments.join("\\");
        if root.ends_with(':') {
            let mut out = format!(r"{root}\{joined}");
            if trailing && !segments.is_empty() {
                out.push('\\');
            }
            out
        } else if segments.is_empty() {
            if trailing {
                format!(r"{root}\")
            } else {
                root
            }
        } else {
            let mut out = format!(r"{root}\{joined}");
            if trailing {
                out.push('\\');
            }
            out
        }
    }
}

impl NativeFs for FakeFs {
    type Handle = FakeHandle;

    fn full_path_name(&self, path: &[u16], buffer: &mut [u16]) -> Result<usize, Win32Error> {
        self.full_path_calls.set(self.full_path_calls.get() + 1);
        if let Some(e) = self.fail_resolution.get() {
            return Err(e);
        }
        let resolved = wide(&self.resolve(&narrow(path)));
        if resolved.len() + 1 > buffer.len() {
            return Ok(resolved.len() + 1);
        }
        buffer[..resolved.len()].copy_from_slice(&resolved);
        buffer[resolved.len()] = 0;
        Ok(resolved.len())
    }

    fn file_attributes(&self, path: &[u16]) -> Result<FileAttributes, Win32Error> {
        let path = strip_extended(&narrow(path));
        if self.dirs.contains_key(&key(&path)) {
            return Ok(FileAttributes::DIRECTORY);
        }
        let (dir, name) = path.rsplit_once('\\').ok_or(Win32Error::FILE_NOT_FOUND)?;
        let dir = if dir.ends_with(':') { format!("{dir}\\") } else { dir.to_string() };
        self.dirs
            .get(&key(&dir))
            .and_then(|entries| entries.iter().find(|e| e.name.eq_ignore_ascii_case(name)))
            .map(|e| e.attributes)
            .ok_or(Win32Error::FILE_NOT_FOUND)
    }

    fn find_first(&self, pattern: &[u16]) -> Result<(FakeHandle, FindEntry), Win32Error> {
        let search = narrow(pattern);
        self.searches.borrow_mut().push(search.clone());
        if let Some(e) = self.fail_open.get() {
            return Err(e);
        }

        let path = strip_extended(&search);
        let (dir, name) = path.rsplit_once('\\').ok_or(Win32Error::PATH_NOT_FOUND)?;
        let dir_key = if dir.ends_with(':') { format!("{dir}\\") } else { dir.to_string() };
        let entries = self.dirs.get(&key(&dir_key)).ok_or(Win32Error::PATH_NOT_FOUND)?;

        let matcher = GlobBuilder::new(name)
            .case_insensitive(true)
            .build()
            .map_err(|_| Win32Error(123))?
            .compile_matcher();

        let is_root = dir.ends_with(':');
        let dots = [".", ".."].iter().filter(|_| !is_root).map(|n| FindEntry {
            name: n.to_string(),
            attributes: FileAttributes::DIRECTORY,
            ..Default::default()
        });
        let mut remaining: VecDeque<FindEntry> = dots
            .chain(entries.iter().cloned())
            .filter(|e| matcher.is_match(&e.name))
            .collect();

        let first = remaining.pop_front().ok_or(Win32Error::FILE_NOT_FOUND)?;
        let id = self.opened.get() + 1;
        self.opened.set(id);
        Ok((FakeHandle { id, remaining }, first))
    }

    fn find_next(&self, handle: &mut FakeHandle) -> Result<Option<FindEntry>, Win32Error> {
        Ok(handle.remaining.pop_front())
    }

    fn find_close(&self, handle: FakeHandle) {
        *self.closes.borrow_mut().entry(handle.id).or_default() += 1;
    }
}

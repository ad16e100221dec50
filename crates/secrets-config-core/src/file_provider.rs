//! File access for directory-backed sources
//!
//! The secrets provider only needs three things from storage: whether the
//! directory exists, its immediate entries, and a reader per entry. This
//! module defines that capability and ships two implementations:
//!
//! - [`PhysicalFileProvider`]: a real directory on disk
//! - [`MemoryFileProvider`]: an in-memory directory for tests and embedding

use std::fmt;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

/// One immediate child of a directory
pub trait FileInfo: Send {
    /// Entry name, without any path separator
    fn name(&self) -> &str;

    /// Whether the entry is itself a directory
    fn is_directory(&self) -> bool;

    /// Open the entry's content for reading
    fn open_read(&self) -> io::Result<Box<dyn Read + '_>>;
}

impl fmt::Debug for dyn FileInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileInfo")
            .field("name", &self.name())
            .field("is_directory", &self.is_directory())
            .finish()
    }
}

/// Result of listing a directory
#[derive(Debug)]
pub enum DirectoryContents {
    /// The directory does not exist
    NotFound,
    /// The directory exists; entries in listing order
    Found(Vec<Box<dyn FileInfo>>),
}

impl DirectoryContents {
    pub fn exists(&self) -> bool {
        matches!(self, DirectoryContents::Found(_))
    }
}

/// Directory listing capability, rooted at a single directory
#[cfg_attr(test, mockall::automock)]
pub trait FileProvider: Send + Sync {
    /// List the immediate entries of the root directory.
    ///
    /// A missing directory is reported as [`DirectoryContents::NotFound`],
    /// not as an error; errors are reserved for I/O failures.
    fn directory_contents(&self) -> io::Result<DirectoryContents>;
}

/// Provider over a directory on the local filesystem
#[derive(Debug, Clone)]
pub struct PhysicalFileProvider {
    root: PathBuf,
}

impl PhysicalFileProvider {
    /// Create a provider rooted at `root`. The directory is not touched
    /// until it is listed.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FileProvider for PhysicalFileProvider {
    fn directory_contents(&self) -> io::Result<DirectoryContents> {
        let read_dir = match fs::read_dir(&self.root) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(DirectoryContents::NotFound)
            }
            Err(e) => return Err(e),
        };

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry?;
            let path = entry.path();
            // Follow symlinks: orchestrators mount keys as links into a
            // timestamped data directory.
            let is_directory = match fs::metadata(&path) {
                Ok(metadata) => metadata.is_dir(),
                Err(_) => entry.file_type()?.is_dir(),
            };
            entries.push(PhysicalFileInfo {
                name: entry.file_name().to_string_lossy().into_owned(),
                path,
                is_directory,
            });
        }

        // read_dir order is platform dependent
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(DirectoryContents::Found(
            entries
                .into_iter()
                .map(|e| Box::new(e) as Box<dyn FileInfo>)
                .collect(),
        ))
    }
}

/// Entry of a [`PhysicalFileProvider`] listing
#[derive(Debug, Clone)]
pub struct PhysicalFileInfo {
    name: String,
    path: PathBuf,
    is_directory: bool,
}

impl FileInfo for PhysicalFileInfo {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_directory(&self) -> bool {
        self.is_directory
    }

    fn open_read(&self) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(fs::File::open(&self.path)?))
    }
}

/// What a [`MemoryFileInfo`] yields when opened
#[derive(Debug, Clone)]
enum MemoryContent {
    Bytes(Vec<u8>),
    Directory,
    Fails(io::ErrorKind),
}

/// Entry of a [`MemoryFileProvider`]
#[derive(Debug, Clone)]
pub struct MemoryFileInfo {
    name: String,
    content: MemoryContent,
}

impl MemoryFileInfo {
    /// A regular file with the given content
    pub fn file(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: MemoryContent::Bytes(content.into()),
        }
    }

    /// A nested directory entry
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: MemoryContent::Directory,
        }
    }

    /// A file whose open fails with `kind`
    pub fn failing(name: impl Into<String>, kind: io::ErrorKind) -> Self {
        Self {
            name: name.into(),
            content: MemoryContent::Fails(kind),
        }
    }
}

impl FileInfo for MemoryFileInfo {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_directory(&self) -> bool {
        matches!(self.content, MemoryContent::Directory)
    }

    fn open_read(&self) -> io::Result<Box<dyn Read + '_>> {
        match &self.content {
            MemoryContent::Bytes(bytes) => Ok(Box::new(bytes.as_slice())),
            MemoryContent::Directory => Err(io::Error::other(format!(
                "'{}' is a directory",
                self.name
            ))),
            MemoryContent::Fails(kind) => Err(io::Error::new(
                *kind,
                format!("cannot open '{}'", self.name),
            )),
        }
    }
}

/// In-memory directory
///
/// Entries are listed in insertion order, which lets tests pin the order a
/// provider sees them in.
#[derive(Debug, Clone)]
pub struct MemoryFileProvider {
    entries: Option<Vec<MemoryFileInfo>>,
}

impl MemoryFileProvider {
    /// An existing, empty directory
    pub fn new() -> Self {
        Self {
            entries: Some(Vec::new()),
        }
    }

    /// A directory that does not exist
    pub fn missing() -> Self {
        Self { entries: None }
    }

    /// Add a file (builder pattern)
    pub fn with_file(self, name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.with_entry(MemoryFileInfo::file(name, content))
    }

    /// Add a nested directory (builder pattern)
    pub fn with_directory(self, name: impl Into<String>) -> Self {
        self.with_entry(MemoryFileInfo::directory(name))
    }

    /// Add any entry (builder pattern). Turns a missing directory into an
    /// existing one.
    pub fn with_entry(mut self, entry: MemoryFileInfo) -> Self {
        self.entries.get_or_insert_with(Vec::new).push(entry);
        self
    }
}

impl Default for MemoryFileProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FileProvider for MemoryFileProvider {
    fn directory_contents(&self) -> io::Result<DirectoryContents> {
        Ok(match &self.entries {
            None => DirectoryContents::NotFound,
            Some(entries) => DirectoryContents::Found(
                entries
                    .iter()
                    .cloned()
                    .map(|e| Box::new(e) as Box<dyn FileInfo>)
                    .collect(),
            ),
        })
    }
}

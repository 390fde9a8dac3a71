//! Image discovery.
//!
//! Finds the image files a contact sheet will show and groups them into
//! [`Section`]s. Filesystem access goes through the [`FileSource`] trait so
//! the grouping and ordering rules can be exercised without touching disk.
//!
//! ## Modes
//!
//! - **Flat** (`recurse = false`): one section holding the eligible files
//!   directly inside the root, in the order the filesystem lists them.
//!   Nested files are ignored at any depth.
//! - **Grouped** (`recurse = true`): one section per directory that holds at
//!   least one eligible file, in pre-order (root first, then depth-first).
//!   Directories without eligible files produce no section.
//!
//! Nothing is sorted. The enumeration order of the [`FileSource`] is the
//! order of the sheet.
//!
//! ## Eligible files
//!
//! A file is eligible when its name ends in one of [`SUPPORTED_EXTENSIONS`],
//! compared case-insensitively.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("The folder path '{0}' does not exist or is not a directory")]
    RootNotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub const SUPPORTED_EXTENSIONS: &[&str] =
    &[".png", ".jpg", ".jpeg", ".gif", ".tiff", ".webp", ".bmp"];

/// Regular files found directly inside one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirListing {
    pub dir: PathBuf,
    pub files: Vec<String>,
}

/// Filesystem capability used by discovery.
pub trait FileSource {
    /// Whether `path` exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Regular files directly inside `dir`, in listing order.
    fn list_dir(&self, dir: &Path) -> io::Result<DirListing>;

    /// Every directory under `root` (root included) in pre-order, each with
    /// its regular files in listing order.
    fn walk(&self, root: &Path) -> io::Result<Vec<DirListing>>;
}

/// [`FileSource`] backed by the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSource;

impl FileSource for FsSource {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_dir(&self, dir: &Path) -> io::Result<DirListing> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            // follows symlinks, same as a plain `is_file` check on the path
            if entry.path().is_file() {
                files.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(DirListing {
            dir: dir.to_path_buf(),
            files,
        })
    }

    fn walk(&self, root: &Path) -> io::Result<Vec<DirListing>> {
        // walkdir yields a directory before its contents and finishes a
        // subtree before moving to the next sibling, so the order in which
        // directory entries appear is already pre-order. Files of a directory
        // can be interleaved with its subtrees; they are attached to their
        // parent's listing by path.
        //
        // Symlinked directories are skipped, not descended into. Symlinked
        // files count as files.
        let mut listings: Vec<DirListing> = Vec::new();

        for entry in WalkDir::new(root).follow_links(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(e.into()),
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {e}", root.display());
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                listings.push(DirListing {
                    dir: entry.path().to_path_buf(),
                    files: Vec::new(),
                });
            } else if entry.path().is_file() {
                let parent = entry.path().parent().unwrap_or(root);
                let name = entry.file_name().to_string_lossy().into_owned();
                if let Some(listing) = listings.iter_mut().rev().find(|l| l.dir == parent) {
                    listing.files.push(name);
                }
            }
        }

        Ok(listings)
    }
}

/// A discovered image file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageItem {
    /// Directory the file lives in.
    pub dir: PathBuf,
    pub file_name: String,
}

impl ImageItem {
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    /// File name without its final extension.
    pub fn stem(&self) -> String {
        Path::new(&self.file_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file_name.clone())
    }
}

/// Images sharing one directory, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub dir: PathBuf,
    /// Root's own base name when this section is the root, otherwise the
    /// directory relative to the root.
    pub display_name: String,
    /// Directory relative to the root; empty for the root itself.
    pub relative_dir: PathBuf,
    pub items: Vec<ImageItem>,
}

impl Section {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Result of scanning a root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    pub root: PathBuf,
    /// Whether sections come from a recursive walk.
    pub grouped: bool,
    pub sections: Vec<Section>,
    /// Item count across all sections.
    pub total: usize,
}

impl Discovery {
    pub fn section_sizes(&self) -> Vec<usize> {
        self.sections.iter().map(Section::len).collect()
    }
}

/// Whether a file name carries one of the supported image extensions.
pub fn is_supported_image(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    SUPPORTED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Discover images under `root`.
pub fn discover(
    source: &impl FileSource,
    root: &Path,
    recurse: bool,
) -> Result<Discovery, DiscoveryError> {
    if !source.is_dir(root) {
        return Err(DiscoveryError::RootNotFound(root.to_path_buf()));
    }

    let sections: Vec<Section> = if recurse {
        source
            .walk(root)?
            .into_iter()
            .map(|listing| build_section(root, listing))
            .filter(|section| !section.is_empty())
            .collect()
    } else {
        vec![build_section(root, source.list_dir(root)?)]
    };

    let total = sections.iter().map(Section::len).sum();
    debug!(
        "Discovered {total} images in {} sections under {}",
        sections.len(),
        root.display()
    );

    Ok(Discovery {
        root: root.to_path_buf(),
        grouped: recurse,
        sections,
        total,
    })
}

fn build_section(root: &Path, listing: DirListing) -> Section {
    let DirListing { dir, files } = listing;
    let items = files
        .into_iter()
        .filter(|name| is_supported_image(name))
        .map(|file_name| ImageItem {
            dir: dir.clone(),
            file_name,
        })
        .collect();

    let (display_name, relative_dir) = if dir == root {
        (root_display_name(root), PathBuf::new())
    } else {
        let rel = dir.strip_prefix(root).unwrap_or(&dir).to_path_buf();
        (rel.to_string_lossy().into_owned(), rel)
    };

    Section {
        dir,
        display_name,
        relative_dir,
        items,
    }
}

/// Base name of the root, or the path as given when it has none (`.`, `/`).
fn root_display_name(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.to_string_lossy().into_owned())
}

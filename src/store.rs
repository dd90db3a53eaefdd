use std::{
    fmt,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use tracing::info;

use crate::{
    error::{Result, ViewerError},
    fs_utils::{collect_images, is_supported_image},
};

/// Location of a supported raster image that was readable when selected.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImagePath(PathBuf);

impl ImagePath {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let metadata = fs::metadata(&path).map_err(|err| ViewerError::invalid_path(&path, err))?;
        if !metadata.is_file() {
            return Err(ViewerError::invalid_path(&path, "not a regular file"));
        }
        if !is_supported_image(&path) {
            return Err(ViewerError::invalid_path(&path, "unsupported image format"));
        }
        fs::File::open(&path).map_err(|err| ViewerError::invalid_path(&path, err))?;
        Ok(Self(path))
    }

    /// Directory scans already filtered on file type and extension.
    fn scanned(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for ImagePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl From<ImagePath> for PathBuf {
    fn from(path: ImagePath) -> Self {
        path.0
    }
}

impl fmt::Display for ImagePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Ordered, immutable list of images. Clones share the same storage, so a
/// running slideshow can hold on to the set it was started with.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImageSet {
    paths: Arc<[ImagePath]>,
}

impl ImageSet {
    pub fn new(paths: Vec<ImagePath>) -> Self {
        Self { paths: paths.into() }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Wraps `index` around the set length.
    pub fn get_wrapped(&self, index: usize) -> Option<&ImagePath> {
        if self.paths.is_empty() {
            return None;
        }
        self.paths.get(index % self.paths.len())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImagePath> {
        self.paths.iter()
    }
}

impl From<Vec<ImagePath>> for ImageSet {
    fn from(paths: Vec<ImagePath>) -> Self {
        Self::new(paths)
    }
}

#[derive(Default)]
pub struct ImageStore {
    set: ImageSet,
    cursor: usize,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_single(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = ImagePath::new(path)?;
        self.replace(ImageSet::new(vec![path]));
        Ok(())
    }

    /// Replaces the set with the supported images directly inside `dir`.
    /// Returns how many were found; zero is not an error.
    pub fn set_folder(&mut self, dir: &Path) -> Result<usize> {
        let paths: Vec<_> = collect_images(dir)?
            .into_iter()
            .map(ImagePath::scanned)
            .collect();
        info!("found {} images in {}", paths.len(), dir.display());
        self.replace(ImageSet::new(paths));
        Ok(self.set.len())
    }

    /// Installs a set that was validated elsewhere.
    pub fn replace(&mut self, set: ImageSet) {
        self.set = set;
        self.cursor = 0;
    }

    pub fn current_path(&self, index: usize) -> Result<&ImagePath> {
        self.set.get_wrapped(index).ok_or(ViewerError::EmptySet)
    }

    pub fn current(&self) -> Result<&ImagePath> {
        self.current_path(self.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn image_set(&self) -> &ImageSet {
        &self.set
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}

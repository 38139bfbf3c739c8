//! Static assets addressed by name rather than by filesystem path.
//!
//! Responses that prepend data to a bundled page or script resolve the
//! asset once, when they are constructed, and copy its bytes on send.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

/// A located asset. Owns everything needed to read it later.
#[derive(Debug, Clone)]
pub enum Resource {
    File(PathBuf),
    Embedded(&'static [u8]),
}

impl Resource {
    /// Copies the asset's bytes verbatim into `out`, returning the count.
    pub fn copy_to(&self, out: &mut dyn Write) -> io::Result<u64> {
        match self {
            Resource::File(path) => {
                let mut file = File::open(path)?;
                io::copy(&mut file, out)
            }
            Resource::Embedded(bytes) => {
                out.write_all(bytes)?;
                Ok(bytes.len() as u64)
            }
        }
    }
}

/// Resolves asset names.
pub trait Resources: Send + Sync {
    fn resolve(&self, name: &str) -> Option<Resource>;
}

/// Assets stored as files under a root directory.
#[derive(Debug, Clone)]
pub struct ResourceDir {
    root: PathBuf,
}

impl ResourceDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Joins `name` onto the root, refusing names that could leave it.
    pub fn path_for(&self, name: &str) -> Option<PathBuf> {
        let relative = Path::new(name.trim_start_matches('/'));
        let stays_inside = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));

        if !stays_inside || relative.as_os_str().is_empty() {
            return None;
        }

        Some(self.root.join(relative))
    }
}

impl Resources for ResourceDir {
    fn resolve(&self, name: &str) -> Option<Resource> {
        let path = self.path_for(name)?;
        path.is_file().then_some(Resource::File(path))
    }
}

/// Assets compiled into the binary, typically with `include_bytes!`.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedResources {
    assets: HashMap<&'static str, &'static [u8]>,
}

impl EmbeddedResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &'static str, bytes: &'static [u8]) -> Self {
        self.assets.insert(name, bytes);
        self
    }
}

impl Resources for EmbeddedResources {
    fn resolve(&self, name: &str) -> Option<Resource> {
        self.assets
            .get(name.trim_start_matches('/'))
            .copied()
            .map(Resource::Embedded)
    }
}

/// Tries each source in order; the first that resolves wins.
pub struct LayeredResources {
    layers: Vec<Box<dyn Resources>>,
}

impl LayeredResources {
    pub fn new(layers: Vec<Box<dyn Resources>>) -> Self {
        Self { layers }
    }
}

impl Resources for LayeredResources {
    fn resolve(&self, name: &str) -> Option<Resource> {
        self.layers.iter().find_map(|layer| layer.resolve(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traversal_is_refused() {
        let dir = ResourceDir::new("/srv/assets");
        assert!(dir.path_for("../etc/passwd").is_none());
        assert!(dir.path_for("a/../../b").is_none());
        assert!(dir.path_for("").is_none());
        assert_eq!(
            dir.path_for("/js/app.js"),
            Some(PathBuf::from("/srv/assets/js/app.js"))
        );
    }

    #[test]
    fn embedded_lookup_ignores_leading_slash() {
        let res = EmbeddedResources::new().with("page.html", b"<p>hi</p>");
        let mut out = Vec::new();
        res.resolve("/page.html").unwrap().copy_to(&mut out).unwrap();
        assert_eq!(out, b"<p>hi</p>");
        assert!(res.resolve("other.html").is_none());
    }

    #[test]
    fn layers_fall_through_in_order() {
        let first: Box<dyn Resources> = Box::new(EmbeddedResources::new().with("a", b"first"));
        let second: Box<dyn Resources> =
            Box::new(EmbeddedResources::new().with("a", b"second").with("b", b"only"));
        let layered = LayeredResources::new(vec![first, second]);
        let mut out = Vec::new();
        layered.resolve("a").unwrap().copy_to(&mut out).unwrap();
        layered.resolve("b").unwrap().copy_to(&mut out).unwrap();
        assert_eq!(out, b"firstonly");
    }
}

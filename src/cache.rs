use std::{collections::HashMap, sync::Arc};

use tracing::debug;

use crate::{
    ast::Path,
    parser::{ParseError, parse},
    resolver::{Resolution, resolve},
    scope::Scope,
    value::Value,
};

/// A parsed path, cheap to clone and share.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledPath {
    source: Arc<str>,
    path: Arc<Path>,
}

impl CompiledPath {
    pub fn compile(source: &str) -> Result<Self, ParseError> {
        Ok(CompiledPath {
            source: Arc::from(source),
            path: Arc::new(parse(source)?),
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn resolve<'a>(&self, scope: &Scope, document: &'a Value) -> Resolution<'a> {
        resolve(&self.path, scope, document)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    /// Every miss is one parser run.
    pub misses: u64,
}

/// Memoizes compiled paths by their exact source text.
///
/// Entries are never evicted; path texts are expected to come from a fixed
/// set of templates. Parse failures are not cached. The cache is owned by
/// whoever creates it, so independent documents never share entries unless
/// they are handed the same cache.
///
/// # Examples
///
/// ```
/// use slotpath::PathCache;
///
/// let mut cache = PathCache::new();
/// let first = cache.compile("a.b").unwrap();
/// let second = cache.compile("a.b").unwrap();
///
/// assert_eq!(first, second);
/// assert_eq!(cache.stats().misses, 1);
/// assert_eq!(cache.stats().hits, 1);
/// ```
#[derive(Debug, Default)]
pub struct PathCache {
    entries: HashMap<String, CompiledPath>,
    stats: CacheStats,
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compile(&mut self, source: &str) -> Result<CompiledPath, ParseError> {
        if let Some(compiled) = self.entries.get(source) {
            self.stats.hits += 1;
            return Ok(compiled.clone());
        }

        self.stats.misses += 1;
        debug!(path = source, "compiling path");
        let compiled = CompiledPath::compile(source)?;
        self.entries.insert(source.to_string(), compiled.clone());
        Ok(compiled)
    }

    pub fn contains(&self, source: &str) -> bool {
        self.entries.contains_key(source)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats = CacheStats::default();
    }
}

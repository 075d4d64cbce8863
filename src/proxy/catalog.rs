//! Catalog of proxy types known by name
//!
//! Filter tokens that are not reserved keywords are looked up here by their
//! fully-qualified type name. Hosts register constructors at startup; the
//! catalog never holds filter instances, only the means to build them.
//!
//! Non-filter components are registered too, so that naming one of them as a
//! filter can be told apart from naming something unknown.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::chain::Direction;
use super::comments::CommentSource;
use super::filter::{EchoFilter, Filter, FilterOutput, NullFilter};
use crate::error::{Result, filter};
use crate::properties::Properties;

pub const NULL_FILTER_TYPE: &str = "net.grinder.tools.tcpproxy.NullFilter";
pub const ECHO_FILTER_TYPE: &str = "net.grinder.tools.tcpproxy.EchoFilter";
pub const COMMENT_SOURCE_TYPE: &str = "net.grinder.tools.tcpproxy.CommentSourceImplementation";
pub const CONNECTION_CACHE_TYPE: &str = "net.grinder.tools.tcpproxy.ConnectionCache";

/// Collaborators handed to every filter constructor
#[derive(Debug, Clone)]
pub struct FilterDeps {
    pub output: FilterOutput,
    pub comments: Arc<dyn CommentSource>,
    /// Properties loaded with `-properties`
    pub properties: Properties,
    pub direction: Direction,
}

impl FilterDeps {
    /// The same collaborators, for the other chain
    #[must_use]
    pub fn for_direction(&self, direction: Direction) -> Self {
        Self {
            direction,
            ..self.clone()
        }
    }
}

pub type FilterFactory = Arc<dyn Fn(&FilterDeps) -> Result<Box<dyn Filter>> + Send + Sync>;

#[derive(Clone)]
pub enum CatalogEntry {
    Filter(FilterFactory),
    Component { description: String },
}

impl fmt::Debug for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogEntry::Filter(_) => f.write_str("Filter(..)"),
            CatalogEntry::Component { description } => f
                .debug_struct("Component")
                .field("description", description)
                .finish(),
        }
    }
}

#[derive(Debug, Default)]
pub struct TypeCatalog {
    entries: HashMap<String, CatalogEntry>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog holding the built-in filters and components.
    pub fn with_builtins() -> Result<Self> {
        let mut catalog = Self::new();
        catalog.register_builtins()?;
        Ok(catalog)
    }

    fn register(&mut self, name: String, entry: CatalogEntry) -> Result<()> {
        if self.entries.contains_key(&name) {
            return Err(filter::duplicate(name));
        }
        self.entries.insert(name, entry);
        Ok(())
    }

    /// Register a filter constructor under `name`.
    ///
    /// # Errors
    ///
    /// Returns `GrinderError::DuplicateFilterType` if `name` is taken.
    pub fn register_filter<F>(&mut self, name: impl Into<String>, factory: F) -> Result<()>
    where
        F: Fn(&FilterDeps) -> Result<Box<dyn Filter>> + Send + Sync + 'static,
    {
        self.register(name.into(), CatalogEntry::Filter(Arc::new(factory)))
    }

    /// Register a type that exists but is not a filter.
    pub fn register_component(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<()> {
        self.register(
            name.into(),
            CatalogEntry::Component {
                description: description.into(),
            },
        )
    }

    /// Register the null and echo filters under their keywords and type
    /// names, plus the built-in non-filter components.
    pub fn register_builtins(&mut self) -> Result<()> {
        macro_rules! register_filters {
            ($($name:expr => $factory:expr),* $(,)?) => {
                $(self.register_filter($name, $factory)?;)*
            };
        }

        register_filters![
            "NONE" => |_: &FilterDeps| Ok(Box::new(NullFilter) as Box<dyn Filter>),
            NULL_FILTER_TYPE => |_: &FilterDeps| Ok(Box::new(NullFilter) as Box<dyn Filter>),
            "ECHO" => |deps: &FilterDeps| Ok(Box::new(EchoFilter::new(deps.output.clone())) as Box<dyn Filter>),
            ECHO_FILTER_TYPE => |deps: &FilterDeps| Ok(Box::new(EchoFilter::new(deps.output.clone())) as Box<dyn Filter>),
        ];

        self.register_component(COMMENT_SOURCE_TYPE, "comment source")?;
        self.register_component(CONNECTION_CACHE_TYPE, "connection cache")?;
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.get(name)
    }

    /// Check that `name` is a registered filter without building it.
    pub fn check_filter(&self, name: &str) -> Result<()> {
        match self.lookup(name) {
            Some(CatalogEntry::Filter(_)) => Ok(()),
            Some(CatalogEntry::Component { .. }) => Err(filter::type_mismatch(name)),
            None => Err(filter::class_not_found(name)),
        }
    }

    /// Build the filter registered as `name`.
    pub fn instantiate(&self, name: &str, deps: &FilterDeps) -> Result<Box<dyn Filter>> {
        match self.lookup(name) {
            Some(CatalogEntry::Filter(factory)) => factory(deps),
            Some(CatalogEntry::Component { .. }) => Err(filter::type_mismatch(name)),
            None => Err(filter::class_not_found(name)),
        }
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

//! Filter chains, one per direction
//!
//! Tokens are recorded in command line order and resolved in one go: every
//! token is checked against the catalog before any filter is built, so a bad
//! token yields no chain at all.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use super::catalog::{FilterDeps, TypeCatalog};
use super::connection::ConnectionDetails;
use super::filter::Filter;
use crate::error::Result;

/// Direction of the proxied stream a chain applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Request,
    Response,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Request => "request",
            Direction::Response => "response",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `-requestfilter` / `-responsefilter` argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FilterToken {
    /// `NONE`
    None,
    /// `ECHO`
    Echo,
    /// A fully-qualified type name
    Custom(String),
}

impl FilterToken {
    /// Keywords are matched exactly; `none` is a type name, not a keyword.
    pub fn parse(token: &str) -> Self {
        match token {
            "NONE" => FilterToken::None,
            "ECHO" => FilterToken::Echo,
            other => FilterToken::Custom(other.to_string()),
        }
    }

    /// Name the token is registered under in the catalog
    pub fn catalog_name(&self) -> &str {
        match self {
            FilterToken::None => "NONE",
            FilterToken::Echo => "ECHO",
            FilterToken::Custom(name) => name,
        }
    }
}

impl From<&str> for FilterToken {
    fn from(token: &str) -> Self {
        Self::parse(token)
    }
}

impl fmt::Display for FilterToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.catalog_name())
    }
}

/// Ordered filter tokens for one direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChain {
    direction: Direction,
    tokens: Vec<FilterToken>,
}

impl FilterChain {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            tokens: Vec::new(),
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn add(&mut self, token: impl Into<FilterToken>) {
        self.tokens.push(token.into());
    }

    pub fn tokens(&self) -> &[FilterToken] {
        &self.tokens
    }

    /// Build the composed filter. An empty chain resolves to a single echo
    /// filter.
    pub fn resolve(&self, catalog: &TypeCatalog, deps: &FilterDeps) -> Result<ComposedFilter> {
        let default = [FilterToken::Echo];
        let tokens: &[FilterToken] = if self.tokens.is_empty() {
            &default
        } else {
            &self.tokens
        };

        for token in tokens {
            catalog.check_filter(token.catalog_name())?;
        }

        let deps = deps.for_direction(self.direction);
        let mut stages = Vec::with_capacity(tokens.len());
        for (index, token) in tokens.iter().enumerate() {
            let key = format!("{}{}", self.direction, index + 1);
            let filter = catalog.instantiate(token.catalog_name(), &deps)?;
            debug!(%key, filter = filter.name(), "resolved proxy filter");
            stages.push(ResolvedFilter { key, filter });
        }

        Ok(ComposedFilter {
            direction: self.direction,
            stages,
        })
    }
}

/// A filter instance with its per-position key (`request1`, `response2`, ...)
#[derive(Debug)]
pub struct ResolvedFilter {
    pub key: String,
    pub filter: Box<dyn Filter>,
}

/// Resolved filters of one direction, invoked in order
#[derive(Debug)]
pub struct ComposedFilter {
    direction: Direction,
    stages: Vec<ResolvedFilter>,
}

impl ComposedFilter {
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.key.as_str()).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.filter.name()).collect()
    }
}

impl Filter for ComposedFilter {
    fn name(&self) -> &str {
        "CompositeFilter"
    }

    fn connection_opened(&mut self, connection: &ConnectionDetails) -> Result<()> {
        for stage in &mut self.stages {
            stage.filter.connection_opened(connection)?;
        }
        Ok(())
    }

    fn connection_closed(&mut self, connection: &ConnectionDetails) -> Result<()> {
        for stage in &mut self.stages {
            stage.filter.connection_closed(connection)?;
        }
        Ok(())
    }

    /// Each stage sees the output of the one before it.
    fn handle(&mut self, connection: &ConnectionDetails, buffer: &[u8]) -> Result<Option<Vec<u8>>> {
        let mut current: Option<Vec<u8>> = None;
        for stage in &mut self.stages {
            let input = current.as_deref().unwrap_or(buffer);
            if let Some(changed) = stage.filter.handle(connection, input)? {
                current = Some(changed);
            }
        }
        Ok(current)
    }
}

impl fmt::Display for ComposedFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GrinderError;
    use crate::proxy::catalog::tests::deps;
    use crate::proxy::catalog::{CONNECTION_CACHE_TYPE, NULL_FILTER_TYPE};
    use crate::proxy::filter::FilterOutput;
    use crate::proxy::filter::tests::{SharedBuffer, connection};

    #[derive(Debug)]
    struct Append(&'static str);

    impl Filter for Append {
        fn name(&self) -> &str {
            self.0
        }

        fn handle(&mut self, _connection: &ConnectionDetails, buffer: &[u8]) -> Result<Option<Vec<u8>>> {
            let mut out = buffer.to_vec();
            out.extend_from_slice(self.0.as_bytes());
            Ok(Some(out))
        }
    }

    fn catalog() -> TypeCatalog {
        let mut catalog = TypeCatalog::with_builtins().unwrap();
        catalog
            .register_filter("test.A", |_: &FilterDeps| Ok(Box::new(Append("A")) as Box<dyn Filter>))
            .unwrap();
        catalog
            .register_filter("test.B", |_: &FilterDeps| Ok(Box::new(Append("B")) as Box<dyn Filter>))
            .unwrap();
        catalog
    }

    #[test]
    fn test_keyword_parsing_is_exact() {
        assert_eq!(FilterToken::parse("NONE"), FilterToken::None);
        assert_eq!(FilterToken::parse("ECHO"), FilterToken::Echo);
        assert_eq!(FilterToken::parse("echo"), FilterToken::Custom("echo".to_string()));
    }

    #[test]
    fn test_empty_chain_resolves_to_one_echo_filter() {
        let chain = FilterChain::new(Direction::Request);
        let composed = chain.resolve(&catalog(), &deps()).unwrap();
        assert_eq!(composed.names(), vec!["EchoFilter"]);
        assert_eq!(composed.keys(), vec!["request1"]);
    }

    #[test]
    fn test_none_output_equals_input() {
        let mut chain = FilterChain::new(Direction::Response);
        chain.add("NONE");
        let mut composed = chain.resolve(&catalog(), &deps()).unwrap();

        let input = b"HTTP/1.1 200 OK\r\n\r\n";
        let output = composed.handle(&connection(), input).unwrap();
        assert_eq!(output.as_deref().unwrap_or(input), input);
    }

    #[test]
    fn test_order_and_keys_follow_tokens() {
        let mut chain = FilterChain::new(Direction::Response);
        chain.add("test.A");
        chain.add(NULL_FILTER_TYPE);
        chain.add("test.B");
        let mut composed = chain.resolve(&catalog(), &deps()).unwrap();

        assert_eq!(composed.keys(), vec!["response1", "response2", "response3"]);
        assert_eq!(composed.to_string(), "A, NullFilter, B");
        let output = composed.handle(&connection(), b"x").unwrap();
        assert_eq!(output, Some(b"xAB".to_vec()));
    }

    #[test]
    fn test_same_filter_twice_gets_two_instances() {
        let mut chain = FilterChain::new(Direction::Request);
        chain.add("test.A");
        chain.add("test.A");
        let mut composed = chain.resolve(&catalog(), &deps()).unwrap();
        assert_eq!(composed.len(), 2);
        assert_eq!(composed.handle(&connection(), b"").unwrap(), Some(b"AA".to_vec()));
    }

    #[test]
    fn test_type_mismatch_produces_no_chain() {
        let mut chain = FilterChain::new(Direction::Request);
        chain.add("ECHO");
        chain.add(CONNECTION_CACHE_TYPE);
        let err = chain.resolve(&catalog(), &deps()).unwrap_err();
        assert!(matches!(err, GrinderError::FilterTypeMismatch { .. }));
    }

    #[test]
    fn test_bad_token_is_reported_before_any_filter_is_built() {
        let buffer = SharedBuffer::default();
        let mut deps = deps();
        deps.output = FilterOutput::new(buffer.clone());

        let mut catalog = catalog();
        catalog
            .register_filter("test.Noisy", |deps: &FilterDeps| {
                deps.output.write_all(b"built\n")?;
                Ok(Box::new(Append("N")) as Box<dyn Filter>)
            })
            .unwrap();

        let mut chain = FilterChain::new(Direction::Request);
        chain.add("test.Noisy");
        chain.add("com.example.Missing");

        let err = chain.resolve(&catalog, &deps).unwrap_err();
        assert!(matches!(err, GrinderError::FilterClassNotFound { .. }));
        assert_eq!(buffer.contents(), "");
    }

    #[test]
    fn test_connection_events_reach_every_stage() {
        let buffer = SharedBuffer::default();
        let mut deps = deps();
        deps.output = FilterOutput::new(buffer.clone());

        let mut chain = FilterChain::new(Direction::Request);
        chain.add("ECHO");
        chain.add("ECHO");
        let mut composed = chain.resolve(&catalog(), &deps).unwrap();
        composed.connection_opened(&connection()).unwrap();

        assert_eq!(buffer.contents().matches("opened").count(), 2);
    }
}

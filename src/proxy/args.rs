//! TCP proxy command line options
//!
//! Option names are matched case-insensitively, as the proxy always has.
//! Filter arguments keep their case.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::chain::{Direction, FilterChain};
use super::connection::{ConnectionDetails, EndPoint};
use crate::common::path_normalizer::resolve_against;
use crate::error::{Result, resource, usage};
use crate::properties::{self, Properties};

pub const HTTP_REQUEST_FILTER_TYPE: &str = "net.grinder.plugin.http.tcpproxyfilter.HTTPRequestFilter";
pub const HTTP_RESPONSE_FILTER_TYPE: &str =
    "net.grinder.plugin.http.tcpproxyfilter.HTTPResponseFilter";

pub const DEFAULT_LOCAL_HOST: &str = "localhost";
pub const DEFAULT_LOCAL_PORT: u16 = 8001;
pub const DEFAULT_REMOTE_HOST: &str = "localhost";
pub const DEFAULT_REMOTE_PORT: u16 = 7001;

/// Script language produced by the HTTP recorder
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScriptFlavour {
    #[default]
    OldJython,
    Jython,
    Clojure,
    /// A user supplied XSLT style sheet
    StyleSheet(PathBuf),
}

impl ScriptFlavour {
    fn parse(value: &str) -> Self {
        match value {
            "oldjython" => ScriptFlavour::OldJython,
            "jython" => ScriptFlavour::Jython,
            "clojure" => ScriptFlavour::Clojure,
            other => ScriptFlavour::StyleSheet(PathBuf::from(other)),
        }
    }
}

impl fmt::Display for ScriptFlavour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptFlavour::OldJython => write!(f, "oldjython"),
            ScriptFlavour::Jython => write!(f, "jython"),
            ScriptFlavour::Clojure => write!(f, "clojure"),
            ScriptFlavour::StyleSheet(path) => write!(f, "style sheet {}", path.display()),
        }
    }
}

/// How the proxy listens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyMode {
    HttpProxy,
    PortForwarder { ssl: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyOptions {
    pub request_filters: FilterChain,
    pub response_filters: FilterChain,
    pub http: Option<ScriptFlavour>,
    pub local: EndPoint,
    pub remote: EndPoint,
    pub port_forwarding: bool,
    pub ssl: bool,
    pub key_store: Option<PathBuf>,
    pub key_store_password: Option<String>,
    pub key_store_type: Option<String>,
    pub timeout: Duration,
    pub console: bool,
    pub colour: bool,
    pub properties_file: Option<PathBuf>,
    pub http_proxy: Option<EndPoint>,
    pub https_proxy: Option<EndPoint>,
}

impl Default for ProxyOptions {
    fn default() -> Self {
        Self {
            request_filters: FilterChain::new(Direction::Request),
            response_filters: FilterChain::new(Direction::Response),
            http: None,
            local: EndPoint::new(DEFAULT_LOCAL_HOST, DEFAULT_LOCAL_PORT),
            remote: EndPoint::new(DEFAULT_REMOTE_HOST, DEFAULT_REMOTE_PORT),
            port_forwarding: false,
            ssl: false,
            key_store: None,
            key_store_password: None,
            key_store_type: None,
            timeout: Duration::ZERO,
            console: false,
            colour: false,
            properties_file: None,
            http_proxy: None,
            https_proxy: None,
        }
    }
}

/// Cursor over the raw tokens
struct Tokens<'a, S> {
    args: &'a [S],
    position: usize,
}

impl<'a, S: AsRef<str>> Tokens<'a, S> {
    fn next(&mut self) -> Option<&'a str> {
        let token = self.args.get(self.position)?;
        self.position += 1;
        Some(token.as_ref())
    }

    fn peek(&self) -> Option<&'a str> {
        self.args.get(self.position).map(AsRef::as_ref)
    }

    fn value(&mut self, option: &str) -> Result<&'a str> {
        self.next().ok_or_else(|| usage::missing_argument(option))
    }

    fn port(&mut self, option: &str) -> Result<u16> {
        let value = self.value(option)?;
        value
            .parse()
            .map_err(|_| usage::not_a_number(option, value))
    }

    fn end_point(&mut self, option: &str) -> Result<EndPoint> {
        let host = self.value(option)?;
        let port = self.port(option)?;
        Ok(EndPoint::new(host, port))
    }
}

impl ProxyOptions {
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        let mut options = Self::default();
        let mut tokens = Tokens { args, position: 0 };

        while let Some(token) = tokens.next() {
            match token.to_ascii_lowercase().as_str() {
                "-requestfilter" => {
                    let name = tokens.value(token)?;
                    options.request_filters.add(name);
                }
                "-responsefilter" => {
                    let name = tokens.value(token)?;
                    options.response_filters.add(name);
                }
                "-http" => {
                    options.request_filters.add(HTTP_REQUEST_FILTER_TYPE);
                    options.response_filters.add(HTTP_RESPONSE_FILTER_TYPE);
                    let flavour = match tokens.peek() {
                        Some(value) if !value.starts_with('-') => {
                            tokens.next();
                            ScriptFlavour::parse(value)
                        }
                        _ => ScriptFlavour::default(),
                    };
                    options.http = Some(flavour);
                }
                "-localhost" => options.local.host = tokens.value(token)?.to_string(),
                "-localport" => options.local.port = tokens.port(token)?,
                "-remotehost" => {
                    options.remote.host = tokens.value(token)?.to_string();
                    options.port_forwarding = true;
                }
                "-remoteport" => {
                    options.remote.port = tokens.port(token)?;
                    options.port_forwarding = true;
                }
                "-ssl" => options.ssl = true,
                "-keystore" => options.key_store = Some(PathBuf::from(tokens.value(token)?)),
                "-keystorepassword" | "-storepass" => {
                    options.key_store_password = Some(tokens.value(token)?.to_string());
                }
                "-keystoretype" | "-storetype" => {
                    options.key_store_type = Some(tokens.value(token)?.to_string());
                }
                "-timeout" => {
                    let value = tokens.value(token)?;
                    let seconds: i64 = value
                        .parse()
                        .map_err(|_| usage::not_a_number(token, value))?;
                    let seconds = u64::try_from(seconds)
                        .map_err(|_| usage::invalid("Timeout must be non-negative."))?;
                    options.timeout = Duration::from_secs(seconds);
                }
                "-console" => options.console = true,
                "-colour" | "-color" => options.colour = true,
                "-properties" => {
                    options.properties_file = Some(PathBuf::from(tokens.value(token)?));
                }
                "-httpproxy" => options.http_proxy = Some(tokens.end_point(token)?),
                "-httpsproxy" => options.https_proxy = Some(tokens.end_point(token)?),
                "-initialtest" => {
                    let argument = tokens.next().unwrap_or("123");
                    return Err(usage::invalid(format!(
                        "-initialTest is no longer supported. Use -DHTTPPlugin.initialTest={argument} \
                         or the -properties option instead."
                    )));
                }
                _ => return Err(usage::unknown_option(token)),
            }
        }

        if options.https_proxy.is_none() {
            options.https_proxy.clone_from(&options.http_proxy);
        }
        if options.https_proxy.is_some() && options.port_forwarding {
            return Err(usage::invalid(
                "Routing through a HTTP/HTTPS proxy is not supported in port forwarding mode.",
            ));
        }

        Ok(options)
    }

    pub fn mode(&self) -> ProxyMode {
        if self.port_forwarding {
            ProxyMode::PortForwarder { ssl: self.ssl }
        } else {
            ProxyMode::HttpProxy
        }
    }

    /// Connection forwarded in port forwarding mode
    pub fn forwarded_connection(&self) -> ConnectionDetails {
        ConnectionDetails::new(self.local.clone(), self.remote.clone(), self.ssl)
    }

    /// Anchor relative `-properties` and `-keystore` paths at `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        for path in [&mut self.properties_file, &mut self.key_store].into_iter().flatten() {
            *path = resolve_against(base, path);
        }
    }

    /// Properties named by `-properties`, empty when the option was not given.
    pub fn load_filter_properties(&self) -> Result<Properties> {
        let Some(path) = &self.properties_file else {
            return Ok(Properties::new());
        };
        let bytes =
            std::fs::read(path).map_err(|_| resource::not_found(path.display().to_string()))?;
        properties::parse(&properties::decode_latin1(&bytes))
            .map_err(|e| usage::invalid(format!("{}: {e}", path.display())))
    }

    /// The banner logged when the proxy starts.
    pub fn startup_summary(&self, request_filters: &str, response_filters: &str) -> String {
        let mut summary = String::from("Initialising as ");
        summary.push_str(match self.mode() {
            ProxyMode::HttpProxy => "an HTTP/HTTPS proxy",
            ProxyMode::PortForwarder { ssl: true } => "an SSL port forwarder",
            ProxyMode::PortForwarder { ssl: false } => "a TCP port forwarder",
        });
        summary.push_str(" with the parameters:");
        summary.push_str(&format!("\n   Request filters:    {request_filters}"));
        summary.push_str(&format!("\n   Response filters:   {response_filters}"));
        summary.push_str(&format!("\n   Local address:      {}", self.local));
        if let Some(flavour) = &self.http {
            summary.push_str(&format!("\n   HTTP recording:     {flavour}"));
        }

        if self.port_forwarding {
            summary.push_str(&format!("\n   Remote address:     {}", self.remote));
        }
        if let Some(proxy) = &self.http_proxy {
            summary.push_str(&format!("\n   HTTP proxy:         {proxy}"));
        }
        if let Some(proxy) = &self.https_proxy {
            summary.push_str(&format!("\n   HTTPS proxy:        {proxy}"));
        }
        if let Some(key_store) = &self.key_store {
            summary.push_str(&format!("\n   Key store:          {}", key_store.display()));
            if let Some(password) = &self.key_store_password {
                let masked = "*".repeat(password.chars().count());
                summary.push_str(&format!("\n   Key store password: {masked}"));
            }
            if let Some(store_type) = &self.key_store_type {
                summary.push_str(&format!("\n   Key store type:     {store_type}"));
            }
        }
        summary
    }
}

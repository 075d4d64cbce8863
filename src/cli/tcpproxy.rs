use clap::Parser;

/// Arguments for the tcpproxy command
///
/// Tokens are passed through untouched and parsed with the proxy's own
/// single-dash, case-insensitive option syntax.
#[derive(Parser, Debug)]
#[command(after_help = "PROXY OPTIONS:\n  \
                   -requestfilter <filter>       Add a request filter (repeatable)\n  \
                   -responsefilter <filter>      Add a response filter (repeatable)\n  \
                   -http [oldjython|jython|clojure|<stylesheet>]\n  \
                   -localhost <host>             Default localhost\n  \
                   -localport <port>             Default 8001\n  \
                   -remotehost <host>            Forward to <host> instead of proxying\n  \
                   -remoteport <port>            Default 7001\n  \
                   -ssl                          Use SSL when port forwarding\n  \
                   -keystore <file> -keystorepassword <pass> -keystoretype <type>\n  \
                   -timeout <seconds>            Listen timeout\n  \
                   -console -colour\n  \
                   -properties <file>            Properties passed to the filters\n  \
                   -httpproxy <host> <port>      Chain through an HTTP proxy\n  \
                   -httpsproxy <host> <port>     Chain through an HTTPS proxy\n\n\
                   <filter> is NONE, ECHO or the name of a registered filter type. The default is ECHO.\n\n\
                   EXAMPLES:\n    grinderctl tcpproxy -requestfilter NONE -responsefilter ECHO")]
pub struct TcpProxyArgs {
    /// Proxy options
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "OPTIONS")]
    pub tokens: Vec<String>,
}

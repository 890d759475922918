use canurl::{Mode, ParseOptions, ResolveOptions, parse, parse_with, resolve, version};

fn main() {
    // Parse a simple URL
    let url = parse("https://example.com:8080/path?query=value#hash", None)
        .expect("Failed to parse URL");

    println!("URL: {}", url.href()); // https://example.com:8080/path?query=value#hash
    println!("Protocol: {}", url.protocol()); // https:
    println!("Host: {}", url.host()); // example.com:8080
    println!("Port: {}", url.port()); // 8080
    println!("Pathname: {}", url.pathname()); // /path
    println!("Search: {}", url.search()); // ?query=value
    println!("Hash: {}", url.hash()); // #hash

    // Resolve a relative reference against a base
    let url = resolve("../img/logo.svg", Some("https://example.com/docs/page"), ResolveOptions::default())
        .expect("Failed to resolve URL");
    println!("Resolved: {}", url.href()); // https://example.com/img/logo.svg

    // The legacy mode keeps older parsing rules
    let options = ParseOptions {
        mode: Mode::Legacy,
        ..ParseOptions::default()
    };
    let url = parse_with("http://0x7f.1/", None, options).expect("Failed to parse URL");
    println!("Legacy ({}): {}", version(Mode::Legacy), url.href()); // http://0x7f.1/
}

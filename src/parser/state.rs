/// URL parser state machine states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Expecting the first scheme character
    SchemeStart,
    /// Accumulating scheme characters up to `:`
    Scheme,
    /// No scheme found; fall back to the base URL
    NoScheme,
    /// Special scheme matching the base scheme: authority or relative
    SpecialRelativeOrAuthority,
    /// Non-special scheme: `//` authority or a path
    PathOrAuthority,
    /// Relative reference against the base
    Relative,
    /// Relative reference starting with a slash
    RelativeSlash,
    /// Consuming the `//` of a special-scheme authority
    SpecialAuthoritySlashes,
    /// Skipping extra slashes before a special-scheme authority
    SpecialAuthorityIgnoreSlashes,
    /// Authority section (userinfo detection)
    Authority,
    /// Host section, port permitted
    Host,
    /// Host section, port not permitted
    Hostname,
    /// Port digits
    Port,
    /// `file:` scheme entry
    File,
    /// After `file:/`
    FileSlash,
    /// `file://` host (drive letters, localhost)
    FileHost,
    /// Start of a hierarchical path
    PathStart,
    /// Hierarchical path segments
    Path,
    /// Opaque path of a non-special scheme
    OpaquePath,
    /// Query after `?`
    Query,
    /// Fragment after `#`
    Fragment,
}

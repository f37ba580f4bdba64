use std::fmt;

/// Maven-style coordinates parsed from a `runtime_deps` entry.
///
/// The manifest only carries these as strings; resolution happens in an
/// external collaborator. Parsing is offered so consumers can reject
/// malformed entries before handing them off.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub group: String,
    pub artifact: String,
    pub version: String,
}

impl Coordinate {
    /// Parse `"group:artifact:version"` into coordinates.
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [group, artifact, version]
                if !group.is_empty() && !artifact.is_empty() && !version.is_empty() =>
            {
                Some(Self {
                    group: (*group).to_string(),
                    artifact: (*artifact).to_string(),
                    version: (*version).to_string(),
                })
            }
            _ => None,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
    }
}

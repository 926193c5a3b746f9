use std::fmt;
use std::path::{Path, PathBuf};

use pack_core::error::{PackError, PackResult};
use pack_core::types::Locator;
use url::{ParseError, Url};

/// Where a repository is cloned from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloneSource {
    /// Absolute filesystem path
    Path(PathBuf),
    /// Absolute URL
    Url(Url),
}

impl CloneSource {
    /// Accept an absolute filesystem path or an absolute URL
    pub fn parse(location: &str) -> PackResult<Self> {
        if Path::new(location).is_absolute() {
            return Ok(CloneSource::Path(PathBuf::from(location)));
        }

        Url::parse(location)
            .map(CloneSource::Url)
            .map_err(|e| invalid(location, e))
    }

    /// Clone source for a dependency locator
    ///
    /// A location without a scheme, such as `github.com/user/repo`, is
    /// fetched over https. Opaque URLs such as `lp:project` pass through.
    pub fn for_locator(locator: &Locator) -> PackResult<Self> {
        let location = locator.location().ok_or_else(|| PackError::InvalidSource {
            location: locator.to_string(),
            reason: "the locator does not say where the repository lives".to_string(),
        })?;

        if Path::new(location).is_absolute() {
            return Ok(CloneSource::Path(PathBuf::from(location)));
        }

        match Url::parse(location) {
            Ok(url) => Ok(CloneSource::Url(url)),
            Err(ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("https://{location}"))
                .map(CloneSource::Url)
                .map_err(|e| invalid(location, e)),
            Err(e) => Err(invalid(location, e)),
        }
    }

    /// Argument handed to the clone command
    pub fn as_arg(&self) -> String {
        match self {
            CloneSource::Path(path) => path.display().to_string(),
            CloneSource::Url(url) => url.to_string(),
        }
    }
}

fn invalid(location: &str, err: ParseError) -> PackError {
    PackError::InvalidSource {
        location: location.to_string(),
        reason: err.to_string(),
    }
}

impl fmt::Display for CloneSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_arg())
    }
}

use crate::robots::ParsedRobots;
use crate::url::extract_authority;
use url::Url;

/// Path suffixes of resources that are never HTML pages
const EXCLUDED_EXTENSIONS: &[&str] = &[
    // images
    ".jpg", ".jpeg", ".png", ".gif", ".svg", ".webp", ".bmp", ".ico",
    // documents
    ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx",
    // archives and executables
    ".zip", ".rar", ".exe", ".dmg", ".iso", ".apk",
    // stylesheets, scripts, feeds
    ".css", ".js", ".json", ".xml", ".rss",
    // media
    ".mp3", ".mp4", ".avi", ".mov", ".flv", ".wav", ".webm",
    // fonts
    ".woff", ".woff2", ".ttf", ".otf", ".eot",
];

/// Administrative and infrastructure path fragments
const BLOCKED_PATHS: &[&str] = &[
    "/admin",
    "/wp-admin",
    "/administrator",
    "/manage",
    "/captcha",
    "/recaptcha",
    "/logout",
    "/signin",
    "/login",
    "/api/",
    "/static/",
    "/media/",
    "/uploads/",
    "/cdn/",
];

/// Reason a URL was refused by the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateRejection {
    /// Path ends with a non-HTML file extension
    Extension,
    /// URL carries a query string or fragment
    QueryOrFragment,
    /// Path contains an administrative/infrastructure segment
    BlockedPath,
    /// Host differs from the crawl domain
    ForeignDomain,
    /// robots.txt disallows the configured token
    RobotsDenied,
}

impl GateRejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Extension => "non-html extension",
            Self::QueryOrFragment => "query or fragment",
            Self::BlockedPath => "blocked path",
            Self::ForeignDomain => "foreign domain",
            Self::RobotsDenied => "robots.txt",
        }
    }
}

/// Decides whether a discovered URL is eligible to crawl
///
/// Checks run in a fixed order (extension, query/fragment, blocked path,
/// domain, robots.txt) and the first failing check is reported.
#[derive(Debug, Clone)]
pub struct FetchGate {
    domain: String,
    robots: ParsedRobots,
    robots_token: String,
}

impl FetchGate {
    /// Creates a gate for `domain` (host[:port]) with an allow-all robots policy
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            robots: ParsedRobots::allow_all(),
            robots_token: "*".to_string(),
        }
    }

    /// Replaces the robots policy consulted by the gate
    pub fn with_robots(mut self, robots: ParsedRobots, robots_token: impl Into<String>) -> Self {
        self.robots = robots;
        self.robots_token = robots_token.into();
        self
    }

    /// The crawl domain this gate admits
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Returns true when the URL passes every check
    pub fn is_eligible(&self, url: &Url) -> bool {
        self.check(url).is_ok()
    }

    /// Runs every check and reports the first failure
    pub fn check(&self, url: &Url) -> Result<(), GateRejection> {
        let path = url.path().to_lowercase();

        if EXCLUDED_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
            return Err(GateRejection::Extension);
        }

        if url.query().is_some() || url.fragment().is_some() {
            return Err(GateRejection::QueryOrFragment);
        }

        if BLOCKED_PATHS.iter().any(|blocked| path.contains(blocked)) {
            return Err(GateRejection::BlockedPath);
        }

        if extract_authority(url).as_deref() != Some(self.domain.as_str()) {
            return Err(GateRejection::ForeignDomain);
        }

        if !self.robots.is_allowed(url.as_str(), &self.robots_token) {
            return Err(GateRejection::RobotsDenied);
        }

        Ok(())
    }
}

//! Fixed lookup tables used by the handlers.
//!
//! All tables are plain ordered slices.  Order matters wherever more than
//! one entry could match the same text.

use std::collections::HashMap;

use jarvis_adapters::{LaunchCommand, Platform};

// ---------------------------------------------------------------------------
// Websites and search
// ---------------------------------------------------------------------------

/// Curated site name -> URL.
pub const SITE_URLS: &[(&str, &str)] = &[
    ("youtube", "https://www.youtube.com"),
    ("gmail", "https://mail.google.com"),
    ("github", "https://github.com"),
    ("reddit", "https://reddit.com"),
    ("twitter", "https://twitter.com"),
    ("facebook", "https://facebook.com"),
    ("linkedin", "https://linkedin.com"),
    ("instagram", "https://instagram.com"),
    ("netflix", "https://netflix.com"),
    ("amazon", "https://amazon.com"),
    ("google", "https://www.google.com"),
    ("wikipedia", "https://www.wikipedia.org"),
    ("stackoverflow", "https://stackoverflow.com"),
    ("medium", "https://medium.com"),
    ("twitch", "https://www.twitch.tv"),
    ("discord", "https://discord.com"),
    ("spotify", "https://open.spotify.com"),
];

/// Sites with their own search endpoint, probed in this order.
pub const SEARCH_ENDPOINTS: &[(&str, &str)] = &[
    ("youtube", "https://www.youtube.com/results?search_query="),
    ("reddit", "https://www.reddit.com/search/?q="),
    ("github", "https://github.com/search?q="),
];

/// Generic web search endpoint.
pub const WEB_SEARCH_URL: &str = "https://www.google.com/search?q=";

/// The page opened for "new tab" requests.
pub const BLANK_PAGE: &str = "about:blank";

/// Resolve a spoken site name to a URL.
///
/// Curated names map to their fixed URL.  Anything else without a scheme is
/// synthesized: a bare word becomes `https://www.<word>.com`, a dotted name
/// gets an `https://` prefix.
pub fn site_url(target: &str) -> String {
    if target == BLANK_PAGE {
        return BLANK_PAGE.to_owned();
    }

    if let Some((_, url)) = SITE_URLS.iter().find(|(name, _)| *name == target) {
        return (*url).to_owned();
    }

    if target.starts_with("http://") || target.starts_with("https://") {
        target.to_owned()
    } else if target.contains('.') {
        format!("https://{target}")
    } else {
        format!("https://www.{target}.com")
    }
}

/// The name shown to the user for an opened URL: the host (and explicit
/// port) without `www.`.
pub fn display_name(url: &str) -> String {
    let Ok(parsed) = url::Url::parse(url) else {
        return url.to_owned();
    };
    let Some(host) = parsed.host_str() else {
        return url.to_owned();
    };

    let host = host.strip_prefix("www.").unwrap_or(host);
    match parsed.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_owned(),
    }
}

/// Build the search URL for a query.
///
/// Returns `(url, effective_query)`.  An "on <site>" or "<site> for"
/// qualifier for a site in [`SEARCH_ENDPOINTS`] is stripped from the query
/// and routes the search to that site.  Spaces are encoded as `+`.
pub fn search_url(query: &str) -> (String, String) {
    let lowered = query.to_lowercase();

    for (site, endpoint) in SEARCH_ENDPOINTS {
        let on_site = format!("on {site}");
        let site_for = format!("{site} for");
        if lowered.contains(&on_site) || lowered.contains(&site_for) {
            let stripped = lowered
                .replace(&on_site, "")
                .replace(&site_for, "")
                .trim()
                .to_owned();
            let url = format!("{endpoint}{}", stripped.replace(' ', "+"));
            return (url, stripped);
        }
    }

    let url = format!("{WEB_SEARCH_URL}{}", query.replace(' ', "+"));
    (url, query.to_owned())
}

// ---------------------------------------------------------------------------
// Applications
// ---------------------------------------------------------------------------

/// Spoken confirmations for curated applications.
pub const APP_RESPONSES: &[(&str, &str)] = &[
    ("chrome", "Opening Chrome for you"),
    ("firefox", "Launching Firefox"),
    ("edge", "Starting Edge"),
    ("vscode", "Opening VS Code"),
    ("terminal", "Opening terminal"),
];

/// The confirmation spoken after launching `app`.
pub fn app_response(app: &str) -> String {
    APP_RESPONSES
        .iter()
        .find(|(name, _)| *name == app)
        .map(|(_, reply)| (*reply).to_owned())
        .unwrap_or_else(|| format!("Opening {app}"))
}

/// Logical application name -> launch command, for one platform.
#[derive(Debug, Clone)]
pub struct AppCommandTable {
    platform: Platform,
    commands: HashMap<&'static str, String>,
}

impl AppCommandTable {
    /// Build the table for `platform`.
    pub fn for_platform(platform: Platform) -> Self {
        let entries: [(&'static str, &str); 7] = match platform {
            Platform::Windows => [
                ("chrome", "chrome"),
                ("firefox", "firefox"),
                ("edge", "msedge"),
                ("vscode", "code"),
                ("terminal", "cmd"),
                ("notepad", "notepad"),
                ("calculator", "calc"),
            ],
            Platform::Wsl => [
                (
                    "chrome",
                    "/mnt/c/Program Files/Google/Chrome/Application/chrome.exe",
                ),
                ("firefox", "/mnt/c/Program Files/Mozilla Firefox/firefox.exe"),
                (
                    "edge",
                    "/mnt/c/Program Files (x86)/Microsoft/Edge/Application/msedge.exe",
                ),
                ("vscode", "code"),
                ("terminal", "gnome-terminal"),
                ("notepad", "notepad"),
                ("calculator", "calc"),
            ],
            Platform::Linux => [
                ("chrome", "google-chrome"),
                ("firefox", "firefox"),
                ("edge", "microsoft-edge"),
                ("vscode", "code"),
                ("terminal", "gnome-terminal"),
                ("notepad", "notepad"),
                ("calculator", "calc"),
            ],
            Platform::MacOs => [
                ("chrome", "Google Chrome"),
                ("firefox", "Firefox"),
                ("edge", "Microsoft Edge"),
                ("vscode", "Visual Studio Code"),
                ("terminal", "Terminal"),
                ("notepad", "TextEdit"),
                ("calculator", "Calculator"),
            ],
            Platform::Other => [
                ("chrome", "chrome"),
                ("firefox", "firefox"),
                ("edge", "edge"),
                ("vscode", "code"),
                ("terminal", "terminal"),
                ("notepad", "notepad"),
                ("calculator", "calc"),
            ],
        };

        Self {
            platform,
            commands: entries
                .into_iter()
                .map(|(name, command)| (name, command.to_owned()))
                .collect(),
        }
    }

    /// The platform this table was built for.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// The raw command registered for `app`, if any.
    pub fn command(&self, app: &str) -> Option<&str> {
        self.commands.get(app).map(String::as_str)
    }

    /// Resolve `app` to a launch command.  Unknown apps launch their own
    /// name verbatim.
    pub fn resolve(&self, app: &str) -> LaunchCommand {
        let command = self.command(app).unwrap_or(app);

        match self.platform {
            // Windows executables run directly; everything else goes through
            // the Windows shell so app aliases resolve.
            Platform::Wsl if command.ends_with(".exe") => LaunchCommand::program(command)
                .with_fallback_paths(wsl_fallback_paths(app)),
            Platform::Wsl => LaunchCommand::program("cmd.exe")
                .arg("/c")
                .arg("start")
                .arg(app),
            Platform::MacOs if self.commands.contains_key(app) => {
                LaunchCommand::program("open").arg("-a").arg(command)
            }
            _ => LaunchCommand::program(command),
        }
    }
}

/// Alternative install locations probed for a WSL `.exe` that is missing.
fn wsl_fallback_paths(app: &str) -> Vec<String> {
    let mut chars = app.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };

    vec![
        format!("/mnt/c/Program Files/{capitalized}/{app}.exe"),
        format!("/mnt/c/Program Files (x86)/{capitalized}/{app}.exe"),
    ]
}

// ---------------------------------------------------------------------------
// Conversation
// ---------------------------------------------------------------------------

/// Canned replies for small talk, probed in order against the raw text.
pub const CANNED_REPLIES: &[(&str, &str)] = &[
    (
        "your name",
        "I'm JARVIS, your personal assistant. I'm here to help with searches, opening apps, \
         and managing your workflow.",
    ),
    (
        "who are you",
        "I'm JARVIS. Think of me as your digital companion who's here to make your life easier.",
    ),
    (
        "how are you",
        "I'm doing great, thanks! What can I help you with?",
    ),
    (
        "what can you do",
        "I can open apps, search the web, tell you the time, open websites, and automate tasks. \
         Try saying 'open YouTube' or 'search for AI news'!",
    ),
    (
        "help",
        "I'm here to help! Just ask me to open apps like Chrome, search the web, open websites \
         like YouTube, or check the time. What would you like to try?",
    ),
    ("thank you", "You're welcome! Anytime you need me, just ask."),
    ("thanks", "My pleasure! I'm always here if you need anything."),
];

/// Reply when an information request has nothing to act on.
pub const LISTENING_PROMPT: &str =
    "I'm listening! Just ask me to open apps, search the web, or check the time.";

/// Placeholder returned while the conversational AI composes the real reply.
pub const THINKING_PLACEHOLDER: &str = "Let me think about that...";

/// First canned reply whose key occurs in `lowered`.
pub fn canned_reply(lowered: &str) -> Option<&'static str> {
    CANNED_REPLIES
        .iter()
        .find(|(key, _)| lowered.contains(key))
        .map(|(_, reply)| *reply)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Platform capability descriptor.
//!
//! Resolved once at startup from the user agent and display-mode signals.
//! Nothing else in the crate inspects the user agent.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Operating system family, as far as install flows care
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
    Windows,
    Mac,
    Desktop,
}

impl Platform {
    pub fn is_mobile(&self) -> bool {
        matches!(self, Platform::Ios | Platform::Android)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Ios => "ios",
            Platform::Android => "android",
            Platform::Windows => "windows",
            Platform::Mac => "mac",
            Platform::Desktop => "desktop",
        };
        f.write_str(name)
    }
}

/// Browser engine family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    Chrome,
    Edge,
    Firefox,
    Safari,
    Other,
}

/// Raw signals a host reports about how the app is being displayed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplaySignals {
    /// `(display-mode: standalone)` media query matched
    pub display_mode_standalone: bool,
    /// iOS `navigator.standalone`; `None` where the property does not exist
    pub navigator_standalone: Option<bool>,
    /// `document.referrer`
    pub referrer: String,
}

impl DisplaySignals {
    /// True when running inside an installed shell.
    pub fn is_standalone_instance(&self) -> bool {
        self.display_mode_standalone
            || self.navigator_standalone == Some(true)
            || self.referrer.starts_with("android-app://")
    }
}

/// Capabilities of the current platform, resolved once per session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformCapabilities {
    /// The platform exposes a deferred install prompt
    pub supports_prompt: bool,
    pub platform: Platform,
    pub browser: Browser,
    /// Already running as an installed instance
    pub standalone: bool,
}

impl PlatformCapabilities {
    /// Resolve capabilities from a user agent string and display signals.
    ///
    /// `supports_prompt` reflects whether the host can deliver a deferred
    /// install handle at all (service worker + install-prompt event).
    pub fn detect(user_agent: &str, signals: &DisplaySignals, supports_prompt: bool) -> Self {
        let ua = user_agent.to_ascii_lowercase();

        let platform = if ua.contains("iphone") || ua.contains("ipad") || ua.contains("ipod") {
            Platform::Ios
        } else if ua.contains("android") {
            Platform::Android
        } else if ua.contains("windows") {
            Platform::Windows
        } else if ua.contains("mac") {
            Platform::Mac
        } else {
            Platform::Desktop
        };

        // Order matters: Edge and Chrome both claim "chrome", every engine claims "safari"
        let browser = if ua.contains("edg/") || ua.contains("edge/") {
            Browser::Edge
        } else if ua.contains("firefox") || ua.contains("fxios") {
            Browser::Firefox
        } else if ua.contains("chrome") || ua.contains("chromium") || ua.contains("crios") {
            Browser::Chrome
        } else if ua.contains("safari") {
            Browser::Safari
        } else {
            Browser::Other
        };

        Self {
            supports_prompt,
            platform,
            browser,
            standalone: signals.is_standalone_instance(),
        }
    }

    /// Capabilities of a host with no install support at all
    pub fn unsupported(platform: Platform) -> Self {
        Self {
            supports_prompt: false,
            platform,
            browser: Browser::Other,
            standalone: false,
        }
    }

    pub fn is_standalone_instance(&self) -> bool {
        self.standalone
    }

    /// Manual install instructions for when no prompt is available
    pub fn install_instructions(&self) -> &'static str {
        match (self.platform, self.browser) {
            (Platform::Ios, _) => {
                "iOS: Toca el botón de compartir y selecciona \"Añadir a la pantalla de inicio\""
            }
            (Platform::Android, Browser::Chrome) => {
                "Android Chrome: Toca el menú (3 puntos) y selecciona \"Añadir a la pantalla de inicio\""
            }
            (Platform::Android, Browser::Firefox) => {
                "Android Firefox: Toca el menú y selecciona \"Instalar\""
            }
            (Platform::Android, _) => {
                "Android: Busca la opción \"Añadir a la pantalla de inicio\" en el menú del navegador"
            }
            (Platform::Windows, _) => {
                "Windows: Haz clic en el icono de instalación en la barra de direcciones"
            }
            (Platform::Mac, _) => {
                "Mac: Haz clic en el icono de instalación en la barra de direcciones"
            }
            (Platform::Desktop, _) => {
                "Busca la opción \"Instalar app\" o \"Añadir a la pantalla de inicio\" en tu navegador"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IPHONE_SAFARI: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";
    const ANDROID_CHROME: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Mobile Safari/537.36";
    const WINDOWS_EDGE: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36 Edg/120.0";
    const ANDROID_FIREFOX: &str = "Mozilla/5.0 (Android 14; Mobile; rv:121.0) Gecko/121.0 Firefox/121.0";

    #[test]
    fn test_detect_platforms() {
        let signals = DisplaySignals::default();

        let ios = PlatformCapabilities::detect(IPHONE_SAFARI, &signals, false);
        assert_eq!(ios.platform, Platform::Ios);
        assert_eq!(ios.browser, Browser::Safari);

        let android = PlatformCapabilities::detect(ANDROID_CHROME, &signals, true);
        assert_eq!(android.platform, Platform::Android);
        assert_eq!(android.browser, Browser::Chrome);

        let edge = PlatformCapabilities::detect(WINDOWS_EDGE, &signals, true);
        assert_eq!(edge.platform, Platform::Windows);
        assert_eq!(edge.browser, Browser::Edge);

        let firefox = PlatformCapabilities::detect(ANDROID_FIREFOX, &signals, false);
        assert_eq!(firefox.browser, Browser::Firefox);
        assert!(firefox.install_instructions().starts_with("Android Firefox"));
    }

    #[test]
    fn test_standalone_signals() {
        assert!(!DisplaySignals::default().is_standalone_instance());

        let display_mode = DisplaySignals {
            display_mode_standalone: true,
            ..Default::default()
        };
        assert!(display_mode.is_standalone_instance());

        let ios = DisplaySignals {
            navigator_standalone: Some(true),
            ..Default::default()
        };
        assert!(ios.is_standalone_instance());

        let ios_browser = DisplaySignals {
            navigator_standalone: Some(false),
            ..Default::default()
        };
        assert!(!ios_browser.is_standalone_instance());

        let twa = DisplaySignals {
            referrer: "android-app://com.example.cards/".to_string(),
            ..Default::default()
        };
        assert!(twa.is_standalone_instance());
    }

    #[test]
    fn test_instructions_per_platform() {
        let ios = PlatformCapabilities::unsupported(Platform::Ios);
        assert!(ios.install_instructions().starts_with("iOS"));
        let desktop = PlatformCapabilities::unsupported(Platform::Desktop);
        assert!(desktop.install_instructions().contains("Instalar app"));
    }
}

//! Card page variants.
//!
//! Each variant is a separate public route with its own title decoration and
//! fallback copy. Metadata publishing is otherwise identical.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Visual flavour of a public card page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardVariant {
    #[default]
    Classic,
    Futuristic,
    Tres,
}

impl CardVariant {
    pub const ALL: [CardVariant; 3] = [
        CardVariant::Classic,
        CardVariant::Futuristic,
        CardVariant::Tres,
    ];

    /// First path segment of the public route (`/{prefix}/{slug}`)
    pub fn route_prefix(&self) -> &'static str {
        match self {
            CardVariant::Classic => "tarjeta",
            CardVariant::Futuristic => "futuristic",
            CardVariant::Tres => "tres",
        }
    }

    /// Label used when the card has no name
    pub fn fallback_name(&self) -> &'static str {
        match self {
            CardVariant::Classic | CardVariant::Tres => "Tarjeta Digital",
            CardVariant::Futuristic => "Tarjeta Futurista",
        }
    }

    /// Page title shown when the card cannot be displayed
    pub fn not_found_title(&self) -> &'static str {
        match self {
            CardVariant::Classic | CardVariant::Tres => "Tarjeta no encontrada",
            CardVariant::Futuristic => "Tarjeta Futurista no encontrada",
        }
    }

    /// Decorate `"{name} - {title}"` for the page title
    pub fn decorate_title(&self, base: &str) -> String {
        match self {
            CardVariant::Classic | CardVariant::Tres => base.to_string(),
            CardVariant::Futuristic => format!("🚀 {} [FUTURISTIC]", base),
        }
    }

    /// Suffix appended to `og:site_name`
    pub fn site_name_suffix(&self) -> &'static str {
        match self {
            CardVariant::Futuristic => " [FUTURISTIC]",
            CardVariant::Classic | CardVariant::Tres => "",
        }
    }

    /// Keywords that describe the variant itself
    pub fn base_keywords(&self) -> &'static [&'static str] {
        match self {
            CardVariant::Classic | CardVariant::Tres => &[
                "tarjeta digital",
                "tarjeta de presentación",
                "contacto profesional",
                "perfil profesional",
            ],
            CardVariant::Futuristic => &[
                "tarjeta digital futurista",
                "perfil cyberpunk",
                "contacto holográfico",
                "interfaz futurista",
                "experiencia cyber",
                "tarjeta 3D",
            ],
        }
    }
}

impl fmt::Display for CardVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CardVariant::Classic => "classic",
            CardVariant::Futuristic => "futuristic",
            CardVariant::Tres => "tres",
        };
        f.write_str(name)
    }
}

impl FromStr for CardVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "classic" | "tarjeta" => Ok(CardVariant::Classic),
            "futuristic" => Ok(CardVariant::Futuristic),
            "tres" => Ok(CardVariant::Tres),
            other => Err(format!("unknown card variant: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variants() {
        assert_eq!("classic".parse::<CardVariant>(), Ok(CardVariant::Classic));
        assert_eq!("Futuristic".parse::<CardVariant>(), Ok(CardVariant::Futuristic));
        assert_eq!("tarjeta".parse::<CardVariant>(), Ok(CardVariant::Classic));
        assert!("holo".parse::<CardVariant>().is_err());
    }

    #[test]
    fn test_display_roundtrips() {
        for variant in CardVariant::ALL {
            assert_eq!(variant.to_string().parse::<CardVariant>(), Ok(variant));
        }
    }

    #[test]
    fn test_futuristic_decoration() {
        assert_eq!(
            CardVariant::Futuristic.decorate_title("Ana - Arquitecta"),
            "🚀 Ana - Arquitecta [FUTURISTIC]"
        );
        assert_eq!(CardVariant::Classic.decorate_title("Ana"), "Ana");
    }
}

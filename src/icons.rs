//! Icon service for managing different icon themes
//!
//! Centralizes the glyphs used throughout the TUI, with an emoji theme and an
//! ASCII fallback for terminals without good glyph support.

use serde::{Deserialize, Serialize};

/// Icon theme variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum IconTheme {
    /// Emoji icons (colorful, modern look)
    Emoji,
    /// ASCII characters (maximum compatibility)
    #[default]
    Ascii,
}

/// Verification check state icons
#[derive(Debug, Clone)]
pub struct CheckIcons {
    pub pending: &'static str,
    pub checking: &'static str,
    pub success: &'static str,
    pub error: &'static str,
}

/// Budget status icons
#[derive(Debug, Clone)]
pub struct BudgetIcons {
    pub draft: &'static str,
    pub presented: &'static str,
    pub accepted: &'static str,
    pub rejected: &'static str,
}

/// UI element icons
#[derive(Debug, Clone)]
pub struct UiIcons {
    pub project: &'static str,
    pub document: &'static str,
    pub overlay_visible: &'static str,
    pub overlay_hidden: &'static str,
    pub version_active: &'static str,
    pub error: &'static str,
    pub info: &'static str,
}

/// Icon service providing themed glyph sets
#[derive(Debug, Clone, Default)]
pub struct IconService {
    theme: IconTheme,
}

impl IconService {
    pub fn new(theme: IconTheme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> IconTheme {
        self.theme
    }

    pub fn check(&self) -> CheckIcons {
        match self.theme {
            IconTheme::Emoji => CheckIcons {
                pending: "▫",
                checking: "🔄",
                success: "✅",
                error: "❌",
            },
            IconTheme::Ascii => CheckIcons {
                pending: "[ ]",
                checking: "[~]",
                success: "[x]",
                error: "[!]",
            },
        }
    }

    pub fn budget(&self) -> BudgetIcons {
        match self.theme {
            IconTheme::Emoji => BudgetIcons {
                draft: "📝",
                presented: "📤",
                accepted: "✅",
                rejected: "⛔",
            },
            IconTheme::Ascii => BudgetIcons {
                draft: "d",
                presented: "p",
                accepted: "A",
                rejected: "R",
            },
        }
    }

    pub fn ui(&self) -> UiIcons {
        match self.theme {
            IconTheme::Emoji => UiIcons {
                project: "🏗",
                document: "📄",
                overlay_visible: "👁",
                overlay_hidden: "·",
                version_active: "★",
                error: "❌",
                info: "ℹ",
            },
            IconTheme::Ascii => UiIcons {
                project: "#",
                document: "-",
                overlay_visible: "*",
                overlay_hidden: ".",
                version_active: "*",
                error: "!",
                info: "i",
            },
        }
    }

    /// Glyph for a weather condition string as reported by the backend.
    pub fn weather(&self, condition: &str) -> &'static str {
        let emoji = matches!(self.theme, IconTheme::Emoji);
        match condition.to_lowercase().as_str() {
            "clear" | "sunny" => {
                if emoji {
                    "☀"
                } else {
                    "(sun)"
                }
            }
            "cloudy" | "overcast" => {
                if emoji {
                    "☁"
                } else {
                    "(cloud)"
                }
            }
            "rain" | "drizzle" => {
                if emoji {
                    "🌧"
                } else {
                    "(rain)"
                }
            }
            "storm" | "thunderstorm" => {
                if emoji {
                    "⛈"
                } else {
                    "(storm)"
                }
            }
            _ => {
                if emoji {
                    "🌡"
                } else {
                    "(--)"
                }
            }
        }
    }
}

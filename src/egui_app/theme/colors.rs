//! Color Constants
//!
//! Every colour the UI uses. Views never build colours inline.

use eframe::egui::Color32;

/// Top bar background - Dark brown
pub const TOP_BAR_BG: Color32 = Color32::from_rgb(0x3E, 0x2A, 0x24);

/// Dark background for main areas
pub const BG_DARK: Color32 = Color32::from_rgb(0x2F, 0x1E, 0x1A);

/// Document card background - Off-white
pub const CARD_BG: Color32 = Color32::from_rgb(0xF7, 0xF2, 0xEC);

/// Document card hovered
pub const CARD_HOVER: Color32 = Color32::from_rgb(0xEA, 0xDB, 0xC8);

/// Card and dialog border - Muted brown
pub const BORDER: Color32 = Color32::from_rgb(0xC7, 0xB2, 0x9A);

/// Form field background - Light tan
pub const INPUT_BG: Color32 = Color32::from_rgb(0xE6, 0xD7, 0xC7);

/// Text on dark backgrounds
pub const TEXT_LIGHT: Color32 = Color32::from_rgb(0xF0, 0xE0, 0xD6);

/// Text on light backgrounds
pub const TEXT_DARK: Color32 = Color32::from_rgb(0x2F, 0x1E, 0x1A);

/// Secondary text color (muted)
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0x8B, 0x7B, 0x6B);

/// Timestamp text color
pub const TIMESTAMP: Color32 = Color32::from_rgb(0x8B, 0x7B, 0x6B);

/// Accent color for primary actions
pub const ACCENT: Color32 = Color32::from_rgb(0x5C, 0x3A, 0x2C);

/// Selection highlight
pub const SELECTION: Color32 = Color32::from_rgb(0x4A, 0x2E, 0x22);

/// Success color - Green
pub const SUCCESS: Color32 = Color32::from_rgb(0x4C, 0xAF, 0x50);

/// Error color - Red
pub const ERROR: Color32 = Color32::from_rgb(0xE5, 0x73, 0x73);

/// Destructive buttons
pub const DANGER: Color32 = Color32::from_rgb(0xB7, 0x3A, 0x3A);

/// Informational toasts
pub const INFO: Color32 = Color32::from_rgb(0x5B, 0x7F, 0xA6);

/// Public visibility badge
pub const BADGE_PUBLIC: Color32 = Color32::from_rgb(0x4C, 0xAF, 0x50);

/// Private visibility badge
pub const BADGE_PRIVATE: Color32 = Color32::from_rgb(0x9E, 0x9E, 0x9E);

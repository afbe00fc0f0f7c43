//! Shared color constants for the UI.

use egui::Color32;

/// Forest green for the signed-in status.
pub const COLOR_GREEN: Color32 = Color32::from_rgb(34, 139, 34);

/// Red for field errors and the sign-in error banner.
pub const COLOR_RED: Color32 = Color32::from_rgb(220, 53, 69);

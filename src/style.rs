/// Fixed color palette shared by every sheet builder. Colors carry semantic
/// meaning (success/warning/danger/info) and must stay consistent across
/// sheets, so builders receive this struct by reference instead of picking
/// their own hex values.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub success: &'static str,
    pub warning: &'static str,
    pub danger: &'static str,
    pub purple: &'static str,
    pub light_bg: &'static str,
    pub header_bg: &'static str,
    /// Muted gray for captions and units.
    pub muted: &'static str,
    /// Body text on light backgrounds.
    pub body: &'static str,
    /// Thin grid border color.
    pub grid: &'static str,
    pub success_tint: &'static str,
    pub info_tint: &'static str,
    pub warning_tint: &'static str,
    pub danger_tint: &'static str,
}

impl Palette {
    pub const DEFAULT: Palette = Palette {
        primary: "1E3A8A",
        secondary: "3B82F6",
        success: "10B981",
        warning: "F59E0B",
        danger: "EF4444",
        purple: "8B5CF6",
        light_bg: "F3F4F6",
        header_bg: "1E40AF",
        muted: "6B7280",
        body: "374151",
        grid: "D1D5DB",
        success_tint: "D1FAE5",
        info_tint: "DBEAFE",
        warning_tint: "FEF3C7",
        danger_tint: "FEE2E2",
    };
}

impl Default for Palette {
    fn default() -> Self {
        Palette::DEFAULT
    }
}

use ratatui::style::Color;

pub const PRIMARY: Color = Color::from_u32(0x0034d399);
pub const SECONDARY: Color = Color::from_u32(0x00059669);
pub const NEUTRAL: Color = Color::from_u32(0x00525252);
pub const MUTED: Color = Color::from_u32(0x00a3a3a3);
pub const BACKGROUND: Color = Color::from_u32(0x00050505);
pub const CROSSES: Color = Color::from_u32(0x00143326);
pub const ACCENT: Color = Color::from_u32(0x003b82f6);
pub const ERROR: Color = Color::from_u32(0x00f87171);

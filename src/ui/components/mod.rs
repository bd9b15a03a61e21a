pub mod background;
pub mod sidebar;
pub mod spinner;

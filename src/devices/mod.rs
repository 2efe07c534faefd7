pub mod xbox360;
pub mod xbox360_layout;

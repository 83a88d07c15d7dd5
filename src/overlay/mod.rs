pub mod console;
pub mod controller;
pub mod focus_trail;
pub mod frame;
pub mod hotkey;
pub mod host;
pub mod html;
pub mod layer;

pub mod collector;
pub mod identity;
pub mod inspect_model;
pub mod inspector;
pub mod issues;
pub mod naming;
pub mod tab_order;

pub mod app;
pub mod battle_log;
pub mod settings_modal;
pub mod slot_panel;
pub mod stage_canvas;
pub mod stats_panel;
pub mod upgrade_panel;

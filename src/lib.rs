pub mod api;
pub mod app;
pub mod dto;
pub mod format;
pub mod state;

pub mod views {
    pub mod create;
    pub mod detail;
    pub mod list;
}

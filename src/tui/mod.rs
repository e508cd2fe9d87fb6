pub mod app;
pub mod desk;
pub mod forms;
pub mod prompt;
pub mod view;

pub use app::App;

mod interactive;
mod list;
mod migrations;
mod show;

// List commands
pub use list::run_list;

// Show commands
pub use show::{run_show_all, run_show_table};

// Interactive commands
pub use interactive::run_interactive;

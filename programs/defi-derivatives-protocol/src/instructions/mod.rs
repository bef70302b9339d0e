pub mod close_option;
pub mod create_option;
pub mod exercise_option;
pub mod initialize;
pub mod set_admin;

pub use {
    close_option::*, create_option::*, exercise_option::*, initialize::*, set_admin::*,
};

pub mod gate;
pub mod walk;

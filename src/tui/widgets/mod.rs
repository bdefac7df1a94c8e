pub mod alert;
pub mod clock;
pub mod ring;

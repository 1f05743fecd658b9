pub mod collision;
pub mod contacts;
pub mod forces;

pub mod check;
pub mod solve;

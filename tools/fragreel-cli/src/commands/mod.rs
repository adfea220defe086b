pub mod check;
pub mod clips;
pub mod locate;
